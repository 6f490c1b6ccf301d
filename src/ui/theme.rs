use ratatui::style::{Color, Modifier, Style};

use crate::layout::band::Band;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub ok: Color,
    pub warn: Color,
    pub critical: Color,
    pub fill_text: Color,
}

impl Theme {
    /// Resolves a theme name; `auto` honors `NO_COLOR`.
    pub fn from_config(name: &str) -> Self {
        Self::resolve(name, no_color_requested())
    }

    fn resolve(name: &str, no_color: bool) -> Self {
        match name.to_lowercase().as_str() {
            "classic" => Self::classic(),
            "vivid" => Self::vivid(),
            "mono" | "monochrome" => Self::mono(),
            _ if no_color => Self::mono(),
            _ => Self::classic(),
        }
    }

    pub fn classic() -> Self {
        Theme {
            name: "classic",
            ok: Color::Green,
            warn: Color::Yellow,
            critical: Color::Red,
            fill_text: Color::Black,
        }
    }

    pub fn vivid() -> Self {
        Theme {
            name: "vivid",
            ok: Color::Rgb(16, 185, 129),
            warn: Color::Rgb(249, 115, 22),
            critical: Color::Rgb(239, 68, 68),
            fill_text: Color::Rgb(17, 24, 39),
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            ok: Color::Gray,
            warn: Color::Gray,
            critical: Color::Gray,
            fill_text: Color::Black,
        }
    }

    pub fn band_color(&self, band: Band) -> Color {
        match band {
            Band::Ok => self.ok,
            Band::Warn => self.warn,
            Band::Critical => self.critical,
        }
    }

    pub fn bar_plain(&self, band: Band) -> Style {
        Style::default()
            .fg(self.band_color(band))
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn bar_filled(&self, band: Band) -> Style {
        Style::default()
            .fg(self.fill_text)
            .bg(self.band_color(band))
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn metric(&self, band: Band) -> Style {
        Style::default().fg(self.band_color(band))
    }

    pub fn table_header(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}
