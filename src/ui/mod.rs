pub mod bar;
pub mod composer;
pub mod theme;

use ratatui::Frame;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let _draw_span = tracing::debug_span!("ui.draw").entered();
    frame.render_widget(Paragraph::new(app.frame_text()), frame.area());
}

pub fn plain_text(text: &Text) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests;
