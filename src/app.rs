use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::Text;

use crate::action::Action;
use crate::system::snapshot::MetricsSnapshot;
use crate::ui::composer::{compose_frame, loading_frame};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub latest_snapshot: Option<Arc<MetricsSnapshot>>,
}

pub struct App {
    pub running: bool,
    pub view: ViewState,
    pub theme: Theme,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        App {
            running: true,
            view: ViewState::default(),
            theme,
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::None => {}
        }
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.view.terminal_width = width;
        self.view.terminal_height = height;
    }

    pub fn on_snapshot(&mut self, snapshot: Arc<MetricsSnapshot>) {
        self.view.latest_snapshot = Some(snapshot);
    }

    pub fn frame_text(&self) -> Text<'static> {
        match &self.view.latest_snapshot {
            Some(snapshot) => compose_frame(
                snapshot,
                self.view.terminal_width,
                self.view.terminal_height,
                &self.theme,
            ),
            None => loading_frame(),
        }
    }
}
