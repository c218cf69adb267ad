//! Application state for the terminal preview.
//!
//! `App` owns the page being previewed plus everything the keyboard can
//! change: which section has focus, the selection in each list, the theme and
//! the lightbox.  Drawing lives in [`crate::ui`], key mapping in
//! [`crate::input`].

use ratatui::widgets::ListState;
use tracing::warn;

use crate::fetch::FetchMsg;
use crate::gallery::Lightbox;
use crate::page::{ClickOrigin, Page};
use crate::theme::{Theme, ThemeStore};

/// Which half of the page has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Projects,
    Writing,
}

pub struct App {
    pub page: Page,
    pub theme: Theme,
    theme_store: ThemeStore,
    pub lightbox: Lightbox,
    pub section: Section,
    pub project_state: ListState,
    pub writing_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last status message.
    pub status: String,
}

impl App {
    pub fn new(page: Page, theme_store: ThemeStore, lightbox: Lightbox) -> Self {
        let theme = theme_store.load();
        Self {
            page,
            theme,
            theme_store,
            lightbox,
            section: Section::Projects,
            project_state: ListState::default(),
            writing_state: ListState::default(),
            quit: false,
            status: "Loading feeds…".into(),
        }
    }

    /// Apply one pipeline result and report it in the status bar.
    pub fn handle_fetch(&mut self, msg: FetchMsg) {
        self.status = msg.summary();
        msg.apply(&mut self.page);
    }

    // -- focus ---------------------------------------------------------------

    pub fn switch_section(&mut self) {
        self.section = match self.section {
            Section::Projects => Section::Writing,
            Section::Writing => Section::Projects,
        };
    }

    fn focused(&mut self) -> (usize, &mut ListState) {
        match self.section {
            Section::Projects => (self.page.projects.slots().len(), &mut self.project_state),
            Section::Writing => (self.page.writing.cards().len(), &mut self.writing_state),
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        let (len, state) = self.focused();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        let (len, state) = self.focused();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        let (len, state) = self.focused();
        if len > 0 {
            state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let (len, state) = self.focused();
        if len > 0 {
            state.select(Some(len - 1));
        }
    }

    /// Link the selected card would open, if any.
    pub fn selected_link(&self) -> Option<&str> {
        match self.section {
            Section::Projects => self
                .project_state
                .selected()
                .and_then(|i| self.page.projects.slots().get(i))
                .and_then(|card| card.link.as_deref()),
            Section::Writing => self
                .writing_state
                .selected()
                .and_then(|i| self.page.writing.cards().get(i))
                .and_then(|card| card.click_target(ClickOrigin::Card)),
        }
    }

    pub fn open_selected(&mut self) {
        self.status = match self.selected_link() {
            Some(link) => format!("Open in browser: {link}"),
            None => "Nothing to open".into(),
        };
    }

    // -- theme ---------------------------------------------------------------

    pub fn toggle_theme(&mut self) {
        let next = self.theme.toggled();
        match self.theme_store.save(next) {
            Ok(()) => self.status = format!("Theme: {next}"),
            Err(e) => {
                warn!(error = %e, path = %self.theme_store.path().display(), "could not persist theme");
                self.status = format!("Theme: {next} (not saved: {e})");
            }
        }
        self.theme = next;
    }

    // -- lightbox ------------------------------------------------------------

    pub fn open_lightbox(&mut self) {
        if self.lightbox.is_empty() {
            self.status = "No photos configured".into();
        } else {
            self.lightbox.open(self.lightbox.position());
        }
    }
}
