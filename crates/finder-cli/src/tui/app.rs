//! Application state and main event loop.

use std::io::Stdout;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use finder_core::{
    AnalysisError, AnalysisProgress, AnalysisResult, AnalysisRunner, Config, Criteria,
    FavoritesRepository, FilterMode, FilterSelection, LLMConfig, Screen, Session,
};

use super::event::{Event, EventHandler};
use super::ui;

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a new custom filter
    Editing,
}

/// Status of a progress item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStatus {
    #[default]
    Pending,
    InProgress,
    Complete,
    Failed,
}

impl ProgressStatus {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pending => "○",
            Self::InProgress => "◐",
            Self::Complete => "●",
            Self::Failed => "✗",
        }
    }
}

/// A step of the running analysis.
#[derive(Debug, Clone)]
pub struct ProgressItem {
    pub label: String,
    pub status: ProgressStatus,
}

impl ProgressItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: ProgressStatus::Pending,
        }
    }
}

/// Main application state.
pub struct App {
    /// Screen, current result, error banner and favorites
    pub session: Session<Box<dyn FavoritesRepository>>,
    /// Criteria being edited on the search screen
    pub selection: FilterSelection,
    pub input_mode: InputMode,
    /// New custom filter being typed
    pub input_buffer: String,
    pub progress_items: Vec<ProgressItem>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Scroll offset of the report
    pub scroll_offset: u16,
    /// Highlighted suggestion chip
    pub selected_suggestion: usize,
    /// Highlighted row on the favorites screen
    pub selected_favorite: usize,
    pub spinner_frame: usize,
    /// Whether the shown result is saved; refreshed on change, not per frame
    pub current_favorited: bool,
    config: Config,
}

impl App {
    pub fn new(config: Config, favorites: Box<dyn FavoritesRepository>) -> Self {
        let mut app = Self {
            session: Session::new(favorites),
            selection: FilterSelection::from_config(&config.search),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            progress_items: Vec::new(),
            status_message: None,
            should_quit: false,
            scroll_offset: 0,
            selected_suggestion: 0,
            selected_favorite: 0,
            spinner_frame: 0,
            current_favorited: false,
            config,
        };
        app.reset_progress_items();
        app
    }

    /// The model searches will use.
    pub fn current_model(&self) -> String {
        self.config.llm.model_or_default()
    }

    fn reset_progress_items(&mut self) {
        self.progress_items = vec![
            ProgressItem::new("Building prompt"),
            ProgressItem::new("Scanning the web"),
            ProgressItem::new("Collecting sources"),
            ProgressItem::new("Parsing analysis"),
        ];
    }

    /// Run the main event loop.
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut events = EventHandler::new();

        loop {
            // Results without a result fall back to search before drawing
            let _ = self.session.current_result();
            terminal.draw(|frame| ui::render(self, frame))?;

            if let Some(event) = events.next().await {
                match event {
                    Event::Key(key) => self.handle_key_event(key, events.sender()),
                    Event::Tick => {
                        if self.session.is_loading() {
                            self.spinner_frame = self.spinner_frame.wrapping_add(1);
                        }
                    }
                    Event::AnalysisProgress(progress) => self.handle_analysis_progress(progress),
                    Event::AnalysisFinished(outcome) => self.handle_analysis_finished(outcome),
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_analysis_progress(&mut self, progress: AnalysisProgress) {
        if !self.session.is_loading() {
            return;
        }

        match progress {
            AnalysisProgress::Started | AnalysisProgress::BuildingPrompt => {
                self.set_progress_status(0, ProgressStatus::InProgress);
            }
            AnalysisProgress::CallingService => {
                self.set_progress_status(0, ProgressStatus::Complete);
                self.set_progress_status(1, ProgressStatus::InProgress);
            }
            AnalysisProgress::ParsingResponse { sources } => {
                self.set_progress_status(1, ProgressStatus::Complete);
                if let Some(item) = self.progress_items.get_mut(2) {
                    item.label = format!("Collected {} sources", sources);
                    item.status = ProgressStatus::Complete;
                }
                self.set_progress_status(3, ProgressStatus::InProgress);
            }
            AnalysisProgress::Complete => {
                for item in &mut self.progress_items {
                    item.status = ProgressStatus::Complete;
                }
            }
            AnalysisProgress::Error(_) => {
                for item in &mut self.progress_items {
                    if item.status == ProgressStatus::InProgress {
                        item.status = ProgressStatus::Failed;
                        break;
                    }
                }
            }
        }
    }

    fn set_progress_status(&mut self, index: usize, status: ProgressStatus) {
        if let Some(item) = self.progress_items.get_mut(index) {
            item.status = status;
        }
    }

    fn handle_analysis_finished(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        self.session.finish_search(outcome);
        self.scroll_offset = 0;
        self.current_favorited = self.session.is_current_favorited();
        self.status_message = self
            .session
            .result()
            .map(|r| format!("Found {}", r.project_name));
    }

    fn handle_key_event(&mut self, key: KeyEvent, event_tx: mpsc::UnboundedSender<Event>) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_mode_key(key);
            return;
        }

        match self.session.screen() {
            Screen::Search => self.handle_search_key(key, event_tx),
            Screen::Loading => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            Screen::Results => self.handle_results_key(key),
            Screen::Favorites => self.handle_favorites_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, event_tx: mpsc::UnboundedSender<Event>) {
        let custom = self.selection.mode == FilterMode::Custom;

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.session.dismiss_error(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.selection.mode = self.selection.mode.toggle();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if custom {
                    self.move_suggestion(1);
                } else {
                    self.selection.risk_level = self.selection.risk_level.next();
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if custom {
                    self.move_suggestion(-1);
                } else {
                    self.selection.risk_level = self.selection.risk_level.previous();
                }
            }
            KeyCode::Char(' ') if custom => {
                if let Some(name) = self.selection.suggestions().get(self.selected_suggestion) {
                    let name = name.clone();
                    self.selection.toggle_filter(&name);
                }
            }
            KeyCode::Char('a') | KeyCode::Char('i') if custom => {
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Backspace | KeyCode::Char('x') if custom => {
                if let Some(last) = self.selection.filters().last() {
                    let last = last.clone();
                    self.selection.remove_filter(&last);
                }
            }
            KeyCode::Char('f') => {
                if self.session.view_favorites() {
                    self.selected_favorite = 0;
                    self.status_message = None;
                }
            }
            KeyCode::Enter => self.submit_search(event_tx),
            _ => {}
        }
    }

    fn move_suggestion(&mut self, delta: isize) {
        let count = self.selection.suggestions().len();
        if count == 0 {
            return;
        }
        let next = (self.selected_suggestion as isize + delta).rem_euclid(count as isize);
        self.selected_suggestion = next as usize;
    }

    fn handle_editing_mode_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                let name = std::mem::take(&mut self.input_buffer);
                if !self.selection.add_filter(&name) && !name.trim().is_empty() {
                    self.status_message = Some(format!("'{}' is already selected", name.trim()));
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') => self.back(),
            KeyCode::Char('s') => {
                self.current_favorited = self.session.toggle_favorite();
                self.status_message = Some(if self.current_favorited {
                    "Added to favorites".to_string()
                } else {
                    "Removed from favorites".to_string()
                });
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            KeyCode::Char('o') => {
                let url = self.session.result().map(|r| r.twitter_url.clone());
                self.open_url(url);
            }
            KeyCode::Char('p') => {
                let url = self
                    .session
                    .result()
                    .and_then(|r| r.prime_source.as_ref())
                    .map(|s| s.uri.clone());
                self.open_url(url);
            }
            _ => {}
        }
    }

    fn handle_favorites_key(&mut self, key: KeyEvent) {
        let count = self.session.favorites().len();

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') => self.back(),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected_favorite + 1 < count {
                    self.selected_favorite += 1;
                    self.scroll_offset = 0;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_favorite = self.selected_favorite.saturating_sub(1);
                self.scroll_offset = 0;
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(project) = self.session.favorites().get(self.selected_favorite) {
                    let name = project.project_name.clone();
                    self.session.remove_favorite(&name);
                    self.status_message = Some(format!("Removed {}", name));
                    let remaining = self.session.favorites().len();
                    self.selected_favorite = self.selected_favorite.min(remaining.saturating_sub(1));
                }
            }
            KeyCode::Char('o') => {
                let url = self
                    .session
                    .favorites()
                    .get(self.selected_favorite)
                    .map(|r| r.twitter_url.clone());
                self.open_url(url);
            }
            _ => {}
        }
    }

    fn back(&mut self) {
        self.session.back();
        self.scroll_offset = 0;
        self.current_favorited = false;
        self.status_message = None;
    }

    fn open_url(&mut self, url: Option<String>) {
        match url.filter(|u| !u.trim().is_empty()) {
            Some(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!("Failed to open {}: {}", url, e);
                    self.status_message = Some(format!("Could not open {}", url));
                }
            }
            None => self.status_message = Some("No link available".to_string()),
        }
    }

    /// Starts an analysis on a background task.
    fn submit_search(&mut self, event_tx: mpsc::UnboundedSender<Event>) {
        if !self.selection.can_submit(self.session.is_loading()) {
            self.status_message = Some("Select at least one filter before searching".to_string());
            return;
        }
        if !self.session.begin_search() {
            return;
        }

        self.reset_progress_items();
        self.spinner_frame = 0;
        self.status_message = None;

        let criteria = self.selection.criteria();
        let llm_config = self.config.llm.clone();

        tokio::spawn(async move {
            let outcome = run_analysis(criteria, llm_config, event_tx.clone()).await;
            let _ = event_tx.send(Event::AnalysisFinished(outcome));
        });
    }
}

/// Runs one analysis, forwarding its progress to the UI.
async fn run_analysis(
    criteria: Criteria,
    config: LLMConfig,
    event_tx: mpsc::UnboundedSender<Event>,
) -> Result<AnalysisResult, AnalysisError> {
    let runner = AnalysisRunner::from_config(&config).inspect_err(|e| {
        tracing::error!("analysis not started: {}", e);
    })?;

    with_progress_relay(event_tx, |progress_tx| async move {
        runner.run_with_progress(&criteria, progress_tx).await
    })
    .await
}

/// Runs `task` with a progress channel relayed to the UI. Returns only once
/// every progress event has been relayed, so none trails the outcome.
async fn with_progress_relay<F, Fut, T>(event_tx: mpsc::UnboundedSender<Event>, task: F) -> T
where
    F: FnOnce(mpsc::UnboundedSender<AnalysisProgress>) -> Fut,
    Fut: std::future::Future<Output = T>,
{
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
    let relay = tokio::spawn(async move {
        while let Some(progress) = progress_rx.recv().await {
            let _ = event_tx.send(Event::AnalysisProgress(progress));
        }
    });

    let outcome = task(progress_tx).await;
    if let Err(e) = relay.await {
        tracing::warn!("progress relay stopped early: {}", e);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use finder_core::{MemoryFavorites, RiskLevel};

    fn create_test_app() -> (App, mpsc::UnboundedSender<Event>) {
        let (tx, _rx) = mpsc::unbounded_channel();
        let app = App::new(Config::default(), Box::new(MemoryFavorites::in_memory()));
        (app, tx)
    }

    fn press(app: &mut App, code: KeyCode, tx: &mpsc::UnboundedSender<Event>) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), tx.clone());
    }

    #[test]
    fn test_tab_toggles_mode_and_arrows_cycle_risk() {
        let (mut app, tx) = create_test_app();
        assert_eq!(app.selection.risk_level, RiskLevel::Moderate);

        press(&mut app, KeyCode::Right, &tx);
        assert_eq!(app.selection.risk_level, RiskLevel::Risky);

        press(&mut app, KeyCode::Tab, &tx);
        assert_eq!(app.selection.mode, FilterMode::Custom);
    }

    #[test]
    fn test_empty_custom_filters_block_search() {
        let (mut app, tx) = create_test_app();
        press(&mut app, KeyCode::Tab, &tx);
        while !app.selection.filters().is_empty() {
            press(&mut app, KeyCode::Backspace, &tx);
        }

        press(&mut app, KeyCode::Enter, &tx);
        assert_eq!(app.session.screen(), Screen::Search);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_typing_adds_filter() {
        let (mut app, tx) = create_test_app();
        press(&mut app, KeyCode::Tab, &tx);
        press(&mut app, KeyCode::Char('a'), &tx);
        assert_eq!(app.input_mode, InputMode::Editing);

        for c in "Tokenomics".chars() {
            press(&mut app, KeyCode::Char(c), &tx);
        }
        press(&mut app, KeyCode::Enter, &tx);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.selection.is_selected("Tokenomics"));
    }

    #[test]
    fn test_favorites_screen_and_back() {
        let (mut app, tx) = create_test_app();
        press(&mut app, KeyCode::Char('f'), &tx);
        assert_eq!(app.session.screen(), Screen::Favorites);

        press(&mut app, KeyCode::Esc, &tx);
        assert_eq!(app.session.screen(), Screen::Search);
    }

    #[test]
    fn test_finished_analysis_shows_results() {
        let (mut app, tx) = create_test_app();
        assert!(app.session.begin_search());

        app.handle_analysis_progress(AnalysisProgress::CallingService);
        assert_eq!(app.progress_items[1].status, ProgressStatus::InProgress);

        app.handle_analysis_finished(Ok(AnalysisResult::new("Foo")));
        assert_eq!(app.session.screen(), Screen::Results);

        press(&mut app, KeyCode::Char('s'), &tx);
        assert!(app.current_favorited);
        assert!(app.session.repository().contains("Foo"));
    }

    #[test]
    fn test_failed_analysis_shows_banner() {
        let (mut app, _tx) = create_test_app();
        app.session.begin_search();

        app.handle_analysis_progress(AnalysisProgress::BuildingPrompt);
        app.handle_analysis_progress(AnalysisProgress::Error("boom".to_string()));
        assert_eq!(app.progress_items[0].status, ProgressStatus::Failed);

        app.handle_analysis_finished(Err(AnalysisError::Config));
        assert_eq!(app.session.screen(), Screen::Search);
        assert_eq!(app.session.error(), Some("API key is not configured."));
    }

    #[test]
    fn test_progress_ignored_when_not_loading() {
        let (mut app, _tx) = create_test_app();

        app.handle_analysis_progress(AnalysisProgress::Complete);
        assert!(app
            .progress_items
            .iter()
            .all(|item| item.status == ProgressStatus::Pending));
    }

    #[tokio::test]
    async fn test_relay_delivers_progress_before_outcome() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = with_progress_relay(tx.clone(), |progress| async move {
            let _ = progress.send(AnalysisProgress::CallingService);
            let _ = progress.send(AnalysisProgress::Complete);
            AnalysisResult::new("Foo")
        })
        .await;
        let _ = tx.send(Event::AnalysisFinished(Ok(outcome)));
        drop(tx);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[1],
            Event::AnalysisProgress(AnalysisProgress::Complete)
        ));
        assert!(matches!(events[2], Event::AnalysisFinished(Ok(_))));
    }
}
