use crate::analysis::{AnalysisError, AnalysisResult};
use crate::favorites::FavoritesRepository;

/// The screen currently shown.
///
/// ```text
/// Search --submit--> Loading --ok--> Results --back--> Search
///                    Loading --err-> Search (with error)
/// Search --favorites--> Favorites --back--> Search
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Search,
    Loading,
    Results,
    Favorites,
}

impl Screen {
    pub fn display_name(&self) -> &'static str {
        match self {
            Screen::Search => "Search",
            Screen::Loading => "Analyzing",
            Screen::Results => "Results",
            Screen::Favorites => "Favorites",
        }
    }
}

/// Top-level navigation state plus the favorites it shows.
pub struct Session<R: FavoritesRepository> {
    screen: Screen,
    result: Option<AnalysisResult>,
    error: Option<String>,
    favorites: Vec<AnalysisResult>,
    repository: R,
}

impl<R: FavoritesRepository> Session<R> {
    /// Starts on the search screen with favorites loaded from `repository`.
    pub fn new(repository: R) -> Self {
        let favorites = repository.list();
        Self {
            screen: Screen::Search,
            result: None,
            error: None,
            favorites,
            repository,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_loading(&self) -> bool {
        self.screen == Screen::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn favorites(&self) -> &[AnalysisResult] {
        &self.favorites
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The result held for the results screen, without normalising the screen.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// The result being shown. A results screen without one falls back to search.
    pub fn current_result(&mut self) -> Option<&AnalysisResult> {
        if self.screen == Screen::Results && self.result.is_none() {
            self.back();
        }
        self.result.as_ref()
    }

    /// Moves to the loading screen.
    ///
    /// Refused while a search is already running or from any screen other
    /// than search.
    pub fn begin_search(&mut self) -> bool {
        if self.screen != Screen::Search {
            return false;
        }
        self.screen = Screen::Loading;
        self.error = None;
        self.result = None;
        true
    }

    /// Applies the outcome of the running search.
    pub fn finish_search(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        if self.screen != Screen::Loading {
            tracing::warn!("search finished while not loading; ignoring");
            return;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.screen = Screen::Results;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.result = None;
                self.screen = Screen::Search;
            }
        }
    }

    /// Opens the favorites screen with a fresh copy of the list.
    pub fn view_favorites(&mut self) -> bool {
        if self.screen != Screen::Search {
            return false;
        }
        self.favorites = self.repository.list();
        self.screen = Screen::Favorites;
        true
    }

    /// Returns to search, dropping the shown result and any error.
    pub fn back(&mut self) {
        if self.screen == Screen::Loading {
            return;
        }
        self.screen = Screen::Search;
        self.result = None;
        self.error = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Whether the shown result is saved.
    pub fn is_current_favorited(&self) -> bool {
        self.result
            .as_ref()
            .is_some_and(|r| self.repository.contains(&r.project_name))
    }

    /// Saves or unsaves the shown result. Stays on the results screen.
    ///
    /// Returns the new favorited state.
    pub fn toggle_favorite(&mut self) -> bool {
        let Some(result) = self.result.as_ref() else {
            return false;
        };

        if self.repository.contains(&result.project_name) {
            self.favorites = self.repository.remove(&result.project_name);
            false
        } else {
            self.favorites = self.repository.add(result);
            true
        }
    }

    /// Removes a favorite by project name (from the favorites screen).
    pub fn remove_favorite(&mut self, project_name: &str) {
        self.favorites = self.repository.remove(project_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::MemoryFavorites;

    fn session() -> Session<MemoryFavorites> {
        Session::new(MemoryFavorites::in_memory())
    }

    #[test]
    fn test_single_search_in_flight() {
        let mut session = session();
        assert!(session.begin_search());
        assert!(session.is_loading());
        assert!(!session.begin_search());
        assert!(!session.view_favorites());
    }

    #[test]
    fn test_back_ignored_while_loading() {
        let mut session = session();
        session.begin_search();
        session.back();
        assert_eq!(session.screen(), Screen::Loading);
    }

    #[test]
    fn test_finish_without_begin_is_ignored() {
        let mut session = session();
        session.finish_search(Ok(AnalysisResult::new("Foo")));
        assert_eq!(session.screen(), Screen::Search);
        assert!(session.current_result().is_none());
    }

    #[test]
    fn test_toggle_favorite_stays_on_results() {
        let mut session = session();
        session.begin_search();
        session.finish_search(Ok(AnalysisResult::new("Foo")));

        assert!(session.toggle_favorite());
        assert_eq!(session.screen(), Screen::Results);
        assert!(session.is_current_favorited());
        assert_eq!(session.favorites().len(), 1);

        assert!(!session.toggle_favorite());
        assert!(!session.is_current_favorited());
        assert!(session.favorites().is_empty());
    }

    #[test]
    fn test_new_search_clears_error() {
        let mut session = session();
        session.begin_search();
        session.finish_search(Err(AnalysisError::Config));
        assert_eq!(session.error(), Some("API key is not configured."));

        session.begin_search();
        assert!(session.error().is_none());
    }
}
