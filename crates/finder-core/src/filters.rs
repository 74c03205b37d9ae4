use crate::analysis::{Criteria, FilterMode, RiskLevel};
use crate::config::{SearchConfig, DEFAULT_CUSTOM_FILTERS};

/// Search criteria being edited on the search screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub mode: FilterMode,
    pub risk_level: RiskLevel,
    filters: Vec<String>,
    suggestions: Vec<String>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        let defaults: Vec<String> = DEFAULT_CUSTOM_FILTERS.iter().map(|s| s.to_string()).collect();
        Self {
            mode: FilterMode::Default,
            risk_level: RiskLevel::Moderate,
            filters: defaults.clone(),
            suggestions: defaults,
        }
    }
}

impl FilterSelection {
    /// Starts from the configured profile and filters.
    pub fn from_config(config: &SearchConfig) -> Self {
        let mut selection = Self {
            mode: FilterMode::Default,
            risk_level: config.default_profile,
            filters: Vec::new(),
            suggestions: Vec::new(),
        };
        for filter in &config.default_filters {
            selection.add_filter(filter);
        }
        selection.suggestions = selection.filters.clone();
        selection
    }

    /// Currently selected custom filters, in order.
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Filters offered as one-key toggles.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.filters.iter().any(|f| f == name)
    }

    /// Adds a filter. Blank and duplicate names are ignored.
    ///
    /// Returns true when the list changed.
    pub fn add_filter(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.is_selected(name) {
            return false;
        }
        self.filters.push(name.to_string());
        true
    }

    pub fn remove_filter(&mut self, name: &str) {
        self.filters.retain(|f| f != name);
    }

    /// Selects the filter if absent, deselects it otherwise.
    pub fn toggle_filter(&mut self, name: &str) {
        if self.is_selected(name) {
            self.remove_filter(name);
        } else {
            self.add_filter(name);
        }
    }

    /// The criteria the current mode searches with.
    pub fn criteria(&self) -> Criteria {
        match self.mode {
            FilterMode::Default => Criteria::Profile(self.risk_level),
            FilterMode::Custom => Criteria::Custom(self.filters.clone()),
        }
    }

    /// A search may start unless one is running or custom mode has no filters.
    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && !(self.mode == FilterMode::Custom && self.filters.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let selection = FilterSelection::default();
        assert_eq!(selection.mode, FilterMode::Default);
        assert_eq!(selection.risk_level, RiskLevel::Moderate);
        assert_eq!(selection.filters().len(), DEFAULT_CUSTOM_FILTERS.len());
        assert_eq!(selection.criteria(), Criteria::Profile(RiskLevel::Moderate));
    }

    #[test]
    fn test_add_trims_and_dedups() {
        let mut selection = FilterSelection::default();
        assert!(selection.add_filter("  Tokenomics "));
        assert!(!selection.add_filter("Tokenomics"));
        assert!(!selection.add_filter("   "));
        assert_eq!(selection.filters().last().unwrap(), "Tokenomics");
    }

    #[test]
    fn test_toggle() {
        let mut selection = FilterSelection::default();
        selection.toggle_filter("VC Funding");
        assert!(!selection.is_selected("VC Funding"));
        selection.toggle_filter("VC Funding");
        assert!(selection.is_selected("VC Funding"));
        assert_eq!(selection.filters().last().unwrap(), "VC Funding");
    }

    #[test]
    fn test_custom_mode_needs_filters() {
        let mut selection = FilterSelection::default();
        selection.mode = FilterMode::Custom;
        assert!(selection.can_submit(false));
        assert!(!selection.can_submit(true));

        for name in selection.filters().to_vec() {
            selection.remove_filter(&name);
        }
        assert!(!selection.can_submit(false));
        assert_eq!(selection.criteria(), Criteria::Custom(vec![]));
    }

    #[test]
    fn test_from_config() {
        let config = SearchConfig {
            default_profile: RiskLevel::Risky,
            default_filters: vec!["A".to_string(), "A".to_string(), "B".to_string()],
        };
        let selection = FilterSelection::from_config(&config);
        assert_eq!(selection.risk_level, RiskLevel::Risky);
        assert_eq!(selection.filters(), ["A".to_string(), "B".to_string()]);
    }
}
