//! Default values for Finder configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// LLM Defaults
// ============================================================================

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";

/// Default sampling temperature. Kept low so the model returns literal JSON.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Title given to a cited source the service returned without one.
pub const DEFAULT_SOURCE_TITLE: &str = "Source";

// ============================================================================
// Storage Defaults
// ============================================================================

/// Fallback data directory when no platform data dir is available.
pub const DEFAULT_DATA_DIR: &str = ".finder";

/// Application directory name under the platform data/config dirs.
pub const APP_DIR_NAME: &str = "finder";

/// Default favorites file name.
pub const DEFAULT_FAVORITES_FILE: &str = "favorites.json";

/// Default log file name (TUI mode).
pub const DEFAULT_LOG_FILE: &str = "finder.log";

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "finder.toml";

// ============================================================================
// Search Defaults
// ============================================================================

/// Filters pre-selected in custom mode.
pub const DEFAULT_CUSTOM_FILTERS: &[&str] = &[
    "VC Funding",
    "Team Transparency",
    "Community Size / Activity",
    "Audit / Security",
    "Narrative Alignment",
];

// ============================================================================
// Report Defaults
// ============================================================================

/// Score at or above which a project is shown as a strong candidate.
pub const HIGH_SCORE_THRESHOLD: u8 = 75;

/// Score at or above which a project is shown as a middling candidate.
pub const MEDIUM_SCORE_THRESHOLD: u8 = 50;

/// Shown in place of an empty airdrop task list.
pub const NO_AIRDROP_TASKS_MESSAGE: &str =
    "No specific airdrop tasks are publicly known at this time.";
