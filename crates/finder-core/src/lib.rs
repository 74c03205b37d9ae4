pub mod analysis;
pub mod config;
pub mod favorites;
pub mod filters;
pub mod llm;
pub mod screen;

pub use analysis::{
    AnalysisError, AnalysisProgress, AnalysisResult, AnalysisRunner, Criteria, FilterAnalysis,
    FilterMode, Founder, GroundingSource, RiskLevel, ScoreTier, Verdict,
};
pub use config::{Config, ConfigError, LLMConfig, SearchConfig, StorageConfig};
pub use favorites::{FavoritesRepository, FileFavorites, MemoryFavorites, StorageError};
pub use filters::FilterSelection;
pub use llm::{GeminiClient, GroundedResponse, LLMError, LLM};
pub use screen::{Screen, Session};
