mod criteria;
mod error;
pub mod extract;
mod model;
pub mod prompts;
mod report;
mod runner;

pub use criteria::{Criteria, FilterMode, RiskLevel};
pub use error::AnalysisError;
pub use model::{
    AnalysisPayload, AnalysisResult, FilterAnalysis, Founder, GroundingSource, ScoreTier, Verdict,
};
pub use runner::{AnalysisProgress, AnalysisRunner};
