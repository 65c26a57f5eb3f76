//! Request orchestration: one match request in, one structured result out.

pub mod error;
pub mod orchestrator;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{MatchError, MatchResult};
pub use orchestrator::MatchOrchestrator;
pub use types::{MatchRequest, MatchResponse};
