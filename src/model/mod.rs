pub mod config;
pub mod document;
pub mod verdict;

pub use config::{Config, ScreeningConfig};
pub use document::{Document, DocumentState, SeedDocument};
pub use verdict::{ManualDecision, RequestError, Verdict, VerdictRequest, VerdictStatus};
