pub mod extraction;
pub mod llm;
pub mod queue;
pub mod verdict;

pub use extraction::{ContextSource, SimulatedContextSource};
pub use llm::{GeminiClient, TextGenerator};
pub use queue::VerificationQueue;
pub use verdict::VerdictService;
