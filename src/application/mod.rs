//! Application layer - re-evaluable session over the generation pipeline

pub mod cache;
pub mod session;
pub mod traits;

pub use cache::{CacheKey, CacheStats, StepCache};
pub use session::{Evaluation, SelectionRequest, Session, SessionInput, SessionStats};
pub use traits::*;
