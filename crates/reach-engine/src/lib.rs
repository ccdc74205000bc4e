pub mod entities;
pub mod error;
pub mod lifecycle;
pub mod matching;

mod convert;

pub use error::{EngineError, EngineResult};
pub use lifecycle::EngagementLifecycle;
pub use matching::MatchingEngine;
