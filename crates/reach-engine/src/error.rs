use uuid::Uuid;

/// Domain error taxonomy for the matching and engagement-lifecycle engines.
///
/// `Conflict` is a recoverable outcome (a duplicate creation lost the pair
/// uniqueness race) and must stay distinguishable from `Validation` so
/// callers can render "already applied" rather than a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        EngineError::NotFound { entity, id }
    }
}
