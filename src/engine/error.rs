use ulid::Ulid;

/// Admission failures surfaced to the API layer.
///
/// The first five are domain rejections the caller can act on; `WalFailure`
/// is the only internal error and means the admission log could not be
/// written.
#[derive(Debug)]
pub enum EngineError {
    /// Malformed request field. The caller must correct and resubmit.
    InvalidRequest(&'static str),
    /// The requested window overlaps a committed booking or block. Carries
    /// the id of the interval that won the slot.
    SlotOccupied(Ulid),
    /// The actor (by id) is not allowed to perform this operation.
    Forbidden(Ulid),
    /// The referenced turf does not exist.
    NotFound(Ulid),
    /// A turf with this id is already registered.
    AlreadyExists(Ulid),
    WalFailure(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            EngineError::SlotOccupied(id) => write!(f, "slot occupied by interval: {id}"),
            EngineError::Forbidden(actor) => write!(f, "forbidden for actor: {actor}"),
            EngineError::NotFound(id) => write!(f, "not found: {id}"),
            EngineError::AlreadyExists(id) => write!(f, "already exists: {id}"),
            EngineError::WalFailure(e) => write!(f, "admission log failure: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}
