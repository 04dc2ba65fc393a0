use thiserror::Error;
use uuid::Uuid;

/// Fehler an der Sitzungs-Grenze
///
/// Ungültige Eingaben werden hier abgefangen, bevor sie den Analyse-Kern
/// erreichen - der Kern setzt gültige Domänen-Werte voraus.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("number {0} is not a valid roulette outcome (expected 0-36)")]
    InvalidNumber(i64),

    #[error("history is empty, nothing to undo")]
    EmptyHistory,

    #[error("index {index} is out of bounds for history of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("session {0} not found")]
    NotFound(Uuid),

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
