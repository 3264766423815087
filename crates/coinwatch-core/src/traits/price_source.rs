//! Price source trait definitions.

use crate::error::DataError;
use crate::types::PriceMatrix;

/// Source of aligned price snapshots.
///
/// Every call produces a new, independently owned [`PriceMatrix`]; callers
/// that refresh periodically load a fresh snapshot per cycle rather than
/// mutating a previous one.
pub trait PriceSource: Send + Sync {
    /// Load the current snapshot, gap-filled and chronologically ordered.
    fn load(&self) -> Result<PriceMatrix, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
