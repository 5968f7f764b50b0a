use crate::config::StorageConfig;
use crate::domain::storage::{StorageState, StorageUrgency};
use crate::errors::DomainError;

/// Classifies storage occupancy into an urgency tier. Both comparisons are
/// strict: occupancy exactly equal to a threshold falls to the lower tier.
///
/// Uses integer cross-multiplication (`100 * current > threshold * max`)
/// instead of a division, so the boundary cases are exact.
pub fn classify_pressure(
    storage: &StorageState,
    thresholds: &StorageConfig,
) -> Result<StorageUrgency, DomainError> {
    if storage.max == 0 {
        return Err(DomainError::ZeroStorageCapacity);
    }

    let scaled = 100 * u64::from(storage.current);
    let urgency = if scaled > u64::from(thresholds.high_threshold) * u64::from(storage.max) {
        StorageUrgency::High
    } else if scaled > u64::from(thresholds.medium_threshold) * u64::from(storage.max) {
        StorageUrgency::Medium
    } else {
        StorageUrgency::Low
    };

    Ok(urgency)
}
