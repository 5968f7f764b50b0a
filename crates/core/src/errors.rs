use rust_decimal::Decimal;
use thiserror::Error;

/// Precondition violations the engine refuses to compute through. There is
/// no partial result: computation is cheap and idempotent, so callers
/// correct the input and re-invoke.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("listed price must be greater than zero, got {price}")]
    NonPositiveListedPrice { price: Decimal },
    #[error("maximum storage capacity must be greater than zero")]
    ZeroStorageCapacity,
    #[error("seasonal multiplier must be greater than zero, got {value}")]
    InvalidMultiplier { value: Decimal },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{ApplicationError, DomainError};

    #[test]
    fn domain_error_names_the_failed_precondition() {
        let error = DomainError::NonPositiveListedPrice { price: Decimal::ZERO };
        assert!(error.to_string().contains("listed price"));

        let error = DomainError::ZeroStorageCapacity;
        assert!(error.to_string().contains("storage capacity"));
    }

    #[test]
    fn domain_error_converts_into_application_error() {
        let error = ApplicationError::from(DomainError::ZeroStorageCapacity);
        assert!(matches!(error, ApplicationError::Domain(DomainError::ZeroStorageCapacity)));
    }
}
