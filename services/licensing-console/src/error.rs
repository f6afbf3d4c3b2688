use dify_errors::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Unknown license type: {0}")]
    UnknownLicenseType(String),
    #[error("Quantity must be a positive integer, got {0}")]
    InvalidQuantity(i64),
    #[error("License duration must be 1, 2 or 3 years, got {0}")]
    InvalidDuration(i64),
    #[error("Tax rate must be within [0, 1], got {0}")]
    InvalidTaxRate(Decimal),
    #[error("Discount percent must be within [0, 100], got {0}")]
    DiscountOutOfRange(Decimal),
    #[error("Base price for {0} must not be negative")]
    NegativeBasePrice(String),
    #[error("Unknown pricing model: {0}")]
    UnknownPricingModel(String),
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: String, actual: String },
    #[error("Amount overflow")]
    Overflow,
    #[error("Order has no line items")]
    EmptyOrder,
    #[error("Order agreement has not been acknowledged")]
    AgreementNotAcknowledged,
}

impl From<PricingError> for AppError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::EmptyOrder | PricingError::AgreementNotAcknowledged => {
                AppError::FailedPrecondition(error.to_string())
            }
            PricingError::Overflow => AppError::Internal(error.to_string()),
            _ => AppError::Validation(error.to_string()),
        }
    }
}
