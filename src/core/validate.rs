use thiserror::Error;

use super::types::CalculatorInputs;

/// Inclusive range accepted for one input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldBounds {
    const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    pub fn check(&self, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field: self.field });
        }
        if !(self.min..=self.max).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

pub const INITIAL_ASSETS: FieldBounds = FieldBounds::new("initialAssets", 0.0, 1_000_000.0);
pub const HOUSE_VALUE: FieldBounds = FieldBounds::new("houseValue", 100_000.0, 1_000_000.0);
pub const DOWN_PAYMENT_PERCENT: FieldBounds = FieldBounds::new("downPaymentPercent", 1.0, 100.0);
pub const MORTGAGE_INTEREST_RATE_PERCENT: FieldBounds =
    FieldBounds::new("mortgageInterestRatePercent", 1.0, 10.0);
pub const LOAN_TERM_YEARS: FieldBounds = FieldBounds::new("loanTermYears", 1.0, 30.0);
pub const INFLATION_RATE_PERCENT: FieldBounds =
    FieldBounds::new("inflationRatePercent", 0.1, 10.0);
pub const INVESTMENT_RETURN_RATE_PERCENT: FieldBounds =
    FieldBounds::new("investmentReturnRatePercent", 0.1, 10.0);
pub const HOUSE_APPRECIATION_RATE_PERCENT: FieldBounds =
    FieldBounds::new("houseAppreciationRatePercent", 0.1, 10.0);
pub const MONTHLY_PAYMENT: FieldBounds = FieldBounds::new("monthlyPayment", 1.0, 5_000.0);
pub const PROJECTION_YEARS: FieldBounds = FieldBounds::new("projectionYears", 1.0, 30.0);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be a whole number of years (got {value})")]
    NotWholeNumber { field: &'static str, value: f64 },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::NotWholeNumber { field, .. } => field,
        }
    }
}

/// Checks every field against its bounds, reporting the first violation in
/// field declaration order. Values are never clamped.
pub fn validate_inputs(inputs: &CalculatorInputs) -> Result<(), ValidationError> {
    for (bounds, value) in [
        (INITIAL_ASSETS, inputs.initial_assets),
        (HOUSE_VALUE, inputs.house_value),
        (DOWN_PAYMENT_PERCENT, inputs.down_payment_percent),
        (
            MORTGAGE_INTEREST_RATE_PERCENT,
            inputs.mortgage_interest_rate_percent,
        ),
        (LOAN_TERM_YEARS, f64::from(inputs.loan_term_years)),
        (INFLATION_RATE_PERCENT, inputs.inflation_rate_percent),
        (
            INVESTMENT_RETURN_RATE_PERCENT,
            inputs.investment_return_rate_percent,
        ),
        (
            HOUSE_APPRECIATION_RATE_PERCENT,
            inputs.house_appreciation_rate_percent,
        ),
        (MONTHLY_PAYMENT, inputs.monthly_payment),
        (PROJECTION_YEARS, f64::from(inputs.projection_years)),
    ] {
        bounds.check(value)?;
    }
    Ok(())
}

/// Converts a year count that arrived as a float (JSON, query strings) into a
/// whole number, rejecting fractions, negatives and non-finite values.
pub fn whole_years(bounds: FieldBounds, value: f64) -> Result<u32, ValidationError> {
    bounds.check(value)?;
    if value.fract() != 0.0 {
        return Err(ValidationError::NotWholeNumber {
            field: bounds.field,
            value,
        });
    }
    Ok(value as u32)
}
