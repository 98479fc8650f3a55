mod engine;
mod types;
mod validate;

pub use engine::{derive, future_value, project};
pub use types::{
    CalculatorInputs, DerivedValues, ProjectionResult, ProjectionSummary, ProjectionYear,
};
pub use validate::{FieldBounds, ValidationError, validate_inputs, whole_years};

pub mod bounds {
    pub use super::validate::{
        DOWN_PAYMENT_PERCENT, HOUSE_APPRECIATION_RATE_PERCENT, HOUSE_VALUE, INFLATION_RATE_PERCENT,
        INITIAL_ASSETS, INVESTMENT_RETURN_RATE_PERCENT, LOAN_TERM_YEARS, MONTHLY_PAYMENT,
        MORTGAGE_INTEREST_RATE_PERCENT, PROJECTION_YEARS,
    };
}
