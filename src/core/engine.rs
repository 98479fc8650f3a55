use super::types::{
    CalculatorInputs, DerivedValues, ProjectionResult, ProjectionSummary, ProjectionYear,
};
use super::validate::{PROJECTION_YEARS, ValidationError};

/// Discrete annual compounding: `principal * (1 + annual_rate)^years`.
///
/// `annual_rate` is a fraction (0.02 for 2%). Negative principals compound
/// with their sign intact.
pub fn future_value(principal: f64, annual_rate: f64, years: u32) -> f64 {
    principal * (1.0 + annual_rate).powf(f64::from(years))
}

pub fn derive(inputs: &CalculatorInputs) -> DerivedValues {
    let down_payment = inputs.house_value * inputs.down_payment_percent / 100.0;
    let loan_amount = inputs.house_value - down_payment;
    // Negative when the financed part exceeds the starting assets; left as is.
    let remaining_assets = inputs.initial_assets - (inputs.house_value - down_payment);
    let total_payment = inputs.monthly_payment * 12.0 * f64::from(inputs.loan_term_years);
    let total_investment = total_payment * (1.0 + inputs.inflation_rate_percent / 100.0);

    DerivedValues {
        down_payment,
        loan_amount,
        remaining_assets,
        total_payment,
        total_investment,
    }
}

/// Builds the year-by-year house/investment series for `1..=projection_years`
/// plus the headline summary. Only the horizon is checked here; full range
/// validation belongs to the caller.
pub fn project(inputs: &CalculatorInputs) -> Result<ProjectionResult, ValidationError> {
    PROJECTION_YEARS.check(f64::from(inputs.projection_years))?;

    let derived = derive(inputs);
    let house_rate = inputs.house_appreciation_rate_percent / 100.0;
    let investment_rate = inputs.investment_return_rate_percent / 100.0;

    let series: Vec<ProjectionYear> = (1..=inputs.projection_years)
        .map(|year| ProjectionYear {
            year,
            house_value: future_value(inputs.house_value, house_rate, year),
            investment_value: future_value(derived.remaining_assets, investment_rate, year),
        })
        .collect();

    let Some(&last) = series.last() else {
        return Err(ValidationError::OutOfRange {
            field: PROJECTION_YEARS.field,
            value: f64::from(inputs.projection_years),
            min: PROJECTION_YEARS.min,
            max: PROJECTION_YEARS.max,
        });
    };
    let summary = ProjectionSummary {
        final_house_value: last.house_value,
        final_investment_value: last.investment_value,
        total_payment: derived.total_payment,
        loan_term_years: inputs.loan_term_years,
        projection_years: inputs.projection_years,
    };

    Ok(ProjectionResult {
        derived,
        summary,
        series,
    })
}
