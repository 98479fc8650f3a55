use serde::Serialize;

/// One calculator panel's inputs. Percent fields are in percent (2.0 means 2%).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInputs {
    pub initial_assets: f64,
    pub house_value: f64,
    pub down_payment_percent: f64,
    /// Collected for display only; no projection formula reads it.
    pub mortgage_interest_rate_percent: f64,
    pub loan_term_years: u32,
    pub inflation_rate_percent: f64,
    pub investment_return_rate_percent: f64,
    pub house_appreciation_rate_percent: f64,
    pub monthly_payment: f64,
    pub projection_years: u32,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            initial_assets: 290_000.0,
            house_value: 215_000.0,
            down_payment_percent: 20.0,
            mortgage_interest_rate_percent: 4.0,
            loan_term_years: 20,
            inflation_rate_percent: 2.0,
            investment_return_rate_percent: 2.0,
            house_appreciation_rate_percent: 2.0,
            monthly_payment: 2_000.0,
            projection_years: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedValues {
    pub down_payment: f64,
    pub loan_amount: f64,
    pub remaining_assets: f64,
    pub total_payment: f64,
    pub total_investment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionYear {
    pub year: u32,
    pub house_value: f64,
    pub investment_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub final_house_value: f64,
    pub final_investment_value: f64,
    pub total_payment: f64,
    /// Horizon used for the headline and the total payment label.
    pub loan_term_years: u32,
    /// Horizon used for the series; independent of `loan_term_years`.
    pub projection_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub derived: DerivedValues,
    pub summary: ProjectionSummary,
    pub series: Vec<ProjectionYear>,
}
