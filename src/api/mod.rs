mod report;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    CalculatorInputs, ProjectionResult, ValidationError, bounds, project, validate_inputs,
    whole_years,
};

pub use report::{format_currency, render_report};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const MAX_PANELS: usize = 8;

#[derive(Parser, Debug)]
#[command(
    name = "homecalc",
    about = "Project house value against investing the cash left after a down payment",
    after_help = "Run `homecalc serve [port]` to start the side-by-side web calculator."
)]
pub struct Cli {
    #[arg(long, default_value = "290000", value_parser = parse_amount, help = "Initial assets (£)")]
    initial_assets: f64,
    #[arg(long, default_value = "215000", value_parser = parse_amount, help = "House value (£)")]
    house_value: f64,
    #[arg(long, default_value_t = 20.0, help = "Down payment in percent of house value")]
    down_payment_percent: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Mortgage interest rate in percent (shown only, not used by the projection)"
    )]
    mortgage_interest_rate: f64,
    #[arg(long, default_value_t = 20)]
    loan_term_years: u32,
    #[arg(long, default_value_t = 2.0, help = "Inflation rate in percent")]
    inflation_rate: f64,
    #[arg(long, default_value_t = 2.0, help = "Investment return rate in percent")]
    investment_return_rate: f64,
    #[arg(long, default_value_t = 2.0, help = "House appreciation rate in percent")]
    house_appreciation_rate: f64,
    #[arg(long, default_value = "2000", value_parser = parse_amount, help = "Monthly payment (£)")]
    monthly_payment: f64,
    #[arg(long, default_value_t = 20, help = "Number of years to project")]
    projection_years: u32,
    #[arg(long, default_value = "Calculator 1")]
    label: String,
    #[arg(long, help = "Print the projection as JSON instead of a text report")]
    json: bool,
}

/// Accepts plain numbers as well as amounts written with thousands separators.
fn parse_amount(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != '_').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("`{raw}` is not a valid amount"))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    label: Option<String>,
    initial_assets: Option<f64>,
    house_value: Option<f64>,
    down_payment_percent: Option<f64>,
    #[serde(alias = "mortgageRate")]
    mortgage_interest_rate_percent: Option<f64>,
    // Years arrive as JSON numbers; fractional values are rejected, not truncated.
    loan_term_years: Option<f64>,
    #[serde(alias = "inflationRate")]
    inflation_rate_percent: Option<f64>,
    #[serde(alias = "investmentReturnRate")]
    investment_return_rate_percent: Option<f64>,
    #[serde(alias = "houseAppreciationRate")]
    house_appreciation_rate_percent: Option<f64>,
    monthly_payment: Option<f64>,
    #[serde(alias = "futureYears")]
    projection_years: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ComparePayload {
    panels: Vec<ProjectPayload>,
}

#[derive(Debug)]
struct ApiRequest {
    label: String,
    inputs: CalculatorInputs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PanelResponse<'a> {
    label: &'a str,
    inputs: &'a CalculatorInputs,
    #[serde(flatten)]
    result: &'a ProjectionResult,
}

#[derive(Debug, Serialize)]
struct CompareResponse<'a> {
    panels: Vec<PanelResponse<'a>>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

#[derive(Debug, Error)]
enum ApiError {
    #[error("{label}: {source}")]
    Invalid {
        label: String,
        source: ValidationError,
    },
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn field(&self) -> Option<&'static str> {
        match self {
            ApiError::Invalid { source, .. } => Some(source.field()),
            ApiError::BadRequest(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(field = self.field(), "rejected projection request: {}", self);
        json_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                error: self.to_string(),
                field: self.field(),
            },
        )
    }
}

pub fn build_inputs(cli: &Cli) -> Result<CalculatorInputs, ValidationError> {
    let inputs = CalculatorInputs {
        initial_assets: cli.initial_assets,
        house_value: cli.house_value,
        down_payment_percent: cli.down_payment_percent,
        mortgage_interest_rate_percent: cli.mortgage_interest_rate,
        loan_term_years: cli.loan_term_years,
        inflation_rate_percent: cli.inflation_rate,
        investment_return_rate_percent: cli.investment_return_rate,
        house_appreciation_rate_percent: cli.house_appreciation_rate,
        monthly_payment: cli.monthly_payment,
        projection_years: cli.projection_years,
    };
    validate_inputs(&inputs)?;
    Ok(inputs)
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("failed to encode projection as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One-shot command line projection; returns the text to print.
pub fn run_cli(cli: &Cli) -> Result<String, CliError> {
    let inputs = build_inputs(cli)?;
    let result = project(&inputs)?;
    if cli.json {
        let response = PanelResponse {
            label: &cli.label,
            inputs: &inputs,
            result: &result,
        };
        let json = serde_json::to_string_pretty(&response)?;
        return Ok(format!("{json}\n"));
    }
    Ok(render_report(&cli.label, &result))
}

fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/compare", post(compare_post_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "house vs invest calculator listening");
    info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn compare_post_handler(Json(payload): Json<ComparePayload>) -> Response {
    match compare_panels(payload) {
        Ok(panels) => {
            let response = CompareResponse {
                panels: panels
                    .iter()
                    .map(|(request, result)| PanelResponse {
                        label: &request.label,
                        inputs: &request.inputs,
                        result,
                    })
                    .collect(),
            };
            json_response(StatusCode::OK, response)
        }
        Err(err) => err.into_response(),
    }
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    match evaluate_panel(payload, 1) {
        Ok((request, result)) => json_response(
            StatusCode::OK,
            PanelResponse {
                label: &request.label,
                inputs: &request.inputs,
                result: &result,
            },
        ),
        Err(err) => err.into_response(),
    }
}

fn compare_panels(
    payload: ComparePayload,
) -> Result<Vec<(ApiRequest, ProjectionResult)>, ApiError> {
    if payload.panels.is_empty() {
        return Err(ApiError::BadRequest(
            "panels must contain at least one calculator".to_string(),
        ));
    }
    if payload.panels.len() > MAX_PANELS {
        return Err(ApiError::BadRequest(format!(
            "panels may contain at most {MAX_PANELS} calculators"
        )));
    }

    payload
        .panels
        .into_iter()
        .enumerate()
        .map(|(idx, panel)| evaluate_panel(panel, idx + 1))
        .collect()
}

fn evaluate_panel(
    payload: ProjectPayload,
    position: usize,
) -> Result<(ApiRequest, ProjectionResult), ApiError> {
    let request = api_request_from_payload(payload, position)?;
    debug!(
        label = %request.label,
        projection_years = request.inputs.projection_years,
        "evaluating projection"
    );
    let result = project(&request.inputs).map_err(|source| ApiError::Invalid {
        label: request.label.clone(),
        source,
    })?;
    Ok((request, result))
}

fn api_request_from_payload(
    payload: ProjectPayload,
    position: usize,
) -> Result<ApiRequest, ApiError> {
    let label = payload
        .label
        .clone()
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| format!("Calculator {position}"));

    match inputs_from_payload(payload) {
        Ok(inputs) => Ok(ApiRequest { label, inputs }),
        Err(source) => Err(ApiError::Invalid { label, source }),
    }
}

fn inputs_from_payload(payload: ProjectPayload) -> Result<CalculatorInputs, ValidationError> {
    let mut inputs = CalculatorInputs::default();

    if let Some(v) = payload.initial_assets {
        inputs.initial_assets = v;
    }
    if let Some(v) = payload.house_value {
        inputs.house_value = v;
    }
    if let Some(v) = payload.down_payment_percent {
        inputs.down_payment_percent = v;
    }
    if let Some(v) = payload.mortgage_interest_rate_percent {
        inputs.mortgage_interest_rate_percent = v;
    }
    if let Some(v) = payload.loan_term_years {
        inputs.loan_term_years = whole_years(bounds::LOAN_TERM_YEARS, v)?;
    }
    if let Some(v) = payload.inflation_rate_percent {
        inputs.inflation_rate_percent = v;
    }
    if let Some(v) = payload.investment_return_rate_percent {
        inputs.investment_return_rate_percent = v;
    }
    if let Some(v) = payload.house_appreciation_rate_percent {
        inputs.house_appreciation_rate_percent = v;
    }
    if let Some(v) = payload.monthly_payment {
        inputs.monthly_payment = v;
    }
    if let Some(v) = payload.projection_years {
        inputs.projection_years = whole_years(bounds::PROJECTION_YEARS, v)?;
    }

    validate_inputs(&inputs)?;
    Ok(inputs)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            field: None,
        },
    )
}
