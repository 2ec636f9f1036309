use std::collections::BTreeMap;

use axum::{
    Router,
    extract::{Json, Path, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::core::validation::FieldSpec;
use crate::core::{
    CalculationResult, CalculatorKind, RawInput, StaticRates, ValidationError, ValidationErrors,
    evaluate,
};
use crate::presentation::{CurrencyTag, Presentation, present};

const CURRENCY_PARAM: &str = "currency";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownCalculator(_) => StatusCode::NOT_FOUND,
            ApiError::UnknownCurrency(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let field_errors = match &self {
            ApiError::Validation(errors) => errors.errors().to_vec(),
            ApiError::UnknownCurrency(code) => vec![ValidationError::new(
                CURRENCY_PARAM,
                format!("{code} is not a supported currency"),
            )],
            ApiError::UnknownCalculator(_) => Vec::new(),
        };
        let error = match &self {
            ApiError::Validation(_) => "Validation failed".to_string(),
            other => other.to_string(),
        };
        json_response(
            self.status(),
            ErrorResponse {
                error,
                field_errors,
            },
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    field_errors: Vec<ValidationError>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub name: &'static str,
    pub constraint: String,
    pub required: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInfo {
    pub slug: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub calculator: &'static str,
    pub title: &'static str,
    pub result: CalculationResult,
    pub presentation: Presentation,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CurrencyQuery {
    currency: Option<String>,
}

pub fn catalog() -> Vec<CalculatorInfo> {
    CalculatorKind::ALL
        .into_iter()
        .map(|kind| CalculatorInfo {
            slug: kind.slug(),
            title: kind.title(),
            fields: kind.schema().fields.iter().map(field_info).collect(),
        })
        .collect()
}

fn field_info(spec: &FieldSpec) -> FieldInfo {
    FieldInfo {
        name: spec.name,
        constraint: spec.kind.constraint(),
        required: spec.default.is_none(),
    }
}

/// Validates, computes and presents one calculator invocation.
pub fn calculate(
    slug: &str,
    raw: &RawInput,
    currency: Option<&str>,
) -> Result<CalculateResponse, ApiError> {
    let kind = CalculatorKind::from_slug(slug)
        .ok_or_else(|| ApiError::UnknownCalculator(slug.to_string()))?;
    let currency = match currency {
        Some(code) => {
            CurrencyTag::lookup(code).ok_or_else(|| ApiError::UnknownCurrency(code.to_string()))?
        }
        None => CurrencyTag::default(),
    };

    let result = evaluate(kind, raw, &StaticRates)?;
    let presentation = present(&result, currency);
    Ok(CalculateResponse {
        calculator: kind.slug(),
        title: kind.title(),
        result,
        presentation,
    })
}

/// Query-string parameters arrive as text; validation coerces them.
pub fn raw_input_from_params(params: BTreeMap<String, String>) -> RawInput {
    params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

fn take_currency(raw: &mut RawInput) -> Option<String> {
    match raw.remove(CURRENCY_PARAM)? {
        Value::String(code) => Some(code),
        other => Some(other.to_string()),
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/calculators", get(catalog_handler))
        .route(
            "/api/calculators/:slug",
            get(calculate_get_handler).post(calculate_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(config: &ServerConfig) -> std::io::Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "finproj HTTP API listening");

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

async fn catalog_handler() -> Response {
    json_response(StatusCode::OK, catalog())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_get_handler(
    Path(slug): Path<String>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let mut raw = raw_input_from_params(params);
    let currency = take_currency(&mut raw);
    calculate_handler_impl(&slug, &raw, currency.as_deref())
}

async fn calculate_post_handler(
    Path(slug): Path<String>,
    Query(query): Query<CurrencyQuery>,
    Json(mut raw): Json<RawInput>,
) -> Response {
    let body_currency = take_currency(&mut raw);
    let currency = query.currency.or(body_currency);
    calculate_handler_impl(&slug, &raw, currency.as_deref())
}

fn calculate_handler_impl(slug: &str, raw: &RawInput, currency: Option<&str>) -> Response {
    debug!(calculator = slug, fields = raw.len(), "calculation requested");
    match calculate(slug, raw, currency) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => {
            warn!(calculator = slug, error = %err, "calculation rejected");
            err.into_response()
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            field_errors: Vec::new(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_from_json(json: &str) -> RawInput {
        serde_json::from_str::<RawInput>(json).expect("test payload is a JSON object")
    }

    #[test]
    fn catalog_lists_every_calculator_with_constraints() {
        let catalog = catalog();
        assert_eq!(catalog.len(), CalculatorKind::ALL.len());

        let compound = catalog
            .iter()
            .find(|c| c.slug == "compound-interest")
            .expect("compound interest listed");
        let frequency = compound
            .fields
            .iter()
            .find(|f| f.name == "frequency")
            .expect("frequency field");
        assert_eq!(frequency.constraint, "must be one of 1, 2, 4, 12");
        assert!(frequency.required);

        let fee = catalog
            .iter()
            .find(|c| c.slug == "blockchain-fee")
            .expect("fee listed");
        assert!(fee.fields.iter().any(|f| f.name == "displayCurrency" && !f.required));
    }

    #[test]
    fn calculate_parses_web_keys() {
        let raw = raw_from_json(
            r#"{
              "currentAge": 30,
              "retirementAge": 60,
              "monthlyExpensesAtRetirement": 5000,
              "lifeExpectancyPostRetirement": 25,
              "inflationRate": 6,
              "postRetirementReturn": 7
            }"#,
        );
        let response = calculate("retirement-corpus", &raw, None).expect("valid request");
        assert_eq!(response.calculator, "retirement-corpus");
        let CalculationResult::RetirementCorpus(result) = &response.result else {
            panic!("wrong result variant");
        };
        assert_eq!(result.total_nominal_expenses, 1_500_000.0);
    }

    #[test]
    fn query_params_are_coerced_from_text() {
        let mut params = BTreeMap::new();
        params.insert("initialInvestment".to_string(), "1000".to_string());
        params.insert("currentValue".to_string(), "1500".to_string());
        params.insert("currency".to_string(), "eur".to_string());

        let mut raw = raw_input_from_params(params);
        let currency = take_currency(&mut raw);
        assert_eq!(currency.as_deref(), Some("eur"));
        assert!(!raw.contains_key("currency"));

        let response = calculate("crypto-roi", &raw, currency.as_deref()).expect("valid");
        assert_eq!(response.presentation.currency.code, "EUR");
        let CalculationResult::CryptoRoi(result) = &response.result else {
            panic!("wrong result variant");
        };
        assert_eq!(result.roi_percentage, 50.0);
    }

    #[test]
    fn unknown_calculator_is_not_found() {
        let err = calculate("mortgage", &RawInput::new(), None).expect_err("unknown slug");
        assert!(matches!(err, ApiError::UnknownCalculator(_)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_currency_is_a_bad_request() {
        let raw = raw_from_json(r#"{ "totalGains": 5000, "taxRate": 20 }"#);
        let err = calculate("crypto-tax", &raw, Some("XYZ")).expect_err("unknown currency");
        assert!(matches!(err, ApiError::UnknownCurrency(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_failure_lists_field_errors() {
        let raw = raw_from_json(r#"{ "principal": -1, "rate": 7, "time": 10, "frequency": 3 }"#);
        let err = calculate("compound-interest", &raw, None).expect_err("invalid");
        let ApiError::Validation(errors) = &err else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["principal", "frequency"]);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
    }

    #[test]
    fn error_body_serializes_field_errors_in_camel_case() {
        let body = ErrorResponse {
            error: "Validation failed".into(),
            field_errors: vec![ValidationError::new("retirementAge", "must be greater than currentAge")],
        };
        let json = serde_json::to_string(&body).expect("serializes");
        assert!(json.contains("\"fieldErrors\""));
        assert!(json.contains("\"retirementAge\""));

        let plain = ErrorResponse {
            error: "Not found".into(),
            field_errors: Vec::new(),
        };
        let json = serde_json::to_string(&plain).expect("serializes");
        assert!(!json.contains("fieldErrors"));
    }

    #[test]
    fn calculate_response_serialization_contains_expected_fields() {
        let raw = raw_from_json(
            r#"{ "principal": 10000, "rate": 7, "time": 3, "frequency": 12 }"#,
        );
        let response = calculate("compound-interest", &raw, Some("USD")).expect("valid");
        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"calculator\":\"compound-interest\""));
        assert!(json.contains("\"futureValue\""));
        assert!(json.contains("\"annualBreakdown\""));
        assert!(json.contains("\"interestEarned\""));
        assert!(json.contains("\"presentation\""));
        assert!(json.contains("\"summary\""));
        assert!(json.contains("\"estimateNote\":null"));
    }

    #[test]
    fn body_currency_is_used_when_query_has_none() {
        let mut raw = raw_from_json(r#"{ "totalGains": 100, "taxRate": 10, "currency": "GBP" }"#);
        let currency = CurrencyQuery::default().currency.or(take_currency(&mut raw));
        let response = calculate("crypto-tax", &raw, currency.as_deref()).expect("valid");
        assert_eq!(response.presentation.currency.symbol, "£");
    }
}
