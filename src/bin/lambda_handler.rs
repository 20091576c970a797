//! AWS Lambda handler for running projections
//!
//! Accepts (partial) assumptions as JSON and returns the monthly snapshots,
//! summary, chart series and validation warnings.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use financial_plan::{
    projection::{self, DEFAULT_BASE_YEAR},
    report::{chart, ChartSeries},
    Assumptions, MonthlySnapshot, ProjectionConfig, ProjectionEngine,
};
use financial_plan::projection::ProjectionSummary;
use lambda_http::http::{response::Builder, Method};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use std::time::Instant;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Input for the projection; omitted assumption fields take their defaults
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    #[serde(flatten)]
    pub assumptions: Assumptions,

    /// Calendar year of the first projected month (default: 2026)
    #[serde(default = "default_base_year")]
    pub base_year: i32,
}

fn default_base_year() -> i32 { DEFAULT_BASE_YEAR }

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub assumptions: Assumptions,
    pub warnings: Vec<String>,
    pub summary: ProjectionSummary,
    pub charts: Vec<ChartSeries>,
    pub snapshots: Vec<MonthlySnapshot>,
    pub execution_time_ms: u64,
}

fn cors_headers(builder: Builder) -> Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    Ok(cors_headers(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

fn json_response(body: &ProjectionResponse) -> Result<Response<Body>, Error> {
    Ok(cors_headers(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Parse the request body; an empty body means all defaults
fn parse_request(body: &Body) -> Result<ProjectionRequest, serde_json::Error> {
    let body_str = match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };
    serde_json::from_str(&body_str)
}

/// Run the projection for a parsed request
fn build_response(request: ProjectionRequest, started: Instant) -> ProjectionResponse {
    let warnings: Vec<String> = request
        .assumptions
        .validate()
        .iter()
        .map(|w| w.to_string())
        .collect();
    for warning in &warnings {
        warn!("{}", warning);
    }

    let config = ProjectionConfig {
        base_year: request.base_year,
        ..Default::default()
    };
    let engine = ProjectionEngine::new(request.assumptions, config);
    let result = engine.project();

    ProjectionResponse {
        assumptions: engine.assumptions().clone(),
        warnings,
        summary: result.summary(),
        charts: chart::all_series(&result),
        snapshots: result.snapshots,
        execution_time_ms: started.elapsed().as_millis() as u64,
    }
}

/// Route one HTTP request: CORS preflight, POST projection, anything else rejected
fn respond(method: &Method, body: &Body, started: Instant) -> Result<Response<Body>, Error> {
    if method == Method::OPTIONS {
        return Ok(cors_headers(Response::builder()).status(200).body(Body::Empty)?);
    }
    if method != Method::POST {
        return error_response(405, &format!("Method {} not allowed", method));
    }

    let request = match parse_request(body) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };
    if !projection::is_supported_base_year(request.base_year) {
        return error_response(
            400,
            &format!(
                "base_year must be between {} and {}",
                projection::MIN_BASE_YEAR,
                projection::MAX_BASE_YEAR
            ),
        );
    }

    let response = build_response(request, started);
    info!(
        "Projected {} months in {} ms",
        response.snapshots.len(),
        response.execution_time_ms
    );

    json_response(&response)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    respond(event.method(), event.body(), Instant::now())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_uses_defaults() {
        let request = parse_request(&Body::Empty).unwrap();
        assert_eq!(request.assumptions, Assumptions::default());
        assert_eq!(request.base_year, 2026);
    }

    #[test]
    fn test_partial_body() {
        let body = Body::Text(r#"{"monthly_sales": 9000000, "base_year": 2027}"#.to_string());
        let request = parse_request(&body).unwrap();
        assert_eq!(request.assumptions.monthly_sales, 9_000_000.0);
        assert_eq!(request.assumptions.margin, 0.10);
        assert_eq!(request.base_year, 2027);

        let response = build_response(request, Instant::now());
        assert_eq!(response.snapshots.len(), 24);
        assert_eq!(response.snapshots[0].label, "1/2027");
        assert_eq!(response.charts.len(), 4);
        assert!(response.warnings.is_empty());
    }

    fn status(method: Method, body: &str) -> u16 {
        let body = if body.is_empty() {
            Body::Empty
        } else {
            Body::Text(body.to_string())
        };
        respond(&method, &body, Instant::now()).unwrap().status().as_u16()
    }

    #[test]
    fn test_routing() {
        assert_eq!(status(Method::POST, ""), 200);
        assert_eq!(status(Method::POST, r#"{"margin": 0.12}"#), 200);
        assert_eq!(status(Method::OPTIONS, ""), 200);
        assert_eq!(status(Method::GET, ""), 405);
        assert_eq!(status(Method::PUT, "{}"), 405);
        assert_eq!(status(Method::DELETE, ""), 405);
        assert_eq!(status(Method::POST, "{ nope"), 400);
    }

    #[test]
    fn test_base_year_out_of_range() {
        assert_eq!(status(Method::POST, r#"{"base_year": 2147483647}"#), 400);
        assert_eq!(status(Method::POST, r#"{"base_year": 0}"#), 400);
        assert_eq!(status(Method::POST, r#"{"base_year": 9999}"#), 200);
    }

    #[test]
    fn test_preflight_has_cors_headers() {
        let response = respond(&Method::OPTIONS, &Body::Empty, Instant::now()).unwrap();
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert!(matches!(response.body(), Body::Empty));
    }

    #[test]
    fn test_invalid_body() {
        assert!(parse_request(&Body::Text("{ nope".to_string())).is_err());
    }

    #[test]
    fn test_warnings_reported() {
        let body = Body::Text(r#"{"collection_90_days": 0.1}"#.to_string());
        let response = build_response(parse_request(&body).unwrap(), Instant::now());
        assert_eq!(response.warnings.len(), 1);
    }
}
