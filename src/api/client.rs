use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, ConfigError};
use crate::http_client;
use crate::quiz::{GenerationConfig, Problem, Stats, SystemStatus};

const GENERATE_PATH: &str = "/api/generate";
const EXPORT_HTML_PATH: &str = "/api/export/html";
const STATUS_PATH: &str = "/api/status";
const PROBLEMS_PATH: &str = "/api/problems";

/// Longest error body quoted back to the user.
const MAX_ERROR_DETAIL_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Could not reach {url}: {message}")]
    Transport { url: String, message: String },
    #[error("{endpoint} returned HTTP {status}: {detail}")]
    Status {
        endpoint: &'static str,
        status: u16,
        detail: String,
    },
    #[error("Malformed response from {endpoint}: {message}")]
    Json {
        endpoint: &'static str,
        message: String,
    },
    #[error("Unexpected response from {endpoint}: {message}")]
    Schema {
        endpoint: &'static str,
        message: String,
    },
}

/// Successful `POST /api/generate` result.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateResponse {
    pub problems: Vec<Problem>,
    pub stats: Option<Stats>,
}

/// Standalone quiz document returned by the export endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedQuiz {
    pub html: String,
}

/// Operations the UI needs from the backend.
///
/// Calls block; the controller runs them on worker threads.
pub trait QuizBackend: Send + Sync {
    fn generate_problems(&self, config: &GenerationConfig) -> Result<GenerateResponse, ApiError>;
    fn export_html(&self, problems: &[Problem]) -> Result<ExportedQuiz, ApiError>;
    fn get_status(&self) -> Result<SystemStatus, ApiError>;
    fn get_problems(&self) -> Result<Vec<Problem>, ApiError>;
}

/// `ureq`-backed client for a backend at a fixed origin.
pub struct QuizApi {
    agent: ureq::Agent,
    base_url: String,
    max_response_bytes: usize,
}

impl QuizApi {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let base = config.backend.parsed_base_url()?;
        Ok(Self {
            agent: http_client::build_agent(&config.http),
            base_url: base.as_str().trim_end_matches('/').to_string(),
            max_response_bytes: config.http.max_response_bytes,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get_json(&self, endpoint: &'static str) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let result = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call();
        self.read_json(endpoint, &url, result)
    }

    fn post_json(
        &self,
        endpoint: &'static str,
        body: &impl serde::Serialize,
    ) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let result = self
            .agent
            .post(&url)
            .set("Accept", "application/json")
            .send_json(body);
        self.read_json(endpoint, &url, result)
    }

    fn read_json(
        &self,
        endpoint: &'static str,
        url: &str,
        result: Result<ureq::Response, ureq::Error>,
    ) -> Result<Value, ApiError> {
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = http_client::read_response_text(response, self.max_response_bytes)
                    .unwrap_or_else(|err| err.to_string());
                warn!(endpoint, status, "backend returned an error status");
                return Err(ApiError::Status {
                    endpoint,
                    status,
                    detail: error_detail(&body),
                });
            }
            Err(ureq::Error::Transport(err)) => {
                warn!(endpoint, error = %err, "backend unreachable");
                return Err(ApiError::Transport {
                    url: url.to_string(),
                    message: err.to_string(),
                });
            }
        };
        let body = http_client::read_response_text(response, self.max_response_bytes).map_err(
            |err| ApiError::Json {
                endpoint,
                message: err.to_string(),
            },
        )?;
        parse_body(endpoint, &body)
    }
}

impl QuizBackend for QuizApi {
    fn generate_problems(&self, config: &GenerationConfig) -> Result<GenerateResponse, ApiError> {
        info!(
            num_problems = config.num_problems,
            category = config.category.wire_value(),
            "requesting problem generation"
        );
        let body = self.post_json(GENERATE_PATH, &config.to_request())?;
        parse_generate_response(body)
    }

    fn export_html(&self, problems: &[Problem]) -> Result<ExportedQuiz, ApiError> {
        info!(count = problems.len(), "requesting HTML export");
        let body = self.post_json(EXPORT_HTML_PATH, &problems)?;
        parse_export_response(body)
    }

    fn get_status(&self) -> Result<SystemStatus, ApiError> {
        let body = self.get_json(STATUS_PATH)?;
        decode(STATUS_PATH, body)
    }

    fn get_problems(&self) -> Result<Vec<Problem>, ApiError> {
        let body = self.get_json(PROBLEMS_PATH)?;
        parse_problems_response(body)
    }
}

fn parse_body(endpoint: &'static str, body: &str) -> Result<Value, ApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Json {
            endpoint,
            message: "empty response body".to_string(),
        });
    }
    serde_json::from_str(trimmed).map_err(|err| ApiError::Json {
        endpoint,
        message: err.to_string(),
    })
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Schema {
        endpoint,
        message: err.to_string(),
    })
}

pub(crate) fn parse_generate_response(mut body: Value) -> Result<GenerateResponse, ApiError> {
    let problems = take_problems_array(GENERATE_PATH, &mut body)?;
    let stats = match body.get_mut("stats").map(Value::take) {
        None | Some(Value::Null) => None,
        Some(stats) => Some(decode::<Stats>(GENERATE_PATH, stats)?),
    };
    Ok(GenerateResponse { problems, stats })
}

pub(crate) fn parse_export_response(body: Value) -> Result<ExportedQuiz, ApiError> {
    #[derive(Deserialize)]
    struct Wire {
        html: String,
    }
    let wire: Wire = decode(EXPORT_HTML_PATH, body)?;
    Ok(ExportedQuiz { html: wire.html })
}

/// `/api/problems` answers either a bare array or a `{problems: [...]}` wrapper.
pub(crate) fn parse_problems_response(mut body: Value) -> Result<Vec<Problem>, ApiError> {
    if body.is_array() {
        return decode_problems(PROBLEMS_PATH, body);
    }
    take_problems_array(PROBLEMS_PATH, &mut body)
}

fn take_problems_array(endpoint: &'static str, body: &mut Value) -> Result<Vec<Problem>, ApiError> {
    match body.get_mut("problems").map(Value::take) {
        Some(problems @ Value::Array(_)) => decode_problems(endpoint, problems),
        Some(_) => Err(ApiError::Schema {
            endpoint,
            message: "`problems` is not an array".to_string(),
        }),
        None => Err(ApiError::Schema {
            endpoint,
            message: "response has no `problems` field".to_string(),
        }),
    }
}

fn decode_problems(endpoint: &'static str, value: Value) -> Result<Vec<Problem>, ApiError> {
    let problems: Vec<Problem> = decode(endpoint, value)?;
    for problem in &problems {
        problem.validate().map_err(|err| ApiError::Schema {
            endpoint,
            message: err.to_string(),
        })?;
    }
    Ok(problems)
}

/// Prefer FastAPI's `{"detail": ...}` over the raw error body.
fn error_detail(body: &str) -> String {
    let trimmed = body.trim();
    let detail = serde_json::from_str::<Value>(trimmed)
        .ok()
        .and_then(|value| match value.get("detail") {
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        })
        .unwrap_or_else(|| trimmed.to_string());
    if detail.is_empty() {
        return "no details".to_string();
    }
    truncate_chars(&detail, MAX_ERROR_DETAIL_CHARS)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_server::{json_response, serve_once};
    use crate::quiz::{CategorySelection, OptionLabel};
    use serde_json::json;

    fn problem_json(id: &str) -> Value {
        json!({
            "id": id,
            "category": "Work & Time",
            "difficulty": "EASY",
            "question": "A can finish a job in 10 days and B in 15. Together?",
            "options": {"A": "5 days", "B": "6 days", "C": "8 days", "D": "12 days"},
            "correct_answer": "B",
            "explanation": "1/10 + 1/15 = 1/6",
            "validation_status": "VALID",
            "validation_score": 0.95,
            "ground_truth": 6.0,
            "solver_a_result": {"answer": 6.0, "confidence": 0.9, "selected_option": "B"},
            "solver_b_result": {"answer": 6.0, "confidence": 0.85}
        })
    }

    fn api_for(url: &str) -> QuizApi {
        let mut config = AppConfig::default();
        config.backend.base_url = format!("{url}/");
        QuizApi::from_config(&config).unwrap()
    }

    #[test]
    fn generate_posts_request_and_parses_problems() {
        let body = json!({
            "problems": [problem_json("WT-1"), problem_json("WT-2")],
            "stats": {"total_generated": 2, "total_valid": 2, "solver_agreement_rate": 1.0}
        })
        .to_string();
        let (url, requests) = serve_once(json_response("200 OK", &body));
        let api = api_for(&url);
        let config = GenerationConfig::new(2, CategorySelection::Mixed, None).unwrap();
        let response = api.generate_problems(&config).unwrap();

        assert_eq!(response.problems.len(), 2);
        assert_eq!(response.problems[0].correct_answer, OptionLabel::B);
        assert_eq!(response.stats.unwrap().total_generated, 2);

        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST /api/generate "));
        assert!(request.contains(r#""num_problems":2"#));
        assert!(request.contains(r#""category":"mixed""#));
    }

    #[test]
    fn generate_surfaces_fastapi_detail_on_error_status() {
        let (url, _) = serve_once(json_response(
            "500 Internal Server Error",
            r#"{"detail":"GROQ_API_KEY missing"}"#,
        ));
        let api = api_for(&url);
        let config = GenerationConfig::new(1, CategorySelection::Mixed, None).unwrap();
        let err = api.generate_problems(&config).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                endpoint: GENERATE_PATH,
                status: 500,
                detail: "GROQ_API_KEY missing".to_string(),
            }
        );
    }

    #[test]
    fn generate_reports_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = api_for(&format!("http://{addr}"));
        let config = GenerationConfig::new(1, CategorySelection::Mixed, None).unwrap();
        let err = api.generate_problems(&config).unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[test]
    fn generate_rejects_malformed_json() {
        let (url, _) = serve_once(json_response("200 OK", "{not json"));
        let api = api_for(&url);
        let config = GenerationConfig::new(1, CategorySelection::Mixed, None).unwrap();
        let err = api.generate_problems(&config).unwrap_err();
        assert!(matches!(err, ApiError::Json { .. }));
    }

    #[test]
    fn generate_response_requires_problem_array() {
        let err = parse_generate_response(json!({"stats": {}})).unwrap_err();
        assert!(err.to_string().contains("no `problems` field"));
        let err = parse_generate_response(json!({"problems": {"id": "x"}})).unwrap_err();
        assert!(err.to_string().contains("not an array"));
    }

    #[test]
    fn generate_response_tolerates_missing_stats() {
        let response = parse_generate_response(json!({"problems": []})).unwrap();
        assert!(response.problems.is_empty());
        assert!(response.stats.is_none());
    }

    #[test]
    fn generate_response_rejects_out_of_range_confidence() {
        let mut problem = problem_json("WT-9");
        problem["solver_b_result"]["confidence"] = json!(85);
        let err = parse_generate_response(json!({"problems": [problem]})).unwrap_err();
        assert!(matches!(err, ApiError::Schema { .. }));
    }

    #[test]
    fn export_returns_html_verbatim() {
        let html = "<!DOCTYPE html>\n<h1>Quiz \u{1F393}</h1>\r\n  <p>trailing  </p>  ";
        let body = json!({ "html": html }).to_string();
        let (url, requests) = serve_once(json_response("200 OK", &body));
        let api = api_for(&url);
        let problem: Problem = serde_json::from_value(problem_json("WT-1")).unwrap();
        let exported = api.export_html(&[problem]).unwrap();
        assert_eq!(exported.html, html);

        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST /api/export/html "));
        let payload = request.split("\r\n\r\n").nth(1).unwrap();
        let sent: Value = serde_json::from_str(payload).unwrap();
        assert!(sent.is_array());
        assert_eq!(sent[0]["id"], json!("WT-1"));
    }

    #[test]
    fn export_without_html_is_schema_error() {
        let err = parse_export_response(json!({"message": "nope"})).unwrap_err();
        assert!(matches!(err, ApiError::Schema { .. }));
    }

    #[test]
    fn problems_accepts_wrapped_and_bare_arrays() {
        let wrapped = parse_problems_response(json!({"problems": [problem_json("A-1")]})).unwrap();
        let bare = parse_problems_response(json!([problem_json("A-1")])).unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn status_reads_agents() {
        let body = json!({
            "agents": [{"name": "Generator", "status": "running", "progress": 30}],
            "total_generated": 1,
            "total_valid": 1
        })
        .to_string();
        let (url, requests) = serve_once(json_response("200 OK", &body));
        let status = api_for(&url).get_status().unwrap();
        assert_eq!(status.agents[0].name, "Generator");
        assert!(requests.recv().unwrap().starts_with("GET /api/status "));
    }

    #[test]
    fn error_detail_is_truncated() {
        let long = "x".repeat(MAX_ERROR_DETAIL_CHARS + 50);
        let detail = error_detail(&long);
        assert_eq!(detail.chars().count(), MAX_ERROR_DETAIL_CHARS + 1);
        assert_eq!(error_detail("   "), "no details");
    }
}
