use serde::{Deserialize, Serialize};

pub const SOLVE_COMMAND: &str = "request.get";
pub const MAX_TIMEOUT_MS: u64 = 60_000;

/// Body of the POST sent to the solver service.
#[derive(Serialize, Debug)]
pub struct SolveRequest {
    pub cmd: &'static str,
    pub url: String,
    #[serde(rename = "maxTimeout")]
    pub max_timeout: u64,
}

impl SolveRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            cmd: SOLVE_COMMAND,
            url: url.into(),
            max_timeout: MAX_TIMEOUT_MS,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SolveResponse {
    #[serde(default)]
    pub solution: Option<Solution>,
}

#[derive(Deserialize, Debug)]
pub struct Solution {
    #[serde(default)]
    pub response: Option<String>,
}

impl SolveResponse {
    /// The solved page, or an empty string when the solver sent none.
    pub fn into_page(self) -> String {
        self.solution
            .and_then(|solution| solution.response)
            .unwrap_or_default()
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn solve_request_uses_solver_field_names() {
        let value = serde_json::to_value(SolveRequest::get("https://example.com/")).unwrap();
        assert_eq!(
            value,
            json!({"cmd": "request.get", "url": "https://example.com/", "maxTimeout": 60000})
        );
    }

    #[test]
    fn missing_solution_yields_empty_page() {
        let parsed: SolveResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert_eq!(parsed.into_page(), "");

        let parsed: SolveResponse = serde_json::from_str(r#"{"solution": {}}"#).unwrap();
        assert_eq!(parsed.into_page(), "");
    }

    #[test]
    fn extracts_solved_page() {
        let parsed: SolveResponse =
            serde_json::from_str(r#"{"solution": {"response": "<html></html>", "url": "x"}}"#)
                .unwrap();
        assert_eq!(parsed.into_page(), "<html></html>");
    }
}
