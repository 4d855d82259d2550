// ============================================================
// Layer 6 — HTTP QA-Model Extractor
// ============================================================
// Calls a hosted extractive QA model (a Hugging Face style
// question-answering endpoint) over blocking HTTP.
//
// Request:
//   POST <endpoint>
//   { "inputs": { "question": "...", "context": "..." },
//     "parameters": { "max_answer_len": 512 } }
//
// Response (either shape is accepted; the first span wins):
//   { "answer": "...", "score": 0.93, "start": 10, "end": 24 }
//   [ { "answer": "...", "score": 0.93 }, ... ]
//
// No retries here: escalation is the orchestrator's job, and a
// failed call is just an empty answer to it.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::answer::{Answer, ExtractionError};
use crate::domain::traits::AnswerExtractor;

#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs:     QaInputs<'a>,
    parameters: QaParameters,
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context:  &'a str,
}

#[derive(Debug, Serialize)]
struct QaParameters {
    max_answer_len: usize,
}

#[derive(Debug, Deserialize)]
struct QaSpan {
    answer: String,
    #[serde(default)]
    score:  Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QaResponse {
    Single(QaSpan),
    Many(Vec<QaSpan>),
    Failure { error: String },
}

pub struct HttpExtractor {
    client:   reqwest::blocking::Client,
    endpoint: String,
    token:    Option<String>,
    timeout:  Duration,
}

impl HttpExtractor {
    pub fn new(endpoint: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Cannot build HTTP client for the QA endpoint")?;
        Ok(Self { client, endpoint: endpoint.into(), token, timeout })
    }
}

impl AnswerExtractor for HttpExtractor {
    fn extract(
        &self,
        question:          &str,
        context:           &str,
        max_answer_length: usize,
    ) -> Result<Answer, ExtractionError> {
        if context.trim().is_empty() {
            return Err(ExtractionError::EmptyContext);
        }

        let body = QaRequest {
            inputs:     QaInputs { question, context },
            parameters: QaParameters { max_answer_len: max_answer_length },
        };

        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        let text = resp.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ExtractionError::Model(format!("HTTP {status}: {text}")));
        }

        parse_response(&text)
    }
}

impl HttpExtractor {
    fn transport_error(&self, e: reqwest::Error) -> ExtractionError {
        if e.is_timeout() {
            ExtractionError::Timeout(self.timeout)
        } else {
            ExtractionError::Transport(e.to_string())
        }
    }
}

/// Turn a response body into an Answer. An empty span list means
/// the model found nothing, which is an empty answer, not an error.
fn parse_response(body: &str) -> Result<Answer, ExtractionError> {
    let parsed: QaResponse = serde_json::from_str(body)
        .map_err(|e| ExtractionError::Model(format!("unexpected response body: {e}")))?;

    match parsed {
        QaResponse::Single(span) => Ok(Answer::new(span.answer.trim(), span.score)),
        QaResponse::Many(spans) => Ok(spans
            .into_iter()
            .next()
            .map(|span| Answer::new(span.answer.trim(), span.score))
            .unwrap_or_else(Answer::empty)),
        QaResponse::Failure { error } => Err(ExtractionError::Model(error)),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload_shape() {
        let body = QaRequest {
            inputs:     QaInputs { question: "Q?", context: "C." },
            parameters: QaParameters { max_answer_len: 512 },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({
            "inputs": { "question": "Q?", "context": "C." },
            "parameters": { "max_answer_len": 512 }
        }));
    }

    #[test]
    fn test_parses_single_span() {
        let a = parse_response(r#"{"answer": " Middlesex College ", "score": 0.8, "start": 3, "end": 20}"#).unwrap();
        assert_eq!(a, Answer::new("Middlesex College", Some(0.8)));
    }

    #[test]
    fn test_parses_span_list_and_takes_first() {
        let a = parse_response(r#"[{"answer": "NSERC", "score": 0.7}, {"answer": "industry", "score": 0.2}]"#).unwrap();
        assert_eq!(a.text, "NSERC");
    }

    #[test]
    fn test_empty_span_list_is_empty_answer() {
        assert!(parse_response("[]").unwrap().is_empty());
    }

    #[test]
    fn test_error_body_is_model_error() {
        let r = parse_response(r#"{"error": "Model is currently loading"}"#);
        assert!(matches!(r, Err(ExtractionError::Model(m)) if m.contains("loading")));
    }

    #[test]
    fn test_garbage_body_is_model_error() {
        assert!(matches!(parse_response("<html>"), Err(ExtractionError::Model(_))));
    }

    #[test]
    fn test_empty_context_short_circuits() {
        let ex = HttpExtractor::new("http://127.0.0.1:9/qa", None, Duration::from_secs(1)).unwrap();
        assert!(matches!(ex.extract("q", " ", 10), Err(ExtractionError::EmptyContext)));
    }
}
