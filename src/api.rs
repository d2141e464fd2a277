//! HTTP client for the trivia question server.
//!
//! # Endpoints
//!
//! ```text
//! GET    /questions?page=N              → QuestionList (with categories)
//! GET    /questions?category=ID&page=N  → QuestionList
//! POST   /search      {search_term}     → QuestionList (totals optional)
//! DELETE /questions/{id}                → success only
//! POST   /questions   {question, ...}   → {created_id}
//! ```
//!
//! Each call is a single request with no retry and no timeout. Failures are
//! typed here ([`ApiError`]) and collapsed to one notice by the caller.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::question::{category_id, CategoryMap, NewQuestion, Question};

/// A page (or search result) of questions
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionList {
    pub questions: Vec<Question>,
    /// Absent from search responses on some servers
    #[serde(default)]
    pub total_questions: Option<u32>,
    /// Only sent with unfiltered listings
    #[serde(default)]
    pub categories: Option<CategoryMap>,
    #[serde(default, deserialize_with = "category_id::deserialize_option")]
    pub current_category: Option<u32>,
}

impl QuestionList {
    /// Total count, falling back to the number of returned questions
    pub fn total(&self) -> u32 {
        self.total_questions
            .unwrap_or_else(|| self.questions.len() as u32)
    }
}

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    search_term: &'a str,
}

#[derive(Debug, Deserialize)]
struct Created {
    #[serde(default)]
    created_id: Option<u32>,
}

/// Error envelope the server sends with 4xx responses
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    message: String,
}

/// Everything that can go wrong talking to the server
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Async client bound to one server base URL
#[derive(Debug, Clone)]
pub struct TriviaClient {
    client: Client,
    base_url: String,
}

impl TriviaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn questions_url(&self, page: u32) -> String {
        format!("{}/questions?page={}", self.base_url, page)
    }

    fn category_url(&self, category: u32, page: u32) -> String {
        format!("{}/questions?category={}&page={}", self.base_url, category, page)
    }

    fn question_url(&self, id: u32) -> String {
        format!("{}/questions/{}", self.base_url, id)
    }

    /// `GET /questions?page=N`
    pub async fn list_questions(&self, page: u32) -> Result<QuestionList, ApiError> {
        let resp = self.client.get(self.questions_url(page)).send().await?;
        read_json(resp).await
    }

    /// `GET /questions?category=ID&page=N`
    pub async fn list_by_category(&self, category: u32, page: u32) -> Result<QuestionList, ApiError> {
        let resp = self
            .client
            .get(self.category_url(category, page))
            .send()
            .await?;
        read_json(resp).await
    }

    /// `POST /search`
    pub async fn search(&self, term: &str) -> Result<QuestionList, ApiError> {
        let resp = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&SearchBody { search_term: term })
            .send()
            .await?;
        read_json(resp).await
    }

    /// `DELETE /questions/{id}`
    pub async fn delete_question(&self, id: u32) -> Result<(), ApiError> {
        let resp = self.client.delete(self.question_url(id)).send().await?;
        check_status(resp).await.map(|_| ())
    }

    /// `POST /questions`, returning the new id when the server reports it
    pub async fn create_question(&self, question: &NewQuestion) -> Result<Option<u32>, ApiError> {
        let resp = self
            .client
            .post(format!("{}/questions", self.base_url))
            .json(question)
            .send()
            .await?;
        let created: Created = read_json(resp).await?;
        Ok(created.created_id)
    }
}

/// Fail on non-2xx, pulling the server's message out of the error body
async fn check_status(resp: Response) -> Result<String, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;
    if status.is_success() {
        return Ok(body);
    }
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason()),
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let body = check_status(resp).await?;
    Ok(serde_json::from_str(&body)?)
}

fn error_message(body: &str, fallback: Option<&str>) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .or_else(|| fallback.map(str::to_string))
        .unwrap_or_else(|| "unknown error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = TriviaClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.questions_url(2), "http://localhost:5000/questions?page=2");
        assert_eq!(
            client.category_url(4, 1),
            "http://localhost:5000/questions?category=4&page=1"
        );
        assert_eq!(client.question_url(17), "http://localhost:5000/questions/17");
    }

    #[test]
    fn test_parse_full_listing() {
        let json = r#"{
            "success": true,
            "questions": [
                {"id": 2, "question": "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?",
                 "answer": "Apollo 13", "category": 5, "difficulty": 4}
            ],
            "total_questions": 19,
            "categories": {"1": "Science", "5": "Entertainment"},
            "current_category": null
        }"#;
        let list: QuestionList = serde_json::from_str(json).unwrap();
        assert_eq!(list.questions.len(), 1);
        assert_eq!(list.total(), 19);
        assert_eq!(list.categories.unwrap().get(&5).map(String::as_str), Some("Entertainment"));
        assert_eq!(list.current_category, None);
    }

    #[test]
    fn test_parse_category_listing() {
        let json = r#"{"questions": [], "total_questions": 3, "current_category": "6"}"#;
        let list: QuestionList = serde_json::from_str(json).unwrap();
        assert!(list.categories.is_none());
        assert_eq!(list.current_category, Some(6));
    }

    #[test]
    fn test_search_total_fallback() {
        let json = r#"{"success": true, "questions": [
            {"id": 1, "question": "a", "answer": "b", "category": 1, "difficulty": 1},
            {"id": 3, "question": "c", "answer": "d", "category": 2, "difficulty": 2}
        ]}"#;
        let list: QuestionList = serde_json::from_str(json).unwrap();
        assert_eq!(list.total_questions, None);
        assert_eq!(list.total(), 2);
        assert_eq!(list.current_category, None);
    }

    #[test]
    fn test_search_body() {
        let body = serde_json::to_string(&SearchBody { search_term: "title" }).unwrap();
        assert_eq!(body, r#"{"search_term":"title"}"#);
    }

    #[test]
    fn test_error_message_from_body() {
        let body = r#"{"success": false, "error": 404, "message": "not found"}"#;
        assert_eq!(error_message(body, Some("Not Found")), "not found");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message("<html>oops</html>", Some("Bad Gateway")), "Bad Gateway");
        assert_eq!(error_message("", None), "unknown error");
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 422,
            message: "un processable".to_string(),
        };
        assert_eq!(err.to_string(), "server returned 422: un processable");
    }
}
