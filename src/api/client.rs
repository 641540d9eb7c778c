use crate::models::{Category, Question};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

type ApiResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Client for the trivia question bank. All persistent state lives behind
/// this API; the client holds nothing but the connection pool and base URL.
#[derive(Debug, Clone)]
pub struct TriviaClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct QuizRequest<'a> {
    previous_questions: &'a [u32],
    /// Serialized as null for "all categories".
    quiz_category: Option<u32>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    search_term: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    question: &'a str,
    answer: &'a str,
    category: u32,
    difficulty: u8,
}

#[derive(Debug, Deserialize)]
struct CategoriesPayload {
    categories: Vec<Category>,
}

/// An absent question signals exhaustion for the requested category.
#[derive(Debug, Deserialize)]
struct QuizPayload {
    question: Option<Question>,
}

#[derive(Debug, Deserialize)]
struct QuestionsPayload {
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Debug, Deserialize)]
struct QuestionPayload {
    question: Question,
}

impl TriviaClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Reads the base URL from TRIVIA_API_URL, defaulting to the local
    /// development server.
    pub fn from_env() -> Self {
        let base_url = std::env::var("TRIVIA_API_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        let response = self
            .http
            .get(format!("{}/categories", self.base_url))
            .send()
            .await?;
        let payload: CategoriesPayload = Self::check(response).await?.json().await?;
        Ok(payload.categories)
    }

    /// Asks the server for one question outside the submitted history.
    /// `None` for the category plays across all categories. A `None`
    /// question in the reply means the category is exhausted.
    pub async fn next_quiz_question(
        &self,
        previous_questions: &[u32],
        quiz_category: Option<u32>,
    ) -> ApiResult<Option<Question>> {
        let response = self
            .http
            .post(format!("{}/quizzes", self.base_url))
            .json(&QuizRequest {
                previous_questions,
                quiz_category,
            })
            .send()
            .await?;
        let payload: QuizPayload = Self::check(response).await?.json().await?;
        Ok(payload.question)
    }

    /// One page of questions, optionally scoped to a category. The server
    /// answers 404 for an empty page, which is an empty list here, not an
    /// error.
    pub async fn questions(
        &self,
        page: usize,
        category: Option<u32>,
    ) -> ApiResult<(Vec<Question>, usize)> {
        let url = match category {
            Some(id) => format!("{}/categories/{}/questions?page={}", self.base_url, id, page),
            None => format!("{}/questions?page={}", self.base_url, page),
        };
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok((Vec::new(), 0));
        }
        let payload: QuestionsPayload = Self::check(response).await?.json().await?;
        Ok((payload.questions, payload.total_questions))
    }

    /// Free-text search over question text, paginated like `questions`.
    pub async fn search_questions(
        &self,
        term: &str,
        page: usize,
        category: Option<u32>,
    ) -> ApiResult<(Vec<Question>, usize)> {
        let url = match category {
            Some(id) => format!("{}/categories/{}/questions?page={}", self.base_url, id, page),
            None => format!("{}/questions?page={}", self.base_url, page),
        };
        let response = self
            .http
            .post(url)
            .json(&SearchRequest { search_term: term })
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok((Vec::new(), 0));
        }
        let payload: QuestionsPayload = Self::check(response).await?.json().await?;
        Ok((payload.questions, payload.total_questions))
    }

    pub async fn create_question(
        &self,
        question: &str,
        answer: &str,
        category: u32,
        difficulty: u8,
    ) -> ApiResult<Question> {
        let response = self
            .http
            .post(format!("{}/questions", self.base_url))
            .json(&CreateRequest {
                question,
                answer,
                category,
                difficulty,
            })
            .send()
            .await?;
        let payload: QuestionPayload = Self::check(response).await?.json().await?;
        Ok(payload.question)
    }

    /// Deletes a question, returning the server's copy of what was removed.
    pub async fn delete_question(&self, id: u32) -> ApiResult<Question> {
        let response = self
            .http
            .delete(format!("{}/questions/{}", self.base_url, id))
            .send()
            .await?;
        let payload: QuestionPayload = Self::check(response).await?.json().await?;
        Ok(payload.question)
    }

    /// Turns a non-2xx reply into an error carrying the raw server text,
    /// which the UI surfaces verbatim.
    async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(format!("server returned {}: {}", status, body).into())
    }
}
