use crate::api::TriviaClient;
use crate::logger;
use crate::models::{ApiRequest, ApiResponse, RequestKind};
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

/// Runs all network I/O on a dedicated thread so the UI loop never
/// blocks on the server. Requests arrive over `request_rx`; every request
/// produces exactly one `ApiResponse` on `response_tx`.
pub fn spawn_api_worker(
    response_tx: Sender<ApiResponse>,
    request_rx: Receiver<ApiRequest>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("terminal-trivia::api_worker".to_string())
        .spawn(move || {
            let client = TriviaClient::from_env();
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("failed to start api runtime: {}", e));
                    return;
                }
            };

            while let Ok(request) = request_rx.recv() {
                let response = rt.block_on(handle_request(&client, request));
                if response_tx.send(response).is_err() {
                    break;
                }
            }
            logger::log("api worker channel disconnected, exiting");
        })
        .expect("failed to spawn api worker thread")
}

async fn handle_request(client: &TriviaClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::FetchCategories => match client.categories().await {
            Ok(categories) => ApiResponse::Categories(categories),
            Err(e) => error_response(RequestKind::Categories, e),
        },
        ApiRequest::FetchQuizQuestion {
            previous_questions,
            quiz_category,
        } => match client
            .next_quiz_question(&previous_questions, quiz_category)
            .await
        {
            Ok(question) => ApiResponse::QuizQuestion {
                previous_questions,
                question,
            },
            Err(e) => error_response(RequestKind::QuizQuestion, e),
        },
        ApiRequest::FetchQuestions { page, category } => {
            match client.questions(page, category).await {
                Ok((questions, total_questions)) => ApiResponse::Questions {
                    questions,
                    total_questions,
                },
                Err(e) => error_response(RequestKind::Questions, e),
            }
        }
        ApiRequest::SearchQuestions {
            term,
            page,
            category,
        } => match client.search_questions(&term, page, category).await {
            Ok((questions, total_questions)) => ApiResponse::Questions {
                questions,
                total_questions,
            },
            Err(e) => error_response(RequestKind::Questions, e),
        },
        ApiRequest::CreateQuestion {
            question,
            answer,
            category,
            difficulty,
        } => match client
            .create_question(&question, &answer, category, difficulty)
            .await
        {
            Ok(created) => ApiResponse::Created(created),
            Err(e) => error_response(RequestKind::Create, e),
        },
        ApiRequest::DeleteQuestion { id } => match client.delete_question(id).await {
            Ok(deleted) => ApiResponse::Deleted(deleted.id),
            Err(e) => error_response(RequestKind::Delete, e),
        },
    }
}

fn error_response(kind: RequestKind, error: Box<dyn std::error::Error + Send + Sync>) -> ApiResponse {
    let message = error.to_string();
    logger::log(&format!("{} failed: {}", kind.describe(), message));
    ApiResponse::Error { kind, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_worker_exits_when_request_channel_drops() {
        let (response_tx, _response_rx) = mpsc::channel();
        let (request_tx, request_rx) = mpsc::channel::<ApiRequest>();

        let handle = spawn_api_worker(response_tx, request_rx);
        drop(request_tx);

        handle.join().unwrap();
    }
}
