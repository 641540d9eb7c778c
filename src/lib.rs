pub mod api;
pub mod api_worker;
pub mod evaluator;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use api::{TriviaClient, DEFAULT_BASE_URL};
pub use api_worker::spawn_api_worker;
pub use evaluator::evaluate;
pub use models::{
    category_label, ApiRequest, ApiResponse, AppState, BrowseState, Category, FormField, FormState,
    Phase, Question, QuizSession, RequestKind, QUESTIONS_PER_PAGE, QUESTIONS_PER_PLAY,
};
pub use session::handle_play_input;
pub use ui::{draw_browse, draw_delete_confirmation, draw_form, draw_notice, draw_play};
pub use utils::truncate_string;
