use serde::{Deserialize, Serialize};
use std::sync::mpsc;

/// Questions per quiz session. A client constant, not server-driven.
pub const QUESTIONS_PER_PLAY: usize = 5;

/// Page size used by the server when listing questions.
pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub question: String,
    pub answer: String,
    pub category: u32,
    pub difficulty: u8,
}

/// The wire field is `type`, which is a Rust keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    #[serde(rename = "type")]
    pub label: String,
}

/// Looks up a category label by id, falling back to the raw id.
pub fn category_label(categories: &[Category], id: u32) -> String {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.label.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

/// Quiz phases. Never stored: derived on demand by [`QuizSession::phase`]
/// so the termination check can't go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PreSelect,
    Playing,
    AnswerShown,
    Finished,
}

/// State for one play-through, from category selection to final score.
#[derive(Debug)]
pub struct QuizSession {
    pub quiz_category: Option<Category>,
    pub category_chosen: bool,
    /// Insertion order is play order. Never longer than QUESTIONS_PER_PLAY.
    pub previous_question_ids: Vec<u32>,
    pub current_question: Option<Question>,
    pub guess: String,
    pub cursor_position: usize,
    pub num_correct: u32,
    pub showing_answer: bool,
    pub force_end: bool,
    pub fetch_in_progress: bool,
    pub selected_category_index: usize,
    pub api_tx: Option<mpsc::Sender<ApiRequest>>,
}

impl QuizSession {
    pub fn new(api_tx: Option<mpsc::Sender<ApiRequest>>) -> Self {
        Self {
            quiz_category: None,
            category_chosen: false,
            previous_question_ids: Vec::new(),
            current_question: None,
            guess: String::new(),
            cursor_position: 0,
            num_correct: 0,
            showing_answer: false,
            force_end: false,
            fetch_in_progress: false,
            selected_category_index: 0,
            api_tx,
        }
    }

    /// Derives the current phase from the session fields. The round-limit
    /// and exhaustion checks are recomputed on every call rather than
    /// cached in a flag.
    pub fn phase(&self) -> Phase {
        if !self.category_chosen {
            Phase::PreSelect
        } else if self.previous_question_ids.len() == QUESTIONS_PER_PLAY || self.force_end {
            Phase::Finished
        } else if self.showing_answer {
            Phase::AnswerShown
        } else {
            Phase::Playing
        }
    }

    /// Rounds completed so far, for the final score view.
    pub fn rounds_played(&self) -> usize {
        self.previous_question_ids.len()
            + usize::from(self.showing_answer && self.current_question.is_some())
    }
}

/// Top-level view selection.
#[derive(Debug, PartialEq)]
pub enum AppState {
    Browse,
    Form,
    Play,
    DeleteConfirm,
}

/// State for the question list view: one server page plus the filters
/// that produced it.
#[derive(Debug)]
pub struct BrowseState {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    /// 1-indexed, matching the server.
    pub page: usize,
    pub search_term: Option<String>,
    pub category_filter: Option<u32>,
    pub selected_index: usize,
    /// Sidebar selection: 0 is "All Categories", then one entry per category.
    pub sidebar_index: usize,
    pub sidebar_focused: bool,
    /// Some while the search prompt is open.
    pub search_input: Option<String>,
}

impl BrowseState {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            total_questions: 0,
            page: 1,
            search_term: None,
            category_filter: None,
            selected_index: 0,
            sidebar_index: 0,
            sidebar_focused: false,
            search_input: None,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_questions.div_ceil(QUESTIONS_PER_PAGE).max(1)
    }

    /// Re-issues the request that produced the current page, preserving
    /// the active search term and category filter. Used after deletes and
    /// creates so the list reflects the server again.
    pub fn refresh(&self, api_tx: &mpsc::Sender<ApiRequest>) {
        let request = match &self.search_term {
            Some(term) => ApiRequest::SearchQuestions {
                term: term.clone(),
                page: self.page,
                category: self.category_filter,
            },
            None => ApiRequest::FetchQuestions {
                page: self.page,
                category: self.category_filter,
            },
        };
        api_tx.send(request).ok();
    }
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Question,
    Answer,
    Difficulty,
    Category,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Question => FormField::Answer,
            FormField::Answer => FormField::Difficulty,
            FormField::Difficulty => FormField::Category,
            FormField::Category => FormField::Question,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Question => FormField::Category,
            FormField::Answer => FormField::Question,
            FormField::Difficulty => FormField::Answer,
            FormField::Category => FormField::Difficulty,
        }
    }
}

/// State for the add-question form. Submitting posts to the server and,
/// on success, the fields are reset here rather than by the view.
#[derive(Debug)]
pub struct FormState {
    pub question: String,
    pub answer: String,
    pub difficulty: u8,
    pub category_index: usize,
    pub focused: FormField,
    pub cursor_position: usize,
    pub submit_in_progress: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            question: String::new(),
            answer: String::new(),
            difficulty: 1,
            category_index: 0,
            focused: FormField::Question,
            cursor_position: 0,
            submit_in_progress: false,
        }
    }

    pub fn reset(&mut self) {
        *self = FormState::new();
    }

    /// The form can be posted once both text fields have content and the
    /// category list has loaded.
    pub fn is_submittable(&self, categories: &[Category]) -> bool {
        !self.question.trim().is_empty()
            && !self.answer.trim().is_empty()
            && self.category_index < categories.len()
            && (1..=5).contains(&self.difficulty)
            && !self.submit_in_progress
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// What a failed request was trying to do, for the notice text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Categories,
    QuizQuestion,
    Questions,
    Create,
    Delete,
}

impl RequestKind {
    pub fn describe(self) -> &'static str {
        match self {
            RequestKind::Categories => "load categories",
            RequestKind::QuizQuestion => "load question",
            RequestKind::Questions => "load questions",
            RequestKind::Create => "add question",
            RequestKind::Delete => "delete question",
        }
    }
}

/// Requests handled by the network worker thread.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    FetchCategories,
    FetchQuizQuestion {
        previous_questions: Vec<u32>,
        quiz_category: Option<u32>,
    },
    FetchQuestions {
        page: usize,
        category: Option<u32>,
    },
    SearchQuestions {
        term: String,
        page: usize,
        category: Option<u32>,
    },
    CreateQuestion {
        question: String,
        answer: String,
        category: u32,
        difficulty: u8,
    },
    DeleteQuestion {
        id: u32,
    },
}

/// Replies from the network worker. `QuizQuestion` echoes back the
/// history submitted with the request so the session adopts exactly what
/// the server saw.
#[derive(Debug)]
pub enum ApiResponse {
    Categories(Vec<Category>),
    QuizQuestion {
        previous_questions: Vec<u32>,
        question: Option<Question>,
    },
    Questions {
        questions: Vec<Question>,
        total_questions: usize,
    },
    Created(Question),
    Deleted(u32),
    Error {
        kind: RequestKind,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: u32, label: &str) -> Category {
        Category {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_category_label_lookup() {
        let categories = vec![category(1, "Science"), category(2, "Art")];
        assert_eq!(category_label(&categories, 2), "Art");
        assert_eq!(category_label(&categories, 9), "#9");
    }

    #[test]
    fn test_new_session_starts_in_pre_select() {
        let session = QuizSession::new(None);
        assert_eq!(session.phase(), Phase::PreSelect);
        assert!(session.previous_question_ids.is_empty());
        assert_eq!(session.num_correct, 0);
    }

    #[test]
    fn test_phase_finished_at_round_limit() {
        let mut session = QuizSession::new(None);
        session.category_chosen = true;
        session.previous_question_ids = vec![1, 2, 3, 4, 5];
        assert_eq!(session.phase(), Phase::Finished);
    }

    #[test]
    fn test_phase_finished_on_force_end() {
        let mut session = QuizSession::new(None);
        session.category_chosen = true;
        session.previous_question_ids = vec![1, 2];
        session.force_end = true;
        assert_eq!(session.phase(), Phase::Finished);
    }

    #[test]
    fn test_phase_answer_shown() {
        let mut session = QuizSession::new(None);
        session.category_chosen = true;
        session.showing_answer = true;
        assert_eq!(session.phase(), Phase::AnswerShown);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let mut browse = BrowseState::new();
        browse.total_questions = 21;
        assert_eq!(browse.total_pages(), 3);
        browse.total_questions = 20;
        assert_eq!(browse.total_pages(), 2);
        browse.total_questions = 0;
        assert_eq!(browse.total_pages(), 1);
    }

    #[test]
    fn test_browse_refresh_preserves_search_term() {
        let (tx, rx) = mpsc::channel();
        let mut browse = BrowseState::new();
        browse.search_term = Some("title".to_string());
        browse.page = 2;
        browse.refresh(&tx);

        match rx.try_recv().unwrap() {
            ApiRequest::SearchQuestions {
                term,
                page,
                category,
            } => {
                assert_eq!(term, "title");
                assert_eq!(page, 2);
                assert_eq!(category, None);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_browse_refresh_without_search_fetches_page() {
        let (tx, rx) = mpsc::channel();
        let mut browse = BrowseState::new();
        browse.category_filter = Some(3);
        browse.refresh(&tx);

        match rx.try_recv().unwrap() {
            ApiRequest::FetchQuestions { page, category } => {
                assert_eq!(page, 1);
                assert_eq!(category, Some(3));
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_form_submittable_requires_text_and_categories() {
        let categories = vec![category(1, "Science")];
        let mut form = FormState::new();
        assert!(!form.is_submittable(&categories));

        form.question = "What boils at 100C?".to_string();
        form.answer = "Water".to_string();
        assert!(form.is_submittable(&categories));

        assert!(!form.is_submittable(&[]));

        form.submit_in_progress = true;
        assert!(!form.is_submittable(&categories));
    }

    #[test]
    fn test_form_field_cycle() {
        let mut field = FormField::Question;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, FormField::Question);
        assert_eq!(FormField::Question.prev(), FormField::Category);
    }
}
