use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use terminal_trivia::api_worker::spawn_api_worker;
use terminal_trivia::logger;
use terminal_trivia::models::{
    ApiRequest, ApiResponse, AppState, BrowseState, Category, FormField, FormState, Question,
    QuizSession, RequestKind,
};
use terminal_trivia::session::handle_play_input;
use terminal_trivia::ui::{
    draw_browse, draw_delete_confirmation, draw_form, draw_notice, draw_play,
};
use terminal_trivia::utils::{next_char_len, prev_char_len};

struct App {
    state: AppState,
    categories: Vec<Category>,
    browse: BrowseState,
    form: FormState,
    session: QuizSession,
    /// Blocking popup text; any key dismisses it before other input is seen.
    notice: Option<String>,
    pending_delete: Option<Question>,
    should_quit: bool,
    api_tx: Sender<ApiRequest>,
}

impl App {
    fn new(api_tx: Sender<ApiRequest>) -> Self {
        Self {
            state: AppState::Browse,
            categories: Vec::new(),
            browse: BrowseState::new(),
            form: FormState::new(),
            session: QuizSession::new(Some(api_tx.clone())),
            notice: None,
            pending_delete: None,
            should_quit: false,
            api_tx,
        }
    }

    fn draw(&self, f: &mut Frame) {
        match self.state {
            AppState::Browse => draw_browse(f, &self.browse, &self.categories),
            AppState::Form => draw_form(f, &self.form, &self.categories),
            AppState::Play => draw_play(f, &self.session, &self.categories),
            AppState::DeleteConfirm => {
                draw_browse(f, &self.browse, &self.categories);
                if let Some(question) = &self.pending_delete {
                    draw_delete_confirmation(f, question);
                }
            }
        }

        if let Some(message) = &self.notice {
            draw_notice(f, message);
        }
    }

    fn handle_api_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Categories(categories) => {
                self.categories = categories;
                if self.form.category_index >= self.categories.len() {
                    self.form.category_index = 0;
                }
                if self.browse.sidebar_index > self.categories.len() {
                    self.browse.sidebar_index = 0;
                }
                if self.session.selected_category_index > self.categories.len() {
                    self.session.selected_category_index = 0;
                }
            }
            ApiResponse::QuizQuestion {
                previous_questions,
                question,
            } => {
                self.session.apply_quiz_response(previous_questions, question);
            }
            ApiResponse::Questions {
                questions,
                total_questions,
            } => {
                self.browse.questions = questions;
                self.browse.total_questions = total_questions;
                if self.browse.selected_index >= self.browse.questions.len() {
                    self.browse.selected_index = self.browse.questions.len().saturating_sub(1);
                }
            }
            ApiResponse::Created(question) => {
                logger::log(&format!("question {} created", question.id));
                self.form.reset();
                self.browse.refresh(&self.api_tx);
            }
            ApiResponse::Deleted(id) => {
                logger::log(&format!("question {} deleted", id));
                self.browse.refresh(&self.api_tx);
            }
            ApiResponse::Error { kind, message } => {
                if kind == RequestKind::QuizQuestion {
                    self.session.fetch_failed();
                }
                if kind == RequestKind::Create {
                    self.form.submit_in_progress = false;
                }
                self.notice = Some(format!("Unable to {}. Error: {}", kind.describe(), message));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // A visible notice swallows the keystroke that dismisses it.
        if self.notice.take().is_some() {
            return;
        }

        match self.state {
            AppState::Browse => self.handle_browse_input(key),
            AppState::Form => self.handle_form_input(key),
            AppState::Play => {
                handle_play_input(&mut self.session, key, &mut self.state, &self.categories);
            }
            AppState::DeleteConfirm => self.handle_delete_confirm_input(key),
        }
    }

    fn handle_browse_input(&mut self, key: KeyEvent) {
        if let Some(input) = &mut self.browse.search_input {
            match key.code {
                KeyCode::Esc => {
                    self.browse.search_input = None;
                }
                KeyCode::Enter => {
                    let term = input.trim().to_string();
                    self.browse.search_input = None;
                    if !term.is_empty() {
                        self.browse.search_term = Some(term);
                        self.browse.page = 1;
                        self.browse.refresh(&self.api_tx);
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => {
                    input.push(c);
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.browse.sidebar_focused = !self.browse.sidebar_focused;
            }
            KeyCode::Up => {
                if self.browse.sidebar_focused {
                    if self.browse.sidebar_index > 0 {
                        self.browse.sidebar_index -= 1;
                    }
                } else if self.browse.selected_index > 0 {
                    self.browse.selected_index -= 1;
                }
            }
            KeyCode::Down => {
                if self.browse.sidebar_focused {
                    // Index 0 is "All Categories".
                    if self.browse.sidebar_index < self.categories.len() {
                        self.browse.sidebar_index += 1;
                    }
                } else if self.browse.selected_index + 1 < self.browse.questions.len() {
                    self.browse.selected_index += 1;
                }
            }
            KeyCode::Enter if self.browse.sidebar_focused => {
                self.browse.category_filter = if self.browse.sidebar_index == 0 {
                    None
                } else {
                    self.categories
                        .get(self.browse.sidebar_index - 1)
                        .map(|c| c.id)
                };
                self.browse.page = 1;
                self.browse.refresh(&self.api_tx);
            }
            KeyCode::Left => {
                if self.browse.page > 1 {
                    self.browse.page -= 1;
                    self.browse.refresh(&self.api_tx);
                }
            }
            KeyCode::Right => {
                if self.browse.page < self.browse.total_pages() {
                    self.browse.page += 1;
                    self.browse.refresh(&self.api_tx);
                }
            }
            KeyCode::Char('/') => {
                self.browse.search_input = Some(String::new());
            }
            KeyCode::Esc => {
                if self.browse.search_term.take().is_some() {
                    self.browse.page = 1;
                    self.browse.refresh(&self.api_tx);
                }
            }
            KeyCode::Char('a') => {
                self.form.reset();
                self.state = AppState::Form;
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if !self.browse.sidebar_focused
                    && let Some(question) =
                        self.browse.questions.get(self.browse.selected_index).cloned()
                    {
                        self.pending_delete = Some(question);
                        self.state = AppState::DeleteConfirm;
                    }
            }
            KeyCode::Char('p') => {
                // Fresh session per entry; the category map is re-fetched the
                // way the original view reloads it on mount.
                self.session.restart();
                self.api_tx.send(ApiRequest::FetchCategories).ok();
                self.state = AppState::Play;
            }
            _ => {}
        }
    }

    fn handle_delete_confirm_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(question) = self.pending_delete.take() {
                    self.api_tx
                        .send(ApiRequest::DeleteQuestion { id: question.id })
                        .ok();
                }
                self.state = AppState::Browse;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.pending_delete = None;
                self.state = AppState::Browse;
            }
            _ => {}
        }
    }

    fn handle_form_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state = AppState::Browse;
            }
            KeyCode::Tab => {
                self.form.focused = self.form.focused.next();
                self.clamp_form_cursor();
            }
            KeyCode::BackTab => {
                self.form.focused = self.form.focused.prev();
                self.clamp_form_cursor();
            }
            KeyCode::Enter => {
                if self.form.is_submittable(&self.categories) {
                    let category = self.categories[self.form.category_index].id;
                    self.form.submit_in_progress = true;
                    self.api_tx
                        .send(ApiRequest::CreateQuestion {
                            question: self.form.question.trim().to_string(),
                            answer: self.form.answer.trim().to_string(),
                            category,
                            difficulty: self.form.difficulty,
                        })
                        .ok();
                } else if !self.form.submit_in_progress {
                    self.notice =
                        Some("Question and answer are both required.".to_string());
                }
            }
            KeyCode::Left => match self.form.focused {
                FormField::Difficulty => {
                    if self.form.difficulty > 1 {
                        self.form.difficulty -= 1;
                    }
                }
                FormField::Category => {
                    if !self.categories.is_empty() {
                        self.form.category_index = (self.form.category_index
                            + self.categories.len()
                            - 1)
                            % self.categories.len();
                    }
                }
                FormField::Question | FormField::Answer => {
                    let field = self.focused_text();
                    let cursor = self.form.cursor_position.min(field.len());
                    self.form.cursor_position = cursor - prev_char_len(field, cursor);
                }
            },
            KeyCode::Right => match self.form.focused {
                FormField::Difficulty => {
                    if self.form.difficulty < 5 {
                        self.form.difficulty += 1;
                    }
                }
                FormField::Category => {
                    if !self.categories.is_empty() {
                        self.form.category_index =
                            (self.form.category_index + 1) % self.categories.len();
                    }
                }
                FormField::Question | FormField::Answer => {
                    let field = self.focused_text();
                    let cursor = self.form.cursor_position.min(field.len());
                    self.form.cursor_position = cursor + next_char_len(field, cursor);
                }
            },
            KeyCode::Backspace => {
                if matches!(self.form.focused, FormField::Question | FormField::Answer) {
                    let cursor = self.form.cursor_position.min(self.focused_text().len());
                    let width = prev_char_len(self.focused_text(), cursor);
                    if width > 0 {
                        self.focused_text_mut().remove(cursor - width);
                        self.form.cursor_position = cursor - width;
                    }
                }
            }
            KeyCode::Char(c) => match self.form.focused {
                FormField::Difficulty => {
                    if let Some(digit) = c.to_digit(10)
                        && (1..=5).contains(&digit)
                        {
                            self.form.difficulty = digit as u8;
                        }
                }
                FormField::Category => {}
                FormField::Question | FormField::Answer => {
                    let cursor = self.form.cursor_position.min(self.focused_text().len());
                    self.focused_text_mut().insert(cursor, c);
                    self.form.cursor_position = cursor + c.len_utf8();
                }
            },
            _ => {}
        }
    }

    /// Only meaningful while `form.focused` is a text field.
    fn focused_text(&self) -> &str {
        match self.form.focused {
            FormField::Answer => &self.form.answer,
            _ => &self.form.question,
        }
    }

    fn focused_text_mut(&mut self) -> &mut String {
        match self.form.focused {
            FormField::Answer => &mut self.form.answer,
            _ => &mut self.form.question,
        }
    }

    fn clamp_form_cursor(&mut self) {
        let len = match self.form.focused {
            FormField::Question => self.form.question.len(),
            FormField::Answer => self.form.answer.len(),
            FormField::Difficulty | FormField::Category => 0,
        };
        self.form.cursor_position = len;
    }
}

fn main() -> io::Result<()> {
    logger::init();

    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    spawn_api_worker(response_tx, request_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(request_tx);
    app.api_tx.send(ApiRequest::FetchCategories).ok();
    app.browse.refresh(&app.api_tx);

    let result = run(&mut terminal, &mut app, &response_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    response_rx: &Receiver<ApiResponse>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        while let Ok(response) = response_rx.try_recv() {
            app.handle_api_response(response);
        }

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    return Ok(());
                }
                app.handle_key(key);
                if app.should_quit {
                    return Ok(());
                }
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::Receiver;
    use terminal_trivia::models::Phase;

    fn test_app() -> (App, Receiver<ApiRequest>) {
        let (tx, rx) = mpsc::channel();
        (App::new(tx), rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn question(id: u32) -> Question {
        Question {
            id,
            question: format!("Question {}?", id),
            answer: "Answer".to_string(),
            category: 1,
            difficulty: 2,
        }
    }

    #[test]
    fn test_page_turn_requests_next_page() {
        let (mut app, rx) = test_app();
        app.handle_api_response(ApiResponse::Questions {
            questions: vec![question(1)],
            total_questions: 25,
        });

        app.handle_key(key(KeyCode::Right));
        match rx.try_recv().unwrap() {
            ApiRequest::FetchQuestions { page, category } => {
                assert_eq!(page, 2);
                assert_eq!(category, None);
            }
            other => panic!("unexpected request: {:?}", other),
        }

        // Already on the last page at 25 questions / page 3.
        app.browse.page = 3;
        app.handle_key(key(KeyCode::Right));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_search_prompt_submits_term() {
        let (mut app, rx) = test_app();
        app.handle_key(key(KeyCode::Char('/')));
        for c in "title".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.browse.search_term.as_deref(), Some("title"));
        match rx.try_recv().unwrap() {
            ApiRequest::SearchQuestions { term, page, .. } => {
                assert_eq!(term, "title");
                assert_eq!(page, 1);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_escape_clears_active_search() {
        let (mut app, rx) = test_app();
        app.browse.search_term = Some("title".to_string());
        app.browse.page = 2;

        app.handle_key(key(KeyCode::Esc));
        assert!(app.browse.search_term.is_none());
        match rx.try_recv().unwrap() {
            ApiRequest::FetchQuestions { page, .. } => assert_eq!(page, 1),
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut app, rx) = test_app();
        app.handle_api_response(ApiResponse::Questions {
            questions: vec![question(7)],
            total_questions: 1,
        });

        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.state, AppState::DeleteConfirm);
        assert!(rx.try_recv().is_err());

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Browse);
        assert!(rx.try_recv().is_err());

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('y')));
        match rx.try_recv().unwrap() {
            ApiRequest::DeleteQuestion { id } => assert_eq!(id, 7),
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_deleted_response_refreshes_list() {
        let (mut app, rx) = test_app();
        app.handle_api_response(ApiResponse::Deleted(7));
        match rx.try_recv().unwrap() {
            ApiRequest::FetchQuestions { page, .. } => assert_eq!(page, 1),
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_form_submit_posts_and_resets_on_success() {
        let (mut app, rx) = test_app();
        app.handle_api_response(ApiResponse::Categories(vec![Category {
            id: 3,
            label: "Geography".to_string(),
        }]));
        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.state, AppState::Form);

        for c in "Capital of France?".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab));
        for c in "Paris".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));

        match rx.try_recv().unwrap() {
            ApiRequest::CreateQuestion {
                question,
                answer,
                category,
                difficulty,
            } => {
                assert_eq!(question, "Capital of France?");
                assert_eq!(answer, "Paris");
                assert_eq!(category, 3);
                assert_eq!(difficulty, 2);
            }
            other => panic!("unexpected request: {:?}", other),
        }
        assert!(app.form.submit_in_progress);

        app.handle_api_response(ApiResponse::Created(question(9)));
        assert!(app.form.question.is_empty());
        assert!(app.form.answer.is_empty());
        assert!(!app.form.submit_in_progress);
        // The list is refreshed so the new question shows up.
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_form_submit_without_answer_shows_notice() {
        let (mut app, rx) = test_app();
        app.handle_api_response(ApiResponse::Categories(vec![Category {
            id: 1,
            label: "Science".to_string(),
        }]));
        app.handle_key(key(KeyCode::Char('a')));
        for c in "Only a question".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert!(app.notice.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_quiz_error_shows_notice_and_clears_fetch_flag() {
        let (mut app, _rx) = test_app();
        app.state = AppState::Play;
        app.session.select_category(None);
        assert!(app.session.fetch_in_progress);

        app.handle_api_response(ApiResponse::Error {
            kind: RequestKind::QuizQuestion,
            message: "500 internal server error".to_string(),
        });

        assert!(!app.session.fetch_in_progress);
        let notice = app.notice.as_deref().unwrap();
        assert!(notice.contains("Unable to load question"));
        assert!(notice.contains("500 internal server error"));
    }

    #[test]
    fn test_category_error_keeps_pre_select_phase() {
        let (mut app, rx) = test_app();
        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.state, AppState::Play);
        // Entering play re-requests the category map.
        assert!(matches!(
            rx.try_recv().unwrap(),
            ApiRequest::FetchCategories
        ));

        app.handle_api_response(ApiResponse::Error {
            kind: RequestKind::Categories,
            message: "connection refused".to_string(),
        });

        assert!(app.notice.is_some());
        assert_eq!(app.session.phase(), Phase::PreSelect);
        // No question fetch was issued.
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_notice_swallows_dismissing_key() {
        let (mut app, rx) = test_app();
        app.notice = Some("Unable to load questions. Error: boom".to_string());

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.notice.is_none());
        assert!(!app.should_quit);
        assert!(rx.try_recv().is_err());

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_sidebar_filter_selection() {
        let (mut app, rx) = test_app();
        app.handle_api_response(ApiResponse::Categories(vec![
            Category {
                id: 1,
                label: "Science".to_string(),
            },
            Category {
                id: 2,
                label: "Art".to_string(),
            },
        ]));

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.browse.category_filter, Some(2));
        match rx.try_recv().unwrap() {
            ApiRequest::FetchQuestions { page, category } => {
                assert_eq!(page, 1);
                assert_eq!(category, Some(2));
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }
}
