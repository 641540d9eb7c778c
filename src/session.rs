use crate::evaluator::evaluate;
use crate::logger;
use crate::models::{
    ApiRequest, AppState, Category, Phase, Question, QuizSession, QUESTIONS_PER_PLAY,
};
use crate::utils::{next_char_len, prev_char_len};
use crossterm::event::{KeyCode, KeyEvent};

impl QuizSession {
    /// Records the category choice (None is "all categories") and pulls
    /// the first question. The choice is immutable for the rest of the
    /// session; only `restart` clears it.
    pub fn select_category(&mut self, category: Option<Category>) {
        if self.category_chosen {
            return;
        }

        self.quiz_category = category;
        self.category_chosen = true;
        self.request_next_question();
    }

    /// Asks the server for one unseen question. The id of the question
    /// currently on screen is appended to the submitted history, and the
    /// session adopts that history when the response lands, so history
    /// only ever advances together with a successful fetch.
    pub fn request_next_question(&mut self) {
        if self.fetch_in_progress || self.force_end {
            return;
        }
        if self.previous_question_ids.len() >= QUESTIONS_PER_PLAY {
            return;
        }

        let mut previous = self.previous_question_ids.clone();
        if let Some(current) = &self.current_question {
            previous.push(current.id);
        }

        if let Some(ref api_tx) = self.api_tx {
            logger::log(&format!(
                "requesting quiz question, history {:?}, category {:?}",
                previous,
                self.quiz_category.as_ref().map(|c| c.id)
            ));
            let request = ApiRequest::FetchQuizQuestion {
                previous_questions: previous,
                quiz_category: self.quiz_category.as_ref().map(|c| c.id),
            };
            api_tx.send(request).ok();
            self.fetch_in_progress = true;
        }
    }

    /// Applies a successful `/quizzes` response. A missing question means
    /// the server has no unseen question left for this category, which
    /// ends the session without being an error.
    pub fn apply_quiz_response(&mut self, previous_questions: Vec<u32>, question: Option<Question>) {
        self.fetch_in_progress = false;
        self.previous_question_ids = previous_questions;
        self.showing_answer = false;
        self.guess.clear();
        self.cursor_position = 0;

        match question {
            Some(question) => {
                debug_assert!(!self.previous_question_ids.contains(&question.id));
                self.current_question = Some(question);
            }
            None => {
                logger::log("question source exhausted, ending session");
                self.current_question = None;
                self.force_end = true;
            }
        }
    }

    /// Marks a failed fetch. Everything else is left at its pre-request
    /// value; the caller surfaces the error text.
    pub fn fetch_failed(&mut self) {
        self.fetch_in_progress = false;
    }

    /// Scores the current guess and reveals the answer. Does not fetch.
    pub fn submit_guess(&mut self) {
        if self.showing_answer {
            return;
        }
        let Some(question) = &self.current_question else {
            return;
        };

        if evaluate(&self.guess, &question.answer) {
            self.num_correct += 1;
        }
        self.showing_answer = true;
    }

    /// Resets every field to its initial value, returning to category
    /// selection.
    pub fn restart(&mut self) {
        self.quiz_category = None;
        self.category_chosen = false;
        self.previous_question_ids.clear();
        self.current_question = None;
        self.guess.clear();
        self.cursor_position = 0;
        self.num_correct = 0;
        self.showing_answer = false;
        self.force_end = false;
        self.fetch_in_progress = false;
        self.selected_category_index = 0;
    }
}

pub fn handle_play_input(
    session: &mut QuizSession,
    key: KeyEvent,
    app_state: &mut AppState,
    categories: &[Category],
) {
    match session.phase() {
        Phase::PreSelect => match key.code {
            KeyCode::Esc => {
                *app_state = AppState::Browse;
            }
            KeyCode::Up => {
                if session.selected_category_index > 0 {
                    session.selected_category_index -= 1;
                }
            }
            KeyCode::Down => {
                // Index 0 is "ALL"; categories follow.
                if session.selected_category_index < categories.len() {
                    session.selected_category_index += 1;
                }
            }
            KeyCode::Enter => {
                let choice = if session.selected_category_index == 0 {
                    None
                } else {
                    categories.get(session.selected_category_index - 1).cloned()
                };
                session.select_category(choice);
            }
            _ => {}
        },
        Phase::Playing => match key.code {
            KeyCode::Esc => {
                session.restart();
                *app_state = AppState::Browse;
            }
            KeyCode::Enter => {
                if session.current_question.is_none() && !session.fetch_in_progress {
                    // A failed fetch left this round without a question;
                    // Enter asks for it again.
                    session.request_next_question();
                } else {
                    session.submit_guess();
                }
            }
            KeyCode::Left => {
                session.cursor_position = session.cursor_position.min(session.guess.len());
                session.cursor_position -=
                    prev_char_len(&session.guess, session.cursor_position);
            }
            KeyCode::Right => {
                session.cursor_position = session.cursor_position.min(session.guess.len());
                session.cursor_position +=
                    next_char_len(&session.guess, session.cursor_position);
            }
            KeyCode::Backspace => {
                session.cursor_position = session.cursor_position.min(session.guess.len());
                let width = prev_char_len(&session.guess, session.cursor_position);
                if width > 0 {
                    session.cursor_position -= width;
                    session.guess.remove(session.cursor_position);
                }
            }
            KeyCode::Char(c) => {
                session.cursor_position = session.cursor_position.min(session.guess.len());
                session.guess.insert(session.cursor_position, c);
                session.cursor_position += c.len_utf8();
            }
            _ => {}
        },
        Phase::AnswerShown => match key.code {
            KeyCode::Esc => {
                session.restart();
                *app_state = AppState::Browse;
            }
            KeyCode::Enter => {
                session.request_next_question();
            }
            _ => {}
        },
        Phase::Finished => match key.code {
            KeyCode::Esc => {
                session.restart();
                *app_state = AppState::Browse;
            }
            KeyCode::Enter | KeyCode::Char('r') => {
                session.restart();
            }
            _ => {}
        },
    }
}
