use crate::evaluator::evaluate;
use crate::models::{category_label, Category, Phase, QuizSession, QUESTIONS_PER_PLAY};
use crate::ui::layout::calculate_view_chunks;
use crate::utils::cursor_display_width;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Picks the play sub-view from the session phase, which is re-derived
/// here on every frame rather than carried over from the last transition.
pub fn draw_play(f: &mut Frame, session: &QuizSession, categories: &[Category]) {
    match session.phase() {
        Phase::PreSelect => draw_category_chooser(f, session, categories),
        Phase::Playing => draw_guess_input(f, session, categories),
        Phase::AnswerShown => draw_answer_reveal(f, session),
        Phase::Finished => draw_final_score(f, session),
    }
}

fn draw_category_chooser(f: &mut Frame, session: &QuizSession, categories: &[Category]) {
    let layout = calculate_view_chunks(f.area());

    let title = Paragraph::new("Choose Category")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let items: Vec<ListItem> = if categories.is_empty() {
        vec![ListItem::new("Loading categories...").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        std::iter::once("ALL".to_string())
            .chain(categories.iter().map(|c| c.label.clone()))
            .enumerate()
            .map(|(i, label)| {
                let style = if i == session.selected_category_index {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(label).style(style)
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Categories"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_widget(list, layout.body_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Navigate  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Start Quiz  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Back"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn round_header(session: &QuizSession) -> String {
    let category = match &session.quiz_category {
        Some(c) => c.label.clone(),
        None => "All Categories".to_string(),
    };
    format!(
        "Question {} / {} - {} - Score {}",
        session.previous_question_ids.len() + 1,
        QUESTIONS_PER_PLAY,
        category,
        session.num_correct
    )
}

fn draw_guess_input(f: &mut Frame, session: &QuizSession, categories: &[Category]) {
    let layout = calculate_view_chunks(f.area());

    let header = Paragraph::new(round_header(session))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(layout.body_area);

    let question_text = match &session.current_question {
        Some(question) => {
            let mut text = Text::from(question.question.as_str());
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                format!(
                    "{} - difficulty {}",
                    category_label(categories, question.category),
                    question.difficulty
                ),
                Style::default().fg(Color::DarkGray),
            )));
            text
        }
        None => Text::from(Span::styled(
            "Loading question...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    };
    let question = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, body[0]);

    let guess_content = if session.guess.is_empty() {
        Text::from(Span::styled(
            "[Type your answer here...]",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(session.guess.as_str())
    };
    let guess = Paragraph::new(guess_content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Your Answer (Enter to submit)"),
    );
    f.render_widget(guess, body[1]);

    if session.current_question.is_some() {
        let cursor_x = body[1].x + 1 + cursor_display_width(&session.guess, session.cursor_position);
        let cursor_y = body[1].y + 1;
        f.set_cursor_position((cursor_x, cursor_y));
    }

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Submit Answer  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit Quiz"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn draw_answer_reveal(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_view_chunks(f.area());

    let header = Paragraph::new(round_header(session))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let mut text = Text::default();
    if let Some(question) = &session.current_question {
        text.push_line(Line::from(question.question.as_str()));
        text.push_line(Line::from(""));

        // Same evaluation as the one that scored the submission.
        let correct = evaluate(&session.guess, &question.answer);
        let verdict = if correct {
            Span::styled(
                "You were correct!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "You were incorrect",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        };
        text.push_line(Line::from(verdict));
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(
            "Answer:",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(question.answer.as_str()));
        if !session.guess.is_empty() {
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                "Your Answer:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(session.guess.as_str()));
        }
    }

    let reveal = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Answer"));
    f.render_widget(reveal, layout.body_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Next Question  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit Quiz"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn draw_final_score(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_view_chunks(f.area());

    let title = Paragraph::new("Quiz Complete")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut text = Text::default();
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        format!("Your Final Score is {}", session.num_correct),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "{} of {} rounds played",
        session.rounds_played(),
        QUESTIONS_PER_PLAY
    )));
    if session.force_end {
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(
            "No more unseen questions in this category.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let score = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(score, layout.body_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Play Again  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Back to Questions"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
