use crate::models::Question;
use crate::ui::layout::centered_rect;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Blocking notice popup: shown for API failures, dismissed by any key.
/// The message carries the raw server error text.
pub fn draw_notice(f: &mut Frame, message: &str) {
    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);

    let mut text = Text::default();
    text.push_line(Line::from(message));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "Press any key to continue",
        Style::default().fg(Color::DarkGray),
    )));

    let notice = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Notice")
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(notice, area);
}

pub fn draw_delete_confirmation(f: &mut Frame, question: &Question) {
    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);

    let mut text = Text::default();
    text.push_line(Line::from("Are you sure you want to delete the question?"));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        truncate_string(&question.question, 60),
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Delete  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" Keep"),
    ]));

    let confirm = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Delete Question")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(confirm, area);
}
