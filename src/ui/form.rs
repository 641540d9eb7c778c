use crate::models::{Category, FormField, FormState};
use crate::ui::layout::calculate_view_chunks;
use crate::utils::cursor_display_width;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_form(f: &mut Frame, form: &FormState, categories: &[Category]) {
    let layout = calculate_view_chunks(f.area());

    let title = Paragraph::new("Add a New Trivia Question")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(layout.body_area);

    draw_text_field(
        f,
        fields[0],
        "Question",
        &form.question,
        form.focused == FormField::Question,
        form,
    );
    draw_text_field(
        f,
        fields[1],
        "Answer",
        &form.answer,
        form.focused == FormField::Answer,
        form,
    );

    let difficulty_content = Text::from(format!("◄ {} ►", form.difficulty));
    let difficulty = Paragraph::new(difficulty_content).block(field_block(
        "Difficulty (1-5)",
        form.focused == FormField::Difficulty,
    ));
    f.render_widget(difficulty, fields[2]);

    let category_text = if categories.is_empty() {
        Text::from(Span::styled(
            "Loading categories...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        let label = categories
            .get(form.category_index)
            .map(|c| c.label.clone())
            .unwrap_or_default();
        Text::from(format!("◄ {} ►", label))
    };
    let category = Paragraph::new(category_text).block(field_block(
        "Category",
        form.focused == FormField::Category,
    ));
    f.render_widget(category, fields[3]);

    if form.submit_in_progress {
        let pending = Paragraph::new(Span::styled(
            "Submitting...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        f.render_widget(pending, fields[4]);
    }

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Next Field  "),
        Span::styled(
            "←/→",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Adjust  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Submit  "),
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

fn field_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
}

fn draw_text_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    focused: bool,
    form: &FormState,
) {
    let content = if value.is_empty() && !focused {
        Text::from(Span::styled("...", Style::default().fg(Color::DarkGray)))
    } else {
        Text::from(value)
    };
    let field = Paragraph::new(content).block(field_block(title, focused));
    f.render_widget(field, area);

    if focused {
        let cursor_x = area.x + 1 + cursor_display_width(value, form.cursor_position);
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}
