use crate::models::{category_label, BrowseState, Category};
use crate::ui::layout::calculate_browse_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw_browse(f: &mut Frame, browse: &BrowseState, categories: &[Category]) {
    let layout = calculate_browse_chunks(f.area());

    let title = Paragraph::new("Terminal Trivia v0.1.0")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    draw_sidebar(f, browse, categories, layout.sidebar_area);
    draw_question_list(f, browse, categories, layout.list_area);
    draw_footer(f, browse, layout.footer_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Focus  "),
        Span::styled(
            "←/→",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Page  "),
        Span::styled(
            "/",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Search  "),
        Span::styled(
            "a",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Add  "),
        Span::styled(
            "d",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Delete  "),
        Span::styled(
            "p",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Play  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn draw_sidebar(
    f: &mut Frame,
    browse: &BrowseState,
    categories: &[Category],
    area: ratatui::layout::Rect,
) {
    let items: Vec<ListItem> = if categories.is_empty() {
        vec![ListItem::new("Loading...").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        std::iter::once(("All Categories".to_string(), None))
            .chain(categories.iter().map(|c| (c.label.clone(), Some(c.id))))
            .enumerate()
            .map(|(i, (label, id))| {
                let mut style = if i == browse.sidebar_index && browse.sidebar_focused {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                if id == browse.category_filter && id.is_some() {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                ListItem::new(label).style(style)
            })
            .collect()
    };

    let sidebar = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Categories")
            .border_style(if browse.sidebar_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            }),
    );
    f.render_widget(sidebar, area);
}

fn draw_question_list(
    f: &mut Frame,
    browse: &BrowseState,
    categories: &[Category],
    area: ratatui::layout::Rect,
) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = if browse.questions.is_empty() {
        vec![ListItem::new("No questions found.").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        browse
            .questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let label = format!(
                    "{}  [{} / difficulty {}]",
                    truncate_string(&question.question, width.saturating_sub(25).max(20)),
                    category_label(categories, question.category),
                    question.difficulty
                );
                let style = if i == browse.selected_index && !browse.sidebar_focused {
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

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Questions")
            .border_style(if browse.sidebar_focused {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Cyan)
            }),
    );
    f.render_widget(list, area);
}

fn draw_footer(f: &mut Frame, browse: &BrowseState, area: ratatui::layout::Rect) {
    let content = if let Some(input) = &browse.search_input {
        Line::from(vec![
            Span::styled(
                "Search: ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(input.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else {
        let mut spans = vec![Span::from(format!(
            "Page {} / {}  ({} questions)",
            browse.page,
            browse.total_pages(),
            browse.total_questions
        ))];
        if let Some(term) = &browse.search_term {
            spans.push(Span::styled(
                format!("  search: \"{}\" (Esc clears)", term),
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    };

    let footer = Paragraph::new(vec![content])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
