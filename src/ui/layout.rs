use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct ViewLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub help_area: Rect,
}

pub struct BrowseLayout {
    pub header_area: Rect,
    pub sidebar_area: Rect,
    pub list_area: Rect,
    pub footer_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_view_chunks(area: Rect) -> ViewLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    ViewLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        help_area: chunks[2],
    }
}

pub fn calculate_browse_chunks(area: Rect) -> BrowseLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(chunks[1]);

    BrowseLayout {
        header_area: chunks[0],
        sidebar_area: body[0],
        list_area: body[1],
        footer_area: chunks[2],
        help_area: chunks[3],
    }
}

/// Centered sub-rectangle used for popups.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_view_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.body_area.height > 0);
    }

    #[test]
    fn test_browse_layout_splits_sidebar_and_list() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_browse_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.footer_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.sidebar_area.width < layout.list_area.width);
        assert_eq!(layout.sidebar_area.y, layout.list_area.y);
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 30, area);

        assert!(popup.x > area.x);
        assert!(popup.y > area.y);
        assert!(popup.right() < area.right());
        assert!(popup.bottom() < area.bottom());
    }
}
