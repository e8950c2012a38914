use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Split-pane layout configuration
pub struct AppLayout {
    pub list_area: Rect,
    pub preview_area: Rect,
    pub input_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create split-pane layout:
    /// - Response list: 60% width (left)
    /// - Preview pane: 40% width (right)
    /// - Input box: 3 rows under both panes
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Main area (at least 3 rows)
                Constraint::Length(3), // Bordered input line
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[0]);

        Self {
            list_area: horizontal_chunks[0],
            preview_area: horizontal_chunks[1],
            input_area: vertical_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}
