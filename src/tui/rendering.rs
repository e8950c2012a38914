use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const DANGER: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// One line of the left pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    /// Category title, not selectable
    Header(String),
    /// Selectable response
    Item(String),
    /// Informational text (history, templates, empty results)
    Note(String),
}

/// Right pane contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub title: String,
    pub lines: Vec<String>,
}

impl Preview {
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self { title: title.into(), lines }
    }

    pub fn empty() -> Self {
        Self::new("Visualização", vec!["Nenhuma resposta selecionada".to_string()])
    }
}

/// Everything a frame needs, computed by the app
pub struct RenderState<'a> {
    pub list_title: String,
    pub rows: Vec<ListRow>,
    pub selected_row: Option<usize>,
    pub preview: Preview,
    pub input_label: String,
    pub input: &'a str,
    pub help: String,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_list(frame, layout.list_area, &state.list_title, &state.rows, state.selected_row);
    render_preview(frame, layout.preview_area, &state.preview);
    render_input(frame, layout.input_area, &state.input_label, state.input);
    render_status_bar(frame, layout.status_area, &state.help, state.status_message);
}

fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(format!(" {} ", title))
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[ListRow],
    selected_row: Option<usize>,
) {
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| match row {
            ListRow::Header(text) => ListItem::new(format!("🎯 {}", text))
                .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            ListRow::Item(text) => {
                ListItem::new(format!("   {}", text)).style(Style::default().fg(MUTED))
            }
            ListRow::Note(text) => ListItem::new(text.as_str()).style(Style::default().fg(BRIGHT)),
        })
        .collect();

    let list = List::new(items).block(pane_block(title)).highlight_style(
        Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD),
    );

    let mut list_state = ListState::default();
    list_state.select(selected_row);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_preview(frame: &mut Frame, area: Rect, preview: &Preview) {
    let lines: Vec<Line> = preview.lines.iter().map(|l| Line::from(l.as_str())).collect();

    let paragraph = Paragraph::new(Text::from(lines))
        .block(pane_block(&preview.title))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, area: Rect, label: &str, input: &str) {
    let line = Line::from(vec![
        Span::styled("› ", Style::default().fg(ACCENT)),
        Span::raw(input),
        Span::styled("█", Style::default().fg(MUTED)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .title(format!(" {} ", label)),
    );

    frame.render_widget(paragraph, area);
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    help: &str,
    status_message: Option<&StatusMessage>,
) {
    let (text, style) = match status_message {
        Some(msg) => {
            let fg = match msg.message_type {
                MessageType::Success => ACCENT,
                MessageType::Error => DANGER,
            };
            (format!(" {} ", msg.text), Style::default().fg(fg).bg(BAR_BG))
        }
        None => (format!(" {} ", help), Style::default().fg(BRIGHT).bg(BAR_BG)),
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
