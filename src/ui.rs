pub mod results_view;
pub mod room_view;
pub mod screen;
pub mod setup_view;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

/// Color used for a score or percentage: green from 80, yellow from 60, red below.
pub fn score_color(value: f64) -> Color {
    if value >= 80.0 {
        Color::Green
    } else if value >= 60.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Split the frame into header, body, notice line and key legend.
pub fn frame_chunks(area: Rect, header_height: u16) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area)
        .to_vec()
}

/// Render a one-line notice (redirects, capability fallbacks) if there is one.
pub fn render_notice(notice: Option<&str>, f: &mut Frame, area: Rect) {
    if let Some(text) = notice {
        let widget = Paragraph::new(Span::styled(
            text.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        f.render_widget(widget, area);
    }
}

pub fn render_legend(text: &str, f: &mut Frame, area: Rect) {
    let legend = Paragraph::new(Span::styled(text.to_string(), italic()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(legend, area);
}

pub fn titled_block(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_color() {
        assert_eq!(score_color(100.0), Color::Green);
        assert_eq!(score_color(80.0), Color::Green);
        assert_eq!(score_color(62.5), Color::Yellow);
        assert_eq!(score_color(12.5), Color::Red);
    }

    #[test]
    fn test_frame_chunks() {
        let chunks = frame_chunks(Rect::new(0, 0, 80, 24), 3);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].height, 3);
        assert_eq!(chunks[2].height, 1);
        assert_eq!(chunks[3].height, 1);
    }
}
