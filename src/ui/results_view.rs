use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use rehearse::{
    scoring::{Score, FEEDBACK},
    util::{format_duration, mean, word_count},
    SessionResult,
};

use crate::{
    ui::{bold, dim, frame_chunks, render_legend, render_notice, score_color, titled_block},
    App,
};

const LEGEND: &str = "(r) practice again / (q/esc) quit";

fn stat_lines(result: &SessionResult, score: &Score) -> Vec<Line<'static>> {
    let answer_times: Vec<f64> = result.answer_times.iter().map(|t| *t as f64).collect();
    let avg_answer = mean(&answer_times)
        .map(|secs| format_duration(secs.round() as u64))
        .unwrap_or_else(|| "-".to_string());
    let words: usize = result.answers.iter().map(|a| word_count(a)).sum();

    vec![
        Line::from(vec![
            Span::styled("Total Time        ", dim()),
            Span::styled(format_duration(result.total_time_secs), bold()),
        ]),
        Line::from(vec![
            Span::styled("Completion Rate   ", dim()),
            Span::styled(
                format!("{}%", result.completion_rate.round()),
                Style::default().fg(score_color(result.completion_rate)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Questions Reached ", dim()),
            Span::styled(
                format!("{} of {}", result.questions_asked.len(), result.question_total),
                bold(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Answers Given     ", dim()),
            Span::styled(result.answers.len().to_string(), bold()),
        ]),
        Line::from(vec![
            Span::styled("Avg. Per Answer   ", dim()),
            Span::styled(avg_answer, bold()),
        ]),
        Line::from(vec![
            Span::styled("Words in Answers  ", dim()),
            Span::styled(words.to_string(), bold()),
        ]),
        Line::from(vec![
            Span::styled("Words per Minute  ", dim()),
            Span::styled(score.words_per_minute.to_string(), bold()),
        ]),
        Line::from(vec![
            Span::styled("Ended             ", dim()),
            Span::styled(
                format!(
                    "{} at {}",
                    result.finish_reason,
                    result.finished_at.format("%H:%M")
                ),
                bold(),
            ),
        ]),
    ]
}

fn render_list(title: &str, items: &[&'static str], color: Color, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = items
        .iter()
        .map(|item| Line::from(Span::styled(format!("• {item}"), Style::default().fg(color))))
        .collect();
    let widget = Paragraph::new(lines)
        .block(titled_block(title))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

pub fn render_results(app: &App, f: &mut Frame) {
    let chunks = frame_chunks(f.area(), 3);

    let (Some(result), Some(score)) = (app.ctx.result(), app.score.as_ref()) else {
        let empty = Paragraph::new("No Results Available").alignment(Alignment::Center);
        f.render_widget(empty, chunks[1]);
        render_legend(LEGEND, f, chunks[3]);
        return;
    };

    let score_style = Style::default()
        .fg(score_color(f64::from(score.overall)))
        .patch(bold());
    let header = Paragraph::new(vec![
        Line::from(Span::styled("Interview Complete!", bold())),
        Line::from(vec![
            Span::styled(format!("{}%", score.overall), score_style),
            Span::styled("  overall  ·  ", dim()),
            Span::styled(score.label().to_string(), score_style),
        ]),
        Line::from(Span::styled(
            format!(
                "{} · {} · {}",
                result.config.role,
                result.config.interview_type.label(),
                result.config.difficulty
            ),
            dim(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(chunks[1]);

    let stats = Paragraph::new(stat_lines(result, score)).block(titled_block("Session"));
    f.render_widget(stats, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);
    render_list("Strengths", FEEDBACK.strengths, Color::Green, f, columns[0]);
    render_list(
        "Areas for Improvement",
        FEEDBACK.improvements,
        Color::Yellow,
        f,
        columns[1],
    );
    render_list(
        "Recommendations",
        FEEDBACK.recommendations,
        Color::Blue,
        f,
        columns[2],
    );

    render_notice(app.notice.as_deref(), f, chunks[2]);
    render_legend(LEGEND, f, chunks[3]);
}
