use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
    Frame,
};
use rehearse::{util::format_clock, Room};

use crate::{
    ui::{bold, dim, frame_chunks, italic, render_legend, render_notice, titled_block},
    App,
};

const LEGEND: &str = "(enter) submit / (tab) next question / (f2) voice / (f3) camera / (f4) mic / (f5) record / (esc) end interview";

const TIPS: [&str; 4] = [
    "• Maintain eye contact with the camera",
    "• Use specific examples in your answers",
    "• Take your time to think before responding",
    "• Speak clearly and at a steady pace",
];

fn on_off(on: bool) -> Span<'static> {
    if on {
        Span::styled("ON ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("OFF", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    }
}

fn render_header(room: &Room, f: &mut Frame, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Interview: {}", room.config().role),
            bold(),
        )),
        Line::from(Span::styled(
            format!(
                "Question {} of {}",
                room.question_number(),
                room.question_total()
            ),
            dim(),
        )),
    ]);
    f.render_widget(title, halves[0]);

    let clock_style = if room.remaining_secs() <= 60 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        bold()
    };
    let clock = Paragraph::new(vec![
        Line::from(Span::styled(format_clock(room.remaining_secs()), clock_style)),
        Line::from(Span::styled("Time Remaining", dim())),
    ])
    .alignment(Alignment::Right);
    f.render_widget(clock, halves[1]);
}

fn render_status(room: &Room, f: &mut Frame, area: Rect) {
    let (camera, mic, device) = match room.media() {
        Some(media) => (media.camera_on(), media.mic_on(), media.device().to_string()),
        None => (false, false, "no camera (text-only mode)".to_string()),
    };

    let mut lines = vec![
        Line::from(vec![Span::styled("Camera    ", bold()), on_off(camera)]),
        Line::from(vec![Span::styled("Mic       ", bold()), on_off(mic)]),
        Line::from(vec![
            Span::styled("Recording ", bold()),
            on_off(room.is_recording()),
        ]),
        Line::from(Span::styled(device, dim())),
        Line::from(""),
        Line::from(Span::styled("Interview Tips:", bold())),
    ];
    lines.extend(TIPS.iter().map(|tip| Line::from(Span::styled(*tip, italic()))));

    let status = Paragraph::new(lines)
        .block(titled_block("Interview Controls"))
        .wrap(Wrap { trim: true });
    f.render_widget(status, area);
}

fn render_question(room: &Room, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let question = room.current_question().unwrap_or_default();
    let prompt = Paragraph::new(Span::styled(question.to_string(), bold()))
        .block(titled_block("Question").title_bottom(format_clock(room.question_elapsed())))
        .wrap(Wrap { trim: true });
    f.render_widget(prompt, chunks[0]);

    let (text, style) = if room.draft().is_empty() {
        ("Start speaking or type your answer here...".to_string(), dim())
    } else {
        (format!("{}▏", room.draft()), Style::default())
    };
    let answer = Paragraph::new(text)
        .style(style)
        .block(titled_block("Your Answer"))
        .wrap(Wrap { trim: false });
    f.render_widget(answer, chunks[1]);

    let voice = if !room.voice_available() {
        Span::styled("Voice input unavailable", dim())
    } else if room.is_listening() {
        Span::styled(
            "● Listening...",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("Voice Input (f2)", Style::default().fg(Color::Blue))
    };
    let submit_style = if room.can_submit() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        dim()
    };
    let footer = Paragraph::new(Line::from(vec![
        voice,
        Span::raw("   "),
        Span::styled(format!("{} characters", room.draft().chars().count()), dim()),
        Span::raw("   "),
        Span::styled("Submit (enter)", submit_style),
    ]));
    f.render_widget(footer, chunks[2]);
}

pub fn render_room(app: &App, f: &mut Frame) {
    let Some(room) = app.room.as_ref() else {
        return;
    };
    let chunks = frame_chunks(f.area(), 2);

    render_header(room, f, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(chunks[1]);

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(room.question_number() as f64 / room.question_total().max(1) as f64)
        .label(format!(
            "{}/{}",
            room.question_number(),
            room.question_total()
        ));
    f.render_widget(progress, body[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(body[1]);

    render_question(room, f, columns[0]);
    render_status(room, f, columns[1]);

    render_notice(app.notice.as_deref(), f, chunks[2]);
    render_legend(LEGEND, f, chunks[3]);
}
