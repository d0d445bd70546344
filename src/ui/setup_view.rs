use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use rehearse::{
    session::{Difficulty, DURATION_CHOICES},
    setup::{SetupField, SetupForm},
};

use crate::{
    ui::{bold, dim, frame_chunks, render_legend, render_notice, titled_block},
    App,
};

const LEGEND: &str =
    "(tab/↓) next field / (shift+tab/↑) previous / (←/→) change / (enter) start / (esc)ape";

fn field_value(form: &SetupForm, field: SetupField) -> String {
    match field {
        SetupField::Role if form.role.is_empty() => "e.g., Senior Software Engineer".to_string(),
        SetupField::Role => form.role.clone(),
        SetupField::Company if form.company.is_empty() => "e.g., Google, Meta, Apple".to_string(),
        SetupField::Company => form.company.clone(),
        SetupField::ExperienceLevel => format!("‹ {} ›", form.experience_level.label()),
        SetupField::InterviewType => format!("‹ {} ›", form.interview_type.label()),
        SetupField::Duration => DURATION_CHOICES
            .iter()
            .map(|d| {
                if *d == form.duration_minutes {
                    format!("[{d} min]")
                } else {
                    format!(" {d} min ")
                }
            })
            .join(" "),
        SetupField::Difficulty => Difficulty::ALL
            .iter()
            .map(|d| {
                if *d == form.difficulty {
                    format!("[{d}]")
                } else {
                    format!(" {d} ")
                }
            })
            .join(" "),
        SetupField::Start => String::new(),
    }
}

fn field_line(form: &SetupForm, field: SetupField) -> Line<'static> {
    let focused = form.focus() == field;
    let marker = if focused { "▶ " } else { "  " };

    if field == SetupField::Start {
        let style = if form.can_start() {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            dim()
        };
        let style = if focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        };
        return Line::from(vec![
            Span::raw(marker),
            Span::styled(format!(" {} ", field.title()), style),
        ]);
    }

    let placeholder = match field {
        SetupField::Role => form.role.is_empty(),
        SetupField::Company => form.company.is_empty(),
        _ => false,
    };
    let value_style = if placeholder {
        dim()
    } else if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        bold()
    };
    let cursor = if focused && field.is_text() { "▏" } else { "" };

    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{:<20}", field.title()), bold()),
        Span::styled(field_value(form, field), value_style),
        Span::raw(cursor),
    ])
}

pub fn render_setup(app: &App, f: &mut Frame) {
    let chunks = frame_chunks(f.area(), 3);

    let title = Paragraph::new(vec![
        Line::from(Span::styled("Set Up Your Interview", bold())),
        Line::from(Span::styled(
            "Customize your practice session to match your target role",
            dim(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(SetupField::ALL.len() as u16 * 2 + 2), Constraint::Min(0)])
        .split(chunks[1]);

    let lines: Vec<Line> = SetupField::ALL
        .iter()
        .flat_map(|field| [field_line(&app.setup, *field), Line::from("")])
        .collect();
    let form = Paragraph::new(lines).block(titled_block("Session"));
    f.render_widget(form, body[0]);

    render_notice(app.notice.as_deref(), f, chunks[2]);
    render_legend(LEGEND, f, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse::config::Config;

    #[test]
    fn placeholders_for_empty_text_fields() {
        let form = SetupForm::new(&Config::default());
        assert!(field_value(&form, SetupField::Role).starts_with("e.g."));
        assert!(field_value(&form, SetupField::Company).starts_with("e.g."));
    }

    #[test]
    fn selected_choices_are_bracketed() {
        let form = SetupForm::new(&Config::default());
        let durations = field_value(&form, SetupField::Duration);
        assert!(durations.contains("[30 min]"));
        assert!(durations.contains(" 15 min "));
        assert!(field_value(&form, SetupField::Difficulty).contains("[medium]"));
    }
}
