use super::utils::with_cursor;
use super::*;
use crate::app::{LocationField, ProjectField, TextInput};
use strum::IntoEnumIterator;

fn text_value(input: &TextInput, focused: bool) -> String {
    if focused {
        let (before, after) = input.split_at_cursor();
        with_cursor(before, after)
    } else {
        input.value.clone()
    }
}

fn choice_value(value: impl std::fmt::Display, focused: bool) -> String {
    if focused {
        format!("◀ {} ▶", value)
    } else {
        value.to_string()
    }
}

fn checkbox_value(checked: bool) -> String {
    if checked { "[x]" } else { "[ ]" }.to_string()
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    hint: &str,
    value: String,
    focused: bool,
) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = if focused {
        Line::from(vec![
            Span::styled(format!(" {} ", label), border),
            Span::styled(format!("{} ", hint), Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(format!(" {} ", label), border))
    };
    frame.render_widget(
        Paragraph::new(value)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title)
                    .padding(Padding::horizontal(1)),
            ),
        area,
    );
}

fn render_frame(frame: &mut Frame, body: Rect, heading: &str) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", heading),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1));
    let inner = block.inner(body);
    frame.render_widget(block, body);
    inner
}

fn render_validation(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(error) = error {
        frame.render_widget(
            Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))),
            area,
        );
    }
}

pub fn render_project_form(frame: &mut Frame, app: &App, body: Rect) {
    let Some(form) = &app.project_form else {
        return;
    };
    let inner = render_frame(frame, body, form.heading());
    if !form.loaded {
        frame.render_widget(
            Paragraph::new("Loading project...").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let mut constraints: Vec<Constraint> = ProjectField::iter()
        .map(|_| Constraint::Length(3))
        .collect();
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (row, field) in ProjectField::iter().enumerate() {
        let focused = form.focused == field;
        let value = match field {
            ProjectField::Title => text_value(&form.title, focused),
            ProjectField::Description => text_value(&form.description, focused),
            ProjectField::Instructions => text_value(&form.instructions, focused),
            ProjectField::InitialClue => text_value(&form.initial_clue, focused),
            ProjectField::HomescreenDisplay => choice_value(form.homescreen_display, focused),
            ProjectField::ParticipantScoring => choice_value(form.participant_scoring, focused),
            ProjectField::Published => checkbox_value(form.published),
        };
        render_field(frame, rows[row], field.label(), field.hint(), value, focused);
    }

    render_validation(frame, rows[rows.len() - 1], form.validation_error.as_deref());
}

pub fn render_location_form(frame: &mut Frame, app: &App, body: Rect) {
    let Some(form) = &app.location_form else {
        return;
    };
    let inner = render_frame(frame, body, form.heading());
    if !form.loaded {
        frame.render_widget(
            Paragraph::new("Loading location...").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let mut constraints: Vec<Constraint> = LocationField::iter()
        .map(|field| match field {
            LocationField::Content => Constraint::Min(5),
            _ => Constraint::Length(3),
        })
        .collect();
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (row, field) in LocationField::iter().enumerate() {
        let focused = form.focused == field;
        let value = match field {
            LocationField::Name => text_value(&form.name, focused),
            LocationField::Trigger => choice_value(form.trigger, focused),
            LocationField::Position => text_value(&form.position, focused),
            LocationField::ScorePoints => text_value(&form.score, focused),
            LocationField::Clue => text_value(&form.clue, focused),
            LocationField::Content => text_value(&form.content, focused),
        };
        render_field(frame, rows[row], field.label(), field.hint(), value, focused);
    }

    render_validation(frame, rows[rows.len() - 1], form.validation_error.as_deref());
}
