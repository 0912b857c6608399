use super::*;
use crate::app::PreviewView;
use storypath::{content, qr, HomeBody, PreviewScreen};

pub fn render_preview(frame: &mut Frame, app: &App, body: Rect) {
    let view = match &app.preview {
        Some(PreviewState::Ready(view)) => view,
        Some(PreviewState::Missing(_)) => {
            render_placeholder(frame, body, "No project found.");
            return;
        }
        Some(PreviewState::Loading(_)) | None => {
            render_placeholder(frame, body, "Loading project...");
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(body);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(rows[0]);

    render_selector(frame, view, cols[0]);
    match view.session.screen() {
        PreviewScreen::Home => render_home(frame, view, cols[1]),
        PreviewScreen::AtLocation(_) => render_at_location(frame, view, cols[1]),
    }
    render_score(frame, view, rows[1]);
}

fn render_placeholder(frame: &mut Frame, body: Rect, message: &str) {
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().padding(Padding::top(body.height / 3))),
        body,
    );
}

fn render_selector(frame: &mut Frame, view: &PreviewView, area: Rect) {
    let session = &view.session;
    let current = session.selected_name();
    let items: Vec<ListItem> = session
        .selector_options()
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let visited = i > 0
                && session
                    .locations()
                    .get(i - 1)
                    .is_some_and(|l| session.is_visited(l.id));
            let style = if i == view.selector_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if name == current {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let marker = if name == current { "● " } else { "  " };
            let suffix = if visited { " ✓" } else { "" };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(name.to_string(), style),
                Span::styled(suffix, Style::default().fg(Color::Green)),
            ]))
        })
        .collect();

    frame.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Location ")
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}

fn render_home(frame: &mut Frame, view: &PreviewView, area: Rect) {
    let session = &view.session;
    let project = session.project();

    let mut lines = vec![
        Line::from(Span::styled(
            "Instructions",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(project.instructions.clone()),
        Line::from(""),
    ];
    match session.home_body() {
        HomeBody::InitialClue(clue) => {
            lines.push(Line::from(Span::styled(
                "Initial Clue",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(clue.to_string()));
        }
        HomeBody::AllLocations(names) => {
            lines.push(Line::from(Span::styled(
                "Locations",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.extend(names.into_iter().map(|name| Line::from(format!("• {}", name))));
        }
    }

    let constraints = if session.map_visible() {
        vec![Constraint::Length(lines.len() as u16 + 2), Constraint::Min(8)]
    } else {
        vec![Constraint::Min(0)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", project.title),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
                .padding(Padding::horizontal(1)),
        ),
        chunks[0],
    );

    if session.map_visible() {
        super::map_view::render_map(frame, view, chunks[1]);
    }
}

fn render_at_location(frame: &mut Frame, view: &PreviewView, area: Rect) {
    let session = &view.session;
    let Some(location) = session.active_location() else {
        return;
    };

    let clue = location
        .clue
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("No clue available");
    let body = content::html_to_text(location.location_content.as_deref().unwrap_or_default());

    let mut lines = vec![
        Line::from(Span::styled(
            "Clue",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(clue.to_string()),
        Line::from(""),
    ];
    lines.extend(body.lines().map(|l| Line::from(l.to_string())));

    let qr_rendered = if session.qr_visible() {
        session.qr_payload().map(|payload| match qr::render(&payload) {
            Ok(rendered) => (payload, rendered),
            Err(e) => {
                tracing::warn!("QR render failed: {}", e);
                (payload, String::new())
            }
        })
    } else {
        None
    };

    let constraints = match &qr_rendered {
        Some((_, rendered)) => vec![
            Constraint::Min(4),
            Constraint::Length(rendered.lines().count() as u16 + 3),
        ],
        None => vec![Constraint::Min(0)],
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", location.location_name),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
                .padding(Padding::horizontal(1)),
        ),
        chunks[0],
    );

    if let Some((payload, rendered)) = qr_rendered {
        let mut qr_lines: Vec<Line> = rendered
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        qr_lines.push(Line::from(Span::styled(
            payload,
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(
            Paragraph::new(qr_lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" QR Code "),
            ),
            chunks[1],
        );
    }
}

/// Footer lines for the running score.
pub(crate) fn score_lines(view: &PreviewView) -> [String; 2] {
    let session = &view.session;
    [
        format!("Points: {} / {}", session.score(), session.max_score()),
        format!(
            "Locations Visited: {} / {}",
            session.visited_count(),
            session.location_count()
        ),
    ]
}

fn render_score(frame: &mut Frame, view: &PreviewView, area: Rect) {
    let [points, visited] = score_lines(view);
    let line = Line::from(vec![
        Span::styled(points, Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled(visited, Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}
