use crate::app::{App, PreviewState, Route};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

mod delete_dialog;
mod form_view;
mod home_view;
mod location_list_view;
mod map_view;
mod notice_dialog;
mod preview_view;
mod project_list_view;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Brand and path
            Constraint::Min(0),    // Active view
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, root[0], app);

    let body = root[1];
    match app.route {
        Route::Home => home_view::render_home_view(frame, body),
        Route::Projects => project_list_view::render_project_list(frame, app, body),
        Route::ProjectAdd | Route::ProjectEdit(_) => {
            form_view::render_project_form(frame, app, body)
        }
        Route::Locations(_) => location_list_view::render_location_list(frame, app, body),
        Route::LocationAdd(_) | Route::LocationEdit(_) => {
            form_view::render_location_form(frame, app, body)
        }
        Route::Preview(_) => preview_view::render_preview(frame, app, body),
    }

    render_status(frame, root[2], app);
    render_controls(frame, root[3], app);

    if app.delete_context.is_some() {
        delete_dialog::render_delete_confirm_dialog(frame, app);
    }
    if app.notice.is_some() {
        notice_dialog::render_notice_dialog(frame, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    const BRAND: &str = " STORYPATH";
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BRAND.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(
            BRAND,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        label_area,
    );

    let active = app.route.nav_label();
    let mut spans: Vec<Span> = ["HOME", "PROJECTS", "LOCATIONS", "PREVIEW"]
        .iter()
        .flat_map(|label| {
            let style = if *label == active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [Span::styled(*label, style), Span::raw("  ")]
        })
        .collect();
    spans.push(Span::styled(
        app.route.to_string(),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::styled(
        format!("  ({})", app.username),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        cols[1],
    );
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(message) = &app.status_message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Red),
            )),
            area,
        );
    }
}

/// Key hints for the footer, most relevant first.
pub(crate) fn controls_for(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.notice.is_some() {
        return vec![("Any key", "Dismiss")];
    }
    if app.delete_context.is_some() {
        return vec![("y/Enter", "Delete"), ("n/Esc", "Cancel")];
    }
    match app.route {
        Route::Home => vec![("Enter/p", "Projects"), ("a", "Add project"), ("q", "Quit")],
        Route::Projects if app.project_list.search_focused => vec![
            ("Type", "Filter"),
            ("Ctrl+X", "Clear"),
            ("Enter/Esc", "Back to list"),
        ],
        Route::Projects => vec![
            ("↑↓/j/k", "Navigate"),
            ("/", "Search"),
            ("a", "Add"),
            ("e/Enter", "Edit"),
            ("l", "Locations"),
            ("v", "Preview"),
            ("d", "Delete"),
            ("Esc", "Home"),
        ],
        Route::ProjectAdd | Route::ProjectEdit(_) => vec![
            ("Tab/↑↓", "Field"),
            ("←→/Space", "Change choice"),
            ("Enter/Ctrl+S", "Submit"),
            ("Esc", "Cancel"),
        ],
        Route::Locations(_) => vec![
            ("↑↓/j/k", "Navigate"),
            ("a", "Add"),
            ("e/Enter", "Edit"),
            ("d", "Delete"),
            ("p", "Print QR"),
            ("P", "Print all QR"),
            ("[ ]", "Scroll QR"),
            ("v", "Preview"),
            ("Esc", "Projects"),
        ],
        Route::LocationAdd(_) | Route::LocationEdit(_) => vec![
            ("Tab/↑↓", "Field"),
            ("←→/Space", "Change trigger"),
            ("Enter", "Submit or new line in content"),
            ("Ctrl+S", "Submit"),
            ("Esc", "Cancel"),
        ],
        Route::Preview(_) => {
            let mut controls = vec![("↑↓/j/k", "Choose location"), ("Enter", "Go")];
            if let Some(PreviewState::Ready(view)) = &app.preview {
                if view.session.map_visible() {
                    controls.push(("Tab", "Next marker"));
                    controls.push(("Space", "Visit marker"));
                }
            }
            controls.push(("m", "Map"));
            controls.push(("r", "QR code"));
            controls.push(("Esc", "Back"));
            controls
        }
    }
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let spans: Vec<Span> = controls_for(app)
        .into_iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(key, Style::default().fg(Color::Yellow)),
                Span::raw(format!(": {}  ", label)),
            ]
        })
        .collect();

    let controls = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(controls, area);
}
