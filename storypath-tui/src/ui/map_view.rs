use super::*;
use crate::app::PreviewView;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use storypath::Position;

/// Smallest span, in degrees, shown around a single marker.
const MIN_SPAN: f64 = 0.005;

/// Longitude and latitude bounds that frame every plottable marker, or a
/// small window around `center` when none can be plotted.
pub(crate) fn map_bounds(
    positions: impl IntoIterator<Item = Position>,
    center: Position,
) -> ([f64; 2], [f64; 2]) {
    let plottable: Vec<Position> = positions.into_iter().filter(Position::is_finite).collect();
    let center = if center.is_finite() {
        center
    } else {
        storypath::FALLBACK_CENTER
    };

    let (mut min_lat, mut max_lat, mut min_long, mut max_long) =
        (center.lat, center.lat, center.long, center.long);
    for pos in &plottable {
        min_lat = min_lat.min(pos.lat);
        max_lat = max_lat.max(pos.lat);
        min_long = min_long.min(pos.long);
        max_long = max_long.max(pos.long);
    }

    let pad_lat = ((max_lat - min_lat) * 0.15).max(MIN_SPAN);
    let pad_long = ((max_long - min_long) * 0.15).max(MIN_SPAN);
    (
        [min_long - pad_long, max_long + pad_long],
        [min_lat - pad_lat, max_lat + pad_lat],
    )
}

pub fn render_map(frame: &mut Frame, view: &PreviewView, area: Rect) {
    let session = &view.session;
    let focused_id = view.focused_location_id();
    let (x_bounds, y_bounds) = map_bounds(
        session.markers().map(|(_, pos)| pos),
        session.map_center(),
    );

    let popup_height = if focused_id.is_some() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(popup_height)])
        .split(area);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Map "),
        )
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for (location, pos) in session.markers() {
                if !pos.is_finite() {
                    continue;
                }
                let color = if Some(location.id) == focused_id {
                    Color::Yellow
                } else if session.is_visited(location.id) {
                    Color::Green
                } else {
                    Color::Red
                };
                ctx.print(
                    pos.long,
                    pos.lat,
                    Span::styled("●", Style::default().fg(color)),
                );
            }
        });
    frame.render_widget(canvas, chunks[0]);

    let focused = focused_id.and_then(|id| session.locations().iter().find(|l| l.id == id));
    if let Some(location) = focused {
        let lines = vec![
            Line::from(Span::styled(
                location.location_name.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(location.clue.clone().unwrap_or_default()),
            Line::from(Span::styled(
                format!("Points: {}", location.score_points),
                Style::default().fg(Color::Green),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            ),
            chunks[1],
        );
    }
}
