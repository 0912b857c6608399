use super::*;
use storypath::qr::QrLabel;

/// Gap between neighbouring codes, in cells.
const LABEL_GAP: u16 = 2;

/// How a set of labels is tiled across the QR panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LabelGrid {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: u16,
    pub cell_height: u16,
}

/// Tile `labels` in rows, as many side by side as fit in `width`. Every cell
/// is sized to the largest code and caption.
pub(crate) fn label_grid(labels: &[QrLabel], width: u16) -> LabelGrid {
    let widest = labels
        .iter()
        .flat_map(|l| l.rendered.lines().chain(std::iter::once(l.payload.as_str())))
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let tallest = labels
        .iter()
        .map(|l| l.rendered.lines().count())
        .max()
        .unwrap_or(0);

    let cell_width = u16::try_from(widest).unwrap_or(u16::MAX).saturating_add(LABEL_GAP);
    let cell_height = u16::try_from(tallest).unwrap_or(u16::MAX).saturating_add(2);
    let columns = usize::from((width / cell_width.max(1)).max(1));
    LabelGrid {
        columns,
        rows: labels.len().div_ceil(columns),
        cell_width,
        cell_height,
    }
}

pub fn render_location_list(frame: &mut Frame, app: &App, body: Rect) {
    let Some(list_state) = &app.location_list else {
        return;
    };

    let labels = &list_state.qr_labels;
    let grid = label_grid(labels, body.width.saturating_sub(4));
    let constraints = if labels.is_empty() {
        vec![Constraint::Min(0)]
    } else {
        let wanted = (grid.rows as u16).saturating_mul(grid.cell_height).saturating_add(2);
        vec![Constraint::Min(5), Constraint::Length(wanted.min(body.height * 2 / 3))]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(body);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " Locations of project {} ({}) ",
            list_state.project_id,
            list_state.locations.len()
        ))
        .padding(Padding::horizontal(1));

    if !list_state.loaded {
        frame.render_widget(
            Paragraph::new("Loading locations...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            chunks[0],
        );
    } else if list_state.locations.is_empty() {
        frame.render_widget(
            Paragraph::new("No locations yet. Press a to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            chunks[0],
        );
    } else {
        let items: Vec<ListItem> = list_state
            .locations
            .iter()
            .enumerate()
            .map(|(i, location)| {
                let selected = i == list_state.selected;
                let name_style = if selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let marker = if selected { "▶ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, name_style),
                    Span::styled(location.location_name.clone(), name_style),
                    Span::raw("  "),
                    Span::styled(
                        location.location_trigger.to_string(),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        location.location_position.clone(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("{} pts", location.score_points),
                        Style::default().fg(Color::Green),
                    ),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(block), chunks[0]);
    }

    if !labels.is_empty() {
        render_label_grid(frame, labels, grid, list_state.qr_scroll, chunks[1]);
    }
}

fn render_label_grid(
    frame: &mut Frame,
    labels: &[QrLabel],
    grid: LabelGrid,
    scroll: usize,
    area: Rect,
) {
    let first_row = scroll.min(grid.rows.saturating_sub(1));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(
            " QR codes: {} (rows {}-{}, x to close) ",
            labels.len(),
            first_row + 1,
            grid.rows
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    for (i, label) in labels.iter().enumerate().skip(first_row * grid.columns) {
        let row = (i / grid.columns - first_row) as u16;
        let column = (i % grid.columns) as u16;
        let y = inner.y + row * grid.cell_height;
        if y + grid.cell_height > inner.y + inner.height {
            break;
        }
        let cell = Rect::new(
            inner.x + column * grid.cell_width,
            y,
            grid.cell_width,
            grid.cell_height,
        )
        .intersection(inner);

        let mut lines: Vec<Line> = label.rendered.lines().map(Line::from).collect();
        lines.push(Line::from(Span::styled(
            label.payload.clone(),
            Style::default().fg(Color::White),
        )));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(payload: &str) -> QrLabel {
        QrLabel {
            payload: payload.to_string(),
            rendered: "████\n█  █\n████".to_string(),
        }
    }

    #[test]
    fn test_codes_sit_side_by_side_when_they_fit() {
        let labels = vec![label("A"), label("B"), label("C")];
        let grid = label_grid(&labels, 20);
        assert_eq!(grid.cell_width, 6);
        assert_eq!(grid.cell_height, 5);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.rows, 1);
    }

    #[test]
    fn test_codes_wrap_onto_new_rows() {
        let labels = vec![label("A"), label("B"), label("C")];
        let grid = label_grid(&labels, 13);
        assert_eq!(grid.columns, 2);
        assert_eq!(grid.rows, 2);
    }

    #[test]
    fn test_narrow_panel_keeps_one_column() {
        let labels = vec![label("Library Entrance"), label("B")];
        let grid = label_grid(&labels, 5);
        assert_eq!(grid.cell_width, 18);
        assert_eq!(grid.columns, 1);
        assert_eq!(grid.rows, 2);
    }
}
