use super::utils::with_cursor;
use super::*;

pub fn render_project_list(frame: &mut Frame, app: &App, body: Rect) {
    let list_state = &app.project_list;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Project list
        ])
        .split(body);

    let search_text = if list_state.search_focused {
        let (before, after) = list_state.search_input.split_at_cursor();
        with_cursor(before, after)
    } else if list_state.search_input.value.is_empty() {
        "Press / to search...".to_string()
    } else {
        list_state.search_input.value.clone()
    };
    let search_border = if list_state.search_focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(search_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_border)
                .title(" Search ")
                .padding(Padding::horizontal(1)),
        ),
        chunks[0],
    );

    let title = if list_state.search_input.value.is_empty() {
        format!(" Projects ({}) ", list_state.projects.len())
    } else {
        format!(
            " Projects ({}/{}) ",
            list_state.filtered.len(),
            list_state.projects.len()
        )
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1));

    if !list_state.loaded {
        frame.render_widget(
            Paragraph::new("Loading projects...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            chunks[1],
        );
        return;
    }
    if list_state.projects.is_empty() {
        frame.render_widget(
            Paragraph::new("No projects yet. Press a to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = list_state
        .filtered
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let selected = i == list_state.selected;
            let title_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let (badge, badge_style) = if project.is_published {
                ("Published", Style::default().fg(Color::Green))
            } else {
                ("Not Published", Style::default().fg(Color::DarkGray))
            };
            let marker = if selected { "▶ " } else { "  " };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, title_style),
                    Span::styled(project.title.clone(), title_style),
                    Span::raw("  "),
                    Span::styled(badge, badge_style),
                ]),
                Line::from(Span::styled(
                    format!("  {}", project.description),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), chunks[1]);
}
