use super::*;

pub fn render_home_view(frame: &mut Frame, body: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to StoryPath",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Create engaging tours, hunts and adventures."),
        Line::from("Add locations, print their QR codes and preview the participant experience."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" to open your projects."),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().padding(Padding::top(body.height / 4)));
    frame.render_widget(paragraph, body);
}
