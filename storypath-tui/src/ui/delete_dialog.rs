use super::utils::centered_rect;
use super::*;

pub fn render_delete_confirm_dialog(frame: &mut Frame, app: &App) {
    let Some(ctx) = &app.delete_context else {
        return;
    };

    let area = centered_rect(56, 9, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(ctx.prompt(), Style::default().fg(Color::White))),
        Line::from(Span::styled(
            ctx.display_label.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(Color::Red)),
            Span::raw("    "),
            Span::styled("[n] No", Style::default().fg(Color::White)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm Delete ")
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
