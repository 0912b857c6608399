use super::utils::centered_rect;
use super::*;

pub fn render_notice_dialog(frame: &mut Frame, app: &App) {
    let Some(message) = &app.notice else {
        return;
    };

    let width = (message.chars().count() as u16 + 8).clamp(30, 70);
    let area = centered_rect(width, 7, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled("[OK]", Style::default().fg(Color::Yellow))),
    ];

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
