use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Wrap},
};

const CORRECT_BANNER: &str = "Correct! []~(￣▽￣)~*";

pub fn draw_correct(f: &mut Frame, area: Rect) {
    f.render_widget(Block::default().style(Style::default().bg(Color::Green)), area);

    let row = Rect::new(area.x, area.y + area.height / 2, area.width, area.height.min(1));
    let banner = Paragraph::new(CORRECT_BANNER)
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(banner, row.intersection(area));
}

pub fn draw_wrong(f: &mut Frame, area: Rect, chosen: &str, correct: &[String]) {
    let base = Style::default().fg(Color::White).bg(Color::Red);
    f.render_widget(Block::default().style(base), area);

    let title_row = Rect::new(area.x, area.y + area.height / 5, area.width, 1);
    let title = Paragraph::new("Wrong")
        .style(base.add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, title_row.intersection(area));

    let mut text = Text::default();
    text.push_line(Line::from(vec![
        Span::styled("You chose: ", base.add_modifier(Modifier::BOLD)),
        Span::styled(chosen, base),
    ]));
    text.push_line(Line::from(""));
    text.push_line(Line::from(vec![
        Span::styled("Correct: ", base.add_modifier(Modifier::BOLD)),
        Span::styled(correct.join(", "), base),
    ]));

    let top = area.y + area.height * 2 / 5;
    let details = Rect::new(
        area.x + area.width.min(2),
        top,
        area.width.saturating_sub(4),
        area.bottom().saturating_sub(top),
    );
    let paragraph = Paragraph::new(text)
        .style(base)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, details.intersection(area));
}
