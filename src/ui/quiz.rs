use crate::engine::{EngineState, PageLayout};
use crate::feedback::Feedback;
use crate::models::Mode;
use crate::ui::feedback::{draw_correct, draw_wrong};
use crate::ui::layout::{Button, QuizLayout, button_rects, calculate_quiz_chunks};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

/// Intersect a page-space rectangle with the frame. `None` when fully off screen.
fn clip(area: Rect, x: i32, y: i32, width: u32, height: u32) -> Option<Rect> {
    let left = i64::from(x).max(i64::from(area.x));
    let top = i64::from(y).max(i64::from(area.y));
    let right = (i64::from(x) + i64::from(width)).min(i64::from(area.right()));
    let bottom = (i64::from(y) + i64::from(height)).min(i64::from(area.bottom()));
    if left >= right || top >= bottom {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

pub fn draw_quiz(f: &mut Frame, engine: &EngineState, page: &PageLayout) {
    let area = f.area();
    let layout = calculate_quiz_chunks(area);

    match engine.feedback() {
        Feedback::Asking => draw_page(f, page, area),
        Feedback::ShowingCorrect { .. } => draw_correct(f, area),
        Feedback::ShowingWrong { chosen } => {
            draw_wrong(f, area, chosen, &engine.current().correct)
        }
    }

    draw_footer(f, engine, &layout);
}

fn draw_page(f: &mut Frame, page: &PageLayout, area: Rect) {
    let offset = page.offset;
    let question_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    for line in &page.question.lines {
        let y = page.question.y + line.y as i32 + offset;
        let x = page.question.x;
        let width = page.viewport.width.saturating_sub(x.max(0) as u32);
        if let Some(rect) = clip(area, x, y, width, 1) {
            f.render_widget(Paragraph::new(line.text.as_str()).style(question_style), rect);
        }
    }

    let box_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    for (index, answer) in page.answers.iter().enumerate() {
        let bounds = answer.bounds.shifted(offset);
        let Some(rect) = clip(area, bounds.x, bounds.y, bounds.width, bounds.height) else {
            continue;
        };
        f.render_widget(Block::default().style(box_style), rect);

        let top = answer.text_top() + offset;
        if index < 9
            && let Some(number) = clip(area, bounds.x, top, 1, 1)
        {
            let label = Paragraph::new((index + 1).to_string())
                .style(box_style.fg(Color::Yellow).add_modifier(Modifier::BOLD));
            f.render_widget(label, number);
        }

        for (row, text) in answer.lines.iter().enumerate() {
            let y = top + (row as u32 * answer.line_height) as i32;
            if let Some(rect) = clip(area, bounds.x + 1, y, bounds.width.saturating_sub(2), 1) {
                let line = Paragraph::new(text.as_str())
                    .style(box_style)
                    .alignment(Alignment::Center);
                f.render_widget(line, rect);
            }
        }
    }

    if let Some(thumb) = page.thumb_bounds()
        && let Some(rect) = clip(area, thumb.x, thumb.y, thumb.width, thumb.height)
    {
        f.render_widget(Block::default().style(Style::default().bg(Color::Gray)), rect);
    }
}

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn draw_footer(f: &mut Frame, engine: &EngineState, layout: &QuizLayout) {
    let area = layout.page_area;
    let footer = Rect::new(
        area.x,
        layout.stats_area.y,
        area.width,
        area.bottom().saturating_sub(layout.stats_area.y),
    );
    f.render_widget(Clear, footer);

    let mut stats_spans = Vec::new();
    if engine.config().show_stats_info {
        let stats = engine.current_stats();
        stats_spans.push(Span::from(format!(
            "Right: {} | Wrong: {} | Seen: {}",
            stats.right, stats.wrong, stats.times_seen
        )));
        stats_spans.push(Span::from("  "));
    }
    stats_spans.push(Span::styled(
        format!("[{}]", engine.mode().label()),
        key_style(),
    ));
    if let Some(status) = engine.status() {
        stats_spans.push(Span::from("  "));
        stats_spans.push(Span::styled(status, Style::default().fg(Color::Red)));
    }
    let stats = Paragraph::new(Line::from(stats_spans)).alignment(Alignment::Center);
    f.render_widget(stats, layout.stats_area);

    for (button, rect) in button_rects(layout, engine.config().enable_skip_button) {
        let style = match button {
            Button::Mode(mode) if mode == engine.mode() => {
                Style::default().fg(Color::Black).bg(Color::Green)
            }
            Button::Mode(_) => Style::default().fg(Color::White).bg(Color::Gray),
            Button::Skip => Style::default().fg(Color::White).bg(Color::Blue),
            Button::Font(..) => Style::default().fg(Color::White).bg(Color::DarkGray),
        };
        let widget = Paragraph::new(button.label())
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(widget, rect);
    }

    let mut help = Vec::new();
    if engine.feedback().is_asking() {
        help.extend([Span::styled("1-9", key_style()), Span::from(" Answer  ")]);
    } else {
        help.extend([
            Span::styled("Enter/Click", key_style()),
            Span::from(" Continue  "),
        ]);
    }
    if engine.config().enable_skip_button {
        help.extend([Span::styled("s", key_style()), Span::from(" Skip  ")]);
    }
    let other = match engine.mode() {
        Mode::Arcade => "p",
        Mode::Practice => "a",
    };
    help.extend([
        Span::styled(other, key_style()),
        Span::from(" Mode  "),
        Span::styled("↑/↓", key_style()),
        Span::from(" Scroll  "),
        Span::styled("q", key_style()),
        Span::from(" Quit"),
    ]);
    let help = Paragraph::new(Line::from(help)).alignment(Alignment::Center);
    f.render_widget(help, layout.help_area);
}
