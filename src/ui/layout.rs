use crate::layout::{FontAdjust, FontClass};
use crate::models::Mode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct QuizLayout {
    pub page_area: Rect,
    pub stats_area: Rect,
    pub font_row: Rect,
    pub mode_row: Rect,
    pub help_area: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Font(FontClass, FontAdjust),
    Mode(Mode),
    Skip,
}

impl Button {
    pub fn label(self) -> String {
        match self {
            Button::Font(class, FontAdjust::Increase) => format!("{}+", class.label()),
            Button::Font(class, FontAdjust::Decrease) => format!("{}-", class.label()),
            Button::Font(class, FontAdjust::Reset) => format!("{} Default", class.label()),
            Button::Mode(mode) => mode.label().to_string(),
            Button::Skip => "Skip".to_string(),
        }
    }
}

/// Footer rows are overlaid on the bottom of the scrollable page.
pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    QuizLayout {
        page_area: area,
        stats_area: chunks[1],
        font_row: chunks[3],
        mode_row: chunks[5],
        help_area: chunks[6],
    }
}

/// Horizontal slot at `left_percent` of the row, `width_percent` wide, clipped to the row.
fn slot(row: Rect, left_percent: u16, width_percent: u16) -> Rect {
    let x = row.x + (u32::from(row.width) * u32::from(left_percent) / 100) as u16;
    let width = (u32::from(row.width) * u32::from(width_percent) / 100).max(1) as u16;
    let right = row.x.saturating_add(row.width);
    Rect::new(x.min(right), row.y, width.min(right.saturating_sub(x)), row.height)
}

/// Every button with its screen rectangle. Skip is left out when disabled.
pub fn button_rects(layout: &QuizLayout, show_skip: bool) -> Vec<(Button, Rect)> {
    let font = |class, adjust| Button::Font(class, adjust);
    let mut buttons = vec![
        (font(FontClass::Question, FontAdjust::Increase), slot(layout.font_row, 5, 5)),
        (font(FontClass::Question, FontAdjust::Decrease), slot(layout.font_row, 12, 5)),
        (font(FontClass::Question, FontAdjust::Reset), slot(layout.font_row, 20, 10)),
        (font(FontClass::Answer, FontAdjust::Increase), slot(layout.font_row, 35, 5)),
        (font(FontClass::Answer, FontAdjust::Decrease), slot(layout.font_row, 42, 5)),
        (font(FontClass::Answer, FontAdjust::Reset), slot(layout.font_row, 49, 10)),
        (font(FontClass::Ui, FontAdjust::Increase), slot(layout.font_row, 65, 5)),
        (font(FontClass::Ui, FontAdjust::Decrease), slot(layout.font_row, 72, 5)),
        (font(FontClass::Ui, FontAdjust::Reset), slot(layout.font_row, 79, 10)),
        (Button::Mode(Mode::Practice), slot(layout.mode_row, 5, 10)),
        (Button::Mode(Mode::Arcade), slot(layout.mode_row, 17, 10)),
    ];

    let row = layout.mode_row;
    if show_skip && row.width >= 12 {
        buttons.push((Button::Skip, Rect::new(row.x + row.width - 12, row.y, 10, row.height)));
    }
    buttons
        .into_iter()
        .filter(|(_, rect)| rect.width > 0 && rect.height > 0)
        .collect()
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && row >= rect.y
        && u32::from(column) < u32::from(rect.x) + u32::from(rect.width)
        && u32::from(row) < u32::from(rect.y) + u32::from(rect.height)
}

/// The button under a terminal cell, if any.
pub fn button_at(area: Rect, show_skip: bool, column: u16, row: u16) -> Option<Button> {
    let layout = calculate_quiz_chunks(area);
    button_rects(&layout, show_skip)
        .into_iter()
        .find(|(_, rect)| rect_contains(*rect, column, row))
        .map(|(button, _)| button)
}
