use crate::layout::{AnswerBox, LayoutMetrics, QuestionBlock};

/// Height of the whole scrollable page.
pub fn total_content_height(
    question: &QuestionBlock,
    boxes: &[AnswerBox],
    metrics: &LayoutMetrics,
) -> u32 {
    let answers: u32 = boxes
        .iter()
        .map(|b| b.bounds.height + metrics.answer_gap)
        .sum();
    metrics.top_margin + question.height + metrics.answer_gap + answers + metrics.footer_allowance
}

/// Lowest allowed offset: content pulled up until its bottom meets the viewport's.
pub fn min_offset(content: u32, viewport: u32) -> i32 {
    -(i64::from(content.saturating_sub(viewport)).min(i64::from(i32::MAX)) as i32)
}

/// Clamp `offset` into `[viewport - content, 0]`, or to 0 when everything fits.
pub fn clamp(offset: i32, content: u32, viewport: u32) -> i32 {
    if content <= viewport {
        return 0;
    }
    offset.clamp(min_offset(content, viewport), 0)
}

pub fn thumb_height(content: u32, viewport: u32, min_thumb: u32) -> u32 {
    if content == 0 {
        return viewport;
    }
    let proportional = u64::from(viewport) * u64::from(viewport) / u64::from(content);
    (proportional as u32).max(min_thumb).min(viewport)
}

/// Track position of the thumb top for `offset`.
pub fn thumb_position(offset: i32, content: u32, viewport: u32, thumb: u32) -> u32 {
    let range = i64::from(content) - i64::from(viewport);
    if range <= 0 {
        return 0;
    }
    let track = i64::from(viewport.saturating_sub(thumb));
    let offset = i64::from(clamp(offset, content, viewport));
    (-offset * track / range) as u32
}

/// Inverse of [`thumb_position`], clamped.
pub fn offset_for_thumb(thumb_y: i32, content: u32, viewport: u32, thumb: u32) -> i32 {
    let range = i64::from(content) - i64::from(viewport);
    let track = i64::from(viewport.saturating_sub(thumb));
    if range <= 0 || track == 0 {
        return 0;
    }
    let raw = -(i64::from(thumb_y) * range / track);
    let raw = raw.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    clamp(raw, content, viewport)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumb {
    pub y: u32,
    pub height: u32,
}

impl Thumb {
    pub fn contains_y(&self, y: i32) -> bool {
        y >= self.y as i32 && y < (self.y + self.height) as i32
    }
}

/// Scroll offset plus scrollbar drag state. Survives question changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollController {
    offset: i32,
    /// Distance from the thumb top to the pointer while dragging.
    grab: Option<i32>,
}

impl ScrollController {
    pub fn new(offset: i32, dragging: bool) -> Self {
        Self {
            offset: offset.min(0),
            grab: dragging.then_some(0),
        }
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Re-apply the bounds after a resize or content change.
    pub fn reclamp(&mut self, content: u32, viewport: u32) {
        self.offset = clamp(self.offset, content, viewport);
    }

    /// Positive `delta` scrolls toward the top.
    pub fn scroll_by(&mut self, delta: i32, content: u32, viewport: u32) {
        self.offset = clamp(self.offset.saturating_add(delta), content, viewport);
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self, content: u32, viewport: u32) {
        self.offset = clamp(i32::MIN, content, viewport);
    }

    /// `None` when the content fits and no scrollbar is needed.
    pub fn thumb(&self, content: u32, viewport: u32, min_thumb: u32) -> Option<Thumb> {
        if content <= viewport {
            return None;
        }
        let height = thumb_height(content, viewport, min_thumb);
        Some(Thumb {
            y: thumb_position(self.offset, content, viewport, height),
            height,
        })
    }

    pub fn begin_drag(&mut self, pointer_y: i32, thumb: Thumb) {
        self.grab = Some(pointer_y - thumb.y as i32);
    }

    pub fn drag_to(&mut self, pointer_y: i32, content: u32, viewport: u32, min_thumb: u32) {
        let Some(grab) = self.grab else {
            return;
        };
        let height = thumb_height(content, viewport, min_thumb);
        self.offset = offset_for_thumb(pointer_y - grab, content, viewport, height);
    }

    pub fn end_drag(&mut self) {
        self.grab = None;
    }
}
