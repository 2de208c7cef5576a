//! Word wrapping and vertical stacking of the question page.
//!
//! All geometry is in abstract viewport units: pixels for a graphical
//! front end, cells for the terminal one. A [`TextMeasure`] supplies text
//! widths and line heights for a given font size.

use unicode_width::UnicodeWidthStr;

pub trait TextMeasure {
    fn text_width(&self, text: &str, size: u16) -> u32;
    fn line_height(&self, size: u16) -> u32;
}

/// Font size that maps to a single terminal row.
pub const CELL_FONT_SIZE: u16 = 20;

/// Rows reserved at the bottom of the terminal for stats and buttons.
pub const CELL_FOOTER_ROWS: u32 = 6;

/// Terminal measure: display width in cells; larger fonts take taller rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl TextMeasure for CellMeasure {
    fn text_width(&self, text: &str, _size: u16) -> u32 {
        text.width() as u32
    }

    fn line_height(&self, size: u16) -> u32 {
        u32::from(size / CELL_FONT_SIZE).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in content coordinates (before scrolling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && i64::from(x) < i64::from(self.x) + i64::from(self.width)
            && i64::from(y) < i64::from(self.y) + i64::from(self.height)
    }

    pub fn shifted(self, dy: i32) -> Self {
        Self {
            y: self.y.saturating_add(dy),
            ..self
        }
    }
}

/// Spacing constants for one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub top_margin: u32,
    /// Left and right margin around the question text.
    pub side_margin: u32,
    /// Extra space after every question line.
    pub line_spacing: u32,
    pub answer_gap: u32,
    /// Vertical padding added to every answer box.
    pub box_padding: u32,
    /// Horizontal room inside a box that text may not use.
    pub box_inner_padding: u32,
    pub box_width_percent: u32,
    /// Space below the last answer so it can scroll clear of the footer.
    pub footer_allowance: u32,
    pub wheel_step: u32,
    pub min_thumb: u32,
}

impl LayoutMetrics {
    /// Proportions for a pixel viewport.
    pub fn pixels(viewport: Viewport) -> Self {
        let h = viewport.height;
        Self {
            top_margin: h * 5 / 100,
            side_margin: 50,
            line_spacing: 5,
            answer_gap: h * 3 / 100,
            box_padding: h * 2 / 100,
            box_inner_padding: 10,
            box_width_percent: 80,
            footer_allowance: 100,
            wheel_step: 40,
            min_thumb: 20,
        }
    }

    /// The same proportions for a terminal, with room for box borders.
    pub fn cells(viewport: Viewport) -> Self {
        let h = viewport.height;
        Self {
            top_margin: (h * 5 / 100).max(1),
            side_margin: 2,
            line_spacing: 0,
            answer_gap: (h * 3 / 100).max(1),
            box_padding: (h * 2 / 100).max(2),
            box_inner_padding: 4,
            box_width_percent: 80,
            footer_allowance: CELL_FOOTER_ROWS,
            wheel_step: 3,
            min_thumb: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontClass {
    Question,
    Answer,
    Ui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontAdjust {
    Increase,
    Decrease,
    Reset,
}

const MIN_FONT_SIZE: u16 = 8;
const FONT_STEP: u16 = 2;

impl FontClass {
    /// Size a manual override starts from.
    pub fn base_size(self) -> u16 {
        match self {
            FontClass::Question => 24,
            FontClass::Answer => 20,
            FontClass::Ui => 16,
        }
    }

    /// Size used when no manual override is set.
    pub fn auto_size(self, viewport: Viewport) -> u16 {
        let scaled = match self {
            FontClass::Question => viewport.width * 4 / 100,
            FontClass::Answer => viewport.height * 35 / 1000,
            FontClass::Ui => viewport.height * 25 / 1000,
        };
        u16::try_from(scaled)
            .unwrap_or(u16::MAX)
            .max(self.base_size())
    }

    pub fn label(self) -> &'static str {
        match self {
            FontClass::Question => "Q",
            FontClass::Answer => "A",
            FontClass::Ui => "U",
        }
    }
}

/// Apply a button press to a manual font override.
pub fn adjust_font(class: FontClass, current: Option<u16>, adjust: FontAdjust) -> Option<u16> {
    match (adjust, current) {
        (FontAdjust::Reset, _) => None,
        (_, None) => Some(class.base_size()),
        (FontAdjust::Increase, Some(size)) => Some(size.saturating_add(FONT_STEP)),
        (FontAdjust::Decrease, Some(size)) => {
            Some(size.saturating_sub(FONT_STEP).max(MIN_FONT_SIZE))
        }
    }
}

/// Resolved font sizes for the three text classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSizes {
    pub question: u16,
    pub answer: u16,
    pub ui: u16,
}

impl FontSizes {
    pub fn resolve(
        viewport: Viewport,
        question: Option<u16>,
        answer: Option<u16>,
        ui: Option<u16>,
    ) -> Self {
        Self {
            question: question.unwrap_or_else(|| FontClass::Question.auto_size(viewport)),
            answer: answer.unwrap_or_else(|| FontClass::Answer.auto_size(viewport)),
            ui: ui.unwrap_or_else(|| FontClass::Ui.auto_size(viewport)),
        }
    }
}

/// Greedy word wrap.
///
/// Words are joined with single spaces while the measured line fits within
/// `budget`. A word that is wider than `budget` on its own gets a line to
/// itself and overflows. Empty or blank text yields no lines.
pub fn wrap<M: TextMeasure + ?Sized>(text: &str, budget: u32, size: u16, measure: &M) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measure.text_width(&candidate, size) <= budget {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    /// Offset from the top of the block.
    pub y: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    pub x: i32,
    pub y: i32,
    pub lines: Vec<TextLine>,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerBox {
    pub bounds: Bounds,
    pub answer: String,
    pub lines: Vec<String>,
    pub line_height: u32,
}

impl AnswerBox {
    pub fn text_height(&self) -> u32 {
        self.lines.len() as u32 * self.line_height
    }

    /// Top of the first text line, centering the text vertically.
    pub fn text_top(&self) -> i32 {
        let slack = self.bounds.height.saturating_sub(self.text_height()) / 2;
        self.bounds.y + slack as i32
    }
}

pub fn layout_question<M: TextMeasure + ?Sized>(
    text: &str,
    viewport: Viewport,
    metrics: &LayoutMetrics,
    size: u16,
    measure: &M,
) -> QuestionBlock {
    let budget = viewport.width.saturating_sub(metrics.side_margin * 2);
    let line_height = measure.line_height(size);

    let mut y = 0;
    let lines = wrap(text, budget, size, measure)
        .into_iter()
        .map(|text| {
            let line = TextLine {
                text,
                y,
                height: line_height,
            };
            y += line_height + metrics.line_spacing;
            line
        })
        .collect();

    QuestionBlock {
        x: metrics.side_margin as i32,
        y: metrics.top_margin as i32,
        lines,
        height: y,
    }
}

/// Stack one box per option below a question block of `question_height`.
pub fn layout_answers<M: TextMeasure + ?Sized>(
    options: &[String],
    viewport: Viewport,
    question_height: u32,
    metrics: &LayoutMetrics,
    size: u16,
    measure: &M,
) -> Vec<AnswerBox> {
    let box_width = viewport.width * metrics.box_width_percent / 100;
    let budget = box_width.saturating_sub(metrics.box_inner_padding);
    let x = ((viewport.width - box_width) / 2) as i32;
    let line_height = measure.line_height(size);

    let mut y = (metrics.top_margin + question_height + metrics.answer_gap) as i32;
    options
        .iter()
        .map(|answer| {
            let lines = wrap(answer, budget, size, measure);
            let height = lines.len() as u32 * line_height + metrics.box_padding;
            let answer_box = AnswerBox {
                bounds: Bounds {
                    x,
                    y,
                    width: box_width,
                    height,
                },
                answer: answer.clone(),
                lines,
                line_height,
            };
            y += (height + metrics.answer_gap) as i32;
            answer_box
        })
        .collect()
}

/// Find the box under a screen point, given the current scroll offset.
pub fn hit_test(boxes: &[AnswerBox], offset: i32, x: i32, y: i32) -> Option<&AnswerBox> {
    boxes
        .iter()
        .find(|answer_box| answer_box.bounds.shifted(offset).contains(x, y))
}
