use crate::config::Config;
use crate::error::QuizError;
use crate::evaluator::submit;
use crate::feedback::{Feedback, Transition};
use crate::layout::{
    AnswerBox, Bounds, FontAdjust, FontClass, FontSizes, LayoutMetrics, QuestionBlock,
    TextMeasure, Viewport, adjust_font, hit_test, layout_answers, layout_question,
};
use crate::logger;
use crate::models::{Mode, Stats, Verdict};
use crate::scroll::{ScrollController, Thumb, total_content_height};
use crate::selector::{Selection, pick_next};
use crate::store::QuestionStore;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Instant;

/// Everything needed to draw one frame and hit-test input against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub viewport: Viewport,
    pub metrics: LayoutMetrics,
    pub fonts: FontSizes,
    pub question: QuestionBlock,
    pub answers: Vec<AnswerBox>,
    pub content_height: u32,
    pub offset: i32,
    /// Thumb track position, `None` when hidden or not needed.
    pub thumb: Option<Thumb>,
}

impl PageLayout {
    /// Screen rectangle of the scrollbar thumb, in the rightmost column.
    pub fn thumb_bounds(&self) -> Option<Bounds> {
        self.thumb.map(|thumb| Bounds {
            x: self.viewport.width.saturating_sub(1) as i32,
            y: thumb.y as i32,
            width: 1,
            height: thumb.height,
        })
    }
}

/// The running quiz: bank, settings, current question and view state.
#[derive(Debug)]
pub struct EngineState {
    store: QuestionStore,
    config: Config,
    config_path: Option<PathBuf>,
    mode: Mode,
    current: Selection,
    feedback: Feedback,
    selected: Option<String>,
    scroll: ScrollController,
    status: Option<String>,
    rng: StdRng,
}

impl EngineState {
    /// Build the engine and show the first question.
    ///
    /// # Errors
    /// [`QuizError::EmptyBank`] when the store has no questions.
    pub fn start(
        mut store: QuestionStore,
        config: Config,
        config_path: Option<PathBuf>,
        mode: Mode,
        mut rng: StdRng,
    ) -> Result<Self, QuizError> {
        let picked = pick_next(&mut store, mode, &mut rng)?;
        let scroll = ScrollController::new(config.scroll_offset, config.drag_scrollbar);

        let mut engine = Self {
            store,
            config,
            config_path,
            mode,
            current: picked.value,
            feedback: Feedback::Asking,
            selected: None,
            scroll,
            status: None,
            rng,
        };
        engine.note_save(picked.save_error);
        logger::log(&format!("Session started in {} mode", mode.label()));
        Ok(engine)
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    /// Last persistence problem, shown until the next successful save.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn current_stats(&self) -> Stats {
        self.store
            .question(&self.current.question)
            .map(|q| q.stats)
            .unwrap_or_default()
    }

    /// Lay out the current question and clamp the scroll offset to it.
    pub fn layout<M: TextMeasure + ?Sized>(
        &mut self,
        viewport: Viewport,
        metrics: LayoutMetrics,
        measure: &M,
    ) -> PageLayout {
        let fonts = FontSizes::resolve(
            viewport,
            self.config.manual_question_font,
            self.config.manual_answer_font,
            self.config.manual_ui_font,
        );
        let question = layout_question(
            &self.current.question,
            viewport,
            &metrics,
            fonts.question,
            measure,
        );
        let answers = layout_answers(
            &self.current.options,
            viewport,
            question.height,
            &metrics,
            fonts.answer,
            measure,
        );
        let content_height = total_content_height(&question, &answers, &metrics);

        self.scroll.reclamp(content_height, viewport.height);
        let thumb = if self.config.show_scrollbar {
            self.scroll
                .thumb(content_height, viewport.height, metrics.min_thumb)
        } else {
            None
        };

        PageLayout {
            viewport,
            metrics,
            fonts,
            question,
            answers,
            content_height,
            offset: self.scroll.offset(),
            thumb,
        }
    }

    /// Answer the current question. Returns the verdict, or `None` when not asking.
    pub fn select_answer(&mut self, answer: &str, now: Instant) -> Option<Verdict> {
        match self.feedback.select(answer, &self.current.correct, now) {
            Transition::Evaluated(_) => {
                self.selected = Some(answer.to_string());
                let result = submit(
                    &mut self.store,
                    &self.current.question,
                    answer,
                    &self.current.correct,
                );
                self.note_save(result.save_error);
                Some(result.value)
            }
            _ => None,
        }
    }

    /// Answer by position in the shuffled options. Out of range is ignored.
    pub fn select_option(&mut self, index: usize, now: Instant) -> Option<Verdict> {
        let answer = self.current.options.get(index)?.clone();
        self.select_answer(&answer, now)
    }

    /// A click on the page body: dismisses feedback, or answers the box under the pointer.
    pub fn click(
        &mut self,
        page: &PageLayout,
        x: i32,
        y: i32,
        now: Instant,
    ) -> Result<Option<Verdict>, QuizError> {
        if !self.feedback.is_asking() {
            self.dismiss_feedback()?;
            return Ok(None);
        }
        let Some(answer) = hit_test(&page.answers, page.offset, x, y) else {
            return Ok(None);
        };
        let answer = answer.answer.clone();
        Ok(self.select_answer(&answer, now))
    }

    pub fn dismiss_feedback(&mut self) -> Result<(), QuizError> {
        let transition = self.feedback.dismiss();
        self.apply(transition)
    }

    /// Move on to a new question without recording anything for the current one.
    /// Returns `false` when skipping is disabled.
    pub fn skip(&mut self) -> Result<bool, QuizError> {
        if !self.config.enable_skip_button {
            return Ok(false);
        }
        logger::log(&format!("Skipped {:?}", self.current.question));
        let transition = self.feedback.skip();
        self.apply(transition)?;
        Ok(true)
    }

    /// Switch selection mode and show a question picked under it.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), QuizError> {
        self.mode = mode;
        logger::log(&format!("Mode set to {}", mode.label()));
        self.feedback = Feedback::Asking;
        self.advance()
    }

    /// Poll the correct-answer timer.
    pub fn tick(&mut self, now: Instant) -> Result<(), QuizError> {
        let transition = self.feedback.tick(now, self.config.next_delay);
        self.apply(transition)
    }

    pub fn adjust_font(&mut self, class: FontClass, adjust: FontAdjust) {
        let slot = match class {
            FontClass::Question => &mut self.config.manual_question_font,
            FontClass::Answer => &mut self.config.manual_answer_font,
            FontClass::Ui => &mut self.config.manual_ui_font,
        };
        *slot = adjust_font(class, *slot, adjust);
    }

    /// Positive `delta` moves the content down (toward the top of the page).
    pub fn scroll_by(&mut self, delta: i32, page: &PageLayout) {
        self.scroll
            .scroll_by(delta, page.content_height, page.viewport.height);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.scroll_to_top();
    }

    pub fn scroll_to_bottom(&mut self, page: &PageLayout) {
        self.scroll
            .scroll_to_bottom(page.content_height, page.viewport.height);
    }

    /// Start dragging when the press lands on the thumb.
    pub fn begin_drag(&mut self, page: &PageLayout, x: i32, y: i32) -> bool {
        match (page.thumb, page.thumb_bounds()) {
            (Some(thumb), Some(bounds)) if bounds.contains(x, y) => {
                self.scroll.begin_drag(y, thumb);
                true
            }
            _ => false,
        }
    }

    pub fn drag_to(&mut self, page: &PageLayout, y: i32) {
        if page.thumb.is_none() {
            return;
        }
        self.scroll.drag_to(
            y,
            page.content_height,
            page.viewport.height,
            page.metrics.min_thumb,
        );
    }

    pub fn end_drag(&mut self) {
        self.scroll.end_drag();
    }

    /// Final save of the bank, then the view settings into the config file.
    pub fn shutdown(&mut self) -> Result<(), QuizError> {
        let bank = self.store.save();

        self.config.scroll_offset = self.scroll.offset();
        self.config.drag_scrollbar = self.scroll.is_dragging();
        let config = match &self.config_path {
            Some(path) => self.config.save(path),
            None => Ok(()),
        };

        logger::log("Session closed");
        bank.and(config)
    }

    fn apply(&mut self, transition: Transition) -> Result<(), QuizError> {
        match transition {
            Transition::Advance => self.advance(),
            Transition::Stay | Transition::Evaluated(_) => Ok(()),
        }
    }

    fn advance(&mut self) -> Result<(), QuizError> {
        let picked = pick_next(&mut self.store, self.mode, &mut self.rng)?;
        self.note_save(picked.save_error);
        self.current = picked.value;
        self.selected = None;
        self.feedback = Feedback::Asking;
        Ok(())
    }

    fn note_save(&mut self, error: Option<QuizError>) {
        self.status = error.map(|e| {
            logger::log(&format!("Write-through failed: {}", e));
            e.to_string()
        });
    }
}
