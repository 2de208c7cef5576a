//! Asking / correct / wrong feedback cycle.
//!
//! Every method returns a [`Transition`] telling the caller what to do next:
//! record a verdict, fetch the next question, or nothing. Time is passed in,
//! so the loop polls the correct-answer timer once per tick.

use crate::evaluator::evaluate;
use crate::models::Verdict;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Feedback {
    #[default]
    Asking,
    ShowingCorrect { since: Instant },
    /// Stays up until dismissed.
    ShowingWrong { chosen: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// An answer was judged; the caller records it.
    Evaluated(Verdict),
    /// The caller picks the next question.
    Advance,
}

impl Feedback {
    pub fn is_asking(&self) -> bool {
        matches!(self, Feedback::Asking)
    }

    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Feedback::Asking => None,
            Feedback::ShowingCorrect { .. } => Some(Verdict::Correct),
            Feedback::ShowingWrong { .. } => Some(Verdict::Wrong),
        }
    }

    /// Answer the current question. Ignored unless asking.
    pub fn select(&mut self, chosen: &str, correct: &[String], now: Instant) -> Transition {
        if !self.is_asking() {
            return Transition::Stay;
        }
        let verdict = evaluate(chosen, correct);
        *self = match verdict {
            Verdict::Correct => Feedback::ShowingCorrect { since: now },
            Verdict::Wrong => Feedback::ShowingWrong {
                chosen: chosen.to_string(),
            },
        };
        Transition::Evaluated(verdict)
    }

    /// Leave the correct screen once `delay` has passed.
    pub fn tick(&mut self, now: Instant, delay: Duration) -> Transition {
        if let Feedback::ShowingCorrect { since } = *self
            && now.saturating_duration_since(since) >= delay
        {
            *self = Feedback::Asking;
            return Transition::Advance;
        }
        Transition::Stay
    }

    /// A click while feedback is showing moves on to the next question.
    pub fn dismiss(&mut self) -> Transition {
        if self.is_asking() {
            return Transition::Stay;
        }
        *self = Feedback::Asking;
        Transition::Advance
    }

    /// Skip never records a verdict.
    pub fn skip(&mut self) -> Transition {
        *self = Feedback::Asking;
        Transition::Advance
    }
}
