use crate::error::QuizError;
use crate::models::{Mode, Question, QuestionBank, Stats};
use crate::store::{Persisted, QuestionStore};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub question: String,
    /// Correct and wrong answers in a uniformly random order.
    pub options: Vec<String>,
    pub correct: Vec<String>,
}

/// Practice-mode weight: `wrong / right`, with zero counts treated as one.
pub fn practice_weight(stats: &Stats) -> f64 {
    stats.wrong.max(1) as f64 / stats.right.max(1) as f64
}

/// Pick a question key without touching stats.
pub fn choose_question<'a, R: Rng + ?Sized>(
    bank: &'a QuestionBank,
    mode: Mode,
    rng: &mut R,
) -> Result<&'a str, QuizError> {
    let keys: Vec<&String> = bank.keys().collect();
    if keys.is_empty() {
        return Err(QuizError::EmptyBank);
    }

    let picked = match mode {
        Mode::Arcade => keys.choose(rng).copied(),
        Mode::Practice => {
            let weights = bank.values().map(|q| practice_weight(&q.stats));
            match WeightedIndex::new(weights) {
                Ok(dist) => Some(keys[dist.sample(rng)]),
                // Every weight is positive and finite, so this only guards float edge cases.
                Err(_) => keys.choose(rng).copied(),
            }
        }
    };

    picked.map(String::as_str).ok_or(QuizError::EmptyBank)
}

/// Correct and wrong answers concatenated, then shuffled.
pub fn shuffled_options<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Vec<String> {
    let mut options: Vec<String> = question
        .correct
        .iter()
        .chain(question.wrong.iter())
        .cloned()
        .collect();
    options.shuffle(rng);
    options
}

/// Choose the next question, count its presentation, and shuffle its answers.
///
/// # Errors
/// Returns [`QuizError::EmptyBank`] when the bank has no questions. A failed
/// save is reported through [`Persisted::save_error`] instead, so the question
/// can still be answered.
pub fn pick_next<R: Rng + ?Sized>(
    store: &mut QuestionStore,
    mode: Mode,
    rng: &mut R,
) -> Result<Persisted<Selection>, QuizError> {
    let key = choose_question(store.bank(), mode, rng)?.to_string();
    let saved = store.record_presentation(&key);

    let question = store.question(&key).ok_or(QuizError::EmptyBank)?;
    let selection = Selection {
        options: shuffled_options(question, rng),
        correct: question.correct.clone(),
        question: key,
    };

    Ok(Persisted::new(selection, saved))
}
