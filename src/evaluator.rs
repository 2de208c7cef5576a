use crate::models::Verdict;
use crate::store::{Persisted, QuestionStore};

/// Exact membership test. No trimming or case folding.
pub fn evaluate(chosen: &str, correct: &[String]) -> Verdict {
    if correct.iter().any(|answer| answer == chosen) {
        Verdict::Correct
    } else {
        Verdict::Wrong
    }
}

/// Evaluate `chosen` and record the outcome against `question`.
pub fn submit(
    store: &mut QuestionStore,
    question: &str,
    chosen: &str,
    correct: &[String],
) -> Persisted<Verdict> {
    let verdict = evaluate(chosen, correct);
    let saved = store.record_answer(question, verdict == Verdict::Correct);
    Persisted::new(verdict, saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuestionBank};

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_is_correct() {
        assert_eq!(evaluate("4", &answers(&["4"])), Verdict::Correct);
        assert_eq!(evaluate("b", &answers(&["a", "b"])), Verdict::Correct);
    }

    #[test]
    fn test_no_normalization() {
        let correct = answers(&["Paris"]);
        assert_eq!(evaluate("paris", &correct), Verdict::Wrong);
        assert_eq!(evaluate("Paris ", &correct), Verdict::Wrong);
        assert_eq!(evaluate("", &correct), Verdict::Wrong);
    }

    #[test]
    fn test_submit_records_stats() {
        let mut bank = QuestionBank::new();
        bank.insert("2+2=?".to_string(), Question::new(&["4"], &["3", "5"]));
        let mut store = QuestionStore::in_memory(bank);
        let correct = answers(&["4"]);

        let result = submit(&mut store, "2+2=?", "3", &correct);
        assert_eq!(result.value, Verdict::Wrong);
        assert!(result.save_error.is_none());

        submit(&mut store, "2+2=?", "4", &correct);
        let stats = store.question("2+2=?").unwrap().stats;
        assert_eq!((stats.right, stats.wrong, stats.times_seen), (1, 1, 0));
    }
}
