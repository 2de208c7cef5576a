use crate::error::QuizError;
use crate::file_io::{to_pretty_json, write_atomic};
use crate::logger;
use crate::models::{Question, QuestionBank};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BANK_FILE: &str = "Questions.json";

/// Result of a mutation whose write-through save may have failed.
/// The in-memory change is applied either way.
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub save_error: Option<QuizError>,
}

impl<T> Persisted<T> {
    pub(crate) fn new(value: T, saved: Result<(), QuizError>) -> Self {
        Self {
            value,
            save_error: saved.err(),
        }
    }
}

/// Owns the question bank and writes it back after every mutation.
#[derive(Debug)]
pub struct QuestionStore {
    path: Option<PathBuf>,
    bank: QuestionBank,
}

impl QuestionStore {
    /// Read the snapshot at `path`. Missing stats are filled with zero.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, QuizError> {
        let path = path.into();
        let unavailable = |reason: String| QuizError::StoreUnavailable {
            path: path.clone(),
            reason,
        };

        let text = fs::read_to_string(&path).map_err(|e| unavailable(e.to_string()))?;
        let bank = parse_bank(&text).map_err(unavailable)?;

        logger::log(&format!(
            "Loaded {} questions from {}",
            bank.len(),
            path.display()
        ));

        Ok(Self {
            path: Some(path),
            bank,
        })
    }

    /// A store backed by `path` that starts from `bank` instead of reading the file.
    pub fn with_bank(path: impl Into<PathBuf>, bank: QuestionBank) -> Self {
        Self {
            path: Some(path.into()),
            bank,
        }
    }

    /// A store that never touches the disk.
    pub fn in_memory(bank: QuestionBank) -> Self {
        Self { path: None, bank }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn question(&self, text: &str) -> Option<&Question> {
        self.bank.get(text)
    }

    pub fn len(&self) -> usize {
        self.bank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }

    /// Rewrite the whole snapshot.
    pub fn save(&self) -> Result<(), QuizError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = to_pretty_json(&self.bank).map_err(|e| QuizError::Persist {
            path: path.clone(),
            source: e.into(),
        })?;
        write_atomic(path, &bytes)
    }

    /// Count one more presentation of `question` and save.
    pub fn record_presentation(&mut self, question: &str) -> Result<(), QuizError> {
        match self.bank.get_mut(question) {
            Some(q) => q.stats.times_seen += 1,
            None => return Ok(()),
        }
        self.save_logged()
    }

    /// Count a right or wrong answer for `question` and save.
    pub fn record_answer(&mut self, question: &str, was_correct: bool) -> Result<(), QuizError> {
        match self.bank.get_mut(question) {
            Some(q) if was_correct => q.stats.right += 1,
            Some(q) => q.stats.wrong += 1,
            None => return Ok(()),
        }
        self.save_logged()
    }

    fn save_logged(&self) -> Result<(), QuizError> {
        let result = self.save();
        if let Err(e) = &result {
            logger::log(&format!("Save failed: {}", e));
        }
        result
    }
}

fn parse_bank(text: &str) -> Result<QuestionBank, String> {
    let bank: QuestionBank = serde_json::from_str(text).map_err(|e| e.to_string())?;

    for (text, question) in &bank {
        if question.correct.is_empty() {
            return Err(format!("question {:?} has no correct answer", text));
        }
        if question.is_degenerate() {
            logger::log(&format!("Question {:?} has no wrong answers", text));
        }
    }

    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SAMPLE: &str = r#"{
        "2+2=?": {"correct": ["4"], "wrong": ["3", "5"]},
        "Capital of France?": {"correct": ["Paris"], "wrong": ["Lyon"], "stats": {"right": 2, "wrong": 1, "times_seen": 4}}
    }"#;

    fn write_sample(dir: &Path) -> PathBuf {
        let path = dir.join("Questions.json");
        fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_write_through_keeps_extra_question_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Questions.json");
        fs::write(
            &path,
            r#"{"2+2=?": {"correct": ["4"], "wrong": ["3"], "source": "worksheet 1"}}"#,
        )
        .unwrap();

        let mut store = QuestionStore::load(&path).unwrap();
        store.record_answer("2+2=?", true).unwrap();

        let reloaded = QuestionStore::load(&path).unwrap();
        let q = reloaded.question("2+2=?").unwrap();
        assert_eq!(q.stats.right, 1);
        assert_eq!(q.extra["source"], "worksheet 1");
    }

    #[test]
    fn test_load_fills_missing_stats() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuestionStore::load(write_sample(dir.path())).unwrap();

        assert_eq!(store.len(), 2);
        let q = store.question("2+2=?").unwrap();
        assert_eq!(q.stats.right, 0);
        assert_eq!(q.stats.wrong, 0);
        assert_eq!(q.stats.times_seen, 0);
        assert_eq!(store.question("Capital of France?").unwrap().stats.times_seen, 4);
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = QuestionStore::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, QuizError::StoreUnavailable { .. }));
    }

    #[test]
    fn test_load_corrupt_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Questions.json");
        fs::write(&path, "{ not json").unwrap();
        let err = QuestionStore::load(&path).unwrap_err();
        assert!(matches!(err, QuizError::StoreUnavailable { .. }));
    }

    #[test]
    fn test_load_question_without_correct_answer_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Questions.json");
        fs::write(&path, r#"{"Q": {"correct": [], "wrong": ["x"]}}"#).unwrap();
        assert!(QuestionStore::load(&path).is_err());
    }

    #[test]
    fn test_load_empty_bank_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Questions.json");
        fs::write(&path, "{}").unwrap();
        let store = QuestionStore::load(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path());
        let mut store = QuestionStore::load(&path).unwrap();

        store.record_presentation("2+2=?").unwrap();
        store.record_answer("2+2=?", false).unwrap();
        store.record_answer("Capital of France?", true).unwrap();

        let reloaded = QuestionStore::load(&path).unwrap();
        assert_eq!(reloaded.bank(), store.bank());
        let q = reloaded.question("2+2=?").unwrap();
        assert_eq!((q.stats.right, q.stats.wrong, q.stats.times_seen), (0, 1, 1));
        assert_eq!(reloaded.question("Capital of France?").unwrap().stats.right, 3);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path());
        let mut store = QuestionStore::load(&path).unwrap();
        for _ in 0..5 {
            store.record_presentation("2+2=?").unwrap();
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unknown_question_is_ignored() {
        let mut store = QuestionStore::in_memory(QuestionBank::new());
        store.record_presentation("missing").unwrap();
        store.record_answer("missing", true).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_save_keeps_in_memory_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut bank = QuestionBank::new();
        bank.insert("Q".to_string(), Question::new(&["a"], &["b"]));
        let mut store = QuestionStore::with_bank(dir.path().join("gone").join("bank.json"), bank);

        let err = store.record_answer("Q", true).unwrap_err();
        assert!(matches!(err, QuizError::Persist { .. }));
        assert_eq!(store.question("Q").unwrap().stats.right, 1);
    }
}
