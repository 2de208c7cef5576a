use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Per-question performance counters. Missing fields load as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub right: u64,
    #[serde(default)]
    pub wrong: u64,
    #[serde(default)]
    pub times_seen: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub correct: Vec<String>,
    #[serde(default)]
    pub wrong: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: Stats,
    /// Keys written by other tools, carried through saves unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Question {
    pub fn new(correct: &[&str], wrong: &[&str]) -> Self {
        Self {
            correct: correct.iter().map(|s| s.to_string()).collect(),
            wrong: wrong.iter().map(|s| s.to_string()).collect(),
            stats: Stats::default(),
            extra: Map::new(),
        }
    }

    /// A question without wrong answers still works, it just makes a poor quiz item.
    pub fn is_degenerate(&self) -> bool {
        self.wrong.is_empty()
    }
}

fn null_as_default<'de, D>(deserializer: D) -> Result<Stats, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Stats>::deserialize(deserializer)?.unwrap_or_default())
}

/// Question text to question. Key order carries no meaning.
pub type QuestionBank = BTreeMap<String, Question>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Mode {
    /// Uniform random selection.
    Arcade,
    /// Selection weighted toward questions answered wrong more often than right.
    Practice,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Arcade => "Arcade",
            Mode::Practice => "Practice",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}
