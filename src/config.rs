//! Flat key/value settings read at startup and rewritten on shutdown.
//!
//! Each key is validated on its own: a missing file, invalid JSON, or a bad
//! value for one key falls back to that key's default and is logged. Keys
//! this program does not know are kept and written back untouched.

use crate::error::QuizError;
use crate::file_io::{to_pretty_json, write_atomic};
use crate::logger;
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

const SHOW_SCROLLBAR: &str = "SHOW_SCROLLBAR";
const ENABLE_SKIP_BUTTON: &str = "ENABLE_SKIP_BUTTON";
const NEXT_DELAY: &str = "NEXT_DELAY";
const SCROLL_OFFSET: &str = "SCROLL_OFFSET";
const DRAG_SCROLLBAR: &str = "DRAG_SCROLLBAR";
const MANUAL_QUESTION_FONT: &str = "MANUAL_QUESTION_FONT";
const MANUAL_ANSWER_FONT: &str = "MANUAL_ANSWER_FONT";
const MANUAL_UI_FONT: &str = "MANUAL_UI_FONT";
const SHOW_STATS_INFO: &str = "SHOW_STATS_INFO";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Default `true`.
    pub show_scrollbar: bool,
    /// Default `true`.
    pub enable_skip_button: bool,
    /// How long the correct screen stays up. Default 2 seconds.
    pub next_delay: Duration,
    /// Default `None`: size follows the viewport.
    pub manual_question_font: Option<u16>,
    pub manual_answer_font: Option<u16>,
    pub manual_ui_font: Option<u16>,
    /// Last scroll offset, restored at startup. Default 0.
    pub scroll_offset: i32,
    /// Whether the scrollbar was being dragged at shutdown. Default `false`.
    pub drag_scrollbar: bool,
    /// Show the right/wrong/seen line. Default `true`.
    pub show_stats_info: bool,
    pub(crate) extra: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_scrollbar: true,
            enable_skip_button: true,
            next_delay: Duration::from_secs(2),
            manual_question_font: None,
            manual_answer_font: None,
            manual_ui_font: None,
            scroll_offset: 0,
            drag_scrollbar: false,
            show_stats_info: true,
            extra: Map::new(),
        }
    }
}

fn malformed(key: &str, reason: impl Into<String>) -> QuizError {
    QuizError::ConfigMalformed {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn parse_bool(key: &str, value: &Value) -> Result<bool, QuizError> {
    value.as_bool().ok_or_else(|| malformed(key, "expected true or false"))
}

fn parse_delay(key: &str, value: &Value) -> Result<Duration, QuizError> {
    let secs = value
        .as_f64()
        .ok_or_else(|| malformed(key, "expected a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| malformed(key, e.to_string()))
}

fn parse_font(key: &str, value: &Value) -> Result<Option<u16>, QuizError> {
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_u64()
        .and_then(|size| u16::try_from(size).ok())
        .filter(|size| *size > 0)
        .map(Some)
        .ok_or_else(|| malformed(key, "expected a positive font size or null"))
}

fn parse_offset(key: &str, value: &Value) -> Result<i32, QuizError> {
    value
        .as_i64()
        .and_then(|offset| i32::try_from(offset).ok())
        .ok_or_else(|| malformed(key, "expected an integer"))
}

impl Config {
    /// Parse settings, collecting a [`QuizError::ConfigMalformed`] for every
    /// key that had to fall back to its default.
    pub fn from_json_str(text: &str) -> (Self, Vec<QuizError>) {
        let mut config = Config::default();
        let mut problems = Vec::new();

        let map = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                problems.push(malformed("<root>", "expected a JSON object"));
                return (config, problems);
            }
            Err(e) => {
                problems.push(malformed("<root>", e.to_string()));
                return (config, problems);
            }
        };

        for (key, value) in map {
            let applied = match key.as_str() {
                SHOW_SCROLLBAR => parse_bool(&key, &value).map(|v| config.show_scrollbar = v),
                ENABLE_SKIP_BUTTON => {
                    parse_bool(&key, &value).map(|v| config.enable_skip_button = v)
                }
                NEXT_DELAY => parse_delay(&key, &value).map(|v| config.next_delay = v),
                SCROLL_OFFSET => parse_offset(&key, &value).map(|v| config.scroll_offset = v),
                DRAG_SCROLLBAR => parse_bool(&key, &value).map(|v| config.drag_scrollbar = v),
                MANUAL_QUESTION_FONT => {
                    parse_font(&key, &value).map(|v| config.manual_question_font = v)
                }
                MANUAL_ANSWER_FONT => {
                    parse_font(&key, &value).map(|v| config.manual_answer_font = v)
                }
                MANUAL_UI_FONT => parse_font(&key, &value).map(|v| config.manual_ui_font = v),
                SHOW_STATS_INFO => parse_bool(&key, &value).map(|v| config.show_stats_info = v),
                _ => {
                    config.extra.insert(key.clone(), value);
                    Ok(())
                }
            };
            if let Err(e) = applied {
                problems.push(e);
            }
        }

        (config, problems)
    }

    /// Read `path`. Never fails: anything unusable is logged and defaulted.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                logger::log(&format!(
                    "Config {} not readable ({}), using defaults",
                    path.display(),
                    e
                ));
                return Config::default();
            }
        };

        let (config, problems) = Config::from_json_str(&text);
        for problem in problems {
            logger::log(&format!("{}; using default", problem));
        }
        config
    }

    pub fn to_json(&self) -> Value {
        let mut map = self.extra.clone();
        let font = |size: Option<u16>| size.map_or(Value::Null, Value::from);

        map.insert(SHOW_SCROLLBAR.into(), self.show_scrollbar.into());
        map.insert(ENABLE_SKIP_BUTTON.into(), self.enable_skip_button.into());
        map.insert(NEXT_DELAY.into(), self.next_delay.as_secs_f64().into());
        map.insert(SCROLL_OFFSET.into(), self.scroll_offset.into());
        map.insert(DRAG_SCROLLBAR.into(), self.drag_scrollbar.into());
        map.insert(MANUAL_QUESTION_FONT.into(), font(self.manual_question_font));
        map.insert(MANUAL_ANSWER_FONT.into(), font(self.manual_answer_font));
        map.insert(MANUAL_UI_FONT.into(), font(self.manual_ui_font));
        map.insert(SHOW_STATS_INFO.into(), self.show_stats_info.into());
        Value::Object(map)
    }

    pub fn save(&self, path: &Path) -> Result<(), QuizError> {
        let bytes = to_pretty_json(&self.to_json()).map_err(|e| QuizError::Persist {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        write_atomic(path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.show_scrollbar);
        assert!(config.enable_skip_button);
        assert_eq!(config.next_delay, Duration::from_secs(2));
        assert_eq!(config.manual_question_font, None);
        assert_eq!(config.scroll_offset, 0);
        assert!(!config.drag_scrollbar);
        assert!(config.show_stats_info);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let (config, problems) =
            Config::from_json_str(r#"{"NEXT_DELAY": 0.5, "MANUAL_ANSWER_FONT": 22}"#);
        assert!(problems.is_empty());
        assert_eq!(config.next_delay, Duration::from_millis(500));
        assert_eq!(config.manual_answer_font, Some(22));
        assert!(config.show_scrollbar);
    }

    #[test]
    fn test_bad_keys_fall_back_individually() {
        let (config, problems) = Config::from_json_str(
            r#"{
                "SHOW_SCROLLBAR": "yes",
                "NEXT_DELAY": -3,
                "MANUAL_QUESTION_FONT": "big",
                "SCROLL_OFFSET": -120,
                "ENABLE_SKIP_BUTTON": false
            }"#,
        );
        assert_eq!(problems.len(), 3);
        assert!(
            problems
                .iter()
                .all(|p| matches!(p, QuizError::ConfigMalformed { .. }))
        );
        assert!(config.show_scrollbar);
        assert_eq!(config.next_delay, Duration::from_secs(2));
        assert_eq!(config.manual_question_font, None);
        assert_eq!(config.scroll_offset, -120);
        assert!(!config.enable_skip_button);
    }

    #[test]
    fn test_invalid_json_uses_defaults() {
        let (config, problems) = Config::from_json_str("not json");
        assert_eq!(config, Config::default());
        assert_eq!(problems.len(), 1);

        let (config, problems) = Config::from_json_str("[1, 2]");
        assert_eq!(config, Config::default());
        assert_eq!(problems.len(), 1);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(&dir.path().join("config.json")), Config::default());
    }

    #[test]
    fn test_null_font_clears_override() {
        let (config, problems) = Config::from_json_str(r#"{"MANUAL_UI_FONT": null}"#);
        assert!(problems.is_empty());
        assert_eq!(config.manual_ui_font, None);
    }

    #[test]
    fn test_save_and_reload_keeps_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"THEME": "dark", "NEXT_DELAY": 3}"#).unwrap();

        let mut config = Config::load(&path);
        config.scroll_offset = -40;
        config.manual_question_font = Some(26);
        config.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["THEME"], "dark");
        assert_eq!(value["MANUAL_ANSWER_FONT"], Value::Null);

        let reloaded = Config::load(&path);
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.next_delay, Duration::from_secs(3));
    }
}
