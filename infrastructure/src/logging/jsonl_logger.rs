//! Append-only JSONL activity log.
//!
//! One line per event: `type`, an RFC 3339 `timestamp`, then the payload
//! fields. A payload that is not a JSON object is stored under `data`.
//! Every line goes out in a single append write, so concurrent invocations
//! sharing a log never interleave within a line.

use exambank_application::ports::activity_logger::{ActivityEvent, ActivityLogger};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;

#[derive(Serialize)]
struct ActivityLine<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    timestamp: String,
    #[serde(flatten)]
    body: LineBody<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum LineBody<'a> {
    Fields(&'a Map<String, Value>),
    Data { data: &'a Value },
}

impl<'a> ActivityLine<'a> {
    fn new(event: &'a ActivityEvent) -> Self {
        let body = match &event.payload {
            Value::Object(fields) => LineBody::Fields(fields),
            other => LineBody::Data { data: other },
        };
        Self {
            event_type: event.event_type,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            body,
        }
    }
}

/// Activity log appending to a JSONL file shared across invocations.
pub struct JsonlActivityLogger {
    file: Mutex<File>,
}

impl JsonlActivityLogger {
    /// Open `path` for appending, creating it and its parent directory.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ActivityLogger for JsonlActivityLogger {
    fn log(&self, event: ActivityEvent) {
        let mut line = match serde_json::to_vec(&ActivityLine::new(&event)) {
            Ok(line) => line,
            Err(e) => {
                warn!("Dropping '{}' activity event: {}", event.event_type, e);
                return;
            }
        };
        line.push(b'\n');

        let Ok(mut file) = self.file.lock() else {
            return;
        };
        if let Err(e) = file.write_all(&line) {
            warn!("Could not write '{}' activity event: {}", event.event_type, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.jsonl");
        let logger = JsonlActivityLogger::open(&path).unwrap();

        logger.log(ActivityEvent::new(
            "exam_generated",
            serde_json::json!({ "id": "exam_1", "questionCount": 7 }),
        ));
        logger.log(ActivityEvent::new(
            "subject_deleted",
            serde_json::json!({ "id": "subj_1" }),
        ));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "exam_generated");
        assert_eq!(lines[0]["questionCount"], 7);
        assert!(lines[0]["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(lines[1]["type"], "subject_deleted");
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("activity.jsonl");

        for id in ["a", "b"] {
            let logger = JsonlActivityLogger::open(&path).unwrap();
            logger.log(ActivityEvent::new(
                "question_saved",
                serde_json::json!({ "id": id }),
            ));
        }

        let ids: Vec<_> = read_lines(&path)
            .iter()
            .map(|v| v["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_wraps_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.jsonl");
        let logger = JsonlActivityLogger::open(&path).unwrap();
        logger.log(ActivityEvent::new("note", serde_json::json!("plain")));

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "plain");
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        assert!(JsonlActivityLogger::open(blocker.join("activity.jsonl")).is_err());
    }
}
