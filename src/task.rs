use crate::{QueueError, Result};
use serde::{Deserialize, Serialize};

/// A unit of work: a type name, its positional arguments (already encoded
/// as strings) and the error message a worker recorded when it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Task {
    task_type: String,
    args: Vec<String>,
    error_message: String,
}

/// Wire shape written by [`Task::serialize`].
#[derive(Serialize)]
struct TaskRecord<'a> {
    #[serde(rename = "Type")]
    task_type: &'a str,
    #[serde(rename = "Args")]
    args: &'a [String],
    #[serde(rename = "ErrorMessage")]
    error_message: &'a str,
}

/// Wire shape read by [`Task::deserialize`]. Absent (or null) fields leave
/// the current value of the task untouched.
#[derive(Deserialize)]
struct TaskPatch {
    #[serde(rename = "Type")]
    task_type: Option<String>,
    #[serde(rename = "Args")]
    args: Option<Vec<RecordArg>>,
    #[serde(rename = "ErrorMessage")]
    error_message: Option<String>,
}

/// Workers may write numeric arguments as JSON numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordArg {
    Text(String),
    Number(serde_json::Number),
}

impl From<RecordArg> for String {
    fn from(arg: RecordArg) -> Self {
        match arg {
            RecordArg::Text(text) => text,
            RecordArg::Number(number) => number.to_string(),
        }
    }
}

impl Task {
    pub fn new(task_type: impl Into<String>) -> Self {
        Self {
            task_type: task_type.into(),
            ..Default::default()
        }
    }

    /// Parses a record into a fresh task.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut task = Self::default();
        task.merge_json(text)?;
        Ok(task)
    }

    pub fn with_arg(mut self, value: impl Into<String>) -> Self {
        self.add_arg(value);
        self
    }

    pub fn set_type(&mut self, task_type: impl Into<String>) {
        self.task_type = task_type.into();
    }

    /// Returns `None` while the type is unset or empty.
    pub fn task_type(&self) -> Option<&str> {
        if self.task_type.is_empty() {
            None
        } else {
            Some(&self.task_type)
        }
    }

    pub fn set_args(&mut self, args: Vec<String>) {
        self.args = args;
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn add_arg(&mut self, value: impl Into<String>) {
        self.args.push(value.into());
    }

    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.error_message = message.into();
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Encodes the full record as `{"Type":..,"Args":[..],"ErrorMessage":..}`.
    pub fn serialize(&self) -> Result<String> {
        let record = TaskRecord {
            task_type: &self.task_type,
            args: &self.args,
            error_message: &self.error_message,
        };

        serde_json::to_string(&record).map_err(|e| QueueError::SerializationError(e.to_string()))
    }

    /// Merges a serialized record over the current fields.
    ///
    /// Returns `false` when the text is not JSON, is not an object, is an
    /// empty object, or carries a field of the wrong kind. On `false` the
    /// task is left unchanged.
    pub fn deserialize(&mut self, text: &str) -> bool {
        self.merge_json(text).is_ok()
    }

    pub(crate) fn merge_json(&mut self, text: &str) -> Result<()> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| QueueError::DeserializationError(e.to_string()))?;

        match value.as_object() {
            Some(fields) if !fields.is_empty() => {}
            _ => {
                return Err(QueueError::DeserializationError(format!(
                    "expected a non-empty task record, got: {}",
                    text
                )));
            }
        }

        let patch: TaskPatch = serde_json::from_value(value)
            .map_err(|e| QueueError::DeserializationError(e.to_string()))?;

        if let Some(task_type) = patch.task_type {
            self.task_type = task_type;
        }
        if let Some(args) = patch.args {
            self.args = args.into_iter().map(String::from).collect();
        }
        if let Some(error_message) = patch.error_message {
            self.error_message = error_message;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_empty() {
        let task = Task::default();
        assert_eq!(task.task_type(), None);
        assert!(task.args().is_empty());
        assert_eq!(task.arg(0), None);
        assert_eq!(task.error_message(), "");
    }

    #[test]
    fn empty_type_reads_as_absent() {
        let mut task = Task::new("resize");
        assert_eq!(task.task_type(), Some("resize"));

        task.set_type("");
        assert_eq!(task.task_type(), None);
    }

    #[test]
    fn arg_lookup_is_positional() {
        let task = Task::new("resize").with_arg("a").with_arg("b");
        assert_eq!(task.arg(0), Some("a"));
        assert_eq!(task.arg(1), Some("b"));
        assert_eq!(task.arg(2), None);
    }

    #[test]
    fn serialize_keeps_field_order() {
        let mut task = Task::new("resize").with_arg("img1.png");
        task.set_error_message("disk full");

        assert_eq!(
            task.serialize().unwrap(),
            r#"{"Type":"resize","Args":["img1.png"],"ErrorMessage":"disk full"}"#
        );
    }

    #[test]
    fn rejects_non_records() {
        let mut task = Task::new("resize").with_arg("x");
        for text in ["", "not json", "{}", "[]", "null", "0", "[1,2]", r#""str""#] {
            assert!(!task.deserialize(text), "accepted {:?}", text);
        }
        assert_eq!(task, Task::new("resize").with_arg("x"));
    }

    #[test]
    fn rejects_mistyped_fields_without_partial_update() {
        let mut task = Task::new("resize");
        task.set_error_message("old");

        assert!(!task.deserialize(r#"{"ErrorMessage":"new","Args":"nope"}"#));
        assert_eq!(task.error_message(), "old");
    }

    #[test]
    fn numeric_args_become_strings() {
        let mut task = Task::default();
        assert!(task.deserialize(r#"{"Args":[1,"two",-3,4.5]}"#));
        assert_eq!(task.args(), ["1", "two", "-3", "4.5"]);
    }

    #[test]
    fn rejects_non_scalar_args() {
        let mut task = Task::new("resize").with_arg("x");
        for text in [r#"{"Args":[true]}"#, r#"{"Args":[null]}"#, r#"{"Args":[{"a":1}]}"#] {
            assert!(!task.deserialize(text), "accepted {}", text);
        }
        assert_eq!(task.args(), ["x"]);
    }

    #[test]
    fn null_fields_keep_current_values() {
        let mut task = Task::new("resize").with_arg("x");
        assert!(task.deserialize(r#"{"Args":null,"ErrorMessage":"oops"}"#));
        assert_eq!(task.args(), ["x"]);
        assert_eq!(task.error_message(), "oops");
    }
}
