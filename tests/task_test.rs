use listq::Task;

#[test]
fn test_round_trip_into_fresh_task() {
    let mut task = Task::new("resize")
        .with_arg("img1.png")
        .with_arg("42");
    task.set_error_message("disk full");

    let text = task.serialize().unwrap();

    let mut decoded = Task::default();
    assert!(decoded.deserialize(&text));
    assert_eq!(decoded.task_type(), Some("resize"));
    assert_eq!(decoded.args(), ["img1.png", "42"]);
    assert_eq!(decoded.error_message(), "disk full");
    assert_eq!(decoded, task);
}

#[test]
fn test_round_trip_with_unicode_and_quotes() {
    let mut task = Task::new("notify").with_arg("\"quoted\", {braces}").with_arg("ünïcødé");
    task.set_error_message("line one\nline two");

    let decoded = Task::from_json(&task.serialize().unwrap()).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn test_merge_keeps_missing_fields() {
    let mut task = Task::new("resize");
    task.set_error_message("previous failure");

    assert!(task.deserialize(r#"{"Args":["a","b"]}"#));

    assert_eq!(task.task_type(), Some("resize"));
    assert_eq!(task.args(), ["a", "b"]);
    assert_eq!(task.error_message(), "previous failure");
}

#[test]
fn test_merge_overwrites_present_fields() {
    let mut task = Task::new("resize").with_arg("old");

    assert!(task.deserialize(r#"{"Type":"crop","ErrorMessage":"bad input","Extra":1}"#));

    assert_eq!(task.task_type(), Some("crop"));
    assert_eq!(task.args(), ["old"]);
    assert_eq!(task.error_message(), "bad input");
}

#[test]
fn test_deserialize_failure_leaves_task_alone() {
    let mut task = Task::new("resize").with_arg("x");
    let before = task.clone();

    assert!(!task.deserialize("{}"));
    assert!(!task.deserialize("{\"Args\": ["));
    assert_eq!(task, before);
}

#[test]
fn test_args_accessors() {
    let mut task = Task::default();
    assert!(task.args().is_empty());
    assert_eq!(task.arg(0), None);

    task.add_arg("first");
    assert_eq!(task.arg(0), Some("first"));

    task.set_args(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(task.arg(1), Some("b"));
    assert_eq!(task.arg(2), None);
}
