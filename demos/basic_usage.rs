use listq::{Arg, ClientConfig, QueueClient, Task, args};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ResizeOptions {
    width: u32,
    height: u32,
    formats: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // LISTQ_ADDRESS, LISTQ_PORT, LISTQ_PREFIX, LISTQ_TIMEOUT_SECS
    let config = ClientConfig::from_env()?;
    let mut client = QueueClient::new(config);

    // Add some tasks
    for i in 0..5 {
        let queued = client.enqueue(
            "send_email",
            args![format!("user{}@example.com", i), "Welcome"],
        );
        println!("Queued email task {}: {}", i, queued);
    }

    // Structured arguments travel base64-encoded
    let options = ResizeOptions {
        width: 800,
        height: 600,
        formats: vec!["png".to_string(), "webp".to_string()],
    };
    let queued = client.enqueue("resize", [Arg::from("img1.png"), Arg::structured(&options)]);
    println!("Queued resize task: {}", queued);

    // Or build the task first
    let task = Task::new("resize").with_arg("img2.png").with_arg("42");
    println!("Queued task object: {}", client.enqueue_task(&task));

    // Re-submit whatever the workers gave up on
    while let Some(failed) = client.dequeue_failed("resize") {
        println!(
            "Re-queueing {:?} (failed with: {})",
            failed.args(),
            failed.error_message()
        );
        client.enqueue_task(&failed);
    }

    println!("Connection state: {:?}", client.connection_state());

    Ok(())
}
