//! Progress indicators for CLI operations
//!
//! A spinner stands in for the "busy" state while a request is in flight.
//! indicatif draws on stderr and hides itself when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for a request in flight
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run `task` with a spinner showing `message`, clearing it afterwards
pub async fn with_spinner<F, T>(message: &str, task: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let spinner = create_spinner(message);
    let output = task.await;
    spinner.finish_and_clear();
    output
}

/// Size as shown next to a selected file, always in megabytes: `(1.50 MB)`
pub fn format_size_mb(bytes: u64) -> String {
    format!("({:.2} MB)", bytes as f64 / (1024.0 * 1024.0))
}
