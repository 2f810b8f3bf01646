/// Desktop notifications
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

fn overdue_message(count: usize) -> String {
    if count == 1 {
        "A task is overdue. Get moving!".to_string()
    } else {
        format!("{} tasks are overdue. Get moving!", count)
    }
}

/// Send a notification when tasks become overdue
pub fn notify_overdue(count: usize) {
    let message = overdue_message(count);

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Buddy - Overdue""#,
            message.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!(error = %e, "desktop notification failed");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}
