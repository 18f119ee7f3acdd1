use std::process::{Command, Stdio};

use crate::notify::{DraftOpener, NotificationError, message_body, subject};
use crate::session::summary::SessionSummary;

/// `mailto:` URI with percent-encoded subject and body.
pub fn compose_mailto(summary: &SessionSummary, recipient: &str) -> String {
    format!(
        "mailto:{recipient}?subject={}&body={}",
        urlencoding::encode(&subject(summary)),
        urlencoding::encode(&message_body(summary)),
    )
}

/// Hands the URI to the platform's default handler.
pub struct SystemOpener;

impl DraftOpener for SystemOpener {
    fn open(&self, uri: &str) -> Result<(), NotificationError> {
        let mut cmd = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            Command::new("xdg-open")
        };

        let status = cmd
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| NotificationError::Draft(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(NotificationError::Draft(format!("opener exited with {status}")))
        }
    }
}
