pub mod draft;
pub mod relay;

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::session::summary::SessionSummary;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Syntax check only: `local@domain.tld`, no whitespace, one `@`.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}

/// Relay credentials. Delivery goes through the relay only when all three are set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl RelayConfig {
    pub fn is_enabled(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("올바르지 않은 이메일 주소: {0}")]
    InvalidAddress(String),
    #[error("mail relay is not configured")]
    NotConfigured,
    #[error("network support is disabled in this build")]
    NetworkDisabled,
    #[error("relay request failed: {0}")]
    Request(String),
    #[error("relay returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("could not open mail draft: {0}")]
    Draft(String),
}

/// Outcome of one delivery attempt. Errors are carried, never raised.
#[derive(Debug)]
pub enum DeliveryStatus {
    Delivered { recipient: String },
    DraftOpened { uri: String },
    Failed(NotificationError),
}

impl DeliveryStatus {
    pub fn message(&self) -> String {
        match self {
            DeliveryStatus::Delivered { recipient } => format!("결과를 {recipient}(으)로 보냈어요."),
            DeliveryStatus::DraftOpened { .. } => "메일 작성 창을 열었어요.".to_string(),
            DeliveryStatus::Failed(err) => format!("전송 실패: {err}"),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DeliveryStatus::Failed(_))
    }
}

pub trait MailRelay {
    fn send(&self, summary: &SessionSummary, recipient: &str) -> Result<(), NotificationError>;
}

pub trait DraftOpener {
    fn open(&self, uri: &str) -> Result<(), NotificationError>;
}

/// Sends a finished quiz's summary by relay, or opens a local mail draft when
/// no relay is configured.
pub struct Notifier {
    relay: Option<Box<dyn MailRelay + Send>>,
    drafts: Box<dyn DraftOpener + Send>,
}

impl Notifier {
    pub fn new(
        relay: Option<Box<dyn MailRelay + Send>>,
        drafts: Box<dyn DraftOpener + Send>,
    ) -> Self {
        Self { relay, drafts }
    }

    pub fn from_config(config: &Config) -> Self {
        let relay: Option<Box<dyn MailRelay + Send>> = if config.relay.is_enabled() {
            Some(Box::new(relay::HttpRelay::new(
                config.relay.clone(),
                &config.relay_endpoint,
                Duration::from_secs(config.relay_timeout_secs),
            )))
        } else {
            None
        };
        Self::new(relay, Box::new(draft::SystemOpener))
    }

    pub fn has_relay(&self) -> bool {
        self.relay.is_some()
    }

    pub fn deliver(&self, summary: &SessionSummary, recipient: &str) -> DeliveryStatus {
        let recipient = recipient.trim();
        if !is_valid_email(recipient) {
            return DeliveryStatus::Failed(NotificationError::InvalidAddress(recipient.to_string()));
        }

        let status = match &self.relay {
            Some(relay) => match relay.send(summary, recipient) {
                Ok(()) => DeliveryStatus::Delivered {
                    recipient: recipient.to_string(),
                },
                Err(err) => DeliveryStatus::Failed(err),
            },
            None => {
                let uri = draft::compose_mailto(summary, recipient);
                match self.drafts.open(&uri) {
                    Ok(()) => DeliveryStatus::DraftOpened { uri },
                    Err(err) => DeliveryStatus::Failed(err),
                }
            }
        };

        match &status {
            DeliveryStatus::Failed(err) => warn!(error = %err, "result delivery failed"),
            DeliveryStatus::Delivered { .. } => info!("result delivered by relay"),
            DeliveryStatus::DraftOpened { .. } => info!("result handed to mail draft"),
        }
        status
    }
}

/// Plain-text body shared by the relay template and the mail draft.
pub fn message_body(summary: &SessionSummary) -> String {
    let name = if summary.participant_name.is_empty() {
        "-"
    } else {
        summary.participant_name.as_str()
    };
    format!(
        "이름: {name}\n단어 세트: {set}\n방향: {direction}\n점수: {score}\n{message}\n일시: {at}",
        set = summary.word_set,
        direction = summary.direction.label(),
        score = summary.score_line(),
        message = summary.rating_message(),
        at = summary.finished_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

pub fn subject(summary: &SessionSummary) -> String {
    format!("단어 퀴즈 결과: {}", summary.score_line())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::session::Direction;

    fn summary() -> SessionSummary {
        SessionSummary::new(7, 10, "지우", Direction::SourceToTarget, "basic")
    }

    struct FakeRelay {
        fail: bool,
        sent: Arc<Mutex<Vec<String>>>,
    }

    impl MailRelay for FakeRelay {
        fn send(&self, _summary: &SessionSummary, recipient: &str) -> Result<(), NotificationError> {
            if self.fail {
                return Err(NotificationError::HttpStatus {
                    status: 400,
                    body: "bad template".to_string(),
                });
            }
            self.sent.lock().unwrap().push(recipient.to_string());
            Ok(())
        }
    }

    struct FakeOpener {
        fail: bool,
        opened: Arc<Mutex<Vec<String>>>,
    }

    impl DraftOpener for FakeOpener {
        fn open(&self, uri: &str) -> Result<(), NotificationError> {
            if self.fail {
                return Err(NotificationError::Draft("no opener".to_string()));
            }
            self.opened.lock().unwrap().push(uri.to_string());
            Ok(())
        }
    }

    fn opener(fail: bool) -> (Box<FakeOpener>, Arc<Mutex<Vec<String>>>) {
        let opened = Arc::new(Mutex::new(Vec::new()));
        (
            Box::new(FakeOpener {
                fail,
                opened: Arc::clone(&opened),
            }),
            opened,
        )
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("student.kim@example.co.kr"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("space in@example.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_relay_needs_all_three_fields() {
        let mut relay = RelayConfig {
            service_id: Some("s".to_string()),
            template_id: Some("t".to_string()),
            public_key: None,
        };
        assert!(!relay.is_enabled());
        relay.public_key = Some("  ".to_string());
        assert!(!relay.is_enabled());
        relay.public_key = Some("p".to_string());
        assert!(relay.is_enabled());
    }

    #[test]
    fn test_relay_delivery() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let relay = FakeRelay {
            fail: false,
            sent: Arc::clone(&sent),
        };
        let (drafts, opened) = opener(false);
        let notifier = Notifier::new(Some(Box::new(relay)), drafts);
        let status = notifier.deliver(&summary(), " me@example.com ");
        assert!(matches!(status, DeliveryStatus::Delivered { ref recipient } if recipient == "me@example.com"));
        assert_eq!(sent.lock().unwrap().len(), 1);
        assert!(opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_relay_failure_is_reported_not_raised() {
        let relay = FakeRelay {
            fail: true,
            sent: Arc::new(Mutex::new(Vec::new())),
        };
        let (drafts, _) = opener(false);
        let notifier = Notifier::new(Some(Box::new(relay)), drafts);
        let status = notifier.deliver(&summary(), "me@example.com");
        assert!(status.is_failure());
        assert!(status.message().contains("HTTP 400"));
    }

    #[test]
    fn test_fallback_opens_draft() {
        let (drafts, opened) = opener(false);
        let notifier = Notifier::new(None, drafts);
        assert!(!notifier.has_relay());
        let status = notifier.deliver(&summary(), "me@example.com");
        match status {
            DeliveryStatus::DraftOpened { uri } => {
                assert!(uri.starts_with("mailto:me@example.com?"));
                assert_eq!(opened.lock().unwrap().as_slice(), &[uri]);
            }
            other => panic!("expected draft, got {other:?}"),
        }
    }

    #[test]
    fn test_draft_failure_is_reported() {
        let (drafts, _) = opener(true);
        let notifier = Notifier::new(None, drafts);
        let status = notifier.deliver(&summary(), "me@example.com");
        assert!(matches!(status, DeliveryStatus::Failed(NotificationError::Draft(_))));
    }

    #[test]
    fn test_invalid_address_never_reaches_relay() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let relay = FakeRelay {
            fail: false,
            sent: Arc::clone(&sent),
        };
        let (drafts, _) = opener(false);
        let notifier = Notifier::new(Some(Box::new(relay)), drafts);
        let status = notifier.deliver(&summary(), "not-an-email");
        assert!(matches!(status, DeliveryStatus::Failed(NotificationError::InvalidAddress(_))));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_message_body_contents() {
        let body = message_body(&summary());
        assert!(body.contains("지우"));
        assert!(body.contains("7 / 10 (70%)"));
        assert!(body.contains("괜찮아요"));
        assert!(body.contains("일본어 → 한국어"));
        assert_eq!(subject(&summary()), "단어 퀴즈 결과: 7 / 10 (70%)");
    }
}
