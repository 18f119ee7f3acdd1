use std::time::Duration;

use serde_json::{Value, json};

use crate::notify::{MailRelay, NotificationError, RelayConfig, message_body, subject};
use crate::session::summary::SessionSummary;

/// Template-based HTTP mail relay (EmailJS-compatible request body).
pub struct HttpRelay {
    config: RelayConfig,
    #[cfg_attr(not(feature = "network"), allow(dead_code))]
    endpoint: String,
    #[cfg_attr(not(feature = "network"), allow(dead_code))]
    timeout: Duration,
}

impl HttpRelay {
    pub fn new(config: RelayConfig, endpoint: &str, timeout: Duration) -> Self {
        Self {
            config,
            endpoint: endpoint.to_string(),
            timeout,
        }
    }

    pub fn payload(&self, summary: &SessionSummary, recipient: &str) -> Value {
        json!({
            "service_id": self.config.service_id,
            "template_id": self.config.template_id,
            "user_id": self.config.public_key,
            "template_params": {
                "to_email": recipient,
                "subject": subject(summary),
                "participant_name": summary.participant_name,
                "word_set": summary.word_set,
                "direction": summary.direction.label(),
                "correct": summary.correct_count,
                "total": summary.total,
                "percent": summary.percent,
                "score": summary.score_line(),
                "message": summary.rating_message(),
                "body": message_body(summary),
                "finished_at": summary.finished_at.to_rfc3339(),
            }
        })
    }
}

#[cfg(feature = "network")]
impl MailRelay for HttpRelay {
    fn send(&self, summary: &SessionSummary, recipient: &str) -> Result<(), NotificationError> {
        if !self.config.is_enabled() {
            return Err(NotificationError::NotConfigured);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| NotificationError::Request(e.to_string()))?;
        let response = client
            .post(&self.endpoint)
            .json(&self.payload(summary, recipient))
            .send()
            .map_err(|e| NotificationError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotificationError::HttpStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            })
        }
    }
}

#[cfg(not(feature = "network"))]
impl MailRelay for HttpRelay {
    fn send(&self, _summary: &SessionSummary, _recipient: &str) -> Result<(), NotificationError> {
        Err(NotificationError::NetworkDisabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_RELAY_ENDPOINT;
    use crate::session::Direction;

    fn relay() -> HttpRelay {
        HttpRelay::new(
            RelayConfig {
                service_id: Some("service_1".to_string()),
                template_id: Some("template_1".to_string()),
                public_key: Some("public_1".to_string()),
            },
            DEFAULT_RELAY_ENDPOINT,
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_payload_shape() {
        let summary = SessionSummary::new(9, 10, "유나", Direction::SourceToTarget, "travel");
        let payload = relay().payload(&summary, "t@example.com");
        assert_eq!(payload["service_id"], "service_1");
        assert_eq!(payload["template_id"], "template_1");
        assert_eq!(payload["user_id"], "public_1");
        let params = &payload["template_params"];
        assert_eq!(params["to_email"], "t@example.com");
        assert_eq!(params["participant_name"], "유나");
        assert_eq!(params["percent"], 90);
        assert_eq!(params["score"], "9 / 10 (90%)");
    }

    #[test]
    fn test_unconfigured_relay_refuses_to_send() {
        let relay = HttpRelay::new(RelayConfig::default(), DEFAULT_RELAY_ENDPOINT, Duration::from_secs(1));
        let summary = SessionSummary::new(1, 1, "a", Direction::SourceToTarget, "basic");
        assert!(relay.send(&summary, "t@example.com").is_err());
    }

    #[cfg(not(feature = "network"))]
    #[test]
    fn test_configured_relay_without_network_feature() {
        let summary = SessionSummary::new(1, 1, "a", Direction::SourceToTarget, "basic");
        assert!(matches!(
            relay().send(&summary, "t@example.com"),
            Err(NotificationError::NetworkDisabled)
        ));
    }
}
