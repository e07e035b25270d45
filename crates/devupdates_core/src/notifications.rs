//! Automatic-update notification policy.
//!
//! Decides which of the host's automatic-update emails go out and redirects
//! the ones that do to a fixed recipient with a tagged subject.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::NotificationConfig;
use crate::hooks::{DEFAULT_PRIORITY, HookRegistry, Subscriber};

/// Outcome reported by an automatic-update email.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Fail,
    Critical,
    Other(String),
}

impl FromStr for NotificationKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "success" => Self::Success,
            "fail" => Self::Fail,
            "critical" => Self::Critical,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Fail => f.write_str("fail"),
            Self::Critical => f.write_str("critical"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// An outgoing notification email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmail {
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPolicy {
    recipient: String,
    send_on_success: bool,
    send_on_fail: bool,
    send_on_critical: bool,
    site_name: String,
}

impl NotificationPolicy {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            recipient: config.recipient.clone(),
            send_on_success: config.send_on_success,
            send_on_fail: config.send_on_fail,
            send_on_critical: config.send_on_critical,
            site_name: config.site_name.clone(),
        }
    }

    /// Overrides the configured site name with the one the host reports.
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    /// Unknown kinds are never sent.
    pub fn should_send_email(&self, kind: &NotificationKind) -> bool {
        let send = match kind {
            NotificationKind::Success => self.send_on_success,
            NotificationKind::Fail => self.send_on_fail,
            NotificationKind::Critical => self.send_on_critical,
            NotificationKind::Other(_) => false,
        };
        debug!("Update email '{}': send = {}", kind, send);
        send
    }

    /// Redirects the email to the recipient and tags its subject.
    pub fn modify_email(&self, mut email: UpdateEmail) -> UpdateEmail {
        email.to = self.recipient.clone();
        if let Some(subject) = email.subject.take() {
            email.subject = Some(format!("[ERROR - {}] {}", self.site_name, subject));
        }
        email
    }
}

impl Subscriber for NotificationPolicy {
    fn subscribe(self: Arc<Self>, hooks: &mut HookRegistry) {
        let policy = Arc::clone(&self);
        hooks.add_send_email_filter(DEFAULT_PRIORITY, move |_send, kind| {
            policy.should_send_email(kind)
        });

        hooks.add_email_filter(DEFAULT_PRIORITY, move |email| self.modify_email(email));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn policy() -> NotificationPolicy {
        NotificationPolicy::new(&NotificationConfig::default()).with_site_name("Example Site")
    }

    #[rstest]
    #[case("success", false)]
    #[case("fail", true)]
    #[case("critical", true)]
    #[case("manual", false)]
    #[case("", false)]
    fn test_should_send_email_defaults(#[case] kind: &str, #[case] expected: bool) {
        let kind: NotificationKind = kind.parse().unwrap();
        assert_eq!(policy().should_send_email(&kind), expected);
    }

    #[test]
    fn test_should_send_email_follows_config() {
        let config = NotificationConfig {
            send_on_success: true,
            send_on_fail: false,
            send_on_critical: false,
            ..NotificationConfig::default()
        };
        let policy = NotificationPolicy::new(&config);

        assert!(policy.should_send_email(&NotificationKind::Success));
        assert!(!policy.should_send_email(&NotificationKind::Fail));
        assert!(!policy.should_send_email(&NotificationKind::Critical));
    }

    #[test]
    fn test_modify_email_rewrites_recipient_and_subject() {
        let email = UpdateEmail {
            to: "admin@example.com".to_string(),
            subject: Some("Some plugins have failed to update".to_string()),
            body: "body".to_string(),
            headers: vec!["X-Test: 1".to_string()],
        };

        let modified = policy().modify_email(email);

        assert_eq!(
            modified,
            UpdateEmail {
                to: "dev@galliweb.ch".to_string(),
                subject: Some(
                    "[ERROR - Example Site] Some plugins have failed to update".to_string()
                ),
                body: "body".to_string(),
                headers: vec!["X-Test: 1".to_string()],
            }
        );
    }

    #[test]
    fn test_modify_email_without_subject() {
        let email = UpdateEmail {
            to: "admin@example.com".to_string(),
            ..UpdateEmail::default()
        };

        let modified = policy().modify_email(email);
        assert_eq!(modified.to, "dev@galliweb.ch");
        assert_eq!(modified.subject, None);
    }

    #[test]
    fn test_kind_display_round_trip() {
        for s in ["success", "fail", "critical", "other"] {
            assert_eq!(s.parse::<NotificationKind>().unwrap().to_string(), s);
        }
    }
}
