//! User-facing notifications produced by storefront flows.
//!
//! Rendering is up to the caller; a [`Notice`] only carries the text, the label of its
//! dismiss action and how long it should stay up.

use std::fmt::Display;
use std::time::Duration;

pub const DISMISS: &str = "Dismiss";
pub const OK: &str = "OK";
pub const CATALOG_UNAVAILABLE: &str = "Unable to validate products - please try again";
pub const NOTHING_AVAILABLE: &str = "All products in order are no longer available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub action: &'static str,
    /// `None` stays until dismissed.
    pub duration: Option<Duration>,
    pub multiline: bool,
}

impl Notice {
    /// Single line, stays until dismissed.
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: DISMISS,
            duration: None,
            multiline: false,
        }
    }

    /// Single line acknowledged with "OK".
    pub fn acknowledge(message: impl Into<String>) -> Self {
        Self {
            action: OK,
            ..Self::transient(message)
        }
    }

    /// Itemized diagnostics, one bullet per line.
    pub fn issues(issues: &[String], duration: Duration) -> Self {
        Self {
            message: format!("Issues: \n  -{}", issues.join("\n  -")),
            action: OK,
            duration: Some(duration),
            multiline: true,
        }
    }

    /// `"Failed to {what}: {error}"`.
    pub fn failure(what: &str, error: &impl Display) -> Self {
        Self::transient(format!("Failed to {what}: {error}"))
    }

    pub fn catalog_unavailable() -> Self {
        Self::acknowledge(CATALOG_UNAVAILABLE)
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.message, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polling::{ErrorCode, ServiceError};

    #[test]
    fn issues_render_as_bullets() {
        let notice = Notice::issues(
            &["Mocha no longer allows Hazelnut Syrup.".into(), "Order item 2 is not available".into()],
            Duration::from_millis(8000),
        );
        assert_eq!(
            notice.message,
            "Issues: \n  -Mocha no longer allows Hazelnut Syrup.\n  -Order item 2 is not available"
        );
        assert_eq!(notice.action, "OK");
        assert_eq!(notice.duration, Some(Duration::from_secs(8)));
        assert!(notice.multiline);
    }

    #[test]
    fn failures_are_dismissible_single_lines() {
        let err = ServiceError::with_message(ErrorCode::ServiceUnavailable, "Actor closed");
        let notice = Notice::failure("load orders", &err);
        assert_eq!(notice.message, "Failed to load orders: Actor closed");
        assert_eq!(notice.action, "Dismiss");
        assert_eq!(notice.duration, None);
        assert!(!notice.multiline);
    }

    #[test]
    fn catalog_outage_asks_to_retry() {
        let notice = Notice::catalog_unavailable();
        assert_eq!(notice.to_string(), "Unable to validate products - please try again [OK]");
    }
}
