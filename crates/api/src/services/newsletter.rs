//! Newsletter subscription.
//!
//! Subscribing is idempotent per email and always reports success to the
//! client: store failures are logged and answered with a generic message.

use tracing::instrument;

use crate::models::NewSubscriber;
use crate::store::Storage;

/// Message for a subscription that was stored (or already existed).
pub const SUBSCRIBED_MESSAGE: &str = "Subscribed successfully to BRAMANDA!";
/// Message used when the request could not be stored.
pub const SUBSCRIBED_FALLBACK_MESSAGE: &str = "Subscribed successfully!";

/// What happened to a subscription request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// A new subscriber was stored.
    Created,
    /// The email was already subscribed; nothing changed.
    AlreadySubscribed,
    /// No email was supplied; nothing was stored.
    MissingEmail,
    /// The store failed; nothing is known to be stored.
    StoreFailed,
}

impl SubscribeOutcome {
    /// Confirmation message for the client.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Created | Self::AlreadySubscribed => SUBSCRIBED_MESSAGE,
            Self::MissingEmail | Self::StoreFailed => SUBSCRIBED_FALLBACK_MESSAGE,
        }
    }
}

/// Subscribe an email address to the newsletter.
#[instrument(skip(storage, name), fields(mode = ?storage.mode()))]
pub async fn subscribe(storage: Storage<'_>, email: &str, name: Option<&str>) -> SubscribeOutcome {
    let email = email.trim();
    if email.is_empty() {
        tracing::warn!("Subscription without email ignored");
        return SubscribeOutcome::MissingEmail;
    }

    let subscriber = NewSubscriber {
        email: email.to_string(),
        name: name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(ToString::to_string),
    };

    match storage.subscribers().create(subscriber).await {
        Ok((_, true)) => {
            tracing::info!("Newsletter subscription stored");
            SubscribeOutcome::Created
        }
        Ok((_, false)) => {
            tracing::info!("Email already subscribed - treating as success");
            SubscribeOutcome::AlreadySubscribed
        }
        Err(e) => {
            tracing::error!(error = %e, "Newsletter subscription failed");
            SubscribeOutcome::StoreFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_subscribe_twice_stores_once() {
        let memory = MemoryStore::new();
        let storage = Storage::Memory(&memory);

        assert_eq!(
            subscribe(storage, "a@example.com", Some("A")).await,
            SubscribeOutcome::Created
        );
        assert_eq!(
            subscribe(storage, "a@example.com", None).await,
            SubscribeOutcome::AlreadySubscribed
        );
        assert_eq!(memory.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_subscribe_trims_input() {
        let memory = MemoryStore::new();
        subscribe(Storage::Memory(&memory), "  b@example.com ", Some("  ")).await;

        let stored = memory.find_subscriber("b@example.com").await;
        assert!(stored.is_some_and(|s| s.name.is_none()));
    }

    #[tokio::test]
    async fn test_missing_email_stores_nothing() {
        let memory = MemoryStore::new();
        let outcome = subscribe(Storage::Memory(&memory), "   ", Some("Nobody")).await;

        assert_eq!(outcome, SubscribeOutcome::MissingEmail);
        assert_eq!(outcome.message(), SUBSCRIBED_FALLBACK_MESSAGE);
        assert_eq!(memory.subscriber_count().await, 0);
    }

    #[test]
    fn test_messages() {
        assert_eq!(SubscribeOutcome::Created.message(), SUBSCRIBED_MESSAGE);
        assert_eq!(
            SubscribeOutcome::AlreadySubscribed.message(),
            SUBSCRIBED_MESSAGE
        );
        assert_eq!(
            SubscribeOutcome::StoreFailed.message(),
            SUBSCRIBED_FALLBACK_MESSAGE
        );
    }
}
