//! Newsletter subscriber domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A newsletter subscriber, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A subscription request that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriber {
    pub email: String,
    pub name: Option<String>,
}

impl NewSubscriber {
    /// Materialize the subscriber with a local timestamp.
    #[must_use]
    pub fn into_subscriber(self, created_at: DateTime<Utc>) -> Subscriber {
        Subscriber {
            email: self.email,
            name: self.name,
            created_at,
        }
    }
}
