//! Liveness value object returned by the health endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health status, computed fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Health {
    /// Always `true` when the server answers.
    pub ok: bool,
    /// Server time as ISO-8601 UTC with millisecond precision.
    #[schema(example = "2024-01-01T00:00:00.000Z")]
    pub time: String,
}

impl Health {
    /// Builds the health value for the given instant.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            ok: true,
            time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Builds the health value for the current instant.
    #[must_use]
    pub fn now() -> Self {
        Self::at(Utc::now())
    }
}
