//! # Notification Vocabulary: Single Source of Truth
//!
//! Defines the closed `Channel` and `NotificationStatus` enums. These are the
//! ONE definition of the channel and status sets used by the state machine,
//! the log validator, and the statistics aggregator. Every `match` on them
//! is exhaustive.
//!
//! Wire strings are lowercase snake_case (`in_app`, `whatsapp`, `bounced`),
//! matching the values stored in the notification log table and reported
//! by delivery-provider webhooks.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FwdError;

/// Delivery channel of an outbound notification.
///
/// Declaration order is the canonical enumeration order used for reporting
/// and for breaking ties between equally used channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Email via the transactional mail gateway.
    Email,
    /// WhatsApp Business message.
    Whatsapp,
    /// In-application notification feed.
    InApp,
    /// Mobile push notification.
    Push,
}

/// Total number of channels.
pub const CHANNEL_COUNT: usize = 4;

impl Channel {
    /// Returns all channels in canonical order.
    pub fn all() -> &'static [Channel] {
        &[Self::Email, Self::Whatsapp, Self::InApp, Self::Push]
    }

    /// Returns the wire string for this channel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
            Self::InApp => "in_app",
            Self::Push => "push",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = FwdError;

    /// Parse a channel from its wire string. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "whatsapp" => Ok(Self::Whatsapp),
            "in_app" => Ok(Self::InApp),
            "push" => Ok(Self::Push),
            other => Err(FwdError::Validation(format!(
                "unknown notification channel: {other:?}"
            ))),
        }
    }
}

/// Delivery status of a notification log entry.
///
/// ```text
/// Pending ──▶ Sent ──▶ Delivered (terminal)
///    │          ├────▶ Failed    (terminal)
///    │          └────▶ Bounced   (terminal)
///    └──────────────▶ Failed    (terminal)
/// ```
///
/// The transition table itself lives in `fwd-state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// Created, not yet handed to a provider.
    Pending,
    /// Accepted by the provider, delivery not yet confirmed.
    Sent,
    /// Provider confirmed delivery (terminal).
    Delivered,
    /// Send attempt or delivery failed (terminal).
    Failed,
    /// Recipient address rejected the message (terminal).
    Bounced,
}

/// Total number of statuses.
pub const STATUS_COUNT: usize = 5;

impl NotificationStatus {
    /// Returns all statuses in lifecycle order.
    pub fn all() -> &'static [NotificationStatus] {
        &[
            Self::Pending,
            Self::Sent,
            Self::Delivered,
            Self::Failed,
            Self::Bounced,
        ]
    }

    /// Returns the wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Bounced => "bounced",
        }
    }

    /// Whether this status is terminal (no further transition is legal).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Failed | Self::Bounced)
    }

    /// Whether the entry has left `Pending` (counts toward delivery health).
    pub fn is_completed(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = FwdError;

    /// Parse a status from its wire string. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            "bounced" => Ok(Self::Bounced),
            other => Err(FwdError::Validation(format!(
                "unknown notification status: {other:?}"
            ))),
        }
    }
}
