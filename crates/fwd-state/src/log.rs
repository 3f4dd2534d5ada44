//! # Notification Log Entries
//!
//! Two shapes of the same row:
//!
//! - [`NotificationLogInsert`]: what the builder produces before storage has
//!   assigned an id and `created_at`. Always `pending`.
//! - [`NotificationLogEntry`]: a persisted row, as loaded for status updates
//!   and statistics.
//!
//! Entries are treated as immutable snapshots. [`NotificationLogEntry::with_status`]
//! returns a new entry; the caller persists it.

use serde::{Deserialize, Serialize};

use fwd_core::{Channel, NotificationLogId, NotificationStatus, TemplateId, Timestamp, UserId};

use crate::transition::{check_status_transition, StatusTransitionError};

/// Optional fields accepted by [`build_pending_log_entry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingLogOptions {
    /// Recipient email address.
    pub recipient_email: Option<String>,
    /// Recipient phone number (WhatsApp, SMS gateways).
    pub recipient_phone: Option<String>,
    /// Kind of business record that triggered the notification (e.g. `shipment`).
    pub entity_type: Option<String>,
    /// Identifier of that record.
    pub entity_id: Option<String>,
}

/// A new log row, ready for insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLogInsert {
    /// Template the message was rendered from, if any.
    pub template_id: Option<TemplateId>,
    /// Recipient user account.
    pub recipient_user_id: Option<UserId>,
    /// Recipient address for email.
    pub recipient_email: Option<String>,
    /// Recipient number for WhatsApp.
    pub recipient_phone: Option<String>,
    /// Delivery channel.
    pub channel: Channel,
    /// Subject line; email only.
    pub subject: Option<String>,
    /// Rendered message text.
    pub body: String,
    /// Always `pending` for rows built by [`build_pending_log_entry`].
    pub status: NotificationStatus,
    /// Kind of business record the message concerns.
    pub entity_type: Option<String>,
    /// Identifier of that record.
    pub entity_id: Option<String>,
}

impl NotificationLogInsert {
    /// Whether the row satisfies the completeness rule of [`is_log_entry_complete`].
    pub fn is_complete(&self) -> bool {
        is_complete(
            Some(self.body.as_str()),
            self.recipient_user_id.as_ref(),
            self.recipient_email.as_deref(),
            self.recipient_phone.as_deref(),
        )
    }
}

/// Construct a `pending` log row. Omitted optional fields are `None`.
pub fn build_pending_log_entry(
    template_id: Option<TemplateId>,
    recipient_user_id: Option<UserId>,
    channel: Channel,
    subject: Option<String>,
    body: impl Into<String>,
    options: PendingLogOptions,
) -> NotificationLogInsert {
    NotificationLogInsert {
        template_id,
        recipient_user_id,
        recipient_email: options.recipient_email,
        recipient_phone: options.recipient_phone,
        channel,
        subject,
        body: body.into(),
        status: NotificationStatus::Pending,
        entity_type: options.entity_type,
        entity_id: options.entity_id,
    }
}

/// A persisted notification log row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLogEntry {
    pub id: NotificationLogId,
    #[serde(default)]
    pub template_id: Option<TemplateId>,
    #[serde(default)]
    pub recipient_user_id: Option<UserId>,
    #[serde(default)]
    pub recipient_email: Option<String>,
    #[serde(default)]
    pub recipient_phone: Option<String>,
    pub channel: Channel,
    pub status: NotificationStatus,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Provider or send-side failure reason. Present for `failed` entries.
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub entity_id: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub sent_at: Option<Timestamp>,
    #[serde(default)]
    pub delivered_at: Option<Timestamp>,
    /// Set when the entry reaches `failed` or `bounced`.
    #[serde(default)]
    pub failed_at: Option<Timestamp>,
}

impl NotificationLogEntry {
    /// The row storage returns after inserting `insert`.
    pub fn from_insert(
        id: NotificationLogId,
        insert: NotificationLogInsert,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            template_id: insert.template_id,
            recipient_user_id: insert.recipient_user_id,
            recipient_email: insert.recipient_email,
            recipient_phone: insert.recipient_phone,
            channel: insert.channel,
            status: insert.status,
            subject: insert.subject,
            body: Some(insert.body),
            error_message: None,
            entity_type: insert.entity_type,
            entity_id: insert.entity_id,
            created_at,
            sent_at: None,
            delivered_at: None,
            failed_at: None,
        }
    }

    /// Apply a status update, returning the updated entry.
    ///
    /// A blank `error_message` is treated as absent; an existing message is
    /// kept when none is supplied. Stamps `sent_at`, `delivered_at`, or
    /// `failed_at` with `at`.
    pub fn with_status(
        &self,
        to: NotificationStatus,
        at: Timestamp,
        error_message: Option<String>,
    ) -> Result<Self, StatusTransitionError> {
        if let Err(err) = check_status_transition(self.status, to) {
            tracing::debug!(log_id = %self.id, from = %self.status, %to, "rejected status update");
            return Err(err);
        }

        let error_message = error_message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error_message.clone());
        if to == NotificationStatus::Failed && error_message.is_none() {
            return Err(StatusTransitionError::MissingErrorMessage { to });
        }

        let mut next = self.clone();
        next.status = to;
        next.error_message = error_message;
        match to {
            NotificationStatus::Pending => {}
            NotificationStatus::Sent => next.sent_at = Some(at),
            NotificationStatus::Delivered => next.delivered_at = Some(at),
            NotificationStatus::Failed | NotificationStatus::Bounced => next.failed_at = Some(at),
        }
        Ok(next)
    }

    /// Whether the entry is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Whether the entry has a non-empty body and at least one recipient
/// (user id, email, or phone). Channel and status are not considered.
pub fn is_log_entry_complete(entry: &NotificationLogEntry) -> bool {
    is_complete(
        entry.body.as_deref(),
        entry.recipient_user_id.as_ref(),
        entry.recipient_email.as_deref(),
        entry.recipient_phone.as_deref(),
    )
}

fn is_complete(
    body: Option<&str>,
    user: Option<&UserId>,
    email: Option<&str>,
    phone: Option<&str>,
) -> bool {
    let has_body = body.is_some_and(|b| !b.is_empty());
    let has_recipient = user.is_some() || email.is_some() || phone.is_some();
    has_body && has_recipient
}

// ─── Tests ───────────────────────────────────────────────────────────
