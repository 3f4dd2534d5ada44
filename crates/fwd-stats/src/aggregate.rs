//! # Aggregation
//!
//! `total_sent` keeps its historical name but counts every entry, whatever
//! its status. Rates are percentages of `total_sent` rounded to two decimal
//! places:
//!
//! - `success_rate` = delivered
//! - `failure_rate` = failed + bounced
//!
//! `pending` and `sent` count toward neither, so the two rates can sum to
//! less than 100.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use fwd_core::{Channel, NotificationStatus};
use fwd_state::NotificationLogEntry;

/// Maximum number of entries in [`NotificationStats::common_errors`].
pub const MAX_COMMON_ERRORS: usize = 10;

/// Entry count per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCounts {
    /// Entries sent by email.
    pub email: u64,
    /// Entries sent over WhatsApp.
    pub whatsapp: u64,
    /// Entries posted to the in-app feed.
    pub in_app: u64,
    /// Entries sent as push notifications.
    pub push: u64,
}

impl ChannelCounts {
    /// Count for one channel.
    pub fn get(&self, channel: Channel) -> u64 {
        match channel {
            Channel::Email => self.email,
            Channel::Whatsapp => self.whatsapp,
            Channel::InApp => self.in_app,
            Channel::Push => self.push,
        }
    }

    fn slot(&mut self, channel: Channel) -> &mut u64 {
        match channel {
            Channel::Email => &mut self.email,
            Channel::Whatsapp => &mut self.whatsapp,
            Channel::InApp => &mut self.in_app,
            Channel::Push => &mut self.push,
        }
    }

    /// Sum over all channels.
    pub fn total(&self) -> u64 {
        Channel::all().iter().map(|c| self.get(*c)).sum()
    }

    fn add(&mut self, other: &ChannelCounts) {
        for c in Channel::all() {
            *self.slot(*c) += other.get(*c);
        }
    }
}

/// Entry count per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Not yet handed to a provider.
    pub pending: u64,
    /// Accepted by a provider, delivery unconfirmed.
    pub sent: u64,
    /// Confirmed delivered.
    pub delivered: u64,
    /// Send or delivery failed.
    pub failed: u64,
    /// Rejected by the recipient address.
    pub bounced: u64,
}

impl StatusCounts {
    /// Count for one status.
    pub fn get(&self, status: NotificationStatus) -> u64 {
        match status {
            NotificationStatus::Pending => self.pending,
            NotificationStatus::Sent => self.sent,
            NotificationStatus::Delivered => self.delivered,
            NotificationStatus::Failed => self.failed,
            NotificationStatus::Bounced => self.bounced,
        }
    }

    fn slot(&mut self, status: NotificationStatus) -> &mut u64 {
        match status {
            NotificationStatus::Pending => &mut self.pending,
            NotificationStatus::Sent => &mut self.sent,
            NotificationStatus::Delivered => &mut self.delivered,
            NotificationStatus::Failed => &mut self.failed,
            NotificationStatus::Bounced => &mut self.bounced,
        }
    }

    /// Sum over all statuses.
    pub fn total(&self) -> u64 {
        NotificationStatus::all().iter().map(|s| self.get(*s)).sum()
    }

    /// Entries that have left `pending`.
    pub fn completed(&self) -> u64 {
        NotificationStatus::all()
            .iter()
            .filter(|s| s.is_completed())
            .map(|s| self.get(*s))
            .sum()
    }

    fn add(&mut self, other: &StatusCounts) {
        for s in NotificationStatus::all() {
            *self.slot(*s) += other.get(*s);
        }
    }
}

/// One distinct error message and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFrequency {
    /// The exact `error_message` text.
    pub message: String,
    /// Number of entries carrying it.
    pub count: u64,
}

/// Summary of a collection of notification log entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationStats {
    /// Number of entries, all statuses included.
    pub total_sent: u64,
    /// Entry count per channel; sums to `total_sent`.
    pub by_channel: ChannelCounts,
    /// Entry count per status; sums to `total_sent`.
    pub by_status: StatusCounts,
    /// Percentage of entries delivered.
    pub success_rate: f64,
    /// Percentage of entries failed or bounced.
    pub failure_rate: f64,
    /// Most frequent error messages, by descending count, at most
    /// [`MAX_COMMON_ERRORS`].
    pub common_errors: Vec<ErrorFrequency>,
}

impl Default for NotificationStats {
    fn default() -> Self {
        create_empty_stats()
    }
}

/// The all-zero summary, equal to `calculate_stats(&[])`.
pub fn create_empty_stats() -> NotificationStats {
    NotificationStats {
        total_sent: 0,
        by_channel: ChannelCounts::default(),
        by_status: StatusCounts::default(),
        success_rate: 0.0,
        failure_rate: 0.0,
        common_errors: Vec::new(),
    }
}

/// Summarize a collection of log entries.
pub fn calculate_stats(entries: &[NotificationLogEntry]) -> NotificationStats {
    summarize(entries)
}

fn summarize<'a, I>(entries: I) -> NotificationStats
where
    I: IntoIterator<Item = &'a NotificationLogEntry>,
{
    let mut total = 0u64;
    let mut by_channel = ChannelCounts::default();
    let mut by_status = StatusCounts::default();
    let mut errors: HashMap<&str, u64> = HashMap::new();

    for entry in entries {
        total += 1;
        *by_channel.slot(entry.channel) += 1;
        *by_status.slot(entry.status) += 1;
        if let Some(message) = entry.error_message.as_deref().filter(|m| !m.is_empty()) {
            *errors.entry(message).or_default() += 1;
        }
    }

    from_counts(
        total,
        by_channel,
        by_status,
        errors.into_iter().map(|(m, c)| (m.to_string(), c)),
    )
}

/// Combine partial summaries.
///
/// Counts are summed; rates are recomputed from the summed counts; error
/// frequencies are summed per message, re-ranked, and truncated. A single
/// summary is returned unchanged.
///
/// Merged `common_errors` is approximate. Each part carries only its top
/// [`MAX_COMMON_ERRORS`] messages, so a message that ranks below that in
/// every part is missing from the result even if it leads overall. With the
/// raw entries at hand, concatenate them and use [`calculate_stats`].
pub fn merge_stats(stats: &[NotificationStats]) -> NotificationStats {
    match stats {
        [] => create_empty_stats(),
        [only] => only.clone(),
        many => {
            let mut total = 0u64;
            let mut by_channel = ChannelCounts::default();
            let mut by_status = StatusCounts::default();
            let mut errors: HashMap<String, u64> = HashMap::new();
            for s in many {
                total += s.total_sent;
                by_channel.add(&s.by_channel);
                by_status.add(&s.by_status);
                for e in &s.common_errors {
                    *errors.entry(e.message.clone()).or_default() += e.count;
                }
            }
            from_counts(total, by_channel, by_status, errors)
        }
    }
}

/// Percentage of entries sent on `channel`.
pub fn channel_percentage(stats: &NotificationStats, channel: Channel) -> f64 {
    percent(stats.by_channel.get(channel), stats.total_sent)
}

/// Percentage of entries in `status`.
pub fn status_percentage(stats: &NotificationStats, status: NotificationStatus) -> f64 {
    percent(stats.by_status.get(status), stats.total_sent)
}

/// The channel with the most entries; `None` when there are no entries.
///
/// Ties resolve to the earliest channel in [`Channel::all`] order.
pub fn most_used_channel(stats: &NotificationStats) -> Option<Channel> {
    if stats.total_sent == 0 {
        return None;
    }
    let mut best: Option<(Channel, u64)> = None;
    for channel in Channel::all() {
        let count = stats.by_channel.get(*channel);
        match best {
            Some((_, top)) if top >= count => {}
            _ => best = Some((*channel, count)),
        }
    }
    best.map(|(channel, _)| channel)
}

/// One summary per channel, every channel present.
pub fn stats_by_channel(entries: &[NotificationLogEntry]) -> BTreeMap<Channel, NotificationStats> {
    let mut grouped: BTreeMap<Channel, Vec<&NotificationLogEntry>> =
        Channel::all().iter().map(|c| (*c, Vec::new())).collect();
    for entry in entries {
        grouped.entry(entry.channel).or_default().push(entry);
    }
    grouped
        .into_iter()
        .map(|(channel, group)| (channel, summarize(group)))
        .collect()
}

fn from_counts(
    total_sent: u64,
    by_channel: ChannelCounts,
    by_status: StatusCounts,
    errors: impl IntoIterator<Item = (String, u64)>,
) -> NotificationStats {
    NotificationStats {
        total_sent,
        by_channel,
        by_status,
        success_rate: percent(by_status.delivered, total_sent),
        failure_rate: percent(by_status.failed + by_status.bounced, total_sent),
        common_errors: rank_errors(errors),
    }
}

fn rank_errors(errors: impl IntoIterator<Item = (String, u64)>) -> Vec<ErrorFrequency> {
    let mut ranked: Vec<ErrorFrequency> = errors
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(message, count)| ErrorFrequency { message, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.message.cmp(&b.message)));
    ranked.truncate(MAX_COMMON_ERRORS);
    ranked
}

fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 * 100.0 / total as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use fwd_core::{NotificationLogId, Timestamp};

    fn entry(channel: Channel, status: NotificationStatus, error: Option<&str>) -> NotificationLogEntry {
        NotificationLogEntry {
            id: NotificationLogId::new(),
            template_id: None,
            recipient_user_id: None,
            recipient_email: Some("ops@example.com".to_string()),
            recipient_phone: None,
            channel,
            status,
            subject: None,
            body: Some("Bill of lading issued".to_string()),
            error_message: error.map(str::to_string),
            entity_type: None,
            entity_id: None,
            created_at: Timestamp::now(),
            sent_at: None,
            delivered_at: None,
            failed_at: None,
        }
    }

    fn repeat(n: usize, channel: Channel, status: NotificationStatus) -> Vec<NotificationLogEntry> {
        (0..n).map(|_| entry(channel, status, None)).collect()
    }

    #[test]
    fn test_empty_equals_calculate_of_nothing() {
        assert_eq!(calculate_stats(&[]), create_empty_stats());
        assert_eq!(NotificationStats::default(), create_empty_stats());
    }

    #[test]
    fn test_counts_and_rates() {
        let mut entries = repeat(6, Channel::Email, NotificationStatus::Delivered);
        entries.extend(repeat(2, Channel::Whatsapp, NotificationStatus::Sent));
        entries.push(entry(Channel::Push, NotificationStatus::Failed, Some("token expired")));
        entries.push(entry(Channel::InApp, NotificationStatus::Bounced, None));

        let stats = calculate_stats(&entries);
        assert_eq!(stats.total_sent, 10);
        assert_eq!(stats.by_channel.email, 6);
        assert_eq!(stats.by_channel.whatsapp, 2);
        assert_eq!(stats.by_channel.push, 1);
        assert_eq!(stats.by_channel.in_app, 1);
        assert_eq!(stats.by_status.delivered, 6);
        assert_eq!(stats.by_status.sent, 2);
        assert_eq!(stats.success_rate, 60.0);
        assert_eq!(stats.failure_rate, 20.0);
        assert_eq!(stats.by_channel.total(), 10);
        assert_eq!(stats.by_status.total(), 10);
    }

    #[test]
    fn test_pending_counts_toward_total() {
        let entries = repeat(3, Channel::Email, NotificationStatus::Pending);
        let stats = calculate_stats(&entries);
        assert_eq!(stats.total_sent, 3);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.failure_rate, 0.0);
        assert_eq!(stats.by_status.completed(), 0);
    }

    #[test]
    fn test_rates_round_to_two_places() {
        let mut entries = repeat(1, Channel::Email, NotificationStatus::Delivered);
        entries.extend(repeat(2, Channel::Email, NotificationStatus::Sent));
        let stats = calculate_stats(&entries);
        assert_eq!(stats.success_rate, 33.33);
    }

    #[test]
    fn test_common_errors_ranked_and_truncated() {
        let mut entries = Vec::new();
        for i in 0..12 {
            for _ in 0..=i {
                entries.push(entry(
                    Channel::Email,
                    NotificationStatus::Failed,
                    Some(format!("error {i:02}").as_str()),
                ));
            }
        }
        let stats = calculate_stats(&entries);
        assert_eq!(stats.common_errors.len(), MAX_COMMON_ERRORS);
        assert_eq!(stats.common_errors[0].message, "error 11");
        assert_eq!(stats.common_errors[0].count, 12);
        assert_eq!(stats.common_errors[9].message, "error 02");
        assert!(stats
            .common_errors
            .windows(2)
            .all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_common_errors_ties_by_message() {
        let entries = vec![
            entry(Channel::Email, NotificationStatus::Failed, Some("b")),
            entry(Channel::Email, NotificationStatus::Failed, Some("a")),
        ];
        let stats = calculate_stats(&entries);
        let messages: Vec<_> = stats.common_errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }

    #[test]
    fn test_blank_error_messages_ignored() {
        let entries = vec![entry(Channel::Email, NotificationStatus::Bounced, Some(""))];
        assert!(calculate_stats(&entries).common_errors.is_empty());
    }

    #[test]
    fn test_merge_empty_and_singleton() {
        assert_eq!(merge_stats(&[]), create_empty_stats());
        let stats = calculate_stats(&repeat(4, Channel::Push, NotificationStatus::Delivered));
        assert_eq!(merge_stats(std::slice::from_ref(&stats)), stats);
    }

    #[test]
    fn test_merge_sums_and_recomputes() {
        let a = calculate_stats(&repeat(3, Channel::Email, NotificationStatus::Delivered));
        let mut b_entries = repeat(1, Channel::Whatsapp, NotificationStatus::Delivered);
        b_entries.push(entry(Channel::Whatsapp, NotificationStatus::Failed, Some("blocked")));
        let b = calculate_stats(&b_entries);

        let merged = merge_stats(&[a.clone(), b.clone()]);
        assert_eq!(merged.total_sent, 5);
        assert_eq!(merged.by_channel.email, 3);
        assert_eq!(merged.by_channel.whatsapp, 2);
        assert_eq!(merged.by_status.delivered, 4);
        assert_eq!(merged.by_status.failed, 1);
        assert_eq!(merged.success_rate, 80.0);
        assert_eq!(merged.failure_rate, 20.0);
        assert_eq!(merged.common_errors, vec![ErrorFrequency { message: "blocked".into(), count: 1 }]);
        assert_eq!(merge_stats(&[b, a]), merged);
    }

    #[test]
    fn test_merge_combines_error_counts() {
        let a = calculate_stats(&[entry(Channel::Email, NotificationStatus::Failed, Some("timeout"))]);
        let b = calculate_stats(&[
            entry(Channel::Email, NotificationStatus::Failed, Some("timeout")),
            entry(Channel::Email, NotificationStatus::Failed, Some("dns")),
        ]);
        let merged = merge_stats(&[a, b]);
        assert_eq!(merged.common_errors[0], ErrorFrequency { message: "timeout".into(), count: 2 });
        assert_eq!(merged.common_errors[1], ErrorFrequency { message: "dns".into(), count: 1 });
    }

    #[test]
    fn test_percentages() {
        let mut entries = repeat(1, Channel::Email, NotificationStatus::Delivered);
        entries.extend(repeat(1, Channel::Whatsapp, NotificationStatus::Delivered));
        entries.extend(repeat(1, Channel::Push, NotificationStatus::Sent));
        let stats = calculate_stats(&entries);
        let total: f64 = Channel::all().iter().map(|c| channel_percentage(&stats, *c)).sum();
        assert!((total - 100.0).abs() < 0.05);
        assert_eq!(channel_percentage(&stats, Channel::InApp), 0.0);
        assert_eq!(status_percentage(&stats, NotificationStatus::Sent), 33.33);
    }

    #[test]
    fn test_percentages_of_empty_are_zero() {
        let stats = create_empty_stats();
        for c in Channel::all() {
            assert_eq!(channel_percentage(&stats, *c), 0.0);
        }
        for s in NotificationStatus::all() {
            assert_eq!(status_percentage(&stats, *s), 0.0);
        }
    }

    #[test]
    fn test_most_used_channel() {
        assert_eq!(most_used_channel(&create_empty_stats()), None);
        let mut entries = repeat(2, Channel::Email, NotificationStatus::Sent);
        entries.extend(repeat(3, Channel::Push, NotificationStatus::Sent));
        assert_eq!(most_used_channel(&calculate_stats(&entries)), Some(Channel::Push));
    }

    #[test]
    fn test_most_used_channel_tie_takes_enumeration_order() {
        let mut entries = repeat(2, Channel::Push, NotificationStatus::Sent);
        entries.extend(repeat(2, Channel::Whatsapp, NotificationStatus::Sent));
        assert_eq!(most_used_channel(&calculate_stats(&entries)), Some(Channel::Whatsapp));
    }

    #[test]
    fn test_stats_by_channel_covers_every_channel() {
        let mut entries = repeat(2, Channel::Email, NotificationStatus::Delivered);
        entries.extend(repeat(1, Channel::Push, NotificationStatus::Failed));
        let per = stats_by_channel(&entries);
        assert_eq!(per.len(), Channel::all().len());
        assert_eq!(per[&Channel::Email].total_sent, 2);
        assert_eq!(per[&Channel::Email].success_rate, 100.0);
        assert_eq!(per[&Channel::Push].failure_rate, 100.0);
        assert_eq!(per[&Channel::InApp], create_empty_stats());
    }

    #[test]
    fn test_stats_by_channel_matches_filtered_calculate() {
        let entries = vec![
            entry(Channel::Whatsapp, NotificationStatus::Failed, Some("template not approved")),
            entry(Channel::Email, NotificationStatus::Bounced, Some("mailbox full")),
            entry(Channel::Whatsapp, NotificationStatus::Delivered, None),
            entry(Channel::Email, NotificationStatus::Failed, Some("mailbox full")),
            entry(Channel::Push, NotificationStatus::Sent, None),
        ];
        let per = stats_by_channel(&entries);
        for channel in Channel::all() {
            let only: Vec<_> = entries.iter().filter(|e| e.channel == *channel).cloned().collect();
            assert_eq!(per[channel], calculate_stats(&only), "{channel}");
        }
        assert_eq!(per[&Channel::Email].common_errors[0].count, 2);
    }

    #[test]
    fn test_serialized_shape() {
        let stats = calculate_stats(&repeat(1, Channel::InApp, NotificationStatus::Delivered));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_sent"], 1);
        assert_eq!(json["by_channel"]["in_app"], 1);
        assert_eq!(json["by_status"]["delivered"], 1);
        assert_eq!(json["success_rate"], 100.0);
    }
}
