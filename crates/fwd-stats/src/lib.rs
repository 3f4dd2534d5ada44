//! # fwd-stats: Notification Delivery Statistics
//!
//! Folds notification log entries into a [`NotificationStats`] summary for
//! dashboards, and classifies delivery health from it.
//!
//! Stats are a projection of the log, recomputed on demand. They are never
//! stored as authoritative state, so there is no migration story for them:
//! if the shape changes, recompute from the log.
//!
//! - **Aggregate** (`aggregate.rs`): counts, rates, most common errors,
//!   merging of partial summaries (per tenant, per day).
//! - **Health** (`health.rs`): `unknown` / `healthy` / `warning` / `critical`
//!   classification with configurable thresholds.

pub mod aggregate;
pub mod health;

pub use aggregate::{
    calculate_stats, channel_percentage, create_empty_stats, merge_stats, most_used_channel,
    stats_by_channel, status_percentage, ChannelCounts, ErrorFrequency, NotificationStats,
    StatusCounts, MAX_COMMON_ERRORS,
};
pub use health::{
    delivery_health, delivery_health_with, is_healthy_delivery, DeliveryHealth,
    HealthThresholds, ThresholdError,
};
