//! Builders for the notifications the demo sends.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use super::model::{Category, NotificationKind, NotificationRecord};
use crate::{PushkitError, Result};

/// Title of the registration notification.
pub const WELCOME_TITLE: &str = "Welcome!";

/// Body of the registration notification.
pub const WELCOME_BODY: &str = "You have successfully registered to our notification system.";

/// Titles picked by [`random`].
pub const RANDOM_TITLES: [&str; 5] = [
    "Breaking News!",
    "Important Update",
    "New Message",
    "Alert!",
    "Information",
];

/// Bodies picked by [`random`].
pub const RANDOM_MESSAGES: [&str; 5] = [
    "You have received a new message from the system.",
    "This is an important update for your account.",
    "A new feature has been added to your dashboard.",
    "Your request has been processed successfully.",
    "Please check your account for important information.",
];

/// Lowest priority value.
pub const MIN_PRIORITY: u8 = 1;

/// Highest priority value.
pub const MAX_PRIORITY: u8 = 3;

/// Registration notification.
pub fn welcome(now: DateTime<Utc>) -> NotificationRecord {
    NotificationRecord::new(
        WELCOME_TITLE,
        WELCOME_BODY,
        NotificationKind::Welcome.as_str(),
        now,
    )
    .with_category(Category::Success)
}

/// Canned notification with random title, body, priority and category.
pub fn random<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> NotificationRecord {
    let title = RANDOM_TITLES[rng.gen_range(0..RANDOM_TITLES.len())];
    let body = RANDOM_MESSAGES[rng.gen_range(0..RANDOM_MESSAGES.len())];
    let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
    let priority = rng.gen_range(MIN_PRIORITY..=MAX_PRIORITY);

    NotificationRecord::new(title, body, NotificationKind::Random.as_str(), now)
        .with_priority(priority)
        .with_category(category)
}

/// Caller-defined notification.
///
/// `data` may carry `type`, `priority` and `category`. A missing or blank
/// `type` becomes `custom`; priority and category values that do not parse
/// are ignored.
///
/// # Errors
///
/// Returns `PushkitError::InvalidArgument` if `title` is blank.
pub fn custom(
    title: &str,
    body: &str,
    data: Option<&HashMap<String, String>>,
    now: DateTime<Utc>,
) -> Result<NotificationRecord> {
    if title.trim().is_empty() {
        return Err(PushkitError::invalid_argument("title", "must not be empty"));
    }

    let kind = data
        .and_then(|d| d.get("type"))
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(NotificationKind::Custom.as_str());

    let mut record = NotificationRecord::new(title, body, kind, now);

    if let Some(data) = data {
        record.priority = data
            .get("priority")
            .and_then(|p| p.trim().parse::<u8>().ok())
            .filter(|p| (MIN_PRIORITY..=MAX_PRIORITY).contains(p));
        record.category = data
            .get("category")
            .and_then(|c| c.trim().parse::<Category>().ok());
    }

    Ok(record)
}
