//! Notification records as stored under a user's notification path.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp layout used for the `timestamp` field (UTC, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a UTC instant the way records store it.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp.
///
/// Accepts the canonical layout and falls back to general RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// Well-known values of the `type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Sent once on registration.
    Welcome,
    /// Canned demo notification.
    Random,
    /// Caller-supplied title and body.
    Custom,
    /// Fallback when no type was given.
    Notification,
}

impl NotificationKind {
    /// Get the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Random => "random",
            Self::Custom => "custom",
            Self::Notification => "notification",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display category of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Info,
    Warning,
    Success,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 3] = [Category::Info, Category::Warning, Category::Success];

    /// Get the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = crate::PushkitError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "success" => Ok(Self::Success),
            other => Err(crate::PushkitError::invalid_argument(
                "category",
                format!("unknown category '{}'", other),
            )),
        }
    }
}

/// A single notification document.
///
/// Serialized with the field names listeners expect:
/// `title`, `body`, `timestamp`, `type` and the optional `priority` and `category`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub title: String,
    pub body: String,
    /// UTC timestamp in [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    /// Free-form type, usually a [`NotificationKind`] value.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// 1 (low) to 3 (high).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

fn default_kind() -> String {
    NotificationKind::Notification.as_str().to_string()
}

impl NotificationRecord {
    /// Create a record stamped with `at`.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        kind: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            timestamp: format_timestamp(at),
            kind: kind.into(),
            priority: None,
            category: None,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Parsed timestamp, if it is well formed.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Child key of a notification under the user's path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

impl NotificationId {
    /// Allocate a fresh random (UUID v4) id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NotificationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NotificationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for NotificationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record read back together with its child key.
///
/// Serializes flat: `{ "id": ..., "title": ..., ... }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNotification {
    pub id: NotificationId,
    #[serde(flatten)]
    pub record: NotificationRecord,
}

/// Convert the value stored at a user's notification path into records.
///
/// The value is an object keyed by notification id. Children that are not
/// notification documents are skipped. The result is ordered newest first.
pub fn notifications_from_snapshot(snapshot: &Value) -> Vec<StoredNotification> {
    let Some(children) = snapshot.as_object() else {
        return Vec::new();
    };

    let mut notifications: Vec<StoredNotification> = children
        .iter()
        .filter_map(|(key, child)| {
            match serde_json::from_value::<NotificationRecord>(child.clone()) {
                Ok(record) => Some(StoredNotification {
                    id: NotificationId(key.clone()),
                    record,
                }),
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(id = %key, error = %_err, "skipping malformed notification");
                    None
                }
            }
        })
        .collect();

    sort_newest_first(&mut notifications);
    notifications
}

/// Sort by timestamp, newest first.
///
/// Records with unparseable timestamps sort last. Equal timestamps are
/// ordered by id so the result is deterministic.
pub fn sort_newest_first(notifications: &mut [StoredNotification]) {
    notifications.sort_by(|a, b| {
        b.record
            .sent_at()
            .cmp(&a.record.sent_at())
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// The newest notification in a snapshot, if any.
pub fn latest_notification(snapshot: &Value) -> Option<StoredNotification> {
    notifications_from_snapshot(snapshot).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let record = NotificationRecord::new("Hi", "there", NotificationKind::Custom.as_str(), at(0))
            .with_priority(2)
            .with_category(Category::Warning);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Hi",
                "body": "there",
                "timestamp": "2023-11-14T22:13:20Z",
                "type": "custom",
                "priority": 2,
                "category": "warning"
            })
        );
    }

    #[test]
    fn optional_fields_are_omitted() {
        let record = NotificationRecord::new("t", "b", "welcome", at(0));
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("priority"));
        assert!(!object.contains_key("category"));
    }

    #[test]
    fn missing_type_defaults_to_notification() {
        let record: NotificationRecord = serde_json::from_value(json!({
            "title": "t",
            "body": "b",
            "timestamp": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.kind, "notification");
    }

    #[test]
    fn timestamps_round_trip_and_fall_back_to_rfc3339() {
        let stamped = format_timestamp(at(5));
        assert_eq!(parse_timestamp(&stamped), Some(at(5)));
        assert_eq!(parse_timestamp("2023-11-14T22:13:25.000+00:00"), Some(at(5)));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn stored_notification_is_flat() {
        let stored = StoredNotification {
            id: "n1".into(),
            record: NotificationRecord::new("t", "b", "random", at(0)),
        };
        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["id"], "n1");
        assert_eq!(value["title"], "t");
    }

    #[test]
    fn snapshot_is_sorted_newest_first() {
        let snapshot = json!({
            "old": { "title": "a", "body": "", "timestamp": format_timestamp(at(0)), "type": "random" },
            "new": { "title": "b", "body": "", "timestamp": format_timestamp(at(60)), "type": "random" },
            "mid": { "title": "c", "body": "", "timestamp": format_timestamp(at(30)), "type": "random" }
        });

        let ids: Vec<String> = notifications_from_snapshot(&snapshot)
            .into_iter()
            .map(|n| n.id.0)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn snapshot_skips_malformed_children() {
        let snapshot = json!({
            "good": { "title": "a", "body": "", "timestamp": "2024-01-01T00:00:00Z", "type": "random" },
            "bad": 42
        });
        let notifications = notifications_from_snapshot(&snapshot);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].id.as_str(), "good");
    }

    #[test]
    fn unparseable_timestamps_sort_last() {
        let snapshot = json!({
            "x": { "title": "a", "body": "", "timestamp": "garbage", "type": "random" },
            "y": { "title": "b", "body": "", "timestamp": "2024-01-01T00:00:00Z", "type": "random" }
        });
        let latest = latest_notification(&snapshot).unwrap();
        assert_eq!(latest.id.as_str(), "y");
    }

    #[test]
    fn empty_or_null_snapshot_has_no_latest() {
        assert!(latest_notification(&Value::Null).is_none());
        assert!(latest_notification(&json!({})).is_none());
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = NotificationId::generate();
        let b = NotificationId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn category_parses_wire_values() {
        assert_eq!("info".parse::<Category>().unwrap(), Category::Info);
        assert!("urgent".parse::<Category>().is_err());
    }
}
