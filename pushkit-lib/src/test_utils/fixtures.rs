//! Test fixtures and data generators.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::notification::{NotificationKind, NotificationRecord};

/// Collection of commonly used test fixtures.
pub struct TestFixtures;

impl TestFixtures {
    /// Identifiers and the tokens every implementation must derive from them.
    pub const TOKEN_VECTORS: &'static [(&'static str, &'static str)] = &[
        ("user123", "e606e38b0d8c"),
        ("usera", "43595993db09"),
        ("  UserA ", "43595993db09"),
        ("u1", "bb82030dbc2b"),
        ("alice@example.com", "ff8d9819fc0e"),
    ];

    /// Database root used by fixtures.
    pub const DATABASE_URL: &'static str =
        "https://fir-notification-test-default-rtdb.asia-southeast1.firebasedatabase.app";

    /// Project id matching [`DATABASE_URL`](Self::DATABASE_URL).
    pub const PROJECT_ID: &'static str = "fir-notification-test";

    /// Fixed reference instant for deterministic timestamps.
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    /// A custom record stamped `offset_secs` after [`epoch`](Self::epoch).
    pub fn record(title: &str, offset_secs: i64) -> NotificationRecord {
        NotificationRecord::new(
            title,
            format!("{} body", title),
            NotificationKind::Custom.as_str(),
            Self::epoch() + Duration::seconds(offset_secs),
        )
    }

    /// Service account key JSON for `project_id`.
    pub fn service_account_json(project_id: &str) -> String {
        serde_json::json!({
            "type": "service_account",
            "project_id": project_id,
            "private_key_id": "0000",
            "client_email": format!("firebase-adminsdk@{}.iam.gserviceaccount.com", project_id),
        })
        .to_string()
    }
}

/// One `put` event in streaming wire format.
pub fn sse_put(path: &str, data: &Value) -> String {
    format!(
        "event: put\ndata: {}\n\n",
        serde_json::json!({ "path": path, "data": data })
    )
}

/// One `patch` event in streaming wire format.
pub fn sse_patch(path: &str, data: &Value) -> String {
    format!(
        "event: patch\ndata: {}\n\n",
        serde_json::json!({ "path": path, "data": data })
    )
}

/// A heartbeat in streaming wire format.
pub fn sse_keep_alive() -> String {
    "event: keep-alive\ndata: null\n\n".to_string()
}
