use serde_json::{Map, Value};

use super::event_stream::StreamEvent;
use crate::json_tree::{self, segments};
use crate::notification::{latest_notification, NotificationId, StoredNotification};
use crate::{PushkitError, Result};

/// Local mirror of a user's notification node.
///
/// Applies stream events to a snapshot and reports the newest notification
/// whenever it changes. The same notification is never reported twice in a
/// row, even if unrelated children change.
#[derive(Debug)]
pub struct NotificationFeed {
    snapshot: Value,
    last_emitted: Option<NotificationId>,
}

impl NotificationFeed {
    /// Start with an empty snapshot.
    pub fn new() -> Self {
        Self {
            snapshot: Value::Object(Map::new()),
            last_emitted: None,
        }
    }

    /// Current snapshot of the subscribed node.
    pub fn snapshot(&self) -> &Value {
        &self.snapshot
    }

    /// Id of the last notification returned by [`apply`](Self::apply).
    pub fn last_emitted(&self) -> Option<&NotificationId> {
        self.last_emitted.as_ref()
    }

    /// Apply one event.
    ///
    /// Returns the newest notification if it differs from the last one
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `StreamClosed` for `cancel` and `auth_revoked`; the
    /// subscription is over after either.
    pub fn apply(&mut self, event: StreamEvent) -> Result<Option<StoredNotification>> {
        match event {
            StreamEvent::Put { path, data } => {
                json_tree::set(&mut self.snapshot, &segments(&path), data);
            }
            StreamEvent::Patch { path, data } => {
                let base = segments(&path);
                if let Value::Object(children) = data {
                    for (key, value) in children {
                        let mut child_path = base.clone();
                        child_path.extend(segments(&key));
                        json_tree::set(&mut self.snapshot, &child_path, value);
                    }
                }
            }
            StreamEvent::KeepAlive => return Ok(None),
            StreamEvent::Cancel(reason) => {
                return Err(PushkitError::StreamClosed(closed_reason("cancelled", &reason)))
            }
            StreamEvent::AuthRevoked(reason) => {
                return Err(PushkitError::StreamClosed(closed_reason("auth revoked", &reason)))
            }
        }

        Ok(self.take_new_latest())
    }

    fn take_new_latest(&mut self) -> Option<StoredNotification> {
        let latest = latest_notification(&self.snapshot)?;
        if self.last_emitted.as_ref() == Some(&latest.id) {
            return None;
        }
        self.last_emitted = Some(latest.id.clone());
        Some(latest)
    }
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new()
    }
}

fn closed_reason(kind: &str, reason: &str) -> String {
    if reason.is_empty() {
        kind.to_string()
    } else {
        format!("{}: {}", kind, reason)
    }
}
