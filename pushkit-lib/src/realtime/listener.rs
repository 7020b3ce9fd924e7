use std::time::Duration;

use futures::stream::{self, BoxStream};
use futures::StreamExt;

use super::event_stream::{EventStreamParser, StreamEvent};
use super::feed::NotificationFeed;
use crate::notification::StoredNotification;
use crate::transport::firebase::http::{listen_node_url, map_reqwest_error, map_status_error};
use crate::{PushkitError, Result};

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Subscribes to a node through the REST streaming API.
///
/// Only the connection attempt is bounded by a timeout; the stream itself
/// stays open until the server closes it or the caller drops it.
#[derive(Clone)]
pub struct FirebaseListener {
    client: reqwest::Client,
    auth_token: Option<String>,
}

impl FirebaseListener {
    /// Create a listener without credentials.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| PushkitError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            auth_token: None,
        })
    }

    /// Set the auth token appended to the stream request.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Open a raw event stream on `listen_url`.
    ///
    /// # Errors
    ///
    /// Fails up front if the URL is malformed, the connection cannot be made
    /// or the server answers with an error status. Errors after that arrive
    /// as stream items.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub async fn subscribe(&self, listen_url: &str) -> Result<BoxStream<'static, Result<StreamEvent>>> {
        let url = listen_node_url(listen_url, self.auth_token.as_deref())?;

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, listen_url, CONNECT_TIMEOUT_SECS))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status.as_u16(), listen_url, &body));
        }

        #[cfg(feature = "tracing")]
        tracing::info!("realtime stream opened");

        let mut parser = EventStreamParser::new();
        let events = response
            .bytes_stream()
            .map(move |chunk| -> Vec<Result<StreamEvent>> {
                match chunk {
                    Ok(bytes) => match parser.push(&bytes) {
                        Ok(events) => events.into_iter().map(Ok).collect(),
                        Err(err) => vec![Err(err)],
                    },
                    Err(err) => vec![Err(PushkitError::transport(err))],
                }
            })
            .flat_map(stream::iter);

        Ok(events.boxed())
    }

    /// Stream each new latest notification under `listen_url`.
    ///
    /// The first item is the newest notification already stored, if any.
    /// The stream ends after the first error, including `StreamClosed` when
    /// the server cancels the subscription.
    pub async fn notifications(
        &self,
        listen_url: &str,
    ) -> Result<BoxStream<'static, Result<StoredNotification>>> {
        let events = self.subscribe(listen_url).await?;
        Ok(follow_latest(events))
    }
}

/// Feed raw events through a [`NotificationFeed`], stopping at the first error.
pub fn follow_latest<S>(events: S) -> BoxStream<'static, Result<StoredNotification>>
where
    S: futures::Stream<Item = Result<StreamEvent>> + Send + 'static,
{
    let mut feed = NotificationFeed::new();
    events
        .filter_map(move |event| {
            let out = event.and_then(|ev| feed.apply(ev)).transpose();
            futures::future::ready(out)
        })
        .scan(false, |failed, item| {
            if *failed {
                return futures::future::ready(None);
            }
            *failed = item.is_err();
            futures::future::ready(Some(item))
        })
        .boxed()
}
