//! Server-sent event framing for relayed model output.
//!
//! Every stream leaves as `data: {json}\n\n` frames. A stream that ends
//! cleanly is closed with `data: [DONE]\n\n`; a stream that fails midway is
//! cut off without it, so clients can tell a complete answer from a partial
//! one. Dropping the response body drops the upstream stream with it.

use std::convert::Infallible;
use std::future::Future;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use seatwise_client::TokenStream;
use serde::Serialize;
use serde_json::{Map, Value};

/// Terminal frame of a successful stream.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Which phase of a response an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Brand comparison produced before the design stream.
    Comparison,
    /// Design recommendation tokens.
    Design,
}

/// One relayed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamEvent {
    /// Phase marker; absent for single-phase streams.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    /// Text carried by this event.
    pub content: String,
    /// Extra fields merged into the event object.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl StreamEvent {
    /// A plain content event.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            kind: None,
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// An event tagged with `kind`.
    pub fn of_kind(kind: EventKind, content: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            ..Self::content(content)
        }
    }

    /// Adds a metadata field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Encodes as one SSE frame.
    pub fn to_frame(&self) -> String {
        // Serializing a map of strings and JSON values cannot fail.
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        format!("data: {json}\n\n")
    }
}

/// Stream of events; an `Err` ends the relay.
pub type EventStream = BoxStream<'static, seatwise_core::Result<StreamEvent>>;

/// Encodes `events` as frames, appending [`DONE_FRAME`] only on a clean end.
pub fn terminate(events: EventStream) -> impl Stream<Item = Bytes> + Send + 'static {
    stream::unfold(Some(events), |state| async move {
        let mut events = state?;
        match events.next().await {
            Some(Ok(event)) => Some((Bytes::from(event.to_frame()), Some(events))),
            Some(Err(err)) => {
                tracing::warn!(error = %err, "Relay stream failed; closing without [DONE]");
                None
            }
            None => Some((Bytes::from_static(DONE_FRAME.as_bytes()), None)),
        }
    })
}

/// Wraps model tokens as events of `kind`.
pub fn event_frames(tokens: TokenStream, kind: Option<EventKind>) -> EventStream {
    tokens
        .map(move |token| {
            token
                .map(|content| StreamEvent {
                    kind,
                    ..StreamEvent::content(content)
                })
                .map_err(seatwise_core::Error::from)
        })
        .boxed()
}

/// Relays a single-phase token stream.
pub fn relay_tokens(tokens: TokenStream) -> Response {
    sse_response(terminate(event_frames(tokens, None)))
}

/// Emits the optional comparison event, then the design tokens.
///
/// `design` is not polled until the comparison has been produced, so the
/// second upstream call starts only after the first one finished.
pub fn two_phase<C, D>(comparison: C, design: D) -> EventStream
where
    C: Future<Output = seatwise_core::Result<Option<StreamEvent>>> + Send + 'static,
    D: Future<Output = seatwise_client::Result<TokenStream>> + Send + 'static,
{
    let first = stream::once(comparison).filter_map(|result| async move { result.transpose() });
    let second = stream::once(design).flat_map(|opened| match opened {
        Ok(tokens) => event_frames(tokens, Some(EventKind::Design)),
        Err(err) => stream::once(async move { Err::<StreamEvent, _>(seatwise_core::Error::from(err)) }).boxed(),
    });
    first.chain(second).boxed()
}

/// Replays `text` in slices of `chunk_size` characters with `delay` between them.
pub fn chunked(text: String, chunk_size: usize, delay: Duration) -> EventStream {
    let chars: Vec<char> = text.chars().collect();
    let chunks: Vec<String> = chars
        .chunks(chunk_size.max(1))
        .map(|c| c.iter().collect())
        .collect();
    stream::iter(chunks.into_iter().enumerate())
        .then(move |(i, chunk)| async move {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Ok::<_, seatwise_core::Error>(StreamEvent::content(chunk))
        })
        .boxed()
}

/// Builds an event-stream response from encoded frames.
pub fn sse_response<S>(frames: S) -> Response
where
    S: Stream<Item = Bytes> + Send + 'static,
{
    let body = Body::from_stream(frames.map(Ok::<_, Infallible>));
    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        body,
    )
        .into_response()
}
