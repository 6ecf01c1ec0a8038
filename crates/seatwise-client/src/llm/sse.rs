//! Decoding of OpenAI-style `text/event-stream` completion bodies.

use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::fmt::Display;

use super::TokenStream;
use crate::{Error, Result};

/// Sentinel payload closing a completion stream.
const DONE: &str = "[DONE]";

/// One decoded `data:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// JSON payload.
    Data(String),
    /// The `[DONE]` sentinel.
    Done,
}

/// Incremental line decoder.
///
/// Bytes are buffered until a full line is available, so multi-byte UTF-8
/// characters split across network chunks decode correctly.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    /// Feeds `chunk` and returns every complete `data:` frame it finished.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buf.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            if let Some(frame) = decode_line(&line) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Decodes a trailing line that arrived without a newline.
    pub fn finish(&mut self) -> Option<SseFrame> {
        let line = std::mem::take(&mut self.buf);
        decode_line(&line)
    }
}

fn decode_line(line: &[u8]) -> Option<SseFrame> {
    let text = String::from_utf8_lossy(line);
    let payload = text.trim_end_matches(['\r', '\n']).strip_prefix("data:")?.trim();
    if payload.is_empty() {
        return None;
    }
    if payload == DONE {
        Some(SseFrame::Done)
    } else {
        Some(SseFrame::Data(payload.to_string()))
    }
}

/// Pulls the text delta out of a chat-completion chunk.
///
/// Chunks without content (role announcements, finish markers) yield
/// `Ok(None)`.
pub(crate) fn delta_content(payload: &str) -> Result<Option<String>> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| Error::decode("llm", e.to_string()))?;
    if let Some(err) = value.get("error") {
        return Err(Error::Stream(err.to_string()));
    }
    Ok(value
        .pointer("/choices/0/delta/content")
        .and_then(|c| c.as_str())
        .filter(|c| !c.is_empty())
        .map(str::to_string))
}

struct State<S> {
    body: S,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    finished: bool,
}

impl<S> State<S> {
    /// Queues the deltas of `frames`; returns `true` once `[DONE]` is seen.
    fn absorb(&mut self, frames: Vec<SseFrame>) -> Result<bool> {
        for frame in frames {
            match frame {
                SseFrame::Done => return Ok(true),
                SseFrame::Data(payload) => {
                    if let Some(delta) = delta_content(&payload)? {
                        self.pending.push_back(delta);
                    }
                }
            }
        }
        Ok(false)
    }
}

/// Turns a raw completion body into a stream of text deltas.
///
/// The stream ends at `[DONE]` or at the end of the body. A transport error
/// or an in-band `error` object ends it with an `Err` item.
pub fn sse_tokens<S, B, E>(body: S) -> TokenStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: Display + Send,
{
    let state = State {
        body: Box::pin(body),
        decoder: SseDecoder::default(),
        pending: VecDeque::new(),
        finished: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(delta) = state.pending.pop_front() {
                return Some((Ok(delta), state));
            }
            if state.finished {
                return None;
            }
            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let frames = state.decoder.push(chunk.as_ref());
                    match state.absorb(frames) {
                        Ok(done) => state.finished = done,
                        Err(e) => {
                            state.finished = true;
                            state.pending.clear();
                            return Some((Err(e), state));
                        }
                    }
                }
                Some(Err(e)) => {
                    state.finished = true;
                    state.pending.clear();
                    return Some((Err(Error::Stream(e.to_string())), state));
                }
                None => {
                    state.finished = true;
                    let tail = state.decoder.finish().into_iter().collect();
                    if let Err(e) = state.absorb(tail) {
                        return Some((Err(e), state));
                    }
                    tracing::trace!("Completion body ended");
                }
            }
        }
    })
    .boxed()
}
