//! Cohere chat backend
//!
//! Talks to the v1 chat endpoint. Streaming responses arrive as
//! newline-delimited JSON events, which may be split across network chunks.

use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{stream, Stream, StreamExt};
use serde::{Deserialize, Serialize};

use super::{ChatRequest, GenerationBackend, TextStream};
use crate::error::GenerationError;
use crate::retry::RetryPolicy;

/// Cohere backend using the chat API
pub struct CohereBackend {
    /// HTTP client for API requests
    http_client: reqwest::Client,
    api_key: String,
    /// Base URL without the `/v1/chat` path
    base_url: String,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    #[serde(flatten)]
    request: &'a ChatRequest,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct StreamEvent {
    event_type: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    finish_reason: Option<String>,
}

impl CohereBackend {
    /// Create a backend
    ///
    /// # Arguments
    /// * `api_key` - Sent as a bearer token
    /// * `base_url` - e.g. `https://api.cohere.com`
    /// * `timeout` - Whole-request timeout, including the streamed body
    /// * `retry` - Backoff for 429 and 5xx responses
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, GenerationError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/v1/chat", self.base_url)
    }

    /// POST a streaming request, retrying per the policy, and return the
    /// successful response
    async fn send(&self, request: &ChatRequest) -> Result<reqwest::Response, GenerationError> {
        let url = self.chat_url();
        let body = ChatBody { request, stream: true };

        self.retry
            .run(|attempt| {
                let pending = self
                    .http_client
                    .post(&url)
                    .bearer_auth(&self.api_key)
                    .json(&body);
                async move {
                    if attempt > 0 {
                        log::debug!("Cohere request attempt {}", attempt + 1);
                    }
                    let response = pending.send().await?;
                    let status = response.status();
                    if !status.is_success() {
                        let body = response.text().await.unwrap_or_default();
                        return Err(GenerationError::Api {
                            status: status.as_u16(),
                            body,
                        });
                    }
                    Ok(response)
                }
            })
            .await
    }
}

#[async_trait]
impl GenerationBackend for CohereBackend {
    fn name(&self) -> &'static str {
        "cohere"
    }

    async fn stream(&self, request: &ChatRequest) -> Result<TextStream, GenerationError> {
        log::debug!("Streaming from {} with model {}", self.chat_url(), request.model);
        let response = self.send(request).await?;
        Ok(text_events(response.bytes_stream()))
    }
}

// ─── STREAM PARSING ──────────────────────────────────────────────────

struct EventReader<S> {
    bytes: Pin<Box<S>>,
    buffer: Vec<u8>,
    pending: VecDeque<Result<String, GenerationError>>,
    done: bool,
}

impl<S> EventReader<S> {
    fn handle_line(&mut self, line: &[u8]) {
        let line = String::from_utf8_lossy(line);
        let line = line.trim();
        if line.is_empty() || self.done {
            return;
        }

        let event: StreamEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                self.pending
                    .push_back(Err(GenerationError::Stream(format!("{} in {:?}", e, line))));
                self.done = true;
                return;
            }
        };

        match event.event_type.as_str() {
            "text-generation" => {
                if let Some(text) = event.text.filter(|t| !t.is_empty()) {
                    self.pending.push_back(Ok(text));
                }
            }
            "stream-end" => {
                if let Some(reason) = event.finish_reason.filter(|r| r.starts_with("ERROR")) {
                    self.pending.push_back(Err(GenerationError::Aborted(reason)));
                }
                self.done = true;
            }
            _ => {}
        }
    }

    fn drain_lines(&mut self) {
        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            self.handle_line(&line);
        }
    }
}

/// Turn a byte stream of newline-delimited events into text fragments.
///
/// Ends at `stream-end` or when the bytes run out. A malformed event or
/// transport error is yielded once and ends the stream.
pub(crate) fn text_events<S, B, E>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<GenerationError> + Send + 'static,
{
    let reader = EventReader {
        bytes: Box::pin(bytes),
        buffer: Vec::new(),
        pending: VecDeque::new(),
        done: false,
    };

    let stream = stream::unfold(reader, |mut reader| async move {
        loop {
            if let Some(item) = reader.pending.pop_front() {
                return Some((item, reader));
            }
            if reader.done {
                return None;
            }
            match reader.bytes.next().await {
                Some(Ok(chunk)) => {
                    reader.buffer.extend_from_slice(chunk.as_ref());
                    reader.drain_lines();
                }
                Some(Err(e)) => {
                    reader.pending.push_back(Err(e.into()));
                    reader.done = true;
                }
                None => {
                    let rest = std::mem::take(&mut reader.buffer);
                    reader.handle_line(&rest);
                    reader.done = true;
                }
            }
        }
    });

    Box::pin(stream)
}
