//! Chat-completion client for advice generation.

use crate::{AdviceError, SseDecoder};
use fincoach_rs_config::ModelConfig;
use futures_util::{Stream, StreamExt};
use log::{debug, warn};
use serde::Serialize;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// System persona sent with every generation request.
const SYSTEM_PROMPT: &str = "You are a professional personal financial advisor, skilled in \
financial planning, budget management, and purchase decision analysis. Your advice should be: \
1) grounded in real numbers and calculations 2) easy to understand 3) actionable \
4) mindful of risk. Present it in a clear format with concrete figures and steps.";

/// Sampling temperature: advice should be precise, not creative.
const TEMPERATURE: f32 = 0.4;
/// Response length cap.
const MAX_TOKENS: u32 = 2000;
/// Fragment channel depth between the reader task and the consumer.
const CHANNEL_DEPTH: usize = 32;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Finite, consumed-once stream of generated text fragments.
///
/// Fragments arrive in upstream order. A transport failure mid-stream is
/// yielded exactly once as `Err` and the stream then terminates, so clean
/// completion and failure are mutually exclusive. Dropping the stream
/// abandons the generation.
#[derive(Debug)]
pub struct AdviceStream {
    inner: ReceiverStream<Result<String, AdviceError>>,
}

impl AdviceStream {
    /// Drain the stream and assemble the full markdown response.
    pub async fn finish(mut self) -> Result<String, AdviceError> {
        let mut response = String::new();
        while let Some(fragment) = self.next().await {
            response.push_str(&fragment?);
        }
        Ok(response)
    }
}

impl Stream for AdviceStream {
    type Item = Result<String, AdviceError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Client for the configured OpenAI-compatible completion endpoint.
///
/// Each `generate` call owns an independent request and stream; the client
/// itself never serializes concurrent generations.
#[derive(Debug, Clone)]
pub struct AdviceClient {
    config: ModelConfig,
    http: reqwest::Client,
}

impl AdviceClient {
    /// Create a client, rejecting incomplete configuration before any
    /// network use.
    pub fn new(config: ModelConfig) -> Result<Self, AdviceError> {
        if !config.is_complete() {
            return Err(AdviceError::ConfigMissing);
        }
        Ok(Self {
            config,
            http: reqwest::Client::new(),
        })
    }

    /// Start a streaming generation for the given user prompt.
    ///
    /// A non-success upstream status fails the call without reading the body
    /// as a stream. No timeout is applied and no retry is attempted.
    pub async fn generate(&self, prompt: &str) -> Result<AdviceStream, AdviceError> {
        let url = format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );
        let request = CompletionRequest {
            model: &self.config.model_name,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: true,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(
            "starting generation (model={}, prompt_len={})",
            self.config.model_name,
            prompt.len()
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("completion endpoint answered {status}");
            return Err(AdviceError::Upstream {
                status: status.as_u16(),
            });
        }

        let (sender, receiver) = mpsc::channel(CHANNEL_DEPTH);
        let mut body = response.bytes_stream();
        tokio::spawn(async move {
            let mut decoder = SseDecoder::new();
            while let Some(chunk) = body.next().await {
                match chunk {
                    Ok(bytes) => {
                        for fragment in decoder.push(&bytes) {
                            if sender.send(Ok(fragment)).await.is_err() {
                                // Consumer dropped the stream.
                                return;
                            }
                        }
                    }
                    Err(err) => {
                        let _ = sender.send(Err(AdviceError::Transport(err))).await;
                        return;
                    }
                }
            }
            debug!("completion stream ended");
        });

        Ok(AdviceStream {
            inner: ReceiverStream::new(receiver),
        })
    }
}
