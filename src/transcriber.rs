//! Drives per-segment transcription and reassembles the ordered transcript.
//!
//! Segments are dispatched concurrently (bounded by a semaphore) and their
//! results are slotted back by segment index, so the merged transcript is
//! deterministic regardless of completion order. The first unrecoverable
//! segment failure cancels the remaining work and aborts the whole job.

use std::fmt;
use std::sync::Arc;

use log::{error, info};
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::audio::AudioSegment;
use crate::clients::{TranscriptionClient, TranscriptionError};
use crate::config::DEFAULT_MAX_IN_FLIGHT;
use crate::progress::{format_duration, ProgressState, ProgressUpdate};

/// Ordered concatenation of all segment texts for one recording.
///
/// Immutable once assembled; moved by value into document generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub fn new(text: String) -> Self {
        Transcript(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transcription stage: fans segments out to the remote service and merges
/// the results in segment order.
pub struct Transcriber {
    client: Arc<dyn TranscriptionClient>,
    max_in_flight: usize,
}

impl Transcriber {
    pub fn new(client: Arc<dyn TranscriptionClient>) -> Self {
        Self {
            client,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Transcribe all segments and merge them into one transcript.
    ///
    /// `on_progress` is invoked after each segment resolves; the ETA in the
    /// update is unavailable until the first resolution. `cancel` stops
    /// in-flight work cooperatively; cancellation surfaces as
    /// [`TranscriptionError::Cancelled`].
    pub async fn transcribe<F>(
        &self,
        segments: Vec<AudioSegment>,
        bias_prompt: Option<&str>,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Result<Transcript, TranscriptionError>
    where
        F: FnMut(ProgressUpdate),
    {
        let total = segments.len();
        if total == 0 {
            return Err(TranscriptionError::NoSegments);
        }

        // Empty or whitespace prompts are sent as absent.
        let prompt: Option<String> = bias_prompt
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        // Child token: a segment failure cancels our own workers without
        // cancelling the caller's token.
        let cancel = cancel.child_token();
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let (tx, mut rx) = mpsc::channel::<(usize, Result<String, TranscriptionError>)>(total);

        let mut handles = Vec::with_capacity(total);
        for segment in segments {
            let client = Arc::clone(&self.client);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();
            let prompt = prompt.clone();
            let tx = tx.clone();

            handles.push(tokio::spawn(async move {
                let index = segment.index;
                let filename = segment.filename();
                let result = tokio::select! {
                    _ = cancel.cancelled() => Err(TranscriptionError::Cancelled),
                    permit = semaphore.acquire_owned() => match permit {
                        Ok(_permit) => tokio::select! {
                            _ = cancel.cancelled() => Err(TranscriptionError::Cancelled),
                            result = client.transcribe_segment(
                                segment.bytes,
                                filename,
                                prompt.as_deref(),
                            ) => result,
                        },
                        Err(_) => Err(TranscriptionError::Cancelled),
                    },
                };
                // Receiver lives until every worker has reported.
                let _ = tx.send((index, result)).await;
            }));
        }
        drop(tx);

        let mut state = ProgressState::new(total);
        let mut slots: Vec<Option<String>> = (0..total).map(|_| None).collect();
        let mut first_error: Option<TranscriptionError> = None;

        while let Some((index, result)) = rx.recv().await {
            match result {
                Ok(text) => match slots.get_mut(index) {
                    Some(slot) => {
                        *slot = Some(text);
                        let update = state.record_done();
                        info!(
                            "Segment {} transcribed ({}/{}, {:.0}%, ETA {})",
                            index,
                            update.done,
                            update.total,
                            update.percent(),
                            update
                                .eta
                                .map(format_duration)
                                .unwrap_or_else(|| "unknown".to_string()),
                        );
                        on_progress(update);
                    }
                    None => {
                        error!("Segment index {} out of range for {} segments", index, total);
                        cancel.cancel();
                        if first_error.is_none() {
                            first_error = Some(TranscriptionError::Worker(format!(
                                "segment index {} out of range for {} segments",
                                index, total
                            )));
                        }
                    }
                },
                Err(TranscriptionError::Cancelled) => {
                    if first_error.is_none() {
                        first_error = Some(TranscriptionError::Cancelled);
                    }
                }
                Err(cause) => {
                    error!("Segment {} failed: {}", index, cause);
                    cancel.cancel();
                    if first_error.is_none() {
                        first_error = Some(TranscriptionError::Segment {
                            segment_index: index,
                            cause: Box::new(cause),
                        });
                    }
                }
            }
        }

        for handle in handles {
            if let Err(e) = handle.await {
                if first_error.is_none() {
                    first_error = Some(TranscriptionError::Worker(e.to_string()));
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }

        Ok(merge(slots))
    }
}

/// Concatenate resolved texts in segment-index order with single-space
/// separators, skipping segments the service returned no text for. No
/// overlap trimming: chunk boundaries are assumed to fall on pauses.
fn merge(slots: Vec<Option<String>>) -> Transcript {
    let mut merged = String::new();
    for text in slots.into_iter().flatten() {
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if !merged.is_empty() {
            merged.push(' ');
        }
        merged.push_str(text);
    }
    Transcript::new(merged)
}
