// SPDX-License-Identifier: MIT

//! Concurrent frame decode pipeline
//!
//! The capture backend delivers frames faster than barcode decoding can
//! keep up, so the pipeline admits work instead of queueing it: only every
//! Nth frame proceeds, and only while fewer than the configured maximum of
//! decodes are in flight. Everything else is dropped. Admitted frames decode
//! on the tokio blocking pool as independent tasks with no ordering
//! guarantee between them.
//!
//! Observers registered with [`FrameDecodePipeline::subscribe`] are invoked
//! on the decode task's thread; callers marshal results to their own
//! execution context.

use crate::backends::types::CameraFrame;
use crate::decode::decoder::{FrameDecoder, RxingDecoder};
use crate::decode::luminance;
use crate::decode::options::{DecodeOptions, DecodeResult};
use crate::errors::PipelineError;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, RwLock};
use tokio::runtime::Handle;
use tracing::{debug, trace};

/// Frame admission and deduplication settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Decode every Nth received frame
    pub frame_rate_divisor: u32,
    /// Upper bound on simultaneously decoding frames
    pub max_concurrent_decodes: usize,
    /// Suppress result sets already emitted for the previous match
    pub filter_duplicates: bool,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            frame_rate_divisor: 10,
            max_concurrent_decodes: 3,
            filter_duplicates: false,
        }
    }
}

/// What happened to a frame handed to [`FrameDecodePipeline::process_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDisposition {
    /// Dropped: not on the frame-rate divisor boundary
    SkippedFrameRate,
    /// Dropped: the concurrent decode limit is reached
    SkippedBusy,
    /// Accepted; a decode task was spawned
    Queued,
    /// Dropped: the pipeline has been closed
    Closed,
}

type Observer = Arc<dyn Fn(&[DecodeResult]) + Send + Sync>;

/// Admission state; one lock guards the check-and-increment so the limit
/// holds even with several capture threads delivering frames
#[derive(Debug, Default)]
struct ThrottleState {
    frame_counter: u64,
    in_flight: usize,
}

struct Shared {
    config: ThrottleConfig,
    options: RwLock<DecodeOptions>,
    decoder: Box<dyn FrameDecoder>,
    throttle: Mutex<ThrottleState>,
    idle: Condvar,
    /// Last emitted result set, compared against for deduplication
    previous_results: Mutex<Option<Vec<DecodeResult>>>,
    observers: RwLock<Vec<Observer>>,
    closed: AtomicBool,
}

impl Shared {
    /// Runs inside the blocking task, after admission
    fn decode_frame(&self, frame: CameraFrame) {
        let options = self.options.read().unwrap().clone();

        let results = match luminance::luma_from_frame(&frame) {
            Some(luma) => self.decoder.decode(luma, &options),
            None => Vec::new(),
        };
        if results.is_empty() {
            trace!(width = frame.width, height = frame.height, "No barcode in frame");
            return;
        }

        let mut previous = self.previous_results.lock().unwrap();
        let emit = if self.config.filter_duplicates {
            match previous.as_deref() {
                // Emit only when at least one result was not in the last
                // emitted set.
                Some(prev) => results.iter().any(|r| !prev.contains(r)),
                None => true,
            }
        } else {
            true
        };
        if !emit {
            trace!(count = results.len(), "Duplicate result set suppressed");
            return;
        }

        *previous = Some(results.clone());
        drop(previous);

        debug!(count = results.len(), "Barcode detected");
        // Snapshot the observer list so callbacks run without the lock held;
        // an observer may subscribe further observers on the same pipeline.
        let observers: Vec<Observer> = self.observers.read().unwrap().to_vec();
        for observer in &observers {
            observer(&results);
        }
    }
}

/// Decrements the in-flight count on every exit path, panicking decoders
/// included
struct InFlightGuard {
    shared: Arc<Shared>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut throttle = self.shared.throttle.lock().unwrap();
        throttle.in_flight = throttle.in_flight.saturating_sub(1);
        self.shared.idle.notify_all();
    }
}

/// Samples the live frame stream and runs throttled, deduplicated barcode
/// decoding
///
/// Cheap to clone; all clones share admission state and observers.
#[derive(Clone)]
pub struct FrameDecodePipeline {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl FrameDecodePipeline {
    /// Build a pipeline on the current tokio runtime with the rxing decoder
    pub fn new(config: ThrottleConfig, options: DecodeOptions) -> Result<Self, PipelineError> {
        let runtime = Handle::try_current()
            .map_err(|err| PipelineError::RuntimeUnavailable(err.to_string()))?;
        Ok(Self::with_decoder(
            runtime,
            config,
            options,
            Box::new(RxingDecoder),
        ))
    }

    /// Build a pipeline on an explicit runtime handle
    pub fn with_runtime(
        runtime: Handle,
        config: ThrottleConfig,
        options: DecodeOptions,
    ) -> Self {
        Self::with_decoder(runtime, config, options, Box::new(RxingDecoder))
    }

    /// Build a pipeline with a custom decoder implementation
    pub fn with_decoder(
        runtime: Handle,
        config: ThrottleConfig,
        options: DecodeOptions,
        decoder: Box<dyn FrameDecoder>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                options: RwLock::new(options),
                decoder,
                throttle: Mutex::new(ThrottleState::default()),
                idle: Condvar::new(),
                previous_results: Mutex::new(None),
                observers: RwLock::new(Vec::new()),
                closed: AtomicBool::new(false),
            }),
            runtime,
        }
    }

    /// Replace the decode options; applies to decodes admitted afterwards
    pub fn set_options(&self, options: DecodeOptions) {
        *self.shared.options.write().unwrap() = options;
    }

    /// Register an observer for non-duplicate, non-empty result sets
    pub fn subscribe(&self, observer: impl Fn(&[DecodeResult]) + Send + Sync + 'static) {
        self.shared.observers.write().unwrap().push(Arc::new(observer));
    }

    /// The last emitted result set, if any
    pub fn last_results(&self) -> Option<Vec<DecodeResult>> {
        self.shared.previous_results.lock().unwrap().clone()
    }

    /// Forget the last emitted result set (e.g. when capture restarts)
    pub fn clear_results(&self) {
        *self.shared.previous_results.lock().unwrap() = None;
    }

    /// Currently decoding frame count
    pub fn in_flight(&self) -> usize {
        self.shared.throttle.lock().unwrap().in_flight
    }

    /// Stop admitting frames; in-flight decodes run to completion
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Block until every admitted decode has finished
    pub fn wait_idle(&self) {
        let mut throttle = self.shared.throttle.lock().unwrap();
        while throttle.in_flight > 0 {
            throttle = self.shared.idle.wait(throttle).unwrap();
        }
    }

    /// Offer a frame to the pipeline
    ///
    /// Admission applies the frame-rate divisor first, then the concurrency
    /// limit; both rejections are silent drops, reported only through the
    /// returned disposition. An admitted frame decodes on the blocking pool.
    pub fn process_frame(&self, frame: CameraFrame) -> FrameDisposition {
        if self.is_closed() {
            return FrameDisposition::Closed;
        }

        let divisor = u64::from(self.shared.config.frame_rate_divisor.max(1));
        {
            let mut throttle = self.shared.throttle.lock().unwrap();
            throttle.frame_counter += 1;
            if throttle.frame_counter % divisor != 0 {
                return FrameDisposition::SkippedFrameRate;
            }
            if throttle.in_flight >= self.shared.config.max_concurrent_decodes {
                debug!(
                    in_flight = throttle.in_flight,
                    "Decode limit reached, dropping frame"
                );
                return FrameDisposition::SkippedBusy;
            }
            throttle.in_flight += 1;
        }

        let shared = Arc::clone(&self.shared);
        self.runtime.spawn_blocking(move || {
            let _guard = InFlightGuard {
                shared: Arc::clone(&shared),
            };
            shared.decode_frame(frame);
        });
        FrameDisposition::Queued
    }
}
