// SPDX-License-Identifier: MIT

//! Result codes and error types for the camera view core

use std::fmt;

/// Outcome code for camera lifecycle operations
///
/// Lifecycle calls (start/stop capture, start/stop recording) report one of
/// these instead of raising an error; callers branch on the code and the
/// core never retries on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraResult {
    /// The operation completed
    Success,
    /// The platform denied or lost access to the device
    AccessError,
    /// No camera has been selected on the view
    NoCameraSelected,
    /// The requested capture resolution is not offered by the camera
    ResolutionNotAvailable,
}

impl CameraResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CameraResult::Success)
    }
}

impl fmt::Display for CameraResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraResult::Success => write!(f, "success"),
            CameraResult::AccessError => write!(f, "camera access error"),
            CameraResult::NoCameraSelected => write!(f, "no camera selected"),
            CameraResult::ResolutionNotAvailable => {
                write!(f, "requested resolution not available")
            }
        }
    }
}

/// Errors constructing the decode pipeline
#[derive(Debug, Clone)]
pub enum PipelineError {
    /// No tokio runtime was reachable from the constructing thread
    RuntimeUnavailable(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::RuntimeUnavailable(msg) => {
                write!(f, "No tokio runtime available for decode tasks: {}", msg)
            }
        }
    }
}

impl std::error::Error for PipelineError {}
