//! Fault containment for preview runs
//!
//! Whatever goes wrong while previewing (a thrown exception, an engine
//! error or a panic on the Rust side) ends up as a [`PreviewFailure`].

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{FailureKind, PreviewFailure};

pub struct FaultBoundary;

impl FaultBoundary {
    /// Run `f`, turning a panic into an `Internal` failure
    pub fn contain<T>(f: impl FnOnce() -> Result<T, PreviewFailure>) -> Result<T, PreviewFailure> {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!("Preview panicked: {}", message);
                Err(PreviewFailure::internal(message))
            }
        }
    }

    /// Failure for an exception the runtime caught in `phase`
    pub fn from_phase(phase: &str, message: impl Into<String>) -> PreviewFailure {
        let kind = match phase {
            "render" => FailureKind::Render,
            "lifecycle" => FailureKind::Lifecycle,
            "load" => FailureKind::Execution,
            _ => FailureKind::Internal,
        };
        PreviewFailure::new(kind, message)
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contain_passes_results_through() {
        let ok: Result<u32, PreviewFailure> = FaultBoundary::contain(|| Ok(7));
        assert_eq!(ok.unwrap(), 7);

        let err: Result<u32, PreviewFailure> =
            FaultBoundary::contain(|| Err(PreviewFailure::compile("bad")));
        assert_eq!(err.unwrap_err().kind, FailureKind::Compile);
    }

    #[test]
    fn test_contain_catches_panics() {
        let result: Result<(), PreviewFailure> = FaultBoundary::contain(|| panic!("engine exploded"));
        let failure = result.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Internal);
        assert_eq!(failure.message, "engine exploded");
    }

    #[test]
    fn test_from_phase() {
        assert_eq!(FaultBoundary::from_phase("render", "x").kind, FailureKind::Render);
        assert_eq!(FaultBoundary::from_phase("lifecycle", "x").kind, FailureKind::Lifecycle);
        assert_eq!(FaultBoundary::from_phase("???", "x").kind, FailureKind::Internal);
    }
}
