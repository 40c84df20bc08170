//! Bounded calls to optional external services.
//!
//! The call runs on a detached worker thread; if it does not answer within the
//! timeout the caller moves on and the late result is dropped.

use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};

use crate::errors::{MindcastResult, ServiceError};

/// Run `call` with an upper bound on how long the caller waits.
///
/// Returns `ServiceError::Timeout` when the deadline passes and
/// `ServiceError::Failed` when the worker dies without answering.
pub fn call_with_timeout<T, F>(service: &str, timeout: Duration, call: F) -> MindcastResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> MindcastResult<T> + Send + 'static,
{
    let (tx, rx) = bounded(1);
    let spawned = std::thread::Builder::new()
        .name(format!("mindcast-{service}"))
        .spawn(move || {
            // Receiver may be gone after a timeout.
            let _ = tx.send(call());
        });
    if let Err(e) = spawned {
        return Err(ServiceError::Unavailable {
            service: service.to_string(),
            reason: e.to_string(),
        }
        .into());
    }

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(ServiceError::Timeout {
            service: service.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
        .into()),
        Err(RecvTimeoutError::Disconnected) => Err(ServiceError::Failed {
            service: service.to_string(),
            reason: "worker exited without a response".to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MindcastError;

    #[test]
    fn fast_call_returns_value() {
        let v = call_with_timeout("test", Duration::from_secs(1), || Ok(42)).unwrap();
        assert_eq!(v, 42);
    }

    #[test]
    fn slow_call_times_out() {
        let err = call_with_timeout("slow", Duration::from_millis(20), || {
            std::thread::sleep(Duration::from_millis(500));
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            MindcastError::ServiceError(ServiceError::Timeout { .. })
        ));
    }

    #[test]
    fn panicking_call_reports_failure() {
        let err = call_with_timeout::<(), _>("boom", Duration::from_secs(1), || {
            panic!("service exploded")
        })
        .unwrap_err();
        assert!(matches!(
            err,
            MindcastError::ServiceError(ServiceError::Failed { .. })
        ));
    }
}
