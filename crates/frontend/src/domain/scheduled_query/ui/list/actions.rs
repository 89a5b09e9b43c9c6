//! Mutation delegation.
//!
//! Every mutating action requires an authenticated requestor; without one
//! the action is a silent no-op, not an error. Backend responses that
//! resolve carrying an `error` field are converted into `Err` so dialogs
//! consume a single failure channel.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use contracts::domain::scheduled_query::{MutationResponse, ScheduledQueryPayload};

/// Pending create/update call. `Err` covers both transport failures and
/// backend-reported errors.
pub type MutationFuture = Pin<Box<dyn Future<Output = Result<MutationResponse, String>>>>;

/// Injected backend call (create or update).
pub type BackendMutation = Arc<dyn Fn(ScheduledQueryPayload) -> MutationFuture + Send + Sync>;

/// Delegate used by the dialogs; `None` means the action was a logged-out
/// no-op and nothing is in flight.
pub type SubmitFn = Arc<dyn Fn(ScheduledQueryPayload) -> Option<MutationFuture> + Send + Sync>;

/// Stamp the requestor into a payload, or `None` when logged out.
pub fn with_requestor(
    mut payload: ScheduledQueryPayload,
    requestor: Option<&str>,
) -> Option<ScheduledQueryPayload> {
    let requestor = requestor?;
    payload.requestor = Some(requestor.to_string());
    Some(payload)
}

/// Lift a backend-reported `error` field into `Err`.
pub fn into_result(response: MutationResponse) -> Result<MutationResponse, String> {
    match response.error {
        Some(error) => Err(error),
        None => Ok(response),
    }
}

/// Create/update delegation: no-op when logged out, otherwise stamp the
/// requestor, invoke the backend, and normalize the failure channel.
pub fn submit_with_requestor(
    backend: &BackendMutation,
    payload: ScheduledQueryPayload,
    requestor: Option<&str>,
) -> Option<MutationFuture> {
    let payload = with_requestor(payload, requestor)?;
    let pending = backend(payload);
    Some(Box::pin(async move { into_result(pending.await?) }))
}

/// Delete delegation: invokes the callback once and reports whether it ran,
/// so the caller knows to close the preview. The close is optimistic; the
/// call's completion is not awaited.
pub fn delete_with_requestor(
    fid: &str,
    requestor: Option<&str>,
    delete: impl Fn(String),
) -> bool {
    if requestor.is_none() {
        return false;
    }
    delete(fid.to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::{Context, Poll, Waker};

    fn payload(query: &str) -> ScheduledQueryPayload {
        ScheduledQueryPayload {
            query: query.into(),
            refresh_interval: 60,
            ..Default::default()
        }
    }

    /// The futures under test are ready immediately; one poll resolves them.
    fn poll_ready<T>(mut fut: Pin<Box<dyn Future<Output = T>>>) -> T {
        let mut cx = Context::from_waker(Waker::noop());
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(value) => value,
            Poll::Pending => panic!("future was not ready"),
        }
    }

    fn backend_returning(response: Result<MutationResponse, String>) -> BackendMutation {
        Arc::new(move |_payload| {
            let response = response.clone();
            Box::pin(async move { response })
        })
    }

    #[test]
    fn with_requestor_merges_identity() {
        let merged = with_requestor(payload("SELECT 1"), Some("usr")).unwrap();
        assert_eq!(merged.requestor.as_deref(), Some("usr"));
    }

    #[test]
    fn with_requestor_is_noop_when_logged_out() {
        assert_eq!(with_requestor(payload("SELECT 1"), None), None);
    }

    #[test]
    fn submit_resolves_with_backend_result() {
        let backend = backend_returning(Ok(MutationResponse::default()));
        let pending = submit_with_requestor(&backend, payload("SELECT 1"), Some("usr")).unwrap();
        assert_eq!(poll_ready(pending), Ok(MutationResponse::default()));
    }

    #[test]
    fn submit_rejects_on_error_field() {
        let backend = backend_returning(Ok(MutationResponse {
            error: Some("quota exceeded".into()),
            query: None,
        }));
        let pending = submit_with_requestor(&backend, payload("SELECT 1"), Some("usr")).unwrap();
        assert_eq!(poll_ready(pending), Err("quota exceeded".to_string()));
    }

    #[test]
    fn submit_propagates_transport_errors() {
        let backend = backend_returning(Err("HTTP 502".into()));
        let pending = submit_with_requestor(&backend, payload("SELECT 1"), Some("usr")).unwrap();
        assert_eq!(poll_ready(pending), Err("HTTP 502".to_string()));
    }

    #[test]
    fn submit_is_noop_when_logged_out() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let backend: BackendMutation = Arc::new(move |_payload| {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { Ok(MutationResponse::default()) })
        });
        assert!(submit_with_requestor(&backend, payload("SELECT 1"), None).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn delete_runs_once_with_the_fid() {
        let seen = RefCell::new(Vec::<String>::new());
        let closed = delete_with_requestor("usr:9", Some("usr"), |fid| {
            seen.borrow_mut().push(fid);
        });
        assert!(closed);
        assert_eq!(seen.borrow().as_slice(), ["usr:9".to_string()]);
    }

    #[test]
    fn delete_is_noop_when_logged_out() {
        let seen = RefCell::new(Vec::<String>::new());
        let closed = delete_with_requestor("usr:9", None, |fid| {
            seen.borrow_mut().push(fid);
        });
        assert!(!closed);
        assert!(seen.borrow().is_empty());
    }
}
