use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::AtomicUsize;

/// Shared flag used to stop ticking from another thread, e.g. an interrupt
/// handler. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    // Number of checks answered "not cancelled" before the token cancels itself.
    #[cfg(test)]
    checks_left: Option<Arc<AtomicUsize>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Default::default()
    }

    /// Token that cancels itself on check number `checks + 1`.
    #[cfg(test)]
    pub(crate) fn cancel_after_checks(checks: usize) -> Self {
        CancelToken {
            cancelled: Default::default(),
            checks_left: Some(Arc::new(AtomicUsize::new(checks))),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        #[cfg(test)]
        {
            if let Some(ref left) = self.checks_left {
                if left.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)).is_err() {
                    self.cancel();
                }
            }
        }
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[test]
fn test_clones_share_state() {
    let token = CancelToken::new();
    let other = token.clone();
    assert!(!other.is_cancelled());
    token.cancel();
    assert!(other.is_cancelled());
    assert!(token.is_cancelled());
}

#[test]
fn test_cancel_after_checks() {
    let token = CancelToken::cancel_after_checks(2);
    assert!(!token.is_cancelled());
    assert!(!token.is_cancelled());
    assert!(token.is_cancelled());
    assert!(token.is_cancelled());
}
