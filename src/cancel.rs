// Copyright (C) Brian G. Milnes 2025

//! Cooperative cancellation
//!
//! Suspendable operations (reference search, multi-document rewrites)
//! observe the token and unwind without emitting a partial result.

pub mod cancel {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Raised through `anyhow::Result` when an operation is cancelled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cancelled;

    impl std::fmt::Display for Cancelled {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "operation cancelled")
        }
    }

    impl std::error::Error for Cancelled {}

    /// A cheap clonable cancellation flag shared between the host and the
    /// engine.
    #[derive(Debug, Clone, Default)]
    pub struct CancelToken {
        flag: Arc<AtomicBool>,
    }

    impl CancelToken {
        pub fn new() -> CancelToken {
            CancelToken::default()
        }

        pub fn cancel(&self) {
            self.flag.store(true, Ordering::Relaxed);
        }

        pub fn is_cancelled(&self) -> bool {
            self.flag.load(Ordering::Relaxed)
        }

        /// Check point for suspendable loops.
        pub fn check(&self) -> Result<(), Cancelled> {
            if self.is_cancelled() {
                Err(Cancelled)
            } else {
                Ok(())
            }
        }
    }
}
