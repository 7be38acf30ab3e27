//! Tracing-instrumented driver wrapper
//!
//! Wraps any driver so that opens and closes emit tracing spans. The wrapper
//! registers under `<driver>-traced` in the process-wide registry, at most
//! once per process, via an explicit call - never as an import side effect.

use sqlgate_core::{Driver, Handle, Result};
use std::sync::Arc;
use std::time::Instant;

use crate::registry::global_registry;

/// Suffix appended to the wrapped driver's name.
const TRACED_SUFFIX: &str = "-traced";

/// A driver wrapper that instruments open and close with tracing spans.
pub struct TracedDriver {
    name: String,
    inner: Arc<dyn Driver>,
}

impl TracedDriver {
    /// Wrap a driver. The wrapper reports its identity as `<inner>-traced`.
    pub fn new(inner: Arc<dyn Driver>) -> Self {
        Self {
            name: format!("{}{}", inner.name(), TRACED_SUFFIX),
            inner,
        }
    }

    /// The wrapped driver.
    pub fn inner(&self) -> &Arc<dyn Driver> {
        &self.inner
    }
}

impl Driver for TracedDriver {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self, dsn: &str) -> Result<Arc<dyn Handle>> {
        let span = tracing::info_span!("driver_open", driver = %self.inner.name());
        let _guard = span.enter();

        let started = Instant::now();
        match self.inner.open(dsn) {
            Ok(handle) => {
                tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "opened");
                Ok(Arc::new(TracedHandle { inner: handle }))
            }
            Err(err) => {
                tracing::debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %err,
                    "open failed"
                );
                Err(err)
            }
        }
    }
}

/// Handle wrapper that instruments close.
struct TracedHandle {
    inner: Arc<dyn Handle>,
}

impl Handle for TracedHandle {
    fn driver_name(&self) -> &str {
        self.inner.driver_name()
    }

    fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    fn close(&self) -> Result<()> {
        let span = tracing::info_span!("driver_close", driver = %self.inner.driver_name());
        let _guard = span.enter();
        self.inner.close()
    }
}

/// Register the traced wrapper for `base` in the process-wide registry.
///
/// Registration happens at most once per process and is idempotent: a second
/// call for the same base driver returns the already registered wrapper.
/// Traced drivers are never unregistered.
pub fn register_traced(base: Arc<dyn Driver>) -> Arc<dyn Driver> {
    let traced: Arc<dyn Driver> = Arc::new(TracedDriver::new(base));
    global_registry().write().register_once(traced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlgate_core::SqlGateError;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    struct CountingDriver {
        opens: AtomicU32,
    }

    impl Driver for CountingDriver {
        fn name(&self) -> &str {
            "counting"
        }

        fn open(&self, dsn: &str) -> Result<Arc<dyn Handle>> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            if dsn == "bad" {
                return Err(SqlGateError::Driver("bad dsn".into()));
            }
            Ok(Arc::new(CountingHandle {
                closed: AtomicBool::new(false),
            }))
        }
    }

    struct CountingHandle {
        closed: AtomicBool,
    }

    impl Handle for CountingHandle {
        fn driver_name(&self) -> &str {
            "counting"
        }

        fn is_open(&self) -> bool {
            !self.closed.load(Ordering::SeqCst)
        }

        fn close(&self) -> Result<()> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_traced_driver_name() {
        let base: Arc<dyn Driver> = Arc::new(CountingDriver {
            opens: AtomicU32::new(0),
        });
        let traced = TracedDriver::new(base);
        assert_eq!(traced.name(), "counting-traced");
    }

    #[test]
    fn test_traced_driver_delegates_open() {
        let base = Arc::new(CountingDriver {
            opens: AtomicU32::new(0),
        });
        let traced = TracedDriver::new(base.clone());

        let handle = traced.open("good").expect("open through wrapper");
        assert_eq!(handle.driver_name(), "counting");
        assert!(handle.is_open());
        handle.close().unwrap();
        assert!(!handle.is_open());

        assert!(traced.open("bad").is_err());
        assert_eq!(base.opens.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_register_traced_is_idempotent() {
        let base: Arc<dyn Driver> = Arc::new(CountingDriver {
            opens: AtomicU32::new(0),
        });

        let first = register_traced(base.clone());
        let second = register_traced(base);

        assert!(Arc::ptr_eq(&first, &second));
        assert!(global_registry().read().has("counting-traced"));
    }
}
