//! Cooperative cancellation and deadlines.
//!
//! Conversions are not interrupted mid-stage; the budget is checked at stage
//! boundaries and an exhausted budget aborts the whole conversion.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::error::PatternError;

/// Pipeline stage, reported when a budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Resize and contrast enhancement
    Preprocess,
    /// Palette reduction, dithering or edge detection
    Quantize,
    /// Thread matching
    Match,
    /// Final assembly
    Assemble,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Preprocess => "preprocess",
            Stage::Quantize => "quantize",
            Stage::Match => "match",
            Stage::Assemble => "assemble",
        })
    }
}

/// Optional deadline and cancel flag for one conversion.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use stitch_pattern::ConversionBudget;
///
/// let cancel = Arc::new(AtomicBool::new(false));
/// let budget = ConversionBudget::unlimited()
///     .with_timeout(Duration::from_secs(30))
///     .with_cancel_flag(Arc::clone(&cancel));
///
/// // Another thread may later call:
/// cancel.store(true, Ordering::Relaxed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConversionBudget {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl ConversionBudget {
    /// No deadline, not cancellable.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Abort at the first stage boundary after `deadline`.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abort at the first stage boundary after `timeout` from now.
    ///
    /// A timeout too far out to represent as an `Instant` sets no deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Abort at the first stage boundary after `flag` is set.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Fail if the budget is exhausted before `stage` starts.
    ///
    /// Cancellation is reported ahead of an elapsed deadline.
    pub fn check(&self, stage: Stage) -> Result<(), PatternError> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            tracing::info!(%stage, "Conversion cancelled");
            return Err(PatternError::Cancelled { stage });
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            tracing::warn!(%stage, "Conversion deadline exceeded");
            return Err(PatternError::DeadlineExceeded { stage });
        }
        Ok(())
    }
}
