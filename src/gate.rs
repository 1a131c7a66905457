//! Per-period generation gate.
//!
//! Two runs for the same planning period would each keep their own
//! conflict tracker, and committing both could double-book rooms or
//! faculty. The gate admits at most one in-flight run per period key;
//! runs for different periods proceed independently.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::models::ScheduleResult;
use crate::scheduler::{ScheduleRequest, SchedulerOptions, TimetableScheduler};

/// Registry of planning periods with a run in progress.
///
/// Share one gate (e.g. in an `Arc`) across every request handler that
/// may trigger generation.
#[derive(Debug, Default)]
pub struct GenerationGate {
    in_flight: Mutex<HashSet<String>>,
}

/// Proof that the holder owns the period. Releases it on drop.
#[derive(Debug)]
pub struct GenerationPermit<'g> {
    gate: &'g GenerationGate,
    period: String,
}

impl GenerationGate {
    /// Creates a gate with no runs in flight.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // The set stays consistent even if a holder panicked mid-insert.
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims the period without waiting.
    ///
    /// # Errors
    /// [`Error::GenerationInProgress`] if another permit for the period
    /// is alive.
    pub fn try_acquire(&self, period: impl Into<String>) -> Result<GenerationPermit<'_>> {
        let period = period.into();
        if !self.lock().insert(period.clone()) {
            tracing::warn!(period = %period, "generation already in progress");
            return Err(Error::GenerationInProgress { period });
        }
        tracing::debug!(period = %period, "generation permit acquired");
        Ok(GenerationPermit { gate: self, period })
    }

    /// Whether a run for the period is in flight.
    pub fn is_running(&self, period: &str) -> bool {
        self.lock().contains(period)
    }

    /// Runs the scheduler while holding the period's permit.
    pub fn run(
        &self,
        period: impl Into<String>,
        request: &ScheduleRequest,
        options: SchedulerOptions,
    ) -> Result<ScheduleResult> {
        let _permit = self.try_acquire(period)?;
        TimetableScheduler::new()
            .with_options(options)
            .schedule_request(request)
    }
}

impl GenerationPermit<'_> {
    /// Planning period held by this permit.
    pub fn period(&self) -> &str {
        &self.period
    }
}

impl Drop for GenerationPermit<'_> {
    fn drop(&mut self) {
        self.gate.lock().remove(&self.period);
        tracing::debug!(period = %self.period, "generation permit released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Faculty, Room};
    use std::sync::Barrier;

    #[test]
    fn test_same_period_rejected() {
        let gate = GenerationGate::new();
        let permit = gate.try_acquire("2026-fall").unwrap();
        assert_eq!(permit.period(), "2026-fall");
        assert!(gate.is_running("2026-fall"));

        let err = gate.try_acquire("2026-fall").unwrap_err();
        assert!(matches!(err, Error::GenerationInProgress { ref period } if period == "2026-fall"));
    }

    #[test]
    fn test_released_on_drop() {
        let gate = GenerationGate::new();
        {
            let _permit = gate.try_acquire("p").unwrap();
        }
        assert!(!gate.is_running("p"));
        assert!(gate.try_acquire("p").is_ok());
    }

    #[test]
    fn test_periods_independent() {
        let gate = GenerationGate::new();
        let _a = gate.try_acquire("2026-fall").unwrap();
        let _b = gate.try_acquire("2027-spring").unwrap();
        assert!(gate.is_running("2026-fall"));
        assert!(gate.is_running("2027-spring"));
    }

    #[test]
    fn test_run_releases_permit() {
        let gate = GenerationGate::new();
        let request = ScheduleRequest::new(
            vec![Course::new(1, "X", 1)],
            vec![Room::new(1, "A", 30)],
            Vec::new(),
            vec![Faculty::new(1, "Ada")],
        )
        .with_standard_week();

        let result = gate
            .run("p", &request, SchedulerOptions::default())
            .unwrap();
        assert_eq!(result.placed_count(), 1);
        assert!(!gate.is_running("p"));

        // A failing run releases the permit too.
        let bad = ScheduleRequest::default();
        assert!(gate.run("p", &bad, SchedulerOptions::default()).is_err());
        assert!(!gate.is_running("p"));
    }

    #[test]
    fn test_concurrent_claims() {
        let gate = GenerationGate::new();
        let barrier = Barrier::new(8);
        let wins: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        match gate.try_acquire("shared") {
                            Ok(permit) => {
                                // Hold until every thread has tried.
                                barrier.wait();
                                drop(permit);
                                1
                            }
                            Err(_) => {
                                barrier.wait();
                                0
                            }
                        }
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });
        assert_eq!(wins, 1);
        assert!(!gate.is_running("shared"));
    }
}
