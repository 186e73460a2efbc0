//! # Submission Controller
//!
//! Drives one submit attempt through the cycle
//! `Idle -> Validating -> {Blocked | Loading} -> Redirected`.
//!
//! ## Invariants
//! - Validity is read from the last recompute, never re-triggered here
//! - A blocked attempt touches every field and stays `Idle`
//! - The role is captured by value when the cycle is accepted
//! - The deferred completion is revocable; once revoked the Navigator is
//!   never called for that cycle
//! - The Navigator is called at most once per cycle

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::observability::{log_event_with_fields, Event, Logger};

use super::errors::{FormError, FormResult};
use super::model::Role;
use super::navigator::Navigator;
use super::state::FormState;

/// Simulated backend latency
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Form state shared between the mounted view and its pending completion
pub type SharedFormState = Arc<Mutex<FormState>>;

/// Lock the shared form state
pub(crate) fn lock_state(state: &Mutex<FormState>) -> FormResult<MutexGuard<'_, FormState>> {
    state.lock().map_err(|_| FormError::StatePoisoned)
}

/// Landing view after a successful registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Admin,
    User,
}

impl Destination {
    /// `Admin` for the admin role, `User` for anything else
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Destination::Admin,
            _ => Destination::User,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Destination::Admin => "/admin",
            Destination::User => "/user",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Form invalid; all fields now touched, nothing scheduled
    Blocked { failing: usize },
    /// Loading entered, completion scheduled
    Accepted { cycle: Uuid, destination: Destination },
    /// A cycle is already loading or finished
    Ignored,
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }
}

/// Revocation handle for a scheduled completion
#[derive(Debug)]
pub struct CompletionHandle {
    cycle: Uuid,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<bool>,
}

impl CompletionHandle {
    pub fn cycle(&self) -> Uuid {
        self.cycle
    }

    /// Revoke the completion
    ///
    /// The flag is checked under the form state lock before any side effect,
    /// so revoking while holding that lock is final.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task; `true` if the completion was applied
    ///
    /// A task that panicked (e.g. inside `Navigator::redirect`) is logged as
    /// a failure; an aborted one is a plain cancellation.
    pub async fn wait(self) -> bool {
        match self.task.await {
            Ok(applied) => applied,
            Err(e) if e.is_cancelled() => false,
            Err(e) => {
                Logger::error(
                    Event::SubmissionFailed.as_str(),
                    &[
                        ("cycle", self.cycle.to_string().as_str()),
                        ("error", e.to_string().as_str()),
                    ],
                );
                false
            }
        }
    }
}

/// Orchestrates submit attempts for one mounted form
pub struct SubmissionController {
    navigator: Arc<dyn Navigator>,
    delay: Duration,
    pending: Option<CompletionHandle>,
}

impl SubmissionController {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self::with_delay(navigator, DEFAULT_SUBMIT_DELAY)
    }

    pub fn with_delay(navigator: Arc<dyn Navigator>, delay: Duration) -> Self {
        Self {
            navigator,
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a scheduled completion has not run yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Handle a submit attempt
    ///
    /// Must be called from within a tokio runtime when the form is valid.
    pub fn submit(&mut self, state: &SharedFormState) -> FormResult<SubmitOutcome> {
        let mut guard = lock_state(state)?;

        if guard.is_locked() {
            log_event_with_fields(Event::SubmitIgnored, &[("phase", phase_name(&guard))]);
            return Ok(SubmitOutcome::Ignored);
        }

        if !guard.is_valid() {
            guard.mark_all_touched();
            let failing = guard.errors().len();
            log_event_with_fields(
                Event::SubmitBlocked,
                &[("failing", failing.to_string().as_str())],
            );
            return Ok(SubmitOutcome::Blocked { failing });
        }

        let runtime = Handle::try_current().map_err(|_| FormError::SchedulerUnavailable)?;

        let destination = Destination::for_role(guard.data().role);
        let cycle = Uuid::new_v4();
        guard.begin_loading();

        let handle = self.schedule_completion(&runtime, state, cycle, destination);
        drop(guard);

        log_event_with_fields(
            Event::SubmitAccepted,
            &[
                ("cycle", cycle.to_string().as_str()),
                ("delay_ms", self.delay.as_millis().to_string().as_str()),
                ("destination", destination.path()),
            ],
        );

        self.pending = Some(handle);
        Ok(SubmitOutcome::Accepted { cycle, destination })
    }

    fn schedule_completion(
        &self,
        runtime: &Handle,
        state: &SharedFormState,
        cycle: Uuid,
        destination: Destination,
    ) -> CompletionHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = runtime.spawn(complete_after(
            self.delay,
            Arc::downgrade(state),
            Arc::clone(&cancelled),
            Arc::clone(&self.navigator),
            cycle,
            destination,
        ));

        CompletionHandle {
            cycle,
            cancelled,
            task,
        }
    }

    /// Revoke the pending completion, if any
    ///
    /// Returns true when a completion that had not run yet was revoked.
    pub fn cancel_pending(&mut self, state: &Mutex<FormState>) -> bool {
        let Some(handle) = self.pending.take() else {
            return false;
        };

        // Serialize with a completion that may be running right now.
        let guard = state.lock().unwrap_or_else(PoisonError::into_inner);
        let revoked = guard.is_loading();
        handle.cancel();
        drop(guard);

        if revoked {
            log_event_with_fields(
                Event::SubmissionCancelled,
                &[("cycle", handle.cycle().to_string().as_str())],
            );
        }
        revoked
    }

    /// Wait for the pending completion; `true` if it was applied
    pub async fn settle(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => handle.wait().await,
            None => false,
        }
    }
}

async fn complete_after(
    delay: Duration,
    state: Weak<Mutex<FormState>>,
    cancelled: Arc<AtomicBool>,
    navigator: Arc<dyn Navigator>,
    cycle: Uuid,
    destination: Destination,
) -> bool {
    tokio::time::sleep(delay).await;

    let cycle = cycle.to_string();
    let Some(state) = state.upgrade() else {
        log_event_with_fields(Event::SubmissionSuppressed, &[("cycle", cycle.as_str())]);
        return false;
    };

    let mut guard = match lock_state(&state) {
        Ok(guard) => guard,
        Err(e) => {
            Logger::error(
                Event::SubmissionSuppressed.as_str(),
                &[("code", e.code()), ("cycle", cycle.as_str())],
            );
            return false;
        }
    };

    if cancelled.load(Ordering::SeqCst) {
        log_event_with_fields(Event::SubmissionSuppressed, &[("cycle", cycle.as_str())]);
        return false;
    }

    guard.finish_submission();
    navigator.redirect(destination.path());
    drop(guard);

    log_event_with_fields(
        Event::SubmissionCompleted,
        &[("cycle", cycle.as_str()), ("destination", destination.path())],
    );
    true
}

fn phase_name(state: &FormState) -> &'static str {
    if state.is_submitted() {
        "redirected"
    } else {
        "loading"
    }
}
