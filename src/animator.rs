//! Animated transitions of the visible date window
//!
//! When the active metric changes, the chart's date domain slides to the
//! new window instead of snapping. [`DomainAnimator`] is the pure state
//! machine for that transition: the host feeds it frame times, it hands
//! back the currently displayed domain. [`AnimatedDomain`] layers the
//! cooperative scheduling on top via a [`FrameScheduler`], re-requesting a
//! frame each tick while animating and cancelling on teardown.
//!
//! Everything here runs on one logical thread. There are no locks and no
//! wall-clock reads: time arrives as an argument, which also makes the
//! whole state machine testable with simulated clocks.

use chrono::NaiveDate;
use tracing::debug;

use crate::series::epoch_ms;

/// Default transition length in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 600.0;

/// A pair of date endpoints in epoch milliseconds.
///
/// Stored as `f64` because a mid-animation domain sits at fractional
/// interpolated positions between real dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateDomain {
    start_ms: f64,
    end_ms: f64,
}

impl DateDomain {
    /// Build a domain from two calendar dates (midnight UTC).
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // epoch ms values are far below 2^53
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_ms: epoch_ms(start) as f64,
            end_ms: epoch_ms(end) as f64,
        }
    }

    /// Build a domain directly from epoch-millisecond endpoints.
    #[must_use]
    pub const fn from_epoch_ms(start_ms: f64, end_ms: f64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Window start in epoch milliseconds.
    #[must_use]
    pub const fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Window end in epoch milliseconds.
    #[must_use]
    pub const fn end_ms(&self) -> f64 {
        self.end_ms
    }

    /// Both endpoints interpolated independently toward `to`.
    fn lerp(self, to: Self, p: f64) -> Self {
        Self {
            start_ms: (to.start_ms - self.start_ms).mul_add(p, self.start_ms),
            end_ms: (to.end_ms - self.end_ms).mul_add(p, self.end_ms),
        }
    }
}

/// Injected animation configuration.
///
/// `reduced_motion` mirrors the viewer's accessibility preference: when
/// set, every domain change is instantaneous and the animator never
/// reports itself as animating. It is plain data here, not a hidden
/// global, so animator behavior is a pure function of `(state, config)`.
#[derive(Debug, Clone, Copy)]
pub struct AnimatorConfig {
    /// Transition length in milliseconds
    pub duration_ms: f64,
    /// Replace transitions with instant state changes
    pub reduced_motion: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Animating {
        from: DateDomain,
        to: DateDomain,
        started_at_ms: f64,
    },
}

/// Linear interpolator between two date-domain endpoints.
///
/// State machine: Idle until a retarget with different endpoints arrives,
/// then Animating for `duration_ms`, then Idle at the target. At most one
/// transition is in flight; a retarget mid-animation atomically replaces
/// it, restarting from the *currently displayed* domain so the chart never
/// snaps back to a stale start point.
#[derive(Debug)]
pub struct DomainAnimator {
    displayed: DateDomain,
    phase: Phase,
    config: AnimatorConfig,
}

impl DomainAnimator {
    /// Create an idle animator showing `initial`.
    #[must_use]
    pub const fn new(initial: DateDomain, config: AnimatorConfig) -> Self {
        Self {
            displayed: initial,
            phase: Phase::Idle,
            config,
        }
    }

    /// Request a new target domain.
    ///
    /// A target equal to the displayed domain collapses to Idle. With
    /// reduced motion active the displayed domain jumps straight to the
    /// target; the per-frame scheduler is never needed. Otherwise a fresh
    /// transition starts at `now_ms` from whatever is displayed right now,
    /// superseding any in-flight one.
    pub fn retarget(&mut self, to: DateDomain, now_ms: f64) {
        if self.displayed == to {
            self.phase = Phase::Idle;
            return;
        }
        if self.config.reduced_motion || self.config.duration_ms <= 0.0 {
            self.displayed = to;
            self.phase = Phase::Idle;
            return;
        }
        debug!(
            from_start = self.displayed.start_ms(),
            to_start = to.start_ms(),
            "starting domain transition"
        );
        self.phase = Phase::Animating {
            from: self.displayed,
            to,
            started_at_ms: now_ms,
        };
    }

    /// Advance the transition to frame time `now_ms`.
    ///
    /// Returns true while another frame is needed. Once elapsed time
    /// reaches the configured duration the displayed domain lands exactly
    /// on the target and the animator returns to Idle.
    #[must_use]
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Phase::Animating {
            from,
            to,
            started_at_ms,
        } = self.phase
        else {
            return false;
        };
        let p = ((now_ms - started_at_ms) / self.config.duration_ms).clamp(0.0, 1.0);
        if p >= 1.0 {
            self.displayed = to;
            self.phase = Phase::Idle;
            false
        } else {
            self.displayed = from.lerp(to, p);
            true
        }
    }

    /// The domain to render right now.
    #[must_use]
    pub const fn displayed(&self) -> DateDomain {
        self.displayed
    }

    /// The domain the animator is heading toward (the displayed domain
    /// when idle).
    #[must_use]
    pub const fn target(&self) -> DateDomain {
        match self.phase {
            Phase::Idle => self.displayed,
            Phase::Animating { to, .. } => to,
        }
    }

    /// True exactly while a motion-enabled transition is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }
}

/// Host-side per-frame callback registration.
///
/// The host environment owns the real animation scheduler; this trait is
/// the narrow seam [`AnimatedDomain`] drives it through. `request_frame`
/// must arrange one future call to [`AnimatedDomain::on_frame`];
/// `cancel_frame` must drop a pending request so no callback fires after
/// teardown.
pub trait FrameScheduler {
    /// Schedule one upcoming frame callback.
    fn request_frame(&mut self);
    /// Cancel the pending frame callback, if any.
    fn cancel_frame(&mut self);
}

/// A [`DomainAnimator`] wired to a [`FrameScheduler`].
///
/// Re-requests a frame after every tick while animating, stops requesting
/// the moment the transition completes or is superseded by an instant
/// change, and cancels any pending frame when dropped.
pub struct AnimatedDomain<S: FrameScheduler> {
    animator: DomainAnimator,
    scheduler: S,
    frame_pending: bool,
}

impl<S: FrameScheduler> AnimatedDomain<S> {
    /// Create an idle animated domain.
    pub const fn new(initial: DateDomain, config: AnimatorConfig, scheduler: S) -> Self {
        Self {
            animator: DomainAnimator::new(initial, config),
            scheduler,
            frame_pending: false,
        }
    }

    /// Request a new target domain at frame time `now_ms`.
    pub fn set_target(&mut self, to: DateDomain, now_ms: f64) {
        self.animator.retarget(to, now_ms);
        if self.animator.is_animating() {
            if !self.frame_pending {
                self.scheduler.request_frame();
                self.frame_pending = true;
            }
        } else if self.frame_pending {
            // Instant change (reduced motion or same-domain retarget)
            // supersedes an in-flight transition: drop its frame.
            self.scheduler.cancel_frame();
            self.frame_pending = false;
        }
    }

    /// Frame callback; the host invokes this with the current frame time.
    pub fn on_frame(&mut self, now_ms: f64) {
        self.frame_pending = false;
        if self.animator.tick(now_ms) {
            self.scheduler.request_frame();
            self.frame_pending = true;
        }
    }

    /// The domain to render right now.
    #[must_use]
    pub const fn displayed(&self) -> DateDomain {
        self.animator.displayed()
    }

    /// True exactly while a motion-enabled transition is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// The domain the animator is heading toward.
    #[must_use]
    pub const fn target(&self) -> DateDomain {
        self.animator.target()
    }
}

impl<S: FrameScheduler> Drop for AnimatedDomain<S> {
    fn drop(&mut self) {
        if self.frame_pending {
            self.scheduler.cancel_frame();
        }
    }
}
