use std::time::{Duration, Instant};

use crate::settings::{IntroSettings, TimingSettings};

/// Lifecycle of an intro screen. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Loading,
    Failed,
    Loaded,
    Revealed,
    Dismissing,
    Dismissed,
}

/// One-shot timer request produced by a state transition.
///
/// The `token` must be handed back when the timer fires; deliveries carrying
/// a stale token are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub token: u64,
    pub delay: Duration,
}

/// Rendering-independent state machine behind the intro screen.
///
/// Every time-dependent query takes the current [`Instant`] so the machine
/// can be driven by any clock.
#[derive(Debug, Clone)]
pub struct IntroState {
    phase: Phase,
    target_size: f32,
    timing: TimingSettings,
    loading_started_at: Option<Instant>,
    loaded_at: Option<Instant>,
    dismiss_started_at: Option<Instant>,
    button_visible: bool,
    timer_token: u64,
    disposed: bool,
}

impl IntroState {
    pub fn new(settings: &IntroSettings) -> Self {
        Self {
            phase: Phase::NotStarted,
            target_size: settings.target_title_size(),
            timing: settings.timing,
            loading_started_at: None,
            loaded_at: None,
            dismiss_started_at: None,
            button_visible: false,
            timer_token: 0,
            disposed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn button_visible(&self) -> bool {
        self.button_visible
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether the "GO!" control accepts presses.
    pub fn is_interactive(&self) -> bool {
        !self.disposed && self.phase == Phase::Revealed
    }

    /// Whether the view changes over time and needs animation ticks.
    ///
    /// A revealed screen keeps animating until the title reaches its target
    /// size, which happens when the title growth outlasts the reveal delay.
    pub fn is_animating(&self, now: Instant) -> bool {
        if self.disposed {
            return false;
        }

        match self.phase {
            Phase::Loading | Phase::Loaded | Phase::Dismissing => true,
            Phase::Revealed => self.title_size_at(now) < self.target_size,
            Phase::NotStarted | Phase::Failed | Phase::Dismissed => false,
        }
    }

    /// Move to `Loading`. Returns `false` if a fetch was already issued.
    pub fn begin_loading(&mut self, now: Instant) -> bool {
        if self.disposed || self.phase != Phase::NotStarted {
            return false;
        }

        self.phase = Phase::Loading;
        self.loading_started_at = Some(now);
        true
    }

    /// Record a successful image load.
    ///
    /// The first call starts the title animation and requests the reveal
    /// timer; any repeated delivery is ignored.
    pub fn image_loaded(&mut self, now: Instant) -> Option<TimerRequest> {
        if self.disposed || self.phase != Phase::Loading {
            log::debug!("ignoring image load in phase {:?}", self.phase);
            return None;
        }

        self.phase = Phase::Loaded;
        self.loaded_at = Some(now);
        Some(self.next_timer(self.timing.reveal_delay))
    }

    /// Record a failed image load. Failure is terminal, no timer is armed.
    pub fn image_failed(&mut self) -> bool {
        if self.disposed || self.phase != Phase::Loading {
            return false;
        }

        self.phase = Phase::Failed;
        true
    }

    /// Handle the reveal timer. Returns `true` if the button became visible.
    pub fn reveal_elapsed(&mut self, token: u64) -> bool {
        if !self.accepts_timer(token) || self.phase != Phase::Loaded {
            log::debug!("dropping stale reveal timer {token}");
            return false;
        }

        self.phase = Phase::Revealed;
        self.button_visible = true;
        true
    }

    /// Handle a press of the "GO!" control and request the transition timer.
    pub fn press(&mut self, now: Instant) -> Option<TimerRequest> {
        if !self.is_interactive() {
            return None;
        }

        self.phase = Phase::Dismissing;
        self.dismiss_started_at = Some(now);
        Some(self.next_timer(self.timing.dismiss_transition))
    }

    /// Handle the end of the dismiss transition.
    ///
    /// Returns `true` exactly once, when the caller must be told that the
    /// screen is dismissed.
    pub fn dismiss_elapsed(&mut self, token: u64) -> bool {
        if !self.accepts_timer(token) || self.phase != Phase::Dismissing {
            log::debug!("dropping stale dismiss timer {token}");
            return false;
        }

        self.phase = Phase::Dismissed;
        true
    }

    /// Freeze the machine. Later loads and timer deliveries are ignored.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    /// Current title size, growing linearly from zero after the image load.
    pub fn title_size_at(&self, now: Instant) -> f32 {
        let Some(loaded_at) = self.loaded_at else {
            return 0.0;
        };

        self.target_size
            * progress(
                now.saturating_duration_since(loaded_at),
                self.timing.title_animation,
            )
    }

    /// Opacity of the whole composition, fading out while dismissing.
    pub fn opacity_at(&self, now: Instant) -> f32 {
        match (self.phase, self.dismiss_started_at) {
            (Phase::Dismissed, _) => 0.0,
            (Phase::Dismissing, Some(started)) => {
                1.0 - progress(
                    now.saturating_duration_since(started),
                    self.timing.dismiss_transition,
                )
            },
            _ => 1.0,
        }
    }

    /// Time spent waiting for the image, used to spin the busy indicator.
    pub fn loading_elapsed(&self, now: Instant) -> Duration {
        self.loading_started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn timer_token_for_tests(&self) -> u64 {
        self.timer_token
    }

    fn accepts_timer(&self, token: u64) -> bool {
        !self.disposed && token == self.timer_token
    }

    fn next_timer(&mut self, delay: Duration) -> TimerRequest {
        self.timer_token = self.timer_token.wrapping_add(1);
        TimerRequest {
            token: self.timer_token,
            delay,
        }
    }
}

fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }

    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}
