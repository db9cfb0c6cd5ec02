//! Per-key test state tracking.
//!
//! Every key starts `Untested`, turns `RecentlyPressed` on its first press
//! and `Confirmed` once the press has stood for [`CONFIRM_DELAY`] without an
//! intervening reset. Time is passed in explicitly so the whole machine is
//! deterministic under test; the caller drives it with [`KeyTestStateTracker::tick`]
//! using [`KeyTestStateTracker::next_deadline`].

use crate::layout::{KeyboardLayout, KeyLayoutEntry, LayoutError};
use crate::types::{ConfirmTarget, KeyIdentity, Platform, ResetStep, TestState};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a press must stand before it counts as confirmed.
pub const CONFIRM_DELAY: Duration = Duration::from_millis(200);

/// Visual delay between consecutive keys during a reset sweep.
pub const RESET_STAGGER: Duration = Duration::from_millis(10);

/// Callback invoked once when every key of the reference layout has been
/// pressed at least once.
pub type CompletionCallback = Box<dyn Fn() + Send + Sync>;

struct PendingConfirm {
    target: ConfirmTarget,
    due: Instant,
    /// Reset generation the press belongs to. A reset bumps the tracker's
    /// epoch, so confirmations scheduled before it are dropped as stale.
    epoch: u64,
}

pub struct KeyTestStateTracker {
    layout: KeyboardLayout,
    /// Whether the machine is a Mac laptop, the only hardware family with a
    /// fully enumerable key set. Completion detection is gated on it.
    mac_laptop: bool,
    unknown_state: TestState,
    /// FIFO: the delay is constant, so earlier presses are always due first.
    pending: VecDeque<PendingConfirm>,
    epoch: u64,
    completed: bool,
    full_layout_shown: bool,
    /// Sticky: set the first time the full layout is shown and never
    /// cleared, not even by reset. Once hidden sections have been revealed
    /// the physical key set is no longer knowable, so completion detection
    /// stays off for the rest of the session.
    full_layout_has_been_shown: bool,
    on_completion: Option<CompletionCallback>,
}

impl KeyTestStateTracker {
    pub fn new(platform: Platform, mac_laptop: bool) -> Result<Self, LayoutError> {
        Ok(Self::from_layout(KeyboardLayout::for_platform(platform)?, mac_laptop))
    }

    pub fn from_layout(layout: KeyboardLayout, mac_laptop: bool) -> Self {
        Self {
            layout,
            mac_laptop,
            unknown_state: TestState::Untested,
            pending: VecDeque::new(),
            epoch: 0,
            completed: false,
            full_layout_shown: false,
            full_layout_has_been_shown: false,
            on_completion: None,
        }
    }

    pub fn set_on_completion(&mut self, callback: CompletionCallback) {
        self.on_completion = Some(callback);
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn entries(&self) -> &[KeyLayoutEntry] {
        self.layout.entries()
    }

    pub fn state_of(&self, identity: KeyIdentity) -> Option<TestState> {
        self.layout.entry(identity).map(|e| e.state)
    }

    pub fn unknown_indicator_state(&self) -> TestState {
        self.unknown_state
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn full_layout_shown(&self) -> bool {
        self.full_layout_shown
    }

    /// Manually expand or collapse the full layout. Returns the new state.
    pub fn toggle_full_layout(&mut self) -> bool {
        self.full_layout_shown = !self.full_layout_shown;
        if self.full_layout_shown {
            self.full_layout_has_been_shown = true;
        }
        debug!(shown = self.full_layout_shown, "full layout toggled");
        self.full_layout_shown
    }

    /// Record a press of a canonical key at `now`. Returns true when the key
    /// lives in a section hidden from the compact view and the full layout
    /// was expanded to show it.
    pub fn record_key(&mut self, identity: KeyIdentity, now: Instant) -> bool {
        let epoch = self.epoch;
        let Some(entry) = self.layout.entry_mut(identity) else {
            // The resolver and the layout are built from the same tables, so
            // a matched identity always has an entry.
            debug_assert!(false, "matched identity {identity} has no layout entry");
            warn!(%identity, "matched identity has no layout entry");
            return false;
        };

        let mut expand = false;
        if !entry.compact_visible && !self.full_layout_shown {
            self.full_layout_shown = true;
            self.full_layout_has_been_shown = true;
            expand = true;
            debug!(%identity, "expanding full layout for hidden-section key");
        }

        // Confirmed keys stay confirmed; a repeat press neither regresses
        // the state nor schedules another confirmation.
        if entry.state != TestState::Confirmed {
            entry.state = TestState::RecentlyPressed;
            self.pending.push_back(PendingConfirm {
                target: ConfirmTarget::Key(identity),
                due: now + CONFIRM_DELAY,
                epoch,
            });
        }

        self.check_completion();
        expand
    }

    /// Record a press that resolved to no canonical key.
    pub fn record_unknown(&mut self, now: Instant) {
        if self.unknown_state != TestState::Confirmed {
            self.unknown_state = TestState::RecentlyPressed;
            self.pending.push_back(PendingConfirm {
                target: ConfirmTarget::UnknownIndicator,
                due: now + CONFIRM_DELAY,
                epoch: self.epoch,
            });
        }
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    /// Entries scheduled before the latest reset can never commit, so they
    /// do not produce a deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending
            .iter()
            .find(|p| p.epoch == self.epoch)
            .map(|p| p.due)
    }

    /// Apply every confirmation due at `now`. Returns the targets that
    /// transitioned so the caller can redraw them. Entries scheduled before
    /// the latest reset, or whose key state has moved on, are dropped.
    pub fn tick(&mut self, now: Instant) -> Vec<ConfirmTarget> {
        let mut confirmed = Vec::new();
        while self.pending.front().is_some_and(|p| p.due <= now) {
            let Some(p) = self.pending.pop_front() else {
                break;
            };
            if p.epoch != self.epoch {
                continue;
            }
            match p.target {
                ConfirmTarget::Key(identity) => {
                    if let Some(entry) = self.layout.entry_mut(identity) {
                        if entry.state == TestState::RecentlyPressed {
                            entry.state = TestState::Confirmed;
                            confirmed.push(p.target);
                        }
                    }
                }
                ConfirmTarget::UnknownIndicator => {
                    if self.unknown_state == TestState::RecentlyPressed {
                        self.unknown_state = TestState::Confirmed;
                        confirmed.push(p.target);
                    }
                }
            }
        }
        confirmed
    }

    /// Reset every key to `Untested`. States change immediately; the
    /// returned steps carry per-key delays so the UI can sweep through the
    /// board instead of blanking it at once. Scheduled confirmations from
    /// before the reset become stale and never fire.
    pub fn reset(&mut self) -> Vec<ResetStep> {
        self.epoch += 1;
        self.completed = false;
        self.unknown_state = TestState::Untested;

        let mut steps = Vec::new();
        for entry in self.layout.entries_mut() {
            if entry.state != TestState::Untested {
                entry.state = TestState::Untested;
                steps.push(ResetStep {
                    identity: entry.identity,
                    delay: RESET_STAGGER * steps.len() as u32,
                });
            }
        }
        info!(keys = steps.len(), "test states reset");
        steps
    }

    /// Completion only applies to the compact Mac laptop view, where the key
    /// set is closed. Once the full layout has ever been expanded the set is
    /// no longer the laptop's and the check stays disabled, even after the
    /// view is collapsed again.
    fn check_completion(&mut self) {
        if !self.mac_laptop || self.completed || self.full_layout_has_been_shown {
            return;
        }
        let all_pressed = self
            .layout
            .entries()
            .iter()
            .filter(|e| e.compact_visible)
            .all(|e| e.state != TestState::Untested);
        if !all_pressed {
            return;
        }

        self.completed = true;
        // The last few keys are still waiting out their confirm delay; show
        // the finished board fully confirmed.
        for entry in self.layout.entries_mut() {
            if entry.compact_visible && entry.state == TestState::RecentlyPressed {
                entry.state = TestState::Confirmed;
            }
        }
        if self.unknown_state == TestState::RecentlyPressed {
            self.unknown_state = TestState::Confirmed;
        }
        self.pending.clear();
        info!("all keys tested");
        if let Some(callback) = &self.on_completion {
            callback();
        }
    }
}
