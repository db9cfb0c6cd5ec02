//! Engine facade tying resolution and state tracking together.

use crate::layout::{KeyboardLayout, KeyLayoutEntry, LayoutError};
use crate::resolver::{KeyIdentityResolver, Resolution};
use crate::tracker::{CompletionCallback, KeyTestStateTracker};
use crate::types::{
    ConfirmTarget, HighlightCommand, KeyIdentity, Platform, RawKeyEvent, ResetStep, TestState,
};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::time::Instant;
use tracing::info;

lazy_static! {
    /// Process-wide engine for the current platform. On Mac the hardware is
    /// assumed to be a laptop; call [`Engine::new`] directly to override.
    pub static ref ENGINE: Mutex<Engine> = Mutex::new(
        Engine::with_current_platform().expect("static key tables are internally consistent"),
    );
}

/// One keyboard test session: resolves raw events and tracks per-key state.
pub struct Engine {
    resolver: KeyIdentityResolver,
    tracker: KeyTestStateTracker,
}

impl Engine {
    pub fn new(platform: Platform, mac_laptop: bool) -> Result<Self, LayoutError> {
        let layout = KeyboardLayout::for_platform(platform)?;
        let resolver = KeyIdentityResolver::from_layout(&layout);
        let tracker = KeyTestStateTracker::from_layout(layout, mac_laptop);
        info!(?platform, mac_laptop, "engine initialized");
        Ok(Self { resolver, tracker })
    }

    pub fn with_current_platform() -> Result<Self, LayoutError> {
        let platform = Platform::current();
        Self::new(platform, platform.is_mac())
    }

    pub fn platform(&self) -> Platform {
        self.resolver.platform()
    }

    /// Feed one raw key press into the session.
    pub fn on_raw_key_event(&mut self, event: &RawKeyEvent, now: Instant) -> HighlightCommand {
        match self.resolver.resolve(event) {
            Resolution::Matched(identity) => {
                let expand_layout = self.tracker.record_key(identity, now);
                HighlightCommand::Matched {
                    identity,
                    expand_layout,
                }
            }
            Resolution::Unresolved { display_text } => {
                self.tracker.record_unknown(now);
                HighlightCommand::Unresolved { display_text }
            }
            Resolution::Suppressed => HighlightCommand::Suppressed,
        }
    }

    /// Reset every key to untested. See [`KeyTestStateTracker::reset`].
    pub fn on_reset_requested(&mut self) -> Vec<ResetStep> {
        self.tracker.reset()
    }

    pub fn tick(&mut self, now: Instant) -> Vec<ConfirmTarget> {
        self.tracker.tick(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.tracker.next_deadline()
    }

    pub fn toggle_full_layout(&mut self) -> bool {
        self.tracker.toggle_full_layout()
    }

    pub fn full_layout_shown(&self) -> bool {
        self.tracker.full_layout_shown()
    }

    pub fn set_on_completion(&mut self, callback: CompletionCallback) {
        self.tracker.set_on_completion(callback);
    }

    pub fn entries(&self) -> &[KeyLayoutEntry] {
        self.tracker.entries()
    }

    pub fn state_of(&self, identity: KeyIdentity) -> Option<TestState> {
        self.tracker.state_of(identity)
    }

    pub fn unknown_indicator_state(&self) -> TestState {
        self.tracker.unknown_indicator_state()
    }

    pub fn is_complete(&self) -> bool {
        self.tracker.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycodes::{VK_ALT, VK_HOME, VK_NUMPAD7};
    use crate::tracker::CONFIRM_DELAY;
    use crate::types::KeyLocation;

    fn event(code: u32, location: KeyLocation) -> RawKeyEvent {
        RawKeyEvent {
            code,
            location,
            modifiers_active: false,
            num_lock_on: false,
            os_text: String::new(),
        }
    }

    #[test]
    fn matched_press_highlights_and_later_confirms() {
        let mut engine = Engine::new(Platform::Linux, false).unwrap();
        let now = Instant::now();
        let id = KeyIdentity::standard(b'A' as u32);

        let cmd = engine.on_raw_key_event(&event(b'A' as u32, KeyLocation::Standard), now);
        assert_eq!(
            cmd,
            HighlightCommand::Matched {
                identity: id,
                expand_layout: false
            }
        );
        assert_eq!(engine.state_of(id), Some(TestState::RecentlyPressed));

        assert_eq!(engine.tick(now + CONFIRM_DELAY), vec![ConfirmTarget::Key(id)]);
        assert_eq!(engine.state_of(id), Some(TestState::Confirmed));
    }

    #[test]
    fn quirk_corrections_run_before_tracking() {
        let mut engine = Engine::new(Platform::Windows, false).unwrap();
        let now = Instant::now();
        let cmd = engine.on_raw_key_event(&event(VK_HOME, KeyLocation::NumPad), now);
        let pad7 = KeyIdentity::new(KeyLocation::NumPad, VK_NUMPAD7);
        assert!(matches!(
            cmd,
            HighlightCommand::Matched { identity, .. } if identity == pad7
        ));
        assert_eq!(engine.state_of(pad7), Some(TestState::RecentlyPressed));
    }

    #[test]
    fn suppressed_events_leave_no_trace() {
        let mut engine = Engine::new(Platform::MacOS, true).unwrap();
        let now = Instant::now();
        let mut ev = event(0, KeyLocation::Standard);
        ev.modifiers_active = true;
        assert_eq!(engine.on_raw_key_event(&ev, now), HighlightCommand::Suppressed);
        assert!(engine.next_deadline().is_none());
        assert!(engine.entries().iter().all(|e| e.state == TestState::Untested));
    }

    #[test]
    fn unresolved_press_drives_the_unknown_indicator() {
        let mut engine = Engine::new(Platform::Linux, false).unwrap();
        let now = Instant::now();
        let cmd = engine.on_raw_key_event(&event(64000, KeyLocation::Standard), now);
        assert_eq!(
            cmd,
            HighlightCommand::Unresolved {
                display_text: "UNKNOWN (64000)".to_string()
            }
        );
        assert_eq!(engine.unknown_indicator_state(), TestState::RecentlyPressed);
    }

    #[test]
    fn mac_hidden_section_press_requests_layout_expansion() {
        let mut engine = Engine::new(Platform::MacOS, true).unwrap();
        let now = Instant::now();
        // Right Alt arrives unlocated on Mac and aliases onto the Right key.
        let cmd = engine.on_raw_key_event(&event(VK_ALT, KeyLocation::Standard), now);
        assert_eq!(
            cmd,
            HighlightCommand::Matched {
                identity: KeyIdentity::new(KeyLocation::Right, VK_ALT),
                expand_layout: false
            }
        );

        let mut pad = event(VK_NUMPAD7, KeyLocation::NumPad);
        pad.num_lock_on = true;
        let cmd = engine.on_raw_key_event(&pad, now);
        assert_eq!(
            cmd,
            HighlightCommand::Matched {
                identity: KeyIdentity::new(KeyLocation::NumPad, VK_NUMPAD7),
                expand_layout: true
            }
        );
        assert!(engine.full_layout_shown());
    }

    #[test]
    fn reset_returns_staggered_steps() {
        let mut engine = Engine::new(Platform::Linux, false).unwrap();
        let now = Instant::now();
        engine.on_raw_key_event(&event(b'A' as u32, KeyLocation::Standard), now);
        engine.on_raw_key_event(&event(b'B' as u32, KeyLocation::Standard), now);
        let steps = engine.on_reset_requested();
        assert_eq!(steps.len(), 2);
        assert!(steps[1].delay > steps[0].delay);
    }
}
