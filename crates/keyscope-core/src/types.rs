use crate::keycodes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Operating system family, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    /// Platform of the running process.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    pub const fn is_mac(self) -> bool {
        matches!(self, Platform::MacOS)
    }
}

/// OS-reported positional qualifier distinguishing duplicated physical keys
/// (left vs right Shift, numeric pad digits) that share a base key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyLocation {
    Standard,
    Left,
    Right,
    NumPad,
}

impl KeyLocation {
    /// Prefix used when forming a canonical identity ("" for Standard).
    pub const fn prefix(self) -> &'static str {
        match self {
            KeyLocation::Standard => "",
            KeyLocation::Left => "Left",
            KeyLocation::Right => "Right",
            KeyLocation::NumPad => "NumPad",
        }
    }
}

/// Canonical key identity: location prefix + platform key code.
///
/// Exactly one identity exists per physically distinguishable key on the
/// reference layout. Multiple raw (code, location) pairs may alias to the
/// same identity; the alias tables in `layout` collapse them before lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyIdentity {
    pub location: KeyLocation,
    pub code: u32,
}

impl KeyIdentity {
    pub const fn new(location: KeyLocation, code: u32) -> Self {
        Self { location, code }
    }

    pub const fn standard(code: u32) -> Self {
        Self::new(KeyLocation::Standard, code)
    }
}

impl fmt::Display for KeyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match keycodes::key_name(self.code) {
            Some(name) => write!(f, "{}{}", self.location.prefix(), name),
            None => write!(f, "{}{}", self.location.prefix(), self.code),
        }
    }
}

/// Raw key event as delivered by the host GUI toolkit. Consumed once.
#[derive(Debug, Clone)]
pub struct RawKeyEvent {
    pub code: u32,
    pub location: KeyLocation,
    /// True if any modifier is currently held down.
    pub modifiers_active: bool,
    /// Numeric-lock state polled at event time.
    pub num_lock_on: bool,
    /// OS-reported display text, used when the code has no canonical mapping.
    pub os_text: String,
}

/// Cumulative per-key test state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestState {
    Untested,
    RecentlyPressed,
    Confirmed,
}

/// What the UI should do in response to one raw key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightCommand {
    /// Highlight the entry for `identity`. If `expand_layout` is set the key
    /// belongs to a section hidden in the compact view; show the full layout
    /// before highlighting.
    Matched {
        identity: KeyIdentity,
        expand_layout: bool,
    },
    /// No canonical mapping; highlight the generic unknown-key indicator
    /// with this text.
    Unresolved { display_text: String },
    /// Spurious event, drop with no visible effect.
    Suppressed,
}

/// Target of a delayed press confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmTarget {
    Key(KeyIdentity),
    UnknownIndicator,
}

/// One step of the staggered visual reset. States are already reset when the
/// steps are returned; the delays only sequence the UI redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetStep {
    pub identity: KeyIdentity,
    pub delay: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycodes::{VK_ALT, VK_NUMPAD7, VK_SHIFT};

    #[test]
    fn identity_display_includes_location_prefix() {
        assert_eq!(
            KeyIdentity::new(KeyLocation::NumPad, VK_NUMPAD7).to_string(),
            "NumPadNUMPAD7"
        );
        assert_eq!(
            KeyIdentity::new(KeyLocation::Right, VK_ALT).to_string(),
            "RightAlt"
        );
        assert_eq!(
            KeyIdentity::new(KeyLocation::Left, VK_SHIFT).to_string(),
            "LeftShift"
        );
    }

    #[test]
    fn identity_display_falls_back_to_raw_code() {
        assert_eq!(KeyIdentity::standard(64000).to_string(), "64000");
    }
}
