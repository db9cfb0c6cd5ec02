//! Raw event to canonical key identity resolution.
//!
//! Applies the per-OS quirk corrections (numeric pad navigation codes, mac
//! zero-code events, mislocated modifiers) before looking the formed pair up
//! in the layout's alias-aware table.

use crate::keycodes::*;
use crate::layout::{KeyboardLayout, LayoutError};
use crate::types::{KeyIdentity, KeyLocation, Platform, RawKeyEvent};
use std::collections::HashMap;
use tracing::trace;

/// Outcome of resolving one raw event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The event maps onto a canonical layout key.
    Matched(KeyIdentity),
    /// No canonical mapping exists; show this text on the unknown-key
    /// indicator instead.
    Unresolved { display_text: String },
    /// Spurious event (mac zero-code with modifiers held). Drop it.
    Suppressed,
}

/// Codes the numeric pad reports with Num Lock off, paired with the digit
/// key actually pressed. Windows reports the plain navigation codes, Linux
/// the KP_* variants plus Begin for the 5 key.
#[rustfmt::skip]
const NUMPAD_NAV_TO_DIGIT: &[(u32, u32)] = &[
    (VK_HOME,      VK_NUMPAD7),
    (VK_UP,        VK_NUMPAD8),
    (VK_KP_UP,     VK_NUMPAD8),
    (VK_PAGE_UP,   VK_NUMPAD9),
    (VK_LEFT,      VK_NUMPAD4),
    (VK_KP_LEFT,   VK_NUMPAD4),
    (VK_CLEAR,     VK_NUMPAD5),
    (VK_BEGIN,     VK_NUMPAD5),
    (VK_RIGHT,     VK_NUMPAD6),
    (VK_KP_RIGHT,  VK_NUMPAD6),
    (VK_END,       VK_NUMPAD1),
    (VK_DOWN,      VK_NUMPAD2),
    (VK_KP_DOWN,   VK_NUMPAD2),
    (VK_PAGE_DOWN, VK_NUMPAD3),
    (VK_INSERT,    VK_NUMPAD0),
    (VK_DELETE,    VK_DECIMAL),
];

fn numpad_digit_for(code: u32) -> Option<u32> {
    NUMPAD_NAV_TO_DIGIT
        .iter()
        .find(|&&(nav, _)| nav == code)
        .map(|&(_, digit)| digit)
}

/// Stateless resolver from raw (code, location, modifiers) to canonical
/// identity. Owns a copy of the platform lookup table so it can be queried
/// without holding the layout.
pub struct KeyIdentityResolver {
    platform: Platform,
    lookup: HashMap<KeyIdentity, KeyIdentity>,
}

impl KeyIdentityResolver {
    pub fn new(platform: Platform) -> Result<Self, LayoutError> {
        let layout = KeyboardLayout::for_platform(platform)?;
        Ok(Self::from_layout(&layout))
    }

    pub fn from_layout(layout: &KeyboardLayout) -> Self {
        Self {
            platform: layout.platform(),
            lookup: layout.lookup_table().clone(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Resolve one raw press. Never fails; events that cannot be matched
    /// come back as `Unresolved` with ready-to-display text.
    pub fn resolve(&self, event: &RawKeyEvent) -> Resolution {
        // Mac reports code 0 both for the fn key and for ghost events that
        // fire while modifiers are held. Only the bare press is the fn key.
        if self.platform.is_mac() && event.code == 0 {
            return if event.modifiers_active {
                trace!("suppressing zero-code event with modifiers held");
                Resolution::Suppressed
            } else {
                Resolution::Matched(KeyIdentity::standard(VK_FN))
            };
        }

        let mut code = event.code;
        if !self.platform.is_mac()
            && event.location == KeyLocation::NumPad
            && !event.num_lock_on
        {
            if let Some(digit) = numpad_digit_for(code) {
                trace!(from = code, to = digit, "numpad navigation code translated");
                code = digit;
            }
        }

        let formed = KeyIdentity::new(event.location, code);
        match self.lookup.get(&formed) {
            Some(&canonical) => Resolution::Matched(canonical),
            None => Resolution::Unresolved {
                display_text: unresolved_display_text(self.platform, event),
            },
        }
    }
}

/// Build the indicator text for an event with no canonical mapping, from the
/// OS-reported text plus the event location.
fn unresolved_display_text(platform: Platform, event: &RawKeyEvent) -> String {
    let raw = event.os_text.trim();
    let mut text = if raw.is_empty() {
        format!("UNKNOWN ({})", event.code)
    } else if let Some(rest) = raw.strip_prefix("Unknown keyCode: ") {
        format!("UNKNOWN ({rest})")
    } else if raw == "Windows" {
        "Start".to_string()
    } else if platform.is_mac() && raw.starts_with('\u{2328}') {
        // Mac prefixes numeric pad key texts with the keyboard symbol.
        format!("NumPad{}", raw.trim_start_matches('\u{2328}'))
    } else if let Some(rest) = raw.strip_prefix("NumPad-") {
        format!("NumPad {rest}")
    } else {
        raw.to_string()
    };

    let prefix = event.location.prefix();
    if !prefix.is_empty() && !text.starts_with(prefix) {
        text = format!("{prefix} {text}");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: u32, location: KeyLocation) -> RawKeyEvent {
        RawKeyEvent {
            code,
            location,
            modifiers_active: false,
            num_lock_on: false,
            os_text: String::new(),
        }
    }

    fn resolver(platform: Platform) -> KeyIdentityResolver {
        KeyIdentityResolver::new(platform).unwrap()
    }

    #[test]
    fn plain_letter_resolves_to_itself() {
        let r = resolver(Platform::Linux);
        assert_eq!(
            r.resolve(&event(b'A' as u32, KeyLocation::Standard)),
            Resolution::Matched(KeyIdentity::standard(b'A' as u32))
        );
    }

    #[test]
    fn numpad_home_translates_to_digit_seven_with_num_lock_off() {
        let r = resolver(Platform::Windows);
        let resolved = r.resolve(&event(VK_HOME, KeyLocation::NumPad));
        assert_eq!(
            resolved,
            Resolution::Matched(KeyIdentity::new(KeyLocation::NumPad, VK_NUMPAD7))
        );
    }

    #[test]
    fn linux_kp_arrows_and_begin_translate() {
        let r = resolver(Platform::Linux);
        for (nav, digit) in [
            (VK_KP_UP, VK_NUMPAD8),
            (VK_KP_DOWN, VK_NUMPAD2),
            (VK_KP_LEFT, VK_NUMPAD4),
            (VK_KP_RIGHT, VK_NUMPAD6),
            (VK_BEGIN, VK_NUMPAD5),
        ] {
            assert_eq!(
                r.resolve(&event(nav, KeyLocation::NumPad)),
                Resolution::Matched(KeyIdentity::new(KeyLocation::NumPad, digit)),
                "code {nav}"
            );
        }
    }

    #[test]
    fn numpad_digits_pass_through_with_num_lock_on() {
        let r = resolver(Platform::Windows);
        let mut ev = event(VK_NUMPAD7, KeyLocation::NumPad);
        ev.num_lock_on = true;
        assert_eq!(
            r.resolve(&ev),
            Resolution::Matched(KeyIdentity::new(KeyLocation::NumPad, VK_NUMPAD7))
        );
    }

    #[test]
    fn main_block_arrows_are_not_translated() {
        // The translation only applies to numeric pad events; the dedicated
        // arrow keys keep their own identities.
        let r = resolver(Platform::Windows);
        assert_eq!(
            r.resolve(&event(VK_UP, KeyLocation::Standard)),
            Resolution::Matched(KeyIdentity::standard(VK_UP))
        );
    }

    #[test]
    fn mac_numpad_events_are_never_translated() {
        let r = resolver(Platform::MacOS);
        // Mac has no Num Lock; a Home code on the pad would be a real miss.
        let resolved = r.resolve(&event(VK_HOME, KeyLocation::NumPad));
        assert!(matches!(resolved, Resolution::Unresolved { .. }));
    }

    #[test]
    fn mac_zero_code_without_modifiers_is_the_fn_key() {
        let r = resolver(Platform::MacOS);
        assert_eq!(
            r.resolve(&event(0, KeyLocation::Standard)),
            Resolution::Matched(KeyIdentity::standard(VK_FN))
        );
    }

    #[test]
    fn mac_zero_code_with_modifiers_is_suppressed() {
        let r = resolver(Platform::MacOS);
        let mut ev = event(0, KeyLocation::Standard);
        ev.modifiers_active = true;
        assert_eq!(r.resolve(&ev), Resolution::Suppressed);
    }

    #[test]
    fn mac_insert_code_aliases_to_help() {
        let r = resolver(Platform::MacOS);
        assert_eq!(
            r.resolve(&event(VK_INSERT, KeyLocation::Standard)),
            Resolution::Matched(KeyIdentity::standard(VK_HELP))
        );
    }

    #[test]
    fn mac_unlocated_alt_aliases_to_right_alt() {
        let r = resolver(Platform::MacOS);
        assert_eq!(
            r.resolve(&event(VK_ALT, KeyLocation::Standard)),
            Resolution::Matched(KeyIdentity::new(KeyLocation::Right, VK_ALT))
        );
    }

    #[test]
    fn unlocated_start_key_counts_as_left() {
        for platform in [Platform::Windows, Platform::Linux] {
            let r = resolver(platform);
            assert_eq!(
                r.resolve(&event(VK_WINDOWS, KeyLocation::Standard)),
                Resolution::Matched(KeyIdentity::new(KeyLocation::Left, VK_WINDOWS)),
                "{platform:?}"
            );
        }
    }

    #[test]
    fn linux_right_start_collapses_onto_left() {
        let r = resolver(Platform::Linux);
        assert_eq!(
            r.resolve(&event(VK_WINDOWS, KeyLocation::Right)),
            Resolution::Matched(KeyIdentity::new(KeyLocation::Left, VK_WINDOWS))
        );
        // Windows keeps them apart.
        let r = resolver(Platform::Windows);
        assert_eq!(
            r.resolve(&event(VK_WINDOWS, KeyLocation::Right)),
            Resolution::Matched(KeyIdentity::new(KeyLocation::Right, VK_WINDOWS))
        );
    }

    #[test]
    fn unresolved_event_reports_os_text() {
        let r = resolver(Platform::Linux);
        let mut ev = event(64000, KeyLocation::Standard);
        ev.os_text = "Kanji".to_string();
        assert_eq!(
            r.resolve(&ev),
            Resolution::Unresolved {
                display_text: "Kanji".to_string()
            }
        );
    }

    #[test]
    fn unresolved_event_without_text_shows_the_code() {
        let r = resolver(Platform::Linux);
        let ev = event(64000, KeyLocation::Standard);
        assert_eq!(
            r.resolve(&ev),
            Resolution::Unresolved {
                display_text: "UNKNOWN (64000)".to_string()
            }
        );
    }

    #[test]
    fn unresolved_unknown_keycode_text_is_normalized() {
        let r = resolver(Platform::Linux);
        let mut ev = event(64000, KeyLocation::Standard);
        ev.os_text = "Unknown keyCode: 0xfa00".to_string();
        assert_eq!(
            r.resolve(&ev),
            Resolution::Unresolved {
                display_text: "UNKNOWN (0xfa00)".to_string()
            }
        );
    }

    #[test]
    fn unresolved_location_attaches_as_prefix() {
        let r = resolver(Platform::Linux);
        let mut ev = event(64000, KeyLocation::Left);
        ev.os_text = "Thumb".to_string();
        assert_eq!(
            r.resolve(&ev),
            Resolution::Unresolved {
                display_text: "Left Thumb".to_string()
            }
        );
    }

    #[test]
    fn unresolved_numpad_dash_text_is_cleaned_up() {
        let r = resolver(Platform::Windows);
        let mut ev = event(64000, KeyLocation::NumPad);
        ev.os_text = "NumPad-Something".to_string();
        assert_eq!(
            r.resolve(&ev),
            Resolution::Unresolved {
                display_text: "NumPad Something".to_string()
            }
        );
    }

    #[test]
    fn mac_keyboard_symbol_text_becomes_numpad() {
        let r = resolver(Platform::MacOS);
        let mut ev = event(64000, KeyLocation::NumPad);
        ev.os_text = "\u{2328}".to_string();
        assert_eq!(
            r.resolve(&ev),
            Resolution::Unresolved {
                display_text: "NumPad".to_string()
            }
        );

        ev.os_text = "\u{2328}3".to_string();
        assert_eq!(
            r.resolve(&ev),
            Resolution::Unresolved {
                display_text: "NumPad3".to_string()
            }
        );
    }
}
