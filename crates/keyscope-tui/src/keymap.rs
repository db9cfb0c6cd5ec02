//! Translation from crossterm key events to the raw events the engine
//! consumes.
//!
//! Terminals report far less than a native toolkit does: most keys arrive
//! without a location and the keypad is only distinguishable when the
//! enhanced keyboard protocol is active. The mapping is therefore best
//! effort; anything unmapped is passed through with display text so it
//! lands on the unknown-key indicator.

use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers, ModifierKeyCode};
use keyscope_core::types::{KeyLocation, Platform, RawKeyEvent};

// AWT-compatible key codes, matching keyscope_core::keycodes.
const CODE_BACK_SPACE: u32 = 8;
const CODE_TAB: u32 = 9;
const CODE_ENTER: u32 = 10;
const CODE_CLEAR: u32 = 12;
const CODE_SHIFT: u32 = 16;
const CODE_CONTROL: u32 = 17;
const CODE_ALT: u32 = 18;
const CODE_PAUSE: u32 = 19;
const CODE_CAPS_LOCK: u32 = 20;
const CODE_ESCAPE: u32 = 27;
const CODE_SPACE: u32 = 32;
const CODE_PAGE_UP: u32 = 33;
const CODE_PAGE_DOWN: u32 = 34;
const CODE_END: u32 = 35;
const CODE_HOME: u32 = 36;
const CODE_LEFT: u32 = 37;
const CODE_UP: u32 = 38;
const CODE_RIGHT: u32 = 39;
const CODE_DOWN: u32 = 40;
const CODE_F1: u32 = 112;
const CODE_DELETE: u32 = 127;
const CODE_NUM_LOCK: u32 = 144;
const CODE_SCROLL_LOCK: u32 = 145;
const CODE_PRINTSCREEN: u32 = 154;
const CODE_INSERT: u32 = 155;
const CODE_META: u32 = 157;
const CODE_WINDOWS: u32 = 524;
const CODE_CONTEXT_MENU: u32 = 525;

/// Sentinel for keys the terminal reports but the layout does not model.
const CODE_UNMAPPED: u32 = 0xFFFF;

fn char_code(c: char) -> Option<u32> {
    let c = c.to_ascii_uppercase();
    match c {
        'A'..='Z' | '0'..='9' => Some(c as u32),
        ' ' => Some(CODE_SPACE),
        '-' => Some(45),
        '=' => Some(61),
        '[' => Some(91),
        '\\' => Some(92),
        ']' => Some(93),
        ';' => Some(59),
        '\'' => Some(222),
        ',' => Some(44),
        '.' => Some(46),
        '/' => Some(47),
        '`' => Some(192),
        _ => None,
    }
}

fn modifier_key(platform: Platform, m: ModifierKeyCode) -> Option<(u32, KeyLocation)> {
    use KeyLocation::{Left, Right};
    let super_code = if platform.is_mac() { CODE_META } else { CODE_WINDOWS };
    match m {
        ModifierKeyCode::LeftShift => Some((CODE_SHIFT, Left)),
        ModifierKeyCode::RightShift => Some((CODE_SHIFT, Right)),
        ModifierKeyCode::LeftControl => Some((CODE_CONTROL, Left)),
        ModifierKeyCode::RightControl => Some((CODE_CONTROL, Right)),
        ModifierKeyCode::LeftAlt => Some((CODE_ALT, Left)),
        ModifierKeyCode::RightAlt => Some((CODE_ALT, Right)),
        ModifierKeyCode::LeftSuper | ModifierKeyCode::LeftMeta => Some((super_code, Left)),
        ModifierKeyCode::RightSuper | ModifierKeyCode::RightMeta => Some((super_code, Right)),
        _ => None,
    }
}

/// Translate a crossterm press into a raw engine event. `None` means the
/// event carries nothing testable (e.g. a bare modifier-state change).
pub fn raw_event_from(platform: Platform, key: &KeyEvent) -> Option<RawKeyEvent> {
    let keypad = key.state.contains(KeyEventState::KEYPAD);
    let mut location = if keypad {
        KeyLocation::NumPad
    } else {
        KeyLocation::Standard
    };

    let code = match key.code {
        KeyCode::Char(c) => char_code(c).unwrap_or(CODE_UNMAPPED),
        KeyCode::F(n) => CODE_F1 + u32::from(n.saturating_sub(1)),
        KeyCode::Esc => CODE_ESCAPE,
        KeyCode::Enter => CODE_ENTER,
        KeyCode::Backspace => CODE_BACK_SPACE,
        KeyCode::Tab | KeyCode::BackTab => CODE_TAB,
        KeyCode::CapsLock => CODE_CAPS_LOCK,
        KeyCode::Home => CODE_HOME,
        KeyCode::End => CODE_END,
        KeyCode::PageUp => CODE_PAGE_UP,
        KeyCode::PageDown => CODE_PAGE_DOWN,
        KeyCode::Insert => CODE_INSERT,
        KeyCode::Delete => CODE_DELETE,
        KeyCode::Up => CODE_UP,
        KeyCode::Down => CODE_DOWN,
        KeyCode::Left => CODE_LEFT,
        KeyCode::Right => CODE_RIGHT,
        KeyCode::NumLock => CODE_NUM_LOCK,
        KeyCode::ScrollLock => CODE_SCROLL_LOCK,
        KeyCode::PrintScreen => CODE_PRINTSCREEN,
        KeyCode::Pause => CODE_PAUSE,
        KeyCode::Menu => CODE_CONTEXT_MENU,
        KeyCode::KeypadBegin => {
            location = KeyLocation::NumPad;
            CODE_CLEAR
        }
        KeyCode::Modifier(m) => {
            let (code, loc) = modifier_key(platform, m)?;
            location = loc;
            code
        }
        _ => CODE_UNMAPPED,
    };

    let os_text = if code == CODE_UNMAPPED {
        keycode_text(key.code)
    } else {
        String::new()
    };

    Some(RawKeyEvent {
        code,
        location,
        modifiers_active: !key.modifiers.difference(KeyModifiers::SHIFT).is_empty(),
        num_lock_on: key.state.contains(KeyEventState::NUM_LOCK),
        os_text,
    })
}

fn keycode_text(code: KeyCode) -> String {
    match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Media(m) => format!("{m:?}"),
        other => format!("{other:?}"),
    }
}
