//! Platform key code constants and display names.
//!
//! The code space mirrors the AWT virtual-key values the host toolkit
//! reports, so the layout and alias tables can be written against the same
//! numbers the raw events carry.

pub const VK_FN: u32 = 0; // synthetic: mac fn key reports code 0
pub const VK_BACK_SPACE: u32 = 8;
pub const VK_TAB: u32 = 9;
pub const VK_ENTER: u32 = 10;
pub const VK_CLEAR: u32 = 12;
pub const VK_SHIFT: u32 = 16;
pub const VK_CONTROL: u32 = 17;
pub const VK_ALT: u32 = 18;
pub const VK_PAUSE: u32 = 19;
pub const VK_CAPS_LOCK: u32 = 20;
pub const VK_ESCAPE: u32 = 27;
pub const VK_SPACE: u32 = 32;
pub const VK_PAGE_UP: u32 = 33;
pub const VK_PAGE_DOWN: u32 = 34;
pub const VK_END: u32 = 35;
pub const VK_HOME: u32 = 36;
pub const VK_LEFT: u32 = 37;
pub const VK_UP: u32 = 38;
pub const VK_RIGHT: u32 = 39;
pub const VK_DOWN: u32 = 40;
pub const VK_COMMA: u32 = 44;
pub const VK_MINUS: u32 = 45;
pub const VK_PERIOD: u32 = 46;
pub const VK_SLASH: u32 = 47;
pub const VK_SEMICOLON: u32 = 59;
pub const VK_EQUALS: u32 = 61;
pub const VK_OPEN_BRACKET: u32 = 91;
pub const VK_BACK_SLASH: u32 = 92;
pub const VK_CLOSE_BRACKET: u32 = 93;
pub const VK_NUMPAD0: u32 = 96;
pub const VK_NUMPAD1: u32 = 97;
pub const VK_NUMPAD2: u32 = 98;
pub const VK_NUMPAD3: u32 = 99;
pub const VK_NUMPAD4: u32 = 100;
pub const VK_NUMPAD5: u32 = 101;
pub const VK_NUMPAD6: u32 = 102;
pub const VK_NUMPAD7: u32 = 103;
pub const VK_NUMPAD8: u32 = 104;
pub const VK_NUMPAD9: u32 = 105;
pub const VK_MULTIPLY: u32 = 106;
pub const VK_ADD: u32 = 107;
pub const VK_SUBTRACT: u32 = 109;
pub const VK_DECIMAL: u32 = 110;
pub const VK_DIVIDE: u32 = 111;
pub const VK_F1: u32 = 112;
pub const VK_F2: u32 = 113;
pub const VK_F3: u32 = 114;
pub const VK_F4: u32 = 115;
pub const VK_F5: u32 = 116;
pub const VK_F6: u32 = 117;
pub const VK_F7: u32 = 118;
pub const VK_F8: u32 = 119;
pub const VK_F9: u32 = 120;
pub const VK_F10: u32 = 121;
pub const VK_F11: u32 = 122;
pub const VK_F12: u32 = 123;
pub const VK_DELETE: u32 = 127;
pub const VK_NUM_LOCK: u32 = 144;
pub const VK_SCROLL_LOCK: u32 = 145;
pub const VK_PRINTSCREEN: u32 = 154;
pub const VK_INSERT: u32 = 155;
pub const VK_HELP: u32 = 156;
pub const VK_META: u32 = 157;
pub const VK_BACK_QUOTE: u32 = 192;
pub const VK_QUOTE: u32 = 222;
// KP_* arrow variants are what Linux reports for the numeric pad arrows
// when Num Lock is off; Windows reports the plain arrow codes instead.
pub const VK_KP_UP: u32 = 224;
pub const VK_KP_DOWN: u32 = 225;
pub const VK_KP_LEFT: u32 = 226;
pub const VK_KP_RIGHT: u32 = 227;
pub const VK_WINDOWS: u32 = 524;
pub const VK_CONTEXT_MENU: u32 = 525;
pub const VK_BEGIN: u32 = 65368; // Linux code for the NumPad 5 / Begin key

/// Compact display name for a key code, used when rendering a canonical
/// identity (e.g. "NumPad" + "NUMPAD7" -> "NumPadNUMPAD7").
pub fn key_name(code: u32) -> Option<&'static str> {
    match code {
        VK_FN => Some("fn"),
        VK_BACK_SPACE => Some("Backspace"),
        VK_TAB => Some("Tab"),
        VK_ENTER => Some("Enter"),
        VK_CLEAR => Some("Clear"),
        VK_SHIFT => Some("Shift"),
        VK_CONTROL => Some("Control"),
        VK_ALT => Some("Alt"),
        VK_PAUSE => Some("Pause"),
        VK_CAPS_LOCK => Some("CapsLock"),
        VK_ESCAPE => Some("Escape"),
        VK_SPACE => Some("Space"),
        VK_PAGE_UP => Some("PageUp"),
        VK_PAGE_DOWN => Some("PageDown"),
        VK_END => Some("End"),
        VK_HOME => Some("Home"),
        VK_LEFT => Some("Left"),
        VK_UP => Some("Up"),
        VK_RIGHT => Some("Right"),
        VK_DOWN => Some("Down"),
        VK_COMMA => Some("Comma"),
        VK_MINUS => Some("Minus"),
        VK_PERIOD => Some("Period"),
        VK_SLASH => Some("Slash"),
        48 => Some("0"),
        49 => Some("1"),
        50 => Some("2"),
        51 => Some("3"),
        52 => Some("4"),
        53 => Some("5"),
        54 => Some("6"),
        55 => Some("7"),
        56 => Some("8"),
        57 => Some("9"),
        VK_SEMICOLON => Some("Semicolon"),
        VK_EQUALS => Some("Equals"),
        65 => Some("A"),
        66 => Some("B"),
        67 => Some("C"),
        68 => Some("D"),
        69 => Some("E"),
        70 => Some("F"),
        71 => Some("G"),
        72 => Some("H"),
        73 => Some("I"),
        74 => Some("J"),
        75 => Some("K"),
        76 => Some("L"),
        77 => Some("M"),
        78 => Some("N"),
        79 => Some("O"),
        80 => Some("P"),
        81 => Some("Q"),
        82 => Some("R"),
        83 => Some("S"),
        84 => Some("T"),
        85 => Some("U"),
        86 => Some("V"),
        87 => Some("W"),
        88 => Some("X"),
        89 => Some("Y"),
        90 => Some("Z"),
        VK_OPEN_BRACKET => Some("OpenBracket"),
        VK_BACK_SLASH => Some("BackSlash"),
        VK_CLOSE_BRACKET => Some("CloseBracket"),
        VK_NUMPAD0 => Some("NUMPAD0"),
        VK_NUMPAD1 => Some("NUMPAD1"),
        VK_NUMPAD2 => Some("NUMPAD2"),
        VK_NUMPAD3 => Some("NUMPAD3"),
        VK_NUMPAD4 => Some("NUMPAD4"),
        VK_NUMPAD5 => Some("NUMPAD5"),
        VK_NUMPAD6 => Some("NUMPAD6"),
        VK_NUMPAD7 => Some("NUMPAD7"),
        VK_NUMPAD8 => Some("NUMPAD8"),
        VK_NUMPAD9 => Some("NUMPAD9"),
        VK_MULTIPLY => Some("MULTIPLY"),
        VK_ADD => Some("ADD"),
        VK_SUBTRACT => Some("SUBTRACT"),
        VK_DECIMAL => Some("DECIMAL"),
        VK_DIVIDE => Some("DIVIDE"),
        VK_F1 => Some("F1"),
        VK_F2 => Some("F2"),
        VK_F3 => Some("F3"),
        VK_F4 => Some("F4"),
        VK_F5 => Some("F5"),
        VK_F6 => Some("F6"),
        VK_F7 => Some("F7"),
        VK_F8 => Some("F8"),
        VK_F9 => Some("F9"),
        VK_F10 => Some("F10"),
        VK_F11 => Some("F11"),
        VK_F12 => Some("F12"),
        VK_DELETE => Some("Delete"),
        VK_NUM_LOCK => Some("NumLock"),
        VK_SCROLL_LOCK => Some("ScrollLock"),
        VK_PRINTSCREEN => Some("PrintScreen"),
        VK_INSERT => Some("Insert"),
        VK_HELP => Some("Help"),
        VK_META => Some("Meta"),
        VK_BACK_QUOTE => Some("BackQuote"),
        VK_QUOTE => Some("Quote"),
        VK_WINDOWS => Some("Start"),
        VK_CONTEXT_MENU => Some("ContextMenu"),
        _ => None,
    }
}
