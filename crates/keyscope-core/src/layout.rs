//! Static key layout and alias tables, per platform.
//!
//! One `KeyDef` per physically distinguishable key on the reference layout.
//! The alias table collapses the raw (location, code) pairs that some
//! platforms report for the same physical key onto the canonical entry, so
//! the resolver's lookup and the tracker's entry set are built from the same
//! source and cannot drift.

use crate::keycodes::*;
use crate::types::{KeyIdentity, KeyLocation, Platform, TestState};
use std::collections::HashMap;
use thiserror::Error;

/// Number of distinguishable keys on the Mac laptop reference keyboard
/// (the only hardware family with a fixed, fully enumerable key set).
pub const MAC_LAPTOP_KEY_COUNT: usize = 77;

/// Panel a key is rendered in; drives compact-layout visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Typewriter block, function row and arrows. Always visible.
    Main,
    /// Print Screen / Scroll Lock / Pause group.
    TopOther,
    /// Insert/Help, Home, Page Up, Delete, End, Page Down.
    Nav,
    /// Numeric pad.
    NumPad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Avail {
    All,
    MacOnly,
    NonMac,
    WindowsOnly,
    LinuxOnly,
}

impl Avail {
    fn includes(self, platform: Platform) -> bool {
        match self {
            Avail::All => true,
            Avail::MacOnly => platform.is_mac(),
            Avail::NonMac => !platform.is_mac(),
            Avail::WindowsOnly => platform == Platform::Windows,
            Avail::LinuxOnly => platform == Platform::Linux,
        }
    }
}

struct KeyDef {
    loc: KeyLocation,
    code: u32,
    label: &'static str,
    mac_label: Option<&'static str>,
    section: Section,
    avail: Avail,
}

const fn k(code: u32, label: &'static str) -> KeyDef {
    KeyDef {
        loc: KeyLocation::Standard,
        code,
        label,
        mac_label: None,
        section: Section::Main,
        avail: Avail::All,
    }
}

impl KeyDef {
    const fn loc(mut self, loc: KeyLocation) -> Self {
        self.loc = loc;
        self
    }
    const fn mac(mut self, label: &'static str) -> Self {
        self.mac_label = Some(label);
        self
    }
    const fn sec(mut self, section: Section) -> Self {
        self.section = section;
        self
    }
    const fn only(mut self, avail: Avail) -> Self {
        self.avail = avail;
        self
    }
}

use Avail::{LinuxOnly, MacOnly, NonMac, WindowsOnly};
use KeyLocation::{Left, NumPad, Right, Standard};
use Section::{Nav, TopOther};

#[rustfmt::skip]
const KEY_DEFS: &[KeyDef] = &[
    // Function row
    k(VK_ESCAPE, "Esc").mac("esc"),
    k(VK_F1, "F1"), k(VK_F2, "F2"), k(VK_F3, "F3"), k(VK_F4, "F4"),
    k(VK_F5, "F5"), k(VK_F6, "F6"), k(VK_F7, "F7"), k(VK_F8, "F8"),
    k(VK_F9, "F9"), k(VK_F10, "F10"), k(VK_F11, "F11"), k(VK_F12, "F12"),
    // Number row
    k(VK_BACK_QUOTE, "`"),
    k(b'1' as u32, "1"), k(b'2' as u32, "2"), k(b'3' as u32, "3"),
    k(b'4' as u32, "4"), k(b'5' as u32, "5"), k(b'6' as u32, "6"),
    k(b'7' as u32, "7"), k(b'8' as u32, "8"), k(b'9' as u32, "9"),
    k(b'0' as u32, "0"),
    k(VK_MINUS, "-"), k(VK_EQUALS, "="),
    k(VK_BACK_SPACE, "Backspace").mac("delete"),
    // Top letter row
    k(VK_TAB, "Tab").mac("tab"),
    k(b'Q' as u32, "Q"), k(b'W' as u32, "W"), k(b'E' as u32, "E"),
    k(b'R' as u32, "R"), k(b'T' as u32, "T"), k(b'Y' as u32, "Y"),
    k(b'U' as u32, "U"), k(b'I' as u32, "I"), k(b'O' as u32, "O"),
    k(b'P' as u32, "P"),
    k(VK_OPEN_BRACKET, "["), k(VK_CLOSE_BRACKET, "]"), k(VK_BACK_SLASH, "\\"),
    // Home row
    k(VK_CAPS_LOCK, "Caps Lock").mac("caps lock"),
    k(b'A' as u32, "A"), k(b'S' as u32, "S"), k(b'D' as u32, "D"),
    k(b'F' as u32, "F"), k(b'G' as u32, "G"), k(b'H' as u32, "H"),
    k(b'J' as u32, "J"), k(b'K' as u32, "K"), k(b'L' as u32, "L"),
    k(VK_SEMICOLON, ";"), k(VK_QUOTE, "'"),
    k(VK_ENTER, "Enter").mac("return"),
    // Bottom letter row
    k(VK_SHIFT, "Shift").loc(Left).mac("shift"),
    k(b'Z' as u32, "Z"), k(b'X' as u32, "X"), k(b'C' as u32, "C"),
    k(b'V' as u32, "V"), k(b'B' as u32, "B"), k(b'N' as u32, "N"),
    k(b'M' as u32, "M"),
    k(VK_COMMA, ","), k(VK_PERIOD, "."), k(VK_SLASH, "/"),
    k(VK_SHIFT, "Shift").loc(Right).mac("shift"),
    // Modifier row
    k(VK_FN, "fn").only(MacOnly),
    k(VK_CONTROL, "Ctrl").loc(Left).mac("control"),
    k(VK_WINDOWS, "Start").loc(Left).only(NonMac),
    k(VK_ALT, "Alt").loc(Left).mac("option"),
    k(VK_META, "command").loc(Left).only(MacOnly),
    k(VK_SPACE, "Space").mac("space"),
    k(VK_META, "command").loc(Right).only(MacOnly),
    k(VK_ALT, "Alt").loc(Right).mac("option"),
    k(VK_WINDOWS, "Start").loc(Right).only(WindowsOnly),
    k(VK_CONTEXT_MENU, "Menu").only(NonMac),
    k(VK_CONTROL, "Ctrl").loc(Right).mac("control"),
    // Print Screen group
    k(VK_PRINTSCREEN, "Print Screen").sec(TopOther).only(NonMac),
    k(VK_SCROLL_LOCK, "Scroll Lock").sec(TopOther).only(NonMac),
    k(VK_PAUSE, "Pause").sec(TopOther).only(NonMac),
    // Navigation cluster
    k(VK_INSERT, "Insert").sec(Nav).only(NonMac),
    k(VK_HELP, "help").sec(Nav).only(MacOnly),
    k(VK_HOME, "Home").sec(Nav).mac("home"),
    k(VK_PAGE_UP, "Page Up").sec(Nav).mac("page up"),
    k(VK_DELETE, "Delete").sec(Nav).mac("delete"),
    k(VK_END, "End").sec(Nav).mac("end"),
    k(VK_PAGE_DOWN, "Page Down").sec(Nav).mac("page down"),
    // Arrows
    k(VK_UP, "Up").mac("▲"),
    k(VK_LEFT, "Left").mac("◀"),
    k(VK_DOWN, "Down").mac("▼"),
    k(VK_RIGHT, "Right").mac("▶"),
    // Numeric pad
    k(VK_NUM_LOCK, "Num Lock").loc(NumPad).sec(Section::NumPad).only(NonMac),
    k(VK_CLEAR, "clear").loc(NumPad).sec(Section::NumPad).only(MacOnly),
    k(VK_EQUALS, "=").loc(NumPad).sec(Section::NumPad).only(MacOnly),
    k(VK_DIVIDE, "/").loc(NumPad).sec(Section::NumPad),
    k(VK_MULTIPLY, "*").loc(NumPad).sec(Section::NumPad),
    k(VK_SUBTRACT, "-").loc(NumPad).sec(Section::NumPad),
    k(VK_ADD, "+").loc(NumPad).sec(Section::NumPad),
    k(VK_ENTER, "Enter").loc(NumPad).sec(Section::NumPad).mac("enter"),
    k(VK_NUMPAD7, "7").loc(NumPad).sec(Section::NumPad),
    k(VK_NUMPAD8, "8").loc(NumPad).sec(Section::NumPad),
    k(VK_NUMPAD9, "9").loc(NumPad).sec(Section::NumPad),
    k(VK_NUMPAD4, "4").loc(NumPad).sec(Section::NumPad),
    k(VK_NUMPAD5, "5").loc(NumPad).sec(Section::NumPad),
    k(VK_NUMPAD6, "6").loc(NumPad).sec(Section::NumPad),
    k(VK_NUMPAD1, "1").loc(NumPad).sec(Section::NumPad),
    k(VK_NUMPAD2, "2").loc(NumPad).sec(Section::NumPad),
    k(VK_NUMPAD3, "3").loc(NumPad).sec(Section::NumPad),
    k(VK_NUMPAD0, "0").loc(NumPad).sec(Section::NumPad),
    k(VK_DECIMAL, ".").loc(NumPad).sec(Section::NumPad),
];

struct AliasDef {
    avail: Avail,
    from: KeyIdentity,
    to: KeyIdentity,
}

const fn alias(avail: Avail, from: KeyIdentity, to: KeyIdentity) -> AliasDef {
    AliasDef { avail, from, to }
}

const fn at(loc: KeyLocation, code: u32) -> KeyIdentity {
    KeyIdentity::new(loc, code)
}

/// Raw pairs that platforms report for keys already covered by a primary
/// entry under a different (location, code).
const ALIAS_DEFS: &[AliasDef] = &[
    // Mac keyboards report Help (156) where others report Insert (155).
    alias(MacOnly, at(Standard, VK_INSERT), at(Standard, VK_HELP)),
    // Mac keyboards have Clear (12) where others have Num Lock (144).
    alias(MacOnly, at(NumPad, VK_NUM_LOCK), at(NumPad, VK_CLEAR)),
    // The right Option key reports Standard location instead of Right.
    alias(MacOnly, at(Standard, VK_ALT), at(Right, VK_ALT)),
    // Start key without a location counts as the left one.
    alias(NonMac, at(Standard, VK_WINDOWS), at(Left, VK_WINDOWS)),
    // Linux cannot distinguish the two Start keys positionally.
    alias(LinuxOnly, at(Right, VK_WINDOWS), at(Left, VK_WINDOWS)),
];

/// Table construction errors. These indicate the static key/alias tables
/// have drifted out of sync; they are programming errors, not runtime
/// conditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("duplicate canonical identity in key table: {0}")]
    DuplicateIdentity(KeyIdentity),
    #[error("alias {from} targets {to}, which has no layout entry")]
    DanglingAlias { from: KeyIdentity, to: KeyIdentity },
    #[error("alias {0} shadows a primary layout entry")]
    AliasShadowsEntry(KeyIdentity),
}

/// One renderable key: canonical identity, display label, visibility and
/// cumulative test state.
#[derive(Debug, Clone)]
pub struct KeyLayoutEntry {
    pub identity: KeyIdentity,
    pub label: &'static str,
    pub section: Section,
    /// Shown in the compact (laptop) view, not only in the full layout.
    pub compact_visible: bool,
    pub state: TestState,
}

/// The per-platform key set plus the raw-pair lookup the resolver uses.
pub struct KeyboardLayout {
    platform: Platform,
    entries: Vec<KeyLayoutEntry>,
    index: HashMap<KeyIdentity, usize>,
    lookup: HashMap<KeyIdentity, KeyIdentity>,
}

impl KeyboardLayout {
    pub fn for_platform(platform: Platform) -> Result<Self, LayoutError> {
        let mut entries = Vec::new();
        let mut index = HashMap::new();
        let mut lookup = HashMap::new();

        for def in KEY_DEFS.iter().filter(|d| d.avail.includes(platform)) {
            let identity = KeyIdentity::new(def.loc, def.code);
            let label = match (platform.is_mac(), def.mac_label) {
                (true, Some(mac)) => mac,
                _ => def.label,
            };
            if index.insert(identity, entries.len()).is_some() {
                return Err(LayoutError::DuplicateIdentity(identity));
            }
            lookup.insert(identity, identity);
            entries.push(KeyLayoutEntry {
                identity,
                label,
                section: def.section,
                compact_visible: compact_visible(platform, def),
                state: TestState::Untested,
            });
        }

        for def in ALIAS_DEFS.iter().filter(|d| d.avail.includes(platform)) {
            if !index.contains_key(&def.to) {
                return Err(LayoutError::DanglingAlias {
                    from: def.from,
                    to: def.to,
                });
            }
            if index.contains_key(&def.from) {
                return Err(LayoutError::AliasShadowsEntry(def.from));
            }
            lookup.insert(def.from, def.to);
        }

        Ok(Self {
            platform,
            entries,
            index,
            lookup,
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn entries(&self) -> &[KeyLayoutEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [KeyLayoutEntry] {
        &mut self.entries
    }

    pub fn entry(&self, identity: KeyIdentity) -> Option<&KeyLayoutEntry> {
        self.index.get(&identity).map(|&i| &self.entries[i])
    }

    pub(crate) fn entry_mut(&mut self, identity: KeyIdentity) -> Option<&mut KeyLayoutEntry> {
        let i = *self.index.get(&identity)?;
        Some(&mut self.entries[i])
    }

    /// Raw (location, code) pair -> canonical identity, aliases included.
    pub fn lookup_table(&self) -> &HashMap<KeyIdentity, KeyIdentity> {
        &self.lookup
    }

    pub fn compact_visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.compact_visible).count()
    }
}

fn compact_visible(platform: Platform, def: &KeyDef) -> bool {
    match def.section {
        Section::NumPad => false,
        // Only exists on non-Mac, where the compact view hides it.
        Section::TopOther => false,
        // Mac laptops have no navigation cluster; desktops keep it visible.
        Section::Nav => !platform.is_mac(),
        Section::Main => {
            if platform.is_mac() && def.loc == Right && def.code == VK_CONTROL {
                // Right Control only appears on full Mac keyboards.
                false
            } else {
                // A physical Right Start key usually only exists on full
                // keyboards; only Windows can detect it at all.
                !(platform == Platform::Windows && def.loc == Right && def.code == VK_WINDOWS)
            }
        }
    }
}
