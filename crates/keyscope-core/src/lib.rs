pub mod engine;
pub mod keycodes;
pub mod layout;
pub mod resolver;
pub mod tracker;
pub mod types;

pub use engine::{Engine, ENGINE};
pub use layout::{KeyLayoutEntry, KeyboardLayout, LayoutError, Section, MAC_LAPTOP_KEY_COUNT};
pub use resolver::{KeyIdentityResolver, Resolution};
pub use tracker::{KeyTestStateTracker, CONFIRM_DELAY, RESET_STAGGER};
pub use types::{
    ConfirmTarget, HighlightCommand, KeyIdentity, KeyLocation, Platform, RawKeyEvent, ResetStep,
    TestState,
};
