//! Terminal styling for container dumps.
//!
//! Colors are named after what they mark in a dump, not after the hue.
//! A disabled palette has empty escape strings, so formatting code never
//! branches on whether color is on.

/// Escape sequences for each dump role.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    /// Section titles such as `[objects]`.
    pub heading: &'static str,
    /// Method keys and receiver type names.
    pub key: &'static str,
    /// Placeholders and wrapped constants that still need a consumer.
    pub symbolic: &'static str,
    /// Entries usable as is.
    pub literal: &'static str,
    /// Indices, offsets and trailing notes.
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Colors {
    pub const ON: Self = Self {
        heading: "\x1b[34m",
        key: "\x1b[36m",
        symbolic: "\x1b[33m",
        literal: "\x1b[32m",
        muted: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        heading: "",
        key: "",
        symbolic: "",
        literal: "",
        muted: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}
