//! Ayu color theme and styling functions for numform CLI output.
//!
//! Uses the Ayu Dark palette. Only states that need attention get color:
//! blocked outcomes, warnings and non-active lifecycle states.

use numform_core::enums::{LifecycleStatus, Severity};
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

const STATUS_DRAFT: (u8, u8, u8) = (0xd2, 0xa6, 0xff); // #d2a6ff - purple
const STATUS_ARCHIVED: (u8, u8, u8) = (0x80, 0x90, 0xa0); // #8090a0 - dimmed

// General icons
pub const ICON_PASS: &str = "\u{2713}";
pub const ICON_WARN: &str = "\u{26A0}";
pub const ICON_FAIL: &str = "\u{2716}";
pub const ICON_INFO: &str = "\u{2139}";

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

/// Renders a category header in uppercase with accent color and bold.
pub fn render_category(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

pub fn render_fail_icon() -> String {
    color_str(ICON_FAIL, FAIL)
}

// ---------------------------------------------------------------------------
// Domain rendering
// ---------------------------------------------------------------------------

/// Icon for a capability severity, colored by level.
pub fn render_severity_icon(severity: Severity) -> String {
    match severity {
        Severity::Info => color_str(ICON_INFO, ACCENT),
        Severity::Warn => color_str(ICON_WARN, WARN),
        Severity::Block => color_str(ICON_FAIL, FAIL),
    }
}

/// Renders `text` in the color of `severity`.
pub fn render_severity(severity: Severity, text: &str) -> String {
    match severity {
        Severity::Info => text.to_string(),
        Severity::Warn => render_warn(text),
        Severity::Block => color_bold_str(text, FAIL),
    }
}

/// Renders a lifecycle status. Active uses standard text.
pub fn render_lifecycle(status: &LifecycleStatus) -> String {
    let s = status.as_str();
    match status {
        LifecycleStatus::Draft => color_str(s, STATUS_DRAFT),
        LifecycleStatus::Deprecated => color_str(s, WARN),
        LifecycleStatus::Archived => color_str(s, STATUS_ARCHIVED),
        _ => s.to_string(),
    }
}

/// Renders a yes/no flag: green for allowed, muted for denied.
pub fn render_flag(allowed: bool) -> String {
    if allowed {
        render_pass("yes")
    } else {
        render_muted("no")
    }
}
