//! Shared UI icons and emojis.
//!
//! Each icon falls back to an ASCII tag on terminals without emoji support.

use console::Emoji;

// Status indicators
pub static STABLE: Emoji<'_, '_> = Emoji("🟢 ", "[OK]");
pub static WARNING: Emoji<'_, '_> = Emoji("🟡 ", "[WARN]");
pub static CRITICAL: Emoji<'_, '_> = Emoji("🔴 ", "[CRIT]");
pub static LICENSED: Emoji<'_, '_> = Emoji("✅", "yes");
pub static UNLICENSED: Emoji<'_, '_> = Emoji("❌", "no");

// Section headers
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");
pub static RADAR: Emoji<'_, '_> = Emoji("🕸️  ", "");
pub static TROPHY: Emoji<'_, '_> = Emoji("🏆 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static QUEST: Emoji<'_, '_> = Emoji("⚔️  ", "[Q]");
pub static LOG: Emoji<'_, '_> = Emoji("📡 ", "");
pub static SPARKLE: Emoji<'_, '_> = Emoji("🌟 ", "*");

// Actions
pub static SHIELD: Emoji<'_, '_> = Emoji("🛡️  ", "[SEC]");
pub static MEMO: Emoji<'_, '_> = Emoji("📝 ", "[DOC]");
pub static COFFEE: Emoji<'_, '_> = Emoji("☕ ", "[FIKA]");
pub static HACK: Emoji<'_, '_> = Emoji("🚀 ", "[HACK]");
