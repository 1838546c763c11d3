//! Category normalisation, category glyphs and small-caps stylisation

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Glyph for categories missing from the table
pub const DEFAULT_GLYPH: &str = "💫";

/// Display glyph per normalised category key
pub const CATEGORY_GLYPHS: &[(&str, &str)] = &[
    ("ai", "🤖"),
    ("anime", "🍥"),
    ("audio", "🎧"),
    ("bible", "📖"),
    ("download", "⬇️"),
    ("downloader", "📥"),
    ("fun", "🎮"),
    ("game", "🕹️"),
    ("group", "👥"),
    ("img_edit", "🖌️"),
    ("info", "ℹ️"),
    ("information", "🧠"),
    ("logo", "🖼️"),
    ("main", "🏠"),
    ("media", "🎞️"),
    ("menu", "📜"),
    ("misc", "📦"),
    ("moderation", "🛡️"),
    ("music", "🎵"),
    ("other", "📁"),
    ("owner", "👑"),
    ("privacy", "🔒"),
    ("search", "🔎"),
    ("settings", "⚙️"),
    ("sticker", "🌟"),
    ("tools", "🛠️"),
    ("user", "👤"),
    ("utilities", "🧰"),
    ("utility", "🧮"),
    ("wallpapers", "🖼️"),
    ("whatsapp", "📱"),
];

static GLYPHS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CATEGORY_GLYPHS.iter().copied().collect());

/// Small-caps replacement for `A`..=`Z`
const SMALL_CAPS: [char; 26] = [
    'ᴀ', 'ʙ', 'ᴄ', 'ᴅ', 'ᴇ', 'ғ', 'ɢ', 'ʜ', 'ɪ', 'ᴊ', 'ᴋ', 'ʟ', 'ᴍ',
    'ɴ', 'ᴏ', 'ᴘ', 'ǫ', 'ʀ', 's', 'ᴛ', 'ᴜ', 'ᴠ', 'ᴡ', 'x', 'ʏ', 'ᴢ',
];

/// Normalise a raw category label into its grouping key.
///
/// Lower-cases, trims, then drops trailing whitespace-separated `menu`
/// tokens until none is left, so `normalize(normalize(x)) == normalize(x)`.
/// A bare `menu` has no preceding whitespace and is kept.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut key = lowered.trim();
    while let Some(rest) = strip_menu_suffix(key) {
        key = rest.trim();
    }
    key.to_string()
}

/// `rest` when `key` is `rest` + whitespace + `menu`
fn strip_menu_suffix(key: &str) -> Option<&str> {
    key.strip_suffix("menu").filter(|rest| rest.ends_with(char::is_whitespace))
}

pub fn glyph_for(key: &str) -> &'static str {
    GLYPHS.get(key).copied().unwrap_or(DEFAULT_GLYPH)
}

/// Whether `key` has its own glyph
pub fn is_known(key: &str) -> bool {
    GLYPHS.contains_key(key)
}

/// Replace every ASCII letter (either case) with its small-caps form
pub fn stylize(text: &str) -> String {
    text.chars()
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            if upper.is_ascii_uppercase() {
                SMALL_CAPS[(upper as u8 - b'A') as usize]
            } else {
                c
            }
        })
        .collect()
}
