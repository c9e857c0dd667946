use std::fmt;

// Qt virtual-key codes for the navigation keys the rod responds to.
const QT_KEY_LEFT: i64 = 16777234;
const QT_KEY_UP: i64 = 16777235;
const QT_KEY_RIGHT: i64 = 16777236;
const QT_KEY_DOWN: i64 = 16777237;
const QT_KEY_PAGEUP: i64 = 16777238;
const QT_KEY_PAGEDOWN: i64 = 16777239;

// Shift, Control, Meta, Alt, AltGr. Pure modifiers never become tokens.
const QT_MODIFIER_CODES: [i64; 5] = [16777248, 16777249, 16777250, 16777251, 16777252];

const MODIFIER_NAMES: [&str; 9] = [
    "shift", "control", "ctrl", "alt", "altgr", "meta", "super", "capslock", "numlock",
];

/// A raw key as delivered by a host, before normalization.
///
/// Hosts disagree on how they encode keys: some hand over a platform
/// virtual-key integer, some a bare character code, some a named string like
/// `"Qt.Key_Up"`. All three converge on the same [`KeyToken`] vocabulary so
/// everything past the boundary is encoding-agnostic.
#[derive(Clone, Debug, PartialEq)]
pub enum RawKey {
    /// Platform virtual-key integer (Qt-style codes).
    Code(i64),
    /// A single character code, including the legacy control characters.
    Char(char),
    /// A named-string code.
    Text(String),
}

/// Canonical key token every raw encoding normalizes to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyToken {
    /// A single printable lowercase character.
    Char(char),
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    /// Anything recognized but not in the vocabulary above, e.g. `"escape"`
    /// or the decimal string of an unknown virtual-key code.
    Other(String),
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(c) => write!(f, "{c}"),
            KeyToken::Up => f.write_str("up"),
            KeyToken::Down => f.write_str("down"),
            KeyToken::Left => f.write_str("left"),
            KeyToken::Right => f.write_str("right"),
            KeyToken::PageUp => f.write_str("pageup"),
            KeyToken::PageDown => f.write_str("pagedown"),
            KeyToken::Other(s) => f.write_str(s),
        }
    }
}

/// Normalize a raw key to its canonical token.
///
/// Returns `None` for keys the controller must ignore entirely: pure
/// modifiers in any encoding, and empty strings.
pub fn normalize(raw: &RawKey) -> Option<KeyToken> {
    match raw {
        RawKey::Code(code) => normalize_code(*code),
        RawKey::Char(c) => normalize_char(*c),
        RawKey::Text(s) => normalize_text(s),
    }
}

fn direction_for_code(code: i64) -> Option<KeyToken> {
    match code {
        QT_KEY_LEFT => Some(KeyToken::Left),
        QT_KEY_UP => Some(KeyToken::Up),
        QT_KEY_RIGHT => Some(KeyToken::Right),
        QT_KEY_DOWN => Some(KeyToken::Down),
        QT_KEY_PAGEUP => Some(KeyToken::PageUp),
        QT_KEY_PAGEDOWN => Some(KeyToken::PageDown),
        _ => None,
    }
}

// Legacy single control-character encoding of the arrow keys.
fn direction_for_control_char(c: char) -> Option<KeyToken> {
    match c {
        '\u{13}' => Some(KeyToken::Up),
        '\u{15}' => Some(KeyToken::Down),
        '\u{12}' => Some(KeyToken::Left),
        '\u{14}' => Some(KeyToken::Right),
        _ => None,
    }
}

fn direction_for_name(name: &str) -> Option<KeyToken> {
    match name {
        "up" => Some(KeyToken::Up),
        "down" => Some(KeyToken::Down),
        "left" => Some(KeyToken::Left),
        "right" => Some(KeyToken::Right),
        "pageup" => Some(KeyToken::PageUp),
        "pagedown" => Some(KeyToken::PageDown),
        _ => None,
    }
}

fn normalize_code(code: i64) -> Option<KeyToken> {
    if let Some(direction) = direction_for_code(code) {
        return Some(direction);
    }
    if QT_MODIFIER_CODES.contains(&code) {
        return None;
    }
    if (32..127).contains(&code) {
        return Some(KeyToken::Char((code as u8 as char).to_ascii_lowercase()));
    }
    // Decimal-string fallback. A single-digit code collapses into the same
    // token as the digit character itself, so "6" means the keypad key no
    // matter which encoding delivered it.
    let text = code.to_string();
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(single), None) => Some(KeyToken::Char(single)),
        _ => Some(KeyToken::Other(text)),
    }
}

fn normalize_char(c: char) -> Option<KeyToken> {
    if let Some(direction) = direction_for_control_char(c) {
        return Some(direction);
    }
    let mut lowered = c.to_lowercase();
    match (lowered.next(), lowered.next()) {
        (Some(single), None) => Some(KeyToken::Char(single)),
        // Multi-character lowercase expansions degrade to a string token.
        _ => Some(KeyToken::Other(c.to_lowercase().collect())),
    }
}

fn normalize_text(s: &str) -> Option<KeyToken> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(direction) = direction_for_control_char(c) {
            return Some(direction);
        }
    }

    let mut name = s.trim().to_lowercase();
    for prefix in ["qt.key_", "key_", "kp_", "kp"] {
        if let Some(stripped) = name.strip_prefix(prefix) {
            name = stripped.to_string();
            break;
        }
    }
    match name.as_str() {
        "pgup" => name = "pageup".to_string(),
        "pgdn" => name = "pagedown".to_string(),
        _ => {}
    }

    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
        // A numeric string is the same virtual-key code in disguise.
        return match name.parse::<i64>() {
            Ok(code) => normalize_code(code),
            Err(_) => Some(KeyToken::Other(name)),
        };
    }
    if MODIFIER_NAMES.contains(&name.as_str()) {
        return None;
    }
    if let Some(direction) = direction_for_name(&name) {
        return Some(direction);
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (None, _) => None,
        (Some(single), None) => Some(KeyToken::Char(single)),
        _ => Some(KeyToken::Other(name)),
    }
}
