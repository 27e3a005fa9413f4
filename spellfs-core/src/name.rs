//! Fixed-width member names and wildcard matching.
//!
//! FS directory records store names in a 13-byte field: an 8.3 DOS name plus
//! a terminating NUL, although a full 13 characters may be used without one.
//! Bytes are mapped one-to-one onto `char`s (Latin-1) so that any name read
//! from disk can be written back unchanged.

use crate::error::{Result, SpellFsError};
use glob::{MatchOptions, Pattern};

/// Width of the name field in a directory record.
pub const NAME_LEN: usize = 13;

/// Decode a NUL-padded name field.
pub fn decode_name(field: &[u8]) -> String {
    field
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

/// Encode a name into a NUL-padded field.
pub fn encode_name(name: &str) -> Result<[u8; NAME_LEN]> {
    if name.is_empty() {
        return Err(SpellFsError::invalid_name(name, "empty name"));
    }

    let mut field = [0u8; NAME_LEN];
    let mut len = 0;
    for c in name.chars() {
        let code = c as u32;
        if code == 0 {
            return Err(SpellFsError::invalid_name(name, "contains NUL"));
        }
        if c == '/' || c == '\\' {
            return Err(SpellFsError::invalid_name(name, "contains a path separator"));
        }
        if code > 0xFF {
            return Err(SpellFsError::invalid_name(name, "not a single-byte character"));
        }
        if len == NAME_LEN {
            return Err(SpellFsError::invalid_name(name, "longer than 13 bytes"));
        }
        field[len] = code as u8;
        len += 1;
    }

    Ok(field)
}

/// Case-insensitive name comparison used by every lookup.
#[inline]
pub fn names_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Extension of a member name including the dot, if any.
pub fn extension(name: &str) -> Option<&str> {
    let dot = name.rfind('.')?;
    if dot == 0 {
        return None;
    }
    Some(&name[dot..])
}

/// Reduce a stored name to one safe path component for extraction.
///
/// Separators, NULs and drive colons become `_`; `.` and `..` are refused.
pub fn sanitize_component(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => None,
        _ => Some(cleaned),
    }
}

/// Glob-style pattern (`*`, `?`, `[...]`) matched against member names.
///
/// Matching ignores ASCII case, like name lookup does.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    pattern: Pattern,
}

impl WildcardPattern {
    const OPTIONS: MatchOptions = MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    /// Compile a pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let compiled = Pattern::new(pattern)
            .map_err(|e| SpellFsError::invalid_pattern(pattern, e.msg))?;
        Ok(Self { pattern: compiled })
    }

    /// Check a name against the pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.matches_with(name, Self::OPTIONS)
    }
}
