//! Suite name validation.
//!
//! The file system storage splits a suite name at slashes and maps every
//! segment to a directory. Linux and macOS accept any character except NUL
//! and `/` in file names, but Windows rejects `/:*?"<>|`, so the accepted
//! character class is the conservative intersection. A valid suite name
//! round-trips losslessly to and from a relative path on every supported
//! operating system.

use crate::{Result, SteepError};

fn allowed(c: char) -> bool {
    matches!(c,
        ' ' | '!' | '#' | '$' | '%' | '&' | '\'' | '(' | ')' | '+' | ',' | '.'
            | '0'..='9' | ';' | '=' | '@' | 'A'..='Z' | '[' | ']' | '^' | '_'
            | 'a'..='z' | '{' | '}' | '~' | '-'
    )
}

/// Check whether `segment` is usable as a single path segment.
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(allowed)
}

/// Check whether `name` is a valid `/`-delimited suite name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.split('/').all(is_valid_segment)
}

/// Validate a suite name before any filesystem access.
pub fn ensure_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(SteepError::InvalidName(name.to_string()))
    }
}

/// Validate scope segments. Fails on an empty list or any segment that is
/// not usable as a single path segment.
pub fn ensure_scope(segments: &[String]) -> Result<()> {
    if segments.is_empty() || segments.iter().any(|s| !is_valid_segment(s)) {
        return Err(SteepError::InvalidScope(segments.to_vec()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_names() {
        assert!(is_valid_name("genmaicha"));
        assert!(is_valid_name("genmaicha/oolong"));
        assert!(is_valid_name("a/b/c"));
    }

    #[test]
    fn accepts_full_character_class() {
        assert!(is_valid_name(" !#$%&'()+,.0-9;=@A-Z[]^_a-z{}~-"));
        assert!(is_valid_name("Chrome 68.0.3440/Windows 10.0.0"));
    }

    #[test]
    fn rejects_empty_name() {
        assert!(!is_valid_name(""));
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(!is_valid_name("/"));
        assert!(!is_valid_name("a//b"));
        assert!(!is_valid_name("/a"));
        assert!(!is_valid_name("a/"));
    }

    #[test]
    fn rejects_characters_illegal_on_windows() {
        for name in [
            "a:b", "a*b", "a?b", "a\"b", "a<b", "a>b", "a|b", "a\\b",
        ] {
            assert!(!is_valid_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn rejects_control_characters() {
        assert!(!is_valid_name("a\0b"));
        assert!(!is_valid_name("a\nb"));
    }

    #[test]
    fn segment_rejects_slash() {
        assert!(is_valid_segment("oolong"));
        assert!(!is_valid_segment("genmaicha/oolong"));
        assert!(!is_valid_segment(""));
    }

    #[test]
    fn ensure_name_reports_invalid_name() {
        let err = ensure_name("a:b").unwrap_err();
        assert!(matches!(err, SteepError::InvalidName(name) if name == "a:b"));
    }

    #[test]
    fn ensure_scope_rejects_empty_list() {
        let err = ensure_scope(&[]).unwrap_err();
        assert!(matches!(err, SteepError::InvalidScope(_)));
    }

    #[test]
    fn ensure_scope_rejects_multi_segment_part() {
        let parts = vec!["Chrome 68".to_string(), "a/b".to_string()];
        let err = ensure_scope(&parts).unwrap_err();
        assert!(matches!(err, SteepError::InvalidScope(_)));
    }

    #[test]
    fn ensure_scope_accepts_valid_parts() {
        let parts = vec!["Chrome 68.0.0".to_string(), "Windows 10".to_string()];
        assert!(ensure_scope(&parts).is_ok());
    }
}
