//! Course code parsing.
//!
//! Course codes follow the `SUBJECT NUMBER SUFFIX` shape, e.g. `CS2040S`:
//! a 2-4 letter uppercase subject, a 4-digit number, and an optional
//! variant suffix. Two codes that share subject and number are treated as
//! the same course for prerequisite purposes (`CS2040` and `CS2040S`).
//!
//! Codes that don't match the shape (placeholders such as `UE-1`, `GES`)
//! are their own base code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed course code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseCode {
    /// Alphabetic subject prefix (e.g., "CS").
    pub subject: String,
    /// Four-digit numeric stem (e.g., 2040).
    pub number: u16,
    /// Trailing variant suffix, possibly empty (e.g., "S").
    pub suffix: String,
}

impl CourseCode {
    /// Parses a course code.
    ///
    /// Returns `None` when the code has no `[A-Z]{2,4}[0-9]{4}` prefix.
    pub fn parse(code: &str) -> Option<Self> {
        let bytes = code.as_bytes();
        let letters = bytes
            .iter()
            .take_while(|b| b.is_ascii_uppercase())
            .count();
        if !(2..=4).contains(&letters) {
            return None;
        }

        let digits = &bytes[letters..];
        if digits.len() < 4 || !digits[..4].iter().all(u8::is_ascii_digit) {
            return None;
        }

        let number = code[letters..letters + 4].parse().ok()?;
        Some(Self {
            subject: code[..letters].to_string(),
            number,
            suffix: code[letters + 4..].to_string(),
        })
    }

    /// Subject + number, without the variant suffix.
    pub fn base(&self) -> String {
        format!("{}{:04}", self.subject, self.number)
    }

    /// Course level: the leading digit of the number (`CS2040` → 2).
    #[inline]
    pub fn level(&self) -> u8 {
        (self.number / 1000) as u8
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}{}", self.subject, self.number, self.suffix)
    }
}

/// Base code of an arbitrary code string.
///
/// Falls back to the full code when it doesn't parse.
pub fn base_code(code: &str) -> String {
    CourseCode::parse(code)
        .map(|c| c.base())
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_suffix() {
        let c = CourseCode::parse("CS2040S").unwrap();
        assert_eq!(c.subject, "CS");
        assert_eq!(c.number, 2040);
        assert_eq!(c.suffix, "S");
        assert_eq!(c.base(), "CS2040");
        assert_eq!(c.level(), 2);
        assert_eq!(c.to_string(), "CS2040S");
    }

    #[test]
    fn test_parse_three_and_four_letter_subjects() {
        assert_eq!(CourseCode::parse("GEA1000").unwrap().base(), "GEA1000");
        assert_eq!(CourseCode::parse("DTKE1234X").unwrap().subject, "DTKE");
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(CourseCode::parse("UE-1").is_none());
        assert!(CourseCode::parse("GES").is_none());
        assert!(CourseCode::parse("C1234").is_none());
        assert!(CourseCode::parse("ABCDE1234").is_none());
        assert!(CourseCode::parse("CS12").is_none());
        assert!(CourseCode::parse("cs1010").is_none());
    }

    #[test]
    fn test_same_base() {
        let a = CourseCode::parse("CS2030").unwrap();
        let b = CourseCode::parse("CS2030S").unwrap();
        let c = CourseCode::parse("CS2040S").unwrap();
        assert_eq!(a.base(), b.base());
        assert_ne!(a.base(), c.base());
    }

    #[test]
    fn test_base_code_fallback() {
        assert_eq!(base_code("CS1101S"), "CS1101");
        assert_eq!(base_code("ID-1"), "ID-1");
    }
}
