//! Fixed password strength policy.

use crate::constants;

/// Individual policy checks, kept separate so failures can be explained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthReport {
    pub length_ok: bool,
    pub has_digit: bool,
    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_special: bool,
}

impl StrengthReport {
    pub fn passed(&self) -> bool {
        self.length_ok
            && self.has_digit
            && self.has_lowercase
            && self.has_uppercase
            && self.has_special
    }

    /// Human-readable list of unmet requirements.
    pub fn missing(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.length_ok {
            out.push(format!(
                "{} to {} characters",
                constants::STRONG_MIN_LENGTH,
                constants::STRONG_MAX_LENGTH
            ));
        }
        if !self.has_digit {
            out.push("a digit".to_string());
        }
        if !self.has_lowercase {
            out.push("a lowercase letter".to_string());
        }
        if !self.has_uppercase {
            out.push("an uppercase letter".to_string());
        }
        if !self.has_special {
            out.push(format!("one of {}", constants::STRONG_SPECIAL));
        }
        out
    }
}

pub fn analyze(candidate: &str) -> StrengthReport {
    let len = candidate.chars().count();
    StrengthReport {
        length_ok: (constants::STRONG_MIN_LENGTH..=constants::STRONG_MAX_LENGTH).contains(&len),
        has_digit: candidate.chars().any(|c| c.is_ascii_digit()),
        has_lowercase: candidate.chars().any(|c| c.is_ascii_lowercase()),
        has_uppercase: candidate.chars().any(|c| c.is_ascii_uppercase()),
        has_special: candidate.chars().any(|c| constants::STRONG_SPECIAL.contains(c)),
    }
}

pub fn is_strong(candidate: &str) -> bool {
    analyze(candidate).passed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password_passes() {
        assert!(is_strong("Abcdef1!"));
    }

    #[test]
    fn test_lowercase_only_fails() {
        assert!(!is_strong("abcdefgh"));
    }

    #[test]
    fn test_too_short_fails() {
        let report = analyze("Ab1!");
        assert!(!report.passed());
        assert!(!report.length_ok);
        assert_eq!(report.missing().len(), 1);
    }

    #[test]
    fn test_too_long_fails() {
        let long = format!("Ab1!{}", "x".repeat(27));
        assert_eq!(long.len(), 31);
        assert!(!is_strong(&long));
        assert!(is_strong(&long[..30]));
    }

    #[test]
    fn test_special_outside_fixed_set_does_not_count() {
        assert!(!is_strong("Abcdef1("));
        assert!(!is_strong("Abcdef1-"));
    }
}
