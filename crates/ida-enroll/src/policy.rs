//! # Input policy
//!
//! Email normalization and the passphrase strength policy. Both run
//! before any hashing; the hash functions themselves accept their input
//! verbatim.

use thiserror::Error;

/// The fixed set of characters accepted as passphrase symbols.
pub const SYMBOL_SET: &str = "!@#$%^&*()-_=+[]{};:,.<>?/";

/// Minimum passphrase length.
pub const MIN_PASSPHRASE_LEN: usize = 8;

/// Reasons an email address is rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EmailError {
    /// Nothing left after trimming.
    #[error("address is empty")]
    Empty,

    /// The address must contain exactly one `@`.
    #[error("address must contain exactly one @")]
    BadAtSign,

    /// The local part (before the `@`) is empty.
    #[error("local part is empty")]
    EmptyLocal,

    /// The domain is empty, lacks a dot, or has an empty label.
    #[error("domain is malformed")]
    BadDomain,

    /// The address contains whitespace or control characters.
    #[error("address contains whitespace or control characters")]
    IllegalCharacters,
}

/// Normalize and structurally validate an email address.
///
/// Trims surrounding whitespace and lowercases the address; the
/// normalized form is what gets hashed, so `User@Example.COM` and
/// `user@example.com` commit to the same value.
pub fn normalize_email(raw: &str) -> Result<String, EmailError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EmailError::Empty);
    }
    if trimmed
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(EmailError::IllegalCharacters);
    }

    let normalized = trimmed.to_lowercase();
    let mut parts = normalized.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(EmailError::BadAtSign),
    };

    if local.is_empty() {
        return Err(EmailError::EmptyLocal);
    }
    if domain.is_empty() || !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(EmailError::BadDomain);
    }

    Ok(normalized)
}

/// A passphrase policy category that was not satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    /// Fewer characters than the minimum.
    TooShort {
        /// The required minimum.
        min: usize,
    },
    /// No uppercase letter.
    MissingUppercase,
    /// No lowercase letter.
    MissingLowercase,
    /// No decimal digit.
    MissingDigit,
    /// No symbol from [`SYMBOL_SET`].
    MissingSymbol,
}

impl std::fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "at least {min} characters"),
            Self::MissingUppercase => write!(f, "an uppercase letter"),
            Self::MissingLowercase => write!(f, "a lowercase letter"),
            Self::MissingDigit => write!(f, "a digit"),
            Self::MissingSymbol => write!(f, "a symbol"),
        }
    }
}

/// Check a passphrase against the strength policy.
///
/// Collects every violated category so the caller can report them all in
/// one response.
pub fn check_passphrase(passphrase: &str) -> Result<(), Vec<PolicyViolation>> {
    let mut violations = Vec::new();

    if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
        violations.push(PolicyViolation::TooShort {
            min: MIN_PASSPHRASE_LEN,
        });
    }
    if !passphrase.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PolicyViolation::MissingUppercase);
    }
    if !passphrase.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PolicyViolation::MissingLowercase);
    }
    if !passphrase.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PolicyViolation::MissingDigit);
    }
    if !passphrase.chars().any(|c| SYMBOL_SET.contains(c)) {
        violations.push(PolicyViolation::MissingSymbol);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(
            normalize_email("  User@Example.COM  ").unwrap(),
            "user@example.com"
        );
    }

    #[test]
    fn empty_address_is_rejected() {
        assert_eq!(normalize_email("   "), Err(EmailError::Empty));
    }

    #[test]
    fn at_sign_count_is_enforced() {
        assert_eq!(normalize_email("user.example.com"), Err(EmailError::BadAtSign));
        assert_eq!(normalize_email("a@b@example.com"), Err(EmailError::BadAtSign));
    }

    #[test]
    fn local_part_must_be_nonempty() {
        assert_eq!(normalize_email("@example.com"), Err(EmailError::EmptyLocal));
    }

    #[test]
    fn domain_must_have_nonempty_dotted_labels() {
        assert_eq!(normalize_email("user@"), Err(EmailError::BadDomain));
        assert_eq!(normalize_email("user@example"), Err(EmailError::BadDomain));
        assert_eq!(normalize_email("user@example."), Err(EmailError::BadDomain));
        assert_eq!(normalize_email("user@.com"), Err(EmailError::BadDomain));
        assert!(normalize_email("user@mail.example.com").is_ok());
    }

    #[test]
    fn interior_whitespace_is_rejected() {
        assert_eq!(
            normalize_email("us er@example.com"),
            Err(EmailError::IllegalCharacters)
        );
    }

    #[test]
    fn strong_passphrase_passes() {
        assert!(check_passphrase("Str0ng!Pass").is_ok());
    }

    #[test]
    fn weak_lists_all_four_missing_categories() {
        // "weak" is short, all-lowercase, digitless, and symbolless.
        let violations = check_passphrase("weak").unwrap_err();
        assert_eq!(violations.len(), 4);
        assert!(violations.contains(&PolicyViolation::TooShort { min: 8 }));
        assert!(violations.contains(&PolicyViolation::MissingUppercase));
        assert!(violations.contains(&PolicyViolation::MissingDigit));
        assert!(violations.contains(&PolicyViolation::MissingSymbol));
        assert!(!violations.contains(&PolicyViolation::MissingLowercase));
    }

    #[test]
    fn each_single_gap_is_reported_alone() {
        assert_eq!(
            check_passphrase("str0ng!pass").unwrap_err(),
            vec![PolicyViolation::MissingUppercase]
        );
        assert_eq!(
            check_passphrase("STR0NG!PASS").unwrap_err(),
            vec![PolicyViolation::MissingLowercase]
        );
        assert_eq!(
            check_passphrase("Strong!Pass").unwrap_err(),
            vec![PolicyViolation::MissingDigit]
        );
        assert_eq!(
            check_passphrase("Str0ngPass").unwrap_err(),
            vec![PolicyViolation::MissingSymbol]
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Eight two-byte characters satisfy the length category.
        let violations = check_passphrase("éééééééé").unwrap_err();
        assert!(!violations.contains(&PolicyViolation::TooShort { min: 8 }));
    }

    #[test]
    fn every_symbol_in_the_set_counts() {
        for symbol in SYMBOL_SET.chars() {
            let pass = format!("Str0ngPa{symbol}");
            assert!(
                check_passphrase(&pass).is_ok(),
                "symbol {symbol:?} was not accepted"
            );
        }
    }
}
