//! Email value object.

use crate::domain::errors::DomainError;
use regex::RegexBuilder;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Longest input considered for matching. Anything longer is invalid.
const MAX_INPUT_LEN: usize = 320;

/// How much of a rejected address is echoed back in error details.
const MAX_ECHO_CHARS: usize = 64;

/// `local@domain.tld`, no whitespace and no extra `@` in any part.
///
/// The `regex` crate matches in time linear to the input, so adversarial input
/// cannot trigger catastrophic backtracking.
static EMAIL_REGEX: LazyLock<Option<regex::Regex>> = LazyLock::new(|| {
    RegexBuilder::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .case_insensitive(true)
        .build()
        .ok()
});

/// A validated, normalized (trimmed, lowercase) email address.
///
/// Instances only exist after validation; there is no way to mutate one.
///
/// # Example
///
/// ```
/// use talent_registry::domain::Email;
///
/// let email = Email::parse("  Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validates and normalizes a raw email string.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Blank`] if the input is empty or whitespace
    /// - [`DomainError::InvalidEmail`] if it does not have the
    ///   `local@domain.tld` shape
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(DomainError::Blank { field: "Email" });
        }

        if !Self::is_valid(trimmed) {
            return Err(DomainError::InvalidEmail(Self::echo(trimmed)));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    fn is_valid(candidate: &str) -> bool {
        if candidate.len() > MAX_INPUT_LEN {
            return false;
        }

        // A pattern that failed to compile rejects everything.
        EMAIL_REGEX.as_ref().is_some_and(|re| re.is_match(candidate))
    }

    /// The rejected input, cut to [`MAX_ECHO_CHARS`] characters.
    fn echo(rejected: &str) -> String {
        match rejected.char_indices().nth(MAX_ECHO_CHARS) {
            Some((cut, _)) => format!("{}...", &rejected[..cut]),
            None => rejected.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Email {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Email::parse(value)
    }
}

impl Serialize for Email {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalizes() {
        let email = Email::parse("  John.Doe@Example.COM\t").unwrap();
        assert_eq!(email.as_str(), "john.doe@example.com");
    }

    #[test]
    fn test_email_padded_input_is_validated_after_trimming() {
        let email = Email::parse(" Ada@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ada@example.com");

        // Padding does not count towards the length limit
        let local = "a".repeat(300);
        let padded = format!("{}{local}@example.com{}", " ".repeat(20), "\n".repeat(20));
        assert_eq!(
            Email::parse(&padded).unwrap().as_str(),
            format!("{local}@example.com")
        );
    }

    #[test]
    fn test_email_rejection_echo_is_truncated() {
        let hostile = format!("{}@", "a".repeat(5_000));

        let Err(DomainError::InvalidEmail(echoed)) = Email::parse(&hostile) else {
            panic!("oversized input should be rejected");
        };
        assert_eq!(echoed, format!("{}...", "a".repeat(64)));

        assert_eq!(
            Email::parse("  not-an-email "),
            Err(DomainError::InvalidEmail("not-an-email".to_string()))
        );
    }

    #[test]
    fn test_email_parse_is_idempotent() {
        let first = Email::parse("ada@example.com").unwrap();
        let second = Email::parse(first.as_str()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_email_blank() {
        assert_eq!(
            Email::parse("   "),
            Err(DomainError::Blank { field: "Email" })
        );
        assert_eq!(Email::parse(""), Err(DomainError::Blank { field: "Email" }));
    }

    #[test]
    fn test_email_validates_shape() {
        for bad in [
            "invalid-email",
            "@example.com",
            "user@",
            "user@domain",
            "user@@example.com",
            "us er@example.com",
            "user@exa mple.com",
            "user@example.",
        ] {
            assert!(
                matches!(Email::parse(bad), Err(DomainError::InvalidEmail(_))),
                "{bad} should be rejected"
            );
        }

        assert!(Email::parse("user.name+tag@example.co.uk").is_ok());
        assert!(Email::parse("x@y.z").is_ok());
    }

    #[test]
    fn test_email_adversarial_input_is_rejected_quickly() {
        let hostile = format!("{}@{}", "a".repeat(5_000), "b.".repeat(5_000));
        assert!(matches!(
            Email::parse(&hostile),
            Err(DomainError::InvalidEmail(_))
        ));

        let near_miss = format!("{}@", "a".repeat(300));
        assert!(Email::parse(&near_miss).is_err());
    }

    #[test]
    fn test_email_equality_by_value() {
        assert_eq!(
            Email::parse("X@Y.com").unwrap(),
            Email::parse("x@y.com").unwrap()
        );
    }

    #[test]
    fn test_email_serializes_as_string() {
        let email = Email::parse("user@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"user@example.com\"");
    }
}
