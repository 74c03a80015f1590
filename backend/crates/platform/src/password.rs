//! Password Hashing and Verification
//!
//! NIST SP 800-63B compliant password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison
//!
//! ## Security Features
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Zeroization prevents memory inspection attacks
//! - Policy violations are reported all at once so the caller can surface
//!   a complete, ordered error list to the user

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants (NIST SP 800-63B compliant)
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    /// Password matches common patterns (sequential, repeated)
    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Validates against NIST SP 800-63B requirements and rejects on the
    /// first violation. Unicode is normalized using NFKC before validation.
    /// Use [`ClearTextPassword::policy_violations`] when the caller needs
    /// the complete list.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let violations = Self::policy_violations(&raw);
        if let Some(first) = violations.into_iter().next() {
            return Err(first);
        }
        Ok(Self(raw.nfkc().collect()))
    }

    /// Create for verification against a stored hash
    ///
    /// Normalizes (NFKC) without enforcing policy: the policy was enforced
    /// when the credential was created, and a non-conforming input must
    /// simply fail verification rather than error.
    pub fn for_verification(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    /// Collect every policy violation, in a fixed report order
    ///
    /// The order is stable: emptiness, length bounds, character classes,
    /// predictable patterns. Callers surface the `Display` strings to the
    /// user verbatim.
    pub fn policy_violations(raw: &str) -> Vec<PasswordPolicyError> {
        // NIST: Unicode NFKC normalization before processing
        let normalized: String = raw.nfkc().collect();
        let mut violations = Vec::new();

        if normalized.trim().is_empty() {
            violations.push(PasswordPolicyError::EmptyOrWhitespace);
            return violations;
        }

        // NIST: Count Unicode code points (not bytes)
        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            violations.push(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            violations.push(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters (except space, tab, newline) are rejected
        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n')
        {
            violations.push(PasswordPolicyError::InvalidCharacter);
        }

        if is_common_pattern(&normalized) {
            violations.push(PasswordPolicyError::CommonPattern);
        }

        violations
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        // Generate random salt (128 bits = 16 bytes)
        let salt = SaltString::generate(OsRng);

        // OWASP recommended Argon2id parameters:
        // m=19456 (19 MiB), t=2, p=1
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// This type stores the Argon2id hash in PHC format, which includes:
/// - Algorithm identifier
/// - Version
/// - Parameters (memory, iterations, parallelism)
/// - Salt
/// - Hash
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        // Validate it's a valid PHC string
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Uses constant-time comparison to prevent timing attacks.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let argon2 = Argon2::default();

        // Argon2 uses constant-time comparison internally
        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Check for common weak patterns
fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // All same character (e.g., "aaaaaaaa")
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    // Sequential digits (e.g., "12345678")
    if is_sequential_digits(&lower) {
        return true;
    }

    // Keyboard patterns
    const KEYBOARD_PATTERNS: &[&str] = &[
        "qwerty",
        "qwertyuiop",
        "asdfgh",
        "asdfghjkl",
        "zxcvbn",
        "qazwsx",
        "1qaz2wsx",
    ];

    for pattern in KEYBOARD_PATTERNS {
        if lower.contains(pattern) {
            return true;
        }
    }

    // Extremely common passwords
    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "12345678",
        "123456789",
        "1234567890",
        "abcdefgh",
        "letmein1",
        "iloveyou",
    ];

    COMMON_PASSWORDS.iter().any(|p| lower == *p)
}

/// Digits-only password that ascends or descends one step at a time
fn is_sequential_digits(password: &str) -> bool {
    let digits: Vec<u8> = match password
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
    {
        Some(d) if d.len() >= 2 => d,
        _ => return false,
    };

    let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);

    ascending || descending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_accepts_reasonable_password() {
        assert!(ClearTextPassword::new("correct horse battery".to_string()).is_ok());
        assert!(ClearTextPassword::new("Tr0ub4dor&3x".to_string()).is_ok());
    }

    #[test]
    fn test_policy_rejects_short() {
        let err = ClearTextPassword::new("abc".to_string()).unwrap_err();
        assert_eq!(
            err,
            PasswordPolicyError::TooShort { min: 8, actual: 3 }
        );
    }

    #[test]
    fn test_policy_rejects_empty_and_whitespace() {
        assert_eq!(
            ClearTextPassword::new("".to_string()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
        assert_eq!(
            ClearTextPassword::new("        ".to_string()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
    }

    #[test]
    fn test_policy_rejects_too_long() {
        let long = "x".repeat(MAX_PASSWORD_LENGTH + 1);
        assert!(matches!(
            ClearTextPassword::new(long).unwrap_err(),
            PasswordPolicyError::TooLong { .. }
        ));
    }

    #[test]
    fn test_policy_rejects_control_characters() {
        assert_eq!(
            ClearTextPassword::new("pass\u{0000}word!".to_string()).unwrap_err(),
            PasswordPolicyError::InvalidCharacter
        );
    }

    #[test]
    fn test_policy_rejects_common_patterns() {
        assert_eq!(
            ClearTextPassword::new("password123".to_string()).unwrap_err(),
            PasswordPolicyError::CommonPattern
        );
        assert_eq!(
            ClearTextPassword::new("12345678".to_string()).unwrap_err(),
            PasswordPolicyError::CommonPattern
        );
        assert_eq!(
            ClearTextPassword::new("aaaaaaaa".to_string()).unwrap_err(),
            PasswordPolicyError::CommonPattern
        );
    }

    #[test]
    fn test_policy_violations_report_order() {
        // Short AND sequential: both violations, length first
        let violations = ClearTextPassword::policy_violations("1234");
        assert_eq!(violations.len(), 2);
        assert!(matches!(violations[0], PasswordPolicyError::TooShort { .. }));
        assert_eq!(violations[1], PasswordPolicyError::CommonPattern);
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
        let hashed = password.hash().unwrap();

        assert!(hashed.verify(&password));

        let wrong = ClearTextPassword::for_verification("wrong password".to_string());
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_hash_is_salted() {
        let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
        let a = password.hash().unwrap();
        let b = password.hash().unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
    }

    #[test]
    fn test_nfkc_normalization_matches() {
        // Composed vs decomposed forms of "é" verify against each other
        let composed = ClearTextPassword::new("caf\u{00e9} con leche".to_string()).unwrap();
        let decomposed =
            ClearTextPassword::for_verification("cafe\u{0301} con leche".to_string());

        let hashed = composed.hash().unwrap();
        assert!(hashed.verify(&decomposed));
    }

    #[test]
    fn test_from_phc_string_rejects_garbage() {
        assert!(HashedPassword::from_phc_string("not a phc string").is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
        let out = format!("{:?}", password);
        assert!(!out.contains("horse"));
        assert!(out.contains("REDACTED"));
    }
}
