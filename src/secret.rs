//! Representation of a secret either a "raw" \[u8\] or "base 32" encoded String
//!
//! Encoded secrets are usually copy-pasted from an enrollment page, so decoding is
//! lenient about layout and strict about content: whitespace is dropped and letters are
//! uppercased before anything else, trailing `=` padding is optional but must be well
//! formed when present, and any symbol outside `A-Z2-7` is rejected.
//!
//! # Examples
//!
//! ```
//! use sso_totp::Secret;
//!
//! let secret = Secret::Encoded(String::from("gezd gnbv gy3t qojq"));
//! assert_eq!(secret.to_bytes().unwrap(), b"1234567890".to_vec());
//!
//! let raw = Secret::Raw(b"1234567890".to_vec());
//! assert_eq!(raw.to_encoded().to_string(), "GEZDGNBVGY3TQOJQ");
//! ```

use base32::{self, Alphabet};

use constant_time_eq::constant_time_eq;

/// Different ways secret parsing failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretParseError {
    /// Nothing usable is left once whitespace and padding are removed, or too few
    /// symbols remain to make up a single key byte.
    #[error("Secret does not contain any key material")]
    Empty,
    /// A symbol outside of the RFC 4648 base32 alphabet.
    #[error("Character '{0}' is not part of the base32 alphabet")]
    InvalidCharacter(char),
    /// `=` appears before the end, or the padding length does not close an 8-symbol group.
    #[error("Padding is malformed")]
    InvalidPadding,
    /// Invalid base32 input.
    #[error("Could not decode base32 secret")]
    ParseBase32,
}

/// Decodes a base32 secret as typed or pasted by a user into key bytes.
///
/// ```
/// use sso_totp::{secret, SecretParseError};
///
/// assert_eq!(secret::decode("JBSWY3DPEHPK3PXP").unwrap(), b"Hello!\xDE\xAD\xBE\xEF".to_vec());
/// assert_eq!(secret::decode("GEZDGNBVGY3TQOJ1"), Err(SecretParseError::InvalidCharacter('1')));
/// ```
pub fn decode(text: &str) -> Result<Vec<u8>, SecretParseError> {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if normalized.is_empty() {
        return Err(SecretParseError::Empty);
    }

    let data = normalized.trim_end_matches('=');
    if let Some(c) = data.chars().find(|c| !is_base32_symbol(*c)) {
        return Err(match c {
            '=' => SecretParseError::InvalidPadding,
            _ => SecretParseError::InvalidCharacter(c),
        });
    }

    let padding = normalized.len() - data.len();
    if padding > 0 && (normalized.len() % 8 != 0 || !matches!(padding, 1 | 3 | 4 | 6)) {
        return Err(SecretParseError::InvalidPadding);
    }

    // Trailing bits that do not fill a whole byte are dropped by the decoder.
    match base32::decode(Alphabet::Rfc4648 { padding: false }, data) {
        Some(bytes) if bytes.is_empty() => Err(SecretParseError::Empty),
        Some(bytes) => Ok(bytes),
        None => Err(SecretParseError::ParseBase32),
    }
}

fn is_base32_symbol(c: char) -> bool {
    matches!(c, 'A'..='Z' | '2'..='7')
}

/// Shared secret between client and server to validate token against/generate token from.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "zeroize", derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop))]
pub enum Secret {
    /// Non-encoded "raw" secret.
    Raw(Vec<u8>),
    /// Base32 encoded secret.
    Encoded(String),
}

impl PartialEq for Secret {
    /// Will check that to_bytes() returns the same.
    /// One secret can be Raw, and the other Encoded.
    /// A secret that cannot be decoded is never equal to anything.
    fn eq(&self, other: &Self) -> bool {
        match (self.to_bytes(), other.to_bytes()) {
            (Ok(lhs), Ok(rhs)) => constant_time_eq(&lhs, &rhs),
            _ => false,
        }
    }
}

impl Secret {
    /// Get the inner String value as a Vec of bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SecretParseError> {
        match self {
            Secret::Raw(s) => Ok(s.to_vec()),
            Secret::Encoded(s) => decode(s),
        }
    }

    /// Try to transform a `Secret::Encoded` into a `Secret::Raw`
    pub fn to_raw(&self) -> Result<Self, SecretParseError> {
        match self {
            Secret::Raw(_) => Ok(self.clone()),
            Secret::Encoded(s) => decode(s).map(Secret::Raw),
        }
    }

    /// Transforms a `Secret::Raw` into a `Secret::Encoded`, without padding.
    pub fn to_encoded(&self) -> Self {
        match self {
            Secret::Raw(s) => {
                Secret::Encoded(base32::encode(Alphabet::Rfc4648 { padding: false }, s))
            }
            Secret::Encoded(_) => self.clone(),
        }
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Secret::Raw(bytes) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            Secret::Encoded(s) => write!(f, "{}", s),
        }
    }
}
