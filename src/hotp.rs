//! Counter based one-time passwords, as described by [rfc-4226](https://tools.ietf.org/html/rfc4226).
//!
//! This is the digest and truncation core every TOTP code goes through.

use crate::{Algorithm, TotpError};

/// Largest code width whose modulus stays below the 31-bit truncated value.
pub const MAX_DIGITS: usize = 9;

pub(crate) fn assert_digits(digits: usize) -> Result<(), TotpError> {
    if !(1..=MAX_DIGITS).contains(&digits) {
        Err(TotpError::InvalidDigitCount(digits))
    } else {
        Ok(())
    }
}

/// Computes the HMAC-SHA1 based one-time password of `key` for `counter`.
///
/// The result is always exactly `digits` characters long, leading zeros included.
///
/// ```
/// use sso_totp::hotp::hotp;
///
/// assert_eq!(hotp(b"12345678901234567890", 0, 6).unwrap(), "755224");
/// ```
///
/// # Errors
///
/// Will return [TotpError::InvalidDigitCount] if `digits` is not in `1..=9`.
pub fn hotp(key: &[u8], counter: u64, digits: usize) -> Result<String, TotpError> {
    hotp_with(Algorithm::SHA1, key, counter, digits)
}

/// Same as [hotp], with the HMAC hash function chosen by `algorithm`.
pub fn hotp_with(
    algorithm: Algorithm,
    key: &[u8],
    counter: u64,
    digits: usize,
) -> Result<String, TotpError> {
    assert_digits(digits)?;
    let digest = algorithm.sign(key, &counter.to_be_bytes());
    Ok(format_code(truncate(&digest), digits))
}

/// Dynamic truncation of a digest into a 31-bit integer.
///
/// The offset is read from the last byte rather than a fixed index so SHA-256 and
/// SHA-512 digests are truncated the same way as SHA-1 ones.
pub(crate) fn truncate(digest: &[u8]) -> u32 {
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let bytes = [
        digest[offset],
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ];
    u32::from_be_bytes(bytes) & 0x7fff_ffff
}

/// Reduces `value` to `digits` decimal digits, left-padded with zeros.
pub(crate) fn format_code(value: u32, digits: usize) -> String {
    format!("{1:00$}", digits, value % 10_u32.pow(digits as u32))
}
