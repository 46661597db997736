//! This library generates the time-based one-time passwords an authenticator app would
//! display for a given shared secret, so an automated login can answer a two-factor prompt.
//!
//! Nothing here reads the system clock: every code is computed for an instant passed in by
//! the caller, as Unix seconds.
//!
//! Be aware that some authenticator apps will accept the `SHA256`
//! and `SHA512` algorithms but silently fallback to `SHA1` which will
//! make the `check()` function fail due to mismatched algorithms.
//!
//! Use the `SHA1` algorithm to avoid this problem.
//!
//! # Examples
//!
//! ```rust
//! let code = sso_totp::totp("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", 59).unwrap();
//! assert_eq!(code, "287082");
//! ```
//!
//! ```rust
//! use sso_totp::{Algorithm, TOTP};
//!
//! let totp = TOTP::new(
//!     Algorithm::SHA1,
//!     8,
//!     0,
//!     30,
//!     b"12345678901234567890".to_vec(),
//! ).unwrap();
//! assert_eq!(totp.generate(1111111109), "07081804");
//! ```

mod error;
pub mod hotp;
mod rfc;
pub mod secret;

pub use error::TotpError;
pub use rfc::{Rfc6238, Rfc6238Error};
pub use secret::{Secret, SecretParseError};

use constant_time_eq::constant_time_eq;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use core::fmt;

use hmac::Mac;

type HmacSha1 = hmac::Hmac<sha1::Sha1>;
type HmacSha256 = hmac::Hmac<sha2::Sha256>;
type HmacSha512 = hmac::Hmac<sha2::Sha512>;

/// Step used by authenticator apps unless told otherwise.
pub const DEFAULT_STEP: u64 = 30;
/// Code width used by authenticator apps unless told otherwise.
pub const DEFAULT_DIGITS: usize = 6;

/// Algorithm enum holds the three standards algorithms for TOTP as per the [reference implementation](https://tools.ietf.org/html/rfc6238#appendix-A)
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Algorithm {
    #[default]
    SHA1,
    SHA256,
    SHA512,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::SHA1 => f.write_str("SHA1"),
            Algorithm::SHA256 => f.write_str("SHA256"),
            Algorithm::SHA512 => f.write_str("SHA512"),
        }
    }
}

impl Algorithm {
    fn hash<D>(mut digest: D, data: &[u8]) -> Vec<u8>
    where
        D: Mac,
    {
        digest.update(data);
        digest.finalize().into_bytes().to_vec()
    }

    fn sign(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        const ANY_KEY_SIZE: &str = "HMAC can take a key of any size";
        match self {
            Algorithm::SHA1 => {
                Algorithm::hash(HmacSha1::new_from_slice(key).expect(ANY_KEY_SIZE), data)
            }
            Algorithm::SHA256 => {
                Algorithm::hash(HmacSha256::new_from_slice(key).expect(ANY_KEY_SIZE), data)
            }
            Algorithm::SHA512 => {
                Algorithm::hash(HmacSha512::new_from_slice(key).expect(ANY_KEY_SIZE), data)
            }
        }
    }
}

/// Generates the default 6-digit, 30-second, HMAC-SHA1 code of a base32 `secret` at `time`
/// (seconds since the Unix epoch).
///
/// # Errors
///
/// Will return [TotpError::InvalidSecretEncoding] if `secret` is not usable base32.
pub fn totp(secret: &str, time: u64) -> Result<String, TotpError> {
    totp_custom(secret, time, DEFAULT_STEP, DEFAULT_DIGITS)
}

/// Generates the HMAC-SHA1 code of a base32 `secret` at `time` for any step and width.
///
/// ```rust
/// let code = sso_totp::totp_custom("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", 59, 30, 8).unwrap();
/// assert_eq!(code, "94287082");
/// ```
///
/// # Errors
///
/// Errors from decoding the secret and computing the code are returned unchanged, and
/// [TotpError::InvalidStepSeconds] is returned for a zero `step`.
pub fn totp_custom(
    secret: &str,
    time: u64,
    step: u64,
    digits: usize,
) -> Result<String, TotpError> {
    let key = secret::decode(secret)?;
    assert_step(step)?;
    hotp::hotp(&key, time / step, digits)
}

pub(crate) fn assert_step(step: u64) -> Result<(), TotpError> {
    if step == 0 {
        Err(TotpError::InvalidStepSeconds(step))
    } else {
        Ok(())
    }
}

/// TOTP holds informations as to how to generate an auth code and validate it. Its [secret](struct.TOTP.html#structfield.secret) field is sensitive data, treat it accordingly
///
/// The secret is held decoded, so a `TOTP` built once from base32 text can generate any
/// number of codes without decoding again.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde_support",
    serde(
        try_from = "UncheckedTotp<T>",
        bound(deserialize = "T: Deserialize<'de> + AsRef<[u8]>")
    )
)]
pub struct TOTP<T = Vec<u8>> {
    /// SHA-1 is the most widespread algorithm used, and for totp pursposes, SHA-1 hash collisions are [not a problem](https://tools.ietf.org/html/rfc4226#appendix-B.2) as HMAC-SHA-1 is not impacted. It's also the main one cited in [rfc-6238](https://tools.ietf.org/html/rfc6238#section-3) even though the [reference implementation](https://tools.ietf.org/html/rfc6238#appendix-A) permits the use of SHA-1, SHA-256 and SHA-512. Not all clients support other algorithms then SHA-1
    pub algorithm: Algorithm,
    /// The number of digits composing the auth code, between 1 and 9. Authenticator apps use 6
    pub digits: usize,
    /// Number of steps allowed as network delay when checking a token. 1 would mean one step before current step and one step after are valids. Generation always uses the exact step
    pub skew: u8,
    /// Duration in seconds of a step. The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 30 seconds
    pub step: u64,
    /// As per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-4) the secret should come from a strong source, most likely a CSPRNG. It should be at least 128 bits, but 160 are recommended
    ///
    /// non-encoded value
    pub secret: T,
}

/// Deserialized fields, before they go through [TOTP::new].
#[cfg(feature = "serde_support")]
#[derive(Deserialize)]
struct UncheckedTotp<T> {
    algorithm: Algorithm,
    digits: usize,
    skew: u8,
    step: u64,
    secret: T,
}

#[cfg(feature = "serde_support")]
impl<T: AsRef<[u8]>> TryFrom<UncheckedTotp<T>> for TOTP<T> {
    type Error = TotpError;

    fn try_from(raw: UncheckedTotp<T>) -> Result<Self, Self::Error> {
        TOTP::new(raw.algorithm, raw.digits, raw.skew, raw.step, raw.secret)
    }
}

impl<T: AsRef<[u8]>> PartialEq for TOTP<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.algorithm != other.algorithm {
            return false;
        }
        if self.digits != other.digits {
            return false;
        }
        if self.skew != other.skew {
            return false;
        }
        if self.step != other.step {
            return false;
        }
        constant_time_eq(self.secret.as_ref(), other.secret.as_ref())
    }
}

impl<T> fmt::Display for TOTP<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "digits: {}; step: {}; alg: {}",
            self.digits, self.step, self.algorithm,
        )
    }
}

impl TOTP<Vec<u8>> {
    /// Will create a new instance of TOTP from a base32 encoded secret, with the values
    /// authenticator apps default to: SHA1, 6 digits, a 30 seconds step, and no skew
    ///
    /// ```rust
    /// use sso_totp::TOTP;
    /// let totp = TOTP::from_base32("gezd gnbv gy3t qojq gezd gnbv gy3t qojq").unwrap();
    /// assert_eq!(totp.generate(59), "287082");
    /// ```
    ///
    /// # Errors
    ///
    /// Will return an error if the secret is not valid base32
    pub fn from_base32(secret: &str) -> Result<Self, TotpError> {
        TOTP::new(
            Algorithm::SHA1,
            DEFAULT_DIGITS,
            0,
            DEFAULT_STEP,
            secret::decode(secret)?,
        )
    }
}

impl<T: AsRef<[u8]>> TOTP<T> {
    /// Will create a new instance of TOTP with given parameters. See [the doc](struct.TOTP.html#fields) for reference as to how to choose those values
    ///
    /// # Description
    /// * `secret`: expect a non-encoded value, to pass in base32 string use `Secret::Encoded(String)`
    ///
    /// ```rust
    /// use sso_totp::{Secret, TOTP, Algorithm};
    /// let secret = Secret::Encoded("OBWGC2LOFVZXI4TJNZTS243FMNZGK5BNGEZDG".to_string());
    /// let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, secret.to_bytes().unwrap()).unwrap();
    /// ```
    /// * `digits`: MUST be between 1 & 9
    /// * `step`: MUST be strictly positive
    ///
    /// # Errors
    ///
    /// Will return an error if `digits` or `step` is out of range
    pub fn new(
        algorithm: Algorithm,
        digits: usize,
        skew: u8,
        step: u64,
        secret: T,
    ) -> Result<TOTP<T>, TotpError> {
        hotp::assert_digits(digits)?;
        assert_step(step)?;
        Ok(TOTP {
            algorithm,
            digits,
            skew,
            step,
            secret,
        })
    }

    /// Will create a new instance of TOTP from the given [Rfc6238](struct.Rfc6238.html) struct
    ///
    /// # Errors
    ///
    /// Will return an error if the options are out of range
    pub fn from_rfc6238(rfc: Rfc6238<T>) -> Result<TOTP<T>, TotpError> {
        TOTP::try_from(rfc)
    }

    /// Returns the step counter the given timestamp falls into
    pub fn counter(&self, time: u64) -> u64 {
        time / self.step
    }

    /// Will sign the given timestamp
    pub fn sign(&self, time: u64) -> Vec<u8> {
        self.sign_counter(self.counter(time))
    }

    fn sign_counter(&self, counter: u64) -> Vec<u8> {
        self.algorithm
            .sign(self.secret.as_ref(), counter.to_be_bytes().as_ref())
    }

    fn generate_counter(&self, counter: u64) -> String {
        hotp::format_code(hotp::truncate(&self.sign_counter(counter)), self.digits)
    }

    /// Will generate a token given the provided timestamp in seconds
    pub fn generate(&self, time: u64) -> String {
        self.generate_counter(self.counter(time))
    }

    /// Returns the timestamp of the first second for the next step
    /// given the provided timestamp in seconds, or `None` if that second is past `u64::MAX`
    pub fn next_step(&self, time: u64) -> Option<u64> {
        let step = time / self.step;

        step.checked_add(1)?.checked_mul(self.step)
    }

    /// Give the ttl (in seconds) of the token generated for the provided timestamp
    pub fn ttl(&self, time: u64) -> u64 {
        self.step - (time % self.step)
    }

    /// Will check if token is valid given the provided timestamp in seconds, accounting [skew](struct.TOTP.html#structfield.skew)
    pub fn check(&self, token: &str, time: u64) -> bool {
        let counter = self.counter(time);
        let skew = self.skew as u64;
        let first = counter.saturating_sub(skew);
        let last = counter.saturating_add(skew);

        (first..=last)
            .any(|c| constant_time_eq(self.generate_counter(c).as_bytes(), token.as_bytes()))
    }

    /// Will return the base32 representation of the secret, which might be useful when users want to manually add the secret to their authenticator
    pub fn get_secret_base32(&self) -> String {
        base32::encode(
            base32::Alphabet::Rfc4648 { padding: false },
            self.secret.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    const RFC_SHA1_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[fixture]
    fn sha1_key() -> Vec<u8> {
        b"12345678901234567890".to_vec()
    }

    #[fixture]
    fn sha256_key() -> Vec<u8> {
        b"12345678901234567890123456789012".to_vec()
    }

    #[fixture]
    fn sha512_key() -> Vec<u8> {
        b"1234567890123456789012345678901234567890123456789012345678901234".to_vec()
    }

    #[rstest]
    #[case(59, "94287082")]
    #[case(1111111109, "07081804")]
    #[case(1111111111, "14050471")]
    #[case(1234567890, "89005924")]
    #[case(2000000000, "69279037")]
    #[case(20000000000, "65353130")]
    fn rfc6238_sha1_vectors(#[case] time: u64, #[case] expected: &str) {
        assert_eq!(totp_custom(RFC_SHA1_SECRET, time, 30, 8).unwrap(), expected);
    }

    #[rstest]
    #[case(59, "287082")]
    #[case(1111111109, "081804")]
    #[case(1111111111, "050471")]
    #[case(1234567890, "005924")]
    #[case(2000000000, "279037")]
    fn rfc6238_sha1_vectors_six_digits(#[case] time: u64, #[case] expected: &str) {
        assert_eq!(totp(RFC_SHA1_SECRET, time).unwrap(), expected);
    }

    #[rstest]
    #[case(sha1_key(), Algorithm::SHA1, 59, "94287082")]
    #[case(sha256_key(), Algorithm::SHA256, 59, "46119246")]
    #[case(sha512_key(), Algorithm::SHA512, 59, "90693936")]
    #[case(sha1_key(), Algorithm::SHA1, 1111111109, "07081804")]
    #[case(sha256_key(), Algorithm::SHA256, 1111111109, "68084774")]
    #[case(sha512_key(), Algorithm::SHA512, 1111111109, "25091201")]
    #[case(sha1_key(), Algorithm::SHA1, 1111111111, "14050471")]
    #[case(sha256_key(), Algorithm::SHA256, 1111111111, "67062674")]
    #[case(sha512_key(), Algorithm::SHA512, 1111111111, "99943326")]
    #[case(sha1_key(), Algorithm::SHA1, 1234567890, "89005924")]
    #[case(sha256_key(), Algorithm::SHA256, 1234567890, "91819424")]
    #[case(sha512_key(), Algorithm::SHA512, 1234567890, "93441116")]
    #[case(sha1_key(), Algorithm::SHA1, 2000000000, "69279037")]
    #[case(sha256_key(), Algorithm::SHA256, 2000000000, "90698825")]
    #[case(sha512_key(), Algorithm::SHA512, 2000000000, "38618901")]
    #[case(sha1_key(), Algorithm::SHA1, 20000000000, "65353130")]
    #[case(sha256_key(), Algorithm::SHA256, 20000000000, "77737706")]
    #[case(sha512_key(), Algorithm::SHA512, 20000000000, "47863826")]
    fn rfc6238_vectors(
        #[case] key: Vec<u8>,
        #[case] algorithm: Algorithm,
        #[case] time: u64,
        #[case] expected: &str,
    ) {
        let totp = TOTP::new(algorithm, expected.len(), 0, 30, key).unwrap();
        assert_eq!(totp.generate(time), expected);
    }

    #[test]
    fn deterministic() {
        let first = totp(RFC_SHA1_SECRET, 1234567890).unwrap();
        for _ in 0..10 {
            assert_eq!(totp(RFC_SHA1_SECRET, 1234567890).unwrap(), first);
        }
    }

    #[test]
    fn same_code_within_step() {
        // 1111111109 and 1111111111 straddle the boundary at 1111111110.
        let before = totp_custom(RFC_SHA1_SECRET, 1111111109, 30, 8).unwrap();
        assert_eq!(totp_custom(RFC_SHA1_SECRET, 1111111080, 30, 8).unwrap(), before);
        let after = totp_custom(RFC_SHA1_SECRET, 1111111111, 30, 8).unwrap();
        assert_eq!(totp_custom(RFC_SHA1_SECRET, 1111111110, 30, 8).unwrap(), after);
        assert_eq!(totp_custom(RFC_SHA1_SECRET, 1111111139, 30, 8).unwrap(), after);
        assert_ne!(before, after);
    }

    #[test]
    fn width_preserves_leading_zeros() {
        let code = totp_custom(RFC_SHA1_SECRET, 1234567890, 30, 6).unwrap();
        assert_eq!(code, "005924");
        assert_eq!(code.len(), 6);
    }

    #[rstest]
    #[case("")]
    #[case("    ")]
    #[case("GEZDGNBVGY3TQOJ0")]
    #[case("GEZDGNBVGY3TQOJ1")]
    #[case("GEZDGNBVGY3TQOJ8")]
    #[case("GEZDGNBVGY3TQOJ9")]
    #[case("GEZDGNBV,GY3TQOJQ")]
    #[case("GEZDGNBVGY3TQOJQ=")]
    fn rejects_malformed_secret(#[case] secret: &str) {
        assert!(matches!(
            totp(secret, 59),
            Err(TotpError::InvalidSecretEncoding(_))
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(10)]
    #[case(12)]
    fn rejects_digit_count(#[case] digits: usize) {
        assert_eq!(
            totp_custom(RFC_SHA1_SECRET, 59, 30, digits),
            Err(TotpError::InvalidDigitCount(digits))
        );
    }

    #[rstest]
    #[case(6)]
    #[case(8)]
    fn accepts_digit_count(#[case] digits: usize) {
        assert_eq!(
            totp_custom(RFC_SHA1_SECRET, 59, 30, digits).unwrap().len(),
            digits
        );
    }

    #[test]
    fn rejects_zero_step() {
        assert_eq!(
            totp_custom(RFC_SHA1_SECRET, 59, 0, 6),
            Err(TotpError::InvalidStepSeconds(0))
        );
        assert_eq!(
            TOTP::new(Algorithm::SHA1, 6, 0, 0, sha1_key()),
            Err(TotpError::InvalidStepSeconds(0))
        );
    }

    #[test]
    fn step_changes_counter() {
        let thirty = TOTP::new(Algorithm::SHA1, 8, 0, 30, sha1_key()).unwrap();
        let sixty = TOTP::new(Algorithm::SHA1, 8, 0, 60, sha1_key()).unwrap();
        assert_eq!(thirty.counter(1111111111), 37037037);
        assert_eq!(sixty.counter(1111111111), 18518518);
        assert_ne!(thirty.generate(1111111111), sixty.generate(1111111111));
        assert_eq!(
            totp_custom(RFC_SHA1_SECRET, 1111111111, 60, 8).unwrap(),
            sixty.generate(1111111111)
        );
    }

    #[test]
    fn from_base32_defaults() {
        let totp = TOTP::from_base32(RFC_SHA1_SECRET).unwrap();
        assert_eq!(totp.algorithm, Algorithm::SHA1);
        assert_eq!(totp.digits, 6);
        assert_eq!(totp.skew, 0);
        assert_eq!(totp.step, 30);
        assert_eq!(totp.secret, sha1_key());
        assert_eq!(totp.generate(59), "287082");
    }

    #[test]
    fn from_base32_rejects_invalid() {
        assert_eq!(
            TOTP::from_base32("not-base32"),
            Err(TotpError::InvalidSecretEncoding(
                SecretParseError::InvalidCharacter('-')
            ))
        );
    }

    #[test]
    fn comparison_different_algo() {
        let reference = TOTP::new(Algorithm::SHA1, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        let test = TOTP::new(Algorithm::SHA256, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        assert_ne!(reference, test);
    }

    #[test]
    fn comparison_different_digits() {
        let reference = TOTP::new(Algorithm::SHA1, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        let test = TOTP::new(Algorithm::SHA1, 8, 1, 1, "TestSecretSuperSecret").unwrap();
        assert_ne!(reference, test);
    }

    #[test]
    fn comparison_different_skew() {
        let reference = TOTP::new(Algorithm::SHA1, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        let test = TOTP::new(Algorithm::SHA1, 6, 0, 1, "TestSecretSuperSecret").unwrap();
        assert_ne!(reference, test);
    }

    #[test]
    fn comparison_different_step() {
        let reference = TOTP::new(Algorithm::SHA1, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        let test = TOTP::new(Algorithm::SHA1, 6, 1, 30, "TestSecretSuperSecret").unwrap();
        assert_ne!(reference, test);
    }

    #[test]
    fn comparison_different_secret() {
        let reference = TOTP::new(Algorithm::SHA1, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        let test = TOTP::new(Algorithm::SHA1, 6, 1, 1, "TestSecretDifferentSecret").unwrap();
        assert_ne!(reference, test);
    }

    #[test]
    fn returns_base32() {
        let totp = TOTP::new(Algorithm::SHA1, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        assert_eq!(
            totp.get_secret_base32().as_str(),
            "KRSXG5CTMVRXEZLUKN2XAZLSKNSWG4TFOQ"
        );
    }

    #[test]
    fn generate_token() {
        let totp = TOTP::new(Algorithm::SHA1, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        assert_eq!(totp.generate(1000).as_str(), "659761");
    }

    #[test]
    fn generates_token_sha256() {
        let totp = TOTP::new(Algorithm::SHA256, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        assert_eq!(totp.generate(1000).as_str(), "076417");
    }

    #[test]
    fn generates_token_sha512() {
        let totp = TOTP::new(Algorithm::SHA512, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        assert_eq!(totp.generate(1000).as_str(), "473536");
    }

    #[test]
    fn checks_token() {
        let totp = TOTP::new(Algorithm::SHA1, 6, 0, 1, "TestSecretSuperSecret").unwrap();
        assert!(totp.check("659761", 1000));
        assert!(!totp.check("174269", 1000));
        assert!(!totp.check("bogus", 1000));
    }

    #[test]
    fn checks_token_with_skew() {
        let totp = TOTP::new(Algorithm::SHA1, 6, 1, 1, "TestSecretSuperSecret").unwrap();
        assert!(
            totp.check("174269", 1000) && totp.check("659761", 1000) && totp.check("260393", 1000)
        );
    }

    #[test]
    fn checks_token_with_skew_at_epoch() {
        let totp = TOTP::new(Algorithm::SHA1, 6, 2, 30, sha1_key()).unwrap();
        assert!(totp.check(&totp.generate(0), 0));
        assert!(totp.check(&totp.generate(30), 0));
        assert!(totp.check(&totp.generate(60), 0));
    }

    #[test]
    fn checks_token_with_skew_at_end_of_time() {
        let totp = TOTP::new(Algorithm::SHA1, 6, 1, 1, sha1_key()).unwrap();
        assert!(totp.check(&totp.generate(u64::MAX), u64::MAX));
    }

    #[test]
    fn next_step() {
        let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, "TestSecretSuperSecret").unwrap();
        assert_eq!(totp.next_step(0), Some(30));
        assert_eq!(totp.next_step(29), Some(30));
        assert_eq!(totp.next_step(30), Some(60));
    }

    #[test]
    fn next_step_at_end_of_time() {
        let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, "TestSecretSuperSecret").unwrap();
        // u64::MAX - 15 is the first second of the last whole 30 seconds step.
        assert_eq!(totp.next_step(u64::MAX - 16), Some(u64::MAX - 15));
        assert_eq!(totp.next_step(u64::MAX - 15), None);
        assert_eq!(totp.next_step(u64::MAX), None);
    }

    #[rstest]
    #[case(0, 30)]
    #[case(1, 29)]
    #[case(29, 1)]
    #[case(30, 30)]
    #[case(59, 1)]
    #[case(u64::MAX - 16, 1)]
    #[case(u64::MAX, 15)]
    fn ttl(#[case] time: u64, #[case] expected: u64) {
        let totp = TOTP::new(Algorithm::SHA1, 6, 0, 30, "TestSecretSuperSecret").unwrap();
        assert_eq!(totp.ttl(time), expected);
        if let Some(next) = totp.next_step(time) {
            assert_eq!(next - time, expected);
        }
    }

    #[test]
    fn display() {
        let totp = TOTP::new(Algorithm::SHA256, 8, 1, 60, b"12345678901234567890".to_vec()).unwrap();
        assert_eq!(totp.to_string(), "digits: 8; step: 60; alg: SHA256");
    }

    #[cfg(feature = "serde_support")]
    #[rstest]
    #[case(r#"{"algorithm":"SHA1","digits":6,"skew":0,"step":0,"secret":[49,50,51]}"#, TotpError::InvalidStepSeconds(0))]
    #[case(r#"{"algorithm":"SHA1","digits":10,"skew":0,"step":30,"secret":[49,50,51]}"#, TotpError::InvalidDigitCount(10))]
    #[case(r#"{"algorithm":"SHA1","digits":0,"skew":0,"step":30,"secret":[49,50,51]}"#, TotpError::InvalidDigitCount(0))]
    fn deserialize_validates(#[case] json: &str, #[case] expected: TotpError) {
        let err = serde_json::from_str::<TOTP>(json).unwrap_err();
        assert!(err.to_string().contains(&expected.to_string()));
    }

    #[test]
    #[cfg(feature = "serde_support")]
    fn serde_round_trip() {
        let totp = TOTP::new(Algorithm::SHA256, 8, 1, 60, b"12345678901234567890".to_vec()).unwrap();
        let json = serde_json::to_string(&totp).unwrap();
        let back: TOTP = serde_json::from_str(&json).unwrap();
        assert_eq!(back, totp);
        assert_eq!(back.generate(59), totp.generate(59));
    }

    #[test]
    fn shared_between_threads() {
        let totp = std::sync::Arc::new(TOTP::from_base32(RFC_SHA1_SECRET).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let totp = totp.clone();
                std::thread::spawn(move || totp.generate(59))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "287082");
        }
    }
}
