use crate::Algorithm;
use crate::TotpError;
use crate::TOTP;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Data is not compliant to [rfc-6238](https://tools.ietf.org/html/rfc6238)
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Rfc6238Error {
    /// Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code
    #[error("Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code. {0} digits is not allowed")]
    InvalidDigits(usize),
    /// The length of the shared secret MUST be at least 128 bits
    #[error("The length of the shared secret MUST be at least 128 bits. {0} bits is not enough")]
    SecretTooSmall(usize),
    #[error(transparent)]
    Totp(#[from] TotpError),
}

fn assert_digits(digits: usize) -> Result<(), Rfc6238Error> {
    if !(6..=8).contains(&digits) {
        Err(Rfc6238Error::InvalidDigits(digits))
    } else {
        Ok(())
    }
}

fn assert_secret_length(secret: &[u8]) -> Result<(), Rfc6238Error> {
    if secret.len() < 16 {
        Err(Rfc6238Error::SecretTooSmall(secret.len() * 8))
    } else {
        Ok(())
    }
}

/// [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options to create a [TOTP](struct.TOTP.html)
///
/// # Example
/// ```
/// use sso_totp::{Rfc6238, TOTP};
///
/// let mut rfc = Rfc6238::with_defaults(
///     b"12345678901234567890".to_vec()
/// ).unwrap();
///
/// // optional, set digits and step
/// rfc.digits(8).unwrap();
/// rfc.step(30).unwrap();
///
/// let totp = TOTP::from_rfc6238(rfc).unwrap();
/// assert_eq!(totp.generate(59), "94287082");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde_support",
    serde(
        try_from = "UncheckedRfc6238<T>",
        bound(deserialize = "T: Deserialize<'de> + AsRef<[u8]>")
    )
)]
pub struct Rfc6238<T = Vec<u8>> {
    /// SHA-1
    algorithm: Algorithm,
    /// The number of digits composing the auth code. Per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3), this can oscilate between 6 and 8 digits
    digits: usize,
    /// The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 1.
    skew: u8,
    /// The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 30 seconds
    step: u64,
    /// As per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-4) the secret should come from a strong source, most likely a CSPRNG. It should be at least 128 bits, but 160 are recommended
    secret: T,
}

impl<T: AsRef<[u8]>> Rfc6238<T> {
    /// Create an [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options that can be turned into a [TOTP](struct.TOTP.html)
    ///
    /// # Errors
    ///
    /// will return a [Rfc6238Error](enum.Rfc6238Error.html) when
    /// - `digits` is lower than 6 or higher than 8
    /// - `secret` is smaller than 128 bits (16 bytes)
    pub fn new(digits: usize, secret: T) -> Result<Rfc6238<T>, Rfc6238Error> {
        assert_digits(digits)?;
        assert_secret_length(secret.as_ref())?;
        Ok(Rfc6238 {
            algorithm: Algorithm::SHA1,
            digits,
            skew: 1,
            step: 30,
            secret,
        })
    }

    /// Create an [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options that can be turned into a [TOTP](struct.TOTP.html),
    /// with a default value of 6 for `digits`
    ///
    /// # Errors
    ///
    /// will return a [Rfc6238Error](enum.Rfc6238Error.html) when
    /// `secret` is smaller than 128 bits (16 bytes)
    pub fn with_defaults(secret: T) -> Result<Rfc6238<T>, Rfc6238Error> {
        Rfc6238::new(6, secret)
    }

    /// Set the `digits`
    pub fn digits(&mut self, value: usize) -> Result<(), Rfc6238Error> {
        assert_digits(value)?;
        self.digits = value;
        Ok(())
    }

    /// Set the `step`, in seconds
    pub fn step(&mut self, value: u64) -> Result<(), Rfc6238Error> {
        crate::assert_step(value)?;
        self.step = value;
        Ok(())
    }

    /// Set the number of steps `check` tolerates on either side of the current one
    pub fn skew(&mut self, value: u8) {
        self.skew = value;
    }
}

#[cfg(feature = "serde_support")]
#[derive(Deserialize)]
struct UncheckedRfc6238<T> {
    algorithm: Algorithm,
    digits: usize,
    skew: u8,
    step: u64,
    secret: T,
}

#[cfg(feature = "serde_support")]
impl<T: AsRef<[u8]>> TryFrom<UncheckedRfc6238<T>> for Rfc6238<T> {
    type Error = Rfc6238Error;

    fn try_from(raw: UncheckedRfc6238<T>) -> Result<Self, Self::Error> {
        let mut rfc = Rfc6238::new(raw.digits, raw.secret)?;
        rfc.step(raw.step)?;
        rfc.skew(raw.skew);
        rfc.algorithm = raw.algorithm;
        Ok(rfc)
    }
}

impl<T: AsRef<[u8]>> TryFrom<Rfc6238<T>> for TOTP<T> {
    type Error = TotpError;

    /// Try to create a [TOTP](struct.TOTP.html) from a [Rfc6238](struct.Rfc6238.html) config
    fn try_from(rfc: Rfc6238<T>) -> Result<Self, Self::Error> {
        TOTP::new(rfc.algorithm, rfc.digits, rfc.skew, rfc.step, rfc.secret)
    }
}
