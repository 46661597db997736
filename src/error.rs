use crate::SecretParseError;

/// Every way generating a code can fail.
///
/// All of them are a deterministic function of the inputs: retrying with the same
/// secret, step and digit count will fail the same way.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum TotpError {
    /// The secret text is not usable Base32.
    #[error("Secret is not a valid base32 string: {0}")]
    InvalidSecretEncoding(#[from] SecretParseError),
    /// The requested code width is outside of `1..=9`.
    #[error("Codes can only be 1 to 9 digits long. {0} digits is not allowed")]
    InvalidDigitCount(usize),
    /// The time step is zero.
    #[error("Step must be a strictly positive number of seconds, not {0}")]
    InvalidStepSeconds(u64),
}
