use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use sso_totp::{Algorithm, TOTP};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Prints the one-time passcode an authenticator app would currently show for a secret.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Base32 encoded shared secret
    #[arg(long = "otp-secret", env = "SSO_OTP_SECRET", hide_env_values = true)]
    otp_secret: String,
    /// Duration of a step in seconds
    #[arg(long, env = "SSO_OTP_STEP", default_value_t = sso_totp::DEFAULT_STEP)]
    step: u64,
    /// Number of digits of the code
    #[arg(
        long,
        env = "SSO_OTP_DIGITS",
        default_value_t = sso_totp::DEFAULT_DIGITS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(6..=9)
    )]
    digits: usize,
    /// Unix time in seconds to generate the code for, instead of the system clock
    #[arg(long)]
    time: Option<u64>,
    /// Also print how many seconds the code stays valid
    #[arg(long)]
    ttl: bool,
}

fn system_time() -> anyhow::Result<u64> {
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is set before the Unix epoch")?
        .as_secs();
    Ok(t)
}

/// Generates the code for the parsed arguments, followed by a tab and the ttl when asked.
fn run(args: &Args) -> anyhow::Result<String> {
    let key = sso_totp::secret::decode(&args.otp_secret).context("invalid OTP secret")?;
    let totp = TOTP::new(Algorithm::SHA1, args.digits, 0, args.step, key)
        .context("invalid OTP parameters")?;

    let time = match args.time {
        Some(t) => t,
        None => system_time()?,
    };
    debug!(
        time,
        counter = totp.counter(time),
        ttl = totp.ttl(time),
        "generating one-time passcode"
    );

    let code = totp.generate(time);
    if args.ttl {
        Ok(format!("{}\t{}", code, totp.ttl(time)))
    } else {
        Ok(code)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    println!("{}", run(&args)?);
    Ok(())
}
