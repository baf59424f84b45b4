//! Store a secret that can later be typed by speaking its name and
//! passphrase.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Password;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use speechkeys::grammar::Locale;
use speechkeys::grammar::rules::normalize_passphrase;
use speechkeys::{Config, Vault, text_to_sequence};

#[derive(Parser, Debug)]
#[command(name = "speechpass", version, about = "Store a secret for the password grammar")]
struct Args {
    /// Grammar language code the secret is spoken in (enx, nld).
    language: String,

    /// Name spoken to retrieve the secret.
    name: String,

    /// Vault directory; defaults to the configured one or ~/speechpass.
    #[arg(long)]
    vault_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("speechpass: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let locale = Locale::from_code(&args.language).code();
    if locale != args.language {
        debug!(requested = %args.language, locale, "unknown language, using fallback");
    }

    let vault = match args.vault_dir {
        Some(dir) => Vault::new(dir),
        None => Config::load()
            .context("failed to load configuration")?
            .vault()?,
    };

    if vault.contains(locale, &args.name)? {
        anyhow::bail!("a secret named {:?} already exists", args.name);
    }

    let secret = prompt_twice("Secret")?;
    text_to_sequence(&secret).context("secret contains characters that cannot be typed")?;
    let passphrase = prompt_twice("Spoken passphrase")?;

    vault
        .store(locale, &args.name, &secret, &normalize_passphrase(&passphrase))
        .with_context(|| format!("failed to store {:?}", args.name))?;
    println!("stored {:?} in {}", args.name, vault.root().display());
    Ok(())
}

/// Read a hidden value and its confirmation. A mismatch aborts.
fn prompt_twice(prompt: &str) -> Result<String> {
    let read = |prompt: String| {
        Password::new()
            .with_prompt(prompt)
            .interact()
            .context("failed to read input")
    };
    let first = read(prompt.to_string())?;
    let second = read("Repeat to be sure".to_string())?;
    if first != second {
        anyhow::bail!("{} entries do not match", prompt.to_lowercase());
    }
    Ok(first)
}
