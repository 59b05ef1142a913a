use anyhow::{Context, Result};
use chrono::NaiveDate;

pub const DEFAULT_CUTOFF_DATE: &str = "2025-06-01";
pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub imap: ImapConfig,
    pub cleanup: CleanupConfig,
}

#[derive(Debug, Clone)]
pub struct ImapConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub mailbox: String,
}

#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// Only messages received strictly before this date are considered
    pub cutoff_date: NaiveDate,
    pub batch_size: usize,
    pub rules_path: Option<String>,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Fail early with a hint when credentials are missing
        Self::check_required_env_vars()?;

        let port = env_or("IMAP_PORT", "993")
            .parse()
            .context("IMAP_PORT must be a port number")?;
        let cutoff_date = parse_cutoff_date(&env_or("CLEANUP_CUTOFF_DATE", DEFAULT_CUTOFF_DATE))
            .context("Invalid CLEANUP_CUTOFF_DATE")?;
        let batch_size = parse_batch_size(&env_or("CLEANUP_BATCH_SIZE", &DEFAULT_BATCH_SIZE.to_string()))
            .context("Invalid CLEANUP_BATCH_SIZE")?;

        Ok(Config {
            imap: ImapConfig {
                server: env_or("IMAP_SERVER", "imap.gmail.com"),
                port,
                username: std::env::var("IMAP_USERNAME").context("IMAP_USERNAME must be set")?,
                password: std::env::var("IMAP_PASSWORD").context("IMAP_PASSWORD must be set")?,
                mailbox: env_or("IMAP_MAILBOX", "INBOX"),
            },
            cleanup: CleanupConfig {
                cutoff_date,
                batch_size,
                rules_path: std::env::var("CLEANUP_RULES_PATH").ok().filter(|p| !p.trim().is_empty()),
            },
        })
    }

    fn check_required_env_vars() -> Result<()> {
        let required_vars = [
            "IMAP_USERNAME",
            "IMAP_PASSWORD",
        ];

        let missing_vars: Vec<&str> = required_vars
            .iter()
            .filter(|var| std::env::var(var).is_err())
            .copied()
            .collect();

        if !missing_vars.is_empty() {
            anyhow::bail!(
                "Missing environment variables: {}\n\
                 \n\
                 💡 Solutions:\n\
                 1. Create a .env file with your credentials:\n\
                    IMAP_USERNAME=you@gmail.com\n\
                    IMAP_PASSWORD=<app password>\n\
                 \n\
                 2. Or export them manually:\n\
                    export IMAP_USERNAME=you@gmail.com\n\
                    export IMAP_PASSWORD=<app password>\n\
                    mailsweep --dry-run",
                missing_vars.join(", ")
            );
        }

        Ok(())
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse a `YYYY-MM-DD` cutoff date
pub fn parse_cutoff_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("'{}' is not a YYYY-MM-DD date", value))
}

pub fn parse_batch_size(value: &str) -> Result<usize> {
    let size: usize = value
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a positive integer", value))?;
    if size == 0 {
        anyhow::bail!("batch size must be greater than zero");
    }
    Ok(size)
}
