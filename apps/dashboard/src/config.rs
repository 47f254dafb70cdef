use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::storage::ReportNaming;

/// Application configuration loaded from environment variables.
/// Every setting has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub upload_dir: PathBuf,
    pub report_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Prefix prepended to the student's phone number in WhatsApp links.
    pub whatsapp_country_code: String,
    pub report_naming: ReportNaming,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let whatsapp_country_code =
            parse_country_code(&env_or("WHATSAPP_COUNTRY_CODE", "91"))?;
        let report_naming = parse_report_naming(&env_or("REPORT_NAMING", "by_name"))?;

        let max_upload_mb = env_or("MAX_UPLOAD_MB", "10")
            .parse::<usize>()
            .context("MAX_UPLOAD_MB must be a whole number of megabytes")?;

        Ok(Config {
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            report_dir: PathBuf::from(env_or("REPORT_DIR", "reports")),
            port: env_or("PORT", "10000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            whatsapp_country_code,
            report_naming,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}

fn parse_country_code(raw: &str) -> Result<String> {
    let code = raw.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        bail!("WHATSAPP_COUNTRY_CODE must contain only digits, got '{raw}'");
    }
    Ok(code.to_string())
}

fn parse_report_naming(raw: &str) -> Result<ReportNaming> {
    raw.parse::<ReportNaming>()
        .map_err(anyhow::Error::msg)
        .context("REPORT_NAMING is invalid")
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
