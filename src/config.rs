use anyhow::{bail, Context, Result};

use crate::i18n::LocalePolicy;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub public_dir: String,

    // Locales
    pub locales: Vec<String>,
    pub default_locale: String,
    pub locale_policy: LocalePolicy,

    // Contact document store
    pub contact_store_url: Option<String>,
    pub contact_store_api_key: Option<String>,
    pub contact_collection: String,

    // Mail relay
    pub mail_relay_url: Option<String>,
    pub mail_relay_user: Option<String>,
    pub mail_relay_pass: Option<String>,
    pub mail_from: Option<String>,
    pub contact_to: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let locales: Vec<String> = std::env::var("SITE_LOCALES")
            .unwrap_or_else(|_| "en,pl".to_string())
            .split(',')
            .map(|code| code.trim().to_lowercase())
            .filter(|code| !code.is_empty())
            .collect();
        if locales.is_empty() {
            bail!("SITE_LOCALES must name at least one locale");
        }

        let default_locale = std::env::var("DEFAULT_LOCALE")
            .unwrap_or_else(|_| "pl".to_string())
            .trim()
            .to_lowercase();
        if !locales.contains(&default_locale) {
            bail!(
                "DEFAULT_LOCALE '{}' is not one of SITE_LOCALES ({})",
                default_locale,
                locales.join(", ")
            );
        }

        let locale_policy = match std::env::var("LOCALE_POLICY") {
            Ok(raw) => raw.parse().context("Invalid LOCALE_POLICY")?,
            Err(_) => LocalePolicy::StaticDefault,
        };

        Ok(Self {
            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            public_dir: std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),

            // Locales
            locales,
            default_locale,
            locale_policy,

            // Contact document store
            contact_store_url: env_opt("CONTACT_STORE_URL"),
            contact_store_api_key: env_opt("CONTACT_STORE_API_KEY"),
            contact_collection: std::env::var("CONTACT_COLLECTION")
                .unwrap_or_else(|_| "contacts".to_string()),

            // Mail relay
            mail_relay_url: env_opt("MAIL_RELAY_URL"),
            mail_relay_user: env_opt("MAIL_RELAY_USER"),
            mail_relay_pass: env_opt("MAIL_RELAY_PASS"),
            mail_from: env_opt("MAIL_FROM"),
            contact_to: env_opt("CONTACT_TO"),
        })
    }
}

/// Reads an optional variable; set-but-empty counts as absent.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
