//! Locale registry: Single source of truth for the supported locales.
//!
//! The registry is built once from configuration at startup and passed by
//! value into the resolver. Locale handling stays a pure function of explicit
//! inputs; nothing in this module reads global state.

use anyhow::{bail, Result};

use crate::i18n::Locale;

/// The supported locales for one deployment, plus the designated default.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<Locale>,
    default_index: usize,
}

impl LocaleRegistry {
    /// Build a registry from locale codes and the default locale code.
    ///
    /// Codes are trimmed and lowercased before validation.
    ///
    /// # Arguments
    /// * `codes` - The locale codes to support (e.g. `["en", "pl"]`)
    /// * `default_code` - The code used when a request carries no usable preference
    ///
    /// # Returns
    /// * `Ok(LocaleRegistry)` when the list is non-empty, duplicate-free, and
    ///   contains the default
    /// * `Err` describing the first violation otherwise
    pub fn new(codes: &[String], default_code: &str) -> Result<Self> {
        let mut locales: Vec<Locale> = Vec::with_capacity(codes.len());
        for raw in codes {
            let code = raw.trim().to_lowercase();
            if code.is_empty() {
                bail!("Locale codes must be non-empty");
            }
            if locales.iter().any(|locale| locale.code() == code) {
                bail!("Duplicate locale code '{}'", code);
            }
            locales.push(Locale::new(code));
        }
        if locales.is_empty() {
            bail!("At least one locale must be configured");
        }

        let default_code = default_code.trim().to_lowercase();
        let default_index = match locales.iter().position(|locale| locale.code() == default_code) {
            Some(index) => index,
            None => bail!(
                "Default locale '{}' is not in the supported set ({})",
                default_code,
                locales
                    .iter()
                    .map(Locale::code)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };

        Ok(Self {
            locales,
            default_index,
        })
    }

    /// Get all supported locales, in configuration order.
    pub fn supported(&self) -> &[Locale] {
        &self.locales
    }

    /// Get the default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.locales[self.default_index]
    }

    /// Get a supported locale by its code.
    ///
    /// # Arguments
    /// * `code` - A lowercase locale code (e.g. "en")
    ///
    /// # Returns
    /// * `Some(&Locale)` if the code is supported
    /// * `None` otherwise
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|locale| locale.code() == code)
    }

    /// Check whether a code names a supported locale.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Get the locale a request path already carries, if any.
    ///
    /// A path carries a locale when it is exactly `/{code}` or starts with
    /// `/{code}/`. Matching is byte-exact: URL paths are case-sensitive, so
    /// `/EN/about` does not count as localized.
    pub fn path_locale(&self, path: &str) -> Option<&Locale> {
        self.locales.iter().find(|locale| {
            let prefix = locale.path_prefix();
            path == prefix || path.starts_with(&format!("{}/", prefix))
        })
    }
}
