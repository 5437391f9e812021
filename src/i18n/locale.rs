//! Type-safe Locale type for supported site locales.
//!
//! `Locale` values are only handed out by the
//! [`LocaleRegistry`](crate::i18n::LocaleRegistry), so holding one is proof
//! that the code was validated against the deployment's locale set.

use std::fmt;

/// A validated site locale.
///
/// Wraps a lowercase language code (e.g. "en", "pl"). The constructor is
/// crate-internal; everything outside the registry works with borrowed
/// `&Locale` values, which keeps an unsupported code from ever entering
/// redirect targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    code: String,
}

impl Locale {
    /// Creates a locale from an already-validated code.
    ///
    /// Only the registry calls this; it owns validation and deduplication.
    pub(crate) fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Returns the lowercase locale code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the path prefix this locale occupies (e.g. "/en").
    pub fn path_prefix(&self) -> String {
        format!("/{}", self.code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.code
    }
}
