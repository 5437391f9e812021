//! Locale resolution for incoming request paths.
//!
//! For every request the resolver decides between two outcomes: serve the
//! path untouched, or redirect to a locale-prefixed equivalent. Exclusion
//! rules run before anything else, so asset and API traffic can never be
//! redirected, whatever the selection policy says.

use std::str::FromStr;

use crate::i18n::accept_language::{parse_accept_language, primary_subtag};
use crate::i18n::{Locale, LocaleRegistry};

/// Path prefixes that never take part in locale handling: the API surface,
/// framework internals, and static asset roots. Prefix matching is raw
/// `starts_with`, so `/apiary` is shielded by `/api` as well.
const EXCLUDED_PREFIXES: &[&str] = &[
    "/api",
    "/_next",
    "/assets",
    "/images",
    "/favicon.ico",
    "/sw.js",
    "/robots.txt",
    "/manifest.json",
];

/// How a target locale is chosen for a path that carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalePolicy {
    /// Always the configured default; the client preference is ignored.
    StaticDefault,
    /// Best exact tag match from `Accept-Language`, default when none matches.
    AcceptLanguage,
    /// Like `AcceptLanguage`, but a region-tagged preference ("en-US")
    /// matches its primary language, and `*` matches the default locale.
    AcceptLanguageRegion,
}

impl FromStr for LocalePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static-default" => Ok(Self::StaticDefault),
            "accept-language" => Ok(Self::AcceptLanguage),
            "accept-language-region" => Ok(Self::AcceptLanguageRegion),
            other => anyhow::bail!(
                "Unknown locale policy '{}' (expected static-default, accept-language, or accept-language-region)",
                other
            ),
        }
    }
}

/// Outcome of resolving one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path is excluded or already localized; serve it as-is.
    PassThrough,
    /// The path needs a locale prefix; redirect to this target.
    Redirect(String),
}

/// Pure locale-resolution core for the redirect middleware.
///
/// Holds no per-request state. Given the same registry, policy, path, and
/// header, `resolve` always returns the same outcome, so concurrent requests
/// share one resolver behind an `Arc` without coordination.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    registry: LocaleRegistry,
    policy: LocalePolicy,
}

impl LocaleResolver {
    pub fn new(registry: LocaleRegistry, policy: LocalePolicy) -> Self {
        Self { registry, policy }
    }

    /// Resolve a request path against the locale set.
    ///
    /// Order matters: the exclusion check runs first, then the check for an
    /// existing locale prefix, and only then is a target locale selected.
    /// An excluded path passes through even though it carries no locale.
    pub fn resolve(&self, path: &str, accept_language: Option<&str>) -> Resolution {
        if is_excluded_path(path) {
            return Resolution::PassThrough;
        }

        if self.registry.path_locale(path).is_some() {
            return Resolution::PassThrough;
        }

        let locale = self.select_locale(accept_language);
        Resolution::Redirect(redirect_target(locale, path))
    }

    /// Pick the target locale for an unlocalized path.
    ///
    /// Never fails: a missing or unusable header falls back to the default
    /// locale under every policy.
    fn select_locale(&self, accept_language: Option<&str>) -> &Locale {
        let header = match self.policy {
            LocalePolicy::StaticDefault => return self.registry.default_locale(),
            LocalePolicy::AcceptLanguage | LocalePolicy::AcceptLanguageRegion => {
                match accept_language {
                    Some(header) => header,
                    None => return self.registry.default_locale(),
                }
            }
        };

        for preference in parse_accept_language(header) {
            if let Some(locale) = self.registry.get(&preference.tag) {
                return locale;
            }
            if self.policy == LocalePolicy::AcceptLanguageRegion {
                if preference.tag == "*" {
                    return self.registry.default_locale();
                }
                if let Some(locale) = self.registry.get(primary_subtag(&preference.tag)) {
                    return locale;
                }
            }
        }

        self.registry.default_locale()
    }
}

/// A path is excluded when it starts with a reserved prefix or looks like a
/// file (contains a dot anywhere).
fn is_excluded_path(path: &str) -> bool {
    EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
        || path.contains('.')
}

/// `/` maps to `/{locale}`; anything else gets the locale prefixed.
fn redirect_target(locale: &Locale, path: &str) -> String {
    if path == "/" {
        locale.path_prefix()
    } else {
        format!("/{}{}", locale.code(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LocaleRegistry {
        LocaleRegistry::new(&["en".to_string(), "pl".to_string()], "pl").unwrap()
    }

    fn resolver(policy: LocalePolicy) -> LocaleResolver {
        LocaleResolver::new(registry(), policy)
    }

    fn assert_redirects(resolver: &LocaleResolver, path: &str, target: &str) {
        assert_eq!(
            resolver.resolve(path, None),
            Resolution::Redirect(target.to_string()),
            "path {path}"
        );
    }

    fn assert_passes(resolver: &LocaleResolver, path: &str) {
        assert_eq!(
            resolver.resolve(path, None),
            Resolution::PassThrough,
            "path {path}"
        );
    }

    // ==================== Exclusion Tests ====================

    #[test]
    fn test_reserved_prefixes_pass_through() {
        let resolver = resolver(LocalePolicy::StaticDefault);
        for path in [
            "/api/contact",
            "/api",
            "/_next/static/chunk.js",
            "/assets/cv.pdf",
            "/images/me.jpg",
            "/favicon.ico",
            "/sw.js",
            "/robots.txt",
            "/manifest.json",
        ] {
            assert_passes(&resolver, path);
        }
    }

    #[test]
    fn test_prefix_matching_shields_longer_segments() {
        // starts_with, not segment matching: /apiary shares the /api prefix.
        let resolver = resolver(LocalePolicy::StaticDefault);
        assert_passes(&resolver, "/apiary");
        assert_passes(&resolver, "/imagesofworks");
    }

    #[test]
    fn test_dotted_paths_pass_through() {
        let resolver = resolver(LocalePolicy::StaticDefault);
        assert_passes(&resolver, "/logo.png");
        assert_passes(&resolver, "/docs/v1.2/intro");
        assert_passes(&resolver, "/en/photo.jpg");
    }

    #[test]
    fn test_exclusion_wins_before_locale_selection() {
        // Excluded paths never redirect, even under a header-driven policy.
        let resolver = resolver(LocalePolicy::AcceptLanguage);
        assert_eq!(
            resolver.resolve("/assets/cv.pdf", Some("en")),
            Resolution::PassThrough
        );
    }

    // ==================== Localized-Path Tests ====================

    #[test]
    fn test_localized_paths_pass_through() {
        let resolver = resolver(LocalePolicy::StaticDefault);
        assert_passes(&resolver, "/en");
        assert_passes(&resolver, "/pl");
        assert_passes(&resolver, "/en/about");
        assert_passes(&resolver, "/pl/projects/1");
    }

    #[test]
    fn test_locale_lookalike_segments_redirect() {
        let resolver = resolver(LocalePolicy::StaticDefault);
        assert_redirects(&resolver, "/english", "/pl/english");
        assert_redirects(&resolver, "/plans", "/pl/plans");
    }

    // ==================== Redirect-Target Tests ====================

    #[test]
    fn test_root_redirects_to_bare_locale() {
        let resolver = resolver(LocalePolicy::StaticDefault);
        assert_redirects(&resolver, "/", "/pl");
    }

    #[test]
    fn test_unlocalized_page_gets_prefix() {
        let resolver = resolver(LocalePolicy::StaticDefault);
        assert_redirects(&resolver, "/about", "/pl/about");
        assert_redirects(&resolver, "/projects/first", "/pl/projects/first");
    }

    #[test]
    fn test_static_default_ignores_header() {
        let resolver = resolver(LocalePolicy::StaticDefault);
        assert_eq!(
            resolver.resolve("/about", Some("en,en-US;q=0.9")),
            Resolution::Redirect("/pl/about".to_string())
        );
    }

    // ==================== Policy Tests ====================

    #[test]
    fn test_accept_language_exact_match() {
        let resolver = resolver(LocalePolicy::AcceptLanguage);
        assert_eq!(
            resolver.resolve("/about", Some("en-US,en;q=0.9")),
            Resolution::Redirect("/en/about".to_string())
        );
    }

    #[test]
    fn test_accept_language_prefers_higher_quality() {
        let resolver = resolver(LocalePolicy::AcceptLanguage);
        assert_eq!(
            resolver.resolve("/about", Some("en;q=0.4,pl;q=0.9")),
            Resolution::Redirect("/pl/about".to_string())
        );
    }

    #[test]
    fn test_accept_language_falls_back_to_default() {
        let resolver = resolver(LocalePolicy::AcceptLanguage);
        for header in [None, Some("de-DE,de;q=0.9"), Some(";;;garbage;;;")] {
            assert_eq!(
                resolver.resolve("/about", header),
                Resolution::Redirect("/pl/about".to_string()),
                "header {header:?}"
            );
        }
    }

    #[test]
    fn test_accept_language_ignores_region_subtag() {
        // Exact matching only: en-GB alone does not select en.
        let resolver = resolver(LocalePolicy::AcceptLanguage);
        assert_eq!(
            resolver.resolve("/about", Some("en-GB")),
            Resolution::Redirect("/pl/about".to_string())
        );
    }

    #[test]
    fn test_region_policy_matches_primary_subtag() {
        let resolver = resolver(LocalePolicy::AcceptLanguageRegion);
        assert_eq!(
            resolver.resolve("/about", Some("en-GB")),
            Resolution::Redirect("/en/about".to_string())
        );
    }

    #[test]
    fn test_region_policy_wildcard_selects_default() {
        let resolver = resolver(LocalePolicy::AcceptLanguageRegion);
        assert_eq!(
            resolver.resolve("/about", Some("*")),
            Resolution::Redirect("/pl/about".to_string())
        );
    }

    #[test]
    fn test_region_policy_exact_match_beats_primary() {
        let resolver = resolver(LocalePolicy::AcceptLanguageRegion);
        assert_eq!(
            resolver.resolve("/about", Some("pl,en-US;q=0.9")),
            Resolution::Redirect("/pl/about".to_string())
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = resolver(LocalePolicy::AcceptLanguageRegion);
        let first = resolver.resolve("/contact", Some("en-US,pl;q=0.5"));
        for _ in 0..10 {
            assert_eq!(resolver.resolve("/contact", Some("en-US,pl;q=0.5")), first);
        }
    }

    // ==================== Policy Parsing Tests ====================

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "static-default".parse::<LocalePolicy>().unwrap(),
            LocalePolicy::StaticDefault
        );
        assert_eq!(
            "Accept-Language".parse::<LocalePolicy>().unwrap(),
            LocalePolicy::AcceptLanguage
        );
        assert_eq!(
            " accept-language-region ".parse::<LocalePolicy>().unwrap(),
            LocalePolicy::AcceptLanguageRegion
        );
        assert!("geoip".parse::<LocalePolicy>().is_err());
    }
}
