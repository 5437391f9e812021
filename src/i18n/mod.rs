//! Internationalization (i18n) module for locale-aware request handling.
//!
//! This module provides a centralized architecture for locale resolution.
//! All locale-related logic, header parsing, and redirect decisions are
//! contained here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported locales and the default
//! - `locale`: Type-safe Locale type handed out only by the registry
//! - `accept_language`: Forgiving parser for the `Accept-Language` header
//! - `resolver`: Path classification and redirect decisions
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{LocalePolicy, LocaleRegistry, LocaleResolver, Resolution};
//!
//! let registry = LocaleRegistry::new(&["en".into(), "pl".into()], "pl")?;
//! let resolver = LocaleResolver::new(registry, LocalePolicy::StaticDefault);
//!
//! match resolver.resolve("/about", None) {
//!     Resolution::Redirect(target) => assert_eq!(target, "/pl/about"),
//!     Resolution::PassThrough => unreachable!(),
//! }
//! ```

mod accept_language;
mod locale;
mod registry;
mod resolver;

pub use accept_language::{parse_accept_language, LanguagePreference};
pub use locale::Locale;
pub use registry::LocaleRegistry;
pub use resolver::{LocalePolicy, LocaleResolver, Resolution};
