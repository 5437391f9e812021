//! Request-handling edge for a localized portfolio site: a locale-redirect
//! middleware plus validated contact-form intake with document-store and
//! mail-relay sinks.

pub mod config;
pub mod contact;
pub mod handlers;
pub mod i18n;
pub mod mailer;
pub mod server;
pub mod store;
