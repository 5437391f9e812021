//! Contact-form submission screening.
//!
//! The pipeline for untrusted form payloads: honeypot check, required fields,
//! format validation, normalization. Steps run in that order and
//! short-circuit. The honeypot outcome is not an error; callers must answer
//! a bot exactly like a success so the trap stays invisible.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Wire payload of the phone-based contact form.
///
/// Every field is optional at the parse stage; absence is decided after
/// trimming, in one place, so `null`, a missing key, and `"  "` all fail the
/// same way.
#[derive(Debug, Default, Deserialize)]
pub struct ContactPayload {
    pub name: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
    pub message: Option<String>,
    /// Honeypot. The form hides this field, so any content means a bot.
    pub website: Option<String>,
}

/// Wire payload of the email-based contact form.
#[derive(Debug, Default, Deserialize)]
pub struct MailPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    /// Honeypot. The form hides this field, so any content means a bot.
    pub website: Option<String>,
}

/// A phone submission that passed screening. Fields are trimmed and the
/// phone number is normalized to nine digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub name: String,
    pub phone_number: String,
    pub message: String,
}

/// An email submission that passed screening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRecord {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Screening outcome for a parsed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening<T> {
    /// The submission is genuine and valid.
    Accepted(T),
    /// The honeypot tripped. Answer with a success body and do nothing.
    BotLike,
}

/// Validation failures surfaced to the client with HTTP 400.
///
/// The `Display` strings are the exact user-facing messages the frontend
/// shows verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid phone number")]
    InvalidPhone,
}

/// Screen a phone-form payload.
pub fn screen_contact(payload: &ContactPayload) -> Result<Screening<ContactRecord>, ValidationError> {
    if honeypot_tripped(payload.website.as_deref()) {
        return Ok(Screening::BotLike);
    }

    let name = trimmed(payload.name.as_deref());
    let phone_number = trimmed(payload.phone_number.as_deref());
    let message = trimmed(payload.message.as_deref());
    if name.is_empty() || phone_number.is_empty() || message.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    let phone_number = normalize_phone(&phone_number).ok_or(ValidationError::InvalidPhone)?;

    Ok(Screening::Accepted(ContactRecord {
        name,
        phone_number,
        message,
    }))
}

/// Screen an email-form payload.
pub fn screen_mail(payload: &MailPayload) -> Result<Screening<MailRecord>, ValidationError> {
    if honeypot_tripped(payload.website.as_deref()) {
        return Ok(Screening::BotLike);
    }

    let name = trimmed(payload.name.as_deref());
    let email = trimmed(payload.email.as_deref());
    let message = trimmed(payload.message.as_deref());
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(Screening::Accepted(MailRecord {
        name,
        email,
        message,
    }))
}

fn honeypot_tripped(website: Option<&str>) -> bool {
    website.map(str::trim).is_some_and(|value| !value.is_empty())
}

fn trimmed(value: Option<&str>) -> String {
    value.unwrap_or("").trim().to_string()
}

/// Normalize a phone number to nine subscriber digits.
///
/// Strips every non-digit character, then a leading `48` country prefix, but
/// only when the digit count is exactly eleven; a nine-digit number starting
/// with 48 is already a subscriber number and keeps its digits. Returns
/// `None` for anything that does not end up at nine digits.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let normalized = if digits.len() == 11 && digits.starts_with("48") {
        digits[2..].to_string()
    } else {
        digits
    };
    (normalized.len() == 9).then_some(normalized)
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Structural email check: no whitespace, exactly one `@`, a dot somewhere
/// in the domain. Deliverability is the mail relay's problem.
pub fn is_valid_email(email: &str) -> bool {
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));
    regex.is_match(email)
}
