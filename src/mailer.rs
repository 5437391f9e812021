use anyhow::{Context, Result};

use crate::config::Config;
use crate::contact::MailRecord;

/// Resolved mail-relay settings, present only when every required variable is set.
#[derive(Debug, Clone)]
pub struct MailerSettings {
    pub relay_url: String,
    pub user: String,
    pub pass: String,
    pub from: String,
    pub to: String,
}

/// Names of required mail variables absent from the configuration.
///
/// Checked before a send is attempted, so a misconfigured deployment answers
/// with a message naming what is missing instead of failing inside the
/// transport call.
pub fn missing_settings(config: &Config) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if config.mail_relay_url.is_none() {
        missing.push("MAIL_RELAY_URL");
    }
    if config.mail_relay_user.is_none() {
        missing.push("MAIL_RELAY_USER");
    }
    if config.mail_relay_pass.is_none() {
        missing.push("MAIL_RELAY_PASS");
    }
    if config.mail_from.is_none() {
        missing.push("MAIL_FROM");
    }
    missing
}

/// Resolve the relay settings; `None` when anything required is missing.
/// The recipient falls back to the sender address when CONTACT_TO is unset.
pub fn settings(config: &Config) -> Option<MailerSettings> {
    let from = config.mail_from.clone()?;
    Some(MailerSettings {
        relay_url: config.mail_relay_url.clone()?,
        user: config.mail_relay_user.clone()?,
        pass: config.mail_relay_pass.clone()?,
        to: config.contact_to.clone().unwrap_or_else(|| from.clone()),
        from,
    })
}

/// One outbound notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Build the notification email for an accepted submission.
///
/// The visitor's address goes into Reply-To, never into From; the relay only
/// accepts sends from the configured sender, and replying to the
/// notification must reach the visitor.
pub fn contact_notification(settings: &MailerSettings, record: &MailRecord) -> EmailMessage {
    EmailMessage {
        from: settings.from.clone(),
        to: settings.to.clone(),
        reply_to: record.email.clone(),
        subject: format!("[Portfolio] Message from {}", record.name),
        text_body: render_text_body(record),
        html_body: render_html_body(record),
    }
}

fn render_text_body(record: &MailRecord) -> String {
    format!(
        "Name: {}\nEmail: {}\n\n{}",
        record.name, record.email, record.message
    )
}

/// HTML rendering of a submission. Every field is untrusted input and gets
/// escaped before it lands in markup.
fn render_html_body(record: &MailRecord) -> String {
    format!(
        concat!(
            "<div style=\"font-family: ui-sans-serif, system-ui, sans-serif;\">",
            "<h2>New message from the portfolio contact form</h2>",
            "<p><strong>Name:</strong> {name}</p>",
            "<p><strong>Email:</strong> {email}</p>",
            "<pre style=\"white-space: pre-wrap; background: #f6f6f6; padding: 12px; border-radius: 8px;\">{message}</pre>",
            "</div>"
        ),
        name = escape_html(&record.name),
        email = escape_html(&record.email),
        message = escape_html(&record.message),
    )
}

/// Escape the five HTML-sensitive characters so field content can never
/// inject markup into the rendered email.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Send a message through the relay's HTTP API.
pub async fn send(settings: &MailerSettings, message: &EmailMessage) -> Result<()> {
    let client = reqwest::Client::new();

    let url = format!("{}/messages", settings.relay_url.trim_end_matches('/'));

    let response = client
        .post(&url)
        .basic_auth(&settings.user, Some(&settings.pass))
        .form(&[
            ("from", message.from.as_str()),
            ("to", message.to.as_str()),
            ("h:Reply-To", message.reply_to.as_str()),
            ("subject", message.subject.as_str()),
            ("text", message.text_body.as_str()),
            ("html", message.html_body.as_str()),
        ])
        .send()
        .await
        .context("Failed to send request to mail relay")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Mail relay error ({}): {}", status, body);
    }

    Ok(())
}
