use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::contact::ContactRecord;

/// Resolved document-store settings, present only when both variables are set.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub base_url: String,
    pub api_key: String,
}

/// Names of required store variables absent from the configuration.
pub fn missing_settings(config: &Config) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if config.contact_store_url.is_none() {
        missing.push("CONTACT_STORE_URL");
    }
    if config.contact_store_api_key.is_none() {
        missing.push("CONTACT_STORE_API_KEY");
    }
    missing
}

/// Resolve the store settings; `None` when anything required is missing.
pub fn settings(config: &Config) -> Option<StoreSettings> {
    Some(StoreSettings {
        base_url: config.contact_store_url.clone()?,
        api_key: config.contact_store_api_key.clone()?,
    })
}

/// Unique document id: submission time in Unix milliseconds plus a random
/// UUID, so concurrent submissions in the same millisecond never collide on
/// the store key.
pub fn submission_id() -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4())
}

/// Flatten an accepted submission into the string map the store accepts.
pub fn contact_document(record: &ContactRecord, created_at: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("name".to_string(), record.name.clone()),
        ("phoneNumber".to_string(), record.phone_number.clone()),
        ("message".to_string(), record.message.clone()),
        ("createdAt".to_string(), created_at.to_string()),
    ])
}

/// Write one record into a collection under the given unique id.
///
/// `PUT {base}/{collection}/{id}`; the store keys documents by the path id,
/// so a retried submission with a fresh id can never overwrite an earlier
/// one.
pub async fn write(
    settings: &StoreSettings,
    collection: &str,
    id: &str,
    record: &BTreeMap<String, String>,
) -> Result<()> {
    let client = reqwest::Client::new();

    let url = format!(
        "{}/{}/{}",
        settings.base_url.trim_end_matches('/'),
        collection,
        id
    );

    let response = client
        .put(&url)
        .header("X-API-Key", &settings.api_key)
        .json(record)
        .send()
        .await
        .context("Failed to send request to document store")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Document store error ({}): {}", status, body);
    }

    Ok(())
}
