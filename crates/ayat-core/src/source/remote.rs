use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{LookupRequest, SourceError, VerseResult};
use crate::messages;

pub const DEFAULT_API_BASE: &str = "https://api.alquran.cloud/v1";

#[derive(Deserialize)]
struct Envelope {
    status: String,
    // A string on errors, an object on success
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Deserialize)]
struct AyahData {
    text: String,
    surah: SurahInfo,
    #[serde(rename = "numberInSurah")]
    number_in_surah: u16,
}

#[derive(Deserialize)]
struct SurahInfo {
    name: String,
}

#[derive(Debug, Clone)]
pub struct AlQuranClient {
    client: Client,
    base_url: String,
}

impl AlQuranClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn ayah_url(&self, request: LookupRequest) -> String {
        format!("{}/ayah/{}:{}", self.base_url, request.chapter, request.verse)
    }

    /// HTTP status is not checked: the service reports failures through the
    /// envelope's `status` field.
    pub async fn fetch_ayah(&self, request: LookupRequest) -> Result<VerseResult, SourceError> {
        let url = self.ayah_url(request);
        debug!(%url, "fetching verse");

        let body = self.client.get(&url).send().await?.text().await?;
        parse_ayah_response(&body)
    }
}

pub fn parse_ayah_response(body: &str) -> Result<VerseResult, SourceError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.status != "OK" {
        return Err(SourceError::Rejected {
            status: envelope.status,
        });
    }

    let ayah: AyahData = serde_json::from_value(envelope.data)?;
    Ok(VerseResult {
        display_reference: messages::reference_label(&ayah.surah.name, ayah.number_in_surah),
        text: ayah.text,
    })
}
