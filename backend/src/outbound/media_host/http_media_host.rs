//! Reqwest-backed media host adapter.
//!
//! Listing uses the admin API with basic auth and follows `next_cursor`
//! pages. Destroy uses the signed upload API and always asks the CDN to
//! invalidate cached copies.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::{Client, StatusCode, Url};
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{DestroyResponseDto, ResourcePageDto};
use crate::domain::MediaAsset;
use crate::domain::ports::{DestroyResult, MediaHost, MediaHostError};

const PAGE_SIZE: u32 = 500;
const MAX_PAGES: usize = 20;
const SIGNATURE_ALGORITHM: &str = "sha256";

/// Account credentials for the media host.
#[derive(Clone)]
pub struct MediaHostCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Zeroizing<String>,
}

impl std::fmt::Debug for MediaHostCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaHostCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

pub struct HttpMediaHost {
    client: Client,
    base_url: Url,
    credentials: MediaHostCredentials,
    clock: Arc<dyn Clock>,
}

impl HttpMediaHost {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        credentials: MediaHostCredentials,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            credentials,
            clock,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, MediaHostError> {
        self.base_url
            .join(&format!("v1_1/{}/{path}", self.credentials.cloud_name))
            .map_err(|error| MediaHostError::transport(format!("invalid media host url: {error}")))
    }

    async fn fetch_page(
        &self,
        url: &Url,
        prefix: &str,
        cursor: Option<&str>,
    ) -> Result<ResourcePageDto, MediaHostError> {
        let page_size = PAGE_SIZE.to_string();
        let mut query = vec![
            ("type", "upload"),
            ("prefix", prefix),
            ("max_results", page_size.as_str()),
        ];
        if let Some(cursor) = cursor {
            query.push(("next_cursor", cursor));
        }

        let response = self
            .client
            .get(url.clone())
            .basic_auth(
                &self.credentials.api_key,
                Some(self.credentials.api_secret.as_str()),
            )
            .query(&query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref()).map_err(|error| {
            MediaHostError::decode(format!("invalid resource listing payload: {error}"))
        })
    }
}

/// Parameters are sorted by name, joined as `k=v&...`, then the secret is
/// appended before hashing.
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Signed form for a destroy call.
///
/// The host verifies SHA-1 unless told otherwise, so the form declares
/// `signature_algorithm=sha256`; the account must accept SHA-256 signatures.
/// `signature_algorithm` itself is not part of the signed string.
fn destroy_form(
    credentials: &MediaHostCredentials,
    public_id: &str,
    timestamp: &str,
) -> Vec<(&'static str, String)> {
    let signed = [
        ("invalidate", "true"),
        ("public_id", public_id),
        ("timestamp", timestamp),
    ];
    let signature = sign(&signed, credentials.api_secret.as_str());

    let mut form: Vec<(&'static str, String)> = signed
        .iter()
        .map(|(key, value)| (*key, (*value).to_owned()))
        .collect();
    form.push(("api_key", credentials.api_key.clone()));
    form.push(("signature", signature));
    form.push(("signature_algorithm", SIGNATURE_ALGORITHM.to_owned()));
    form
}

fn folder_prefix(folder: &str) -> String {
    let trimmed = folder.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}

fn newest_first(mut assets: Vec<MediaAsset>) -> Vec<MediaAsset> {
    assets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    assets
}

#[async_trait]
impl MediaHost for HttpMediaHost {
    async fn list(&self, folder: &str) -> Result<Vec<MediaAsset>, MediaHostError> {
        let url = self.endpoint("resources/image")?;
        let prefix = folder_prefix(folder);
        let mut assets = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let page = self.fetch_page(&url, &prefix, cursor.as_deref()).await?;
            assets.extend(page.resources.into_iter().map(|dto| dto.into_domain_asset()));
            match page.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => return Ok(newest_first(assets)),
            }
        }

        debug!(folder, pages = MAX_PAGES, "media listing truncated at page limit");
        Ok(newest_first(assets))
    }

    async fn destroy(&self, public_id: &str) -> Result<DestroyResult, MediaHostError> {
        let url = self.endpoint("image/destroy")?;
        let timestamp = self.clock.utc().timestamp().to_string();
        let form = destroy_form(&self.credentials, public_id, &timestamp);

        let response = self
            .client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        let decoded: DestroyResponseDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            MediaHostError::decode(format!("invalid destroy payload: {error}"))
        })?;
        Ok(decoded.into())
    }
}

fn map_transport_error(error: reqwest::Error) -> MediaHostError {
    if error.is_timeout() {
        MediaHostError::timeout(error.to_string())
    } else {
        MediaHostError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MediaHostError {
    let preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            MediaHostError::timeout(format!("status {}", status.as_u16()))
        }
        _ => MediaHostError::rejected(status.as_u16(), preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
