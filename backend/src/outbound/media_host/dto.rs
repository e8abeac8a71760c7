//! DTOs for decoding media host JSON responses.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::MediaAsset;
use crate::domain::ports::DestroyResult;

#[derive(Debug, Deserialize)]
pub(super) struct ResourcePageDto {
    #[serde(default)]
    pub(super) resources: Vec<ResourceDto>,
    pub(super) next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResourceDto {
    pub(super) asset_id: Option<String>,
    pub(super) public_id: String,
    pub(super) secure_url: String,
    pub(super) width: Option<u32>,
    pub(super) height: Option<u32>,
    pub(super) created_at: Option<DateTime<Utc>>,
}

impl ResourceDto {
    pub(super) fn into_domain_asset(self) -> MediaAsset {
        MediaAsset {
            id: self.asset_id.unwrap_or_else(|| self.public_id.clone()),
            url: self.secure_url,
            width: self.width,
            height: self.height,
            created_at: self.created_at,
            public_id: self.public_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct DestroyResponseDto {
    pub(super) result: String,
}

impl From<DestroyResponseDto> for DestroyResult {
    fn from(value: DestroyResponseDto) -> Self {
        Self {
            result: value.result,
        }
    }
}
