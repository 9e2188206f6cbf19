//! Wire models for the admin API.
//!
//! Field names follow the backend's camelCase JSON. The backend is loose about
//! nulls and empty strings, so most text fields read `null` as empty.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AdminError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessType {
    Limited,
    Unlimited,
}

impl AccessType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessType::Limited => "LIMITED",
            AccessType::Unlimited => "UNLIMITED",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LIMITED" => Ok(AccessType::Limited),
            "UNLIMITED" => Ok(AccessType::Unlimited),
            other => Err(format!("unknown access type: {other}")),
        }
    }
}

/// Provenance of an influencer record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Source {
    /// Accepted influencer linked to an end-user account
    Influencer,
    /// Pending invitation
    Invite,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Influencer => "INFLUENCER",
            Source::Invite => "INVITE",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INFLUENCER" => Ok(Source::Influencer),
            "INVITE" => Ok(Source::Invite),
            other => Err(format!("unknown source: {other}")),
        }
    }
}

/// `{ success, message, data? }`, shared by every endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiResponse<T> {
    /// Fail with the server's message when `success` is false.
    pub fn ensure_success(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(AdminError::Rejected(self.message))
        }
    }

    pub fn into_data(self) -> Result<T> {
        let resp = self.ensure_success()?;
        resp.data
            .ok_or_else(|| AdminError::InvalidState("response carried no data".to_string()))
    }
}

/// Pagination envelope. Users and token usage report `totalCount` and
/// `currentPage`; influencers report `total` and `page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, alias = "totalCount")]
    pub total: u64,
    #[serde(default, alias = "currentPage")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// One page of records, independent of how the endpoint nests them
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InfluencerListData {
    #[serde(default)]
    pub influencers: Vec<Influencer>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(bound = "T: Deserialize<'de>")]
pub(crate) struct RecordListData<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Device-bound end user, also embedded in influencer records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dialect: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rizz_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_id: String,
    #[serde(default)]
    pub is_genz: bool,
    #[serde(default)]
    pub is_subscribed: bool,
    #[serde(default)]
    pub is_influencer: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Influencer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instagram: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tiktok: String,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub access_type: Option<AccessType>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub revoke_comment: Option<String>,
    #[serde(default)]
    pub revoked_at: Option<String>,
    #[serde(default)]
    pub revoked_by_admin_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub source: Option<Source>,
    #[serde(default)]
    pub user_data: Option<UserRecord>,
    #[serde(default, alias = "token")]
    pub invite_token: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Per-call model usage accounting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_by_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub call_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

// --- Request payloads ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfluencerRequest {
    pub invite_id: String,
    pub access_type: AccessType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeInfluencerRequest {
    pub influencer_id: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateLinkRequest {
    pub influencer_id: String,
}

/// Invite payload; dates are empty strings for unlimited access
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteInfluencerRequest {
    pub name: String,
    pub email: String,
    pub instagram: String,
    pub tiktok: String,
    pub access_type: AccessType,
    pub start_date: String,
    pub expiry_date: String,
}

/// Result of a successful mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationAck {
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
}

impl MutationAck {
    /// Invite token carried back by link regeneration, under whichever key
    /// the backend used.
    pub fn invite_token(&self) -> Option<String> {
        let data = self.data.as_ref()?;
        ["inviteToken", "token"]
            .iter()
            .find_map(|key| data.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads `null`, `""` and unknown spellings as absent instead of failing the
/// whole record.
fn lenient_enum<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| s.parse().ok()))
}
