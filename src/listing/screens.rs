//! The three table screens: users, influencers, token usage.

use async_trait::async_trait;

use crate::api::{AdminApi, Influencer, MutationAck, Page, PageQuery, Source, TokenUsage, UserRecord};
use crate::dates;
use crate::error::{AdminError, Result};
use crate::influencer::{ListStatus, invite_link};
use crate::listing::paginated::{Column, LoadOutcome, PageSource, PaginatedList, TableRow};

pub const USERS_PAGE_LIMIT: u32 = 10;
pub const INFLUENCERS_PAGE_LIMIT: u32 = 10;
pub const TOKENS_PAGE_LIMIT: u32 = 20;

const MISSING: &str = "-";

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

fn subscription(subscribed: bool) -> &'static str {
    if subscribed { "Subscribed" } else { "Not Subscribed" }
}

// --- Users ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub device_id: String,
    pub subscription: String,
    pub tone: String,
    pub dialect: String,
    pub language: String,
    pub gender: String,
    pub genz: String,
}

impl TableRow for UserRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.device_id.clone(),
            self.subscription.clone(),
            self.tone.clone(),
            self.dialect.clone(),
            self.language.clone(),
            self.gender.clone(),
            self.genz.clone(),
        ]
    }
}

const USER_COLUMNS: &[Column] = &[
    Column::new("deviceId", "Device ID"),
    Column::new("subscription", "Subscription Status"),
    Column::new("rizzType", "Preferred Tone"),
    Column::new("dialect", "Preferred Dialect"),
    Column::new("language", "Preferred Language"),
    Column::new("gender", "Preferred Gender"),
    Column::new("isGenz", "Gen Z"),
];

pub struct UsersSource {
    api: AdminApi,
}

impl UsersSource {
    pub fn new(api: AdminApi) -> Self {
        Self { api }
    }
}

pub fn user_row(user: &UserRecord) -> UserRow {
    UserRow {
        device_id: or_dash(&user.device_id),
        subscription: subscription(user.is_subscribed).to_string(),
        tone: or_dash(&user.rizz_type),
        dialect: or_dash(&user.dialect),
        language: or_dash(&user.language),
        gender: or_dash(&user.gender),
        genz: if user.is_genz { "True" } else { "False" }.to_string(),
    }
}

#[async_trait]
impl PageSource for UsersSource {
    type Record = UserRecord;
    type Row = UserRow;

    fn limit(&self) -> u32 {
        USERS_PAGE_LIMIT
    }

    fn columns(&self) -> &'static [Column] {
        USER_COLUMNS
    }

    fn failure_message(&self) -> &'static str {
        "Failed to load users. Please try again."
    }

    async fn fetch(&self, query: PageQuery) -> Result<Page<UserRecord>> {
        self.api.list_users(&query).await
    }

    fn map_row(&self, record: &UserRecord) -> UserRow {
        user_row(record)
    }
}

// --- Influencers ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluencerRow {
    pub id: String,
    pub user_id: String,
    pub device_id: String,
    pub name: String,
    pub email: String,
    pub instagram: String,
    pub tiktok: String,
    pub access_type: String,
    pub start_date: String,
    pub expiry_date: String,
    pub subscription: String,
    pub tone: String,
    pub dialect: String,
    pub language: String,
    pub gender: String,
    pub genz: String,
    pub status: ListStatus,
    pub token: Option<String>,
    pub source: Option<Source>,
}

impl TableRow for InfluencerRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.instagram.clone(),
            self.tiktok.clone(),
            self.access_type.clone(),
            self.start_date.clone(),
            self.expiry_date.clone(),
            self.device_id.clone(),
            self.subscription.clone(),
            self.genz.clone(),
            self.status.to_string(),
            self.source.map_or_else(|| MISSING.to_string(), |s| s.to_string()),
        ]
    }
}

const INFLUENCER_COLUMNS: &[Column] = &[
    Column::new("name", "Name"),
    Column::new("email", "Email"),
    Column::new("instagram", "Instagram"),
    Column::new("tiktok", "TikTok"),
    Column::new("accessType", "Access Type"),
    Column::new("startDate", "Start Date"),
    Column::new("expiryDate", "Expiry Date"),
    Column::new("deviceId", "Device ID"),
    Column::new("subscription", "Subscription Status"),
    Column::new("isGenz", "Gen Z"),
    Column::new("status", "Status"),
    Column::new("source", "Source"),
];

pub fn influencer_row(influencer: &Influencer) -> InfluencerRow {
    let user = influencer.user_data.as_ref();
    let user_field = |f: fn(&UserRecord) -> &str| or_dash(user.map(f).unwrap_or_default());

    InfluencerRow {
        id: influencer.id.clone(),
        user_id: or_dash(influencer.user_id.as_deref().unwrap_or_default()),
        device_id: user_field(|u| u.device_id.as_str()),
        name: or_dash(&influencer.name),
        email: or_dash(&influencer.email),
        instagram: or_dash(&influencer.instagram),
        tiktok: or_dash(&influencer.tiktok),
        access_type: influencer
            .access_type
            .map_or_else(|| MISSING.to_string(), |a| a.to_string()),
        start_date: dates::display_day(influencer.start_date.as_deref()),
        expiry_date: dates::display_day(influencer.expiry_date.as_deref()),
        subscription: user
            .map_or(MISSING, |u| subscription(u.is_subscribed))
            .to_string(),
        tone: user_field(|u| u.rizz_type.as_str()),
        dialect: user_field(|u| u.dialect.as_str()),
        language: user_field(|u| u.language.as_str()),
        gender: user_field(|u| u.gender.as_str()),
        genz: user
            .map_or(MISSING, |u| if u.is_genz { "Yes" } else { "No" })
            .to_string(),
        status: ListStatus::of(influencer),
        token: influencer
            .invite_token
            .clone()
            .filter(|t| !t.trim().is_empty()),
        source: influencer.source,
    }
}

impl InfluencerRow {
    /// Deep link for the row's invite token, when it still has one.
    pub fn invite_link(&self, scheme: &str) -> Option<String> {
        self.token.as_deref().map(|token| invite_link(scheme, token))
    }
}

pub struct InfluencersSource {
    api: AdminApi,
}

impl InfluencersSource {
    pub fn new(api: AdminApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for InfluencersSource {
    type Record = Influencer;
    type Row = InfluencerRow;

    fn limit(&self) -> u32 {
        INFLUENCERS_PAGE_LIMIT
    }

    fn columns(&self) -> &'static [Column] {
        INFLUENCER_COLUMNS
    }

    fn failure_message(&self) -> &'static str {
        "Failed to load influencers"
    }

    async fn fetch(&self, query: PageQuery) -> Result<Page<Influencer>> {
        self.api.list_influencers(&query).await
    }

    fn map_row(&self, record: &Influencer) -> InfluencerRow {
        influencer_row(record)
    }
}

impl PaginatedList<InfluencersSource> {
    /// Delete a row's influencer, then reload the page being shown.
    pub async fn delete_row(&self, row: &InfluencerRow) -> Result<(MutationAck, LoadOutcome)> {
        let source = row
            .source
            .ok_or_else(|| AdminError::InvalidState(format!("influencer {} has no source", row.id)))?;
        let ack = self.source().api.delete_influencer(&row.id, source).await?;
        tracing::info!(influencer_id = %row.id, %source, "Influencer deleted");
        let outcome = self.refresh().await;
        Ok((ack, outcome))
    }
}

// --- Token usage ---

#[derive(Debug, Clone, PartialEq)]
pub struct TokenRow {
    pub call_type: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub temperature: f64,
    pub used_by: String,
    pub model_name: String,
    pub created_at: String,
}

impl TableRow for TokenRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.call_type.clone(),
            self.input_tokens.to_string(),
            self.output_tokens.to_string(),
            self.total_tokens.to_string(),
            self.temperature.to_string(),
            self.used_by.clone(),
            self.model_name.clone(),
            self.created_at.clone(),
        ]
    }
}

const TOKEN_COLUMNS: &[Column] = &[
    Column::new("callType", "Type"),
    Column::new("inputTokens", "Input Tokens"),
    Column::new("outputTokens", "Output Tokens"),
    Column::new("totalTokens", "Total Tokens"),
    Column::new("temperature", "Temperature"),
    Column::new("usedByType", "Used By"),
    Column::new("modelName", "Model Name"),
    Column::new("createdAt", "Created At"),
];

pub fn token_row(usage: &TokenUsage) -> TokenRow {
    TokenRow {
        call_type: or_dash(&usage.call_type),
        input_tokens: usage.input_tokens,
        output_tokens: usage.output_tokens,
        total_tokens: usage.total_tokens,
        temperature: usage.temperature,
        used_by: or_dash(&usage.used_by_type),
        model_name: or_dash(&usage.model_name),
        created_at: dates::display_timestamp(&usage.created_at),
    }
}

pub struct TokensSource {
    api: AdminApi,
}

impl TokensSource {
    pub fn new(api: AdminApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for TokensSource {
    type Record = TokenUsage;
    type Row = TokenRow;

    fn limit(&self) -> u32 {
        TOKENS_PAGE_LIMIT
    }

    fn columns(&self) -> &'static [Column] {
        TOKEN_COLUMNS
    }

    fn failure_message(&self) -> &'static str {
        "Failed to load token details. Please try again."
    }

    async fn fetch(&self, query: PageQuery) -> Result<Page<TokenUsage>> {
        self.api.list_token_usage(&query).await
    }

    fn map_row(&self, record: &TokenUsage) -> TokenRow {
        token_row(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AccessType;

    #[test]
    fn user_row_fills_missing_with_dash() {
        let user = UserRecord {
            device_id: "dev-1".into(),
            rizz_type: "playful".into(),
            is_subscribed: true,
            is_genz: false,
            ..UserRecord::default()
        };
        let row = user_row(&user);
        assert_eq!(row.subscription, "Subscribed");
        assert_eq!(row.gender, "-");
        assert_eq!(row.genz, "False");
        assert_eq!(row.cells().len(), USER_COLUMNS.len());
    }

    #[test]
    fn influencer_row_without_user_data() {
        let inf = Influencer {
            id: "inf1".into(),
            name: "Lina".into(),
            email: "lina@example.com".into(),
            access_type: Some(AccessType::Limited),
            start_date: Some("2025-05-10T00:00:00.000Z".into()),
            expiry_date: None,
            source: Some(Source::Invite),
            invite_token: Some("tok".into()),
            ..Influencer::default()
        };
        let row = influencer_row(&inf);
        assert_eq!(row.device_id, "-");
        assert_eq!(row.subscription, "-");
        assert_eq!(row.access_type, "LIMITED");
        assert_eq!(row.start_date, "2025-05-10");
        assert_eq!(row.expiry_date, "-");
        assert_eq!(row.status, ListStatus::Inactive);
        assert_eq!(
            row.invite_link("habibiRizz").as_deref(),
            Some("habibiRizz://onboard/influencer?token=tok")
        );
        assert_eq!(row.cells().len(), INFLUENCER_COLUMNS.len());
    }

    #[test]
    fn influencer_row_with_user_data_uses_yes_no() {
        let inf = Influencer {
            id: "inf2".into(),
            is_active: true,
            user_data: Some(UserRecord {
                device_id: "dev-9".into(),
                is_genz: true,
                ..UserRecord::default()
            }),
            ..Influencer::default()
        };
        let row = influencer_row(&inf);
        assert_eq!(row.device_id, "dev-9");
        assert_eq!(row.genz, "Yes");
        assert_eq!(row.subscription, "Not Subscribed");
        assert_eq!(row.status, ListStatus::Active);
        assert_eq!(row.invite_link("habibiRizz"), None);
    }

    #[test]
    fn token_row_formats_timestamp() {
        let usage = TokenUsage {
            call_type: "chat".into(),
            input_tokens: 12,
            output_tokens: 30,
            total_tokens: 42,
            temperature: 0.7,
            created_at: "2025-05-10T08:15:30.000Z".into(),
            ..TokenUsage::default()
        };
        let row = token_row(&usage);
        assert_eq!(row.created_at, "2025-05-10 08:15:30");
        assert_eq!(row.cells()[3], "42");
        assert_eq!(row.used_by, "-");
    }
}
