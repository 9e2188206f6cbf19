//! Typed operations of the admin API.

use std::sync::Arc;

use serde_json::Value;

use crate::api::endpoints;
use crate::api::http::HttpClient;
use crate::api::models::{
    ApiResponse, Influencer, InfluencerListData, InviteInfluencerRequest, MutationAck, Page,
    RecordListData, RegenerateLinkRequest, RevokeInfluencerRequest, Source, TokenUsage,
    UpdateInfluencerRequest, UserRecord,
};
use crate::auth::{LoginData, LoginRequest, Session};
use crate::error::Result;

/// 1-based page request with an optional search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit,
            search: None,
        }
    }

    /// Blank terms are dropped so the parameter is not sent at all.
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

#[derive(Clone)]
pub struct AdminApi {
    http: Arc<HttpClient>,
}

impl AdminApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Exchange credentials for a session and make it current.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let resp: ApiResponse<LoginData> = self.http.post(endpoints::LOGIN, &request).await?;
        let session = Session::from(resp.into_data()?);
        self.http.session().login(session.clone())?;
        Ok(session)
    }

    pub async fn list_users(&self, query: &PageQuery) -> Result<Page<UserRecord>> {
        let resp: ApiResponse<RecordListData<UserRecord>> =
            self.http.get(endpoints::GET_ALL_USERS, &query.params()).await?;
        let data = resp.into_data()?;
        Ok(Page {
            records: data.data,
            pagination: data.pagination,
        })
    }

    pub async fn list_influencers(&self, query: &PageQuery) -> Result<Page<Influencer>> {
        let resp: ApiResponse<InfluencerListData> = self
            .http
            .get(endpoints::GET_ALL_INFLUENCERS, &query.params())
            .await?;
        let data = resp.into_data()?;
        Ok(Page {
            records: data.influencers,
            pagination: data.pagination,
        })
    }

    pub async fn list_token_usage(&self, query: &PageQuery) -> Result<Page<TokenUsage>> {
        let resp: ApiResponse<RecordListData<TokenUsage>> =
            self.http.get(endpoints::GET_ALL_TOKENS, &query.params()).await?;
        let data = resp.into_data()?;
        Ok(Page {
            records: data.data,
            pagination: data.pagination,
        })
    }

    pub async fn get_influencer(&self, id: &str) -> Result<Influencer> {
        let resp: ApiResponse<Influencer> = self
            .http
            .get(endpoints::GET_INFLUENCER_BY_ID, &[("id", id.to_string())])
            .await?;
        resp.into_data()
    }

    pub async fn update_influencer(&self, request: &UpdateInfluencerRequest) -> Result<MutationAck> {
        let resp = self.http.put(endpoints::UPDATE_INFLUENCER, request).await?;
        ack(resp)
    }

    pub async fn revoke_influencer(&self, request: &RevokeInfluencerRequest) -> Result<MutationAck> {
        let resp = self.http.post(endpoints::REVOKE_INFLUENCER, request).await?;
        ack(resp)
    }

    pub async fn regenerate_invite_link(&self, influencer_id: &str) -> Result<MutationAck> {
        let request = RegenerateLinkRequest {
            influencer_id: influencer_id.to_string(),
        };
        let resp = self.http.post(endpoints::REGENERATE_INVITE_LINK, &request).await?;
        ack(resp)
    }

    pub async fn invite_influencer(&self, request: &InviteInfluencerRequest) -> Result<MutationAck> {
        let resp = self.http.post(endpoints::INVITE_INFLUENCER, request).await?;
        ack(resp)
    }

    pub async fn delete_influencer(&self, id: &str, source: Source) -> Result<MutationAck> {
        let query = [("id", id.to_string()), ("source", source.to_string())];
        let resp = self.http.delete(endpoints::DELETE_INFLUENCER, &query).await?;
        ack(resp)
    }
}

fn ack(resp: ApiResponse<Value>) -> Result<MutationAck> {
    let resp = resp.ensure_success()?;
    Ok(MutationAck {
        message: resp.message,
        data: resp.data,
    })
}
