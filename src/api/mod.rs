//! # Admin API Module
//!
//! Client side of the REST admin API: the HTTP adapter, endpoint paths,
//! wire models, and one typed method per operation.

pub mod admin;
pub mod endpoints;
pub mod http;
pub mod models;

pub use admin::{AdminApi, PageQuery};
pub use http::HttpClient;
pub use models::{
    AccessType, ApiResponse, Influencer, InviteInfluencerRequest, MutationAck, Page, Pagination,
    RevokeInfluencerRequest, Source, TokenUsage, UpdateInfluencerRequest, UserRecord,
};
