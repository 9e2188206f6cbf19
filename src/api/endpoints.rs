//! Admin API paths, relative to the configured base URL.

pub const LOGIN: &str = "/admin/login";
pub const GET_ALL_USERS: &str = "/admin/users";
pub const GET_ALL_INFLUENCERS: &str = "/admin/get-all-influencers";
pub const GET_INFLUENCER_BY_ID: &str = "/admin/single-influencer";
pub const UPDATE_INFLUENCER: &str = "/admin/update-influencer";
pub const REVOKE_INFLUENCER: &str = "/admin/influencer/revoke";
pub const REGENERATE_INVITE_LINK: &str = "/admin/influencer/regenerate-link";
pub const INVITE_INFLUENCER: &str = "/admin/invite-influencer";
pub const DELETE_INFLUENCER: &str = "/admin/delete-influencer";
pub const GET_ALL_TOKENS: &str = "/admin/token-details";
