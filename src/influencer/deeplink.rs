//! Onboarding deep links handed to invited influencers.

use url::form_urlencoded;

/// `<scheme>://onboard/influencer?token=<token>`
pub fn invite_link(scheme: &str, token: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("token", token)
        .finish();
    format!("{scheme}://onboard/influencer?{query}")
}
