use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use crate::settings::Settings;

/// Capability flag gating the join action. There is no session behind it:
/// a request counts as logged in when it carries the configured token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer {
    pub logged_in: bool,
}

pub fn resolve_viewer(
    settings: &Settings,
    auth: Option<Authorization<Bearer>>,
    query_token: Option<&str>,
) -> Viewer {
    let provided_token = auth
        .map(|a| a.token().to_string())
        .or_else(|| query_token.map(|s| s.to_string()));
    Viewer {
        logged_in: matches!(provided_token, Some(token) if token == settings.auth_token),
    }
}
