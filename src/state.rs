/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::services::identity::IdentityProvider;

#[derive(Clone)]
pub struct AppState {
    // the single long-lived provider client, shared by all requests
    pub identity: Arc<dyn IdentityProvider>,
    pub oauth_redirect_url: Arc<str>,
}

impl AppState {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        oauth_redirect_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            identity,
            oauth_redirect_url: oauth_redirect_url.into(),
        }
    }
}
