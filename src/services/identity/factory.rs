/// Factory: build the shared identity provider from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::identity::{IdentityProvider, ProviderError, SupabaseAuthClient};

pub fn build_identity_provider(
    config: &Config,
) -> Result<Arc<dyn IdentityProvider>, ProviderError> {
    let client =
        SupabaseAuthClient::new(config.supabase_url.clone(), config.supabase_key.clone())?;

    tracing::info!(
        provider = client.provider_name(),
        url = %config.supabase_url,
        "identity provider configured"
    );

    Ok(Arc::new(client))
}
