pub mod factory;
pub mod provider;
pub mod supabase;

#[cfg(test)]
pub mod fake;

pub use factory::build_identity_provider;
pub use provider::{IdentityProvider, Principal, ProviderError};
pub use supabase::SupabaseAuthClient;
