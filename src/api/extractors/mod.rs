pub mod bearer;
pub mod principal;

pub use bearer::BearerToken;
pub use principal::CurrentPrincipal;
