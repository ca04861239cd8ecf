use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub message: String,
    pub description: &'static str,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: String,
}
