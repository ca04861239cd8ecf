use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use crate::services::identity::provider::{
    IdentityProvider, Principal, ProviderError, ProviderResult, ProviderSession,
};

/// Supabase Auth (GoTrue) client over its REST API.
///
/// Only the calls the gateway proxies are implemented. No timeout or retry
/// is configured: provider latency and failures reach the caller as-is.
#[derive(Clone, Debug)]
pub struct SupabaseAuthClient {
    http: reqwest::Client,
    // always ends with '/' so `join` appends instead of replacing
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl SupabaseAuthClient {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> ProviderResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http(http, base_url, api_key))
    }

    pub fn with_http(http: reqwest::Client, mut base_url: Url, api_key: impl Into<String>) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            http,
            base_url,
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> ProviderResult<Url> {
        Ok(self.base_url.join(&format!("auth/v1/{path}"))?)
    }

    // Every call carries the project key; the bearer is either the key
    // itself or the end user's access token.
    fn authorized(&self, builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(bearer.unwrap_or(&self.api_key))
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuthClient {
    fn provider_name(&self) -> &'static str {
        "supabase"
    }

    async fn sign_up(&self, email: &str, password: &str) -> ProviderResult<Value> {
        let url = self.endpoint("signup")?;
        let resp = self
            .authorized(self.http.post(url), None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body: Value = read_json(resp).await?;
        Ok(signup_user(body))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> ProviderResult<ProviderSession> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let resp = self
            .authorized(self.http.post(url), None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        read_json(resp).await
    }

    async fn get_user(&self, access_token: &str) -> ProviderResult<Principal> {
        let url = self.endpoint("user")?;
        let resp = self
            .authorized(self.http.get(url), Some(access_token))
            .send()
            .await?;

        let user: UserRecord = read_json(resp).await?;
        Ok(Principal {
            id: user.id,
            email: user.email.unwrap_or_default(),
        })
    }

    async fn sign_out(&self, access_token: &str) -> ProviderResult<()> {
        let url = self.endpoint("logout")?;
        let resp = self
            .authorized(self.http.post(url), Some(access_token))
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    fn oauth_url(&self, provider: &str, redirect_to: &str) -> ProviderResult<String> {
        let mut url = self.endpoint("authorize")?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_to", redirect_to);
        Ok(url.into())
    }
}

async fn check_status(resp: Response) -> ProviderResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(ProviderError::Rejected {
        status: status.as_u16(),
        message: error_message(&body, status),
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> ProviderResult<T> {
    check_status(resp)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ProviderError::Decode(e.to_string()))
}

// GoTrue is not consistent about where the message lives.
fn error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                status.to_string()
            } else {
                body.to_string()
            }
        })
}

// Signup answers with a bare user, or with a session wrapping the user when
// email confirmation is disabled.
fn signup_user(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("access_token") => {
            map.remove("user").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> SupabaseAuthClient {
        SupabaseAuthClient::new(Url::parse(&server.uri()).unwrap(), "anon-key").unwrap()
    }

    #[tokio::test]
    async fn get_user_sends_user_token_and_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer goodtoken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "u1",
                "email": "a@x.com",
                "aud": "authenticated"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let principal = client_for(&server).await.get_user("goodtoken").await.unwrap();
        assert_eq!(
            principal,
            Principal {
                id: "u1".into(),
                email: "a@x.com".into()
            }
        );
    }

    #[tokio::test]
    async fn get_user_rejection_carries_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": 401,
                "error_code": "bad_jwt",
                "msg": "invalid JWT: token is expired"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_user("badtoken").await.unwrap_err();
        match err {
            ProviderError::Rejected { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid JWT: token is expired");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn password_login_uses_password_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(header("authorization", "Bearer anon-key"))
            .and(body_json(json!({ "email": "a@x.com", "password": "pw" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "ref",
                "user": { "id": "u1", "email": "a@x.com" }
            })))
            .mount(&server)
            .await;

        let session = client_for(&server)
            .await
            .sign_in_with_password("a@x.com", "pw")
            .await
            .unwrap();
        assert_eq!(session.access_token, "tok");
        assert_eq!(session.expires_in, Some(3600));
        assert_eq!(session.refresh_token.as_deref(), Some("ref"));
    }

    #[tokio::test]
    async fn password_login_failure_uses_error_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .sign_in_with_password("a@x.com", "nope")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn signup_unwraps_user_from_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok",
                "token_type": "bearer",
                "user": { "id": "u2", "email": "b@x.com" }
            })))
            .mount(&server)
            .await;

        let user = client_for(&server)
            .await
            .sign_up("b@x.com", "pw")
            .await
            .unwrap();
        assert_eq!(user["id"], "u2");
        assert!(user.get("access_token").is_none());
    }

    #[tokio::test]
    async fn signup_passes_bare_user_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "u3",
                "email": "c@x.com",
                "confirmation_sent_at": "2024-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;

        let user = client_for(&server)
            .await
            .sign_up("c@x.com", "pw")
            .await
            .unwrap();
        assert_eq!(user["id"], "u3");
        assert_eq!(user["confirmation_sent_at"], "2024-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn sign_out_targets_callers_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .and(header("authorization", "Bearer usertoken"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).await.sign_out("usertoken").await.unwrap();
    }

    #[tokio::test]
    async fn plain_text_error_body_is_used_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.sign_out("t").await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected { status: 502, .. }));
        assert_eq!(err.to_string(), "bad gateway");
    }

    #[test]
    fn oauth_url_keeps_base_path_and_encodes_redirect() {
        let client = SupabaseAuthClient::new(
            Url::parse("https://proxy.example/supabase").unwrap(),
            "anon-key",
        )
        .unwrap();

        let url = client
            .oauth_url("google", "http://localhost:3000/auth/callback")
            .unwrap();
        assert_eq!(
            url,
            "https://proxy.example/supabase/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"
        );
    }

    #[test]
    fn empty_error_body_falls_back_to_status() {
        assert_eq!(
            error_message("", StatusCode::SERVICE_UNAVAILABLE),
            "503 Service Unavailable"
        );
    }
}
