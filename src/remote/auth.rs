//! Identity/session service over the GoTrue HTTP API

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::error::AuthError;
use crate::models::{AuthUser, Session};

use super::http::{check_status, snippet, RestClient};
use super::AuthService;

#[derive(Debug, Deserialize)]
struct UserBody {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserBody> for AuthUser {
    fn from(body: UserBody) -> Self {
        Self {
            id: body.id,
            email: body.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: UserBody,
}

impl TokenBody {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

/// Sign-up answers with a session, or with just the user when the address
/// still needs confirming
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(TokenBody),
    User(UserBody),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Map a failed auth response to an [`AuthError`]
pub fn classify_failure(status: StatusCode, body: &str) -> AuthError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let text = [
        parsed.error.as_deref(),
        parsed.error_code.as_deref(),
        parsed.code.as_ref().and_then(|c| c.as_str()),
        parsed.error_description.as_deref(),
        parsed.msg.as_deref(),
        parsed.message.as_deref(),
    ]
    .iter()
    .flatten()
    .map(|s| s.to_lowercase())
    .collect::<Vec<_>>()
    .join(" ");

    if text.contains("already registered")
        || text.contains("user_already_exists")
        || text.contains("email_exists")
    {
        return AuthError::AlreadyRegistered;
    }

    if status == StatusCode::BAD_REQUEST
        && (text.contains("invalid_credentials")
            || text.contains("invalid_grant")
            || text.contains("invalid login credentials"))
    {
        return AuthError::InvalidCredentials;
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AuthError::SessionRejected;
    }

    AuthError::Unavailable(format!("HTTP {}: {}", status.as_u16(), snippet(body)))
}

fn transport(err: reqwest::Error) -> AuthError {
    AuthError::Unavailable(err.to_string())
}

/// GoTrue client
#[derive(Debug, Clone)]
pub struct GoTrueAuth {
    rest: RestClient,
}

impl GoTrueAuth {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl AuthService for GoTrueAuth {
    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .rest
            .request(Method::POST, "/auth/v1/token?grant_type=password", None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        let response = check_status(response)
            .await
            .map_err(|(status, body)| classify_failure(status, &body))?;

        let body: TokenBody = response.json().await.map_err(transport)?;
        debug!(user_id = %body.user.id, "signed in");
        Ok(body.into_session(Utc::now()))
    }

    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .rest
            .request(Method::POST, "/auth/v1/signup", None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        let response = check_status(response)
            .await
            .map_err(|(status, body)| classify_failure(status, &body))?;

        match response.json::<SignUpBody>().await.map_err(transport)? {
            SignUpBody::Session(body) => {
                debug!(user_id = %body.user.id, "signed up");
                Ok(body.into_session(Utc::now()))
            }
            SignUpBody::User(user) => {
                warn!(user_id = %user.id, "sign-up issued no session");
                Err(AuthError::ConfirmationRequired)
            }
        }
    }

    #[instrument(skip_all)]
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let response = self
            .rest
            .request(Method::GET, "/auth/v1/user", Some(access_token))
            .send()
            .await
            .map_err(transport)?;

        let response = check_status(response)
            .await
            .map_err(|(status, body)| classify_failure(status, &body))?;

        let user: UserBody = response.json().await.map_err(transport)?;
        Ok(user.into())
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .rest
            .request(Method::POST, "/auth/v1/logout", Some(access_token))
            .send()
            .await
            .map_err(transport)?;

        check_status(response)
            .await
            .map(|_| ())
            .map_err(|(status, body)| classify_failure(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_invalid_credentials() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        assert_eq!(
            classify_failure(StatusCode::BAD_REQUEST, body),
            AuthError::InvalidCredentials
        );

        let legacy = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            classify_failure(StatusCode::BAD_REQUEST, legacy),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn test_classify_already_registered() {
        let body = r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#;
        assert_eq!(
            classify_failure(StatusCode::UNPROCESSABLE_ENTITY, body),
            AuthError::AlreadyRegistered
        );

        let plain = r#"{"msg":"User already registered"}"#;
        assert_eq!(
            classify_failure(StatusCode::BAD_REQUEST, plain),
            AuthError::AlreadyRegistered
        );
    }

    #[test]
    fn test_classify_other_failures() {
        assert_eq!(
            classify_failure(StatusCode::UNAUTHORIZED, r#"{"msg":"invalid JWT"}"#),
            AuthError::SessionRejected
        );
        assert!(matches!(
            classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            AuthError::Unavailable(msg) if msg.starts_with("HTTP 500")
        ));
    }

    #[test]
    fn test_token_body_expiry() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        let body: TokenBody = serde_json::from_str(
            r#"{"access_token":"a","refresh_token":"r","expires_in":3600,
                "user":{"id":"u1","email":"sam@telegram.nomad.app"}}"#,
        )
        .unwrap();

        let session = body.into_session(now);
        assert_eq!(session.expires_at, Some(now + Duration::seconds(3600)));
        assert_eq!(session.user_id(), "u1");
    }

    #[test]
    fn test_sign_up_body_variants() {
        let with_session: SignUpBody = serde_json::from_str(
            r#"{"access_token":"a","user":{"id":"u1"}}"#,
        )
        .unwrap();
        assert!(matches!(with_session, SignUpBody::Session(_)));

        let user_only: SignUpBody =
            serde_json::from_str(r#"{"id":"u2","email":"x@y.z","confirmation_sent_at":"now"}"#)
                .unwrap();
        assert!(matches!(user_only, SignUpBody::User(_)));
    }
}
