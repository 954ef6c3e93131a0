//! Google ID 토큰 검증.
//!
//! Google `tokeninfo` 엔드포인트에 ID 토큰을 보내 서명/만료 검증을 위임하고,
//! 응답의 `aud`가 설정된 client id와 같은지, 이메일이 인증되었는지 확인합니다.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Google tokeninfo 엔드포인트.
pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// 검증된 Google 사용자 정보.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleIdentity {
    /// Google 계정 고유 ID
    pub subject: String,
    /// 이메일 (소문자 정규화 전)
    pub email: String,
    /// 표시 이름
    pub name: Option<String>,
}

/// Google 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum GoogleAuthError {
    #[error("Google 로그인이 설정되지 않았습니다")]
    NotConfigured,
    #[error("유효하지 않은 Google 자격증명")]
    InvalidCredential,
    #[error("Google 토큰의 대상(aud)이 일치하지 않습니다")]
    AudienceMismatch,
    #[error("인증되지 않은 Google 이메일")]
    EmailNotVerified,
    #[error("Google 요청 실패: {0}")]
    Request(#[from] reqwest::Error),
}

/// Google ID 토큰 검증기 trait.
#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    /// 자격증명(ID 토큰)을 검증하고 사용자 정보를 반환합니다.
    async fn verify(&self, credential: &str) -> Result<GoogleIdentity, GoogleAuthError>;
}

/// tokeninfo 응답.
///
/// Google은 대부분의 값을 문자열로 보내지만 `email_verified`는 bool로 오기도 합니다.
#[derive(Debug, Deserialize)]
pub struct TokenInfo {
    pub aud: Option<String>,
    pub sub: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<Value>,
    pub name: Option<String>,
}

fn is_verified(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// tokeninfo 응답을 검증해 사용자 정보로 변환합니다.
pub fn identity_from_token_info(
    info: TokenInfo,
    client_id: &str,
) -> Result<GoogleIdentity, GoogleAuthError> {
    if info.aud.as_deref() != Some(client_id) {
        return Err(GoogleAuthError::AudienceMismatch);
    }
    if !is_verified(info.email_verified.as_ref()) {
        return Err(GoogleAuthError::EmailNotVerified);
    }

    let email = info
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or(GoogleAuthError::InvalidCredential)?;
    let subject = info.sub.ok_or(GoogleAuthError::InvalidCredential)?;

    Ok(GoogleIdentity {
        subject,
        email,
        name: info.name.filter(|n| !n.trim().is_empty()),
    })
}

/// tokeninfo 엔드포인트 기반 검증기.
pub struct TokenInfoVerifier {
    client: reqwest::Client,
    client_id: String,
    endpoint: String,
}

impl TokenInfoVerifier {
    /// 새 검증기를 생성합니다.
    pub fn new(client_id: impl Into<String>) -> Result<Self, GoogleAuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            client_id: client_id.into(),
            endpoint: GOOGLE_TOKENINFO_URL.to_string(),
        })
    }

    /// 엔드포인트 URL을 바꿉니다.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl GoogleTokenVerifier for TokenInfoVerifier {
    async fn verify(&self, credential: &str) -> Result<GoogleIdentity, GoogleAuthError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("id_token", credential)])
            .send()
            .await?;

        // 서명 불일치, 만료 모두 400으로 돌아옴
        if !response.status().is_success() {
            warn!(status = %response.status(), "Google rejected ID token");
            return Err(GoogleAuthError::InvalidCredential);
        }

        let info: TokenInfo = response.json().await?;
        let identity = identity_from_token_info(info, &self.client_id)?;
        debug!(email = %identity.email, "Google ID token verified");

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CLIENT_ID: &str = "client-123.apps.googleusercontent.com";

    fn info(value: Value) -> TokenInfo {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_token_info() {
        let identity = identity_from_token_info(
            info(json!({
                "aud": CLIENT_ID,
                "sub": "1122334455",
                "email": "Jane@Example.com",
                "email_verified": "true",
                "name": "Jane Doe",
                "exp": "1893456000"
            })),
            CLIENT_ID,
        )
        .unwrap();

        assert_eq!(identity.subject, "1122334455");
        assert_eq!(identity.email, "Jane@Example.com");
        assert_eq!(identity.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_bool_email_verified() {
        let result = identity_from_token_info(
            info(json!({
                "aud": CLIENT_ID,
                "sub": "1",
                "email": "a@example.com",
                "email_verified": true
            })),
            CLIENT_ID,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_audience_mismatch() {
        let result = identity_from_token_info(
            info(json!({
                "aud": "someone-else",
                "sub": "1",
                "email": "a@example.com",
                "email_verified": "true"
            })),
            CLIENT_ID,
        );
        assert!(matches!(result, Err(GoogleAuthError::AudienceMismatch)));
    }

    #[test]
    fn test_unverified_email() {
        let result = identity_from_token_info(
            info(json!({
                "aud": CLIENT_ID,
                "sub": "1",
                "email": "a@example.com",
                "email_verified": "false"
            })),
            CLIENT_ID,
        );
        assert!(matches!(result, Err(GoogleAuthError::EmailNotVerified)));
    }

    #[test]
    fn test_missing_email() {
        let result = identity_from_token_info(
            info(json!({
                "aud": CLIENT_ID,
                "sub": "1",
                "email_verified": "true"
            })),
            CLIENT_ID,
        );
        assert!(matches!(result, Err(GoogleAuthError::InvalidCredential)));
    }
}
