//! JWT 토큰 처리.
//!
//! HS256 서명 토큰 발급 및 검증. 유효 기간은 7일 고정입니다.

use chrono::{Duration, Utc};
use jobboard_core::{AuthConfig, AuthProvider, Role, TOKEN_TTL_DAYS};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT 페이로드.
///
/// `sub`는 UUID 문자열로 직렬화되며, UUID가 아니면 디코딩 단계에서 거부됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: Uuid,
    /// 사용자 이메일
    pub email: String,
    /// 사용자 역할
    pub role: Role,
    /// 인증 제공자
    pub provider: AuthProvider,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// JWT ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `user_id` - 사용자 ID
    /// * `email` - 사용자 이메일
    /// * `role` - 사용자 역할
    /// * `provider` - 인증 제공자
    /// * `expires_in_days` - 만료 시간 (일)
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        role: Role,
        provider: AuthProvider,
        expires_in_days: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email: email.into(),
            role,
            provider,
            iat: now.timestamp(),
            exp: (now + Duration::days(expires_in_days)).timestamp(),
            jti: Some(Uuid::new_v4().to_string()),
        }
    }

    /// 사용자 ID.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// JWT 토큰 생성 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
}

/// 토큰 생성.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(JwtError::from)
}

/// 토큰 디코딩 및 검증.
///
/// 서명 불일치, 만료, 형식 오류, 알고리즘 불일치 모두 `None`을 반환합니다.
/// 호출자는 `None`을 "인증되지 않음"으로만 취급해야 합니다.
pub fn decode_token(token: &str, secret: &str) -> Option<Claims> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .ok()
}

/// 토큰 서명 설정.
///
/// 시작 시 [`AuthConfig`]에서 한 번 만들고 `AppState`를 통해 공유합니다.
#[derive(Clone)]
pub struct JwtConfig {
    secret: SecretString,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
        }
    }

    pub fn from_auth_config(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
        }
    }

    /// 사용자 정보로 새 토큰을 발급합니다.
    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        role: Role,
        provider: AuthProvider,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(user_id, email, role, provider, TOKEN_TTL_DAYS);
        create_token(&claims, self.secret.expose_secret())
    }

    /// 토큰을 검증합니다.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        decode_token(token, self.secret.expose_secret())
    }

    /// 주어진 Claims를 그대로 서명합니다.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        create_token(claims, self.secret.expose_secret())
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    fn sample_claims(days: i64) -> Claims {
        Claims::new(
            Uuid::new_v4(),
            "jane@example.com",
            Role::Candidate,
            AuthProvider::Credentials,
            days,
        )
    }

    #[test]
    fn test_create_and_decode_token() {
        let claims = sample_claims(7);
        let token = create_token(&claims, TEST_SECRET).unwrap();
        assert!(!token.is_empty());

        let decoded = decode_token(&token, TEST_SECRET).unwrap();
        assert_eq!(decoded, claims);
        assert_eq!(decoded.role, Role::Candidate);
        assert_eq!(decoded.provider, AuthProvider::Credentials);
    }

    #[test]
    fn test_expiry_is_seven_days() {
        let config = JwtConfig::new(TEST_SECRET);
        let user_id = Uuid::new_v4();
        let token = config
            .issue(user_id, "emp@example.com", Role::Employer, AuthProvider::Google)
            .unwrap();

        let claims = config.verify(&token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_config_tokens_use_fixed_expiry() {
        let auth = AuthConfig {
            jwt_secret: SecretString::from(TEST_SECRET.to_string()),
            used_dev_secret: false,
        };
        let config = JwtConfig::from_auth_config(&auth);
        let token = config
            .issue(Uuid::new_v4(), "jane@example.com", Role::Candidate, AuthProvider::Credentials)
            .unwrap();

        let claims = decode_token(&token, TEST_SECRET).unwrap();
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut claims = sample_claims(7);
        claims.iat -= 10 * 24 * 60 * 60;
        claims.exp = Utc::now().timestamp() - 3600;

        let token = create_token(&claims, TEST_SECRET).unwrap();
        assert!(decode_token(&token, TEST_SECRET).is_none());
    }

    #[test]
    fn test_wrong_secret() {
        let token = create_token(&sample_claims(7), TEST_SECRET).unwrap();
        assert!(decode_token(&token, "wrong-secret-key-for-testing-minimum-32-chars").is_none());
    }

    #[test]
    fn test_tampered_payload() {
        let token = create_token(&sample_claims(7), TEST_SECRET).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1] = parts[1].chars().rev().collect();
        let tampered = parts.join(".");

        assert!(decode_token(&tampered, TEST_SECRET).is_none());
    }

    #[test]
    fn test_garbage_token() {
        assert!(decode_token("invalid.token.here", TEST_SECRET).is_none());
        assert!(decode_token("", TEST_SECRET).is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new(TEST_SECRET);
        let debug = format!("{:?}", config);
        assert!(!debug.contains(TEST_SECRET));
    }
}
