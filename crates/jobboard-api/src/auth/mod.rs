//! 인증 및 권한 부여.
//!
//! # 구성 요소
//!
//! - [`hash_password`], [`verify_password`]: Argon2id 비밀번호 해싱
//! - [`Claims`], [`JwtConfig`]: HS256 토큰 발급/검증
//! - [`authorize`] 및 추출기: Bearer 토큰 가드 + 역할 검사
//! - [`GoogleTokenVerifier`]: Google ID 토큰 검증
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn list_applications(
//!     CandidateAuth(claims): CandidateAuth,
//!     State(state): State<Arc<AppState>>,
//! ) -> ApiResult<Json<ApplicationListResponse>> {
//!     // claims.sub 는 검증된 구직자 ID
//! }
//! ```

mod google;
mod jwt;
mod middleware;
mod password;

pub use google::{
    identity_from_token_info, GoogleAuthError, GoogleIdentity, GoogleTokenVerifier, TokenInfo,
    TokenInfoVerifier, GOOGLE_TOKENINFO_URL,
};
pub use jwt::{create_token, decode_token, Claims, JwtConfig, JwtError};
pub use middleware::{
    authorize, bearer_token, require_role, AdminAuth, CandidateAuth, EmployerAuth, JwtAuth,
    JwtAuthError, OptionalJwtAuth,
};
pub use password::{hash_password, validate_password_strength, verify_password, PasswordError};
