//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! `Arc<AppState>`로 감싸 라우터에 주입합니다. 요청 간 공유되는 가변 상태는 없습니다.

use axum::extract::FromRef;
use jobboard_notification::Mailer;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::{GoogleTokenVerifier, JwtConfig};
use crate::error::ApiError;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (PostgreSQL)
    pub db_pool: Option<PgPool>,

    /// 토큰 서명 설정
    pub jwt: JwtConfig,

    /// Google ID 토큰 검증기 (client id 미설정 시 `None`)
    pub google_verifier: Option<Arc<dyn GoogleTokenVerifier>>,

    /// 메일 발송기 (SMTP 미설정 시 `None`)
    pub mailer: Option<Arc<dyn Mailer>>,

    /// 문의 메일 수신 주소
    pub contact_receiver: Option<String>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성. 외부 연결은 `with_*`로 설정합니다.
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            db_pool: None,
            jwt,
            google_verifier: None,
            mailer: None,
            contact_receiver: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 데이터베이스 연결 설정.
    pub fn with_db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Google 검증기 설정.
    pub fn with_google_verifier(mut self, verifier: Arc<dyn GoogleTokenVerifier>) -> Self {
        self.google_verifier = Some(verifier);
        self
    }

    /// 메일 발송기와 문의 수신 주소 설정.
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>, contact_receiver: Option<String>) -> Self {
        self.mailer = Some(mailer);
        self.contact_receiver = contact_receiver;
        self
    }

    /// 데이터베이스 풀을 반환합니다. 미설정이면 500.
    pub fn db(&self) -> Result<&PgPool, ApiError> {
        self.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        if let Some(pool) = &self.db_pool {
            sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
        } else {
            false
        }
    }
}

impl FromRef<Arc<AppState>> for JwtConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.jwt.clone()
    }
}

/// 테스트용 상태. DB, 메일, Google 연결 없음.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    AppState::new(JwtConfig::new("test-secret-key-for-router-tests"))
}
