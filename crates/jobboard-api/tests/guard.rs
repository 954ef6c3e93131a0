//! 라우터 통합 테스트 (DB 없음)
//!
//! 인증 가드, 입력 검증, 헬스 체크, 문의 메일 발송을 전체 라우터를 통해 확인합니다.
//! 가드를 통과한 요청은 DB가 없으므로 500으로 끝납니다.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jobboard_api::auth::{Claims, JwtConfig};
use jobboard_api::routes::create_api_router;
use jobboard_api::state::AppState;
use jobboard_core::{AuthProvider, Role};
use jobboard_notification::{EmailMessage, Mailer, NotificationError, NotificationResult};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "integration-test-secret";

fn jwt() -> JwtConfig {
    JwtConfig::new(SECRET)
}

fn app_with(state: AppState) -> Router {
    create_api_router().with_state(Arc::new(state))
}

fn app() -> Router {
    app_with(AppState::new(jwt()))
}

fn token_for(role: Role) -> String {
    jwt()
        .issue(Uuid::new_v4(), "user@example.com", role, AuthProvider::Credentials)
        .unwrap()
}

fn expired_token(role: Role) -> String {
    let mut claims = Claims::new(
        Uuid::new_v4(),
        "user@example.com",
        role,
        AuthProvider::Credentials,
        7,
    );
    claims.iat = (Utc::now() - Duration::days(10)).timestamp();
    claims.exp = (Utc::now() - Duration::days(3)).timestamp();
    jwt().sign(&claims).unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// 보호된 라우트 목록: (메서드, 경로, 요구 역할)
fn protected_routes() -> Vec<(Method, String, Role)> {
    let id = Uuid::new_v4();
    vec![
        (Method::GET, "/api/saved-jobs".to_string(), Role::Candidate),
        (Method::DELETE, format!("/api/saved-jobs/{}", id), Role::Candidate),
        (Method::GET, "/api/applications".to_string(), Role::Candidate),
        (Method::GET, format!("/api/applications/{}", id), Role::Candidate),
        (Method::POST, format!("/api/applications/{}/withdraw", id), Role::Candidate),
        (Method::GET, "/api/profile".to_string(), Role::Candidate),
        (Method::POST, format!("/api/jobs/{}/apply", id), Role::Candidate),
        (Method::GET, "/api/employer/jobs".to_string(), Role::Employer),
        (Method::GET, format!("/api/employer/applications/{}", id), Role::Employer),
        (Method::GET, format!("/api/employer/candidates/{}", id), Role::Employer),
        (Method::GET, "/api/admin/users".to_string(), Role::Admin),
    ]
}

// ==================== 인증 가드 ====================

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    for (method, uri, _) in protected_routes() {
        let (status, body) = send(app(), request(method.clone(), &uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body["code"], "MISSING_TOKEN");
    }
}

#[tokio::test]
async fn test_malformed_header_is_unauthorized() {
    let req = Request::builder()
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_AUTH_HEADER");
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    for (method, uri, role) in protected_routes() {
        let token = expired_token(role);
        let (status, body) = send(app(), request(method.clone(), &uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body["code"], "INVALID_TOKEN");
    }
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    for (method, uri, role) in protected_routes() {
        // 서명 첫 문자 변경 (base64 패딩 비트가 없는 위치)
        let issued = token_for(role);
        let (unsigned, signature) = issued.rsplit_once('.').unwrap();
        let first = if signature.starts_with('A') { 'B' } else { 'A' };
        let token = format!("{}.{}{}", unsigned, first, &signature[1..]);

        let (status, _) = send(app(), request(method.clone(), &uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let foreign = JwtConfig::new("another-secret")
        .issue(Uuid::new_v4(), "user@example.com", Role::Candidate, AuthProvider::Credentials)
        .unwrap();

    let (status, _) = send(
        app(),
        request(Method::GET, "/api/applications", Some(&foreign), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_role_is_forbidden() {
    for (method, uri, required) in protected_routes() {
        for role in [Role::Candidate, Role::Employer, Role::Admin] {
            if role == required {
                continue;
            }
            let token = token_for(role);
            let (status, body) =
                send(app(), request(method.clone(), &uri, Some(&token), None)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{} {} as {}", method, uri, role);
            assert_eq!(body["code"], "INSUFFICIENT_PERMISSION");
        }
    }
}

#[tokio::test]
async fn test_guard_runs_before_body_validation() {
    let id = Uuid::new_v4();
    let token = token_for(Role::Candidate);

    let (status, _) = send(
        app(),
        request(
            Method::PATCH,
            &format!("/api/employer/applications/{}/status", id),
            Some(&token),
            Some(json!({ "status": "not-a-status" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_valid_token_reaches_handler() {
    let token = token_for(Role::Candidate);
    let (status, body) = send(
        app(),
        request(Method::GET, "/api/applications", Some(&token), None),
    )
    .await;

    // 가드 통과 후 DB 미설정
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_me_requires_database() {
    let user_id = Uuid::new_v4();
    let token = jwt()
        .issue(user_id, "jane@example.com", Role::Employer, AuthProvider::Google)
        .unwrap();

    let response = app()
        .oneshot(request(Method::GET, "/api/auth/me", Some(&token), None))
        .await
        .unwrap();

    // `me`는 DB에서 사용자를 다시 읽으므로 DB 없이는 500
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ==================== 입력 검증 ====================

#[tokio::test]
async fn test_non_uuid_id_is_json_not_found() {
    let candidate = token_for(Role::Candidate);
    let employer = token_for(Role::Employer);
    let cases = [
        (Method::GET, "/api/saved-jobs/abc", &candidate),
        (Method::DELETE, "/api/saved-jobs/abc", &candidate),
        (Method::GET, "/api/applications/not-a-uuid", &candidate),
        (Method::POST, "/api/applications/123/withdraw", &candidate),
        (Method::POST, "/api/jobs/abc/save", &candidate),
        (Method::GET, "/api/employer/jobs/abc", &employer),
        (Method::GET, "/api/employer/applications/abc/events", &employer),
        (Method::GET, "/api/employer/candidates/abc", &employer),
    ];

    for (method, uri, token) in cases {
        let (status, body) = send(app(), request(method.clone(), uri, Some(token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(body["code"], "NOT_FOUND", "{} {}", method, uri);
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn test_non_uuid_id_still_requires_token() {
    let (status, body) = send(app(), request(Method::GET, "/api/saved-jobs/abc", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "MISSING_TOKEN");
}

#[tokio::test]
async fn test_apply_with_non_uuid_job_id_is_not_found() {
    let token = token_for(Role::Candidate);
    let (status, body) = send(
        app(),
        request(Method::POST, "/api/jobs/abc/apply", Some(&token), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_signup_invalid_email_is_bad_request() {
    let (status, body) = send(
        app(),
        request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({
                "name": "Jane",
                "email": "not-an-email",
                "password": "password1",
                "role": "candidate"
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_signup_malformed_json_is_bad_request() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

// ==================== 헬스 체크 ====================

#[tokio::test]
async fn test_health_endpoints_without_database() {
    let (status, _) = send(app(), request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app(), request(Method::GET, "/health/ready", None, None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.is_object());
}

// ==================== 문의 ====================

/// 발송 내용을 기록하는 테스트용 발송기
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> NotificationResult<()> {
        if self.fail {
            return Err(NotificationError::SendFailed("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

fn contact_body() -> Value {
    json!({
        "name": "Jane",
        "email": "jane@example.com",
        "subject": "Partnership",
        "message": "Hello there"
    })
}

#[tokio::test]
async fn test_contact_sends_mail_to_receiver() {
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::new(jwt())
        .with_mailer(mailer.clone(), Some("support@jobboard.test".to_string()));

    let (status, body) = send(
        app_with(state),
        request(Method::POST, "/api/contact", None, Some(contact_body())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "support@jobboard.test");
    assert_eq!(sent[0].reply_to.as_deref(), Some("jane@example.com"));
    assert!(sent[0].subject.contains("Partnership"));
    assert!(sent[0].body.contains("Hello there"));
}

#[tokio::test]
async fn test_contact_without_mailer_is_internal_error() {
    let (status, _) = send(
        app(),
        request(Method::POST, "/api/contact", None, Some(contact_body())),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_contact_send_failure_is_internal_error() {
    let mailer = Arc::new(RecordingMailer {
        fail: true,
        ..Default::default()
    });
    let state = AppState::new(jwt()).with_mailer(mailer, Some("support@jobboard.test".to_string()));

    let (status, _) = send(
        app_with(state),
        request(Method::POST, "/api/contact", None, Some(contact_body())),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_contact_missing_message_is_bad_request() {
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::new(jwt())
        .with_mailer(mailer.clone(), Some("support@jobboard.test".to_string()));

    let (status, _) = send(
        app_with(state),
        request(
            Method::POST,
            "/api/contact",
            None,
            Some(json!({ "name": "Jane", "email": "jane@example.com" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(mailer.sent.lock().unwrap().is_empty());
}
