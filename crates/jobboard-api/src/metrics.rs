//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 가입/지원 같은 비즈니스 메트릭을 수집하고 `/metrics`로 노출합니다.

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Prometheus 메트릭 레코더를 설치하고 핸들을 반환합니다.
///
/// 레코더가 이미 설치되어 있으면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(method: &str, path: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string())
        .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 지속 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 비즈니스 메트릭 헬퍼 함수
// ============================================================================

/// 가입 카운터 증가.
pub fn record_signup(role: &str, provider: &str) {
    counter!(
        "jobboard_signups_total",
        "role" => role.to_string(),
        "provider" => provider.to_string()
    )
    .increment(1);
}

/// 로그인 시도 결과 카운터 증가. `outcome`: success, not_found, rejected
pub fn record_login(role: &str, outcome: &str) {
    counter!(
        "jobboard_logins_total",
        "role" => role.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// 지원서 상태 변화 카운터 증가.
pub fn record_application_status(status: &str) {
    counter!("jobboard_application_status_total", "status" => status.to_string()).increment(1);
}

/// 문의 메일 발송 결과 카운터 증가.
pub fn record_contact_message(delivered: bool) {
    counter!(
        "jobboard_contact_messages_total",
        "delivered" => delivered.to_string()
    )
    .increment(1);
}

// ============================================================================
// 경로 정규화 유틸리티
// ============================================================================

/// 공고 슬러그 여부 (`...-` + 16진수 8자리)
fn is_job_slug(segment: &str) -> bool {
    match segment.rsplit_once('-') {
        Some((head, suffix)) => {
            !head.is_empty() && suffix.len() == 8 && suffix.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// 경로에서 동적 파라미터를 정규화합니다.
///
/// 예: `/api/jobs/123e4567-e89b-12d3-a456-426614174000` → `/api/jobs/:id`,
/// `/api/jobs/rust-engineer-1a2b3c4d` → `/api/jobs/:slug`
pub fn normalize_path(path: &str) -> String {
    let normalized: Vec<String> = path
        .split('/')
        .map(|segment| {
            let is_uuid = segment.len() == 36 && segment.chars().filter(|c| *c == '-').count() == 4;
            let is_numeric = !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit());

            if is_uuid || is_numeric {
                ":id".to_string()
            } else if is_job_slug(segment) {
                ":slug".to_string()
            } else {
                segment.to_string()
            }
        })
        .collect();
    normalized.join("/")
}
