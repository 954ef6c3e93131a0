//! HTTP 요청 metrics middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{
    normalize_path, record_http_duration, record_http_request, record_http_response,
};

/// 집계하지 않는 경로 (Prometheus 스크레이프, 헬스 프로브)
const UNTRACKED_PREFIXES: [&str; 2] = ["/metrics", "/health"];

fn is_tracked(path: &str) -> bool {
    !UNTRACKED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// HTTP 메트릭을 수집하는 미들웨어 레이어.
///
/// 각 요청에 대해 다음 메트릭을 기록합니다:
/// - `http_requests_total`: 총 요청 수 (method, path 라벨)
/// - `http_responses_total`: 총 응답 수 (method, path, status 라벨)
/// - `http_request_duration_seconds`: 요청 처리 시간 히스토그램
///
/// 공고 ID/슬러그와 UUID 세그먼트는 라벨 폭증을 막기 위해 치환됩니다.
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    if !is_tracked(request.uri().path()) {
        return next.run(request).await;
    }

    let start = Instant::now();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    record_http_request(&method, &path);

    let response = next.run(request).await;

    let status = response.status().as_u16();
    record_http_response(&method, &path, status);
    record_http_duration(&method, &path, start.elapsed().as_secs_f64());

    response
}
