//! 채용 게시판 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 인증, 공고, 지원서, 프로필, 채용 담당자 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, middleware, routing::get, Router};
use jobboard_api::auth::{JwtConfig, TokenInfoVerifier};
use jobboard_api::metrics::setup_metrics_recorder;
use jobboard_api::middleware::metrics_layer;
use jobboard_api::openapi::swagger_ui_router;
use jobboard_api::routes::create_api_router;
use jobboard_api::state::AppState;
use jobboard_core::{init_logging, AppConfig, DatabaseConfig, LogConfig};
use jobboard_notification::SmtpMailer;
use metrics_exporter_prometheus::PrometheusHandle;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// CORS 레이어 생성.
///
/// `CORS_ORIGINS` 환경변수(쉼표 구분)가 있으면 해당 origin만 허용하고,
/// 없으면 개발 모드로 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let configured = std::env::var("CORS_ORIGINS")
        .ok()
        .filter(|origins| !origins.is_empty());

    let allow_origin = match &configured {
        Some(origins) => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        None => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        // wildcard origin과 credentials는 함께 쓸 수 없음
        .allow_credentials(configured.is_some())
        .max_age(Duration::from_secs(3600))
}

/// Prometheus 메트릭 엔드포인트.
async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// 전체 라우터 조합.
fn create_router(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_api_router().with_state(state))
        // OpenAPI 문서 및 Swagger UI
        .merge(swagger_ui_router())
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors_layer())
}

/// OpenAPI 스펙 내보내기 처리.
///
/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI` 환경변수가 설정된 경우
/// OpenAPI JSON 스펙을 stdout으로 출력하고 종료합니다.
fn handle_export_openapi() -> anyhow::Result<()> {
    use jobboard_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if export_flag || export_env {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
        println!("{}", json);
        std::process::exit(0);
    }

    Ok(())
}

/// 데이터베이스 연결.
///
/// URL이 없거나 연결 확인에 실패하면 `None`을 반환하고 서버는 DB 없이 기동합니다.
/// 이 경우 readiness는 503, DB가 필요한 엔드포인트는 500을 반환합니다.
async fn connect_database(config: &DatabaseConfig) -> anyhow::Result<Option<PgPool>> {
    let Some(url) = &config.url else {
        warn!("DATABASE_URL not set, database features disabled");
        return Ok(None);
    };

    let pool = match PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(url.expose_secret())
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Ok(None);
        }
    };

    if let Err(e) = sqlx::query("SELECT 1").fetch_one(&pool).await {
        error!("Failed to verify database connection: {}", e);
        return Ok(None);
    }
    info!("Connected to PostgreSQL successfully");

    if config.run_migrations {
        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .context("failed to run database migrations")?;
        info!("Database migrations applied");
    }

    Ok(Some(pool))
}

/// AppState 초기화.
async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let mut state = AppState::new(JwtConfig::from_auth_config(&config.auth));

    if let Some(pool) = connect_database(&config.database).await? {
        state = state.with_db_pool(pool);
    }

    match &config.smtp {
        Some(smtp) => {
            let mailer = SmtpMailer::new(smtp).context("invalid SMTP configuration")?;
            if smtp.contact_receiver.is_none() {
                warn!("CONTACT_RECEIVER_EMAIL not set, contact form will fail");
            }
            state = state.with_mailer(Arc::new(mailer), smtp.contact_receiver.clone());
        }
        None => warn!("SMTP not configured, contact form disabled"),
    }

    match &config.google.client_id {
        Some(client_id) => {
            let verifier =
                TokenInfoVerifier::new(client_id.clone()).context("failed to build Google verifier")?;
            state = state.with_google_verifier(Arc::new(verifier));
        }
        None => warn!("Google client id not set, Google login disabled"),
    }

    Ok(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // OpenAPI 내보내기 처리 (서버 시작 전)
    handle_export_openapi()?;

    let config = AppConfig::from_env().context("failed to load configuration")?;

    init_logging(LogConfig::from_app_config(&config.logging, config.environment))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    info!(environment = ?config.environment, "Starting Job Board API server...");
    if config.auth.used_dev_secret {
        warn!("JWT_SECRET not set, using development secret");
    }

    let metrics_handle =
        setup_metrics_recorder().context("failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            error!(
                host = %config.server.host,
                port = config.server.port,
                error = %e,
                "소켓 주소 설정이 유효하지 않습니다. API_HOST, API_PORT 환경변수를 확인하세요."
            );
            e
        })?;

    let state = Arc::new(create_app_state(&config).await?);

    info!(version = %state.version, "Application state initialized");
    info!(
        has_db = state.db_pool.is_some(),
        has_mailer = state.mailer.is_some(),
        has_google = state.google_verifier.is_some(),
        "Service connections status"
    );

    let app = create_router(state, metrics_handle);

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);
    info!("Metrics available at http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Ctrl+C 또는 SIGTERM 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
