//! 문의 API 라우트
//!
//! - `POST /api/contact` - 문의 메일 발송 (수신: `CONTACT_RECEIVER_EMAIL`, 회신: 작성자)

use axum::{extract::State, routing::post, Json, Router};
use jobboard_notification::EmailMessage;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::metrics::record_contact_message;
use crate::state::AppState;
use crate::types::SuccessResponse;
use crate::utils::{non_blank, required_text, ValidatedJson};

/// 제목 미입력 시 사용
const DEFAULT_SUBJECT: &str = "New contact message";

/// 문의 요청
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100, message = "이름을 입력하세요"))]
    pub name: String,
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "내용을 입력하세요"))]
    pub message: String,
}

impl ContactRequest {
    /// 수신자에게 보낼 메일을 만듭니다.
    fn into_email(self, to: &str) -> ApiResult<EmailMessage> {
        let name = required_text(&self.name).ok_or_else(|| ApiError::invalid_input("이름을 입력하세요"))?;
        let message =
            required_text(&self.message).ok_or_else(|| ApiError::invalid_input("내용을 입력하세요"))?;
        let email = self.email.trim().to_string();
        let subject = non_blank(self.subject).unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

        let body = format!("From: {} <{}>\n\n{}\n", name, email, message);
        Ok(EmailMessage::new(to, format!("[Contact] {}", subject), body).with_reply_to(email))
    }
}

/// 문의 메일 발송
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "발송 완료", body = SuccessResponse),
        (status = 400, description = "입력값 오류", body = ApiErrorResponse),
        (status = 500, description = "메일 미설정 또는 발송 실패", body = ApiErrorResponse)
    )
)]
pub async fn send_contact(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<ContactRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let (Some(mailer), Some(receiver)) = (&state.mailer, &state.contact_receiver) else {
        return Err(ApiError::internal("문의 메일 발송이 설정되지 않았습니다"));
    };

    let email = req.into_email(receiver)?;
    if let Err(e) = mailer.send(&email).await {
        warn!(error = %e, mailer = mailer.name(), "Contact message delivery failed");
        record_contact_message(false);
        return Err(e.into());
    }

    info!(mailer = mailer.name(), "Contact message delivered");
    record_contact_message(true);
    Ok(Json(SuccessResponse::ok()))
}

/// 문의 라우터 생성.
pub fn contact_router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(send_contact))
}
