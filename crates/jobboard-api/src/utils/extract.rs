//! 검증 포함 요청 추출기.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use crate::error::ApiError;

/// JSON 본문을 역직렬화한 뒤 `validator` 규칙을 검사합니다.
///
/// 형식 오류와 검증 실패 모두 400 `INVALID_INPUT`으로 응답합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::InvalidInput(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// 경로 파라미터 추출기.
///
/// 파싱할 수 없는 ID(예: UUID가 아닌 문자열)는 어떤 리소스와도 일치하지 않으므로
/// 404 `NOT_FOUND` JSON 응답으로 바꿉니다.
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extracted = Path::<T>::from_request_parts(parts, state).await;
        match extracted {
            Ok(Path(value)) => Ok(IdPath(value)),
            Err(rejection) => {
                debug!(
                    path = %parts.uri.path(),
                    "Unparsable path parameter: {}",
                    rejection.body_text()
                );
                Err(ApiError::not_found("리소스를 찾을 수 없습니다"))
            }
        }
    }
}
