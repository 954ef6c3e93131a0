//! 채용 게시판 핵심 에러 타입.
//!
//! 도메인 규칙과 설정 로딩에서 발생하는 에러를 정의합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 허용되지 않는 상태 전이
    #[error("허용되지 않는 상태 전이: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_error_message() {
        let err = CoreError::InvalidTransition {
            from: "withdrawn".to_string(),
            to: "interview".to_string(),
        };
        assert!(err.to_string().contains("withdrawn -> interview"));
    }

    #[test]
    fn test_from_config_error() {
        let err: CoreError = config::ConfigError::Message("bad port".to_string()).into();
        assert!(matches!(err, CoreError::Config(ref msg) if msg.contains("bad port")));
    }
}
