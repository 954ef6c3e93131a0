//! 메일 타입 및 trait 정의.

use async_trait::async_trait;

/// 발송할 메일.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 수신 주소 (`Name <addr>` 형식 허용)
    pub to: String,
    /// 회신 주소
    pub reply_to: Option<String>,
    /// 제목
    pub subject: String,
    /// 본문 (plain text)
    pub body: String,
}

impl EmailMessage {
    /// 새 메일을 생성합니다.
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            reply_to: None,
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// 회신 주소를 설정합니다.
    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }
}

/// 메일 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 메일 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("메일 전송 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("잘못된 주소: {0}")]
    InvalidAddress(String),

    #[error("메일 생성 실패: {0}")]
    BuildFailed(String),
}

/// 메일 발송기 trait.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// 메일을 발송합니다.
    async fn send(&self, message: &EmailMessage) -> NotificationResult<()>;

    /// 발송기 이름을 반환합니다.
    fn name(&self) -> &str;
}
