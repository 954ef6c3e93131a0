//! # Job Board Notification
//!
//! 외부로 나가는 메일 발송.
//!
//! 지원 채널:
//! - SMTP (`lettre` 비동기 전송)
//!
//! 핸들러는 [`Mailer`] trait에만 의존하므로 테스트에서는 기록용 구현으로 바꿔 끼울 수 있습니다.

pub mod email;
pub mod types;

pub use email::*;
pub use types::*;
