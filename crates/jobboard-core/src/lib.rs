//! # Job Board Core
//!
//! 채용 게시판 서비스의 핵심 도메인 규칙과 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 서비스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 사용자 역할 및 인증 제공자
//! - 채용공고 상태, 고용 형태, 슬러그 생성
//! - 지원서 상태 및 상태 전이 규칙
//! - 페이지네이션
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
