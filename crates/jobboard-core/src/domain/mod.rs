//! 채용 게시판 도메인 모델.

mod application;
mod job;
mod pagination;
mod user;

pub use application::*;
pub use job::*;
pub use pagination::*;
pub use user::*;
