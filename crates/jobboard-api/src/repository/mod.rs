//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 모든 Repository는 static methods 패턴을 사용하며, 소유권 검사는 쿼리 조건에 포함합니다.

pub mod applications;
pub mod jobs;
pub mod profiles;
pub mod saved_jobs;
pub mod users;

pub use applications::{
    ApplicationEventRecord, ApplicationRecord, ApplicationRepository,
    EmployerApplicationFilter, StatusUpdate, TransitionOutcome,
};
pub use jobs::{EmployerJobRecord, JobFilter, JobRecord, JobRepository, NewJob};
pub use profiles::{ProfileInput, ProfileRecord, ProfileRepository, SkillInput, SkillRecord};
pub use saved_jobs::{SavedJobRecord, SavedJobRepository};
pub use users::{NewUser, UserRecord, UserRepository};
