//! 공통 유틸리티.

mod extract;
mod format;
mod input;

pub use extract::{IdPath, ValidatedJson};
pub use format::{
    company_or_unknown, format_timestamp, format_timestamp_opt, or_empty, UNKNOWN_COMPANY,
};
pub use input::{non_blank, required_text};
