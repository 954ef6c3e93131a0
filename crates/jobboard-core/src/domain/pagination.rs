//! 페이지네이션.

use serde::Serialize;

/// 정규화된 페이지 요청.
///
/// `page`는 1부터 시작하며, `limit`은 `1..=max`로 제한됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// 목록 API 기본 페이지 크기.
    pub const DEFAULT_LIMIT: i64 = 20;
    /// 페이지 크기 상한.
    pub const MAX_LIMIT: i64 = 50;

    /// 쿼리 값으로 페이지 요청을 만듭니다.
    ///
    /// 값이 없으면 기본값, 범위를 벗어나면 경계로 보정합니다.
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: i64, max_limit: i64) -> Self {
        let max_limit = max_limit.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).clamp(1, max_limit),
        }
    }

    /// SQL `OFFSET` 값.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None, Self::DEFAULT_LIMIT, Self::MAX_LIMIT)
    }
}

/// 쿼리 문자열의 숫자를 관대하게 파싱합니다. 파싱 실패는 `None`.
pub fn parse_lenient_i64(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Pagination::default();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_clamping() {
        let p = Pagination::new(Some(0), Some(500), 20, 50);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 50);

        let p = Pagination::new(Some(3), Some(-4), 20, 50);
        assert_eq!(p.limit, 1);
        assert_eq!(p.offset(), 2);
    }

    #[test]
    fn test_offset() {
        let p = Pagination::new(Some(3), Some(10), 20, 50);
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(parse_lenient_i64(Some("3")), Some(3));
        assert_eq!(parse_lenient_i64(Some(" 12 ")), Some(12));
        assert_eq!(parse_lenient_i64(Some("abc")), None);
        assert_eq!(parse_lenient_i64(None), None);
    }
}
