//! 요청 입력 정리.

/// 앞뒤 공백을 제거하고 빈 문자열은 `None`으로 바꿉니다.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 필수 문자열을 정리합니다. 비어 있으면 `None`.
pub fn required_text(value: &str) -> Option<String> {
    non_blank(Some(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Acme  ".to_string())), Some("Acme".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(required_text(" x "), Some("x".to_string()));
        assert_eq!(required_text(""), None);
    }
}
