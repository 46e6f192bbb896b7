//! # 문자열 유틸리티
//!
//! 요청 값 정리(trim, 빈 값 제거), 콤마 구분 목록 분리, 검색용 정규식 생성 등
//! 핸들러와 서비스에서 공통으로 쓰는 함수들입니다.

use chrono::NaiveDate;
use serde::Deserialize;
use crate::errors::errors::AppError;

/// 앞뒤 공백을 제거하고 비어 있으면 검증 에러
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} is required", field_name)));
    }
    Ok(trimmed.to_string())
}

/// 공백뿐인 값은 `None`으로 취급
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 쿼리 파라미터용: `?name=` 처럼 빈 값이 오면 `None`
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// `"a, b,,c"` → `["a", "b", "c"]`. 여러 값을 받는 경우 각 값을 모두 분리해 이어 붙인다.
pub fn split_list<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|value| {
            value
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// 사용자 입력을 그대로 포함 검색할 수 있도록 정규식 특수문자를 이스케이프
pub fn contains_pattern(keyword: &str) -> String {
    regex::escape(keyword.trim())
}

/// `YYYY-MM-DD` 형식의 실제 날짜인지 확인
pub fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// validator `custom` 검증 함수
pub fn validate_iso_date(value: &str) -> Result<(), validator::ValidationError> {
    if is_iso_date(value) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("iso_date");
        error.message = Some("dateOfBirth must be formatted as YYYY-MM-DD".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("  World  ", "name").unwrap(), "World");
        assert!(validate_required_string("", "name").is_err());
        assert!(validate_required_string("\t\n", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(["rust, actix ,,mongo"]), vec!["rust", "actix", "mongo"]);
        assert_eq!(split_list(["a", "b,c", " "]), vec!["a", "b", "c"]);
        assert!(split_list(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_contains_pattern_escapes_regex() {
        assert_eq!(contains_pattern(" c++ "), "c\\+\\+");
        assert_eq!(contains_pattern("a.b"), "a\\.b");
    }

    #[test]
    fn test_iso_date() {
        assert!(is_iso_date("1990-02-28"));
        assert!(!is_iso_date("1990-02-30"));
        assert!(!is_iso_date("28/02/1990"));
        assert!(validate_iso_date("2000-01-01").is_ok());
        assert!(validate_iso_date("yesterday").is_err());
    }
}
