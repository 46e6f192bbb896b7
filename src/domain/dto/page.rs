//! 페이지네이션 요청/응답
//!
//! 목록 API는 모두 0부터 시작하는 `page`와 `size`(1~100, 기본 10)를 받고
//! 아래 형태로 응답합니다.
//!
//! ```json
//! { "content": [...], "page": 0, "size": 10, "totalElements": 42, "totalPages": 5 }
//! ```

use serde::Serialize;
use crate::errors::errors::AppError;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// 검증된 페이지 요청
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn of(page: Option<u64>, size: Option<u64>) -> Result<Self, AppError> {
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(AppError::ValidationError(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        // MongoDB skip은 i64로 인코딩된다
        let page = page.unwrap_or(0);
        if page.checked_mul(size).is_none_or(|skip| skip > i64::MAX as u64) {
            return Err(AppError::ValidationError("page is out of range".to_string()));
        }

        Ok(Self { page, size })
    }

    pub fn skip(&self) -> u64 {
        self.page * self.size
    }

    pub fn limit(&self) -> i64 {
        self.size as i64
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: total_elements.div_ceil(request.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = PageRequest::of(None, None).unwrap();
        assert_eq!(request, PageRequest { page: 0, size: 10 });
        assert_eq!(request.skip(), 0);
    }

    #[test]
    fn test_size_bounds() {
        assert!(PageRequest::of(Some(0), Some(0)).is_err());
        assert!(PageRequest::of(Some(0), Some(101)).is_err());
        assert!(PageRequest::of(Some(0), Some(100)).is_ok());
    }

    #[test]
    fn test_page_must_fit_skip() {
        assert!(PageRequest::of(Some(u64::MAX), None).is_err());
        assert!(PageRequest::of(Some(i64::MAX as u64), Some(2)).is_err());

        let last = i64::MAX as u64 / 10;
        let request = PageRequest::of(Some(last), Some(10)).unwrap();
        assert!(request.skip() <= i64::MAX as u64);
    }

    #[test]
    fn test_skip_and_total_pages() {
        let request = PageRequest::of(Some(3), Some(20)).unwrap();
        assert_eq!(request.skip(), 60);
        assert_eq!(request.limit(), 20);

        let page = PageResponse::new(vec![1, 2, 3], request, 61);
        assert_eq!(page.total_pages, 4);

        let empty: PageResponse<i32> = PageResponse::new(vec![], request, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_json_shape() {
        let page = PageResponse::new(vec!["a"], PageRequest::of(None, None).unwrap(), 1);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["content"][0], "a");
    }
}
