//! # multipart/form-data 수집기
//!
//! 회원가입, 프로필 수정, 게시글 작성은 텍스트 필드와 파일을 함께 받습니다.
//! 스트림을 한 번 끝까지 읽어 필드명 기준으로 모아두고, DTO 변환 단계에서 꺼내 씁니다.
//!
//! - 같은 이름의 텍스트 필드는 모두 보관합니다 (`tags`, `otherWebsites`).
//! - 파일은 [`FormLimits::file_fields`]에 있는 이름만 받고, 이름별로 하나만 보관합니다.
//! - 파일 하나, 텍스트 필드 하나, 요청 전체 크기와 파트 수를 제한하며 넘으면 400입니다.
//! - 파일명 없이 전송된 빈 파트는 무시합니다.

use std::collections::HashMap;
use actix_multipart::Multipart;
use futures_util::StreamExt;
use crate::domain::models::media::uploaded_file::UploadedFile;
use crate::errors::errors::AppError;
use crate::utils::string_utils::{clean_optional_string, validate_required_string};

/// 텍스트 필드 하나의 최대 크기
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// 텍스트 필드 전체에 허용하는 크기
const MAX_TEXT_TOTAL_BYTES: usize = 256 * 1024;

/// 한 요청에 허용하는 파트 수
const MAX_PARTS: usize = 200;

/// 폼 하나를 읽을 때 적용하는 제한
#[derive(Debug, Clone)]
pub struct FormLimits {
    /// 파일을 받을 수 있는 필드명
    pub file_fields: &'static [&'static str],
    pub max_file_bytes: usize,
    pub max_text_bytes: usize,
    /// 파일과 텍스트를 합친 전체 크기
    pub max_total_bytes: usize,
    pub max_parts: usize,
}

impl FormLimits {
    pub fn new(file_fields: &'static [&'static str], max_file_bytes: usize) -> Self {
        let file_budget = max_file_bytes.saturating_mul(file_fields.len());

        Self {
            file_fields,
            max_file_bytes,
            max_text_bytes: MAX_TEXT_FIELD_BYTES,
            max_total_bytes: file_budget.saturating_add(MAX_TEXT_TOTAL_BYTES),
            max_parts: MAX_PARTS,
        }
    }

    fn accepts_file(&self, name: &str) -> bool {
        self.file_fields.contains(&name)
    }
}

#[derive(Debug, Default)]
pub struct FormData {
    texts: HashMap<String, Vec<String>>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// multipart 스트림 전체를 읽습니다.
    pub async fn read(mut payload: Multipart, limits: &FormLimits) -> Result<Self, AppError> {
        let mut form = FormData::default();
        let mut parts = 0usize;
        let mut total_bytes = 0usize;

        while let Some(field) = payload.next().await {
            let mut field = field
                .map_err(|e| AppError::ValidationError(format!("Multipart error: {}", e)))?;

            parts += 1;
            if parts > limits.max_parts {
                return Err(AppError::ValidationError(format!(
                    "Form has more than {} parts",
                    limits.max_parts
                )));
            }

            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string);
            let content_type = field.content_type().map(|mime| mime.to_string());

            if file_name.is_some() && !limits.accepts_file(&name) {
                return Err(AppError::ValidationError(format!(
                    "Unexpected file field '{}'",
                    name
                )));
            }

            let limit = if file_name.is_some() { limits.max_file_bytes } else { limits.max_text_bytes };
            let mut bytes = Vec::new();

            while let Some(chunk) = field.next().await {
                let data = chunk
                    .map_err(|e| AppError::ValidationError(format!("Multipart read error: {}", e)))?;

                if bytes.len() + data.len() > limit {
                    return Err(AppError::ValidationError(format!(
                        "Field '{}' exceeds the {} byte limit",
                        name, limit
                    )));
                }

                total_bytes += data.len();
                if total_bytes > limits.max_total_bytes {
                    return Err(AppError::ValidationError(format!(
                        "Form exceeds the {} byte limit",
                        limits.max_total_bytes
                    )));
                }
                bytes.extend_from_slice(&data);
            }

            match file_name {
                Some(file_name) => {
                    let file = UploadedFile {
                        file_name,
                        content_type: content_type
                            .unwrap_or_else(|| "application/octet-stream".to_string()),
                        bytes,
                    };
                    form.insert_file(name, file);
                }
                None => {
                    let value = String::from_utf8(bytes).map_err(|_| {
                        AppError::ValidationError(format!("Field '{}' is not valid UTF-8", name))
                    })?;
                    form.insert_text(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.texts.entry(name.into()).or_default().push(value.into());
    }

    pub fn insert_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        if file.is_empty() && file.file_name.is_empty() {
            return;
        }
        self.files.insert(name.into(), file);
    }

    /// 첫 번째 값 (trim, 빈 값은 `None`)
    pub fn text(&self, name: &str) -> Option<String> {
        self.texts
            .get(name)
            .and_then(|values| values.first())
            .and_then(|value| clean_optional_string(Some(value.clone())))
    }

    /// 같은 이름으로 들어온 모든 값
    pub fn texts(&self, name: &str) -> &[String] {
        self.texts.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_text(&self, name: &str) -> bool {
        self.texts.contains_key(name)
    }

    /// 필수 텍스트 필드
    pub fn required_text(&self, name: &str) -> Result<String, AppError> {
        let value = self.texts(name).first().map(String::as_str).unwrap_or_default();
        validate_required_string(value, name)
    }

    /// 비어 있지 않은 파일을 꺼냅니다.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(|file| !file.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormData {
        let mut form = FormData::default();
        form.insert_text("name", "  Alice ");
        form.insert_text("tags", "rust");
        form.insert_text("tags", "actix, mongo");
        form.insert_text("gender", "   ");
        form.insert_file(
            "profilePhoto",
            UploadedFile {
                file_name: "me.png".into(),
                content_type: "image/png".into(),
                bytes: vec![1, 2, 3],
            },
        );
        form.insert_file(
            "mediaFile",
            UploadedFile {
                file_name: "empty.png".into(),
                content_type: "image/png".into(),
                bytes: vec![],
            },
        );
        form
    }

    #[test]
    fn test_text_is_trimmed_and_blank_is_none() {
        let form = form();
        assert_eq!(form.text("name").as_deref(), Some("Alice"));
        assert_eq!(form.text("gender"), None);
        assert!(form.has_text("gender"));
        assert_eq!(form.text("missing"), None);
    }

    #[test]
    fn test_repeated_fields_are_kept() {
        let form = form();
        assert_eq!(form.texts("tags"), ["rust".to_string(), "actix, mongo".to_string()]);
        assert!(form.texts("missing").is_empty());
    }

    #[test]
    fn test_required_text() {
        let form = form();
        assert!(form.required_text("name").is_ok());
        assert!(matches!(form.required_text("gender"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_limits_budget_follows_file_fields() {
        let limits = FormLimits::new(&["profilePhoto"], 1024);
        assert!(limits.accepts_file("profilePhoto"));
        assert!(!limits.accepts_file("avatar"));
        assert_eq!(limits.max_total_bytes, 1024 + MAX_TEXT_TOTAL_BYTES);
    }

    #[test]
    fn test_take_file_skips_empty_upload() {
        let mut form = form();
        assert_eq!(form.take_file("profilePhoto").map(|f| f.size()), Some(3));
        assert!(form.take_file("profilePhoto").is_none());
        assert!(form.take_file("mediaFile").is_none());
    }

    mod streaming {
        use super::*;
        use actix_web::http::header::CONTENT_TYPE;
        use actix_web::http::StatusCode;
        use actix_web::{test as atest, web, App, HttpResponse};
        use serde_json::json;

        const BOUNDARY: &str = "form-boundary-7MA4YWxk";

        struct Part<'a> {
            name: &'a str,
            file_name: Option<&'a str>,
            data: &'a [u8],
        }

        fn text(name: &'static str, data: &'static str) -> Part<'static> {
            Part { name, file_name: None, data: data.as_bytes() }
        }

        fn file<'a>(name: &'a str, file_name: &'a str, data: &'a [u8]) -> Part<'a> {
            Part { name, file_name: Some(file_name), data }
        }

        fn body(parts: &[Part]) -> Vec<u8> {
            let mut body = Vec::new();
            for part in parts {
                body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
                match part.file_name {
                    Some(file_name) => body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                            part.name, file_name
                        )
                        .as_bytes(),
                    ),
                    None => body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                            .as_bytes(),
                    ),
                }
                body.extend_from_slice(part.data);
                body.extend_from_slice(b"\r\n");
            }
            body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
            body
        }

        fn small_limits() -> FormLimits {
            FormLimits {
                file_fields: &["mediaFile"],
                max_file_bytes: 10,
                max_text_bytes: 16,
                max_total_bytes: 64,
                max_parts: 8,
            }
        }

        async fn collect(payload: Multipart) -> Result<HttpResponse, AppError> {
            let mut form = FormData::read(payload, &small_limits()).await?;
            let media = form.take_file("mediaFile");

            Ok(HttpResponse::Ok().json(json!({
                "title": form.text("title"),
                "tags": form.texts("tags"),
                "mediaSize": media.as_ref().map(|f| f.size()),
                "mediaType": media.map(|f| f.content_type),
            })))
        }

        async fn send(parts: &[Part<'_>]) -> (StatusCode, serde_json::Value) {
            let app = atest::init_service(
                App::new().route("/form", web::post().to(collect)),
            )
            .await;

            let req = atest::TestRequest::post()
                .uri("/form")
                .insert_header((
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                ))
                .set_payload(body(parts))
                .to_request();
            let resp = atest::call_service(&app, req).await;
            let status = resp.status();
            let json: serde_json::Value = atest::read_body_json(resp).await;
            (status, json)
        }

        #[actix_web::test]
        async fn test_reads_text_and_file_parts() {
            let (status, json) = send(&[
                text("title", "Hello"),
                text("tags", "rust"),
                text("tags", "actix"),
                file("mediaFile", "a.png", b"12345"),
            ])
            .await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["title"], "Hello");
            assert_eq!(json["tags"], json!(["rust", "actix"]));
            assert_eq!(json["mediaSize"], 5);
            assert_eq!(json["mediaType"], "image/png");
        }

        #[actix_web::test]
        async fn test_oversize_file_is_rejected() {
            let (status, json) = send(&[file("mediaFile", "a.png", b"12345678901")]).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "validation_error");
        }

        #[actix_web::test]
        async fn test_oversize_text_field_is_rejected() {
            let (status, _) = send(&[text("title", "this title is far too long")]).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }

        #[actix_web::test]
        async fn test_unexpected_file_field_is_rejected() {
            let (status, json) = send(&[file("attachment1", "a.png", b"123")]).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "Unexpected file field 'attachment1'");
        }

        #[actix_web::test]
        async fn test_total_size_is_capped() {
            // 각 파트는 제한 안이지만 합계가 64바이트를 넘는다
            let (status, json) = send(&[
                text("a", "0123456789abcdef"),
                text("b", "0123456789abcdef"),
                text("c", "0123456789abcdef"),
                text("d", "0123456789abcdef"),
                text("e", "x"),
            ])
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "Form exceeds the 64 byte limit");
        }

        #[actix_web::test]
        async fn test_part_count_is_capped() {
            let parts: Vec<Part> = (0..9).map(|_| text("tags", "t")).collect();
            let (status, json) = send(&parts).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "Form has more than 8 parts");
        }

        #[actix_web::test]
        async fn test_invalid_utf8_text_is_rejected() {
            let (status, json) = send(&[Part { name: "title", file_name: None, data: &[0xff, 0xfe] }]).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "Field 'title' is not valid UTF-8");
        }

        #[actix_web::test]
        async fn test_empty_file_part_is_ignored() {
            let (status, json) = send(&[text("title", "Hi"), file("mediaFile", "", b"")]).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["title"], "Hi");
            assert!(json["mediaSize"].is_null());
        }
    }
}
