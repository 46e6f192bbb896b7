//! 회원가입 요청 (multipart/form-data)
//!
//! | 필드 | 필수 | 비고 |
//! |------|------|------|
//! | `name` | O | 1~100자 |
//! | `email` | O | 소문자로 정규화 |
//! | `password` | O | 6자 이상 |
//! | `gender`, `dateOfBirth` | | `dateOfBirth`는 `YYYY-MM-DD` |
//! | `otherWebsites` | | 반복 또는 콤마 구분 |
//! | `country`, `city`, `stateOrProvince`, `zipCode`, `streetAddress` | | 하나라도 있으면 주소 저장 |
//! | `address` | | 주소 JSON 문자열 (개별 필드가 우선) |
//! | `profilePhoto` | | 이미지 파일 |

use validator::Validate;
use crate::domain::entities::users::address::Address;
use crate::errors::errors::AppError;
use crate::utils::multipart::FormData;
use crate::utils::string_utils::{split_list, validate_iso_date};

#[derive(Debug, Clone, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "password must be between 6 and 128 characters"))]
    pub password: String,

    pub gender: Option<String>,

    #[validate(custom(function = "validate_iso_date"))]
    pub date_of_birth: Option<String>,

    pub other_websites: Vec<String>,

    pub address: Option<Address>,
}

impl SignupRequest {
    pub fn from_form(form: &FormData) -> Result<Self, AppError> {
        let request = Self {
            name: form.required_text("name")?,
            email: normalize_email(&form.required_text("email")?),
            password: raw_password(form)
                .ok_or_else(|| AppError::ValidationError("password is required".to_string()))?,
            gender: form.text("gender"),
            date_of_birth: form.text("dateOfBirth"),
            other_websites: split_list(form.texts("otherWebsites")),
            address: address_from_form(form)?.non_empty(),
        };

        request.validate()?;
        Ok(request)
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 비밀번호는 공백도 의미가 있으므로 trim하지 않는다
pub(crate) fn raw_password(form: &FormData) -> Option<String> {
    form.texts("password").first().filter(|p| !p.is_empty()).cloned()
}

/// `address` JSON 필드를 기본으로 하고 개별 주소 필드로 덮어쓴다
pub(crate) fn address_from_form(form: &FormData) -> Result<Address, AppError> {
    let mut address = match form.text("address") {
        Some(json) => serde_json::from_str::<Address>(&json)
            .map_err(|e| AppError::ValidationError(format!("address is not valid JSON: {}", e)))?,
        None => Address::default(),
    };

    address.merge(Address {
        country: form.text("country"),
        city: form.text("city"),
        state_or_province: form.text("stateOrProvince"),
        zip_code: form.text("zipCode"),
        street_address: form.text("streetAddress"),
    });

    Ok(address)
}
