//! 사용자 정보 수정 요청 (multipart/form-data)
//!
//! - `PUT /user/{id}`: 부분 수정. 전달된 필드만 변경됩니다.
//! - `PUT /user/{id}/update`: 이름/이메일(필수)과 프로필 사진만 변경합니다.

use validator::Validate;
use crate::domain::dto::users::request::signup_request::{address_from_form, normalize_email, raw_password};
use crate::domain::entities::users::address::Address;
use crate::errors::errors::AppError;
use crate::utils::multipart::FormData;
use crate::utils::string_utils::{split_list, validate_iso_date};

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 128, message = "password must be between 6 and 128 characters"))]
    pub password: Option<String>,

    pub gender: Option<String>,

    #[validate(custom(function = "validate_iso_date"))]
    pub date_of_birth: Option<String>,

    /// 필드가 전달되면 목록 전체를 교체 (빈 값이면 비움)
    pub other_websites: Option<Vec<String>>,

    /// 전달된 주소 필드만 병합
    pub address: Option<Address>,
}

impl UpdateUserRequest {
    pub fn from_form(form: &FormData) -> Result<Self, AppError> {
        let request = Self {
            name: form.text("name"),
            email: form.text("email").map(|e| normalize_email(&e)),
            password: raw_password(form),
            gender: form.text("gender"),
            date_of_birth: form.text("dateOfBirth"),
            other_websites: form
                .has_text("otherWebsites")
                .then(|| split_list(form.texts("otherWebsites"))),
            address: address_from_form(form)?.non_empty(),
        };

        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

impl UpdateProfileRequest {
    pub fn from_form(form: &FormData) -> Result<Self, AppError> {
        let request = Self {
            name: form.required_text("name")?,
            email: normalize_email(&form.required_text("email")?),
        };

        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_only_sets_given_fields() {
        let mut form = FormData::default();
        form.insert_text("gender", "female");
        form.insert_text("stateOrProvince", "NSW");

        let request = UpdateUserRequest::from_form(&form).unwrap();

        assert_eq!(request.gender.as_deref(), Some("female"));
        assert!(request.name.is_none());
        assert!(request.password.is_none());
        assert!(request.other_websites.is_none());
        assert_eq!(request.address.unwrap().state_or_province.as_deref(), Some("NSW"));
    }

    #[test]
    fn test_blank_websites_clears_list() {
        let mut form = FormData::default();
        form.insert_text("otherWebsites", "");

        let request = UpdateUserRequest::from_form(&form).unwrap();
        assert_eq!(request.other_websites, Some(vec![]));
    }

    #[test]
    fn test_partial_update_validates_present_fields() {
        let mut form = FormData::default();
        form.insert_text("email", "broken");
        assert!(UpdateUserRequest::from_form(&form).is_err());

        let mut form = FormData::default();
        form.insert_text("password", "abc");
        assert!(UpdateUserRequest::from_form(&form).is_err());
    }

    #[test]
    fn test_profile_update_requires_both_fields() {
        let mut form = FormData::default();
        form.insert_text("name", "Alice");
        assert!(UpdateProfileRequest::from_form(&form).is_err());

        form.insert_text("email", "ALICE@example.com");
        let request = UpdateProfileRequest::from_form(&form).unwrap();
        assert_eq!(request.email, "alice@example.com");
    }
}
