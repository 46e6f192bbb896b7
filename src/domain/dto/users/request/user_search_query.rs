//! `GET /user/search` 쿼리 파라미터
//!
//! 빈 값(`?name=`)은 지정하지 않은 것으로 취급합니다.

use serde::Deserialize;
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchQuery {
    /// 대소문자 무시 부분 일치
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub gender: Option<String>,

    /// 이 날짜 이후 출생 (`YYYY-MM-DD`, 포함)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub date_of_birth: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub country: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub state_or_province: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub city: Option<String>,

    /// 콤마 구분, 하나라도 일치하면 포함
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub other_websites: Option<String>,

    pub page: Option<u64>,

    pub size: Option<u64>,
}
