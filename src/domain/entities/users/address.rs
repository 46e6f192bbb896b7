use serde::{Deserialize, Serialize};

/// 사용자 주소. 모든 필드가 선택이며, 하나라도 있을 때만 저장합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.city.is_none()
            && self.state_or_province.is_none()
            && self.zip_code.is_none()
            && self.street_address.is_none()
    }

    /// 비어있으면 `None`
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }

    /// `other`에 값이 있는 필드만 덮어씁니다.
    pub fn merge(&mut self, other: Address) {
        if other.country.is_some() {
            self.country = other.country;
        }
        if other.city.is_some() {
            self.city = other.city;
        }
        if other.state_or_province.is_some() {
            self.state_or_province = other.state_or_province;
        }
        if other.zip_code.is_some() {
            self.zip_code = other.zip_code;
        }
        if other.street_address.is_some() {
            self.street_address = other.street_address;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_address_collapses_to_none() {
        assert!(Address::default().non_empty().is_none());

        let address = Address { city: Some("Hanoi".into()), ..Default::default() };
        assert_eq!(address.clone().non_empty(), Some(address));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut current = Address {
            country: Some("Vietnam".into()),
            city: Some("Hanoi".into()),
            ..Default::default()
        };

        current.merge(Address { city: Some("Da Nang".into()), ..Default::default() });

        assert_eq!(current.country.as_deref(), Some("Vietnam"));
        assert_eq!(current.city.as_deref(), Some("Da Nang"));
        assert!(current.zip_code.is_none());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = r#"{"stateOrProvince":"NSW","zipCode":"2000"}"#;
        let address: Address = serde_json::from_str(json).unwrap();

        assert_eq!(address.state_or_province.as_deref(), Some("NSW"));
        assert_eq!(address.zip_code.as_deref(), Some("2000"));
    }
}
