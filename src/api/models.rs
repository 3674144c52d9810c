//! JSON records returned by `getCountries` and `getActiveActivations`.

use serde::{Deserialize, Deserializer, Serialize};

/// Country record from `getCountries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Service-side country id, used as `country` in number requests.
    pub id: u32,
    /// Russian name.
    pub rus: String,
    /// English name.
    pub eng: String,
    /// Chinese name.
    pub chn: String,
    #[serde(deserialize_with = "bool_or_int")]
    pub visible: bool,
    /// Whether a repeated SMS can be requested.
    #[serde(deserialize_with = "bool_or_int")]
    pub retry: bool,
    /// Whether numbers can be rented.
    #[serde(deserialize_with = "bool_or_int")]
    pub rent: bool,
    /// Whether multi-service activations are supported.
    #[serde(deserialize_with = "bool_or_int")]
    pub multi_service: bool,
}

/// Country flags arrive either as JSON booleans or as 0/1 integers.
fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Int(i64),
        Bool(bool),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Int(value) => Ok(value != 0),
        Flag::Bool(value) => Ok(value),
    }
}

/// One entry of `getActiveActivations`.
///
/// Every field is kept as the string the service sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveActivation {
    pub activation_id: String,
    pub service_code: String,
    pub phone_number: String,
    pub activation_cost: String,
    pub activation_status: String,
    pub sms_code: Option<String>,
    pub sms_text: Option<String>,
    pub activation_time: String,
    pub discount: String,
    pub repeated: String,
    pub country_code: String,
    pub country_name: String,
    pub can_get_another_sms: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country_json(flag: &str) -> String {
        format!(
            r#"{{"id": 0, "rus": "Россия", "eng": "Russia", "chn": "俄罗斯",
                "visible": {flag}, "retry": {flag}, "rent": {flag}, "multiService": {flag}}}"#
        )
    }

    #[test]
    fn test_country_flags_accept_int_and_bool() {
        let from_int: Country = serde_json::from_str(&country_json("1")).unwrap();
        let from_bool: Country = serde_json::from_str(&country_json("true")).unwrap();

        assert_eq!(from_int, from_bool);
        assert!(from_int.visible);
        assert!(from_int.multi_service);
    }

    #[test]
    fn test_country_flags_zero_is_false() {
        let from_int: Country = serde_json::from_str(&country_json("0")).unwrap();
        let from_bool: Country = serde_json::from_str(&country_json("false")).unwrap();

        assert_eq!(from_int, from_bool);
        assert!(!from_int.visible);
        assert!(!from_int.rent);
    }

    #[test]
    fn test_country_nonzero_int_is_true() {
        let country: Country = serde_json::from_str(&country_json("2")).unwrap();
        assert!(country.retry);
    }

    #[test]
    fn test_country_flag_rejects_other_types() {
        assert!(serde_json::from_str::<Country>(&country_json("\"1\"")).is_err());
        assert!(serde_json::from_str::<Country>(&country_json("null")).is_err());
    }

    #[test]
    fn test_active_activation_deserialization() {
        let json = r#"{
            "activationId": "635468024",
            "serviceCode": "tg",
            "phoneNumber": "79001234567",
            "activationCost": "12.50",
            "activationStatus": "2",
            "smsCode": null,
            "smsText": null,
            "activationTime": "2023-03-24 12:00:00",
            "discount": "0.00",
            "repeated": "0",
            "countryCode": "0",
            "countryName": "Russia",
            "canGetAnotherSms": "1"
        }"#;

        let activation: ActiveActivation = serde_json::from_str(json).unwrap();
        assert_eq!(activation.activation_id, "635468024");
        assert_eq!(activation.service_code, "tg");
        assert!(activation.sms_code.is_none());
    }
}
