//! Wire envelopes for the remote platform's JSON API
//!
//! Reads go through `response.<entity>`; writes wrap the entity under its
//! singular name. Only the fields this client depends on are modelled.

use adops_domain::constants::CITY_ACTION_INCLUDE;
use adops_domain::{AdOpsError, City, CityTargetList, Pixel, ProfileId, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::InfraError;

/// Decode `value` into `T`, naming `what` in the error.
pub fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|err| match AdOpsError::from(InfraError::from(err)) {
        AdOpsError::MalformedResponse(detail) => {
            AdOpsError::MalformedResponse(format!("{what}: {detail}"))
        }
        other => other,
    })
}

/// String field read at the top level, then under `response`.
pub fn top_level_or_response(value: &Value, field: &str) -> Option<String> {
    let raw = value.get(field).or_else(|| value.get("response").and_then(|r| r.get(field)))?;
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub auth: AuthCredentials<'a>,
}

#[derive(Debug, Serialize)]
pub struct AuthCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CityResponse {
    pub cities: Vec<City>,
}

#[derive(Debug, Deserialize)]
pub struct InsertionOrderResponse {
    #[serde(rename = "insertion-order")]
    pub insertion_order: InsertionOrderBody,
}

#[derive(Debug, Deserialize)]
pub struct InsertionOrderBody {
    #[serde(default)]
    pub line_items: Option<Vec<IdRef>>,
}

#[derive(Debug, Deserialize)]
pub struct IdRef {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct LineItemResponse {
    #[serde(rename = "line-item")]
    pub line_item: LineItemBody,
}

#[derive(Debug, Deserialize)]
pub struct LineItemBody {
    #[serde(default)]
    pub profile_id: Option<ProfileId>,
    #[serde(default)]
    pub pixels: Option<Vec<Pixel>>,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdate<'a> {
    pub profile: ProfileCities<'a>,
}

#[derive(Debug, Serialize)]
pub struct ProfileCities<'a> {
    pub id: ProfileId,
    pub city_targets: &'a CityTargetList,
    pub city_action: &'static str,
}

impl<'a> ProfileUpdate<'a> {
    pub fn include(id: ProfileId, cities: &'a CityTargetList) -> Self {
        Self { profile: ProfileCities { id, city_targets: cities, city_action: CITY_ACTION_INCLUDE } }
    }
}

#[derive(Debug, Serialize)]
pub struct LineItemPixelsUpdate<'a> {
    #[serde(rename = "line-item")]
    pub line_item: LineItemPixels<'a>,
}

#[derive(Debug, Serialize)]
pub struct LineItemPixels<'a> {
    pub id: u64,
    pub pixels: &'a [Pixel],
}

#[cfg(test)]
mod tests {
    use adops_domain::CityTarget;
    use serde_json::json;

    use super::*;

    #[test]
    fn profile_update_uses_include_action() {
        let cities = CityTargetList::try_from(vec![CityTarget { id: 3, name: "Lyon".into() }])
            .expect("non-empty");
        let body = serde_json::to_value(ProfileUpdate::include(17, &cities)).expect("json");
        assert_eq!(
            body,
            json!({"profile": {"id": 17, "city_targets": [{"id": 3, "name": "Lyon"}], "city_action": "include"}})
        );
    }

    #[test]
    fn report_fields_fall_back_to_response_envelope() {
        assert_eq!(top_level_or_response(&json!({"report_id": "abc"}), "report_id"), Some("abc".into()));
        assert_eq!(
            top_level_or_response(&json!({"response": {"report_id": "def"}}), "report_id"),
            Some("def".into())
        );
        assert_eq!(top_level_or_response(&json!({"response": {}}), "report_id"), None);
    }

    #[test]
    fn decode_names_the_entity_on_failure() {
        let err = decode::<Envelope<CityResponse>>(json!({"response": {}}), "city list").unwrap_err();
        match err {
            AdOpsError::MalformedResponse(msg) => assert!(msg.starts_with("city list:")),
            other => panic!("expected malformed response, got {:?}", other),
        }
    }
}
