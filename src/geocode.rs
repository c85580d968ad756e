use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Returned whenever no meaningful place name can be determined.
pub const UNKNOWN_LOCATION: &str = "Unknown/Ocean";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GeocodeResult {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub raw: Option<Value>,
}

impl GeocodeResult {
    fn unknown(raw: Option<Value>) -> Self {
        GeocodeResult {
            location: UNKNOWN_LOCATION.to_string(),
            raw,
        }
    }
}

/// Picks a place name from ranked geocoder results. Only the first result
/// is considered.
pub fn resolve_location(results: Vec<Value>) -> GeocodeResult {
    let Some(first) = results.into_iter().next() else {
        return GeocodeResult::unknown(None);
    };

    if is_water(&first) {
        return GeocodeResult::unknown(Some(first));
    }

    match first.get("formatted").and_then(Value::as_str) {
        Some(formatted) => GeocodeResult {
            location: formatted.to_string(),
            raw: Some(first),
        },
        None => GeocodeResult::unknown(Some(first)),
    }
}

fn is_water(result: &Value) -> bool {
    let components = result.get("components");
    let kind = components
        .and_then(|c| c.get("_type"))
        .and_then(Value::as_str);
    if matches!(kind, Some("ocean") | Some("water")) {
        return true;
    }

    if components
        .and_then(|c| c.get("ocean"))
        .is_some_and(is_truthy)
    {
        return true;
    }

    result
        .get("formatted")
        .and_then(Value::as_str)
        .is_some_and(|f| f.to_lowercase().contains("ocean"))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_results_yields_sentinel_without_raw() {
        let result = resolve_location(Vec::new());
        assert_eq!(result.location, UNKNOWN_LOCATION);
        assert!(result.raw.is_none());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "location": "Unknown/Ocean" })
        );
    }

    #[test]
    fn land_result_uses_formatted_name() {
        let first = json!({
            "formatted": "Towanda, PA 18848, United States of America",
            "components": { "_type": "city", "country_code": "us" }
        });
        let result = resolve_location(vec![first.clone(), json!({ "formatted": "ignored" })]);
        assert_eq!(result.location, "Towanda, PA 18848, United States of America");
        assert_eq!(result.raw, Some(first));
    }

    #[test]
    fn ocean_in_formatted_string_is_case_insensitive() {
        let first = json!({
            "formatted": "North ATLANTIC OCEAN",
            "components": { "_type": "body_of_water" }
        });
        let result = resolve_location(vec![first.clone()]);
        assert_eq!(result.location, UNKNOWN_LOCATION);
        assert_eq!(result.raw, Some(first));
    }

    #[test]
    fn water_and_ocean_types_are_unknown() {
        for kind in ["ocean", "water"] {
            let first = json!({
                "formatted": "Somewhere",
                "components": { "_type": kind }
            });
            assert_eq!(resolve_location(vec![first]).location, UNKNOWN_LOCATION);
        }
    }

    #[test]
    fn ocean_attribute_marks_result_as_water() {
        let first = json!({
            "formatted": "Gulf of Guinea",
            "components": { "_type": "body_of_water", "ocean": "Atlantic" }
        });
        assert_eq!(resolve_location(vec![first]).location, UNKNOWN_LOCATION);
    }

    #[test]
    fn result_without_formatted_name_is_unknown() {
        let first = json!({ "components": { "_type": "city" } });
        let result = resolve_location(vec![first.clone()]);
        assert_eq!(result.location, UNKNOWN_LOCATION);
        assert_eq!(result.raw, Some(first));
    }
}
