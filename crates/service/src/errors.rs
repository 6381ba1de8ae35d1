use serde::Serialize;
use thiserror::Error;

/// Where an invalid value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Body,
    Query,
    Path,
}

/// Machine-readable reason for a field violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    StringType,
    BoolType,
    IntParsing,
    ModelType,
    JsonInvalid,
    StringUnicode,
    ValueError,
}

/// One field-level validation failure, serialized as
/// `{"loc": [...], "msg": "...", "type": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: ViolationKind,
}

impl FieldError {
    pub fn new(location: Location, field: Option<&str>, kind: ViolationKind, msg: impl Into<String>) -> Self {
        let mut loc = vec![location.as_str().to_string()];
        if let Some(f) = field {
            loc.push(f.to_string());
        }
        Self { loc, msg: msg.into(), kind }
    }
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Body => "body",
            Location::Query => "query",
            Location::Path => "path",
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", summarize(.0))]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn item_not_found(item_id: i64) -> Self { Self::NotFound(format!("Item {} not found", item_id)) }

    pub fn invalid(error: FieldError) -> Self { Self::Validation(vec![error]) }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.loc.join("."), e.msg))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_is_literal() {
        assert_eq!(ServiceError::item_not_found(7).to_string(), "Item 7 not found");
        assert_eq!(ServiceError::item_not_found(-1).to_string(), "Item -1 not found");
    }

    #[test]
    fn validation_display_lists_fields() {
        let err = ServiceError::Validation(vec![
            FieldError::new(Location::Body, Some("text"), ViolationKind::Missing, "Field required"),
            FieldError::new(Location::Body, Some("is_done"), ViolationKind::BoolType, "Input should be a valid boolean"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation error: body.text: Field required; body.is_done: Input should be a valid boolean"
        );
    }

    #[test]
    fn kinds_serialize_snake_case() {
        let v = serde_json::to_value([ViolationKind::StringUnicode, ViolationKind::ValueError]).unwrap();
        assert_eq!(v, serde_json::json!(["string_unicode", "value_error"]));
    }

    #[test]
    fn field_error_serializes_with_type_key() {
        let e = FieldError::new(Location::Query, Some("skip"), ViolationKind::IntParsing, "bad");
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v, serde_json::json!({"loc": ["query", "skip"], "msg": "bad", "type": "int_parsing"}));
    }
}
