use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{FieldError, Location, ServiceError, ViolationKind};

/// Stored item.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub text: String,
    pub is_done: bool,
}

/// Creation input: `is_done` is optional and defaults to `false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewItem {
    pub text: String,
    pub is_done: Option<bool>,
}

impl NewItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_done: None }
    }

    pub fn done(mut self, is_done: bool) -> Self {
        self.is_done = Some(is_done);
        self
    }

    /// Validate a decoded JSON body. `text` must be a string and `is_done`,
    /// when present, a boolean; unknown keys are ignored. All violations are
    /// reported together.
    pub fn from_json(body: &Value) -> Result<Self, ServiceError> {
        let obj = body.as_object().ok_or_else(|| {
            ServiceError::invalid(FieldError::new(
                Location::Body,
                None,
                ViolationKind::ModelType,
                "Input should be a valid dictionary or object to extract fields from",
            ))
        })?;

        let mut errors = Vec::new();

        let text = match obj.get("text") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(FieldError::new(
                    Location::Body,
                    Some("text"),
                    ViolationKind::StringType,
                    "Input should be a valid string",
                ));
                None
            }
            None => {
                errors.push(FieldError::new(Location::Body, Some("text"), ViolationKind::Missing, "Field required"));
                None
            }
        };

        let is_done = match obj.get("is_done") {
            None => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                errors.push(FieldError::new(
                    Location::Body,
                    Some("is_done"),
                    ViolationKind::BoolType,
                    "Input should be a valid boolean",
                ));
                None
            }
        };

        match text {
            Some(text) if errors.is_empty() => Ok(Self { text, is_done }),
            _ => Err(ServiceError::Validation(errors)),
        }
    }
}

impl From<NewItem> for Item {
    fn from(input: NewItem) -> Self {
        Self { text: input.text, is_done: input.is_done.unwrap_or(false) }
    }
}

/// Parse the `{item_id}` path segment as a signed position.
pub fn parse_position(raw: &str) -> Result<i64, ServiceError> {
    raw.parse::<i64>().map_err(|_| {
        ServiceError::invalid(FieldError::new(
            Location::Path,
            Some("item_id"),
            ViolationKind::IntParsing,
            "Input should be a valid integer, unable to parse string as an integer",
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violations(err: ServiceError) -> Vec<(String, ViolationKind)> {
        match err {
            ServiceError::Validation(errors) => errors.into_iter().map(|e| (e.loc.join("."), e.kind)).collect(),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn text_only_defaults_is_done() {
        let input = NewItem::from_json(&json!({"text": "buy milk"})).unwrap();
        assert_eq!(input, NewItem::new("buy milk"));
        assert_eq!(Item::from(input), Item { text: "buy milk".into(), is_done: false });
    }

    #[test]
    fn explicit_is_done_kept() {
        let input = NewItem::from_json(&json!({"text": "x", "is_done": true})).unwrap();
        assert_eq!(Item::from(input), Item { text: "x".into(), is_done: true });
    }

    #[test]
    fn empty_text_and_extra_keys_accepted() {
        let input = NewItem::from_json(&json!({"text": "", "priority": 3})).unwrap();
        assert_eq!(input.text, "");
    }

    #[test]
    fn missing_text_rejected() {
        let v = violations(NewItem::from_json(&json!({"is_done": true})).unwrap_err());
        assert_eq!(v, vec![("body.text".to_string(), ViolationKind::Missing)]);
    }

    #[test]
    fn non_string_text_rejected() {
        let v = violations(NewItem::from_json(&json!({"text": 42})).unwrap_err());
        assert_eq!(v, vec![("body.text".to_string(), ViolationKind::StringType)]);
    }

    #[test]
    fn null_is_done_rejected_alongside_text() {
        let v = violations(NewItem::from_json(&json!({"text": null, "is_done": null})).unwrap_err());
        assert_eq!(
            v,
            vec![
                ("body.text".to_string(), ViolationKind::StringType),
                ("body.is_done".to_string(), ViolationKind::BoolType),
            ]
        );
    }

    #[test]
    fn non_object_body_rejected() {
        let v = violations(NewItem::from_json(&json!(["text"])).unwrap_err());
        assert_eq!(v, vec![("body".to_string(), ViolationKind::ModelType)]);
    }

    #[test]
    fn item_wire_shape() {
        let v = serde_json::to_value(Item { text: "a".into(), is_done: false }).unwrap();
        assert_eq!(v, json!({"text": "a", "is_done": false}));
    }

    #[test]
    fn positions_parse_signed() {
        assert_eq!(parse_position("0").unwrap(), 0);
        assert_eq!(parse_position("-3").unwrap(), -3);
        let v = violations(parse_position("abc").unwrap_err());
        assert_eq!(v, vec![("path.item_id".to_string(), ViolationKind::IntParsing)]);
    }
}
