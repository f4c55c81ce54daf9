//! Form field mapping between UI inputs and DTO keys.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One form input bound to one DTO key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: &'static str,
    pub key: &'static str,
    /// Blank optional fields are sent as `null`.
    pub optional: bool,
}

impl FieldSpec {
    pub const fn required(field: &'static str, key: &'static str) -> Self {
        Self { field, key, optional: false }
    }

    pub const fn optional(field: &'static str, key: &'static str) -> Self {
        Self { field, key, optional: true }
    }
}

/// Current values of a form, keyed by input name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Missing fields read as blank, like an untouched input.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// JSON request body holding exactly the mapped fields.
    pub fn to_payload(&self, fields: &[FieldSpec]) -> Value {
        let mut body = Map::new();
        for spec in fields {
            let raw = self.value(spec.field);
            let value = if spec.optional && raw.trim().is_empty() {
                Value::Null
            } else {
                Value::String(raw.to_string())
            };
            body.insert(spec.key.to_string(), value);
        }
        Value::Object(body)
    }

    /// Populate every mapped field from a fetched DTO.
    pub fn from_dto(fields: &[FieldSpec], dto: &Value) -> Self {
        let mut form = Self::new();
        for spec in fields {
            let value = match dto.get(spec.key) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            form.set(spec.field, value);
        }
        form
    }

    /// Accept `field=value` or `dto_key=value` pairs, dropping unknown names.
    pub fn from_pairs<'a>(
        fields: &[FieldSpec],
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> (Self, Vec<String>) {
        let mut form = Self::new();
        let mut unknown = Vec::new();
        for (name, value) in pairs {
            match fields.iter().find(|s| s.field == name || s.key == name) {
                Some(spec) => form.set(spec.field, value),
                None => unknown.push(name.to_string()),
            }
        }
        (form, unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::required("name", "name"),
        FieldSpec::required("birth_date", "birth_date"),
        FieldSpec::optional("phone", "phone"),
    ];

    #[test]
    fn test_payload_blank_optional_is_null() {
        let form = FormValues::new().with("name", "An").with("phone", "  ");
        let payload = form.to_payload(FIELDS);

        assert_eq!(payload, json!({ "name": "An", "birth_date": "", "phone": null }));
    }

    #[test]
    fn test_from_dto_fills_every_field() {
        let dto = json!({ "id": "p1", "name": "An", "birth_date": "1990-01-01", "phone": null });
        let form = FormValues::from_dto(FIELDS, &dto);

        assert_eq!(form.value("name"), "An");
        assert_eq!(form.value("birth_date"), "1990-01-01");
        assert_eq!(form.get("phone"), Some(""));
        assert!(form.get("id").is_none());
    }

    #[test]
    fn test_from_pairs_reports_unknown_names() {
        let (form, unknown) =
            FormValues::from_pairs(FIELDS, [("name", "An"), ("nickname", "Bé")]);

        assert_eq!(form.value("name"), "An");
        assert_eq!(unknown, vec!["nickname".to_string()]);
    }
}
