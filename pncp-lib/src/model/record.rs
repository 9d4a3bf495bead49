//! Dynamic search record

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::FieldError;

/// A single item returned by the PNCP search endpoint.
///
/// Records hold field values as an ordered JSON map. Fields the server sends
/// are kept as-is and in the order they arrived, so a record serializes back
/// to the same object it was read from.
///
/// # Example
///
/// ```
/// use pncp_lib::model::Record;
///
/// let record = Record::new()
///     .set("orgao_nome", "Prefeitura de Recife")
///     .set("valor_global", 1_500_000.0);
///
/// assert_eq!(record.get_string("orgao_nome").unwrap(), Some("Prefeitura de Recife"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the field names in server order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", type_name(other))),
        }
    }

    /// Gets an integer field value.
    pub fn get_i64(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(field, "integer", "float")),
            Some(other) => Err(FieldError::type_mismatch(field, "integer", type_name(other))),
        }
    }

    /// Gets a floating point field value. Integers are widened.
    pub fn get_f64(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(other) => Err(FieldError::type_mismatch(field, "number", type_name(other))),
        }
    }

    /// Returns the field as text if it is a non-empty string.
    ///
    /// Missing, null, empty and non-string values all yield `None`.
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Returns a short name for the JSON type of a value.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_preserves_field_order() {
        let json = r#"{"uf": "PE", "orgao_nome": "Recife", "ano_contrato": 2023}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        let names: Vec<_> = record.field_names().collect();
        assert_eq!(names, ["uf", "orgao_nome", "ano_contrato"]);
    }

    #[test]
    fn test_serialize_passes_fields_through() {
        let json = r#"{"id":"abc","nested":{"a":[1,2]},"valor_global":null}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(serde_json::to_string(&record).unwrap(), json);
    }

    #[test]
    fn test_get_string_contract() {
        let record = Record::new()
            .set("name", "Contoso")
            .set("empty", Value::Null)
            .set("count", 3);

        assert_eq!(record.get_string("name").unwrap(), Some("Contoso"));
        assert_eq!(record.get_string("empty").unwrap(), None);
        assert_eq!(
            record.get_string("missing").unwrap_err(),
            FieldError::missing("missing")
        );
        assert_eq!(
            record.get_string("count").unwrap_err(),
            FieldError::type_mismatch("count", "string", "number")
        );
    }

    #[test]
    fn test_numeric_getters() {
        let record = Record::new().set("int", 7).set("float", 2.5);

        assert_eq!(record.get_i64("int").unwrap(), Some(7));
        assert_eq!(record.get_f64("int").unwrap(), Some(7.0));
        assert_eq!(record.get_f64("float").unwrap(), Some(2.5));
        assert!(record.get_i64("float").is_err());
    }

    #[test]
    fn test_text_is_lenient() {
        let record = Record::new()
            .set("uf", "SP")
            .set("blank", "")
            .set("number", 1)
            .set("null", Value::Null);

        assert_eq!(record.text("uf"), Some("SP"));
        assert_eq!(record.text("blank"), None);
        assert_eq!(record.text("number"), None);
        assert_eq!(record.text("null"), None);
        assert_eq!(record.text("missing"), None);
    }
}
