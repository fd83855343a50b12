//! Request schema for create/update payloads.
//!
//! The field table is checked structurally (presence, then JSON type) before
//! the object is deserialized into [`BookInput`], so a rejection always names
//! the offending field.

use serde_json::Value;

use super::error::{CatalogError, CatalogResult};
use super::models::BookInput;

/// Fields of the create/update payload, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Name,
    Year,
    Author,
    Summary,
    Publisher,
    PageCount,
    ReadPage,
    Reading,
}

/// Primitive type a payload field must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    NonNegativeInteger,
    Boolean,
}

impl BookField {
    pub const ALL: [BookField; 8] = [
        BookField::Name,
        BookField::Year,
        BookField::Author,
        BookField::Summary,
        BookField::Publisher,
        BookField::PageCount,
        BookField::ReadPage,
        BookField::Reading,
    ];

    /// JSON key of the field
    pub fn key(self) -> &'static str {
        match self {
            BookField::Name => "name",
            BookField::Year => "year",
            BookField::Author => "author",
            BookField::Summary => "summary",
            BookField::Publisher => "publisher",
            BookField::PageCount => "pageCount",
            BookField::ReadPage => "readPage",
            BookField::Reading => "reading",
        }
    }

    pub fn expected(self) -> FieldType {
        match self {
            BookField::Name
            | BookField::Author
            | BookField::Summary
            | BookField::Publisher => FieldType::Text,
            BookField::Year => FieldType::Integer,
            BookField::PageCount | BookField::ReadPage => FieldType::NonNegativeInteger,
            BookField::Reading => FieldType::Boolean,
        }
    }
}

impl FieldType {
    /// Whether `value` fits the Rust type backing this field
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldType::Text => value.is_string(),
            FieldType::Integer => value.as_i64().is_some_and(|n| i32::try_from(n).is_ok()),
            FieldType::NonNegativeInteger => {
                value.as_u64().is_some_and(|n| u32::try_from(n).is_ok())
            }
            FieldType::Boolean => value.is_boolean(),
        }
    }
}

/// Validate a raw JSON payload and convert it into a typed [`BookInput`].
///
/// Every field is checked for presence before any type is checked. `null`
/// counts as absent; unknown keys are ignored.
pub fn parse_book_input(payload: Value) -> CatalogResult<BookInput> {
    let Value::Object(object) = payload else {
        return Err(CatalogError::InvalidPayload(format!(
            "expected object, got {}",
            json_type_name(&payload)
        )));
    };

    if let Some(field) = BookField::ALL
        .into_iter()
        .find(|field| object.get(field.key()).map_or(true, Value::is_null))
    {
        return Err(CatalogError::MissingField(field));
    }

    if let Some(field) = BookField::ALL
        .into_iter()
        .find(|field| !field.expected().accepts(&object[field.key()]))
    {
        return Err(CatalogError::TypeMismatch {
            field,
            expected: field.expected(),
        });
    }

    // The table above guarantees every field fits, so a failure here is a
    // schema bug rather than a client error.
    serde_json::from_value(Value::Object(object))
        .map_err(|err| CatalogError::Internal(anyhow::Error::new(err).context("book schema drift")))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::error::ErrorKind;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "name": "Laskar Pelangi",
            "year": 2005,
            "author": "Andrea Hirata",
            "summary": "Kisah sepuluh anak Belitung",
            "publisher": "Bentang Pustaka",
            "pageCount": 529,
            "readPage": 120,
            "reading": true
        })
    }

    #[test]
    fn parses_complete_payload() {
        let input = parse_book_input(payload()).unwrap();

        assert_eq!(input.name, "Laskar Pelangi");
        assert_eq!(input.year, 2005);
        assert_eq!(input.page_count, 529);
        assert_eq!(input.read_page, 120);
        assert!(input.reading);
    }

    #[test]
    fn ignores_unknown_and_server_owned_keys() {
        let mut body = payload();
        body["id"] = json!("client-chosen");
        body["finished"] = json!(true);
        body["rating"] = json!(5);

        assert!(parse_book_input(body).is_ok());
    }

    #[test]
    fn each_missing_field_is_named() {
        for field in BookField::ALL {
            let mut body = payload();
            body.as_object_mut().unwrap().remove(field.key());

            match parse_book_input(body) {
                Err(CatalogError::MissingField(missing)) => assert_eq!(missing, field),
                other => panic!("expected MissingField({:?}), got {:?}", field, other),
            }
        }
    }

    #[test]
    fn null_counts_as_missing() {
        let mut body = payload();
        body["author"] = Value::Null;

        assert!(matches!(
            parse_book_input(body),
            Err(CatalogError::MissingField(BookField::Author))
        ));
    }

    #[test]
    fn presence_is_checked_before_type() {
        let mut body = payload();
        body["name"] = json!(42);
        body.as_object_mut().unwrap().remove("reading");

        assert!(matches!(
            parse_book_input(body),
            Err(CatalogError::MissingField(BookField::Reading))
        ));
    }

    #[test]
    fn type_mismatch_names_field_and_type() {
        let cases = [
            ("name", json!(7), BookField::Name, FieldType::Text),
            ("year", json!("2005"), BookField::Year, FieldType::Integer),
            ("year", json!(2005.5), BookField::Year, FieldType::Integer),
            (
                "pageCount",
                json!(-1),
                BookField::PageCount,
                FieldType::NonNegativeInteger,
            ),
            ("reading", json!("yes"), BookField::Reading, FieldType::Boolean),
        ];

        for (key, value, field, expected) in cases {
            let mut body = payload();
            body[key] = value;

            match parse_book_input(body) {
                Err(CatalogError::TypeMismatch {
                    field: f,
                    expected: e,
                }) => {
                    assert_eq!(f, field);
                    assert_eq!(e, expected);
                }
                other => panic!("expected TypeMismatch for {}, got {:?}", key, other),
            }
        }
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = parse_book_input(json!(["Laskar Pelangi"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPayload);
    }
}
