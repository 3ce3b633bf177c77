//! Wire records for stored values and field definitions.
//!
//! The engine never interprets these beyond encode/decode: data entries and
//! definition records hold the length-delimited tagged bytes produced here,
//! and compatibility across versions is the codec's concern, not the key
//! schema's.

use prost::Message;

/// The value blob stored under a data key. Exactly one of the slots is set
/// for a well-formed value; an all-empty record decodes but carries nothing.
#[derive(Clone, PartialEq, Message)]
pub struct FieldValue {
    #[prost(string, optional, tag = "1")]
    pub string_value: Option<String>,
    #[prost(double, optional, tag = "2")]
    pub double_value: Option<f64>,
    #[prost(bool, optional, tag = "3")]
    pub bool_value: Option<bool>,
    #[prost(int64, optional, tag = "4")]
    pub int64_value: Option<i64>,
}

impl FieldValue {
    pub fn double(v: f64) -> Self {
        FieldValue {
            double_value: Some(v),
            ..Default::default()
        }
    }

    pub fn int64(v: i64) -> Self {
        FieldValue {
            int64_value: Some(v),
            ..Default::default()
        }
    }

    pub fn boolean(v: bool) -> Self {
        FieldValue {
            bool_value: Some(v),
            ..Default::default()
        }
    }

    pub fn string(v: impl Into<String>) -> Self {
        FieldValue {
            string_value: Some(v.into()),
            ..Default::default()
        }
    }
}

/// The schema record stored once per field, under the definition prefix.
#[derive(Clone, PartialEq, Message)]
pub struct FieldDefinition {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(enumeration = "FieldType", tag = "2")]
    pub field_type: i32,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        FieldDefinition {
            name: name.into(),
            field_type: field_type as i32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum FieldType {
    Double = 0,
    Int64 = 1,
    Bool = 2,
    String = 3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn field_value_round_trip() {
        let value = FieldValue::double(42.5);
        let bytes = value.encode_to_vec();
        let decoded = FieldValue::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(decoded.double_value, Some(42.5));
        assert_eq!(decoded.string_value, None);
    }

    #[test]
    fn field_definition_round_trip() {
        let def = FieldDefinition::new("value", FieldType::Double);
        let bytes = def.encode_to_vec();
        let decoded = FieldDefinition::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, def);
        assert_eq!(decoded.field_type(), FieldType::Double);
    }

    #[test]
    fn truncated_value_fails_to_decode() {
        let bytes = FieldValue::string("hello").encode_to_vec();
        assert!(FieldValue::decode(&bytes[..bytes.len() - 2]).is_err());
    }
}
