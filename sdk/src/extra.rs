use intention_schema::{Parcel, Value};
use log::warn;
use serde::Serialize;

/// One payload entry of a [`Request`](crate::Request).
///
/// The variant records which store operation wrote it; list forms are kept
/// apart from scalars so a reader asking for a list never sees a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Extra {
    Scalar(Value),
    IntegerList(Vec<i32>),
    ParcelableList(Vec<Parcel>),
    StringList(Vec<String>),
    CharSequenceList(Vec<String>),
}

impl Extra {
    pub fn kind(&self) -> &'static str {
        match self {
            Extra::Scalar(value) => value.kind(),
            Extra::IntegerList(_) => "integer list",
            Extra::ParcelableList(_) => "parcelable list",
            Extra::StringList(_) => "string list",
            Extra::CharSequenceList(_) => "char sequence list",
        }
    }
}

/// Types accepted by [`Request::put_extra`](crate::Request::put_extra).
///
/// Implement this for payload types; parcelable types usually forward to
/// [`Value::from_parcelable`].
pub trait ExtraValue {
    fn into_value(self) -> Value;
}

macro_rules! impl_extra_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ExtraValue for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_extra_value! {
    bool   => Bool,
    i8     => Byte,
    char   => Char,
    i16    => Short,
    i32    => Int,
    i64    => Long,
    f32    => Float,
    f64    => Double,
    String => String,
    Parcel => Parcel,
    serde_json::Value => Serialized,
}

impl ExtraValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_owned())
    }
}

impl ExtraValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

/// Serializes a serde payload into a [`Value::Serialized`].
///
/// Serializable payload types forward their [`ExtraValue`] impl here. A
/// payload JSON cannot represent is logged and stored as `null`.
pub fn serialized_value<T: Serialize + ?Sized>(payload: &T) -> Value {
    match serde_json::to_value(payload) {
        Ok(json) => Value::Serialized(json),
        Err(err) => {
            warn!("serializable extra could not be encoded: {}", err);
            Value::Serialized(serde_json::Value::Null)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_map_to_matching_values() {
        assert_eq!(7i32.into_value(), Value::Int(7));
        assert_eq!((-1i8).into_value(), Value::Byte(-1));
        assert_eq!('x'.into_value(), Value::Char('x'));
        assert_eq!("s".into_value(), Value::String("s".to_owned()));
        assert_eq!(true.into_value(), Value::Bool(true));
    }

    #[derive(Serialize)]
    struct Note {
        data:  String,
        pages: u32,
    }

    #[test]
    fn serialized_value_keeps_every_field() {
        let value = serialized_value(&Note { data: "test2".into(), pages: 3 });
        assert_eq!(
            value,
            Value::Serialized(serde_json::json!({ "data": "test2", "pages": 3 }))
        );
    }

    #[test]
    fn unrepresentable_payload_becomes_null() {
        let mut map = std::collections::BTreeMap::new();
        map.insert((1, 2), "pair keys are not JSON object keys");
        assert_eq!(serialized_value(&map), Value::Serialized(serde_json::Value::Null));
    }

    #[test]
    fn list_kinds_are_distinct() {
        let strings = Extra::StringList(vec!["a".into()]);
        let sequences = Extra::CharSequenceList(vec!["a".into()]);
        assert_ne!(strings, sequences);
        assert_eq!(sequences.kind(), "char sequence list");
    }
}
