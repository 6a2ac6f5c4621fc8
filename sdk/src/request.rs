use std::collections::BTreeMap;

use intention_schema::{Parcelable, Value};
use log::trace;
use serde::de::DeserializeOwned;

use crate::{
    context::{Context, Destination},
    error::ExtraError,
    extra::{Extra, ExtraValue},
};

/// A navigation request: where it came from, where it goes, and a keyed
/// payload.
///
/// Storing under a key that is already present replaces the earlier entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    origin:      String,
    destination: Destination,
    extras:      BTreeMap<String, Extra>,
}

impl Request {
    pub fn new(context: &Context, destination: Destination) -> Request {
        Request {
            origin: context.package().to_owned(),
            destination,
            extras: BTreeMap::new(),
        }
    }

    /// Package of the context the request was built from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn put_extra<V: ExtraValue>(&mut self, key: &str, value: V) -> &mut Self {
        self.insert(key, Extra::Scalar(value.into_value()))
    }

    pub fn put_integer_array_list_extra(
        &mut self,
        key: &str,
        value: impl IntoIterator<Item = i32>,
    ) -> &mut Self {
        self.insert(key, Extra::IntegerList(value.into_iter().collect()))
    }

    pub fn put_parcelable_array_list_extra<T: Parcelable>(
        &mut self,
        key: &str,
        value: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        let parcels = value.into_iter().map(|item| item.to_parcel()).collect();
        self.insert(key, Extra::ParcelableList(parcels))
    }

    pub fn put_string_array_list_extra<S: Into<String>>(
        &mut self,
        key: &str,
        value: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.insert(key, Extra::StringList(value.into_iter().map(Into::into).collect()))
    }

    pub fn put_char_sequence_array_list_extra<S: Into<String>>(
        &mut self,
        key: &str,
        value: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.insert(
            key,
            Extra::CharSequenceList(value.into_iter().map(Into::into).collect()),
        )
    }

    fn insert(&mut self, key: &str, extra: Extra) -> &mut Self {
        trace!("put {} extra {:?}", extra.kind(), key);
        self.extras.insert(key.to_owned(), extra);
        self
    }

    pub fn has_extra(&self, key: &str) -> bool {
        self.extras.contains_key(key)
    }

    pub fn get_extra(&self, key: &str) -> Option<&Extra> {
        self.extras.get(key)
    }

    /// Iterates the payload in key order.
    pub fn extras(&self) -> impl Iterator<Item = (&str, &Extra)> {
        self.extras.iter().map(|(key, extra)| (key.as_str(), extra))
    }

    pub fn extra_count(&self) -> usize {
        self.extras.len()
    }

    pub fn get_value(&self, key: &str) -> Option<&Value> {
        match self.extras.get(key) {
            Some(Extra::Scalar(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns `default` when the key is absent or not an int.
    pub fn get_int_extra(&self, key: &str, default: i32) -> i32 {
        self.get_value(key).and_then(Value::as_int).unwrap_or(default)
    }

    pub fn get_string_extra(&self, key: &str) -> Option<&str> {
        self.get_value(key).and_then(Value::as_string)
    }

    pub fn get_integer_array_list_extra(&self, key: &str) -> Option<&[i32]> {
        match self.extras.get(key) {
            Some(Extra::IntegerList(values)) => Some(values),
            _ => None,
        }
    }

    pub fn get_string_array_list_extra(&self, key: &str) -> Option<&[String]> {
        match self.extras.get(key) {
            Some(Extra::StringList(values)) => Some(values),
            _ => None,
        }
    }

    pub fn get_char_sequence_array_list_extra(&self, key: &str) -> Option<&[String]> {
        match self.extras.get(key) {
            Some(Extra::CharSequenceList(values)) => Some(values),
            _ => None,
        }
    }

    pub fn get_parcelable_extra<T: Parcelable>(&self, key: &str) -> Result<Option<T>, ExtraError> {
        let extra = match self.extras.get(key) {
            Some(extra) => extra,
            None => return Ok(None),
        };
        match extra {
            Extra::Scalar(Value::Parcel(parcel)) => T::from_parcel(parcel)
                .map(Some)
                .map_err(|source| ExtraError::Parcel { key: key.to_owned(), source }),
            other => Err(mismatch(key, "parcel", other)),
        }
    }

    pub fn get_parcelable_array_list_extra<T: Parcelable>(
        &self,
        key: &str,
    ) -> Result<Option<Vec<T>>, ExtraError> {
        let extra = match self.extras.get(key) {
            Some(extra) => extra,
            None => return Ok(None),
        };
        match extra {
            Extra::ParcelableList(parcels) => parcels
                .iter()
                .map(T::from_parcel)
                .collect::<Result<Vec<T>, _>>()
                .map(Some)
                .map_err(|source| ExtraError::Parcel { key: key.to_owned(), source }),
            other => Err(mismatch(key, "parcelable list", other)),
        }
    }

    pub fn get_serializable_extra<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, ExtraError> {
        let extra = match self.extras.get(key) {
            Some(extra) => extra,
            None => return Ok(None),
        };
        match extra {
            Extra::Scalar(Value::Serialized(json)) => serde_json::from_value(json.clone())
                .map(Some)
                .map_err(|source| ExtraError::Serialized { key: key.to_owned(), source }),
            other => Err(mismatch(key, "serialized", other)),
        }
    }
}

fn mismatch(key: &str, expected: &'static str, found: &Extra) -> ExtraError {
    ExtraError::TypeMismatch {
        key: key.to_owned(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intention_schema::{Parcel, ParcelError, ParcelReader};
    use serde::Deserialize;

    #[derive(Debug, PartialEq)]
    struct Ticket(u32);

    impl Parcelable for Ticket {
        fn write_to_parcel(&self, parcel: &mut Parcel) {
            parcel.write_var_uint(self.0);
        }

        fn create_from_parcel(reader: &mut ParcelReader<'_>) -> Result<Self, ParcelError> {
            Ok(Ticket(reader.read_var_uint()?))
        }
    }

    fn request() -> Request {
        Request::new(&Context::new("app"), Destination::new("app::screens", "Detail"))
    }

    #[test]
    fn records_origin_and_destination() {
        let request = request();
        assert_eq!(request.origin(), "app");
        assert_eq!(request.destination().name(), "Detail");
        assert_eq!(request.extra_count(), 0);
    }

    #[test]
    fn later_store_overwrites_same_key() {
        let mut request = request();
        request.put_extra("k", 1).put_extra("k", "two");
        assert_eq!(request.extra_count(), 1);
        assert_eq!(request.get_string_extra("k"), Some("two"));
        assert_eq!(request.get_int_extra("k", -1), -1);
    }

    #[test]
    fn list_stores_are_read_by_kind() {
        let mut request = request();
        request
            .put_integer_array_list_extra("ints", vec![1, 2, 3])
            .put_string_array_list_extra("names", vec!["a", "b"])
            .put_char_sequence_array_list_extra("labels", vec![String::from("c")]);

        assert_eq!(request.get_integer_array_list_extra("ints"), Some(&[1, 2, 3][..]));
        assert_eq!(request.get_string_array_list_extra("names").map(|v| v.len()), Some(2));
        assert_eq!(request.get_string_array_list_extra("labels"), None);
        assert_eq!(
            request.get_char_sequence_array_list_extra("labels"),
            Some(&[String::from("c")][..])
        );
    }

    #[test]
    fn parcelables_round_trip_through_the_payload() {
        let mut request = request();
        request.put_extra("one", Value::from_parcelable(&Ticket(5)));
        request.put_parcelable_array_list_extra("many", vec![Ticket(1), Ticket(2)]);

        assert_eq!(request.get_parcelable_extra::<Ticket>("one").unwrap(), Some(Ticket(5)));
        assert_eq!(
            request.get_parcelable_array_list_extra::<Ticket>("many").unwrap(),
            Some(vec![Ticket(1), Ticket(2)])
        );
        assert_eq!(request.get_parcelable_extra::<Ticket>("missing").unwrap(), None);
    }

    #[test]
    fn serialized_extra_deserializes_on_read() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Note {
            data: String,
        }

        let mut request = request();
        request.put_extra("note", serde_json::json!({ "data": "test2" }));
        request.put_extra("count", 3);

        let note: Option<Note> = request.get_serializable_extra("note").unwrap();
        assert_eq!(note, Some(Note { data: "test2".into() }));

        let err = request.get_serializable_extra::<Note>("count").unwrap_err();
        assert!(matches!(err, ExtraError::TypeMismatch { expected: "serialized", found: "int", .. }));
    }
}
