use intention::{serialized_value, ExtraValue, Parcel, ParcelError, ParcelReader, Parcelable, Value};
use serde::{Deserialize, Serialize};

/// A ticket that travels as a parcel.
#[derive(Debug, Clone, PartialEq)]
pub struct TestParcelable {
    pub id:    u32,
    pub label: String,
}

impl Parcelable for TestParcelable {
    fn write_to_parcel(&self, parcel: &mut Parcel) {
        parcel.write_var_uint(self.id);
        parcel.write_string(&self.label);
    }

    fn create_from_parcel(reader: &mut ParcelReader<'_>) -> Result<Self, ParcelError> {
        Ok(TestParcelable {
            id:    reader.read_var_uint()?,
            label: reader.read_string()?.into_owned(),
        })
    }
}

impl ExtraValue for TestParcelable {
    fn into_value(self) -> Value {
        Value::from_parcelable(&self)
    }
}

/// A payload that travels as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSerializable {
    pub data: String,
}

impl ExtraValue for TestSerializable {
    fn into_value(self) -> Value {
        serialized_value(&self)
    }
}
