use crate::{
    error::ParcelError,
    parcel::{Parcel, ParcelReader},
};

use std::fmt;

/// A type that can flatten itself into a [`Parcel`] and be rebuilt from one.
///
/// Fields must be read back in the order they were written.
pub trait Parcelable: Sized {
    fn write_to_parcel(&self, parcel: &mut Parcel);

    fn create_from_parcel(reader: &mut ParcelReader<'_>) -> Result<Self, ParcelError>;

    /// Convenience wrapper that writes `self` into a fresh parcel.
    fn to_parcel(&self) -> Parcel {
        let mut parcel = Parcel::new();
        self.write_to_parcel(&mut parcel);
        parcel
    }

    /// Rebuilds a value from a whole parcel, rejecting trailing bytes.
    fn from_parcel(parcel: &Parcel) -> Result<Self, ParcelError> {
        let mut reader = parcel.reader();
        let value = Self::create_from_parcel(&mut reader)?;
        if !reader.is_exhausted() {
            return Err(ParcelError::Invalid(format!(
                "{} trailing bytes",
                parcel.len() - reader.index()
            )));
        }
        Ok(value)
    }
}

/// A single payload value stored under an extra key.
#[derive(Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Parcel(Parcel),
    Serialized(serde_json::Value),
}

impl Value {
    pub fn from_parcelable<T: Parcelable>(value: &T) -> Value {
        Value::Parcel(value.to_parcel())
    }

    /// Name of the variant, used in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Byte(_) => "byte",
            Value::Char(_) => "char",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Parcel(_) => "parcel",
            Value::Serialized(_) => "serialized",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match *self {
            Value::Byte(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match *self {
            Value::Char(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match *self {
            Value::Short(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Value::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match *self {
            Value::Long(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Value::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match *self {
            Value::Double(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match *self {
            Value::String(ref value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_parcel(&self) -> Option<&Parcel> {
        match *self {
            Value::Parcel(ref value) => Some(value),
            _ => None,
        }
    }

    pub fn as_serialized(&self) -> Option<&serde_json::Value> {
        match *self {
            Value::Serialized(ref value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Value::Bool(value) => value.fmt(f),
            Value::Byte(value) => value.fmt(f),
            Value::Char(value) => value.fmt(f),
            Value::Short(value) => value.fmt(f),
            Value::Int(value) => value.fmt(f),
            Value::Long(value) => value.fmt(f),
            Value::Float(value) => value.fmt(f),
            Value::Double(value) => value.fmt(f),
            Value::String(ref value) => value.fmt(f),
            Value::Parcel(ref value) => write!(f, "Parcel({} bytes)", value.len()),
            Value::Serialized(ref value) => write!(f, "{}", value),
        }
    }
}
