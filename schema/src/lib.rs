//! Payload values carried by Intention requests.
//!
//! Scalars, strings and JSON documents are stored directly in a [`Value`].
//! Richer types implement [`Parcelable`] and are flattened into a [`Parcel`]:
//!
//! ```
//! use intention_schema::*;
//!
//! struct Tag(String);
//!
//! impl Parcelable for Tag {
//!     fn write_to_parcel(&self, parcel: &mut Parcel) {
//!         parcel.write_string(&self.0);
//!     }
//!
//!     fn create_from_parcel(reader: &mut ParcelReader<'_>) -> Result<Self, ParcelError> {
//!         Ok(Tag(reader.read_string()?.into_owned()))
//!     }
//! }
//!
//! let value = Value::from_parcelable(&Tag("pizza".to_owned()));
//! assert_eq!(value.as_parcel().unwrap().as_bytes(), b"pizza\0");
//! ```

pub mod error;
pub mod parcel;
pub mod value;

pub use error::*;
pub use parcel::*;
pub use value::*;
