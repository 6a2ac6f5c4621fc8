//! intention
//!
//! Runtime support for routers generated by `intention-compiler`.
//!
//! - [`Context`] and [`Destination`], the two inputs of every request
//! - [`Request`] with one store operation per extra kind
//! - [`ExtraValue`] for scalar payloads, re-exported payload [`Value`]s and
//!   [`Parcelable`] support from `intention-schema`
//!
//! ```
//! use intention::{Context, Destination, Request};
//!
//! let mut request = Request::new(&Context::new("app"), Destination::new("app", "Detail"));
//! request.put_extra("id", 42).put_string_array_list_extra("tags", vec!["a", "b"]);
//! assert_eq!(request.get_int_extra("id", 0), 42);
//! ```

pub mod context;
pub mod error;
pub mod extra;
pub mod request;

pub use context::{Context, Destination};
pub use error::ExtraError;
pub use extra::{serialized_value, Extra, ExtraValue};
pub use request::Request;

pub use intention_schema::{Parcel, ParcelError, ParcelReader, Parcelable, Value};

pub mod schema {
    pub use intention_schema::*;
}
