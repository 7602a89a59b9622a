//! Client model of the clusters management API.
//!
//! Every model type records which of its attributes were explicitly set, so
//! that "absent" and "present with the default value" stay distinct through
//! builders and through the streaming JSON codec.

#[macro_use]
mod macros;

pub mod clustersmgmt;
pub mod codec;
mod error;

pub use codec::{
    marshal, marshal_list, marshal_with, to_string, to_vec, unmarshal, unmarshal_list, unmarshal_partial,
    unmarshal_stream, unmarshal_stream_partial, FieldSet, MarshalOptions, Model, ObjectList, ObjectListBuilder, Partial,
    Source,
};
pub use error::{Error, FieldError, FieldErrorReason};

#[doc(hidden)]
pub mod __private {
    pub use paste;
    pub use serde;
}
