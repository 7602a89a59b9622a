//! Presence-tracked models and their streaming JSON codec.
//!
//! A model stores its attribute values next to a [`FieldSet`] telling which
//! of them were explicitly assigned. The writer emits only those, in declared
//! order; the reader sets a bit for every attribute found in the input and
//! skips the keys it doesn't know.

// Visits of the JSON shapes a composite decoder doesn't accept: the value is
// consumed and reported, and reads as absent.
macro_rules! reject_shapes {
    ($expected:literal) => {
        fn visit_bool<E: serde::de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(self.ctx.reject($expected, "boolean"))
        }

        fn visit_i64<E: serde::de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(self.ctx.reject($expected, "number"))
        }

        fn visit_u64<E: serde::de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(self.ctx.reject($expected, "number"))
        }

        fn visit_f64<E: serde::de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(self.ctx.reject($expected, "number"))
        }

        fn visit_str<E: serde::de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok(self.ctx.reject($expected, "string"))
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    };
    ($expected:literal, seq) => {
        reject_shapes!($expected);

        fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
            Ok(self.ctx.reject($expected, "array"))
        }
    };
    ($expected:literal, map) => {
        reject_shapes!($expected);

        fn visit_map<A: serde::de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<serde::de::IgnoredAny, serde::de::IgnoredAny>()?.is_some() {}
            Ok(self.ctx.reject($expected, "object"))
        }
    };
}

mod context;
mod field_set;
mod list;
mod marshal;
mod reader;
mod stream;
mod writer;

pub use context::ReadContext;
pub use field_set::FieldSet;
pub use list::{ObjectList, ObjectListBuilder};
pub use marshal::{
    marshal, marshal_list, marshal_with, to_string, to_vec, unmarshal, unmarshal_list, unmarshal_partial,
    MarshalOptions, Partial, Source,
};
pub use reader::{decode_object, deserialize_strict, read_value, Seed};
pub use stream::{unmarshal_stream, unmarshal_stream_partial};
pub use writer::encode_object;

use chrono::{DateTime, Utc};
use serde::{de::MapAccess, ser::SerializeMap, Deserializer, Serialize, Serializer};
use std::fmt;

/// Kind names written in the `kind` attribute of identified types and of
/// their lists.
///
/// There is no nil kind: a missing object or list is an unset attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kind {
    pub object: &'static str,
    pub link: &'static str,
    pub list: &'static str,
    pub list_link: &'static str,
}

/// A type with a fixed, ordered list of optional attributes.
///
/// Usually implemented through [`model!`](crate::model).
pub trait Model: Default {
    const NAME: &'static str;
    /// External names of the attributes, indexed by declared position.
    const ATTRIBUTES: &'static [&'static str];
    /// Set for identified types, whose position 0 holds the link flag.
    const KIND: Option<Kind> = None;
    /// Position of the first attribute that carries a value.
    const FIRST: usize = if Self::KIND.is_some() { 1 } else { 0 };

    fn fields(&self) -> &FieldSet;

    fn fields_mut(&mut self) -> &mut FieldSet;

    fn is_empty(&self) -> bool {
        self.fields().is_empty_from(Self::FIRST)
    }

    /// Writes the attribute at `index` as one map entry.
    fn write_attribute<M: SerializeMap>(&self, index: usize, map: &mut M) -> Result<(), M::Error>;

    /// Reads the next map value into the attribute at `index`.
    fn read_attribute<'de, A: MapAccess<'de>>(
        &mut self,
        index: usize,
        ctx: &mut ReadContext,
        map: &mut A,
    ) -> Result<(), A::Error>;
}

pub trait Encode {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>;
}

/// Adapts an [`Encode`] value to [`serde::Serialize`].
pub struct Encoded<'a, T: ?Sized>(pub &'a T);

impl<T: Encode + ?Sized> Serialize for Encoded<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.encode(serializer)
    }
}

pub trait Decode: Sized {
    /// Returns `Ok(None)` for values rejected into `ctx`.
    fn decode<'de, D: Deserializer<'de>>(ctx: &mut ReadContext, deserializer: D) -> Result<Option<Self>, D::Error>;
}

/// A type that can be stored in a model attribute.
pub trait AttributeValue: Clone + Default + PartialEq + fmt::Debug + Encode + Decode {
    /// What getters hand out.
    type View<'a>
    where
        Self: 'a;

    fn view(&self) -> Self::View<'_>;
}

impl AttributeValue for String {
    type View<'a> = &'a str;

    fn view(&self) -> &str {
        self
    }
}

impl AttributeValue for bool {
    type View<'a> = bool;

    fn view(&self) -> bool {
        *self
    }
}

impl AttributeValue for i64 {
    type View<'a> = i64;

    fn view(&self) -> i64 {
        *self
    }
}

impl AttributeValue for f64 {
    type View<'a> = f64;

    fn view(&self) -> f64 {
        *self
    }
}

impl AttributeValue for DateTime<Utc> {
    type View<'a> = DateTime<Utc>;

    fn view(&self) -> DateTime<Utc> {
        *self
    }
}
