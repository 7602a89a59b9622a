use super::{Decode, Model, ReadContext};
use crate::error::{Error, FieldErrorReason};
use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::{fmt, marker::PhantomData};

/// Decodes one value, handling JSON `null` before `T` sees it.
pub struct Seed<'c, T> {
    ctx: &'c mut ReadContext,
    null: fn() -> Option<T>,
}

fn absent<T>() -> Option<T> {
    None
}

fn zero<T: Default>() -> Option<T> {
    Some(T::default())
}

impl<'c, T> Seed<'c, T> {
    /// `null` reads as absent, as for list elements.
    pub fn new(ctx: &'c mut ReadContext) -> Self {
        Seed { ctx, null: absent::<T> }
    }
}

impl<'c, T: Default> Seed<'c, T> {
    /// `null` reads as the zero value, so a known key is always present.
    pub fn attribute(ctx: &'c mut ReadContext) -> Self {
        Seed { ctx, null: zero::<T> }
    }
}

impl<'de, T: Decode> DeserializeSeed<'de> for Seed<'_, T> {
    type Value = Option<T>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_option(NullableVisitor {
            ctx: self.ctx,
            null: self.null,
        })
    }
}

struct NullableVisitor<'c, T> {
    ctx: &'c mut ReadContext,
    null: fn() -> Option<T>,
}

impl<'de, T: Decode> Visitor<'de> for NullableVisitor<'_, T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an attribute value or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok((self.null)())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok((self.null)())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        T::decode(self.ctx, deserializer)
    }
}

/// Reads the attribute value following the current key of `map`.
///
/// `null` gives the zero value; `None` means the value was rejected.
pub fn read_value<'de, T: Decode + Default, A: MapAccess<'de>>(
    ctx: &mut ReadContext,
    map: &mut A,
) -> Result<Option<T>, A::Error> {
    map.next_value_seed(Seed::<T>::attribute(ctx))
}

/// Reads a JSON object into a new `T`, setting the bit of every known key found.
///
/// Any other JSON value is consumed and reported.
pub fn decode_object<'de, T: Model, D: Deserializer<'de>>(
    ctx: &mut ReadContext,
    deserializer: D,
) -> Result<Option<T>, D::Error> {
    deserializer.deserialize_any(ObjectVisitor::<T> {
        ctx,
        marker: PhantomData,
    })
}

struct ObjectVisitor<'c, T> {
    ctx: &'c mut ReadContext,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T: Model> Visitor<'de> for ObjectVisitor<'_, T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a {} object", T::NAME)
    }

    reject_shapes!("object", seq);

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let ctx = self.ctx;
        let mut object = T::default();

        while let Some(key) = map.next_key::<String>()? {
            if let Some(kind) = T::KIND {
                if key == "kind" {
                    ctx.enter_key(&key);
                    let value = read_value::<String, A>(ctx, &mut map);
                    ctx.leave();
                    if value?.as_deref() == Some(kind.link) {
                        object.fields_mut().set(0, T::ATTRIBUTES.len());
                    }
                    continue;
                }
            }

            let index = T::ATTRIBUTES
                .iter()
                .position(|name| *name == key)
                .filter(|index| *index >= T::FIRST);
            match index {
                Some(index) => {
                    ctx.enter_key(&key);
                    let read = object.read_attribute(index, ctx, &mut map);
                    ctx.leave();
                    read?;
                }
                None => {
                    // unknown keys come from newer schemas
                    log::trace!("ignoring unknown attribute {:?} of {}", key, T::NAME);
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(Some(object))
    }
}

/// `serde::Deserialize` for models: any rejected value fails the whole decode.
pub fn deserialize_strict<'de, T: Decode + Default, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
    let mut ctx = ReadContext::new();
    let value = Seed::<T>::attribute(&mut ctx).deserialize(deserializer)?.unwrap_or_default();
    let errors = ctx.into_errors();
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(de::Error::custom(Error::Malformed(errors)))
    }
}

/// Buffers one scalar and converts it, recording a rejection instead of failing.
pub(crate) fn decode_scalar<'de, T, D, F>(ctx: &mut ReadContext, deserializer: D, convert: F) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    F: FnOnce(Value) -> Result<T, FieldErrorReason>,
{
    let raw = Value::deserialize(deserializer)?;
    match convert(raw) {
        Ok(value) => Ok(Some(value)),
        Err(reason) => {
            ctx.report(reason);
            Ok(None)
        }
    }
}

impl Decode for String {
    fn decode<'de, D: Deserializer<'de>>(ctx: &mut ReadContext, deserializer: D) -> Result<Option<Self>, D::Error> {
        decode_scalar(ctx, deserializer, |raw| match raw {
            Value::String(value) => Ok(value),
            other => Err(FieldErrorReason::unexpected("string", &other)),
        })
    }
}

impl Decode for bool {
    fn decode<'de, D: Deserializer<'de>>(ctx: &mut ReadContext, deserializer: D) -> Result<Option<Self>, D::Error> {
        decode_scalar(ctx, deserializer, |raw| match raw {
            Value::Bool(value) => Ok(value),
            other => Err(FieldErrorReason::unexpected("boolean", &other)),
        })
    }
}

impl Decode for i64 {
    fn decode<'de, D: Deserializer<'de>>(ctx: &mut ReadContext, deserializer: D) -> Result<Option<Self>, D::Error> {
        decode_scalar(ctx, deserializer, |raw| match raw.as_i64() {
            Some(value) => Ok(value),
            None => Err(FieldErrorReason::unexpected("integer", &raw)),
        })
    }
}

impl Decode for f64 {
    fn decode<'de, D: Deserializer<'de>>(ctx: &mut ReadContext, deserializer: D) -> Result<Option<Self>, D::Error> {
        decode_scalar(ctx, deserializer, |raw| match raw.as_f64() {
            Some(value) => Ok(value),
            None => Err(FieldErrorReason::unexpected("number", &raw)),
        })
    }
}

impl Decode for DateTime<Utc> {
    fn decode<'de, D: Deserializer<'de>>(ctx: &mut ReadContext, deserializer: D) -> Result<Option<Self>, D::Error> {
        decode_scalar(ctx, deserializer, |raw| match raw {
            Value::String(text) => match DateTime::parse_from_rfc3339(&text) {
                Ok(value) => Ok(value.with_timezone(&Utc)),
                Err(source) => Err(FieldErrorReason::Timestamp { value: text, source }),
            },
            other => Err(FieldErrorReason::unexpected("timestamp string", &other)),
        })
    }
}
