use super::{Encode, Model};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{ser::SerializeMap, Serializer};

/// Writes the set attributes of `object` as a JSON object, in declared order.
///
/// Identified types always start with their `kind`.
pub fn encode_object<T: Model, S: Serializer>(object: &T, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(None)?;
    if let Some(kind) = T::KIND {
        let name = if object.fields().is_set(0) { kind.link } else { kind.object };
        map.serialize_entry("kind", name)?;
    }
    for index in object.fields().iter().filter(|index| *index >= T::FIRST) {
        object.write_attribute(index, &mut map)?;
    }
    map.end()
}

impl Encode for String {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self)
    }
}

impl Encode for str {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self)
    }
}

impl Encode for bool {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*self)
    }
}

impl Encode for i64 {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*self)
    }
}

impl Encode for f64 {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*self)
    }
}

// RFC 3339 in UTC; fractional seconds only when present.
impl Encode for DateTime<Utc> {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}
