use super::{read_value, AttributeValue, Decode, Encode, Encoded, Model, ReadContext, Seed};
use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::BTreeMap, fmt, marker::PhantomData, slice};

impl<T: Encode> Encode for [T] {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(&Encoded(item))?;
        }
        seq.end()
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().encode(serializer)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<'de, D: Deserializer<'de>>(ctx: &mut ReadContext, deserializer: D) -> Result<Option<Self>, D::Error> {
        deserializer.deserialize_any(ListVisitor::<T> {
            ctx,
            marker: PhantomData,
        })
    }
}

impl<T> AttributeValue for Vec<T>
where
    T: Encode + Decode + Clone + PartialEq + fmt::Debug,
{
    type View<'a> = &'a [T] where Self: 'a;

    fn view(&self) -> &[T] {
        self
    }
}

struct ListVisitor<'c, T> {
    ctx: &'c mut ReadContext,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T: Decode> Visitor<'de> for ListVisitor<'_, T> {
    type Value = Option<Vec<T>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list")
    }

    reject_shapes!("list", map);

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        read_items(self.ctx, seq).map(Some)
    }
}

fn read_items<'de, T: Decode, A: SeqAccess<'de>>(ctx: &mut ReadContext, mut seq: A) -> Result<Vec<T>, A::Error> {
    let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
    let mut index = 0;
    loop {
        ctx.enter_index(index);
        let next = seq.next_element_seed(Seed::<T>::new(ctx));
        ctx.leave();
        match next? {
            Some(Some(item)) => items.push(item),
            // null or rejected element
            Some(None) => {}
            None => break,
        }
        index += 1;
    }
    Ok(items)
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, &Encoded(value))?;
        }
        map.end()
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode<'de, D: Deserializer<'de>>(ctx: &mut ReadContext, deserializer: D) -> Result<Option<Self>, D::Error> {
        deserializer.deserialize_any(MapVisitor::<T> {
            ctx,
            marker: PhantomData,
        })
    }
}

impl<T> AttributeValue for BTreeMap<String, T>
where
    T: Encode + Decode + Clone + PartialEq + fmt::Debug,
{
    type View<'a> = &'a BTreeMap<String, T> where Self: 'a;

    fn view(&self) -> &BTreeMap<String, T> {
        self
    }
}

struct MapVisitor<'c, T> {
    ctx: &'c mut ReadContext,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T: Decode> Visitor<'de> for MapVisitor<'_, T> {
    type Value = Option<BTreeMap<String, T>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map")
    }

    reject_shapes!("object", seq);

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let ctx = self.ctx;
        let mut entries = BTreeMap::new();
        while let Some(key) = map.next_key::<String>()? {
            ctx.enter_key(&key);
            let value = map.next_value_seed(Seed::<T>::new(ctx));
            ctx.leave();
            if let Some(value) = value? {
                entries.insert(key, value);
            }
        }
        Ok(Some(entries))
    }
}

/// A list of identified objects, or a link to such a list.
///
/// In JSON it is an object carrying the list kind, the `href` and the
/// `items`; a link usually has no items.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectList<T> {
    link: bool,
    href: String,
    items: Vec<T>,
}

impl<T> Default for ObjectList<T> {
    fn default() -> Self {
        ObjectList {
            link: false,
            href: String::new(),
            items: Vec::new(),
        }
    }
}

impl<T: Model + Clone> ObjectList<T> {
    pub fn builder() -> ObjectListBuilder<T> {
        ObjectListBuilder::new()
    }

    /// `<Kind>List`, or `<Kind>ListLink` for a link.
    pub fn kind(&self) -> &'static str {
        match T::KIND {
            Some(kind) if self.link => kind.list_link,
            Some(kind) => kind.list,
            None => T::NAME,
        }
    }
}

impl<T> ObjectList<T> {
    pub fn link(&self) -> bool {
        self.link
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn get_href(&self) -> Option<&str> {
        if self.href.is_empty() {
            None
        } else {
            Some(&self.href)
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a ObjectList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for ObjectList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        ObjectList {
            items: items.into_iter().collect(),
            ..Default::default()
        }
    }
}

/// Builder of [`ObjectList`] values.
#[derive(Debug, Clone)]
pub struct ObjectListBuilder<T> {
    link: bool,
    href: String,
    items: Vec<T>,
}

impl<T> Default for ObjectListBuilder<T> {
    fn default() -> Self {
        ObjectListBuilder {
            link: false,
            href: String::new(),
            items: Vec::new(),
        }
    }
}

impl<T: Clone> ObjectListBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the list as a reference to the full one.
    pub fn link(&mut self, value: bool) -> &mut Self {
        self.link = value;
        self
    }

    pub fn href(&mut self, value: impl Into<String>) -> &mut Self {
        self.href = value.into();
        self
    }

    /// Replaces the items.
    pub fn items<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    /// True when the builder has no link flag, `href` or items.
    pub fn empty(&self) -> bool {
        !self.link && self.href.is_empty() && self.items.is_empty()
    }

    /// Replaces the whole state with a copy of `list`; does nothing for `None`.
    pub fn copy<'o>(&mut self, list: impl Into<Option<&'o ObjectList<T>>>) -> &mut Self
    where
        T: 'o,
    {
        if let Some(list) = list.into() {
            self.link = list.link;
            self.href = list.href.clone();
            self.items = list.items.clone();
        }
        self
    }

    pub fn build(&self) -> ObjectList<T> {
        ObjectList {
            link: self.link,
            href: self.href.clone(),
            items: self.items.clone(),
        }
    }
}

impl<T: Clone> From<&ObjectListBuilder<T>> for ObjectList<T> {
    fn from(builder: &ObjectListBuilder<T>) -> Self {
        builder.build()
    }
}

impl<T: Clone> From<&mut ObjectListBuilder<T>> for ObjectList<T> {
    fn from(builder: &mut ObjectListBuilder<T>) -> Self {
        builder.build()
    }
}

impl<T: Model + Clone + Encode> Encode for ObjectList<T> {
    fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", self.kind())?;
        if !self.href.is_empty() {
            map.serialize_entry("href", &self.href)?;
        }
        if !self.items.is_empty() {
            map.serialize_entry("items", &Encoded(self.items.as_slice()))?;
        }
        map.end()
    }
}

impl<T: Model + Decode> Decode for ObjectList<T> {
    fn decode<'de, D: Deserializer<'de>>(ctx: &mut ReadContext, deserializer: D) -> Result<Option<Self>, D::Error> {
        deserializer.deserialize_any(ObjectListVisitor::<T> {
            ctx,
            marker: PhantomData,
        })
    }
}

impl<T> AttributeValue for ObjectList<T>
where
    T: Model + Encode + Decode + Clone + PartialEq + fmt::Debug,
{
    type View<'a> = &'a Self where Self: 'a;

    fn view(&self) -> &Self {
        self
    }
}

impl<T: Model + Clone + Encode> Serialize for ObjectList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode(serializer)
    }
}

impl<'de, T: Model + Decode> Deserialize<'de> for ObjectList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::deserialize_strict(deserializer)
    }
}

struct ObjectListVisitor<'c, T> {
    ctx: &'c mut ReadContext,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T: Model + Decode> Visitor<'de> for ObjectListVisitor<'_, T> {
    type Value = Option<ObjectList<T>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a list of {} objects", T::NAME)
    }

    reject_shapes!("object");

    // a bare array is read as the items
    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        let items = read_items(self.ctx, seq)?;
        Ok(Some(ObjectList {
            items,
            ..Default::default()
        }))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let ctx = self.ctx;
        let mut list = ObjectList::default();

        while let Some(key) = map.next_key::<String>()? {
            ctx.enter_key(&key);
            let read = match key.as_str() {
                "kind" => read_value::<String, A>(ctx, &mut map).map(|kind| {
                    list.link = matches!((kind, T::KIND), (Some(kind), Some(known)) if kind == known.list_link);
                }),
                "href" => read_value::<String, A>(ctx, &mut map).map(|href| {
                    if let Some(href) = href {
                        list.href = href;
                    }
                }),
                "items" => read_value::<Vec<T>, A>(ctx, &mut map).map(|items| {
                    if let Some(items) = items {
                        list.items = items;
                    }
                }),
                _ => {
                    log::trace!("ignoring unknown attribute {:?} of a {} list", key, T::NAME);
                    map.next_value::<IgnoredAny>().map(|_| ())
                }
            };
            ctx.leave();
            read?;
        }
        Ok(Some(list))
    }
}
