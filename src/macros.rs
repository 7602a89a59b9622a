/// Declares a presence-tracked model type, its builder and its JSON codec.
///
/// Attributes are listed in declared order as `name: Type => "json_key"`;
/// the order fixes their positions in the presence vector and in the output.
///
/// ```
/// cluster_model::model! {
///     /// A DNS zone.
///     pub struct Zone {
///         /// Base domain of the zone.
///         base_domain: String => "base_domain",
///         private: bool => "private",
///     }
/// }
///
/// let zone = Zone::builder().base_domain("example.com").build();
/// assert_eq!(zone.base_domain(), "example.com");
/// assert_eq!(zone.get_private(), None);
/// assert_eq!(cluster_model::to_string(&zone).unwrap(), r#"{"base_domain":"example.com"}"#);
/// ```
///
/// `class Name("Kind")` declares an identified type instead: position 0 is
/// the link flag, followed by the `id` and `href` attributes, and the JSON
/// form always carries a `kind`. It also declares `NameList`, the list type
/// that can stand for a link to a list of those objects.
#[macro_export]
macro_rules! model {
    (
        @define
        meta: [$($meta:tt)*],
        vis: [$vis:vis],
        name: $name:ident,
        kind: [$kind:expr],
        reserved: [$($reserved:ident => $reserved_key:literal)?],
        fields: [$( [$($field_meta:tt)*] $field:ident: $ty:ty => $key:literal, )*]
    ) => {
        $crate::__private::paste::paste! {
            $($meta)*
            #[derive(Debug, Clone, Default, PartialEq)]
            $vis struct $name {
                fields: $crate::codec::FieldSet,
                $( $field: $ty, )*
            }

            #[doc = "Declared positions of the attributes of [`" $name "`]."]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            $vis enum [<$name Attribute>] {
                $( $reserved, )?
                $( [<$field:camel>], )*
            }

            impl [<$name Attribute>] {
                pub const fn index(self) -> usize {
                    self as usize
                }

                pub fn key(self) -> &'static str {
                    <$name as $crate::codec::Model>::ATTRIBUTES[self.index()]
                }
            }

            impl $name {
                pub fn builder() -> [<$name Builder>] {
                    [<$name Builder>]::new()
                }

                /// A builder holding a copy of this object.
                pub fn to_builder(&self) -> [<$name Builder>] {
                    let mut builder = [<$name Builder>]::new();
                    builder.copy(self);
                    builder
                }

                /// True when no attribute has a value.
                pub fn empty(&self) -> bool {
                    $crate::codec::Model::is_empty(self)
                }

                pub fn is_set(&self, attribute: [<$name Attribute>]) -> bool {
                    self.fields.is_set(attribute.index())
                }

                $(
                    $($field_meta)*
                    pub fn $field(&self) -> <$ty as $crate::codec::AttributeValue>::View<'_> {
                        $crate::codec::AttributeValue::view(&self.$field)
                    }

                    #[doc = "Value of `" $key "`, or `None` when it isn't set."]
                    pub fn [<get_ $field>](&self) -> Option<<$ty as $crate::codec::AttributeValue>::View<'_>> {
                        if self.is_set([<$name Attribute>]::[<$field:camel>]) {
                            Some($crate::codec::AttributeValue::view(&self.$field))
                        } else {
                            None
                        }
                    }
                )*
            }

            #[doc = "Builder of [`" $name "`] objects."]
            #[derive(Debug, Clone, Default)]
            $vis struct [<$name Builder>] {
                fields: $crate::codec::FieldSet,
                $( $field: $ty, )*
            }

            impl [<$name Builder>] {
                pub fn new() -> Self {
                    Self::default()
                }

                /// True when no attribute has a value.
                pub fn empty(&self) -> bool {
                    self.fields.is_empty_from(<$name as $crate::codec::Model>::FIRST)
                }

                $(
                    $($field_meta)*
                    pub fn $field(&mut self, value: impl Into<$ty>) -> &mut Self {
                        self.$field = value.into();
                        self.fields.set(
                            [<$name Attribute>]::[<$field:camel>].index(),
                            <$name as $crate::codec::Model>::ATTRIBUTES.len(),
                        );
                        self
                    }
                )*

                /// Resets the attribute to its default and marks it unset.
                pub fn clear(&mut self, attribute: [<$name Attribute>]) -> &mut Self {
                    self.fields.unset(attribute.index());
                    $(
                        if attribute == [<$name Attribute>]::[<$field:camel>] {
                            self.$field = Default::default();
                        }
                    )*
                    self
                }

                /// Replaces the whole state of the builder with a copy of `object`.
                ///
                /// Does nothing when `object` is `None`.
                pub fn copy<'o>(&mut self, object: impl Into<Option<&'o $name>>) -> &mut Self {
                    if let Some(object) = object.into() {
                        self.fields = object.fields.clone();
                        $( self.$field = object.$field.clone(); )*
                    }
                    self
                }

                pub fn build(&self) -> $name {
                    $name {
                        fields: self.fields.clone(),
                        $( $field: self.$field.clone(), )*
                    }
                }
            }

            impl From<&[<$name Builder>]> for $name {
                fn from(builder: &[<$name Builder>]) -> Self {
                    builder.build()
                }
            }

            impl From<&mut [<$name Builder>]> for $name {
                fn from(builder: &mut [<$name Builder>]) -> Self {
                    builder.build()
                }
            }

            impl $crate::codec::Model for $name {
                const NAME: &'static str = stringify!($name);
                const ATTRIBUTES: &'static [&'static str] = &[$( $reserved_key, )? $( $key ),*];
                const KIND: Option<$crate::codec::Kind> = $kind;

                fn fields(&self) -> &$crate::codec::FieldSet {
                    &self.fields
                }

                fn fields_mut(&mut self) -> &mut $crate::codec::FieldSet {
                    &mut self.fields
                }

                fn write_attribute<M: $crate::__private::serde::ser::SerializeMap>(
                    &self,
                    index: usize,
                    map: &mut M,
                ) -> Result<(), M::Error> {
                    $(
                        if index == [<$name Attribute>]::[<$field:camel>].index() {
                            return map.serialize_entry($key, &$crate::codec::Encoded(&self.$field));
                        }
                    )*
                    Ok(())
                }

                fn read_attribute<'de, A: $crate::__private::serde::de::MapAccess<'de>>(
                    &mut self,
                    index: usize,
                    ctx: &mut $crate::codec::ReadContext,
                    map: &mut A,
                ) -> Result<(), A::Error> {
                    $(
                        if index == [<$name Attribute>]::[<$field:camel>].index() {
                            if let Some(value) = $crate::codec::read_value::<$ty, A>(ctx, map)? {
                                self.$field = value;
                                self.fields.set(index, <Self as $crate::codec::Model>::ATTRIBUTES.len());
                            }
                            return Ok(());
                        }
                    )*
                    map.next_value::<$crate::__private::serde::de::IgnoredAny>()?;
                    Ok(())
                }
            }

            impl $crate::codec::Encode for $name {
                fn encode<S: $crate::__private::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    $crate::codec::encode_object(self, serializer)
                }
            }

            impl $crate::codec::Decode for $name {
                fn decode<'de, D: $crate::__private::serde::Deserializer<'de>>(
                    ctx: &mut $crate::codec::ReadContext,
                    deserializer: D,
                ) -> Result<Option<Self>, D::Error> {
                    $crate::codec::decode_object(ctx, deserializer)
                }
            }

            impl $crate::codec::AttributeValue for $name {
                type View<'a> = &'a Self;

                fn view(&self) -> &Self {
                    self
                }
            }

            impl $crate::__private::serde::Serialize for $name {
                fn serialize<S: $crate::__private::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    $crate::codec::encode_object(self, serializer)
                }
            }

            impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
                fn deserialize<D: $crate::__private::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    $crate::codec::deserialize_strict(deserializer)
                }
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis class $name:ident ($kind:literal) {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty => $key:literal
            ),* $(,)?
        }
    ) => {
        $crate::model! {
            @define
            meta: [$(#[$meta])*],
            vis: [$vis],
            name: $name,
            kind: [Some($crate::codec::Kind {
                object: $kind,
                link: concat!($kind, "Link"),
                list: concat!($kind, "List"),
                list_link: concat!($kind, "ListLink"),
            })],
            reserved: [Link => "kind"],
            fields: [
                [#[doc = "Identifier of the object."]] id: String => "id",
                [#[doc = "Self link of the object."]] href: String => "href",
                $( [$(#[$field_meta])*] $field: $ty => $key, )*
            ]
        }

        $crate::__private::paste::paste! {
            #[doc = "A list of [`" $name "`] objects, or a link to one."]
            $vis type [<$name List>] = $crate::codec::ObjectList<$name>;

            #[doc = "Builder of [`" $name "List`] values."]
            $vis type [<$name ListBuilder>] = $crate::codec::ObjectListBuilder<$name>;

            impl $name {
                /// `Kind`, or `KindLink` when the object only references the full one.
                pub fn kind(&self) -> &'static str {
                    if self.link() {
                        concat!($kind, "Link")
                    } else {
                        $kind
                    }
                }

                pub fn link(&self) -> bool {
                    self.fields.is_set([<$name Attribute>]::Link.index())
                }
            }

            impl [<$name Builder>] {
                /// Marks the object as a reference to the full one.
                pub fn link(&mut self, value: bool) -> &mut Self {
                    self.fields.assign(
                        [<$name Attribute>]::Link.index(),
                        value,
                        <$name as $crate::codec::Model>::ATTRIBUTES.len(),
                    );
                    self
                }
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty => $key:literal
            ),* $(,)?
        }
    ) => {
        $crate::model! {
            @define
            meta: [$(#[$meta])*],
            vis: [$vis],
            name: $name,
            kind: [None],
            reserved: [],
            fields: [$( [$(#[$field_meta])*] $field: $ty => $key, )*]
        }
    };
}

/// Declares an enum over strings that keeps unknown values verbatim.
///
/// The default value is the empty string, like an attribute nobody set.
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant, )*
            /// A value unknown to this version of the schema.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $value, )*
                    $name::Other(value) => value.as_str(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::Other(String::new())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $value => $name::$variant, )*
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $value => $name::$variant, )*
                    _ => $name::Other(value),
                }
            }
        }

        impl $crate::codec::Encode for $name {
            fn encode<S: $crate::__private::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl $crate::codec::Decode for $name {
            fn decode<'de, D: $crate::__private::serde::Deserializer<'de>>(
                ctx: &mut $crate::codec::ReadContext,
                deserializer: D,
            ) -> Result<Option<Self>, D::Error> {
                let value = <String as $crate::codec::Decode>::decode(ctx, deserializer)?;
                Ok(value.map($name::from))
            }
        }

        impl $crate::codec::AttributeValue for $name {
            type View<'a> = &'a Self;

            fn view(&self) -> &Self {
                self
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S: $crate::__private::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D: $crate::__private::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::codec::deserialize_strict(deserializer)
            }
        }
    };
}
