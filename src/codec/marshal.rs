use super::{Decode, Encode, ReadContext, Seed};
use crate::error::{Error, FieldError};
use serde::de::DeserializeSeed;
use serde::Deserialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use std::io::{self, Write};

/// Output settings for [`marshal_with`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarshalOptions {
    /// Break objects and lists over indented lines.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
}

impl Default for MarshalOptions {
    fn default() -> Self {
        MarshalOptions {
            pretty: false,
            indent: 2,
        }
    }
}

impl MarshalOptions {
    pub fn pretty() -> Self {
        MarshalOptions {
            pretty: true,
            ..Default::default()
        }
    }
}

/// Writes `value` as JSON into `writer` and flushes it.
pub fn marshal<T: Encode + ?Sized, W: Write>(value: &T, writer: W) -> Result<(), Error> {
    marshal_with(value, writer, &MarshalOptions::default())
}

pub fn marshal_with<T: Encode + ?Sized, W: Write>(value: &T, mut writer: W, options: &MarshalOptions) -> Result<(), Error> {
    log::trace!("marshalling with {:?}", options);
    if options.pretty {
        let indent = vec![b' '; options.indent];
        write_json(value, &mut writer, PrettyFormatter::with_indent(&indent))?;
    } else {
        write_json(value, &mut writer, CompactFormatter)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<T: Encode + ?Sized, W: Write, F: Formatter>(value: &T, writer: W, formatter: F) -> Result<(), Error> {
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.encode(&mut serializer)?;
    Ok(())
}

/// Writes the items as a JSON array, in order.
pub fn marshal_list<T: Encode, W: Write>(items: &[T], writer: W) -> Result<(), Error> {
    marshal(items, writer)
}

pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    marshal(value, &mut buf)?;
    Ok(buf)
}

pub fn to_string<T: Encode + ?Sized>(value: &T) -> Result<String, Error> {
    let buf = to_vec(value)?;
    // the serializer only emits UTF-8
    String::from_utf8(buf).map_err(|err| Error::Stream(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Where [`unmarshal`] reads JSON from.
pub enum Source<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
    /// Read as needed; wrap unbuffered readers in [`std::io::BufReader`].
    Reader(Box<dyn io::Read + 'a>),
}

impl<'a> Source<'a> {
    pub fn reader<R: io::Read + 'a>(reader: R) -> Self {
        Source::Reader(Box::new(reader))
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Source<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Source::Text(text)
    }
}

/// A decoded value together with the attribute values that were rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Partial<T> {
    pub value: T,
    pub errors: Vec<FieldError>,
}

impl<T> Partial<T> {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fails with [`Error::Malformed`] unless every value was accepted.
    pub fn into_result(self) -> Result<T, Error> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err(Error::Malformed(self.errors))
        }
    }
}

/// Reads a `T`, failing if any attribute value was rejected.
pub fn unmarshal<'a, T: Decode + Default>(source: impl Into<Source<'a>>) -> Result<T, Error> {
    unmarshal_partial(source)?.into_result()
}

/// Reads a `T`, keeping what could be decoded.
///
/// Only stream and syntax errors fail; rejected values are left unset and
/// listed in [`Partial::errors`].
pub fn unmarshal_partial<'a, T: Decode + Default>(source: impl Into<Source<'a>>) -> Result<Partial<T>, Error> {
    match source.into() {
        Source::Bytes(bytes) => read_json(serde_json::Deserializer::from_slice(bytes)),
        Source::Text(text) => read_json(serde_json::Deserializer::from_str(text)),
        Source::Reader(reader) => read_json(serde_json::Deserializer::from_reader(reader)),
    }
}

fn read_json<'de, R, T>(mut deserializer: serde_json::Deserializer<R>) -> Result<Partial<T>, Error>
where
    R: serde_json::de::Read<'de>,
    T: Decode + Default,
{
    log::trace!("unmarshalling {}", std::any::type_name::<T>());
    let mut ctx = ReadContext::new();
    let value = Seed::<T>::attribute(&mut ctx)
        .deserialize(&mut deserializer)?
        .unwrap_or_default();
    deserializer.end()?;
    Ok(Partial {
        value,
        errors: ctx.into_errors(),
    })
}

/// Reads a JSON array of `T`; an empty array gives an empty list.
pub fn unmarshal_list<'a, T: Decode>(source: impl Into<Source<'a>>) -> Result<Vec<T>, Error> {
    unmarshal(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldErrorReason;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingFlush(Vec<u8>);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "flush failed"))
        }
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn write_errors_are_stream_errors() {
        let err = marshal(&vec!["a".to_string()], FailingWriter).unwrap_err();
        assert!(matches!(err, Error::Stream(ref io) if io.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn flush_errors_are_surfaced() {
        let err = marshal(&true, FailingFlush(Vec::new())).unwrap_err();
        assert!(matches!(err, Error::Stream(_)));
    }

    #[test]
    fn read_errors_are_stream_errors() {
        let err = unmarshal::<String>(Source::reader(FailingReader)).unwrap_err();
        assert!(matches!(err, Error::Stream(ref io) if io.kind() == io::ErrorKind::ConnectionReset));
    }

    #[test]
    fn accepts_bytes_text_and_readers() {
        let json = r#"["x","y"]"#;
        let expected = vec!["x".to_string(), "y".to_string()];
        assert_eq!(unmarshal_list::<String>(json).unwrap(), expected);
        assert_eq!(unmarshal_list::<String>(json.as_bytes()).unwrap(), expected);
        assert_eq!(unmarshal_list::<String>(&json.to_string()).unwrap(), expected);
        assert_eq!(unmarshal_list::<String>(Source::reader(json.as_bytes())).unwrap(), expected);
    }

    #[test]
    fn trailing_data_is_a_syntax_error() {
        assert!(matches!(unmarshal::<i64>("1 2"), Err(Error::Syntax(_))));
        assert!(matches!(unmarshal::<String>("\"open"), Err(Error::Syntax(_))));
    }

    #[test]
    fn strict_unmarshal_fails_on_rejected_values() {
        let err = unmarshal::<Vec<i64>>("[1, \"two\", 3]").unwrap_err();
        match err {
            Error::Malformed(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].path, "[1]");
                assert_eq!(
                    errors[0].reason,
                    FieldErrorReason::UnexpectedType {
                        expected: "integer",
                        found: "string"
                    }
                );
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn pretty_output_is_indented() {
        let mut buf = Vec::new();
        marshal_with(&vec![1i64, 2], &mut buf, &MarshalOptions::pretty()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            indoc! {"
                [
                  1,
                  2
                ]"}
        );
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: MarshalOptions = serde_json::from_str(r#"{"pretty": true}"#).unwrap();
        assert_eq!(options, MarshalOptions { pretty: true, indent: 2 });
    }
}
