use super::{unmarshal, unmarshal_partial, Decode, Partial};
use crate::error::Error;
use bytes::{Bytes, BytesMut};
use futures_util::stream::{Stream, TryStreamExt};
use std::io;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Collects a chunked byte stream, such as an HTTP response body, and
/// decodes a `T` from it.
///
/// The whole body is buffered before decoding starts. A failed chunk ends
/// the read with [`Error::Stream`].
pub async fn unmarshal_stream<T, S, E>(stream: S) -> Result<T, Error>
where
    T: Decode + Default,
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let body = collect(stream).await?;
    unmarshal(&body[..])
}

pub async fn unmarshal_stream_partial<T, S, E>(stream: S) -> Result<Partial<T>, Error>
where
    T: Decode + Default,
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let body = collect(stream).await?;
    unmarshal_partial(&body[..])
}

async fn collect<S, E>(stream: S) -> Result<BytesMut, Error>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    stream
        .map_err(|err| Error::Stream(io::Error::new(io::ErrorKind::Other, err)))
        .try_fold(BytesMut::new(), |mut body, chunk| async move {
            body.extend_from_slice(&chunk);
            Ok::<_, Error>(body)
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_values_split_across_chunks() {
        let chunks: Vec<Result<Bytes, io::Error>> = vec![
            Ok(Bytes::from_static(b"[\"he")),
            Ok(Bytes::from_static(b"llo\", \"wor")),
            Ok(Bytes::from_static(b"ld\"]")),
        ];
        let value: Vec<String> = tokio_test::block_on(unmarshal_stream(stream::iter(chunks))).unwrap();
        assert_eq!(value, vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn chunk_errors_are_stream_errors() {
        let chunks: Vec<Result<Bytes, io::Error>> = vec![
            Ok(Bytes::from_static(b"[1,")),
            Err(io::Error::new(io::ErrorKind::TimedOut, "timed out")),
        ];
        let err = tokio_test::block_on(unmarshal_stream::<Vec<i64>, _, _>(stream::iter(chunks))).unwrap_err();
        assert!(matches!(err, Error::Stream(_)));
    }

    #[test]
    fn partial_decode_reports_rejected_values() {
        let chunks: Vec<Result<Bytes, io::Error>> = vec![Ok(Bytes::from_static(b"[1, true, 3]"))];
        let partial = tokio_test::block_on(unmarshal_stream_partial::<Vec<i64>, _, _>(stream::iter(chunks))).unwrap();
        assert_eq!(partial.value, vec![1, 3]);
        assert!(!partial.is_complete());
    }
}
