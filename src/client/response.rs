//! Response envelope returned by every facade call.

use crate::http::ResponseType;
use crate::{Error, Result};

use bytes::Bytes;
use futures::stream::{Stream, StreamExt, TryStreamExt};
use reqwest::{header::HeaderMap, StatusCode, Url};
use serde_json::Value;
use std::fmt;
use std::pin::Pin;

/// A lazy, single-use stream of body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Decoded response body.
pub enum ResponseData {
    /// Body decoded as JSON (see [`ResponseType::Json`]).
    Json(Value),
    /// Body decoded as text.
    Text(String),
    /// Raw body bytes.
    Buffer(Bytes),
    /// Body not read yet.
    Stream(ByteStream),
}

impl fmt::Debug for ResponseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseData::Json(value) => f.debug_tuple("Json").field(value).finish(),
            ResponseData::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ResponseData::Buffer(bytes) => f.debug_tuple("Buffer").field(&bytes.len()).finish(),
            ResponseData::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl ResponseData {
    /// The JSON value, if the body was decoded as JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The text, if the body was decoded as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Take the buffered bytes out of a buffer or text body.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            ResponseData::Buffer(bytes) => Some(bytes),
            ResponseData::Text(text) => Some(Bytes::from(text)),
            _ => None,
        }
    }

    /// Take the stream out of a streamed body.
    pub fn into_stream(self) -> Option<ByteStream> {
        match self {
            ResponseData::Stream(stream) => Some(stream),
            _ => None,
        }
    }
}

/// Status, headers and decoded body of a completed request.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    data: ResponseData,
}

impl Response {
    /// Assembles an envelope from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, url: Url, data: ResponseData) -> Self {
        Self {
            status,
            headers,
            url,
            data,
        }
    }

    /// Reads a transport response into an envelope, decoding the body
    /// according to `response_type`.
    pub(crate) async fn from_transport(
        res: reqwest::Response,
        response_type: ResponseType,
    ) -> Result<Self> {
        let status = res.status();
        let headers = res.headers().clone();
        let url = res.url().clone();

        let data = match response_type {
            ResponseType::Json => ResponseData::Json(parse_json_lenient(&res.bytes().await?)),
            ResponseType::Text => ResponseData::Text(res.text().await?),
            ResponseType::ArrayBuffer => ResponseData::Buffer(res.bytes().await?),
            ResponseType::Stream => {
                ResponseData::Stream(res.bytes_stream().map_err(Error::from).boxed())
            }
        };

        Ok(Self::new(status, headers, url, data))
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Final URL, after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Decoded body.
    pub fn data(&self) -> &ResponseData {
        &self.data
    }

    /// Consume the envelope, keeping only the body.
    pub fn into_data(self) -> ResponseData {
        self.data
    }
}

/// Decode a body as JSON, degrading to a JSON string when it is not JSON.
fn parse_json_lenient(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use serde_json::json;

    #[test]
    fn test_parse_json_lenient() {
        assert_eq!(parse_json_lenient(b""), Value::Null);
        assert_eq!(
            parse_json_lenient(br#"{"name":"chogath"}"#),
            json!({ "name": "chogath" })
        );
        assert_eq!(parse_json_lenient(b"plain text"), json!("plain text"));
    }

    #[test]
    fn test_data_accessors() {
        let json = ResponseData::Json(json!({ "a": 1 }));
        assert_eq!(json.as_json(), Some(&json!({ "a": 1 })));
        assert!(json.as_text().is_none());
        assert!(json.into_bytes().is_none());

        let text = ResponseData::Text("hello".into());
        assert_eq!(text.as_text(), Some("hello"));
        assert_eq!(text.into_bytes(), Some(Bytes::from_static(b"hello")));

        let buffer = ResponseData::Buffer(Bytes::from_static(&[0, 1, 2]));
        assert_eq!(format!("{:?}", buffer), "Buffer(3)");
        assert!(buffer.into_stream().is_none());
    }

    #[tokio::test]
    async fn test_stream_data() {
        let chunks = vec![Ok(Bytes::from_static(b"ab")), Ok(Bytes::from_static(b"c"))];
        let data = ResponseData::Stream(stream::iter(chunks).boxed());
        assert_eq!(format!("{:?}", data), "Stream(..)");

        let collected: Vec<Bytes> = data.into_stream().unwrap().try_collect().await.unwrap();
        assert_eq!(collected.concat(), b"abc".to_vec());
    }
}
