//! Multipart form construction.
//!
//! A [`FormFields`] is an ordered field-name to value mapping. Each field
//! becomes one part of the multipart body, in insertion order: text values
//! as text parts, byte values as file parts.
//!
//! ```rust
//! use courier::client::form::{build_form, FormFields};
//!
//! # fn example() -> Result<(), courier::Error> {
//! let fields = FormFields::new()
//!     .text("name", "chogath")
//!     .file("image", vec![0x89, 0x50, 0x4e, 0x47]);
//! let form = build_form(fields)?;
//! # Ok(())
//! # }
//! ```

use crate::Result;

use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// Value of a single form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// Plain text part.
    Text(String),
    /// File part. The file name defaults to the field name.
    File {
        content: Bytes,
        file_name: Option<String>,
        mime: Option<String>,
    },
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        FormValue::Text(text.to_owned())
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        FormValue::Text(text)
    }
}

impl From<Vec<u8>> for FormValue {
    fn from(bytes: Vec<u8>) -> Self {
        FormValue::from(Bytes::from(bytes))
    }
}

impl From<Bytes> for FormValue {
    fn from(content: Bytes) -> Self {
        FormValue::File {
            content,
            file_name: None,
            mime: None,
        }
    }
}

/// Ordered field-name to value mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    fields: Vec<(String, FormValue)>,
}

impl FormFields {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        FormFields::default()
    }

    /// Set a field. Setting an existing name replaces its value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Chainable text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, FormValue::Text(value.into()));
        self
    }

    /// Chainable file field from raw bytes.
    pub fn file(mut self, name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        self.insert(name, FormValue::from(content.into()));
        self
    }

    /// Chainable file field with an explicit file name and MIME type.
    pub fn file_with(
        mut self,
        name: impl Into<String>,
        content: impl Into<Bytes>,
        file_name: impl Into<String>,
        mime: Option<&str>,
    ) -> Self {
        self.insert(
            name,
            FormValue::File {
                content: content.into(),
                file_name: Some(file_name.into()),
                mime: mime.map(str::to_owned),
            },
        );
        self
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

impl IntoIterator for FormFields {
    type Item = (String, FormValue);
    type IntoIter = std::vec::IntoIter<(String, FormValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Builds the multipart body, one part per field.
///
/// Fails only when a file part carries a MIME type that does not parse.
pub fn build_form(fields: FormFields) -> Result<Form> {
    let mut form = Form::new();

    for (name, value) in fields {
        form = match value {
            FormValue::Text(text) => {
                debug!("Appending text part {}", name);
                form.text(name, text)
            }
            FormValue::File {
                content,
                file_name,
                mime,
            } => {
                debug!("Appending file part {} ({} bytes)", name, content.len());
                let mut part = Part::bytes(content.to_vec())
                    .file_name(file_name.unwrap_or_else(|| name.clone()));
                if let Some(mime) = mime {
                    part = part.mime_str(&mime)?;
                }
                form.part(name, part)
            }
        };
    }

    Ok(form)
}

/// Caller headers for a multipart request.
///
/// Caller headers win everywhere except `Content-Type` and `Content-Length`,
/// which belong to the multipart body and are dropped here so the boundary
/// computed for the form is the only one sent.
pub fn form_headers(caller: &HeaderMap) -> HeaderMap {
    let mut headers = caller.clone();
    headers.remove(CONTENT_TYPE);
    headers.remove(CONTENT_LENGTH);
    headers
}
