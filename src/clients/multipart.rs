//! Buffered `multipart/form-data` encoding.
//!
//! Every part is written into memory before the body is finalized. Payloads
//! in this API are small (metadata, document and image uploads), so the body
//! is never streamed.

use rand::distributions::Alphanumeric;
use rand::Rng;

const BOUNDARY_LEN: usize = 32;

/// One part of a multipart body.
///
/// # Example
///
/// ```rust
/// use moov_api::clients::MultipartPart;
///
/// let parts = vec![
///     MultipartPart::field("fileName", "license.png"),
///     MultipartPart::file("file", "license.png", "image/png", vec![0x89, 0x50]),
/// ];
/// assert_eq!(parts.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultipartPart {
    /// A plain text form field.
    Field {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// A file upload.
    File {
        /// Field name.
        name: String,
        /// File name reported to the server.
        filename: String,
        /// MIME type of the file.
        content_type: String,
        /// File contents.
        data: Vec<u8>,
    },
}

impl MultipartPart {
    /// Creates a text field part.
    #[must_use]
    pub fn field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a file part.
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self::File {
            name: name.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// Encodes parts with a random boundary.
///
/// Returns the `Content-Type` header value and the body bytes.
pub(crate) fn encode(parts: &[MultipartPart]) -> (String, Vec<u8>) {
    let boundary: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_LEN)
        .map(char::from)
        .collect();
    let body = encode_with_boundary(parts, &boundary);
    (format!("multipart/form-data; boundary={boundary}"), body)
}

fn encode_with_boundary(parts: &[MultipartPart], boundary: &str) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match part {
            MultipartPart::Field { name, value } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                        quote(name)
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            MultipartPart::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        quote(name),
                        quote(filename),
                        content_type.replace(['\r', '\n'], "")
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

// Quotes and line breaks would end the header parameter early.
fn quote(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
