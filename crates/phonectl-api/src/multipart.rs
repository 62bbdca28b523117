// Multipart form encoding for file uploads.
//
// The device's firmware parses multipart bodies with a naive boundary
// scan, so the boundary must not occur anywhere in the payload. The
// boundary is re-drawn until it doesn't; with 24 random alphanumeric
// characters a collision is vanishingly unlikely, so the loop is bounded
// in practice by a single draw.

use rand::Rng;
use rand::distr::Alphanumeric;

/// One `name="file"` part with an explicit filename and content type.
pub(crate) struct FilePart<'a> {
    pub filename: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

/// A fully assembled multipart body plus its boundary.
pub(crate) struct EncodedForm {
    pub boundary: String,
    pub body: Vec<u8>,
}

impl EncodedForm {
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

/// Encode a single-part `multipart/form-data` body.
pub(crate) fn encode_file_part(part: &FilePart<'_>) -> EncodedForm {
    let boundary = boundary_for(part.data);

    let header = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\
         Content-Type: {}\r\n\r\n",
        part.filename, part.content_type
    );
    let trailer = format!("\r\n--{boundary}--\r\n");

    let mut body = Vec::with_capacity(header.len() + part.data.len() + trailer.len());
    body.extend_from_slice(header.as_bytes());
    body.extend_from_slice(part.data);
    body.extend_from_slice(trailer.as_bytes());

    EncodedForm { boundary, body }
}

/// Draw a random boundary token until one is found that does not occur in
/// the payload.
fn boundary_for(payload: &[u8]) -> String {
    loop {
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();
        let boundary = format!("----phonectl{token}");
        if !contains(payload, boundary.as_bytes()) {
            return boundary;
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::{FilePart, contains, encode_file_part};

    #[test]
    fn body_carries_part_headers_and_payload() {
        let form = encode_file_part(&FilePart {
            filename: "LocalPhonebook.xml",
            content_type: "text/xml",
            data: b"<phonebook/>",
        });

        let text = String::from_utf8(form.body.clone()).unwrap();
        assert!(text.starts_with(&format!("--{}\r\n", form.boundary)));
        assert!(text.contains("Content-Disposition: form-data; name=\"file\"; filename=\"LocalPhonebook.xml\""));
        assert!(text.contains("Content-Type: text/xml"));
        assert!(text.contains("<phonebook/>"));
        assert!(text.ends_with(&format!("\r\n--{}--\r\n", form.boundary)));
    }

    #[test]
    fn boundary_never_occurs_in_payload() {
        let payload = b"----phonectl is a literal string users may type";
        let form = encode_file_part(&FilePart {
            filename: "AllSettings.cfg",
            content_type: "application/octet-stream",
            data: payload,
        });
        assert!(!contains(payload, form.boundary.as_bytes()));
    }

    #[test]
    fn binary_payload_survives_untouched() {
        let payload: Vec<u8> = (0u8..=255).collect();
        let form = encode_file_part(&FilePart {
            filename: "AllSettings.cfg",
            content_type: "application/octet-stream",
            data: &payload,
        });
        assert!(contains(&form.body, &payload));
    }
}
