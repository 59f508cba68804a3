//! Outbound request encoding.
//!
//! # Design
//! Callers hand over a canonical (camelCase) payload. Each endpoint has a
//! literal rename table mapping the few canonical names it cares about to
//! the backend's spelling; there is no generic case conversion because the
//! backend follows no single convention. With a file attached the payload
//! becomes a multipart form, otherwise a JSON object.

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::RequestBody;

/// Field naming and file slot for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub renames: &'static [(&'static str, &'static str)],
    pub attachment_field: Option<&'static str>,
}

impl Endpoint {
    /// The backend name for a canonical field.
    pub fn backend_name<'a>(&self, canonical: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|(from, _)| *from == canonical)
            .map_or(canonical, |(_, to)| *to)
    }
}

pub const ARTICLE: Endpoint = Endpoint {
    renames: &[
        ("title", "judul"),
        ("publishedAt", "tanggal"),
        ("content", "konten"),
        ("category", "kategori"),
    ],
    attachment_field: Some("cover_image"),
};

pub const PACKAGE: Endpoint = Endpoint {
    renames: &[
        ("price", "harga"),
        ("description", "deskripsi"),
        ("location", "lokasi"),
        ("duration", "durasi"),
        ("quota", "kuota"),
        ("includes", "fasilitas"),
        ("excludes", "tidak_termasuk"),
        ("isActive", "is_active"),
    ],
    attachment_field: Some("image"),
};

pub const BOOKING: Endpoint = Endpoint {
    renames: &[
        ("packageId", "package_id"),
        ("tripDate", "tanggal_keberangkatan"),
        ("participants", "jumlah_peserta"),
        ("customerName", "nama_pemesan"),
        ("phone", "no_hp"),
        ("notes", "catatan"),
    ],
    attachment_field: None,
};

pub const BOOKING_STATUS: Endpoint = Endpoint {
    renames: &[("paymentStatus", "payment_status")],
    attachment_field: None,
};

pub const PAYMENT_PROOF: Endpoint = Endpoint {
    renames: &[],
    attachment_field: Some("bukti_pembayaran"),
};

pub const REVIEW: Endpoint = Endpoint {
    renames: &[
        ("packageId", "package_id"),
        ("bookingId", "booking_id"),
        ("comment", "komentar"),
    ],
    attachment_field: Some("foto"),
};

pub const WISHLIST: Endpoint = Endpoint {
    renames: &[("packageId", "package_id")],
    attachment_field: None,
};

pub const USER: Endpoint = Endpoint {
    renames: &[("name", "full_name"), ("phone", "no_hp"), ("isActive", "is_active")],
    attachment_field: Some("avatar"),
};

pub const REGISTER: Endpoint = Endpoint {
    renames: &[
        ("name", "full_name"),
        ("phone", "no_hp"),
        ("passwordConfirmation", "password_confirm"),
    ],
    attachment_field: None,
};

pub const LOGIN: Endpoint = Endpoint {
    renames: &[],
    attachment_field: None,
};

/// A file to upload alongside the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Encodes `payload` for `endpoint`: multipart when an attachment is given,
/// JSON otherwise.
pub fn encode<T: Serialize>(
    endpoint: &Endpoint,
    payload: &T,
    attachment: Option<Attachment>,
) -> Result<RequestBody, ApiError> {
    let fields = rename_fields(endpoint, payload)?;
    match attachment {
        None => Ok(RequestBody::Json(serde_json::to_string(&Value::Object(fields))?)),
        Some(file) => {
            let slot = endpoint
                .attachment_field
                .ok_or_else(|| ApiError::unexpected("endpoint does not accept file uploads"))?;
            let mut form = MultipartForm::new();
            for (name, value) in &fields {
                if let Some(text) = part_text(value) {
                    form.text(name, text);
                }
            }
            form.file(slot, file);
            Ok(RequestBody::Multipart(form))
        }
    }
}

/// Serializes the canonical payload and applies the endpoint's renames.
pub fn rename_fields<T: Serialize>(endpoint: &Endpoint, payload: &T) -> Result<Map<String, Value>, ApiError> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| (endpoint.backend_name(&key).to_string(), whole_number(value)))
            .collect()),
        Value::Null => Ok(Map::new()),
        _ => Err(ApiError::unexpected("request payload must be an object")),
    }
}

/// Whole floats go out without a trailing `.0` (`1500000`, not `1500000.0`).
fn whole_number(value: Value) -> Value {
    match value.as_f64() {
        Some(float) if value.is_f64() && float.fract() == 0.0 && float.abs() < 9.0e15 => Value::from(float as i64),
        _ => value,
    }
}

/// Text for a multipart part. Null fields are not present and are skipped.
fn part_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        nested => Some(nested.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(Attachment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub value: PartValue,
}

/// A `multipart/form-data` body with its own boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<Part>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: format!("----TravelFormBoundary{}", Uuid::new_v4().simple()),
            parts: Vec::new(),
        }
    }

    pub fn text(&mut self, name: &str, value: impl Into<String>) {
        self.parts.push(Part {
            name: name.to_string(),
            value: PartValue::Text(value.into()),
        });
    }

    pub fn file(&mut self, name: &str, attachment: Attachment) {
        self.parts.push(Part {
            name: name.to_string(),
            value: PartValue::File(attachment),
        });
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Text value of the first part called `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::Text(text) if part.name == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn attachment(&self, name: &str) -> Option<&Attachment> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::File(file) if part.name == name => Some(file),
            _ => None,
        })
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.parts.iter().map(|part| part.name.as_str()).collect()
    }

    /// The `Content-Type` header value carrying this form's boundary.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// The encoded body (RFC 7578).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for part in &self.parts {
            body.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            match &part.value {
                PartValue::Text(text) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", escape(&part.name)).as_bytes(),
                    );
                    body.extend_from_slice(text.as_bytes());
                }
                PartValue::File(file) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            escape(&part.name),
                            escape(&file.file_name),
                            file.content_type
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&file.bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        body
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::entities::{ArticleInput, BookingInput, PackageInput};

    fn json_body(body: &RequestBody) -> Value {
        serde_json::from_str(body.as_json().unwrap()).unwrap()
    }

    #[test]
    fn booking_package_id_is_renamed() {
        let input = BookingInput {
            package_id: Some("abc123".into()),
            ..Default::default()
        };
        let body = encode(&BOOKING, &input, None).unwrap();
        assert_eq!(json_body(&body), json!({"package_id": "abc123"}));
    }

    #[test]
    fn unmapped_fields_pass_through() {
        let input = ArticleInput {
            title: Some("Pantai".into()),
            excerpt: Some("Ringkas".into()),
            published_at: Some("2025-12-20".into()),
            tags: Some(vec!["laut".into()]),
            ..Default::default()
        };
        let body = encode(&ARTICLE, &input, None).unwrap();
        assert_eq!(
            json_body(&body),
            json!({"judul": "Pantai", "excerpt": "Ringkas", "tanggal": "2025-12-20", "tags": ["laut"]})
        );
    }

    #[test]
    fn package_with_image_is_multipart() {
        let input = PackageInput {
            name: Some("Bromo".into()),
            price: Some(1_500_000.0),
            includes: Some(vec!["Jeep".into(), "Makan".into()]),
            is_active: Some(true),
            ..Default::default()
        };
        let image = Attachment::new("bromo.jpg", "image/jpeg", vec![0xFF, 0xD8]);
        let body = encode(&PACKAGE, &input, Some(image.clone())).unwrap();

        let form = body.as_multipart().unwrap();
        assert_eq!(form.text_value("name"), Some("Bromo"));
        assert_eq!(form.text_value("harga"), Some("1500000"));
        assert_eq!(form.text_value("fasilitas"), Some(r#"["Jeep","Makan"]"#));
        assert_eq!(form.text_value("is_active"), Some("true"));
        assert_eq!(form.attachment("image"), Some(&image));
        assert!(form.text_value("price").is_none());
    }

    #[test]
    fn whole_prices_have_no_fraction() {
        let input = PackageInput {
            price: Some(2_750_000.0),
            ..Default::default()
        };
        let body = encode(&PACKAGE, &input, None).unwrap();
        assert_eq!(body.as_json().unwrap(), r#"{"harga":2750000}"#);

        let input = PackageInput {
            price: Some(99.5),
            ..Default::default()
        };
        assert_eq!(json_body(&encode(&PACKAGE, &input, None).unwrap()), json!({"harga": 99.5}));
    }

    #[test]
    fn attachment_on_json_only_endpoint_is_rejected() {
        let file = Attachment::new("x.txt", "text/plain", b"x".to_vec());
        let err = encode(&BOOKING, &BookingInput::default(), Some(file)).unwrap_err();
        assert!(matches!(err, ApiError::Unexpected { .. }));
    }

    #[test]
    fn null_fields_are_not_sent_as_parts() {
        let payload = json!({"title": "A", "excerpt": null});
        let file = Attachment::new("c.png", "image/png", vec![1]);
        let body = encode(&ARTICLE, &payload, Some(file)).unwrap();
        assert_eq!(body.as_multipart().unwrap().field_names(), vec!["judul", "cover_image"]);
    }

    #[test]
    fn multipart_bytes_layout() {
        let mut form = MultipartForm::new();
        form.text("judul", "Halo");
        form.file("cover_image", Attachment::new("a.png", "image/png", b"PNG".to_vec()));
        let boundary = form.boundary().to_string();
        let expected = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"judul\"\r\n\r\nHalo\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"cover_image\"; filename=\"a.png\"\r\n\
             Content-Type: image/png\r\n\r\nPNG\r\n--{b}--\r\n",
            b = boundary
        );
        assert_eq!(String::from_utf8(form.to_bytes()).unwrap(), expected);
        assert_eq!(form.content_type(), format!("multipart/form-data; boundary={boundary}"));
    }

    #[test]
    fn boundaries_are_unique() {
        assert_ne!(MultipartForm::new().boundary(), MultipartForm::new().boundary());
    }
}
