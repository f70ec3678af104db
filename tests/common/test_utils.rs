use axum::{
    body::Body,
    http::{Request, header},
};
use image::{DynamicImage, ImageFormat};
use ocr_serving::config::GatewayConfig;
use std::io::Cursor;

pub const BOUNDARY: &str = "ocr-test-boundary";

/// Encode a blank image of the given size in `format`
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode test image");
    buffer
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    image_bytes(width, height, ImageFormat::Png)
}

/// Build a multipart body with one file part
pub fn multipart_body(field: &str, content_type: Option<&str>, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"upload.bin\"\r\n",
            field
        )
        .as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Build a `POST /gateway/ocr` request carrying one uploaded file
pub fn upload_request(field: &str, content_type: Option<&str>, payload: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/gateway/ocr")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, content_type, payload)))
        .unwrap()
}

/// Gateway configuration pointing at `base_url` with a short timeout
pub fn gateway_config(base_url: &str, timeout_secs: u64) -> GatewayConfig {
    GatewayConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        inference_url: format!("{}/v2/models/ocr-model/infer", base_url),
        timeout_secs,
    }
}

pub async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec()
}
