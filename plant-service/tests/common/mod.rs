//! Shared helpers for plant-service integration tests.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use image::{DynamicImage, ImageFormat, RgbImage};
use plant_service::config::PlantConfig;
use plant_service::services::providers::mock::MockProvider;
use plant_service::{build_router, AppState};
use serde_json::Value;
use service_core::config::Config;
use std::io::Cursor;
use std::sync::Arc;

pub const BOUNDARY: &str = "plant-test-boundary";

/// Config with no credential, listening on a random local port.
pub fn test_config() -> PlantConfig {
    let common = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    PlantConfig::from_lookup(common, |_| None).expect("Failed to build test config")
}

pub fn app_with(model: Arc<MockProvider>) -> Router {
    build_router(AppState::new(test_config(), model))
}

/// A small, valid PNG leaf stand-in.
pub fn png_bytes() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, image::Rgb([20, 140, 30])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    out.into_inner()
}

/// One part of a hand-built multipart body.
pub struct FormPart<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub data: &'a [u8],
}

pub fn multipart_request(uri: &str, parts: &[FormPart<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n",
                    part.name
                )
                .as_bytes(),
            ),
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
