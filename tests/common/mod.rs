use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};

use travelviz_api::middleware::rate_limit::RateLimiter;
use travelviz_api::routes;
use travelviz_api::services::temp_images::TempImageStore;
use travelviz_api::services::AppState;

/// Test harness around the real route table. Provider slots are left
/// unconfigured so every endpoint exercises its fallback chain without
/// network traffic.
pub struct TestApp {
    pub state: web::Data<AppState>,
    pub rate_limiter: web::Data<RateLimiter>,
    pub temp_images: web::Data<TempImageStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            state: web::Data::new(AppState::unconfigured()),
            rate_limiter: web::Data::new(RateLimiter::default()),
            temp_images: web::Data::new(TempImageStore::default()),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .app_data(self.rate_limiter.clone())
            .app_data(self.temp_images.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    }
}

/// A minimal multipart body with one file field and optional extra text
/// fields. Returns the content-type header value and the raw body.
#[allow(dead_code)]
pub fn multipart_body(
    file_field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
    text_fields: &[(&str, &str)],
) -> (String, Vec<u8>) {
    let boundary = "----travelviz-test-boundary";
    let mut body: Vec<u8> = Vec::new();

    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{file_field}\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");

    for (name, value) in text_fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

/// Tiny but structurally valid JPEG payload (magic bytes + padding).
#[allow(dead_code)]
pub fn fake_jpeg() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend_from_slice(&[0x00; 64]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}
