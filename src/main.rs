use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travelviz_api::middleware::rate_limit::RateLimiter;
use travelviz_api::routes;
use travelviz_api::services::temp_images::TempImageStore;
use travelviz_api::services::AppState;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8000;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let state = web::Data::new(AppState::from_env());
    let rate_limiter = web::Data::new(RateLimiter::default());
    let temp_images = web::Data::new(TempImageStore::default());

    println!("Attempting to bind to {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(state.clone())
            .app_data(rate_limiter.clone())
            .app_data(temp_images.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
