use actix_web::web;

use crate::handlers::{home::home, portfolio, system};

mod articles;
mod contact;
mod experience;
mod json_error;
mod projects;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .service(system::health_check)
            .configure(articles::config_routes)
            .configure(projects::config_routes)
            .configure(experience::config_routes)
            .configure(contact::config_routes)
            .service(
                web::resource("/portfolio")
                    .route(web::get().to(portfolio::get_portfolio))
            )
    );
}

/// Body decoding settings for JSON and multipart requests.
pub fn configure_body_limits(max_upload_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| json_error::config_routes(cfg, max_upload_bytes)
}
