use actix_web::web;

use crate::handlers::contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contact")
            .service(
                web::resource("")
                    .route(web::post().to(contact::submit_message))
            )
            .service(
                web::resource("/info")
                    .route(web::get().to(contact::get_contact_info))
                    .route(web::put().to(contact::update_contact_info))
            )
            .service(
                web::resource("/messages")
                    .route(web::get().to(contact::list_messages))
            )
            .service(
                web::resource("/messages/{message_id}")
                    .route(web::get().to(contact::get_message))
                    .route(web::delete().to(contact::delete_message))
            )
    );
}
