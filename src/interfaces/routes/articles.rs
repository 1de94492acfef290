use actix_web::web;

use crate::handlers::articles;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/articles")
            .service(
                web::resource("")
                    .route(web::get().to(articles::list_articles))
                    .route(web::post().to(articles::create_article))
            )
            .service(
                web::resource("/featured")
                    .route(web::get().to(articles::list_featured_articles))
            )
            .service(
                web::resource("/category/{category}")
                    .route(web::get().to(articles::list_articles_by_category))
            )
            .service(
                web::resource("/tag/{tag}")
                    .route(web::get().to(articles::list_articles_by_tag))
            )
            .service(
                web::resource("/{article_id}")
                    .route(web::get().to(articles::get_article))
                    .route(web::put().to(articles::update_article))
                    .route(web::delete().to(articles::delete_article))
            )
            .service(
                web::resource("/{article_id}/like")
                    .route(web::post().to(articles::like_article))
            )
            .service(
                web::resource("/{article_id}/upload-pdf")
                    .route(web::post().to(articles::upload_article_pdf))
            )
    );
}
