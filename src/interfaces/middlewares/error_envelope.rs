use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use serde_json::json;
use std::{rc::Rc, task::{Context, Poll}};

use crate::errors::AppError;

/// Rewrites every error response into `{ success: false, error, details? }`
/// and logs it. Wrap it outside CORS so rejected origins get the same shape.
/// Errors returned by inner middleware are turned into responses first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorEnvelope {
    expose_diagnostics: bool,
}

impl ErrorEnvelope {
    pub fn new(expose_diagnostics: bool) -> Self {
        ErrorEnvelope { expose_diagnostics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorEnvelope
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorEnvelopeService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ErrorEnvelopeService {
            service: Rc::new(service),
            expose_diagnostics: self.expose_diagnostics,
        })
    }
}

pub struct ErrorEnvelopeService<S> {
    service: Rc<S>,
    expose_diagnostics: bool,
}

impl<S, B> Service<ServiceRequest> for ErrorEnvelopeService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let expose_diagnostics = self.expose_diagnostics;

        Box::pin(async move {
            let method = req.method().to_string();
            let path = req.path().to_string();

            let http_req = req.request().clone();

            let res = match service.call(req).await {
                Ok(res) => res.map_into_boxed_body(),
                Err(err) => ServiceResponse::from_err(err, http_req),
            };

            let Some(err) = res.response().error() else {
                return Ok(res);
            };

            let status = res.status();
            let detail = format!("{:?}", err);

            let mut body = match err.as_error::<AppError>() {
                Some(app_err) => app_err.envelope(),
                None => json!({ "success": false, "error": err.to_string() }),
            };

            if status.is_server_error() {
                tracing::error!(%method, %path, status = status.as_u16(), error = %detail, "Request failed");
            } else {
                tracing::warn!(%method, %path, status = status.as_u16(), error = %detail, "Request rejected");
            }

            if expose_diagnostics {
                body["stack"] = json!(detail);
            }

            let payload = body.to_string();
            Ok(res.map_body(move |head, _| {
                head.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                BoxBody::new(payload)
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use serde_json::Value;

    async fn missing() -> Result<HttpResponse, AppError> {
        Err(AppError::NotFound("Project not found".to_string()))
    }

    async fn broken() -> Result<HttpResponse, AppError> {
        Err(AppError::StorageFailure("relation \"projects\" does not exist".to_string()))
    }

    async fn framework_error() -> Result<HttpResponse, actix_web::Error> {
        Err(actix_web::error::ErrorUnprocessableEntity("unreadable"))
    }

    #[actix_rt::test]
    async fn app_errors_use_their_public_message() {
        let app = test::init_service(
            App::new()
                .wrap(ErrorEnvelope::new(false))
                .route("/missing", web::get().to(missing))
                .route("/broken", web::get().to(broken)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "success": false, "error": "Project not found" }));

        let res = test::call_service(&app, test::TestRequest::get().uri("/broken").to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Database operation failed");
        assert!(body.get("stack").is_none());
    }

    #[actix_rt::test]
    async fn foreign_errors_get_the_same_shape() {
        let app = test::init_service(
            App::new()
                .wrap(ErrorEnvelope::new(false))
                .route("/odd", web::get().to(framework_error)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/odd").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "success": false, "error": "unreadable" }));
    }

    #[actix_rt::test]
    async fn cors_rejections_are_enveloped() {
        let app = test::init_service(
            App::new()
                .wrap(actix_cors::Cors::default().allowed_origin("https://portfolio.example"))
                .wrap(ErrorEnvelope::new(false))
                .route("/missing", web::get().to(missing)),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/missing")
            .insert_header(("Origin", "https://intruder.example"))
            .insert_header(("Access-Control-Request-Method", "GET"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert!(res.status().is_client_error());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[actix_rt::test]
    async fn errors_from_inner_middleware_become_responses() {
        let app = test::init_service(
            App::new()
                .wrap_fn(|_req, _srv| {
                    futures_util::future::err::<ServiceResponse<BoxBody>, Error>(
                        actix_web::error::ErrorForbidden("Blocked"),
                    )
                })
                .wrap(ErrorEnvelope::new(false))
                .route("/missing", web::get().to(missing)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "success": false, "error": "Blocked" }));
    }

    #[actix_rt::test]
    async fn diagnostics_add_a_stack_entry() {
        let app = test::init_service(
            App::new()
                .wrap(ErrorEnvelope::new(true))
                .route("/broken", web::get().to(broken)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/broken").to_request()).await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Database operation failed");
        assert!(body["stack"].as_str().unwrap().contains("projects"));
    }
}
