use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::entities::article::{ArticlePayload, ArticleUpload};

/// Article body sent either as JSON or as `multipart/form-data` with an
/// optional `pdf` part. The content type picks the decoder, so each decoder
/// reports its own errors.
#[derive(Debug)]
pub struct ArticleBody {
    pub payload: ArticlePayload,
    pub pdf: Option<TempFile>,
}

fn is_multipart(req: &HttpRequest) -> bool {
    matches!(req.mime_type(), Ok(Some(mime)) if mime.type_() == "multipart")
}

impl FromRequest for ArticleBody {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_multipart(req) {
            let form = MultipartForm::<ArticleUpload>::from_request(req, payload);
            Box::pin(async move {
                let (payload, pdf) = form.await?.into_inner().into_parts();
                Ok(ArticleBody { payload, pdf })
            })
        } else {
            let json = web::Json::<ArticlePayload>::from_request(req, payload);
            Box::pin(async move {
                Ok(ArticleBody { payload: json.await?.into_inner(), pdf: None })
            })
        }
    }
}
