//! HTTP Basic authentication middleware and extractors.
//!
//! Reads (`GET`, `HEAD`, `OPTIONS`) are public. Every other method must
//! carry credentials accepted by the configured [`CredentialVerifier`].

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::{Method, header},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use agora_core::ports::{AuthError, CredentialVerifier, Principal};
use agora_core::{DomainError, DomainResult};
use agora_infra::parse_basic_header;

use crate::middleware::error::AppError;
use crate::observability::RequestId;

/// Basic-auth middleware factory.
pub struct BasicAuth {
    verifier: Arc<dyn CredentialVerifier>,
}

impl BasicAuth {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = BasicAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthService {
            service,
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct BasicAuthService<S> {
    service: S,
    verifier: Arc<dyn CredentialVerifier>,
}

impl<S, B> Service<ServiceRequest> for BasicAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public(req.method()) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        match authenticate(req.headers(), self.verifier.as_ref()) {
            Ok(principal) => {
                tracing::debug!(
                    principal = %principal.username,
                    method = %req.method(),
                    path = %req.path(),
                    "Request authenticated"
                );
                req.extensions_mut().insert(principal);

                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(err) => {
                let request_id = req
                    .extensions()
                    .get::<RequestId>()
                    .map(|id| id.as_str().to_string());
                tracing::warn!(
                    request_id = request_id.as_deref().unwrap_or("-"),
                    method = %req.method(),
                    path = %req.path(),
                    "Rejected request: {}",
                    err
                );

                let response = HttpResponse::from_error(AppError::from(err));
                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
        }
    }
}

fn is_public(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn authenticate(
    headers: &header::HeaderMap,
    verifier: &dyn CredentialVerifier,
) -> DomainResult<Principal> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;
    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedHeader("header is not valid ASCII".to_string()))?;

    let (username, password) = parse_basic_header(value)?;
    Ok(verifier.verify(&username, &password)?)
}

/// Authenticated caller, as established by [`BasicAuth`].
///
/// Write handlers take it to attribute the change in the log:
/// ```ignore
/// async fn delete(
///     state: web::Data<AppState>,
///     identity: Identity,
///     path: web::Path<i64>,
/// ) -> AppResult<HttpResponse> {
///     let id = path.into_inner();
///     state.services.comments.delete(id).await?;
///     tracing::info!(principal = %identity.username, comment_id = id, "Comment deleted");
///     Ok(HttpResponse::Ok().json(ApiResponse::deleted("Comment", id)))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
}

impl From<Principal> for Identity {
    fn from(principal: Principal) -> Self {
        Self {
            username: principal.username,
        }
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<Principal>()
            .cloned()
            .map(Identity::from)
            .ok_or_else(|| AppError::from(DomainError::from(AuthError::MissingAuth)));

        ready(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use agora_infra::StaticCredentialStore;
    use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
    use std::collections::HashMap;

    fn store() -> StaticCredentialStore {
        StaticCredentialStore::new(HashMap::from([(
            "admin".to_string(),
            "secret".to_string(),
        )]))
    }

    fn headers(value: &str) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_authenticate_accepts_lowercase_scheme() {
        let value = format!("basic {}", BASE64.encode(b"admin:secret"));
        let principal = authenticate(&headers(&value), &store()).unwrap();
        assert_eq!(principal.username, "admin");
    }

    #[test]
    fn test_authenticate_failures_are_unauthorized() {
        let missing = authenticate(&header::HeaderMap::new(), &store());
        assert!(matches!(
            missing,
            Err(DomainError::Unauthorized(AuthError::MissingAuth))
        ));

        let value = format!("Basic {}", BASE64.encode(b"admin:wrong"));
        let wrong = authenticate(&headers(&value), &store());
        assert!(matches!(
            wrong,
            Err(DomainError::Unauthorized(AuthError::InvalidCredentials))
        ));
    }

    #[actix_web::test]
    async fn test_identity_comes_from_the_principal() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(Principal {
            username: "admin".to_string(),
        });

        let identity = Identity::extract(&req).await.unwrap();
        assert_eq!(identity.username, "admin");
    }

    #[actix_web::test]
    async fn test_identity_without_principal_is_rejected() {
        let req = TestRequest::default().to_http_request();

        let err = Identity::extract(&req).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
