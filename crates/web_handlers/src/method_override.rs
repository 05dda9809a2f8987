use std::future::{Ready, ready};

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};
use serde::Deserialize;

/// Middleware that lets HTML forms reach PUT and DELETE routes.
///
/// A POST whose query string carries `_method=PUT` or `_method=DELETE` is
/// dispatched as that method. Other requests pass through untouched. Must wrap the app so it runs before routing.
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

/// Service that implements the method override logic
pub struct MethodOverrideService<S> {
    service: S,
}

#[derive(Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// The method a POST asks to be treated as, if any
pub fn requested_method(query_string: &str) -> Option<Method> {
    let query = web::Query::<OverrideQuery>::from_query(query_string).ok()?;

    match query.method.as_deref()?.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if *req.method() == Method::POST {
            if let Some(method) = requested_method(req.query_string()) {
                log::debug!("Overriding POST {} as {}", req.path(), method);
                req.head_mut().method = method;
            }
        }

        self.service.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_method() {
        assert_eq!(requested_method("_method=PUT"), Some(Method::PUT));
        assert_eq!(requested_method("_method=delete"), Some(Method::DELETE));
        assert_eq!(requested_method("page=2&_method=DELETE"), Some(Method::DELETE));
    }

    #[test]
    fn test_unsupported_or_missing_override_is_ignored() {
        assert_eq!(requested_method(""), None);
        assert_eq!(requested_method("_method=GET"), None);
        assert_eq!(requested_method("_method=PATCH"), None);
        assert_eq!(requested_method("_method=TRACE"), None);
        assert_eq!(requested_method("method=PUT"), None);
    }
}
