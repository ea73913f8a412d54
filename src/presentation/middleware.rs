use crate::domain::id::RecordId;
use crate::domain::user::{Actor, Role};
use crate::infrastructure::security::validate_token;
use crate::presentation::handlers::{ApiError, AppState};
use actix_web::{
    Error, HttpMessage, ResponseError, web,
    body::{EitherBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
    time::Instant,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

type LocalBoxFuture<T> = Pin<Box<dyn std::future::Future<Output = T>>>;

/// Per-request correlation id, echoed back in `x-request-id`.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Caller identity placed in request extensions by [`JwtAuthMiddleware`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: RecordId,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.user_id,
            role: self.role,
        }
    }
}

// Request ID Middleware
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestIdMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = Uuid::new_v4().to_string();
        req.extensions_mut().insert(RequestId(request_id.clone()));

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            res.headers_mut().insert(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_str(&request_id)
                    .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
            );
            Ok(res)
        })
    }
}

// Timing Middleware
pub struct TimingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct TimingMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TimingMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let duration_ms = start.elapsed().as_millis();

            res.headers_mut().insert(
                HeaderName::from_static("x-response-time"),
                HeaderValue::from_str(&format!("{}ms", duration_ms))
                    .unwrap_or_else(|_| HeaderValue::from_static("0ms")),
            );

            info!(
                method = %method,
                path = %path,
                status = res.status().as_u16(),
                duration_ms = duration_ms,
                request_id = %request_id,
                "Request processed"
            );

            Ok(res)
        })
    }
}

/// Rejects requests without a valid bearer token with 401 and exposes the
/// caller as [`AuthenticatedUser`] to the handlers behind it.
#[derive(Clone)]
pub struct JwtAuthMiddleware {
    secret: Arc<str>,
}

impl JwtAuthMiddleware {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    secret: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claimed = match authenticate(req.headers(), &self.secret) {
            Ok(user) => user,
            Err(err) => return reject(req, err),
        };
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let service = self.service.clone();

        Box::pin(async move {
            // The token only names the caller; the stored account decides the role.
            let user = match current_user(state, &claimed).await {
                Ok(user) => user,
                Err(err) => {
                    warn!(path = %req.path(), error = %err, "Rejected token for unknown account");
                    return Ok(req.into_response(err.error_response()).map_into_right_body());
                }
            };
            debug!(user_id = %user.user_id, role = ?user.role, "Bearer token accepted");
            req.extensions_mut().insert(user);
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn reject<B>(req: ServiceRequest, err: ApiError) -> LocalBoxFuture<Result<ServiceResponse<EitherBody<B>>, Error>>
where
    B: 'static,
{
    warn!(path = %req.path(), error = %err, "Rejected unauthenticated request");
    let response = req.into_response(err.error_response()).map_into_right_body();
    Box::pin(async move { Ok(response) })
}

async fn current_user(
    state: Option<web::Data<AppState>>,
    claimed: &AuthenticatedUser,
) -> Result<AuthenticatedUser, ApiError> {
    let state = state.ok_or_else(|| ApiError::Internal("AppState is not registered".to_string()))?;
    let user = state.auth_service.current_user(claimed.user_id).await?;
    if user.role != claimed.role {
        debug!(user_id = %user.id, token_role = ?claimed.role, role = ?user.role, "Role changed since token was issued");
    }
    Ok(AuthenticatedUser {
        user_id: user.id,
        role: user.role,
    })
}

fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthenticatedUser, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;
    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let claims = validate_token(token, secret)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;
    let user_id = claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    Ok(AuthenticatedUser {
        user_id,
        role: claims.role,
    })
}
