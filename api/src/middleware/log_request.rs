use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts},
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::TypedHeader;
use headers::{Origin, UserAgent};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::info;

/// Logs method, path, IP address, origin and user-agent for each incoming HTTP
/// request, then the response status and latency. CORS preflight `OPTIONS`
/// requests are passed through silently.
///
/// ### Usage:
/// ```ignore
/// use axum::Router;
/// use axum::middleware::from_fn;
/// use api::middleware::log_request;
///
/// let app = Router::new().layer(from_fn(log_request));
/// ```
///
/// The client address comes from [`ConnectInfo`], so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`. Without it the IP is logged
/// as `unknown`.
pub async fn log_request(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let (mut parts, body) = req.into_parts();

    if parts.method == Method::OPTIONS {
        let req = Request::from_parts(parts, body);
        return Ok(next.run(req).await);
    }

    let ip = ConnectInfo::<SocketAddr>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let origin = TypedHeader::<Origin>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(o)| o.to_string());

    let user_agent = TypedHeader::<UserAgent>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(ua)| ua.to_string());

    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();

    info!(
        method = ?method,
        path = %path,
        ip = ip.unwrap_or_else(|| "unknown".into()),
        origin = origin.unwrap_or_else(|| "unknown".into()),
        user_agent = user_agent.unwrap_or_else(|| "unknown".into()),
        "Incoming request"
    );

    let started = Instant::now();
    let req = Request::from_parts(parts, body);
    let response = next.run(req).await;

    info!(
        method = ?method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );

    Ok(response)
}
