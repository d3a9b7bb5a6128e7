//! HTTP timing middleware
//!
//! Records request count and latency for every request/response cycle.
//!
//! The per-request flow is `START -> DISPATCHED -> COMPLETED`:
//! [`RequestTimer::on_start`] captures a [`RequestContext`] before the handler
//! runs, and [`RequestTimer::on_complete`] turns it into one counter increment
//! and one histogram observation once the response exists. The actix-web
//! [`TimingMiddleware`] only composes those two calls around the inner service.

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use tracing::trace;

use crate::metrics_core::MetricsRecorder;

/// Endpoint label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// What the timer needs to know before dispatch.
#[derive(Debug, Clone, Copy)]
pub struct RequestInfo<'a> {
    pub method: &'a Method,
}

/// What the timer needs to know after the handler produced a response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseInfo<'a> {
    /// Route template such as `/users/{id}`; `None` when nothing matched.
    pub route: Option<&'a str>,
    pub status: u16,
}

/// Per-request state, stored in the request extensions between the two hooks.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub started_at: Instant,
    pub method: &'static str,
}

/// Start/complete hooks around handler dispatch.
#[derive(Clone)]
pub struct RequestTimer {
    metrics: Arc<dyn MetricsRecorder>,
}

impl RequestTimer {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { metrics }
    }

    /// START: capture the clock and the method label.
    pub fn on_start(&self, info: &RequestInfo<'_>) -> RequestContext {
        RequestContext {
            started_at: Instant::now(),
            method: method_str(info.method),
        }
    }

    /// COMPLETED: record count and latency, or skip if there is no context.
    pub fn on_complete(&self, ctx: Option<RequestContext>, info: &ResponseInfo<'_>) {
        let Some(ctx) = ctx else {
            trace!("No request context at completion, skipping metrics update");
            return;
        };

        let elapsed = ctx.started_at.elapsed().as_secs_f64();
        let route = info.route.unwrap_or(UNMATCHED_ROUTE);

        self.metrics.record_request(ctx.method, route, info.status);
        self.metrics.record_latency(ctx.method, route, elapsed);
    }
}

/// HTTP timing middleware factory
#[derive(Clone)]
pub struct TimingMiddleware {
    timer: RequestTimer,
}

impl TimingMiddleware {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            timer: RequestTimer::new(metrics),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingService {
            service: Rc::new(service),
            timer: self.timer.clone(),
        }))
    }
}

pub struct TimingService<S> {
    service: Rc<S>,
    timer: RequestTimer,
}

impl<S, B> Service<ServiceRequest> for TimingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let timer = self.timer.clone();

        let ctx = timer.on_start(&RequestInfo {
            method: req.method(),
        });
        req.extensions_mut().insert(ctx);

        Box::pin(async move {
            let result = srv.call(req).await;

            match &result {
                Ok(response) => {
                    let request = response.request();
                    let ctx = request.extensions_mut().remove::<RequestContext>();
                    let route = request.match_pattern();
                    timer.on_complete(
                        ctx,
                        &ResponseInfo {
                            route: route.as_deref(),
                            status: response.status().as_u16(),
                        },
                    );
                }
                // The request (and its context) went down with the error.
                Err(e) => {
                    trace!("Inner service failed, skipping metrics update: {}", e);
                }
            }

            result
        })
    }
}

/// Map HTTP method to a static string (avoids allocation, bounds cardinality).
fn method_str(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "HEAD" => "HEAD",
        "OPTIONS" => "OPTIONS",
        "PATCH" => "PATCH",
        _ => "OTHER",
    }
}
