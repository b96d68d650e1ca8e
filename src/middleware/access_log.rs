use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error,
};
use futures::future::LocalBoxFuture;
use log::{info, warn};
use std::rc::Rc;
use std::time::Instant;

/// One access log line per request.
///
/// Requests are logged by their route pattern (`/api/chirps/{chirp_id}`)
/// rather than the raw path so ids don't end up in the logs. Only the
/// presence of credentials is recorded, never the header value.
pub struct AccessLog;

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(AccessLogService {
            service: Rc::new(service),
        }))
    }
}

pub struct AccessLogService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AccessLogService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().clone();
        let credentials = if req.headers().contains_key(AUTHORIZATION) {
            "with credentials"
        } else {
            "anonymous"
        };

        let service = self.service.clone();

        Box::pin(async move {
            let res = service.call(req).await?;

            // Resolved after routing; unmatched requests fall back to the path
            let route = res
                .request()
                .match_pattern()
                .unwrap_or_else(|| res.request().path().to_string());
            let status = res.status().as_u16();
            let elapsed_ms = started.elapsed().as_millis();

            if res.status().is_server_error() {
                warn!("{} {} {} -> {} ({}ms)", method, route, credentials, status, elapsed_ms);
            } else {
                info!("{} {} {} -> {} ({}ms)", method, route, credentials, status, elapsed_ms);
            }

            Ok(res)
        })
    }
}
