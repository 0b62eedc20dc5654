use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{
        Method,
        header::{self, HeaderMap, HeaderValue},
    },
    middleware::Next,
};

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
// One day.
const MAX_AGE_SECONDS: &str = "86400";

/// Lets any origin post the signup form. Preflight requests are answered here
/// and never reach the router.
pub async fn cors(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let origin = req.headers().get(header::ORIGIN).cloned();

    if *req.method() == Method::OPTIONS {
        let mut preflight = HttpResponse::Ok();
        if req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
        {
            preflight.insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS));
        }
        if let Some(requested) = req.headers().get(header::ACCESS_CONTROL_REQUEST_HEADERS) {
            preflight.insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone()));
        }

        tracing::debug!(origin = ?origin, "Answering CORS preflight request");
        let mut response = req.into_response(preflight.finish());
        allow_origin(response.headers_mut(), origin);
        return Ok(response.map_into_right_body());
    }

    let mut response = next.call(req).await?;
    allow_origin(response.headers_mut(), origin);
    Ok(response.map_into_left_body())
}

fn allow_origin(headers: &mut HeaderMap, origin: Option<HeaderValue>) {
    if let Some(origin) = origin {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(MAX_AGE_SECONDS),
        );
    }
}
