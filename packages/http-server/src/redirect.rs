//! The plain-HTTP router that redirects everything to the HTTPS origin.
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Router;

/// Builds the redirect router. Every request is answered with a permanent
/// redirect to `https://{host}{path}`, where the host is the configured
/// canonical domain, falling back to the requested host.
#[must_use]
pub fn router(canonical_domain: Option<String>) -> Router {
    Router::new().fallback(redirect_to_https).with_state(canonical_domain)
}

async fn redirect_to_https(State(canonical_domain): State<Option<String>>, uri: Uri, headers: HeaderMap) -> Response {
    let host = canonical_domain.or_else(|| {
        headers
            .get(header::HOST)
            .and_then(|header_value| header_value.to_str().ok())
            .map(|host| host.split(':').next().unwrap_or(host).to_string())
    });

    match host {
        Some(host) => {
            let path_and_query = uri.path_and_query().map_or("/", |path_and_query| path_and_query.as_str());

            Redirect::permanent(&format!("https://{host}{path_and_query}")).into_response()
        }
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt as _;

    use crate::redirect::router;

    #[tokio::test]
    async fn it_should_redirect_to_the_canonical_domain() {
        let app = router(Some("tracker.example.com".to_string()));

        let response = app
            .oneshot(Request::builder().uri("/room/announce?port=1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "https://tracker.example.com/room/announce?port=1"
        );
    }

    #[tokio::test]
    async fn it_should_fall_back_to_the_requested_host() {
        let app = router(None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/room/scrape")
                    .header("host", "tracker.example.com:80")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers().get("location").unwrap(), "https://tracker.example.com/room/scrape");
    }
}
