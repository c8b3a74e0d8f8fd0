use crate::model::UserContext;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
};

/// Axum extractor for UserContext from request headers.
///
/// Looks for:
/// - X-User-Login: host username scoping repository access checks
/// - X-User-Email: optional user email
///
/// Without headers an anonymous context is used; public repositories still
/// resolve, access-restricted ones report not-found.
#[async_trait]
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        if let Some(username) = extract_header_value(headers, "x-user-login") {
            let user_email = extract_header_value(headers, "x-user-email");
            Ok(UserContext::with_email(username, user_email))
        } else {
            Ok(UserContext::anonymous())
        }
    }
}

/// Extract header value as string
fn extract_header_value(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};

    #[test]
    fn extracts_login_and_email_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-user-login"),
            HeaderValue::from_static("octocat"),
        );
        headers.insert(
            HeaderName::from_static("x-user-email"),
            HeaderValue::from_static("octocat@example.com"),
        );

        assert_eq!(
            extract_header_value(&headers, "x-user-login"),
            Some("octocat".to_string())
        );
        assert_eq!(
            extract_header_value(&headers, "x-user-email"),
            Some("octocat@example.com".to_string())
        );
    }

    #[test]
    fn user_context_construction() {
        let ctx = UserContext::with_email("octocat", Some("octocat@example.com".to_string()));
        assert_eq!(ctx.username, "octocat");
        assert_eq!(ctx.user_email.as_deref(), Some("octocat@example.com"));

        assert_eq!(UserContext::default(), UserContext::anonymous());
    }
}
