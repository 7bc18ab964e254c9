use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use std::convert::Infallible;

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Secret presented in `X-Admin-Password`, if any.
/// Absent or non-UTF-8 values yield `None`; the service decides what that means.
#[derive(Debug, Clone, Default)]
pub struct AdminPassword(pub Option<String>);

impl AdminPassword {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let value = headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Self(value)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for AdminPassword
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_header_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Admin-Password", HeaderValue::from_static("pw"));
        assert_eq!(AdminPassword::from_headers(&headers).as_deref(), Some("pw"));
    }

    #[test]
    fn missing_header_is_none() {
        assert_eq!(AdminPassword::from_headers(&HeaderMap::new()).as_deref(), None);
    }
}
