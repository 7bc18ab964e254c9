use subtle::ConstantTimeEq;

/// Decides whether a caller may perform a destructive operation.
pub trait DeleteAuthorizer: Send + Sync {
    /// `secret` is whatever the caller presented; `None` when nothing was sent.
    fn authorize(&self, secret: Option<&str>) -> bool;
}

/// Proof of possession of one static shared secret, compared in constant time.
pub struct StaticSecretAuthorizer {
    secret: String,
}

impl StaticSecretAuthorizer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl DeleteAuthorizer for StaticSecretAuthorizer {
    fn authorize(&self, secret: Option<&str>) -> bool {
        let Some(presented) = secret else {
            return false;
        };
        bool::from(presented.as_bytes().ct_eq(self.secret.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let auth = StaticSecretAuthorizer::new("hunter2");
        assert!(auth.authorize(Some("hunter2")));
        assert!(!auth.authorize(Some("hunter")));
        assert!(!auth.authorize(Some("hunter22")));
        assert!(!auth.authorize(Some("HUNTER2")));
        assert!(!auth.authorize(Some("")));
        assert!(!auth.authorize(None));
    }
}
