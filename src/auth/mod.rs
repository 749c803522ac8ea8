//! HTTP authentication for wrapped APIs.
//!
//! Only HTTP Basic is supported. A [`BasicAuth`] is derived from a
//! user/password pair when both are present, and is what the request wrapper
//! attaches as the `Authorization` header.

pub mod basic;

use std::fmt;

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Builds credentials only when both parts are present and non-empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use apilink::auth::BasicAuth;
    ///
    /// assert!(BasicAuth::from_parts(Some("user"), Some("secret")).is_some());
    /// assert!(BasicAuth::from_parts(Some("user"), None).is_none());
    /// assert!(BasicAuth::from_parts(Some("user"), Some("")).is_none());
    /// ```
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some(Self::new(user, pass))
            }
            _ => None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// The `Authorization` header value for these credentials.
    pub fn header_value(&self) -> String {
        basic::basic_auth(&self.username, &self.password)
    }
}

// Keeps passwords out of debug logs
impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_both() {
        assert_eq!(
            BasicAuth::from_parts(Some("u"), Some("p")),
            Some(BasicAuth::new("u", "p"))
        );
        assert_eq!(BasicAuth::from_parts(None, Some("p")), None);
        assert_eq!(BasicAuth::from_parts(Some("u"), None), None);
        assert_eq!(BasicAuth::from_parts(Some(""), Some("p")), None);
        assert_eq!(BasicAuth::from_parts(None, None), None);
    }

    #[test]
    fn test_header_value() {
        let auth = BasicAuth::new("user", "pass");
        assert_eq!(auth.header_value(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", BasicAuth::new("user", "hunter2"));
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
    }
}
