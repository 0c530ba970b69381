use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps a value that must not leak into log output.
///
/// `Debug` and `Display` render a redacted form; `Serialize` writes the real
/// value so the wrapper can sit inside API responses unchanged.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T: AsRef<str>> Masked<T> {
    /// Redacted rendering that keeps enough of an email address to correlate
    /// log lines: the first character of the local part and the domain.
    fn redacted(&self) -> String {
        let value = self.0.as_ref();
        match value.split_once('@') {
            Some((local, domain)) => {
                let head: String = local.chars().take(1).collect();
                format!("{}***@{}", head, domain)
            }
            None => "********".to_string(),
        }
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_keeps_domain_only() {
        let email = Masked::from("guest@example.com");
        assert_eq!(format!("{}", email), "g***@example.com");
        assert_eq!(format!("{:?}", email), "g***@example.com");
    }

    #[test]
    fn non_email_is_fully_hidden() {
        let secret = Masked::new("hunter2".to_string());
        assert_eq!(secret.to_string(), "********");
        assert_eq!(secret.expose(), "hunter2");
    }
}
