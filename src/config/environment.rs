//! Application environment detection.

use std::fmt;

/// Runtime environment, read from `APP_ENV`. Defaults to development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

impl Environment {
    /// Environment variable consulted by `from_env`.
    pub const ENV_VAR: &'static str = "APP_ENV";

    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or(Environment::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "testing" | "test" => Some(Environment::Testing),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_short_and_long_names() {
        assert_eq!(Environment::parse("dev"), Some(Environment::Development));
        assert_eq!(Environment::parse("PRODUCTION"), Some(Environment::Production));
        assert_eq!(Environment::parse("test"), Some(Environment::Testing));
        assert_eq!(Environment::parse("staging"), None);
    }

    #[test]
    fn display_matches_config_file_names() {
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Production.to_string(), "production");
    }
}
