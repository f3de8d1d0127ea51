//! Snapshot of the environment variables that may override settings.
//!
//! The snapshot is taken once, at process entry, and then owned by
//! [`Settings`](crate::Settings). Nothing downstream reads the process
//! environment again.

use figment::providers::Env;
use serde::{Deserialize, Serialize};

pub const PUBLIC_PATH: &str = "PUBLIC_PATH";
pub const DEV_SERVER_PUBLIC: &str = "DEV_SERVER_PUBLIC";
pub const DEV_SERVER_HOST: &str = "DEV_SERVER_HOST";
pub const DEV_SERVER_PORT: &str = "DEV_SERVER_PORT";
pub const DEV_SERVER_POLL: &str = "DEV_SERVER_POLL";
pub const DEV_SERVER_HTTPS: &str = "DEV_SERVER_HTTPS";

/// Every variable the snapshot looks at.
pub const ENV_VARS: [&str; 6] = [
    PUBLIC_PATH,
    DEV_SERVER_PUBLIC,
    DEV_SERVER_HOST,
    DEV_SERVER_PORT,
    DEV_SERVER_POLL,
    DEV_SERVER_HTTPS,
];

/// Raw environment values, kept as strings.
///
/// Values are not validated or parsed: a port stays whatever the variable spelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvOverrides {
    pub public_path: Option<String>,
    pub dev_server_public: Option<String>,
    pub dev_server_host: Option<String>,
    pub dev_server_port: Option<String>,
    pub dev_server_poll: Option<String>,
    pub dev_server_https: Option<String>,
}

impl EnvOverrides {
    /// Read the documented variables from the process environment.
    ///
    /// The provider's `iter()` yields the text as set; nothing is parsed as
    /// TOML, so `08080` or `[::1]` survive unchanged.
    pub fn capture() -> Self {
        let env = Env::raw().only(&ENV_VARS);
        let pairs = env
            .iter()
            .map(|(key, value)| (key.as_str().to_owned(), value));
        let overrides = Self::from_pairs(pairs);
        tracing::debug!(?overrides, "captured environment overrides");
        overrides
    }

    /// Build a snapshot from `(VARIABLE, value)` pairs. Unknown names are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut overrides = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref().to_ascii_uppercase().as_str() {
                PUBLIC_PATH => &mut overrides.public_path,
                DEV_SERVER_PUBLIC => &mut overrides.dev_server_public,
                DEV_SERVER_HOST => &mut overrides.dev_server_host,
                DEV_SERVER_PORT => &mut overrides.dev_server_port,
                DEV_SERVER_POLL => &mut overrides.dev_server_poll,
                DEV_SERVER_HTTPS => &mut overrides.dev_server_https,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        overrides
    }
}

/// Pick the environment value when it is present and non-empty.
pub(crate) fn pick<'a>(overridden: &'a Option<String>, fallback: &'a str) -> &'a str {
    overridden
        .as_deref()
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_ignores_unknown_names() {
        let env = EnvOverrides::from_pairs([("DEV_SERVER_PORT", "9000"), ("HOME", "/root")]);
        assert_eq!(env.dev_server_port.as_deref(), Some("9000"));
        assert!(env.public_path.is_none());
    }

    #[test]
    fn pick_skips_empty_values() {
        assert_eq!(pick(&Some(String::new()), "fallback"), "fallback");
        assert_eq!(pick(&None, "fallback"), "fallback");
        assert_eq!(pick(&Some("set".into()), "fallback"), "set");
    }

    #[test]
    fn capture_keeps_numbers_as_text() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DEV_SERVER_PORT", "3000");
            jail.set_env("DEV_SERVER_HTTPS", "1");
            let env = EnvOverrides::capture();
            assert_eq!(env.dev_server_port.as_deref(), Some("3000"));
            assert_eq!(env.dev_server_https.as_deref(), Some("1"));
            Ok(())
        });
    }
}
