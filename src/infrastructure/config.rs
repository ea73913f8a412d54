use anyhow::{Context, Result, bail};
use std::{env, fmt::Display, str::FromStr};

pub const MIN_SECRET_LEN: usize = 16;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub cors_origin: String,
    pub log_level: String,
    pub admin: Option<AdminSeed>,
}

/// Credentials of the account promoted to admin at startup.
#[derive(Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("cors_origin", &self.cors_origin)
            .field("log_level", &self.log_level)
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Reads the process environment. Runs before logging exists, so
    /// problems surface as errors rather than log lines.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            bail!("JWT_SECRET must be at least {MIN_SECRET_LEN} characters");
        }

        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed {
                name: lookup("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
                email,
                password,
            }),
            (None, None) => None,
            _ => bail!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            host: try_load(&lookup, "FITTRACK_HOST", "127.0.0.1")?,
            port: try_load(&lookup, "FITTRACK_PORT", "8080")?,
            jwt_secret,
            token_ttl_secs: try_load(&lookup, "TOKEN_TTL_SECS", "3600")?,
            cors_origin: try_load(&lookup, "CORS_ORIGIN", "http://localhost:3000")?,
            log_level: try_load(&lookup, "LOG_LEVEL", "info")?,
            admin,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.parse()
        .map_err(|e| anyhow::anyhow!("Invalid {key} value {raw:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const SECRET: (&str, &str) = ("JWT_SECRET", "0123456789abcdef0123");

    #[test]
    fn test_defaults_apply_when_only_secret_is_set() {
        let config = load(&[SECRET]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_secs, 3600);
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.log_level, "info");
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_secret_is_required_and_long_enough() {
        assert!(load(&[]).is_err());
        assert!(load(&[("JWT_SECRET", "short")]).is_err());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = load(&[SECRET, ("FITTRACK_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("FITTRACK_PORT"));
    }

    #[test]
    fn test_admin_seed_needs_both_email_and_password() {
        assert!(load(&[SECRET, ("ADMIN_EMAIL", "root@example.com")]).is_err());

        let config = load(&[
            SECRET,
            ("ADMIN_EMAIL", "root@example.com"),
            ("ADMIN_PASSWORD", "changeme"),
        ])
        .unwrap();
        let admin = config.admin.unwrap();
        assert_eq!(admin.email, "root@example.com");
        assert_eq!(admin.name, "Administrator");
        assert!(!format!("{admin:?}").contains("changeme"));
    }
}
