//! Shop Configuration
//!
//! Runtime settings loaded from environment variables, with defaults for every key.

/// Complete shop configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Request channel capacity of every collection actor.
    pub mailbox_capacity: usize,
    /// Page size used by listings that do not pass a `limit`.
    pub default_page_size: u32,
    /// Sender address on order confirmations.
    pub notify_sender: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            default_page_size: 10,
            notify_sender: "no-reply@shop.local".to_string(),
        }
    }
}

impl ShopConfig {
    /// Create configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SHOP_MAILBOX_CAPACITY` | 32 |
    /// | `SHOP_DEFAULT_PAGE_SIZE` | 10 |
    /// | `SHOP_NOTIFY_SENDER` | `no-reply@shop.local` |
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but is not a positive number, or if the
    /// sender is set to an empty value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let mailbox_capacity =
            parse_positive(&lookup, "SHOP_MAILBOX_CAPACITY", defaults.mailbox_capacity)?;
        let default_page_size =
            parse_positive(&lookup, "SHOP_DEFAULT_PAGE_SIZE", defaults.default_page_size)?;

        let notify_sender = match lookup("SHOP_NOTIFY_SENDER") {
            Some(sender) if sender.trim().is_empty() => {
                return Err(ConfigError::EmptyValue("SHOP_NOTIFY_SENDER".to_string()));
            }
            Some(sender) => sender,
            None => defaults.notify_sender,
        };

        Ok(Self {
            mailbox_capacity,
            default_page_size,
            notify_sender,
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable is set but cannot be used.
    #[error("invalid value {value:?} for environment variable {key}")]
    InvalidValue { key: String, value: String },
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

fn parse_positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::from(0) => Ok(value),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(ShopConfig::from_lookup(lookup(&[])), Ok(ShopConfig::default()));
    }

    #[test]
    fn test_overrides() {
        let config = ShopConfig::from_lookup(lookup(&[
            ("SHOP_MAILBOX_CAPACITY", "64"),
            ("SHOP_DEFAULT_PAGE_SIZE", " 25 "),
            ("SHOP_NOTIFY_SENDER", "orders@shop.test"),
        ]))
        .unwrap();
        assert_eq!(config.mailbox_capacity, 64);
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.notify_sender, "orders@shop.test");
    }

    #[test]
    fn test_zero_and_garbage_rejected() {
        assert_eq!(
            ShopConfig::from_lookup(lookup(&[("SHOP_DEFAULT_PAGE_SIZE", "0")])),
            Err(ConfigError::InvalidValue {
                key: "SHOP_DEFAULT_PAGE_SIZE".into(),
                value: "0".into(),
            })
        );
        assert!(matches!(
            ShopConfig::from_lookup(lookup(&[("SHOP_MAILBOX_CAPACITY", "lots")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            ShopConfig::from_lookup(lookup(&[("SHOP_NOTIFY_SENDER", "  ")])),
            Err(ConfigError::EmptyValue("SHOP_NOTIFY_SENDER".into()))
        );
    }
}
