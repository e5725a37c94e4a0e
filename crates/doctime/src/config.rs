//! Zone configuration.

/// Environment variable that overrides the system default zone.
pub const DEFAULT_ZONE_ENV: &str = "DOCTIME_DEFAULT_ZONE";

/// Configuration for the zone provider.
#[derive(Debug, Clone, Default)]
pub struct ZoneConfig {
    /// Zone id reported as the system default instead of the host's zone.
    ///
    /// `None` asks the operating system.
    pub default_zone: Option<String>,
}

impl ZoneConfig {
    /// Creates a configuration with an explicit default zone.
    pub fn with_default_zone(zone_id: impl Into<String>) -> Self {
        Self {
            default_zone: Some(zone_id.into()),
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// An unset or blank `DOCTIME_DEFAULT_ZONE` leaves the default zone to
    /// the operating system.
    pub fn from_env() -> Self {
        let default_zone = std::env::var(DEFAULT_ZONE_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Self { default_zone }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_zone() {
        assert!(ZoneConfig::default().default_zone.is_none());
    }

    #[test]
    fn test_with_default_zone() {
        let config = ZoneConfig::with_default_zone("Europe/Berlin");
        assert_eq!(config.default_zone.as_deref(), Some("Europe/Berlin"));
    }
}
