//! # Zone Resolution
//!
//! Maps zone ids read off the wire to zone-rules objects. The rules
//! themselves come from the IANA database compiled into `chrono-tz`; this
//! module only looks them up.

use chrono_tz::Tz;
use tracing::warn;

use crate::config::ZoneConfig;
use crate::error::{Error, Result};

/// Resolves zone ids to zone rules.
///
/// Implementations must be safe to share between threads: codecs hold a
/// provider and may be used from any thread the host serializes on.
pub trait ZoneProvider: Send + Sync {
    /// Looks up a zone by id.
    fn zone(&self, id: &str) -> Result<Tz>;

    /// The zone the host runs in.
    fn system_default(&self) -> Tz;
}

/// Zone provider backed by the bundled IANA time-zone database.
#[derive(Debug, Clone, Default)]
pub struct TzdbProvider {
    default_zone: Option<Tz>,
}

impl TzdbProvider {
    /// Creates a provider that asks the operating system for the default zone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider from configuration.
    ///
    /// Fails if the configured default zone is not in the database.
    pub fn from_config(config: &ZoneConfig) -> Result<Self> {
        let default_zone = match &config.default_zone {
            Some(id) => Some(lookup(id).ok_or_else(|| Error::UnrecognizedZoneId(id.clone()))?),
            None => None,
        };

        Ok(Self { default_zone })
    }
}

impl ZoneProvider for TzdbProvider {
    fn zone(&self, id: &str) -> Result<Tz> {
        lookup(id).ok_or_else(|| Error::UnrecognizedZoneId(id.to_string()))
    }

    fn system_default(&self) -> Tz {
        if let Some(zone) = self.default_zone {
            return zone;
        }

        match iana_time_zone::get_timezone() {
            Ok(id) => lookup(&id).unwrap_or_else(|| {
                warn!(zone = %id, "host zone is not in the tz database, using UTC");
                Tz::UTC
            }),
            Err(err) => {
                warn!(error = %err, "could not read host zone, using UTC");
                Tz::UTC
            }
        }
    }
}

/// Exact id match first, then a case-insensitive scan.
fn lookup(id: &str) -> Option<Tz> {
    if id.is_empty() {
        return None;
    }
    if let Ok(zone) = id.parse::<Tz>() {
        return Some(zone);
    }
    chrono_tz::TZ_VARIANTS
        .iter()
        .copied()
        .find(|zone| zone.name().eq_ignore_ascii_case(id))
}
