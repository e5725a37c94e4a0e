//! Query translation configuration.

use crate::translate::LOCAL_DATE_TIME_SUFFIX;

/// Configuration for the path provider.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Register the time translators (instant conversion, local clock access).
    pub time_translators: bool,

    /// Sub-field appended when reading the local clock of an offset date-time.
    pub local_date_time_suffix: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            time_translators: true,
            local_date_time_suffix: LOCAL_DATE_TIME_SUFFIX.to_string(),
        }
    }
}
