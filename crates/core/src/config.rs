// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine configuration.
//!
//! Configuration is JSON with camelCase keys. Every field has a default so an
//! empty object is a valid configuration:
//!
//! ```json
//! {
//!   "domainEvents": {
//!     "publishEnabled": true,
//!     "topic": "cas3-domain-events",
//!     "detailUrlBase": "https://cas3.example"
//!   },
//!   "featureFlags": { "reject-future-departure": true },
//!   "bankHolidays": ["2024-08-26"]
//! }
//! ```

use crate::calendar::WeekdayCalendar;
use crate::ports::FeatureFlags;
use serde::Deserialize;
use std::collections::BTreeMap;
use time::Date;
use time::macros::format_description;

/// Rejects departures recorded with a time after now.
pub const REJECT_FUTURE_DEPARTURE: &str = "reject-future-departure";

/// Rejects arrivals dated before the bedspace start date.
pub const VALIDATE_ARRIVAL_BEFORE_BEDSPACE_START: &str = "validate-arrival-before-bedspace-start";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid bank holiday '{value}': expected YYYY-MM-DD")]
    InvalidBankHoliday { value: String },
}

/// Domain event publishing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainEventsConfig {
    /// When false, events are stored but never sent to the bus.
    pub publish_enabled: bool,
    pub topic: String,
    /// Base of the detail URL placed in each published envelope.
    pub detail_url_base: String,
}

impl Default for DomainEventsConfig {
    fn default() -> Self {
        Self {
            publish_enabled: false,
            topic: String::from("cas3-domain-events"),
            detail_url_base: String::from("http://localhost:8080"),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cas3Config {
    pub domain_events: DomainEventsConfig,
    pub feature_flags: BTreeMap<String, bool>,
    pub bank_holidays: Vec<String>,
}

impl Cas3Config {
    /// Parses configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a bank holiday is not a
    /// valid date.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.parsed_bank_holidays()?;
        Ok(config)
    }

    /// The configured bank holidays as dates.
    ///
    /// # Errors
    ///
    /// Returns an error for the first entry that is not `YYYY-MM-DD`.
    pub fn parsed_bank_holidays(&self) -> Result<Vec<Date>, ConfigError> {
        self.bank_holidays
            .iter()
            .map(|value| {
                Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|_| {
                    ConfigError::InvalidBankHoliday {
                        value: value.clone(),
                    }
                })
            })
            .collect()
    }

    /// A working-day calendar that skips the configured bank holidays.
    ///
    /// # Errors
    ///
    /// Returns an error if a bank holiday is not a valid date.
    pub fn calendar(&self) -> Result<WeekdayCalendar, ConfigError> {
        Ok(WeekdayCalendar::new(self.parsed_bank_holidays()?))
    }

    /// The configured feature flags.
    #[must_use]
    pub fn feature_flags(&self) -> StaticFeatureFlags {
        StaticFeatureFlags::new(self.feature_flags.clone())
    }
}

/// Feature flags fixed at startup. Unknown flags are disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticFeatureFlags {
    flags: BTreeMap<String, bool>,
}

impl StaticFeatureFlags {
    #[must_use]
    pub const fn new(flags: BTreeMap<String, bool>) -> Self {
        Self { flags }
    }

    /// Returns a copy with `name` set to `enabled`.
    #[must_use]
    pub fn with(mut self, name: &str, enabled: bool) -> Self {
        self.flags.insert(name.to_string(), enabled);
        self
    }
}

impl FeatureFlags for StaticFeatureFlags {
    fn is_enabled(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::WorkingDayCalendar;
    use time::macros::date;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: Cas3Config = Cas3Config::from_json("{}").unwrap();
        assert_eq!(config, Cas3Config::default());
        assert!(!config.domain_events.publish_enabled);
        assert!(!config.feature_flags().is_enabled(REJECT_FUTURE_DEPARTURE));
    }

    #[test]
    fn test_camel_case_keys_are_read() {
        let config: Cas3Config = Cas3Config::from_json(
            r#"{
                "domainEvents": { "publishEnabled": true, "topic": "events" },
                "featureFlags": { "reject-future-departure": true },
                "bankHolidays": ["2024-08-26"]
            }"#,
        )
        .unwrap();

        assert!(config.domain_events.publish_enabled);
        assert_eq!(config.domain_events.topic, "events");
        assert_eq!(
            config.domain_events.detail_url_base,
            DomainEventsConfig::default().detail_url_base
        );
        assert!(config.feature_flags().is_enabled(REJECT_FUTURE_DEPARTURE));
        assert!(
            !config
                .feature_flags()
                .is_enabled(VALIDATE_ARRIVAL_BEFORE_BEDSPACE_START)
        );
        assert_eq!(
            config
                .calendar()
                .unwrap()
                .add_working_days(date!(2024 - 08 - 23), 1),
            date!(2024 - 08 - 27)
        );
    }

    #[test]
    fn test_invalid_bank_holiday_is_rejected() {
        let result = Cas3Config::from_json(r#"{ "bankHolidays": ["26/08/2024"] }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidBankHoliday { value }) if value == "26/08/2024"
        ));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            Cas3Config::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
