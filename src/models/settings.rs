//! User preferences.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::optional_date;

/// UI theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// User settings, replaced wholesale on every save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserSettings {
    /// Birthday (`YYYY-MM-DD`), used for the share-of-life statistic
    #[serde(
        default,
        with = "optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark_without_birthday() {
        let settings = UserSettings::default();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.birthday.is_none());
        assert_eq!(
            serde_json::to_string(&settings).unwrap(),
            r#"{"theme":"dark"}"#
        );
    }

    #[test]
    fn test_birthday_round_trip() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"birthday":"1990-04-01","theme":"light"}"#).unwrap();
        assert_eq!(settings.birthday, NaiveDate::from_ymd_opt(1990, 4, 1));
        assert_eq!(settings.theme, Theme::Light);

        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"birthday":"1990-04-01","theme":"light"}"#);
    }

    #[test]
    fn test_cleared_birthday_reads_as_absent() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"birthday":"","theme":"dark"}"#).unwrap();
        assert!(settings.birthday.is_none());
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!(serde_json::from_str::<UserSettings>(r#"{"theme":"sepia"}"#).is_err());
    }
}
