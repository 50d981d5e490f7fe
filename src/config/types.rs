// Configuration type definitions

use serde::Deserialize;

const DEFAULT_VISIBLE_ROWS: usize = 10;
const DEFAULT_FIRST_OPEN_DELAY_MS: u64 = 10;

/// Per-cell suggestion settings
///
/// Mirrors the options a grid cell carries for its autocomplete editor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CellSettings {
    /// Drop candidates that don't contain the typed text
    pub filter: bool,
    pub filtering_case_sensitive: bool,
    /// Always select the best matching row
    pub strict: bool,
    /// Clamp the dropdown width to the anchor width
    pub trim_dropdown: bool,
    /// Desired number of visible dropdown rows
    pub visible_rows: usize,
    /// Re-query delay while the dropdown has not opened yet
    pub first_open_delay_ms: u64,
}

impl Default for CellSettings {
    fn default() -> Self {
        CellSettings {
            filter: true,
            filtering_case_sensitive: false,
            strict: false,
            trim_dropdown: true,
            visible_rows: DEFAULT_VISIBLE_ROWS,
            first_open_delay_ms: DEFAULT_FIRST_OPEN_DELAY_MS,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cell: CellSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let settings = CellSettings::default();
        assert!(settings.filter);
        assert!(!settings.filtering_case_sensitive);
        assert!(!settings.strict);
        assert!(settings.trim_dropdown);
        assert_eq!(settings.visible_rows, 10);
        assert_eq!(settings.first_open_delay_ms, 10);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    // For any combination of boolean flags in the [cell] section, parsing keeps
    // the given values and leaves the numeric fields at their defaults.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_flags_round_trip_from_toml(
            filter in any::<bool>(),
            case_sensitive in any::<bool>(),
            strict in any::<bool>(),
            trim in any::<bool>(),
        ) {
            let toml_content = format!(r#"
[cell]
filter = {filter}
filtering_case_sensitive = {case_sensitive}
strict = {strict}
trim_dropdown = {trim}
"#);

            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse: {}", toml_content);

            let cell = config.unwrap().cell;
            prop_assert_eq!(cell.filter, filter);
            prop_assert_eq!(cell.filtering_case_sensitive, case_sensitive);
            prop_assert_eq!(cell.strict, strict);
            prop_assert_eq!(cell.trim_dropdown, trim);
            prop_assert_eq!(cell.visible_rows, DEFAULT_VISIBLE_ROWS);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_visible_rows_parsed(rows in 0usize..500) {
            let toml_content = format!("[cell]\nvisible_rows = {rows}\n");
            let config: Config = toml::from_str(&toml_content).unwrap();
            prop_assert_eq!(config.cell.visible_rows, rows);
            prop_assert!(config.cell.filter);
        }
    }
}
