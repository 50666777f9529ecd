use chrono_tz::Tz;
use std::path::PathBuf;

/// Widest receipt accepted from `RECEIPT_COLUMNS` (80mm paper, font B)
pub const MAX_RECEIPT_COLUMNS: usize = 80;

/// Till configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | development / production |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | enable daily rolling file logs |
/// | PRINTER_MARKER | POS | substring identifying receipt printers |
/// | PRINTER_NAME | (unset) | bind to this printer, skip discovery |
/// | SPOOL_DIR | system temp dir | where spool files are written |
/// | SPOOLER_LIST_CMD | lpstat -e | destination listing command |
/// | SPOOLER_PRINT_CMD | lp | raw print program |
/// | RECEIPT_COLUMNS | 32 | characters per line (font A), 1..=80 |
/// | TIMEZONE | UTC | receipt date/time zone (IANA name) |
///
/// # Example
///
/// ```ignore
/// PRINTER_NAME=POS-58 TIMEZONE=Europe/Madrid asg-till print --item 1:2
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment: development | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    /// Directory for file logging; console only when unset
    pub log_dir: Option<String>,
    pub printer_marker: String,
    /// Preselected printer
    pub printer_name: Option<String>,
    pub spool_dir: PathBuf,
    pub spooler_list_cmd: String,
    pub spooler_print_cmd: String,
    pub receipt_columns: usize,
    pub timezone: Tz,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        Self {
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: non_empty("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: non_empty("LOG_DIR"),
            printer_marker: non_empty("PRINTER_MARKER")
                .unwrap_or_else(|| asg_printer::DEFAULT_PRINTER_MARKER.into()),
            printer_name: non_empty("PRINTER_NAME").map(|v| v.trim().to_string()),
            spool_dir: non_empty("SPOOL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            spooler_list_cmd: non_empty("SPOOLER_LIST_CMD").unwrap_or_else(|| "lpstat -e".into()),
            spooler_print_cmd: non_empty("SPOOLER_PRINT_CMD").unwrap_or_else(|| "lp".into()),
            receipt_columns: non_empty("RECEIPT_COLUMNS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|c: &usize| (1..=MAX_RECEIPT_COLUMNS).contains(c))
                .unwrap_or(asg_printer::FONT_A_COLUMNS),
            timezone: non_empty("TIMEZONE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(chrono_tz::UTC),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert!(config.log_dir.is_none());
        assert_eq!(config.printer_marker, "POS");
        assert!(config.printer_name.is_none());
        assert_eq!(config.spool_dir, std::env::temp_dir());
        assert_eq!(config.spooler_list_cmd, "lpstat -e");
        assert_eq!(config.spooler_print_cmd, "lp");
        assert_eq!(config.receipt_columns, 32);
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert!(config.is_development());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ENVIRONMENT", "production"),
            ("LOG_JSON", "true"),
            ("LOG_DIR", "/var/log/asg"),
            ("PRINTER_MARKER", "TM-"),
            ("PRINTER_NAME", " POS-80 "),
            ("SPOOL_DIR", "/var/spool/asg"),
            ("SPOOLER_PRINT_CMD", "lpr"),
            ("RECEIPT_COLUMNS", "48"),
            ("TIMEZONE", "Europe/Madrid"),
        ]));
        assert!(config.is_production());
        assert!(config.log_json);
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/asg"));
        assert_eq!(config.printer_marker, "TM-");
        assert_eq!(config.printer_name.as_deref(), Some("POS-80"));
        assert_eq!(config.spool_dir, PathBuf::from("/var/spool/asg"));
        assert_eq!(config.spooler_print_cmd, "lpr");
        assert_eq!(config.receipt_columns, 48);
        assert_eq!(config.timezone, chrono_tz::Europe::Madrid);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("LOG_JSON", "maybe"),
            ("RECEIPT_COLUMNS", "0"),
            ("TIMEZONE", "Mars/Olympus"),
            ("PRINTER_NAME", "   "),
        ]));
        assert!(!config.log_json);
        assert_eq!(config.receipt_columns, 32);
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert!(config.printer_name.is_none());
    }

    #[test]
    fn test_receipt_columns_bounds() {
        let columns =
            |v: &str| Config::from_lookup(lookup(&[("RECEIPT_COLUMNS", v)])).receipt_columns;
        assert_eq!(columns("80"), 80);
        assert_eq!(columns("81"), 32);
        assert_eq!(columns("10000000000"), 32);
    }
}
