use serde::Deserialize;

use crate::error::AuditError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// One audit run: a name, the five input files, optional output paths.
#[derive(Debug, Deserialize)]
pub struct AuditConfig {
    pub name: String,
    pub files: FileSet,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The five tabular sources. Paths are resolved relative to the config
/// file's directory by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct FileSet {
    pub orders: String,
    pub sku_master: String,
    pub pincode_zones: String,
    pub invoice: String,
    pub rate_card: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Write the full JSON report here.
    #[serde(default)]
    pub json: Option<String>,
    /// Write the summary pie chart (SVG) here.
    #[serde(default)]
    pub chart: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl AuditConfig {
    pub fn from_toml(input: &str) -> Result<Self, AuditError> {
        let config: AuditConfig =
            toml::from_str(input).map_err(|e| AuditError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if self.name.trim().is_empty() {
            return Err(AuditError::ConfigValidation("name must not be empty".into()));
        }

        let files = [
            ("files.orders", &self.files.orders),
            ("files.sku_master", &self.files.sku_master),
            ("files.pincode_zones", &self.files.pincode_zones),
            ("files.invoice", &self.files.invoice),
            ("files.rate_card", &self.files.rate_card),
        ];
        for (key, path) in files {
            if path.trim().is_empty() {
                return Err(AuditError::ConfigValidation(format!(
                    "{key} must not be empty"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "July B2B audit"

[files]
orders        = "Order-Report.csv"
sku_master    = "SKU-Master.csv"
pincode_zones = "pincodes.csv"
invoice       = "Invoice.csv"
rate_card     = "Courier-Company-Rates.csv"
"#;

    #[test]
    fn parse_valid() {
        let config = AuditConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "July B2B audit");
        assert_eq!(config.files.invoice, "Invoice.csv");
        assert!(config.output.json.is_none());
        assert!(config.output.chart.is_none());
    }

    #[test]
    fn parse_with_output() {
        let input = format!(
            r#"{VALID}
[output]
json  = "report.json"
chart = "summary.svg"
"#
        );
        let config = AuditConfig::from_toml(&input).unwrap();
        assert_eq!(config.output.json.as_deref(), Some("report.json"));
        assert_eq!(config.output.chart.as_deref(), Some("summary.svg"));
    }

    #[test]
    fn reject_empty_file_path() {
        let input = r#"
name = "Bad"

[files]
orders        = ""
sku_master    = "SKU-Master.csv"
pincode_zones = "pincodes.csv"
invoice       = "Invoice.csv"
rate_card     = "rates.csv"
"#;
        let err = AuditConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("files.orders"));
    }

    #[test]
    fn reject_missing_table() {
        let input = r#"name = "Bad""#;
        let err = AuditConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, AuditError::ConfigParse(_)));
    }
}
