//! `shipaudit run` / `shipaudit validate` — config-driven billing audit.

use std::path::{Path, PathBuf};

use shipaudit_recon::ingest;
use shipaudit_recon::{AuditConfig, AuditInput, AuditReport, ChargeCategory};

use crate::chart::render_pie_svg;
use crate::exit_codes::{EXIT_DISCREPANCY, EXIT_INVALID_CONFIG, EXIT_RUNTIME};
use crate::CliError;

fn audit_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    chart_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let (config, report) = run_from_config(&config_path)?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    // JSON report
    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| audit_err(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;

    let json_path = output_file.or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    if let Some(ref path) = json_path {
        std::fs::write(path, &json_str)
            .map_err(|e| audit_err(EXIT_RUNTIME, format!("cannot write report: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Pie chart
    let chart_path = chart_file.or_else(|| config.output.chart.as_ref().map(|p| base_dir.join(p)));
    if let Some(ref path) = chart_path {
        let svg = render_pie_svg(&report.summary);
        std::fs::write(path, svg)
            .map_err(|e| audit_err(EXIT_RUNTIME, format!("cannot write chart: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    // Human summary to stderr
    let bucket = |category| {
        report
            .summary_row(category)
            .map(|r| (r.count, r.amount_paise))
            .unwrap_or((0, 0))
    };
    let (correct_n, correct_amt) = bucket(ChargeCategory::Correct);
    let (over_n, over_amt) = bucket(ChargeCategory::Overcharged);
    let (under_n, under_amt) = bucket(ChargeCategory::Undercharged);

    eprintln!(
        "audit '{}': {} shipment(s) — {} correct (Rs. {}), {} overcharged (Rs. {}), {} undercharged (Rs. {})",
        config.name,
        report.total_shipments(),
        correct_n,
        fmt_rupees(correct_amt),
        over_n,
        fmt_rupees(over_amt),
        under_n,
        fmt_rupees(under_amt),
    );

    let stats = &report.join_stats;
    if stats.total_dropped() > 0 || stats.duplicate_pincodes > 0 {
        eprintln!(
            "dropped during join: {} order(s) with unknown SKU, {} invoice line(s) with unmapped pincode, {} order(s) without invoice, {} invoice line(s) without order ({} duplicate pincode mapping(s) collapsed)",
            stats.orders_missing_sku,
            stats.invoices_unmapped_pincode,
            stats.orders_without_invoice,
            stats.invoices_without_order,
            stats.duplicate_pincodes,
        );
    }

    if over_n + under_n > 0 {
        return Err(audit_err(EXIT_DISCREPANCY, "billing discrepancies found"));
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| audit_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;

    match AuditConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!("valid: audit '{}' with 5 input file(s)", config.name);
            Ok(())
        }
        Err(e) => Err(audit_err(EXIT_INVALID_CONFIG, e.to_string())),
    }
}

/// Load the config, read the five CSV files relative to it and run the
/// engine. Shared by `cmd_run` and the tests.
fn run_from_config(config_path: &Path) -> Result<(AuditConfig, AuditReport), CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| audit_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;
    let config = AuditConfig::from_toml(&config_str)
        .map_err(|e| audit_err(EXIT_INVALID_CONFIG, e.to_string()))?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let read = |rel: &str| -> Result<String, CliError> {
        let path = base_dir.join(rel);
        std::fs::read_to_string(&path)
            .map_err(|e| audit_err(EXIT_RUNTIME, format!("cannot read {}: {e}", path.display())))
    };
    let engine_err = |e: shipaudit_recon::AuditError| audit_err(EXIT_RUNTIME, e.to_string());

    let input = AuditInput {
        orders: ingest::load_orders(&read(&config.files.orders)?).map_err(engine_err)?,
        skus: ingest::load_sku_master(&read(&config.files.sku_master)?).map_err(engine_err)?,
        pincode_zones: ingest::load_pincode_zones(&read(&config.files.pincode_zones)?)
            .map_err(engine_err)?,
        invoice: ingest::load_invoice(&read(&config.files.invoice)?).map_err(engine_err)?,
        rate_card: ingest::load_rate_card(&read(&config.files.rate_card)?).map_err(engine_err)?,
    };

    let report = shipaudit_recon::run(&config.name, &input).map_err(engine_err)?;
    Ok((config, report))
}

/// Paise → "rupees.paise" display string, sign preserved.
fn fmt_rupees(paise: i64) -> String {
    let sign = if paise < 0 { "-" } else { "" };
    let abs = paise.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(dir: &Path) -> PathBuf {
        fs::write(
            dir.join("orders.csv"),
            "ExternOrderNo,SKU,Order Qty\no1,s1,1\no2,s1,1\n",
        )
        .unwrap();
        fs::write(dir.join("skus.csv"), "SKU,Weight (g)\ns1,1000\n").unwrap();
        fs::write(dir.join("pincodes.csv"), "Customer Pincode,Zone\n400001,a\n").unwrap();
        fs::write(
            dir.join("invoice.csv"),
            "Order ID,Customer Pincode,Zone,Charged Weight,Type of Shipment,Billing Amount (Rs.)\n\
             o1,400001,a,1.0,Forward charges,40\n\
             o2,400001,a,1.0,Forward charges,52.5\n",
        )
        .unwrap();
        fs::write(
            dir.join("rates.csv"),
            "fwd_a_fixed,fwd_a_additional,rto_a_fixed,rto_a_additional\n30,10,20,5\n",
        )
        .unwrap();

        let config_path = dir.join("audit.toml");
        fs::write(
            &config_path,
            r#"
name = "fixture audit"

[files]
orders        = "orders.csv"
sku_master    = "skus.csv"
pincode_zones = "pincodes.csv"
invoice       = "invoice.csv"
rate_card     = "rates.csv"
"#,
        )
        .unwrap();
        config_path
    }

    #[test]
    fn run_from_config_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_fixture(dir.path());

        let (config, report) = run_from_config(&config_path).unwrap();
        assert_eq!(config.name, "fixture audit");
        assert_eq!(report.total_shipments(), 2);
        assert_eq!(report.summary_row(ChargeCategory::Correct).unwrap().count, 1);
        let over = report.summary_row(ChargeCategory::Overcharged).unwrap();
        assert_eq!(over.count, 1);
        assert_eq!(over.amount_paise, 1250);
    }

    #[test]
    fn run_from_config_missing_file_is_runtime_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_fixture(dir.path());
        fs::remove_file(dir.path().join("invoice.csv")).unwrap();

        let err = run_from_config(&config_path).unwrap_err();
        assert_eq!(err.code, EXIT_RUNTIME);
        assert!(err.message.contains("invoice.csv"));
    }

    #[test]
    fn run_from_config_bad_config_is_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("audit.toml");
        fs::write(&config_path, "name = \"broken\"").unwrap();

        let err = run_from_config(&config_path).unwrap_err();
        assert_eq!(err.code, EXIT_INVALID_CONFIG);
    }

    #[test]
    fn rupee_formatting() {
        assert_eq!(fmt_rupees(0), "0.00");
        assert_eq!(fmt_rupees(13500), "135.00");
        assert_eq!(fmt_rupees(9020), "90.20");
        assert_eq!(fmt_rupees(-805), "-8.05");
    }
}
