//! CSV ingestion: five tabular sources into typed records.
//!
//! Loaders operate on already-read CSV text, resolve columns by header name
//! and fail with typed errors on missing columns or unparseable numbers.
//! Index-artifact columns (the `Unnamed: 0` kind some exporters emit) are
//! never treated as data columns.

use crate::error::AuditError;
use crate::model::{InvoiceLine, OrderLine, PincodeZone, ShipmentType, SkuEntry};
use crate::rates::{Direction, RateCard, RatePair};

// Default column names of the upstream exports.
const COL_ORDER_ID: &str = "ExternOrderNo";
const COL_ORDER_SKU: &str = "SKU";
const COL_ORDER_QTY: &str = "Order Qty";
const COL_SKU: &str = "SKU";
const COL_SKU_WEIGHT: &str = "Weight (g)";
const COL_PINCODE: &str = "Customer Pincode";
const COL_ZONE: &str = "Zone";
const COL_INV_ORDER_ID: &str = "Order ID";
const COL_INV_AWB: &str = "AWB Code";
const COL_INV_CHARGED_WEIGHT: &str = "Charged Weight";
const COL_INV_SHIPMENT_TYPE: &str = "Type of Shipment";
const COL_INV_BILLED: &str = "Billing Amount (Rs.)";

fn is_index_artifact(header: &str) -> bool {
    header.starts_with("Unnamed")
}

fn read_headers(reader: &mut csv::Reader<&[u8]>) -> Result<Vec<String>, AuditError> {
    Ok(reader
        .headers()
        .map_err(|e| AuditError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect())
}

fn column_index(headers: &[String], source: &str, name: &str) -> Result<usize, AuditError> {
    headers
        .iter()
        .position(|h| h == name && !is_index_artifact(h))
        .ok_or_else(|| AuditError::MissingColumn {
            source: source.into(),
            column: name.into(),
        })
}

/// Parse a decimal rupee amount into integer paise. At most two fraction
/// digits; anything finer than a paisa is rejected rather than rounded.
fn parse_paise(source: &str, record_id: &str, value: &str) -> Result<i64, AuditError> {
    let err = || AuditError::AmountParse {
        source: source.into(),
        record_id: record_id.into(),
        value: value.into(),
    };

    let trimmed = value.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(err());
    }
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(err());
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| err())?
    };
    let frac_paise: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| err())? * 10,
        _ => frac.parse().map_err(|_| err())?,
    };

    let paise = whole * 100 + frac_paise;
    Ok(if negative { -paise } else { paise })
}

fn parse_weight(source: &str, record_id: &str, value: &str) -> Result<f64, AuditError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| AuditError::WeightParse {
            source: source.into(),
            record_id: record_id.into(),
            value: value.into(),
        })
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Load the order report: one row per ordered SKU-shipment.
pub fn load_orders(csv_data: &str) -> Result<Vec<OrderLine>, AuditError> {
    const SOURCE: &str = "order report";

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = read_headers(&mut reader)?;

    let order_id_idx = column_index(&headers, SOURCE, COL_ORDER_ID)?;
    let sku_idx = column_index(&headers, SOURCE, COL_ORDER_SKU)?;
    let qty_idx = column_index(&headers, SOURCE, COL_ORDER_QTY)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AuditError::Io(e.to_string()))?;
        let order_id = record.get(order_id_idx).unwrap_or("").trim().to_string();

        let qty_raw = record.get(qty_idx).unwrap_or("");
        let quantity = qty_raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite() && *q >= 0.0 && q.fract() == 0.0)
            .map(|q| q as u32)
            .ok_or_else(|| AuditError::QuantityParse {
                source: SOURCE.into(),
                record_id: order_id.clone(),
                value: qty_raw.into(),
            })?;

        rows.push(OrderLine {
            order_id,
            sku: record.get(sku_idx).unwrap_or("").trim().to_string(),
            quantity,
        });
    }
    Ok(rows)
}

/// Load the SKU catalog: SKU → unit weight in grams.
pub fn load_sku_master(csv_data: &str) -> Result<Vec<SkuEntry>, AuditError> {
    const SOURCE: &str = "SKU master";

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = read_headers(&mut reader)?;

    let sku_idx = column_index(&headers, SOURCE, COL_SKU)?;
    let weight_idx = column_index(&headers, SOURCE, COL_SKU_WEIGHT)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AuditError::Io(e.to_string()))?;
        let sku = record.get(sku_idx).unwrap_or("").trim().to_string();
        let weight_raw = record.get(weight_idx).unwrap_or("");
        rows.push(SkuEntry {
            weight_grams: parse_weight(SOURCE, &sku, weight_raw)?,
            sku,
        });
    }
    Ok(rows)
}

/// Load the pincode→zone mapping, duplicates and all.
pub fn load_pincode_zones(csv_data: &str) -> Result<Vec<PincodeZone>, AuditError> {
    const SOURCE: &str = "pincode mapping";

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = read_headers(&mut reader)?;

    let pincode_idx = column_index(&headers, SOURCE, COL_PINCODE)?;
    let zone_idx = column_index(&headers, SOURCE, COL_ZONE)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AuditError::Io(e.to_string()))?;
        rows.push(PincodeZone {
            pincode: record.get(pincode_idx).unwrap_or("").trim().to_string(),
            zone: record.get(zone_idx).unwrap_or("").trim().to_string(),
        });
    }
    Ok(rows)
}

/// Load the courier invoice. The AWB column is optional; everything else
/// is required.
pub fn load_invoice(csv_data: &str) -> Result<Vec<InvoiceLine>, AuditError> {
    const SOURCE: &str = "courier invoice";

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = read_headers(&mut reader)?;

    let order_id_idx = column_index(&headers, SOURCE, COL_INV_ORDER_ID)?;
    let pincode_idx = column_index(&headers, SOURCE, COL_PINCODE)?;
    let zone_idx = column_index(&headers, SOURCE, COL_ZONE)?;
    let weight_idx = column_index(&headers, SOURCE, COL_INV_CHARGED_WEIGHT)?;
    let type_idx = column_index(&headers, SOURCE, COL_INV_SHIPMENT_TYPE)?;
    let billed_idx = column_index(&headers, SOURCE, COL_INV_BILLED)?;
    let awb_idx = headers
        .iter()
        .position(|h| h == COL_INV_AWB && !is_index_artifact(h));

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AuditError::Io(e.to_string()))?;
        let order_id = record.get(order_id_idx).unwrap_or("").trim().to_string();

        rows.push(InvoiceLine {
            awb_code: awb_idx
                .and_then(|i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string(),
            pincode: record.get(pincode_idx).unwrap_or("").trim().to_string(),
            zone: record.get(zone_idx).unwrap_or("").trim().to_string(),
            charged_weight_kg: parse_weight(
                SOURCE,
                &order_id,
                record.get(weight_idx).unwrap_or(""),
            )?,
            shipment_type: ShipmentType::parse(record.get(type_idx).unwrap_or("").trim()),
            billed_paise: parse_paise(SOURCE, &order_id, record.get(billed_idx).unwrap_or(""))?,
            order_id,
        });
    }
    Ok(rows)
}

/// Build the structured rate card from the courier's wide single-row CSV.
///
/// Recognized columns follow `fwd_<zone>_fixed` / `fwd_<zone>_additional`
/// and the `rto_` equivalents. A zone with only half of a {fixed,
/// additional} pair is a malformed card and fails the load.
pub fn load_rate_card(csv_data: &str) -> Result<RateCard, AuditError> {
    const SOURCE: &str = "rate card";

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = read_headers(&mut reader)?;

    let record = reader
        .records()
        .next()
        .transpose()
        .map_err(|e| AuditError::Io(e.to_string()))?
        .ok_or(AuditError::EmptyRateCard)?;

    // (zone, direction) → partially assembled pair.
    let mut partial: std::collections::BTreeMap<(String, Direction), (Option<i64>, Option<i64>)> =
        std::collections::BTreeMap::new();

    for (i, header) in headers.iter().enumerate() {
        let (direction, rest) = if let Some(rest) = header.strip_prefix("fwd_") {
            (Direction::Forward, rest)
        } else if let Some(rest) = header.strip_prefix("rto_") {
            (Direction::Rto, rest)
        } else {
            continue;
        };
        let Some((zone, field)) = rest.rsplit_once('_') else {
            continue;
        };
        if zone.is_empty() {
            continue;
        }

        let slot = match field {
            "fixed" => 0,
            "additional" => 1,
            _ => continue,
        };

        let raw = record.get(i).unwrap_or("");
        let paise = parse_paise(SOURCE, header, raw)?;
        let entry = partial.entry((zone.to_string(), direction)).or_default();
        match slot {
            0 => entry.0 = Some(paise),
            _ => entry.1 = Some(paise),
        }
    }

    if partial.is_empty() {
        return Err(AuditError::EmptyRateCard);
    }

    let mut card = RateCard::new();
    for ((zone, direction), (fixed, additional)) in partial {
        let missing_field = if fixed.is_none() { "fixed" } else { "additional" };
        let (Some(fixed_paise), Some(additional_paise)) = (fixed, additional) else {
            return Err(AuditError::MissingColumn {
                source: SOURCE.into(),
                column: format!("{}_{zone}_{missing_field}", direction.column_prefix()),
            });
        };
        card.insert(&zone, direction, RatePair { fixed_paise, additional_paise });
    }
    Ok(card)
}
