use std::collections::{HashMap, HashSet};

use crate::model::{InvoiceLine, JoinStats, OrderLine, PincodeZone, ShipmentType, SkuEntry};

/// One order line carrying every attribute pricing and comparison need,
/// produced by joining the four keyed sources.
#[derive(Debug, Clone)]
pub struct JoinedShipment {
    pub order_id: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_weight_grams: f64,
    /// Contracted zone, attached via the invoice pincode.
    pub zone: String,
    pub courier_zone: String,
    pub charged_weight_kg: f64,
    pub shipment_type: ShipmentType,
    pub billed_paise: i64,
}

#[derive(Debug)]
pub struct JoinOutput {
    pub shipments: Vec<JoinedShipment>,
    pub stats: JoinStats,
}

/// Reconcile the four source tables into one row per surviving order line.
///
/// All joins are inner joins keyed by named fields; rows with no partner
/// are dropped by policy, never raised as errors, and every drop is counted
/// in `JoinStats`. Output order follows order-report load order, so a fixed
/// input yields the same rows in the same order every run.
pub fn join_sources(
    orders: &[OrderLine],
    skus: &[SkuEntry],
    pincode_zones: &[PincodeZone],
    invoice: &[InvoiceLine],
) -> JoinOutput {
    let mut stats = JoinStats::default();

    // SKU catalog index. First catalog row wins on duplicate SKUs.
    let mut sku_index: HashMap<&str, &SkuEntry> = HashMap::new();
    for entry in skus {
        sku_index.entry(entry.sku.as_str()).or_insert(entry);
    }

    // Deduplicate the pincode mapping, first occurrence wins. Conflicting
    // zones for one pincode are not validated; the duplicate is just counted.
    let mut zone_by_pincode: HashMap<&str, &str> = HashMap::new();
    for mapping in pincode_zones {
        if zone_by_pincode.contains_key(mapping.pincode.as_str()) {
            stats.duplicate_pincodes += 1;
        } else {
            zone_by_pincode.insert(mapping.pincode.as_str(), mapping.zone.as_str());
        }
    }

    // Attach a contracted zone to each invoice line, then index by order id.
    // First invoice line per order id wins.
    let mut invoice_by_order: HashMap<&str, (&InvoiceLine, &str)> = HashMap::new();
    for line in invoice {
        match zone_by_pincode.get(line.pincode.as_str()) {
            Some(zone) => {
                invoice_by_order
                    .entry(line.order_id.as_str())
                    .or_insert((line, zone));
            }
            None => stats.invoices_unmapped_pincode += 1,
        }
    }

    let mut shipments = Vec::new();
    let mut matched_order_ids: HashSet<&str> = HashSet::new();
    let mut catalog_order_ids: HashSet<&str> = HashSet::new();

    for order in orders {
        let Some(entry) = sku_index.get(order.sku.as_str()) else {
            stats.orders_missing_sku += 1;
            continue;
        };
        catalog_order_ids.insert(order.order_id.as_str());

        let Some((line, zone)) = invoice_by_order.get(order.order_id.as_str()) else {
            stats.orders_without_invoice += 1;
            continue;
        };
        matched_order_ids.insert(order.order_id.as_str());

        shipments.push(JoinedShipment {
            order_id: order.order_id.clone(),
            sku: order.sku.clone(),
            quantity: order.quantity,
            unit_weight_grams: entry.weight_grams,
            zone: zone.to_string(),
            courier_zone: line.zone.clone(),
            charged_weight_kg: line.charged_weight_kg,
            shipment_type: line.shipment_type.clone(),
            billed_paise: line.billed_paise,
        });
    }

    stats.invoices_without_order = invoice_by_order
        .keys()
        .filter(|order_id| !catalog_order_ids.contains(*order_id))
        .count();

    JoinOutput { shipments, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(order_id: &str, sku: &str, qty: u32) -> OrderLine {
        OrderLine { order_id: order_id.into(), sku: sku.into(), quantity: qty }
    }

    fn sku(sku: &str, grams: f64) -> SkuEntry {
        SkuEntry { sku: sku.into(), weight_grams: grams }
    }

    fn mapping(pincode: &str, zone: &str) -> PincodeZone {
        PincodeZone { pincode: pincode.into(), zone: zone.into() }
    }

    fn line(order_id: &str, pincode: &str, billed: i64) -> InvoiceLine {
        InvoiceLine {
            order_id: order_id.into(),
            awb_code: format!("awb_{order_id}"),
            pincode: pincode.into(),
            zone: "d".into(),
            charged_weight_kg: 1.2,
            shipment_type: ShipmentType::Forward,
            billed_paise: billed,
        }
    }

    #[test]
    fn full_join_carries_both_views() {
        let out = join_sources(
            &[order("o1", "s1", 2)],
            &[sku("s1", 220.0)],
            &[mapping("400001", "a")],
            &[line("o1", "400001", 9000)],
        );
        assert!(out.stats.total_dropped() == 0);
        assert_eq!(out.shipments.len(), 1);
        let s = &out.shipments[0];
        assert_eq!(s.zone, "a");
        assert_eq!(s.courier_zone, "d");
        assert_eq!(s.unit_weight_grams, 220.0);
        assert_eq!(s.billed_paise, 9000);
    }

    #[test]
    fn order_with_unknown_sku_is_dropped_and_counted() {
        let out = join_sources(
            &[order("o1", "ghost", 1), order("o2", "s1", 1)],
            &[sku("s1", 500.0)],
            &[mapping("400001", "a")],
            &[line("o1", "400001", 9000), line("o2", "400001", 9000)],
        );
        assert_eq!(out.shipments.len(), 1);
        assert_eq!(out.stats.orders_missing_sku, 1);
        // o1 never reached the order-id join, so its invoice line counts as
        // having no matching order.
        assert_eq!(out.stats.invoices_without_order, 1);
    }

    #[test]
    fn duplicate_pincode_first_zone_wins() {
        let out = join_sources(
            &[order("o1", "s1", 1)],
            &[sku("s1", 500.0)],
            &[mapping("400001", "b"), mapping("400001", "e")],
            &[line("o1", "400001", 9000)],
        );
        assert_eq!(out.stats.duplicate_pincodes, 1);
        assert_eq!(out.shipments[0].zone, "b");
    }

    #[test]
    fn unmapped_invoice_pincode_drops_order_too() {
        let out = join_sources(
            &[order("o1", "s1", 1)],
            &[sku("s1", 500.0)],
            &[mapping("400001", "a")],
            &[line("o1", "999999", 9000)],
        );
        assert!(out.shipments.is_empty());
        assert_eq!(out.stats.invoices_unmapped_pincode, 1);
        assert_eq!(out.stats.orders_without_invoice, 1);
    }

    #[test]
    fn output_follows_order_report_order() {
        let orders = vec![order("o3", "s1", 1), order("o1", "s1", 1), order("o2", "s1", 1)];
        let skus = vec![sku("s1", 100.0)];
        let mappings = vec![mapping("400001", "a")];
        let invoice = vec![
            line("o1", "400001", 1000),
            line("o2", "400001", 1000),
            line("o3", "400001", 1000),
        ];

        let first = join_sources(&orders, &skus, &mappings, &invoice);
        let second = join_sources(&orders, &skus, &mappings, &invoice);

        let ids: Vec<&str> = first.shipments.iter().map(|s| s.order_id.as_str()).collect();
        assert_eq!(ids, vec!["o3", "o1", "o2"]);
        let ids_again: Vec<&str> = second.shipments.iter().map(|s| s.order_id.as_str()).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn multiple_lines_per_order_share_one_invoice() {
        // Two SKU lines under one order id both price against the same
        // invoice line.
        let out = join_sources(
            &[order("o1", "s1", 1), order("o1", "s2", 3)],
            &[sku("s1", 100.0), sku("s2", 700.0)],
            &[mapping("400001", "a")],
            &[line("o1", "400001", 9000)],
        );
        assert_eq!(out.shipments.len(), 2);
        assert_eq!(out.shipments[0].billed_paise, 9000);
        assert_eq!(out.shipments[1].billed_paise, 9000);
        assert_eq!(out.shipments[1].unit_weight_grams, 700.0);
    }
}
