use std::collections::BTreeSet;

use crate::aggregate::summarize;
use crate::charge::expected_charge;
use crate::error::AuditError;
use crate::join::join_sources;
use crate::model::{AuditInput, AuditMeta, AuditReport, ReconciledShipment, ShipmentType};
use crate::rates::Direction;
use crate::slab::WeightSlab;

/// Run one audit: join the sources, validate the rate card against every
/// zone the shipments reference, price each shipment and summarize.
///
/// Pure batch pipeline; the only non-determinism is the `run_at` stamp.
pub fn run(config_name: &str, input: &AuditInput) -> Result<AuditReport, AuditError> {
    let joined = join_sources(&input.orders, &input.skus, &input.pincode_zones, &input.invoice);

    // Eager completeness check: fail before pricing, not mid-run.
    let mut required: BTreeSet<(&str, Direction)> = BTreeSet::new();
    for shipment in &joined.shipments {
        match shipment.shipment_type {
            ShipmentType::Forward => {
                required.insert((shipment.zone.as_str(), Direction::Forward));
            }
            ShipmentType::ForwardAndRto => {
                required.insert((shipment.zone.as_str(), Direction::Forward));
                required.insert((shipment.zone.as_str(), Direction::Rto));
            }
            ShipmentType::Other(_) => {}
        }
    }
    input.rate_card.validate(required.iter().copied())?;

    let mut shipments = Vec::with_capacity(joined.shipments.len());
    for j in joined.shipments {
        let expected_slab = WeightSlab::from_kg(j.unit_weight_grams / 1000.0);
        let courier_slab = WeightSlab::from_kg(j.charged_weight_kg);
        let expected_paise =
            expected_charge(&j.zone, expected_slab, &j.shipment_type, &input.rate_card)?;

        shipments.push(ReconciledShipment {
            order_id: j.order_id,
            sku: j.sku,
            quantity: j.quantity,
            zone: j.zone,
            courier_zone: j.courier_zone,
            expected_slab,
            courier_slab,
            shipment_type: j.shipment_type,
            expected_paise,
            billed_paise: j.billed_paise,
            difference_paise: j.billed_paise - expected_paise,
        });
    }

    let summary = summarize(&shipments);

    Ok(AuditReport {
        meta: AuditMeta {
            config_name: config_name.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        join_stats: joined.stats,
        shipments,
    })
}
