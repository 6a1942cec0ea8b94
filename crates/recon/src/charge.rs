use crate::error::AuditError;
use crate::model::ShipmentType;
use crate::rates::{Direction, RateCard};
use crate::slab::WeightSlab;

/// Expected charge in paise for one shipment under the contracted rates.
///
/// Forward: fixed + additional-per-slab beyond the first half-kilo.
/// Forward + RTO: the RTO side contributes only its per-slab additional
/// charge; the RTO fixed charge is never added. That asymmetry is how the
/// contract is billed and is preserved verbatim.
/// Any other shipment type prices to zero.
pub fn expected_charge(
    zone: &str,
    slab: WeightSlab,
    shipment_type: &ShipmentType,
    rates: &RateCard,
) -> Result<i64, AuditError> {
    let units = slab.additional_units();
    match shipment_type {
        ShipmentType::Forward => {
            let fwd = rates.lookup(zone, Direction::Forward)?;
            Ok(fwd.fixed_paise + units * fwd.additional_paise)
        }
        ShipmentType::ForwardAndRto => {
            let fwd = rates.lookup(zone, Direction::Forward)?;
            let rto = rates.lookup(zone, Direction::Rto)?;
            Ok(fwd.fixed_paise + units * (fwd.additional_paise + rto.additional_paise))
        }
        ShipmentType::Other(_) => Ok(0),
    }
}
