use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::AuditError;

/// Charge direction a rate entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Forward,
    Rto,
}

impl Direction {
    /// Column prefix used by the wide rate card CSV ("fwd_a_fixed", ...).
    pub fn column_prefix(self) -> &'static str {
        match self {
            Self::Forward => "fwd",
            Self::Rto => "rto",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Rto => write!(f, "RTO"),
        }
    }
}

/// Fixed charge for the first half-kilo slab plus the per-additional-slab
/// charge, in paise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatePair {
    pub fixed_paise: i64,
    pub additional_paise: i64,
}

#[derive(Debug, Clone, Default)]
struct ZoneRates {
    forward: Option<RatePair>,
    rto: Option<RatePair>,
}

/// Contracted rate table: (zone, direction) → {fixed, additional}.
///
/// Built from the courier's wide single-row CSV and meant to be validated
/// eagerly against every zone the shipment data references, so a missing
/// entry fails the run up front instead of mid-pricing.
#[derive(Debug, Clone, Default)]
pub struct RateCard {
    zones: BTreeMap<String, ZoneRates>,
}

impl RateCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, zone: &str, direction: Direction, pair: RatePair) {
        let entry = self.zones.entry(zone.to_string()).or_default();
        match direction {
            Direction::Forward => entry.forward = Some(pair),
            Direction::Rto => entry.rto = Some(pair),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zones with at least one rate entry, in sorted order.
    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    pub fn lookup(&self, zone: &str, direction: Direction) -> Result<RatePair, AuditError> {
        let missing = || AuditError::MissingRate {
            zone: zone.to_string(),
            direction,
        };
        let entry = self.zones.get(zone).ok_or_else(missing)?;
        let pair = match direction {
            Direction::Forward => entry.forward,
            Direction::Rto => entry.rto,
        };
        pair.ok_or_else(missing)
    }

    /// Check that every required (zone, direction) has an entry. Returns the
    /// first gap in iteration order.
    pub fn validate<'a>(
        &self,
        required: impl IntoIterator<Item = (&'a str, Direction)>,
    ) -> Result<(), AuditError> {
        for (zone, direction) in required {
            self.lookup(zone, direction)?;
        }
        Ok(())
    }
}
