use serde::{Serialize, Serializer};

/// Discretized billing weight in half-kilogram increments.
///
/// Stored as a count of half-kilo units so slab arithmetic stays integral;
/// `as_kg` recovers the conventional 0.5-step representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeightSlab(u32);

impl WeightSlab {
    /// Map a continuous weight (kg) onto its billing slab.
    ///
    /// Rule: `floor(w) + 0.5` when the fractional part exceeds 0.5, else
    /// `floor(w)`. A fractional part of exactly 0.5 rounds DOWN to the whole
    /// kilogram; this matches the contracted billing rule as applied in
    /// practice and must not be "fixed" to round-up-to-next-half-kilo.
    pub fn from_kg(weight_kg: f64) -> Self {
        if weight_kg <= 0.0 {
            return Self(0);
        }
        let whole = weight_kg.trunc() as u32;
        let extra_half = if weight_kg.fract() > 0.5 { 1 } else { 0 };
        Self(whole * 2 + extra_half)
    }

    pub fn half_units(self) -> u32 {
        self.0
    }

    pub fn as_kg(self) -> f64 {
        f64::from(self.0) * 0.5
    }

    /// Half-kilo increments beyond the first (the first half-kilo is covered
    /// by the fixed charge).
    pub fn additional_units(self) -> i64 {
        i64::from(self.0.saturating_sub(1))
    }
}

impl Serialize for WeightSlab {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_kg())
    }
}

impl std::fmt::Display for WeightSlab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.as_kg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_boundaries() {
        assert_eq!(WeightSlab::from_kg(0.3).as_kg(), 0.0);
        assert_eq!(WeightSlab::from_kg(0.6).as_kg(), 0.5);
        assert_eq!(WeightSlab::from_kg(1.0).as_kg(), 1.0);
        assert_eq!(WeightSlab::from_kg(1.7).as_kg(), 1.5);
    }

    #[test]
    fn half_exactly_rounds_down() {
        // 2.5 kg sits exactly on the boundary and bills as 2.0, not 2.5.
        assert_eq!(WeightSlab::from_kg(2.5).as_kg(), 2.0);
        assert_eq!(WeightSlab::from_kg(0.5).as_kg(), 0.0);
    }

    #[test]
    fn zero_and_negative_clamp_to_empty_slab() {
        assert_eq!(WeightSlab::from_kg(0.0).half_units(), 0);
        assert_eq!(WeightSlab::from_kg(-1.2).half_units(), 0);
    }

    #[test]
    fn additional_units_beyond_first_half_kilo() {
        assert_eq!(WeightSlab::from_kg(0.3).additional_units(), 0);
        assert_eq!(WeightSlab::from_kg(0.6).additional_units(), 0);
        assert_eq!(WeightSlab::from_kg(1.0).additional_units(), 1);
        assert_eq!(WeightSlab::from_kg(1.7).additional_units(), 2);
    }

    #[test]
    fn display_uses_kg() {
        assert_eq!(WeightSlab::from_kg(1.7).to_string(), "1.5");
    }
}
