use serde::Serialize;

use crate::rates::RateCard;
use crate::slab::WeightSlab;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One ordered SKU-shipment from the order report.
///
/// `quantity` is carried through for reporting but does not enter pricing:
/// the contracted weight is the catalog unit weight, matching how the rate
/// card has historically been applied.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub order_id: String,
    pub sku: String,
    pub quantity: u32,
}

/// SKU catalog entry with the physical attributes pricing needs.
#[derive(Debug, Clone)]
pub struct SkuEntry {
    pub sku: String,
    pub weight_grams: f64,
}

/// One pincode→zone mapping row, as loaded (duplicates permitted here;
/// the joiner deduplicates with first-occurrence-wins).
#[derive(Debug, Clone)]
pub struct PincodeZone {
    pub pincode: String,
    pub zone: String,
}

/// One courier invoice line.
#[derive(Debug, Clone)]
pub struct InvoiceLine {
    pub order_id: String,
    pub awb_code: String,
    pub pincode: String,
    /// Delivery zone as declared by the courier, not the contracted one.
    pub zone: String,
    pub charged_weight_kg: f64,
    pub shipment_type: ShipmentType,
    pub billed_paise: i64,
}

/// Charge semantics of an invoice line. Anything the rate card does not
/// cover is preserved verbatim and prices to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentType {
    Forward,
    ForwardAndRto,
    Other(String),
}

impl ShipmentType {
    pub fn parse(label: &str) -> Self {
        match label {
            "Forward charges" => Self::Forward,
            "Forward and RTO charges" => Self::ForwardAndRto,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "Forward charges"),
            Self::ForwardAndRto => write!(f, "Forward and RTO charges"),
            Self::Other(label) => write!(f, "{label}"),
        }
    }
}

/// Pre-loaded source tables, ready for one engine run.
pub struct AuditInput {
    pub orders: Vec<OrderLine>,
    pub skus: Vec<SkuEntry>,
    pub pincode_zones: Vec<PincodeZone>,
    pub invoice: Vec<InvoiceLine>,
    pub rate_card: RateCard,
}

// ---------------------------------------------------------------------------
// Reconciled shipments
// ---------------------------------------------------------------------------

/// One priced shipment with both views of zone and weight, and the billed
/// vs expected delta. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciledShipment {
    pub order_id: String,
    pub sku: String,
    pub quantity: u32,
    /// Contracted zone, from the pincode mapping.
    pub zone: String,
    /// Zone as declared by the courier on the invoice.
    pub courier_zone: String,
    pub expected_slab: WeightSlab,
    pub courier_slab: WeightSlab,
    pub shipment_type: ShipmentType,
    pub expected_paise: i64,
    pub billed_paise: i64,
    /// billed − expected. Positive means the courier overcharged.
    pub difference_paise: i64,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCategory {
    Correct,
    Overcharged,
    Undercharged,
}

impl ChargeCategory {
    pub fn description(self) -> &'static str {
        match self {
            Self::Correct => "Total orders correctly charged",
            Self::Overcharged => "Total orders overcharged",
            Self::Undercharged => "Total orders undercharged",
        }
    }
}

impl std::fmt::Display for ChargeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Overcharged => write!(f, "overcharged"),
            Self::Undercharged => write!(f, "undercharged"),
        }
    }
}

/// One of exactly three summary rows per run.
///
/// Amount convention: the correct bucket carries the sum of expected
/// charges (its differences are all zero), overcharged carries the absolute
/// overbilled total, undercharged stays signed negative.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub category: ChargeCategory,
    pub description: &'static str,
    pub count: usize,
    pub amount_paise: i64,
}

/// Rows dropped per join stage. Inner joins silently shrink the dataset, so
/// every drop is counted and surfaced rather than lost.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JoinStats {
    pub orders_missing_sku: usize,
    pub duplicate_pincodes: usize,
    pub invoices_unmapped_pincode: usize,
    pub orders_without_invoice: usize,
    pub invoices_without_order: usize,
}

impl JoinStats {
    pub fn total_dropped(&self) -> usize {
        self.orders_missing_sku
            + self.invoices_unmapped_pincode
            + self.orders_without_invoice
            + self.invoices_without_order
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AuditMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub meta: AuditMeta,
    pub summary: Vec<SummaryRow>,
    pub join_stats: JoinStats,
    pub shipments: Vec<ReconciledShipment>,
}

impl AuditReport {
    pub fn total_shipments(&self) -> usize {
        self.shipments.len()
    }

    pub fn summary_row(&self, category: ChargeCategory) -> Option<&SummaryRow> {
        self.summary.iter().find(|r| r.category == category)
    }
}
