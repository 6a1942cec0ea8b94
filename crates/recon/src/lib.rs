//! `shipaudit-recon` — Courier billing reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded tables, prices every shipment
//! against the contracted rate card and buckets billed-vs-expected
//! differences. No CLI or rendering dependencies.

pub mod aggregate;
pub mod charge;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod join;
pub mod model;
pub mod rates;
pub mod slab;

pub use config::AuditConfig;
pub use engine::run;
pub use error::AuditError;
pub use model::{AuditInput, AuditReport, ChargeCategory, ReconciledShipment, SummaryRow};
pub use rates::RateCard;
pub use slab::WeightSlab;
