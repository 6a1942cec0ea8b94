use std::fmt;

use crate::rates::Direction;

#[derive(Debug)]
pub enum AuditError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty name, missing file path, etc.).
    ConfigValidation(String),
    /// Missing required column in input data.
    MissingColumn { source: String, column: String },
    /// Quantity parse error.
    QuantityParse { source: String, record_id: String, value: String },
    /// Weight parse error.
    WeightParse { source: String, record_id: String, value: String },
    /// Monetary amount parse error.
    AmountParse { source: String, record_id: String, value: String },
    /// A shipment references a zone/direction with no rate card entry.
    MissingRate { zone: String, direction: Direction },
    /// Rate card has no usable rate columns at all.
    EmptyRateCard,
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "{source}: missing column '{column}'")
            }
            Self::QuantityParse { source, record_id, value } => {
                write!(f, "{source}, record '{record_id}': cannot parse quantity '{value}'")
            }
            Self::WeightParse { source, record_id, value } => {
                write!(f, "{source}, record '{record_id}': cannot parse weight '{value}'")
            }
            Self::AmountParse { source, record_id, value } => {
                write!(f, "{source}, record '{record_id}': cannot parse amount '{value}'")
            }
            Self::MissingRate { zone, direction } => {
                write!(f, "zone '{zone}': no {direction} rate in rate card")
            }
            Self::EmptyRateCard => write!(f, "rate card contains no rate columns"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AuditError {}
