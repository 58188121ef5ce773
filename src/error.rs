//! Error types.
//!
//! [`InstanceError`] covers everything that can go wrong while building or
//! parsing an [`Instance`](crate::instance::Instance). [`CvrpError`] is the
//! crate-level error returned by the engine runners. [`SummaryError`] is
//! returned when reading a summary line back.

use std::fmt;

/// Errors raised while validating or parsing problem data.
///
/// Every variant names the violated expectation, so the message alone is
/// enough to locate the problem in an instance file.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// The instance has no customers (`n <= 1`).
    NoCustomers {
        dimension: usize,
    },
    /// Capacity is zero, negative, or not finite.
    InvalidCapacity {
        capacity: f64,
    },
    /// The distance matrix does not have `dimension` rows.
    MatrixRowCount {
        expected: usize,
        found: usize,
    },
    /// A distance matrix row has the wrong number of entries.
    MatrixColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A distance is negative or not finite.
    InvalidDistance {
        from: usize,
        to: usize,
        value: f64,
    },
    /// The demand vector does not have `dimension` entries.
    DemandCount {
        expected: usize,
        found: usize,
    },
    /// A demand is negative or not finite.
    InvalidDemand {
        node: usize,
        value: f64,
    },
    /// The depot carries a non-zero demand.
    DepotDemand {
        value: f64,
    },
    /// A required header key (`DIMENSION`, `CAPACITY`) is absent.
    MissingHeader {
        key: &'static str,
    },
    /// A header key is present but its value does not parse.
    MalformedHeader {
        key: String,
        value: String,
    },
    /// A required section marker is absent.
    MissingSection {
        section: &'static str,
    },
    /// A token inside a section is not a number.
    MalformedEntry {
        section: &'static str,
        line: usize,
        token: String,
    },
    /// The demand section ended before all nodes were listed.
    TooFewDemands {
        expected: usize,
        found: usize,
    },
    /// A demand line refers to a node outside `1..=dimension`.
    NodeOutOfRange {
        node: usize,
        dimension: usize,
    },
    /// A demand line repeats a node already listed.
    DuplicateNode {
        node: usize,
    },
    /// The instance file could not be read.
    Io {
        path: String,
        message: String,
    },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCustomers { dimension } => {
                write!(f, "instance has no customers (DIMENSION = {dimension})")
            }
            Self::InvalidCapacity { capacity } => {
                write!(f, "CAPACITY must be positive and finite, got {capacity}")
            }
            Self::MatrixRowCount { expected, found } => write!(
                f,
                "EDGE_WEIGHT_SECTION: expected {expected} rows, found {found}"
            ),
            Self::MatrixColumnCount {
                row,
                expected,
                found,
            } => write!(
                f,
                "EDGE_WEIGHT_SECTION: row {row} has {found} columns, expected {expected}"
            ),
            Self::InvalidDistance { from, to, value } => write!(
                f,
                "EDGE_WEIGHT_SECTION: distance {from}->{to} must be non-negative and finite, got {value}"
            ),
            Self::DemandCount { expected, found } => write!(
                f,
                "DEMAND_SECTION: expected {expected} demands, found {found}"
            ),
            Self::InvalidDemand { node, value } => write!(
                f,
                "DEMAND_SECTION: demand of node {node} must be non-negative and finite, got {value}"
            ),
            Self::DepotDemand { value } => {
                write!(f, "DEMAND_SECTION: depot demand must be 0, got {value}")
            }
            Self::MissingHeader { key } => write!(f, "{key} not found in instance header"),
            Self::MalformedHeader { key, value } => {
                write!(f, "{key}: cannot parse value {value:?}")
            }
            Self::MissingSection { section } => write!(f, "{section} not found"),
            Self::MalformedEntry {
                section,
                line,
                token,
            } => write!(f, "{section}: line {line}: {token:?} is not a number"),
            Self::TooFewDemands { expected, found } => write!(
                f,
                "DEMAND_SECTION: {found} lines found, fewer than DIMENSION = {expected}"
            ),
            Self::NodeOutOfRange { node, dimension } => write!(
                f,
                "DEMAND_SECTION: node {node} outside 1..={dimension}"
            ),
            Self::DuplicateNode { node } => {
                write!(f, "DEMAND_SECTION: node {node} listed more than once")
            }
            Self::Io { path, message } => write!(f, "cannot read {path}: {message}"),
        }
    }
}

impl std::error::Error for InstanceError {}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq)]
pub enum CvrpError {
    /// Problem data is invalid.
    Instance(InstanceError),
    /// An engine configuration failed validation.
    InvalidConfig {
        engine: &'static str,
        reason: String,
    },
}

impl fmt::Display for CvrpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(e) => write!(f, "invalid instance: {e}"),
            Self::InvalidConfig { engine, reason } => {
                write!(f, "invalid {engine} configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for CvrpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Instance(e) => Some(e),
            Self::InvalidConfig { .. } => None,
        }
    }
}

impl From<InstanceError> for CvrpError {
    fn from(e: InstanceError) -> Self {
        Self::Instance(e)
    }
}

/// Failure to read a pipe-delimited summary line back.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// The first field does not end in `_SUMMARY`.
    MissingTag {
        /// The offending first field.
        found: String,
    },
    /// Wrong number of `|`-separated fields.
    FieldCount {
        /// Fields in a well-formed line.
        expected: usize,
        /// Fields actually present.
        found: usize,
    },
    /// A field that does not parse as its expected type.
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTag { found } => {
                write!(f, "summary line must start with <TAG>_SUMMARY, got {found:?}")
            }
            Self::FieldCount { expected, found } => {
                write!(f, "summary line has {found} fields, expected {expected}")
            }
            Self::InvalidField { field, value } => {
                write!(f, "summary field {field}: cannot parse {value:?}")
            }
        }
    }
}

impl std::error::Error for SummaryError {}
