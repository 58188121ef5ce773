//! Text reader for explicit full-matrix CVRP files.
//!
//! ```text
//! NAME : example
//! DIMENSION : 4
//! CAPACITY : 30
//! EDGE_WEIGHT_SECTION
//! 0 5 6 7
//! ...                  (DIMENSION rows of DIMENSION numbers)
//! DEMAND_SECTION
//! 1 0
//! 2 10
//! ...                  (DIMENSION lines "node demand", node is 1-based)
//! ```
//!
//! Blank lines are ignored everywhere. Unknown header keys are skipped, as
//! is anything after the demand section (`DEPOT_SECTION`, `EOF`).

use crate::error::InstanceError;

const EDGE_WEIGHT_SECTION: &str = "EDGE_WEIGHT_SECTION";
const DEMAND_SECTION: &str = "DEMAND_SECTION";

/// Parsed but not yet validated instance data.
#[derive(Debug)]
pub(super) struct RawInstance {
    pub name: Option<String>,
    pub dimension: usize,
    pub capacity: f64,
    pub distances: Vec<f64>,
    pub demands: Vec<f64>,
}

pub(super) fn parse(text: &str) -> Result<RawInstance, InstanceError> {
    // (1-based source line number, trimmed content)
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let mut name = None;
    let mut dimension = None;
    let mut capacity = None;
    let mut found_matrix = false;

    for (_, line) in lines.by_ref() {
        if line == EDGE_WEIGHT_SECTION {
            found_matrix = true;
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "NAME" => name = Some(value.to_string()),
            "DIMENSION" => dimension = Some(parse_header::<usize>(key, value)?),
            "CAPACITY" => capacity = Some(parse_header::<f64>(key, value)?),
            _ => {}
        }
    }

    let dimension = dimension.ok_or(InstanceError::MissingHeader { key: "DIMENSION" })?;
    let capacity = capacity.ok_or(InstanceError::MissingHeader { key: "CAPACITY" })?;
    if !found_matrix {
        return Err(InstanceError::MissingSection {
            section: EDGE_WEIGHT_SECTION,
        });
    }

    // DIMENSION is untrusted: the matrix grows only as rows are read.
    if dimension.checked_mul(dimension).is_none() {
        return Err(InstanceError::MalformedHeader {
            key: "DIMENSION".to_string(),
            value: dimension.to_string(),
        });
    }
    let mut distances = Vec::new();
    for row in 0..dimension {
        let (line_no, line) = lines.next().ok_or(InstanceError::MatrixRowCount {
            expected: dimension,
            found: row,
        })?;
        let before = distances.len();
        for token in line.split_whitespace() {
            distances.push(parse_entry(EDGE_WEIGHT_SECTION, line_no, token)?);
        }
        let found = distances.len() - before;
        if found != dimension {
            return Err(InstanceError::MatrixColumnCount {
                row,
                expected: dimension,
                found,
            });
        }
    }

    if !lines.by_ref().any(|(_, l)| l == DEMAND_SECTION) {
        return Err(InstanceError::MissingSection {
            section: DEMAND_SECTION,
        });
    }

    let mut demands = vec![0.0; dimension];
    let mut seen = vec![false; dimension];
    for found in 0..dimension {
        let (line_no, line) = lines.next().ok_or(InstanceError::TooFewDemands {
            expected: dimension,
            found,
        })?;
        let mut tokens = line.split_whitespace();
        let (Some(node), Some(demand)) = (tokens.next(), tokens.next()) else {
            return Err(InstanceError::MalformedEntry {
                section: DEMAND_SECTION,
                line: line_no,
                token: line.to_string(),
            });
        };
        let node: usize = node.parse().map_err(|_| InstanceError::MalformedEntry {
            section: DEMAND_SECTION,
            line: line_no,
            token: node.to_string(),
        })?;
        if node == 0 || node > dimension {
            return Err(InstanceError::NodeOutOfRange { node, dimension });
        }
        if std::mem::replace(&mut seen[node - 1], true) {
            return Err(InstanceError::DuplicateNode { node });
        }
        demands[node - 1] = parse_entry(DEMAND_SECTION, line_no, demand)?;
    }

    Ok(RawInstance {
        name,
        dimension,
        capacity,
        distances,
        demands,
    })
}

fn parse_header<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, InstanceError> {
    value.parse().map_err(|_| InstanceError::MalformedHeader {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_entry(section: &'static str, line: usize, token: &str) -> Result<f64, InstanceError> {
    token.parse().map_err(|_| InstanceError::MalformedEntry {
        section,
        line,
        token: token.to_string(),
    })
}
