//! CVRP problem data.
//!
//! An [`Instance`] is immutable once built: node count, vehicle capacity,
//! a dense distance matrix, and a demand per node. Node 0 is the depot;
//! nodes `1..n` are customers.
//!
//! Engines borrow the instance for the whole run and never mutate it, so a
//! single `Instance` can be shared across concurrently executing runs.

mod parser;

use crate::error::InstanceError;
use log::warn;
use std::path::Path;

/// Index of the depot node.
pub const DEPOT: usize = 0;

/// Immutable CVRP instance.
///
/// # Examples
///
/// ```
/// use u_cvrp::instance::Instance;
///
/// let inst = Instance::from_rows(
///     10.0,
///     vec![
///         vec![0.0, 3.0, 4.0],
///         vec![3.0, 0.0, 5.0],
///         vec![4.0, 5.0, 0.0],
///     ],
///     vec![0.0, 5.0, 5.0],
/// )
/// .unwrap();
/// assert_eq!(inst.dimension(), 3);
/// assert_eq!(inst.num_customers(), 2);
/// assert!((inst.distance(1, 2) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    name: Option<String>,
    dimension: usize,
    capacity: f64,
    /// Row-major `dimension × dimension`.
    distances: Vec<f64>,
    demands: Vec<f64>,
}

impl Instance {
    /// Builds an instance from a flat row-major distance matrix.
    ///
    /// # Errors
    ///
    /// Rejects instances without customers, non-positive or non-finite
    /// capacity, mismatched matrix/demand sizes, negative distances or
    /// demands, and a non-zero depot demand.
    pub fn new(capacity: f64, distances: Vec<f64>, demands: Vec<f64>) -> Result<Self, InstanceError> {
        let dimension = demands.len();
        if distances.len() != dimension * dimension {
            let rows = if dimension == 0 {
                0
            } else {
                distances.len() / dimension
            };
            return Err(InstanceError::MatrixRowCount {
                expected: dimension,
                found: rows,
            });
        }
        Self::validated(None, dimension, capacity, distances, demands)
    }

    /// Builds an instance from one `Vec` per matrix row.
    pub fn from_rows(
        capacity: f64,
        rows: Vec<Vec<f64>>,
        demands: Vec<f64>,
    ) -> Result<Self, InstanceError> {
        let dimension = rows.len();
        if demands.len() != dimension {
            return Err(InstanceError::DemandCount {
                expected: dimension,
                found: demands.len(),
            });
        }
        let mut distances = Vec::with_capacity(dimension * dimension);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dimension {
                return Err(InstanceError::MatrixColumnCount {
                    row,
                    expected: dimension,
                    found: values.len(),
                });
            }
            distances.extend(values);
        }
        Self::validated(None, dimension, capacity, distances, demands)
    }

    /// Parses an instance in explicit full-matrix format.
    ///
    /// ```
    /// use u_cvrp::instance::Instance;
    ///
    /// let text = "\
    /// NAME : tiny
    /// DIMENSION : 3
    /// CAPACITY : 10
    /// EDGE_WEIGHT_SECTION
    /// 0 3 4
    /// 3 0 5
    /// 4 5 0
    /// DEMAND_SECTION
    /// 1 0
    /// 2 5
    /// 3 5
    /// ";
    /// let inst = Instance::parse(text).unwrap();
    /// assert_eq!(inst.name(), Some("tiny"));
    /// assert!((inst.total_demand() - 10.0).abs() < 1e-12);
    /// ```
    pub fn parse(text: &str) -> Result<Self, InstanceError> {
        let raw = parser::parse(text)?;
        Self::validated(
            raw.name,
            raw.dimension,
            raw.capacity,
            raw.distances,
            raw.demands,
        )
    }

    /// Reads and parses an instance file.
    ///
    /// When the file carries no `NAME` header, the file name is used.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InstanceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| InstanceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut instance = Self::parse(&text)?;
        if instance.name.is_none() {
            instance.name = Some(path.display().to_string());
        }
        Ok(instance)
    }

    fn validated(
        name: Option<String>,
        dimension: usize,
        capacity: f64,
        distances: Vec<f64>,
        demands: Vec<f64>,
    ) -> Result<Self, InstanceError> {
        if dimension <= 1 {
            return Err(InstanceError::NoCustomers { dimension });
        }
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(InstanceError::InvalidCapacity { capacity });
        }
        if demands.len() != dimension {
            return Err(InstanceError::DemandCount {
                expected: dimension,
                found: demands.len(),
            });
        }
        for (idx, &value) in distances.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(InstanceError::InvalidDistance {
                    from: idx / dimension,
                    to: idx % dimension,
                    value,
                });
            }
        }
        for (node, &value) in demands.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(InstanceError::InvalidDemand { node, value });
            }
        }
        if demands[DEPOT] != 0.0 {
            return Err(InstanceError::DepotDemand {
                value: demands[DEPOT],
            });
        }

        let instance = Self {
            name,
            dimension,
            capacity,
            distances,
            demands,
        };
        let oversized = instance.oversized_customers();
        if !oversized.is_empty() {
            warn!(
                "customers {:?} exceed capacity {} on their own; every solution will be penalized",
                oversized, capacity
            );
        }
        Ok(instance)
    }

    /// Sets the instance name used in reports.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Instance name, if known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of nodes including the depot.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of customers (`dimension - 1`).
    pub fn num_customers(&self) -> usize {
        self.dimension - 1
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Travel distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from * self.dimension + to]
    }

    /// Demand of `node`.
    #[inline]
    pub fn demand(&self, node: usize) -> f64 {
        self.demands[node]
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> f64 {
        self.demands.iter().sum()
    }

    /// Customer ids `1..dimension`, in ascending order.
    pub fn customers(&self) -> impl Iterator<Item = usize> {
        1..self.dimension
    }

    /// Customers whose demand alone exceeds capacity.
    pub fn oversized_customers(&self) -> Vec<usize> {
        self.customers()
            .filter(|&c| self.demands[c] > self.capacity)
            .collect()
    }
}
