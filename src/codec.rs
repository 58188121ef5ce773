//! Chromosome decoding and fitness evaluation.
//!
//! All engines search over the same representation: a permutation of the
//! customer ids `1..n`. This module is the only place that turns such a
//! permutation into routes and a fitness value.
//!
//! # Decoding
//!
//! [`decode`] is a single left-to-right scan. Customers are appended to the
//! open route until the next one would exceed capacity; the route is then
//! closed at the depot and a new one starts with that customer. A route is
//! never closed while it is still empty, so a customer whose demand alone
//! exceeds capacity ends up alone in an overloaded route. That overload is
//! not rejected here; [`Evaluator::fitness`] charges it as a penalty.
//!
//! # Fitness
//!
//! `fitness = Σ route cost + penalty_factor × Σ max(0, load − capacity)`

use crate::instance::{Instance, DEPOT};

/// Default weight of one unit of capacity overload.
pub const DEFAULT_PENALTY_FACTOR: f64 = 1000.0;

/// A depot-to-depot node sequence, e.g. `[0, 3, 1, 0]`.
pub type Route = Vec<usize>;

/// Decodes a customer permutation into capacity-respecting routes.
///
/// Every returned route starts and ends at the depot. The concatenation of
/// the routes' customers equals `chromosome`.
///
/// # Examples
///
/// ```
/// use u_cvrp::codec::decode;
/// use u_cvrp::instance::Instance;
///
/// let inst = Instance::from_rows(
///     10.0,
///     vec![
///         vec![0.0, 3.0, 4.0, 2.0],
///         vec![3.0, 0.0, 5.0, 1.0],
///         vec![4.0, 5.0, 0.0, 6.0],
///         vec![2.0, 1.0, 6.0, 0.0],
///     ],
///     vec![0.0, 6.0, 3.0, 5.0],
/// )
/// .unwrap();
///
/// let routes = decode(&inst, &[1, 2, 3]);
/// assert_eq!(routes, vec![vec![0, 1, 2, 0], vec![0, 3, 0]]);
/// ```
pub fn decode(instance: &Instance, chromosome: &[usize]) -> Vec<Route> {
    let capacity = instance.capacity();
    let mut routes = Vec::new();
    let mut route = vec![DEPOT];
    let mut load = 0.0;

    for &customer in chromosome {
        let demand = instance.demand(customer);
        if load + demand > capacity && route.len() > 1 {
            route.push(DEPOT);
            routes.push(std::mem::replace(&mut route, vec![DEPOT, customer]));
            load = demand;
        } else {
            route.push(customer);
            load += demand;
        }
    }

    route.push(DEPOT);
    routes.push(route);
    routes
}

/// Travel distance along `route`, both depot legs included.
pub fn route_cost(instance: &Instance, route: &[usize]) -> f64 {
    route
        .windows(2)
        .map(|w| instance.distance(w[0], w[1]))
        .sum()
}

/// Sum of demands served by `route`.
pub fn route_load(instance: &Instance, route: &[usize]) -> f64 {
    route.iter().map(|&node| instance.demand(node)).sum()
}

/// Total travel distance of all routes.
pub fn solution_cost(instance: &Instance, routes: &[Route]) -> f64 {
    routes.iter().map(|r| route_cost(instance, r)).sum()
}

/// Total load above capacity, summed over routes.
pub fn total_overload(instance: &Instance, routes: &[Route]) -> f64 {
    let capacity = instance.capacity();
    routes
        .iter()
        .map(|r| (route_load(instance, r) - capacity).max(0.0))
        .sum()
}

/// A decoded chromosome with its cost breakdown.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Depot-to-depot routes.
    pub routes: Vec<Route>,
    /// Total travel distance.
    pub cost: f64,
    /// Total capacity overload.
    pub overload: f64,
    /// `cost + penalty_factor * overload`.
    pub fitness: f64,
}

impl Solution {
    /// Whether every route respects capacity.
    pub fn is_feasible(&self) -> bool {
        self.overload <= 0.0
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }
}

/// Fitness function shared by all engines.
///
/// Cheap to copy: it borrows the instance and carries the penalty factor.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    instance: &'a Instance,
    penalty_factor: f64,
}

impl<'a> Evaluator<'a> {
    /// Evaluator with [`DEFAULT_PENALTY_FACTOR`].
    pub fn new(instance: &'a Instance) -> Self {
        Self::with_penalty(instance, DEFAULT_PENALTY_FACTOR)
    }

    /// Evaluator with an explicit penalty factor.
    pub fn with_penalty(instance: &'a Instance, penalty_factor: f64) -> Self {
        Self {
            instance,
            penalty_factor,
        }
    }

    /// The instance being evaluated.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Weight of one unit of overload.
    pub fn penalty_factor(&self) -> f64 {
        self.penalty_factor
    }

    /// Customer permutation in ascending id order.
    pub fn identity_chromosome(&self) -> Vec<usize> {
        self.instance.customers().collect()
    }

    /// Penalized cost of a chromosome. Lower is better.
    ///
    /// Equivalent to `self.solution(chromosome).fitness`, without
    /// materializing the routes.
    pub fn fitness(&self, chromosome: &[usize]) -> f64 {
        let instance = self.instance;
        let capacity = instance.capacity();
        // Per-route partial sums keep the result bit-identical to
        // `solution_cost(decode(..))`.
        let mut cost = 0.0;
        let mut overload = 0.0;
        let mut route_cost = 0.0;
        let mut load = 0.0;
        let mut prev = DEPOT;

        for &customer in chromosome {
            let demand = instance.demand(customer);
            if load + demand > capacity && prev != DEPOT {
                route_cost += instance.distance(prev, DEPOT);
                cost += route_cost;
                overload += (load - capacity).max(0.0);
                route_cost = 0.0;
                load = 0.0;
                prev = DEPOT;
            }
            route_cost += instance.distance(prev, customer);
            load += demand;
            prev = customer;
        }
        route_cost += instance.distance(prev, DEPOT);
        cost += route_cost;
        overload += (load - capacity).max(0.0);

        cost + self.penalty_factor * overload
    }

    /// Decodes a chromosome and reports its cost breakdown.
    pub fn solution(&self, chromosome: &[usize]) -> Solution {
        let routes = decode(self.instance, chromosome);
        let cost = solution_cost(self.instance, &routes);
        let overload = total_overload(self.instance, &routes);
        Solution {
            routes,
            cost,
            overload,
            fitness: cost + self.penalty_factor * overload,
        }
    }
}
