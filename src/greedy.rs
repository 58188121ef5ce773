//! Nearest-neighbor constructive baseline.
//!
//! Builds routes greedily: starting from the depot, always visit the nearest
//! unvisited customer whose demand still fits. When none fits, the route is
//! closed and a new one starts at the depot.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use crate::codec::{solution_cost, total_overload, Evaluator, Route, Solution};
use crate::instance::DEPOT;
use log::debug;

/// Constructs a solution with the nearest-neighbor heuristic.
///
/// Ties in distance go to the lowest customer id. A customer whose demand
/// exceeds capacity on its own is served alone by the route that finds no
/// other candidate, and is charged the usual overload penalty.
///
/// # Examples
///
/// ```
/// use u_cvrp::codec::Evaluator;
/// use u_cvrp::greedy::nearest_neighbor;
/// use u_cvrp::instance::Instance;
///
/// let inst = Instance::from_rows(
///     10.0,
///     vec![vec![0.0, 3.0, 4.0], vec![3.0, 0.0, 5.0], vec![4.0, 5.0, 0.0]],
///     vec![0.0, 5.0, 5.0],
/// )
/// .unwrap();
/// let solution = nearest_neighbor(&Evaluator::new(&inst));
/// assert_eq!(solution.routes, vec![vec![0, 1, 2, 0]]);
/// assert!((solution.cost - 12.0).abs() < 1e-9);
/// ```
pub fn nearest_neighbor(evaluator: &Evaluator<'_>) -> Solution {
    let instance = evaluator.instance();
    let n = instance.dimension();
    let capacity = instance.capacity();

    let mut visited = vec![false; n];
    visited[DEPOT] = true;
    let mut remaining = instance.num_customers();
    let mut routes: Vec<Route> = Vec::new();

    while remaining > 0 {
        let mut route = vec![DEPOT];
        let mut load = 0.0;
        let mut current = DEPOT;

        loop {
            // Find nearest unvisited customer that fits capacity
            let mut best: Option<(usize, f64)> = None;
            for i in instance.customers() {
                if visited[i] || load + instance.demand(i) > capacity {
                    continue;
                }
                let d = instance.distance(current, i);
                if best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((i, d));
                }
            }

            // An empty route with nothing that fits: the nearest oversized
            // customer rides alone.
            if best.is_none() && route.len() == 1 {
                best = instance
                    .customers()
                    .filter(|&i| !visited[i])
                    .map(|i| (i, instance.distance(DEPOT, i)))
                    .fold(None, |acc: Option<(usize, f64)>, (i, d)| match acc {
                        Some((_, bd)) if bd <= d => acc,
                        _ => Some((i, d)),
                    });
            }

            match best {
                Some((next, _)) => {
                    visited[next] = true;
                    remaining -= 1;
                    route.push(next);
                    load += instance.demand(next);
                    current = next;
                }
                None => break,
            }
        }

        route.push(DEPOT);
        routes.push(route);
    }

    let cost = solution_cost(instance, &routes);
    let overload = total_overload(instance, &routes);
    debug!(
        "nearest neighbor built {} routes, cost = {cost:.2}, overload = {overload:.2}",
        routes.len()
    );

    Solution {
        routes,
        cost,
        overload,
        fitness: cost + evaluator.penalty_factor() * overload,
    }
}

/// Concatenates the customers of `routes` into a chromosome.
///
/// Decoding the result does not necessarily reproduce `routes`, since the
/// decoder fills each vehicle as far as capacity allows.
pub fn routes_to_chromosome(routes: &[Route]) -> Vec<usize> {
    routes
        .iter()
        .flat_map(|r| r.iter().copied().filter(|&node| node != DEPOT))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;

    /// Customers on a line at x = 1..=k with the given demands.
    fn line_instance(demands: &[f64], capacity: f64) -> Instance {
        let n = demands.len() + 1;
        let rows = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect();
        let mut all = vec![0.0];
        all.extend_from_slice(demands);
        Instance::from_rows(capacity, rows, all).unwrap()
    }

    #[test]
    fn test_nn_all_on_one_route() {
        let inst = line_instance(&[1.0, 1.0, 1.0], 100.0);
        let solution = nearest_neighbor(&Evaluator::new(&inst));
        assert_eq!(solution.routes, vec![vec![0, 1, 2, 3, 0]]);
        assert!((solution.cost - 6.0).abs() < 1e-12);
        assert!(solution.is_feasible());
    }

    #[test]
    fn test_nn_capacity_split() {
        let inst = line_instance(&[4.0, 4.0, 4.0, 4.0], 10.0);
        let solution = nearest_neighbor(&Evaluator::new(&inst));
        assert_eq!(solution.routes, vec![vec![0, 1, 2, 0], vec![0, 3, 4, 0]]);
        assert!((solution.cost - 4.0 - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_nn_skips_to_fitting_customer() {
        // After 1 (load 6), customer 2 (demand 6) does not fit but 3 (demand 3) does.
        let inst = line_instance(&[6.0, 6.0, 3.0], 10.0);
        let solution = nearest_neighbor(&Evaluator::new(&inst));
        assert_eq!(solution.routes, vec![vec![0, 1, 3, 0], vec![0, 2, 0]]);
    }

    #[test]
    fn test_nn_ties_go_to_lowest_id() {
        let inst = Instance::from_rows(
            10.0,
            vec![
                vec![0.0, 2.0, 2.0],
                vec![2.0, 0.0, 1.0],
                vec![2.0, 1.0, 0.0],
            ],
            vec![0.0, 1.0, 1.0],
        )
        .unwrap();
        let solution = nearest_neighbor(&Evaluator::new(&inst));
        assert_eq!(solution.routes, vec![vec![0, 1, 2, 0]]);
    }

    #[test]
    fn test_nn_oversized_customer_rides_alone() {
        let inst = line_instance(&[2.0, 15.0, 2.0], 10.0);
        let solution = nearest_neighbor(&Evaluator::new(&inst));
        assert_eq!(solution.routes, vec![vec![0, 1, 3, 0], vec![0, 2, 0]]);
        assert!((solution.overload - 5.0).abs() < 1e-12);
        assert!((solution.fitness - solution.cost - 5000.0).abs() < 1e-9);
    }

    #[test]
    fn test_routes_to_chromosome() {
        let routes = vec![vec![0, 3, 1, 0], vec![0, 2, 0]];
        assert_eq!(routes_to_chromosome(&routes), vec![3, 1, 2]);
    }

    #[test]
    fn test_nn_serves_every_customer_once() {
        let inst = line_instance(&[3.0, 7.0, 2.0, 5.0, 9.0, 1.0], 10.0);
        let solution = nearest_neighbor(&Evaluator::new(&inst));
        let mut chrom = routes_to_chromosome(&solution.routes);
        chrom.sort_unstable();
        assert_eq!(chrom, (1..=6).collect::<Vec<_>>());
        assert!(solution.is_feasible());
    }
}
