//! One-line pipe-delimited summaries.
//!
//! Layout, one field per `|`:
//!
//! ```text
//! TAG_SUMMARY|instance|best|avg|worst|runs|best_run|best_seed|num_routes|num_nodes|
//! num_customers|capacity|total_demand|routes|chromosome|total_time_sec|avg_time_sec
//! ```
//!
//! Fitness and demand carry two decimals, times four. Routes are written
//! `0-1-2-0` and joined by `/`; the chromosome is joined by `-`. A missing
//! seed or chromosome is written `-`.

use super::runner::MultiRunReport;
use crate::codec::{Route, Solution};
use crate::error::SummaryError;
use crate::instance::Instance;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const FIELD_COUNT: usize = 17;
const TAG_SUFFIX: &str = "_SUMMARY";
const NONE: &str = "-";

/// Aggregate of repeated runs, as one summary line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryRecord {
    /// Engine label, e.g. `GA`.
    pub tag: String,
    /// Instance label, usually its file name. Any `|` is written as `_`.
    pub instance: String,
    /// Best fitness over all runs.
    pub best_fitness: f64,
    /// Mean fitness.
    pub avg_fitness: f64,
    /// Worst fitness.
    pub worst_fitness: f64,
    /// Number of runs aggregated.
    pub runs: usize,
    /// 1-based index of the best run.
    pub best_run: usize,
    /// Seed of the best run, absent for deterministic baselines.
    pub best_seed: Option<u64>,
    /// Route count of the best solution.
    pub num_routes: usize,
    /// Depot included.
    pub num_nodes: usize,
    /// Depot excluded.
    pub num_customers: usize,
    /// Vehicle capacity.
    pub capacity: f64,
    /// Sum of customer demands.
    pub total_demand: f64,
    /// Routes of the best solution.
    pub routes: Vec<Route>,
    /// Best chromosome; empty for baselines that do not produce one.
    pub chromosome: Vec<usize>,
    /// Wall-clock seconds over all runs.
    pub total_time_secs: f64,
    /// Mean wall-clock seconds per run.
    pub avg_time_secs: f64,
}

impl SummaryRecord {
    /// Summarizes `report`, decoding its best run against `instance`.
    pub fn from_report(label: &str, instance: &Instance, report: &MultiRunReport) -> Self {
        let best = report.best_run();
        let solution = report.best_solution(instance);
        Self {
            tag: report.tag().to_string(),
            instance: clean_label(label),
            best_fitness: best.fitness,
            avg_fitness: report.average_fitness(),
            worst_fitness: report.worst_fitness(),
            runs: report.num_runs(),
            best_run: best.run + 1,
            best_seed: Some(best.seed),
            num_routes: solution.num_routes(),
            num_nodes: instance.dimension(),
            num_customers: instance.num_customers(),
            capacity: instance.capacity(),
            total_demand: instance.total_demand(),
            routes: solution.routes,
            chromosome: best.best.clone(),
            total_time_secs: report.total_elapsed().as_secs_f64(),
            avg_time_secs: report.average_elapsed().as_secs_f64(),
        }
    }

    /// Summarizes a single deterministic construction such as the greedy
    /// baseline: one run, no seed, no chromosome.
    pub fn from_baseline(
        tag: &str,
        label: &str,
        instance: &Instance,
        solution: &Solution,
        elapsed: Duration,
    ) -> Self {
        let secs = elapsed.as_secs_f64();
        Self {
            tag: tag.to_string(),
            instance: clean_label(label),
            best_fitness: solution.fitness,
            avg_fitness: solution.fitness,
            worst_fitness: solution.fitness,
            runs: 1,
            best_run: 1,
            best_seed: None,
            num_routes: solution.num_routes(),
            num_nodes: instance.dimension(),
            num_customers: instance.num_customers(),
            capacity: instance.capacity(),
            total_demand: instance.total_demand(),
            routes: solution.routes.clone(),
            chromosome: Vec::new(),
            total_time_secs: secs,
            avg_time_secs: secs,
        }
    }

    /// The summary line, without a trailing newline.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Reads a line produced by [`render`](Self::render).
    pub fn parse(line: &str) -> Result<Self, SummaryError> {
        let fields: Vec<&str> = line.trim().split('|').collect();
        let tag = fields[0]
            .strip_suffix(TAG_SUFFIX)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SummaryError::MissingTag {
                found: fields[0].to_string(),
            })?;
        if fields.len() != FIELD_COUNT {
            return Err(SummaryError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }

        Ok(Self {
            tag: tag.to_string(),
            instance: fields[1].to_string(),
            best_fitness: field(fields[2], "best")?,
            avg_fitness: field(fields[3], "avg")?,
            worst_fitness: field(fields[4], "worst")?,
            runs: field(fields[5], "runs")?,
            best_run: field(fields[6], "best_run")?,
            best_seed: match fields[7] {
                NONE => None,
                s => Some(field(s, "best_seed")?),
            },
            num_routes: field(fields[8], "num_routes")?,
            num_nodes: field(fields[9], "num_nodes")?,
            num_customers: field(fields[10], "num_customers")?,
            capacity: field(fields[11], "capacity")?,
            total_demand: field(fields[12], "total_demand")?,
            routes: fields[13]
                .split('/')
                .map(|r| joined(r, "routes"))
                .collect::<Result<_, _>>()?,
            chromosome: match fields[14] {
                NONE => Vec::new(),
                s => joined(s, "chromosome")?,
            },
            total_time_secs: field(fields[15], "total_time_sec")?,
            avg_time_secs: field(fields[16], "avg_time_sec")?,
        })
    }
}

impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let routes = self
            .routes
            .iter()
            .map(|r| join(r))
            .collect::<Vec<_>>()
            .join("/");
        let chromosome = if self.chromosome.is_empty() {
            NONE.to_string()
        } else {
            join(&self.chromosome)
        };
        let seed = self
            .best_seed
            .map_or_else(|| NONE.to_string(), |s| s.to_string());

        write!(
            f,
            "{}{TAG_SUFFIX}|{}|{:.2}|{:.2}|{:.2}|{}|{}|{seed}|{}|{}|{}|{}|{:.2}|{routes}|{chromosome}|{:.4}|{:.4}",
            self.tag,
            self.instance,
            self.best_fitness,
            self.avg_fitness,
            self.worst_fitness,
            self.runs,
            self.best_run,
            self.num_routes,
            self.num_nodes,
            self.num_customers,
            self.capacity,
            self.total_demand,
            self.total_time_secs,
            self.avg_time_secs,
        )
    }
}

impl FromStr for SummaryRecord {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// `|` is the field separator.
fn clean_label(label: &str) -> String {
    label.replace('|', "_")
}

fn join(nodes: &[usize]) -> String {
    nodes
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

fn field<T: FromStr>(raw: &str, name: &'static str) -> Result<T, SummaryError> {
    raw.trim().parse().map_err(|_| SummaryError::InvalidField {
        field: name,
        value: raw.to_string(),
    })
}

fn joined(raw: &str, name: &'static str) -> Result<Vec<usize>, SummaryError> {
    raw.split('-').map(|t| field(t, name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Evaluator;
    use crate::greedy::nearest_neighbor;
    use crate::harness::{Engine, MultiRunner};
    use crate::tabu::TabuConfig;

    fn triangle() -> Instance {
        Instance::from_rows(
            10.0,
            vec![
                vec![0.0, 3.0, 4.0],
                vec![3.0, 0.0, 5.0],
                vec![4.0, 5.0, 0.0],
            ],
            vec![0.0, 5.0, 5.0],
        )
        .unwrap()
    }

    fn sample() -> SummaryRecord {
        SummaryRecord {
            tag: "TABU".into(),
            instance: "data/A-n5.vrp".into(),
            best_fitness: 31.5,
            avg_fitness: 32.25,
            worst_fitness: 33.0,
            runs: 4,
            best_run: 2,
            best_seed: Some(201),
            num_routes: 2,
            num_nodes: 5,
            num_customers: 4,
            capacity: 100.0,
            total_demand: 150.0,
            routes: vec![vec![0, 2, 1, 0], vec![0, 3, 4, 0]],
            chromosome: vec![2, 1, 3, 4],
            total_time_secs: 0.123456,
            avg_time_secs: 0.030864,
        }
    }

    #[test]
    fn test_render_layout() {
        assert_eq!(
            sample().render(),
            "TABU_SUMMARY|data/A-n5.vrp|31.50|32.25|33.00|4|2|201|2|5|4|100|150.00|0-2-1-0/0-3-4-0|2-1-3-4|0.1235|0.0309"
        );
    }

    #[test]
    fn test_parse_rendered_line() {
        let line = sample().render();
        let parsed = SummaryRecord::parse(&line).unwrap();
        assert_eq!(parsed.tag, "TABU");
        assert_eq!(parsed.best_seed, Some(201));
        assert_eq!(parsed.routes, sample().routes);
        assert_eq!(parsed.chromosome, sample().chromosome);
        assert!((parsed.avg_time_secs - 0.0309).abs() < 1e-12);
        assert_eq!(parsed.render(), line);
    }

    #[test]
    fn test_parse_accepts_float_capacity() {
        let line = "GA_SUMMARY|x.vrp|12.00|12.00|12.00|1|1|100|1|3|2|10.0|10.00|0-1-2-0|1-2|0.0010|0.0010";
        let record: SummaryRecord = line.parse().unwrap();
        assert_eq!(record.capacity, 10.0);
        assert_eq!(record.runs, 1);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            SummaryRecord::parse("GA|x"),
            Err(SummaryError::MissingTag { .. })
        ));
        assert!(matches!(
            SummaryRecord::parse("SA_SUMMARY|x|1.00"),
            Err(SummaryError::FieldCount { found: 3, .. })
        ));
        let bad = sample().render().replace("|201|", "|abc|");
        assert_eq!(
            SummaryRecord::parse(&bad),
            Err(SummaryError::InvalidField {
                field: "best_seed",
                value: "abc".into(),
            })
        );
    }

    #[test]
    fn test_from_report() {
        let inst = triangle();
        let report = MultiRunner::run(&inst, &Engine::Tabu(TabuConfig::default()), 3).unwrap();
        let record = SummaryRecord::from_report("tri.vrp", &inst, &report);

        assert_eq!(record.tag, "TABU");
        assert_eq!(record.runs, 3);
        assert_eq!(record.best_run, 1);
        assert_eq!(record.best_seed, Some(200));
        assert_eq!(record.num_nodes, 3);
        assert_eq!(record.num_customers, 2);
        assert_eq!(record.num_routes, 1);
        assert_eq!(record.total_demand, 10.0);
        assert!(record.render().contains("|12.00|12.00|12.00|3|1|200|1|3|2|10|10.00|"));
    }

    #[test]
    fn test_label_with_separator_survives_parse() {
        let inst = triangle();
        let solution = nearest_neighbor(&Evaluator::new(&inst));
        let record =
            SummaryRecord::from_baseline("GREEDY", "a|b", &inst, &solution, Duration::ZERO);
        assert_eq!(record.instance, "a_b");
        let parsed = SummaryRecord::parse(&record.render()).unwrap();
        assert_eq!(parsed, record);

        let report = MultiRunner::run(&inst, &Engine::Tabu(TabuConfig::default()), 1).unwrap();
        let record = SummaryRecord::from_report("x|y|z", &inst, &report);
        assert_eq!(SummaryRecord::parse(&record.render()).unwrap().instance, "x_y_z");
    }

    #[test]
    fn test_from_baseline() {
        let inst = triangle();
        let solution = nearest_neighbor(&Evaluator::new(&inst));
        let record = SummaryRecord::from_baseline(
            "GREEDY",
            "tri.vrp",
            &inst,
            &solution,
            Duration::from_millis(2),
        );
        assert_eq!(
            record.render(),
            "GREEDY_SUMMARY|tri.vrp|12.00|12.00|12.00|1|1|-|1|3|2|10|10.00|0-1-2-0|-|0.0020|0.0020"
        );
        assert_eq!(SummaryRecord::parse(&record.render()).unwrap().best_seed, None);
    }
}
