use log::{debug, error, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::path::Path;
pub mod bench;
pub mod chart;
pub mod knapsack;
pub mod plot;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DEFAULT_CSV: &str = "knapsack_algorithm_performance.csv";

/// placeholder written for a solver that was not run at that scale
pub const MISSING_STR: &str = "-";

pub const COL_ITEMS: &str = "Number of Items";
pub const COL_CAPACITY: &str = "Knapsack Capacity";

/// at most this many capacities are plotted, the largest ones
pub const MAX_CAPACITIES: usize = 3;

/// The benchmarked solvers, in the column order of the measurement csv
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    BruteForce,
    DynamicProgramming,
    GreedySelectionSort,
    GreedyQuickSort,
    Backtracking,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::BruteForce,
        Algorithm::DynamicProgramming,
        Algorithm::GreedySelectionSort,
        Algorithm::GreedyQuickSort,
        Algorithm::Backtracking,
    ];

    /// header of the timing column in the measurement csv
    pub fn column(self) -> &'static str {
        match self {
            Algorithm::BruteForce => "Brute Force (ms)",
            Algorithm::DynamicProgramming => "Dynamic Programming (ms)",
            Algorithm::GreedySelectionSort => "Greedy (Selection Sort) (ms)",
            Algorithm::GreedyQuickSort => "Greedy (Quick Sort) (ms)",
            Algorithm::Backtracking => "Backtracking (ms)",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::BruteForce => "Brute Force",
            Algorithm::DynamicProgramming => "Dynamic Programming",
            Algorithm::GreedySelectionSort => "Greedy (Selection Sort)",
            Algorithm::GreedyQuickSort => "Greedy (Quick Sort)",
            Algorithm::Backtracking => "Backtracking",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One benchmark run: the solver times for a given item count and capacity.
/// A time is None when the solver was not run at that scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub items: u64,
    pub capacity: u64,
    pub times: [Option<f64>; 5],
}

impl Measurement {
    pub fn new(items: u64, capacity: u64) -> Measurement {
        Measurement {
            items,
            capacity,
            times: [None; 5],
        }
    }

    pub fn time(&self, alg: Algorithm) -> Option<f64> {
        self.times[alg.index()]
    }

    pub fn set_time(&mut self, alg: Algorithm, ms: Option<f64>) {
        self.times[alg.index()] = ms;
    }
}

/// The main struct for the benchmark measurements, read-only once loaded
#[derive(Debug, Clone, Default)]
pub struct PerformanceTable {
    pub rows: Vec<Measurement>,
}

impl PerformanceTable {
    pub fn new(rows: Vec<Measurement>) -> PerformanceTable {
        PerformanceTable { rows }
    }

    /// Init a PerformanceTable from csv.
    /// Item count and capacity must parse, otherwise the whole read fails.
    /// Timing cells that are the placeholder, empty or invalid become None,
    /// a missing timing column gives None for every row.
    pub fn from_csv<P: AsRef<Path>>(fin: P) -> Result<PerformanceTable, Box<dyn Error>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(fin.as_ref())?;
        let headers = rdr.headers()?.clone();
        let find = |name: &str| headers.iter().position(|h| h == name);
        let col_items = find(COL_ITEMS).ok_or_else(|| format!("missing column '{}'", COL_ITEMS))?;
        let col_capacity =
            find(COL_CAPACITY).ok_or_else(|| format!("missing column '{}'", COL_CAPACITY))?;
        let mut col_times: [Option<usize>; 5] = [None; 5];
        for alg in Algorithm::ALL.iter() {
            col_times[alg.index()] = find(alg.column());
            if col_times[alg.index()].is_none() {
                warn!("column '{}' not found, treated as missing", alg.column());
            }
        }

        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            // header is line 1
            let line = i + 2;
            let items = parse_count(record.get(col_items), COL_ITEMS, line)?;
            let capacity = parse_count(record.get(col_capacity), COL_CAPACITY, line)?;
            let mut m = Measurement::new(items, capacity);
            for alg in Algorithm::ALL.iter() {
                let cell = col_times[alg.index()].and_then(|c| record.get(c));
                m.set_time(*alg, parse_time(cell, line));
            }
            rows.push(m);
        }
        debug!("read {} measurements", rows.len());
        Ok(PerformanceTable { rows })
    }

    /// rows measured with the given capacity, in file order
    pub fn for_capacity(&self, capacity: u64) -> impl Iterator<Item = &Measurement> {
        self.rows.iter().filter(move |m| m.capacity == capacity)
    }
}

fn parse_count(cell: Option<&str>, column: &str, line: usize) -> Result<u64, Box<dyn Error>> {
    let s = cell.ok_or_else(|| format!("line {}: no value for '{}'", line, column))?;
    s.parse::<u64>()
        .map_err(|e| format!("line {}: invalid '{}' value '{}': {}", line, column, s, e).into())
}

fn parse_time(cell: Option<&str>, line: usize) -> Option<f64> {
    let s = cell?;
    if s.is_empty() || s == MISSING_STR {
        return None;
    }
    match s.parse::<f64>() {
        Ok(t) if t.is_finite() && t >= 0. => Some(t),
        _ => {
            debug!("line {}: invalid time '{}', set as missing", line, s);
            None
        }
    }
}

/// Reads the measurements, reporting instead of propagating any failure.
/// None means the data is unavailable.
pub fn read_performance_data<P: AsRef<Path>>(fin: P) -> Option<PerformanceTable> {
    match PerformanceTable::from_csv(fin.as_ref()) {
        Ok(table) => Some(table),
        Err(e) => {
            error!("reading {}: {}", fin.as_ref().display(), e);
            println!("error while reading the data file: {}", e);
            None
        }
    }
}

/// log filter for the binaries, RUST_LOG still takes precedence
pub fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// sorted unique capacities, only the MAX_CAPACITIES largest are kept
pub fn select_capacities(table: &PerformanceTable) -> Vec<u64> {
    let unique: BTreeSet<u64> = table.rows.iter().map(|m| m.capacity).collect();
    let skip = unique.len().saturating_sub(MAX_CAPACITIES);
    unique.into_iter().skip(skip).collect()
}

/// min and max of a slice, None when empty
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    const HEADER: &str = "Number of Items,Knapsack Capacity,Brute Force (ms),Dynamic Programming (ms),\
        Greedy (Selection Sort) (ms),Greedy (Quick Sort) (ms),Backtracking (ms)\n";

    fn table_with_capacities(caps: &[u64]) -> PerformanceTable {
        PerformanceTable::new(caps.iter().map(|&c| Measurement::new(10, c)).collect())
    }

    #[test]
    fn placeholder_is_missing_everywhere() {
        let f = write_tmp(&format!(
            "{}10,10000,1.25,0.50,-,-,0.75\n1000,10000,-,12.00,3.10,0.40,-\n",
            HEADER
        ));
        let t = PerformanceTable::from_csv(f.path()).unwrap();
        assert_eq!(t.rows.len(), 2);
        let small = &t.rows[0];
        assert_eq!(small.items, 10);
        assert_eq!(small.capacity, 10000);
        assert_eq!(small.time(Algorithm::BruteForce), Some(1.25));
        assert_eq!(small.time(Algorithm::DynamicProgramming), Some(0.5));
        assert_eq!(small.time(Algorithm::GreedySelectionSort), None);
        assert_eq!(small.time(Algorithm::GreedyQuickSort), None);
        assert_eq!(small.time(Algorithm::Backtracking), Some(0.75));
        let large = &t.rows[1];
        assert_eq!(large.time(Algorithm::BruteForce), None);
        assert_eq!(large.time(Algorithm::GreedyQuickSort), Some(0.4));
        assert_eq!(large.time(Algorithm::Backtracking), None);
    }

    #[test]
    fn invalid_time_is_missing_not_zero() {
        let f = write_tmp(&format!("{}10,50,abc,,-3,nan,2\n", HEADER));
        let t = PerformanceTable::from_csv(f.path()).unwrap();
        let m = &t.rows[0];
        assert_eq!(m.time(Algorithm::BruteForce), None);
        assert_eq!(m.time(Algorithm::DynamicProgramming), None);
        assert_eq!(m.time(Algorithm::GreedySelectionSort), None);
        assert_eq!(m.time(Algorithm::GreedyQuickSort), None);
        assert_eq!(m.time(Algorithm::Backtracking), Some(2.0));
    }

    #[test]
    fn columns_resolved_by_name() {
        let f = write_tmp("Backtracking (ms),Knapsack Capacity,Number of Items\n 4.5 , 20 , 15 \n");
        let t = PerformanceTable::from_csv(f.path()).unwrap();
        let m = &t.rows[0];
        assert_eq!((m.items, m.capacity), (15, 20));
        assert_eq!(m.time(Algorithm::Backtracking), Some(4.5));
        assert_eq!(m.time(Algorithm::DynamicProgramming), None);
    }

    #[test]
    fn missing_key_column_fails() {
        let f = write_tmp("Number of Items,Brute Force (ms)\n10,1.0\n");
        assert!(PerformanceTable::from_csv(f.path()).is_err());
        assert!(read_performance_data(f.path()).is_none());
    }

    #[test]
    fn invalid_item_count_fails() {
        let f = write_tmp(&format!("{}ten,100,-,-,-,-,-\n", HEADER));
        assert!(read_performance_data(f.path()).is_none());
    }

    #[test]
    fn nonexistent_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_performance_data(dir.path().join("nope.csv")).is_none());
    }

    #[test]
    fn three_largest_capacities() {
        let t = table_with_capacities(&[20, 5, 50, 10, 20]);
        assert_eq!(select_capacities(&t), vec![10, 20, 50]);
    }

    #[test]
    fn few_capacities_unchanged() {
        let t = table_with_capacities(&[10, 5, 10]);
        assert_eq!(select_capacities(&t), vec![5, 10]);
        assert!(select_capacities(&PerformanceTable::default()).is_empty());
    }

    #[test]
    fn min_max_of_slice() {
        assert_eq!(min_and_max(&[3., 1., 7.]), Some((1., 7.)));
        assert_eq!(min_and_max::<u64>(&[]), None);
    }
}
