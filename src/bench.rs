use super::knapsack::{self, Item, Solution};
use super::{Algorithm, Measurement, COL_CAPACITY, COL_ITEMS, DEFAULT_CSV, MISSING_STR, VERSION};
use clap::{App, Arg};
use log::{debug, info};
use rand::Rng;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const ITEM_COUNTS: [u64; 17] = [
    10, 15, 20, 25, 1000, 2000, 3000, 4000, 5000, 6000, 7000, 8000, 9000, 10000, 20000, 40000,
    80000,
];
pub const CAPACITIES: [u64; 3] = [10000, 100000, 1000000];

/// exhaustive solvers only run up to this many items
pub const EXHAUSTIVE_MAX_ITEMS: u64 = 20;
pub const SCALABLE_MAX_ITEMS: u64 = 320000;
pub const SCALABLE_MAX_CAPACITY: u64 = 1000000;

/// Takes the CLI arguments that control the benchmark run.
pub fn parse_cli() -> (PathBuf, Option<u64>, Option<u64>, bool) {
    let arg_csvout = Arg::with_name("output_csvfile")
        .help("name of the output csv file")
        .short("o")
        .long("csvfile")
        .takes_value(true)
        .default_value(DEFAULT_CSV);
    let arg_seed = Arg::with_name("seed")
        .help("seed for the random items, a new one for each run if not given")
        .short("s")
        .long("seed")
        .takes_value(true)
        .validator(is_count);
    let arg_max_items = Arg::with_name("max_items")
        .help("skip the test cases with more items than this")
        .short("m")
        .long("max_items")
        .takes_value(true)
        .validator(is_count);
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false)
        .required(false);
    let cli_args = App::new("Knapsack_bench")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to time the knapsack solvers and save the measurements to csv")
        .arg(arg_csvout)
        .arg(arg_seed)
        .arg(arg_max_items)
        .arg(arg_verbose)
        .get_matches();
    let csvout = PathBuf::from(cli_args.value_of("output_csvfile").unwrap_or(DEFAULT_CSV));
    let seed = cli_args
        .value_of("seed")
        .and_then(|s| s.parse::<u64>().ok());
    let max_items = cli_args
        .value_of("max_items")
        .and_then(|s| s.parse::<u64>().ok());
    let verbose = cli_args.is_present("verbose");
    (csvout, seed, max_items, verbose)
}

/// clap validator for the integer arguments
pub fn is_count(v: String) -> Result<(), String> {
    v.parse::<u64>()
        .map(|_| ())
        .map_err(|_| format!("'{}' is not a non-negative integer", v))
}

/// the (items, capacity) test cases, in run order, without the unreasonable ones
pub fn test_cases(max_items: Option<u64>) -> Vec<(u64, u64)> {
    let mut cases = Vec::new();
    for &capacity in CAPACITIES.iter() {
        for &items in ITEM_COUNTS.iter() {
            if items > EXHAUSTIVE_MAX_ITEMS && capacity == SCALABLE_MAX_CAPACITY {
                continue;
            }
            if max_items.map_or(false, |m| items > m) {
                continue;
            }
            cases.push((items, capacity));
        }
    }
    cases
}

/// whether a solver is run for this item count and capacity
pub fn is_eligible(alg: Algorithm, items: u64, capacity: u64) -> bool {
    match alg {
        Algorithm::BruteForce | Algorithm::Backtracking => items <= EXHAUSTIVE_MAX_ITEMS,
        Algorithm::DynamicProgramming
        | Algorithm::GreedySelectionSort
        | Algorithm::GreedyQuickSort => {
            items <= SCALABLE_MAX_ITEMS && capacity <= SCALABLE_MAX_CAPACITY
        }
    }
}

fn solve(alg: Algorithm, items: &[Item], capacity: u64) -> Solution {
    match alg {
        Algorithm::BruteForce => knapsack::brute_force(items, capacity),
        Algorithm::DynamicProgramming => knapsack::dynamic_programming(items, capacity),
        Algorithm::GreedySelectionSort => knapsack::greedy_selection_sort(items, capacity),
        Algorithm::GreedyQuickSort => knapsack::greedy_quick_sort(items, capacity),
        Algorithm::Backtracking => knapsack::backtracking(items, capacity),
    }
}

/// Generates the items and times every eligible solver on them, in milliseconds.
pub fn run_test<R: Rng>(items: u64, capacity: u64, rng: &mut R) -> Measurement {
    let generated = knapsack::generate_items(items as usize, rng);
    let mut m = Measurement::new(items, capacity);
    for &alg in Algorithm::ALL.iter() {
        if !is_eligible(alg, items, capacity) {
            continue;
        }
        let start = Instant::now();
        let solution = solve(alg, &generated, capacity);
        let ms = start.elapsed().as_secs_f64() * 1000.;
        info!(
            "{} (items={}, capacity={}): value {:.2}, {:.2} ms",
            alg.label(),
            items,
            capacity,
            solution.value,
            ms
        );
        debug!("selected items: {:?}", solution.selected);
        m.set_time(alg, Some(ms));
    }
    m
}

/// writes the measurements as the csv read by the plotting app
pub fn write_csv<P: AsRef<Path>>(results: &[Measurement], fout: P) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(fout)?;
    let mut header = vec![COL_ITEMS, COL_CAPACITY];
    header.extend(Algorithm::ALL.iter().map(|a| a.column()));
    wtr.write_record(&header)?;
    for m in results {
        let mut record = vec![m.items.to_string(), m.capacity.to_string()];
        record.extend(Algorithm::ALL.iter().map(|&a| match m.time(a) {
            Some(ms) => format!("{:.2}", ms),
            None => MISSING_STR.to_string(),
        }));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
