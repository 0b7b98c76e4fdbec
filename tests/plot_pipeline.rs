use knapsack_perf::bench::write_csv;
use knapsack_perf::chart::plot_all;
use knapsack_perf::{read_performance_data, select_capacities, Algorithm, Measurement};
use std::path::Path;

const ITEM_COUNTS: [u64; 8] = [10, 15, 20, 25, 1000, 2000, 10000, 200000];

fn measurement(items: u64, capacity: u64) -> Measurement {
    let mut m = Measurement::new(items, capacity);
    let t = items as f64 / 100.;
    if items <= 20 {
        m.set_time(Algorithm::BruteForce, Some(t * 3.));
        m.set_time(Algorithm::Backtracking, Some(t));
    }
    m.set_time(Algorithm::DynamicProgramming, Some(t * 2.));
    m.set_time(Algorithm::GreedySelectionSort, Some(t * t));
    m.set_time(Algorithm::GreedyQuickSort, Some(t / 2.));
    m
}

fn write_measurements(path: &Path, capacities: &[u64], counts: &[u64]) {
    let mut rows = Vec::new();
    for &c in capacities {
        for &n in counts {
            rows.push(measurement(n, c));
        }
    }
    write_csv(&rows, path).unwrap();
}

fn svg_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map_or(false, |x| x == "svg"))
        .count()
}

#[test]
fn three_capacities_give_six_charts() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("knapsack_algorithm_performance.csv");
    write_measurements(&csv, &[10000, 100000, 1000000], &ITEM_COUNTS);

    let table = read_performance_data(&csv).unwrap();
    assert_eq!(table.rows.len(), 3 * ITEM_COUNTS.len());
    let summary = plot_all(&table, dir.path());
    assert_eq!(summary.attempted, 6);
    assert_eq!(summary.rendered, 6);
    assert_eq!(svg_count(dir.path()), 6);
    assert!(dir.path().join("capacity_100000_small_scale.svg").exists());
    assert!(dir.path().join("capacity_1000000_large_scale.svg").exists());
}

#[test]
fn skipped_charts_still_count_as_attempted() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("perf.csv");
    // the smallest capacity is dropped, the largest only has small counts
    let mut rows = Vec::new();
    for &c in &[5u64, 10, 20] {
        for &n in ITEM_COUNTS.iter() {
            rows.push(measurement(n, c));
        }
    }
    for &n in &[10u64, 15, 20] {
        rows.push(measurement(n, 50));
    }
    write_csv(&rows, &csv).unwrap();

    let table = read_performance_data(&csv).unwrap();
    assert_eq!(select_capacities(&table), vec![10, 20, 50]);
    let summary = plot_all(&table, dir.path());
    assert_eq!(summary.attempted, 6);
    assert_eq!(summary.rendered, 5);
    assert!(!dir.path().join("capacity_50_large_scale.svg").exists());
    assert!(!dir.path().join("capacity_5_small_scale.svg").exists());
}

#[test]
fn unreadable_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_performance_data(dir.path().join("missing.csv")).is_none());
    let garbage = dir.path().join("garbage.csv");
    std::fs::write(&garbage, "a,b\n\"unterminated,1\n").unwrap();
    assert!(read_performance_data(&garbage).is_none());
}
