use chrono::prelude::*;
use knapsack_perf::bench::{parse_cli, run_test, test_cases, write_csv};
use knapsack_perf::init_logger;
use knapsack_perf::DT_FORMAT;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let (csvout, seed, max_items, verbose) = parse_cli();
    init_logger(verbose);

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let cases = test_cases(max_items);
    let dt_start: DateTime<Local> = Local::now();
    println!(
        "starting {} test cases at {}",
        cases.len(),
        dt_start.format(DT_FORMAT)
    );

    let mut results = Vec::with_capacity(cases.len());
    for (i, &(items, capacity)) in cases.iter().enumerate() {
        println!(
            "test {}/{}: {} items, capacity {}",
            i + 1,
            cases.len(),
            items,
            capacity
        );
        results.push(run_test(items, capacity, &mut rng));
    }

    if let Err(e) = write_csv(&results, &csvout) {
        log::error!("writing {}: {}", csvout.display(), e);
        println!("could not save the measurements to {}", csvout.display());
        std::process::exit(1);
    }
    let dt_end: DateTime<Local> = Local::now();
    println!(
        "saved the measurements to {} at {}, after {} s",
        csvout.display(),
        dt_end.format(DT_FORMAT),
        (dt_end - dt_start).num_seconds()
    );
}
