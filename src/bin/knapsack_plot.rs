use knapsack_perf::chart::plot_all;
use knapsack_perf::plot::parse_cli;
use knapsack_perf::{init_logger, read_performance_data};

fn main() {
    let (csvin, outdir, verbose) = parse_cli();
    init_logger(verbose);
    println!(
        "read data from {} and plot to {}",
        csvin.display(),
        outdir.display()
    );
    let table = match read_performance_data(&csvin) {
        Some(t) => t,
        None => {
            println!("could not read data, check the file path");
            return;
        }
    };
    let summary = plot_all(&table, &outdir);
    log::info!("{} of {} charts rendered", summary.rendered, summary.attempted);
    println!("finished plotting {} comparison charts", summary.attempted);
}
