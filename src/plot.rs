use super::{DEFAULT_CSV, VERSION};
use clap::{App, Arg};
use std::path::PathBuf;

/// Takes the CLI arguments that control the plotting of the measurements.
pub fn parse_cli() -> (PathBuf, PathBuf, bool) {
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("name for the csv file with the measurements")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .default_value(DEFAULT_CSV);
    let arg_outdir = Arg::with_name("output_dir")
        .help("directory for the svg charts")
        .short("o")
        .long("outdir")
        .takes_value(true)
        .default_value(".");
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false)
        .required(false);
    let cli_args = App::new("Knapsack_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to plot the execution times of the knapsack solvers")
        .arg(arg_csvin)
        .arg(arg_outdir)
        .arg(arg_verbose)
        .get_matches();
    let csvin = PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or(DEFAULT_CSV));
    let outdir = PathBuf::from(cli_args.value_of("output_dir").unwrap_or("."));
    let verbose = cli_args.is_present("verbose");
    return (csvin, outdir, verbose);
}
