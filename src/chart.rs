use super::{min_and_max, select_capacities, Algorithm, Measurement, PerformanceTable};
use log::{debug, error};
use plotters::coord::combinators::BindKeyPoints;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::IntoLogRange;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// item counts of the exhaustive solvers' chart
pub const SMALL_ITEM_COUNTS: [u64; 3] = [10, 15, 20];
/// smallest item count of the scalable solvers' chart
pub const LARGE_ITEMS_MIN: u64 = 1000;
/// above this max/min item count ratio the x axis is logarithmic
pub const LOG_RATIO_THRESHOLD: f64 = 100.;

pub const SMALL_ALGORITHMS: [Algorithm; 2] = [Algorithm::BruteForce, Algorithm::Backtracking];
pub const LARGE_ALGORITHMS: [Algorithm; 3] = [
    Algorithm::DynamicProgramming,
    Algorithm::GreedySelectionSort,
    Algorithm::GreedyQuickSort,
];

pub const SMALL_SIZE: (u32, u32) = (1000, 600);
pub const LARGE_SIZE: (u32, u32) = (1200, 800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartOutcome {
    Rendered,
    /// no rows for that capacity and scale
    Skipped,
}

/// Charts attempted and actually rendered by a plotting run.
/// attempted counts skipped and failed charts too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlotSummary {
    pub attempted: usize,
    pub rendered: usize,
}

/// fixed line color of each solver
pub fn color(alg: Algorithm) -> RGBColor {
    match alg {
        Algorithm::BruteForce => RED,
        Algorithm::DynamicProgramming => RGBColor(0, 128, 0),
        Algorithm::GreedySelectionSort => RGBColor(255, 165, 0),
        Algorithm::GreedyQuickSort => RGBColor(128, 0, 128),
        Algorithm::Backtracking => BLUE,
    }
}

/// rows with the given capacity whose item count is in SMALL_ITEM_COUNTS, by item count
pub fn small_scale_rows(table: &PerformanceTable, capacity: u64) -> Vec<&Measurement> {
    let mut rows: Vec<&Measurement> = table
        .for_capacity(capacity)
        .filter(|m| SMALL_ITEM_COUNTS.contains(&m.items))
        .collect();
    rows.sort_by_key(|m| m.items);
    rows
}

/// rows with the given capacity and at least LARGE_ITEMS_MIN items, by item count
pub fn large_scale_rows(table: &PerformanceTable, capacity: u64) -> Vec<&Measurement> {
    let mut rows: Vec<&Measurement> = table
        .for_capacity(capacity)
        .filter(|m| m.items >= LARGE_ITEMS_MIN)
        .collect();
    rows.sort_by_key(|m| m.items);
    rows
}

/// logarithmic x axis when the item counts span more than LOG_RATIO_THRESHOLD
pub fn use_log_axis(counts: &[u64]) -> bool {
    match min_and_max(counts) {
        Some((min, max)) if min > 0 => max as f64 / min as f64 > LOG_RATIO_THRESHOLD,
        _ => false,
    }
}

/// distinct item counts of the rows, ascending
fn item_counts(rows: &[&Measurement]) -> Vec<u64> {
    let mut counts: Vec<u64> = rows.iter().map(|m| m.items).collect();
    counts.dedup();
    counts
}

/// splits the series of a solver where its time is missing,
/// so that a gap is drawn instead of a zero
fn segments(rows: &[&Measurement], alg: Algorithm) -> Vec<Vec<(u64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for m in rows {
        match m.time(alg) {
            Some(t) => current.push((m.items, t)),
            None => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// top of the time axis, from the present values only
fn time_max(rows: &[&Measurement], algorithms: &[Algorithm]) -> f64 {
    let ymax = rows
        .iter()
        .flat_map(|m| algorithms.iter().filter_map(move |&a| m.time(a)))
        .fold(0f64, f64::max);
    if ymax > 0. {
        ymax * 1.1
    } else {
        1.
    }
}

/// Renders the brute force and backtracking chart of one capacity to svg.
/// Nothing is written when the capacity has no small-scale rows.
pub fn plot_small_scale<P: AsRef<Path>>(
    table: &PerformanceTable,
    capacity: u64,
    fout: P,
) -> Result<ChartOutcome, Box<dyn Error>> {
    let rows = small_scale_rows(table, capacity);
    if rows.is_empty() {
        println!("no small-scale data for capacity {}", capacity);
        return Ok(ChartOutcome::Skipped);
    }
    let root = SVGBackend::new(fout.as_ref(), SMALL_SIZE).into_drawing_area();
    draw_small_scale(&rows, capacity, &root)?;
    root.present()?;
    Ok(ChartOutcome::Rendered)
}

/// Renders the dynamic programming and greedy chart of one capacity to svg.
/// Nothing is written when the capacity has no large-scale rows.
pub fn plot_large_scale<P: AsRef<Path>>(
    table: &PerformanceTable,
    capacity: u64,
    fout: P,
) -> Result<ChartOutcome, Box<dyn Error>> {
    let rows = large_scale_rows(table, capacity);
    if rows.is_empty() {
        println!("no large-scale data for capacity {}", capacity);
        return Ok(ChartOutcome::Skipped);
    }
    let root = SVGBackend::new(fout.as_ref(), LARGE_SIZE).into_drawing_area();
    draw_large_scale(&rows, capacity, &root)?;
    root.present()?;
    Ok(ChartOutcome::Rendered)
}

pub fn draw_small_scale<DB>(
    rows: &[&Measurement],
    capacity: u64,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let xs = item_counts(rows);
    let ymax = time_max(rows, &SMALL_ALGORITHMS);
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("Small-scale algorithm comparison (capacity={})", capacity),
            ("sans-serif", 32),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d((8u64..22u64).with_key_points(xs), 0f64..ymax)?;
    draw_comparison(&mut chart, rows, &SMALL_ALGORITHMS, "Number of items", false)?;
    Ok(())
}

pub fn draw_large_scale<DB>(
    rows: &[&Measurement],
    capacity: u64,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let counts = item_counts(rows);
    let (xmin, xmax) = match min_and_max(&counts) {
        Some(mm) => mm,
        None => return Err("no rows to draw".into()),
    };
    let xs = counts.clone();
    let ymax = time_max(rows, &LARGE_ALGORITHMS);
    let caption = format!("Large-scale algorithm comparison (capacity={})", capacity);
    root.fill(&WHITE)?;
    let mut builder = ChartBuilder::on(root);
    builder
        .caption(caption, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(100);
    if use_log_axis(&counts) {
        debug!("capacity {}: log scale for {} to {} items", capacity, xmin, xmax);
        let xrange = (xmin - xmin / 6..xmax.saturating_add(xmax / 5))
            .log_scale()
            .with_key_points(xs);
        let mut chart = builder.build_cartesian_2d(xrange, 0f64..ymax)?;
        draw_comparison(
            &mut chart,
            rows,
            &LARGE_ALGORITHMS,
            "Number of items (log scale)",
            true,
        )?;
    } else {
        let span = xmax - xmin;
        let pad = if span > 0 { span / 20 } else { xmin / 20 + 1 };
        let xrange = (xmin.saturating_sub(pad)..xmax.saturating_add(pad)).with_key_points(xs);
        let mut chart = builder.build_cartesian_2d(xrange, 0f64..ymax)?;
        draw_comparison(&mut chart, rows, &LARGE_ALGORITHMS, "Number of items", true)?;
    }
    Ok(())
}

/// Draws mesh, one line with markers per solver and the legend.
/// Without x_grid only the horizontal grid lines are drawn and the x labels stay upright.
fn draw_comparison<'a, DB, X>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, RangedCoordf64>>,
    rows: &[&Measurement],
    algorithms: &[Algorithm],
    x_desc: &str,
    x_grid: bool,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    X: Ranged<ValueType = u64> + ValueFormatter<u64>,
{
    let x_fmt = |x: &u64| x.to_string();
    let y_fmt = |y: &f64| format!("{:.2}", y);
    {
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 20))
            .x_desc(x_desc)
            .y_desc("Execution time (ms)")
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt);
        if x_grid {
            // crowded large counts
            mesh.x_label_style(("sans-serif", 16).into_font().transform(FontTransform::Rotate90));
        } else {
            mesh.disable_x_mesh();
        }
        mesh.draw()?;
    }

    for &alg in algorithms {
        let c = color(alg);
        let mut labelled = false;
        for seg in segments(rows, alg) {
            let anno = chart.draw_series(LineSeries::new(seg.iter().copied(), c.stroke_width(2)))?;
            if !labelled {
                anno.label(alg.label()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 30, y)], c.stroke_width(2))
                });
                labelled = true;
            }
            chart.draw_series(seg.iter().map(|&p| Circle::new(p, 4, c.filled())))?;
        }
        if !labelled {
            debug!("{}: no values to draw", alg.label());
        }
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 20))
        .draw()?;
    Ok(())
}

/// Plots the small and large scale charts of each selected capacity into outdir.
/// A failed chart is reported and the run goes on; it still counts as attempted.
pub fn plot_all<P: AsRef<Path>>(table: &PerformanceTable, outdir: P) -> PlotSummary {
    let capacities = select_capacities(table);
    println!("plotting the comparison charts for capacities: {:?}", capacities);
    let mut summary = PlotSummary::default();
    for &capacity in capacities.iter() {
        let small = outdir
            .as_ref()
            .join(format!("capacity_{}_small_scale.svg", capacity));
        let large = outdir
            .as_ref()
            .join(format!("capacity_{}_large_scale.svg", capacity));
        let outcomes = [
            plot_small_scale(table, capacity, &small),
            plot_large_scale(table, capacity, &large),
        ];
        for outcome in outcomes.iter() {
            summary.attempted += 1;
            match outcome {
                Ok(ChartOutcome::Rendered) => summary.rendered += 1,
                Ok(ChartOutcome::Skipped) => {}
                Err(e) => error!("capacity {}: chart failed: {}", capacity, e),
            }
        }
    }
    summary
}
