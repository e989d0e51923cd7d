use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;

/// Render planet trails from a trail CSV as a top-down PNG.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Top-down plot of planet trails exported by skyview"
)]
struct Cli {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "artifacts/trails.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 900)]
    size: u32,
    /// Only plot these bodies (comma separated, case-insensitive)
    #[arg(long, value_delimiter = ',')]
    bodies: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter: Vec<String> = cli.bodies.iter().map(|b| b.trim().to_lowercase()).collect();
    let trails = read_trails(&cli.input, &filter)?;
    if trails.values().all(|points| points.is_empty()) {
        return Err(anyhow::anyhow!("No trail samples in the provided CSV"));
    }

    let extent = trails
        .values()
        .flatten()
        .map(|(x, y)| x.abs().max(y.abs()))
        .fold(0.0_f64, f64::max)
        .max(0.1)
        * 1.05;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.size, cli.size)).into_drawing_area();
    root.fill(&BLACK)?;

    // No captions or axis labels, so no font lookup is needed.
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart.draw_series(std::iter::once(Circle::new((0.0, 0.0), 6, YELLOW.filled())))?;

    for (idx, (_, points)) in trails.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
        if let Some(&last) = points.last() {
            chart.draw_series(std::iter::once(Circle::new(last, 4, color.filled())))?;
        }
    }

    root.present()?;
    println!("Wrote {}", cli.output.display());
    Ok(())
}

/// Trail samples per body as top-down `(x, y)` in AU, oldest first.
///
/// Scene axes are Y-up, so the orbital plane view uses scene X and −Z.
fn read_trails(
    path: &PathBuf,
    filter: &[String],
) -> anyhow::Result<BTreeMap<String, Vec<(f64, f64)>>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let body_idx = column("body")?;
    let index_idx = column("index")?;
    let x_idx = column("x_au")?;
    let z_idx = column("z_au")?;

    let mut samples: BTreeMap<String, Vec<(u64, f64, f64)>> = BTreeMap::new();
    for rec in rdr.records() {
        let r = rec?;
        let body = r.get(body_idx).unwrap_or("").to_lowercase();
        if body.is_empty() || (!filter.is_empty() && !filter.contains(&body)) {
            continue;
        }
        let index: u64 = r.get(index_idx).unwrap_or("").parse().unwrap_or(u64::MAX);
        let x: f64 = r.get(x_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        let z: f64 = r.get(z_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        if x.is_finite() && z.is_finite() {
            samples.entry(body).or_default().push((index, x, -z));
        }
    }

    Ok(samples
        .into_iter()
        .map(|(body, mut points)| {
            points.sort_by_key(|(index, _, _)| *index);
            (body, points.into_iter().map(|(_, x, y)| (x, y)).collect())
        })
        .collect())
}
