//! kp: Koordinatprocessering. Transform coordinates read from files (or
//! stdin) from one CRS to another.
//!
//! ```txt
//! echo 55 12 | kp --from EPSG:4326 --to EPSG:25832
//! ```
use clap::Parser;
use geocrs::prelude::*;
use log::{debug, trace, warn};
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "kp")]
#[clap(author, version, about = "KP: The geocrs coordinate processing program", long_about = None)]
struct Cli {
    /// The CRS of the input coordinates, e.g. EPSG:4326
    #[clap(long)]
    from: String,

    /// The CRS of the output coordinates
    #[clap(long)]
    to: String,

    /// Inverse operation: Read coordinates in the `to` CRS, and write them
    /// in the `from` CRS
    #[clap(long = "inv")]
    inverse: bool,

    /// Print the steps of the transformation, and exit
    #[clap(long)]
    path: bool,

    /// Specify a fixed height for all coordinates
    #[clap(short = 'z', long)]
    height: Option<f64>,

    /// Number of decimals in output
    #[clap(short = 'd', long)]
    decimals: Option<usize>,

    /// Report fwd-inv roundtrip deviation
    #[clap(short, long)]
    roundtrip: bool,

    /// Echo input to output
    #[clap(short, long)]
    echo: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The files to operate on, stdin if none
    args: Vec<String>,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("This is KP");
    debug!("{options:#?}");

    #[cfg(feature = "with_plain")]
    let mut ctx = Plain::new();
    #[cfg(not(feature = "with_plain"))]
    let mut ctx = Minimal::new();

    let op = ctx.op(&options.from, &options.to)?;
    let transformation = ctx.transformation(op)?;
    let transformation = if options.inverse {
        transformation.inverse()
    } else {
        transformation.clone()
    };

    if options.path {
        println!("{}", transformation.transformation_path());
        return Ok(());
    }

    if options.args.is_empty() {
        let stdin = std::io::stdin();
        transform(&options, &transformation, stdin.lock())?;
    } else {
        for arg in &options.args {
            let file = std::fs::File::open(PathBuf::from(arg))?;
            transform(&options, &transformation, std::io::BufReader::new(file))?;
        }
    }
    Ok(())
}

fn transform(
    options: &Cli,
    transformation: &Transformation,
    reader: impl BufRead,
) -> Result<(), anyhow::Error> {
    let decimals = options.decimals.unwrap_or(9);
    let dimension = transformation.target_dimension();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let mut values = Vec::new();
        for item in content.split_whitespace() {
            values.push(item.parse::<f64>()?);
        }
        if !(2..=3).contains(&values.len()) {
            warn!("line {}: expected 2 or 3 coordinates, got {}", index + 1, values.len());
            continue;
        }
        let z = options.height.or(values.get(2).copied()).unwrap_or(0.);
        let coord = Coor3D::raw(values[0], values[1], z);

        let result = match transformation.do_transform(&[coord]) {
            Ok(result) => result[0],
            Err(e) if !e.is_fatal() => {
                warn!("line {}: {e}", index + 1);
                Coor3D::nan()
            }
            Err(e) => return Err(e.into()),
        };

        if options.echo {
            println!("# {content}");
        }
        let output: Vec<String> = (0..dimension)
            .map(|i| format!("{:.decimals$}", result[i]))
            .collect();
        print!("{}", output.join(" "));

        if options.roundtrip && !result.is_nan() {
            let back = transformation.inverse().do_transform(&[result])?;
            let deviation = if transformation.source_dimension() == 3 {
                back[0].hypot3(&coord)
            } else {
                back[0].hypot2(&coord)
            };
            print!("  {deviation:.3e}");
        }
        println!();
    }
    Ok(())
}
