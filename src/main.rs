use anyhow::Context;
use trackthin::{format_distance, Args, TrackError};

fn main() -> anyhow::Result<()> {
    let args = match Args::parse(std::env::args_os()) {
        Ok(args) => args,
        Err(usage @ TrackError::Usage { .. }) => {
            println!("{usage}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    if let Err(e) = trackthin::logs::init() {
        eprintln!("logging disabled: {e}");
    }

    let summary = trackthin::run(&args).context("filtering track failed")?;

    println!(
        "Number of points in the original track: {}",
        summary.original_points
    );
    println!(
        "Number of points in the filtered track: {}",
        summary.filtered_points
    );
    println!(
        "Minimum distance between points: {} km",
        format_distance(summary.min_distance)
    );
    Ok(())
}
