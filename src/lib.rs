#[macro_use]
extern crate log;

mod args;
pub use args::{format_distance, parse_distance, Args};
mod distance;
pub use distance::{distance, path_length, EARTH_RADIUS_KM};
mod error;
pub use error::{Result, TrackError};
mod kml;
pub use kml::{extract_points, load_track, save_kml, write_kml, CoordinateTuples};
pub mod logs;
mod point;
pub use point::Point;
mod simplify;
pub use simplify::{filter_track, retained_indices};

/// Point counts of one filtering run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub original_points: usize,
    pub filtered_points: usize,
    pub min_distance: f64,
}

/// Load the input track, thin it out and save the result.
pub fn run(args: &Args) -> Result<Summary> {
    let track = load_track(&args.input)?;
    let filtered = filter_track(&track, args.min_distance);
    info!(
        "kept {} of {} points, path length {:.3} km -> {:.3} km",
        filtered.len(),
        track.len(),
        path_length(&track),
        path_length(&filtered)
    );
    save_kml(&args.output, &filtered)?;
    Ok(Summary {
        original_points: track.len(),
        filtered_points: filtered.len(),
        min_distance: args.min_distance,
    })
}
