use std::{ffi::OsString, path::PathBuf};

use crate::{error::Result, kml::read_number, TrackError};

const DEFAULT_PROGRAM_NAME: &str = "trackthin";
const SIGNIFICANT_DIGITS: usize = 6;

/// Command line of the filter: `<input> <output> <min distance>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Minimum distance between kept points, in kilometers.
    pub min_distance: f64,
}

impl Args {
    /// Build arguments from a full argv (program name first).
    /// Arguments after the third one are ignored. Paths are kept as given,
    /// whether or not they are valid unicode.
    pub fn parse<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv
            .next()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_owned());
        match (argv.next(), argv.next(), argv.next()) {
            (Some(input), Some(output), Some(min_distance)) => Ok(Args {
                input: PathBuf::from(input),
                output: PathBuf::from(output),
                min_distance: parse_distance(&min_distance.to_string_lossy()),
            }),
            _ => Err(TrackError::Usage { program }),
        }
    }
}

/// Read a distance the forgiving way: the longest numeric prefix after
/// leading whitespace, or 0 when there is none.
pub fn parse_distance(text: &str) -> f64 {
    read_number(text.trim_start())
        .map(|(distance, _)| distance)
        .unwrap_or(0.0)
}

/// Display a distance with six significant digits, switching to scientific
/// notation for very small or very large values (C's `%g`).
pub fn format_distance(distance: f64) -> String {
    if distance.is_nan() {
        return "nan".to_owned();
    }
    if distance.is_infinite() {
        return (if distance > 0.0 { "inf" } else { "-inf" }).to_owned();
    }
    if distance == 0.0 {
        return (if distance.is_sign_negative() { "-0" } else { "0" }).to_owned();
    }
    // exponent after rounding to the displayed digits
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, distance);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction_zeros(mantissa),
            exponent.abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction_zeros(&format!("{distance:.decimals$}")).to_owned()
    }
}

fn trim_fraction_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
