use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use itertools::Itertools;

use crate::{error::Result, Point, TrackError};

const START_TAG: &str = "<coordinates>";
const END_TAG: &str = "</coordinates>";

const KML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://earth.google.com/kml/2.2">
    <Document>
        <name>FilteredTrack</name>
        <Style>
        <PolyStyle>
            <fill>0</fill>
            <outline>1</outline>
        </PolyStyle>
        </Style>
    <Placemark>
    <name>1</name>
    <MultiGeometry>
    <LineString>
        <coordinates>
    "#;

const KML_FOOTER: &str = r#"
        </coordinates>
    </LineString>
    </MultiGeometry>
</Placemark>
</Document>
</kml>
"#;

/// Lazy reader of `longitude,latitude` tuples (in degrees) inside one line
/// of a coordinates block.
///
/// Each tuple is a number, any single separator character and a second
/// number, whitespace being allowed around the separator. An altitude glued
/// to the latitude by a comma is read and dropped. The first malformed tuple
/// ends the sequence: nothing after it on the line is ever returned.
/// Cloning gives an independent reader restarting at the same position.
#[derive(Debug, Clone)]
pub struct CoordinateTuples<'a> {
    rest: &'a str,
    stopped: bool,
}

impl<'a> CoordinateTuples<'a> {
    pub fn new(text: &'a str) -> Self {
        CoordinateTuples {
            rest: text,
            stopped: false,
        }
    }

    /// Text not consumed yet.
    /// Once the iterator is exhausted, anything but whitespace in here was
    /// rejected as malformed.
    pub fn remainder(&self) -> &'a str {
        self.rest
    }

    fn read_tuple(&self) -> Option<(f64, f64, &'a str)> {
        let (longitude, rest) = read_number(skip_whitespace(self.rest))?;
        let mut after_separator = skip_whitespace(rest).chars();
        after_separator.next()?;
        let (latitude, rest) = read_number(skip_whitespace(after_separator.as_str()))?;
        Some((longitude, latitude, skip_altitude(rest)))
    }
}

impl Iterator for CoordinateTuples<'_> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped {
            return None;
        }
        match self.read_tuple() {
            Some((longitude, latitude, rest)) => {
                self.rest = rest;
                Some((longitude, latitude))
            }
            None => {
                self.stopped = true;
                None
            }
        }
    }
}

fn skip_whitespace(text: &str) -> &str {
    text.trim_start_matches(|c: char| c.is_ascii_whitespace())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// longest prefix looking like a decimal number (sign, digits, fraction,
// exponent), parsed. Returns the number and what follows it.
pub(crate) fn read_number(text: &str) -> Option<(f64, &str)> {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        end += 1 + fraction_digits;
    }
    if integer_digits + fraction_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent_end..]);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }
    text[..end].parse::<f64>().ok().map(|n| (n, &text[end..]))
}

fn skip_altitude(text: &str) -> &str {
    text.strip_prefix(',')
        .and_then(read_number)
        .map(|(_, rest)| rest)
        .unwrap_or(text)
}

/// Extract all points found between `<coordinates>` and `</coordinates>`
/// markers, in document order.
///
/// Blocks may span several lines. Malformed tuples end the current line's
/// tuples and are otherwise ignored; only read errors are reported.
pub fn extract_points<R: BufRead>(reader: R) -> std::io::Result<Vec<Point>> {
    let mut points = Vec::new();
    let mut inside_block = false;
    for (line_number, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        let mut content: &str = &line;
        if let Some(start) = content.find(START_TAG) {
            content = &content[start + START_TAG.len()..];
            inside_block = true;
            debug!("coordinates block opening on line {}", line_number + 1);
        }
        let closing = match content.find(END_TAG) {
            Some(end) => {
                content = &content[..end];
                true
            }
            None => false,
        };
        if inside_block {
            let mut tuples = CoordinateTuples::new(content);
            points.extend(
                tuples
                    .by_ref()
                    .map(|(longitude, latitude)| Point::from_degrees(longitude, latitude)),
            );
            if !skip_whitespace(tuples.remainder()).is_empty() {
                warn!(
                    "skipping malformed coordinates on line {}: {:?}",
                    line_number + 1,
                    tuples.remainder().trim()
                );
            }
        }
        if closing {
            inside_block = false;
        }
    }
    Ok(points)
}

/// Read all track points from the kml file at given path.
pub fn load_track<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(TrackError::io(path))?;
    let points = extract_points(BufReader::new(file)).map_err(TrackError::io(path))?;
    info!("extracted {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Write given points as a single kml line string.
pub fn write_kml<W: Write>(points: &[Point], writer: &mut W) -> std::io::Result<()> {
    writer.write_all(KML_HEADER.as_bytes())?;
    let coordinates = points
        .iter()
        .map(|p| {
            let (longitude, latitude) = p.to_degrees();
            format!("{longitude:.9},{latitude:.9}")
        })
        .join(" ");
    writer.write_all(coordinates.as_bytes())?;
    writer.write_all(KML_FOOTER.as_bytes())
}

pub fn save_kml<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path).map_err(TrackError::io(path))?);
    write_kml(points, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(TrackError::io(path))?;
    info!("saved {} points to {}", points.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuples_on_a_line() {
        let tuples: Vec<_> = CoordinateTuples::new(" 1.5,2 -3,4e1\t5 , 6 ").collect();
        assert_eq!(tuples, vec![(1.5, 2.0), (-3.0, 40.0), (5.0, 6.0)]);
    }

    #[test]
    fn altitudes_are_dropped() {
        let tuples: Vec<_> = CoordinateTuples::new("1,2,300 3,4,-5.5 5,6").collect();
        assert_eq!(tuples, vec![(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
    }

    #[test]
    fn malformed_tuple_stops_the_line() {
        let mut tuples = CoordinateTuples::new("1,2 x,3 4,5");
        assert_eq!(tuples.next(), Some((1.0, 2.0)));
        assert_eq!(tuples.next(), None);
        assert_eq!(tuples.next(), None);
        assert_eq!(tuples.remainder(), " x,3 4,5");
    }

    #[test]
    fn missing_latitude_stops_the_line() {
        let tuples: Vec<_> = CoordinateTuples::new("1,2 3,").collect();
        assert_eq!(tuples, vec![(1.0, 2.0)]);
    }

    #[test]
    fn clones_restart_where_they_were() {
        let mut tuples = CoordinateTuples::new("1,2 3,4");
        tuples.next();
        let again = tuples.clone();
        assert_eq!(tuples.collect::<Vec<_>>(), again.collect::<Vec<_>>());
    }

    #[test]
    fn numbers() {
        assert_eq!(read_number("12.5abc"), Some((12.5, "abc")));
        assert_eq!(read_number("-.5,"), Some((-0.5, ",")));
        assert_eq!(read_number("3.,"), Some((3.0, ",")));
        assert_eq!(read_number("2e,"), Some((2.0, "e,")));
        assert_eq!(read_number("2E-2"), Some((0.02, "")));
        assert_eq!(read_number("-"), None);
        assert_eq!(read_number(".e1"), None);
        assert_eq!(read_number(""), None);
    }

    #[test]
    fn single_line_document() {
        let points = extract_points(
            "<a><coordinates>10,20 30,40</coordinates></a>".as_bytes(),
        )
        .unwrap();
        assert_eq!(
            points,
            vec![Point::from_degrees(10.0, 20.0), Point::from_degrees(30.0, 40.0)]
        );
    }

    #[test]
    fn nothing_outside_blocks() {
        let text = "1,2\n<coordinates>\n3,4\n</coordinates>\n5,6\n";
        let points = extract_points(text.as_bytes()).unwrap();
        assert_eq!(points, vec![Point::from_degrees(3.0, 4.0)]);
    }

    #[test]
    fn unterminated_block_runs_to_the_end() {
        let text = "<coordinates>1,2\n3,4\r\n";
        let points = extract_points(text.as_bytes()).unwrap();
        assert_eq!(
            points,
            vec![Point::from_degrees(1.0, 2.0), Point::from_degrees(3.0, 4.0)]
        );
    }

    #[test]
    fn empty_track_output() {
        let mut output = Vec::new();
        write_kml(&[], &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("<coordinates>\n    \n        </coordinates>"));
        assert!(output.contains(r#"xmlns="http://earth.google.com/kml/2.2""#));
    }

    #[test]
    fn output_coordinates() {
        let mut output = Vec::new();
        write_kml(
            &[Point::from_degrees(-1.25, 2.5), Point::from_degrees(3.0, -4.0)],
            &mut output,
        )
        .unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("-1.250000000,2.500000000 3.000000000,-4.000000000\n"));
    }
}
