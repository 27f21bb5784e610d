//! # Airfoil `.dat` Parser
//!
//! Reads the two common plain-text airfoil coordinate formats:
//!
//! - **Selig**: a name line, then one closed outline running from the
//!   trailing edge over the upper surface to the leading edge and back along
//!   the lower surface.
//! - **Lednicer**: a name line, a line with the upper/lower point counts
//!   (e.g. `61. 61.`), then the upper surface and the lower surface, each
//!   from leading edge to trailing edge.
//!
//! The format is detected from the first data line: values above 1.01 can
//! only be point counts. Malformed data is reported as
//! [`WingError::InputData`] with the offending line.
//!
//! ## Example
//!
//! ```rust
//! use wing_core::airfoil_dat::parse_dat;
//!
//! let text = "FLAT PLATE\n1.0 0.0\n0.0 0.01\n1.0 0.0\n";
//! let airfoil = parse_dat(text, "inline")?;
//! assert_eq!(airfoil.name(), "FLAT PLATE");
//! # Ok::<(), wing_core::errors::WingError>(())
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::airfoil::Airfoil;
use crate::errors::{WingError, WingResult};
use crate::geometry::Point2;

/// x values this far outside [0, 1] are clamped with a warning instead of rejected
const X_SLACK: f64 = 0.01;

/// Threshold above which the first data line is read as Lednicer point counts
const LEDNICER_COUNT_THRESHOLD: f64 = 1.01;

/// Read and parse a `.dat` file.
pub fn load_dat(path: &Path) -> WingResult<Airfoil> {
    let text = fs::read_to_string(path)
        .map_err(|e| WingError::file_error("read airfoil", path.display().to_string(), e.to_string()))?;
    parse_dat(&text, &path.display().to_string())
}

/// Parse `.dat` text. `origin` names the source in error messages.
pub fn parse_dat(text: &str, origin: &str) -> WingResult<Airfoil> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, name) = lines
        .next()
        .ok_or_else(|| WingError::input_data(origin, "the file is empty or contains no valid data"))?;
    let data: Vec<(usize, &str)> = lines.collect();

    let (first_line, first) = data
        .first()
        .ok_or_else(|| WingError::input_data(origin, "no coordinate lines after the name"))?;
    let first_pair = parse_pair(first, origin, *first_line)?;

    let airfoil = if first_pair.0 > LEDNICER_COUNT_THRESHOLD || first_pair.1 > LEDNICER_COUNT_THRESHOLD {
        debug!(origin, "parsing airfoil as Lednicer format");
        parse_lednicer(name, first_pair, &data[1..], origin)?
    } else {
        debug!(origin, "parsing airfoil as Selig format");
        parse_selig(name, &data, origin)?
    };
    Ok(airfoil)
}

fn parse_selig(name: &str, data: &[(usize, &str)], origin: &str) -> WingResult<Airfoil> {
    let outline = data
        .iter()
        .map(|(line_no, line)| parse_point(line, origin, *line_no))
        .collect::<WingResult<Vec<_>>>()?;

    Airfoil::from_outline(name, &outline).map_err(|e| WingError::input_data(origin, e.to_string()))
}

fn parse_lednicer(
    name: &str,
    counts: (f64, f64),
    data: &[(usize, &str)],
    origin: &str,
) -> WingResult<Airfoil> {
    let (upper_count, lower_count) = (counts_to_usize(counts.0), counts_to_usize(counts.1));
    let (Some(upper_count), Some(lower_count)) = (upper_count, lower_count) else {
        return Err(WingError::input_data(
            origin,
            format!("expected integer point counts, found {} and {}", counts.0, counts.1),
        ));
    };

    if upper_count.checked_add(lower_count) != Some(data.len()) {
        return Err(WingError::input_data(
            origin,
            format!(
                "header declares {} + {} points but {} coordinate lines follow",
                upper_count,
                lower_count,
                data.len()
            ),
        ));
    }

    let points = data
        .iter()
        .map(|(line_no, line)| parse_point(line, origin, *line_no))
        .collect::<WingResult<Vec<_>>>()?;
    let (upper, lower) = points.split_at(upper_count);

    Airfoil::new(name, upper.to_vec(), lower.to_vec())
        .map_err(|e| WingError::input_data(origin, e.to_string()))
}

fn counts_to_usize(value: f64) -> Option<usize> {
    (value >= 0.0 && value.fract() == 0.0).then_some(value as usize)
}

fn parse_pair(line: &str, origin: &str, line_no: usize) -> WingResult<(f64, f64)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let at = || format!("{}:{}", origin, line_no);

    if fields.len() != 2 {
        return Err(WingError::input_data(
            at(),
            format!("expected 2 numeric values per line, found {}", fields.len()),
        ));
    }
    let parse = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| WingError::input_data(at(), format!("non-numeric value '{}'", s)))
    };
    Ok((parse(fields[0])?, parse(fields[1])?))
}

fn parse_point(line: &str, origin: &str, line_no: usize) -> WingResult<Point2> {
    let (x, y) = parse_pair(line, origin, line_no)?;

    if !(-1.0..=1.0).contains(&y) {
        return Err(WingError::input_data(
            format!("{}:{}", origin, line_no),
            format!("y coordinate {} must be in range [-1.0, 1.0]", y),
        ));
    }
    if !(-X_SLACK..=1.0 + X_SLACK).contains(&x) {
        return Err(WingError::input_data(
            format!("{}:{}", origin, line_no),
            format!("x coordinate {} is outside the expected range [0.0, 1.0]", x),
        ));
    }
    if !(0.0..=1.0).contains(&x) {
        warn!(origin, line = line_no, x, "x coordinate slightly outside [0, 1], clamping");
    }
    Ok(Point2::new(x.clamp(0.0, 1.0), y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELIG: &str = "\
NACA 0006-ish
  1.00000  0.00063
  0.50000  0.02650
  0.00000  0.00000
  0.50000 -0.02650
  1.00000 -0.00063
";

    const LEDNICER: &str = "\
LEDNICER SAMPLE

       3.       3.

 0.0000000 0.0000000
 0.5000000 0.0400000
 1.0000000 0.0000000

 0.0000000 0.0000000
 0.5000000 -0.0300000
 1.0000000 0.0000000
";

    #[test]
    fn test_parse_selig() {
        let airfoil = parse_dat(SELIG, "selig.dat").unwrap();
        assert_eq!(airfoil.name(), "NACA 0006-ish");
        assert_eq!(airfoil.upper().len(), 3);
        assert_eq!(airfoil.lower().len(), 3);
        assert_eq!(airfoil.upper()[1], Point2::new(0.5, 0.0265));
        assert_eq!(airfoil.lower()[1], Point2::new(0.5, -0.0265));
    }

    #[test]
    fn test_parse_lednicer() {
        let airfoil = parse_dat(LEDNICER, "lednicer.dat").unwrap();
        assert_eq!(airfoil.name(), "LEDNICER SAMPLE");
        assert_eq!(airfoil.upper()[1], Point2::new(0.5, 0.04));
        assert_eq!(airfoil.lower()[1], Point2::new(0.5, -0.03));
    }

    #[test]
    fn test_lednicer_count_mismatch() {
        let text = "BROKEN\n3. 3.\n0.0 0.0\n1.0 0.0\n";
        let err = parse_dat(text, "broken.dat").unwrap_err();
        assert_eq!(err.error_code(), "INPUT_DATA");
    }

    #[test]
    fn test_lednicer_huge_counts_are_rejected() {
        let err = parse_dat("HUGE\n1e30 1e30\n0.0 0.0\n", "huge.dat").unwrap_err();
        assert_eq!(err.error_code(), "INPUT_DATA");

        let err = parse_dat("HUGE\n1e30 3.\n0.0 0.0\n0.5 0.0\n1.0 0.0\n", "huge.dat").unwrap_err();
        assert_eq!(err.error_code(), "INPUT_DATA");
    }

    #[test]
    fn test_empty_file() {
        let err = parse_dat("\n   \n", "empty.dat").unwrap_err();
        assert_eq!(err, WingError::input_data("empty.dat", "the file is empty or contains no valid data"));
    }

    #[test]
    fn test_non_numeric_line_reports_line_number() {
        let text = "BAD\n1.0 0.0\n0.5 abc\n0.0 0.0\n";
        match parse_dat(text, "bad.dat").unwrap_err() {
            WingError::InputData { origin, reason } => {
                assert_eq!(origin, "bad.dat:3");
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_y_out_of_range_is_rejected() {
        let text = "TALL\n1.0 0.0\n0.5 1.5\n0.0 0.0\n0.5 -0.1\n1.0 0.0\n";
        assert!(parse_dat(text, "tall.dat").is_err());
    }

    #[test]
    fn test_x_slightly_past_trailing_edge_is_clamped() {
        let text = "LONG\n1.005 0.0\n0.0 0.0\n1.005 0.0\n";
        let airfoil = parse_dat(text, "long.dat").unwrap();
        assert_eq!(airfoil.upper().last().unwrap().x, 1.0);
    }

    #[test]
    fn test_missing_file() {
        let err = load_dat(Path::new("/definitely/not/here.dat")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
