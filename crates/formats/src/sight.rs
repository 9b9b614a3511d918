//! Sight document parser. One record per line, comma-separated
//! `key: value` pairs; a line starting with `min-err` sets the global
//! best-fit rule instead of adding a record.

use foundation::math::GeoCoord;
use layers::{LineOfPosition, MinErrConfig, PlotSheet, Rgba};

use crate::color::{ColorError, parse_color};
use crate::degree::{DegreeError, parse_degree, parse_lat, parse_lon};

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// 1-based line number in the document.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnknownKey(String),
    MissingValue(String),
    BadDegree { key: String, reason: DegreeError },
    BadColor(ColorError),
    MissingLatLon,
    MissingCurve,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ParseErrorKind::UnknownKey(key) => write!(f, "unknown key: {key}"),
            ParseErrorKind::MissingValue(pair) => write!(f, "missing value in: {pair}"),
            ParseErrorKind::BadDegree { key, reason } => write!(f, "bad {key}: {reason}"),
            ParseErrorKind::BadColor(err) => write!(f, "{err}"),
            ParseErrorKind::MissingLatLon => write!(f, "record needs both lat and lon"),
            ParseErrorKind::MissingCurve => write!(f, "record needs rad or azm"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a whole sight document into a plot sheet. All angles in the
/// document are degrees; the sheet carries radians.
///
/// Blank lines are skipped. Later `min-err` lines overwrite only the
/// fields they name, so the rule accumulates across lines the same way
/// repeated keys accumulate within one.
pub fn parse_sight_document(text: &str) -> Result<PlotSheet, ParseError> {
    let mut sheet = PlotSheet::default();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let result = match line.strip_prefix("min-err") {
            Some(rest) => parse_min_err(rest, &mut sheet.min_err),
            None => parse_record(line, &mut sheet.lops),
        };
        result.map_err(|kind| ParseError {
            line: index + 1,
            kind,
        })?;
    }
    Ok(sheet)
}

fn parse_min_err(rest: &str, config: &mut MinErrConfig) -> Result<(), ParseErrorKind> {
    for pair in split_pairs(rest) {
        let (key, value) = split_pair(pair)?;
        match key {
            "dif" => {
                config.tolerance_rad = parse_degree(value)
                    .map_err(|reason| bad_degree(key, reason))?
                    .to_radians();
            }
            "color" => config.color = parse_color(value).map_err(ParseErrorKind::BadColor)?,
            _ => return Err(ParseErrorKind::UnknownKey(key.to_string())),
        }
    }
    Ok(())
}

fn parse_record(line: &str, lops: &mut Vec<LineOfPosition>) -> Result<(), ParseErrorKind> {
    let mut lat = None;
    let mut lon = None;
    let mut radius = None;
    let mut bearing = None;
    let mut tolerance_rad = 0.0;
    let mut color = Rgba::WHITE;
    for pair in split_pairs(line) {
        let (key, value) = split_pair(pair)?;
        match key {
            "lat" => {
                lat = Some(
                    parse_lat(value)
                        .map_err(|reason| bad_degree(key, reason))?
                        .to_radians(),
                );
            }
            "lon" => {
                lon = Some(
                    parse_lon(value)
                        .map_err(|reason| bad_degree(key, reason))?
                        .to_radians(),
                );
            }
            "rad" => {
                radius = Some(
                    parse_degree(value)
                        .map_err(|reason| bad_degree(key, reason))?
                        .to_radians(),
                );
            }
            "azm" => {
                bearing = Some(
                    parse_degree(value)
                        .map_err(|reason| bad_degree(key, reason))?
                        .to_radians(),
                );
            }
            "dif" => {
                tolerance_rad = parse_degree(value)
                    .map_err(|reason| bad_degree(key, reason))?
                    .to_radians();
            }
            "color" => color = parse_color(value).map_err(ParseErrorKind::BadColor)?,
            _ => return Err(ParseErrorKind::UnknownKey(key.to_string())),
        }
    }
    let (Some(lat_rad), Some(lon_rad)) = (lat, lon) else {
        return Err(ParseErrorKind::MissingLatLon);
    };
    if radius.is_none() && bearing.is_none() {
        return Err(ParseErrorKind::MissingCurve);
    }
    // A record carrying both curves scores both, so it expands to two
    // entries sharing anchor, tolerance and color.
    let anchor = GeoCoord::new(lat_rad, lon_rad);
    if let Some(radius_rad) = radius {
        lops.push(LineOfPosition::range(anchor, radius_rad, tolerance_rad, color));
    }
    if let Some(bearing_rad) = bearing {
        lops.push(LineOfPosition::azimuth(anchor, bearing_rad, tolerance_rad, color));
    }
    Ok(())
}

fn bad_degree(key: &str, reason: DegreeError) -> ParseErrorKind {
    ParseErrorKind::BadDegree {
        key: key.to_string(),
        reason,
    }
}

/// Splits a line on commas, ignoring commas inside parentheses so
/// `rgb(…)` color values stay whole.
fn split_pairs(line: &str) -> Vec<&str> {
    let mut pairs = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in line.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pairs.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pairs.push(&line[start..]);
    pairs
        .into_iter()
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect()
}

fn split_pair(pair: &str) -> Result<(&str, &str), ParseErrorKind> {
    let Some((key, value)) = pair.split_once(':') else {
        return Err(ParseErrorKind::MissingValue(pair.to_string()));
    };
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseErrorKind::MissingValue(pair.to_string()));
    }
    Ok((key.trim(), value))
}
