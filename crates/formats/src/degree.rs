//! The sexagesimal angle grammar: "degrees [minutes [seconds]]" with
//! optional degree/minute/second marks, plus latitude and longitude
//! variants carrying a trailing hemisphere letter.

#[derive(Debug, Clone, PartialEq)]
pub enum DegreeError {
    Empty,
    BadNumber(String),
    TooManyFields,
    MinutesOutOfRange(f64),
    SecondsOutOfRange(f64),
    /// A signed number combined with a hemisphere letter.
    SignedHemisphere,
    LatitudeOutOfRange(f64),
}

impl std::fmt::Display for DegreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegreeError::Empty => write!(f, "empty angle"),
            DegreeError::BadNumber(raw) => write!(f, "not a number: {raw}"),
            DegreeError::TooManyFields => {
                write!(f, "expected at most degrees, minutes and seconds")
            }
            DegreeError::MinutesOutOfRange(v) => write!(f, "minutes out of range: {v}"),
            DegreeError::SecondsOutOfRange(v) => write!(f, "seconds out of range: {v}"),
            DegreeError::SignedHemisphere => {
                write!(f, "hemisphere letter and sign cannot be combined")
            }
            DegreeError::LatitudeOutOfRange(v) => write!(f, "latitude out of range: {v}"),
        }
    }
}

impl std::error::Error for DegreeError {}

/// Parses a "D [M [S]]" string into decimal degrees.
///
/// Fields split on whitespace or on the `°`, `'`, `′`, `"`, `″` marks; a
/// sign on the degree field applies to the whole value; minutes and
/// seconds must lie in [0, 60).
pub fn parse_degree(input: &str) -> Result<f64, DegreeError> {
    let cleaned: String = input
        .chars()
        .map(|c| match c {
            '°' | '\'' | '′' | '"' | '″' => ' ',
            other => other,
        })
        .collect();
    let fields: Vec<&str> = cleaned.split_whitespace().collect();
    if fields.is_empty() {
        return Err(DegreeError::Empty);
    }
    if fields.len() > 3 {
        return Err(DegreeError::TooManyFields);
    }

    let degrees = parse_field(fields[0])?;
    let sign = if degrees.is_sign_negative() { -1.0 } else { 1.0 };
    let mut magnitude = degrees.abs();

    if let Some(raw) = fields.get(1) {
        let minutes = parse_field(raw)?;
        if !(0.0..60.0).contains(&minutes) {
            return Err(DegreeError::MinutesOutOfRange(minutes));
        }
        magnitude += minutes / 60.0;
    }
    if let Some(raw) = fields.get(2) {
        let seconds = parse_field(raw)?;
        if !(0.0..60.0).contains(&seconds) {
            return Err(DegreeError::SecondsOutOfRange(seconds));
        }
        magnitude += seconds / 3600.0;
    }

    Ok(sign * magnitude)
}

/// Parses a latitude in degrees with an optional trailing `N`/`S`
/// (case-insensitive, `S` negates). The result must lie within [-90, 90].
pub fn parse_lat(input: &str) -> Result<f64, DegreeError> {
    let (body, sign) = split_hemisphere(input, 'N', 'S')?;
    let degrees = parse_degree(body)? * sign;
    if degrees.abs() > 90.0 {
        return Err(DegreeError::LatitudeOutOfRange(degrees));
    }
    Ok(degrees)
}

/// Parses a longitude in degrees with an optional trailing `E`/`W`
/// (`W` negates). Any magnitude is accepted and wrapped into (-180, 180].
pub fn parse_lon(input: &str) -> Result<f64, DegreeError> {
    let (body, sign) = split_hemisphere(input, 'E', 'W')?;
    Ok(wrap_degrees(parse_degree(body)? * sign))
}

fn parse_field(raw: &str) -> Result<f64, DegreeError> {
    let value: f64 = raw
        .parse()
        .map_err(|_| DegreeError::BadNumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(DegreeError::BadNumber(raw.to_string()));
    }
    Ok(value)
}

fn split_hemisphere(input: &str, positive: char, negative: char) -> Result<(&str, f64), DegreeError> {
    let trimmed = input.trim();
    let last = match trimmed.chars().next_back() {
        Some(c) => c,
        None => return Err(DegreeError::Empty),
    };
    let upper = last.to_ascii_uppercase();
    if upper != positive && upper != negative {
        return Ok((trimmed, 1.0));
    }
    let body = trimmed[..trimmed.len() - last.len_utf8()].trim_end();
    if body.starts_with('-') || body.starts_with('+') {
        return Err(DegreeError::SignedHemisphere);
    }
    let sign = if upper == negative { -1.0 } else { 1.0 };
    Ok((body, sign))
}

fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}
