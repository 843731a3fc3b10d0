//! Parsing of the game's `/showlocation` readout into position samples.
//!
//! ```text
//! Coordinates: x:22462615339.086491 y:37186143497.515411 z:766202.569542 T:1674962568.3761563
//! ```
//!
//! Coordinates are metres in the system-global frame. The trailing `T:` field
//! is only present in recorded sessions and replaces the live clock.

use scnav_core::Vector;
use scnav_core::units::m_to_km;
use thiserror::Error;

const PREFIX: &str = "Coordinates:";

/// A position sample in kilometres with its Unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: Vector,
    pub timestamp: f64,
    /// `true` when the timestamp came from a `T:` field.
    pub replayed: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("coordinate line is missing the '{0}' field")]
    MissingField(&'static str),
    #[error("invalid value '{value}' for field '{field}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Parse one line of text.
///
/// Lines that are not coordinate readouts yield `Ok(None)`. A line without a
/// `T:` field is stamped with `fallback_timestamp`.
pub fn parse_sample(line: &str, fallback_timestamp: f64) -> Result<Option<Sample>, SampleError> {
    let Some(fields) = line.trim().strip_prefix(PREFIX) else {
        return Ok(None);
    };

    let mut values: [Option<f64>; 4] = [None; 4];
    for token in fields.split_whitespace() {
        let Some((key, raw)) = token.split_once(':') else {
            continue;
        };
        let (slot, field) = match key {
            "x" => (0, "x"),
            "y" => (1, "y"),
            "z" => (2, "z"),
            "T" => (3, "T"),
            _ => continue,
        };
        let value = raw.parse::<f64>().map_err(|_| SampleError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;
        values[slot] = Some(value);
    }

    let [x, y, z, t] = values;
    let x = x.ok_or(SampleError::MissingField("x"))?;
    let y = y.ok_or(SampleError::MissingField("y"))?;
    let z = z.ok_or(SampleError::MissingField("z"))?;

    Ok(Some(Sample {
        position: Vector::new(m_to_km(x), m_to_km(y), m_to_km(z)),
        timestamp: t.unwrap_or(fallback_timestamp),
        replayed: t.is_some(),
    }))
}
