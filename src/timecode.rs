/*!
 * SRT timecode handling.
 *
 * Converts between floating-point seconds and the fixed `HH:MM:SS,mmm`
 * text representation used by SRT timing lines.
 */

use std::fmt;
use std::ops::{Add, Sub};

use crate::errors::SubtitleError;

/// A point in time with millisecond precision, stored as seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timecode {
    secs: f64,
}

impl Timecode {
    /// Create a timecode from a seconds value
    pub fn from_seconds(secs: f64) -> Self {
        Timecode { secs }
    }

    /// Seconds value of this timecode
    pub fn seconds(&self) -> f64 {
        self.secs
    }

    /// Parse an SRT timecode (HH:MM:SS,mmm)
    ///
    /// The decimal separator may be a comma or a dot; some files in the
    /// wild use either.
    pub fn parse(text: &str) -> Result<Self, SubtitleError> {
        let normalized = text.trim().replace(',', ".");
        let parts: Vec<&str> = normalized.split(':').collect();

        if parts.len() != 3 {
            return Err(SubtitleError::InvalidTimecode(text.to_string()));
        }

        let hours: f64 = parts[0]
            .parse()
            .map_err(|_| SubtitleError::InvalidTimecode(text.to_string()))?;
        let minutes: f64 = parts[1]
            .parse()
            .map_err(|_| SubtitleError::InvalidTimecode(text.to_string()))?;
        let seconds: f64 = parts[2]
            .parse()
            .map_err(|_| SubtitleError::InvalidTimecode(text.to_string()))?;

        Ok(Timecode {
            secs: hours * 3600.0 + minutes * 60.0 + seconds,
        })
    }

    /// Format as an SRT timecode (HH:MM:SS,mmm)
    ///
    /// Negative values are display-only and rendered with a leading `-`,
    /// fields computed from the absolute value. Whole seconds are
    /// truncated, not rounded; milliseconds come from the fractional
    /// remainder. A small epsilon absorbs float representation error so
    /// that parse(format(t)) round-trips at ms precision.
    pub fn format(&self) -> String {
        let total = self.secs.abs();
        let whole = total.trunc() as u64;
        let millis = (((total.fract() * 1000.0) + 1e-6).trunc() as u64).min(999);

        let hours = whole / 3600;
        let minutes = (whole % 3600) / 60;
        let seconds = whole % 60;

        let sign = if self.secs < 0.0 { "-" } else { "" };
        format!("{}{:02}:{:02}:{:02},{:03}", sign, hours, minutes, seconds, millis)
    }

    /// Snap to the nearest whole millisecond
    pub fn quantize_ms(&self) -> Self {
        Timecode {
            secs: (self.secs * 1000.0).round() / 1000.0,
        }
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl Sub for Timecode {
    type Output = f64;

    /// Difference between two timecodes, in seconds
    fn sub(self, rhs: Timecode) -> f64 {
        self.secs - rhs.secs
    }
}

impl Add<f64> for Timecode {
    type Output = Timecode;

    fn add(self, rhs: f64) -> Timecode {
        Timecode {
            secs: self.secs + rhs,
        }
    }
}
