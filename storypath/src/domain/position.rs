use std::fmt;

/// A latitude/longitude pair parsed from the backend's `"(lat, long)"` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub long: f64,
}

/// Map centre used when a project has no locations yet.
pub const FALLBACK_CENTER: Position = Position {
    lat: -27.4975,
    long: 153.0137,
};

impl Position {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Parse a stored position string.
    ///
    /// The first and last characters are dropped as delimiters, the rest is
    /// split on a comma and each part is parsed as a float. Parts that do not
    /// parse become `NaN`; nothing is validated here.
    pub fn parse(raw: &str) -> Self {
        let mut chars = raw.chars();
        chars.next();
        chars.next_back();

        let mut parts = chars
            .as_str()
            .split(',')
            .map(|part| part.trim().parse::<f64>().unwrap_or(f64::NAN));

        let lat = parts.next().unwrap_or(f64::NAN);
        let long = parts.next().unwrap_or(f64::NAN);
        Self { lat, long }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.long.is_finite()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.long)
    }
}
