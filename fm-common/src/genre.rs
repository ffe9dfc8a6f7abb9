use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Genre of a release. The set is fixed; there is no free-text genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Pop,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    Electronic,
    Rock,
    Jazz,
    Classical,
    #[serde(rename = "R&B")]
    RnB,
    Country,
    Lofi,
    Ambient,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown genre: {0}")]
pub struct GenreParseError(pub String);

impl Genre {
    /// All genres in selection order. The first entry is the default.
    pub const ALL: [Genre; 10] = [
        Genre::Pop,
        Genre::HipHop,
        Genre::Electronic,
        Genre::Rock,
        Genre::Jazz,
        Genre::Classical,
        Genre::RnB,
        Genre::Country,
        Genre::Lofi,
        Genre::Ambient,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::HipHop => "Hip-Hop",
            Genre::Electronic => "Electronic",
            Genre::Rock => "Rock",
            Genre::Jazz => "Jazz",
            Genre::Classical => "Classical",
            Genre::RnB => "R&B",
            Genre::Country => "Country",
            Genre::Lofi => "Lofi",
            Genre::Ambient => "Ambient",
        }
    }
}

impl Default for Genre {
    fn default() -> Self {
        Genre::ALL[0]
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Genre {
    type Err = GenreParseError;

    /// Matches display names, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Genre::ALL
            .iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GenreParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_genre() {
        assert_eq!(Genre::default(), Genre::Pop);
    }

    #[test]
    fn test_parse_display_names() {
        assert_eq!("Hip-Hop".parse::<Genre>(), Ok(Genre::HipHop));
        assert_eq!("R&B".parse::<Genre>(), Ok(Genre::RnB));
        assert_eq!("ambient".parse::<Genre>(), Ok(Genre::Ambient));
        assert_eq!(" Jazz ".parse::<Genre>(), Ok(Genre::Jazz));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "Polka".parse::<Genre>().unwrap_err();
        assert_eq!(err, GenreParseError("Polka".to_string()));
        assert!("".parse::<Genre>().is_err());
        assert!("HipHop".parse::<Genre>().is_err());
    }
}
