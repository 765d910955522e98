//! User-selected filter criteria.
//!
//! Both selectors have an `Any` state meaning "no filter". Their string
//! forms are what the command line accepts:
//!
//! | price           | meaning                                    |
//! |-----------------|--------------------------------------------|
//! | `any` or empty  | no price filter                            |
//! | `band`          | the default band, 200 - 1000               |
//! | `120-400`       | a custom inclusive band                    |
//! | `level:premium` | exact match on the record's price level    |

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lower bound of the default acceptable price band
pub const DEFAULT_BAND_MIN: f64 = 200.0;

/// Upper bound of the default acceptable price band
pub const DEFAULT_BAND_MAX: f64 = 1000.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CriteriaError {
    #[error("invalid price selector '{0}', expected any, band, MIN-MAX or level:NAME")]
    InvalidPrice(String),
}

/// Price selector
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PriceFilter {
    #[default]
    Any,
    /// Inclusive average-price band
    Band { min: f64, max: f64 },
    /// Exact price-level label
    Level(String),
}

impl PriceFilter {
    /// The default 200 - 1000 band
    pub fn default_band() -> Self {
        PriceFilter::Band {
            min: DEFAULT_BAND_MIN,
            max: DEFAULT_BAND_MAX,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, PriceFilter::Any)
    }
}

impl FromStr for PriceFilter {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || CriteriaError::InvalidPrice(s.to_string());

        match s {
            "" | "any" => return Ok(PriceFilter::Any),
            "band" => return Ok(PriceFilter::default_band()),
            _ => {}
        }

        if let Some(level) = s.strip_prefix("level:") {
            let level = level.trim();
            if level.is_empty() {
                return Err(invalid());
            }
            return Ok(PriceFilter::Level(level.to_string()));
        }

        let (min, max) = s.split_once('-').ok_or_else(invalid)?;
        let min: f64 = min.trim().parse().map_err(|_| invalid())?;
        let max: f64 = max.trim().parse().map_err(|_| invalid())?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(invalid());
        }
        Ok(PriceFilter::Band { min, max })
    }
}

impl fmt::Display for PriceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceFilter::Any => write!(f, "any"),
            PriceFilter::Band { min, max } => write!(f, "{min}-{max}"),
            PriceFilter::Level(level) => write!(f, "level:{level}"),
        }
    }
}

/// Tag selector, matched against tags and scene labels
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TagFilter {
    #[default]
    Any,
    Tag(String),
}

impl TagFilter {
    pub fn is_any(&self) -> bool {
        matches!(self, TagFilter::Any)
    }
}

impl FromStr for TagFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "any" => TagFilter::Any,
            tag => TagFilter::Tag(tag.to_string()),
        })
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::Any => write!(f, "any"),
            TagFilter::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

/// The full set of selectors applied to a catalog
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub price: PriceFilter,
    pub tag: TagFilter,
}

impl FilterCriteria {
    pub fn new(price: PriceFilter, tag: TagFilter) -> Self {
        Self { price, tag }
    }
}
