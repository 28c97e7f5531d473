//! Vocabulary of the case-surveillance domain.
//!
//! This module pins down the mapping between a geographic scale and its join
//! key column, casing rule, and input file names, as well as the patient
//! characteristics and the valid reporting months. Keeping the mapping in one
//! place means the merge step never infers column names from string literals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SnowmapError};

/// Geographic resolution of the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// One row per U.S. state, keyed by postal abbreviation
    State,
    /// One row per county, keyed by county name
    County,
}

impl Scale {
    /// The boundary property this scale joins on
    pub fn key_column(&self) -> &'static str {
        match self {
            Scale::State => "STUSPS",
            Scale::County => "NAME",
        }
    }

    /// Normalize a raw region name from the statistics file into the join key
    pub fn region_key(&self, raw: &str) -> String {
        match self {
            Scale::State => raw.to_uppercase(),
            Scale::County => title_case(raw),
        }
    }

    /// File name of the boundary GeoJSON for this scale
    pub fn boundary_file(&self) -> &'static str {
        match self {
            Scale::State => "us_states.geojson",
            Scale::County => "us_counties.geojson",
        }
    }

    /// File name of the serialized statistics lookup for this scale
    pub fn statistics_file(&self) -> &'static str {
        match self {
            Scale::State => "covid19_by_state.json",
            Scale::County => "covid19_by_county.json",
        }
    }

    /// All supported scales
    pub fn all() -> &'static [Scale] {
        &[Scale::State, Scale::County]
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::State => write!(f, "state"),
            Scale::County => write!(f, "county"),
        }
    }
}

impl FromStr for Scale {
    type Err = SnowmapError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "state" => Ok(Scale::State),
            "county" => Ok(Scale::County),
            _ => Err(SnowmapError::InvalidParameter {
                param: "scale".to_string(),
                message: format!("Unknown scale: {}. Must be 'state' or 'county'", s),
            }),
        }
    }
}

/// Demographic grouping dimension of the surveillance data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Characteristic {
    AgeGroup,
    Sex,
    Race,
    Ethnicity,
}

impl Characteristic {
    /// Key of this characteristic in the serialized lookup structure
    pub fn key(&self) -> &'static str {
        match self {
            Characteristic::AgeGroup => "age_group",
            Characteristic::Sex => "sex",
            Characteristic::Race => "race",
            Characteristic::Ethnicity => "ethnicity",
        }
    }

    /// Display label as shown to a client
    pub fn label(&self) -> &'static str {
        match self {
            Characteristic::AgeGroup => "Age_group",
            Characteristic::Sex => "Sex",
            Characteristic::Race => "Race",
            Characteristic::Ethnicity => "Ethnicity",
        }
    }

    /// The attribute vocabulary of this characteristic
    pub fn attributes(&self) -> &'static [&'static str] {
        match self {
            Characteristic::AgeGroup => &[
                "0 - 17 years",
                "18 to 49 years",
                "50 to 64 years",
                "65+ years",
                "Unknown",
                "Missing",
            ],
            Characteristic::Sex => &["Female", "Male", "Other", "Unknown", "Missing", "NA"],
            Characteristic::Race => &[
                "American Indian/Alaska Native",
                "Asian",
                "Black",
                "Multiple/Other",
                "Native Hawaiian/Other Pacific Islander",
                "White",
                "Unknown",
                "Missing",
                "NA",
            ],
            Characteristic::Ethnicity => {
                &["Hispanic", "Non-Hispanic", "Unknown", "Missing", "NA"]
            }
        }
    }

    /// Check that an attribute belongs to this characteristic's vocabulary
    pub fn validate_attribute(&self, attribute: &str) -> Result<()> {
        if self.attributes().contains(&attribute) {
            Ok(())
        } else {
            Err(SnowmapError::InvalidParameter {
                param: "attribute".to_string(),
                message: format!(
                    "Unknown attribute '{}' for characteristic {}. Valid attributes: {}",
                    attribute,
                    self.label(),
                    self.attributes().join(", ")
                ),
            })
        }
    }

    /// All supported characteristics
    pub fn all() -> &'static [Characteristic] {
        &[
            Characteristic::AgeGroup,
            Characteristic::Sex,
            Characteristic::Race,
            Characteristic::Ethnicity,
        ]
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Characteristic {
    type Err = SnowmapError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "age_group" => Ok(Characteristic::AgeGroup),
            "sex" => Ok(Characteristic::Sex),
            "race" => Ok(Characteristic::Race),
            "ethnicity" => Ok(Characteristic::Ethnicity),
            _ => Err(SnowmapError::InvalidParameter {
                param: "characteristic".to_string(),
                message: format!(
                    "Unknown characteristic: {}. Must be one of: Age_group, Sex, Race, Ethnicity",
                    s
                ),
            }),
        }
    }
}

/// A reporting month within the surveillance period.
///
/// The source data covers 2020 (months 1-12) and 2021 (months 1-10); anything
/// outside that range has no entry in the lookup structure and is rejected up
/// front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthKey {
    year: u16,
    month: u8,
}

impl MonthKey {
    /// Create a month key, validating the year and the year-dependent month range
    pub fn new(year: u16, month: u8) -> Result<Self> {
        let max_month = match year {
            2020 => 12,
            2021 => 10,
            _ => {
                return Err(SnowmapError::InvalidParameter {
                    param: "year".to_string(),
                    message: format!("Year {} is outside the surveillance period (2020-2021)", year),
                })
            }
        };

        if month < 1 || month > max_month {
            return Err(SnowmapError::InvalidParameter {
                param: "month".to_string(),
                message: format!("Month {} is invalid for {}: must be 1-{}", month, year, max_month),
            });
        }

        Ok(Self { year, month })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// Every valid month key, in chronological order
    pub fn all() -> Vec<MonthKey> {
        let mut months = Vec::with_capacity(22);
        for month in 1..=12 {
            months.push(MonthKey { year: 2020, month });
        }
        for month in 1..=10 {
            months.push(MonthKey { year: 2021, month });
        }
        months
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Capitalize the first letter of every alphabetic run, lowercasing the rest.
///
/// Matches the casing convention of the county statistics keys ("autauga
/// county" becomes "Autauga County").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(ch);
            at_boundary = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_key_mapping() {
        assert_eq!(Scale::State.key_column(), "STUSPS");
        assert_eq!(Scale::County.key_column(), "NAME");
        assert_eq!(Scale::State.region_key("ga"), "GA");
        assert_eq!(Scale::County.region_key("autauga county"), "Autauga County");
    }

    #[test]
    fn test_scale_parsing() {
        assert_eq!(Scale::from_str("state").unwrap(), Scale::State);
        assert_eq!(Scale::from_str("State").unwrap(), Scale::State);
        assert_eq!(Scale::from_str("COUNTY").unwrap(), Scale::County);
        assert!(Scale::from_str("country").is_err());
    }

    #[test]
    fn test_characteristic_parsing() {
        assert_eq!(
            Characteristic::from_str("Age_group").unwrap(),
            Characteristic::AgeGroup
        );
        assert_eq!(Characteristic::from_str("sex").unwrap(), Characteristic::Sex);
        assert!(Characteristic::from_str("height").is_err());
    }

    #[test]
    fn test_characteristic_vocabulary() {
        assert_eq!(Characteristic::Sex.attributes().len(), 6);
        assert!(Characteristic::Sex.validate_attribute("Female").is_ok());
        assert!(Characteristic::Sex.validate_attribute("Hispanic").is_err());
        assert!(Characteristic::Ethnicity
            .validate_attribute("Hispanic")
            .is_ok());
        assert_eq!(Characteristic::AgeGroup.key(), "age_group");
    }

    #[test]
    fn test_month_key_validation() {
        assert!(MonthKey::new(2020, 12).is_ok());
        assert!(MonthKey::new(2021, 10).is_ok());
        assert!(MonthKey::new(2021, 11).is_err());
        assert!(MonthKey::new(2020, 0).is_err());
        assert!(MonthKey::new(2019, 5).is_err());
        assert!(MonthKey::new(2022, 1).is_err());
    }

    #[test]
    fn test_month_key_formatting() {
        assert_eq!(MonthKey::new(2020, 4).unwrap().to_string(), "2020-04");
        assert_eq!(MonthKey::new(2021, 10).unwrap().to_string(), "2021-10");
    }

    #[test]
    fn test_month_key_domain() {
        let all = MonthKey::all();
        assert_eq!(all.len(), 22);
        assert_eq!(all.first().unwrap().to_string(), "2020-01");
        assert_eq!(all.last().unwrap().to_string(), "2021-10");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("autauga county"), "Autauga County");
        assert_eq!(title_case("DEKALB COUNTY"), "Dekalb County");
        assert_eq!(title_case("o'brien county"), "O'Brien County");
        assert_eq!(title_case(""), "");
    }
}
