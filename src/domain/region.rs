//! Administrative region resolution.
//!
//! The MOLIT transaction API is keyed by the 5-digit `LAWD_CD` district
//! code. Seoul's 25 districts are built in; other regions come from
//! configuration overrides or can be passed as a raw code.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::error::DomainError;

/// Built-in district codes for Seoul.
pub const SEOUL_DISTRICTS: &[(&str, &str)] = &[
    ("종로구", "11110"),
    ("중구", "11140"),
    ("용산구", "11170"),
    ("성동구", "11200"),
    ("광진구", "11215"),
    ("동대문구", "11230"),
    ("중랑구", "11260"),
    ("성북구", "11290"),
    ("강북구", "11305"),
    ("도봉구", "11320"),
    ("노원구", "11350"),
    ("은평구", "11380"),
    ("서대문구", "11410"),
    ("마포구", "11440"),
    ("양천구", "11470"),
    ("강서구", "11500"),
    ("구로구", "11530"),
    ("금천구", "11545"),
    ("영등포구", "11560"),
    ("동작구", "11590"),
    ("관악구", "11620"),
    ("서초구", "11650"),
    ("강남구", "11680"),
    ("송파구", "11710"),
    ("강동구", "11740"),
];

const SEOUL_ALIASES: &[&str] = &["서울", "서울시", "서울특별시", "seoul"];

/// 5-digit MOLIT district code (`LAWD_CD`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegionCode(String);

impl RegionCode {
    /// Parse a raw code; it must be exactly five ASCII digits.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (trimmed.len() == 5 && trimmed.bytes().all(|b| b.is_ascii_digit()))
            .then(|| Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn compact(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

fn is_seoul(city: &str) -> bool {
    let city = compact(city);
    city.is_empty() || SEOUL_ALIASES.iter().any(|alias| compact(alias) == city)
}

/// Resolve a city/district pair to a region code.
///
/// Lookup order: a raw 5-digit district code, configuration overrides keyed
/// `"city/district"` or `"district"`, then the built-in Seoul table (when
/// the city is Seoul or empty).
///
/// # Errors
///
/// Returns [`DomainError::UnknownRegion`] when nothing matches.
pub fn resolve_region(
    city: &str,
    district: &str,
    overrides: &HashMap<String, String>,
) -> Result<RegionCode, DomainError> {
    if let Some(code) = RegionCode::parse(district) {
        return Ok(code);
    }

    let district_key = compact(district);
    let scoped_key = format!("{}/{}", compact(city), district_key);
    for wanted in [&scoped_key, &district_key] {
        let override_code = overrides
            .iter()
            .find(|(key, _)| compact(key) == *wanted)
            .and_then(|(_, code)| RegionCode::parse(code));
        if let Some(code) = override_code {
            return Ok(code);
        }
    }

    if is_seoul(city) {
        if let Some((_, code)) = SEOUL_DISTRICTS
            .iter()
            .find(|(name, _)| compact(name) == district_key)
        {
            if let Some(code) = RegionCode::parse(code) {
                return Ok(code);
            }
        }
    }

    Err(DomainError::UnknownRegion {
        city: city.to_string(),
        district: district.to_string(),
    })
}
