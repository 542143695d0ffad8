//! Geolocation data types.
//!
//! This module defines the lookup target, the cache key derived from it, and
//! the record built from a provider response.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error_handling::GeoError;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl FromStr for Coordinates {
    type Err = String;

    /// Parses the provider's combined `"lat,lon"` text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lon\", got {:?}", s))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| format!("invalid latitude {:?}", lat))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| format!("invalid longitude {:?}", lon))?;

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude out of range: {}", latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude out of range: {}", longitude));
        }

        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Who to geolocate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// The caller's own address, as seen by the provider.
    Own,
    /// A literal address string, passed through unvalidated.
    Address(String),
}

impl Target {
    /// Normalizes optional user input into a target.
    ///
    /// Input is trimmed; blank input means the caller's own address.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some(address) if !address.is_empty() => Target::Address(address.to_string()),
            _ => Target::Own,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Own => f.write_str("your IP"),
            Target::Address(address) => f.write_str(address),
        }
    }
}

/// Identity of one cache slot: the normalized target plus the credential.
///
/// `Target::Own` and an explicit address are distinct keys even when the
/// provider resolves both to the same IP, since the two request shapes differ.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    target: Target,
    token: String,
}

impl CacheKey {
    pub fn new(target: &Target, token: &str) -> Self {
        Self {
            target: target.clone(),
            token: token.to_string(),
        }
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheKey")
            .field("target", &self.target)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Wire shape of a provider response. Unknown fields land in `extra` so a
/// saved record keeps everything the provider sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProviderRecord {
    ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    org: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    loc: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

/// The result of one successful lookup.
///
/// Built once from a provider response and never mutated. Text fields are kept
/// exactly as the provider sent them so a saved record matches the response;
/// accessors treat blank values as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProviderRecord", into = "ProviderRecord")]
pub struct GeoRecord {
    ip: String,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    organization: Option<String>,
    timezone: Option<String>,
    loc: Option<String>,
    coordinates: Option<Coordinates>,
    extra: BTreeMap<String, Value>,
}

impl GeoRecord {
    /// Parses a provider response body.
    ///
    /// # Errors
    ///
    /// Returns `GeoError::MalformedResponse` if the body is not a JSON object
    /// with a string `ip`, or if `loc` is present but not `"lat,lon"`.
    pub fn parse(body: &str) -> Result<Self, GeoError> {
        serde_json::from_str(body).map_err(|e| GeoError::MalformedResponse(e.to_string()))
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn city(&self) -> Option<&str> {
        non_blank(&self.city)
    }

    pub fn region(&self) -> Option<&str> {
        non_blank(&self.region)
    }

    pub fn country(&self) -> Option<&str> {
        non_blank(&self.country)
    }

    pub fn organization(&self) -> Option<&str> {
        non_blank(&self.organization)
    }

    pub fn timezone(&self) -> Option<&str> {
        non_blank(&self.timezone)
    }

    /// The provider's `loc` text, unchanged.
    pub fn loc(&self) -> Option<&str> {
        non_blank(&self.loc)
    }

    /// `loc` parsed into numbers.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Provider fields without a dedicated accessor (hostname, postal, ...).
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl TryFrom<ProviderRecord> for GeoRecord {
    type Error = String;

    fn try_from(raw: ProviderRecord) -> Result<Self, Self::Error> {
        let coordinates = match non_blank(&raw.loc) {
            Some(loc) => Some(loc.parse::<Coordinates>()?),
            None => None,
        };

        Ok(GeoRecord {
            ip: raw.ip,
            city: raw.city,
            region: raw.region,
            country: raw.country,
            organization: raw.org,
            timezone: raw.timezone,
            loc: raw.loc,
            coordinates,
            extra: raw.extra,
        })
    }
}

impl From<GeoRecord> for ProviderRecord {
    fn from(record: GeoRecord) -> Self {
        ProviderRecord {
            ip: record.ip,
            city: record.city,
            region: record.region,
            country: record.country,
            org: record.organization,
            timezone: record.timezone,
            loc: record.loc,
            extra: record.extra,
        }
    }
}
