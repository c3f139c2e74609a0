//! Shopping-search markets and their Google localization parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported markets with their Google domains, languages and currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    #[default]
    Us,
    Uk,
    De,
    Fr,
    Es,
    It,
    Ca,
    Au,
    Jp,
    In,
    Br,
    Mx,
    Nl,
    Se,
    Pl,
}

impl Region {
    /// Returns the Google domain searched for this market.
    pub fn google_domain(&self) -> &'static str {
        match self {
            Region::Us => "google.com",
            Region::Uk => "google.co.uk",
            Region::De => "google.de",
            Region::Fr => "google.fr",
            Region::Es => "google.es",
            Region::It => "google.it",
            Region::Ca => "google.ca",
            Region::Au => "google.com.au",
            Region::Jp => "google.co.jp",
            Region::In => "google.co.in",
            Region::Br => "google.com.br",
            Region::Mx => "google.com.mx",
            Region::Nl => "google.nl",
            Region::Se => "google.se",
            Region::Pl => "google.pl",
        }
    }

    /// Returns the Amazon storefront for this market.
    pub fn amazon_domain(&self) -> &'static str {
        match self {
            Region::Us => "amazon.com",
            Region::Uk => "amazon.co.uk",
            Region::De => "amazon.de",
            Region::Fr => "amazon.fr",
            Region::Es => "amazon.es",
            Region::It => "amazon.it",
            Region::Ca => "amazon.ca",
            Region::Au => "amazon.com.au",
            Region::Jp => "amazon.co.jp",
            Region::In => "amazon.in",
            Region::Br => "amazon.com.br",
            Region::Mx => "amazon.com.mx",
            Region::Nl => "amazon.nl",
            Region::Se => "amazon.se",
            Region::Pl => "amazon.pl",
        }
    }

    /// Returns the `gl` (country) parameter for this market.
    pub fn country_code(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Uk => "uk",
            Region::De => "de",
            Region::Fr => "fr",
            Region::Es => "es",
            Region::It => "it",
            Region::Ca => "ca",
            Region::Au => "au",
            Region::Jp => "jp",
            Region::In => "in",
            Region::Br => "br",
            Region::Mx => "mx",
            Region::Nl => "nl",
            Region::Se => "se",
            Region::Pl => "pl",
        }
    }

    /// Returns the default `hl` (interface language) for this market.
    pub fn language(&self) -> &'static str {
        match self {
            Region::Us | Region::Uk | Region::Ca | Region::Au | Region::In => "en",
            Region::De => "de",
            Region::Fr => "fr",
            Region::Es | Region::Mx => "es",
            Region::It => "it",
            Region::Jp => "ja",
            Region::Br => "pt",
            Region::Nl => "nl",
            Region::Se => "sv",
            Region::Pl => "pl",
        }
    }

    /// Returns the currency code prices are quoted in.
    pub fn currency(&self) -> &'static str {
        match self {
            Region::Us => "USD",
            Region::Uk => "GBP",
            Region::De | Region::Fr | Region::Es | Region::It | Region::Nl => "EUR",
            Region::Ca => "CAD",
            Region::Au => "AUD",
            Region::Jp => "JPY",
            Region::In => "INR",
            Region::Br => "BRL",
            Region::Mx => "MXN",
            Region::Se => "SEK",
            Region::Pl => "PLN",
        }
    }

    /// Returns all supported regions.
    pub fn all() -> &'static [Region] {
        &[
            Region::Us,
            Region::Uk,
            Region::De,
            Region::Fr,
            Region::Es,
            Region::It,
            Region::Ca,
            Region::Au,
            Region::Jp,
            Region::In,
            Region::Br,
            Region::Mx,
            Region::Nl,
            Region::Se,
            Region::Pl,
        ]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.country_code())
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" | "usa" | "united states" => Ok(Region::Us),
            "uk" | "gb" | "united kingdom" => Ok(Region::Uk),
            "de" | "germany" => Ok(Region::De),
            "fr" | "france" => Ok(Region::Fr),
            "es" | "spain" => Ok(Region::Es),
            "it" | "italy" => Ok(Region::It),
            "ca" | "canada" => Ok(Region::Ca),
            "au" | "australia" => Ok(Region::Au),
            "jp" | "japan" => Ok(Region::Jp),
            "in" | "india" => Ok(Region::In),
            "br" | "brazil" => Ok(Region::Br),
            "mx" | "mexico" => Ok(Region::Mx),
            "nl" | "netherlands" => Ok(Region::Nl),
            "se" | "sweden" => Ok(Region::Se),
            "pl" | "poland" => Ok(Region::Pl),
            _ => Err(RegionParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Region {
    type Error = RegionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.country_code().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct RegionParseError(String);

impl fmt::Display for RegionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown region '{}'. Valid regions: us, uk, de, fr, es, it, ca, au, jp, in, br, mx, nl, se, pl",
            self.0
        )
    }
}

impl std::error::Error for RegionParseError {}
