//! Geographic targeting types

use serde::{Deserialize, Serialize};

use crate::errors::{AdOpsError, Result};

/// City as returned by the remote city catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub country_name: Option<String>,
}

/// A city reference as sent inside a profile update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityTarget {
    pub id: u64,
    pub name: String,
}

impl From<&City> for CityTarget {
    fn from(city: &City) -> Self {
        Self { id: city.id, name: city.name.clone() }
    }
}

/// Non-empty list of city targets
///
/// A profile update with an empty list would silently clear targeting, so the
/// type refuses to exist without at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CityTargetList(Vec<CityTarget>);

impl CityTargetList {
    pub fn as_slice(&self) -> &[CityTarget] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split `names` (trimmed, case-insensitive) into the targets they match
    /// and the names that matched nothing. `self` is left unchanged.
    pub fn retain_names(&self, names: &[String]) -> (Option<CityTargetList>, Vec<String>) {
        let wanted: Vec<(String, &String)> =
            names.iter().map(|n| (n.trim().to_lowercase(), n)).filter(|(k, _)| !k.is_empty()).collect();

        let kept: Vec<CityTarget> = self
            .0
            .iter()
            .filter(|t| wanted.iter().any(|(k, _)| *k == t.name.trim().to_lowercase()))
            .cloned()
            .collect();

        let missing = wanted
            .iter()
            .filter(|(k, _)| !self.0.iter().any(|t| t.name.trim().to_lowercase() == *k))
            .map(|(_, original)| original.trim().to_string())
            .collect();

        (CityTargetList::try_from(kept).ok(), missing)
    }

    pub fn into_inner(self) -> Vec<CityTarget> {
        self.0
    }
}

impl TryFrom<Vec<CityTarget>> for CityTargetList {
    type Error = AdOpsError;

    fn try_from(targets: Vec<CityTarget>) -> Result<Self> {
        if targets.is_empty() {
            return Err(AdOpsError::Validation("city target list must not be empty".to_string()));
        }
        Ok(Self(targets))
    }
}

/// Cities whose country matches `country` (trimmed, case-insensitive).
///
/// Cities without a country never match.
pub fn filter_cities_by_country(cities: &[City], country: &str) -> Vec<CityTarget> {
    let wanted = country.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }
    cities
        .iter()
        .filter(|c| {
            c.country_name.as_deref().map(|n| n.trim().to_lowercase() == wanted).unwrap_or(false)
        })
        .map(CityTarget::from)
        .collect()
}
