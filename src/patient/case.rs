// Patient case submitted for routing

use serde::Serialize;
use std::collections::BTreeSet;

use super::{Comorbidity, PrimaryConcern};
use crate::errors::{InputField, InvalidInput};

/// Youngest age accepted by the intake form
pub const MIN_AGE: u8 = 2;
/// Oldest age accepted by the intake form
pub const MAX_AGE: u8 = 18;

/// Validated patient attributes
///
/// Built only through [`PatientCase::new`] or [`PatientCase::parse`], so every
/// value in circulation has an in-range age. Comorbidities are kept as an
/// ordered set: duplicates collapse and iteration order is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PatientCase {
    age: u8,
    primary_concern: PrimaryConcern,
    comorbidities: BTreeSet<Comorbidity>,
}

impl PatientCase {
    pub fn new<I>(age: i64, primary_concern: PrimaryConcern, comorbidities: I) -> Result<Self, InvalidInput>
    where
        I: IntoIterator<Item = Comorbidity>,
    {
        if age < i64::from(MIN_AGE) || age > i64::from(MAX_AGE) {
            return Err(InvalidInput::AgeOutOfRange {
                age,
                min: MIN_AGE,
                max: MAX_AGE,
            });
        }

        Ok(Self {
            age: age as u8,
            primary_concern,
            comorbidities: comorbidities.into_iter().collect(),
        })
    }

    /// Build a case from raw form field text
    ///
    /// Fails on the first field that cannot be understood.
    pub fn parse<S: AsRef<str>>(age: &str, primary_concern: &str, comorbidities: &[S]) -> Result<Self, InvalidInput> {
        let age_value: i64 = age.trim().parse().map_err(|_| InvalidInput::Malformed {
            field: InputField::Age,
            value: age.trim().to_string(),
        })?;
        let concern: PrimaryConcern = primary_concern.parse()?;
        let comorbidities = comorbidities
            .iter()
            .map(|c| c.as_ref().parse::<Comorbidity>())
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(age_value, concern, comorbidities)
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn primary_concern(&self) -> PrimaryConcern {
        self.primary_concern
    }

    pub fn comorbidities(&self) -> &BTreeSet<Comorbidity> {
        &self.comorbidities
    }

    pub fn has(&self, comorbidity: Comorbidity) -> bool {
        self.comorbidities.contains(&comorbidity)
    }

    pub fn has_any(&self, comorbidities: &[Comorbidity]) -> bool {
        comorbidities.iter().any(|c| self.has(*c))
    }

    /// One-line description, e.g. "Age 13, Autism Spectrum (+ Depression, Suicidal Ideation)"
    pub fn summary(&self) -> String {
        if self.comorbidities.is_empty() {
            return format!("Age {}, {}", self.age, self.primary_concern);
        }
        let extras = self
            .comorbidities
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Age {}, {} (+ {})", self.age, self.primary_concern, extras)
    }
}
