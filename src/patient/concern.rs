// Presenting concern and comorbidity vocabularies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::normalize_label;
use crate::errors::{InputField, InvalidInput};

/// Primary presenting concern selected on the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryConcern {
    AutismSpectrum,
    AdhdOnly,
    DepressionMood,
    AnxietyDisorder,
    SeizuresEpilepsy,
    TicsMovement,
    BehavioralProblems,
    DevelopmentalDelay,
}

impl PrimaryConcern {
    pub const ALL: [PrimaryConcern; 8] = [
        PrimaryConcern::AutismSpectrum,
        PrimaryConcern::AdhdOnly,
        PrimaryConcern::DepressionMood,
        PrimaryConcern::AnxietyDisorder,
        PrimaryConcern::SeizuresEpilepsy,
        PrimaryConcern::TicsMovement,
        PrimaryConcern::BehavioralProblems,
        PrimaryConcern::DevelopmentalDelay,
    ];

    /// Label as shown on the intake form
    pub fn label(&self) -> &'static str {
        match self {
            PrimaryConcern::AutismSpectrum => "Autism Spectrum",
            PrimaryConcern::AdhdOnly => "ADHD Only",
            PrimaryConcern::DepressionMood => "Depression/Mood Disorder",
            PrimaryConcern::AnxietyDisorder => "Anxiety Disorder",
            PrimaryConcern::SeizuresEpilepsy => "Seizures/Epilepsy",
            PrimaryConcern::TicsMovement => "Tics/Movement Disorder",
            PrimaryConcern::BehavioralProblems => "Behavioral Problems",
            PrimaryConcern::DevelopmentalDelay => "Developmental Delay",
        }
    }

    /// Machine-friendly name (matches the serialized form)
    pub fn slug(&self) -> &'static str {
        match self {
            PrimaryConcern::AutismSpectrum => "autism-spectrum",
            PrimaryConcern::AdhdOnly => "adhd-only",
            PrimaryConcern::DepressionMood => "depression-mood",
            PrimaryConcern::AnxietyDisorder => "anxiety-disorder",
            PrimaryConcern::SeizuresEpilepsy => "seizures-epilepsy",
            PrimaryConcern::TicsMovement => "tics-movement",
            PrimaryConcern::BehavioralProblems => "behavioral-problems",
            PrimaryConcern::DevelopmentalDelay => "developmental-delay",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            PrimaryConcern::AutismSpectrum => &["autism", "asd"],
            PrimaryConcern::AdhdOnly => &["adhd"],
            PrimaryConcern::DepressionMood => &["depression", "mood"],
            PrimaryConcern::AnxietyDisorder => &["anxiety"],
            PrimaryConcern::SeizuresEpilepsy => &["seizures", "seizure", "epilepsy"],
            PrimaryConcern::TicsMovement => &["tics", "movement"],
            PrimaryConcern::BehavioralProblems => &["behavioral", "behavior", "behaviour"],
            PrimaryConcern::DevelopmentalDelay => &["developmental", "delay"],
        }
    }

    fn matches(&self, key: &str) -> bool {
        key == self.slug() || key == normalize_label(self.label()) || self.aliases().contains(&key)
    }

    /// Mood and anxiety disorders share one routing path
    pub fn is_mood_or_anxiety(&self) -> bool {
        matches!(
            self,
            PrimaryConcern::DepressionMood | PrimaryConcern::AnxietyDisorder
        )
    }
}

impl fmt::Display for PrimaryConcern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PrimaryConcern {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_label(s);
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.matches(&key))
            .ok_or_else(|| InvalidInput::UnknownValue {
                field: InputField::PrimaryConcern,
                value: s.trim().to_string(),
            })
    }
}

/// Additional concern checked on the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comorbidity {
    AutismSpectrum,
    Adhd,
    Depression,
    Anxiety,
    SuicidalIdeation,
    SeizuresEpilepsy,
    DevelopmentalDelay,
    SchoolRefusal,
    SleepProblems,
    EatingProblems,
}

impl Comorbidity {
    pub const ALL: [Comorbidity; 10] = [
        Comorbidity::AutismSpectrum,
        Comorbidity::Adhd,
        Comorbidity::Depression,
        Comorbidity::Anxiety,
        Comorbidity::SuicidalIdeation,
        Comorbidity::SeizuresEpilepsy,
        Comorbidity::DevelopmentalDelay,
        Comorbidity::SchoolRefusal,
        Comorbidity::SleepProblems,
        Comorbidity::EatingProblems,
    ];

    /// Comorbidities that signal significant mood concerns
    pub const MOOD: [Comorbidity; 3] = [
        Comorbidity::Depression,
        Comorbidity::Anxiety,
        Comorbidity::SuicidalIdeation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Comorbidity::AutismSpectrum => "Autism Spectrum",
            Comorbidity::Adhd => "ADHD",
            Comorbidity::Depression => "Depression",
            Comorbidity::Anxiety => "Anxiety",
            Comorbidity::SuicidalIdeation => "Suicidal Ideation",
            Comorbidity::SeizuresEpilepsy => "Seizures/Epilepsy",
            Comorbidity::DevelopmentalDelay => "Developmental Delay",
            Comorbidity::SchoolRefusal => "School Refusal",
            Comorbidity::SleepProblems => "Sleep Problems",
            Comorbidity::EatingProblems => "Eating Problems",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Comorbidity::AutismSpectrum => "autism-spectrum",
            Comorbidity::Adhd => "adhd",
            Comorbidity::Depression => "depression",
            Comorbidity::Anxiety => "anxiety",
            Comorbidity::SuicidalIdeation => "suicidal-ideation",
            Comorbidity::SeizuresEpilepsy => "seizures-epilepsy",
            Comorbidity::DevelopmentalDelay => "developmental-delay",
            Comorbidity::SchoolRefusal => "school-refusal",
            Comorbidity::SleepProblems => "sleep-problems",
            Comorbidity::EatingProblems => "eating-problems",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Comorbidity::AutismSpectrum => &["autism", "asd"],
            Comorbidity::Adhd => &[],
            Comorbidity::Depression => &["mood"],
            Comorbidity::Anxiety => &[],
            Comorbidity::SuicidalIdeation => &["si", "suicidal"],
            Comorbidity::SeizuresEpilepsy => &["seizures", "seizure", "epilepsy"],
            Comorbidity::DevelopmentalDelay => &["developmental", "delay"],
            Comorbidity::SchoolRefusal => &["school"],
            Comorbidity::SleepProblems => &["sleep"],
            Comorbidity::EatingProblems => &["eating"],
        }
    }

    fn matches(&self, key: &str) -> bool {
        key == self.slug() || key == normalize_label(self.label()) || self.aliases().contains(&key)
    }
}

impl fmt::Display for Comorbidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Comorbidity {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_label(s);
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.matches(&key))
            .ok_or_else(|| InvalidInput::UnknownValue {
                field: InputField::Comorbidity,
                value: s.trim().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concern_parses_label_slug_and_alias() {
        assert_eq!(
            "Depression/Mood Disorder".parse::<PrimaryConcern>().unwrap(),
            PrimaryConcern::DepressionMood
        );
        assert_eq!(
            "tics-movement".parse::<PrimaryConcern>().unwrap(),
            PrimaryConcern::TicsMovement
        );
        assert_eq!("ADHD".parse::<PrimaryConcern>().unwrap(), PrimaryConcern::AdhdOnly);
        assert_eq!("autism".parse::<PrimaryConcern>().unwrap(), PrimaryConcern::AutismSpectrum);
    }

    #[test]
    fn test_every_label_and_slug_round_trips() {
        for concern in PrimaryConcern::ALL {
            assert_eq!(concern.label().parse::<PrimaryConcern>().unwrap(), concern);
            assert_eq!(concern.slug().parse::<PrimaryConcern>().unwrap(), concern);
        }
        for comorbidity in Comorbidity::ALL {
            assert_eq!(comorbidity.label().parse::<Comorbidity>().unwrap(), comorbidity);
            assert_eq!(comorbidity.slug().parse::<Comorbidity>().unwrap(), comorbidity);
        }
    }

    #[test]
    fn test_unknown_concern_is_invalid_input() {
        let err = "headache".parse::<PrimaryConcern>().unwrap_err();
        assert_eq!(
            err,
            InvalidInput::UnknownValue {
                field: InputField::PrimaryConcern,
                value: "headache".to_string(),
            }
        );
    }

    #[test]
    fn test_comorbidity_aliases() {
        assert_eq!("SI".parse::<Comorbidity>().unwrap(), Comorbidity::SuicidalIdeation);
        assert_eq!("school refusal".parse::<Comorbidity>().unwrap(), Comorbidity::SchoolRefusal);
        assert!("".parse::<Comorbidity>().is_err());
    }

    #[test]
    fn test_serialized_names_match_slugs() {
        for concern in PrimaryConcern::ALL {
            let json = serde_json::to_string(&concern).unwrap();
            assert_eq!(json, format!("\"{}\"", concern.slug()));
        }
        for comorbidity in Comorbidity::ALL {
            let json = serde_json::to_string(&comorbidity).unwrap();
            assert_eq!(json, format!("\"{}\"", comorbidity.slug()));
        }
    }
}
