use logoguide_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feature position used by the small (k=3) classifier to gate the
/// animal branch of the pipeline
pub const FEATURE_ANIMAL_GATE: usize = 1;
/// Feature position of the binary animal-themed flag
pub const FEATURE_ANIMAL_FLAG: usize = 4;
/// Feature position of the animal-category code (0 = not an animal)
pub const FEATURE_ANIMAL_CATEGORY: usize = 5;
/// Minimum feature-vector length of a well-formed record
pub const MIN_FEATURES: usize = 6;

/// The fixed animal archetypes, with stable codes 1-14.
///
/// "Not an animal" is represented as `Option::<AnimalCategory>::None`,
/// never as a 15th code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AnimalCategory {
    Bird = 1,
    Eagle = 2,
    Lion = 3,
    Horse = 4,
    Fox = 5,
    Human = 6,
    Bull = 7,
    Duck = 8,
    Deer = 9,
    Butterfly = 10,
    Bear = 11,
    Bat = 12,
    Camel = 13,
    Tiger = 14,
}

impl AnimalCategory {
    pub const ALL: [AnimalCategory; 14] = [
        AnimalCategory::Bird,
        AnimalCategory::Eagle,
        AnimalCategory::Lion,
        AnimalCategory::Horse,
        AnimalCategory::Fox,
        AnimalCategory::Human,
        AnimalCategory::Bull,
        AnimalCategory::Duck,
        AnimalCategory::Deer,
        AnimalCategory::Butterfly,
        AnimalCategory::Bear,
        AnimalCategory::Bat,
        AnimalCategory::Camel,
        AnimalCategory::Tiger,
    ];

    #[inline]
    #[must_use]
    pub fn code(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AnimalCategory::Bird => "bird",
            AnimalCategory::Eagle => "eagle",
            AnimalCategory::Lion => "lion",
            AnimalCategory::Horse => "horse",
            AnimalCategory::Fox => "fox",
            AnimalCategory::Human => "human",
            AnimalCategory::Bull => "bull",
            AnimalCategory::Duck => "duck",
            AnimalCategory::Deer => "deer",
            AnimalCategory::Butterfly => "butterfly",
            AnimalCategory::Bear => "bear",
            AnimalCategory::Bat => "bat",
            AnimalCategory::Camel => "camel",
            AnimalCategory::Tiger => "tiger",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for AnimalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One known company/logo in the reference corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub name: String,
    pub summary: String,
    /// Ordered category codes: indices 0-3 opaque guideline codes,
    /// index 4 the animal-themed flag, index 5 the animal-category code
    pub features: Vec<u32>,
}

impl ReferenceRecord {
    pub fn validate(&self) -> Result<()> {
        if self.features.len() < MIN_FEATURES {
            return Err(Error::Dataset(format!(
                "record '{}' has {} features, expected at least {}",
                self.name,
                self.features.len(),
                MIN_FEATURES
            )));
        }
        let category = self.features[FEATURE_ANIMAL_CATEGORY];
        if category != 0 && AnimalCategory::from_code(category).is_none() {
            return Err(Error::Dataset(format!(
                "record '{}' has unknown animal-category code {}",
                self.name, category
            )));
        }
        // A record tagged with an animal category must also carry the
        // animal-themed flag.
        if category != 0 && self.features[FEATURE_ANIMAL_FLAG] != 1 {
            return Err(Error::Dataset(format!(
                "record '{}' has animal category {} but is not flagged animal-themed",
                self.name, category
            )));
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn is_animal_themed(&self) -> bool {
        self.features[FEATURE_ANIMAL_FLAG] == 1
    }

    #[inline]
    #[must_use]
    pub fn animal_category(&self) -> Option<AnimalCategory> {
        AnimalCategory::from_code(self.features[FEATURE_ANIMAL_CATEGORY])
    }
}

/// The reference corpus: loaded once at startup, immutable thereafter
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<ReferenceRecord>,
}

impl Corpus {
    pub fn from_records(records: Vec<ReferenceRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::Dataset("reference corpus is empty".to_string()));
        }
        for record in &records {
            record.validate()?;
        }
        Ok(Self { records })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ReferenceRecord> {
        self.records.get(index)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<String> {
        self.records.iter().map(|r| r.summary.clone()).collect()
    }

    #[must_use]
    pub fn feature_labels(&self) -> Vec<Vec<u32>> {
        self.records.iter().map(|r| r.features.clone()).collect()
    }
}
