//! Errors returned by tracker operations.

use ascension_logic::bucket::SectionNotSatisfied;
use ascension_logic::expedition::ExpeditionError;
use ascension_logic::requirements::BucketKind;
use ascension_logic::resin::ResinError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    UnknownItem(String),
    UnknownSection { item: String, section: BucketKind },
    SectionNotSatisfied { item: String, section: BucketKind },
    InsufficientResin { needed: u32, available: u32 },
    NoFragileResin,
    CondensedFull,
    UnknownBanner(String),
    Expedition(ExpeditionError),
}

impl TrackerError {
    pub(crate) fn not_satisfied(item: &str, section: BucketKind, _: SectionNotSatisfied) -> Self {
        TrackerError::SectionNotSatisfied {
            item: item.to_string(),
            section,
        }
    }
}

impl From<ResinError> for TrackerError {
    fn from(e: ResinError) -> Self {
        match e {
            ResinError::Insufficient { needed, available } => {
                TrackerError::InsufficientResin { needed, available }
            }
            ResinError::NoFragileResin => TrackerError::NoFragileResin,
            ResinError::CondensedFull => TrackerError::CondensedFull,
        }
    }
}

impl From<ExpeditionError> for TrackerError {
    fn from(e: ExpeditionError) -> Self {
        TrackerError::Expedition(e)
    }
}

impl std::fmt::Display for TrackerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerError::UnknownItem(name) => write!(f, "Unknown item: {}", name),
            TrackerError::UnknownSection { item, section } => {
                write!(f, "{} has no section {:?}", item, section)
            }
            TrackerError::SectionNotSatisfied { item, section } => write!(
                f,
                "Cannot confirm {:?} for {}: materials still missing",
                section, item
            ),
            TrackerError::InsufficientResin { needed, available } => {
                write!(f, "Not enough resin: need {}, have {}", needed, available)
            }
            TrackerError::NoFragileResin => write!(f, "No fragile resin left"),
            TrackerError::CondensedFull => write!(f, "Condensed resin stack is full"),
            TrackerError::UnknownBanner(id) => write!(f, "Unknown banner: {}", id),
            TrackerError::Expedition(e) => write!(f, "Expedition: {}", e),
        }
    }
}

impl std::error::Error for TrackerError {}
