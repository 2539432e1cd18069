use serde::{Deserialize, Serialize};

use super::weather::Season;

/// Declared growth stage of the user's crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropStage {
    Sowing,
    Vegetative,
    Flowering,
    Maturity,
    Harvest,
    Preparation,
}

impl CropStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropStage::Sowing => "Sowing",
            CropStage::Vegetative => "Vegetative",
            CropStage::Flowering => "Flowering",
            CropStage::Maturity => "Maturity",
            CropStage::Harvest => "Harvest",
            CropStage::Preparation => "Preparation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sowing" => Some(CropStage::Sowing),
            "vegetative" => Some(CropStage::Vegetative),
            "flowering" => Some(CropStage::Flowering),
            "maturity" => Some(CropStage::Maturity),
            "harvest" => Some(CropStage::Harvest),
            "preparation" => Some(CropStage::Preparation),
            _ => None,
        }
    }
}

impl std::fmt::Display for CropStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User-declared crop context. The crop name is an opaque free-text key;
/// unknown crops use the same generic rule set as known ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CropContext {
    pub name: Option<String>,
    pub stage: Option<CropStage>,
}

impl CropContext {
    pub fn new(name: impl Into<String>, stage: CropStage) -> Self {
        Self {
            name: Some(name.into()),
            stage: Some(stage),
        }
    }

    /// A crop is declared only when both name and stage are present.
    /// Stage-specific rules are skipped, not errored, otherwise.
    pub fn is_declared(&self) -> bool {
        self.name.is_some() && self.stage.is_some()
    }

    pub fn declared_stage(&self) -> Option<CropStage> {
        if self.is_declared() {
            self.stage
        } else {
            None
        }
    }
}

/// Reference metadata for common Indian field crops.
///
/// Not consulted by the rule engine - rules are generic across crops. Kept
/// for display and for potential per-crop specialization later.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CropInfo {
    pub name: &'static str,
    pub season: Season,
    pub duration_days: u32,
}

pub const KNOWN_CROPS: &[CropInfo] = &[
    CropInfo {
        name: "Rice",
        season: Season::Kharif,
        duration_days: 120,
    },
    CropInfo {
        name: "Wheat",
        season: Season::Rabi,
        duration_days: 140,
    },
    CropInfo {
        name: "Cotton",
        season: Season::Kharif,
        duration_days: 180,
    },
    CropInfo {
        name: "Sugarcane",
        season: Season::Kharif,
        duration_days: 365,
    },
    CropInfo {
        name: "Maize",
        season: Season::Kharif,
        duration_days: 100,
    },
    CropInfo {
        name: "Mustard",
        season: Season::Rabi,
        duration_days: 110,
    },
    CropInfo {
        name: "Groundnut",
        season: Season::Kharif,
        duration_days: 105,
    },
    CropInfo {
        name: "Moong",
        season: Season::Zaid,
        duration_days: 65,
    },
];

pub fn lookup_crop(name: &str) -> Option<&'static CropInfo> {
    KNOWN_CROPS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_stage_from_str_valid() {
        assert_eq!(CropStage::from_str("Sowing"), Some(CropStage::Sowing));
        assert_eq!(CropStage::from_str("vegetative"), Some(CropStage::Vegetative));
        assert_eq!(CropStage::from_str("FLOWERING"), Some(CropStage::Flowering));
        assert_eq!(CropStage::from_str("maturity"), Some(CropStage::Maturity));
        assert_eq!(CropStage::from_str("harvest"), Some(CropStage::Harvest));
        assert_eq!(
            CropStage::from_str("preparation"),
            Some(CropStage::Preparation)
        );
    }

    #[test]
    fn crop_stage_from_str_invalid() {
        assert_eq!(CropStage::from_str("germination"), None);
        assert_eq!(CropStage::from_str(""), None);
    }

    #[test]
    fn crop_context_declared_requires_both_fields() {
        let full = CropContext::new("Rice", CropStage::Flowering);
        assert!(full.is_declared());
        assert_eq!(full.declared_stage(), Some(CropStage::Flowering));

        let name_only = CropContext {
            name: Some("Rice".into()),
            stage: None,
        };
        assert!(!name_only.is_declared());
        assert_eq!(name_only.declared_stage(), None);

        let stage_only = CropContext {
            name: None,
            stage: Some(CropStage::Sowing),
        };
        assert!(!stage_only.is_declared());
        assert_eq!(stage_only.declared_stage(), None);

        assert!(!CropContext::default().is_declared());
    }

    #[test]
    fn lookup_crop_case_insensitive() {
        assert!(lookup_crop("rice").is_some());
        assert!(lookup_crop("  Wheat ").is_some());
        assert!(lookup_crop("quinoa").is_none());
    }
}
