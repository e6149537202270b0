use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Named drought bucket with an associated display color.
///
/// The severity classifier only produces five of these (see
/// [`SeverityThresholds::classify`]). The others exist because externally
/// supplied `drought_category` labels are displayed verbatim and still need
/// a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroughtCategory {
    #[serde(rename = "No Drought")]
    NoDrought,
    #[serde(rename = "Slightly Dry")]
    SlightlyDry,
    #[serde(rename = "Mild Drought")]
    MildDrought,
    #[serde(rename = "Moderate Drought")]
    ModerateDrought,
    #[serde(rename = "Severe Drought")]
    SevereDrought,
    #[serde(rename = "Extreme Drought")]
    ExtremeDrought,
    #[serde(rename = "Exceptional Drought")]
    ExceptionalDrought,
    #[serde(rename = "Near Normal")]
    NearNormal,
    #[serde(rename = "Slightly Wet")]
    SlightlyWet,
    #[serde(rename = "Moderate Wet")]
    ModerateWet,
}

/// Color used when a label matches no known category.
pub const UNKNOWN_CATEGORY_COLOR: &str = "#999999";

impl DroughtCategory {
    pub const ALL: [DroughtCategory; 10] = [
        DroughtCategory::NoDrought,
        DroughtCategory::SlightlyDry,
        DroughtCategory::MildDrought,
        DroughtCategory::ModerateDrought,
        DroughtCategory::SevereDrought,
        DroughtCategory::ExtremeDrought,
        DroughtCategory::ExceptionalDrought,
        DroughtCategory::NearNormal,
        DroughtCategory::SlightlyWet,
        DroughtCategory::ModerateWet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DroughtCategory::NoDrought => "No Drought",
            DroughtCategory::SlightlyDry => "Slightly Dry",
            DroughtCategory::MildDrought => "Mild Drought",
            DroughtCategory::ModerateDrought => "Moderate Drought",
            DroughtCategory::SevereDrought => "Severe Drought",
            DroughtCategory::ExtremeDrought => "Extreme Drought",
            DroughtCategory::ExceptionalDrought => "Exceptional Drought",
            DroughtCategory::NearNormal => "Near Normal",
            DroughtCategory::SlightlyWet => "Slightly Wet",
            DroughtCategory::ModerateWet => "Moderate Wet",
        }
    }

    /// Hex fill color for map markers and the results panel.
    pub fn color(&self) -> &'static str {
        match self {
            DroughtCategory::NoDrought => "#4CAF50",
            DroughtCategory::SlightlyDry => "#FFFF00",
            DroughtCategory::MildDrought => "#FFE066",
            DroughtCategory::ModerateDrought => "#FCD37F",
            DroughtCategory::SevereDrought => "#FFAA00",
            DroughtCategory::ExtremeDrought => "#E60000",
            DroughtCategory::ExceptionalDrought => "#730000",
            DroughtCategory::NearNormal => "#C8E6C9",
            DroughtCategory::SlightlyWet => "#AAD7F5",
            DroughtCategory::ModerateWet => "#4A90D9",
        }
    }

    /// Case- and whitespace-insensitive lookup of an external label.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        DroughtCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
    }
}

/// Color for an arbitrary label, falling back to [`UNKNOWN_CATEGORY_COLOR`].
pub fn color_for_label(label: &str) -> &'static str {
    DroughtCategory::from_label(label)
        .map(|c| c.color())
        .unwrap_or(UNKNOWN_CATEGORY_COLOR)
}

impl fmt::Display for DroughtCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DroughtCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DroughtCategory::from_label(s).ok_or_else(|| format!("unknown drought category {s:?}"))
    }
}

pub const DEFAULT_NO_DROUGHT_MAX: f64 = 0.8;
pub const DEFAULT_SLIGHTLY_DRY_MAX: f64 = 1.8;
pub const DEFAULT_MODERATE_DROUGHT_MAX: f64 = 2.8;
pub const DEFAULT_SEVERE_DROUGHT_MAX: f64 = 3.8;

/// Upper-inclusive severity boundaries, evaluated in ascending order.
///
/// The defaults are the relaxed policy that biases toward calmer labels.
/// Anything above `severe_drought` is Extreme Drought.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityThresholds {
    pub no_drought: f64,
    pub slightly_dry: f64,
    pub moderate_drought: f64,
    pub severe_drought: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        SeverityThresholds {
            no_drought: DEFAULT_NO_DROUGHT_MAX,
            slightly_dry: DEFAULT_SLIGHTLY_DRY_MAX,
            moderate_drought: DEFAULT_MODERATE_DROUGHT_MAX,
            severe_drought: DEFAULT_SEVERE_DROUGHT_MAX,
        }
    }
}

impl SeverityThresholds {
    fn bounds(&self) -> [(f64, DroughtCategory); 4] {
        [
            (self.no_drought, DroughtCategory::NoDrought),
            (self.slightly_dry, DroughtCategory::SlightlyDry),
            (self.moderate_drought, DroughtCategory::ModerateDrought),
            (self.severe_drought, DroughtCategory::SevereDrought),
        ]
    }

    /// Map a severity to its category; first upper bound it does not exceed wins.
    pub fn classify(&self, severity: f64) -> DroughtCategory {
        self.bounds()
            .into_iter()
            .find(|(upper, _)| severity <= *upper)
            .map(|(_, category)| category)
            .unwrap_or(DroughtCategory::ExtremeDrought)
    }

    /// Bounds must be finite and strictly ascending.
    pub fn validate(&self) -> Result<(), String> {
        let bounds = self.bounds();
        if let Some((value, category)) = bounds.iter().find(|(v, _)| !v.is_finite()) {
            return Err(format!("threshold for {category} is not finite: {value}"));
        }
        for pair in bounds.windows(2) {
            if pair[0].0 >= pair[1].0 {
                return Err(format!(
                    "thresholds must ascend: {} ({}) >= {} ({})",
                    pair[0].1, pair[0].0, pair[1].1, pair[1].0
                ));
            }
        }
        Ok(())
    }
}
