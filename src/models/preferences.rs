use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{AppError, AppResult};

/// Kind of outing the user is planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Familia,
    Casal,
    Fitness,
    Amigos,
    Cultura,
    Aventura,
    Relaxamento,
    /// Any activity name this service does not know; searched with the default categories
    #[serde(other)]
    Outro,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Familia => "familia",
            ActivityType::Casal => "casal",
            ActivityType::Fitness => "fitness",
            ActivityType::Amigos => "amigos",
            ActivityType::Cultura => "cultura",
            ActivityType::Aventura => "aventura",
            ActivityType::Relaxamento => "relaxamento",
            ActivityType::Outro => "outro",
        }
    }
}

impl Default for ActivityType {
    fn default() -> Self {
        ActivityType::Outro
    }
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User-selected spending ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetBand {
    #[serde(rename = "gratuito")]
    Free,
    #[serde(rename = "ate-50")]
    UpTo50,
    #[serde(rename = "50-100")]
    From50To100,
    #[serde(rename = "100-200")]
    From100To200,
    #[serde(rename = "200-500")]
    From200To500,
    #[serde(rename = "acima-500")]
    Above500,
}

impl BudgetBand {
    /// Every band, cheapest first
    pub const ALL: [BudgetBand; 6] = [
        BudgetBand::Free,
        BudgetBand::UpTo50,
        BudgetBand::From50To100,
        BudgetBand::From100To200,
        BudgetBand::From200To500,
        BudgetBand::Above500,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetBand::Free => "gratuito",
            BudgetBand::UpTo50 => "ate-50",
            BudgetBand::From50To100 => "50-100",
            BudgetBand::From100To200 => "100-200",
            BudgetBand::From200To500 => "200-500",
            BudgetBand::Above500 => "acima-500",
        }
    }
}

impl Display for BudgetBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for the recommendation endpoint
///
/// Field aliases accept the Portuguese payload keys sent by the browser frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, alias = "localizacao")]
    pub location: Option<String>,
    #[serde(default, alias = "tipoRole")]
    pub activity_type: ActivityType,
    #[serde(alias = "tempoDeslocamento")]
    pub travel_time_minutes: u32,
    pub budget: BudgetBand,
    #[serde(default, alias = "openNow")]
    pub open_now: bool,
}

impl Preferences {
    pub fn validate(&self) -> AppResult<()> {
        if self.travel_time_minutes == 0 {
            return Err(AppError::InvalidInput(
                "travel_time_minutes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
