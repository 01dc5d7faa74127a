use serde::{Deserialize, Serialize};

/// Parameters the HMI sends along with a start request. They describe the
/// bed that is about to be planted, they are kept for the executor that will
/// eventually consume them and do not change how progress is reported.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlantingParameters {
    /// Bed dimension along the x axis.
    pub x: f64,
    /// Bed dimension along the y axis.
    pub y: f64,
    /// Distance between planted columns.
    pub column_separation: f64,
    /// Distance between seeds in a column.
    pub seed_spacing: f64,
    /// Water is dispensed with each seed.
    #[serde(default)]
    pub dispense_water: bool,
}

impl PlantingParameters {
    /// True when every dimension is strictly positive (and a number).
    pub fn has_positive_dimensions(&self) -> bool {
        [self.x, self.y, self.column_separation, self.seed_spacing]
            .iter()
            .all(|value| *value > 0.0)
    }
}

/// Reply to a start request.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartPlantingResponse {
    pub message: String,
    pub target_progress: u32,
}

/// Reply to a stop request, and the body of the not found reply when
/// progress is requested with no run in progress.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

/// Progress snapshot of the current run.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub current_progress: u32,
    pub target_progress: u32,
}

/// Whether a run is in progress.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlantingStatusResponse {
    pub planting_active: bool,
}
