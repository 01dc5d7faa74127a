use crate::messages::control::planting::{PlantingParameters, ProgressResponse};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Target reported before the first run has been started.
pub const INITIAL_TARGET_PROGRESS: u32 = 100;

/// Target assigned on every start.
// TODO: Replace with the total number of instructions in the planting file
//       once the executor pushes it into this state.
pub const START_TARGET_PROGRESS: u32 = 90;

/// The two states a planting run can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantingPhase {
    Inactive,
    Active,
}

/// State shared by every request to the planting control component. It is
/// only ever touched while holding the component lock, so the active flag
/// and the progress pair are always observed together.
#[derive(Debug)]
pub struct PlantingState {
    /// Whether a run is in progress.
    active: bool,
    /// Units of work completed in the current run.
    // NOTE: Nothing increments this yet, the executor will report the number
    //       of instructions it has run.
    current_progress: u32,
    /// Units of work expected for the current run.
    target_progress: u32,
    /// Parameters sent with the most recent start, if any.
    parameters: Option<PlantingParameters>,
    /// When the current run was started.
    started_at: Option<DateTime<Utc>>,
}

impl Default for PlantingState {
    fn default() -> Self {
        Self {
            active: false,
            current_progress: 0,
            target_progress: INITIAL_TARGET_PROGRESS,
            parameters: None,
            started_at: None,
        }
    }
}

impl PlantingState {
    /// Fresh state, no run in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run. Starting while already active resets the progress and
    /// the target again, it is never rejected.
    ///
    /// * `parameters`: optional parameters sent by the HMI.
    pub fn start(&mut self, parameters: Option<PlantingParameters>) -> u32 {
        if let Some(ref params) = parameters {
            if !params.has_positive_dimensions() {
                warn!(?params, "Planting started with non positive dimensions");
            }
        }
        if self.active {
            info!("Planting restarted while a run was in progress");
        }

        self.active = true;
        self.current_progress = 0;
        self.target_progress = START_TARGET_PROGRESS;
        self.parameters = parameters;
        self.started_at = Some(Utc::now());

        info!(target_progress = self.target_progress, "Planting started");
        self.target_progress
    }

    /// Stop the run. The target is left as it was so the last value is kept
    /// until the next start.
    pub fn stop(&mut self) {
        match self.started_at.take() {
            Some(started_at) if self.active => {
                let elapsed = Utc::now() - started_at;
                info!(
                    elapsed_seconds = elapsed.num_seconds(),
                    current_progress = self.current_progress,
                    "Planting stopped"
                );
            }
            _ => info!("Planting stop requested with no run in progress"),
        }

        self.active = false;
        self.current_progress = 0;
        self.parameters = None;
    }

    /// Snapshot of the progress, `None` when no run is in progress.
    pub fn progress(&self) -> Option<ProgressResponse> {
        self.active.then_some(ProgressResponse {
            current_progress: self.current_progress,
            target_progress: self.target_progress,
        })
    }

    /// Whether a run is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> PlantingPhase {
        if self.active {
            PlantingPhase::Active
        } else {
            PlantingPhase::Inactive
        }
    }

    pub fn current_progress(&self) -> u32 {
        self.current_progress
    }

    pub fn target_progress(&self) -> u32 {
        self.target_progress
    }

    /// Parameters of the current run.
    pub fn parameters(&self) -> Option<&PlantingParameters> {
        self.parameters.as_ref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parameters() -> PlantingParameters {
        PlantingParameters {
            x: 2.0,
            y: 4.0,
            column_separation: 0.5,
            seed_spacing: 0.1,
            dispense_water: true,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = PlantingState::new();
        assert_eq!(state.phase(), PlantingPhase::Inactive);
        assert_eq!(state.current_progress(), 0);
        assert_eq!(state.target_progress(), INITIAL_TARGET_PROGRESS);
        assert!(state.progress().is_none());
        assert!(state.parameters().is_none());
        assert!(state.started_at().is_none());
    }

    #[test]
    fn test_start_sets_placeholder_target() {
        let mut state = PlantingState::new();
        let target = state.start(None);

        assert_eq!(target, START_TARGET_PROGRESS);
        assert!(state.is_active());
        assert!(state.started_at().is_some());
        assert_eq!(
            state.progress(),
            Some(ProgressResponse {
                current_progress: 0,
                target_progress: 90,
            })
        );
    }

    #[test]
    fn test_stop_keeps_target() {
        let mut state = PlantingState::new();
        state.start(Some(parameters()));
        state.stop();

        assert_eq!(state.phase(), PlantingPhase::Inactive);
        assert_eq!(state.current_progress(), 0);
        assert_eq!(state.target_progress(), START_TARGET_PROGRESS);
        assert!(state.progress().is_none());
        assert!(state.parameters().is_none());
        assert!(state.started_at().is_none());
    }

    #[test]
    fn test_stop_before_any_start_keeps_initial_target() {
        let mut state = PlantingState::new();
        state.stop();
        assert_eq!(state.target_progress(), INITIAL_TARGET_PROGRESS);
        assert!(!state.is_active());
    }

    #[test]
    fn test_start_replaces_parameters() {
        let mut state = PlantingState::new();
        state.start(Some(parameters()));
        assert_eq!(state.parameters(), Some(&parameters()));

        state.start(None);
        assert!(state.parameters().is_none());
    }

    #[test]
    fn test_non_positive_parameters_are_kept() {
        let mut state = PlantingState::new();
        let mut params = parameters();
        params.seed_spacing = 0.0;
        state.start(Some(params.clone()));

        assert!(state.is_active());
        assert_eq!(state.parameters(), Some(&params));
    }

    #[rstest]
    #[case(vec![true, true], true)]
    #[case(vec![false, false], false)]
    #[case(vec![true, false, true, true], true)]
    #[case(vec![false, true, true, false, false], false)]
    /// Any sequence of starts (true) and stops (false) ends in the state of
    /// the last call, with the progress reset.
    fn test_transition_sequences(#[case] calls: Vec<bool>, #[case] active: bool) {
        let mut state = PlantingState::new();
        for start in calls {
            if start {
                state.start(None);
            } else {
                state.stop();
            }
            assert_eq!(state.current_progress(), 0);
        }
        assert_eq!(state.is_active(), active);
        assert_eq!(state.progress().is_some(), active);
        if active {
            assert_eq!(state.target_progress(), START_TARGET_PROGRESS);
        }
    }
}
