/// Components that coordinate a planting run.
pub mod planting {
    /// HTTP control surface for starting, stopping and polling a run.
    pub mod control;
    /// Active flag and progress of the current run.
    pub mod state;
}

/// Helpful prelude when working with components.
pub mod prelude {
    pub use crate::components::planting::control::*;
    pub use crate::components::planting::state::*;
}
