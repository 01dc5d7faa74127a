/*!
The planter control system follows the same component pattern as the rest of the
machine: each component owns its state, and a controller unit struct drives it.
The planting control component is the point the HMI talks to when starting,
stopping and following a planting run.
*/

/// Components in the system are logical units that perform some function
/// for the overall control system.
pub mod components;
/// Errors raised by components and returned to HTTP clients.
pub mod errors;
/// Tracing setup shared by the system binaries.
pub mod logging;
/// Message structure for communication into and out of the
/// control system, such as the requests sent by the HMI.
pub mod messages;
/// Development utilities.
pub mod utils;
