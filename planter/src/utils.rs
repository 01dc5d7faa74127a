/// Helpers for locating files used by tests.
pub mod tests;
