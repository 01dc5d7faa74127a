/// Standardise how messages are sent into and out of
/// the current control system. Provide test suite to
/// ensure interfaces are respected.
pub mod control {
    /// Planting messages are exchanged with the HMI. They
    /// start and stop a run and report its progress.
    pub mod planting;
}
