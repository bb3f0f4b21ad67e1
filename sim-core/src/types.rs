/// Index of a body inside a [`crate::pool::BodyPool`].
///
/// Indices follow birth order and are only stable until the pool shrinks
/// below them.
pub type BodyIndex = usize;

/// Summary of what a single [`crate::simulation::Simulation::step`] did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Bodies born during the resize phase.
    pub spawned: usize,
    /// Bodies removed from the tail during the resize phase.
    pub released: usize,
    /// Resolved body pairs `(i, j)` with `i < j`, in resolution order.
    pub collisions: Vec<(BodyIndex, BodyIndex)>,
}

impl TickReport {
    /// Returns `true` if the tick changed nothing but positions.
    pub fn is_quiet(&self) -> bool {
        self.spawned == 0 && self.released == 0 && self.collisions.is_empty()
    }
}
