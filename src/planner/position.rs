//! Committed planner position.

/// Absolute position of every actuator at the end of the newest planned move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepPosition<const N: usize> {
    steps: [i32; N],
}

impl<const N: usize> Default for StepPosition<N> {
    fn default() -> Self {
        Self { steps: [0; N] }
    }
}

impl<const N: usize> StepPosition<N> {
    /// Get all step counts.
    #[inline]
    pub fn steps(&self) -> [i32; N] {
        self.steps
    }

    /// Replace the position.
    #[inline]
    pub fn set(&mut self, steps: [i32; N]) {
        self.steps = steps;
    }
}
