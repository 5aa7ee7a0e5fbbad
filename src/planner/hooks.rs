//! Interface to the step interpolator.

/// Callbacks into the real-time step interpolator.
///
/// The planner calls [`update`](Self::update) whenever the speed profile of
/// the executing block may have changed, and [`resync`](Self::resync) after
/// a buffer clear. [`rt_position`](Self::rt_position) reports the
/// interpolator's actual position in steps.
pub trait InterpolatorHooks<const N: usize> {
    /// Executing block's exit or top speed changed.
    fn update(&mut self);

    /// Real-time position of every actuator in steps.
    fn rt_position(&self) -> [i32; N];

    /// Buffer was cleared; drop any in-flight segment state.
    fn resync(&mut self);
}

/// Hooks that ignore every call and report the origin as position.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl<const N: usize> InterpolatorHooks<N> for NoopHooks {
    fn update(&mut self) {}

    fn rt_position(&self) -> [i32; N] {
        [0; N]
    }

    fn resync(&mut self) {}
}

impl<const N: usize, H: InterpolatorHooks<N>> InterpolatorHooks<N> for &mut H {
    fn update(&mut self) {
        (**self).update();
    }

    fn rt_position(&self) -> [i32; N] {
        (**self).rt_position()
    }

    fn resync(&mut self) {
        (**self).resync();
    }
}
