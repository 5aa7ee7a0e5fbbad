//! Junction speed model.
//!
//! Pure functions mapping the angle between two consecutive moves to a cap
//! on the squared entry speed of the second one.

use libm::sqrtf;

/// Unit direction of travel in actuator (or cartesian axis) space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirectionVector<const N: usize>(pub [f32; N]);

impl<const N: usize> Default for DirectionVector<N> {
    fn default() -> Self {
        Self([0.0; N])
    }
}

impl<const N: usize> DirectionVector<N> {
    /// Normalize an arbitrary vector. A zero vector stays zero.
    pub fn normalized(v: [f32; N]) -> Self {
        let norm = sqrtf(v.iter().map(|c| c * c).sum::<f32>());
        if !(norm > 0.0) {
            return Self::default();
        }
        let mut out = [0.0; N];
        for (o, c) in out.iter_mut().zip(v.iter()) {
            *o = c / norm;
        }
        Self(out)
    }

    /// Direction of a move given its signed step counts.
    pub fn from_steps(steps: &[i32; N]) -> Self {
        let mut v = [0.0; N];
        for (o, s) in v.iter_mut().zip(steps.iter()) {
            *o = *s as f32;
        }
        Self::normalized(v)
    }

    /// Dot product, the cosine of the angle between two unit vectors.
    pub fn dot(&self, other: &Self) -> f32 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }
}

/// Half-angle tangent of the direction change, `sqrt(1 - cos²) / (1 + cos)`.
///
/// 0 for straight-through motion, growing without bound towards a reversal.
#[inline]
pub fn angle_factor(cos_theta: f32) -> f32 {
    let cos_theta = cos_theta.clamp(-1.0, 1.0);
    sqrtf(1.0 - cos_theta * cos_theta) / (1.0 + cos_theta)
}

/// Squared entry speed cap for a junction.
///
/// `relaxation` is subtracted from the angle factor (continuous-path
/// blending); pass 0 for plain moves. Returns 0 when the junction requires a
/// full stop.
pub fn max_entry_feed_sqr(cos_theta: f32, feed_sqr: f32, prev_feed_sqr: f32, relaxation: f32) -> f32 {
    if !(cos_theta > 0.0) {
        return 0.0;
    }
    let factor = (angle_factor(cos_theta) - relaxation).clamp(0.0, f32::MAX);
    if factor < 1.0 {
        let scale = 1.0 - factor;
        feed_sqr.min(prev_feed_sqr * scale * scale)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_factor_straight_and_right_angle() {
        assert!(angle_factor(1.0).abs() < 1e-6);
        assert!((angle_factor(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_collinear_junction_keeps_feed() {
        let cap = max_entry_feed_sqr(1.0, 400.0, 900.0, 0.0);
        assert!((cap - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_right_angle_is_full_stop() {
        assert_eq!(max_entry_feed_sqr(0.0, 400.0, 400.0, 0.0), 0.0);
    }

    #[test]
    fn test_reversal_is_full_stop() {
        assert_eq!(max_entry_feed_sqr(-1.0, 400.0, 400.0, 0.0), 0.0);
    }

    #[test]
    fn test_45_degree_corner_is_reduced() {
        let cos = core::f32::consts::FRAC_1_SQRT_2;
        let cap = max_entry_feed_sqr(cos, 400.0, 400.0, 0.0);
        assert!(cap > 0.0);
        assert!(cap < 400.0);
    }

    #[test]
    fn test_relaxation_raises_cap() {
        let cos = 0.5;
        let strict = max_entry_feed_sqr(cos, 400.0, 400.0, 0.0);
        let relaxed = max_entry_feed_sqr(cos, 400.0, 400.0, 0.2);
        assert!(relaxed > strict);
    }

    #[test]
    fn test_direction_from_steps() {
        let v = DirectionVector::from_steps(&[3, -4]);
        assert!((v.0[0] - 0.6).abs() < 1e-6);
        assert!((v.0[1] + 0.8).abs() < 1e-6);
        assert!((v.dot(&v) - 1.0).abs() < 1e-6);
        assert_eq!(DirectionVector::<2>::from_steps(&[0, 0]), DirectionVector::default());
    }
}
