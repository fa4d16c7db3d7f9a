use core::time::Duration;

/// An in-flight scroll-to animation over the normalized scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTween {
    pub from: f32,
    pub to: f32,
    pub elapsed: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl ScrollTween {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing,
        }
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advances the animation clock and returns the position to apply.
    ///
    /// Once the clock reaches `duration` the exact target is returned.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.is_done() {
            return self.to;
        }
        self.sample()
    }

    pub fn sample(&self) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);
        self.from + (self.to - self.from) * eased
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out with flat tangents at both ends.
    #[default]
    SmoothStep,
    EaseInOutCubic,
    EaseOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
            Self::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easings_hit_both_endpoints() {
        for e in [
            Easing::Linear,
            Easing::SmoothStep,
            Easing::EaseInOutCubic,
            Easing::EaseOutCubic,
        ] {
            assert_eq!(e.sample(0.0), 0.0, "{e:?}");
            assert!((e.sample(1.0) - 1.0).abs() < 1e-6, "{e:?}");
        }
    }

    #[test]
    fn advance_snaps_to_target_when_duration_elapses() {
        let mut tw = ScrollTween::new(1.0, 0.25, Duration::from_millis(100), Easing::Linear);
        let mid = tw.advance(Duration::from_millis(50));
        assert!((mid - 0.625).abs() < 1e-4);
        assert!(!tw.is_done());

        assert_eq!(tw.advance(Duration::from_millis(70)), 0.25);
        assert!(tw.is_done());
    }

    #[test]
    fn zero_duration_resolves_to_target() {
        let mut tw = ScrollTween::new(0.0, 1.0, Duration::ZERO, Easing::SmoothStep);
        assert_eq!(tw.sample(), 1.0);
        assert_eq!(tw.advance(Duration::ZERO), 1.0);
        assert!(tw.is_done());
    }
}
