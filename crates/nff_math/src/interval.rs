/// A closed range of distances along a ray, `[min, max]`.
///
/// Intersections are accepted only when their Euclidean distance from the ray
/// origin lies inside the interval. `max = +inf` means "no far limit".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// An interval with a near limit only.
    pub fn at_least(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// The unit interval used for color channels.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        // Outside bounds
        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_at_least() {
        let interval = Interval::at_least(5.4);

        assert!(!interval.contains(5.3));
        assert!(interval.contains(5.4));
        assert!(interval.contains(1e300));
        assert_eq!(interval.max, f64::INFINITY);
    }

    #[test]
    fn test_interval_clamp() {
        let unit = Interval::UNIT;

        assert_eq!(unit.clamp(-5.0), 0.0);
        assert_eq!(unit.clamp(0.25), 0.25);
        assert_eq!(unit.clamp(1.5), 1.0);
    }

    #[test]
    fn test_interval_universe() {
        let universe = Interval::UNIVERSE;

        assert!(universe.contains(0.0));
        assert!(universe.contains(1e10));
        assert!(universe.contains(-1e10));
    }
}
