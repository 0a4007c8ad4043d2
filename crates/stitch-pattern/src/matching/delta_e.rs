//! CIE76 color difference and quality buckets.

use serde::Serialize;

use crate::color::Lab;

/// Upper bound (exclusive) of the [`MatchQuality::Excellent`] bucket.
const EXCELLENT_BELOW: f64 = 2.0;
/// Upper bound (exclusive) of the [`MatchQuality::Good`] bucket.
const GOOD_BELOW: f64 = 5.0;

/// CIE76 Delta E: Euclidean distance between two Lab colors.
///
/// # Example
///
/// ```
/// use stitch_pattern::{delta_e, Lab};
///
/// let d = delta_e(Lab::new(50.0, 0.0, 0.0), Lab::new(51.0, 0.0, 0.0));
/// assert_eq!(d, 1.0);
/// ```
#[inline]
pub fn delta_e(lab1: Lab, lab2: Lab) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// How close a matched thread is to the requested color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    /// Delta E below 2.0, barely perceptible
    Excellent,
    /// Delta E below 5.0
    Good,
    /// Anything further away
    Acceptable,
}

impl MatchQuality {
    /// Bucket a Delta E distance.
    pub fn from_distance(distance: f64) -> Self {
        if distance < EXCELLENT_BELOW {
            Self::Excellent
        } else if distance < GOOD_BELOW {
            Self::Good
        } else {
            Self::Acceptable
        }
    }

    /// Lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Acceptable => "acceptable",
        }
    }
}

impl std::fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_e_identity_and_unit_step() {
        let a = Lab::new(42.0, 10.0, -5.0);
        assert_eq!(delta_e(a, a), 0.0);
        assert_eq!(delta_e(Lab::new(50.0, 0.0, 0.0), Lab::new(51.0, 0.0, 0.0)), 1.0);
        assert_eq!(delta_e(Lab::new(0.0, 3.0, 0.0), Lab::new(0.0, 0.0, 4.0)), 5.0);
    }

    #[test]
    fn test_delta_e_symmetric_and_triangle() {
        let samples = [
            Lab::new(10.0, 20.0, 30.0),
            Lab::new(55.0, -40.0, 12.0),
            Lab::new(90.0, 1.0, -60.0),
            Lab::new(0.0, 0.0, 0.0),
        ];
        for &x in &samples {
            for &y in &samples {
                assert_eq!(delta_e(x, y), delta_e(y, x));
                for &z in &samples {
                    assert!(delta_e(x, z) <= delta_e(x, y) + delta_e(y, z) + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_quality_buckets() {
        assert_eq!(MatchQuality::from_distance(0.0), MatchQuality::Excellent);
        assert_eq!(MatchQuality::from_distance(1.5), MatchQuality::Excellent);
        assert_eq!(MatchQuality::from_distance(2.0), MatchQuality::Good);
        assert_eq!(MatchQuality::from_distance(3.0), MatchQuality::Good);
        assert_eq!(MatchQuality::from_distance(5.0), MatchQuality::Acceptable);
        assert_eq!(MatchQuality::from_distance(7.0), MatchQuality::Acceptable);
    }

    #[test]
    fn test_quality_display() {
        assert_eq!(MatchQuality::Good.to_string(), "good");
    }
}
