use crate::{
    dsp::curve::QuadraticBezier,
    error::{try_alloc_table, BezierError},
};

/*
Arc Length Tables
=================

Sampling a curve at equal steps of t does not give equally spaced points:
the curve speeds up and slows down as t moves. To walk the curve at a
constant speed we first need to know how far along it each t is.

There is no tidy closed form for a Bezier's arc length, so we measure it:

  1. Sample the curve at res + 1 uniform steps of t
  2. Measure the straight-line distance between neighbours
  3. Keep a running sum

    index:    0     1     2     3    ...   res
    t:        0   1/res 2/res 3/res  ...   1.0
    length:   0    d1   d1+d2  ...        total

More segments give a closer approximation of the true length. The table is
non-decreasing by construction: every step adds a distance >= 0.

Inverting this table (length -> t) is the resampler's job; see
`resample.rs`.
*/

/// Cumulative arc length of a curve sampled at `res + 1` uniform steps.
pub struct ArcLengthTable {
    lengths: Vec<f32>,
    total: f32,
}

impl ArcLengthTable {
    /// Allocate an empty table with `res` segments.
    pub fn new(res: usize) -> Result<Self, BezierError> {
        if res == 0 {
            return Err(BezierError::InvalidCurveResolution { res });
        }
        let len = res.checked_add(1).ok_or(BezierError::InvalidCurveResolution { res })?;

        Ok(Self {
            lengths: try_alloc_table(len)?,
            total: 0.0,
        })
    }

    /// Allocate and fill a table for `curve` in one go.
    pub fn from_curve(curve: &QuadraticBezier, res: usize) -> Result<Self, BezierError> {
        let mut table = Self::new(res)?;
        table.build(curve);
        Ok(table)
    }

    /// Re-measure `curve`, overwriting the table in place.
    pub fn build(&mut self, curve: &QuadraticBezier) {
        let res = self.res() as f32;
        let mut prev = curve.start;
        let mut running = 0.0f32;

        for (i, slot) in self.lengths.iter_mut().enumerate() {
            let point = curve.point_at(i as f32 / res);
            running += prev.distance(point);
            *slot = running;
            prev = point;
        }

        self.total = running;
    }

    /// Number of segments (table length minus one).
    pub fn res(&self) -> usize {
        self.lengths.len() - 1
    }

    pub fn lengths(&self) -> &[f32] {
        &self.lengths
    }

    /// Length of the whole curve, equal to the last table entry.
    pub fn total_length(&self) -> f32 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::point::Point2D;

    fn skewed() -> QuadraticBezier {
        QuadraticBezier::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(200.0, 2.0),
            Point2D::new(128.0, 0.0),
        )
    }

    #[test]
    fn zero_resolution_fails_fast() {
        assert_eq!(
            ArcLengthTable::new(0).err(),
            Some(BezierError::InvalidCurveResolution { res: 0 })
        );
    }

    #[test]
    fn starts_at_zero_and_never_decreases() {
        let table = ArcLengthTable::from_curve(&skewed(), 256).unwrap();
        let lengths = table.lengths();

        assert_eq!(lengths.len(), 257);
        assert_eq!(lengths[0], 0.0);
        for pair in lengths.windows(2) {
            assert!(pair[1] >= pair[0], "{} then {}", pair[0], pair[1]);
        }
        assert_eq!(table.total_length(), lengths[256]);
    }

    #[test]
    fn total_matches_independent_segment_sum() {
        let curve = skewed();
        for res in [1, 2, 7, 64, 513] {
            let table = ArcLengthTable::from_curve(&curve, res).unwrap();

            let mut expected = 0.0f64;
            for i in 1..=res {
                let a = curve.point_at((i - 1) as f32 / res as f32);
                let b = curve.point_at(i as f32 / res as f32);
                let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
                expected += (dx * dx + dy * dy).sqrt();
            }

            let actual = table.total_length() as f64;
            assert!(
                (actual - expected).abs() <= expected * 1e-4,
                "res {res}: {actual} vs {expected}"
            );
        }
    }

    #[test]
    fn straight_line_length_is_exact_at_any_resolution() {
        let line = QuadraticBezier::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 4.0),
            Point2D::new(6.0, 8.0),
        );
        let table = ArcLengthTable::from_curve(&line, 1).unwrap();
        assert!((table.total_length() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn rebuild_overwrites_in_place() {
        let mut table = ArcLengthTable::from_curve(&skewed(), 64).unwrap();
        let before = table.total_length();

        let flat = QuadraticBezier::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(32.0, 0.0),
            Point2D::new(64.0, 0.0),
        );
        table.build(&flat);

        assert_eq!(table.res(), 64);
        assert!((table.total_length() - 64.0).abs() < 1e-4);
        assert_ne!(before, table.total_length());
    }
}
