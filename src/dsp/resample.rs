use crate::{
    dsp::{arc_length::ArcLengthTable, curve::QuadraticBezier, point::Point2D},
    error::BezierError,
};

/*
Equidistant Resampling
======================

Given an arc length table (t -> distance along the curve) we want the
inverse: for a distance, which t reaches it? Sampling the curve at those
t values gives points spaced evenly ALONG the curve.

For output slot i of n:

    wanted = i / (n - 1) * total_length

  1. Walk a cursor forward through the table until the entry at the cursor
     reaches `wanted`. Targets only grow from slot to slot, so the cursor
     never moves back and the whole pass touches each entry once.
  2. The target now lies between entries cursor-1 and cursor. Interpolate
     linearly between them to get a fractional table index.
  3. index / res is the curve parameter t.

    lengths:  0.0   1.9   3.7   5.4   7.0
                          ^  wanted = 4.5
                          cursor-1 = 2, cursor = 3
    index = 2 + (4.5 - 3.7) / (5.4 - 3.7) = 2.47  ->  t = 2.47 / res

The first and last slots are the curve's own endpoints and are never
searched for. The cursor stops at `res`, so rounding at the top of the
table can't push it past the last entry.
*/

/// Linear remap of `value` from one range to another, clamped to the target.
///
/// An empty source range maps everything to `to_low`.
#[inline]
pub fn map_range(value: f32, from_low: f32, from_high: f32, to_low: f32, to_high: f32) -> f32 {
    let span = from_high - from_low;
    if span == 0.0 {
        return to_low;
    }
    let mapped = (value - from_low) / span * (to_high - to_low) + to_low;
    mapped.clamp(to_low.min(to_high), to_low.max(to_high))
}

/// Produces `how_many` samples spaced at equal arc length along a curve.
#[derive(Debug, Clone, Copy)]
pub struct EquidistantResampler {
    how_many: usize,
}

impl EquidistantResampler {
    pub fn new(how_many: usize) -> Result<Self, BezierError> {
        if how_many <= 1 {
            return Err(BezierError::InvalidSampleCount { how_many });
        }
        Ok(Self { how_many })
    }

    pub fn how_many(&self) -> usize {
        self.how_many
    }

    /// Write the Y coordinate of every equidistant point into `out`.
    ///
    /// Allocation-free. Only the first `how_many` samples of `out` are written.
    ///
    /// # Panics
    ///
    /// If `out` is shorter than `how_many`, or `arc` is not a table built
    /// for `curve`. [`resample_y`] sizes the resampler from `out` instead.
    pub fn resample_into(&self, curve: &QuadraticBezier, arc: &ArcLengthTable, out: &mut [f32]) {
        let out = &mut out[..self.how_many];
        let last = self.how_many - 1;

        out[0] = curve.start.y;
        out[last] = curve.end.y;
        self.for_each_parameter(arc, |i, t| out[i] = curve.y_at(t));
    }

    /// Full 2D equidistant points, endpoints included.
    pub fn points(&self, curve: &QuadraticBezier, arc: &ArcLengthTable) -> Vec<Point2D> {
        let mut points = vec![Point2D::ORIGIN; self.how_many];
        points[0] = curve.start;
        points[self.how_many - 1] = curve.end;
        self.for_each_parameter(arc, |i, t| points[i] = curve.point_at(t));
        points
    }

    /// Call `f(slot, t)` for every interior slot, in increasing slot order.
    fn for_each_parameter(&self, arc: &ArcLengthTable, mut f: impl FnMut(usize, f32)) {
        let lengths = arc.lengths();
        let res = arc.res();
        let total = arc.total_length();
        let denom = (self.how_many - 1) as f32;

        let mut cursor = 1;
        for i in 1..self.how_many - 1 {
            let wanted = (i as f32 / denom) * total;

            while cursor < res && wanted > lengths[cursor] {
                cursor += 1;
            }

            let prev = cursor - 1;
            let index = map_range(
                wanted,
                lengths[prev],
                lengths[cursor],
                prev as f32,
                cursor as f32,
            );

            f(i, index / res as f32);
        }
    }
}

/// Checked convenience wrapper: resample into a buffer of any length >= 2.
pub fn resample_y(
    curve: &QuadraticBezier,
    arc: &ArcLengthTable,
    out: &mut [f32],
) -> Result<(), BezierError> {
    EquidistantResampler::new(out.len())?.resample_into(curve, arc, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_hump() -> QuadraticBezier {
        // x is monotonic in t, so chords approximate arcs well
        QuadraticBezier::waveform(512, 0.25, 2.0)
    }

    #[test]
    fn map_range_interpolates_and_clamps() {
        assert!((map_range(5.0, 0.0, 10.0, 2.0, 3.0) - 2.5).abs() < 1e-6);
        assert_eq!(map_range(20.0, 0.0, 10.0, 2.0, 3.0), 3.0);
        assert_eq!(map_range(-5.0, 0.0, 10.0, 2.0, 3.0), 2.0);
        // descending target range still clamps
        assert_eq!(map_range(20.0, 0.0, 10.0, 3.0, 2.0), 2.0);
        assert_eq!(map_range(1.0, 4.0, 4.0, 7.0, 8.0), 7.0);
    }

    #[test]
    fn rejects_fewer_than_two_samples() {
        assert_eq!(
            EquidistantResampler::new(1).err(),
            Some(BezierError::InvalidSampleCount { how_many: 1 })
        );
        assert!(EquidistantResampler::new(0).is_err());
        let mut out = [0.0f32; 1];
        let curve = forward_hump();
        let arc = ArcLengthTable::from_curve(&curve, 16).unwrap();
        assert!(resample_y(&curve, &arc, &mut out).is_err());
    }

    #[test]
    fn endpoints_are_fixed() {
        let curve = forward_hump();
        let arc = ArcLengthTable::from_curve(&curve, 512).unwrap();
        let points = EquidistantResampler::new(16).unwrap().points(&curve, &arc);

        assert_eq!(points.len(), 16);
        assert_eq!(points[0], curve.start);
        assert_eq!(points[15], curve.end);
    }

    #[test]
    fn two_samples_are_just_the_endpoints() {
        let curve = forward_hump();
        let arc = ArcLengthTable::from_curve(&curve, 8).unwrap();
        let mut out = [9.0f32; 2];
        resample_y(&curve, &arc, &mut out).unwrap();
        assert_eq!(out, [curve.start.y, curve.end.y]);
    }

    #[test]
    fn neighbours_are_equally_spaced_along_the_curve() {
        let curve = forward_hump();
        let arc = ArcLengthTable::from_curve(&curve, 4096).unwrap();

        for how_many in [3, 17, 64] {
            let points = EquidistantResampler::new(how_many)
                .unwrap()
                .points(&curve, &arc);
            let step = arc.total_length() / (how_many - 1) as f32;

            for pair in points.windows(2) {
                let gap = pair[0].distance(pair[1]);
                assert!(
                    (gap - step).abs() <= step * 0.01,
                    "how_many {how_many}: gap {gap} vs {step}"
                );
            }
        }
    }

    /// Length along `curve` between two parameters, by a dense chord sum.
    fn arc_between(curve: &QuadraticBezier, t0: f32, t1: f32) -> f64 {
        const STEPS: usize = 256;
        let mut prev = curve.point_at(t0);
        let mut length = 0.0f64;
        for k in 1..=STEPS {
            let point = curve.point_at(t0 + (t1 - t0) * k as f32 / STEPS as f32);
            length += prev.distance(point) as f64;
            prev = point;
        }
        length
    }

    /// Largest relative deviation of the gaps between `ts` from `step`.
    fn worst_gap_error(curve: &QuadraticBezier, ts: &[f32], step: f64) -> f64 {
        ts.windows(2)
            .map(|pair| (arc_between(curve, pair[0], pair[1]) - step).abs() / step)
            .fold(0.0, f64::max)
    }

    #[test]
    fn skewed_curve_is_walked_at_equal_arc_length() {
        // Control point well past the end: the curve runs out fast, turns and
        // crawls back, so equal steps in t are far from equal steps in length
        let curve = QuadraticBezier::waveform(512, 0.9, 2.0);
        let arc = ArcLengthTable::from_curve(&curve, 4096).unwrap();
        let how_many = 64;
        let step = arc.total_length() as f64 / (how_many - 1) as f64;

        let mut ts = vec![0.0f32; how_many];
        ts[how_many - 1] = 1.0;
        EquidistantResampler::new(how_many)
            .unwrap()
            .for_each_parameter(&arc, |i, t| ts[i] = t);
        assert!(ts.windows(2).all(|pair| pair[0] < pair[1]));

        let resampled = worst_gap_error(&curve, &ts, step);
        assert!(resampled < 0.02, "resampled gaps off by {resampled}");

        let uniform: Vec<f32> = (0..how_many)
            .map(|i| i as f32 / (how_many - 1) as f32)
            .collect();
        let naive = worst_gap_error(&curve, &uniform, step);
        assert!(naive > 0.25, "uniform t gaps only off by {naive}");
    }

    #[test]
    fn uniform_speed_curve_resamples_to_uniform_t() {
        // Control at the chord midpoint: B(t) moves at constant speed
        let line = QuadraticBezier::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(50.0, 1.0),
            Point2D::new(100.0, 2.0),
        );
        let arc = ArcLengthTable::from_curve(&line, 100).unwrap();
        let mut out = vec![0.0; 11];
        resample_y(&line, &arc, &mut out).unwrap();

        for (i, y) in out.iter().enumerate() {
            let expected = i as f32 * 0.2;
            assert!((y - expected).abs() < 1e-4, "slot {i}: {y} vs {expected}");
        }
    }

    #[test]
    fn y_values_match_full_points() {
        let curve = QuadraticBezier::waveform(256, 0.9, 2.0);
        let arc = ArcLengthTable::from_curve(&curve, 256).unwrap();
        let resampler = EquidistantResampler::new(256).unwrap();

        let mut ys = vec![0.0; 256];
        resampler.resample_into(&curve, &arc, &mut ys);
        let points = resampler.points(&curve, &arc);

        for (y, p) in ys.iter().zip(&points) {
            assert_eq!(*y, p.y);
        }
    }

    #[test]
    #[should_panic]
    fn short_output_buffer_panics() {
        let curve = forward_hump();
        let arc = ArcLengthTable::from_curve(&curve, 64).unwrap();
        let mut out = [0.0f32; 15];
        EquidistantResampler::new(16)
            .unwrap()
            .resample_into(&curve, &arc, &mut out);
    }

    #[test]
    fn last_slot_search_stays_inside_the_table() {
        // Many more outputs than segments: targets near the top crowd the
        // final entry, where rounding can leave a target above it
        let curve = QuadraticBezier::waveform(64, 1.0, 2.0);
        let arc = ArcLengthTable::from_curve(&curve, 3).unwrap();
        let mut out = vec![0.0; 200];
        resample_y(&curve, &arc, &mut out).unwrap();
        assert!(out.iter().all(|y| y.is_finite()));
    }
}
