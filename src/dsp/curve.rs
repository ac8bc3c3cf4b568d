use crate::{dsp::point::Point2D, error::BezierError, END_X_SCALE};

/*
Quadratic Bezier Curves
=======================

A quadratic Bezier curve is pulled between two endpoints by a single
control point. It never touches the control point (except in degenerate
cases); the control point only bends the path toward itself.

Vocabulary
----------

  start, end   The curve's endpoints. t = 0 is the start, t = 1 the end.

  control      The point that bends the curve. Moving it sideways skews
               the hump; moving it up or down makes the hump taller.

  t            Curve parameter in 0.0..=1.0. Equal steps in t are NOT equal
               steps along the curve: points bunch up where the curve
               moves slowly. See `arc_length.rs` for why that matters.


The Formula
-----------

    B(t) = (1-t)^2 * start + 2(1-t)t * control + t^2 * end

De Casteljau's construction reaches the same point with nothing but
linear interpolation:

    q0 = lerp(start, control, t)
    q1 = lerp(control, end, t)
    B(t) = lerp(q0, q1, t)


The Waveform Curve
------------------

For the oscillator the curve lives in table space:

      y
    1.0 ┤        ___
        │      /     \        control = (shape * half, control_y)
        │    /         \
    0.0 ┼──/─────────────\──→ x
      start            end = (half * 0.5, 0)

With control_y = 2.0 the hump peaks at exactly 1.0. The shape control
slides the control point along x, leaning the hump forward or back. The
end point sits at half of the half-table width; once resampled and
mirrored, this hump becomes the positive half of one cycle.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub start: Point2D,
    pub control: Point2D,
    pub end: Point2D,
}

impl QuadraticBezier {
    pub const fn new(start: Point2D, control: Point2D, end: Point2D) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Build the waveform hump for a half table of `half` samples.
    ///
    /// `shape` is the normalized control (0.0..=1.0), scaled to `0..=half`.
    pub fn waveform(half: usize, shape: f32, control_y: f32) -> Self {
        let half = half as f32;
        Self {
            start: Point2D::ORIGIN,
            control: Point2D::new(shape * half, control_y),
            end: Point2D::new(half * END_X_SCALE, 0.0),
        }
    }

    /// Evaluate the curve at `t` using the Bernstein polynomial form.
    #[inline]
    pub fn point_at(&self, t: f32) -> Point2D {
        let u = 1.0 - t;
        let uu = u * u;
        let ut2 = 2.0 * u * t;
        let tt = t * t;

        Point2D::new(
            uu * self.start.x + ut2 * self.control.x + tt * self.end.x,
            uu * self.start.y + ut2 * self.control.y + tt * self.end.y,
        )
    }

    /// Y coordinate only; the resampler never needs X.
    #[inline]
    pub fn y_at(&self, t: f32) -> f32 {
        let u = 1.0 - t;
        u * u * self.start.y + 2.0 * u * t * self.control.y + t * t * self.end.y
    }

    /// Evaluate the curve at `t` by repeated linear interpolation.
    pub fn de_casteljau(&self, t: f32) -> Point2D {
        let q0 = self.start + (self.control - self.start) * t;
        let q1 = self.control + (self.end - self.control) * t;
        q0 + (q1 - q0) * t
    }

    /// Fill `xs`/`ys` with points at uniform parameter steps `t = i / len`.
    ///
    /// The last slot lands one step short of the end point, so the buffers
    /// describe one period that can be read cyclically.
    pub fn sample_uniform(&self, xs: &mut [f32], ys: &mut [f32]) -> Result<(), BezierError> {
        if xs.len() != ys.len() {
            return Err(BezierError::BufferSize {
                expected: xs.len(),
                actual: ys.len(),
            });
        }

        let len = xs.len() as f32;
        for (i, (x, y)) in xs.iter_mut().zip(ys.iter_mut()).enumerate() {
            let point = self.de_casteljau(i as f32 / len);
            *x = point.x;
            *y = point.y;
        }

        Ok(())
    }
}
