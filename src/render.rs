//! Headless rendering of samples and the decision boundary.
//!
//! Everything here only reads a [`Perceptron`]; training never calls into it.

use num_traits::Float;

use crate::common_types::Sample;
use crate::perceptron::Perceptron;

/// Below this, the boundary `w0*x + w1*y + b = 0` is treated as vertical and
/// not drawn.
pub const MIN_Y_WEIGHT: f64 = 1e-6;

/// A pixel grid onto which data space `[-1, 1] x [-1, 1]` is projected,
/// with `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    pub fn to_screen(&self, x: f64, y: f64) -> (i32, i32) {
        let sx = (x + 1.0) * 0.5 * self.width as f64;
        let sy = (1.0 - (y + 1.0) * 0.5) * self.height as f64;
        (sx as i32, sy as i32)
    }
}

/// Screen-space segment of the decision boundary, clipped to the data square
/// `[-1, 1] x [-1, 1]`. `None` for a (near) vertical boundary, a boundary that
/// misses the square, or a model that is not 2-D.
pub fn boundary_segment<F: Float>(
    viewport: &Viewport,
    perceptron: &Perceptron<F>,
) -> Option<((i32, i32), (i32, i32))> {
    let [w0, w1] = match perceptron.weights() {
        [w0, w1] => [w0.to_f64()?, w1.to_f64()?],
        _ => return None,
    };
    let b = perceptron.bias().to_f64()?;
    if w1.abs() <= MIN_Y_WEIGHT {
        return None;
    }

    // crossings of w0*x + w1*y + b = 0 with the four edges of the square
    let mut crossings = vec![(-1.0, -(b - w0) / w1), (1.0, -(b + w0) / w1)];
    if w0 != 0.0 {
        crossings.push((-(b - w1) / w0, -1.0));
        crossings.push((-(b + w1) / w0, 1.0));
    }
    let inside = |v: f64| {
        v.is_finite() && (-1.0 - EDGE_TOLERANCE..=1.0 + EDGE_TOLERANCE).contains(&v)
    };
    let clamp = |v: f64| v.clamp(-1.0, 1.0);
    let mut on_square = crossings
        .into_iter()
        .filter(|&(x, y)| inside(x) && inside(y))
        .map(|(x, y)| (clamp(x), clamp(y)));

    let first = on_square.next()?;
    // the line is not vertical, so its extent along x picks the two ends
    let (start, end) = on_square.fold((first, first), |(lo, hi), p| {
        (if p.0 < lo.0 { p } else { lo }, if p.0 > hi.0 { p } else { hi })
    });
    Some((
        viewport.to_screen(start.0, start.1),
        viewport.to_screen(end.0, end.1),
    ))
}

const EDGE_TOLERANCE: f64 = 1e-9;

fn cell_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Character grid used to draw one frame.
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    viewport: Viewport,
    cells: Vec<char>,
}

impl AsciiCanvas {
    pub const EMPTY: char = ' ';
    pub const BOUNDARY: char = '.';
    pub const NEGATIVE: char = 'o';
    pub const POSITIVE: char = 'x';

    /// # Panics
    /// Panics if either dimension is 0.
    pub fn new(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            panic!("Canvas dimensions must be greater than 0.");
        }
        AsciiCanvas {
            viewport: Viewport::new(width, height),
            cells: vec![Self::EMPTY; cell_count(width, height)],
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn clear(&mut self) {
        self.cells.fill(Self::EMPTY);
    }

    /// Character at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<char> {
        if x < self.viewport.width && y < self.viewport.height {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.viewport.width as usize + x as usize
    }

    fn plot(&mut self, x: i32, y: i32, c: char) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x < self.viewport.width && y < self.viewport.height {
            let idx = self.index(x, y);
            self.cells[idx] = c;
        }
    }

    /// Rasterizes a segment; off-canvas cells are clipped.
    fn line(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), c: char) {
        let (dx, dy) = (x1 as i64 - x0 as i64, y1 as i64 - y0 as i64);
        let steps = dx.abs().max(dy.abs()).max(1);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = x0 as f64 + t * dx as f64;
            let y = y0 as f64 + t * dy as f64;
            self.plot(x.round() as i32, y.round() as i32, c);
        }
    }

    /// Draws one frame: the decision boundary first, then the samples on top.
    /// Only the first two features of each sample are plotted.
    pub fn draw<F: Float>(&mut self, samples: &[Sample<F>], perceptron: &Perceptron<F>) {
        self.clear();
        if let Some((start, end)) = boundary_segment(&self.viewport, perceptron) {
            self.line(start, end, Self::BOUNDARY);
        }
        for s in samples {
            let (Some(x), Some(y)) = (
                s.features.first().and_then(|v| v.to_f64()),
                s.features.get(1).and_then(|v| v.to_f64()),
            ) else {
                continue;
            };
            let (sx, sy) = self.viewport.to_screen(x, y);
            let c = if s.label == 1 { Self::POSITIVE } else { Self::NEGATIVE };
            self.plot(sx, sy, c);
        }
    }

    /// A full terminal frame: clear screen and cursor home, the canvas, then
    /// `status` below it.
    pub fn terminal_frame(&self, status: &str) -> String {
        format!("\x1b[2J\x1b[H{}{status}\n", self.render())
    }

    /// The canvas as text, one line per row.
    pub fn render(&self) -> String {
        let mut out =
            String::with_capacity(self.cells.len() + self.viewport.height as usize);
        for row in self.cells.chunks(self.viewport.width as usize) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_types::DataPoint;

    #[test]
    fn test_to_screen_corners() {
        let v = Viewport::new(800, 600);
        assert_eq!(v.to_screen(-1.0, 1.0), (0, 0));
        assert_eq!(v.to_screen(1.0, -1.0), (800, 600));
        assert_eq!(v.to_screen(0.0, 0.0), (400, 300));
    }

    #[test]
    fn test_boundary_segment_diagonal() {
        // x + y = 0 runs from the top-left to the bottom-right corner
        let p = Perceptron::new(vec![1.0_f64, 1.0], 0.0);
        let seg = boundary_segment(&Viewport::new(800, 600), &p);
        assert_eq!(seg, Some(((0, 0), (800, 600))));
    }

    #[test]
    fn test_boundary_segment_horizontal_with_bias() {
        // y = 0.5
        let p = Perceptron::new(vec![0.0_f64, 2.0], -1.0);
        let seg = boundary_segment(&Viewport::new(100, 100), &p).unwrap();
        assert_eq!(seg, ((0, 25), (100, 25)));
    }

    #[test]
    fn test_boundary_segment_vertical_is_skipped() {
        let p = Perceptron::new(vec![1.0_f64, 1e-9], 0.0);
        assert_eq!(boundary_segment(&Viewport::new(100, 100), &p), None);
    }

    #[test]
    fn test_boundary_segment_outside_square() {
        // y = 5
        let p = Perceptron::new(vec![0.0_f64, 1.0], -5.0);
        assert_eq!(boundary_segment(&Viewport::new(100, 100), &p), None);
    }

    #[test]
    fn test_boundary_segment_steep_is_clipped_to_square() {
        let viewport = Viewport::new(60, 24);
        for weights in [vec![1000.0_f64, 1.1e-6], vec![1.0, 2e-6]] {
            let p = Perceptron::new(weights, 0.0);
            let ((x0, y0), (x1, y1)) = boundary_segment(&viewport, &p).unwrap();
            for (x, y) in [(x0, y0), (x1, y1)] {
                assert!((0..=60).contains(&x), "x {x} off screen");
                assert!((0..=24).contains(&y), "y {y} off screen");
            }
            // nearly vertical through the origin: spans the full height
            assert!((29..=30).contains(&x0) && (29..=30).contains(&x1));
            assert_eq!((y0.min(y1), y0.max(y1)), (0, 24));
        }
    }

    #[test]
    fn test_canvas_draws_steep_boundary_on_every_row() {
        for weights in [vec![1000.0_f64, 1.1e-6], vec![1.0, 2e-6]] {
            let mut canvas = AsciiCanvas::new(60, 24);
            canvas.draw::<f64>(&[], &Perceptron::new(weights, 0.0));
            let text = canvas.render();
            assert_eq!(text.lines().count(), 24);
            assert!(text.lines().all(|l| l.contains(AsciiCanvas::BOUNDARY)));
        }
    }

    #[test]
    fn test_boundary_segment_requires_two_features() {
        let p = Perceptron::new(vec![1.0_f64, 1.0, 1.0], 0.0);
        assert_eq!(boundary_segment(&Viewport::new(100, 100), &p), None);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_cell_count_does_not_overflow_u32() {
        assert_eq!(cell_count(70_000, 70_000), 4_900_000_000);
        assert_eq!(cell_count(u32::MAX, 2), 2 * u32::MAX as usize);
    }

    #[test]
    #[should_panic(expected = "Canvas dimensions must be greater than 0.")]
    fn test_canvas_zero_size() {
        AsciiCanvas::new(0, 10);
    }

    #[test]
    fn test_canvas_draws_points_and_boundary() {
        let mut canvas = AsciiCanvas::new(21, 11);
        let samples = vec![
            DataPoint::new(vec![-0.9, -0.9], 0),
            DataPoint::new(vec![0.9, 0.9], 1),
        ];
        let p = Perceptron::new(vec![1.0_f64, 1.0], 0.0);
        canvas.draw(&samples, &p);

        let (nx, ny) = canvas.viewport().to_screen(-0.9, -0.9);
        let (px, py) = canvas.viewport().to_screen(0.9, 0.9);
        assert_eq!(canvas.get(nx as u32, ny as u32), Some(AsciiCanvas::NEGATIVE));
        assert_eq!(canvas.get(px as u32, py as u32), Some(AsciiCanvas::POSITIVE));
        assert_eq!(canvas.get(10, 5), Some(AsciiCanvas::BOUNDARY));

        let text = canvas.render();
        assert_eq!(text.lines().count(), 11);
        assert!(text.lines().all(|l| l.chars().count() == 21));
    }

    #[test]
    fn test_terminal_frame_keeps_status_after_clear() {
        let canvas = AsciiCanvas::new(4, 2);
        let frame = canvas.terminal_frame("Epoch: 3 | Accuracy: 100.00% | Misclassified: 0");
        let clear = frame.rfind("\x1b[2J").unwrap();
        let status = frame.find("Epoch: 3").unwrap();
        assert_eq!(clear, 0);
        assert!(status > clear + canvas.render().len());
        assert!(frame.ends_with("Misclassified: 0\n"));
    }

    #[test]
    fn test_canvas_redraw_clears_previous_frame() {
        let mut canvas = AsciiCanvas::new(10, 10);
        let p = Perceptron::new(vec![1.0_f64, 1.0], 0.0);
        canvas.draw(&[DataPoint::new(vec![-0.5, -0.5], 0)], &p);
        canvas.draw::<f64>(&[], &Perceptron::new(vec![1.0, 0.0], 0.0));
        assert!(canvas.render().chars().all(|c| c == AsciiCanvas::EMPTY || c == '\n'));
    }
}
