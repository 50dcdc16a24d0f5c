//! Segment collision geometry
//!
//! Everything here works in pixel space. The synthesizer asks two
//! questions of a candidate segment: does it cross the driving cell, and
//! which cells does it cross at all. The second question goes through a
//! coarse column test first so that only cells in touched columns get the
//! finer four-edge test.

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate (grows downwards)
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Intersection point of segments `a1-a2` and `b1-b2`, if any.
///
/// Solves the two-parameter line-line system in determinant form. The
/// segments collide iff both interpolation parameters fall in `[0, 1]`,
/// endpoints included. A zero determinant (parallel, collinear or
/// zero-length segments) never collides.
///
/// # Example
///
/// ```
/// use string_art::geometry::{segment_intersection, Point};
///
/// let hit = segment_intersection(
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 0.0),
/// );
/// assert_eq!(hit, Some(Point::new(5.0, 5.0)));
/// ```
pub fn segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let denominator = (b2.y - b1.y) * (a2.x - a1.x) - (b2.x - b1.x) * (a2.y - a1.y);
    if denominator == 0.0 {
        return None;
    }

    let u_a = ((b2.x - b1.x) * (a1.y - b1.y) - (b2.y - b1.y) * (a1.x - b1.x)) / denominator;
    let u_b = ((a2.x - a1.x) * (a1.y - b1.y) - (a2.y - a1.y) * (a1.x - b1.x)) / denominator;

    if (0.0..=1.0).contains(&u_a) && (0.0..=1.0).contains(&u_b) {
        Some(Point::new(
            a1.x + u_a * (a2.x - a1.x),
            a1.y + u_a * (a2.y - a1.y),
        ))
    } else {
        None
    }
}

/// Whether segments `a1-a2` and `b1-b2` collide.
#[inline]
pub fn segments_collide(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    segment_intersection(a1, a2, b1, b2).is_some()
}

/// Uniform grid layout in pixel space.
///
/// Cell `(column, row)` covers
/// `[column * cell_size, (column + 1) * cell_size] x [row * cell_size, (row + 1) * cell_size]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Number of cell columns
    pub columns: u32,
    /// Number of cell rows
    pub rows: u32,
    /// Edge length of a cell in pixels
    pub cell_size: f64,
}

impl GridGeometry {
    /// Create a new grid layout.
    #[inline]
    pub fn new(columns: u32, rows: u32, cell_size: f64) -> Self {
        Self {
            columns,
            rows,
            cell_size,
        }
    }

    /// Total grid height in pixels.
    #[inline]
    pub fn height(&self) -> f64 {
        self.rows as f64 * self.cell_size
    }

    /// Total grid width in pixels.
    #[inline]
    pub fn width(&self) -> f64 {
        self.columns as f64 * self.cell_size
    }

    /// Does the segment cross any of the four edges of cell `(column, row)`?
    ///
    /// Edges are tested left, right, top, bottom with early exit.
    pub fn crosses_cell(&self, column: u32, row: u32, p1: Point, p2: Point) -> bool {
        let size = self.cell_size;
        let left = column as f64 * size;
        let top = row as f64 * size;
        let right = left + size;
        let bottom = top + size;

        segments_collide(p1, p2, Point::new(left, top), Point::new(left, bottom))
            || segments_collide(p1, p2, Point::new(right, top), Point::new(right, bottom))
            || segments_collide(p1, p2, Point::new(left, top), Point::new(right, top))
            || segments_collide(p1, p2, Point::new(left, bottom), Point::new(right, bottom))
    }

    /// Does the segment cross either vertical boundary of a full column?
    pub fn crosses_column(&self, column: u32, p1: Point, p2: Point) -> bool {
        let left = column as f64 * self.cell_size;
        let right = left + self.cell_size;
        let height = self.height();

        segments_collide(p1, p2, Point::new(left, 0.0), Point::new(left, height))
            || segments_collide(p1, p2, Point::new(right, 0.0), Point::new(right, height))
    }

    /// Grid positions whose cell boxes the segment crosses.
    ///
    /// Column-major order: each column passing [`crosses_column`](Self::crosses_column)
    /// has its cells checked top to bottom with [`crosses_cell`](Self::crosses_cell).
    pub fn crossed_positions(&self, p1: Point, p2: Point) -> Vec<(u32, u32)> {
        let mut positions = Vec::new();
        for column in 0..self.columns {
            if !self.crosses_column(column, p1, p2) {
                continue;
            }
            for row in 0..self.rows {
                if self.crosses_cell(column, row, p1, p2) {
                    positions.push((column, row));
                }
            }
        }
        positions
    }
}
