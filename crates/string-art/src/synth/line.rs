//! Accepted line segments.

use crate::endpoints::PairId;
use crate::geometry::Point;
use crate::grid::CellKey;

/// An accepted segment between two perimeter endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Ordered pair id; unique among the lines of one run
    pub id: PairId,
    /// Pool position of the pair
    pub candidate_index: usize,
    /// First endpoint in pixel space
    pub p1: Point,
    /// Second endpoint in pixel space
    pub p2: Point,
    /// Stroke color, taken from the driving cell
    pub color: [u8; 3],
    /// Cell whose ink budget produced this line
    pub source: CellKey,
    /// Mean Lab distance between the stroke color and every crossed cell;
    /// lower is a better fit
    pub rank: f64,
    /// Number of cells crossed at acceptance
    pub crossings: usize,
    /// Crossed cells beyond the bad-band threshold that were tolerated
    pub far_crossings: usize,
}

impl Line {
    /// Segment length in pixels.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.p2.x - self.p1.x).hypot(self.p2.y - self.p1.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        let line = Line {
            id: PairId {
                from: (0, 0),
                to: (3, 4),
            },
            candidate_index: 0,
            p1: Point::new(0.0, 0.0),
            p2: Point::new(30.0, 40.0),
            color: [0, 0, 0],
            source: CellKey::new(0, 0),
            rank: 0.0,
            crossings: 1,
            far_crossings: 0,
        };
        assert_eq!(line.length(), 50.0);
    }
}
