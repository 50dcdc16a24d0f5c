//! Perimeter anchor points and the candidate pool
//!
//! Lines may only start and end on grid corners along the outer border.
//! The [`EndpointGraph`] enumerates those corners once, pairs them up, drops
//! pairs that would run along a single border edge, and freezes the result
//! into an ordered candidate pool that the synthesizer scans.

use std::fmt;

use crate::geometry::Point;

/// Border edges an endpoint lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeFlags {
    /// On the left border (x == 0)
    pub left: bool,
    /// On the right border (x == columns)
    pub right: bool,
    /// On the top border (y == 0)
    pub top: bool,
    /// On the bottom border (y == rows)
    pub bottom: bool,
}

impl EdgeFlags {
    /// True when both flag sets share at least one edge.
    #[inline]
    pub fn shares_edge(self, other: EdgeFlags) -> bool {
        (self.left && other.left)
            || (self.right && other.right)
            || (self.top && other.top)
            || (self.bottom && other.bottom)
    }

    /// Number of edges set (2 for a corner).
    #[inline]
    pub fn count(self) -> usize {
        [self.left, self.right, self.top, self.bottom]
            .iter()
            .filter(|&&flag| flag)
            .count()
    }

    /// True when the position lies on no edge at all.
    #[inline]
    pub fn is_interior(self) -> bool {
        self.count() == 0
    }
}

/// A fixed boundary anchor a line may start or end at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    /// Grid-corner column (0..=columns)
    pub x_index: u32,
    /// Grid-corner row (0..=rows)
    pub y_index: u32,
    /// Pixel location
    pub location: Point,
    /// Border membership
    pub edges: EdgeFlags,
}

impl Endpoint {
    /// Whether a line between `self` and `other` is admissible.
    ///
    /// Pairs sharing a border edge would draw along the frame and are refused.
    #[inline]
    pub fn allows_line(&self, other: &Endpoint) -> bool {
        !self.edges.shares_edge(other.edges)
    }

    /// Ordered id of the line from `self` to `other`.
    #[inline]
    pub fn line_id(&self, other: &Endpoint) -> PairId {
        PairId {
            from: (self.x_index, self.y_index),
            to: (other.x_index, other.y_index),
        }
    }
}

/// Order-sensitive identity of an endpoint pair.
///
/// `(A, B)` and `(B, A)` are distinct ids. The candidate pool only ever
/// yields pairs in enumeration order, so the reversed id never appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId {
    /// Grid coordinates of the first endpoint
    pub from: (u32, u32),
    /// Grid coordinates of the second endpoint
    pub to: (u32, u32),
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}

/// One admissible endpoint pair, as indices into [`EndpointGraph::endpoints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Index of the first endpoint
    pub first: usize,
    /// Index of the second endpoint
    pub second: usize,
    /// Dedup key of the line this pair would produce
    pub id: PairId,
}

/// Perimeter endpoints plus the frozen, ordered candidate pool.
///
/// # Example
///
/// ```
/// use string_art::EndpointGraph;
///
/// let graph = EndpointGraph::perimeter(2, 2, 10.0);
/// assert_eq!(graph.endpoints().len(), 8);
/// // 28 pairs minus 3 same-edge pairs on each of the 4 edges
/// assert_eq!(graph.candidates().len(), 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EndpointGraph {
    endpoints: Vec<Endpoint>,
    candidates: Vec<Candidate>,
}

impl EndpointGraph {
    /// Build the graph for a `columns x rows` grid of `cell_size` pixel cells.
    ///
    /// Endpoints are enumerated column by column (x outer, y inner) over the
    /// `(columns + 1) x (rows + 1)` corner lattice, keeping border positions.
    pub fn perimeter(columns: u32, rows: u32, cell_size: f64) -> Self {
        if columns == 0 || rows == 0 {
            return Self::default();
        }

        let mut endpoints = Vec::with_capacity(2 * (columns + rows) as usize);
        for x in 0..=columns {
            for y in 0..=rows {
                let edges = EdgeFlags {
                    left: x == 0,
                    right: x == columns,
                    top: y == 0,
                    bottom: y == rows,
                };
                if edges.is_interior() {
                    continue;
                }
                endpoints.push(Endpoint {
                    x_index: x,
                    y_index: y,
                    location: Point::new(x as f64 * cell_size, y as f64 * cell_size),
                    edges,
                });
            }
        }

        Self::from_endpoints(endpoints)
    }

    /// Pair up arbitrary endpoints, keeping only admissible pairs.
    pub fn from_endpoints(endpoints: Vec<Endpoint>) -> Self {
        let mut candidates = Vec::new();
        for (first, a) in endpoints.iter().enumerate() {
            for (offset, b) in endpoints[first + 1..].iter().enumerate() {
                if a.allows_line(b) {
                    candidates.push(Candidate {
                        first,
                        second: first + 1 + offset,
                        id: a.line_id(b),
                    });
                }
            }
        }

        tracing::debug!(
            endpoints = endpoints.len(),
            candidates = candidates.len(),
            "Built endpoint graph"
        );

        Self {
            endpoints,
            candidates,
        }
    }

    /// All endpoints in enumeration order.
    #[inline]
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// The ordered candidate pool.
    #[inline]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Pixel locations of a candidate's two endpoints.
    #[inline]
    pub fn segment(&self, candidate: &Candidate) -> (Point, Point) {
        (
            self.endpoints[candidate.first].location,
            self.endpoints[candidate.second].location,
        )
    }

    /// Endpoints of a candidate.
    #[inline]
    pub fn pair(&self, candidate: &Candidate) -> (&Endpoint, &Endpoint) {
        (
            &self.endpoints[candidate.first],
            &self.endpoints[candidate.second],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_perimeter_counts() {
        let graph = EndpointGraph::perimeter(2, 2, 10.0);
        assert_eq!(graph.endpoints().len(), 8);

        let memberships: usize = graph.endpoints().iter().map(|e| e.edges.count()).sum();
        assert_eq!(memberships, 12);

        let corners = graph
            .endpoints()
            .iter()
            .filter(|e| e.edges.count() == 2)
            .count();
        assert_eq!(corners, 4);
    }

    #[test]
    fn test_perimeter_rectangular() {
        let graph = EndpointGraph::perimeter(4, 3, 5.0);
        assert_eq!(graph.endpoints().len(), 2 * (4 + 3));
        let last = graph.endpoints().last().unwrap();
        assert_eq!((last.x_index, last.y_index), (4, 3));
        assert_eq!(last.location, Point::new(20.0, 15.0));
    }

    #[test]
    fn test_enumeration_order() {
        let graph = EndpointGraph::perimeter(2, 2, 1.0);
        let order: Vec<_> = graph
            .endpoints()
            .iter()
            .map(|e| (e.x_index, e.y_index))
            .collect();
        assert_eq!(
            order,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn test_corner_refuses_both_edges() {
        let graph = EndpointGraph::perimeter(2, 2, 1.0);
        let top_left = graph.endpoints()[0];
        for other in &graph.endpoints()[1..] {
            let expected = !(other.x_index == 0 || other.y_index == 0);
            assert_eq!(top_left.allows_line(other), expected, "{other:?}");
        }
    }

    #[test]
    fn test_candidates_never_share_an_edge() {
        let graph = EndpointGraph::perimeter(5, 3, 2.0);
        for candidate in graph.candidates() {
            let (a, b) = graph.pair(candidate);
            assert!(!a.edges.shares_edge(b.edges));
            assert!(candidate.first < candidate.second);
        }
    }

    #[test]
    fn test_pair_id_is_order_sensitive() {
        let graph = EndpointGraph::perimeter(2, 2, 1.0);
        let a = graph.endpoints()[0];
        let b = graph.endpoints()[7];
        assert_ne!(a.line_id(&b), b.line_id(&a));
        assert_eq!(a.line_id(&b).to_string(), "0_0_2_2");
    }

    #[test]
    fn test_degenerate_grid_has_no_candidates() {
        let graph = EndpointGraph::perimeter(0, 3, 1.0);
        assert!(graph.endpoints().is_empty());
        assert!(graph.candidates().is_empty());
    }

    #[test]
    fn test_single_cell_has_two_diagonals() {
        let graph = EndpointGraph::perimeter(1, 1, 4.0);
        let ids: Vec<_> = graph.candidates().iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["0_0_1_1", "0_1_1_0"]);
    }
}
