//! Statistical aggregates over cells
//!
//! A [`CellCollection`] is built on demand (usually per layer), summarised
//! with [`CellCollection::stats`] and thrown away. It never mutates cells.

use super::cell::{Cell, WHITE_THRESHOLD};

/// Scalar used to order cells inside a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellMetric {
    /// Lab distance from pure white
    #[default]
    DeltaEWhite,
    /// Rec. 601 luminance
    Luminance,
    /// Lab lightness
    Lightness,
}

impl CellMetric {
    /// Evaluate the metric for one cell.
    #[inline]
    pub fn value(self, cell: &Cell) -> f64 {
        match self {
            CellMetric::DeltaEWhite => cell.delta_e_white,
            CellMetric::Luminance => cell.luminance,
            CellMetric::Lightness => cell.lab.l,
        }
    }
}

/// A cell together with its metric value.
#[derive(Debug, Clone, Copy)]
pub struct CollectionItem<'a> {
    /// The referenced cell
    pub cell: &'a Cell,
    /// Metric value the collection is ordered by
    pub value: f64,
}

/// Summary statistics of a [`CellCollection`].
#[derive(Debug, Clone, Default)]
pub struct CollectionStats<'a> {
    /// Cells counted (transparent included, reserve-white excluded)
    pub total: usize,
    /// Transparent cells counted
    pub total_transparent: usize,
    /// Opaque cells with Lab L above the white threshold
    pub total_white: usize,
    /// `total_transparent / total`, 0 when empty
    pub transparent_ratio: f64,
    /// `total_white / total`, 0 when empty
    pub white_ratio: f64,
    /// Item at index `floor(n / 2)` of the sorted opaque items
    pub median: Option<CollectionItem<'a>>,
    /// Smallest metric value
    pub minimum: Option<CollectionItem<'a>>,
    /// Largest metric value
    pub maximum: Option<CollectionItem<'a>>,
    /// `|median - minimum|`
    pub distance_from_min: f64,
    /// `|maximum - median|`
    pub distance_from_max: f64,
    /// Mean absolute deviation from the median value
    pub median_abs_deviation: f64,
}

/// Aggregate over a set of cells, optionally restricted to one layer.
///
/// Reserve-white cells are never counted; seeing one only raises the
/// [`reserve_white`](Self::reserve_white) flag.
///
/// # Example
///
/// ```
/// use string_art::{CellCollection, CellMetric, ColorSample, Grid};
///
/// let samples = vec![Some(ColorSample::rgb(0, 0, 0)), Some(ColorSample::rgb(128, 128, 128))];
/// let grid = Grid::from_samples(2, 1, 10.0, &samples, 10.0).unwrap();
///
/// let mut collection = CellCollection::new(CellMetric::DeltaEWhite);
/// collection.extend(grid.cells());
/// let stats = collection.stats();
/// assert_eq!(stats.total, 2);
/// ```
#[derive(Debug, Clone)]
pub struct CellCollection<'a> {
    metric: CellMetric,
    layer: Option<u32>,
    items: Vec<CollectionItem<'a>>,
    total: usize,
    total_transparent: usize,
    total_white: usize,
    reserve_white: bool,
}

impl<'a> CellCollection<'a> {
    /// Collection over every layer.
    pub fn new(metric: CellMetric) -> Self {
        Self {
            metric,
            layer: None,
            items: Vec::new(),
            total: 0,
            total_transparent: 0,
            total_white: 0,
            reserve_white: false,
        }
    }

    /// Collection that only counts cells of `layer`.
    pub fn for_layer(metric: CellMetric, layer: u32) -> Self {
        Self {
            layer: Some(layer),
            ..Self::new(metric)
        }
    }

    /// Add one cell, honoring the layer filter.
    pub fn add(&mut self, cell: &'a Cell) {
        if cell.reserve_white {
            self.reserve_white = true;
            return;
        }
        if self.layer.is_some_and(|layer| layer != cell.layer) {
            return;
        }

        if cell.is_transparent {
            self.total_transparent += 1;
        } else {
            self.items.push(CollectionItem {
                cell,
                value: self.metric.value(cell),
            });
            if cell.lab.l > WHITE_THRESHOLD {
                self.total_white += 1;
            }
        }
        self.total += 1;
    }

    /// Add every cell from an iterator.
    pub fn extend<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        for cell in cells {
            self.add(cell);
        }
    }

    /// Whether a reserve-white cell was offered to this collection.
    #[inline]
    pub fn reserve_white(&self) -> bool {
        self.reserve_white
    }

    /// Layer filter, if any.
    #[inline]
    pub fn layer(&self) -> Option<u32> {
        self.layer
    }

    /// Number of opaque items ordered by the metric.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no opaque cell was collected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Compute ratios and order statistics.
    pub fn stats(&self) -> CollectionStats<'a> {
        let mut stats = CollectionStats {
            total: self.total,
            total_transparent: self.total_transparent,
            total_white: self.total_white,
            ..Default::default()
        };
        if self.total > 0 {
            stats.transparent_ratio = self.total_transparent as f64 / self.total as f64;
            stats.white_ratio = self.total_white as f64 / self.total as f64;
        }

        if self.items.is_empty() {
            return stats;
        }

        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| a.value.total_cmp(&b.value));

        let median = sorted[sorted.len() / 2];
        let minimum = sorted[0];
        let maximum = sorted[sorted.len() - 1];

        stats.distance_from_min = (median.value - minimum.value).abs();
        stats.distance_from_max = (maximum.value - median.value).abs();
        stats.median_abs_deviation = sorted
            .iter()
            .map(|item| (item.value - median.value).abs())
            .sum::<f64>()
            / sorted.len() as f64;
        stats.median = Some(median);
        stats.minimum = Some(minimum);
        stats.maximum = Some(maximum);
        stats
    }
}
