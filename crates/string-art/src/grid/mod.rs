//! Cell grid
//!
//! [`Grid`] owns every [`Cell`] of one image. It is built once from the
//! sampler's output and then handed `&mut` to the synthesizer, which is the
//! only code that touches pass counters and scan cursors.

mod cell;
mod collection;

use std::collections::{BTreeMap, HashMap};

pub use cell::{
    Cell, CellKey, LAYER_WIDTH, RESERVE_WHITE_DELTA_E, TRANSPARENT_MAXIMUM_PASSES,
    WHITE_THRESHOLD,
};
pub use collection::{CellCollection, CellMetric, CollectionItem, CollectionStats};

use crate::api::StringArtError;
use crate::color::ColorSample;
use crate::geometry::{GridGeometry, Point};

/// Default number of passes a fully black cell asks for.
pub const DEFAULT_PASSES_SCALER: f64 = 10.0;

/// Largest accepted passes scaler.
pub const MAX_PASSES_SCALER: f64 = 10_000.0;

/// Owned grid of cells with constant-time lookup by position.
///
/// Cells keep their insertion order; that order is the default sweep order
/// of the synthesizer and therefore part of its determinism.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    lookup: HashMap<CellKey, usize>,
    columns: u32,
    rows: u32,
    cell_size: f64,
    passes_scaler: f64,
}

impl Grid {
    /// Create an empty grid of the given extent.
    ///
    /// The extent grows if a later insertion lies outside it.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_size: f64,
        passes_scaler: f64,
    ) -> Result<Self, StringArtError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(StringArtError::InvalidCellSize(cell_size));
        }
        if !passes_scaler.is_finite() || !(0.0..=MAX_PASSES_SCALER).contains(&passes_scaler) {
            return Err(StringArtError::InvalidPassesScaler {
                value: passes_scaler,
                max: MAX_PASSES_SCALER,
            });
        }
        Ok(Self {
            cells: Vec::with_capacity(columns as usize * rows as usize),
            lookup: HashMap::new(),
            columns,
            rows,
            cell_size,
            passes_scaler,
        })
    }

    /// Build a grid from row-major samples (`samples[row * columns + column]`).
    ///
    /// Cells are inserted column by column, top to bottom. Absent samples
    /// leave a hole in the grid. The first malformed sample aborts the build.
    ///
    /// # Example
    ///
    /// ```
    /// use string_art::{ColorSample, Grid};
    ///
    /// let samples = vec![
    ///     Some(ColorSample::rgb(0, 0, 0)),
    ///     None,
    ///     Some(ColorSample::rgb(255, 255, 255)),
    ///     Some(ColorSample::rgba(0, 0, 0, 0)),
    /// ];
    /// let grid = Grid::from_samples(2, 2, 16.0, &samples, 10.0).unwrap();
    /// assert_eq!(grid.len(), 3);
    /// assert_eq!(grid.columns(), 2);
    /// ```
    pub fn from_samples(
        columns: u32,
        rows: u32,
        cell_size: f64,
        samples: &[Option<ColorSample>],
        passes_scaler: f64,
    ) -> Result<Self, StringArtError> {
        let expected = columns as usize * rows as usize;
        if samples.len() != expected {
            return Err(StringArtError::GridShape {
                columns,
                rows,
                expected,
                actual: samples.len(),
            });
        }

        let mut grid = Self::new(columns, rows, cell_size, passes_scaler)?;
        for column in 0..columns {
            for row in 0..rows {
                let index = row as usize * columns as usize + column as usize;
                if let Some(sample) = samples[index] {
                    grid.insert(CellKey::new(column, row), sample)?;
                }
            }
        }

        tracing::debug!(
            columns,
            rows,
            cells = grid.len(),
            cell_size,
            "Built cell grid"
        );
        Ok(grid)
    }

    /// Insert a cell derived from `sample` at `key`.
    ///
    /// Returns `Ok(false)` and keeps the existing cell when `key` is taken.
    pub fn insert(&mut self, key: CellKey, sample: ColorSample) -> Result<bool, StringArtError> {
        sample.validate()?;
        if self.lookup.contains_key(&key) {
            tracing::warn!(cell = %key, "Duplicate cell insertion ignored");
            return Ok(false);
        }

        self.columns = self.columns.max(key.column + 1);
        self.rows = self.rows.max(key.row + 1);

        let location = Point::new(
            key.column as f64 * self.cell_size,
            key.row as f64 * self.cell_size,
        );
        let cell = Cell::new(key, location, self.cell_size, sample, self.passes_scaler);
        self.lookup.insert(key, self.cells.len());
        self.cells.push(cell);
        Ok(true)
    }

    /// Cells in insertion order.
    #[inline]
    pub fn cells(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Cell at insertion index `index`.
    #[inline]
    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Mutable cell at insertion index `index`.
    #[inline]
    pub fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// Cell at a grid position.
    #[inline]
    pub fn get(&self, key: CellKey) -> Option<&Cell> {
        self.lookup.get(&key).map(|&index| &self.cells[index])
    }

    /// Insertion index of the cell at a grid position.
    #[inline]
    pub fn index_of(&self, key: CellKey) -> Option<usize> {
        self.lookup.get(&key).copied()
    }

    /// Number of present cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell edge length in pixels.
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Pixel-space layout of this grid.
    #[inline]
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.columns, self.rows, self.cell_size)
    }

    /// Does the segment cross the box of the cell at `index`?
    pub fn crosses_cell(&self, index: usize, p1: Point, p2: Point) -> bool {
        let key = self.cells[index].key;
        self.geometry().crosses_cell(key.column, key.row, p1, p2)
    }

    /// Insertion indices of every present cell the segment crosses.
    pub fn intersected_cells(&self, p1: Point, p2: Point) -> Vec<usize> {
        self.geometry()
            .crossed_positions(p1, p2)
            .into_iter()
            .filter_map(|(column, row)| self.index_of(CellKey::new(column, row)))
            .collect()
    }

    /// Sum of passes still owed across all cells.
    pub fn total_deficit(&self) -> u64 {
        self.cells.iter().map(|cell| cell.deficit() as u64).sum()
    }

    /// One collection per layer that has at least one counted cell, keyed by layer.
    pub fn layer_collections(&self, metric: CellMetric) -> BTreeMap<u32, CellCollection<'_>> {
        let mut layers = BTreeMap::new();
        for cell in &self.cells {
            if cell.reserve_white {
                continue;
            }
            layers
                .entry(cell.layer)
                .or_insert_with(|| CellCollection::for_layer(metric, cell.layer))
                .add(cell);
        }
        layers
    }

    /// Clear pass counters and scan cursors.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }
}
