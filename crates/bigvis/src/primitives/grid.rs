//! Grid containers shared by the condense and smoothing engines.
//!
//! ## Purpose
//!
//! This module provides the row-major coordinate matrix (`Points`) used for
//! both input and output grids, and the `SmoothGrid` triple of coordinates,
//! values and optional weights that the smoother consumes.
//!
//! ## Design notes
//!
//! * **Layout**: Coordinates are stored row-major, `dims` values per point.
//! * **Dimensions**: Axes are addressed by the zero-based [`Dim`] newtype at
//!   every interface; there is no implicit 1-based convention anywhere.
//! * **Weights**: Absence of weights is `None`, never an empty vector, so
//!   "no weights" and "all-zero weights" cannot be confused.
//!
//! ## Invariants
//!
//! * `coords.len() == len() * dims()` and `dims() >= 1`.
//! * `values.len() == points.len()`; `weights`, when present, too.
//!
//! ## Non-goals
//!
//! * This module does not validate that coordinates are finite (see `Validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::BigvisError;

// ============================================================================
// Dimension Index
// ============================================================================

/// Zero-based index of a grid dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dim(pub usize);

impl Dim {
    /// The underlying zero-based index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// Points
// ============================================================================

/// A set of points in `dims`-dimensional space, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Points<T> {
    coords: Vec<T>,
    dims: usize,
}

impl<T: Float> Points<T> {
    /// Wrap a row-major coordinate buffer.
    pub fn new(coords: Vec<T>, dims: usize) -> Result<Self, BigvisError> {
        if dims == 0 {
            return Err(BigvisError::DimensionMismatch {
                expected: 1,
                got: 0,
            });
        }
        if coords.len() % dims != 0 {
            return Err(BigvisError::LengthMismatch {
                what: "coordinates",
                expected: (coords.len() / dims + 1) * dims,
                got: coords.len(),
            });
        }
        Ok(Self { coords, dims })
    }

    /// One-dimensional points.
    pub fn from_1d(x: &[T]) -> Self {
        Self {
            coords: x.to_vec(),
            dims: 1,
        }
    }

    /// Interleave equally long columns into points.
    pub fn from_columns(columns: &[&[T]]) -> Result<Self, BigvisError> {
        let dims = columns.len();
        if dims == 0 {
            return Err(BigvisError::DimensionMismatch {
                expected: 1,
                got: 0,
            });
        }
        let n = columns[0].len();
        for col in columns.iter().skip(1) {
            if col.len() != n {
                return Err(BigvisError::LengthMismatch {
                    what: "coordinates",
                    expected: n,
                    got: col.len(),
                });
            }
        }

        let mut coords = Vec::with_capacity(n * dims);
        for i in 0..n {
            for col in columns {
                coords.push(col[i]);
            }
        }
        Ok(Self { coords, dims })
    }

    /// Cross product of per-axis positions, first axis varying fastest.
    pub fn product(axes: &[Vec<T>]) -> Result<Self, BigvisError> {
        let dims = axes.len();
        if dims == 0 {
            return Err(BigvisError::DimensionMismatch {
                expected: 1,
                got: 0,
            });
        }

        let total: usize = axes.iter().map(Vec::len).product();
        let mut coords = Vec::with_capacity(total * dims);
        for flat in 0..total {
            let mut rem = flat;
            for axis in axes {
                coords.push(axis[rem % axis.len()]);
                rem /= axis.len();
            }
        }
        Ok(Self { coords, dims })
    }

    /// Axis positions `origin + width * i` for `i` in `1..=nbins`.
    pub fn axis_from_bins(width: T, origin: T, nbins: usize) -> Vec<T> {
        (1..=nbins)
            .map(|i| origin + width * T::from(i).unwrap_or_else(T::zero))
            .collect()
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dims
    }

    /// Returns `true` if there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of dimensions.
    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Coordinates of point `i`.
    #[inline]
    pub fn point(&self, i: usize) -> &[T] {
        &self.coords[i * self.dims..(i + 1) * self.dims]
    }

    /// Coordinate of point `i` along `dim`.
    #[inline]
    pub fn coord(&self, i: usize, dim: Dim) -> T {
        self.coords[i * self.dims + dim.index()]
    }

    /// Copy out one coordinate column.
    pub fn column(&self, dim: Dim) -> Vec<T> {
        self.iter().map(|p| p[dim.index()]).collect()
    }

    /// Iterate over points.
    pub fn iter(&self) -> impl Iterator<Item = &[T]> {
        self.coords.chunks_exact(self.dims)
    }

    /// Raw row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.coords
    }

    /// Points at the given row indices, in that order.
    pub fn select(&self, rows: &[usize]) -> Self {
        let mut coords = Vec::with_capacity(rows.len() * self.dims);
        for &r in rows {
            coords.extend_from_slice(self.point(r));
        }
        Self {
            coords,
            dims: self.dims,
        }
    }

    /// Fail if `dim` is not an axis of these points.
    pub fn check_dim(&self, dim: Dim) -> Result<(), BigvisError> {
        if dim.index() >= self.dims {
            return Err(BigvisError::DimensionMismatch {
                expected: self.dims,
                got: dim.index() + 1,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Smooth Grid
// ============================================================================

/// Input to the kernel smoother: coordinates, values and optional weights.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothGrid<T> {
    points: Points<T>,
    values: Vec<T>,
    weights: Option<Vec<T>>,
}

impl<T: Float> SmoothGrid<T> {
    /// Assemble a grid, checking that all parts describe the same points.
    pub fn new(
        points: Points<T>,
        values: Vec<T>,
        weights: Option<Vec<T>>,
    ) -> Result<Self, BigvisError> {
        let n = points.len();
        if values.len() != n {
            return Err(BigvisError::LengthMismatch {
                what: "values",
                expected: n,
                got: values.len(),
            });
        }
        if let Some(w) = &weights {
            if w.len() != n {
                return Err(BigvisError::LengthMismatch {
                    what: "weights",
                    expected: n,
                    got: w.len(),
                });
            }
        }
        Ok(Self {
            points,
            values,
            weights,
        })
    }

    /// Grid coordinates.
    #[inline]
    pub fn points(&self) -> &Points<T> {
        &self.points
    }

    /// Values at each point.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Per-point weights, `None` meaning uniform.
    #[inline]
    pub fn weights(&self) -> Option<&[T]> {
        self.weights.as_deref()
    }

    /// Weight of point `i` (1 when the grid is unweighted).
    #[inline]
    pub fn weight(&self, i: usize) -> T {
        self.weights.as_ref().map_or_else(T::one, |w| w[i])
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the grid holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of dimensions.
    #[inline]
    pub fn dims(&self) -> usize {
        self.points.dims()
    }
}
