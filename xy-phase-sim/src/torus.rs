//! Discrete torus storage for the phase field.
//!
//! A `W × H` lattice with periodic boundaries, stored flat and row-major.
//! Every site has exactly four neighbours; the edges are identified through
//! [`wrap`], so there is no boundary special-casing anywhere in the engine.
//!
//! The same shape is shared by the target and display grids, which are
//! always (re)allocated together from one [`GridShape`].

use std::f64::consts::TAU;

use rand::Rng;

use crate::error::{XyError, XyResult};

// ─────────────────────────────────────────────────────────────────────────────
// Index arithmetic
// ─────────────────────────────────────────────────────────────────────────────

/// Toroidal index: `((i % n) + n) % n` over signed input.
///
/// `wrap(-1, n) == n - 1` and `wrap(n, n) == 0`. `n` must be non-zero.
#[inline]
pub fn wrap(i: isize, n: usize) -> usize {
    let n = n as isize;
    (((i % n) + n) % n) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// Shape and sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Drawable extent and target cell size, as handed over by the sizing provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Cell edge length in pixels.
    pub cell_size: f64,
}

/// Upper bound on lattice sites; anything larger is a sizing error, not a grid.
pub const MAX_SITES: usize = 1 << 24;

/// Validated lattice dimensions. Both axes are at least 1 and the site count
/// is at most [`MAX_SITES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    width: usize,
    height: usize,
}

impl GridShape {
    pub fn new(width: usize, height: usize) -> XyResult<Self> {
        match width.checked_mul(height) {
            Some(sites) if width > 0 && height > 0 && sites <= MAX_SITES => {
                Ok(Self { width, height })
            }
            _ => Err(XyError::InvalidShape { width, height }),
        }
    }

    /// Derive `floor(extent / cell_size)` per axis.
    pub fn from_viewport(viewport: &Viewport) -> XyResult<Self> {
        let Viewport {
            width,
            height,
            cell_size,
        } = *viewport;
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(XyError::InvalidViewport(format!(
                "cell size must be finite and > 0, got {cell_size}"
            )));
        }
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(XyError::InvalidViewport(format!(
                "extent must be finite and non-negative, got {width}x{height}"
            )));
        }
        Self::new(
            (width / cell_size).floor() as usize,
            (height / cell_size).floor() as usize,
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_sites(&self) -> usize {
        self.width * self.height
    }

    /// Flat row-major index of `(x, y)`, with both coordinates wrapped.
    #[inline]
    pub fn index(&self, x: isize, y: isize) -> usize {
        wrap(y, self.height) * self.width + wrap(x, self.width)
    }

    /// `(x, y)` of a flat index.
    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    /// The 4-connected neighbours of `(x, y)` as flat indices: left, right, up, down.
    #[inline]
    pub fn neighbors(&self, x: usize, y: usize) -> [usize; 4] {
        let (x, y) = (x as isize, y as isize);
        [
            self.index(x - 1, y),
            self.index(x + 1, y),
            self.index(x, y - 1),
            self.index(x, y + 1),
        ]
    }
}

/// Canvas-space centre of cell `(x, y)`.
#[inline]
pub fn cell_center(x: usize, y: usize, cell_size: f64) -> (f64, f64) {
    ((x as f64 + 0.5) * cell_size, (y as f64 + 0.5) * cell_size)
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase grid
// ─────────────────────────────────────────────────────────────────────────────

/// One full lattice of phase angles (radians, unwrapped).
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseGrid {
    shape: GridShape,
    angles: Vec<f64>,
}

impl PhaseGrid {
    /// A grid with every site at `angle`.
    pub fn uniform(shape: GridShape, angle: f64) -> Self {
        Self {
            shape,
            angles: vec![angle; shape.num_sites()],
        }
    }

    /// Independent uniform angles in `[0, 2π)`.
    pub fn random<R: Rng>(shape: GridShape, rng: &mut R) -> Self {
        let angles = (0..shape.num_sites())
            .map(|_| rng.gen_range(0.0..TAU))
            .collect();
        Self { shape, angles }
    }

    /// Build from row-major angles. Length must match the shape.
    pub fn from_angles(shape: GridShape, angles: Vec<f64>) -> XyResult<Self> {
        if angles.len() != shape.num_sites() {
            return Err(XyError::InvalidParameter(format!(
                "expected {} angles for a {}x{} grid, got {}",
                shape.num_sites(),
                shape.width(),
                shape.height(),
                angles.len()
            )));
        }
        Ok(Self { shape, angles })
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Angle at `(x, y)` with wraparound indexing.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> f64 {
        self.angles[self.shape.index(x, y)]
    }

    /// Set angle at `(x, y)` with wraparound indexing.
    #[inline]
    pub fn set(&mut self, x: isize, y: isize, angle: f64) {
        let idx = self.shape.index(x, y);
        self.angles[idx] = angle;
    }

    /// Raw row-major angles (read-only).
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Mutable access to the row-major angles.
    pub fn angles_mut(&mut self) -> &mut [f64] {
        &mut self.angles
    }

    /// Overwrite every angle from `other`. Shapes must match.
    pub fn copy_from(&mut self, other: &PhaseGrid) {
        debug_assert_eq!(self.shape, other.shape);
        self.angles.copy_from_slice(&other.angles);
    }

    /// Add `delta` to every site.
    pub fn rotate(&mut self, delta: f64) {
        for a in &mut self.angles {
            *a += delta;
        }
    }

    /// Fold every angle into `[0, 2π)`.
    pub fn normalize(&mut self) {
        for a in &mut self.angles {
            *a = a.rem_euclid(TAU);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn wrap_handles_negative_indices() {
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(-6, 5), 4);
        assert_eq!(wrap(5, 5), 0);
        assert_eq!(wrap(7, 5), 2);
        assert_eq!(wrap(0, 1), 0);
        assert_eq!(wrap(-3, 1), 0);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            GridShape::new(0, 4),
            Err(XyError::InvalidShape { width: 0, height: 4 })
        ));
        assert!(GridShape::new(3, 0).is_err());
        assert!(GridShape::new(1, 1).is_ok());
    }

    #[test]
    fn viewport_floors_to_whole_cells() {
        let shape = GridShape::from_viewport(&Viewport {
            width: 250.0,
            height: 99.9,
            cell_size: 20.0,
        })
        .unwrap();
        assert_eq!((shape.width(), shape.height()), (12, 4));
    }

    #[test]
    fn viewport_smaller_than_a_cell_is_rejected() {
        let res = GridShape::from_viewport(&Viewport {
            width: 10.0,
            height: 300.0,
            cell_size: 20.0,
        });
        assert!(matches!(res, Err(XyError::InvalidShape { .. })));
    }

    #[test]
    fn viewport_with_bad_inputs_is_rejected() {
        for vp in [
            Viewport {
                width: 100.0,
                height: 100.0,
                cell_size: 0.0,
            },
            Viewport {
                width: 100.0,
                height: 100.0,
                cell_size: f64::NAN,
            },
            Viewport {
                width: -5.0,
                height: 100.0,
                cell_size: 10.0,
            },
            Viewport {
                width: f64::INFINITY,
                height: 100.0,
                cell_size: 10.0,
            },
        ] {
            assert!(matches!(
                GridShape::from_viewport(&vp),
                Err(XyError::InvalidViewport(_))
            ));
        }
    }

    #[test]
    fn oversized_viewport_is_rejected_without_overflow() {
        let res = GridShape::from_viewport(&Viewport {
            width: 1e30,
            height: 1e30,
            cell_size: 1.0,
        });
        assert!(matches!(res, Err(XyError::InvalidShape { .. })));
        assert!(GridShape::new(usize::MAX, 2).is_err());
        assert!(GridShape::new(MAX_SITES + 1, 1).is_err());
        assert!(GridShape::new(MAX_SITES, 1).is_ok());
    }

    #[test]
    fn neighbors_wrap_on_all_edges() {
        let shape = GridShape::new(4, 3).unwrap();
        // (0, 0): left wraps to x=3, up wraps to y=2
        let n = shape.neighbors(0, 0);
        assert_eq!(n, [shape.index(3, 0), shape.index(1, 0), shape.index(0, 2), shape.index(0, 1)]);
        // (3, 2): right wraps to x=0, down wraps to y=0
        let n = shape.neighbors(3, 2);
        assert_eq!(n[1], shape.index(0, 2));
        assert_eq!(n[3], shape.index(3, 0));
    }

    #[test]
    fn single_site_torus_is_its_own_neighbor() {
        let shape = GridShape::new(1, 1).unwrap();
        assert_eq!(shape.neighbors(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn index_and_coords_agree() {
        let shape = GridShape::new(5, 7).unwrap();
        for idx in 0..shape.num_sites() {
            let (x, y) = shape.coords(idx);
            assert_eq!(shape.index(x as isize, y as isize), idx);
        }
    }

    #[test]
    fn random_grid_lies_in_unit_turn() {
        let shape = GridShape::new(16, 16).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let grid = PhaseGrid::random(shape, &mut rng);
        assert!(grid.angles().iter().all(|&a| (0.0..TAU).contains(&a)));
    }

    #[test]
    fn from_angles_checks_length() {
        let shape = GridShape::new(2, 2).unwrap();
        assert!(PhaseGrid::from_angles(shape, vec![0.0; 3]).is_err());
        assert!(PhaseGrid::from_angles(shape, vec![0.0; 4]).is_ok());
    }

    #[test]
    fn normalize_folds_into_range() {
        let shape = GridShape::new(3, 1).unwrap();
        let mut grid = PhaseGrid::from_angles(shape, vec![-0.5, 7.0, TAU]).unwrap();
        grid.normalize();
        let a = grid.angles();
        assert!((a[0] - (TAU - 0.5)).abs() < 1e-12);
        assert!((a[1] - (7.0 - TAU)).abs() < 1e-12);
        assert!(a[2].abs() < 1e-12);
    }

    #[test]
    fn cell_center_is_half_a_cell_in() {
        assert_eq!(cell_center(0, 0, 10.0), (5.0, 5.0));
        assert_eq!(cell_center(2, 1, 10.0), (25.0, 15.0));
    }
}
