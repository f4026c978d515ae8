//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::{ io, path::PathBuf };
use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when a set of [`Params`][crate::config::Params] fails validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the grid size is zero or odd.
    #[error("nx must be a positive, even integer; got {0}")]
    BadGridSize(usize),

    /// Returned when the step count is zero.
    #[error("nt must be greater than 0; got {0}")]
    BadStepCount(usize),

    /// Returned when a quantity required to be positive and finite is not.
    #[error("{name} must be positive and finite; got {value}")]
    NotPositive { name: &'static str, value: f64 },

    /// Returned when a quantity required to be finite is not.
    #[error("{name} must be finite; got {value}")]
    NotFinite { name: &'static str, value: f64 },

    /// Returned when a wall index range is reversed or extends past the grid.
    #[error("{name} wall [{start}, {end}) does not fit in a grid of {nx} points")]
    BadWall { name: &'static str, start: usize, end: usize, nx: usize },

    /// Returned when the two walls share grid points.
    #[error("walls must be disjoint; left ends at {left_end}, right starts at {right_start}")]
    OverlappingWalls { left_end: usize, right_start: usize },

    /// Returned when the snapshot cadence is zero.
    #[error("snapshot cadence must be greater than 0")]
    BadCadence,

    /// Returned when the snapshot decimation stride is zero.
    #[error("snapshot stride must be greater than 0")]
    BadStride,

    /// Returned when a parameter file cannot be read.
    #[error("unable to read parameter file {path:?}: {source}")]
    TomlRead { path: PathBuf, source: io::Error },

    /// Returned when a parameter file cannot be parsed.
    #[error("unable to parse parameters: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn check_positive(name: &'static str, value: f64)
        -> Result<(), Self>
    {
        (value > 0.0 && value.is_finite()).then_some(())
            .ok_or(Self::NotPositive { name, value })
    }

    pub(crate) fn check_finite(name: &'static str, value: f64)
        -> Result<(), Self>
    {
        value.is_finite().then_some(())
            .ok_or(Self::NotFinite { name, value })
    }
}

/// Returned when a [`Propagator`][crate::propagate::Propagator] is set up
/// from an existing state.
#[derive(Debug, Error)]
pub enum SetupError {
    /// [`ConfigError`]
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

/// Returned from the snapshot writer.
///
/// These never reach the propagator; they are collected into an
/// [`EmitReport`][crate::snapshot::EmitReport] when the writer is drained.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Returned when the output directory cannot be created.
    #[error("unable to create output directory {path:?}: {source}")]
    OutDir { path: PathBuf, source: io::Error },

    /// Returned when a snapshot file cannot be written.
    #[error("unable to write snapshot {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },

    /// Returned when a writer thread cannot be started.
    #[error("unable to start writer thread for snapshot {seq}: {source}")]
    Spawn { seq: usize, source: io::Error },

    /// Returned when a writer thread panics before finishing its file.
    #[error("writer thread for snapshot {0} panicked")]
    Panicked(usize),
}
