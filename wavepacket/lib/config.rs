//! Run parameters and their validation.
//!
//! All quantities are in natural units where the default run takes ħ = 1 and
//! m = 2. Parameters can be built directly, starting from [`Params::default`],
//! or read from a TOML file in which every field is optional:
//! ```
//! use wavepacket::config::Params;
//!
//! let params = Params::from_toml_str(r#"
//!     nx = 2000
//!     nt = 101
//!     left_wall = { start = 0, end = 500 }
//!     right_wall = { start = 1500, end = 2000 }
//! "#).unwrap();
//! assert_eq!(params.nx, 2000);
//! assert_eq!(params.dx, 0.01);
//! ```

use std::path::{ Path, PathBuf };
use serde::Deserialize;
use crate::{
    error::ConfigError,
    verify::Comparison,
    DEF_THRESHOLD,
};

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A half-open range of grid indices `[start, end)` covered by a wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Wall {
    pub start: usize,
    pub end: usize,
}

impl Wall {
    pub fn new(start: usize, end: usize) -> Self { Self { start, end } }

    /// Return `true` if `ix` lies inside the wall.
    pub fn contains(&self, ix: usize) -> bool {
        (self.start..self.end).contains(&ix)
    }

    fn check(&self, name: &'static str, nx: usize) -> ConfigResult<()> {
        (self.start <= self.end && self.end <= nx).then_some(())
            .ok_or(ConfigError::BadWall {
                name,
                start: self.start,
                end: self.end,
                nx,
            })
    }
}

/// Parameters for a single run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Number of grid points.
    pub nx: usize,
    /// Step counter bound; the run takes `nt - 1` steps.
    pub nt: usize,
    /// Grid spacing.
    pub dx: f64,
    /// Time step.
    pub dt: f64,
    /// Initial wavenumber of the packet.
    pub k0: f64,
    /// Packet width parameter; the envelope is `exp(-(x - x0)² / 4A)`.
    pub width: f64,
    /// Reduced Planck constant.
    pub hbar: f64,
    /// Particle mass.
    pub mass: f64,
    /// Wall near the low end of the grid.
    pub left_wall: Wall,
    /// Wall near the high end of the grid.
    pub right_wall: Wall,
    /// Potential energy inside both walls.
    pub barrier_height: f64,
    /// A snapshot is taken every `snapshot_every` steps.
    pub snapshot_every: usize,
    /// Only every `snapshot_stride`-th grid point is written to a snapshot.
    pub snapshot_stride: usize,
    /// File name prefix for snapshots; the sequence number is appended.
    pub snapshot_prefix: String,
    /// Directory receiving snapshot files.
    pub outdir: PathBuf,
    /// Allowed deviation of the norm from 1.
    pub norm_threshold: f64,
    /// How the norm deviation is compared against the threshold.
    pub norm_comparison: Comparison,
    /// Check the norm after every step (O(nx) each time).
    pub verify_every_step: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            nx: 16000,
            nt: 400000,
            dx: 0.01,
            dt: 0.0001,
            k0: 4.0,
            width: 1.0,
            hbar: 1.0,
            mass: 2.0,
            left_wall: Wall::new(0, 4000),
            right_wall: Wall::new(12000, 16000),
            barrier_height: 1e8,
            snapshot_every: 5000,
            snapshot_stride: 10,
            snapshot_prefix: "schrodinger".to_string(),
            outdir: PathBuf::from("output"),
            norm_threshold: DEF_THRESHOLD,
            norm_comparison: Comparison::Drift,
            verify_every_step: false,
        }
    }
}

impl Params {
    /// Parse parameters from a TOML string, filling in defaults for anything
    /// missing, and validate them.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let params: Self = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    /// Like [`Self::from_toml_str`], but read from a file.
    pub fn from_toml_file<P>(path: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| {
                ConfigError::TomlRead { path: path.to_path_buf(), source }
            })?;
        Self::from_toml_str(&contents)
    }

    /// Check that the parameters describe a runnable simulation.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.nx == 0 || self.nx % 2 != 0 {
            return Err(ConfigError::BadGridSize(self.nx));
        }
        if self.nt == 0 {
            return Err(ConfigError::BadStepCount(self.nt));
        }
        ConfigError::check_positive("dx", self.dx)?;
        ConfigError::check_positive("dt", self.dt)?;
        ConfigError::check_positive("width", self.width)?;
        ConfigError::check_positive("hbar", self.hbar)?;
        ConfigError::check_positive("mass", self.mass)?;
        ConfigError::check_positive("norm_threshold", self.norm_threshold)?;
        ConfigError::check_finite("k0", self.k0)?;
        ConfigError::check_finite("barrier_height", self.barrier_height)?;
        self.left_wall.check("left", self.nx)?;
        self.right_wall.check("right", self.nx)?;
        let left_empty = self.left_wall.start == self.left_wall.end;
        let right_empty = self.right_wall.start == self.right_wall.end;
        if !left_empty && !right_empty
            && self.left_wall.start < self.right_wall.end
            && self.right_wall.start < self.left_wall.end
        {
            return Err(ConfigError::OverlappingWalls {
                left_end: self.left_wall.end,
                right_start: self.right_wall.start,
            });
        }
        if self.snapshot_every == 0 { return Err(ConfigError::BadCadence); }
        if self.snapshot_stride == 0 { return Err(ConfigError::BadStride); }
        Ok(())
    }

    /// Nearest-neighbor coupling `B = ħ² / (2 m dx²)` of the discretized
    /// kinetic energy operator.
    pub fn coupling(&self) -> f64 {
        self.hbar.powi(2) / (2.0 * self.mass * self.dx.powi(2))
    }

    /// Center of the grid, `x0 = nx dx / 2`.
    pub fn center(&self) -> f64 { self.nx as f64 * self.dx / 2.0 }
}
