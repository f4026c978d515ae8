//! Provides a finite-difference integrator for the one-dimensional,
//! time-dependent Schrödinger equation, aimed at a Gaussian wavepacket
//! bouncing between rectangular walls.
//!
//! The pieces are:
//! - [`config`]: run parameters, validation, and TOML loading
//! - [`state`]: the wavefunction and its initial conditions
//! - [`propagate`]: checkerboard operator-splitting time steps and the main
//!   loop
//! - [`verify`]: norm conservation diagnostics
//! - [`snapshot`]: threaded writing of decimated probability densities
//!
//! ```no_run
//! use wavepacket::{ config::Params, propagate::Propagator, snapshot::SnapshotWriter };
//!
//! let params = Params::default();
//! let mut writer = SnapshotWriter::from_params(&params).unwrap();
//! let mut propagator = Propagator::new(params).unwrap();
//! let summary = propagator.run(&mut writer);
//! let report = writer.finish();
//! println!("{} steps, {} files", summary.steps, report.written.len());
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod config;
pub mod state;
pub mod propagate;
pub mod verify;
pub mod snapshot;

pub mod docs;

pub(crate) const DEF_THRESHOLD: f64 = 1e-6;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
