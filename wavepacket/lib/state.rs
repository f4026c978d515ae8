//! Wavefunction representation and initial conditions.
//!
//! The wavefunction is stored as a pair of real arrays, `f` holding the real
//! part and `g` the imaginary part, rather than a single complex array; the
//! kinetic sweeps in [`propagate`][crate::propagate] mix the real part of one
//! point with the imaginary part of its neighbor.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    config::Params,
    error::LengthError,
};

/// A wavefunction sampled on a uniform grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Wavefunction {
    pub(crate) f: nd::Array1<f64>,
    pub(crate) g: nd::Array1<f64>,
}

impl Wavefunction {
    /// Build from real and imaginary parts.
    pub fn from_parts(f: nd::Array1<f64>, g: nd::Array1<f64>)
        -> Result<Self, LengthError>
    {
        LengthError::check(&f, &g)?;
        Ok(Self { f, g })
    }

    /// Build from a complex-valued array.
    pub fn from_complex<S>(q: &Arr1<S>) -> Self
    where S: nd::Data<Elem = C64>
    {
        Self { f: q.mapv(|qk| qk.re), g: q.mapv(|qk| qk.im) }
    }

    /// Real part.
    pub fn f(&self) -> &nd::Array1<f64> { &self.f }

    /// Imaginary part.
    pub fn g(&self) -> &nd::Array1<f64> { &self.g }

    /// Number of grid points.
    pub fn len(&self) -> usize { self.f.len() }

    pub fn is_empty(&self) -> bool { self.f.is_empty() }

    /// Grid sum of `f² + g²`.
    ///
    /// Note that this carries no factor of `dx`: a wavefunction is normalized
    /// when the *sum* of its probabilities is 1.
    pub fn norm_sq(&self) -> f64 {
        nd::Zip::from(&self.f).and(&self.g)
            .fold(0.0, |acc, fk, gk| acc + fk * fk + gk * gk)
    }

    /// Probability at each grid point.
    pub fn density(&self) -> nd::Array1<f64> {
        nd::Zip::from(&self.f).and(&self.g)
            .map_collect(|fk, gk| fk * fk + gk * gk)
    }

    /// Copy into a complex-valued array.
    pub fn to_complex(&self) -> nd::Array1<C64> {
        nd::Zip::from(&self.f).and(&self.g)
            .map_collect(|fk, gk| C64::new(*fk, *gk))
    }

    /// Consume `self`, returning the real and imaginary parts.
    pub fn into_parts(self) -> (nd::Array1<f64>, nd::Array1<f64>) {
        (self.f, self.g)
    }
}

/// Gaussian envelope times a plane wave, centered on the grid and normalized
/// so that the grid sum of probabilities is 1.
pub fn initialize_wavefunction(params: &Params) -> Wavefunction {
    let x0 = params.center();
    let mut f: nd::Array1<f64> = nd::Array1::zeros(params.nx);
    let mut g: nd::Array1<f64> = nd::Array1::zeros(params.nx);
    let mut norm: f64 = 0.0;
    nd::Zip::indexed(&mut f).and(&mut g)
        .for_each(|ix, fk, gk| {
            let u = params.dx * ix as f64 - x0;
            let envelope = (-u * u / (4.0 * params.width)).exp();
            let (s, c) = (params.k0 * u).sin_cos();
            *fk = envelope * c;
            *gk = envelope * s;
            norm += *fk * *fk + *gk * *gk;
        });
    let norm = norm.sqrt();
    f.map_inplace(|fk| { *fk /= norm; });
    g.map_inplace(|gk| { *gk /= norm; });
    log::debug!("initialized wavepacket on {} points (raw norm {:.6e})",
        params.nx, norm * norm);
    Wavefunction { f, g }
}

/// Zero potential everywhere except the two walls, which sit at
/// `params.barrier_height`.
pub fn initialize_potential(params: &Params) -> nd::Array1<f64> {
    let mut v: nd::Array1<f64> = nd::Array1::zeros(params.nx);
    for wall in [params.left_wall, params.right_wall] {
        v.slice_mut(nd::s![wall.start..wall.end]).fill(params.barrier_height);
    }
    v
}
