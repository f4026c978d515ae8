//! Time evolution by operator splitting on the real/imaginary parts of the
//! wavefunction.
//!
//! With `B = ħ² / (2 m dx²)`, the discretized Hamiltonian has diagonal
//! `2 B + V` and nearest-neighbor coupling `-B`. One step applies, in order,
//! - the diagonal part as a local phase rotation at every grid point,
//! - the coupling between the pairs `(0, 1), (2, 3), ...`,
//! - the coupling between the pairs `(1, 2), (3, 4), ...`.
//!
//! Pairs within a sweep never overlap, so each sweep is an exact 2×2 unitary
//! per pair. See [`docs`][crate::docs#time-dependence] for details.

use ndarray as nd;
use crate::{
    Arr1,
    config::{ ConfigResult, Params },
    error::{ LengthError, SetupError },
    snapshot::Emitter,
    state::{ Wavefunction, initialize_potential, initialize_wavefunction },
    verify::verify_norm,
};

/// Selects which set of neighboring pairs a kinetic sweep couples.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Offset {
    /// Pairs starting on even indices.
    Even,
    /// Pairs starting on odd indices.
    Odd,
}

impl Offset {
    fn start(&self) -> usize {
        match self {
            Self::Even => 0,
            Self::Odd => 1,
        }
    }
}

/// Rotate the phase at every grid point by `φ = (2 B - V) dt`.
///
/// *Panics if `v` and `wf` differ in length*.
pub fn apply_potential<S>(wf: &mut Wavefunction, v: &Arr1<S>, b: f64, dt: f64)
where S: nd::Data<Elem = f64>
{
    nd::Zip::from(&mut wf.f).and(&mut wf.g).and(v)
        .for_each(|fk, gk, vk| {
            let (s, c) = ((2.0 * b - vk) * dt).sin_cos();
            let fp = c * *fk + s * *gk;
            let gp = -s * *fk + c * *gk;
            *fk = fp;
            *gk = gp;
        });
}

// mix f with the neighboring g for one pair of grid points
fn rotate_pair(
    c: f64,
    s: f64,
    f: &mut nd::ArrayViewMut1<f64>,
    g: &mut nd::ArrayViewMut1<f64>,
) {
    let (f0, f1, g0, g1) = (f[0], f[1], g[0], g[1]);
    f[0] = c * f0 - s * g1;
    g[0] = s * f1 + c * g0;
    f[1] = c * f1 - s * g0;
    g[1] = s * f0 + c * g1;
}

/// Couple neighboring grid points pairwise with angle `φ = B dt`.
///
/// Any point left without a partner at the end of the grid is untouched.
pub fn apply_kinetic(wf: &mut Wavefunction, b: f64, dt: f64, offset: Offset) {
    let n = wf.len();
    let start = offset.start();
    if n < start + 2 { return; }
    let end = start + 2 * ((n - start) / 2);
    let (s, c) = (b * dt).sin_cos();
    let mut f = wf.f.slice_mut(nd::s![start..end]);
    let mut g = wf.g.slice_mut(nd::s![start..end]);
    nd::Zip::from(f.exact_chunks_mut(2)).and(g.exact_chunks_mut(2))
        .for_each(|mut fp, mut gp| rotate_pair(c, s, &mut fp, &mut gp));
}

/// Take a single full step *in place*.
///
/// *Panics if `v` and `wf` differ in length*.
pub fn step<S>(wf: &mut Wavefunction, v: &Arr1<S>, b: f64, dt: f64)
where S: nd::Data<Elem = f64>
{
    apply_potential(wf, v, b, dt);
    apply_kinetic(wf, b, dt, Offset::Even);
    apply_kinetic(wf, b, dt, Offset::Odd);
}

/// Counts gathered over a call to [`Propagator::run`] or
/// [`Propagator::evolve`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Number of steps taken.
    pub steps: usize,
    /// Number of wavefunction copies handed to the emitter.
    pub snapshots: usize,
    /// Number of norm checks made.
    pub checks: usize,
    /// Number of norm checks that were flagged.
    pub flagged: usize,
    /// Norm of the wavefunction when the run ended.
    pub final_norm: f64,
}

/// Owns the state of a single run.
#[derive(Clone, Debug)]
pub struct Propagator {
    params: Params,
    wf: Wavefunction,
    v: nd::Array1<f64>,
    b: f64,
}

impl Propagator {
    /// Validate `params` and set up the initial wavepacket and potential.
    pub fn new(params: Params) -> ConfigResult<Self> {
        params.validate()?;
        let wf = initialize_wavefunction(&params);
        let v = initialize_potential(&params);
        log::debug!("initial norm: {:.12}", wf.norm_sq());
        let b = params.coupling();
        Ok(Self { params, wf, v, b })
    }

    /// Like [`Self::new`], but start from a given wavefunction and potential.
    pub fn with_state(params: Params, wf: Wavefunction, v: nd::Array1<f64>)
        -> Result<Self, SetupError>
    {
        params.validate()?;
        LengthError::check(&wf.f, &v)?;
        if wf.len() != params.nx {
            return Err(LengthError(wf.len(), params.nx).into());
        }
        let b = params.coupling();
        Ok(Self { params, wf, v, b })
    }

    pub fn params(&self) -> &Params { &self.params }

    pub fn wavefunction(&self) -> &Wavefunction { &self.wf }

    pub fn potential(&self) -> &nd::Array1<f64> { &self.v }

    pub fn into_wavefunction(self) -> Wavefunction { self.wf }

    /// Run the main loop over steps `1..nt`.
    ///
    /// A copy of the wavefunction is handed to `emitter` at the start of every
    /// step whose number is a multiple of `params.snapshot_every`, before that
    /// step is applied.
    pub fn evolve<E>(&mut self, emitter: &mut E) -> RunSummary
    where E: Emitter
    {
        let Params {
            nt,
            dt,
            snapshot_every,
            norm_threshold,
            norm_comparison,
            verify_every_step,
            ..
        } = self.params;
        log::info!("evolving over {} steps", nt.saturating_sub(1));
        let mut summary = RunSummary::default();
        for it in 1..nt {
            if it % snapshot_every == 0 {
                log::trace!("step {it}: handing off snapshot");
                emitter.emit(self.wf.clone());
                summary.snapshots += 1;
            }
            step(&mut self.wf, &self.v, self.b, dt);
            summary.steps += 1;
            if verify_every_step {
                let check = verify_norm(&self.wf, norm_threshold, norm_comparison);
                summary.checks += 1;
                if check.flagged { summary.flagged += 1; }
            }
        }
        summary.final_norm = self.wf.norm_sq();
        summary
    }

    /// Emit the current state, [evolve][Self::evolve], then emit the final
    /// state.
    pub fn run<E>(&mut self, emitter: &mut E) -> RunSummary
    where E: Emitter
    {
        emitter.emit(self.wf.clone());
        let mut summary = self.evolve(emitter);
        emitter.emit(self.wf.clone());
        summary.snapshots += 2;
        log::info!(
            "finished {} steps; final norm {:.9}",
            summary.steps,
            summary.final_norm,
        );
        summary
    }
}
