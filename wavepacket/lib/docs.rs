//! Theoretical background.
//!
//! # Contents
//! - [Discretization](#discretization)
//! - [Time dependence](#time-dependence)
//! - [Norm conservation](#norm-conservation)
//! - [Units](#units)
//!
//! # Discretization
//! We want to evolve the one-dimensional time-dependent Schrödinger equation
//! ```text
//!   ∂ψ      ħ² ∂²ψ
//! i -- = - --- --- + V(x) ψ
//!   ∂t     2 m ∂x²
//! ```
//! on the uniform grid *x*\[*i*\] = *i* *δx*, *i* ∊ {0, ..., *N* - 1}. The
//! usual three-point approximation to the second derivative turns the
//! Hamiltonian into a tridiagonal matrix,
//! ```text
//! (H ψ)[i] = (2 B + V[i]) ψ[i] - B ψ[i - 1] - B ψ[i + 1]
//!
//!       ħ²
//! B = -------
//!     2 m δx²
//! ```
//! with an *O*(*δx*²) error term. Writing *ψ* = *f* + *i* *g*, the state is
//! stored as the two real arrays *f* and *g*.
//!
//! # Time dependence
//! The exponential of a tridiagonal matrix is dense, but *H* splits naturally
//! into three pieces whose exponentials are not:
//! ```text
//! H = D + K_even + K_odd
//!
//! D[i, i] = 2 B + V[i]
//! K_even  = -B (couplings (0, 1), (2, 3), (4, 5), ...)
//! K_odd   = -B (couplings (1, 2), (3, 4), (5, 6), ...)
//! ```
//! *D* is diagonal, so its exponential is a phase at each grid point. Within
//! *K*<sub>even</sub> (or *K*<sub>odd</sub>) no two couplings share a grid
//! point, so its exponential is block diagonal, made of independent 2×2 blocks
//! ```text
//!  i B dt σx
//! e          = cos(B dt) I + i sin(B dt) σx
//! ```
//! which in terms of *f* and *g* reads
//! ```text
//! f[i]'     = cos(φ) f[i]     - sin(φ) g[i + 1]
//! g[i]'     = cos(φ) g[i]     + sin(φ) f[i + 1]
//! f[i + 1]' = cos(φ) f[i + 1] - sin(φ) g[i]
//! g[i + 1]' = cos(φ) g[i + 1] + sin(φ) f[i]
//!
//! φ = B dt
//! ```
//! This is the "checkerboard" splitting. One step is then
//! ```text
//! ψ(t + dt) = e^(-i K_odd dt) e^(-i K_even dt) e^(-i D' dt) ψ(t) + O(dt²)
//! ```
//! where the diagonal factor is applied as the pointwise rotation
//! ```text
//! f' =  cos(φ) f + sin(φ) g
//! g' = -sin(φ) f + cos(φ) g
//!
//! φ = (2 B - V) dt
//! ```
//! i.e. *ψ* → *ψ* exp(-*i* *φ*). Note the sign of *V* in *φ*: the walls used
//! here are high enough (*V* *dt* ~ 10⁴) that the phase winds many times per
//! step at every wall point.
//!
//! Each of the three factors touches each grid point at most once, so every
//! sweep is trivially parallel over grid points (or pairs) even though the
//! steps themselves must be taken in sequence. On the odd sweep, the last
//! point of an even-length grid has no partner and is left alone; the first
//! point is likewise unpaired.
//!
//! # Norm conservation
//! All three factors are exactly unitary, so the total probability
//! ```text
//! Σ (f[i]² + g[i]²)
//! ```
//! is conserved up to round-off no matter how large *dt* is. (Here and
//! throughout the crate, the norm is a bare grid sum with no factor of *δx*.)
//! This makes drift in the norm a sensitive check for bugs in the propagator
//! rather than for step size; accuracy of the dynamics itself depends on
//! *B* *dt* ≪ 1 and on resolving the packet's wavelength, 2π / *k*₀ ≫ *δx*.
//! Nothing in the propagator renormalizes the state: see
//! [`verify`][crate::verify].
//!
//! # Units
//! The default parameters take *ħ* = 1 and *m* = 2, so that *B* = 1 / (4
//! *δx*²) and *dt* is measured in units of *ħ* / energy. The phase angles
//! above carry no explicit factor of 1/*ħ*; for *ħ* ≠ 1, *dt* should be read
//! as *dt* / *ħ*.
