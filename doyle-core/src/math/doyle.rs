//! Solver for the nonlinear system defining a Doyle spiral.
//!
//! For integer parameters `(p, q)` the spiral is characterized by a complex
//! step ratio `a = z·e^{it}` along each family and a cross-family ratio
//! `b = z^{p/q}·e^{i(pt+2π)/q}`, where `(z, t)` solves
//!
//!   r(z, t, 0, 1) = r(z, t, p, q)
//!   r(z, t, 0, 1) = r(z^{p/q}, (p·t + 2π)/q, 0, 1)
//!
//! with `r = d / s` built from the trigonometric expressions below.

use std::f64::consts::TAU;

use log::debug;
use nalgebra::{Matrix2, Vector2};
use num_complex::Complex64;

use crate::error::{Error, Result};

/// Default tolerance for the root-find residual.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

const MAX_ITERATIONS: usize = 200;
const INITIAL_GUESS: (f64, f64) = (2.0, 0.0);

fn d_(z: f64, t: f64, p: f64, q: f64) -> f64 {
    let w = z.powf(p / q);
    let s = (p * t + TAU) / q;
    (z * t.cos() - w * s.cos()).powi(2) + (z * t.sin() - w * s.sin()).powi(2)
}

fn s_(z: f64, p: f64, q: f64) -> f64 {
    (z + z.powf(p / q)).powi(2)
}

fn r_(z: f64, t: f64, p: f64, q: f64) -> f64 {
    d_(z, t, p, q) / s_(z, p, q)
}

/// Solved step ratios for one `(p, q)` pair.
///
/// Independent of the deformation parameter `t`; downstream generation
/// rescales and rotates the whole solution. Values are immutable once
/// solved, so callers may cache them per `(p, q)` key without
/// synchronization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoyleSolution {
    /// Step ratio along a family (outward multiplication).
    pub a: Complex64,
    /// Step ratio between families.
    pub b: Complex64,
    /// Base radius ratio.
    pub r: f64,
    /// Modulus of `a`.
    pub mod_a: f64,
    /// Argument of `a`.
    pub arg_a: f64,
}

impl DoyleSolution {
    /// Solve the Doyle system for `(p, q)` at the default tolerance.
    pub fn solve(p: i64, q: i64) -> Result<Self> {
        Self::solve_with_tolerance(p, q, DEFAULT_TOLERANCE)
    }

    /// Solve the Doyle system with an explicit residual tolerance.
    pub fn solve_with_tolerance(p: i64, q: i64, tolerance: f64) -> Result<Self> {
        if q < 2 {
            return Err(Error::FamilyCount(q));
        }
        let pf = p as f64;
        let qf = q as f64;

        let f = |z: f64, t: f64| -> Vector2<f64> {
            let base = r_(z, t, 0., 1.);
            Vector2::new(
                base - r_(z, t, pf, qf),
                base - r_(z.powf(pf / qf), (pf * t + TAU) / qf, 0., 1.),
            )
        };

        let (z, t, residual, iterations) = newton2(f, INITIAL_GUESS, tolerance)
            .ok_or(Error::Convergence {
                p,
                q,
                residual: f64::NAN,
                iterations: MAX_ITERATIONS,
            })?;
        if !(residual < tolerance) {
            return Err(Error::Convergence { p, q, residual, iterations });
        }
        debug!(
            "doyle solve p={} q={}: z={:.9} t={:.9} residual={:.3e} ({} iterations)",
            p, q, z, t, residual, iterations
        );

        let r = r_(z, t, 0., 1.).sqrt();
        let a = Complex64::from_polar(z, t);
        let b = Complex64::from_polar(z.powf(pf / qf), (pf * t + TAU) / qf);
        Ok(DoyleSolution { a, b, r, mod_a: z, arg_a: t })
    }
}

/// Damped Newton iteration on a 2-variable system with a central
/// finite-difference Jacobian. Returns `(z, t, residual, iterations)`,
/// or `None` if the Jacobian becomes singular or the iterates go
/// non-finite.
fn newton2<F>(f: F, start: (f64, f64), tolerance: f64) -> Option<(f64, f64, f64, usize)>
where
    F: Fn(f64, f64) -> Vector2<f64>,
{
    let (mut z, mut t) = start;
    let mut fv = f(z, t);
    let mut residual = fv.amax();

    for iteration in 0..MAX_ITERATIONS {
        if residual < tolerance {
            return Some((z, t, residual, iteration));
        }

        let hz = 1e-7 * z.abs().max(1.0);
        let ht = 1e-7 * t.abs().max(1.0);
        let dz = (f(z + hz, t) - f(z - hz, t)) / (2.0 * hz);
        let dt = (f(z, t + ht) - f(z, t - ht)) / (2.0 * ht);
        let jac = Matrix2::new(dz[0], dt[0], dz[1], dt[1]);
        let step = jac.lu().solve(&fv)?;

        // Backtrack until the residual improves.
        let mut damping = 1.0;
        let mut accepted = false;
        for _ in 0..12 {
            let zn = z - damping * step[0];
            let tn = t - damping * step[1];
            let fn_ = f(zn, tn);
            let rn = fn_.amax();
            if rn.is_finite() && rn < residual {
                z = zn;
                t = tn;
                fv = fn_;
                residual = rn;
                accepted = true;
                break;
            }
            damping *= 0.5;
        }
        if !accepted {
            return Some((z, t, residual, iteration));
        }
        if !z.is_finite() || !t.is_finite() {
            return None;
        }
    }
    Some((z, t, residual, MAX_ITERATIONS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_solve_16_16() {
        let sol = DoyleSolution::solve(16, 16).unwrap();
        assert!(sol.a.norm() > 0.);
        assert!(sol.r > 0.);
        assert_relative_eq!(sol.mod_a, sol.a.norm(), epsilon = 1e-9);
        assert_relative_eq!(sol.arg_a, sol.a.arg(), epsilon = 1e-9);
    }

    #[test]
    fn test_solve_various_pq() {
        for (p, q) in [(7, 32), (0, 8), (2, 9), (16, 16)] {
            let sol = DoyleSolution::solve(p, q)
                .unwrap_or_else(|e| panic!("p={} q={}: {}", p, q, e));
            assert!(sol.a.norm() > 0., "p={} q={}", p, q);
            assert!(sol.r > 0., "p={} q={}", p, q);
        }
    }

    #[test]
    fn test_solution_satisfies_system() {
        let sol = DoyleSolution::solve(16, 16).unwrap();
        let z = sol.mod_a;
        let t = sol.arg_a;
        let base = r_(z, t, 0., 1.);
        assert_relative_eq!(base, r_(z, t, 16., 16.), epsilon = 1e-5);
        assert_relative_eq!(
            base,
            r_(z.powf(1.), (16. * t + TAU) / 16., 0., 1.),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_q_below_two_rejected() {
        assert!(matches!(
            DoyleSolution::solve(3, 1),
            Err(Error::FamilyCount(1))
        ));
    }
}
