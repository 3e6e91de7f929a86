use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Div, Mul, Sub};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct R2 {
    pub x: f64,
    pub y: f64,
}

impl R2 {
    pub fn new(x: f64, y: f64) -> Self {
        R2 { x, y }
    }

    pub fn dot(&self, o: &R2) -> f64 {
        self.x * o.x + self.y * o.y
    }

    /// z-component of the 2-D cross product.
    pub fn cross(&self, o: &R2) -> f64 {
        self.x * o.y - self.y * o.x
    }

    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Display for R2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl From<Complex64> for R2 {
    fn from(z: Complex64) -> Self {
        R2 { x: z.re, y: z.im }
    }
}

impl From<R2> for Complex64 {
    fn from(p: R2) -> Self {
        Complex64::new(p.x, p.y)
    }
}

impl Add for R2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for R2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for R2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        R2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Div<f64> for R2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        R2 {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}
