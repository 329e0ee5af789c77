use crate::bracket::bracket_minimum;
use crate::{BRENT_MAX_ITER, BRENT_TOL, GOLDEN_SECTION};

/// Minimize `f` starting from `x0`: bracket first, then refine with
/// Brent's method (parabolic interpolation when it makes progress,
/// golden-section otherwise). Returns `(x*, f(x*))`.
pub fn minimize(mut f: impl FnMut(f64) -> f64, x0: f64) -> (f64, f64) {
    let (left, mid, right) = bracket_minimum(&mut f, x0);
    brent(&mut f, left.0, right.0, mid.0, mid.1)
}

fn brent(f: &mut impl FnMut(f64) -> f64, a0: f64, b0: f64, x_init: f64, fx_init: f64) -> (f64, f64) {
    let (mut a, mut b) = if a0 <= b0 { (a0, b0) } else { (b0, a0) };

    let mut x = x_init;
    let mut w = x_init;
    let mut v = x_init;
    let mut fx = fx_init;
    let mut fw = fx_init;
    let mut fv = fx_init;
    let mut e = 0.0_f64;
    let mut d = 0.0_f64;

    for iter in 0..BRENT_MAX_ITER {
        let m = 0.5 * (a + b);
        let tol1 = BRENT_TOL * x.abs() + 1e-11;
        let tol2 = 2.0 * tol1;

        log::trace!("brent iter {iter}: x={x}, fx={fx}, bracket=[{a}, {b}]");

        if (x - m).abs() <= tol2 - 0.5 * (b - a) {
            break;
        }

        let mut use_golden = true;
        let mut d_candidate = 0.0_f64;

        if e.abs() > tol1 {
            let r = (x - w) * (fx - fv);
            let q0 = (x - v) * (fx - fw);
            let mut p = (x - v) * q0 - (x - w) * r;
            let mut q = 2.0 * (q0 - r);
            if q > 0.0 {
                p = -p;
            } else {
                q = -q;
            }
            let e_prev = e;
            if p.abs() < (0.5 * q * e_prev).abs() && p > q * (a - x) && p < q * (b - x) {
                d_candidate = p / q;
                let u = x + d_candidate;
                if (u - a) < tol2 || (b - u) < tol2 {
                    d_candidate = if m >= x { tol1 } else { -tol1 };
                }
                use_golden = false;
            }
        }

        if use_golden {
            e = if x < m { b - x } else { a - x };
            d_candidate = GOLDEN_SECTION * e;
        } else {
            e = d;
        }
        d = d_candidate;

        let u = if d.abs() >= tol1 {
            x + d
        } else {
            x + tol1.copysign(d)
        };
        let fu = f(u);

        if fu <= fx {
            if u < x {
                b = x;
            } else {
                a = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    (x, fx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_minimum_of_a_quadratic() {
        let (x, fx) = minimize(|x: f64| (x - 2.5).powi(2) + 1.0, 0.0);
        assert!((x - 2.5).abs() < 1e-4, "x = {x}");
        assert!((fx - 1.0).abs() < 1e-6, "fx = {fx}");
    }

    #[test]
    fn finds_minimum_regardless_of_start_side() {
        for x0 in [-10.0, -1.0, 0.0, 1.0, 10.0] {
            let (x, _) = minimize(|x: f64| (x + 3.25).powi(2), x0);
            assert!((x + 3.25).abs() < 1e-3, "x0={x0} -> x={x}");
        }
    }

    #[test]
    fn handles_quartic_with_flat_region() {
        let (x, _) = minimize(|x: f64| (x - 1.0).powi(4) + 0.01 * x * x, 5.0);
        assert!(x.is_finite());
        assert!((x - 1.0).abs() < 0.5, "x = {x}");
    }
}
