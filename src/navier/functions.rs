//! Global quantities of a flow state
//!
//! Evaluated on demand by the caller, never while stepping.
use super::conv_term::{ddx_at, ddy_at};
use crate::field::{max_abs, norm_l2, FieldState, Grid};
use ndarray::Array2;

/// Returns Nusselt number (heat flux at the plates)
/// $$
/// Nu = \langle - dTdy \rangle\\_x (0/H) \cdot H
/// $$
/// averaged over bottom and top. Wall gradients are one-sided,
/// second order.
pub fn eval_nu(grid: &Grid, fields: &FieldState) -> f64 {
    let dtdy = ddy_walls(grid, &fields.temp);
    let x_avg = grid.average_axis(&dtdy, 1);
    let n = x_avg.len();
    -(x_avg[0] + x_avg[n - 1]) / 2. * grid.ly()
}

/// Returns volumetric Nusselt number
/// $$
/// Nuvol = \langle uy*T/kappa - dTdy \rangle\\_V \cdot H
/// $$
pub fn eval_nuvol(grid: &Grid, fields: &FieldState, ka: f64) -> f64 {
    let dtdy = ddy_walls(grid, &fields.temp);
    let uy_temp = &fields.uy * &fields.temp;
    let nuvol = uy_temp / ka - dtdy;
    grid.average(&nuvol) * grid.ly()
}

/// Returns Reynolds number based on the mean speed
/// $$
/// Re = U*H / nu, \quad U = \sqrt{ux^2 + uy^2}
/// $$
pub fn eval_re(grid: &Grid, fields: &FieldState, nu: f64) -> f64 {
    let speed = speed(fields);
    grid.average(&speed) * grid.ly() / nu
}

/// Root mean square of the velocity magnitude
pub fn rms_velocity(grid: &Grid, fields: &FieldState) -> f64 {
    let ekin = fields.ux.mapv(|x| x.powi(2)) + fields.uy.mapv(|x| x.powi(2));
    grid.average(&ekin).sqrt()
}

/// Largest absolute vorticity
pub fn max_vorticity(fields: &FieldState) -> f64 {
    max_abs(&fields.vort)
}

/// L2 norm of the discrete divergence du/dx + dw/dy on interior rows
pub fn divergence_norm(grid: &Grid, fields: &FieldState) -> f64 {
    let mut div = Array2::<f64>::zeros((grid.ny() - 2, grid.period()));
    for ((j, i), d) in div.indexed_iter_mut() {
        *d = ddx_at(grid, &fields.ux, j + 1, i) + ddy_at(grid, &fields.uy, j + 1, i);
    }
    norm_l2(&div)
}

fn speed(fields: &FieldState) -> Array2<f64> {
    let mut speed = fields.ux.mapv(|x| x.powi(2));
    speed.zip_mut_with(&fields.uy, |s, w| *s = (*s + w * w).sqrt());
    speed
}

/// d/dy on all rows: central inside, one-sided at the walls
fn ddy_walls(grid: &Grid, f: &Array2<f64>) -> Array2<f64> {
    let (ny, nx) = grid.shape();
    let h2 = 2. * grid.dy();
    let mut out = grid.zeros();
    for i in 0..nx {
        for j in 1..ny - 1 {
            out[[j, i]] = ddy_at(grid, f, j, i);
        }
        out[[0, i]] = (-3. * f[[0, i]] + 4. * f[[1, i]] - f[[2, i]]) / h2;
        out[[ny - 1, i]] = (3. * f[[ny - 1, i]] - 4. * f[[ny - 2, i]] + f[[ny - 3, i]]) / h2;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::apply_boundary;
    use crate::navier::velocity::reconstruct_velocity;
    use std::f64::consts::PI;

    fn approx_eq(a: f64, b: f64, dif: f64) {
        if (a - b).abs() > dif {
            panic!("Large difference of values, got {} expected {}.", a, b)
        }
    }

    #[test]
    fn test_conduction_nusselt() {
        let grid = Grid::new(17, 9, 2.0, 1.5).unwrap();
        let fields = FieldState::conduction(&grid);
        approx_eq(eval_nu(&grid, &fields), 1., 1e-12);
        approx_eq(eval_nuvol(&grid, &fields, 1.), 1., 1e-12);
        approx_eq(eval_re(&grid, &fields, 1.), 0., 1e-15);
        approx_eq(rms_velocity(&grid, &fields), 0., 1e-15);
        approx_eq(divergence_norm(&grid, &fields), 0., 1e-15);
    }

    #[test]
    fn test_uniform_flow() {
        let grid = Grid::new(9, 5, 1.0, 1.0).unwrap();
        let mut fields = FieldState::zeros(&grid);
        fields.ux.fill(3.);
        fields.uy.fill(4.);
        fields.vort[[2, 2]] = -7.;
        approx_eq(rms_velocity(&grid, &fields), 5., 1e-12);
        approx_eq(eval_re(&grid, &fields, 0.5), 10., 1e-12);
        approx_eq(max_vorticity(&fields), 7., 0.);
    }

    #[test]
    fn test_divergence_free() {
        // velocities derived from any psi with zero walls are
        // discretely divergence free
        let grid = Grid::new(33, 17, 2.0, 1.0).unwrap();
        let mut fields = FieldState::zeros(&grid);
        for (j, y) in grid.y().iter().enumerate() {
            for (i, x) in grid.x().iter().enumerate() {
                fields.psi[[j, i]] = (PI * y).sin() * (PI * x).cos();
            }
        }
        apply_boundary(&grid, &mut fields);
        reconstruct_velocity(&grid, &fields.psi, &mut fields.ux, &mut fields.uy);
        assert!(rms_velocity(&grid, &fields) > 0.1);
        approx_eq(divergence_norm(&grid, &fields), 0., 1e-10);
    }
}
