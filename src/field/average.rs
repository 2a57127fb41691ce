//! Implementations of volumetric weight averages
use super::Grid;
use ndarray::prelude::*;
use ndarray::Data;

impl Grid {
    /// Return volumetric weighted average along axis
    ///
    /// `axis = 1` averages over the periodic direction (one value per row),
    /// `axis = 0` averages from wall to wall with the trapezoidal rule
    /// (one value per column).
    /// # Example
    ///```
    /// use ndarray::Array2;
    /// use rustrbc::Grid;
    /// let grid = Grid::new(5, 3, 1.0, 1.0).unwrap();
    /// let mut v = Array2::<f64>::zeros(grid.shape());
    /// for (j, mut row) in v.outer_iter_mut().enumerate() {
    ///     row.fill(j as f64);
    /// }
    /// assert_eq!(grid.average_axis(&v, 1).to_vec(), vec![0., 1., 2.]);
    /// assert_eq!(grid.average_axis(&v, 0).to_vec(), vec![1.; 5]);
    ///```
    ///
    /// # Panics
    /// If `axis > 1`.
    pub fn average_axis<S>(&self, v: &ArrayBase<S, Ix2>, axis: usize) -> Array1<f64>
    where
        S: Data<Elem = f64>,
    {
        match axis {
            0 => {
                let w = self.weights_y();
                let mut avg = Array1::<f64>::zeros(v.shape()[1]);
                for (row, wj) in v.outer_iter().zip(w.iter()) {
                    avg.scaled_add(*wj, &row);
                }
                avg
            }
            1 => {
                let m = self.period();
                v.slice(s![.., ..m]).sum_axis(Axis(1)) / m as f64
            }
            _ => panic!("average_axis: axis must be 0 or 1, got {}", axis),
        }
    }

    /// Return volumetric weighted average
    /// # Example
    ///```
    /// use ndarray::Array2;
    /// use rustrbc::Grid;
    /// let grid = Grid::new(5, 5, 1.0, 1.0).unwrap();
    /// let mut v = Array2::<f64>::zeros(grid.shape());
    /// for (j, mut row) in v.outer_iter_mut().enumerate() {
    ///     row.fill(j as f64);
    /// }
    /// assert!((grid.average(&v) - 2.).abs() < 1e-12);
    ///```
    pub fn average<S>(&self, v: &ArrayBase<S, Ix2>) -> f64
    where
        S: Data<Elem = f64>,
    {
        let avg_x = self.average_axis(v, 1);
        avg_x.dot(&self.weights_y())
    }

    /// Trapezoidal weights in y, normalized to unit sum
    fn weights_y(&self) -> Array1<f64> {
        let n = self.ny();
        let mut w = Array1::<f64>::from_elem(n, 1. / (n - 1) as f64);
        w[0] *= 0.5;
        w[n - 1] *= 0.5;
        w
    }
}
