// Matrix helpers for DMat4
//
// glam stores matrices column-major; the viewing matrices are easier to read
// written row by row.

use glam::DMat4;

/// Extension trait for DMat4 construction and debug output.
pub trait DMat4Ext {
    /// Build a matrix from its rows.
    fn from_rows(rows: [[f64; 4]; 4]) -> Self;

    /// Rows of the matrix, for printing.
    fn to_rows(&self) -> [[f64; 4]; 4];
}

impl DMat4Ext for DMat4 {
    fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        DMat4::from_cols_array_2d(&rows).transpose()
    }

    fn to_rows(&self) -> [[f64; 4]; 4] {
        self.transpose().to_cols_array_2d()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec3, DVec4};

    #[test]
    fn test_from_rows_translation() {
        let mat = DMat4::from_rows([
            [1.0, 0.0, 0.0, 10.0],
            [0.0, 1.0, 0.0, 20.0],
            [0.0, 0.0, 1.0, 30.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        assert_eq!(mat, DMat4::from_translation(DVec3::new(10.0, 20.0, 30.0)));
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = [
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ];
        assert_eq!(DMat4::from_rows(rows).to_rows(), rows);
    }

    #[test]
    fn test_row_times_vector() {
        let mat = DMat4::from_rows([
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ]);

        // Last row copies z into w
        let v = mat * DVec4::new(1.0, 2.0, -3.0, 1.0);
        assert_eq!(v.w, -3.0);
    }
}
