//! Generic 2D correlation with edge-replicated borders.
//!
//! Out-of-range taps sample the nearest edge value: no wraparound and no
//! zero padding, so flat regions stay flat up to the border.

/// Integer matrix, row-major. Used for both images and kernels.
///
/// # Example
/// ```
/// use ag_ascii::convolve::Matrix;
/// let m = Matrix::from([[1, 2], [3, 4], [5, 6]]);
/// assert_eq!((m.width, m.height), (2, 3));
/// assert_eq!(m.get(2, 1), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    /// Values, row-major.
    pub data: Vec<i32>,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

/// 3×3 kernel literal.
pub type Kernel3 = [[i32; 3]; 3];

impl Matrix {
    /// Matrix filled with `value`.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Matrix requires non-zero dimensions, got {width}×{height}"
        );
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Value at (row, col).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.width + col]
    }

    /// Overwrite the value at (row, col).
    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: i32) {
        self.data[row * self.width + col] = value;
    }
}

impl<const R: usize, const C: usize> From<[[i32; C]; R]> for Matrix {
    fn from(rows: [[i32; C]; R]) -> Self {
        assert!(R > 0 && C > 0, "Matrix requires non-zero dimensions, got {C}×{R}");
        Self {
            data: rows.iter().flatten().copied().collect(),
            width: C,
            height: R,
        }
    }
}

/// Correlate `matrix` with `kernel`, returning a matrix of the same size.
///
/// For each output cell `(m, n)`:
/// `Σ matrix[clamp(m - ri + i)][clamp(n - rj + j)] * kernel[i][j]`
/// with `ri = kernel.height / 2` and `rj = kernel.width / 2`.
/// Odd kernel sizes are assumed; even ones are anchored one cell up-left
/// of centre.
///
/// # Example
/// ```
/// use ag_ascii::convolve::{convolve, Matrix};
/// let m = Matrix::from([[1, 2], [3, 4]]);
/// let doubled = convolve(&m, &Matrix::from([[2]]));
/// assert_eq!(doubled.data, vec![2, 4, 6, 8]);
/// ```
#[must_use]
pub fn convolve(matrix: &Matrix, kernel: &Matrix) -> Matrix {
    let ri = kernel.height / 2;
    let rj = kernel.width / 2;
    let last_row = matrix.height - 1;
    let last_col = matrix.width - 1;

    let mut result = Matrix::filled(matrix.width, matrix.height, 0);

    for m in 0..matrix.height {
        for n in 0..matrix.width {
            let mut sum = 0i32;
            for i in 0..kernel.height {
                let x = (m + i).saturating_sub(ri).min(last_row);
                for j in 0..kernel.width {
                    let y = (n + j).saturating_sub(rj).min(last_col);
                    sum += matrix.get(x, y) * kernel.get(i, j);
                }
            }
            result.set(m, n, sum);
        }
    }

    result
}
