use core::ops::{Index, IndexMut};

/// Slice of data with a stride.
pub struct StridedVecView<'a, A: 'a> {
    pub data: &'a [A],
    pub start: usize,
    pub stride: usize,
}

impl<'a, A: 'a> StridedVecView<'a, A> {
    pub fn new(data: &'a [A], start: usize, stride: usize) -> Self {
        Self {
            data,
            start,
            stride,
        }
    }

    pub fn len(&self) -> usize {
        if self.start >= self.data.len() {
            return 0;
        }
        (self.data.len() - self.start + self.stride - 1) / self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> + '_ {
        (0..self.len()).map(move |pos| &self[pos])
    }
}

impl<'a, A: 'a> Index<usize> for StridedVecView<'a, A> {
    type Output = A;
    fn index(&self, pos: usize) -> &A {
        &self.data[self.start + pos * self.stride]
    }
}

/// Store a dense matrix in a column-major way.
///
/// The trees use it with one row per dimension and one column per sample, so a
/// sample is a contiguous slice and moving a sample is a column swap.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMajorMatrix<A> {
    /// Number of rows in the matrix
    n_rows: usize,
    /// Number of columns in the matrix
    n_cols: usize,
    /// Values used by the algorithm, column after column
    values: Vec<A>,
}

impl<A> ColumnMajorMatrix<A> {
    pub fn from_columns(columns: Vec<Vec<A>>) -> Self {
        let (n_cols, n_rows) = (columns.len(), columns.first().map_or(0, Vec::len));
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for column in columns {
            assert_eq!(column.len(), n_rows, "columns must have the same length");
            for item in column {
                values.push(item)
            }
        }
        Self {
            n_rows,
            n_cols,
            values,
        }
    }

    pub fn from_rows(rows: Vec<Vec<A>>) -> Self {
        let (n_rows, n_cols) = (rows.len(), rows.first().map_or(0, Vec::len));
        let mut values: Vec<A> = Vec::with_capacity(n_rows * n_cols);
        let mut rows: Vec<_> = rows.into_iter().map(|c| c.into_iter()).collect();
        while n_rows > 0 {
            let mut n_ko = 0;
            for row in &mut rows {
                if let Some(item) = row.next() {
                    values.push(item)
                } else {
                    n_ko += 1;
                }
            }
            if n_ko > 0 {
                assert_eq!(n_ko, n_rows);
                break;
            }
        }
        assert_eq!(n_rows * n_cols, values.len());
        Self {
            n_rows,
            n_cols,
            values,
        }
    }

    pub fn from_function(
        n_rows: usize,
        n_cols: usize,
        mut f: impl FnMut(usize, usize) -> A,
    ) -> Self {
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for col in 0..n_cols {
            for row in 0..n_rows {
                values.push(f(row, col));
            }
        }
        Self {
            n_rows,
            n_cols,
            values,
        }
    }

    pub fn column(&self, col: usize) -> &[A] {
        let start = col * self.n_rows;
        &self.values.as_slice()[start..start + self.n_rows]
    }

    pub fn columns(&self) -> impl Iterator<Item = &[A]> {
        self.values.chunks(self.n_rows.max(1))
    }

    pub fn row(&self, row: usize) -> StridedVecView<A> {
        StridedVecView::new(&self.values, row, self.n_rows)
    }

    /// Exchange two columns in place.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        assert!(a < self.n_cols && b < self.n_cols);
        for row in 0..self.n_rows {
            self.values.swap(row + a * self.n_rows, row + b * self.n_rows);
        }
    }

    pub fn flat(&self) -> &Vec<A> {
        &self.values
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }
}

impl<A> Index<(usize, usize)> for ColumnMajorMatrix<A> {
    type Output = A;
    fn index(&self, (row, col): (usize, usize)) -> &A {
        // No need to check for col because it will be out of the buffer
        assert!(row < self.n_rows);
        &self.values[row + col * self.n_rows]
    }
}

impl<A> IndexMut<(usize, usize)> for ColumnMajorMatrix<A> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut A {
        assert!(row < self.n_rows);
        &mut self.values[row + col * self.n_rows]
    }
}
