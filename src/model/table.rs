/// Column-major numeric table. Every column has `row_ids.len()` values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub row_ids: Vec<String>,
    pub names: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl FeatureTable {
    pub fn n_rows(&self) -> usize {
        self.row_ids.len()
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn drop_column(&mut self, idx: usize) -> String {
        self.columns.remove(idx);
        self.names.remove(idx)
    }

    /// Keeps only the rows for which `keep[row]` is true.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        let mut ids = Vec::with_capacity(self.row_ids.len());
        for (row, id) in self.row_ids.drain(..).enumerate() {
            if keep[row] {
                ids.push(id);
            }
        }
        self.row_ids = ids;
        for column in &mut self.columns {
            let mut row = 0usize;
            column.retain(|_| {
                let k = keep[row];
                row += 1;
                k
            });
        }
    }
}
