use fermifab_core::{assemble, assemble_with, tensor_power_with, FermiError, FermiOp};
use num_complex::Complex64;
use slater_enum::{
    KernelConfig, KernelEntry, KernelEnumeration, KernelEnumerator, SlaterEnumerator,
    TensorPowerEntry, TensorPowerEnumeration,
};

/// Enumerator replaying a fixed entry list for the `(3, 1, 1, 1)` kernel.
struct Scripted {
    shape: (usize, usize, usize, usize),
    entries: Vec<KernelEntry>,
    power_dim: usize,
}

impl Scripted {
    fn new(entries: Vec<KernelEntry>) -> Self {
        Self {
            shape: (3, 3, 3, 3),
            entries,
            power_dim: 3,
        }
    }
}

fn entry(
    block_row: usize,
    block_col: usize,
    mat_row: usize,
    mat_col: usize,
    value: f64,
) -> KernelEntry {
    KernelEntry {
        block_row,
        block_col,
        mat_row,
        mat_col,
        value,
    }
}

impl KernelEnumerator for Scripted {
    fn enumerate_kernel(&self, _config: &KernelConfig) -> slater_enum::Result<KernelEnumeration> {
        let (rows, cols, dim_row, dim_col) = self.shape;
        Ok(KernelEnumeration {
            rows,
            cols,
            dim_row,
            dim_col,
            entries: self.entries.clone(),
        })
    }

    fn enumerate_tensor_power(
        &self,
        _orbs: usize,
        _matrix: &[Complex64],
        _n: usize,
    ) -> slater_enum::Result<TensorPowerEnumeration> {
        Ok(TensorPowerEnumeration {
            dim: self.power_dim,
            entries: vec![
                TensorPowerEntry {
                    row: 2,
                    col: 0,
                    value: Complex64::new(0.5, 0.0),
                },
                TensorPowerEntry {
                    row: 2,
                    col: 0,
                    value: Complex64::new(0.0, 1.0),
                },
            ],
        })
    }
}

#[test]
fn test_duplicates_accumulate() {
    let fake = Scripted::new(vec![
        entry(0, 0, 1, 2, 1.0),
        entry(2, 1, 0, 0, -1.0),
        entry(0, 0, 1, 2, 1.0),
        entry(0, 0, 0, 0, 1.0),
    ]);
    let grid = assemble_with(&fake, 3, 1, 1, 1).unwrap();
    assert_eq!(grid.grid_shape(), (3, 3));
    assert_eq!(grid.nnz(), 3);
    let block = grid.block(0, 0);
    assert_eq!(block.get(1, 2), 2.0);
    assert_eq!(block.get(0, 0), 1.0);
    // entries come out sorted by (row, col)
    let order: Vec<_> = block.iter().map(|(r, c, _)| (r, c)).collect();
    assert_eq!(order, vec![(0, 0), (1, 2)]);
    assert_eq!(grid.block(2, 1).get(0, 0), -1.0);
}

#[test]
fn test_cancelled_entries_and_empty_blocks() {
    let fake = Scripted::new(vec![entry(1, 1, 2, 2, 1.0), entry(1, 1, 2, 2, -1.0)]);
    let grid = assemble_with(&fake, 3, 1, 1, 1).unwrap();
    assert_eq!(grid.nnz(), 0);
    for (_, block) in grid.iter_blocks() {
        assert!(block.is_empty());
        assert_eq!(block.shape(), (3, 3));
    }
}

#[test]
fn test_out_of_range_entry() {
    let fake = Scripted::new(vec![entry(0, 3, 0, 0, 1.0)]);
    assert!(matches!(
        assemble_with(&fake, 3, 1, 1, 1),
        Err(FermiError::ShapeMismatch { .. })
    ));
    let fake = Scripted::new(vec![entry(0, 0, 0, 3, 1.0)]);
    assert!(matches!(
        assemble_with(&fake, 3, 1, 1, 1),
        Err(FermiError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_wrong_reported_shape() {
    let mut fake = Scripted::new(Vec::new());
    fake.shape = (3, 3, 3, 1);
    assert_eq!(
        assemble_with(&fake, 3, 1, 1, 1).unwrap_err(),
        FermiError::ShapeMismatch {
            expected: vec![3, 3, 3, 3],
            actual: vec![3, 3, 3, 1],
        }
    );
}

#[test]
fn test_tensor_power_with_custom_enumerator() {
    let op = FermiOp::identity(3, 1).unwrap();
    let out = tensor_power_with(&Scripted::new(Vec::new()), &op, 1).unwrap();
    assert_eq!(out.data()[(2, 0)], Complex64::new(0.5, 1.0));
    assert_eq!(out.data()[(0, 0)], Complex64::new(0.0, 0.0));

    let mut fake = Scripted::new(Vec::new());
    fake.power_dim = 4;
    assert!(matches!(
        tensor_power_with(&fake, &op, 1),
        Err(FermiError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_default_enumerator_is_deterministic() {
    let a = assemble(7, 2, 4, 3).unwrap();
    let b = assemble_with(&SlaterEnumerator::default(), 7, 2, 4, 3).unwrap();
    assert_eq!(a.grid_shape(), b.grid_shape());
    assert_eq!(a.nnz(), b.nnz());
    for ((ij, x), (kl, y)) in a.iter_blocks().zip(b.iter_blocks()) {
        assert_eq!(ij, kl);
        assert_eq!(x.iter().collect::<Vec<_>>(), y.iter().collect::<Vec<_>>());
    }
}

#[test]
fn test_boundary_errors() {
    assert_eq!(
        assemble(4, 1, 5, 5).unwrap_err(),
        FermiError::InvalidSector { orbs: 4, n: 5 }
    );
    assert!(matches!(
        assemble(4, 3, 2, 2),
        Err(FermiError::DimensionMismatch { .. })
    ));
    // p2 = n2 - n1 + p1 < 0
    assert!(matches!(
        assemble(6, 0, 3, 1),
        Err(FermiError::DimensionMismatch { .. })
    ));
    // empty sectors on both sides still give a well-formed 1 x 1 grid
    let k = assemble(0, 0, 0, 0).unwrap();
    assert_eq!(k.grid_shape(), (1, 1));
    assert_eq!(k.block(0, 0).get(0, 0), 1.0);
}
