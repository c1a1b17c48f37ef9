use block_sparse::BlockSparseBuilder;
use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn test_build_matches_dense_accumulation() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let (rows, cols, dim_row, dim_col) = (3, 4, 5, 6);
    let mut dense = vec![vec![0.0f64; dim_row * dim_col]; rows * cols];
    let mut builder = BlockSparseBuilder::<f64>::with_capacity((rows, cols), (dim_row, dim_col), 500);

    for _ in 0..500 {
        let bi = rng.random_range(0..rows);
        let bj = rng.random_range(0..cols);
        let r = rng.random_range(0..dim_row);
        let c = rng.random_range(0..dim_col);
        // small integers keep the sums exact
        let v = f64::from(rng.random_range(1..4i32));
        dense[bi * cols + bj][r * dim_col + c] += v;
        builder.push(bi, bj, r, c, v).unwrap();
    }
    assert_eq!(builder.len(), 500);
    let grid = builder.build();

    let mut total = 0;
    for ((i, j), block) in grid.iter_blocks() {
        assert_eq!(block.shape(), (dim_row, dim_col));
        assert_eq!(block.to_dense(), dense[i * cols + j]);
        let positions: Vec<(usize, usize)> = block.iter().map(|(r, c, _)| (r, c)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "block ({i}, {j}) not sorted");
        total += block.nnz();
    }
    assert_eq!(total, grid.nnz());
}

#[test]
fn test_build_is_insertion_order_independent() {
    let entries = [
        (0, 0, 1, 1, 2.0),
        (1, 0, 0, 0, 1.0),
        (0, 0, 0, 1, -1.0),
        (1, 0, 0, 0, 4.0),
        (0, 0, 1, 1, 1.0),
    ];
    let build = |order: &[usize]| {
        let mut builder = BlockSparseBuilder::<f64>::new((2, 1), (2, 2));
        for &k in order {
            let (bi, bj, r, c, v) = entries[k];
            builder.push(bi, bj, r, c, v).unwrap();
        }
        builder.build()
    };
    let forward = build(&[0, 1, 2, 3, 4]);
    let backward = build(&[4, 3, 2, 1, 0]);
    assert_eq!(forward, backward);
    assert_eq!(forward.block(0, 0).get(1, 1), 3.0);
    assert_eq!(forward.block(1, 0).get(0, 0), 5.0);
}

#[test]
fn test_complex_matvec() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let n = 4;
    let mut builder = BlockSparseBuilder::<Complex64>::new((1, 1), (n, n));
    let mut dense = vec![Complex64::new(0.0, 0.0); n * n];
    for r in 0..n {
        for c in 0..n {
            if rng.random::<f64>() < 0.5 {
                let v = Complex64::new(rng.random::<f64>(), rng.random::<f64>());
                dense[r * n + c] = v;
                builder.push(0, 0, r, c, v).unwrap();
            }
        }
    }
    let grid = builder.build();
    let x: Vec<Complex64> = (0..n)
        .map(|_| Complex64::new(rng.random::<f64>(), rng.random::<f64>()))
        .collect();
    let y = grid.block(0, 0).matvec(&x).unwrap();
    for r in 0..n {
        let expected: Complex64 = (0..n).map(|c| dense[r * n + c] * x[c]).sum();
        assert!((y[r] - expected).norm() < 1e-12);
    }
}
