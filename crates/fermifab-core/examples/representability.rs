//! Check the Q and T1 conditions on random pure states.
//!
//! Run with: `cargo run -p fermifab-core --example representability`

use fermifab_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn min_eigenvalue(op: &FermiOp) -> anyhow::Result<f64> {
    op.eigh()?
        .values
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("empty spectrum"))
}

fn main() -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    println!("{:>5} {:>3} {:>14} {:>14}", "orbs", "N", "min eig Q", "min eig T1");
    for (orbs, n) in [(4, 2), (5, 2), (5, 3), (6, 3), (7, 3)] {
        let psi = FermiState::random(orbs, n, &mut rng)?;
        let g2 = rdm(&psi, 2)?;
        let q = calc_q(&g2, n)?;
        let t1 = calc_t1(&g2, n)?;
        println!(
            "{:>5} {:>3} {:>14.3e} {:>14.3e}",
            orbs,
            n,
            min_eigenvalue(&q)?,
            min_eigenvalue(&t1)?
        );
    }
    Ok(())
}
