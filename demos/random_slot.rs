//! # One random scheduling slot
//!
//! Draws a random 5-subcarrier × 4-user goodness matrix, asks RCG for the
//! target split `[1, 2, 2, 0]`, and prints the first-pass loads, every trade
//! and the final owner map. Then runs the same matrix as a sleep slot.
//!
//! ```text
//! cargo run --example random_slot            # fresh random matrix
//! cargo run --example random_slot -- 42      # reproducible
//! RUST_LOG=rcg_core=trace cargo run --example random_slot
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rcg_core::{Allocation, CostMatrix, RateCravingGreedy, RcgConfig};
use tracing_subscriber::EnvFilter;

const SUBCARRIERS: usize = 5;
const USERS: usize = 4;
const TARGETS: [f32; USERS] = [1.0, 2.0, 2.0, 0.0];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = match std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let values: Vec<f32> = (0..SUBCARRIERS * USERS).map(|_| rng.random::<f32>()).collect();
    let costs = match CostMatrix::new(SUBCARRIERS, USERS, values) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("cannot build cost matrix: {e}");
            std::process::exit(1);
        }
    };

    println!("── goodness [subcarrier][user] ─────────────────────────────");
    for (s, row) in costs.rows().enumerate() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.3}")).collect();
        println!("  sc{s}: {}", cells.join("  "));
    }
    println!("  targets: {TARGETS:?}");

    let rcg = RateCravingGreedy::new(RcgConfig::default());
    match rcg.allocate(&costs, &TARGETS) {
        Ok(Allocation::Assigned(a)) => {
            println!("── result ──────────────────────────────────────────────────");
            println!("  initial load : {:?}", a.initial_load());
            for t in a.trades() {
                println!(
                    "  trade        : sc{} user {} → user {} (Δ {:+.3})",
                    t.subcarrier, t.from, t.to, t.cost_delta
                );
            }
            println!("  owners       : {:?}", a.owners());
            println!("  final load   : {:?}", a.load());
            println!("  goodness     : {:.3}", a.total_goodness(&costs));
        }
        Ok(Allocation::Sleep { .. }) => println!("  sleep slot"),
        Err(e) => eprintln!("allocation failed: {e}"),
    }

    println!("── sleep slot ──────────────────────────────────────────────");
    match rcg.allocate(&costs, &[f32::NAN; USERS]) {
        Ok(sleep) => println!("  owner map: {:?}  initial: {:?}", sleep.owner_map(), sleep.initial_map()),
        Err(e) => eprintln!("allocation failed: {e}"),
    }
}
