//! Arithmetic suite
//!
//! Run with:
//!   cargo run --release --example arith_bench

fn main() -> numbench::Result<()> {
    numbench::run_suite_stdout(&numbench::suites::arith::SUITE)
}
