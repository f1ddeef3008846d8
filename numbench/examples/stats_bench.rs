//! Statistics suite
//!
//! Run with:
//!   cargo run --release --example stats_bench

fn main() -> numbench::Result<()> {
    numbench::run_suite_stdout(&numbench::suites::stats::SUITE)
}
