//! Min/Max suite
//!
//! Run with:
//!   cargo run --release --example minmax_bench
//!
//! The `large` operations allocate 800 MB each.

fn main() -> numbench::Result<()> {
    numbench::run_suite_stdout(&numbench::suites::minmax::SUITE)
}
