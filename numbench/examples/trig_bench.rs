//! Trigonometry suite
//!
//! Run with:
//!   cargo run --release --example trig_bench

fn main() -> numbench::Result<()> {
    numbench::run_suite_stdout(&numbench::suites::trig::SUITE)
}
