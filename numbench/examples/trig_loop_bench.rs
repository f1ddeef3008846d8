//! Trigonometry loop suite
//!
//! Run with:
//!   cargo run --release --example trig_loop_bench

fn main() -> numbench::Result<()> {
    numbench::run_suite_stdout(&numbench::suites::trig_loop::SUITE)
}
