//! High-Precision Timing
//!
//! Wall-clock timing for the repetition loop. On x86_64 and AArch64 a raw
//! cycle counter is sampled next to `std::time::Instant` so reports can carry
//! an approximate cycle count; other platforms report zero cycles.
//!
//! The [`Clock`] trait is the seam the runner measures through. Production code
//! uses [`SystemClock`]; tests swap in [`FixedClock`] to get a deterministic
//! elapsed time while still executing the measured closure.

use std::time::Duration;

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles() -> u64 {
    // SAFETY: RDTSCP is available on every x86_64 CPU we target and has no
    // memory side effects.
    unsafe {
        let mut _aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut _aux)
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles() -> u64 {
    let cnt: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 on all AArch64 implementations.
    unsafe {
        std::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt, options(nostack, nomem));
    }
    cnt
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
fn read_cycles() -> u64 {
    0
}

/// Whether this platform provides a real cycle counter.
pub const HAS_CYCLE_COUNTER: bool = cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");

/// Elapsed time and cycles of one measured span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elapsed {
    /// Wall-clock duration
    pub duration: Duration,
    /// Raw counter ticks (0 when unavailable)
    pub cycles: u64,
}

impl Elapsed {
    /// Elapsed wall-clock time in nanoseconds
    pub fn as_nanos(&self) -> u64 {
        self.duration.as_nanos() as u64
    }
}

/// Timer for one measured span
pub struct Timer {
    start: std::time::Instant,
    cycles_start: u64,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        let cycles_start = read_cycles();
        Self {
            start: std::time::Instant::now(),
            cycles_start,
        }
    }

    /// Stop the timer and return the elapsed span
    #[inline(always)]
    pub fn stop(&self) -> Elapsed {
        let duration = self.start.elapsed();
        let cycles = read_cycles().saturating_sub(self.cycles_start);
        Elapsed { duration, cycles }
    }
}

/// Source of elapsed-time measurements for the runner.
pub trait Clock {
    /// Run `f` once and return how long it took.
    fn measure(&mut self, f: &mut dyn FnMut()) -> Elapsed;
}

/// Real wall clock backed by [`Timer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn measure(&mut self, f: &mut dyn FnMut()) -> Elapsed {
        let timer = Timer::start();
        f();
        timer.stop()
    }
}

/// Clock that runs the closure but always reports the same duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    elapsed: Duration,
}

impl FixedClock {
    /// Report `elapsed` for every measurement.
    pub fn new(elapsed: Duration) -> Self {
        Self { elapsed }
    }
}

impl Clock for FixedClock {
    fn measure(&mut self, f: &mut dyn FnMut()) -> Elapsed {
        f();
        Elapsed {
            duration: self.elapsed,
            cycles: 0,
        }
    }
}

/// Pin the current thread to a specific core.
///
/// Keeps cycle counts comparable between operations by avoiding migrations.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// Pin the current thread to a specific core (no-op on this platform).
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}
