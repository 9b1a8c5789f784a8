//! Process resource usage snapshots for progress reports.
//!
//! A [`ResourceUsage`] is a plain value: take one before a phase, another
//! after it, and subtract. Nothing here affects the diagram specifications.

use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

/// Wall clock time, CPU time and peak memory of the current process.
///
/// CPU times and peak memory come from `getrusage` and read as zero on
/// platforms other than Unix, such as Windows.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ResourceUsage {
    /// Wall clock seconds; an absolute timestamp in fresh snapshots.
    pub elapsed: f64,
    /// User CPU seconds.
    pub user: f64,
    /// System CPU seconds.
    pub system: f64,
    /// Peak resident set size in KiB.
    pub max_rss: u64,
}

impl ResourceUsage {
    /// Take a snapshot of the current process.
    pub fn now() -> Self {
        let mut usage = Self::default();
        usage.update();
        usage
    }

    /// Create a usage value from its parts.
    pub fn new(elapsed: f64, user: f64, system: f64, max_rss: u64) -> Self {
        Self {
            elapsed,
            user,
            system,
            max_rss,
        }
    }

    /// Overwrite this value with a fresh snapshot.
    pub fn update(&mut self) -> &mut Self {
        self.elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |since| since.as_secs_f64());

        let (user, system, max_rss) = process_times();
        self.user = user;
        self.system = system;
        self.max_rss = max_rss;
        self
    }

    /// Return the usage accumulated between `earlier` and this snapshot.
    pub fn since(&self, earlier: &ResourceUsage) -> ResourceUsage {
        *self - *earlier
    }

    /// Format the wall clock time, e.g. `1.25s`.
    pub fn elapsed_time(&self) -> String {
        format!("{:.2}s", self.elapsed)
    }

    /// Format the user CPU time, e.g. `0.98s`.
    pub fn user_time(&self) -> String {
        format!("{:.2}s", self.user)
    }

    /// Format the system CPU time, e.g. `0.02s`.
    pub fn system_time(&self) -> String {
        format!("{:.2}s", self.system)
    }

    /// Format the peak memory, e.g. `12MB`.
    pub fn memory(&self) -> String {
        format!("{:.0}MB", self.max_rss as f64 / 1024.0)
    }
}

#[cfg(unix)]
fn process_times() -> (f64, f64, u64) {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: `usage` points to writable memory large enough for a `rusage`.
    let status = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if status != 0 {
        log::debug!("getrusage failed with status [{}].", status);
        return (0.0, 0.0, 0);
    }
    // SAFETY: zero-initialized and filled in by a successful `getrusage`.
    let usage = unsafe { usage.assume_init() };

    let seconds = |tv: libc::timeval| tv.tv_sec as f64 + tv.tv_usec as f64 * 1e-6;
    // macOS reports bytes, everything else KiB.
    let max_rss = if cfg!(target_os = "macos") {
        usage.ru_maxrss as u64 / 1024
    } else {
        usage.ru_maxrss as u64
    };

    (seconds(usage.ru_utime), seconds(usage.ru_stime), max_rss)
}

#[cfg(not(unix))]
fn process_times() -> (f64, f64, u64) {
    (0.0, 0.0, 0)
}

impl Add for ResourceUsage {
    type Output = ResourceUsage;

    fn add(mut self, rhs: ResourceUsage) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for ResourceUsage {
    fn add_assign(&mut self, rhs: ResourceUsage) {
        self.elapsed += rhs.elapsed;
        self.user += rhs.user;
        self.system += rhs.system;
        self.max_rss = self.max_rss.max(rhs.max_rss);
    }
}

/// Peak memory is not additive: the difference keeps the larger peak.
impl Sub for ResourceUsage {
    type Output = ResourceUsage;

    fn sub(mut self, rhs: ResourceUsage) -> Self::Output {
        self -= rhs;
        self
    }
}

impl SubAssign for ResourceUsage {
    fn sub_assign(&mut self, rhs: ResourceUsage) {
        self.elapsed -= rhs.elapsed;
        self.user -= rhs.user;
        self.system -= rhs.system;
        self.max_rss = self.max_rss.max(rhs.max_rss);
    }
}

impl fmt::Display for ResourceUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} elapsed, {} user, {}",
            self.elapsed_time(),
            self.user_time(),
            self.memory()
        )
    }
}

/// A stopwatch that accumulates the time between every `start` and `stop`.
#[derive(Debug, Clone, Default)]
pub struct ElapsedTimeCounter {
    total: Duration,
    started: Option<Instant>,
}

impl ElapsedTimeCounter {
    /// Create a stopped counter with nothing accumulated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the accumulated time.
    pub fn reset(&mut self) -> &mut Self {
        self.total = Duration::ZERO;
        self
    }

    /// Start timing. Restarting a running counter drops the open interval.
    pub fn start(&mut self) -> &mut Self {
        self.started = Some(Instant::now());
        self
    }

    /// Stop timing and add the interval since the last `start`. Does nothing
    /// if the counter is not running.
    pub fn stop(&mut self) -> &mut Self {
        if let Some(started) = self.started.take() {
            self.total += started.elapsed();
        }
        self
    }

    /// Return true if the counter is between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Return the accumulated time of all finished intervals.
    pub fn total(&self) -> Duration {
        self.total
    }
}

impl fmt::Display for ElapsedTimeCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}s", self.total.as_secs_f64())
    }
}
