#[cfg(feature = "cli")]
use std::sync::Mutex;
use std::time::Duration;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub phase_time: Duration,
    pub memory_usage_mb: u64,
}

/// Records per-phase timings and process memory for a run.
#[cfg(feature = "cli")]
pub struct RunMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    enabled: bool,
    started: Instant,
    phase_started: Mutex<Instant>,
    phases: Mutex<Vec<PhaseStats>>,
}

#[cfg(feature = "cli")]
impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            sysinfo::get_current_pid()
                .map_err(|e| tracing::warn!("Process monitoring unavailable: {}", e))
                .ok()
        } else {
            None
        };
        let system = if enabled {
            System::new_with_specifics(RefreshKind::everything())
        } else {
            System::new()
        };
        let now = Instant::now();

        Self {
            system: Mutex::new(system),
            pid,
            enabled,
            started: now,
            phase_started: Mutex::new(now),
            phases: Mutex::new(Vec::new()),
        }
    }

    fn current_memory_mb(&self) -> u64 {
        let (Some(pid), Ok(mut system)) = (self.pid, self.system.lock()) else {
            return 0;
        };
        system.refresh_all();
        system
            .process(pid)
            .map(|process| process.memory() / 1024 / 1024)
            .unwrap_or(0)
    }

    /// Closes the current phase and starts timing the next one.
    pub fn finish_phase(&self, phase: &str) {
        if !self.enabled {
            return;
        }

        let now = Instant::now();
        let phase_time = match self.phase_started.lock() {
            Ok(mut started) => {
                let elapsed = now.duration_since(*started);
                *started = now;
                elapsed
            }
            Err(_) => Duration::ZERO,
        };
        let stats = PhaseStats {
            phase: phase.to_string(),
            phase_time,
            memory_usage_mb: self.current_memory_mb(),
        };

        tracing::info!(
            "📊 {} - Time: {:?}, Memory: {}MB",
            stats.phase,
            stats.phase_time,
            stats.memory_usage_mb
        );
        if let Ok(mut phases) = self.phases.lock() {
            phases.push(stats);
        }
    }

    pub fn log_summary(&self) {
        if !self.enabled {
            return;
        }
        let peak = self
            .phases
            .lock()
            .map(|phases| phases.iter().map(|p| p.memory_usage_mb).max().unwrap_or(0))
            .unwrap_or(0);
        tracing::info!(
            "📊 Run finished - Total Time: {:?}, Peak Memory: {}MB",
            self.started.elapsed(),
            peak
        );
    }

    pub fn phases(&self) -> Vec<PhaseStats> {
        self.phases.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// Without the cli feature there is no sysinfo; monitoring is a no-op.
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct RunMonitor;

#[cfg(not(feature = "cli"))]
impl RunMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn finish_phase(&self, _phase: &str) {}

    pub fn log_summary(&self) {}

    pub fn phases(&self) -> Vec<PhaseStats> {
        Vec::new()
    }

    pub fn is_enabled(&self) -> bool {
        false
    }
}
