//! Free-memory reporting for the `/heap` probe.
//!
//! The device exposes its free heap as a human-readable string; the
//! simulator substitutes the host's available memory.

use sysinfo::System;

const UNITS: [&str; 8] = ["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const THRESH: f64 = 1024.0;

/// Currently available system memory, in bytes.
#[must_use]
pub fn available_memory() -> u64 {
    let mut system = System::new();
    system.refresh_memory();
    system.available_memory()
}

/// Format a byte count with 1024-based unit scaling.
///
/// Below 1024 the count is printed unscaled with a ` B` suffix; from 1024
/// upward it is scaled to the largest unit that keeps the value under 1024
/// and printed with one decimal place.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut scaled = bytes as f64 / THRESH;
    let mut unit = 0;
    while scaled >= THRESH && unit < UNITS.len() - 1 {
        scaled /= THRESH;
        unit += 1;
    }
    format!("{scaled:.1} {}", UNITS[unit])
}
