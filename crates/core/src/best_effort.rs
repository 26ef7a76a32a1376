// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ports::ErrorReporter;
use std::fmt::Display;
use tracing::{debug, warn};

/// Runs a side task whose failure must not fail the surrounding operation.
///
/// A failure is logged and passed to `reporter`, then discarded. Returns
/// whether the task succeeded.
///
/// # Arguments
///
/// * `reporter` - Where failures are captured
/// * `label` - Short description of the task, used in logs and reports
/// * `task` - The side task
pub fn attempt_best_effort<E, F>(reporter: &dyn ErrorReporter, label: &str, task: F) -> bool
where
    E: Display,
    F: FnOnce() -> Result<(), E>,
{
    match task() {
        Ok(()) => {
            debug!(task = label, "Best-effort task completed");
            true
        }
        Err(err) => {
            warn!(task = label, error = %err, "Best-effort task failed");
            reporter.capture(&format!("{label}: {err}"));
            false
        }
    }
}
