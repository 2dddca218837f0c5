//! Progress logging while a field is computed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::info;

use fractales_render::{EngineOutput, FieldRequest, Progress, ScheduleOptions, Workers};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Percentage step between two log lines.
const REPORT_STEP: u32 = 10;

/// Compute `request` while a scoped observer thread logs completed rows.
pub fn compute_with_progress(
    request: &FieldRequest,
    workers: Workers,
) -> fractales_render::Result<EngineOutput> {
    let progress = Arc::new(Progress::new());
    let options = ScheduleOptions {
        workers,
        progress: Some(Arc::clone(&progress)),
    };
    let finished = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| observe(&progress, &finished));
        let result = request.compute(&options);
        finished.store(true, Ordering::Release);
        result
    })
}

fn observe(progress: &Progress, finished: &AtomicBool) {
    let mut reported = 0;
    while !finished.load(Ordering::Acquire) {
        thread::sleep(POLL_INTERVAL);
        let percent = (progress.fraction() * 100.0) as u32;
        if percent < 100 && percent >= reported + REPORT_STEP {
            reported = percent - percent % REPORT_STEP;
            info!(percent = reported, "Rendering");
        }
    }
}
