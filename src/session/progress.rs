use std::time::Duration;

/// Messages per second, `None` when nothing can be measured yet
pub fn throughput(processed: usize, elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 || processed == 0 {
        return None;
    }
    Some(processed as f64 / secs)
}

/// Estimated time to process the remaining messages at the current rate.
///
/// Unknown while the throughput is zero.
pub fn eta(total: usize, processed: usize, elapsed: Duration) -> Option<Duration> {
    let rate = throughput(processed, elapsed)?;
    let remaining = total.saturating_sub(processed);
    Some(Duration::from_secs_f64(remaining as f64 / rate))
}

pub fn format_eta(eta: Option<Duration>) -> String {
    match eta {
        Some(d) => format!("{:.1}m", d.as_secs_f64() / 60.0),
        None => "unknown".to_string(),
    }
}

/// One console line summarizing progress after a batch
pub fn progress_line(total: usize, processed: usize, elapsed: Duration) -> String {
    let speed = throughput(processed, elapsed).unwrap_or(0.0);
    format!(
        "  ⚡ Processed: {}/{} | Speed: {:.1} msg/sec | ETA: {}",
        processed,
        total,
        speed,
        format_eta(eta(total, processed, elapsed))
    )
}

/// Number of batches needed for `total` messages, and the size of the last one
pub fn batch_layout(total: usize, batch_size: usize) -> (usize, usize) {
    if total == 0 || batch_size == 0 {
        return (0, 0);
    }
    let batches = total.div_ceil(batch_size);
    let last = total - (batches - 1) * batch_size;
    (batches, last)
}
