//! Time-gated progress reporting for long-running enumerator sweeps: tracks
//! when it is "due" to print again instead of printing on every batch, plus
//! a recent-throughput estimate used to project a remaining-time figure.

use std::time::{Duration, Instant};

use num_format::ToFormattedString;

use crate::config::user_locale;

/// Tracks when enough wall-clock time has passed to report progress again,
/// and a short rolling window of `(time, processed)` samples to estimate
/// throughput.
pub struct Reporter {
    start_time: Instant,
    total: u64,
    last_report_time: Instant,
    report_every: Duration,
    samples: Vec<(Instant, u64)>,
    max_sample_age: Duration,
}

impl Reporter {
    pub fn new(total: u64) -> Self {
        Self {
            start_time: Instant::now(),
            total,
            last_report_time: Instant::now(),
            report_every: Duration::from_secs(2),
            samples: Vec::new(),
            max_sample_age: Duration::from_secs(600),
        }
    }

    pub fn is_due(&self) -> bool {
        self.last_report_time.elapsed() > self.report_every
    }

    /// Records `processed` and, if due, returns a human-readable progress
    /// line; otherwise returns `None` without resetting the timer.
    pub fn report(&mut self, processed: u64) -> Option<String> {
        self.samples.push((Instant::now(), processed));
        if self.samples.len() % 50 == 0 {
            self.trim_samples();
        }
        if !self.is_due() {
            return None;
        }
        self.last_report_time = Instant::now();
        Some(self.format_line(processed))
    }

    fn trim_samples(&mut self) {
        let cutoff = Instant::now() - self.max_sample_age;
        if let Some(i) = self.samples.iter().position(|(t, _)| *t >= cutoff) {
            self.samples.drain(0..i);
        }
    }

    fn throughput_per_sec(&self, window: Duration) -> Option<f64> {
        let cutoff = Instant::now().checked_sub(window)?;
        let i = self.samples.iter().position(|(t, _)| *t >= cutoff)?;
        if i == 0 {
            return None;
        }
        let (t0, p0) = self.samples[i - 1];
        let &(t1, p1) = self.samples.last()?;
        let dur = t1.duration_since(t0).as_secs_f64();
        if dur <= 0.0 {
            return None;
        }
        Some((p1 - p0) as f64 / dur)
    }

    fn format_line(&self, processed: u64) -> String {
        let locale = user_locale();
        let percent = (processed as f64 / self.total.max(1) as f64 * 1000.0).round() / 10.0;
        let elapsed = self.start_time.elapsed();
        let overall_rate = processed as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
        let remaining = Duration::from_secs_f64(
            (self.total.saturating_sub(processed)) as f64 / overall_rate.max(f64::EPSILON),
        );
        let recent = self
            .throughput_per_sec(Duration::from_secs(60))
            .map(|rate| {
                Duration::from_secs_f64(
                    (self.total.saturating_sub(processed)) as f64 / rate.max(f64::EPSILON),
                )
            });
        match recent {
            Some(recent) => format!(
                "Working: {} / {} ({percent:.1}%), remaining: total {}, recent {}, runtime {}",
                processed.to_formatted_string(&locale),
                self.total.to_formatted_string(&locale),
                format_duration_hhmmss(remaining),
                format_duration_hhmmss(recent),
                format_duration_hhmmss(elapsed),
            ),
            None => format!(
                "Working: {} / {} ({percent:.1}%), remaining {}, runtime {}",
                processed.to_formatted_string(&locale),
                self.total.to_formatted_string(&locale),
                format_duration_hhmmss(remaining),
                format_duration_hhmmss(elapsed),
            ),
        }
    }
}

/// Formats a duration as `HH:mm:ss`.
///
/// ```
/// use std::time::Duration;
/// use turing_lab::reporter::format_duration_hhmmss;
///
/// assert_eq!(format_duration_hhmmss(Duration::from_secs(3661)), "01:01:01");
/// ```
pub fn format_duration_hhmmss(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_rounds_down_to_seconds() {
        assert_eq!("00:02:03", format_duration_hhmmss(Duration::from_millis(123_456)));
    }

    #[test]
    fn fresh_reporter_is_not_due() {
        let reporter = Reporter::new(1_000);
        assert!(!reporter.is_due());
    }
}
