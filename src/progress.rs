//! Per-worker progress bars drawn on a terminal with ANSI escapes.
//!
//! Each worker owns one screen line (worker `n` on row `n + 1`). Workers
//! report concurrently, so the output stream sits behind a mutex and every
//! line is written under the lock in one piece.

use std::io::{self, Write};
use std::sync::Mutex;

const BAR_WIDTH: usize = 30;

pub struct Progress {
    out: Option<Mutex<Box<dyn Write + Send>>>,
}

impl Progress {
    /// Draws on `out`.
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Progress {
            out: Some(Mutex::new(out)),
        }
    }

    /// Draws on standard error.
    pub fn stderr() -> Self {
        Progress::new(Box::new(io::stderr()))
    }

    /// Draws nothing.
    pub fn hidden() -> Self {
        Progress { out: None }
    }

    /// Clears the screen and draws an empty bar for each of `workers`.
    pub fn start(&self, workers: usize) {
        self.with_output(|out| {
            write!(out, "\x1b[2J")?;
            for worker in 0..workers {
                draw_bar(out, worker, 0)?;
            }
            out.flush()
        });
    }

    /// Redraws `worker`'s bar after it has finished `done` of `total` pixels.
    pub fn update(&self, worker: usize, done: usize, total: usize) {
        let percent = if total == 0 { 100 } else { done * 100 / total };
        self.with_output(|out| {
            draw_bar(out, worker, percent)?;
            out.flush()
        });
    }

    /// Moves the cursor below the bars of `workers` and reports completion.
    pub fn finish(&self, workers: usize) {
        self.with_output(|out| {
            writeln!(out, "\x1b[{};0HDone rendering!", workers + 1)?;
            out.flush()
        });
    }

    fn with_output(&self, f: impl FnOnce(&mut dyn Write) -> io::Result<()>) {
        if let Some(out) = &self.out {
            let mut out = out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            // A broken terminal shouldn't stop the render.
            if let Err(e) = f(&mut **out) {
                log::debug!("progress output failed: {}", e);
            }
        }
    }
}

fn draw_bar(out: &mut dyn Write, worker: usize, percent: usize) -> io::Result<()> {
    let filled = percent.min(100) * BAR_WIDTH / 100;
    write!(
        out,
        "\x1b[{};0HThread {}: [{}{}] {}%\x1b[K",
        worker + 1,
        worker + 1,
        "#".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        percent
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// A `Write` that can still be read after being boxed away.
    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn bars_are_positioned_per_worker() {
        let buf = Shared::default();
        let progress = Progress::new(Box::new(buf.clone()));
        progress.start(2);
        progress.update(1, 50, 100);
        progress.finish(2);

        let text = buf.text();
        assert!(text.starts_with("\x1b[2J"));
        assert!(text.contains(&format!("\x1b[1;0HThread 1: [{}] 0%\x1b[K", " ".repeat(30))));
        assert!(text.contains(&format!(
            "\x1b[2;0HThread 2: [{}{}] 50%\x1b[K",
            "#".repeat(15),
            " ".repeat(15)
        )));
        assert!(text.ends_with("\x1b[3;0HDone rendering!\n"));
    }

    #[test]
    fn empty_chunk_counts_as_done() {
        let buf = Shared::default();
        let progress = Progress::new(Box::new(buf.clone()));
        progress.update(0, 0, 0);
        assert!(buf.text().contains(&format!("[{}] 100%", "#".repeat(30))));
    }

    #[test]
    fn hidden_progress_is_silent() {
        let progress = Progress::hidden();
        progress.start(4);
        progress.update(3, 1, 2);
        progress.finish(4);
    }
}
