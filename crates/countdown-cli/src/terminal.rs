//! Single-line terminal rendering of the timer.

use std::io::Write;

use countdown_core::{Controls, Status, TimeDisplay, TimerView};

const RED: &str = "\x1b[31;1m";
const RESET: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Redraws one status line on every update:
///
/// ```text
///   01:30  Timer running...   [enter] Pause  [esc] Reset
/// ```
pub struct TerminalView<W: Write> {
    out: W,
    time: TimeDisplay,
    status: Status,
    warning: bool,
    controls: Option<Controls>,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            time: TimeDisplay::from_secs(0),
            status: Status::Ready,
            warning: false,
            controls: None,
        }
    }

    pub fn line(&self) -> String {
        let time = if self.warning {
            format!("{RED}{}{RESET}", self.time)
        } else {
            self.time.to_string()
        };

        let mut line = format!("  {time}  {:<24}", self.status.message());
        if let Some(controls) = &self.controls {
            if controls.start_enabled {
                line.push_str(&format!(" [enter] {}", controls.start_label.as_str()));
            }
            if controls.pause_enabled {
                line.push_str(" [enter] Pause");
            }
            if controls.reset_enabled {
                line.push_str("  [esc] Reset");
            }
        }
        line
    }

    fn redraw(&mut self) {
        let line = self.line();
        // A closed terminal is not worth failing the timer over.
        let _ = write!(self.out, "{CLEAR_LINE}{line}");
        let _ = self.out.flush();
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TimerView for TerminalView<W> {
    fn show_time(&mut self, display: &TimeDisplay) {
        self.time = display.clone();
        self.redraw();
    }

    fn show_status(&mut self, status: Status) {
        self.status = status;
        self.redraw();
    }

    fn set_warning(&mut self, active: bool) {
        if self.warning != active {
            self.warning = active;
            self.redraw();
        }
    }

    fn show_controls(&mut self, controls: &Controls) {
        self.controls = Some(*controls);
        self.redraw();
    }
}
