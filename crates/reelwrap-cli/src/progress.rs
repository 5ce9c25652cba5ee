use indicatif::{ProgressBar, ProgressStyle};
use movie_diary_sources::ProgressSink;
use std::io::IsTerminal;
use std::time::Duration;

/// Terminal progress bar driven by the fetch/enrich pipeline. Outside a
/// terminal the bar is disabled and milestones go to structured logging
/// instead, so piped and scheduled runs stay readable.
pub struct ImportProgress {
    bar: ProgressBar,
    interactive: bool,
}

impl ImportProgress {
    pub fn new(quiet: bool) -> Self {
        let interactive = !quiet && is_interactive();

        let bar = if interactive {
            let bar = ProgressBar::new(100);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{wide_bar:.cyan/blue}] {pos}% {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▉▊▋▌▍▎▏  "),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        } else {
            ProgressBar::hidden()
        };

        Self { bar, interactive }
    }

    pub fn finish(&self) {
        if self.interactive {
            self.bar.finish_and_clear();
        }
    }
}

impl ProgressSink for ImportProgress {
    fn report(&self, percent: u8, message: &str) {
        if self.interactive {
            self.bar.set_position(u64::from(percent));
            self.bar.set_message(message.to_string());
        } else {
            tracing::info!(operation = "progress", percent, message, "import progress");
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
