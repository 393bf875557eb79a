use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar on stderr for `len` items, only when stderr is a terminal.
pub(crate) fn progress_bar(len: u64, label: &'static str, unit: &str) -> Option<ProgressBar> {
    if len == 0 || !std::io::stderr().is_terminal() {
        return None;
    }

    let pb = ProgressBar::new(len);
    let template = format!("{{msg}} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {unit} ({{eta}})");
    if let Ok(style) = ProgressStyle::default_bar().template(&template) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(label);
    Some(pb)
}
