//! Progress reporting: a count-style bar over posts during collection.

use indicatif::{ProgressBar, ProgressStyle};

/// Count-style bar when the total is known (a limit was set), spinner
/// otherwise.
pub fn make_collect_progress(total: Option<u64>, label: &str) -> ProgressBar {
    let pb = match total {
        Some(t) => {
            let pb = ProgressBar::new(t);
            let style = ProgressStyle::with_template(
                "{spinner:.green} {msg} {pos}/{len} [{bar:.cyan/blue}] {percent:>3}%  \
                 it/s: {per_sec}  elapsed: {elapsed_precise}  eta: {eta_precise}",
            )
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏  ");
            pb.set_style(style);
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template(
                "{spinner:.green} {msg} {pos} posts  elapsed: {elapsed_precise}",
            )
            .unwrap();
            pb.set_style(style);
            pb
        }
    };
    if !label.is_empty() {
        pb.set_message(label.to_string());
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
