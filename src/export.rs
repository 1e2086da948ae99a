//! CSV serialization of the sorted records.

use crate::error::Result;
use crate::record::PostRecord;
use crate::util::replace_file_atomic;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 10] = [
    "Title",
    "Score",
    "ID",
    "URL",
    "Total_Num_Comments",
    "Num_Top_Level_Comments",
    "Body",
    "Created",
    "Comments_all",
    "Comments_top_level",
];

/// `{subreddit}_posts_and_comments_sorted.csv`
pub fn output_file_name(subreddit: &str) -> String {
    format!("{subreddit}_posts_and_comments_sorted.csv")
}

/// A sequence of strings rendered literally, e.g. `["a", "b"]`.
pub fn render_string_seq(seq: &[String]) -> String {
    format!("{seq:?}")
}

/// Write the records (already sorted) to `dir`, overwriting any previous
/// snapshot of the same name. The write goes to a temp file first and is
/// renamed into place, so an aborted run leaves no partial CSV behind.
pub fn write_csv(records: &[PostRecord], subreddit: &str, dir: &Path) -> Result<PathBuf> {
    let name = output_file_name(subreddit);
    let final_path = dir.join(&name);
    let tmp_path = dir.join(format!(".{name}.tmp"));

    {
        let mut w = csv::Writer::from_path(&tmp_path)?;
        w.write_record(CSV_HEADER)?;
        for r in records {
            w.write_record([
                r.title.clone(),
                r.score.to_string(),
                r.id.clone(),
                r.url.clone(),
                r.num_comments.to_string(),
                r.num_top_level.to_string(),
                r.selftext.clone(),
                r.created_local.clone(),
                render_string_seq(&r.comments_all),
                render_string_seq(&r.comments_top_level),
            ])?;
        }
        w.flush()?;
    }
    replace_file_atomic(&tmp_path, &final_path)?;
    Ok(final_path)
}
