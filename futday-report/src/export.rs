//! Report export: per-date folder with a collision-avoiding filename.

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

/// Write the rendered document under `<output_dir>/futures-daily_<date>/`.
///
/// If `report_<date>.md` already exists (a regenerated report, or the
/// previous file still open elsewhere), a `_1`, `_2`, … suffix picks the
/// first free name instead of overwriting.
pub fn save_report(markdown: &str, date: NaiveDate, output_dir: &Path) -> io::Result<PathBuf> {
    let folder = output_dir.join(format!("futures-daily_{date}"));
    std::fs::create_dir_all(&folder)?;

    let base = format!("report_{date}");
    let mut path = folder.join(format!("{base}.md"));
    let mut counter = 1u32;
    while path.exists() {
        path = folder.join(format!("{base}_{counter}.md"));
        counter += 1;
    }

    std::fs::write(&path, markdown)?;
    info!(path = %path.display(), "report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn saves_into_dated_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_report("# report", date(), dir.path()).unwrap();
        assert!(path.ends_with("futures-daily_2024-01-05/report_2024-01-05.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report");
    }

    #[test]
    fn existing_file_gets_counter_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let first = save_report("one", date(), dir.path()).unwrap();
        let second = save_report("two", date(), dir.path()).unwrap();
        let third = save_report("three", date(), dir.path()).unwrap();

        assert_ne!(first, second);
        assert!(second.ends_with("report_2024-01-05_1.md"));
        assert!(third.ends_with("report_2024-01-05_2.md"));
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "one");
        assert_eq!(std::fs::read_to_string(&third).unwrap(), "three");
    }
}
