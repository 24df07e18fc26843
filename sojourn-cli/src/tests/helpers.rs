//! Test helpers for writing problem files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

const HOUR: i64 = 3_600;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// A temporary directory addressed by UTF-8 paths.
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

/// Names of the locations in [`two_day_problem`].
pub(super) const NAMES: [&str; 5] = ["Home", "Home again", "Abbey", "Bridge", "Castle"];

/// Three candidates 2.5 hours from home and 4 hours apart: two fill a day,
/// the third needs another.
pub(super) fn two_day_problem() -> String {
    let home = 5 * HOUR / 2;
    let apart = 4 * HOUR;
    let rows: Vec<Vec<i64>> = (0..5_usize)
        .map(|from| {
            (0..5_usize)
                .map(|to| match (from < 2, to < 2) {
                    _ if from == to => 0,
                    (true, true) => 0,
                    (true, false) | (false, true) => home,
                    (false, false) => apart,
                })
                .collect()
        })
        .collect();
    serde_json::json!({
        "names": NAMES,
        "travel_time_seconds": rows,
    })
    .to_string()
}
