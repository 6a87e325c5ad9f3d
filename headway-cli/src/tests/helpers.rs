//! Test helpers writing configuration and forecast files to a temporary
//! workspace.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use headway_core::Params;
use headway_forecast::ForecastTable;
use headway_forecast::test_support::at;
use tempfile::TempDir;

/// A temporary directory holding the inputs of one CLI invocation.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write_params(&self, params: &Params) -> Utf8PathBuf {
        let path = self.path("params.json");
        let json = serde_json::to_string_pretty(params).expect("encode params");
        write_utf8(&path, json.as_bytes());
        path
    }

    /// Write `table` as a forecast CSV for stops `1..=stop_count`.
    pub(super) fn write_forecast(&self, table: &ForecastTable, stop_count: i64) -> Utf8PathBuf {
        let path = self.path("forecast.csv");
        let mut csv = String::from("timespan,stop_id,passengers,zone\n");
        for stop in 1..=stop_count {
            let samples = table.samples_between(&stop.into(), at(0, 0), at(23, 50));
            for (time, passengers) in samples {
                let stamp = time.strftime("%Y-%m-%d %H:%M:%S");
                csv.push_str(&format!("{stamp},{stop},{passengers},north\n"));
            }
        }
        write_utf8(&path, csv.as_bytes());
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture");
}

pub(super) fn read_utf8(path: &Utf8Path) -> String {
    fs::read_to_string(path.as_std_path()).expect("read output")
}
