use std::fs;
use std::path::{Path, PathBuf};

use crate::IngestError;

/// List regular files in `dir` whose extension matches `extension`.
///
/// Non-recursive, same as the glob `<dir>/*.<extension>`. Extension matching is
/// ASCII case-insensitive and results are sorted by path.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, IngestError> {
    let entries = fs::read_dir(dir).map_err(|source| IngestError::io(dir, source))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::io(dir, source))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if path
            .extension()
            .and_then(|candidate| candidate.to_str())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(extension))
        {
            files.push(path);
        }
    }

    files.sort();
    tracing::debug!(dir = %dir.display(), extension, count = files.len(), "discovered files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn finds_matching_files_sorted_and_skips_dirs() {
        let temp = tempdir().expect("tempdir");
        for name in ["SM.csvz", "AC.csvz", "BDO.CSVZ", "notes.txt", "ALI.csv"] {
            fs::write(temp.path().join(name), b"").expect("write");
        }
        fs::create_dir(temp.path().join("nested.csvz")).expect("mkdir");

        let found = discover(temp.path(), "csvz").expect("discover");
        let names: Vec<_> = found
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["AC.csvz", "BDO.CSVZ", "SM.csvz"]);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let temp = tempdir().expect("tempdir");
        let error = discover(&temp.path().join("nope"), "csv").expect_err("must fail");
        assert!(matches!(error, IngestError::Io { .. }));
    }
}
