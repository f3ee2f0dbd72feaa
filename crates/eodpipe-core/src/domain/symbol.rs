use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Ticker symbol taken verbatim from a file name.
///
/// Nothing is normalized: case, spaces, dots and non-ASCII text all survive,
/// since the value stored in the `symbol` column must equal the file name it
/// came from. Only an empty value is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        Ok(Self(input.to_string()))
    }

    /// Symbol of a compressed archive: the file stem, i.e. everything before
    /// the last `.` (`BDO.csvz` -> `BDO`, `BRK.B.csvz` -> `BRK.B`).
    pub fn from_archive_path(path: &Path) -> Result<Self, ValidationError> {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .ok_or_else(|| ValidationError::MissingFileName {
                path: path.to_path_buf(),
            })?;
        Self::parse(stem.as_ref())
    }

    /// Symbol of a record file: the file name up to its first `.`
    /// (`BDO.2020.csv` -> `BDO`).
    pub fn from_csv_path(path: &Path) -> Result<Self, ValidationError> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .ok_or_else(|| ValidationError::MissingFileName {
                path: path.to_path_buf(),
            })?;
        let head = name.split('.').next().unwrap_or_default();
        Self::parse(head)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn preserves_case() {
        let parsed = Symbol::parse("Bdo").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "Bdo");
    }

    #[test]
    fn archive_symbol_is_stem_before_last_dot() {
        let symbol = Symbol::from_archive_path(Path::new("../JFC.csvz")).expect("symbol");
        assert_eq!(symbol.as_str(), "JFC");
    }

    #[test]
    fn csv_symbol_is_name_before_first_dot() {
        let symbol = Symbol::from_csv_path(Path::new("data/BDO.2020.csv")).expect("symbol");
        assert_eq!(symbol.as_str(), "BDO");
    }

    #[test]
    fn rejects_empty_stem() {
        let err = Symbol::from_csv_path(Path::new(".csv")).expect_err("must fail");
        assert_eq!(err, ValidationError::EmptySymbol);
    }

    #[test]
    fn archive_symbol_keeps_inner_dots() {
        let symbol = Symbol::from_archive_path(Path::new("BRK.B.csvz")).expect("symbol");
        assert_eq!(symbol.as_str(), "BRK.B");
    }

    #[test]
    fn keeps_spaces_and_non_ascii_text() {
        let spaced = Symbol::from_csv_path(Path::new("AC EN.csv")).expect("symbol");
        let accented = Symbol::from_archive_path(Path::new("Nestlé.csvz")).expect("symbol");

        assert_eq!(spaced.as_str(), "AC EN");
        assert_eq!(accented.as_str(), "Nestlé");
    }

    #[test]
    fn rejects_empty_archive_stem() {
        let err = Symbol::from_archive_path(Path::new("..")).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::EmptySymbol | ValidationError::MissingFileName { .. }
        ));
    }

    #[test]
    fn rejects_path_without_file_name() {
        let err = Symbol::from_csv_path(&PathBuf::from("/")).expect_err("must fail");
        assert!(matches!(err, ValidationError::MissingFileName { .. }));
    }
}
