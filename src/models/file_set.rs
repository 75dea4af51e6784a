// file: src/models/file_set.rs
// description: ordered, non-empty set of accepted input files
// reference: relayed to the external stages in insertion order

use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFileSet {
    paths: Vec<PathBuf>,
}

impl CollectedFileSet {
    /// Returns `None` for an empty list; a set always holds at least one path.
    pub fn new(paths: Vec<PathBuf>) -> Option<Self> {
        if paths.is_empty() {
            None
        } else {
            Some(Self { paths })
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Paths as process arguments, in order, byte-for-byte as accepted.
    pub fn to_args(&self) -> Vec<OsString> {
        self.paths.iter().map(|p| p.as_os_str().to_owned()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_is_rejected() {
        assert!(CollectedFileSet::new(Vec::new()).is_none());
    }

    #[test]
    fn test_order_is_preserved() {
        let set = CollectedFileSet::new(vec![
            PathBuf::from("b.csv"),
            PathBuf::from("a.csv"),
            PathBuf::from("c.csv"),
        ])
        .unwrap();

        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(
            set.to_args(),
            vec![
                OsString::from("b.csv"),
                OsString::from("a.csv"),
                OsString::from("c.csv")
            ]
        );
        assert_eq!(set.iter().next(), Some(Path::new("b.csv")));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_relayed_unchanged() {
        use std::os::unix::ffi::OsStrExt;

        let raw = std::ffi::OsStr::from_bytes(b"/data/caf\xe9.csv");
        let set = CollectedFileSet::new(vec![PathBuf::from(raw)]).unwrap();
        assert_eq!(set.to_args()[0].as_bytes(), b"/data/caf\xe9.csv");
    }
}
