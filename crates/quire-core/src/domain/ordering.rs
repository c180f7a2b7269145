//! Total ordering of files by name or modification time.

use std::cmp::Ordering;
use std::path::Path;
use std::time::SystemTime;

use crate::domain::value_objects::{SortField, SortOrder};

/// What the comparator needs to know about one file.
#[derive(Debug, Clone, Copy)]
pub struct SortEntry<'a> {
    pub path: &'a Path,
    /// Required when ordering by modification time.
    pub modified: Option<SystemTime>,
}

impl<'a> SortEntry<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self {
            path,
            modified: None,
        }
    }

    pub fn with_modified(path: &'a Path, modified: SystemTime) -> Self {
        Self {
            path,
            modified: Some(modified),
        }
    }
}

/// Compare base names bytewise, then full paths.
fn by_name(a: &Path, b: &Path) -> Ordering {
    let name_a = a.file_name().map(|n| n.as_encoded_bytes()).unwrap_or_default();
    let name_b = b.file_name().map(|n| n.as_encoded_bytes()).unwrap_or_default();
    name_a
        .cmp(name_b)
        .then_with(|| a.as_os_str().cmp(b.as_os_str()))
}

/// Compare two entries under `order`.
///
/// Ties fall back to the base name and then the full path, so the ordering is
/// total and descending is the exact reverse of ascending.
pub fn compare(a: &SortEntry<'_>, b: &SortEntry<'_>, order: SortOrder) -> Ordering {
    let primary = match order.field {
        SortField::Filename => Ordering::Equal,
        SortField::Modified => a.modified.cmp(&b.modified),
    };
    let ascending = primary.then_with(|| by_name(a.path, b.path));

    if order.is_descending() {
        ascending.reverse()
    } else {
        ascending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SortDirection;
    use std::path::PathBuf;
    use std::time::Duration;

    fn sorted(paths: &[PathBuf], order: SortOrder) -> Vec<PathBuf> {
        let mut entries: Vec<SortEntry<'_>> = paths.iter().map(|p| SortEntry::new(p)).collect();
        entries.sort_by(|a, b| compare(a, b, order));
        entries.into_iter().map(|e| e.path.to_path_buf()).collect()
    }

    #[test]
    fn filename_orders_by_base_name_not_directory() {
        let paths = vec![
            PathBuf::from("a/z.yaml"),
            PathBuf::from("z/a.yaml"),
            PathBuf::from("m.yaml"),
        ];
        let asc = sorted(&paths, SortOrder::default());
        assert_eq!(
            asc,
            vec![
                PathBuf::from("z/a.yaml"),
                PathBuf::from("m.yaml"),
                PathBuf::from("a/z.yaml"),
            ]
        );
    }

    #[test]
    fn equal_base_names_fall_back_to_full_path() {
        let paths = vec![PathBuf::from("b/post.json"), PathBuf::from("a/post.json")];
        let asc = sorted(&paths, SortOrder::default());
        assert_eq!(asc[0], PathBuf::from("a/post.json"));
    }

    #[test]
    fn descending_is_exact_reverse() {
        let paths = vec![
            PathBuf::from("c.json"),
            PathBuf::from("x/a.json"),
            PathBuf::from("y/a.json"),
            PathBuf::from("b.json"),
        ];
        let asc = sorted(&paths, SortOrder::default());
        let mut desc = sorted(
            &paths,
            SortOrder::new(SortField::Filename, SortDirection::Descending),
        );
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn modified_orders_by_time_then_name() {
        let base = SystemTime::UNIX_EPOCH;
        let (p1, p2, p3) = (
            PathBuf::from("late.json"),
            PathBuf::from("b.json"),
            PathBuf::from("a.json"),
        );
        let mut entries = vec![
            SortEntry::with_modified(&p1, base + Duration::from_secs(30)),
            SortEntry::with_modified(&p2, base + Duration::from_secs(10)),
            SortEntry::with_modified(&p3, base + Duration::from_secs(10)),
        ];
        let order = SortOrder::new(SortField::Modified, SortDirection::Ascending);
        entries.sort_by(|a, b| compare(a, b, order));

        let names: Vec<&Path> = entries.iter().map(|e| e.path).collect();
        assert_eq!(names, vec![p3.as_path(), p2.as_path(), p1.as_path()]);
    }
}
