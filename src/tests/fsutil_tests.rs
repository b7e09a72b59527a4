#[cfg(test)]
mod tests {
    use crate::fsutil::{list_dir, ListOptions};
    use std::fs;
    use tempfile::TempDir;

    fn populated_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("beta.txt"), b"b").unwrap();
        fs::write(temp.path().join("alpha.txt"), b"a").unwrap();
        fs::write(temp.path().join(".hidden"), b"h").unwrap();
        fs::create_dir(temp.path().join("subdir")).unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        temp
    }

    #[test]
    fn test_default_skips_dot_entries_and_sorts() {
        let temp = populated_dir();
        let entries = list_dir(temp.path(), &ListOptions::default()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.txt", "beta.txt", "subdir"]);
    }

    #[test]
    fn test_entries_carry_full_paths() {
        let temp = populated_dir();
        let entries = list_dir(temp.path(), &ListOptions::default()).unwrap();
        for entry in &entries {
            assert_eq!(entry.path, temp.path().join(&entry.name));
        }
    }

    #[test]
    fn test_no_files_keeps_only_directories() {
        let temp = populated_dir();
        let options = ListOptions { no_files: true, ..Default::default() };
        let entries = list_dir(temp.path(), &options).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["subdir"]);
    }

    #[test]
    fn test_no_dirs_keeps_only_files() {
        let temp = populated_dir();
        let options = ListOptions { no_dirs: true, ..Default::default() };
        let entries = list_dir(temp.path(), &options).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.txt", "beta.txt"]);
    }

    #[test]
    fn test_dot_entries_included_when_enabled() {
        let temp = populated_dir();
        let options = ListOptions { no_dot: false, ..Default::default() };
        let entries = list_dir(temp.path(), &options).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![".git", ".hidden", "alpha.txt", "beta.txt", "subdir"]);
    }

    #[test]
    fn test_missing_path_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");
        assert!(list_dir(&missing, &ListOptions::default()).is_err());
    }

    #[test]
    fn test_empty_dir_lists_nothing() {
        let temp = TempDir::new().unwrap();
        let entries = list_dir(temp.path(), &ListOptions::default()).unwrap();
        assert!(entries.is_empty());
    }
}
