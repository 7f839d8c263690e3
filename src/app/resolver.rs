use crate::app::models::ResolvedProjectSet;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Entry whose presence marks a directory as an SVN checkout root.
pub const VCS_MARKER: &str = ".svn";

/// Decides which project directories take part in an update.
///
/// Scan results come first, then list-file results, each in input order.
/// Bad inputs are warned about and skipped; nothing here is fatal.
pub struct ProjectResolver<'a> {
    scan_dirs: &'a [PathBuf],
    list_files: Vec<PathBuf>,
}

impl<'a> ProjectResolver<'a> {
    /// Falls back to `default_list_file` only when no source was given at all.
    pub fn new(scan_dirs: &'a [PathBuf], list_files: &[PathBuf], default_list_file: &Path) -> Self {
        let list_files = if scan_dirs.is_empty() && list_files.is_empty() {
            log::info!(
                "📄 Using default project list {}",
                default_list_file.display()
            );
            vec![default_list_file.to_path_buf()]
        } else {
            list_files.to_vec()
        };

        Self {
            scan_dirs,
            list_files,
        }
    }

    /// List files that will actually be read.
    pub fn list_files(&self) -> &[PathBuf] {
        &self.list_files
    }

    pub fn resolve(&self) -> ResolvedProjectSet {
        let mut paths = Vec::new();

        for dir in self.scan_dirs {
            paths.extend(scan_directory(dir));
        }
        for file in &self.list_files {
            paths.extend(read_list_file(file));
        }

        if paths.is_empty() {
            log::warn!("⚠️ No projects found. Nothing to update.");
        }

        ResolvedProjectSet { paths }
    }
}

/// Immediate subdirectories of `dir` that contain the VCS marker, in enumeration order.
fn scan_directory(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        log::warn!("⚠️ Scan directory {} not found, skipping.", dir.display());
        return Vec::new();
    }

    log::info!("🔍 Searching {} for SVN projects", dir.display());
    let mut found = Vec::new();

    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .build();

    for result in walker {
        match result {
            Ok(entry) => {
                if entry.depth() == 0 {
                    continue;
                }
                let path = entry.path();
                if path.is_dir() && path.join(VCS_MARKER).exists() {
                    log::debug!("Found project {}", path.display());
                    found.push(path.to_path_buf());
                }
            }
            Err(err) => log::warn!("⚠️ Error reading {}: {}", dir.display(), err),
        }
    }

    found
}

/// Existing paths named by the non-blank lines of `file`, in line order.
fn read_list_file(file: &Path) -> Vec<PathBuf> {
    if !file.exists() {
        log::warn!("⚠️ Project list {} not found, skipping.", file.display());
        return Vec::new();
    }

    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(err) => {
            log::warn!("⚠️ Failed to read {}: {}", file.display(), err);
            return Vec::new();
        }
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let path = PathBuf::from(line);
            if path.exists() {
                Some(path)
            } else {
                log::warn!(
                    "⚠️ Project {} listed in {} does not exist, skipping.",
                    line,
                    file.display()
                );
                None
            }
        })
        .collect()
}
