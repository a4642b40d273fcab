use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Recursively copy `src` to `dest`, keeping symlinks as symlinks and file
/// permissions intact. `dest` must not exist yet.
pub(super) fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dest.join(rel);
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            let link = std::fs::read_link(entry.path())?;
            symlink(&link, &target)?;
        } else if file_type.is_dir() {
            std::fs::create_dir_all(&target)?;
            dirs.push((target, entry.metadata().map_err(io::Error::other)?.permissions()));
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    // Directory modes last, so read-only directories can still be filled.
    for (dir, perms) in dirs.into_iter().rev() {
        std::fs::set_permissions(&dir, perms)?;
    }
    Ok(())
}

#[cfg(unix)]
fn symlink(link: &Path, at: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(link, at)
}

#[cfg(not(unix))]
fn symlink(link: &Path, at: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot recreate symlink {} -> {}", at.display(), link.display()),
    ))
}
