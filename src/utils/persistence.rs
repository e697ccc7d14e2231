use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

const TMP_SUFFIX: &str = "tmp";

/// Sibling path used to stage a write before it replaces `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to `path` by staging to a temporary file and renaming it over
/// the target. The original file is untouched if any step fails.
pub fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    let staged = stage(&tmp, data).and_then(|()| fs::rename(&tmp, path));
    if staged.is_err() && tmp.is_file() {
        let _ = fs::remove_file(&tmp);
    }
    staged
}

fn stage(tmp: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(data)?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
