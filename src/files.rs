//! 添付ファイルの読み込み

use crate::error::{AppError, Result};
use autoemail_common::{Error, FileBlob, MAX_FILES};
use std::path::{Path, PathBuf};

/// パスから添付ファイルを読み込む
///
/// 上限を超える場合は読み込む前にエラーにする。
pub fn load_files(paths: &[PathBuf]) -> Result<Vec<FileBlob>> {
    if paths.len() > MAX_FILES {
        return Err(Error::TooManyFiles {
            selected: paths.len(),
            max: MAX_FILES,
        }
        .into());
    }
    paths.iter().map(|path| load_file(path)).collect()
}

fn load_file(path: &Path) -> Result<FileBlob> {
    if !path.is_file() {
        return Err(AppError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileBlob::new(name, bytes))
}
