//! 入力フォーム
//!
//! テキストと添付ファイル（最大 `MAX_FILES` 件）を保持する。
//! 上限を超える選択は受け付けず、選択をクリアする。

use crate::error::{Error, Result};
use crate::types::MAX_FILES;
use tracing::warn;

/// 添付ファイル1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// 1回の送信内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRequest {
    /// 空白のみのテキストは `None`
    pub text: Option<String>,
    pub files: Vec<FileBlob>,
}

impl SubmissionRequest {
    pub fn new(text: Option<String>, files: Vec<FileBlob>) -> Self {
        Self {
            text: text.filter(|t| !t.trim().is_empty()),
            files,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_file_count(self.files.len())
    }
}

fn check_file_count(selected: usize) -> Result<()> {
    if selected > MAX_FILES {
        return Err(Error::TooManyFiles {
            selected,
            max: MAX_FILES,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct InputForm {
    text: String,
    files: Vec<FileBlob>,
}

impl InputForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// ファイル選択（ドロップ・ダイアログ共通）
    ///
    /// 上限超過時は選択をクリアしてエラーを返す。
    pub fn select_files(&mut self, files: Vec<FileBlob>) -> Result<()> {
        if let Err(e) = check_file_count(files.len()) {
            warn!(selected = files.len(), "ファイル数が上限を超えています");
            self.files.clear();
            return Err(e);
        }
        self.files = files;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.files.clear();
    }

    pub fn clear_files(&mut self) {
        self.files.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn files(&self) -> &[FileBlob] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.files.is_empty()
    }

    pub fn to_request(&self) -> SubmissionRequest {
        SubmissionRequest::new(Some(self.text.clone()), self.files.clone())
    }
}
