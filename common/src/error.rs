//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Máximo {max} arquivos por envio (selecionados: {selected})")]
    TooManyFiles { selected: usize, max: usize },

    #[error("Já existe um envio em andamento")]
    SubmissionInProgress,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// 送信先とのやり取りで発生するエラー
///
/// Display は画面にそのまま出す文言になる。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// 接続失敗など、レスポンスが得られなかった場合
    #[error("{0}")]
    Network(String),

    /// 成功以外のステータス。本文が空ならステータスコードを表示
    #[error("{}", status_message(.status, .body))]
    Status { status: u16, body: String },
}

fn status_message(status: &u16, body: &str) -> String {
    if body.is_empty() {
        format!("Status {}", status)
    } else {
        body.to_string()
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
