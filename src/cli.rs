use autoemail_common::OverlapPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autoemail")]
#[command(about = "メール分類結果の送信・集計・履歴表示ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 分類エンドポイント（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テキスト・ファイルを送信して分類結果を表示
    Submit {
        /// 送信するテキスト
        #[arg(short, long)]
        text: Option<String>,

        /// 添付ファイル（最大10件）
        files: Vec<PathBuf>,

        /// 表示用データをJSONで出力
        #[arg(long)]
        json: bool,

        /// HTMLページを書き出す
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// 保存済みレスポンスを正規化して表示
    Normalize {
        /// レスポンスJSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// カテゴリで絞り込み（all/produtivo/improdutivo/...）
        #[arg(short, long)]
        filter: Option<String>,

        /// 正規化済みの項目をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話セッション（履歴はセッション中のみ保持）
    Session,

    /// 設定を表示/編集
    Config {
        /// エンドポイントを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 送信中の再送信の扱い (reject/allow)
        #[arg(long)]
        set_overlap: Option<OverlapPolicy>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
