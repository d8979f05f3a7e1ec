//! 分類結果の型定義
//!
//! CLIと将来のフロントエンドで共有される型:
//! - RawRecord: サーバーから受け取ったままの分類レコード
//! - ClassifiedItem: 正規化後の分類結果
//! - SubmissionRecord: 履歴に積まれる1回分の送信

use serde::{Deserialize, Serialize};
use std::fmt;

/// サーバーから受け取ったままのレコード（形は保証されない）
pub type RawRecord = serde_json::Value;

/// 名前がないときの表示名
pub const UNNAMED_FILE: &str = "Sem nome";

/// 1回の送信で添付できるファイル数の上限
pub const MAX_FILES: usize = 10;

/// 分類カテゴリ
///
/// 集計上は `Produtivo` かそれ以外かの2区分だが、
/// 表示は未知のラベルもそのまま出す。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Produtivo,
    #[default]
    Improdutivo,
    Other(String),
}

impl Category {
    /// ラベルから生成（大文字化して判定）
    pub fn from_label(label: &str) -> Self {
        let upper = label.to_uppercase();
        match upper.as_str() {
            "PRODUTIVO" => Category::Produtivo,
            "IMPRODUTIVO" => Category::Improdutivo,
            _ => Category::Other(upper),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Produtivo => "PRODUTIVO",
            Category::Improdutivo => "IMPRODUTIVO",
            Category::Other(label) => label,
        }
    }

    pub fn is_productive(&self) -> bool {
        matches!(self, Category::Produtivo)
    }

    /// タグ表示用のCSSクラス名
    pub fn css_class(&self) -> String {
        self.label().to_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

/// 正規化済みの分類結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedItem {
    pub file_name: String,
    pub category: Category,
    pub confidence: f64,
    pub reason: String,
    pub suggested_response: String,
}

impl Default for ClassifiedItem {
    fn default() -> Self {
        Self {
            file_name: UNNAMED_FILE.to_string(),
            category: Category::default(),
            confidence: 0.0,
            reason: String::new(),
            suggested_response: String::new(),
        }
    }
}

/// 現在の結果に掛けるカテゴリフィルタ
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// "all" またはカテゴリラベルから生成
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::from_label(trimmed))
        }
    }

    pub fn matches(&self, item: &ClassifiedItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &item.category == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// 履歴エントリの識別子（ストア内で単調増加）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 履歴の1エントリ
///
/// `raw_results` は受信時の形のまま保持し、描画のたびに正規化し直す。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: EntryId,
    pub timestamp: String,
    pub raw_results: Vec<RawRecord>,
}
