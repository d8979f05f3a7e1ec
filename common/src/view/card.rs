//! 分類結果カード（描画記述）

use crate::escape::escape_html;
use crate::types::ClassifiedItem;
use serde::Serialize;

/// 1件分の表示内容。文字列はすべてエスケープ済み
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCard {
    /// 元の結果リスト内での位置
    pub index: usize,
    pub file_name: String,
    pub category: String,
    pub category_class: String,
    pub confidence: f64,
    pub reason: String,
    pub suggested_response: String,
    /// 返信案パネルが開いているか（既定は閉）
    pub response_open: bool,
}

impl ItemCard {
    pub fn new(index: usize, item: &ClassifiedItem, response_open: bool) -> Self {
        Self {
            index,
            file_name: escape_html(&item.file_name),
            category: escape_html(item.category.label()),
            category_class: escape_html(&item.category.css_class()),
            confidence: item.confidence,
            reason: escape_html(&item.reason),
            suggested_response: escape_html(&item.suggested_response),
            response_open,
        }
    }
}
