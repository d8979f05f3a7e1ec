//! 現在の結果ビュー
//!
//! 直近の送信結果だけを保持し、カテゴリフィルタを掛けて描画する。
//! 集計は常にフィルタ前の全件が対象。

use super::card::ItemCard;
use crate::aggregate::Aggregate;
use crate::escape::escape_html;
use crate::normalizer::normalize_all;
use crate::types::{CategoryFilter, ClassifiedItem, RawRecord};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// 現在の結果の描画記述
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentRender {
    pub stats: Aggregate,
    pub filter: String,
    pub body: CurrentBody,
}

/// 表示領域の中身
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum CurrentBody {
    /// まだ送信していない（結果が空）
    NoSubmission,
    /// 結果はあるがフィルタに一致しない
    NoMatches,
    /// 送信エラー（エスケープ済み）
    Error(String),
    Items(Vec<ItemCard>),
}

#[derive(Debug, Clone, Default)]
pub struct CurrentResultView {
    items: Vec<ClassifiedItem>,
    filter: CategoryFilter,
    open_responses: HashSet<usize>,
    notice: Option<String>,
}

impl CurrentResultView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しい結果で置き換える。フィルタは "all" に戻る
    pub fn set_results(&mut self, raw: &[RawRecord]) -> CurrentRender {
        self.items = normalize_all(raw);
        self.filter = CategoryFilter::All;
        self.open_responses.clear();
        self.notice = None;
        debug!(items = self.items.len(), "現在の結果を更新");
        self.render()
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) -> CurrentRender {
        self.filter = filter;
        self.notice = None;
        self.render()
    }

    /// 表示領域にエラーを出す。結果とフィルタはそのまま
    pub fn show_error(&mut self, message: &str) -> CurrentRender {
        self.notice = Some(message.to_string());
        self.render()
    }

    /// 返信案パネルの開閉。範囲外なら何もしない
    pub fn toggle_response(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        if !self.open_responses.remove(&index) {
            self.open_responses.insert(index);
        }
        true
    }

    pub fn render(&self) -> CurrentRender {
        let stats = Aggregate::from_items(&self.items);

        let body = if let Some(message) = &self.notice {
            CurrentBody::Error(escape_html(message))
        } else if self.items.is_empty() {
            CurrentBody::NoSubmission
        } else {
            let cards: Vec<ItemCard> = self
                .displayed()
                .map(|(index, item)| {
                    ItemCard::new(index, item, self.open_responses.contains(&index))
                })
                .collect();
            if cards.is_empty() {
                CurrentBody::NoMatches
            } else {
                CurrentBody::Items(cards)
            }
        };

        CurrentRender {
            stats,
            filter: self.filter.to_string(),
            body,
        }
    }

    /// フィルタ後の (元の位置, 結果) の列
    pub fn displayed(&self) -> impl Iterator<Item = (usize, &ClassifiedItem)> {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| self.filter.matches(item))
    }

    pub fn items(&self) -> &[ClassifiedItem] {
        &self.items
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }
}
