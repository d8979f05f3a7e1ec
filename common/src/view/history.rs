//! 履歴ビュー
//!
//! - 集計は表示ページではなく履歴全体が対象
//! - 1ページ `PAGE_SIZE` 件
//! - 詳細は初回展開時にだけ正規化し、以降はキャッシュを使う

use super::card::ItemCard;
use crate::aggregate::Aggregate;
use crate::escape::escape_html;
use crate::history::HistoryStore;
use crate::normalizer::normalize_all;
use crate::types::{EntryId, SubmissionRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 1ページあたりの履歴件数
pub const PAGE_SIZE: usize = 5;

/// 履歴の描画記述
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRender {
    pub stats: Aggregate,
    pub body: HistoryBody,
    /// 2ページ以上あるときだけ出す
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum HistoryBody {
    Empty,
    Entries(Vec<HistoryEntryCard>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryCard {
    pub id: EntryId,
    pub timestamp: String,
    pub summary: Aggregate,
    pub expanded: bool,
    /// 展開中のみ
    pub details: Option<Vec<ItemCard>>,
}

/// ページ送りの状態（`page` は0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub total_pages: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// 総ページ数（切り上げ）
pub fn total_pages(entries: usize) -> usize {
    entries.div_ceil(PAGE_SIZE)
}

#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    page: usize,
    expanded: HashSet<EntryId>,
    details: HashMap<EntryId, Vec<ItemCard>>,
}

impl HistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn reset_page(&mut self) {
        self.page = 0;
    }

    /// 次のページへ。最終ページでは何もしない
    pub fn next_page(&mut self, store: &HistoryStore) -> HistoryRender {
        if self.page + 1 < total_pages(store.len()) {
            self.page += 1;
        }
        self.render(store)
    }

    /// 前のページへ。先頭ページでは何もしない
    pub fn previous_page(&mut self, store: &HistoryStore) -> HistoryRender {
        self.page = self.page.saturating_sub(1);
        self.render(store)
    }

    /// 詳細の開閉
    ///
    /// 初回展開時だけ正規化してカードを作り、閉じてもキャッシュは残す。
    pub fn toggle_detail(&mut self, store: &HistoryStore, id: EntryId) -> HistoryRender {
        if let Some(entry) = store.get(id) {
            if !self.expanded.remove(&id) {
                self.expanded.insert(id);
                self.details.entry(id).or_insert_with(|| {
                    debug!(entry = %id, "履歴詳細を生成");
                    detail_cards(entry)
                });
            }
        }
        self.render(store)
    }

    pub fn is_expanded(&self, id: EntryId) -> bool {
        self.expanded.contains(&id)
    }

    /// 詳細カードが生成済みか
    pub fn is_materialized(&self, id: EntryId) -> bool {
        self.details.contains_key(&id)
    }

    pub fn render(&self, store: &HistoryStore) -> HistoryRender {
        if store.is_empty() {
            return HistoryRender {
                stats: Aggregate::default(),
                body: HistoryBody::Empty,
                pagination: None,
            };
        }

        let stats = Aggregate::from_items(&store.all_items());
        let pages = total_pages(store.len());
        let page = self.page.min(pages - 1);

        let cards = store
            .slice(page * PAGE_SIZE, PAGE_SIZE)
            .map(|entry| self.entry_card(entry))
            .collect();

        let pagination = (pages > 1).then(|| Pagination {
            page,
            total_pages: pages,
            previous_enabled: page > 0,
            next_enabled: page + 1 < pages,
        });

        HistoryRender {
            stats,
            body: HistoryBody::Entries(cards),
            pagination,
        }
    }

    fn entry_card(&self, entry: &SubmissionRecord) -> HistoryEntryCard {
        let expanded = self.is_expanded(entry.id);
        HistoryEntryCard {
            id: entry.id,
            timestamp: escape_html(&entry.timestamp),
            summary: Aggregate::from_raw(&entry.raw_results),
            expanded,
            details: if expanded {
                self.details.get(&entry.id).cloned()
            } else {
                None
            },
        }
    }
}

fn detail_cards(entry: &SubmissionRecord) -> Vec<ItemCard> {
    normalize_all(&entry.raw_results)
        .iter()
        .enumerate()
        .map(|(index, item)| ItemCard::new(index, item, false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(n: usize) -> HistoryStore {
        let mut store = HistoryStore::new();
        for i in 1..=n {
            store.prepend_at(
                format!("entry {}", i),
                vec![json!({"file": format!("f{}", i), "categoria": "produtivo"})],
            );
        }
        store
    }

    fn entries(render: &HistoryRender) -> &[HistoryEntryCard] {
        match &render.body {
            HistoryBody::Entries(cards) => cards,
            HistoryBody::Empty => panic!("エントリが期待される"),
        }
    }

    #[test]
    fn test_empty_history() {
        let view = HistoryView::new();
        let render = view.render(&HistoryStore::new());
        assert_eq!(render.body, HistoryBody::Empty);
        assert_eq!(render.stats, Aggregate::default());
        assert!(render.pagination.is_none());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(5), 1);
        assert_eq!(total_pages(6), 2);
        assert_eq!(total_pages(11), 3);
    }

    #[test]
    fn test_single_page_has_no_pagination() {
        let store = store_with(5);
        let render = HistoryView::new().render(&store);
        assert_eq!(entries(&render).len(), 5);
        assert!(render.pagination.is_none());
    }

    #[test]
    fn test_six_entries_paginate() {
        let store = store_with(6);
        let mut view = HistoryView::new();

        let render = view.render(&store);
        let cards = entries(&render);
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].timestamp, "entry 6");
        assert_eq!(cards[4].timestamp, "entry 2");
        assert_eq!(
            render.pagination,
            Some(Pagination { page: 0, total_pages: 2, previous_enabled: false, next_enabled: true })
        );

        let render = view.next_page(&store);
        let cards = entries(&render);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].timestamp, "entry 1");
        assert_eq!(
            render.pagination,
            Some(Pagination { page: 1, total_pages: 2, previous_enabled: true, next_enabled: false })
        );
    }

    #[test]
    fn test_navigation_bounds_are_noops() {
        let store = store_with(6);
        let mut view = HistoryView::new();

        view.previous_page(&store);
        assert_eq!(view.page(), 0);

        view.next_page(&store);
        view.next_page(&store);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_next_page_without_entries() {
        let store = HistoryStore::new();
        let mut view = HistoryView::new();
        view.next_page(&store);
        assert_eq!(view.page(), 0);
    }

    #[test]
    fn test_stats_cover_whole_history() {
        let mut store = store_with(6);
        store.prepend_at("mixed", vec![json!({"categoria": "spam"}), json!({})]);
        let mut view = HistoryView::new();
        view.next_page(&store);
        let render = view.render(&store);
        assert_eq!(render.stats, Aggregate { total: 8, productive: 6, unproductive: 2 });
    }

    #[test]
    fn test_entry_summary_uses_normalized_items() {
        let mut store = HistoryStore::new();
        store.prepend_at(
            "t",
            vec![
                json!({"classificacao": {"categoria": "produtivo"}}),
                json!({"category": "Produtivo"}),
                json!({"categoria": "spam"}),
            ],
        );
        let render = HistoryView::new().render(&store);
        assert_eq!(
            entries(&render)[0].summary,
            Aggregate { total: 3, productive: 2, unproductive: 1 }
        );
    }

    #[test]
    fn test_toggle_detail_is_lazy_and_cached() {
        let store = store_with(2);
        let mut view = HistoryView::new();
        let id = store.latest().unwrap().id;

        let render = view.render(&store);
        assert!(entries(&render)[0].details.is_none());
        assert!(!view.is_materialized(id));

        let render = view.toggle_detail(&store, id);
        let card = &entries(&render)[0];
        assert!(card.expanded);
        assert_eq!(card.details.as_ref().unwrap()[0].file_name, "f2");
        assert!(view.is_materialized(id));

        let render = view.toggle_detail(&store, id);
        assert!(!entries(&render)[0].expanded);
        assert!(entries(&render)[0].details.is_none());
        assert!(view.is_materialized(id));

        let render = view.toggle_detail(&store, id);
        assert!(entries(&render)[0].expanded);
        assert!(entries(&render)[1].details.is_none());
    }

    #[test]
    fn test_toggle_unknown_entry() {
        let store = store_with(1);
        let mut view = HistoryView::new();
        view.toggle_detail(&store, EntryId(42));
        assert!(!view.is_expanded(EntryId(42)));
        assert!(!view.is_materialized(EntryId(42)));
    }

    #[test]
    fn test_timestamp_escaped() {
        let mut store = HistoryStore::new();
        store.prepend_at("<t>", Vec::new());
        let render = HistoryView::new().render(&store);
        assert_eq!(entries(&render)[0].timestamp, "&lt;t&gt;");
    }
}
