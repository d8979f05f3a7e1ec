//! 送信履歴ストア
//!
//! セッション中の送信を新しい順に保持する。削除・並べ替えはしない。
//! プロセス終了で破棄される（永続化はしない）。

use crate::normalizer::normalize_all;
use crate::types::{ClassifiedItem, EntryId, RawRecord, SubmissionRecord};
use std::collections::VecDeque;

/// 履歴のタイムスタンプ書式（ローカル時刻）
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: VecDeque<SubmissionRecord>,
    last_id: u64,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在時刻で先頭に追加
    pub fn prepend(&mut self, raw_results: Vec<RawRecord>) -> EntryId {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.prepend_at(timestamp, raw_results)
    }

    /// 指定したタイムスタンプで先頭に追加
    pub fn prepend_at(&mut self, timestamp: impl Into<String>, raw_results: Vec<RawRecord>) -> EntryId {
        self.last_id += 1;
        let id = EntryId(self.last_id);
        self.entries.push_front(SubmissionRecord {
            id,
            timestamp: timestamp.into(),
            raw_results,
        });
        id
    }

    /// 新しい順
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &SubmissionRecord> {
        self.entries.iter()
    }

    /// `start` から最大 `len` 件
    pub fn slice(&self, start: usize, len: usize) -> impl Iterator<Item = &SubmissionRecord> {
        self.entries.iter().skip(start).take(len)
    }

    pub fn latest(&self) -> Option<&SubmissionRecord> {
        self.entries.front()
    }

    pub fn get(&self, id: EntryId) -> Option<&SubmissionRecord> {
        // IDは1から連番で、エントリは削除されないので位置が決まる
        let index = self.entries.len().checked_sub(usize::try_from(id.0).ok()?)?;
        self.entries.get(index).filter(|entry| entry.id == id)
    }

    /// 全エントリの結果を正規化して平坦化
    pub fn all_items(&self) -> Vec<ClassifiedItem> {
        self.entries
            .iter()
            .flat_map(|entry| normalize_all(&entry.raw_results))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
