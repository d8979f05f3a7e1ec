//! 集計（総数・生産的・非生産的）

use crate::normalizer::normalize;
use crate::types::{ClassifiedItem, RawRecord};
use serde::Serialize;

/// 分類結果の集計値
///
/// `PRODUTIVO` 以外はすべて非生産的として数える。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub total: usize,
    pub productive: usize,
    pub unproductive: usize,
}

impl Aggregate {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassifiedItem>,
    {
        let mut total = 0;
        let mut productive = 0;
        for item in items {
            total += 1;
            if item.category.is_productive() {
                productive += 1;
            }
        }
        Self {
            total,
            productive,
            unproductive: total - productive,
        }
    }

    /// 生レコードを正規化してから集計
    pub fn from_raw<'a, I>(raw: I) -> Self
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let items: Vec<ClassifiedItem> = raw.into_iter().map(normalize).collect();
        Self::from_items(&items)
    }
}
