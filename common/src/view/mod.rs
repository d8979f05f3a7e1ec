//! 描画記述とビュー
//!
//! ビューは状態から描画記述（`CurrentRender` / `HistoryRender`）を作るだけで、
//! HTMLや端末への出力は `html` / `text` が担当する。

pub mod card;
pub mod current;
pub mod history;
pub mod html;
pub mod text;

pub use card::ItemCard;
pub use current::{CurrentBody, CurrentRender, CurrentResultView};
pub use history::{
    total_pages, HistoryBody, HistoryEntryCard, HistoryRender, HistoryView, Pagination, PAGE_SIZE,
};
