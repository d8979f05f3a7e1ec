//! AutoEmail Common Library
//!
//! 分類結果の正規化・集計・ビュー・送信フローをまとめたコア。
//! CLIと将来のフロントエンドで共有する。

pub mod aggregate;
pub mod busy;
pub mod controller;
pub mod error;
pub mod escape;
pub mod form;
pub mod history;
pub mod normalizer;
pub mod parser;
pub mod transport;
pub mod types;
pub mod view;

pub use aggregate::Aggregate;
pub use busy::{BusyGuard, BusyIndicator, BusyState, NoopIndicator};
pub use controller::{OverlapPolicy, PendingSubmission, Session, SubmissionController, SubmitOutcome};
pub use error::{Error, Result, TransportError};
pub use escape::escape_html;
pub use form::{FileBlob, InputForm, SubmissionRequest};
pub use history::HistoryStore;
pub use normalizer::{normalize, normalize_all};
pub use parser::extract_results;
pub use transport::{ClassificationTransport, TransportResponse};
pub use types::{Category, CategoryFilter, ClassifiedItem, EntryId, RawRecord, SubmissionRecord, MAX_FILES};
pub use view::{CurrentRender, CurrentResultView, HistoryRender, HistoryView, PAGE_SIZE};
