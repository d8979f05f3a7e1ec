//! 送信コントローラ
//!
//! セッション状態（現在の結果・履歴・入力フォーム）を所有し、1回の送信を進める。
//!
//! ## 成功時の処理順
//! 1. フィルタを "all" に戻して現在の結果を差し替え
//! 2. 生の結果を履歴の先頭に追加
//! 3. 履歴ページを0に戻して再描画
//! 4. 入力フォームをクリア
//!
//! 失敗時は表示領域にエラーを出すだけで、履歴と現在の結果は変えない。

use crate::busy::{BusyGuard, BusyIndicator, BusyState};
use crate::error::{Error, Result, TransportError};
use crate::form::{InputForm, SubmissionRequest};
use crate::history::HistoryStore;
use crate::parser::extract_results;
use crate::transport::{ClassificationTransport, TransportResponse};
use crate::types::EntryId;
use crate::view::{CurrentRender, CurrentResultView, HistoryRender, HistoryView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// 送信中にもう1件送信されたときの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// 送信中は新しい送信を拒否する
    #[default]
    Reject,
    /// 並行を許可し、最後に完了したものが現在の結果になる
    Allow,
}

impl std::str::FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(OverlapPolicy::Reject),
            "allow" => Ok(OverlapPolicy::Allow),
            _ => Err(format!("Unknown overlap policy: {}. Use reject or allow", s)),
        }
    }
}

impl std::fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlapPolicy::Reject => write!(f, "reject"),
            OverlapPolicy::Allow => write!(f, "allow"),
        }
    }
}

/// セッション状態
///
/// セッション開始時に作られ、終了時に破棄される。
#[derive(Debug, Default)]
pub struct Session {
    pub current: CurrentResultView,
    pub history: HistoryStore,
    pub history_view: HistoryView,
    pub form: InputForm,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_current(&self) -> CurrentRender {
        self.current.render()
    }

    pub fn render_history(&self) -> HistoryRender {
        self.history_view.render(&self.history)
    }

    pub fn next_history_page(&mut self) -> HistoryRender {
        self.history_view.next_page(&self.history)
    }

    pub fn previous_history_page(&mut self) -> HistoryRender {
        self.history_view.previous_page(&self.history)
    }

    pub fn toggle_history_detail(&mut self, id: EntryId) -> HistoryRender {
        self.history_view.toggle_detail(&self.history, id)
    }
}

/// 送信開始済みのリクエスト
///
/// 保持している間は処理中インジケータが表示される。
#[derive(Debug)]
pub struct PendingSubmission {
    request: SubmissionRequest,
    _guard: BusyGuard,
}

impl PendingSubmission {
    pub fn request(&self) -> &SubmissionRequest {
        &self.request
    }
}

/// 成功した送信の結果
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub entry: EntryId,
    pub current: CurrentRender,
    pub history: HistoryRender,
}

pub struct SubmissionController<T> {
    transport: T,
    session: Session,
    policy: OverlapPolicy,
    busy: BusyState,
}

impl<T: ClassificationTransport> SubmissionController<T> {
    pub fn new(transport: T, policy: OverlapPolicy, indicator: Arc<dyn BusyIndicator>) -> Self {
        Self {
            transport,
            session: Session::new(),
            policy,
            busy: BusyState::new(indicator),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// 送信を開始する（ネットワークにはまだ出ない）
    ///
    /// ファイル数超過ならフォームをクリアしてエラー。
    pub fn begin(&mut self, request: SubmissionRequest) -> Result<PendingSubmission> {
        if let Err(e) = request.validate() {
            warn!("送信を中止: {}", e);
            self.session.form.clear();
            return Err(e);
        }
        if self.policy == OverlapPolicy::Reject && self.busy.is_busy() {
            warn!("送信中のため新しい送信を拒否");
            return Err(Error::SubmissionInProgress);
        }

        info!(
            files = request.files.len(),
            has_text = request.text.is_some(),
            "送信開始"
        );
        Ok(PendingSubmission {
            request,
            _guard: self.busy.acquire(),
        })
    }

    /// 送信結果を反映する
    pub fn complete(
        &mut self,
        pending: PendingSubmission,
        outcome: std::result::Result<TransportResponse, TransportError>,
    ) -> Result<SubmitOutcome> {
        // 描画が終わるまでガードを保持
        let _pending = pending;

        let response = match outcome {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                let error = TransportError::Status {
                    status: response.status,
                    body: response.body,
                };
                return Err(self.fail(error));
            }
            Err(error) => return Err(self.fail(error)),
        };

        let raw = extract_results(&response.body);
        info!(results = raw.len(), "送信完了");

        let current = self.session.current.set_results(&raw);
        let entry = self.session.history.prepend(raw);
        self.session.history_view.reset_page();
        let history = self.session.render_history();
        self.session.form.clear();

        Ok(SubmitOutcome {
            entry,
            current,
            history,
        })
    }

    /// 開始から反映まで一括で行う
    pub async fn submit(&mut self, request: SubmissionRequest) -> Result<SubmitOutcome> {
        let pending = self.begin(request)?;
        let outcome = self.transport.send(pending.request()).await;
        self.complete(pending, outcome)
    }

    /// 入力フォームの内容で送信する
    pub async fn submit_form(&mut self) -> Result<SubmitOutcome> {
        let request = self.session.form.to_request();
        self.submit(request).await
    }

    fn fail(&mut self, error: TransportError) -> Error {
        warn!("送信失敗: {}", error);
        self.session.current.show_error(&error.to_string());
        Error::Transport(error)
    }
}
