//! 処理中インジケータ
//!
//! `BusyState::acquire` が返すガードが生きている間だけ表示される。
//! ガードは成功・失敗・パニックのどの経路でも drop で解放される。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 表示先（スピナーなど）
pub trait BusyIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// 何も表示しないインジケータ
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopIndicator;

impl BusyIndicator for NoopIndicator {
    fn show(&self) {}
    fn hide(&self) {}
}

/// 実行中の送信数と表示先
#[derive(Clone)]
pub struct BusyState {
    in_flight: Arc<AtomicUsize>,
    indicator: Arc<dyn BusyIndicator>,
}

impl BusyState {
    pub fn new(indicator: Arc<dyn BusyIndicator>) -> Self {
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            indicator,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    /// 最初の1件で表示する
    pub fn acquire(&self) -> BusyGuard {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            self.indicator.show();
        }
        BusyGuard {
            state: self.clone(),
        }
    }
}

impl Default for BusyState {
    fn default() -> Self {
        Self::new(Arc::new(NoopIndicator))
    }
}

impl std::fmt::Debug for BusyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyState")
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

/// 最後の1件が終わったら非表示にする
#[derive(Debug)]
pub struct BusyGuard {
    state: BusyState,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if self.state.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.state.indicator.hide();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// show/hide の回数を記録する
    #[derive(Default)]
    pub(crate) struct RecordingIndicator {
        pub shown: AtomicUsize,
        pub hidden: AtomicUsize,
    }

    impl BusyIndicator for RecordingIndicator {
        fn show(&self) {
            self.shown.fetch_add(1, Ordering::SeqCst);
        }
        fn hide(&self) {
            self.hidden.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_guard_shows_and_hides() {
        let indicator = Arc::new(RecordingIndicator::default());
        let state = BusyState::new(indicator.clone());
        {
            let _guard = state.acquire();
            assert!(state.is_busy());
            assert_eq!(indicator.shown.load(Ordering::SeqCst), 1);
            assert_eq!(indicator.hidden.load(Ordering::SeqCst), 0);
        }
        assert!(!state.is_busy());
        assert_eq!(indicator.hidden.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_nested_guards_hide_once() {
        let indicator = Arc::new(RecordingIndicator::default());
        let state = BusyState::new(indicator.clone());
        let first = state.acquire();
        let second = state.acquire();
        assert_eq!(state.in_flight(), 2);
        drop(first);
        assert_eq!(indicator.hidden.load(Ordering::SeqCst), 0);
        drop(second);
        assert_eq!(indicator.shown.load(Ordering::SeqCst), 1);
        assert_eq!(indicator.hidden.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_released_on_panic() {
        let indicator = Arc::new(RecordingIndicator::default());
        let state = BusyState::new(indicator.clone());
        let cloned = state.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = cloned.acquire();
            panic!("描画中の失敗");
        }));
        assert!(result.is_err());
        assert!(!state.is_busy());
        assert_eq!(indicator.hidden.load(Ordering::SeqCst), 1);
    }
}
