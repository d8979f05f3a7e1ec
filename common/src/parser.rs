//! APIレスポンスパーサー
//!
//! 成功レスポンスの本文から分類レコードの配列を取り出す。
//! 想定外の形は失敗にせず空の結果として扱う。

use crate::types::RawRecord;
use serde_json::Value;
use tracing::warn;

/// 結果配列を包むフィールド名（優先順）
const RESULT_KEYS: &[&str] = &["resultados", "results"];

/// レスポンス本文から生レコードの配列を抽出
///
/// 抽出優先順位:
/// 1. 本文そのものが配列
/// 2. オブジェクトの `resultados` / `results` 配列
/// 3. それ以外（JSONでない場合も含む）は空
///
/// # Examples
/// ```
/// use autoemail_common::extract_results;
///
/// let results = extract_results(r#"{"resultados": [{"arquivo": "a.txt"}]}"#);
/// assert_eq!(results.len(), 1);
/// ```
pub fn extract_results(body: &str) -> Vec<RawRecord> {
    let value: Value = match serde_json::from_str(body.trim()) {
        Ok(value) => value,
        Err(e) => {
            warn!("レスポンスがJSONではありません: {}", e);
            return Vec::new();
        }
    };
    extract_results_from_value(value)
}

/// パース済みJSONから生レコードの配列を抽出
pub fn extract_results_from_value(value: Value) -> Vec<RawRecord> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut fields) => {
            for key in RESULT_KEYS {
                if let Some(Value::Array(items)) = fields.remove(*key) {
                    return items;
                }
            }
            warn!("レスポンスに結果配列がありません");
            Vec::new()
        }
        other => {
            warn!("想定外のレスポンス形式: {}", other);
            Vec::new()
        }
    }
}
