//! 分類レコード正規化モジュール
//!
//! バックエンドのバージョンや経路によってフィールド名・入れ子の形が揺れるため、
//! ここで1つの `ClassifiedItem` に揃える。どんな入力でも失敗せず既定値に落ちる。
//!
//! ## フィールド解決順（先に見つかったものを採用）
//! - ファイル名: `arquivo` → `file` → `name` → "Sem nome"
//! - カテゴリ/信頼度/理由: 入れ子の `classificacao` (`classification`) があればそちら優先
//! - 返信案: `resposta` → `response` → `answer` → ""

use crate::types::{Category, ClassifiedItem, RawRecord, UNNAMED_FILE};
use serde_json::{Map, Value};

const FILE_NAME_KEYS: &[&str] = &["arquivo", "file", "name"];
const NESTED_KEYS: &[&str] = &["classificacao", "classification"];
const CATEGORY_KEYS: &[&str] = &["categoria", "category"];
const CONFIDENCE_KEYS: &[&str] = &["confianca", "confidence"];
const REASON_KEYS: &[&str] = &["razao", "reason"];
const RESPONSE_KEYS: &[&str] = &["resposta", "response", "answer"];

/// 生レコードを正規化する
pub fn normalize(raw: &RawRecord) -> ClassifiedItem {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let file_name = first_truthy(fields, FILE_NAME_KEYS)
        .map(stringify)
        .unwrap_or_else(|| UNNAMED_FILE.to_string());

    let flat_confidence = first_present(fields, CONFIDENCE_KEYS);
    let flat_reason = first_present(fields, REASON_KEYS);

    let (category, confidence, reason) = match nested_classification(fields) {
        Some(nested) => (
            first_present(nested, CATEGORY_KEYS),
            first_present(nested, CONFIDENCE_KEYS).or(flat_confidence),
            first_present(nested, REASON_KEYS).or(flat_reason),
        ),
        None => (first_present(fields, CATEGORY_KEYS), flat_confidence, flat_reason),
    };

    ClassifiedItem {
        file_name,
        category: category
            .map(|value| Category::from_label(&stringify(value)))
            .unwrap_or_default(),
        confidence: confidence.map(coerce_number).unwrap_or(0.0),
        reason: text_or_empty(reason),
        suggested_response: text_or_empty(first_present(fields, RESPONSE_KEYS)),
    }
}

/// まとめて正規化する
pub fn normalize_all(raw: &[RawRecord]) -> Vec<ClassifiedItem> {
    raw.iter().map(normalize).collect()
}

fn nested_classification(fields: &Map<String, Value>) -> Option<&Map<String, Value>> {
    NESTED_KEYS
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_object))
}

/// null 以外で最初に見つかった値
fn first_present<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| fields.get(*key).filter(|value| !value.is_null()))
}

/// 空文字・0・false・null を飛ばして最初に見つかった値
fn first_truthy<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| fields.get(*key).filter(|value| is_truthy(value)))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn text_or_empty(value: Option<&Value>) -> String {
    value
        .filter(|v| is_truthy(v))
        .map(stringify)
        .unwrap_or_default()
}

/// 数値へ変換。変換できない・有限でない場合は 0
fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };

    if number.is_finite() {
        number
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_flat_portuguese() {
        let item = normalize(&json!({
            "arquivo": "a.txt",
            "categoria": "produtivo",
            "confianca": 90,
            "razao": "pedido de suporte",
            "resposta": "Olá"
        }));
        assert_eq!(item.file_name, "a.txt");
        assert_eq!(item.category, Category::Produtivo);
        assert_eq!(item.confidence, 90.0);
        assert_eq!(item.reason, "pedido de suporte");
        assert_eq!(item.suggested_response, "Olá");
    }

    #[test]
    fn test_normalize_flat_english() {
        let item = normalize(&json!({
            "file": "x",
            "category": "spam",
            "confidence": "75.5",
            "reason": "promo",
            "answer": "ignore"
        }));
        assert_eq!(item.file_name, "x");
        assert_eq!(item.category, Category::Other("SPAM".to_string()));
        assert_eq!(item.confidence, 75.5);
        assert_eq!(item.reason, "promo");
        assert_eq!(item.suggested_response, "ignore");
    }

    #[test]
    fn test_normalize_nested_classification() {
        let item = normalize(&json!({
            "arquivo": "email.pdf",
            "classificacao": {"categoria": "Improdutivo", "confianca": 65, "razao": "felicitações"},
            "resposta": "Obrigado!"
        }));
        assert_eq!(item.category, Category::Improdutivo);
        assert_eq!(item.confidence, 65.0);
        assert_eq!(item.reason, "felicitações");
        assert_eq!(item.suggested_response, "Obrigado!");
    }

    #[test]
    fn test_nested_falls_back_to_flat_confidence_and_reason() {
        let item = normalize(&json!({
            "classification": {"category": "produtivo"},
            "confidence": 40,
            "reason": "flat"
        }));
        assert_eq!(item.category, Category::Produtivo);
        assert_eq!(item.confidence, 40.0);
        assert_eq!(item.reason, "flat");
    }

    #[test]
    fn test_nested_without_category_ignores_flat_category() {
        let item = normalize(&json!({
            "categoria": "produtivo",
            "classificacao": {"confianca": 10}
        }));
        assert_eq!(item.category, Category::Improdutivo);
        assert_eq!(item.confidence, 10.0);
    }

    #[test]
    fn test_normalize_empty_object() {
        let item = normalize(&json!({}));
        assert_eq!(item, ClassifiedItem::default());
    }

    #[test]
    fn test_normalize_non_object_inputs() {
        for raw in [json!(null), json!("texto"), json!(42), json!([1, 2]), json!(true)] {
            let item = normalize(&raw);
            assert_eq!(item, ClassifiedItem::default(), "入力: {}", raw);
        }
    }

    #[test]
    fn test_normalize_null_fields() {
        let item = normalize(&json!({
            "arquivo": null,
            "categoria": null,
            "confianca": null,
            "razao": null,
            "resposta": null
        }));
        assert_eq!(item, ClassifiedItem::default());
    }

    #[test]
    fn test_file_name_skips_empty_alias() {
        let item = normalize(&json!({"arquivo": "", "file": "", "name": "third.eml"}));
        assert_eq!(item.file_name, "third.eml");
    }

    #[test]
    fn test_file_name_stringifies_numbers() {
        let item = normalize(&json!({"arquivo": 123}));
        assert_eq!(item.file_name, "123");
    }

    #[test]
    fn test_confidence_coercion() {
        let cases = [
            (json!("abc"), 0.0),
            (json!(""), 0.0),
            (json!("  12 "), 12.0),
            (json!(true), 1.0),
            (json!(false), 0.0),
            (json!({"x": 1}), 0.0),
            (json!("inf"), 0.0),
        ];
        for (value, expected) in cases {
            let item = normalize(&json!({"confianca": value}));
            assert_eq!(item.confidence, expected, "入力: {}", value);
        }
    }

    #[test]
    fn test_category_stringified_from_non_string() {
        let item = normalize(&json!({"category": 7}));
        assert_eq!(item.category, Category::Other("7".to_string()));
    }

    #[test]
    fn test_falsy_reason_becomes_empty() {
        let item = normalize(&json!({"razao": 0, "resposta": false}));
        assert_eq!(item.reason, "");
        assert_eq!(item.suggested_response, "");
    }

    #[test]
    fn test_category_always_uppercase() {
        let raws = [
            json!({"categoria": "mIxEd"}),
            json!({"classificacao": {"categoria": "produtivo"}}),
            json!({}),
            json!({"category": "ação"}),
        ];
        for raw in raws {
            let label = normalize(&raw).category.label().to_string();
            assert_eq!(label, label.to_uppercase());
        }
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let items = normalize_all(&[json!({"file": "1"}), json!({"file": "2"})]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].file_name, "1");
        assert_eq!(items[1].file_name, "2");
    }
}
