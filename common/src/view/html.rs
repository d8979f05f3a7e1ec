//! 描画記述のHTML出力
//!
//! カードの文字列はエスケープ済みなので、ここでは再エスケープしない。

use super::card::ItemCard;
use super::current::{CurrentBody, CurrentRender};
use super::history::{HistoryBody, HistoryEntryCard, HistoryRender, Pagination};
use crate::aggregate::Aggregate;
use crate::escape::escape_html;
use std::fmt::Write;

const NO_SUBMISSION: &str = "Nenhuma análise realizada ainda.";
const NO_MATCHES: &str = "Nenhum resultado para este filtro.";
const NO_HISTORY: &str = "Nenhuma execução ainda.";

impl CurrentRender {
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&stats_html("stats-atual", &self.stats, true));
        html.push_str("<div id=\"resultado\">");
        match &self.body {
            CurrentBody::NoSubmission => {
                let _ = write!(html, "<p>{}</p>", NO_SUBMISSION);
            }
            CurrentBody::NoMatches => {
                let _ = write!(html, "<p>{}</p>", NO_MATCHES);
            }
            CurrentBody::Error(message) => {
                let _ = write!(html, "<p class=\"erro\">Erro no processamento: {}</p>", message);
            }
            CurrentBody::Items(cards) => {
                for card in cards {
                    html.push_str(&item_card_html(card));
                }
            }
        }
        html.push_str("</div>");
        html
    }
}

impl HistoryRender {
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&stats_html("stats-hist", &self.stats, false));
        html.push_str("<div id=\"historico\">");
        match &self.body {
            HistoryBody::Empty => {
                let _ = write!(html, "<p>{}</p>", NO_HISTORY);
            }
            HistoryBody::Entries(entries) => {
                for entry in entries {
                    html.push_str(&history_entry_html(entry));
                }
            }
        }
        if let Some(pagination) = &self.pagination {
            html.push_str(&pagination_html(pagination));
        }
        html.push_str("</div>");
        html
    }
}

fn stats_html(id: &str, stats: &Aggregate, filters: bool) -> String {
    let circle = |filter: &str, value: usize| {
        if filters {
            format!("<div class=\"circle\" data-filter=\"{}\">{}</div>", filter, value)
        } else {
            format!("<div class=\"circle\">{}</div>", value)
        }
    };
    format!(
        "<div id=\"{}\" class=\"stats\">{}{}{}</div>",
        id,
        circle("all", stats.total),
        circle("PRODUTIVO", stats.productive),
        circle("IMPRODUTIVO", stats.unproductive),
    )
}

fn item_card_html(card: &ItemCard) -> String {
    let (label, hidden) = if card.response_open {
        ("▼ Ocultar resposta", "")
    } else {
        ("▶ Resposta sugerida", " hidden")
    };
    format!(
        concat!(
            "<div class=\"resultado-item\" data-index=\"{index}\">",
            "<h3>📄 {file} — <span class=\"tag {class}\">{category}</span></h3>",
            "<p>Confiança: {confidence}%</p>",
            "<p class=\"razao\">{reason}</p>",
            "<button class=\"toggle-response\">{label}</button>",
            "<div class=\"resposta-box{hidden}\">{response}</div>",
            "</div>"
        ),
        index = card.index,
        file = card.file_name,
        class = card.category_class,
        category = card.category,
        confidence = card.confidence,
        reason = card.reason,
        label = label,
        hidden = hidden,
        response = card.suggested_response,
    )
}

fn mini_card_html(card: &ItemCard) -> String {
    format!(
        concat!(
            "<div class=\"resultado-item mini\">",
            "<strong>📄 {file} — {category}</strong>",
            "<p>Confiança: {confidence}% • {reason}</p>",
            "<details><summary>📩 Resposta sugerida</summary><div>{response}</div></details>",
            "</div>"
        ),
        file = card.file_name,
        category = card.category,
        confidence = card.confidence,
        reason = card.reason,
        response = card.suggested_response,
    )
}

fn history_entry_html(entry: &HistoryEntryCard) -> String {
    let (label, hidden) = if entry.expanded {
        ("▼ Ocultar detalhes", "")
    } else {
        ("▶ Ver detalhes", " hidden")
    };
    let details: String = entry
        .details
        .iter()
        .flatten()
        .map(mini_card_html)
        .collect();
    format!(
        concat!(
            "<div class=\"historico-item\" data-entry=\"{id}\">",
            "<h4>🕒 {timestamp}</h4>",
            "<p>Total: {total} • Produtivos: {productive} • Improdutivos: {unproductive}</p>",
            "<button class=\"toggle-details\">{label}</button>",
            "<div class=\"detalhes{hidden}\">{details}</div>",
            "</div>"
        ),
        id = entry.id.0,
        timestamp = entry.timestamp,
        total = entry.summary.total,
        productive = entry.summary.productive,
        unproductive = entry.summary.unproductive,
        label = label,
        hidden = hidden,
        details = details,
    )
}

fn pagination_html(pagination: &Pagination) -> String {
    let disabled = |enabled: bool| if enabled { "" } else { " disabled" };
    format!(
        concat!(
            "<div class=\"historico-nav\">",
            "<button{prev}>&laquo; Anterior</button>",
            "<span>Página {page} de {total}</span>",
            "<button{next}>Próxima &raquo;</button>",
            "</div>"
        ),
        prev = disabled(pagination.previous_enabled),
        page = pagination.page + 1,
        total = pagination.total_pages,
        next = disabled(pagination.next_enabled),
    )
}

/// 2つのビューをまとめた1ページ分のHTML
pub fn page_html(title: &str, current: &CurrentRender, history: &HistoryRender) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n<html lang=\"pt-BR\"><head><meta charset=\"utf-8\">",
            "<title>{title}</title></head><body>",
            "<section><h2>Resultado</h2>{current}</section>",
            "<section><h2>Histórico</h2>{history}</section>",
            "</body></html>\n"
        ),
        title = escape_html(title),
        current = current.to_html(),
        history = history.to_html(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use crate::view::{CurrentResultView, HistoryView};
    use serde_json::json;

    #[test]
    fn test_current_html_error_is_escaped_once() {
        let mut view = CurrentResultView::new();
        let html = view.show_error("a < b").to_html();
        assert!(html.contains("Erro no processamento: a &lt; b"));
        assert!(!html.contains("&amp;lt;"));
    }

    #[test]
    fn test_current_html_empty_states_differ() {
        let mut view = CurrentResultView::new();
        let empty = view.render().to_html();
        assert!(empty.contains(NO_SUBMISSION));

        view.set_results(&[json!({"categoria": "produtivo"})]);
        let filtered = view
            .set_filter(crate::types::CategoryFilter::parse("IMPRODUTIVO"))
            .to_html();
        assert!(filtered.contains(NO_MATCHES));
    }

    #[test]
    fn test_current_html_card() {
        let mut view = CurrentResultView::new();
        let html = view
            .set_results(&[json!({"arquivo": "<a>.txt", "categoria": "produtivo", "confianca": 90})])
            .to_html();
        assert!(html.contains("📄 &lt;a&gt;.txt"));
        assert!(html.contains("<span class=\"tag produtivo\">PRODUTIVO</span>"));
        assert!(html.contains("Confiança: 90%"));
        assert!(html.contains("resposta-box hidden"));
    }

    #[test]
    fn test_history_html_pagination() {
        let mut store = HistoryStore::new();
        for n in 0..6 {
            store.prepend_at(format!("t{}", n), vec![json!({})]);
        }
        let html = HistoryView::new().render(&store).to_html();
        assert!(html.contains("<button disabled>&laquo; Anterior</button>"));
        assert!(html.contains("Página 1 de 2"));
        assert!(html.contains("<button>Próxima &raquo;</button>"));
    }

    #[test]
    fn test_history_html_empty() {
        let html = HistoryView::new().render(&HistoryStore::new()).to_html();
        assert!(html.contains(NO_HISTORY));
        assert!(!html.contains("historico-nav"));
    }

    #[test]
    fn test_page_html_contains_both_views() {
        let current = CurrentResultView::new().render();
        let history = HistoryView::new().render(&HistoryStore::new());
        let html = page_html("AutoEmail", &current, &history);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("id=\"resultado\""));
        assert!(html.contains("id=\"historico\""));
    }
}
