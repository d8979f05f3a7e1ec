//! 描画記述の端末向け表示

use super::card::ItemCard;
use super::current::{CurrentBody, CurrentRender};
use super::history::{HistoryBody, HistoryRender};
use crate::aggregate::Aggregate;
use crate::escape::unescape_html;
use std::fmt;

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} • Produtivos: {} • Improdutivos: {}",
            self.total, self.productive, self.unproductive
        )
    }
}

impl fmt::Display for CurrentRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Resultado] {} (filtro: {})", self.stats, self.filter)?;
        match &self.body {
            CurrentBody::NoSubmission => writeln!(f, "  Nenhuma análise realizada ainda."),
            CurrentBody::NoMatches => writeln!(f, "  Nenhum resultado para este filtro."),
            CurrentBody::Error(message) => {
                writeln!(f, "  Erro no processamento: {}", unescape_html(message))
            }
            CurrentBody::Items(cards) => {
                for card in cards {
                    write_card(f, card, "  ")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for HistoryRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Histórico] {}", self.stats)?;
        match &self.body {
            HistoryBody::Empty => writeln!(f, "  Nenhuma execução ainda.")?,
            HistoryBody::Entries(entries) => {
                for entry in entries {
                    let marker = if entry.expanded { "▼" } else { "▶" };
                    writeln!(
                        f,
                        "  {} {} 🕒 {} — {}",
                        marker,
                        entry.id,
                        unescape_html(&entry.timestamp),
                        entry.summary
                    )?;
                    for card in entry.details.iter().flatten() {
                        write_card(f, card, "      ")?;
                    }
                }
            }
        }
        if let Some(p) = &self.pagination {
            writeln!(
                f,
                "  {} Página {} de {} {}",
                if p.previous_enabled { "«" } else { " " },
                p.page + 1,
                p.total_pages,
                if p.next_enabled { "»" } else { " " },
            )?;
        }
        Ok(())
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, card: &ItemCard, indent: &str) -> fmt::Result {
    writeln!(
        f,
        "{}[{}] 📄 {} — {} ({}%)",
        indent,
        card.index + 1,
        unescape_html(&card.file_name),
        unescape_html(&card.category),
        card.confidence
    )?;
    if !card.reason.is_empty() {
        writeln!(f, "{}    {}", indent, unescape_html(&card.reason))?;
    }
    if card.response_open {
        writeln!(f, "{}    📩 {}", indent, unescape_html(&card.suggested_response))?;
    }
    Ok(())
}
