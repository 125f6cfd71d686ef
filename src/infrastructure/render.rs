//! 감사 결과 터미널 대시보드 렌더링 모듈.

use crossterm::style::{Color, Stylize};
use unicode_width::UnicodeWidthStr;

use crate::domain::audit::{AuditResult, Platform};
use crate::domain::style::{
    Tone, cta_style, decision_style, hook_tone, mention_tone, score_tone,
};

const CARD_INNER_WIDTH: usize = 16;
const MISSING: &str = "—";

struct Cell {
    text: String,
    tone: Option<Tone>,
    bold: bool,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
            bold: false,
        }
    }

    fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
            bold: true,
        }
    }
}

struct Card {
    title: &'static str,
    value: Cell,
    footer: Cell,
}

/// 감사 결과를 카드/섹션 형태의 텍스트로 렌더링한다.
/// `color`가 false면 ANSI 스타일 없이 출력한다.
pub fn render_dashboard(result: &AuditResult, selected: Platform, color: bool) -> String {
    let mut out = String::new();

    let platform = result
        .platform()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or(selected.label());
    let header = format!("AUDIT RESULTS — {}", platform.to_uppercase());
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"─".repeat(header.width()));
    out.push_str("\n\n");

    let decision = decision_style(result.action());
    let (cta_tone, cta_label) = cta_style(result.cta_present());
    let cards = [
        Card {
            title: "BRAND SCORE",
            value: Cell::toned(
                result
                    .score()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| MISSING.to_string()),
                score_tone(result.score_value()),
            ),
            footer: Cell::plain("/ 100"),
        },
        Card {
            title: "DECISION",
            value: Cell::toned(decision.label, decision.tone),
            footer: Cell::plain(""),
        },
        Card {
            title: "HOOK",
            value: Cell::toned(
                result
                    .hook_strength()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(MISSING),
                hook_tone(result.hook_strength()),
            ),
            footer: Cell::plain(""),
        },
        Card {
            title: "CRM MENTION",
            value: Cell::toned(
                result
                    .crm_mention()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(MISSING),
                mention_tone(result.crm_mention()),
            ),
            footer: Cell {
                text: format!("CTA: {cta_label}"),
                tone: Some(cta_tone),
                bold: false,
            },
        },
    ];
    render_cards(&mut out, &cards, color);
    out.push('\n');

    if let Some(alignment) = result.brand_alignment() {
        out.push_str("BRAND ALIGNMENT  ");
        out.push_str(&paint(
            &Cell::toned(alignment, mention_tone(Some(alignment))),
            color,
        ));
        out.push_str("\n\n");
    }

    out.push_str("VERDICT\n");
    out.push_str("  ");
    out.push_str(result.verdict().unwrap_or(MISSING));
    out.push_str("\n\n");

    render_list(&mut out, "⚠ ISSUES FOUND", &result.issues(), Tone::Bad, color);
    render_list(
        &mut out,
        "✦ SUGGESTIONS",
        &result.suggestions(),
        Tone::Good,
        color,
    );

    if let Some(angle) = result.revised_angle() {
        out.push_str("✎ SUGGESTED REVISION ANGLE\n");
        out.push_str("  ");
        out.push_str(&styled(angle, None, false, true, color));
        out.push('\n');
    }

    out
}

fn render_cards(out: &mut String, cards: &[Card], color: bool) {
    let border = "─".repeat(CARD_INNER_WIDTH + 2);
    let top: Vec<String> = cards.iter().map(|_| format!("┌{border}┐")).collect();
    let bottom: Vec<String> = cards.iter().map(|_| format!("└{border}┘")).collect();

    out.push_str(&top.join(" "));
    out.push('\n');
    for row in 0..3 {
        let cells: Vec<String> = cards
            .iter()
            .map(|card| {
                let title;
                let cell = match row {
                    0 => {
                        title = Cell::plain(card.title);
                        &title
                    }
                    1 => &card.value,
                    _ => &card.footer,
                };
                format!("│ {} │", centered(cell, color))
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out.push_str(&bottom.join(" "));
    out.push('\n');
}

fn render_list(out: &mut String, title: &str, items: &[&str], tone: Tone, color: bool) {
    if items.is_empty() {
        return;
    }
    out.push_str(&styled(title, Some(tone), true, false, color));
    out.push('\n');
    for item in items {
        out.push_str("  ");
        out.push_str(&styled("│", Some(tone), false, false, color));
        out.push(' ');
        out.push_str(item);
        out.push('\n');
    }
    out.push('\n');
}

/// 표시 폭 기준으로 가운데 정렬한다(넘치면 자른다).
fn centered(cell: &Cell, color: bool) -> String {
    let text = truncate_to_width(&cell.text, CARD_INNER_WIDTH);
    let width = text.width();
    let left = (CARD_INNER_WIDTH - width) / 2;
    let right = CARD_INNER_WIDTH - width - left;
    let shown = Cell {
        text,
        tone: cell.tone,
        bold: cell.bold,
    };
    format!("{}{}{}", " ".repeat(left), paint(&shown, color), " ".repeat(right))
}

fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn paint(cell: &Cell, color: bool) -> String {
    styled(&cell.text, cell.tone, cell.bold, false, color)
}

fn styled(text: &str, tone: Option<Tone>, bold: bool, italic: bool, color: bool) -> String {
    if !color || text.is_empty() {
        return text.to_string();
    }
    let mut content = text.stylize();
    if let Some(tone) = tone {
        let (r, g, b) = tone.rgb();
        content = content.with(Color::Rgb { r, g, b });
    }
    if bold {
        content = content.bold();
    }
    if italic {
        content = content.italic();
    }
    content.to_string()
}
