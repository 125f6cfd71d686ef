//! 감사 결과 표시용 스타일 매핑 정책.
//!
//! 화면 색/라벨만 결정하며 저장된 결과에는 영향을 주지 않는다.

/// 3단계 표시 톤.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Warning,
    Bad,
}

impl Tone {
    /// 대시보드 팔레트(RGB).
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Good => (0x00, 0xe6, 0x76),
            Self::Warning => (0xff, 0xd6, 0x00),
            Self::Bad => (0xff, 0x17, 0x44),
        }
    }
}

pub const GOOD_SCORE_MIN: f64 = 75.0;
pub const WARNING_SCORE_MIN: f64 = 45.0;

/// Keep/Revise/Delete 판정 표시.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionStyle {
    pub tone: Tone,
    pub label: &'static str,
}

const KEEP: DecisionStyle = DecisionStyle {
    tone: Tone::Good,
    label: "✓ KEEP",
};
const REVISE: DecisionStyle = DecisionStyle {
    tone: Tone::Warning,
    label: "△ REVISE",
};
const DELETE: DecisionStyle = DecisionStyle {
    tone: Tone::Bad,
    label: "✕ DELETE",
};

/// 알 수 없는 값(또는 누락)은 Revise 표시로 대체한다.
pub fn decision_style(action: Option<&str>) -> DecisionStyle {
    match action {
        Some("Keep") => KEEP,
        Some("Delete") => DELETE,
        _ => REVISE,
    }
}

/// 점수 구간: 75 이상 good, 45 이상 warning, 그 외(누락 포함) bad.
/// 반올림 전 값으로 판정하므로 74.6은 warning이다.
pub fn score_tone(score: Option<f64>) -> Tone {
    match score {
        Some(s) if s >= GOOD_SCORE_MIN => Tone::Good,
        Some(s) if s >= WARNING_SCORE_MIN => Tone::Warning,
        _ => Tone::Bad,
    }
}

pub fn hook_tone(hook_strength: Option<&str>) -> Tone {
    match hook_strength {
        Some("Strong") => Tone::Good,
        Some("Moderate") => Tone::Warning,
        _ => Tone::Bad,
    }
}

/// Yes/Partially/No 계열 값(crm_mention, brand_alignment).
pub fn mention_tone(value: Option<&str>) -> Tone {
    match value {
        Some("Yes") => Tone::Good,
        Some("Partially") => Tone::Warning,
        _ => Tone::Bad,
    }
}

pub fn cta_style(cta_present: bool) -> (Tone, &'static str) {
    if cta_present {
        (Tone::Good, "✓ Present")
    } else {
        (Tone::Bad, "✕ Missing")
    }
}
