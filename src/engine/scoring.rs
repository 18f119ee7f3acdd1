use serde::{Deserialize, Serialize};

pub const TOP_TIER_PERCENT: u32 = 80;
pub const MID_TIER_PERCENT: u32 = 60;

/// Three-tier verdict shown on the result screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Fair,
    TryAgain,
}

impl Rating {
    pub fn from_percent(percent: u32) -> Self {
        if percent >= TOP_TIER_PERCENT {
            Rating::Excellent
        } else if percent >= MID_TIER_PERCENT {
            Rating::Fair
        } else {
            Rating::TryAgain
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Rating::Excellent => "훌륭해요! 잘하고 있어요! 👍",
            Rating::Fair => "괜찮아요! 조금만 더 연습해보세요 💪",
            Rating::TryAgain => "다시 도전해보세요! 화이팅! 🌟",
        }
    }
}

/// Rounded percentage, 0 for an empty quiz.
pub fn compute_percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}
