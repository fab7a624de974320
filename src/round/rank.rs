/// End of round verdict, derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRank {
    Master,
    Excellent,
    Good,
    Effort,
    Thanks,
}

impl ScoreRank {
    pub fn from_score(score: u32) -> Self {
        match score {
            40.. => ScoreRank::Master,
            30..=39 => ScoreRank::Excellent,
            20..=29 => ScoreRank::Good,
            10..=19 => ScoreRank::Effort,
            _ => ScoreRank::Thanks,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreRank::Master => "Outstanding! You are a true word master!",
            ScoreRank::Excellent => "Amazing! That is an excellent result!",
            ScoreRank::Good => "Well done! You are steadily improving!",
            ScoreRank::Effort => "Good effort! Aim even higher next time!",
            ScoreRank::Thanks => "Thanks for playing! Try again and beat your score!",
        }
    }
}
