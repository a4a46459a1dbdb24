use crate::config::StabilizerConfig;
use crate::recognize::classifier::Classification;

/// 連続フレームでの一致を要求するデバウンス
///
/// 同じ文字が必要フレーム数だけ連続して観測されたときに一度だけ
/// コミットする。検出なし・低信頼度のフレームでホールドはリセット
/// される。コミット直後は同じ文字が続く限り再コミットしない
/// （ポーズを保持し続けても1文字しか出ない）。
pub struct Stabilizer {
    required_hold: u32,
    commit_threshold: f32,
    last_letter: Option<char>,
    hold_count: u32,
    /// 直前にコミットした文字。違う文字か検出なしが来るまで抑制する。
    latched: Option<char>,
}

impl Stabilizer {
    pub fn new(required_hold: u32, commit_threshold: f32) -> Self {
        Self {
            required_hold,
            commit_threshold,
            last_letter: None,
            hold_count: 0,
            latched: None,
        }
    }

    pub fn from_config(config: &StabilizerConfig) -> Self {
        Self::new(config.required_hold, config.commit_threshold)
    }

    /// 1フレーム分の分類結果を観測し、コミットが成立したら文字を返す
    pub fn observe(&mut self, classification: &Classification) -> Option<char> {
        let letter = match classification.letter {
            Some(l) if classification.confidence >= self.commit_threshold => l,
            _ => {
                self.reset();
                return None;
            }
        };

        // コミット済みのポーズが続いている間は蓄積しない
        if self.latched == Some(letter) {
            return None;
        }
        self.latched = None;

        if self.last_letter == Some(letter) {
            self.hold_count += 1;
        } else {
            self.last_letter = Some(letter);
            self.hold_count = 1;
        }

        if self.hold_count >= self.required_hold {
            self.last_letter = None;
            self.hold_count = 0;
            self.latched = Some(letter);
            return Some(letter);
        }

        None
    }

    /// 蓄積中の (文字, 現在のホールド数, 必要ホールド数)
    pub fn progress(&self) -> Option<(char, u32, u32)> {
        self.last_letter
            .map(|letter| (letter, self.hold_count, self.required_hold))
    }

    /// コミット直後に抑制中の文字
    pub fn latched(&self) -> Option<char> {
        self.latched
    }

    pub fn reset(&mut self) {
        self.last_letter = None;
        self.hold_count = 0;
        self.latched = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(letter: char) -> Classification {
        Classification::letter(letter, 0.9)
    }

    #[test]
    fn test_commit_on_required_hold() {
        let mut stabilizer = Stabilizer::new(5, 0.6);
        for frame in 1..=4 {
            assert_eq!(
                stabilizer.observe(&detection('D')),
                None,
                "no commit before hold is reached (frame {})",
                frame
            );
        }
        assert_eq!(stabilizer.observe(&detection('D')), Some('D'));
    }

    #[test]
    fn test_exactly_one_commit_per_run() {
        // 必要数の2倍より長く保持しても1回しかコミットしない
        let mut stabilizer = Stabilizer::new(5, 0.6);
        let mut commits = 0;
        for _ in 0..20 {
            if stabilizer.observe(&detection('D')).is_some() {
                commits += 1;
            }
        }
        assert_eq!(commits, 1);
    }

    #[test]
    fn test_sentinel_resets_hold() {
        let mut stabilizer = Stabilizer::new(3, 0.6);
        stabilizer.observe(&detection('D'));
        stabilizer.observe(&detection('D'));
        stabilizer.observe(&Classification::none());
        // リセット後は最初からやり直し
        assert_eq!(stabilizer.observe(&detection('D')), None);
        assert_eq!(stabilizer.observe(&detection('D')), None);
        assert_eq!(stabilizer.observe(&detection('D')), Some('D'));
    }

    #[test]
    fn test_low_confidence_resets_hold() {
        let mut stabilizer = Stabilizer::new(3, 0.6);
        stabilizer.observe(&detection('D'));
        stabilizer.observe(&detection('D'));
        stabilizer.observe(&Classification::letter('D', 0.3));
        assert_eq!(stabilizer.observe(&detection('D')), None);
    }

    #[test]
    fn test_letter_change_restarts_run() {
        let mut stabilizer = Stabilizer::new(3, 0.6);
        stabilizer.observe(&detection('D'));
        stabilizer.observe(&detection('D'));
        stabilizer.observe(&detection('I'));
        assert_eq!(stabilizer.progress(), Some(('I', 1, 3)));
    }

    #[test]
    fn test_alternating_letters_never_commit() {
        let mut stabilizer = Stabilizer::new(3, 0.6);
        for _ in 0..10 {
            assert_eq!(stabilizer.observe(&detection('D')), None);
            assert_eq!(stabilizer.observe(&detection('I')), None);
        }
    }

    #[test]
    fn test_recommit_after_break() {
        // 必要数=5: D×6 → '-'×1 → D×5 でちょうど2回コミットする
        let mut stabilizer = Stabilizer::new(5, 0.6);
        let mut commits = Vec::new();
        let stream: Vec<Classification> = std::iter::repeat(detection('D'))
            .take(6)
            .chain(std::iter::once(Classification::none()))
            .chain(std::iter::repeat(detection('D')).take(5))
            .collect();
        for classification in &stream {
            if let Some(letter) = stabilizer.observe(classification) {
                commits.push(letter);
            }
        }
        assert_eq!(commits, vec!['D', 'D']);
    }

    #[test]
    fn test_different_letter_clears_latch() {
        let mut stabilizer = Stabilizer::new(2, 0.6);
        stabilizer.observe(&detection('D'));
        assert_eq!(stabilizer.observe(&detection('D')), Some('D'));
        // 別の文字が来たら抑制は解除され、新しい蓄積が始まる
        assert_eq!(stabilizer.observe(&detection('I')), None);
        assert_eq!(stabilizer.observe(&detection('I')), Some('I'));
        // 同じ文字のコミットも間に別文字を挟めば再度成立する
        assert_eq!(stabilizer.observe(&detection('D')), None);
        assert_eq!(stabilizer.observe(&detection('D')), Some('D'));
    }

    #[test]
    fn test_progress_reporting() {
        let mut stabilizer = Stabilizer::new(5, 0.6);
        assert_eq!(stabilizer.progress(), None);
        stabilizer.observe(&detection('W'));
        stabilizer.observe(&detection('W'));
        assert_eq!(stabilizer.progress(), Some(('W', 2, 5)));
        stabilizer.reset();
        assert_eq!(stabilizer.progress(), None);
    }

    #[test]
    fn test_reset_clears_latch() {
        let mut stabilizer = Stabilizer::new(2, 0.6);
        stabilizer.observe(&detection('D'));
        stabilizer.observe(&detection('D'));
        assert_eq!(stabilizer.latched(), Some('D'));
        stabilizer.reset();
        assert_eq!(stabilizer.latched(), None);
    }
}
