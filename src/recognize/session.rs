use crate::config::Config;
use crate::hand::{mean_displacement, Hand, HandFrame, HandGeometry};
use crate::recognize::classifier::{Classification, GestureClassifier};
use crate::recognize::stabilizer::Stabilizer;
use crate::sink::TextSink;

/// 1フレーム処理の結果
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub classification: Classification,
    /// このフレームでコミットが成立した文字
    pub committed: Option<char>,
    /// 観測用のステータス行（正しさには関与しない）
    pub status: String,
}

/// 認識パイプラインのセッションコンテキスト
///
/// 分類器・スタビライザー・前フレームの手をまとめて持ち、
/// フレームごとに「取得→幾何抽出→分類→安定化→出力」を1回の
/// 同期呼び出しで行う。どのスケジューラからでも呼べる。
/// グローバル状態は持たない。
pub struct RecognitionSession {
    classifier: GestureClassifier,
    stabilizer: Stabilizer,
    prev_hand: Option<Hand>,
}

impl RecognitionSession {
    pub fn new(classifier: GestureClassifier, stabilizer: Stabilizer) -> Self {
        Self {
            classifier,
            stabilizer,
            prev_hand: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            GestureClassifier::from_config(&config.classifier),
            Stabilizer::from_config(&config.stabilizer),
        )
    }

    /// 1フレーム分を処理する。コミットが成立したらsinkへ1回だけ追記する。
    pub fn process(&mut self, frame: &HandFrame, sink: &mut dyn TextSink) -> FrameReport {
        let geometry = frame.hand().map(HandGeometry::extract);
        let displacement = match (self.prev_hand.as_ref(), frame.hand()) {
            (Some(prev), Some(current)) => Some(mean_displacement(prev, current)),
            _ => None,
        };

        let classification = self.classifier.classify(geometry.as_ref(), displacement);
        let committed = self.stabilizer.observe(&classification);
        if let Some(letter) = committed {
            sink.append_letter(letter);
        }

        let status = self.status_line(frame, &classification, committed);
        self.prev_hand = frame.hand().cloned();

        FrameReport {
            classification,
            committed,
            status,
        }
    }

    /// ストリームの停止/再開時に呼ぶ。古いホールドが次の開始に漏れない。
    pub fn reset(&mut self) {
        self.stabilizer.reset();
        self.prev_hand = None;
    }

    fn status_line(
        &self,
        frame: &HandFrame,
        classification: &Classification,
        committed: Option<char>,
    ) -> String {
        if let Some(letter) = committed {
            return format!("Recognized: {}", letter);
        }
        if !frame.has_hand() {
            return "No hand detected".to_string();
        }
        if let Some((letter, held, required)) = self.stabilizer.progress() {
            return format!("Detecting: {} ({}/{})", letter, held, required);
        }
        if let Some(letter) = self.stabilizer.latched() {
            // コミット直後、同じポーズが続いている
            return format!("Recognized: {}", letter);
        }
        "Unknown gesture".to_string()
    }
}
