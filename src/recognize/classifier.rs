use crate::config::ClassifierConfig;
use crate::hand::HandGeometry;

/// 1フレーム分の分類結果
///
/// letter=Noneは「このフレームでは文字を検出していない」を表す。
/// confidenceは経験的なスコアであり、確率として扱ってはならない。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub letter: Option<char>,
    pub confidence: f32,
}

impl Classification {
    pub fn letter(letter: char, confidence: f32) -> Self {
        Self {
            letter: Some(letter),
            confidence,
        }
    }

    /// 検出なし
    pub fn none() -> Self {
        Self {
            letter: None,
            confidence: 0.0,
        }
    }

    pub fn is_detection(&self) -> bool {
        self.letter.is_some()
    }
}

const BASE_CONFIDENCE: f32 = 0.5;
/// 前フレームでも手が検出されていた場合のボーナス
const STABILITY_BONUS: f32 = 0.2;
/// 平均ランドマーク変位が閾値未満の場合のボーナス
const STEADY_BONUS: f32 = 0.3;

// 幾何的根拠が弱い分岐の信頼度ペナルティ
const O_PENALTY: f32 = 0.8;
const E_PENALTY: f32 = 0.7;
const G_PENALTY: f32 = 0.6;
const C_PENALTY: f32 = 0.7;

/// 伸展パターンを主キーとするルールテーブル分類器
///
/// ルールは固定の優先順で評価し、最初に一致したものが勝つ:
///
/// 1. O（リング閉鎖、パターンに依存しない）
/// 2. 伸展パターンのテーブル（B D U/V W I Y L A/E G）
/// 3. C（どのパターンにも一致せず、屈曲角が大きい場合）
/// 4. 検出なし
///
/// 同じパターンに複数の文字を割り当てる流儀もあるが、このテーブルは
/// パターンごとに勝者を1つだけ返す。どの入力に対しても失敗しない。
pub struct GestureClassifier {
    uv_separation: f32,
    o_ring_closure: f32,
    c_curvature: f32,
    thumb_tuck_distance: f32,
    steady_displacement: f32,
}

impl GestureClassifier {
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self {
            uv_separation: config.uv_separation,
            o_ring_closure: config.o_ring_closure,
            c_curvature: config.c_curvature,
            thumb_tuck_distance: config.thumb_tuck_distance,
            steady_displacement: config.steady_displacement,
        }
    }

    /// 1フレーム分の幾何量を文字候補に写像する
    ///
    /// displacementは前フレームからの平均ランドマーク変位。
    /// 前フレームに手がなかった場合はNone。
    pub fn classify(
        &self,
        geometry: Option<&HandGeometry>,
        displacement: Option<f32>,
    ) -> Classification {
        let geometry = match geometry {
            Some(g) => g,
            None => return Classification::none(),
        };

        let confidence = self.frame_confidence(displacement);

        // O: 4指先が親指先に集まるリング形。パターンより先に判定する。
        if geometry.ring_closure < self.o_ring_closure {
            return Classification::letter('O', confidence * O_PENALTY);
        }

        if let Some((letter, penalty)) = self.match_pattern(geometry) {
            return Classification::letter(letter, confidence * penalty);
        }

        // C: パターン不一致かつ手全体が弧を描いている場合
        let flags = &geometry.extension;
        if geometry.curvature > self.c_curvature && !flags.index && !flags.pinky {
            return Classification::letter('C', confidence * C_PENALTY);
        }

        Classification::none()
    }

    /// 伸展パターンテーブル。(文字, ペナルティ係数)を返す。
    fn match_pattern(&self, geometry: &HandGeometry) -> Option<(char, f32)> {
        // (親指, 人差し指, 中指, 薬指, 小指)
        match geometry.extension.as_tuple() {
            (false, true, true, true, true) => Some(('B', 1.0)),
            (false, true, false, false, false) => Some(('D', 1.0)),
            // 人差し指+中指: 指先の開きでUとVを分ける（閾値ちょうどはU）
            (false, true, true, false, false) => {
                if geometry.index_middle_separation > self.uv_separation {
                    Some(('V', 1.0))
                } else {
                    Some(('U', 1.0))
                }
            }
            (false, true, true, true, false) => Some(('W', 1.0)),
            (false, false, false, false, true) => Some(('I', 1.0)),
            (true, false, false, false, true) => Some(('Y', 1.0)),
            (true, true, false, false, false) => Some(('L', 1.0)),
            // 全閉: 親指先が人差し指付け根に沿っていればA、
            // 曲げた指の前に横たわっていればE（根拠が弱いので減点）
            (false, false, false, false, false) => {
                if geometry.thumb_to_index_base < self.thumb_tuck_distance {
                    Some(('A', 1.0))
                } else {
                    Some(('E', E_PENALTY))
                }
            }
            // 全開はあいまいな受け皿
            (true, true, true, true, true) => Some(('G', G_PENALTY)),
            _ => None,
        }
    }

    fn frame_confidence(&self, displacement: Option<f32>) -> f32 {
        let mut confidence = BASE_CONFIDENCE;
        if let Some(displacement) = displacement {
            confidence += STABILITY_BONUS;
            if displacement < self.steady_displacement {
                confidence += STEADY_BONUS;
            }
        }
        confidence.min(1.0)
    }
}
