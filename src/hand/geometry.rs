use crate::hand::landmark::{Hand, Landmark, LandmarkIndex};

/// 5本の指
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const COUNT: usize = 5;

    pub fn all() -> [Finger; Finger::COUNT] {
        [
            Finger::Thumb,
            Finger::Index,
            Finger::Middle,
            Finger::Ring,
            Finger::Pinky,
        ]
    }

    /// 指先のランドマーク
    pub fn tip(self) -> LandmarkIndex {
        match self {
            Finger::Thumb => LandmarkIndex::ThumbTip,
            Finger::Index => LandmarkIndex::IndexTip,
            Finger::Middle => LandmarkIndex::MiddleTip,
            Finger::Ring => LandmarkIndex::RingTip,
            Finger::Pinky => LandmarkIndex::PinkyTip,
        }
    }

    /// 第2関節のランドマーク（親指はIP）
    pub fn joint(self) -> LandmarkIndex {
        match self {
            Finger::Thumb => LandmarkIndex::ThumbIp,
            Finger::Index => LandmarkIndex::IndexPip,
            Finger::Middle => LandmarkIndex::MiddlePip,
            Finger::Ring => LandmarkIndex::RingPip,
            Finger::Pinky => LandmarkIndex::PinkyPip,
        }
    }

    /// 付け根のランドマーク
    pub fn base(self) -> LandmarkIndex {
        match self {
            Finger::Thumb => LandmarkIndex::ThumbMcp,
            Finger::Index => LandmarkIndex::IndexMcp,
            Finger::Middle => LandmarkIndex::MiddleMcp,
            Finger::Ring => LandmarkIndex::RingMcp,
            Finger::Pinky => LandmarkIndex::PinkyMcp,
        }
    }
}

/// 1指分の導出状態。フレームごとに作り直す。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerState {
    pub tip: Landmark,
    pub joint: Landmark,
    pub is_extended: bool,
    /// 関節→先端ベクトルの角度（度）
    pub angle_deg: f32,
}

/// 5指の伸展パターン [親指, 人差し指, 中指, 薬指, 小指]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionFlags {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl ExtensionFlags {
    pub fn as_tuple(&self) -> (bool, bool, bool, bool, bool) {
        (self.thumb, self.index, self.middle, self.ring, self.pinky)
    }

    pub fn count_extended(&self) -> usize {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&e| e)
            .count()
    }

    /// "01100"形式のビット表記（デバッグ出力用、親指が先頭）
    pub fn bits(&self) -> String {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .iter()
            .map(|&e| if e { '1' } else { '0' })
            .collect()
    }
}

/// 1フレーム分の手の幾何量
///
/// 分類器が必要とする量をすべて抽出時に計算しておく。
/// 同じHandから抽出すれば結果はビット単位で一致する（隠れ状態なし）。
#[derive(Debug, Clone, PartialEq)]
pub struct HandGeometry {
    /// [親指, 人差し指, 中指, 薬指, 小指]
    pub fingers: [FingerState; Finger::COUNT],
    pub extension: ExtensionFlags,
    /// 各指先から手のひら中心（ランドマーク9）までの距離
    pub palm_distances: [f32; Finger::COUNT],
    /// 人差し指先〜中指先の距離（U/V判定）
    pub index_middle_separation: f32,
    /// 親指先〜人差し指先の距離
    pub thumb_index_separation: f32,
    /// 親指先から他4指先までの距離合計（O判定のリング閉鎖量）
    pub ring_closure: f32,
    /// 手首→人差し指先→小指先の屈曲角（ラジアン、0〜π）
    pub curvature: f32,
    /// 親指先〜人差し指付け根の距離（A/E判定）
    pub thumb_to_index_base: f32,
}

impl HandGeometry {
    pub fn extract(hand: &Hand) -> Self {
        let fingers = Finger::all().map(|f| finger_state(hand, f));
        let extension = ExtensionFlags {
            thumb: fingers[0].is_extended,
            index: fingers[1].is_extended,
            middle: fingers[2].is_extended,
            ring: fingers[3].is_extended,
            pinky: fingers[4].is_extended,
        };

        let palm = hand.get(LandmarkIndex::PALM_CENTER);
        let palm_distances = fingers.map(|s| s.tip.distance(palm));

        let thumb_tip = hand.get(LandmarkIndex::ThumbTip);
        let ring_closure = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky]
            .iter()
            .map(|f| hand.get(f.tip()).distance(thumb_tip))
            .sum();

        Self {
            fingers,
            extension,
            palm_distances,
            index_middle_separation: hand.span(LandmarkIndex::IndexTip, LandmarkIndex::MiddleTip),
            thumb_index_separation: hand.span(LandmarkIndex::ThumbTip, LandmarkIndex::IndexTip),
            ring_closure,
            curvature: curvature(hand),
            thumb_to_index_base: hand.span(LandmarkIndex::ThumbTip, LandmarkIndex::IndexMcp),
        }
    }
}

fn finger_state(hand: &Hand, finger: Finger) -> FingerState {
    let tip = *hand.get(finger.tip());
    let joint = *hand.get(finger.joint());

    let is_extended = match finger {
        // 親指: 伸びた親指は曲げた親指より「長い」。
        // 先端→付け根の距離がIP→付け根の距離を超えたら伸展とみなす。
        // （ミラー座標に依存するx比較の変種は使わない）
        Finger::Thumb => {
            let base = hand.get(finger.base());
            tip.distance(base) > joint.distance(base)
        }
        // 他の4指: 画像座標で先端が第2関節より上（yが小さい）なら伸展
        _ => tip.y < joint.y,
    };

    let angle_deg = (tip.y - joint.y).atan2(tip.x - joint.x).to_degrees();

    FingerState {
        tip,
        joint,
        is_extended,
        angle_deg,
    }
}

/// 手首→人差し指先→小指先の2セグメント角の差の絶対値（0〜πに折り返す）
fn curvature(hand: &Hand) -> f32 {
    let wrist = hand.get(LandmarkIndex::Wrist);
    let index_tip = hand.get(LandmarkIndex::IndexTip);
    let pinky_tip = hand.get(LandmarkIndex::PinkyTip);

    let a1 = (index_tip.y - wrist.y).atan2(index_tip.x - wrist.x);
    let a2 = (pinky_tip.y - index_tip.y).atan2(pinky_tip.x - index_tip.x);

    let diff = (a2 - a1).abs();
    if diff > std::f32::consts::PI {
        std::f32::consts::TAU - diff
    } else {
        diff
    }
}

/// 対応するランドマーク同士の画像平面距離の平均（手の静止度の指標）
pub fn mean_displacement(prev: &Hand, current: &Hand) -> f32 {
    let sum: f32 = prev
        .landmarks
        .iter()
        .zip(current.landmarks.iter())
        .map(|(p, c)| p.distance(c))
        .sum();
    sum / LandmarkIndex::COUNT as f32
}
