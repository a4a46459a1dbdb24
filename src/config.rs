use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub stabilizer: StabilizerConfig,
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierConfig {
    /// U/V判定の指先間距離閾値（正規化座標）: これを超えるとV
    #[serde(default = "default_uv_separation")]
    pub uv_separation: f32,
    /// O判定: 親指先端と他4指先端の距離合計がこの値未満でリング閉鎖とみなす
    #[serde(default = "default_o_ring_closure")]
    pub o_ring_closure: f32,
    /// C判定: 手首→人差し指先→小指先の屈曲角（ラジアン）閾値
    #[serde(default = "default_c_curvature")]
    pub c_curvature: f32,
    /// A/E判定: 親指先端と人差し指付け根の距離がこの値未満でAとみなす
    #[serde(default = "default_thumb_tuck_distance")]
    pub thumb_tuck_distance: f32,
    /// 前フレームからの平均変位がこの値未満なら静止ボーナスを加算
    #[serde(default = "default_steady_displacement")]
    pub steady_displacement: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StabilizerConfig {
    /// コミットに必要な連続フレーム数
    #[serde(default = "default_required_hold")]
    pub required_hold: u32,
    /// この信頼度未満の分類はホールドをリセットする
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// 毎フレームのステータス行をstderrに出力する
    #[serde(default)]
    pub echo_status: bool,
}

fn default_uv_separation() -> f32 { 0.05 }
fn default_o_ring_closure() -> f32 { 0.3 }
fn default_c_curvature() -> f32 { 0.5 }
fn default_thumb_tuck_distance() -> f32 { 0.10 }
fn default_steady_displacement() -> f32 { 0.01 }
fn default_required_hold() -> u32 { 10 }
fn default_commit_threshold() -> f32 { 0.6 }

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            uv_separation: default_uv_separation(),
            o_ring_closure: default_o_ring_closure(),
            c_curvature: default_c_curvature(),
            thumb_tuck_distance: default_thumb_tuck_distance(),
            steady_displacement: default_steady_displacement(),
        }
    }
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            required_hold: default_required_hold(),
            commit_threshold: default_commit_threshold(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { echo_status: false }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            stabilizer: StabilizerConfig::default(),
            app: AppConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがない・読めない場合はデフォルト値で起動する
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(_) => Self::default(),
        }
    }
}
