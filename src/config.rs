use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

/// 数据集默认参数
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetDefaults {
    pub img_width: u32,
    pub img_height: u32,
    pub max_label_len: usize,
}

impl Default for DatasetDefaults {
    fn default() -> Self {
        DatasetDefaults {
            img_width: 94,
            img_height: 24,
            max_label_len: 8,
        }
    }
}

/// 画图参数
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlotSettings {
    pub log_file: String,
    pub output_file: String,
    /// 平滑系数 (0~1)，让曲线更圆滑好读
    pub smooth_factor: f64,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            log_file: "train_log.txt".to_string(),
            output_file: "LPRNet_Results.png".to_string(),
            smooth_factor: 0.9,
            chart_width: 1200,
            chart_height: 500,
        }
    }
}

/// 配置参数
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetDefaults,
    #[serde(default)]
    pub plot: PlotSettings,
}

// 全局配置单例，没有 config.yaml 时退回内置默认值
pub static CONFIG: Lazy<Config> = Lazy::new(|| match File::open("config.yaml") {
    Ok(file) => {
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).expect("Failed to parse config")
    }
    Err(_) => Config::default(),
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dataset.img_width, 94);
        assert_eq!(config.dataset.img_height, 24);
        assert_eq!(config.dataset.max_label_len, 8);
        assert_eq!(config.plot.smooth_factor, 0.9);
        assert_eq!(config.plot.output_file, "LPRNet_Results.png");
    }

    #[test]
    fn test_global_config_loads() {
        // config.yaml 的值和内置默认值保持一致
        assert_eq!(CONFIG.dataset.img_width, 94);
        assert_eq!(CONFIG.plot.chart_width, 1200);
    }
}
