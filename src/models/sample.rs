use serde::{Deserialize, Serialize};

use crate::config::CONFIG;

/// 一条训练样本
///
/// 图片张量按 CHW 排布展开成一维，标签是不定长的下标序列（CTC 风格，
/// 不在这里补齐），`len` 是有效字符数，序列损失计算要用。
#[derive(Debug, Clone)]
pub struct Sample {
    pub image: Vec<f32>,
    /// [channels, height, width]
    pub shape: [usize; 3],
    pub label: Vec<usize>,
    pub len: usize,
}

/// 数据集构造参数
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetOptions {
    /// 网络输入宽度
    pub img_width: u32,
    /// 网络输入高度
    pub img_height: u32,
    /// 车牌最大长度，这里只透传给下游，不做约束
    pub max_label_len: usize,
    /// 固定乱序顺序用，不传则每次构造随机
    pub seed: Option<u64>,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        let defaults = &CONFIG.dataset;
        DatasetOptions {
            img_width: defaults.img_width,
            img_height: defaults.img_height,
            max_label_len: defaults.max_label_len,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_follow_config() {
        let options = DatasetOptions::default();
        assert_eq!(options.img_width, 94);
        assert_eq!(options.img_height, 24);
        assert_eq!(options.max_label_len, 8);
        assert!(options.seed.is_none());
    }
}
