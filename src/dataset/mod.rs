//! 车牌训练数据集：文件名解析 + 按下标取样

pub mod label;
pub mod provider;

pub use label::label_from_filename;
pub use provider::{DatasetError, PlateDataset};
