use std::path::{Path, PathBuf};

use image::ImageError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use super::label::label_from_filename;
use crate::chars;
use crate::models::sample::{DatasetOptions, Sample};
use crate::my_utils::image::{default_transform, resize_if_needed, PreprocFn};
use crate::my_utils::io::list_images;

/// 取样失败的具体原因，跳过、换下标重试还是终止由外部迭代框架决定
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("index {index} out of range, dataset has {len} samples")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot derive a plate label from {path}")]
    UnparseableFilename { path: PathBuf },

    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("label of {path} is empty after encoding ({dropped} chars dropped)")]
    EmptyLabel { path: PathBuf, dropped: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// 车牌训练数据集
///
/// 构造时扫描目录并乱序一次，之后路径列表固定不变。
/// 每个 epoch 重新乱序不归这里管，由外部迭代框架处理。
/// 取样只读 `&self`，没有内部可变状态，多 worker 并发安全。
pub struct PlateDataset {
    img_paths: Vec<PathBuf>,
    options: DatasetOptions,
    preproc: Option<PreprocFn>,
}

impl PlateDataset {
    /// 扫描一个或多个目录并一次性乱序
    pub fn new<P: AsRef<Path>>(dirs: &[P], options: DatasetOptions) -> Result<Self, DatasetError> {
        let mut img_paths = Vec::new();
        for dir in dirs {
            img_paths.extend(list_images(dir.as_ref())?);
        }
        match options.seed {
            Some(seed) => img_paths.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => img_paths.shuffle(&mut rand::thread_rng()),
        }
        Ok(PlateDataset {
            img_paths,
            options,
            preproc: None,
        })
    }

    /// 直接给定路径列表，不乱序，顺序由调用方控制
    pub fn from_paths(paths: Vec<PathBuf>, options: DatasetOptions) -> Self {
        PlateDataset {
            img_paths: paths,
            options,
            preproc: None,
        }
    }

    /// 替换默认预处理，缩放仍然在自定义函数之前做
    pub fn with_preproc(mut self, preproc: PreprocFn) -> Self {
        self.preproc = Some(preproc);
        self
    }

    pub fn len(&self) -> usize {
        self.img_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.img_paths.is_empty()
    }

    /// 乱序后的路径列表
    pub fn paths(&self) -> &[PathBuf] {
        &self.img_paths
    }

    /// 车牌最大长度，透传给下游的序列损失，这里不做任何约束
    pub fn max_label_len(&self) -> usize {
        self.options.max_label_len
    }

    /// 按下标取样
    ///
    /// 成功时保证标签非空、张量尺寸和配置一致。
    pub fn get(&self, index: usize) -> Result<Sample, DatasetError> {
        let path = self
            .img_paths
            .get(index)
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.img_paths.len(),
            })?;

        let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let label_str =
            label_from_filename(&file_name).ok_or_else(|| DatasetError::UnparseableFilename {
                path: path.clone(),
            })?;

        let img = image::open(path)
            .map_err(|source| DatasetError::ImageDecode {
                path: path.clone(),
                source,
            })?
            .to_rgb8();
        let img = resize_if_needed(img, self.options.img_width, self.options.img_height);
        let image = match &self.preproc {
            Some(f) => f(&img),
            None => default_transform(&img),
        };

        let (label, dropped) = chars::encode(&label_str);
        if label.is_empty() {
            return Err(DatasetError::EmptyLabel {
                path: path.clone(),
                dropped,
            });
        }

        let len = label.len();
        Ok(Sample {
            image,
            shape: [
                3,
                self.options.img_height as usize,
                self.options.img_width as usize,
            ],
            label,
            len,
        })
    }

    /// 兜底取样：文件名解析不了、图片解不开、标签编码为空时一律退回
    /// 0 号样本，调用方察觉不到坏文件。只退一层，0 号样本本身有问题
    /// 就把错误抛出去。
    pub fn get_or_fallback(&self, index: usize) -> Result<Sample, DatasetError> {
        match self.get(index) {
            Ok(sample) => Ok(sample),
            Err(e @ DatasetError::IndexOutOfRange { .. }) => Err(e),
            Err(_) if index != 0 => self.get(0),
            Err(e) => Err(e),
        }
    }
}
