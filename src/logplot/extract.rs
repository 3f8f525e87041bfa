use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::curves::TrainingCurves;

// 匹配: Epoch:1 || epochiter: 50/100 || ... Loss: 0.1234 ...
static LOSS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"Loss:\s*([\d\.]+)").unwrap());

// 匹配: [Info] Test Accuracy: 0.95 ...
static ACC_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"Test Accuracy:\s*([\d\.]+)").unwrap());

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to read log {path}: {source}")]
    LogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no loss records found in {path}")]
    NoLossData { path: PathBuf },

    #[error("failed to render chart: {0}")]
    Render(String),
}

/// 逐行扫描日志，提取 loss 和 accuracy 两条曲线
///
/// loss 计数器只在成功匹配的行上递增，accuracy 同理（通常每个 epoch 测一次）。
/// 一条 loss 都没有就返回 NoLossData，没必要画空图。
pub fn extract_curves(path: &Path) -> Result<TrainingCurves, PlotError> {
    let file = File::open(path).map_err(|source| PlotError::LogRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut curves = TrainingCurves::default();
    let mut iter_count = 0usize;
    let mut current_epoch = 0usize;

    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| PlotError::LogRead {
            path: path.to_path_buf(),
            source,
        })?;

        if line.contains("Loss:") {
            if let Some(caps) = LOSS_PATTERN.captures(&line) {
                if let Ok(value) = caps[1].parse::<f64>() {
                    iter_count += 1;
                    curves.iters.push(iter_count);
                    curves.losses.push(value);
                }
            }
        }

        if line.contains("Test Accuracy:") {
            if let Some(caps) = ACC_PATTERN.captures(&line) {
                if let Ok(value) = caps[1].parse::<f64>() {
                    current_epoch += 1;
                    curves.epochs.push(current_epoch);
                    curves.accuracies.push(value);
                }
            }
        }
    }

    if curves.losses.is_empty() {
        return Err(PlotError::NoLossData {
            path: path.to_path_buf(),
        });
    }

    Ok(curves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("train_log.txt");
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_single_loss_and_accuracy() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "Loss: 0.5000\n[Info] Test Accuracy: 0.8000\n");

        let curves = extract_curves(&path).unwrap();
        assert_eq!(curves.iters, vec![1]);
        assert_eq!(curves.losses, vec![0.5]);
        assert_eq!(curves.epochs, vec![1]);
        assert_eq!(curves.accuracies, vec![0.8]);
    }

    #[test]
    fn test_counters_only_advance_on_matches() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            "some unrelated line\n\
             Epoch:1 || epochiter: 50/100 || Loss: 0.9\n\
             Loss: not_a_number\n\
             Epoch:1 || epochiter: 100/100 || Loss: 0.7\n",
        );

        let curves = extract_curves(&path).unwrap();
        // 带 Loss: 但没匹配到数值的行不占迭代计数
        assert_eq!(curves.iters, vec![1, 2]);
        assert_eq!(curves.losses, vec![0.9, 0.7]);
        assert!(curves.accuracies.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no_such_log.txt");
        assert!(matches!(
            extract_curves(&missing),
            Err(PlotError::LogRead { .. })
        ));
    }

    #[test]
    fn test_no_loss_data() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "[Info] Test Accuracy: 0.9\nnothing else\n");
        assert!(matches!(
            extract_curves(&path),
            Err(PlotError::NoLossData { .. })
        ));
    }

    #[test]
    fn test_epoch_counter_per_accuracy_line() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            "Loss: 1.0\n\
             [Info] Test Accuracy: 0.5\n\
             Loss: 0.8\n\
             [Info] Test Accuracy: 0.6\n",
        );

        let curves = extract_curves(&path).unwrap();
        assert_eq!(curves.epochs, vec![1, 2]);
        assert_eq!(curves.accuracies, vec![0.5, 0.6]);
    }
}
