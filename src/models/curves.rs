use serde::{Deserialize, Serialize};

/// 从训练日志提取出来的两条曲线
///
/// loss 按迭代计数，accuracy 按 epoch 计数，两条曲线互相独立。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingCurves {
    pub iters: Vec<usize>,
    pub losses: Vec<f64>,
    pub epochs: Vec<usize>,
    pub accuracies: Vec<f64>,
}

impl TrainingCurves {
    pub fn has_accuracy(&self) -> bool {
        !self.accuracies.is_empty()
    }

    /// 最高 accuracy 点 (epoch, accuracy)，同值取先出现的
    pub fn max_accuracy(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (&epoch, &acc) in self.epochs.iter().zip(self.accuracies.iter()) {
            match best {
                Some((_, current)) if acc <= current => {}
                _ => best = Some((epoch, acc)),
            }
        }
        best
    }
}
