use image::{imageops, imageops::FilterType, RgbImage};

/// 预处理策略：输入已经缩放到目标尺寸的 RGB 图，输出展开的浮点张量。
/// 数据集允许多个 worker 并发只读取样，所以要求 Send + Sync。
pub type PreprocFn = Box<dyn Fn(&RgbImage) -> Vec<f32> + Send + Sync>;

/// 尺寸不一致时才缩放，双线性插值
pub fn resize_if_needed(img: RgbImage, width: u32, height: u32) -> RgbImage {
    if img.dimensions() == (width, height) {
        img
    } else {
        imageops::resize(&img, width, height, FilterType::Triangle)
    }
}

/// 默认预处理：减 127.5 乘 0.0078125，像素值落到 [-1, 1) 附近，
/// 同时把 HWC 排布转成网络要的 CHW
pub fn default_transform(img: &RgbImage) -> Vec<f32> {
    let (width, height) = img.dimensions();
    let mut out = Vec::with_capacity((width * height * 3) as usize);
    for channel in 0..3usize {
        for y in 0..height {
            for x in 0..width {
                let v = img.get_pixel(x, y)[channel] as f32;
                out.push((v - 127.5) * 0.0078125);
            }
        }
    }
    out
}
