use std::path::Path;

use crate::chars;

/// 从文件名推断车牌号
///
/// 文件名里经常带下划线分隔的额外信息（序号、置信度之类），
/// 所以按下划线切割后找第一段"长度大于 1 且以省份简称开头"的当车牌。
/// 都不符合时兜底：整个文件名本身以省份简称开头就整个当车牌。
/// 再不行就认定解析失败，返回 None。
pub fn label_from_filename(file_name: &str) -> Option<String> {
    let stem = Path::new(file_name).file_stem()?.to_str()?;

    for part in stem.split('_') {
        let mut cs = part.chars();
        if let Some(first) = cs.next() {
            // 长度大于 1 排除单独的省份字符段
            if cs.next().is_some() && chars::is_region_glyph(first) {
                return Some(part.to_string());
            }
        }
    }

    let first = stem.chars().next()?;
    if chars::is_region_glyph(first) {
        Some(stem.to_string())
    } else {
        None
    }
}
