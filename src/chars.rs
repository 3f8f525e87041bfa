//! 车牌字符表
//!
//! 固定顺序：31 个省份简称、10 个数字、24 个字母（易混淆的 I/O 排在表尾）、
//! 以及分隔符 `-`。字符在表中的位置即网络的分类下标。

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 中国车牌字符表
pub const CHARS: [char; 68] = [
    '京', '沪', '津', '渝', '冀', '晋', '蒙', '辽', '吉', '黑',
    '苏', '浙', '皖', '闽', '赣', '鲁', '豫', '鄂', '湘', '粤',
    '桂', '琼', '川', '贵', '云', '藏', '陕', '甘', '青', '宁',
    '新',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K',
    'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V',
    'W', 'X', 'Y', 'Z', 'I', 'O', '-',
];

/// 省份简称在表头占用的长度
pub const REGION_GLYPH_COUNT: usize = 31;

// 反向查表只建一次，进程内只读
static CHARS_DICT: Lazy<HashMap<char, usize>> =
    Lazy::new(|| CHARS.iter().enumerate().map(|(i, &c)| (c, i)).collect());

/// 字符在字符表中的下标
pub fn index_of(c: char) -> Option<usize> {
    CHARS_DICT.get(&c).copied()
}

/// 下标对应的字符
pub fn char_at(index: usize) -> Option<char> {
    CHARS.get(index).copied()
}

/// 是否是省份简称（车牌第一个字符一定是省份简称）
pub fn is_region_glyph(c: char) -> bool {
    CHARS[..REGION_GLYPH_COUNT].contains(&c)
}

/// 车牌字符串转下标序列
///
/// 表外字符直接丢弃，返回值第二项是被丢弃的字符数，
/// 调用方据此可以发现被截短的标签。
pub fn encode(label: &str) -> (Vec<usize>, usize) {
    let mut indices = Vec::new();
    let mut dropped = 0;
    for c in label.chars() {
        match index_of(c) {
            Some(i) => indices.push(i),
            None => dropped += 1,
        }
    }
    (indices, dropped)
}

/// 下标序列转回车牌字符串，越界下标跳过
pub fn decode(indices: &[usize]) -> String {
    indices.iter().filter_map(|&i| char_at(i)).collect()
}
