// ==========================================
// 门店库存调拨 - 条码归一化与拆分
// ==========================================
// 职责: 原始条码 → 商品键；多条码单元格 → 条码列表
// 红线: 纯函数，无状态、无副作用
// ==========================================

use crate::domain::types::ProductKey;

/// 与 ',' 等价的分隔符
const SEPARATORS: [char; 5] = [',', ';', '|', '/', '\\'];

/// 条码归一化
///
/// # 规则
/// 1. 去掉所有非数字字符，再去掉前导 0
/// 2. 结果非空 → 作为键
/// 3. 否则 → 原始条码 TRIM 后转小写（全 0 条码也走这里，不会与空键冲突）
///
/// 空条码 → 未分配键
pub fn normalize_key(barcode: &str) -> ProductKey {
    let digits: String = barcode.chars().filter(|c| c.is_ascii_digit()).collect();
    let stripped = digits.trim_start_matches('0');
    if !stripped.is_empty() {
        return ProductKey::new(stripped);
    }
    ProductKey::new(barcode.trim().to_lowercase())
}

/// 拆分多条码单元格
///
/// `;` `|` `/` `\` 视同 `,`；每段 TRIM；丢弃空段；保持出现顺序
pub fn split_barcodes(raw: &str) -> Vec<String> {
    raw.split(|c: char| SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
