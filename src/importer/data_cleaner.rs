// ==========================================
// 门店库存调拨 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数量强制转换
// 红线: 数据质量问题就地修正为安全默认值，不中止运行
// ==========================================

use crate::domain::types::ParsedQty;
use crate::importer::inventory_importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse_quantity(&self, value: Option<&str>) -> ParsedQty {
        let text = match self.normalize_null(value) {
            Some(t) => t,
            None => return ParsedQty::Defaulted,
        };

        // 整数优先；"3.0" / "1e2" 之类按浮点解析后向零截断
        // 超出 i64 范围的数值（如 "1e300"）视为无法解析，不做饱和
        let parsed = text.parse::<i64>().ok().or_else(|| {
            text.parse::<f64>()
                .ok()
                .map(f64::trunc)
                .filter(|f| (i64::MIN as f64..i64::MAX as f64).contains(f))
                .map(|f| f as i64)
        });

        match parsed {
            Some(v) if v < 0 => ParsedQty::Clamped(v),
            Some(v) => ParsedQty::Parsed(v),
            None => ParsedQty::Defaulted,
        }
    }
}
