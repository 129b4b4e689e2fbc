// ==========================================
// 门店库存调拨 - 字段映射器实现
// ==========================================
// 职责: 源列 → InputRecord 映射 + 必需列校验
// 必需列: name_en, branch_name, barcodes, available_quantity
// 可选列: brand, sale_price
// ==========================================

use crate::domain::inventory::InputRecord;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::inventory_importer_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait,
};
use std::collections::HashMap;
use tracing::debug;

/// 源表列名
pub mod columns {
    pub const NAME_EN: &str = "name_en";
    pub const BRANCH_NAME: &str = "branch_name";
    pub const BARCODES: &str = "barcodes";
    pub const AVAILABLE_QUANTITY: &str = "available_quantity";
    pub const BRAND: &str = "brand";
    pub const SALE_PRICE: &str = "sale_price";

    pub const REQUIRED: [&str; 4] = [NAME_EN, BRANCH_NAME, BARCODES, AVAILABLE_QUANTITY];
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }
}

impl FieldMapperTrait for FieldMapper {
    fn check_required_columns(&self, headers: &[String]) -> ImportResult<()> {
        let missing: Vec<String> = columns::REQUIRED
            .iter()
            .filter(|c| !headers.iter().any(|h| h == *c))
            .map(|c| c.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingColumns(missing))
        }
    }

    fn map_to_input_record(
        &self,
        row: &HashMap<String, String>,
        source: &str,
        row_number: usize,
    ) -> InputRecord {
        let raw_qty = row.get(columns::AVAILABLE_QUANTITY).map(String::as_str);
        let on_hand = self.cleaner.parse_quantity(raw_qty);
        if on_hand.is_defaulted() || on_hand.is_clamped() {
            debug!(
                source = %source,
                row = row_number,
                raw = raw_qty.unwrap_or(""),
                qty = %on_hand,
                "数量已修正"
            );
        }

        InputRecord {
            product_name: self.get_text(row, columns::NAME_EN),
            branch: self.get_text(row, columns::BRANCH_NAME),
            barcodes_raw: self.get_text(row, columns::BARCODES),
            on_hand,
            brand: self.get_string(row, columns::BRAND),
            sale_price: self.get_string(row, columns::SALE_PRICE),
            source: source.to_string(),
            row_number,
        }
    }
}

impl FieldMapper {
    /// 提取可选字段（空白视为缺失）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        self.cleaner.normalize_null(row.get(key).map(String::as_str))
    }

    /// 提取文本字段（缺失视为空文本）
    fn get_text(&self, row: &HashMap<String, String>, key: &str) -> String {
        row.get(key)
            .map(|v| self.cleaner.clean_text(v))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ParsedQty;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_required_columns_present() {
        let mapper = FieldMapper::default();
        let h = headers(&["name_en", "branch_name", "barcodes", "available_quantity", "brand"]);
        assert!(mapper.check_required_columns(&h).is_ok());
    }

    #[test]
    fn test_required_columns_missing_all_listed() {
        let mapper = FieldMapper::default();
        let err = mapper
            .check_required_columns(&headers(&["name_en", "brand"]))
            .unwrap_err();
        match err {
            ImportError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["branch_name", "barcodes", "available_quantity"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_map_full_row() {
        let mapper = FieldMapper::default();
        let record = mapper.map_to_input_record(
            &row(&[
                ("name_en", " Olive Oil "),
                ("branch_name", "Downtown"),
                ("barcodes", "0123;456"),
                ("available_quantity", "7"),
                ("brand", "Acme"),
                ("sale_price", "12.50"),
            ]),
            "stock.csv",
            3,
        );
        assert_eq!(record.product_name, "Olive Oil");
        assert_eq!(record.branch, "Downtown");
        assert_eq!(record.barcodes_raw, "0123;456");
        assert_eq!(record.on_hand, ParsedQty::Parsed(7));
        assert_eq!(record.brand.as_deref(), Some("Acme"));
        assert_eq!(record.sale_price.as_deref(), Some("12.50"));
        assert_eq!(record.source, "stock.csv");
        assert_eq!(record.row_number, 3);
    }

    #[test]
    fn test_map_missing_optional_and_bad_qty() {
        let mapper = FieldMapper::default();
        let record = mapper.map_to_input_record(
            &row(&[("name_en", "Tea"), ("available_quantity", "lots")]),
            "b.csv",
            1,
        );
        assert_eq!(record.branch, "");
        assert_eq!(record.barcodes_raw, "");
        assert_eq!(record.on_hand, ParsedQty::Defaulted);
        assert_eq!(record.brand, None);
        assert_eq!(record.sale_price, None);
    }
}
