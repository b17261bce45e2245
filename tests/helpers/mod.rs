// ==========================================
// 集成测试共享辅助
// ==========================================
// 各测试文件只使用其中一部分
#![allow(dead_code)]

pub mod test_data_builder;
pub mod workbook_fixture;
