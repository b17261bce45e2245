// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 界面标签支持西班牙语（默认，与源数据一致）和英文
// 翻译表: locales/{es,en}.yml，rust_i18n::i18n! 宏在 lib.rs 中初始化
// ==========================================

use crate::domain::DashboardSection;

/// 设置当前语言（"es" / "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译并替换 `%{name}` 占位符
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t(key);
    for (k, v) in args {
        result = result.replace(&format!("%{{{}}}", k), v);
    }
    result
}

/// 看板分区标题
pub fn section_title(section: DashboardSection) -> String {
    t(section.title_key())
}
