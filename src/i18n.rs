// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
///
/// # 返回
/// 语言不受支持时返回 false 且不做切换
pub fn set_locale(locale: &str) -> bool {
    if !SUPPORTED_LOCALES.contains(&locale) {
        return false;
    }
    rust_i18n::set_locale(locale);
    true
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use stock_transfer::i18n::t;
/// let msg = t("summary.overview");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use stock_transfer::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/stock.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
