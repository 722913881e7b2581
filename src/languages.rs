//! Minecraft 语言代码
//!
//! 只用于填充图形界面的下拉框和 `--list-languages` 输出，
//! 处理逻辑本身接受任意语言代码。

/// (语言代码, 语言名称)
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("ru_ru", "Русский"),
    ("uk_ua", "Українська"),
    ("be_by", "Беларуская"),
    ("zh_cn", "简体中文"),
    ("zh_tw", "繁體中文"),
    ("ja_jp", "日本語"),
    ("ko_kr", "한국어"),
    ("de_de", "Deutsch"),
    ("fr_fr", "Français"),
    ("es_es", "Español (España)"),
    ("es_mx", "Español (México)"),
    ("it_it", "Italiano"),
    ("pt_br", "Português (Brasil)"),
    ("pt_pt", "Português (Portugal)"),
    ("pl_pl", "Polski"),
    ("cs_cz", "Čeština"),
    ("nl_nl", "Nederlands"),
    ("sv_se", "Svenska"),
    ("tr_tr", "Türkçe"),
    ("vi_vn", "Tiếng Việt"),
];

/// 是否为内置列表中的语言代码
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|&(c, _)| c == code)
}

/// 语言代码对应的名称
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, name)| name)
}
