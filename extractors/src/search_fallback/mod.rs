use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// Noise stripped from video titles before searching, applied in order
static TITLE_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)official trailer",
        r"(?i)\btrailer\b",
        r"(?i)\bteaser\b",
        r"(?i)official video",
        r"(?i)music video",
        r"(?i)lyric video",
        r"(?i)official song",
        r"(?i)\bsong\b",
        r"(?i)full movie",
        r"(?i)movie clip",
        r"(?i)\bclip\b",
        r"(?i)\|\s*youtube",
        r"(?i)-\s*youtube",
        r"\[.*?\]",
        r"(?i)\(official.*?\)",
        r"(?i)\(.*?version.*?\)",
        r"(?i)\b(?:hd|4k|1080p|720p)\b",
        r"[#@]",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("title noise regex"))
    .collect()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

const TITLE_SEPARATORS: &[char] = &['-', '|', '–', '—', ':'];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub base_url: String,
    pub max_title_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.google.com/search".to_string(),
            max_title_len: 60,
        }
    }
}

/// Reduces a page title to the name of the thing being released.
pub fn clean_title(title: &str, max_len: usize) -> String {
    let mut cleaned = title.to_string();
    for noise in TITLE_NOISE.iter() {
        cleaned = noise.replace_all(&cleaned, "").into_owned();
    }
    let cleaned = collapse_whitespace(&cleaned);

    let head = cleaned
        .split(TITLE_SEPARATORS)
        .next()
        .unwrap_or_default()
        .trim();

    truncate_on_word(head, max_len)
}

fn truncate_on_word(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    let cut = cut.trim();
    match cut.rfind(' ') {
        Some(space) if space > 0 => cut[..space].to_string(),
        _ => cut.to_string(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// `"<title> <year> release date"` with the title cleaned up.
pub fn search_query(title: &str, year: Option<i32>, config: &SearchConfig) -> String {
    let title = clean_title(title, config.max_title_len);
    let year = year.map(|y| y.to_string()).unwrap_or_default();
    collapse_whitespace(&format!("{} {} release date", title, year))
}

pub fn search_url(
    title: &str,
    year: Option<i32>,
    config: &SearchConfig,
) -> Result<Url, url::ParseError> {
    let query = search_query(title, year, config);
    Url::parse_with_params(&config.base_url, &[("q", query)])
}
