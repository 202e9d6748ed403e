use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

pub const CONFIG_FILE: &str = "config.yml";
pub const ENV_LOG_LEVEL: &str = "CHANNEL_RESOLVER_LOG";

// Country codes recognised inside a channel name (upper case in the raw name).
pub const COUNTRY_CODES: &[&str] = &[
    "us", "usa", "uk", "gb", "br", "ru", "de", "fr", "it", "es", "nl", "be", "pl", "se", "no", "fi",
    "dk", "cz", "sk", "hu", "ro", "bg", "ua", "by", "kz", "at", "ch", "pt", "gr", "ie", "hr", "rs",
    "si", "lt", "lv", "ee", "ca", "ar", "mx", "cl", "co", "pe", "ve", "in", "cn", "jp", "kr", "tw",
    "hk", "sg", "my", "th", "vn", "id", "ph", "au", "nz", "za", "eg", "ng", "ke", "ma", "tn", "dz",
    "sa", "ae", "il", "tr", "ir", "iq", "sy", "jo", "lb", "kw", "qa", "bh", "om", "ye", "af", "pk",
    "bd", "lk", "np", "mm", "kh", "la", "mn", "kp",
];

// ISO 639-2 language codes, both bibliographic and terminology forms.
pub const LANGUAGE_CODES: &[&str] = &[
    "eng", "rus", "esp", "spa", "por", "fra", "fre", "deu", "ger", "ita", "pol", "ned", "dut", "nld",
    "swe", "nor", "fin", "dan", "ces", "cze", "slk", "slo", "hun", "ron", "rum", "bul", "ukr", "bel",
    "kaz", "ara", "heb", "tur", "per", "fas", "hin", "chi", "zho", "jpn", "kor", "tha", "vie", "ind",
    "mal", "msa", "bur", "mya", "khm", "lao", "mon",
];

pub const QUALITY_ALIASES: &[(&str, &str)] = &[
    ("fullhd", "fhd"),
    ("1080", "fhd"),
    ("1080p", "fhd"),
    ("1080i", "fhd"),
    ("ultrahd", "uhd"),
    ("4k", "uhd"),
    ("2160p", "uhd"),
    ("720p", "hd"),
    ("hq", "hd"),
    ("576p", "sd"),
    ("576i", "sd"),
    ("480p", "sd"),
    ("lq", "sd"),
];

pub const TECHNICAL_ALIASES: &[(&str, &str)] = &[
    ("h264", "avc"),
    ("x264", "avc"),
    ("h265", "hevc"),
    ("x265", "hevc"),
    ("eac3", "ac3"),
];

pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("usa", "us"),
    ("gb", "uk"),
];

pub const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("esp", "spa"),
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("ned", "nld"),
    ("cze", "ces"),
    ("slo", "slk"),
    ("rum", "ron"),
    ("chi", "zho"),
    ("bur", "mya"),
    ("per", "fas"),
];

pub fn lookup_alias<'a>(aliases: &[(&str, &'a str)], value: &str) -> Option<&'a str> {
    aliases.iter().find(|(alias, _)| *alias == value).map(|(_, canonical)| *canonical)
}

fn upper_case_alternation(codes: &[&str]) -> String {
    codes.iter().map(|code| code.to_uppercase()).collect::<Vec<String>>().join("|")
}

/// Pattern tables of the name normalizer. Built once, shared read-only.
pub struct NormalizerPatterns {
    pub special_markers: Regex,
    pub country_prefix: Regex,
    pub quality: Regex,
    pub technical: Regex,
    pub country: Regex,
    pub language: Regex,
    pub variant: Regex,
    pub noise_words: Regex,
    pub noise_punctuation: Regex,
}

pub struct Constants {
    pub re_env_var: Regex,
    pub re_whitespace: Regex,
    pub re_slug_invalid: Regex,
    pub re_slug_separator: Regex,
    pub country_codes: HashSet<&'static str>,
    pub normalizer: NormalizerPatterns,
}

pub static CONSTANTS: LazyLock<Constants> = LazyLock::new(||
    Constants {
        re_env_var: Regex::new(r"\$\{env:(?P<var>[a-zA-Z_][a-zA-Z0-9_]*)}").unwrap(),
        re_whitespace: Regex::new(r"\s+").unwrap(),
        re_slug_invalid: Regex::new(r"[^\w\s-]").unwrap(),
        re_slug_separator: Regex::new(r"[-\s]+").unwrap(),
        country_codes: COUNTRY_CODES.iter().copied().collect::<HashSet<&str>>(),
        normalizer: NormalizerPatterns {
            special_markers: Regex::new(r"^\s*\|\|([^|]+)\|\|\s*$").unwrap(),
            country_prefix: Regex::new(r"^\s*([A-Za-z]{2,3})(?:\s*[|:]|\s+-)\s*").unwrap(),
            quality: Regex::new(r"(?i)\b(?:sd|hd|fhd|full[ -]?hd|uhd|ultra[ -]?hd|4k|8k|hq|lq|2160p|1080[pi]?|720p|576[pi]|480p)\b").unwrap(),
            technical: Regex::new(r"(?i)\b(?:hevc|h\.?26[45]|x26[45]|avc|vp9|av1|aac|e-?ac-?3|ac-?3|dts|mpeg-?[24]?|dvb-?[tsc]2?|atsc)\b").unwrap(),
            country: Regex::new(&format!(r"\b(?:{})\b", upper_case_alternation(COUNTRY_CODES))).unwrap(),
            language: Regex::new(&format!(r"\b(?:{})\b", upper_case_alternation(LANGUAGE_CODES))).unwrap(),
            variant: Regex::new(r"(?i)(?:\b(?:east|west|north|south|atlantic|pacific|mountain)\b|(?:^|\s)[+-]\d{1,2}h?\b)").unwrap(),
            noise_words: Regex::new(r"(?i)\b(?:tv|channel|канал|телеканал)\b").unwrap(),
            noise_punctuation: Regex::new(r"[\[\](){}|:•·\-_]+").unwrap(),
        },
    }
);
