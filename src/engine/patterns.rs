//! Detector patterns and the base/extended pattern tiers.
//!
//! Each pattern is classified once, when it is loaded:
//! - text that compiles as a regex is matched as a case-insensitive regex
//! - text that does not compile, and does not start with `(?`, is matched as
//!   a case-insensitive literal keyword
//! - text that does not compile but starts with `(?` is kept, but never matches

use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Always-applied detectors for credential-looking assignments.
pub const BASE_PATTERNS: &[&str] = &[
    r#"(?i)(password|senha)\s*[:=]\s*['"][^'"]{4,}['"]"#,
    r#"(?i)(api[-_]?key|access[-_]?token|auth[-_]?token)\s*[:=]\s*['"][A-Za-z0-9\-_]{10,}['"]"#,
    r#"(?i)jwt\s*[:=]\s*['"][A-Za-z0-9\-_]+\.[A-Za-z0-9\-_]+\.[A-Za-z0-9\-_]+['"]"#,
];

/// Generic keywords (administrative and secret-related terms in several
/// languages) applied only in exhaustive mode.
pub const EXTENDED_PATTERNS: &[&str] = &[
    // English
    "admin", "administrator", "administrateur", "amministratore", "root", "superuser",
    "password", "pwd", "credential",
    // Portuguese / Spanish
    "senha", "administrador", "adm", "chave", "palavra-chave", "segredo",
    "contraseña", "clave", "secreto",
    // French / German
    "motdepasse", "clé",
    "passwort", "geheim", "benutzer", "schlüssel",
    // Russian
    "админ", "администратор", "пароль", "ключ",
    // Chinese / Japanese
    "管理员", "密码", "管理者", "密钥",
    "パスワード", "管理者", "秘密",
    // Arabic
    "مدير", "كلمة السر", "كلمة المرور", "سر", "مفتاح",
    // Italian
    "segreto",
    // Hindi
    "परशसक", "पसवरड", "गपत",
    // Swedish / Dutch / Polish
    "lösenord", "administratör", "hemlighet",
    "wachtwoord", "beheerder", "geheim",
    "hasło", "tajne",
    // Turkish / Persian
    "şifre", "yönetici", "gizli", "anahtar",
    "مدیر", "رمز عبور", "کلید",
    // Leetspeak variants
    "p@ssw0rd", "Adm1n", "s3nh4",
    // Slack tokens
    r"(?i)xox[baprs]-[0-9]{12}-[0-9]{12}-[a-zA-Z0-9]{24}",
];

/// Whether pattern text is shaped like a regular expression (starts with an
/// inline group such as `(?i)`).
pub fn looks_like_regex(text: &str) -> bool {
    text.starts_with("(?")
}

/// How a pattern is matched against a document.
#[derive(Debug, Clone)]
pub enum PatternKind {
    /// Case-insensitive regular expression.
    Regex(Regex),
    /// Case-insensitive literal keyword. The matcher is the escaped keyword.
    Literal(Regex),
    /// Regex-shaped text that failed to compile, or empty text. Never matches.
    Unusable,
}

/// A single detector.
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    kind: PatternKind,
}

impl Pattern {
    /// Classify `text` and compile its matcher.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify(&text);
        Self { text, kind }
    }

    /// The pattern as written; also its identity in findings.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    /// The compiled matcher, if the pattern can match anything.
    pub fn matcher(&self) -> Option<&Regex> {
        match &self.kind {
            PatternKind::Regex(rx) | PatternKind::Literal(rx) => Some(rx),
            PatternKind::Unusable => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, PatternKind::Literal(_))
    }
}

fn classify(text: &str) -> PatternKind {
    if text.is_empty() {
        debug!("Skipping empty pattern");
        return PatternKind::Unusable;
    }

    match case_insensitive(text) {
        Ok(rx) => PatternKind::Regex(rx),
        Err(e) if looks_like_regex(text) => {
            debug!("Pattern {:?} does not compile, skipping it: {}", text, e);
            PatternKind::Unusable
        }
        Err(e) => {
            debug!("Pattern {:?} is not a valid regex ({}), matching it literally", text, e);
            match case_insensitive(&regex::escape(text)) {
                Ok(rx) => PatternKind::Literal(rx),
                Err(e) => {
                    debug!("Literal pattern {:?} is too large to compile: {}", text, e);
                    PatternKind::Unusable
                }
            }
        }
    }
}

fn case_insensitive(source: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

/// Ordered list of patterns applied to every document.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Base patterns first, then extended patterns when `include_extended` is set.
    /// Duplicate texts are kept; they scan to the same findings key.
    pub fn new<B, E>(base: B, extended: E, include_extended: bool) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let mut patterns: Vec<Pattern> = base.into_iter().map(Pattern::new).collect();
        if include_extended {
            patterns.extend(extended.into_iter().map(Pattern::new));
        }
        Self { patterns }
    }

    /// The built-in base tier, plus the extended tier when requested.
    pub fn defaults(include_extended: bool) -> Self {
        Self::new(
            BASE_PATTERNS.iter().copied(),
            EXTENDED_PATTERNS.iter().copied(),
            include_extended,
        )
    }

    /// Custom base patterns (when given) with the built-in extended tier.
    pub fn with_base(base: Option<Vec<String>>, include_extended: bool) -> Self {
        match base {
            Some(base) => Self::new(base, EXTENDED_PATTERNS.iter().copied(), include_extended),
            None => Self::defaults(include_extended),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    pub fn as_slice(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}
