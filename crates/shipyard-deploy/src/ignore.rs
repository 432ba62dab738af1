//! Ignore spec tokenizing.
//!
//! Tokens are separated by runs of whitespace. A whitespace character
//! directly preceded by `\` is part of the token and comes out as a space.

/// One entry of an ignore spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreToken {
    /// Literal file/directory name, e.g. `*.log` or `web.config`.
    Simple(String),
    /// Contains a path separator; matched against scanned directory trees.
    PathSegment(String),
}

impl IgnoreToken {
    pub fn classify(token: String) -> Self {
        if token.contains(['\\', '/']) {
            Self::PathSegment(token)
        } else {
            Self::Simple(token)
        }
    }
}

/// Split an ignore spec into un-escaped tokens. Blank input yields nothing.
pub fn tokenize(spec: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    let mut in_separator = false;

    for c in spec.chars() {
        if c.is_whitespace() && (in_separator || prev != Some('\\')) {
            in_separator = true;
            if !current.is_empty() {
                tokens.push(unescape(&current));
                current.clear();
            }
        } else {
            in_separator = false;
            current.push(c);
        }
        prev = Some(c);
    }
    if !current.is_empty() {
        tokens.push(unescape(&current));
    }

    tokens
}

/// Tokenize and classify.
pub fn parse(spec: &str) -> Vec<IgnoreToken> {
    tokenize(spec)
        .into_iter()
        .map(IgnoreToken::classify)
        .collect()
}

fn unescape(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(next) if c == '\\' && next.is_whitespace() => {
                out.push(' ');
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}
