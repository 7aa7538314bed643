//! Delimited regular expressions (`/body/flags`) and a compiled-pattern cache.

use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use lru::LruCache;
use regex::{Regex, RegexBuilder};

const CACHE_CAPACITY: usize = 128;

/// Compile a pattern written with delimiters, e.g. `![0-9]!` or `/bob/i`.
///
/// Bracket delimiters pair up (`{...}`, `(...)`, `[...]`, `<...>`). A pattern
/// starting with an alphanumeric, whitespace or backslash is used as-is.
/// Trailing modifiers: `i m s x U` map to regex flags, `u D` are accepted.
pub fn compile(pattern: &str) -> Result<Regex, String> {
    let Some(opener) = pattern.chars().next() else {
        return Regex::new(pattern).map_err(|e| e.to_string());
    };
    if opener.is_alphanumeric() || opener.is_whitespace() || opener == '\\' {
        return Regex::new(pattern).map_err(|e| e.to_string());
    }
    let closer = match opener {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        c => c,
    };

    let rest = &pattern[opener.len_utf8()..];
    let end = find_closer(rest, opener, closer)
        .ok_or_else(|| format!("no ending delimiter '{closer}' found"))?;
    let body = unescape_delimiters(&rest[..end], opener, closer);
    let modifiers = &rest[end + closer.len_utf8()..];

    let mut builder = RegexBuilder::new(&body);
    for flag in modifiers.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'U' => builder.swap_greed(true),
            'u' | 'D' | '\n' | '\r' | ' ' => &mut builder,
            other => return Err(format!("unknown modifier '{other}'")),
        };
    }
    builder.build().map_err(|e| e.to_string())
}

/// Byte offset of the first unescaped, unnested closing delimiter.
fn find_closer(rest: &str, opener: char, closer: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, ch) in rest.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == closer {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        } else if ch == opener {
            depth += 1;
        }
    }
    None
}

/// Rewrite `\<delimiter>` so the delimiter is matched literally.
fn unescape_delimiters(body: &str, opener: char, closer: char) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(next) if next == opener || next == closer => {
                out.push_str(&regex::escape(next.encode_utf8(&mut [0; 4])));
            }
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Bounded cache of compiled patterns, shared by every evaluation on an engine.
#[derive(Debug)]
pub(crate) struct PatternCache {
    compiled: Mutex<LruCache<String, Regex>>,
}

impl Default for PatternCache {
    fn default() -> Self {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            compiled: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl PatternCache {
    pub(crate) fn get(&self, pattern: &str) -> Result<Regex, String> {
        let mut compiled = self.compiled.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(re) = compiled.get(pattern) {
            return Ok(re.clone());
        }
        let re = compile(pattern)?;
        compiled.put(pattern.to_string(), re.clone());
        Ok(re)
    }
}
