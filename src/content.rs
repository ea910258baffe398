// Copyright 2026 Newsdesk Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Flattening of nested token content into display strings, plus the
//! fixed-position date reformatting used everywhere a date is shown.

use crate::model::TokenContent;

/// Appended when a flattened string is cut at `max_chars`.
pub const ELLIPSIS: &str = "……";

#[derive(Debug, Clone)]
pub struct FlattenOptions {
    pub max_chars: Option<usize>,
    pub max_paragraphs: Option<usize>,
    pub paragraph_prefix: &'static str,
    pub paragraph_suffix: &'static str,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            max_chars: None,
            max_paragraphs: None,
            paragraph_prefix: "",
            paragraph_suffix: "\n\n",
        }
    }
}

/// Flatten paragraphs of sentence tokens into one string.
///
/// Tokens within a paragraph are concatenated with no separator. Empty
/// paragraphs are skipped and do not count toward `max_paragraphs`. The
/// result is trailing-trimmed; when `max_chars` is exceeded the string is
/// cut at that many chars, trailing-trimmed again, and marked with [`ELLIPSIS`].
pub fn flatten(content: &TokenContent, opts: &FlattenOptions) -> String {
    let mut text = String::new();
    let mut emitted = 0usize;
    for paragraph in content {
        let mut para = String::new();
        for sentence in paragraph {
            for token in sentence {
                para.push_str(token);
            }
        }
        if para.is_empty() {
            continue;
        }
        emitted += 1;
        if let Some(max) = opts.max_paragraphs
            && emitted > max
        {
            break;
        }
        text.push_str(opts.paragraph_prefix);
        text.push_str(&para);
        text.push_str(opts.paragraph_suffix);
    }

    let mut text = text.trim_end().to_string();
    if let Some(max) = opts.max_chars
        && text.chars().count() > max
    {
        text = text.chars().take(max).collect::<String>();
        text = text.trim_end().to_string();
        text.push_str(ELLIPSIS);
    }
    text
}

/// Flatten with no caps: paragraphs joined by a blank line.
pub fn flatten_full(content: &TokenContent) -> String {
    flatten(content, &FlattenOptions::default())
}

/// Reformat `yyyy-mm-dd` as `yyyy年mm月dd日`, parsing each component from its
/// fixed position. Components that fail to parse render as `NaN`; nothing is
/// range-checked. Callers that need rejection validate before formatting.
pub fn format_date(s: &str) -> String {
    let year = parse_component(s, 0, 4);
    let month = parse_component(s, 5, 2);
    let day = parse_component(s, 8, 2);
    format!("{year}年{month}月{day}日")
}

/// Leading-digit-run parse of a positional slice, rendered as the number or
/// the string `NaN` when no digits are present.
fn parse_component(s: &str, start: usize, len: usize) -> String {
    let slice: String = s.chars().skip(start).take(len).collect();
    let digits: String = slice
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u32>() {
        Ok(n) => n.to_string(),
        Err(_) => "NaN".to_string(),
    }
}
