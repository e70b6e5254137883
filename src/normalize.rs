//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Veri.
//! The Veri project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Normalizer and Chunker
//!
//! Turns raw article content of unknown format into a [`VeriDocument`]:
//!
//! 1. HTML is detected by the presence of tag-like substrings.
//! 2. HTML is converted to text through the DOM (`scraper`), keeping block
//!    elements as paragraphs. When the DOM route yields nothing, tags are
//!    stripped with regexes and entities are decoded.
//! 3. If extraction leaves nothing but the input was not empty, the input is
//!    used verbatim.
//! 4. Text shorter than the short-input threshold is flagged
//!    `limited_analysis`; analysis continues regardless.
//! 5. The text is split into chunks of at most `chunk_max_chars` characters,
//!    preferring paragraph boundaries, then sentence boundaries, then
//!    whitespace, and merging adjacent short segments.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::VeriConfig;
use crate::errors::{Result, VeriError};

const BLOCK_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, li, blockquote, pre, td, figcaption";
const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote", "pre", "td", "figcaption",
];
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "head", "title"];

/// Bounded slice of the normalized text, addressed by byte offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VeriChunk {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Normalized article text plus the facts later stages need about it.
#[derive(Clone, Debug, Default)]
pub struct VeriDocument {
    pub original: String,
    pub text: String,
    pub is_html: bool,
    pub limited_analysis: bool,
    pub chunks: Vec<VeriChunk>,
    pub word_count: usize,
    pub char_count: usize,
    pub sentence_count: usize,
    pub warnings: Vec<String>,
}

impl VeriDocument {
    /// Raw HTML when the input was HTML, used by selector-based detectors.
    pub fn html(&self) -> Option<&str> {
        self.is_html.then_some(self.original.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct VeriNormalizer {
    chunk_max_chars: usize,
    short_input_threshold: usize,
}

impl Default for VeriNormalizer {
    fn default() -> Self {
        Self {
            chunk_max_chars: 500,
            short_input_threshold: 100,
        }
    }
}

impl VeriNormalizer {
    pub fn new(chunk_max_chars: usize, short_input_threshold: usize) -> Self {
        Self {
            chunk_max_chars: chunk_max_chars.max(1),
            short_input_threshold,
        }
    }

    pub fn from_config(config: &VeriConfig) -> Self {
        Self::new(config.chunk_max_chars, config.short_input_threshold)
    }

    pub fn normalize(&self, input: &str) -> VeriDocument {
        let mut warnings = Vec::new();
        let is_html = looks_like_html(input);

        let mut text = if is_html {
            match extract_with_dom(input) {
                Ok(text) => text,
                Err(err) => {
                    log::warn!("veri.normalize: {err}; falling back to tag stripping");
                    warnings.push(err.to_string());
                    strip_tags(input)
                }
            }
        } else {
            normalize_whitespace(input)
        };

        if text.trim().is_empty() && !input.is_empty() {
            log::debug!("veri.normalize: extraction produced no text, using raw input");
            text = input.to_string();
        }

        let char_count = text.chars().count();
        let limited_analysis = char_count < self.short_input_threshold;
        if limited_analysis {
            let warning = VeriError::ShortInput {
                chars: char_count,
                threshold: self.short_input_threshold,
            };
            log::debug!("veri.normalize: {warning}");
            warnings.push(warning.to_string());
        }

        let chunks = chunk_text(&text, self.chunk_max_chars);
        VeriDocument {
            original: input.to_string(),
            word_count: text.split_whitespace().count(),
            sentence_count: sentence_spans(&text).len(),
            char_count,
            is_html,
            limited_analysis,
            chunks,
            text,
            warnings,
        }
    }
}

fn html_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<(?:/?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?|!--[\s\S]*?--|![A-Za-z][^<>]*)>")
            .expect("static html tag pattern")
    })
}

/// True when the input contains at least one tag-like substring.
pub fn looks_like_html(input: &str) -> bool {
    html_tag_re().is_match(input)
}

/// Extracts text through the DOM. Fails when the parser yields no text.
pub fn extract_with_dom(html: &str) -> Result<String> {
    let text = std::panic::catch_unwind(|| dom_text(html))
        .map_err(|_| VeriError::Parse("DOM parser aborted".to_string()))?;
    if text.trim().is_empty() {
        return Err(VeriError::Parse("document has no text nodes".to_string()));
    }
    Ok(text)
}

fn is_skipped(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .map(|e| SKIPPED_TAGS.contains(&e.name()))
            .unwrap_or(false)
    })
}

fn has_block_ancestor(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .map(|e| BLOCK_TAGS.contains(&e.name()))
            .unwrap_or(false)
    })
}

fn dom_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut blocks = Vec::new();
    if let Ok(selector) = Selector::parse(BLOCK_SELECTOR) {
        for element in document.select(&selector) {
            if has_block_ancestor(&element) || is_skipped(&element) {
                continue;
            }
            let text = collapse_spaces(&element.text().collect::<Vec<_>>().join(" "));
            if !text.is_empty() {
                blocks.push(text);
            }
        }
    }

    let mut visible = Vec::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .map(|e| SKIPPED_TAGS.contains(&e.name()))
                .unwrap_or(false)
        });
        if !hidden {
            visible.push(String::from(&**text));
        }
    }
    let visible = collapse_spaces(&visible.join(" "));

    let block_text = blocks.join("\n\n");
    // Prefer paragraph structure unless blocks miss most of the visible text.
    if !block_text.is_empty() && block_text.chars().count() * 2 >= visible.chars().count() {
        block_text
    } else {
        visible
    }
}

/// Regex tag stripping used when the DOM route fails.
pub fn strip_tags(html: &str) -> String {
    static HIDDEN_RE: OnceLock<Regex> = OnceLock::new();
    static BREAK_RE: OnceLock<Regex> = OnceLock::new();
    static TAG_RE: OnceLock<Regex> = OnceLock::new();

    let hidden_re = HIDDEN_RE.get_or_init(|| {
        Regex::new(r"(?is)<(?:script|style|noscript|template)\b[^>]*>.*?</(?:script|style|noscript|template)\s*>")
            .expect("static hidden block pattern")
    });
    let break_re = BREAK_RE.get_or_init(|| {
        Regex::new(r"(?i)</?(?:p|div|br|h[1-6]|li|ul|ol|blockquote|pre|tr|section|article|header|footer)\b[^>]*>")
            .expect("static block break pattern")
    });
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("static tag pattern"));

    let without_hidden = hidden_re.replace_all(html, " ");
    let with_breaks = break_re.replace_all(&without_hidden, "\n\n");
    let without_tags = tag_re.replace_all(&with_breaks, " ");
    let decoded = html_escape::decode_html_entities(&without_tags).to_string();
    normalize_whitespace(&decoded)
}

fn collapse_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapses runs of spaces inside lines and keeps at most one blank line
/// between paragraphs.
pub fn normalize_whitespace(text: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in text.replace("\r\n", "\n").replace('\r', "\n").split('\n') {
        let line = collapse_spaces(line);
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs.join("\n\n")
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte spans of sentences, split after runs of `.`, `!` or `?`.
pub fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if matches!(ch, '.' | '!' | '?') {
            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if matches!(next, '.' | '!' | '?') {
                    end = next_idx + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            push_trimmed(text, start, end, &mut spans);
            start = end;
        }
    }
    push_trimmed(text, start, text.len(), &mut spans);
    spans
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<(usize, usize)>) {
    let slice = &text[start..end];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    if leading + trailing < slice.len() {
        spans.push((start + leading, end - trailing));
    }
}

fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    static PARA_RE: OnceLock<Regex> = OnceLock::new();
    let re = PARA_RE.get_or_init(|| Regex::new(r"\n[ \t]*\n\s*").expect("static paragraph pattern"));
    let mut spans = Vec::new();
    let mut start = 0;
    for sep in re.find_iter(text) {
        push_trimmed(text, start, sep.start(), &mut spans);
        start = sep.end();
    }
    push_trimmed(text, start, text.len(), &mut spans);
    spans
}

/// Splits an over-long span at whitespace, or hard at `max_chars`.
fn hard_split(text: &str, start: usize, end: usize, max_chars: usize) -> Vec<(usize, usize)> {
    let mut pieces = Vec::new();
    let mut cursor = start;
    while cursor < end {
        let rest = &text[cursor..end];
        if char_len(rest) <= max_chars {
            push_trimmed(text, cursor, end, &mut pieces);
            break;
        }
        let window_end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| cursor + i)
            .unwrap_or(end);
        let window = &text[cursor..window_end];
        let cut = match window.rfind(char::is_whitespace) {
            Some(ws) if ws > 0 => cursor + ws,
            _ => window_end,
        };
        push_trimmed(text, cursor, cut, &mut pieces);
        cursor = cut;
        while let Some(ch) = text[cursor..end].chars().next() {
            if !ch.is_whitespace() {
                break;
            }
            cursor += ch.len_utf8();
        }
    }
    pieces
}

/// Ordered chunks of at most `max_chars` characters covering `text`.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<VeriChunk> {
    let max_chars = max_chars.max(1);
    let mut segments: Vec<(usize, usize)> = Vec::new();

    for (p_start, p_end) in paragraph_spans(text) {
        if char_len(&text[p_start..p_end]) <= max_chars {
            segments.push((p_start, p_end));
            continue;
        }
        for (s_start, s_end) in sentence_spans(&text[p_start..p_end]) {
            let (s_start, s_end) = (p_start + s_start, p_start + s_end);
            if char_len(&text[s_start..s_end]) <= max_chars {
                segments.push((s_start, s_end));
            } else {
                segments.extend(hard_split(text, s_start, s_end, max_chars));
            }
        }
    }

    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in segments {
        match merged.last_mut() {
            Some(last) if char_len(&text[last.0..end]) <= max_chars => last.1 = end,
            _ => merged.push((start, end)),
        }
    }

    merged
        .into_iter()
        .enumerate()
        .map(|(index, (start, end))| VeriChunk {
            index,
            start,
            end,
            text: text[start..end].to_string(),
        })
        .collect()
}

/// Shortens `text` to at most `max_chars` characters, cutting at the last
/// sentence end, else at a late word boundary, else hard.
pub fn truncate_for_model(text: &str, max_chars: usize) -> String {
    if char_len(text) <= max_chars {
        return text.to_string();
    }
    let cut = text
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let window = &text[..cut];

    let sentence_end = window
        .char_indices()
        .zip(window.chars().skip(1))
        .filter(|((_, c), next)| matches!(c, '.' | '!' | '?') && next.is_whitespace())
        .map(|((i, c), _)| i + c.len_utf8())
        .last();
    if let Some(end) = sentence_end {
        return window[..end].trim_end().to_string();
    }
    if let Some(space) = window.rfind(' ') {
        if char_len(&window[..space]) as f64 > max_chars as f64 * 0.8 {
            return window[..space].trim_end().to_string();
        }
    }
    window.trim_end().to_string()
}
