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

use veri::normalize::{
    chunk_text, extract_with_dom, looks_like_html, normalize_whitespace, strip_tags,
    truncate_for_model, VeriNormalizer,
};

#[test]
fn html_input_is_reduced_to_visible_text() {
    let html = "<html><head><title>T</title><style>p{color:red}</style></head>\
                <body><h1>Budget vote</h1><p>The council approved the plan.</p>\
                <script>track()</script><p>Critics &amp; supporters reacted.</p></body></html>";
    let doc = VeriNormalizer::default().normalize(html);

    assert!(doc.is_html);
    assert!(doc.text.contains("Budget vote"));
    assert!(doc.text.contains("The council approved the plan."));
    assert!(doc.text.contains("Critics & supporters reacted."));
    assert!(!doc.text.contains("track()"));
    assert!(!doc.text.contains("color:red"));
    assert_eq!(doc.html(), Some(html));
}

#[test]
fn plain_text_is_not_treated_as_html() {
    let doc = VeriNormalizer::default().normalize("Prices rose 3 < 5 percent,   analysts said.");
    assert!(!doc.is_html);
    assert_eq!(doc.text, "Prices rose 3 < 5 percent, analysts said.");
    assert!(doc.html().is_none());
    assert!(!looks_like_html("x > y"));
}

#[test]
fn tag_stripping_decodes_entities_and_drops_scripts() {
    let stripped = strip_tags("<div>Fish &amp; chips</div><script>var a = 1;</script><p>Served hot</p>");
    assert!(stripped.contains("Fish & chips"));
    assert!(stripped.contains("Served hot"));
    assert!(!stripped.contains("var a"));
}

#[test]
fn dom_extraction_fails_without_text_nodes() {
    assert!(extract_with_dom("<div><img src=\"a.png\"/></div>").is_err());
}

#[test]
fn whitespace_keeps_paragraph_breaks() {
    let text = normalize_whitespace("one   two\r\n\r\n\r\nthree\tfour");
    assert_eq!(text, "one two\n\nthree four");
}

#[test]
fn short_input_is_flagged_for_limited_analysis() {
    let doc = VeriNormalizer::new(500, 100).normalize("Too short to judge.");
    assert!(doc.limited_analysis);
    assert_eq!(doc.word_count, 4);
    assert_eq!(doc.sentence_count, 1);
    assert_eq!(doc.warnings.len(), 1);
    assert!(doc.warnings[0].contains("short input"));
}

#[test]
fn chunks_cover_text_in_order_and_respect_the_limit() {
    let paragraph = "Each sentence here runs to a similar length. ".repeat(6);
    let text = format!("{}\n\n{}", paragraph.trim(), paragraph.trim());
    let chunks = chunk_text(&text, 120);

    assert!(chunks.len() > 2);
    let mut last_end = 0;
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
        assert!(chunk.text.chars().count() <= 120);
        assert!(chunk.start >= last_end);
        assert_eq!(&text[chunk.start..chunk.end], chunk.text);
        last_end = chunk.end;
    }
}

#[test]
fn unbroken_text_is_hard_split() {
    let text = "x".repeat(250);
    let chunks = chunk_text(&text, 100);
    let lengths: Vec<usize> = chunks.iter().map(|c| c.text.len()).collect();
    assert_eq!(lengths, vec![100, 100, 50]);
}

#[test]
fn truncation_falls_back_to_word_boundary_then_hard_cut() {
    let words = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
    let cut = truncate_for_model(words, 50);
    assert!(cut.chars().count() <= 50);
    assert!(words.starts_with(&cut));
    assert!(!cut.ends_with(' '));

    let solid = "y".repeat(80);
    assert_eq!(truncate_for_model(&solid, 30), "y".repeat(30));
}
