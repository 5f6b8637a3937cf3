//! Sentence-bounded greedy chunking with overlap
//!
//! Text is split after each sentence terminator and sentences are packed
//! greedily into chunks below `max_size`. When a sentence no longer fits,
//! the current chunk is emitted and the next one is seeded with the last
//! `overlap` characters of the emitted chunk.
//!
//! All lengths are counted in characters, never bytes.

use crate::chunk::config::ChunkConfig;
use crate::chunk::content::ContentType;
use crate::chunk::types::{Chunk, Document};
use crate::metadata::{keys, Metadata};
use serde_json::json;
use std::borrow::Cow;
use tracing::debug;

/// Period, Arabic question mark, exclamation mark, Arabic comma
pub const SENTENCE_TERMINATORS: [char; 4] = ['.', '\u{061F}', '!', '\u{060C}'];

/// Chunks of one `chunk` call plus what was dropped under `min_size`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkOutcome {
    /// Emitted chunks in source order
    pub chunks: Vec<String>,
    /// Fragments discarded for being shorter than `min_size`
    pub dropped_fragments: usize,
    /// Characters in the discarded fragments
    pub dropped_chars: usize,
}

/// Greedy sentence chunker
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceChunker {
    config: ChunkConfig,
}

impl SentenceChunker {
    /// Create a chunker
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Split `text` into chunks
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.chunk_with_report(text).chunks
    }

    /// Split `text` into chunks, reporting dropped fragments
    pub fn chunk_with_report(&self, text: &str) -> ChunkOutcome {
        pack_sentences(text, &self.config)
    }

    /// Split `text` against a different maximum size
    pub fn chunk_sized(&self, text: &str, max_size: usize) -> ChunkOutcome {
        pack_sentences(text, &self.config.resized(max_size))
    }

    /// Chunk each document independently
    ///
    /// Every chunk carries its document's metadata plus `chunk_index`
    /// (restarting at 0 per document), `total_chunks`, `content_type` and
    /// `chunk_size_used`.
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|document| {
                let texts = self.chunk(&document.text);
                stamp_text_chunks(texts, &document.metadata, self.config.max_size())
            })
            .collect()
    }
}

/// Wrap plain chunk texts as `text` chunks of one document
pub(crate) fn stamp_text_chunks(
    texts: Vec<String>,
    parent: &Metadata,
    chunk_size_used: usize,
) -> Vec<Chunk> {
    let total = texts.len();
    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let mut chunk = Chunk::stamped(text, parent, index, ContentType::Text, chunk_size_used);
            chunk.set(keys::TOTAL_CHUNKS, json!(total));
            chunk
        })
        .collect()
}

/// Text accumulator that tracks its own character count
#[derive(Debug, Default)]
struct Buffer {
    text: String,
    chars: usize,
}

impl Buffer {
    fn push(&mut self, s: &str) {
        self.text.push_str(s);
        self.chars += s.chars().count();
    }

    fn push_sentence(&mut self, sentence: &str) {
        self.push(sentence);
        self.push(" ");
    }

    fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

fn pack_sentences(text: &str, config: &ChunkConfig) -> ChunkOutcome {
    let max_size = config.max_size();
    let overlap = config.overlap();
    let min_size = config.min_size();

    // longest piece that still fits behind a full overlap seed and two
    // separating spaces
    let piece_limit = max_size.saturating_sub(overlap + 2).max(1);

    let mut outcome = ChunkOutcome::default();
    let mut current = Buffer::default();

    for sentence in split_sentences(text) {
        for piece in split_oversized(sentence, piece_limit) {
            let piece_len = piece.chars().count();

            if current.chars + piece_len + 1 < max_size {
                current.push_sentence(&piece);
                continue;
            }

            let emitted = current.trimmed();
            let emitted_len = emitted.chars().count();

            let mut next = Buffer::default();
            if emitted_len > 0 && emitted_len >= min_size {
                let room = max_size.saturating_sub(piece_len + 2);
                let tail = char_tail(emitted, overlap.min(room));
                if !tail.is_empty() {
                    next.push(tail);
                    if !tail.ends_with(char::is_whitespace) {
                        next.push(" ");
                    }
                }
                outcome.chunks.push(emitted.to_string());
            } else if emitted_len > 0 {
                outcome.dropped_fragments += 1;
                outcome.dropped_chars += emitted_len;
            }

            next.push_sentence(&piece);
            current = next;
        }
    }

    let last = current.trimmed();
    let last_len = last.chars().count();
    if last_len > 0 && last_len >= min_size {
        outcome.chunks.push(last.to_string());
    } else if last_len > 0 {
        outcome.dropped_fragments += 1;
        outcome.dropped_chars += last_len;
    }

    if outcome.dropped_fragments > 0 {
        debug!(
            dropped = outcome.dropped_fragments,
            chars = outcome.dropped_chars,
            min_size,
            "dropped fragments below min_size"
        );
    }

    outcome
}

/// Split after every terminator; trimmed, empty fragments removed
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if SENTENCE_TERMINATORS.contains(&ch) {
            let end = i + ch.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, fragment: &'a str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
}

/// Break a sentence longer than `limit` characters at whitespace, falling
/// back to character boundaries for single over-long words
fn split_oversized(sentence: &str, limit: usize) -> Vec<Cow<'_, str>> {
    if sentence.chars().count() <= limit {
        return vec![Cow::Borrowed(sentence)];
    }

    let mut pieces = Vec::new();
    let mut current = Buffer::default();

    for word in sentence.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > limit {
            if current.chars > 0 {
                pieces.push(Cow::Owned(std::mem::take(&mut current).text));
            }
            let chars: Vec<char> = word.chars().collect();
            for part in chars.chunks(limit) {
                pieces.push(Cow::Owned(part.iter().collect()));
            }
            continue;
        }

        let needed = if current.chars == 0 { word_len } else { word_len + 1 };
        if current.chars + needed > limit {
            pieces.push(Cow::Owned(std::mem::take(&mut current).text));
        }
        if current.chars > 0 {
            current.push(" ");
        }
        current.push(word);
    }

    if current.chars > 0 {
        pieces.push(Cow::Owned(current.text));
    }

    pieces
}

/// Last `n` characters of `s`
fn char_tail(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((i, _)) => &s[i..],
        None => s,
    }
}
