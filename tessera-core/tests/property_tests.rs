//! Property tests for chunk bounds, overlap, normalization and structure
//! detection

use proptest::prelude::*;
use tessera_core::{
    detect_structure, normalize, ChunkConfig, GateMode, Metadata, NormalizationConfig, Segmenter,
    SegmenterConfig, SentenceChunker, StructureOptions, StructuredChunker,
};

/// Words, terminators and whitespace in Latin and Arabic script
fn text_strategy() -> impl Strategy<Value = String> {
    let word = prop::sample::select(vec![
        "alpha",
        "beta",
        "gamma",
        "a",
        "supercalifragilistic",
        "\u{0643}\u{062A}\u{0627}\u{0628}",
        "\u{0645}\u{062F}\u{0631}\u{0633}\u{0629}",
        "12",
    ]);
    let sep = prop::sample::select(vec![" ", " ", " ", ". ", "! ", "\u{061F} ", "\u{060C} ", "\n"]);
    prop::collection::vec((word, sep), 0..80).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(w, s)| format!("{w}{s}"))
            .collect::<String>()
    })
}

/// Arbitrary mix of Arabic variants, marks, fillers, lookalikes and ASCII
fn arabic_noise_strategy() -> impl Strategy<Value = String> {
    let ch = prop::sample::select(vec![
        '\u{0627}', '\u{0623}', '\u{0625}', '\u{0622}', '\u{0671}', '\u{0649}', '\u{064A}',
        '\u{064B}', '\u{064E}', '\u{0651}', '\u{0670}', '\u{0640}', '\u{06A9}', '\u{06CC}',
        '\u{06C1}', '\u{0643}', 'a', 'b', ' ', '\n', '.',
    ]);
    prop::collection::vec(ch, 0..60).prop_map(|chars| chars.into_iter().collect())
}

fn config_strategy() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..200).prop_flat_map(|max| (Just(max), 0..max, 0..=max))
}

/// Prose, report-like layout with headers and tables, or Arabic noise
fn document_strategy() -> impl Strategy<Value = String> {
    let report = (text_strategy(), text_strategy(), 0usize..6).prop_map(|(intro, body, rows)| {
        let table: Vec<String> = (0..rows).map(|i| format!("| row {i} | value {i} |")).collect();
        format!(
            "Opening Section Title\n\n{intro}\n\nFigures And Tables\n\n{}\n{body}\n\nPage 2\n",
            table.join("\n")
        )
    });
    prop_oneof![text_strategy(), report, arabic_noise_strategy()]
}

fn gate_mode_strategy() -> impl Strategy<Value = GateMode> {
    prop_oneof![
        Just(GateMode::Auto),
        Just(GateMode::Structured),
        Just(GateMode::Plain)
    ]
}

fn segmenter(max: usize, overlap: usize, min: usize, gate_mode: GateMode) -> Segmenter {
    let mut config = SegmenterConfig::default();
    config.chunking.max_size = max;
    config.chunking.overlap = overlap;
    config.chunking.min_size = min;
    Segmenter::new(&config).unwrap().with_gate_mode(gate_mode)
}

fn char_tail(s: &str, n: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    chars[chars.len().saturating_sub(n)..].iter().collect()
}

fn is_subsequence(needle: impl Iterator<Item = char>, haystack: &[char]) -> bool {
    let mut rest = haystack.iter();
    let mut needle = needle;
    needle.all(|c| rest.any(|&h| h == c))
}

proptest! {
    #[test]
    fn prop_chunks_within_bounds(text in text_strategy(), (max, overlap, min) in config_strategy()) {
        let config = ChunkConfig::new(max, overlap, min).unwrap();
        for chunk in SentenceChunker::new(config).chunk(&text) {
            let len = chunk.chars().count();
            prop_assert!(len <= max, "chunk of {} chars exceeds {}: {:?}", len, max, chunk);
            prop_assert!(len >= min, "chunk of {} chars below {}: {:?}", len, min, chunk);
            prop_assert!(len > 0);
        }
    }

    #[test]
    fn prop_next_chunk_starts_with_tail(
        text in text_strategy(),
        overlap in 0usize..30,
        extra in 3usize..120,
    ) {
        let max = overlap + extra;
        let config = ChunkConfig::new(max, overlap, 1).unwrap();
        let chunks = SentenceChunker::new(config).chunk(&text);

        for pair in chunks.windows(2) {
            let tail = char_tail(&pair[0], overlap);
            prop_assert!(
                pair[1].starts_with(tail.trim_start()),
                "{:?} does not start with tail {:?} of {:?}",
                pair[1],
                tail,
                pair[0]
            );
        }
    }

    #[test]
    fn prop_chunking_invents_no_characters(text in text_strategy(), (max, overlap, min) in config_strategy()) {
        let config = ChunkConfig::new(max, overlap, min).unwrap();
        let source: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();

        for chunk in SentenceChunker::new(config).chunk(&text) {
            prop_assert!(
                is_subsequence(chunk.chars().filter(|c| !c.is_whitespace()), &source),
                "chunk {:?} is not drawn from the input",
                chunk
            );
        }
    }

    #[test]
    fn prop_chunking_is_deterministic(text in text_strategy()) {
        let chunker = SentenceChunker::new(ChunkConfig::new(80, 15, 10).unwrap());
        prop_assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
    }

    #[test]
    fn prop_normalize_is_idempotent(text in arabic_noise_strategy()) {
        let config = NormalizationConfig::all();
        let once = normalize(&text, &config);
        prop_assert_eq!(normalize(&once, &config), once.clone());
    }

    #[test]
    fn prop_normalize_never_grows(text in arabic_noise_strategy()) {
        let out = normalize(&text, &NormalizationConfig::all());
        prop_assert!(out.chars().count() <= text.chars().count());
    }

    #[test]
    fn prop_appending_table_rows_keeps_tables(prefix in text_strategy(), rows in 0usize..10) {
        let mut text = format!("{prefix}\n| a | b |");
        prop_assert!(detect_structure(&text).has_tables);
        for i in 0..rows {
            text.push_str(&format!("\n| {i} | {i} |"));
            prop_assert!(detect_structure(&text).has_tables);
        }
    }

    #[test]
    fn prop_structured_chunk_index_is_global(text in text_strategy()) {
        let structure = detect_structure(&text);
        let chunker = StructuredChunker::new(ChunkConfig::new(120, 20, 5).unwrap(), StructureOptions::default());
        let chunks = chunker.chunk(&text, &Metadata::new(), &structure);
        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.chunk_index(), Some(i));
        }
    }

    #[test]
    fn prop_segmenter_chunks_within_bounds(
        text in document_strategy(),
        (max, overlap, min) in config_strategy(),
        gate_mode in gate_mode_strategy(),
    ) {
        let result = segmenter(max, overlap, min, gate_mode).segment_text(&text);
        for chunk in &result.chunks {
            let len = chunk.char_len();
            prop_assert!(len > 0, "empty chunk");
            prop_assert!(len <= max, "chunk of {} chars exceeds {}: {:?}", len, max, chunk.text);
            prop_assert!(len >= min, "chunk of {} chars below {}: {:?}", len, min, chunk.text);
        }
    }

    #[test]
    fn prop_segmenter_arabic_noise_never_yields_short_chunks(
        text in arabic_noise_strategy(),
        gate_mode in gate_mode_strategy(),
    ) {
        let result = segmenter(40, 5, 10, gate_mode).segment_text(&text);
        for chunk in &result.chunks {
            let len = chunk.char_len();
            prop_assert!((10..=40).contains(&len), "bad length {}: {:?}", len, chunk.text);
        }
    }

    #[test]
    fn prop_segmenter_chunk_index_is_contiguous(
        text in document_strategy(),
        gate_mode in gate_mode_strategy(),
    ) {
        let result = segmenter(60, 10, 15, gate_mode).segment_text(&text);
        let total = result.chunks.len();
        for (i, chunk) in result.chunks.iter().enumerate() {
            prop_assert_eq!(chunk.chunk_index(), Some(i));
            prop_assert_eq!(
                chunk.metadata.get("total_chunks").and_then(|v| v.as_u64()),
                Some(total as u64)
            );
        }
    }
}
