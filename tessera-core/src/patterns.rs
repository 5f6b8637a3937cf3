//! Compiled pattern set shared by the cleaner, the structure detector and
//! the document gate
//!
//! Patterns are compiled once per process on first use and only read
//! afterwards, so components can hold a `&'static Patterns` and stay
//! stateless with respect to the documents they process.

use regex::Regex;
use std::sync::OnceLock;

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Western, Arabic-Indic and extended Arabic-Indic digits
const DIGIT: &str = r"[0-9\x{0660}-\x{0669}\x{06F0}-\x{06F9}]";

/// Characters that end a sentence for header detection
pub const HEADER_TERMINATORS: [char; 4] = ['.', '!', '?', '\u{061F}'];

/// Compiled patterns
#[derive(Debug)]
pub struct Patterns {
    /// Whole trimmed line is a page marker
    pub page_marker: Regex,
    /// Standalone horizontal rule line
    pub horizontal_rule: Regex,
    /// Copyright footer line
    pub copyright: Regex,
    /// Line holding only a URL
    pub bare_url: Regex,
    /// Runs of 3+ spaces
    pub space_run: Regex,
    /// Runs of 4+ newlines
    pub newline_run: Regex,
    /// Zero-width and bidi control characters
    pub invisible: Regex,
    /// C0 controls except tab and newline, plus DEL
    pub control: Regex,

    /// Line containing two or more pipes
    pub table_pipes: Regex,
    /// Run of 3+ dash or box-drawing characters
    pub table_rule: Regex,
    /// Line containing two or more tabs
    pub table_tabs: Regex,
    /// Line opening with a bullet, numbered or lettered list marker
    pub list_marker: Regex,

    /// Gate indicator: line holding only a western number
    pub gate_page_number: Regex,
    /// Gate indicator: localized page marker
    pub gate_localized_page: Regex,
    /// Gate indicator: pipe-delimited row
    pub gate_table_pipe: Regex,
    /// Gate indicator: 3+ consecutive blank lines
    pub gate_blank_run: Regex,
}

impl Patterns {
    /// Get the process-wide compiled pattern set
    pub fn get() -> &'static Patterns {
        PATTERNS.get_or_init(Patterns::compile)
    }

    fn compile() -> Patterns {
        let page_marker = format!(
            r"(?i)^(?:{d}+|[-\x{{2013}}\x{{2014}}]\s*{d}+\s*[-\x{{2013}}\x{{2014}}]|(?:page|pg\.?|p\.)\s*{d}+(?:\s*(?:of|/|\x{{0645}}\x{{0646}})\s*{d}+)?|(?:\x{{0627}}\x{{0644}})?\x{{0635}}\x{{0641}}\x{{062D}}\x{{0629}}\s*{d}+(?:\s*(?:\x{{0645}}\x{{0646}}|/)\s*{d}+)?|\x{{0635}}\.?\s*{d}+|{d}+\s*/\s*{d}+)$",
            d = DIGIT
        );

        Patterns {
            page_marker: compile(&page_marker),
            horizontal_rule: compile(r"(?m)^[ \t]*[-_=*~]{5,}[ \t]*$"),
            copyright: compile(
                r"(?im)^[ \t]*(?:\x{00A9}|\(c\)|copyright\b|all rights reserved|\x{062C}\x{0645}\x{064A}\x{0639} \x{0627}\x{0644}\x{062D}\x{0642}\x{0648}\x{0642} \x{0645}\x{062D}\x{0641}\x{0648}\x{0638}\x{0629}).*$",
            ),
            bare_url: compile(r"(?im)^[ \t]*(?:https?://|www\.)\S+[ \t]*$"),
            space_run: compile(r" {3,}"),
            newline_run: compile(r"\n{4,}"),
            invisible: compile(r"[\x{200B}-\x{200F}\x{202A}-\x{202E}\x{2060}-\x{2064}\x{FEFF}\x{00AD}]"),
            control: compile(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]"),

            table_pipes: compile(r"(?m)^[^\n]*\|[^\n]*\|"),
            table_rule: compile(r"[-\x{2500}-\x{257F}]{3,}"),
            table_tabs: compile(r"(?m)^[^\n]*\t[^\n]*\t"),
            list_marker: compile(
                r"^\s*(?:[-\x{2022}\x{25CF}\x{25CB}\x{25E6}\x{25AA}\x{25AB}\x{25A0}\x{25A1}*\x{2013}+]\s+|[0-9]{1,3}[.)]\s+|[\x{0660}-\x{0669}\x{06F0}-\x{06F9}]{1,3}[.)\-]\s*|[\x{0621}-\x{064A}][.)\-]\s+)\S",
            ),

            gate_page_number: compile(r"(?m)^[ \t]*[0-9]+[ \t]*$"),
            gate_localized_page: compile(
                r"(?m)^[ \t]*(?:(?:\x{0627}\x{0644})?\x{0635}\x{0641}\x{062D}\x{0629}[ \t]*[0-9\x{0660}-\x{0669}]+|[\x{0660}-\x{0669}]+)[ \t]*$",
            ),
            gate_table_pipe: compile(r"\|[^\n]*\|"),
            gate_blank_run: compile(r"\n[ \t]*\n[ \t]*\n[ \t]*\n"),
        }
    }

    /// Whether a single line is a table row or rule
    pub fn is_table_line(&self, line: &str) -> bool {
        line.matches('|').count() >= 2
            || line.matches('\t').count() >= 2
            || self.is_rule_line(line)
    }

    /// Whether a line consists only of dash, box-drawing and separator glyphs
    pub fn is_rule_line(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.chars().count() >= 3
            && self.table_rule.is_match(trimmed)
            && trimmed
                .chars()
                .all(|c| matches!(c, '-' | '+' | ':' | '|' | ' ' | '=' | '\u{2500}'..='\u{257F}'))
    }

    /// Whether a single line opens with a list marker
    pub fn is_list_line(&self, line: &str) -> bool {
        self.list_marker.is_match(line)
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("built-in pattern failed to compile: {e}"))
}
