// Sentence and word tokenization.
//
// Words come from Unicode UAX #29 word boundaries (`unicode-segmentation`),
// whitespace segments dropped, followed by two merge passes that bring the
// output closer to a conventional word tokenizer:
// - contiguous runs of one punctuation character become one token
//   ("--", "...", "!!"), so they can be excluded as a unit. A run is
//   excluded when it is listed itself or when its repeated character is
//   listed, so "!!" and "...." go wherever "!" and "." go;
// - a hyphen glued between two word tokens joins them ("peut-être").
// Apostrophes between letters already stay inside the word under UAX #29
// ("d'une", "l’homme").
//
// Tokenization is a pure function of the input string. Inventories, the
// single-word mutation rules and the scorer all rely on getting the same
// tokens for the same sentence.
//
// Sentence splitting normalizes line breaks first: a hyphen at the end of a
// line is a word wrapped across lines and is removed along with the break;
// remaining newlines become spaces.

use unicode_segmentation::UnicodeSegmentation;

/// Punctuation tokens that are never counted as words.
pub const DEFAULT_EXCLUDED: &[&str] = &[
    ",", ".", ";", ":", "!", "?", "--", "(", ")", "\"", "«", "»", "“", "”", "'", "’", "...", "…",
    "-",
];

/// A token and its byte range in the source sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Tokenize `sentence`, dropping tokens that match an entry of `exclude`
/// or repeat a single excluded character. With `None`, punctuation tokens
/// are kept.
pub fn word_spans<'a>(sentence: &'a str, exclude: Option<&[&str]>) -> Vec<WordSpan<'a>> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for (start, segment) in sentence.split_word_bound_indices() {
        if segment.chars().all(char::is_whitespace) {
            continue;
        }
        let end = start + segment.len();
        if let Some(last) = runs.last_mut()
            && last.1 == start
            && extends_punctuation_run(&sentence[last.0..last.1], segment)
        {
            last.1 = end;
            continue;
        }
        runs.push((start, end));
    }

    let mut tokens: Vec<(usize, usize)> = Vec::with_capacity(runs.len());
    let mut i = 0;
    while i < runs.len() {
        let (start, end) = runs[i];
        let token = &sentence[start..end];
        if token == "-"
            && let (Some(prev), Some(&(next_start, next_end))) =
                (tokens.last_mut(), runs.get(i + 1))
            && prev.1 == start
            && next_start == end
            && is_wordlike(&sentence[prev.0..prev.1])
            && is_wordlike(&sentence[next_start..next_end])
        {
            prev.1 = next_end;
            i += 2;
            continue;
        }
        tokens.push((start, end));
        i += 1;
    }

    tokens
        .into_iter()
        .map(|(start, end)| WordSpan {
            start,
            end,
            text: &sentence[start..end],
        })
        .filter(|span| exclude.is_none_or(|ex| !is_excluded(span.text, ex)))
        .collect()
}

/// `token` is listed in `exclude`, or is a run of one listed character.
fn is_excluded(token: &str, exclude: &[&str]) -> bool {
    if exclude.contains(&token) {
        return true;
    }
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if chars.all(|r| r == c) => {
            let mut buf = [0u8; 4];
            let single: &str = c.encode_utf8(&mut buf);
            exclude.contains(&single)
        }
        _ => false,
    }
}

/// The word tokens of `sentence`, in order.
pub fn words_of<'a>(sentence: &'a str, exclude: Option<&[&str]>) -> Vec<&'a str> {
    word_spans(sentence, exclude)
        .into_iter()
        .map(|span| span.text)
        .collect()
}

/// Whether a token contains anything other than punctuation.
pub fn is_wordlike(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

/// `segment` is one punctuation character and `run` consists only of it.
fn extends_punctuation_run(run: &str, segment: &str) -> bool {
    let mut chars = segment.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_alphanumeric() && !c.is_whitespace() => {
            run.chars().all(|r| r == c)
        }
        _ => false,
    }
}

/// Split one text into trimmed, non-empty sentences.
pub fn sentences_from_text(text: &str) -> Vec<String> {
    let normalized = text
        .replace("-\r\n", "")
        .replace("-\n", "")
        .replace("\r\n", " ")
        .replace('\n', " ");
    normalized
        .unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split several texts into sentences, keeping source order.
pub fn sentences_from_texts<I, S>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .flat_map(|text| sentences_from_text(text.as_ref()))
        .collect()
}
