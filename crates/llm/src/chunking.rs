use textconvert_common::{ConverterError, Result};

/// Blank line between paragraphs
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Text chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text
    pub text: String,

    /// Zero-based position in the chunk sequence
    pub index: usize,

    /// Number of chunks the document was split into
    pub total: usize,
}

impl TextChunk {
    /// One-based ordinal, as used in prompts and logs
    pub fn ordinal(&self) -> usize {
        self.index + 1
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Paragraph-aware splitter with a character budget
///
/// Lengths are counted in `char`s. Every emitted chunk is at most
/// `max_chars` long unless it consists of a single word longer than that.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    max_chars: usize,
}

impl Chunker {
    /// Create new chunker
    pub fn new(max_chars: usize) -> Result<Self> {
        if max_chars == 0 {
            return Err(ConverterError::invalid_input("Chunk size must be positive"));
        }
        Ok(Self { max_chars })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Split text into ordered, tagged chunks
    pub fn split(&self, text: &str) -> Vec<TextChunk> {
        let pieces = self.split_text(text);
        let total = pieces.len();

        pieces
            .into_iter()
            .enumerate()
            .map(|(index, text)| TextChunk { text, index, total })
            .collect()
    }

    /// Split text into chunk strings
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let mut chunks = ChunkSink::default();
        let mut buffer = Buffer::default();

        for para in text.split(PARAGRAPH_SEPARATOR) {
            let para_len = para.chars().count();

            if buffer.len + para_len + PARAGRAPH_SEPARATOR.len() <= self.max_chars {
                buffer.push_paragraph(para, para_len);
                continue;
            }

            chunks.push(buffer.take());

            if para_len > self.max_chars {
                // Emits every full word run; the tail stays open for the next paragraph
                let tail = self.split_words(para, &mut chunks);
                if !tail.is_empty() {
                    buffer.push_paragraph(&tail, tail.chars().count());
                }
            } else {
                buffer.push_paragraph(para, para_len);
            }
        }

        chunks.push(buffer.take());
        chunks.into_inner()
    }

    /// Greedily pack whitespace-delimited words, returning the unfinished run
    fn split_words(&self, para: &str, chunks: &mut ChunkSink) -> String {
        let mut current = String::new();
        let mut current_len = 0;

        for word in para.split_whitespace() {
            let word_len = word.chars().count();

            if current_len + word_len + 1 > self.max_chars {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            current.push_str(word);
            current.push(' ');
            current_len += word_len + 1;
        }

        current.trim_end().to_string()
    }
}

/// Running buffer of whole paragraphs, each followed by a separator
#[derive(Default)]
struct Buffer {
    text: String,
    len: usize,
}

impl Buffer {
    fn push_paragraph(&mut self, para: &str, para_len: usize) {
        self.text.push_str(para);
        self.text.push_str(PARAGRAPH_SEPARATOR);
        self.len += para_len + PARAGRAPH_SEPARATOR.len();
    }

    fn take(&mut self) -> String {
        self.len = 0;
        std::mem::take(&mut self.text)
    }
}

/// Collects trimmed chunks, skipping blank ones
#[derive(Default)]
struct ChunkSink(Vec<String>);

impl ChunkSink {
    fn push(&mut self, raw: String) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            self.0.push(trimmed.to_string());
        }
    }

    fn into_inner(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str, max: usize) -> Vec<String> {
        Chunker::new(max).unwrap().split_text(text)
    }

    #[test]
    fn test_zero_budget_rejected() {
        assert!(Chunker::new(0).is_err());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = split("Para one.\n\nPara two.", 1000);
        assert_eq!(chunks, vec!["Para one.\n\nPara two."]);
    }

    #[test]
    fn test_two_large_paragraphs() {
        let a = "a".repeat(600);
        let b = "b".repeat(600);
        let chunks = split(&format!("{}\n\n{}", a, b), 1000);
        assert_eq!(chunks, vec![a, b]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(split("", 100).is_empty());
        assert!(split("\n\n   \n\n", 100).is_empty());
        assert!(Chunker::new(10).unwrap().split("").is_empty());
    }

    #[test]
    fn test_greedy_packing() {
        // 3 + 2 + 3 + 2 = 10: the first two paragraphs fit, the third does not
        let chunks = split("aaa\n\nbbb\n\nccc", 10);
        assert_eq!(chunks, vec!["aaa\n\nbbb", "ccc"]);
    }

    #[test]
    fn test_oversized_paragraph_split_by_words() {
        let para = "one two three four five six seven eight nine ten";
        let chunks = split(para, 15);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 15, "chunk too long: {:?}", chunk);
        }
        assert_eq!(chunks.join(" "), para);
    }

    #[test]
    fn test_single_long_word_emitted_whole() {
        let word = "x".repeat(50);
        let chunks = split(&format!("short\n\n{}", word), 20);
        assert_eq!(chunks, vec!["short".to_string(), word]);
    }

    #[test]
    fn test_word_tail_separated_from_next_paragraph() {
        let chunks = split("alpha beta gamma\n\nend", 12);
        assert_eq!(chunks, vec!["alpha beta", "gamma\n\nend"]);
    }

    #[test]
    fn test_budget_counts_characters_not_bytes() {
        let para = "é".repeat(8);
        let chunks = split(&format!("{}\n\n{}", para, para), 20);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_chunks_within_budget_and_lossless() {
        let text = (0..40)
            .map(|i| format!("Paragraph {} has some words in it for testing.", i))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunks = split(&text, 200);

        for chunk in &chunks {
            assert!(chunk.chars().count() <= 200);
        }
        assert_eq!(chunks.join("\n\n"), text);
    }

    #[test]
    fn test_no_chunk_could_absorb_the_next() {
        let text = (0..30)
            .map(|i| "w".repeat(10 + (i * 7) % 40))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunks = split(&text, 120);

        for pair in chunks.windows(2) {
            let first_para_of_next = pair[1].split("\n\n").next().unwrap();
            let combined = pair[0].chars().count() + 2 + first_para_of_next.chars().count() + 2;
            assert!(combined > 120);
        }
    }

    #[test]
    fn test_split_tags_positions() {
        let chunker = Chunker::new(5).unwrap();
        let chunks = chunker.split("aaa\n\nbbb\n\nccc");
        assert_eq!(chunks.len(), 3);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
            assert_eq!(chunk.total, 3);
        }
        assert_eq!(chunks[1].ordinal(), 2);
        assert!(chunks[2].is_last());
    }
}
