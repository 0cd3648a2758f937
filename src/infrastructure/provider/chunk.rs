/// Splits oversized text along structural boundaries before it reaches a
/// provider: paragraphs first, then sentences, never mid-sentence when a
/// sentence boundary exists. Providers translate one chunk per call.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if text.len() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        if current.len() + paragraph.len() < max_chars {
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(paragraph);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        if paragraph.len() < max_chars {
            current.push_str(paragraph);
        } else {
            split_sentences(paragraph, max_chars, &mut chunks, &mut current);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn split_sentences(paragraph: &str, max_chars: usize, chunks: &mut Vec<String>, current: &mut String) {
    for sentence in sentence_spans(paragraph) {
        if !current.is_empty() && current.len() + sentence.len() >= max_chars {
            chunks.push(std::mem::take(current));
        }
        if sentence.len() >= max_chars {
            // A single sentence beyond the limit cannot be kept whole.
            let mut rest = sentence;
            while rest.len() > max_chars {
                let mut cut = max_chars;
                while !rest.is_char_boundary(cut) {
                    cut -= 1;
                }
                let (head, tail) = rest.split_at(cut);
                chunks.push(head.to_string());
                rest = tail;
            }
            chunks.push(rest.to_string());
        } else {
            current.push_str(sentence);
        }
    }
}

/// Yields sentence-sized spans, each ending just after `.`, `!` or `?`
/// followed by whitespace (the whitespace stays with the sentence).
fn sentence_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') {
            let mut end = i + 1;
            while end < bytes.len() && bytes[end].is_ascii_whitespace() {
                end += 1;
            }
            if end > i + 1 || end == bytes.len() {
                spans.push(&text[start..end]);
                start = end;
                i = end;
                continue;
            }
        }
        i += 1;
    }

    if start < text.len() {
        spans.push(&text[start..]);
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_chunk() {
        assert_eq!(chunk_text("hello world", 100), vec!["hello world"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 100).is_empty());
    }

    #[test]
    fn splits_on_paragraph_boundaries_first() {
        let text = format!("{}\n\n{}", "a".repeat(60), "b".repeat(60));
        let chunks = chunk_text(&text, 100);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].chars().all(|c| c == 'a'));
        assert!(chunks[1].chars().all(|c| c == 'b'));
    }

    #[test]
    fn never_splits_mid_sentence_when_avoidable() {
        let text = "First sentence here. Second sentence follows. Third one closes.";
        let chunks = chunk_text(text, 45);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            let trimmed = chunk.trim_end();
            assert!(
                trimmed.ends_with('.') || trimmed.ends_with('!') || trimmed.ends_with('?'),
                "chunk broke mid-sentence: {chunk:?}"
            );
        }
    }

    #[test]
    fn reassembled_sentences_cover_the_input() {
        let text = "One. Two! Three? Four.";
        let joined: String = sentence_spans(text).concat();
        assert_eq!(joined, text);
    }
}
