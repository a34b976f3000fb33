/// Split article text into consecutive character-bounded chunks.
///
/// Boundaries are purely positional: every chunk except possibly the last
/// holds exactly `max_size` characters, in document order, with no overlap
/// and no gaps. Splitting mid-sentence is accepted on purpose; each chunk is
/// summarized independently, never reassembled verbatim, and positional
/// boundaries guarantee termination and bounded request size for any input.
///
/// An empty body yields no chunks. `max_size` is clamped to at least 1.
pub fn chunk_text(body: &str, max_size: usize) -> Vec<String> {
    let max_size = max_size.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in body.chars() {
        current.push(ch);
        count += 1;
        if count == max_size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
