//! Shared line-scanning helpers for text-based analyzers.

/// A line of text with its byte offset in the document.
pub(crate) struct LineSpan<'a> {
    /// Line content without the trailing newline.
    pub content: &'a str,
    /// Byte offset of the line start.
    pub offset: usize,
    /// 1-indexed line number.
    pub number: usize,
}

/// Iterates lines with byte offsets, splitting on `\n` only.
///
/// A trailing `\r` stays part of the line content so that CRLF documents
/// keep their line endings through span-based edits.
pub(crate) fn lines_with_offsets(text: &str) -> impl Iterator<Item = LineSpan<'_>> {
    let mut offset = 0;
    text.split('\n').enumerate().map(move |(i, raw)| {
        let span = LineSpan {
            content: raw,
            offset,
            number: i + 1,
        };
        offset += raw.len() + 1;
        span
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_account_for_newlines() {
        let spans: Vec<_> = lines_with_offsets("ab\ncd\n").collect();
        assert_eq!(spans.len(), 3); // "ab", "cd", ""
        assert_eq!(spans[0].offset, 0);
        assert_eq!(spans[1].offset, 3);
        assert_eq!(spans[1].number, 2);
        assert_eq!(spans[2].content, "");
    }

    #[test]
    fn crlf_stays_in_content() {
        let spans: Vec<_> = lines_with_offsets("ab\r\ncd").collect();
        assert_eq!(spans[0].content, "ab\r");
        assert_eq!(spans[1].offset, 4);
    }
}
