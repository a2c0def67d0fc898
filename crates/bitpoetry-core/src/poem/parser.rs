use super::error::PoemError;
use super::layout;
use super::reader::RecordReader;
use crate::vocabulary::{Category, Vocabulary};

/// Validated record fields before vocabulary lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub category: Category,
    pub count: u8,
    pub index: u8,
}

/// One decoded record together with its rendered text.
#[derive(Debug, Clone)]
pub struct DecodedLine {
    pub record: Record,
    pub word: &'static str,
    pub text: String,
}

/// Parse one 3-byte record without touching the vocabulary.
///
/// The slice must be exactly 3 bytes and the category
/// byte must name a real category; the end-of-poem sentinel never reaches
/// this function through the stream walker, so a `0x00` here is rejected
/// like any other unknown value.
pub fn parse_record(record: &[u8]) -> Result<Record, PoemError> {
    let reader = RecordReader::new(record);
    reader.require_record_len()?;

    let category = Category::from_wire(reader.category_byte()?)?;
    let count = reader.count()?;
    let index = reader.index()?;

    Ok(Record {
        category,
        count,
        index,
    })
}

/// Decode one record into its rendered line.
///
/// A count of zero is valid and renders an empty line. Pure function of its
/// input; no I/O.
pub fn decode_record(record: &[u8], vocabulary: &Vocabulary) -> Result<String, PoemError> {
    let line = decode_record_line(record, vocabulary)?;
    Ok(line.text)
}

fn decode_record_line(record: &[u8], vocabulary: &Vocabulary) -> Result<DecodedLine, PoemError> {
    let record = parse_record(record)?;
    let word = vocabulary.word(record.category, record.index)?;
    let text = vec![word; usize::from(record.count)].join(layout::WORD_SEPARATOR);
    Ok(DecodedLine { record, word, text })
}

/// Decode a full poem into its lines, in stream order.
///
/// The walk advances 3 bytes at a time and stops as soon as fewer than 3
/// unconsumed bytes remain. The trailing `0x00` end marker is therefore
/// never reached as the start of a record and its value is not inspected;
/// leftover bytes after the last full record are ignored. This matches the
/// framing of existing encoded poems (see DESIGN.md).
///
/// The first record that fails to decode aborts the whole parse; lines are
/// collected locally so no partial output escapes on error.
pub fn decode_poem_lines(
    poem: &[u8],
    vocabulary: &Vocabulary,
) -> Result<Vec<DecodedLine>, PoemError> {
    if poem.len() < layout::MIN_LEN {
        return Err(PoemError::InvalidStreamSize {
            needed: layout::MIN_LEN,
            actual: poem.len(),
        });
    }

    let mut lines = Vec::new();
    let mut cursor = 0;
    while cursor + layout::RECORD_SIZE <= poem.len() {
        let record = &poem[cursor..cursor + layout::RECORD_SIZE];
        lines.push(decode_record_line(record, vocabulary)?);
        cursor += layout::RECORD_SIZE;
    }

    Ok(lines)
}

/// Decode a full poem into rendered text, one line per record with a
/// trailing newline after the final line.
pub fn decode_poem(poem: &[u8], vocabulary: &Vocabulary) -> Result<String, PoemError> {
    let lines = decode_poem_lines(poem, vocabulary)?;
    let mut text = String::new();
    for line in &lines {
        text.push_str(&line.text);
        text.push(layout::LINE_SEPARATOR);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::{decode_poem, decode_record, parse_record};
    use crate::poem::error::PoemError;
    use crate::poem::layout;
    use crate::vocabulary::{Category, Vocabulary};

    #[test]
    fn parse_valid_record() {
        let record = parse_record(&[0x02, 0x05, 0x01]).unwrap();
        assert_eq!(record.category, Category::Noun);
        assert_eq!(record.count, 5);
        assert_eq!(record.index, 1);
    }

    #[test]
    fn record_rejects_sentinel_category() {
        let err = parse_record(&[layout::END_OF_POEM, 0x01, 0x00]).unwrap_err();
        assert!(matches!(err, PoemError::InvalidCategory { value: 0x00 }));
    }

    #[test]
    fn record_rejects_unknown_category() {
        let err = parse_record(&[0x04, 0x01, 0x00]).unwrap_err();
        assert!(matches!(err, PoemError::InvalidCategory { value: 0x04 }));
    }

    #[test]
    fn record_rejects_wrong_sizes() {
        for record in [&[][..], &[0x01][..], &[0x01, 0x01][..], &[0x01; 4][..]] {
            let err = parse_record(record).unwrap_err();
            assert!(matches!(err, PoemError::InvalidRecordSize { .. }));
        }
    }

    #[test]
    fn decode_record_repeats_and_joins() {
        let vocabulary = Vocabulary::reference();
        let line = decode_record(&[0x01, 0x03, 0x00], &vocabulary).unwrap();
        assert_eq!(line, "jump, jump, jump");
        assert!(!line.ends_with(", "));
    }

    #[test]
    fn decode_record_count_zero_is_empty() {
        let vocabulary = Vocabulary::reference();
        let line = decode_record(&[0x03, 0x00, 0x02], &vocabulary).unwrap();
        assert_eq!(line, "");
    }

    #[test]
    fn decode_record_index_boundary() {
        let vocabulary = Vocabulary::reference();
        let last = decode_record(&[0x02, 0x01, 0x02], &vocabulary).unwrap();
        assert_eq!(last, "taco");

        let err = decode_record(&[0x02, 0x01, 0x03], &vocabulary).unwrap_err();
        assert!(matches!(
            err,
            PoemError::IndexOutOfRange { index: 3, len: 3 }
        ));
    }

    #[test]
    fn poem_rejects_short_streams() {
        let vocabulary = Vocabulary::reference();
        for poem in [&[][..], &[0x00][..], &[0x01, 0x02][..]] {
            let err = decode_poem(poem, &vocabulary).unwrap_err();
            assert!(matches!(err, PoemError::InvalidStreamSize { .. }));
        }
    }

    #[test]
    fn poem_single_record() {
        let vocabulary = Vocabulary::reference();
        let text = decode_poem(&[0x01, 0x03, 0x00], &vocabulary).unwrap();
        assert_eq!(text, "jump, jump, jump\n");
    }

    #[test]
    fn poem_single_noun() {
        let vocabulary = Vocabulary::reference();
        let text = decode_poem(&[0x02, 0x01, 0x01], &vocabulary).unwrap();
        assert_eq!(text, "bear\n");
    }

    #[test]
    fn poem_two_records() {
        let vocabulary = Vocabulary::reference();
        let text = decode_poem(&[0x03, 0x02, 0x02, 0x01, 0x01, 0x00], &vocabulary).unwrap();
        assert_eq!(text, "smelly, smelly\njump\n");
    }

    #[test]
    fn poem_error_discards_partial_output() {
        let vocabulary = Vocabulary::reference();
        let err = decode_poem(&[0x01, 0x01, 0x00, 0x04, 0x01, 0x00], &vocabulary).unwrap_err();
        assert!(matches!(err, PoemError::InvalidCategory { value: 0x04 }));
    }

    #[test]
    fn poem_is_deterministic() {
        let vocabulary = Vocabulary::reference();
        let poem = [0x01, 0x02, 0x01, 0x02, 0x03, 0x02, 0x00];
        let first = decode_poem(&poem, &vocabulary).unwrap();
        let second = decode_poem(&poem, &vocabulary).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "dance, dance\ntaco, taco, taco\n");
    }

    #[test]
    fn poem_ignores_trailing_bytes_past_last_full_record() {
        let vocabulary = Vocabulary::reference();
        // The final 0x00 marker and any leftover bytes before it never start
        // a new record once fewer than 3 bytes remain.
        let poem = [
            0x01, 0xA0, 0x00, // "jump" x160
            0x03, 0x02, 0x02, // "smelly, smelly"
            0x02, 0x01, 0x00, 0x00,
        ];
        let text = decode_poem(&poem, &vocabulary).unwrap();
        let lines: Vec<&str> = text.trim_end_matches('\n').split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec!["jump"; 160].join(", "));
        assert_eq!(lines[1], "smelly, smelly");
        assert_eq!(lines[2], "fish");
    }
}
