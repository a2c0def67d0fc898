use super::error::PoemError;
use super::layout;

/// Safe byte access over one candidate 3-byte record.
pub struct RecordReader<'a> {
    record: &'a [u8],
}

impl<'a> RecordReader<'a> {
    pub fn new(record: &'a [u8]) -> Self {
        Self { record }
    }

    /// The record decoder validates framing independently of the stream
    /// walker, which already slices exact record lengths.
    pub fn require_record_len(&self) -> Result<(), PoemError> {
        if self.record.len() != layout::RECORD_SIZE {
            return Err(PoemError::InvalidRecordSize {
                needed: layout::RECORD_SIZE,
                actual: self.record.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, PoemError> {
        self.record
            .get(offset)
            .copied()
            .ok_or(PoemError::InvalidRecordSize {
                needed: layout::RECORD_SIZE,
                actual: self.record.len(),
            })
    }

    pub fn category_byte(&self) -> Result<u8, PoemError> {
        self.read_u8(layout::CATEGORY_OFFSET)
    }

    pub fn count(&self) -> Result<u8, PoemError> {
        self.read_u8(layout::COUNT_OFFSET)
    }

    pub fn index(&self) -> Result<u8, PoemError> {
        self.read_u8(layout::INDEX_OFFSET)
    }
}
