pub const RECORD_SIZE: usize = 3;

pub const CATEGORY_OFFSET: usize = 0;
pub const COUNT_OFFSET: usize = 1;
pub const INDEX_OFFSET: usize = 2;

pub const END_OF_POEM: u8 = 0x00;
pub const CATEGORY_VERB: u8 = 0x01;
pub const CATEGORY_NOUN: u8 = 0x02;
pub const CATEGORY_ADJECTIVE: u8 = 0x03;

pub const WORD_SEPARATOR: &str = ", ";
pub const LINE_SEPARATOR: char = '\n';

/// A poem must carry at least one full record.
pub const MIN_LEN: usize = RECORD_SIZE;
