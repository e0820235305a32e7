//! Size limits for values and property formats.

/// Maximum number of bytes a value can hold.
pub const MAX_VALUE_LEN: usize = u8::MAX as usize;

/// Values up to this many bytes are stored inline, without a heap allocation.
pub const INLINE_CAPACITY: usize = 4;

/// Maximum length of a String-format value.
pub const MAX_STRING_LEN: usize = 192;

/// Maximum length of a BitSet-format value.
pub const MAX_BITSET_LEN: usize = 4;

/// Maximum length of a Numeric-format value.
pub const MAX_NUMERIC_LEN: usize = 4;

/// Exact length of a Boolean-format value.
pub const BOOL_LEN: usize = 1;

/// Boolean false byte.
pub const BOOL_FALSE: u8 = 0x00;

/// Boolean true byte.
pub const BOOL_TRUE: u8 = 0x01;
