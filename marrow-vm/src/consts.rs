//! Machine parameters.

use marrow_types::WORD_SIZE;

#[doc(no_inline)]
pub use marrow_types::REGISTER_COUNT;

/// Size of one register, in bytes.
pub const REGISTER_SIZE: usize = WORD_SIZE;

/// Total size of the register file, in bytes.
pub const REGISTER_FILE_SIZE: usize = REGISTER_SIZE * REGISTER_COUNT;

/// Size of one dump section, in bytes.
pub const SECTION_SIZE: usize = 0x100;

/// Number of dump sections in the heap.
pub const SECTION_COUNT: usize = 0x100;

/// Size of the byte-addressed heap.
pub const HEAP_SIZE: usize = SECTION_SIZE * SECTION_COUNT;

/// Size of the stack memory used by `Push` and `Pop`; the stack grows
/// downward from the top.
pub const STACK_SIZE: usize = 0x10000;
