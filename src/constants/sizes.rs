// Generic sizes, all in bits unless suffixed with _SZ (bytes)
pub const BIT: usize = 1;
pub const NIBBLE_BITS: usize = 4 * BIT;
pub const BYTE_BITS: usize = 8 * BIT;
pub const KB: usize = 128 * BYTE_BITS;
pub const MB: usize = 1024 * KB;

// 32-bit sizes
pub const WORD32_SZ: usize = 2;
pub const WORD32_BITS: usize = BYTE_BITS * WORD32_SZ;

pub const DWORD32_SZ: usize = 2 * WORD32_SZ;
pub const DWORD32_BITS: usize = BYTE_BITS * DWORD32_SZ;

pub const QWORD32_SZ: usize = 2 * DWORD32_SZ;
pub const QWORD32_BITS: usize = BYTE_BITS * QWORD32_SZ;

pub const PTR32_BITS: usize = DWORD32_BITS;

// 64-bit sizes
pub const WORD64_SZ: usize = 4;
pub const WORD64_BITS: usize = BYTE_BITS * WORD64_SZ;

pub const DWORD64_SZ: usize = 2 * WORD64_SZ;
pub const DWORD64_BITS: usize = BYTE_BITS * DWORD64_SZ;

pub const PTR64_BITS: usize = DWORD64_BITS;

pub const QWORD64_SZ: usize = 2 * DWORD64_SZ;
pub const QWORD64_BITS: usize = BYTE_BITS * QWORD64_SZ;

// Data source
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Convert a byte offset into a bit offset, `None` on overflow.
pub fn bytes_to_bits(bytes: usize) -> Option<usize> {
    bytes.checked_mul(BYTE_BITS)
}

/// Byte containing the given bit offset.
pub fn bits_to_bytes(bits: usize) -> usize {
    bits / BYTE_BITS
}
