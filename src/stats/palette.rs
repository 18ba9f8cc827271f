use std::num::NonZeroUsize;

/// Destination colours, indexed by [`bucket_for`].
pub const PALETTE: [&str; 7] = [
    "#3498db", "#e74c3c", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#34495e",
];

/// Stable bucket for a destination: a 32-bit `h * 31 + unit` rolling hash
/// over the UTF-16 code units, folded to `|h| % palette_size`.
pub fn bucket_for(destination: &str, palette_size: NonZeroUsize) -> usize {
    let hash = destination
        .encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(i32::from(unit)));
    hash.unsigned_abs() as usize % palette_size.get()
}

pub fn color_for(destination: &str) -> &'static str {
    let size = NonZeroUsize::new(PALETTE.len()).unwrap_or(NonZeroUsize::MIN);
    PALETTE[bucket_for(destination, size)]
}
