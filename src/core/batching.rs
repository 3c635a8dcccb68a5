/// Destinations per matrix request
pub const DEFAULT_CHUNK_SIZE: usize = 40;

/// Split `items` into ordered, disjoint batches of at most `chunk_size`
///
/// Concatenating the batches reproduces `items` exactly. A zero chunk
/// size is treated as one.
pub fn partition<T>(items: &[T], chunk_size: usize) -> Vec<&[T]> {
    items.chunks(chunk_size.max(1)).collect()
}
