use hashbrown::HashMap;

/// Maps a key to the row positions holding it, in table order.
pub type VecIndex<K> = HashMap<K, Vec<usize>>;
