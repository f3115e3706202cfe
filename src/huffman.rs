//! Components E and F: the Huffman code-length builder and the
//! canonical code assigner. See `spec.md` 4.E, 4.F, and 9. DESIGN
//! NOTES ("Heap with tiebreak weights").
//!
//! Grounded directly in `utvideoenc.c`'s `calculate_code_lengths`/
//! `calculate_codes`: the weighted min-heap with an 8-bit depth
//! tiebreaker packed into each node's weight is reproduced exactly,
//! because any deviation changes code lengths and breaks bit-exact
//! output (9. DESIGN NOTES).

const LEAVES: usize = 256;
/// 256 leaves plus up to 255 internal nodes, 1-indexed with a
/// sentinel at position 0 (mirrors `utvideoenc.c`'s 512-entry arrays).
const MAX_NODES: usize = 512;

/// One entry of the canonical code table: a symbol, its code length in
/// bits, and its canonical code value.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HuffEntry {
    pub(crate) sym: u8,
    pub(crate) len: u8,
    pub(crate) code: u32,
}

/// `add_weights`: combines two node weights. High 24 bits are summed
/// frequency; low 8 bits are `1 + max(depth1, depth2)`, biasing the
/// heap toward shallower subtrees on frequency ties.
fn add_weights(w1: u32, w2: u32) -> u32 {
    let max_depth = (w1 & 0xFF).max(w2 & 0xFF);
    ((w1 & 0xFFFF_FF00) + (w2 & 0xFFFF_FF00)) | (1 + max_depth)
}

/// 1-indexed binary min-heap over node ids, comparing by `weights[id]`.
/// Position 0 and node id 0 are a weight-zero sentinel so sift-up
/// terminates at the root without a separate bounds check, exactly as
/// in the original.
struct WeightHeap {
    heap: Vec<u32>,
    weights: Vec<u32>,
    len: usize,
}

impl WeightHeap {
    fn new() -> Self {
        let mut weights = vec![0u32; MAX_NODES];
        weights[0] = 0;
        Self {
            heap: vec![0u32; MAX_NODES],
            weights,
            len: 0,
        }
    }

    fn push(&mut self, node: u32) {
        self.len += 1;
        self.heap[self.len] = node;
        self.sift_up(self.len);
    }

    fn sift_up(&mut self, mut pos: usize) {
        let val = self.heap[pos];
        while self.weights[val as usize]
            < self.weights[self.heap[pos >> 1] as usize]
        {
            self.heap[pos] = self.heap[pos >> 1];
            pos >>= 1;
        }
        self.heap[pos] = val;
    }

    /// Pops the minimum node, leaving the heap with `len - 1` nodes.
    fn pop_min(&mut self) -> u32 {
        let min = self.heap[1];
        self.heap[1] = self.heap[self.len];
        self.len -= 1;
        self.sift_down();
        min
    }

    fn sift_down(&mut self) {
        let mut pos = 1;
        let val = self.heap[1];
        loop {
            let mut child = pos << 1;
            if child > self.len {
                break;
            }
            if child < self.len
                && self.weights[self.heap[child + 1] as usize]
                    < self.weights[self.heap[child] as usize]
            {
                child += 1;
            }
            if self.weights[val as usize] < self.weights[self.heap[child] as usize]
            {
                break;
            }
            self.heap[pos] = self.heap[child];
            pos = child;
        }
        self.heap[pos] = val;
    }
}

/// Builds a 256-entry code-length table from a residual histogram.
/// Symbols with zero observed count still receive a weight-1 leaf so
/// every symbol has a finite length (4.E).
pub(crate) fn code_lengths(counts: &[u32; LEAVES]) -> [u8; LEAVES] {
    let mut heap = WeightHeap::new();
    let mut parent = vec![-1i32; MAX_NODES];
    parent[0] = -2;

    for (i, &c) in counts.iter().enumerate() {
        let id = (i + 1) as u32;
        heap.weights[id as usize] = (if c == 0 { 1 } else { c }) << 8;
        parent[id as usize] = -1;
        heap.push(id);
    }

    let mut next_node = LEAVES as u32;
    while heap.len > 1 {
        let node1 = heap.pop_min();
        let node2 = heap.pop_min();

        next_node += 1;
        parent[node1 as usize] = next_node as i32;
        parent[node2 as usize] = next_node as i32;
        heap.weights[next_node as usize] = add_weights(
            heap.weights[node1 as usize],
            heap.weights[node2 as usize],
        );
        parent[next_node as usize] = -1;
        heap.push(next_node);
    }

    let mut lengths = [0u8; LEAVES];
    for i in 1..=LEAVES {
        let mut depth = 0u8;
        let mut k = i as i32;
        while parent[k as usize] >= 0 {
            k = parent[k as usize];
            depth += 1;
        }
        lengths[i - 1] = depth;
    }
    lengths
}

/// Converts per-symbol code lengths into canonical codes (4.F).
/// Returns entries indexed by symbol.
pub(crate) fn canonical_codes(lengths: &[u8; LEAVES]) -> [HuffEntry; LEAVES] {
    let mut entries: Vec<HuffEntry> = (0..LEAVES)
        .map(|i| HuffEntry {
            sym: i as u8,
            len: lengths[i],
            code: 0,
        })
        .collect();

    entries.sort_by_key(|e| (e.len, e.sym));

    let mut last = LEAVES - 1;
    while last > 0 && entries[last].len == 255 {
        last -= 1;
    }

    let mut code: u32 = 1;
    for i in (0..=last).rev() {
        let len = entries[i].len;
        entries[i].code = code >> (32 - len as u32);
        code = code.wrapping_add(0x8000_0000u32 >> (len as u32 - 1));
    }

    entries.sort_by_key(|e| e.sym);

    let mut table = [HuffEntry::default(); LEAVES];
    for e in entries {
        table[e.sym as usize] = e;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kraft_equality_holds_for_mixed_histogram() {
        let mut counts = [0u32; LEAVES];
        counts[0] = 100;
        counts[1] = 50;
        counts[2] = 25;
        counts[3] = 10;
        counts[255] = 3;
        let lengths = code_lengths(&counts);
        let sum: f64 = lengths.iter().map(|&l| 2f64.powi(-(l as i32))).sum();
        assert!((sum - 1.0).abs() < 1e-9, "kraft sum = {}", sum);
        assert!(lengths.iter().all(|&l| (1..=32).contains(&l)));
    }

    #[test]
    fn shallower_subtrees_preferred_on_ties() {
        // All-equal counts: the depth tiebreaker should still yield a
        // a complete, balanced-ish code (every length within a small
        // range of each other) rather than a degenerate comb tree.
        let counts = [1u32; LEAVES];
        let lengths = code_lengths(&counts);
        let min = *lengths.iter().min().unwrap();
        let max = *lengths.iter().max().unwrap();
        assert!(max - min <= 1, "min={} max={}", min, max);
        assert_eq!(min, 8);
        assert_eq!(max, 8);
    }

    #[test]
    fn canonical_codes_are_prefix_free_and_consecutive_per_length() {
        let mut counts = [0u32; LEAVES];
        counts[0] = 100;
        counts[1] = 50;
        counts[2] = 25;
        counts[3] = 10;
        counts[4] = 1;
        let lengths = code_lengths(&counts);
        let table = canonical_codes(&lengths);

        let mut by_len: std::collections::BTreeMap<u8, Vec<(u8, u32)>> =
            Default::default();
        for e in table.iter() {
            by_len.entry(e.len).or_default().push((e.sym, e.code));
        }
        for codes in by_len.values_mut() {
            codes.sort_by_key(|&(sym, _)| sym);
            let vals: Vec<u32> = codes.iter().map(|&(_, c)| c).collect();
            for w in vals.windows(2) {
                assert!(w[1] >= w[0]);
            }
        }
    }
}
