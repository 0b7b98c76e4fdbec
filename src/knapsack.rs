use rand::Rng;

/// A candidate item; weights are integral so the dynamic programming table can index them
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: usize,
    pub weight: u32,
    pub value: f64,
}

impl Item {
    pub fn ratio(&self) -> f64 {
        self.value / self.weight as f64
    }
}

/// Best value found and the ids of the picked items.
/// The dynamic programming solver does not track the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub value: f64,
    pub selected: Vec<usize>,
}

/// n random items with ids 1..=n, weight in 1..=100 and value in 100.00..=190.00
pub fn generate_items<R: Rng>(n: usize, rng: &mut R) -> Vec<Item> {
    (1..=n)
        .map(|id| Item {
            id,
            weight: rng.gen_range(1..=100),
            value: rng.gen_range(0..=9000) as f64 / 100. + 100.,
        })
        .collect()
}

/// tries every subset, 2^n of them
pub fn brute_force(items: &[Item], capacity: u64) -> Solution {
    let n = items.len();
    assert!(n < 64, "brute force supports at most 63 items, got {}", n);
    let mut best_value = 0.;
    let mut best_mask: u64 = 0;
    for mask in 0..(1u64 << n) {
        let mut weight: u64 = 0;
        let mut value = 0.;
        for (j, item) in items.iter().enumerate() {
            if mask & (1 << j) != 0 {
                weight += item.weight as u64;
                value += item.value;
            }
        }
        if weight <= capacity && value > best_value {
            best_value = value;
            best_mask = mask;
        }
    }
    let selected = items
        .iter()
        .enumerate()
        .filter(|&(j, _)| best_mask & (1 << j) != 0)
        .map(|(_, item)| item.id)
        .collect();
    Solution {
        value: best_value,
        selected,
    }
}

/// single row table over the capacities, filled from the top weight down
pub fn dynamic_programming(items: &[Item], capacity: u64) -> Solution {
    let cap = capacity as usize;
    let mut best = vec![0f64; cap + 1];
    for item in items {
        let w = item.weight as usize;
        if w > cap {
            continue;
        }
        for c in (w..=cap).rev() {
            let with_item = best[c - w] + item.value;
            if with_item > best[c] {
                best[c] = with_item;
            }
        }
    }
    Solution {
        value: best[cap],
        selected: Vec::new(),
    }
}

/// greedy by value/weight ratio, sorted with a selection sort
pub fn greedy_selection_sort(items: &[Item], capacity: u64) -> Solution {
    let mut sorted = items.to_vec();
    let n = sorted.len();
    for i in 0..n.saturating_sub(1) {
        let mut max_idx = i;
        for j in i + 1..n {
            if sorted[j].ratio() > sorted[max_idx].ratio() {
                max_idx = j;
            }
        }
        sorted.swap(i, max_idx);
    }
    take_while_fits(&sorted, capacity)
}

/// greedy by value/weight ratio, sorted with the (quicksort based) unstable sort
pub fn greedy_quick_sort(items: &[Item], capacity: u64) -> Solution {
    let mut sorted = items.to_vec();
    sorted.sort_unstable_by(|a, b| {
        b.ratio()
            .partial_cmp(&a.ratio())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    take_while_fits(&sorted, capacity)
}

/// picks, in order, every item that still fits
fn take_while_fits(sorted: &[Item], capacity: u64) -> Solution {
    let mut weight: u64 = 0;
    let mut value = 0.;
    let mut selected = Vec::new();
    for item in sorted {
        if weight + item.weight as u64 <= capacity {
            weight += item.weight as u64;
            value += item.value;
            selected.push(item.id);
        }
    }
    Solution { value, selected }
}

/// depth first include/exclude search, pruning the branches that overflow the capacity
pub fn backtracking(items: &[Item], capacity: u64) -> Solution {
    let mut search = Backtrack {
        items,
        capacity,
        current: Vec::with_capacity(items.len()),
        best: Vec::new(),
        best_value: 0.,
    };
    search.descend(0, 0, 0.);
    Solution {
        value: search.best_value,
        selected: search.best,
    }
}

struct Backtrack<'a> {
    items: &'a [Item],
    capacity: u64,
    current: Vec<usize>,
    best: Vec<usize>,
    best_value: f64,
}

impl<'a> Backtrack<'a> {
    fn descend(&mut self, depth: usize, weight: u64, value: f64) {
        if depth == self.items.len() {
            if value > self.best_value {
                self.best_value = value;
                self.best = self.current.clone();
            }
            return;
        }
        let item = &self.items[depth];
        let with_item = weight + item.weight as u64;
        if with_item <= self.capacity {
            self.current.push(item.id);
            self.descend(depth + 1, with_item, value + item.value);
            self.current.pop();
        }
        self.descend(depth + 1, weight, value);
    }
}
