#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    fn keeps(self, value: i32, pivot: i32) -> bool {
        match self {
            Self::Ascending => value <= pivot,
            Self::Descending => value >= pivot,
        }
    }
}

/// One exchange of two positions, in the order partitioning performed it.
/// `a == b` happens whenever the boundary has caught up with the scan; those
/// degenerate exchanges are still part of the trace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SwapEvent {
    pub a: usize,
    pub b: usize,
}

pub fn sort_by_direction(
    values: &mut [i32],
    direction: Direction,
    mut on_swap: impl FnMut(SwapEvent),
) {
    if values.len() > 1 {
        quick_sort(values, 0, values.len() - 1, direction, &mut on_swap);
    }
}

pub fn sort_with_trace(values: &mut [i32], direction: Direction) -> Vec<SwapEvent> {
    let mut trace = Vec::new();
    sort_by_direction(values, direction, |event| trace.push(event));
    trace
}

fn quick_sort(
    values: &mut [i32],
    begin: usize,
    end: usize,
    direction: Direction,
    on_swap: &mut impl FnMut(SwapEvent),
) {
    if begin >= end {
        return;
    }

    let p = partition(values, begin, end, direction, on_swap);
    if p > begin {
        quick_sort(values, begin, p - 1, direction, on_swap);
    }
    if p < end {
        quick_sort(values, p + 1, end, direction, on_swap);
    }
}

// Lomuto scheme over values[begin..=end] with the last element as pivot.
// The pivot choice is fixed on purpose: traces are part of the contract and
// sorted input degrading to quadratic swaps is expected behavior.
fn partition(
    values: &mut [i32],
    begin: usize,
    end: usize,
    direction: Direction,
    on_swap: &mut impl FnMut(SwapEvent),
) -> usize {
    let pivot = values[end];
    let mut i = begin;

    for j in begin..end {
        if direction.keeps(values[j], pivot) {
            values.swap(i, j);
            on_swap(SwapEvent { a: i, b: j });
            i += 1;
        }
    }

    values.swap(i, end);
    on_swap(SwapEvent { a: i, b: end });
    i
}
