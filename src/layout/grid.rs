#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub bars_per_row: usize,
    pub spacing: usize,
    pub min_bar_width: usize,
    pub degrade: bool,
}

pub const HEADLINE_GRID: GridSpec = GridSpec {
    bars_per_row: 2,
    spacing: 2,
    min_bar_width: 20,
    degrade: false,
};

pub const CORE_GRID: GridSpec = GridSpec {
    bars_per_row: 4,
    spacing: 2,
    min_bar_width: 15,
    degrade: true,
};

const MIN_BARS_PER_ROW: usize = 2;

pub const DEFAULT_TERMINAL_HEIGHT: usize = 24;
pub const BOTTOM_MARGIN: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowGeometry {
    pub bar_width: usize,
    pub bars_per_row: usize,
    pub spacing: usize,
}

impl RowGeometry {
    pub fn row_count(&self, items: usize) -> usize {
        items.div_ceil(self.bars_per_row)
    }

    pub fn row_width(&self, bars: usize) -> usize {
        if bars == 0 {
            return 0;
        }
        bars * self.bar_width + (bars - 1) * self.spacing
    }

    pub fn rows<'a, T>(&self, items: &'a [T]) -> std::slice::Chunks<'a, T> {
        items.chunks(self.bars_per_row)
    }
}

fn bar_width_for(available_width: usize, bars_per_row: usize, spacing: usize) -> usize {
    let gaps = (bars_per_row - 1) * spacing;
    available_width.saturating_sub(gaps) / bars_per_row
}

/// Bars narrower than the minimum halve a degrading row (never below two),
/// then clamp to the minimum width and may overflow the available width.
pub fn bar_row(available_width: usize, spec: &GridSpec) -> RowGeometry {
    let mut bars_per_row = spec.bars_per_row.max(1);
    let mut bar_width = bar_width_for(available_width, bars_per_row, spec.spacing);

    while spec.degrade && bar_width < spec.min_bar_width && bars_per_row > MIN_BARS_PER_ROW {
        bars_per_row = (bars_per_row / 2).max(MIN_BARS_PER_ROW);
        bar_width = bar_width_for(available_width, bars_per_row, spec.spacing);
    }

    RowGeometry {
        bar_width: bar_width.max(spec.min_bar_width),
        bars_per_row,
        spacing: spec.spacing,
    }
}

/// A height of 0 means the terminal has not reported its size yet.
pub fn available_lines(terminal_height: usize, lines_used: usize) -> usize {
    let height = if terminal_height == 0 {
        DEFAULT_TERMINAL_HEIGHT
    } else {
        terminal_height
    };
    height
        .saturating_sub(lines_used)
        .saturating_sub(BOTTOM_MARGIN)
        .max(1)
}

pub fn process_rows(terminal_height: usize, lines_used: usize, process_count: usize) -> usize {
    available_lines(terminal_height, lines_used).min(process_count)
}
