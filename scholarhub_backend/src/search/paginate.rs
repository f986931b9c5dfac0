/// Growing window over an ordered sequence.
///
/// The window always starts at index 0 and ends at `current_page * page_size`,
/// clamped to the sequence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn window_end(&self) -> usize {
        self.current_page.saturating_mul(self.page_size)
    }

    pub fn advance(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Must run whenever the upstream filter or ordering changes.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn visible_slice<'a, T>(&self, sequence: &'a [T]) -> &'a [T] {
        &sequence[..self.window_end().min(sequence.len())]
    }

    pub fn has_more(&self, len: usize) -> bool {
        self.window_end() < len
    }
}
