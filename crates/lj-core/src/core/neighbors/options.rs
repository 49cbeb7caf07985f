/// Neighbor list requirements declared by a model.
///
/// `full_list` selects between the half convention (each unordered pair stored
/// once) and the full one (both `i -> j` and `j -> i`). `strict` asks the
/// provider to fail rather than hand over a list missing pairs inside `cutoff`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborListOptions {
    pub cutoff: f64,
    pub full_list: bool,
    pub strict: bool,
}

impl NeighborListOptions {
    pub fn half(cutoff: f64) -> Self {
        Self {
            cutoff,
            full_list: false,
            strict: true,
        }
    }

    pub fn full(cutoff: f64) -> Self {
        Self {
            cutoff,
            full_list: true,
            strict: true,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
