use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    /// Deals a fresh board for `grid` from the first `grid.pair_count()` symbols of `pool`.
    fn generate(&mut self, grid: GridSize, pool: &[&str]) -> Result<Board>;
}

impl<G: DeckGenerator + ?Sized> DeckGenerator for &mut G {
    fn generate(&mut self, grid: GridSize, pool: &[&str]) -> Result<Board> {
        (**self).generate(grid, pool)
    }
}

/// Symbols a board of `grid` uses, in pool order.
pub fn pick_symbols<'p, 'a>(grid: GridSize, pool: &'p [&'a str]) -> Result<&'p [&'a str]> {
    let required = grid.pair_count();
    if pool.len() < required {
        return Err(GameError::InsufficientSymbols {
            required,
            available: pool.len(),
        });
    }
    Ok(&pool[..required])
}
