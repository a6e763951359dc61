use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Duplicates the picked symbols and applies a uniform Fisher-Yates shuffle.
#[derive(Clone, Debug)]
pub struct RandomDeckGenerator {
    rng: SmallRng,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(&mut self, grid: GridSize, pool: &[&str]) -> Result<Board> {
        let picked = pick_symbols(grid, pool).inspect_err(|err| {
            log::warn!("Cannot deal a {} board: {}", grid, err);
        })?;

        let mut deck: Vec<&str> = picked.iter().chain(picked).copied().collect();
        deck.shuffle(&mut self.rng);

        Board::from_symbols(grid, deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn symbol_counts(board: &Board) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for tile in board.tiles() {
            *counts.entry(tile.symbol()).or_default() += 1;
        }
        counts
    }

    #[test]
    fn every_size_and_theme_deals_exact_pairs() {
        let mut generator = RandomDeckGenerator::new(7);
        for theme in Theme::ALL {
            for grid in GridSize::ALL {
                let board = generator.generate(grid, theme.symbols()).unwrap();
                let counts = symbol_counts(&board);

                assert_eq!(board.len(), grid.tile_count());
                assert_eq!(counts.len(), grid.pair_count());
                assert!(counts.values().all(|&count| count == 2));
                for (id, tile) in board.tiles().iter().enumerate() {
                    assert_eq!(tile.id(), id);
                    assert!(!tile.is_revealed() && !tile.is_matched());
                }
            }
        }
    }

    #[test]
    fn animals_four_by_four_uses_the_pool_prefix() {
        let board = RandomDeckGenerator::new(1)
            .generate(GridSize::Four, Theme::Animals.symbols())
            .unwrap();
        let counts = symbol_counts(&board);

        assert_eq!(board.len(), 16);
        assert_eq!(counts.len(), 8);
        let used: Vec<&str> = counts.keys().copied().collect();
        let mut expected = Theme::Animals.symbols()[..8].to_vec();
        expected.sort_unstable();
        assert_eq!(used, expected);
    }

    #[test]
    fn small_pool_is_a_configuration_error() {
        let pool = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let err = RandomDeckGenerator::new(0)
            .generate(GridSize::Six, &pool)
            .unwrap_err();

        assert_eq!(
            err,
            GameError::InsufficientSymbols {
                required: 18,
                available: 8
            }
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn same_seed_deals_same_board() {
        let a = RandomDeckGenerator::new(42)
            .generate(GridSize::Six, Theme::Flags.symbols())
            .unwrap();
        let b = RandomDeckGenerator::new(42)
            .generate(GridSize::Six, Theme::Flags.symbols())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_moves_every_symbol_around() {
        // every position sees every symbol over enough deals
        let mut generator = RandomDeckGenerator::new(3);
        let mut seen: Vec<BTreeMap<String, usize>> = vec![BTreeMap::new(); 16];
        for _ in 0..200 {
            let board = generator
                .generate(GridSize::Four, Theme::Emojis.symbols())
                .unwrap();
            for tile in board.tiles() {
                *seen[tile.id()].entry(tile.symbol().to_string()).or_default() += 1;
            }
        }
        assert!(seen.iter().all(|position| position.len() == 8));
    }
}
