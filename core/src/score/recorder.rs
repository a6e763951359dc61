use super::*;

/// Persists personal bests. Only a strictly lower move count replaces a stored record.
#[derive(Clone, Debug)]
pub struct ScoreRecorder<S, C = SystemClock> {
    store: ScoreStore<S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> ScoreRecorder<S, C> {
    pub fn new(store: ScoreStore<S>, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &ScoreStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ScoreStore<S> {
        &mut self.store
    }

    pub fn into_store(self) -> ScoreStore<S> {
        self.store
    }

    /// Writes and returns a new record if `moves` beats the stored best, `None` otherwise.
    pub fn record_if_best(
        &mut self,
        grid: GridSize,
        theme: Theme,
        moves: Count,
        player_name: &str,
    ) -> Option<ScoreRecord> {
        if moves == 0 {
            return None;
        }

        if let Some(best) = self.store.get(grid, theme) {
            if !best.is_beaten_by(moves) {
                log::debug!("{} moves does not beat {} on {} {}", moves, best.moves, grid, theme);
                return None;
            }
        }

        let player_name = match player_name.trim() {
            "" => ANONYMOUS,
            name => name,
        };
        let record = ScoreRecord::new(moves, self.clock.now(), player_name);
        match self.store.set(grid, theme, &record) {
            Ok(()) => {
                log::info!("new best on {} {}: {} moves", grid, theme, moves);
                Some(record)
            }
            Err(err) => {
                log::error!("Could not save best score: {}", err);
                None
            }
        }
    }

    /// Records a finished game under the stored player name.
    pub fn record_completion(&mut self, config: BoardConfig, moves: Count) -> Option<ScoreRecord> {
        let player_name = self.store.player_name();
        self.record_if_best(
            config.grid,
            config.theme,
            moves,
            player_name.as_deref().unwrap_or(ANONYMOUS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_760_000_000_000;

    fn recorder() -> ScoreRecorder<MemoryStore, FixedClock> {
        ScoreRecorder::new(ScoreStore::new(MemoryStore::new()), FixedClock::from_millis(T0))
    }

    /// Backend whose writes always fail, like a full local storage.
    struct FullStore(MemoryStore);

    impl KeyValueStore for FullStore {
        fn get_item(&self, key: &str) -> Option<String> {
            self.0.get_item(key)
        }

        fn set_item(&mut self, key: &str, _value: &str) -> core::result::Result<(), StoreError> {
            Err(StoreError::WriteFailed {
                key: key.to_string(),
                reason: "QuotaExceededError".to_string(),
            })
        }
    }

    #[test]
    fn first_score_is_always_a_best() {
        let mut recorder = recorder();
        let record = recorder
            .record_if_best(GridSize::Four, Theme::Animals, 14, "Ada")
            .unwrap();

        assert_eq!(record.moves, 14);
        assert_eq!(record.player_name, "Ada");
        assert_eq!(record.timestamp, T0);
        assert_eq!(
            recorder.store().get(GridSize::Four, Theme::Animals),
            Some(record)
        );
    }

    #[test]
    fn only_strict_improvements_replace_the_best() {
        let mut recorder = recorder();
        recorder.record_if_best(GridSize::Four, Theme::Animals, 14, "Ada");

        let better = recorder.record_if_best(GridSize::Four, Theme::Animals, 10, "Bo");
        assert_eq!(better.map(|r| r.moves), Some(10));

        assert_eq!(
            recorder.record_if_best(GridSize::Four, Theme::Animals, 12, "Cy"),
            None
        );
        assert_eq!(
            recorder.record_if_best(GridSize::Four, Theme::Animals, 10, "Cy"),
            None
        );

        let stored = recorder.store().get(GridSize::Four, Theme::Animals).unwrap();
        assert_eq!((stored.moves, stored.player_name.as_str()), (10, "Bo"));
    }

    #[test]
    fn non_improving_repeats_leave_storage_untouched() {
        let mut recorder = recorder();
        recorder.record_if_best(GridSize::Six, Theme::Flags, 30, "Ada");
        let before = recorder.store().backend().clone();

        for _ in 0..3 {
            assert_eq!(
                recorder.record_if_best(GridSize::Six, Theme::Flags, 31, "Ada"),
                None
            );
        }
        assert_eq!(recorder.store().backend(), &before);
    }

    #[test]
    fn stored_best_never_increases() {
        let mut recorder = recorder();
        let mut best = Count::MAX;
        for moves in [40, 35, 50, 35, 20, 21, 60, 19, 19] {
            recorder.record_if_best(GridSize::Eight, Theme::Emojis, moves, "Ada");
            let stored = recorder.store().get(GridSize::Eight, Theme::Emojis).unwrap();
            assert!(stored.moves <= best);
            best = stored.moves;
        }
        assert_eq!(best, 19);
    }

    #[test]
    fn legacy_best_is_compared_and_upgraded() {
        let mut backend = MemoryStore::new();
        backend.set_item("best_score_4x4_animals", "14").unwrap();
        let mut recorder = ScoreRecorder::new(ScoreStore::new(backend), FixedClock::from_millis(T0));

        let record = recorder
            .record_if_best(GridSize::Four, Theme::Animals, 10, "Ada")
            .unwrap();
        assert_eq!(record.moves, 10);
        assert_eq!(
            recorder.record_if_best(GridSize::Four, Theme::Animals, 12, "Ada"),
            None
        );

        let raw = recorder
            .store()
            .backend()
            .get_item("best_score_4x4_animals")
            .unwrap();
        assert_eq!(ScoreRecord::parse(&raw), Some(record));
        assert!(raw.contains("\"playerName\":\"Ada\""));
    }

    #[test]
    fn partially_broken_record_still_guards_the_best() {
        let mut backend = MemoryStore::new();
        backend
            .set_item(
                "best_score_4x4_animals",
                r#"{"moves":5,"date":null,"timestamp":1,"playerName":"A"}"#,
            )
            .unwrap();
        let mut recorder = ScoreRecorder::new(ScoreStore::new(backend), FixedClock::from_millis(T0));

        assert_eq!(
            recorder.record_if_best(GridSize::Four, Theme::Animals, 40, "B"),
            None
        );
        let stored = recorder.store().get(GridSize::Four, Theme::Animals).unwrap();
        assert_eq!((stored.moves, stored.player_name.as_str()), (5, "A"));
    }

    #[test]
    fn array_value_does_not_block_the_key() {
        let mut backend = MemoryStore::new();
        backend.set_item("best_score_6x6_emojis", "[1]").unwrap();
        let mut recorder = ScoreRecorder::new(ScoreStore::new(backend), FixedClock::from_millis(T0));

        let record = recorder.record_if_best(GridSize::Six, Theme::Emojis, 30, "Ada");
        assert_eq!(record.map(|r| r.moves), Some(30));
    }

    #[test]
    fn completion_uses_stored_player_name() {
        let mut recorder = recorder();
        let config = BoardConfig::new(GridSize::Four, Theme::Emojis);

        let anonymous = recorder.record_completion(config, 20).unwrap();
        assert_eq!(anonymous.player_name, ANONYMOUS);

        recorder.store_mut().set_player_name("Lee").unwrap();
        let named = recorder.record_completion(config, 18).unwrap();
        assert_eq!(named.player_name, "Lee");
    }

    #[test]
    fn zero_moves_and_failed_writes_are_not_bests() {
        let mut recorder = recorder();
        assert_eq!(
            recorder.record_if_best(GridSize::Four, Theme::Animals, 0, "Ada"),
            None
        );

        let mut full = ScoreRecorder::new(
            ScoreStore::new(FullStore(MemoryStore::new())),
            FixedClock::from_millis(T0),
        );
        assert_eq!(
            full.record_if_best(GridSize::Four, Theme::Animals, 9, "Ada"),
            None
        );
    }

    #[test]
    fn finished_engine_game_feeds_the_recorder() {
        let layout = ["a", "a", "b", "b", "c", "c", "d", "d", "e", "e", "f", "f", "g", "g", "h", "h"];
        let board = Board::from_symbols(GridSize::Four, layout).unwrap();
        let mut engine = MatchEngine::with_board(board, Theme::Animals, RandomDeckGenerator::new(1));
        let mut recorder = recorder();
        recorder.record_if_best(GridSize::Four, Theme::Animals, 14, "Old");

        engine.select_tile(0).unwrap();
        engine.select_tile(2).unwrap();
        engine.resolve_pending();
        engine.select_tile(3).unwrap();
        engine.select_tile(4).unwrap();
        engine.resolve_pending();
        for pair in 0..8 {
            engine.select_tile(pair * 2).unwrap();
            engine.select_tile(pair * 2 + 1).unwrap();
            engine.resolve_pending();
        }

        let completed = engine.drain_events().find_map(|event| match event {
            EngineEvent::Completed { moves } => Some(moves),
            _ => None,
        });
        assert_eq!(completed, Some(10));

        let record = recorder.record_completion(engine.config(), 10).unwrap();
        assert_eq!(record.moves, 10);
        assert_eq!(recorder.record_completion(engine.config(), 12), None);
        assert_eq!(
            recorder
                .store()
                .get(GridSize::Four, Theme::Animals)
                .map(|r| r.moves),
            Some(10)
        );
    }
}
