use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use pairup_core as game;
use pairup_core::{
    BoardConfig, Count, EngineEvent, GridSize, MatchEngine, RandomDeckGenerator, ResolveTicket,
    ScoreRecord, ScoreRecorder, ScoreStore, Stopwatch, Theme, TileId,
};
use yew::prelude::*;

use crate::leaderboard::{LeaderboardView, RankedEntries, leaderboard_entries};
use crate::player::NameDialog;
use crate::storage::LocalStorageBackend;
use crate::utils::*;

const NOTICE_MILLIS: u32 = 3_000;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SelectTile(TileId),
    Resolve(ResolveTicket),
    UpdateTime,
    NewGame,
    ChangeTheme(Theme),
    ChangeGrid(GridSize),
    DismissNotice,
    ToggleLeaderboard,
    NamePlayer(String),
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct CompletionNotice {
    moves: Count,
    secs: u32,
    new_best: bool,
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    id: TileId,
    face: Option<String>,
    #[prop_or_default]
    matched: bool,
    #[prop_or_default]
    locked: bool,
    callback: Callback<TileId>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        id,
        face,
        matched,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "tile",
        face.is_some().then_some("revealed"),
        matched.then_some("matched"),
    );
    let label = face.unwrap_or_else(|| "?".to_string());

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("tile {} clicked", id);
        callback.emit(id);
    });

    html! {
        <button {class} {onclick} disabled={locked}>{label}</button>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) struct GameView {
    config: BoardConfig,
    engine: Option<MatchEngine>,
    recorder: ScoreRecorder<LocalStorageBackend, BrowserClock>,
    player_name: Option<String>,
    best: Option<ScoreRecord>,
    seed: u64,
    stopwatch: Stopwatch,
    prev_time: u32,
    notice: Option<CompletionNotice>,
    /// Ranked scores while the leaderboard is open.
    leaderboard: Option<RankedEntries>,
    pending_resolve: Option<Timeout>,
    notice_timeout: Option<Timeout>,
    _timer_interval: Interval,
}

impl GameView {
    fn engine_mut(&mut self) -> Option<&mut MatchEngine> {
        if self.engine.is_none() {
            let generator = RandomDeckGenerator::new(self.seed);
            match MatchEngine::new(self.config, generator) {
                Ok(engine) => self.engine = Some(engine),
                Err(err) => {
                    log::error!(
                        "Could not deal a {} {} board: {}",
                        self.config.grid,
                        self.config.theme,
                        err
                    );
                }
            }
        }
        self.engine.as_mut()
    }

    fn get_time(&self) -> u32 {
        self.stopwatch.elapsed_secs(utc_now())
    }

    fn moves(&self) -> Count {
        self.engine.as_ref().map_or(0, |engine| engine.moves())
    }

    fn matched_pairs(&self) -> Count {
        self.engine.as_ref().map_or(0, |engine| engine.matched_pairs())
    }

    fn progress_percent(&self) -> u8 {
        self.engine
            .as_ref()
            .map_or(0, |engine| engine.progress_percent())
    }

    fn select_tile(&mut self, ctx: &Context<Self>, id: TileId) -> bool {
        if self.player_name.is_none() {
            log::debug!("waiting for a player name");
            return false;
        }

        let Some(engine) = self.engine_mut() else {
            return false;
        };
        let outcome = match engine.select_tile(id) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("Rejected tile selection: {}", err);
                return false;
            }
        };

        if outcome.has_update() {
            self.stopwatch.start(utc_now());
        }
        if let Some(ticket) = outcome.ticket() {
            let link = ctx.link().clone();
            let delay = game::RESOLVE_DELAY.as_millis() as u32;
            self.pending_resolve = Some(Timeout::new(delay, move || {
                link.send_message(Msg::Resolve(ticket))
            }));
        }
        outcome.has_update()
    }

    fn resolve(&mut self, ctx: &Context<Self>, ticket: ResolveTicket) -> bool {
        self.pending_resolve = None;
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        let outcome = engine.resolve(ticket);
        log::debug!("resolved pair: {:?}", outcome);

        let config = engine.config();
        let events: Vec<EngineEvent> = engine.drain_events().collect();
        for event in events {
            match event {
                EngineEvent::Completed { moves } => self.on_completed(ctx, config, moves),
                other => log::trace!("engine event: {:?}", other),
            }
        }
        outcome.has_update()
    }

    fn on_completed(&mut self, ctx: &Context<Self>, config: BoardConfig, moves: Count) {
        let now = utc_now();
        self.stopwatch.stop(now);

        let record = self.recorder.record_completion(config, moves);
        let new_best = record.is_some();
        if new_best {
            self.best = record;
            if self.leaderboard.is_some() {
                self.leaderboard = Some(leaderboard_entries(self.recorder.store()));
            }
        }

        self.notice = Some(CompletionNotice {
            moves,
            secs: self.stopwatch.elapsed_secs(now),
            new_best,
        });
        let link = ctx.link().clone();
        self.notice_timeout = Some(Timeout::new(NOTICE_MILLIS, move || {
            link.send_message(Msg::DismissNotice)
        }));
    }

    /// Replaces the running game. Dropping the pending timeout cancels its callback and the engine
    /// rejects any ticket that still slips through.
    fn new_game(&mut self, config: BoardConfig) {
        self.pending_resolve = None;
        self.notice_timeout = None;
        self.notice = None;
        self.stopwatch = Stopwatch::new();
        self.prev_time = 0;

        if self.config != config {
            self.best = self.recorder.store().get(config.grid, config.theme);
        }
        self.config = config;

        let reset = self.engine.as_mut().map(|engine| {
            engine.reset(config)?;
            engine
                .drain_events()
                .for_each(|event| log::trace!("engine event: {:?}", event));
            Ok::<_, game::GameError>(())
        });
        if let Some(Err(err)) = reset {
            log::error!("Could not reset game: {}", err);
            self.engine = None;
        }
    }

    fn name_player(&mut self, name: &str) -> bool {
        match self.recorder.store_mut().set_player_name(name) {
            Ok(name) => {
                self.player_name = Some(name);
                true
            }
            Err(err) => {
                log::warn!("Could not save player name: {}", err);
                false
            }
        }
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1_000, move || link.send_message(Msg::UpdateTime))
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let side = self.config.grid.side();
        let style = format!("grid-template-columns: repeat({}, 1fr)", side);
        let callback = ctx.link().callback(Msg::SelectTile);

        let tiles: Html = match self.engine.as_ref() {
            Some(engine) => engine
                .board()
                .tiles()
                .iter()
                .map(|tile| {
                    let id = tile.id();
                    let face = tile.face().map(str::to_string);
                    let matched = tile.is_matched();
                    let locked = !engine.can_select(id);
                    html! {
                        <TileView key={id} {id} {face} {matched} {locked} callback={callback.clone()}/>
                    }
                })
                .collect(),
            None => (0..self.config.grid.tile_count())
                .map(|id| {
                    html! {
                        <TileView key={id} {id} face={None::<String>} callback={callback.clone()}/>
                    }
                })
                .collect(),
        };

        html! {
            <div class="board" {style}>{tiles}</div>
        }
    }

    fn view_stats(&self) -> Html {
        let pair_count = self.config.pair_count();
        let progress = self.progress_percent();
        let best = self
            .best
            .as_ref()
            .map(|record| html! { <p class="best">{format!("Best Score (Moves): {}", record.moves)}</p> });

        html! {
            <section class="stats">
                <dl>
                    <dt>{"Moves"}</dt><dd>{self.moves()}</dd>
                    <dt>{"Time"}</dt><dd>{game::format_elapsed(self.get_time())}</dd>
                    <dt>{"Pairs"}</dt><dd>{format!("{}/{}", self.matched_pairs(), pair_count)}</dd>
                </dl>
                <progress max="100" value={progress.to_string()}>{format!("{}%", progress)}</progress>
                {for best}
            </section>
        }
    }

    fn view_controls(&self, ctx: &Context<Self>) -> Html {
        let themes = Theme::ALL.into_iter().map(|theme| {
            let class = classes!((theme == self.config.theme).then_some("selected"));
            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::ChangeTheme(theme));
            html! {
                <button {class} {onclick}>{format!("{} {}", theme.icon(), theme.label())}</button>
            }
        });
        let grids = GridSize::ALL.into_iter().map(|grid| {
            let class = classes!((grid == self.config.grid).then_some("selected"));
            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::ChangeGrid(grid));
            html! {
                <button {class} {onclick}>{format!("{} {}", grid.label(), grid)}</button>
            }
        });

        html! {
            <section class="controls">
                <h3>{"Theme"}</h3>
                <nav>{for themes}</nav>
                <h3>{"Difficulty"}</h3>
                <nav>{for grids}</nav>
                <button onclick={ctx.link().callback(|_| Msg::NewGame)}>{"New Game"}</button>
                <button onclick={ctx.link().callback(|_| Msg::ToggleLeaderboard)}>{"Leaderboard"}</button>
            </section>
        }
    }

    fn view_notice(&self) -> Html {
        let Some(notice) = self.notice else {
            return html! {};
        };
        html! {
            <article class="notice">
                <h2>{"🎉 Congratulations!"}</h2>
                <p>{format!("You completed the game in {} moves and {}s!", notice.moves, notice.secs)}</p>
                if notice.new_best {
                    <p class="best">{"✨ New Personal Best!"}</p>
                }
            </article>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = BoardConfig::default();
        let store = ScoreStore::new(LocalStorageBackend);
        let player_name = store.player_name();
        let best = store.get(config.grid, config.theme);

        Self {
            config,
            engine: None,
            recorder: ScoreRecorder::new(store, BrowserClock),
            player_name,
            best,
            seed: ctx.props().seed.unwrap_or_else(js_random_seed),
            stopwatch: Stopwatch::new(),
            prev_time: 0,
            notice: None,
            leaderboard: None,
            pending_resolve: None,
            notice_timeout: None,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            SelectTile(id) => self.select_tile(ctx, id),
            Resolve(ticket) => self.resolve(ctx, ticket),
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            NewGame => {
                self.new_game(self.config);
                true
            }
            ChangeTheme(theme) => {
                self.new_game(BoardConfig::new(self.config.grid, theme));
                true
            }
            ChangeGrid(grid) => {
                self.new_game(BoardConfig::new(grid, self.config.theme));
                true
            }
            DismissNotice => {
                self.notice_timeout = None;
                self.notice.take().is_some()
            }
            ToggleLeaderboard => {
                self.leaderboard = match self.leaderboard {
                    Some(_) => None,
                    None => Some(leaderboard_entries(self.recorder.store())),
                };
                true
            }
            NamePlayer(name) => self.name_player(&name),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_name = ctx.link().callback(Msg::NamePlayer);

        html! {
            <div class="pairup">
                <header>
                    <h1>{"PairUp"}</h1>
                    <p>{"Test your memory skills with card-flipping gameplay"}</p>
                </header>
                <main>
                    {self.view_board(ctx)}
                    {self.view_notice()}
                </main>
                <aside>
                    {self.view_stats()}
                    {self.view_controls(ctx)}
                </aside>
                if let Some(entries) = self.leaderboard.clone() {
                    <LeaderboardView {entries}/>
                }
                <NameDialog open={self.player_name.is_none()} on_submit={on_name}/>
            </div>
        }
    }
}
