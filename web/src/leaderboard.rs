use std::rc::Rc;

use pairup_core::{GridSize, KeyValueStore, RankedEntry, ScoreStore, Theme, ranked};
use yew::prelude::*;

pub(crate) type RankedEntries = Rc<Vec<RankedEntry>>;

/// Every recorded best across all themes and grid sizes, in leaderboard order.
pub(crate) fn leaderboard_entries<S: KeyValueStore>(store: &ScoreStore<S>) -> RankedEntries {
    Rc::new(ranked(store.list_all(&Theme::ALL, &GridSize::ALL)))
}

#[derive(Properties, PartialEq)]
pub(crate) struct LeaderboardProps {
    pub entries: RankedEntries,
}

fn medal(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        _ => format!("#{}", rank),
    }
}

fn entry_row(entry: &RankedEntry) -> Html {
    let RankedEntry {
        rank,
        theme,
        grid,
        record,
    } = entry;

    html! {
        <tr key={format!("{}-{}", theme, grid)}>
            <td>{medal(*rank)}</td>
            <td>{record.player_name.clone()}</td>
            <td>{format!("{} {}", theme.icon(), theme.label())}</td>
            <td>{grid.to_string()}</td>
            <td>{record.moves}</td>
            <td>{record.date.clone()}</td>
        </tr>
    }
}

#[function_component]
pub(crate) fn LeaderboardView(props: &LeaderboardProps) -> Html {
    let entries = &props.entries;

    let body = if entries.is_empty() {
        html! {
            <p class="empty">{"No scores yet. Complete a game to appear here!"}</p>
        }
    } else {
        html! {
            <table>
                <thead>
                    <tr>
                        <th>{"Rank"}</th>
                        <th>{"Player"}</th>
                        <th>{"Theme"}</th>
                        <th>{"Grid"}</th>
                        <th>{"Moves"}</th>
                        <th>{"Date"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for entries.iter().map(entry_row)}
                </tbody>
            </table>
        }
    };

    html! {
        <section id="leaderboard">
            <h2>{"🏆 Leaderboard"}</h2>
            {body}
        </section>
    }
}
