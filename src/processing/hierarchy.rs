//! Three-level nested top-N over director, genre and actor.

use indexmap::IndexMap;

use crate::config::HierarchyLimits;
use crate::types::CleanTable;
use crate::views::HierarchyLeaf;

use super::counter::{Counter, TieBreak};
use super::explode::{MultiField, DELIMITER};

type GenreActors<'a> = IndexMap<&'a str, Counter<&'a str>>;

/// Rank directors by their total (director, genre, actor) count, then genres within each
/// kept director, then actors within each kept (director, genre) pair.
///
/// The denylist applies to directors and actors only; genres are split as-is.
///
/// Leaves are emitted director by director in rank order, genres in rank order beneath them.
/// Levels with fewer candidates than the limit yield fewer rows.
pub fn director_genre_actor(
    table: &CleanTable,
    limits: &HierarchyLimits,
    tie_break: TieBreak,
) -> Vec<HierarchyLeaf> {
    let tree = table.reduce_rows(IndexMap::<&str, GenreActors<'_>>::new(), |mut tree, record| {
        for director in MultiField::Director.values(record) {
            for genre in MultiField::Genre.raw(record).split(DELIMITER) {
                for actor in MultiField::Cast.values(record) {
                    tree.entry(director)
                        .or_default()
                        .entry(genre)
                        .or_default()
                        .add(actor);
                }
            }
        }
        tree
    });

    let mut director_totals = Counter::new();
    for (director, genres) in &tree {
        director_totals.add_n(*director, genres.values().map(Counter::total).sum());
    }

    let mut leaves = Vec::new();
    for (director, _) in director_totals.top(limits.directors, tie_break) {
        let Some(genres) = tree.get(director) else {
            continue;
        };

        let genre_totals: Counter<&str> = genres.iter().fold(Counter::new(), |mut acc, (genre, actors)| {
            acc.add_n(*genre, actors.total());
            acc
        });

        for (genre, _) in genre_totals.top(limits.genres, tie_break) {
            let Some(actors) = genres.get(genre) else {
                continue;
            };
            leaves.extend(actors.top(limits.actors, tie_break).into_iter().map(|(actor, count)| {
                HierarchyLeaf {
                    director: (*director).to_owned(),
                    genre: (*genre).to_owned(),
                    actor: (*actor).to_owned(),
                    count,
                }
            }));
        }
    }
    leaves
}
