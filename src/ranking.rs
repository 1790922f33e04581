//! Rank positions derived from ratings.
//!
//! `ranking` is never meaningful on its own: every listing rewrites it as a
//! dense 1-based position over the records in rating-descending store order.

use crate::entities::movie;

/// Sets `ranking = index + 1` on records already sorted best-first.
pub fn assign_rankings(movies: &mut [movie::Model]) {
    for (index, movie) in movies.iter_mut().enumerate() {
        movie.ranking = Some(index as i32 + 1);
    }
}

/// Order in which the list page shows records: lowest-rated first, best last.
pub fn display_order(mut movies: Vec<movie::Model>) -> Vec<movie::Model> {
    movies.reverse();
    movies
}
