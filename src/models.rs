/// One row of a provider title search, as offered on the pick list.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
    pub tmdb_id: i32,
    pub title: String,
    pub year: Option<i16>,
}

/// A record about to be inserted; unrated, unranked and unreviewed.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub img_url: String,
}
