use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

use crate::{entities::movie, error::AppResult, models::NewMovie, ranking};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Recomputes and persists every record's rank, returning records best-first.
    pub async fn ranked(&self) -> AppResult<Vec<movie::Model>> {
        let txn = self.db.begin().await?;

        let mut movies = movie::Entity::find()
            .order_by_desc(movie::Column::Rating)
            .order_by_asc(movie::Column::Id)
            .all(&txn)
            .await?;

        ranking::assign_rankings(&mut movies);

        for m in &movies {
            movie::Entity::update_many()
                .col_expr(movie::Column::Ranking, Expr::value(m.ranking))
                .filter(movie::Column::Id.eq(m.id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(movies)
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<i32> {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(Some(0.0)),
            ranking: Set(Some(0)),
            review: Set(Some(String::new())),
            img_url: Set(new.img_url),
        };

        let res = movie::Entity::insert(model).exec(&self.db).await?;
        tracing::info!(id = res.last_insert_id, "movie added");
        Ok(res.last_insert_id)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Overwrites rating and review; `None` when no record has this id.
    pub async fn rate(
        &self,
        id: i32,
        rating: f64,
        review: &str,
    ) -> AppResult<Option<movie::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: movie::ActiveModel = existing.into();
        active.rating = Set(Some(rating));
        active.review = Set(Some(review.to_string()));
        let updated = active.update(&self.db).await?;

        tracing::info!(id, rating, "movie rated");
        Ok(Some(updated))
    }

    /// Returns whether a record was removed.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected > 0 {
            tracing::info!(id, "movie deleted");
        }
        Ok(res.rows_affected > 0)
    }
}
