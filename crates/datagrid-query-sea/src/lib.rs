//! SeaORM backend for datagrid-query
//!
//! `EntitySource<E>` serves any SeaORM entity as a `GridSource`. Field names
//! are resolved to `E::Column` through the column's `FromStr` impl, so grids
//! address columns by their snake_case database names.

use async_trait::async_trait;
use datagrid_query::{
    DataError, DataRow, FilterExpr, GridQuery, GridSource, Operator, OrderKey, Result,
    SortDirection,
};
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    Condition, DatabaseConnection, EntityName, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use serde_json::Value;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

const LIKE_ESCAPE: char = '\\';

/// `GridSource` over the rows of one SeaORM entity
pub struct EntitySource<E> {
    db: Arc<DatabaseConnection>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntitySource<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> EntitySource<E>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    fn column(field: &str) -> Result<E::Column> {
        E::Column::from_str(field).map_err(|_| DataError::unknown_field(field))
    }

    fn order(direction: SortDirection) -> Order {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }

    /// `UPPER(CAST(col AS TEXT)) LIKE UPPER('%needle%') ESCAPE '\'`
    ///
    /// Both sides are folded by the database so they always agree, even where
    /// its `UPPER` only handles ASCII.
    fn icontains(column: E::Column, needle: &str) -> SimpleExpr {
        let text = Func::cast_as(Expr::col((E::default(), column)), Alias::new("TEXT"));
        let pattern = format!("%{}%", like_escape(needle));
        Expr::cust_with_exprs(
            "$1 LIKE UPPER($2) ESCAPE $3",
            [
                SimpleExpr::from(Func::upper(text)),
                Expr::val(pattern).into(),
                Expr::val(LIKE_ESCAPE.to_string()).into(),
            ],
        )
    }

    fn condition(expr: &FilterExpr) -> Result<Condition> {
        match expr {
            FilterExpr::Predicate { field, op, value } => {
                let column = Self::column(field)?;
                let predicate = match op {
                    Operator::IContains => Self::icontains(column, value),
                };
                Ok(Condition::all().add(predicate))
            }
            // an empty disjunction has nothing that could match
            FilterExpr::Any { exprs } if exprs.is_empty() => {
                Ok(Condition::all().add(Expr::cust("1=0")))
            }
            FilterExpr::Any { exprs } => {
                let mut cond = Condition::any();
                for expr in exprs {
                    cond = cond.add(Self::condition(expr)?);
                }
                Ok(cond)
            }
            FilterExpr::All { exprs } => {
                let mut cond = Condition::all();
                for expr in exprs {
                    cond = cond.add(Self::condition(expr)?);
                }
                Ok(cond)
            }
        }
    }

    fn filtered(query: &GridQuery) -> Result<Select<E>> {
        let mut select = E::find();
        for expr in &query.filters {
            select = select.filter(Self::condition(expr)?);
        }
        Ok(select)
    }

    fn ordered(mut select: Select<E>, keys: &[OrderKey]) -> Result<Select<E>> {
        for key in keys {
            select = select.order_by(Self::column(&key.field)?, Self::order(key.direction));
        }
        Ok(select)
    }
}

fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

fn into_row(value: Value) -> Result<DataRow> {
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(DataError::SerializationError(format!(
            "expected a JSON object per row, got {}",
            other
        ))),
    }
}

#[async_trait]
impl<E> GridSource for EntitySource<E>
where
    E: EntityTrait,
    E::Column: FromStr,
    E::Model: Sync,
{
    fn source_type(&self) -> &'static str {
        "sea-orm"
    }

    async fn count(&self, query: &GridQuery) -> Result<u64> {
        Self::filtered(query)?
            .count(self.db.as_ref())
            .await
            .map_err(|e| DataError::query_failed(e.to_string()))
    }

    async fn fetch(&self, query: &GridQuery, offset: u64, limit: u64) -> Result<Vec<DataRow>> {
        let select = Self::ordered(Self::filtered(query)?, &query.order)?;

        debug!(
            table = E::default().table_name(),
            order = query.order.len(),
            filters = query.filters.len(),
            offset,
            limit,
            "Fetching grid page"
        );

        let rows = select
            .offset(offset)
            .limit(limit)
            .into_json()
            .all(self.db.as_ref())
            .await
            .map_err(|e| DataError::query_failed(e.to_string()))?;

        rows.into_iter().map(into_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagrid_database::{demo_people, test_utils::TestDatabase, PersonSeed};
    use datagrid_entities::people;
    use datagrid_query::{display_value, predicate, MemorySource};

    async fn source() -> anyhow::Result<(TestDatabase, EntitySource<people::Entity>)> {
        let test_db = TestDatabase::with_people(&demo_people()).await?;
        let source = EntitySource::<people::Entity>::new(test_db.connection());
        Ok((test_db, source))
    }

    fn names(rows: &[DataRow]) -> Vec<String> {
        rows.iter().map(|row| display_value(&row["name"])).collect()
    }

    #[test]
    fn test_like_escape() {
        assert_eq!(like_escape("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(like_escape("plain"), "plain");
    }

    #[tokio::test]
    async fn test_icontains_is_case_insensitive() -> anyhow::Result<()> {
        let (_db, source) = source().await?;
        let query = GridQuery::new().filter(predicate("name", Operator::IContains, "JO"));

        assert_eq!(source.count(&query).await?, 2);
        let rows = source
            .fetch(&query.order_by([OrderKey::asc("name")]), 0, 10)
            .await?;
        assert_eq!(names(&rows), vec!["Joanna Reyes", "John Carter"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_icontains_matches_non_ascii_text() -> anyhow::Result<()> {
        let test_db = TestDatabase::with_people(&[PersonSeed {
            name: "José Álvarez",
            email: "jose@example.es",
            city: Some("Sevilla"),
            age: 38,
        }])
        .await?;
        let source = EntitySource::<people::Entity>::new(test_db.connection());
        let memory = MemorySource::new(source.fetch(&GridQuery::new(), 0, 10).await?);

        for needle in ["é", "Álv", "josé"] {
            let query = GridQuery::new().filter(predicate("name", Operator::IContains, needle));
            assert_eq!(source.count(&query).await?, 1, "searching {}", needle);
            assert_eq!(memory.count(&query).await?, 1, "searching {}", needle);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_icontains_on_integer_column() -> anyhow::Result<()> {
        let (_db, source) = source().await?;
        let query = GridQuery::new().filter(predicate("age", Operator::IContains, "2"));

        let rows = source
            .fetch(&query.order_by([OrderKey::asc("age")]), 0, 10)
            .await?;
        assert_eq!(names(&rows), vec!["Carla Diaz", "Amy Pond", "John Carter"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_like_wildcards_are_literal() -> anyhow::Result<()> {
        let (_db, source) = source().await?;
        let query = GridQuery::new().filter(predicate("email", Operator::IContains, "%"));
        assert_eq!(source.count(&query).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_any_and_all_compose() -> anyhow::Result<()> {
        let (_db, source) = source().await?;
        let query = GridQuery::new()
            .filter(FilterExpr::any([
                predicate("name", Operator::IContains, "o"),
                predicate("city", Operator::IContains, "o"),
            ]))
            .filter(FilterExpr::all([predicate(
                "email",
                Operator::IContains,
                ".org",
            )]));

        let rows = source
            .fetch(&query.order_by([OrderKey::asc("name")]), 0, 10)
            .await?;
        assert_eq!(names(&rows), vec!["Bert Olsen", "Joanna Reyes"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_any_matches_nothing() -> anyhow::Result<()> {
        let (_db, source) = source().await?;
        let query = GridQuery::new().filter(FilterExpr::any([]));
        assert_eq!(source.count(&query).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_order_and_slice() -> anyhow::Result<()> {
        let (_db, source) = source().await?;
        let query = GridQuery::new().order_by([OrderKey::desc("city"), OrderKey::asc("name")]);

        let rows = source.fetch(&query, 1, 3).await?;
        assert_eq!(names(&rows), vec!["Joanna Reyes", "John Carter", "Amy Pond"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_field_is_rejected() -> anyhow::Result<()> {
        let (_db, source) = source().await?;
        let query = GridQuery::new().order_by([OrderKey::asc("salary")]);

        let err = source.fetch(&query, 0, 10).await.unwrap_err();
        assert!(matches!(err, DataError::UnknownField(ref f) if f == "salary"));
        Ok(())
    }

    #[tokio::test]
    async fn test_rows_carry_every_column() -> anyhow::Result<()> {
        let (_db, source) = source().await?;
        let rows = source.fetch(&GridQuery::new(), 0, 1).await?;

        let row = &rows[0];
        for field in ["id", "name", "email", "city", "age", "created_at"] {
            assert!(row.contains_key(field), "missing {}", field);
        }
        Ok(())
    }
}
