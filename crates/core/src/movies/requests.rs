use serde_json::{json, Value};

use crate::document::InputItem;
use crate::expression::{
    AttributePath, CompareOp, Condition, KeyCondition, Operand, Projection, UpdateExpression,
};
use crate::store::{
    CreateTableRequest, DeleteItemRequest, GetItemRequest, KeyAttribute, ProvisionedThroughput,
    PutItemRequest, QueryRequest, ReturnValues, ScalarAttributeType, ScanRequest, TableSchema,
    UpdateItemRequest,
};

use super::{
    Movie, INFO, MAX_DELETABLE_RATING, MIN_ACTORS, PROVISIONED_CAPACITY, RATING_INCREMENT,
    TABLE_NAME, TITLE, YEAR,
};

/// Primary key of a movie. The title stays undefined when the caller
/// omitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieKey {
    pub year: i64,
    pub title: Option<Value>,
}

impl MovieKey {
    pub fn new(year: i64, title: impl Into<String>) -> Self {
        Self {
            year,
            title: Some(Value::String(title.into())),
        }
    }

    fn to_input(&self) -> InputItem {
        InputItem::from([
            (YEAR.to_string(), Some(json!(self.year))),
            (TITLE.to_string(), self.title.clone()),
        ])
    }
}

fn info(field: &str) -> AttributePath {
    AttributePath::attr(INFO).field(field)
}

pub fn create_table() -> CreateTableRequest {
    CreateTableRequest {
        table_name: TABLE_NAME.to_string(),
        schema: TableSchema {
            partition_key: KeyAttribute::new(YEAR, ScalarAttributeType::N),
            sort_key: Some(KeyAttribute::new(TITLE, ScalarAttributeType::S)),
        },
        throughput: ProvisionedThroughput {
            read_capacity_units: PROVISIONED_CAPACITY,
            write_capacity_units: PROVISIONED_CAPACITY,
        },
    }
}

pub fn put_movie(year: i64, title: Option<Value>, info: Option<Value>) -> PutItemRequest {
    PutItemRequest {
        table_name: TABLE_NAME.to_string(),
        item: InputItem::from([
            (YEAR.to_string(), Some(json!(year))),
            (TITLE.to_string(), title),
            (INFO.to_string(), info),
        ]),
        condition: None,
    }
}

/// One put per sample record.
pub fn sample_data_requests(movies: &[Movie]) -> Vec<PutItemRequest> {
    movies
        .iter()
        .map(|m| put_movie(m.year, Some(Value::String(m.title.clone())), m.info.clone()))
        .collect()
}

pub fn get_movie(key: &MovieKey) -> GetItemRequest {
    GetItemRequest {
        table_name: TABLE_NAME.to_string(),
        key: key.to_input(),
        projection: None,
        consistent_read: false,
    }
}

/// `SET info.rating = :r, info.plot = :p, info.actors = :a`
pub fn update_movie_info(
    key: &MovieKey,
    rating: Option<Value>,
    plot: Option<Value>,
    actors: Option<Value>,
) -> UpdateItemRequest {
    let update = UpdateExpression::new()
        .set(info("rating"), Operand::value("info.rating", rating))
        .set(info("plot"), Operand::value("info.plot", plot))
        .set(info("actors"), Operand::value("info.actors", actors));

    UpdateItemRequest {
        table_name: TABLE_NAME.to_string(),
        key: key.to_input(),
        update,
        condition: None,
        return_values: ReturnValues::UpdatedNew,
    }
}

/// `SET info.rating = info.rating + 1`
pub fn increment_rating(key: &MovieKey) -> UpdateItemRequest {
    let update = UpdateExpression::new().set_sum(
        info("rating"),
        Operand::path(info("rating")),
        Operand::value("increment", Some(json!(RATING_INCREMENT))),
    );

    UpdateItemRequest {
        table_name: TABLE_NAME.to_string(),
        key: key.to_input(),
        update,
        condition: None,
        return_values: ReturnValues::UpdatedNew,
    }
}

/// `REMOVE info.actors[0]` if `size(info.actors) >= 3`
pub fn remove_first_actor(key: &MovieKey) -> UpdateItemRequest {
    let update = UpdateExpression::new().remove(info("actors").index(0));
    let condition = Condition::compare(
        Operand::size(info("actors")),
        CompareOp::Ge,
        Operand::value("minimum actors", Some(json!(MIN_ACTORS))),
    );

    UpdateItemRequest {
        table_name: TABLE_NAME.to_string(),
        key: key.to_input(),
        update,
        condition: Some(condition),
        return_values: ReturnValues::UpdatedNew,
    }
}

/// Delete if `info.rating <= 8.0`
pub fn delete_movie(key: &MovieKey) -> DeleteItemRequest {
    let condition = Condition::compare(
        Operand::path(info("rating")),
        CompareOp::Le,
        Operand::value("maximum rating", Some(json!(MAX_DELETABLE_RATING))),
    );

    DeleteItemRequest {
        table_name: TABLE_NAME.to_string(),
        key: key.to_input(),
        condition: Some(condition),
    }
}

pub fn query_by_year(year: i64) -> QueryRequest {
    QueryRequest {
        table_name: TABLE_NAME.to_string(),
        key_condition: KeyCondition::partition(YEAR, Some(json!(year))),
        filter: None,
        projection: None,
    }
}

/// Movies of one year whose title lies in `[letter1, letter2]`.
pub fn query_by_year_and_title(
    year: i64,
    letter1: Option<Value>,
    letter2: Option<Value>,
) -> QueryRequest {
    QueryRequest {
        table_name: TABLE_NAME.to_string(),
        key_condition: KeyCondition::partition(YEAR, Some(json!(year)))
            .with_sort_between(TITLE, letter1, letter2),
        filter: None,
        projection: Some(Projection::new(vec![
            AttributePath::attr(YEAR),
            AttributePath::attr(TITLE),
            info("genres"),
            info("actors"),
        ])),
    }
}

/// Every movie with a year in `[start, end]`.
pub fn scan_years(start: i64, end: i64) -> ScanRequest {
    let filter = Condition::between(
        Operand::path(AttributePath::attr(YEAR)),
        Operand::value("start_yr", Some(json!(start))),
        Operand::value("end_yr", Some(json!(end))),
    );

    ScanRequest {
        table_name: TABLE_NAME.to_string(),
        filter: Some(filter),
        projection: Some(Projection::new(vec![
            AttributePath::attr(YEAR),
            AttributePath::attr(TITLE),
            info("rating"),
        ])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{ExpressionRenderer, SetValue};

    #[test]
    fn test_create_table_schema() {
        let request = create_table();
        assert_eq!(request.table_name, "Movies");
        assert_eq!(request.schema.partition_key.attribute_type, ScalarAttributeType::N);
        assert_eq!(request.throughput.read_capacity_units, 10);
        assert_eq!(request.throughput.write_capacity_units, 10);
    }

    #[test]
    fn test_put_movie_keeps_undefined_info() {
        let request = put_movie(2020, Some(json!("Foo")), None);
        assert_eq!(request.item["year"], Some(json!(2020)));
        assert_eq!(request.item["info"], None);
    }

    #[test]
    fn test_update_movie_info_expression() {
        let request = update_movie_info(
            &MovieKey::new(2015, "The Big New Movie"),
            Some(json!(5.5)),
            Some(json!("Everything happens all at once.")),
            Some(json!(["Larry", "Moe", "Curly"])),
        );

        let mut renderer = ExpressionRenderer::new();
        assert_eq!(
            renderer.update(&request.update),
            "SET #n0.#n1 = :v0, #n0.#n2 = :v1, #n0.#n3 = :v2"
        );
        assert_eq!(request.return_values, ReturnValues::UpdatedNew);
    }

    #[test]
    fn test_increment_adds_one() {
        let request = increment_rating(&MovieKey::new(2015, "The Big New Movie"));
        let action = &request.update.set[0];
        assert_eq!(action.path.to_string(), "info.rating");
        assert!(matches!(
            &action.value,
            SetValue::Plus(_, Operand::Value { value: Some(v), .. }) if *v == json!(1)
        ));
    }

    #[test]
    fn test_remove_first_actor_condition() {
        let request = remove_first_actor(&MovieKey::new(2015, "The Big New Movie"));
        let mut renderer = ExpressionRenderer::new();

        assert_eq!(renderer.update(&request.update), "REMOVE #n0.#n1[0]");
        let condition = request.condition.as_ref().unwrap();
        assert_eq!(renderer.condition(condition), "size(#n0.#n1) >= :v0");
    }

    #[test]
    fn test_delete_movie_condition() {
        let request = delete_movie(&MovieKey::new(2015, "The Big New Movie"));
        let mut renderer = ExpressionRenderer::new();

        let condition = renderer.condition(request.condition.as_ref().unwrap());
        let placeholders = renderer.finish();

        assert_eq!(condition, "#n0.#n1 <= :v0");
        assert_eq!(placeholders.values[":v0"].value, Some(json!(8.0)));
    }

    #[test]
    fn test_query_by_year_and_title_projection() {
        let request = query_by_year_and_title(1992, Some(json!("A")), Some(json!("L")));
        let mut renderer = ExpressionRenderer::new();

        assert_eq!(
            renderer.key_condition(&request.key_condition),
            "#n0 = :v0 AND #n1 BETWEEN :v1 AND :v2"
        );
        assert_eq!(
            renderer.projection(request.projection.as_ref().unwrap()),
            "#n0, #n1, #n2.#n3, #n2.#n4"
        );
    }

    #[test]
    fn test_scan_years() {
        let request = scan_years(1950, 1959);
        let mut renderer = ExpressionRenderer::new();

        assert_eq!(
            renderer.condition(request.filter.as_ref().unwrap()),
            "#n0 BETWEEN :v0 AND :v1"
        );
        assert_eq!(
            renderer.projection(request.projection.as_ref().unwrap()),
            "#n0, #n1, #n2.#n3"
        );
    }

    #[test]
    fn test_sample_data_requests() {
        let movies = vec![Movie {
            year: 2013,
            title: "Rush".to_string(),
            info: Some(json!({"rating": 8.3})),
        }];
        let requests = sample_data_requests(&movies);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].item["title"], Some(json!("Rush")));
    }
}
