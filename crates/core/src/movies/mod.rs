//! The Movies table: record types, request parsing and request builders.
//!
//! Builders are pure: they turn parsed HTTP input into store descriptors.

mod input;
mod report;
mod requests;

pub use input::{
    parse_year, MovieInput, MovieKeyInput, RequestError, UpdateInfoInput, YearQuery,
    YearRangeQuery, YearTitleRangeQuery,
};
pub use report::{BulkLoadReport, FailedRecord, Movie};
pub use requests::{
    create_table, delete_movie, get_movie, increment_rating, put_movie, query_by_year,
    query_by_year_and_title, remove_first_actor, sample_data_requests, scan_years,
    update_movie_info, MovieKey,
};

/// Table holding every movie.
pub const TABLE_NAME: &str = "Movies";
/// Partition key, numeric.
pub const YEAR: &str = "year";
/// Sort key, string.
pub const TITLE: &str = "title";
pub const INFO: &str = "info";

/// Read and write capacity requested at table creation.
pub const PROVISIONED_CAPACITY: i64 = 10;
/// The first actor is only removed when at least this many remain.
pub const MIN_ACTORS: i64 = 3;
/// Movies rated above this cannot be deleted.
pub const MAX_DELETABLE_RATING: f64 = 8.0;
pub const RATING_INCREMENT: i64 = 1;
