use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{PutItemOutput, Result};

/// A record of the sample data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub year: i64,
    pub title: String,
    #[serde(default)]
    pub info: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRecord {
    pub year: i64,
    pub title: String,
    pub message: String,
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkLoadReport {
    pub message: String,
    pub total: usize,
    pub succeeded: usize,
    pub failed: Vec<FailedRecord>,
}

impl BulkLoadReport {
    /// Pair each movie with its put result. `results` is in movie order.
    pub fn from_results(movies: &[Movie], results: &[Result<PutItemOutput>]) -> Self {
        let failed: Vec<FailedRecord> = movies
            .iter()
            .zip(results)
            .filter_map(|(movie, result)| {
                result.as_ref().err().map(|err| FailedRecord {
                    year: movie.year,
                    title: movie.title.clone(),
                    message: err.to_string(),
                })
            })
            .collect();

        Self {
            message: "Success".to_string(),
            total: movies.len(),
            succeeded: movies.len() - failed.len(),
            failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ResponseMetadata, StoreError};

    fn movie(year: i64, title: &str) -> Movie {
        Movie {
            year,
            title: title.to_string(),
            info: None,
        }
    }

    #[test]
    fn test_report_counts_failures() {
        let movies = vec![movie(2013, "Rush"), movie(2013, "Prisoners")];
        let results = vec![
            Ok(PutItemOutput {
                metadata: ResponseMetadata::ok(None),
                attributes: None,
            }),
            Err(StoreError::Throttled("Rate exceeded".to_string())),
        ];

        let report = BulkLoadReport::from_results(&movies, &results);

        assert_eq!(report.message, "Success");
        assert_eq!(report.total, 2);
        assert_eq!(report.succeeded, 1);
        assert_eq!(
            report.failed,
            vec![FailedRecord {
                year: 2013,
                title: "Prisoners".to_string(),
                message: "Rate exceeded".to_string(),
            }]
        );
    }

    #[test]
    fn test_sample_record_without_info() {
        let movie: Movie =
            serde_json::from_str(r#"{"year": 2013, "title": "Rush"}"#).unwrap();
        assert_eq!(movie.info, None);
    }
}
