//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `movies_core::store`. The store's
//! own message is kept as the error text.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use movies_core::store::StoreError;

/// Transport failures become `Connection`; service errors go through
/// `service`.
fn map_sdk_error<E, R>(err: SdkError<E, R>, service: impl FnOnce(E) -> StoreError) -> StoreError
where
    E: Error + 'static,
    R: Debug,
{
    match err {
        SdkError::ServiceError(context) => service(context.into_err()),
        err @ (SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)) => {
            StoreError::Connection(DisplayErrorContext(&err).to_string())
        }
        err => StoreError::Service(DisplayErrorContext(&err).to_string()),
    }
}

fn service_message<E: ProvideErrorMetadata + ToString>(err: &E) -> String {
    err.message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}

/// Classify an error the SDK does not model for the operation, by its code.
fn classify(code: Option<&str>, message: String) -> StoreError {
    match code {
        Some("ValidationException") | Some("SerializationException") => {
            StoreError::Validation(message)
        }
        Some("ConditionalCheckFailedException") => StoreError::ConditionalCheckFailed(message),
        Some("ResourceNotFoundException") => StoreError::ResourceNotFound(message),
        Some("ResourceInUseException") => StoreError::ResourceInUse(message),
        Some("ProvisionedThroughputExceededException")
        | Some("RequestLimitExceeded")
        | Some("ThrottlingException") => StoreError::Throttled(message),
        _ => StoreError::Service(message),
    }
}

/// Map a CreateTable SDK error to StoreError.
pub fn map_create_table_error<R: Debug>(err: SdkError<CreateTableError, R>) -> StoreError {
    map_sdk_error(err, |err| {
        let message = service_message(&err);
        match err {
            CreateTableError::ResourceInUseException(_) => StoreError::ResourceInUse(message),
            CreateTableError::LimitExceededException(_) => StoreError::Throttled(message),
            err => classify(err.code(), message),
        }
    })
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug>(err: SdkError<PutItemError, R>) -> StoreError {
    map_sdk_error(err, |err| {
        let message = service_message(&err);
        match err {
            PutItemError::ConditionalCheckFailedException(_) => {
                StoreError::ConditionalCheckFailed(message)
            }
            PutItemError::ResourceNotFoundException(_) => StoreError::ResourceNotFound(message),
            PutItemError::ProvisionedThroughputExceededException(_)
            | PutItemError::RequestLimitExceeded(_) => StoreError::Throttled(message),
            err => classify(err.code(), message),
        }
    })
}

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug>(err: SdkError<GetItemError, R>) -> StoreError {
    map_sdk_error(err, |err| {
        let message = service_message(&err);
        match err {
            GetItemError::ResourceNotFoundException(_) => StoreError::ResourceNotFound(message),
            GetItemError::ProvisionedThroughputExceededException(_)
            | GetItemError::RequestLimitExceeded(_) => StoreError::Throttled(message),
            err => classify(err.code(), message),
        }
    })
}

/// Map an UpdateItem SDK error to StoreError.
pub fn map_update_item_error<R: Debug>(err: SdkError<UpdateItemError, R>) -> StoreError {
    map_sdk_error(err, |err| {
        let message = service_message(&err);
        match err {
            UpdateItemError::ConditionalCheckFailedException(_) => {
                StoreError::ConditionalCheckFailed(message)
            }
            UpdateItemError::ResourceNotFoundException(_) => {
                StoreError::ResourceNotFound(message)
            }
            UpdateItemError::ProvisionedThroughputExceededException(_)
            | UpdateItemError::RequestLimitExceeded(_) => StoreError::Throttled(message),
            err => classify(err.code(), message),
        }
    })
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_item_error<R: Debug>(err: SdkError<DeleteItemError, R>) -> StoreError {
    map_sdk_error(err, |err| {
        let message = service_message(&err);
        match err {
            DeleteItemError::ConditionalCheckFailedException(_) => {
                StoreError::ConditionalCheckFailed(message)
            }
            DeleteItemError::ResourceNotFoundException(_) => {
                StoreError::ResourceNotFound(message)
            }
            DeleteItemError::ProvisionedThroughputExceededException(_)
            | DeleteItemError::RequestLimitExceeded(_) => StoreError::Throttled(message),
            err => classify(err.code(), message),
        }
    })
}

/// Map a Query SDK error to StoreError.
pub fn map_query_error<R: Debug>(err: SdkError<QueryError, R>) -> StoreError {
    map_sdk_error(err, |err| {
        let message = service_message(&err);
        match err {
            QueryError::ResourceNotFoundException(_) => StoreError::ResourceNotFound(message),
            QueryError::ProvisionedThroughputExceededException(_)
            | QueryError::RequestLimitExceeded(_) => StoreError::Throttled(message),
            err => classify(err.code(), message),
        }
    })
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug>(err: SdkError<ScanError, R>) -> StoreError {
    map_sdk_error(err, |err| {
        let message = service_message(&err);
        match err {
            ScanError::ResourceNotFoundException(_) => StoreError::ResourceNotFound(message),
            ScanError::ProvisionedThroughputExceededException(_)
            | ScanError::RequestLimitExceeded(_) => StoreError::Throttled(message),
            err => classify(err.code(), message),
        }
    })
}

/// Map a ListTables SDK error to StoreError.
pub fn map_list_tables_error<R: Debug>(err: SdkError<ListTablesError, R>) -> StoreError {
    map_sdk_error(err, |err| {
        let message = service_message(&err);
        classify(err.code(), message)
    })
}

/// Map a request that could not be built to StoreError.
pub fn map_build_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::Validation(err.to_string())
}
