use std::num::ParseIntError;

use aws_sdk_dynamodb::{
    error::SdkError,
    operation::{
        create_table::CreateTableError, delete_item::DeleteItemError, get_item::GetItemError,
        list_tables::ListTablesError, put_item::PutItemError, scan::ScanError,
    },
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("General Error: {0}")]
    General(String),

    #[error("Malformed Object at field: {0}")]
    MalformedObject(String),

    #[error("Concurrency Error")]
    Concurrency,

    #[error("Item Not Found")]
    ItemNotFound,

    #[error("Duplicate Item")]
    Conflict,

    #[error("ParseInt Error: {0}")]
    ParseInt(#[from] ParseIntError),

    #[error("Dynamo PutItemError: {0}")]
    DynamoPut(#[from] SdkError<PutItemError>),

    #[error("Dynamo GetItemError: {0}")]
    DynamoGetItem(#[from] SdkError<GetItemError>),

    #[error("Dynamo DeleteItemError: {0}")]
    DynamoDeleteItem(#[from] SdkError<DeleteItemError>),

    #[error("Dynamo ScanError: {0}")]
    DynamoScan(#[from] SdkError<ScanError>),

    #[error("Dynamo ListTablesError: {0}")]
    DynamoListTables(#[from] SdkError<ListTablesError>),

    #[error("Dynamo CreateTableError: {0}")]
    DynamoCreateTable(#[from] SdkError<CreateTableError>),
}

pub type Result<T> = std::result::Result<T, Error>;
