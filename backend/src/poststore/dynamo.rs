use async_trait::async_trait;
use aws_sdk_dynamodb::{
    error::SdkError,
    operation::put_item::PutItemError,
    types::{
        AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
        ReturnValue, ScalarAttributeType,
    },
};
use shared::{Page, PostInfo};
use tracing::instrument;

use crate::poststore::post_key;

use super::{
    error::{Error, Result},
    paginate, sort_newest_first,
    types::AttributeMap,
    PostEntry, PostStore,
};

const DB_TABLE_NAME: &str = "blog";

#[derive(Clone)]
pub struct DynamoPostsDB {
    db: aws_sdk_dynamodb::Client,
    table: String,
}

#[async_trait]
impl PostStore for DynamoPostsDB {
    #[instrument(skip(self), err)]
    async fn get(&self, slug: &str) -> Result<PostEntry> {
        let key = post_key(slug);

        let res = self
            .db
            .get_item()
            .table_name(&self.table)
            .key("key", AttributeValue::S(key))
            .send()
            .await?;

        let item = res.item().ok_or(Error::ItemNotFound)?;

        PostEntry::try_from(item)
    }

    #[instrument(skip(self, post), err)]
    async fn put(&self, post: PostEntry) -> Result<()> {
        let post_version = post.version;

        let attributes: AttributeMap = post.into();

        let mut request = self
            .db
            .put_item()
            .table_name(&self.table)
            .set_item(Some(attributes));

        if post_version > 0 {
            let old_version_av = AttributeValue::N(post_version.saturating_sub(1).to_string());
            request = request
                .condition_expression("v = :ver")
                .expression_attribute_values(":ver", old_version_av);
        }

        //Note: filter out conditional error
        if let Err(e) = request.send().await {
            if is_condition_failed(&e) {
                return Err(Error::Concurrency);
            }

            return Err(Error::DynamoPut(e));
        }

        Ok(())
    }

    #[instrument(skip(self, post), err)]
    async fn add(&self, post: PostEntry) -> Result<()> {
        let attributes: AttributeMap = post.into();

        let request = self
            .db
            .put_item()
            .table_name(&self.table)
            .set_item(Some(attributes))
            .condition_expression("attribute_not_exists(#k)")
            .expression_attribute_names("#k", "key");

        if let Err(e) = request.send().await {
            if is_condition_failed(&e) {
                return Err(Error::Conflict);
            }

            return Err(Error::DynamoPut(e));
        }

        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, slug: &str) -> Result<bool> {
        let key = post_key(slug);

        let res = self
            .db
            .delete_item()
            .table_name(&self.table)
            .key("key", AttributeValue::S(key))
            .return_values(ReturnValue::AllOld)
            .send()
            .await?;

        Ok(res.attributes().is_some())
    }

    #[instrument(skip(self), err)]
    async fn list(&self, page: usize, page_size: usize) -> Result<Page<PostInfo>> {
        Ok(paginate(self.scan_posts().await?, page, page_size))
    }

    #[instrument(skip(self), err)]
    async fn list_all(&self) -> Result<Vec<PostInfo>> {
        self.scan_posts().await
    }
}

impl DynamoPostsDB {
    pub async fn new(db: aws_sdk_dynamodb::Client, check_table_exists: bool) -> Result<Self> {
        if check_table_exists {
            let resp = db.list_tables().send().await?;
            let names = resp.table_names();

            tracing::trace!("tables: {}", names.join(","));

            if !names.contains(&DB_TABLE_NAME.into()) {
                tracing::info!("table not found, creating now");

                create_table(&db, DB_TABLE_NAME.into(), "key".into()).await?;
            }
        }

        Ok(Self {
            db,
            table: DB_TABLE_NAME.into(),
        })
    }

    async fn scan_posts(&self) -> Result<Vec<PostInfo>> {
        let mut posts = Vec::new();
        let mut start_key: Option<AttributeMap> = None;

        loop {
            let res = self
                .db
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key)
                .send()
                .await?;

            for item in res.items() {
                posts.push(PostEntry::try_from(item)?.post);
            }

            start_key = res.last_evaluated_key().cloned();

            if start_key.is_none() {
                break;
            }
        }

        sort_newest_first(&mut posts);

        Ok(posts)
    }
}

fn is_condition_failed(e: &SdkError<PutItemError>) -> bool {
    matches!(e, SdkError::ServiceError(err)
        if matches!(
            err.err(),
            PutItemError::ConditionalCheckFailedException(_)
        ))
}

async fn create_table(
    client: &aws_sdk_dynamodb::Client,
    table_name: String,
    key_name: String,
) -> Result<()> {
    let ad = AttributeDefinition::builder()
        .attribute_name(&key_name)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| Error::General(format!("table schema: {e}")))?;

    let ks = KeySchemaElement::builder()
        .attribute_name(&key_name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| Error::General(format!("table schema: {e}")))?;

    let pt = ProvisionedThroughput::builder()
        .read_capacity_units(5)
        .write_capacity_units(5)
        .build()
        .map_err(|e| Error::General(format!("table schema: {e}")))?;

    client
        .create_table()
        .table_name(table_name)
        .attribute_definitions(ad)
        .key_schema(ks)
        .provisioned_throughput(pt)
        .send()
        .await?;

    Ok(())
}
