use std::collections::{HashMap, HashSet};

use aws_sdk_dynamodb::types::AttributeValue;
use shared::{PostData, PostInfo};

use crate::utils::format_timestamp;

use super::{post_key, Error};

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct PostEntry {
    pub post: PostInfo,
    pub version: usize,
}

impl PostEntry {
    pub const fn new(post: PostInfo) -> Self {
        Self { post, version: 0 }
    }

    pub fn bump_version(&mut self) {
        self.version += 1;
    }
}

pub type AttributeMap = HashMap<std::string::String, AttributeValue>;

const CURRENT_FORMAT: usize = 1;

impl TryFrom<&AttributeMap> for PostEntry {
    type Error = super::Error;

    fn try_from(value: &AttributeMap) -> Result<Self, Error> {
        let version = value["v"]
            .as_n()
            .map_err(|_| Error::MalformedObject("v".into()))?
            .parse::<usize>()?;

        let post = attributes_to_post(
            value["post"]
                .as_m()
                .map_err(|_| Error::MalformedObject("post".into()))?,
        )?;

        Ok(Self { post, version })
    }
}

impl From<PostEntry> for AttributeMap {
    fn from(value: PostEntry) -> Self {
        let mut map = Self::new();
        let post_key = post_key(&value.post.slug);

        let post_av = post_to_attributes(value.post);
        let version_av = AttributeValue::N(value.version.to_string());
        let format_av = AttributeValue::N(CURRENT_FORMAT.to_string());
        let key_av = AttributeValue::S(post_key);

        map.insert("key".into(), key_av);
        map.insert("format".into(), format_av);
        map.insert("v".into(), version_av);
        map.insert("post".into(), AttributeValue::M(post_av));

        map
    }
}

const ATTR_POST_SLUG: &str = "slug";
const ATTR_POST_VIEWS: &str = "views";
const ATTR_POST_CREATE_TIME: &str = "create_time";
const ATTR_POST_LAST_EDIT: &str = "last_edit";
const ATTR_POST_DATA: &str = "data";

fn post_to_attributes(value: PostInfo) -> AttributeMap {
    vec![
        (ATTR_POST_SLUG.into(), AttributeValue::S(value.slug)),
        (
            ATTR_POST_VIEWS.into(),
            AttributeValue::N(value.views.to_string()),
        ),
        (
            ATTR_POST_CREATE_TIME.into(),
            AttributeValue::N(value.create_time_unix.to_string()),
        ),
        (
            ATTR_POST_LAST_EDIT.into(),
            AttributeValue::N(value.last_edit_unix.to_string()),
        ),
        (
            ATTR_POST_DATA.into(),
            AttributeValue::M(data_to_attributes(value.data)),
        ),
    ]
    .into_iter()
    .collect()
}

fn attributes_to_post(value: &AttributeMap) -> Result<PostInfo, Error> {
    let slug = value[ATTR_POST_SLUG]
        .as_s()
        .map_err(|_| Error::MalformedObject(ATTR_POST_SLUG.into()))?
        .clone();

    let views = value[ATTR_POST_VIEWS]
        .as_n()
        .map_err(|_| Error::MalformedObject(ATTR_POST_VIEWS.into()))?
        .parse::<u64>()?;

    let create_time_unix = value[ATTR_POST_CREATE_TIME]
        .as_n()
        .map_err(|_| Error::MalformedObject(ATTR_POST_CREATE_TIME.into()))?
        .parse::<i64>()?;

    let last_edit_unix = value[ATTR_POST_LAST_EDIT]
        .as_n()
        .map_err(|_| Error::MalformedObject(ATTR_POST_LAST_EDIT.into()))?
        .parse::<i64>()?;

    let data = attributes_to_data(
        value[ATTR_POST_DATA]
            .as_m()
            .map_err(|_| Error::MalformedObject(ATTR_POST_DATA.into()))?,
    )?;

    Ok(PostInfo {
        slug,
        data,
        views,
        create_time_unix,
        last_edit_unix,
        create_time_utc: format_timestamp(create_time_unix),
    })
}

const ATTR_DATA_TITLE: &str = "title";
const ATTR_DATA_BODY: &str = "body";
const ATTR_DATA_TAGS: &str = "tags";

fn data_to_attributes(value: PostData) -> AttributeMap {
    // sorted for a stable wire image
    let mut tags: Vec<String> = value.tags.into_iter().collect();
    tags.sort_unstable();

    vec![
        (ATTR_DATA_TITLE.into(), AttributeValue::S(value.title)),
        (ATTR_DATA_BODY.into(), AttributeValue::S(value.body)),
        (
            ATTR_DATA_TAGS.into(),
            AttributeValue::L(tags.into_iter().map(AttributeValue::S).collect()),
        ),
    ]
    .into_iter()
    .collect()
}

fn attributes_to_data(value: &AttributeMap) -> Result<PostData, Error> {
    let title = value[ATTR_DATA_TITLE]
        .as_s()
        .map_err(|_| Error::MalformedObject(ATTR_DATA_TITLE.into()))?
        .clone();

    let body = value[ATTR_DATA_BODY]
        .as_s()
        .map_err(|_| Error::MalformedObject(ATTR_DATA_BODY.into()))?
        .clone();

    let tags = value[ATTR_DATA_TAGS]
        .as_l()
        .map_err(|_| Error::MalformedObject(ATTR_DATA_TAGS.into()))?
        .iter()
        .filter_map(|tag| tag.as_s().ok().cloned())
        .collect::<HashSet<_>>();

    Ok(PostData { title, body, tags })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_entry() -> PostEntry {
        PostEntry {
            post: PostInfo {
                slug: String::from("first-post"),
                data: PostData {
                    title: String::from("First Post"),
                    body: String::from("hello world"),
                    tags: [String::from("rust"), String::from("blog")]
                        .into_iter()
                        .collect(),
                },
                views: 7,
                create_time_unix: 1_589_961_534,
                last_edit_unix: 1_589_961_600,
                create_time_utc: format_timestamp(1_589_961_534),
            },
            version: 3,
        }
    }

    #[test]
    fn test_attribute_roundtrip() {
        let entry = sample_entry();

        let map: AttributeMap = entry.clone().into();
        let restored = PostEntry::try_from(&map).unwrap();

        assert_eq!(entry, restored);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let mut map: AttributeMap = sample_entry().into();
        map.insert("v".into(), AttributeValue::S(String::from("oops")));

        let res = PostEntry::try_from(&map);

        assert!(matches!(res, Err(Error::MalformedObject(field)) if field == "v"));
    }
}
