mod validation;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
pub use validation::{AddPostErrors, ValidationError};

pub const POSTS_PER_PAGE: usize = 5;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Eq, PartialEq)]
pub struct PostData {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: HashSet<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, Default)]
pub struct PostInfo {
    pub slug: String,
    pub data: PostData,
    pub views: u64,
    #[serde(rename = "createTimeUnix")]
    pub create_time_unix: i64,
    #[serde(rename = "lastEditUnix")]
    pub last_edit_unix: i64,
    #[serde(rename = "createTimeUTC")]
    pub create_time_utc: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AddPost {
    #[serde(rename = "postData")]
    pub data: PostData,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EditPost {
    #[serde(rename = "postData")]
    pub data: PostData,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    #[serde(rename = "pageSize")]
    pub page_size: usize,
    #[serde(rename = "totalItems")]
    pub total_items: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_items.div_ceil(self.page_size)
        }
    }
}

/// Derives the url identifier of a post from its title.
///
/// Lowercases ascii letters, keeps digits and replaces everything
/// else with a single dash. Slugs are immutable once a post exists,
/// editing a title later does not move the post.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Rust: 2024 Edition!  "), "rust-2024-edition");
        assert_eq!(slugify("a--b"), "a-b");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_total_pages() {
        let page = Page::<i32> {
            items: Vec::new(),
            page: 1,
            page_size: 5,
            total_items: 11,
        };

        assert_eq!(page.total_pages(), 3);

        let page = Page::<i32> {
            items: Vec::new(),
            page: 1,
            page_size: 5,
            total_items: 10,
        };

        assert_eq!(page.total_pages(), 2);
    }
}
