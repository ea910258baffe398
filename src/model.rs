// Copyright 2026 Newsdesk Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wire types shared by the API client and the two view-controllers.

use serde::Deserialize;
use serde::Serialize;

/// Article content as delivered by the backend: a sequence of paragraphs,
/// each a sequence of sentences, each a sequence of tokens.
pub type TokenContent = Vec<Vec<Vec<String>>>;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub date: String,
    pub author: String,
    pub column: String,
    pub content: TokenContent,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    Ok,
    Error,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SearchResponse {
    pub status: ResponseStatus,
    pub message: Option<String>,
    pub docs: Vec<Document>,
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocResponse {
    pub doc: Document,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SimilarDocsResponse {
    pub docs: Vec<Document>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Label shown on the sort toggle.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Asc => "升序",
            SortOrder::Desc => "降序",
        }
    }

    pub fn toggled(self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => anyhow::bail!("unknown sort order {other:?} (expected asc or desc)"),
        }
    }
}

/// Parameters of one search fetch, computed by the search view from its
/// current query, page window, sort order, and date filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub min_index: u64,
    pub max_index: u64,
    pub sort_order: SortOrder,
    pub min_date: String,
    pub max_date: String,
}

/// A document flattened for display: token content joined into a single
/// string, date reformatted.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayDoc {
    pub id: String,
    pub title: String,
    pub date: String,
    pub author: String,
    pub column: String,
    pub content: String,
}

pub fn page_count(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size)
}

pub fn has_prev(page: u64) -> bool {
    page > 1
}

pub fn has_next(page: u64, page_count: u64) -> bool {
    page < page_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_math_matches_contract() {
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(30, 10), 3);
        assert_eq!(page_count(0, 10), 0);

        assert!(has_next(1, 3));
        assert!(has_next(2, 3));
        assert!(!has_next(3, 3));

        assert!(!has_prev(1));
        assert!(has_prev(2));
    }

    #[test]
    fn sort_order_round_trips() {
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
        assert_eq!(SortOrder::Asc.as_str(), "asc");
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("up".parse::<SortOrder>().is_err());
    }

    #[test]
    fn search_response_tolerates_missing_fields() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"status": "error", "message": "invalid query"}"#)
                .expect("parse");
        assert_eq!(resp.status, ResponseStatus::Error);
        assert_eq!(resp.message.as_deref(), Some("invalid query"));
        assert!(resp.docs.is_empty());
        assert_eq!(resp.total, 0);
    }

    #[test]
    fn document_tolerates_missing_fields() {
        let doc: Document = serde_json::from_str(
            r#"{"id": "42", "title": "标题", "date": "2018-01-01",
                "content": [[["人民", "日报"]]], "file_name": "a.txt"}"#,
        )
        .expect("parse");
        assert_eq!(doc.id, "42");
        assert_eq!(doc.author, "");
        assert_eq!(doc.content[0][0][1], "日报");
    }
}
