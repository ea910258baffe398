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

//! The document screen's view-controller.
//!
//! Holds one reading document and a list of similar documents, both fetched
//! by the id the screen was opened with. The two fetches are issued
//! concurrently by the driver and land independently; neither waits for the
//! other. Like [`crate::search::SearchView`], this type performs no I/O:
//! responses are applied through named methods.

use crate::content;
use crate::content::FlattenOptions;
use crate::model::DisplayDoc;
use crate::model::Document;
use crate::visibility::Visibility;

/// Similar-document snippets: at most 240 chars over at most 8 paragraphs,
/// each paragraph indented four spaces on its own line.
const SNIPPET_OPTIONS: FlattenOptions = FlattenOptions {
    max_chars: Some(240),
    max_paragraphs: Some(8),
    paragraph_prefix: "    ",
    paragraph_suffix: "\n",
};

#[derive(Debug)]
pub struct ReaderView {
    doc_id: String,
    reading: Option<DisplayDoc>,
    similar: Vec<DisplayDoc>,
    visibility: Visibility,
}

impl ReaderView {
    /// `doc_id` comes from the navigation that opened the screen. A missing
    /// id is not validated locally; fetches go out with an empty id and the
    /// server reports not-found.
    pub fn new(doc_id: Option<&str>) -> Self {
        let mut visibility = Visibility::new();
        visibility.register("loading-suggestion", &["loading-suggestion"]);
        visibility.set_group_visible("loading-suggestion", true);

        Self {
            doc_id: doc_id.unwrap_or_default().to_string(),
            reading: None,
            similar: Vec::new(),
            visibility,
        }
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    /// Replace the reading document: date reformatted (malformed dates keep
    /// their NaN components), content flattened with no caps.
    pub fn apply_reading_doc(&mut self, doc: &Document) {
        self.reading = Some(DisplayDoc {
            id: doc.id.clone(),
            title: doc.title.clone(),
            date: content::format_date(&doc.date),
            author: doc.author.clone(),
            column: doc.column.clone(),
            content: content::flatten_full(&doc.content),
        });
    }

    /// Replace the similar list with snippets and reveal it.
    pub fn apply_similar_docs(&mut self, docs: &[Document]) {
        self.similar = docs
            .iter()
            .map(|doc| DisplayDoc {
                id: doc.id.clone(),
                title: doc.title.clone(),
                date: content::format_date(&doc.date),
                author: doc.author.clone(),
                column: doc.column.clone(),
                content: content::flatten(&doc.content, &SNIPPET_OPTIONS),
            })
            .collect();
        self.visibility.set_group_visible("loading-suggestion", false);
    }

    pub fn reading(&self) -> Option<&DisplayDoc> {
        self.reading.as_ref()
    }

    pub fn similar(&self) -> &[DisplayDoc] {
        &self.similar
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }
}
