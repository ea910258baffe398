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

//! The search screen's view-controller.
//!
//! Owns the query, pagination, sort order, and date filter, and turns API
//! responses into pure display state (document list, stat line, visibility
//! flags). It performs no I/O itself: [`SearchView::begin_search`] yields the
//! parameters of a fetch and [`SearchView::apply_response`] consumes its
//! outcome. Every dispatch carries a sequence number; a response whose
//! number is no longer current is discarded, so a slow page-2 reply can
//! never overwrite page 3.

use std::time::Instant;

use crate::content;
use crate::model::DisplayDoc;
use crate::model::ResponseStatus;
use crate::model::SearchRequest;
use crate::model::SearchResponse;
use crate::model::SortOrder;
use crate::model::has_next;
use crate::model::has_prev;
use crate::model::page_count;
use crate::visibility::Visibility;

pub const HIGHLIGHT_OPEN: &str = "\x1b[1;33m";
pub const HIGHLIGHT_CLOSE: &str = "\x1b[0m";

/// Boolean-operator tokens stripped from the query before highlighting.
const OPERATOR_TOKENS: [&str; 7] = ["and", "or", "not", "(", ")", "（", "）"];

const INVALID_QUERY_MESSAGE: &str = "invalid query";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Shown,
    Empty,
    InvalidQuery,
    InvalidDate,
    Error,
}

/// One date-filter endpoint as three raw sub-fields.
#[derive(Debug, Clone, Default)]
pub struct DateFields {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DateFields {
    pub fn new(year: &str, month: &str, day: &str) -> Self {
        Self {
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
        }
    }

    /// Zero-padded `yyyy-mm-dd`, or `None` when any sub-field is out of
    /// range. Ranges only; Feb 30 passes (no calendar cross-check).
    pub fn to_iso(&self) -> Option<String> {
        let year: u64 = self.year.trim().parse().ok()?;
        let month: u64 = self.month.trim().parse().ok()?;
        let day: u64 = self.day.trim().parse().ok()?;
        if year > 9999 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(format!("{year:04}-{month:02}-{day:02}"))
    }
}

/// A dispatched fetch: the request parameters plus the sequence number that
/// [`SearchView::apply_response`] must echo back.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    pub seq: u64,
    pub request: SearchRequest,
}

#[derive(Debug)]
pub struct SearchView {
    page_size: u64,
    query: Option<String>,
    sort_order: SortOrder,
    page: u64,
    page_count: u64,
    min_date: DateFields,
    max_date: DateFields,
    docs: Vec<DisplayDoc>,
    total: u64,
    stat_line: Option<String>,
    phase: Phase,
    query_invalid: bool,
    date_invalid: bool,
    visibility: Visibility,
    seq: u64,
    started_at: Option<Instant>,
}

impl SearchView {
    pub fn new(page_size: u64) -> Self {
        let mut visibility = Visibility::new();
        visibility.register("page-nav-container", &["page-nav"]);
        visibility.register("page-nav-prev", &["page-nav"]);
        visibility.register("page-nav-next", &["page-nav"]);
        visibility.register("no-result-text", &[]);
        visibility.set_one_visible("no-result-text", false);

        let mut view = Self {
            page_size,
            query: None,
            sort_order: SortOrder::Desc,
            page: 1,
            page_count: 1,
            min_date: DateFields::new("2000", "1", "1"),
            max_date: DateFields::new("2015", "12", "31"),
            docs: Vec::new(),
            total: 0,
            stat_line: None,
            phase: Phase::Idle,
            query_invalid: false,
            date_invalid: false,
            visibility,
            seq: 0,
            started_at: None,
        };
        view.update_page_nav();
        view
    }

    /// Submit new query text: resets to page 1 and dispatches.
    pub fn submit(&mut self, text: &str) -> Option<PendingSearch> {
        self.query = Some(text.to_string());
        self.page = 1;
        self.begin_search()
    }

    /// Dispatch a fetch for the current state. Returns `None` without any
    /// network effect when there is no query yet or the date filter is
    /// invalid (the latter tints the date fields).
    pub fn begin_search(&mut self) -> Option<PendingSearch> {
        let query = self.query.clone()?;
        let (Some(min_date), Some(max_date)) = (self.min_date.to_iso(), self.max_date.to_iso())
        else {
            self.date_invalid = true;
            self.phase = Phase::InvalidDate;
            return None;
        };
        self.date_invalid = false;

        let min_index = (self.page - 1) * self.page_size;
        self.seq += 1;
        self.started_at = Some(Instant::now());
        self.phase = Phase::Loading;
        Some(PendingSearch {
            seq: self.seq,
            request: SearchRequest {
                query,
                min_index,
                max_index: min_index + self.page_size,
                sort_order: self.sort_order,
                min_date,
                max_date,
            },
        })
    }

    /// Apply a search response. A stale sequence number is discarded
    /// without touching any state.
    pub fn apply_response(&mut self, seq: u64, response: &SearchResponse) {
        if seq != self.seq {
            return;
        }

        let elapsed = self
            .started_at
            .map(|start| start.elapsed().as_millis() as f64 / 1000.0)
            .unwrap_or(0.0);

        self.query_invalid = false;
        self.docs.clear();
        self.total = response.total;
        self.page_count = page_count(response.total, self.page_size);

        match response.status {
            ResponseStatus::Error => {
                let message = response.message.clone().unwrap_or_default();
                if message == INVALID_QUERY_MESSAGE {
                    self.phase = Phase::InvalidQuery;
                    self.query_invalid = true;
                } else {
                    self.phase = Phase::Error;
                }
                self.stat_line = Some(message);
                self.visibility.set_one_visible("no-result-text", false);
            }
            ResponseStatus::Ok if response.total == 0 => {
                self.phase = Phase::Empty;
                self.visibility.set_one_visible("no-result-text", true);
                self.stat_line = Some(stat_line(0, 0, elapsed));
            }
            ResponseStatus::Ok => {
                for doc in &response.docs {
                    self.docs.push(DisplayDoc {
                        id: doc.id.clone(),
                        title: doc.title.clone(),
                        date: content::format_date(&doc.date),
                        author: doc.author.clone(),
                        column: doc.column.clone(),
                        content: content::flatten_full(&doc.content),
                    });
                }
                self.phase = Phase::Shown;
                self.visibility.set_one_visible("no-result-text", false);
                self.stat_line = Some(stat_line(self.docs.len(), response.total, elapsed));
            }
        }

        self.update_page_nav();
    }

    pub fn prev_page(&mut self) -> Option<PendingSearch> {
        let pending = if has_prev(self.page) {
            self.page -= 1;
            self.begin_search()
        } else {
            None
        };
        self.update_page_nav();
        pending
    }

    pub fn next_page(&mut self) -> Option<PendingSearch> {
        let pending = if has_next(self.page, self.page_count) {
            self.page += 1;
            self.begin_search()
        } else {
            None
        };
        self.update_page_nav();
        pending
    }

    /// Jump to a typed page number. Out-of-range numbers are rejected: the
    /// page stays where it was and nothing is fetched.
    pub fn set_page(&mut self, page: u64) -> Option<PendingSearch> {
        if page < 1 || page > self.page_count {
            return None;
        }
        self.page = page;
        let pending = self.begin_search();
        self.update_page_nav();
        pending
    }

    /// Flip the sort order. Always returns to page 1 before re-searching;
    /// the previous page number is meaningless under the new order.
    pub fn toggle_sort(&mut self) -> Option<PendingSearch> {
        self.sort_order = self.sort_order.toggled();
        self.page = 1;
        self.begin_search()
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub fn set_min_date(&mut self, fields: DateFields) {
        self.min_date = fields;
    }

    pub fn set_max_date(&mut self, fields: DateFields) {
        self.max_date = fields;
    }

    /// Wrap every occurrence of every query token in highlight markers.
    pub fn highlight(&self, text: &str) -> String {
        match &self.query {
            Some(query) => highlight_with(query, text, HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE),
            None => text.to_string(),
        }
    }

    fn update_page_nav(&mut self) {
        if self.docs.is_empty() {
            self.visibility.set_group_visible("page-nav", false);
        } else {
            self.visibility.set_one_visible("page-nav-container", true);
            self.visibility
                .set_one_visible("page-nav-prev", has_prev(self.page));
            self.visibility
                .set_one_visible("page-nav-next", has_next(self.page, self.page_count));
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn docs(&self) -> &[DisplayDoc] {
        &self.docs
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_count(&self) -> u64 {
        self.page_count
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn stat_line(&self) -> Option<&str> {
        self.stat_line.as_deref()
    }

    pub fn query_invalid(&self) -> bool {
        self.query_invalid
    }

    pub fn date_invalid(&self) -> bool {
        self.date_invalid
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }
}

fn stat_line(count: usize, total: u64, elapsed: f64) -> String {
    format!("{count} 个结果（总：{total}）耗时 {elapsed} 秒")
}

/// Strip boolean operators from the query, split it into tokens, and wrap
/// every occurrence of every token in `text` with the given markers.
///
/// Matching is case-insensitive; the original casing is kept in the output.
/// Tokens are applied one after another to the already-marked string, so a
/// token can re-match literal text inserted by an earlier marker.
pub fn highlight_with(query: &str, text: &str, open: &str, close: &str) -> String {
    let mut stripped = query.to_lowercase();
    for op in OPERATOR_TOKENS {
        stripped = stripped.replace(op, " ");
    }

    let mut out = text.to_string();
    for token in stripped.split_whitespace() {
        out = mark_occurrences(&out, token, open, close);
    }
    out
}

fn mark_occurrences(text: &str, token: &str, open: &str, close: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let token_lower: Vec<char> = token.chars().map(lower_first).collect();
    let len = token_lower.len();
    if len == 0 {
        return text.to_string();
    }

    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        let matches = i + len <= chars.len()
            && chars[i..i + len]
                .iter()
                .map(|c| lower_first(*c))
                .eq(token_lower.iter().copied());
        if matches {
            out.push_str(open);
            out.extend(&chars[i..i + len]);
            out.push_str(close);
            i += len;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn lower_first(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;

    fn doc(id: &str, title: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            date: "2008-05-12".to_string(),
            author: "记者".to_string(),
            column: "要闻".to_string(),
            content: vec![vec![vec!["正文".to_string()]]],
            file_name: None,
        }
    }

    fn ok_response(count: usize, total: u64) -> SearchResponse {
        SearchResponse {
            status: ResponseStatus::Ok,
            message: None,
            docs: (0..count).map(|i| doc(&i.to_string(), "标题")).collect(),
            total,
        }
    }

    fn error_response(message: &str) -> SearchResponse {
        SearchResponse {
            status: ResponseStatus::Error,
            message: Some(message.to_string()),
            docs: Vec::new(),
            total: 0,
        }
    }

    #[test]
    fn no_query_means_no_fetch() {
        let mut view = SearchView::new(10);
        assert!(view.begin_search().is_none());
        assert_eq!(view.phase(), Phase::Idle);
    }

    #[test]
    fn submit_builds_page_window() {
        let mut view = SearchView::new(10);
        let pending = view.submit("深圳 and 香港").expect("pending");
        assert_eq!(pending.request.query, "深圳 and 香港");
        assert_eq!(pending.request.min_index, 0);
        assert_eq!(pending.request.max_index, 10);
        assert_eq!(pending.request.sort_order, SortOrder::Desc);
        assert_eq!(pending.request.min_date, "2000-01-01");
        assert_eq!(pending.request.max_date, "2015-12-31");
        assert_eq!(view.phase(), Phase::Loading);
    }

    #[test]
    fn invalid_date_blocks_fetch_and_tints() {
        let mut view = SearchView::new(10);
        view.set_min_date(DateFields::new("2000", "13", "1"));
        assert!(view.submit("深圳").is_none());
        assert!(view.date_invalid());
        assert_eq!(view.phase(), Phase::InvalidDate);
    }

    #[test]
    fn feb_30_passes_range_checks() {
        assert_eq!(
            DateFields::new("2001", "2", "30").to_iso().as_deref(),
            Some("2001-02-30")
        );
        assert!(DateFields::new("2001", "0", "1").to_iso().is_none());
        assert!(DateFields::new("2001", "1", "32").to_iso().is_none());
        assert!(DateFields::new("10000", "1", "1").to_iso().is_none());
        assert!(DateFields::new("", "1", "1").to_iso().is_none());
    }

    #[test]
    fn date_fields_are_zero_padded() {
        assert_eq!(
            DateFields::new("16", "3", "5").to_iso().as_deref(),
            Some("0016-03-05")
        );
    }

    #[test]
    fn shown_response_flattens_and_reformats() {
        let mut view = SearchView::new(10);
        let pending = view.submit("正文").expect("pending");
        view.apply_response(pending.seq, &ok_response(10, 25));

        assert_eq!(view.phase(), Phase::Shown);
        assert_eq!(view.docs().len(), 10);
        assert_eq!(view.docs()[0].date, "2008年5月12日");
        assert_eq!(view.docs()[0].content, "正文");
        assert_eq!(view.page_count(), 3);
        let stat = view.stat_line().expect("stat");
        assert!(stat.starts_with("10 个结果（总：25）耗时 "));
        assert!(stat.ends_with(" 秒"));
        assert!(!view.visibility().is_visible("no-result-text"));
        assert!(view.visibility().is_visible("page-nav-container"));
        assert!(!view.visibility().is_visible("page-nav-prev"));
        assert!(view.visibility().is_visible("page-nav-next"));
    }

    #[test]
    fn empty_response_shows_placeholder() {
        let mut view = SearchView::new(10);
        let pending = view.submit("没有的词").expect("pending");
        view.apply_response(pending.seq, &ok_response(0, 0));

        assert_eq!(view.phase(), Phase::Empty);
        assert!(view.docs().is_empty());
        assert!(view.visibility().is_visible("no-result-text"));
        assert!(!view.visibility().is_visible("page-nav-container"));
    }

    #[test]
    fn invalid_query_tints_and_clears() {
        let mut view = SearchView::new(10);
        let pending = view.submit("and and").expect("pending");
        view.apply_response(pending.seq, &ok_response(10, 25));

        let pending = view.begin_search().expect("pending");
        view.apply_response(pending.seq, &error_response("invalid query"));
        assert_eq!(view.phase(), Phase::InvalidQuery);
        assert!(view.query_invalid());
        assert!(view.docs().is_empty());
        assert_eq!(view.stat_line(), Some("invalid query"));
    }

    #[test]
    fn generic_error_clears_without_tint() {
        let mut view = SearchView::new(10);
        let pending = view.submit("深圳").expect("pending");
        view.apply_response(pending.seq, &error_response("backend unavailable"));

        assert_eq!(view.phase(), Phase::Error);
        assert!(!view.query_invalid());
        assert!(view.docs().is_empty());
        assert_eq!(view.stat_line(), Some("backend unavailable"));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut view = SearchView::new(10);
        let first = view.submit("深圳").expect("pending");
        assert!(view.next_page().is_none()); // page_count still 1

        let second = view.begin_search().expect("pending");
        // The older dispatch arrives after the newer one was issued.
        view.apply_response(first.seq, &ok_response(10, 100));
        assert_eq!(view.phase(), Phase::Loading);
        assert!(view.docs().is_empty());

        view.apply_response(second.seq, &ok_response(10, 25));
        assert_eq!(view.phase(), Phase::Shown);
        assert_eq!(view.page_count(), 3);
    }

    #[test]
    fn out_of_range_page_is_rejected() {
        let mut view = SearchView::new(10);
        let pending = view.submit("深圳").expect("pending");
        view.apply_response(pending.seq, &ok_response(10, 25));

        assert!(view.set_page(0).is_none());
        assert!(view.set_page(4).is_none());
        assert_eq!(view.page(), 1);

        let pending = view.set_page(3).expect("pending");
        assert_eq!(pending.request.min_index, 20);
        assert_eq!(pending.request.max_index, 30);
    }

    #[test]
    fn paging_moves_within_bounds() {
        let mut view = SearchView::new(10);
        let pending = view.submit("深圳").expect("pending");
        view.apply_response(pending.seq, &ok_response(10, 25));

        assert!(view.prev_page().is_none());
        assert_eq!(view.page(), 1);

        let pending = view.next_page().expect("pending");
        assert_eq!(view.page(), 2);
        view.apply_response(pending.seq, &ok_response(10, 25));
        assert!(view.visibility().is_visible("page-nav-prev"));
        assert!(view.visibility().is_visible("page-nav-next"));

        let pending = view.next_page().expect("pending");
        assert_eq!(view.page(), 3);
        view.apply_response(pending.seq, &ok_response(5, 25));
        assert!(!view.visibility().is_visible("page-nav-next"));
        assert!(view.next_page().is_none());
        assert_eq!(view.page(), 3);
    }

    #[test]
    fn toggle_sort_resets_to_page_one() {
        let mut view = SearchView::new(10);
        let pending = view.submit("深圳").expect("pending");
        view.apply_response(pending.seq, &ok_response(10, 25));
        let pending = view.set_page(3).expect("pending");
        view.apply_response(pending.seq, &ok_response(5, 25));

        let pending = view.toggle_sort().expect("pending");
        assert_eq!(view.page(), 1);
        assert_eq!(pending.request.min_index, 0);
        assert_eq!(pending.request.sort_order, SortOrder::Asc);
        assert_eq!(view.sort_order().label(), "升序");
    }

    #[test]
    fn highlight_wraps_each_token() {
        let out = highlight_with("cats dogs", "Cats chase dogs", "<", ">");
        assert_eq!(out, "<Cats> chase <dogs>");
    }

    #[test]
    fn highlight_strips_operators_and_collapses_spaces() {
        let out = highlight_with("（深圳） and 香港", "深圳与香港", "<", ">");
        assert_eq!(out, "<深圳>与<香港>");
    }

    #[test]
    fn highlight_matches_case_insensitively_keeping_original() {
        let out = highlight_with("WTO", "中国加入wto，Wto元年", "<", ">");
        assert_eq!(out, "中国加入<wto>，<Wto>元年");
    }

    #[test]
    fn highlight_marks_every_occurrence() {
        let out = highlight_with("报", "日报晚报", "<", ">");
        assert_eq!(out, "日<报>晚<报>");
    }

    #[test]
    fn highlight_can_rematch_marker_text() {
        // Sequential application: the second token finds the literal "m"
        // inserted by the first token's marker.
        let out = highlight_with("a m", "am", "<m>", "</m>");
        assert_eq!(out, "<<m>m</m>>a</<m>m</m>><m>m</m>");
    }

    #[test]
    fn highlight_without_query_is_identity() {
        let view = SearchView::new(10);
        assert_eq!(view.highlight("原文"), "原文");
    }

    #[test]
    fn operator_stripping_cuts_through_words() {
        // "and" is removed wherever it appears, even inside a word:
        // "standard" degrades to the tokens "st" and "ard".
        let out = highlight_with("standard", "st ard", "<", ">");
        assert_eq!(out, "<st> <ard>");
    }
}
