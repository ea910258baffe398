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

//! Terminal rendering of the two screens.
//!
//! Pure functions from view state to text; the views never print and this
//! module never mutates. Tinted inputs of the original page become bracketed
//! warning lines, CSS visibility becomes lines that are present or absent.

use std::fmt::Write as _;

use crate::reader::ReaderView;
use crate::search::Phase;
use crate::search::SearchView;

pub const PAGE_TITLE: &str = "人民日报 00 至 15 年的新闻";
pub const NO_RESULT_TEXT: &str = "没有找到相关结果";
pub const LOADING_SUGGESTION_TEXT: &str = "正在加载相关推荐……";
pub const INVALID_DATE_TEXT: &str = "【日期输入无效】";
pub const INVALID_QUERY_TEXT: &str = "【查询无效】";

pub fn render_search(view: &SearchView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{PAGE_TITLE}");

    if view.phase() == Phase::Idle {
        let _ = writeln!(out, "输入 search <查询> 开始搜索");
    }
    if view.date_invalid() {
        let _ = writeln!(out, "{INVALID_DATE_TEXT}");
    }
    if view.query_invalid() {
        let _ = writeln!(out, "{INVALID_QUERY_TEXT}");
    }
    if let Some(stat) = view.stat_line() {
        let _ = writeln!(out, "{stat}");
    }
    if view.visibility().is_visible("no-result-text") {
        let _ = writeln!(out, "{NO_RESULT_TEXT}");
    }

    for (i, doc) in view.docs().iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}. {}  [{}]",
            i + 1,
            view.highlight(&doc.title),
            doc.id
        );
        let _ = writeln!(out, "   {}  {}  {}", doc.date, doc.author, doc.column);
        let _ = writeln!(out, "{}", view.highlight(&doc.content));
    }

    if view.visibility().is_visible("page-nav-container") && !view.docs().is_empty() {
        let mut nav = format!("第 {}/{} 页", view.page(), view.page_count());
        if view.visibility().is_visible("page-nav-prev") {
            nav.push_str("  [上一页]");
        }
        if view.visibility().is_visible("page-nav-next") {
            nav.push_str("  [下一页]");
        }
        nav.push_str(&format!("  排序：{}", view.sort_order().label()));
        let _ = writeln!(out);
        let _ = writeln!(out, "{nav}");
    }

    out
}

pub fn render_reader(view: &ReaderView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{PAGE_TITLE}");

    if let Some(doc) = view.reading() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", doc.title);
        let _ = writeln!(out, "{}  {}  {}", doc.date, doc.author, doc.column);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", doc.content);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "相关推荐：");
    if view.visibility().is_visible("loading-suggestion") {
        let _ = writeln!(out, "{LOADING_SUGGESTION_TEXT}");
    } else {
        for doc in view.similar() {
            let _ = writeln!(out, "- {}  {}  [{}]", doc.title, doc.date, doc.id);
            let _ = writeln!(out, "{}", doc.content);
        }
    }

    out
}
