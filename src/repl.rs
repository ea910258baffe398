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

//! The interactive session: line commands driving the two screens.
//!
//! Requests are awaited inline, one at a time. Transport failures are
//! logged and swallowed; the screen simply stays as it was.

use std::io::Write as _;

use anyhow::Context;
use anyhow::Result;
use tracing::warn;

use crate::client::ApiClient;
use crate::reader::ReaderView;
use crate::render;
use crate::search::DateFields;
use crate::search::PendingSearch;
use crate::search::SearchView;

const HELP: &str = "\
命令：
  search <查询>      搜索（支持 and / or / not 与括号）
  next | prev        下一页 / 上一页
  page <n>           跳到第 n 页
  sort               切换升序 / 降序
  from <年> <月> <日>  设置起始日期
  to <年> <月> <日>    设置结束日期
  open <文档编号>     打开文档与相关推荐
  back               返回搜索
  quit               退出";

enum Screen {
    Search,
    Reader(ReaderView),
}

pub struct Session {
    client: ApiClient,
    search: SearchView,
    screen: Screen,
}

impl Session {
    pub fn new(client: ApiClient, page_size: u64) -> Self {
        Self {
            client,
            search: SearchView::new(page_size),
            screen: Screen::Search,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", render::PAGE_TITLE);
        println!("{HELP}");

        let mut line = String::new();
        loop {
            print!("> ");
            std::io::stdout().flush().context("flush prompt")?;
            line.clear();
            if std::io::stdin()
                .read_line(&mut line)
                .context("read command")?
                == 0
            {
                break;
            }
            if !self.handle_line(line.trim()).await {
                break;
            }
        }
        Ok(())
    }

    /// Returns false when the session should end.
    async fn handle_line(&mut self, line: &str) -> bool {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            // Blank line: repaint whichever screen is up.
            "" => match &self.screen {
                Screen::Search => print!("{}", render::render_search(&self.search)),
                Screen::Reader(reader) => print!("{}", render::render_reader(reader)),
            },
            "help" => println!("{HELP}"),
            "quit" | "exit" => return false,
            "search" => {
                let pending = self.search.submit(rest);
                self.run_search(pending).await;
            }
            "next" => {
                let pending = self.search.next_page();
                self.run_search(pending).await;
            }
            "prev" => {
                let pending = self.search.prev_page();
                self.run_search(pending).await;
            }
            "page" => match rest.parse::<u64>() {
                Ok(page) => {
                    let pending = self.search.set_page(page);
                    if pending.is_none() {
                        println!("页码无效，仍在第 {} 页", self.search.page());
                    }
                    self.run_search(pending).await;
                }
                Err(_) => println!("页码无效，仍在第 {} 页", self.search.page()),
            },
            "sort" => {
                let pending = self.search.toggle_sort();
                self.run_search(pending).await;
            }
            "from" | "to" => match parse_date_fields(rest) {
                Some(fields) => {
                    if command == "from" {
                        self.search.set_min_date(fields);
                    } else {
                        self.search.set_max_date(fields);
                    }
                }
                None => println!("用法：{command} <年> <月> <日>"),
            },
            "open" => self.open_doc(rest).await,
            "back" => {
                self.screen = Screen::Search;
                print!("{}", render::render_search(&self.search));
            }
            other => println!("未知命令 {other:?}，输入 help 查看帮助"),
        }
        true
    }

    async fn run_search(&mut self, pending: Option<PendingSearch>) {
        if let Some(pending) = pending {
            match self.client.search(&pending.request).await {
                Ok(response) => self.search.apply_response(pending.seq, &response),
                Err(err) => warn!("search request failed: {err}"),
            }
        }
        self.screen = Screen::Search;
        print!("{}", render::render_search(&self.search));
    }

    async fn open_doc(&mut self, id: &str) {
        let mut reader = ReaderView::new(Some(id));
        let (doc, similar) = tokio::join!(
            self.client.get_doc(reader.doc_id()),
            self.client.get_similar_docs(reader.doc_id()),
        );
        match doc {
            Ok(response) => reader.apply_reading_doc(&response.doc),
            Err(err) => warn!("get_doc failed: {err}"),
        }
        match similar {
            Ok(response) => reader.apply_similar_docs(&response.docs),
            Err(err) => warn!("get_similar_docs failed: {err}"),
        }
        print!("{}", render::render_reader(&reader));
        self.screen = Screen::Reader(reader);
    }
}

fn parse_date_fields(rest: &str) -> Option<DateFields> {
    let mut parts = rest.split_whitespace();
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(DateFields::new(year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_fields_parse_three_parts() {
        let fields = parse_date_fields("2008 5 12").expect("fields");
        assert_eq!(fields.to_iso().as_deref(), Some("2008-05-12"));
        assert!(parse_date_fields("2008 5").is_none());
        assert!(parse_date_fields("2008 5 12 3").is_none());
    }
}
