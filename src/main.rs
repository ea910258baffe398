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

mod cli;
mod client;
mod config;
mod content;
mod model;
mod output;
mod reader;
mod render;
mod repl;
mod search;
mod visibility;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;
use crate::cli::Commands;
use crate::cli::DocArgs;
use crate::cli::SearchArgs;
use crate::client::ApiClient;
use crate::config::Config;
use crate::model::SortOrder;
use crate::output::JsonResponse;
use crate::output::QueryOut;
use crate::output::StatsOut;
use crate::output::print_json;
use crate::reader::ReaderView;
use crate::search::DateFields;
use crate::search::SearchView;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_global_config()?;
    let client = ApiClient::new(config.clone())?;

    match cli.command {
        Commands::Init => cmd_init(),
        Commands::Search(args) => {
            let json = args.json;
            handle_result(cmd_search(&client, &config, args).await, json)
        }
        Commands::Doc(args) => {
            let json = args.json;
            handle_result(cmd_doc(&client, args).await, json)
        }
        Commands::Repl => repl::Session::new(client, config.page_size).run().await,
    }
}

fn cmd_init() -> Result<()> {
    let path = config::global_config_path()
        .ok_or_else(|| anyhow::anyhow!("cannot determine config directory"))?;
    if path.exists() {
        anyhow::bail!("newsdesk.toml already exists at {}", path.display());
    }
    config::write_config(&path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn handle_result(result: Result<()>, json: bool) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            if json {
                let resp = JsonResponse::error("error", &err.to_string());
                print_json(&resp)?;
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

async fn cmd_search(client: &ApiClient, config: &Config, args: SearchArgs) -> Result<()> {
    let sort_order: SortOrder = args.sort.parse()?;

    let mut view = SearchView::new(config.page_size);
    view.set_sort_order(sort_order);
    if let Some(fields) = args.from.as_deref().map(date_fields) {
        view.set_min_date(fields);
    }
    if let Some(fields) = args.to.as_deref().map(date_fields) {
        view.set_max_date(fields);
    }

    let Some(pending) = view.submit(&args.query) else {
        anyhow::bail!("invalid date filter (year 0-9999, month 1-12, day 1-31)");
    };
    let started = std::time::Instant::now();
    let response = client.search(&pending.request).await?;
    view.apply_response(pending.seq, &response);

    // A later page needs the first response's total before the page number
    // can be validated, mirroring a user typing into the page input.
    if args.page > 1 {
        let Some(pending) = view.set_page(args.page) else {
            anyhow::bail!(
                "page {} out of range (1..={})",
                args.page,
                view.page_count().max(1)
            );
        };
        let response = client.search(&pending.request).await?;
        view.apply_response(pending.seq, &response);
    }

    if args.json {
        let results = view
            .docs()
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        let resp = JsonResponse::ok()
            .with_query(QueryOut {
                text: args.query,
                sort_order: sort_order.as_str().to_string(),
                page: view.page(),
                page_count: view.page_count(),
                min_date: args.from.as_deref().map(date_fields).and_then(|f| f.to_iso()),
                max_date: args.to.as_deref().map(date_fields).and_then(|f| f.to_iso()),
            })
            .with_results(results)
            .with_stats(StatsOut {
                took_ms: started.elapsed().as_millis() as i64,
                total_hits: view.total() as i64,
            });
        print_json(&resp)?;
    } else {
        print!("{}", render::render_search(&view));
    }
    Ok(())
}

async fn cmd_doc(client: &ApiClient, args: DocArgs) -> Result<()> {
    let mut view = ReaderView::new(args.id.as_deref());
    let (doc, similar) = tokio::join!(
        client.get_doc(view.doc_id()),
        client.get_similar_docs(view.doc_id()),
    );
    view.apply_reading_doc(&doc?.doc);
    view.apply_similar_docs(&similar?.docs);

    if args.json {
        let results = view
            .similar()
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        let mut resp = JsonResponse::ok().with_results(results);
        if let Some(reading) = view.reading() {
            resp = resp.with_reading(serde_json::to_value(reading)?);
        }
        print_json(&resp)?;
    } else {
        print!("{}", render::render_reader(&view));
    }
    Ok(())
}

fn date_fields(parts: &[String]) -> DateFields {
    DateFields::new(&parts[0], &parts[1], &parts[2])
}
