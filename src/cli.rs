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

use clap::Args;
use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(
    name = "newsdesk",
    version,
    about = "Terminal client for the People's Daily news search service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default global config
    Init,

    /// One-shot search
    Search(SearchArgs),

    /// Show one document and its similar articles
    Doc(DocArgs),

    /// Interactive session
    Repl,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Query text (boolean operators allowed)
    pub query: String,

    /// Result page to show
    #[arg(long, default_value_t = 1)]
    pub page: u64,

    /// Sort order: asc or desc
    #[arg(long, default_value = "desc")]
    pub sort: String,

    /// Start of the date filter
    #[arg(long, num_args = 3, value_names = ["YEAR", "MONTH", "DAY"])]
    pub from: Option<Vec<String>>,

    /// End of the date filter
    #[arg(long, num_args = 3, value_names = ["YEAR", "MONTH", "DAY"])]
    pub to: Option<Vec<String>>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DocArgs {
    /// Document id (sent as-is; the server reports unknown ids)
    pub id: Option<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}
