// src/main.rs

mod config;

use crate::config::{CliConfig, Command, CommandLineInput, ObjectKind, SortOrder};
use anyhow::Context;
use clap::Parser;
use indexmap::IndexMap;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_rest::{
    collect_all, ApiResponse, Block, BlockId, CreatePageParams, DatabaseId, DatabaseQuery,
    NotionClient, PageId, PaginatedList, PaginationQuery, PropertyValue, RichText,
    SearchObjectType, SearchOpts, SearchResult, SortDirection, UserId,
};
use std::fs;
use std::process::ExitCode;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_rest.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Logs go to stderr so stdout stays clean for --raw output.
    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Pretty-prints a response body, or shows it as text if it is not JSON.
fn pretty(raw: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(raw)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| String::from_utf8_lossy(raw).into_owned())
}

fn pagination(start_cursor: Option<String>, page_size: u32) -> PaginationQuery {
    PaginationQuery {
        start_cursor,
        page_size,
    }
}

/// Prints either the raw body or a summary built by `summarize`.
fn report<T>(raw: bool, response: &ApiResponse<T>, summarize: impl FnOnce(&T)) {
    if raw {
        println!("{}", pretty(response.raw()));
    } else {
        summarize(&response.data);
    }
}

fn print_cursor<T>(list: &PaginatedList<T>) {
    if let Some(cursor) = list.next_cursor() {
        println!("(more results: --start-cursor {})", cursor);
    }
}

fn print_block(block: &Block) {
    let id = block
        .id
        .as_ref()
        .map(|id| id.to_dashed())
        .unwrap_or_default();
    println!("{:<20} {}  {}", block.block_type(), id, block.plain_text());
}

async fn dispatch(client: &NotionClient, config: &CliConfig) -> notion_rest::Result<()> {
    let raw = config.raw;
    match config.command.clone() {
        Command::GetPage { id } => {
            let response = client.get_page(&PageId::parse(&id)?).await?;
            report(raw, &response, |page| {
                println!("{} {}", page.id.to_dashed(), page.title());
                println!("  parent:   {:?}", page.parent);
                println!("  archived: {}", page.archived);
                println!("  edited:   {}", page.last_edited_time);
            });
        }
        Command::GetDatabase { id } => {
            let response = client.get_database(&DatabaseId::parse(&id)?).await?;
            report(raw, &response, |db| {
                println!("{} {}", db.id.to_dashed(), db.title_text());
                for (name, schema) in &db.properties {
                    println!("  {:<24} {}", name, schema.property_type());
                }
            });
        }
        Command::QueryDatabase {
            id,
            filter,
            sorts,
            start_cursor,
            page_size,
        } => {
            let mut query = DatabaseQuery {
                start_cursor,
                page_size,
                ..DatabaseQuery::default()
            };
            if let Some(filter) = filter {
                query.filter = Some(serde_json::from_str(&filter).map_err(|e| {
                    notion_rest::ValidationError::MalformedQuery {
                        field: "filter",
                        reason: e.to_string(),
                    }
                })?);
            }
            if let Some(sorts) = sorts {
                query.sorts = Some(serde_json::from_str(&sorts).map_err(|e| {
                    notion_rest::ValidationError::MalformedQuery {
                        field: "sorts",
                        reason: e.to_string(),
                    }
                })?);
            }
            let response = client
                .query_database(&DatabaseId::parse(&id)?, &query)
                .await?;
            report(raw, &response, |list| {
                for page in &list.results {
                    println!("{} {}", page.id.to_dashed(), page.title());
                }
                print_cursor(list);
            });
        }
        Command::GetBlockChildren {
            id,
            start_cursor,
            page_size,
        } => {
            let response = client
                .get_block_children(&BlockId::parse(&id)?, &pagination(start_cursor, page_size))
                .await?;
            report(raw, &response, |list| {
                list.results.iter().for_each(print_block);
                print_cursor(list);
            });
        }
        Command::AppendParagraph { id, text } => {
            let children = vec![Block::paragraph(vec![RichText::text(text)])];
            let response = client
                .append_block_children(&BlockId::parse(&id)?, &children)
                .await?;
            report(raw, &response, |block| {
                println!("Appended to {} ({})", id, block.block_type());
            });
        }
        Command::GetUser { id } => {
            let response = client.get_user(&UserId::parse(&id)?).await?;
            report(raw, &response, |user| {
                println!("{} {} ({})", user.id.to_dashed(), user, user.user_type());
            });
        }
        Command::ListUsers {
            start_cursor,
            page_size,
            all,
        } if all => {
            let users = collect_all(|cursor| {
                let client = client.clone();
                let query = pagination(cursor.or_else(|| start_cursor.clone()), page_size);
                async move { client.list_users(&query).await }
            })
            .await?;
            for user in users {
                println!("{} {} ({})", user.id.to_dashed(), user, user.user_type());
            }
        }
        Command::ListUsers {
            start_cursor,
            page_size,
            ..
        } => {
            let response = client
                .list_users(&pagination(start_cursor, page_size))
                .await?;
            report(raw, &response, |list| {
                for user in &list.results {
                    println!("{} {} ({})", user.id.to_dashed(), user, user.user_type());
                }
                print_cursor(list);
            });
        }
        Command::Search {
            query,
            only,
            sort,
            start_cursor,
            page_size,
        } => {
            let mut opts = SearchOpts {
                query,
                start_cursor,
                page_size,
                ..SearchOpts::default()
            };
            if let Some(only) = only {
                opts = opts.only(match only {
                    ObjectKind::Page => SearchObjectType::Page,
                    ObjectKind::Database => SearchObjectType::Database,
                });
            }
            if let Some(sort) = sort {
                opts = opts.sort(match sort {
                    SortOrder::Ascending => SortDirection::Ascending,
                    SortOrder::Descending => SortDirection::Descending,
                });
            }
            let response = client.search(&opts).await?;
            report(raw, &response, |list| {
                for result in &list.results {
                    match result {
                        SearchResult::Page(page) => {
                            println!("page     {} {}", page.id.to_dashed(), page.title())
                        }
                        SearchResult::Database(db) => {
                            println!("database {} {}", db.id.to_dashed(), db.title_text())
                        }
                        SearchResult::Unsupported { object, .. } => println!("{}", object),
                    }
                }
                print_cursor(list);
            });
        }
        Command::CreatePage {
            parent_page,
            parent_database,
            title,
            title_property,
            paragraphs,
        } => {
            let title = vec![RichText::text(title)];
            let mut params = CreatePageParams {
                parent_page_id: parent_page.as_deref().map(PageId::parse).transpose()?,
                parent_database_id: parent_database
                    .as_deref()
                    .map(DatabaseId::parse)
                    .transpose()?,
                ..CreatePageParams::default()
            };
            if params.parent_database_id.is_some() {
                let mut properties = IndexMap::new();
                properties.insert(title_property, PropertyValue::title(title));
                params.properties = properties;
            } else {
                params.title = title;
            }
            params.children = paragraphs
                .into_iter()
                .map(|text| Block::paragraph(vec![RichText::text(text)]))
                .collect();

            let response = client.create_page(&params).await?;
            report(raw, &response, |page| {
                println!("Created {} {}", page.id.to_dashed(), page.url.as_deref().unwrap_or(""));
            });
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).context("failed to set up logging")?;

    let config = CliConfig::resolve(cli)?;
    let client = config.client()?;

    match dispatch(&client, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("Error: {}", err);
            if let Some(raw) = err.raw_body() {
                eprintln!("{}", pretty(raw));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
