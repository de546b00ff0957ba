// src/config.rs
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use notion_rest::{ApiKey, ClientOptions, NotionClient};

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about = "Talk to the Notion API from the command line", long_about = None)]
pub struct CommandLineInput {
    /// Integration token (falls back to the NOTION_API_KEY environment variable)
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Print the raw JSON response instead of a summary
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Override the API origin, e.g. for a local proxy
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch a page by ID or URL
    GetPage { id: String },

    /// Fetch a database and its property schema
    GetDatabase { id: String },

    /// Query the pages of a database
    QueryDatabase {
        id: String,
        /// Filter object as JSON
        #[arg(long)]
        filter: Option<String>,
        /// Sorts array as JSON
        #[arg(long)]
        sorts: Option<String>,
        #[arg(long)]
        start_cursor: Option<String>,
        #[arg(long, default_value_t = 0)]
        page_size: u32,
    },

    /// List the child blocks of a page or block
    GetBlockChildren {
        id: String,
        #[arg(long)]
        start_cursor: Option<String>,
        #[arg(long, default_value_t = 0)]
        page_size: u32,
    },

    /// Append a paragraph to a page or block
    AppendParagraph { id: String, text: String },

    /// Fetch a user by ID
    GetUser { id: String },

    /// List workspace users
    ListUsers {
        #[arg(long)]
        start_cursor: Option<String>,
        /// Capped at 100
        #[arg(long, default_value_t = 0)]
        page_size: u32,
        /// Follow cursors until every user is listed
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Search pages and databases shared with the integration
    Search {
        query: Option<String>,
        /// Only return this kind of object
        #[arg(long, value_enum)]
        only: Option<ObjectKind>,
        /// Order by last edited time
        #[arg(long, value_enum)]
        sort: Option<SortOrder>,
        #[arg(long)]
        start_cursor: Option<String>,
        #[arg(long, default_value_t = 0)]
        page_size: u32,
    },

    /// Create a page under a page or in a database
    CreatePage {
        #[arg(long, conflicts_with = "parent_database", required_unless_present = "parent_database")]
        parent_page: Option<String>,
        #[arg(long)]
        parent_database: Option<String>,
        #[arg(long)]
        title: String,
        /// Name of the title column when the parent is a database
        #[arg(long, default_value = "Name")]
        title_property: String,
        /// Paragraphs of initial content
        #[arg(long = "paragraph")]
        paragraphs: Vec<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Page,
    Database,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_key: ApiKey,
    pub verbose: bool,
    pub raw: bool,
    pub base_url: Option<String>,
    pub command: Command,
}

impl CliConfig {
    /// Resolves the configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> anyhow::Result<Self> {
        let api_key = cli
            .api_key
            .ok_or_else(|| anyhow!("no API key: pass --api-key or set NOTION_API_KEY"))?;
        let api_key = ApiKey::new(api_key).context("invalid API key")?;

        Ok(Self {
            api_key,
            verbose: cli.verbose,
            raw: cli.raw,
            base_url: cli.base_url,
            command: cli.command,
        })
    }

    pub fn client(&self) -> anyhow::Result<NotionClient> {
        let mut options = ClientOptions::default();
        if let Some(base_url) = &self.base_url {
            options = options.base_url(base_url.clone());
        }
        NotionClient::with_options(self.api_key.clone(), options).context("invalid client options")
    }
}
