//! Command-line definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use resto_client::models::{FoodCategory, OrderStatus};

#[derive(Parser, Debug)]
#[command(name = "resto", version, about = "Restaurant front desk from the terminal")]
pub struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "RESTO_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the saved session
    #[arg(long, global = true, env = "RESTO_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, env = "RESTO_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Also write daily log files (app, audit, security) here
    #[arg(long, global = true, env = "RESTO_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and save the session
    Login {
        #[arg(long, short)]
        email: Option<String>,
        /// Asked for when omitted
        #[arg(long, env = "RESTO_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List floors
    Floors,
    /// Tables of a floor with per-status counts
    Tables {
        /// Floor id (defaults to floor 1, else the first floor)
        #[arg(long, short)]
        floor: Option<String>,
    },
    /// Open orders and add items
    #[command(subcommand)]
    Order(OrderCommand),
    /// Manage the food catalog
    #[command(subcommand)]
    Foods(FoodCommand),
    /// Manage existing orders
    #[command(subcommand)]
    Orders(OrdersCommand),
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// Open a new order on a table
    Create {
        #[arg(long, short)]
        table: i64,
        /// Asked for when omitted
        #[arg(long, short)]
        customer: Option<String>,
        /// Pick items from the menu right after opening
        #[arg(long)]
        pick: bool,
    },
    /// Add one unit of each food to an open order
    Add {
        /// Order id or `/order/<id>?table=<table>` path
        order: String,
        #[arg(required = true)]
        foods: Vec<i64>,
    },
    /// Pick items interactively for an open order
    Pick {
        /// Order id or `/order/<id>?table=<table>` path
        order: String,
    },
    /// Show an order's items and total
    Show {
        /// Order id or `/order/<id>?table=<table>` path
        order: String,
    },
    /// Show the menu
    Menu(MenuArgs),
}

#[derive(Args, Debug, Default)]
pub struct MenuArgs {
    #[arg(long, short)]
    pub category: Option<FoodCategory>,
    #[arg(long, short)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page to start looking on
    #[arg(long, short, default_value_t = 1)]
    pub page: u32,
}

#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum FoodCommand {
    /// List one page of food
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Narrow the page by name
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Add a food
    Create {
        #[arg(long, short)]
        name: String,
        #[arg(long, short)]
        category: FoodCategory,
        #[arg(long)]
        price: String,
    },
    /// Edit a food; omitted fields keep their value
    Edit {
        id: i64,
        #[arg(long, short)]
        name: Option<String>,
        #[arg(long, short)]
        category: Option<FoodCategory>,
        #[arg(long)]
        price: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Delete a food
    Delete {
        id: i64,
        #[command(flatten)]
        confirm: ConfirmArgs,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    /// List one page of orders
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Change an order's status
    Status {
        id: i64,
        status: OrderStatus,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Delete an order
    Delete {
        id: i64,
        #[command(flatten)]
        confirm: ConfirmArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Print the item-entry path of an order
    Detail {
        id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
}
