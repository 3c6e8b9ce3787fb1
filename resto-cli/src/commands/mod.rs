//! Command handlers

mod auth;
mod floor;
mod food;
mod order;
mod orders;

use anyhow::Result;
use resto_client::{
    ClientConfig, ClientResult, HttpClient, NetworkHttpClient, RestoApi, Session, SessionData,
    SessionStore,
};

use crate::cli::Command;

/// API client plus the session it runs under
pub struct Context<C: HttpClient> {
    pub api: RestoApi<C>,
    pub session: Session,
}

impl Context<NetworkHttpClient> {
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let api = RestoApi::connect(config)?;
        let session = Session::open(SessionStore::new(&config.session_dir));
        Ok(Self::new(api, session))
    }
}

impl<C: HttpClient> Context<C> {
    pub fn new(mut api: RestoApi<C>, session: Session) -> Self {
        if session.is_logged_in() {
            session.attach(&mut api);
        }
        Self { api, session }
    }

    pub fn require_login(&self) -> ClientResult<&SessionData> {
        self.session.require()
    }
}

pub async fn run<C: HttpClient>(ctx: &mut Context<C>, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => auth::login(ctx, email, password).await,
        Command::Logout => auth::logout(ctx),
        Command::Whoami => auth::whoami(ctx),
        Command::Floors => floor::floors(ctx).await,
        Command::Tables { floor } => floor::tables(ctx, floor).await,
        Command::Order(cmd) => order::run(ctx, cmd).await,
        Command::Foods(cmd) => food::run(ctx, cmd).await,
        Command::Orders(cmd) => orders::run(ctx, cmd).await,
    }
}

/// Ask a yes/no question unless `--yes` was given. A failed prompt counts as "no".
pub(crate) fn confirmed(yes: bool, question: &str) -> bool {
    yes || inquire::Confirm::new(question)
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}
