//! Navigation targets
//!
//! The workflow hands control between screens by returning a [`Route`]
//! instead of mutating any global router. Paths match the ones the web
//! front desk uses, so links stay shareable.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    MasterFood,
    OrderList,
    /// Item entry for an order on a table
    Order { order_id: i64, table_id: i64 },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::MasterFood => "/masterfood".to_string(),
            Route::OrderList => "/orderlist".to_string(),
            Route::Order { order_id, table_id } => format!("/order/{order_id}?table={table_id}"),
        }
    }

    /// Parse a path produced by [`Route::path`].
    pub fn parse(path: &str) -> Option<Route> {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        match path.trim_end_matches('/') {
            "/login" => Some(Route::Login),
            "/dashboard" => Some(Route::Dashboard),
            "/masterfood" => Some(Route::MasterFood),
            "/orderlist" => Some(Route::OrderList),
            other => {
                let order_id = other.strip_prefix("/order/")?.parse().ok()?;
                let table_id = query?
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("table="))?
                    .parse()
                    .ok()?;
                Some(Route::Order { order_id, table_id })
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s).ok_or_else(|| format!("unknown route: {s}"))
    }
}
