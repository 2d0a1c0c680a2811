//! Command-line surface and dispatch.
//!
//! Each listing command loads the full collection from the selected source,
//! renders the rows that pass `--query` and `--select`, then the summary of
//! the whole collection. Network commands go through a [`RemoteView`] so a
//! failure renders as a panel instead of aborting.
//!
//! [`RemoteView`]: crate::client::remote::RemoteView

use super::render;
use crate::{
    client::{ApiClient, remote},
    config::{AppConfig, Fixtures, api_token, database, load_fixtures},
    core::{
        filter::{Filterable, FilterState, Selectors, filter, matches},
        format::Formatter,
        permission::granted_by_module,
        summary::{OrderSummary, ProductSummary, RoleSummary, WallSummary},
        wall::{feed, with_tag},
    },
    errors::{Error, Result},
    models::{Order, Permission, Product, Role, WallPost},
    source::{DbSource, HttpSource, RecordSource, Resource, StaticSource},
};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tracing::{debug, info};

/// Admin console from the terminal
#[derive(Debug, Parser)]
#[command(name = "admin-console", version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Where collections are loaded from
    #[arg(long, value_enum, default_value_t = SourceKind::Fixtures)]
    pub source: SourceKind,

    /// Page to show
    #[command(subcommand)]
    pub command: Command,
}

/// Record source selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// The fixtures file named in `[storage]`
    Fixtures,
    /// The console backend
    Api,
    /// The local `SQLite` database (products and orders only)
    Db,
}

/// Query and selectors shared by every listing command
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Free-text search
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Categorical selector, e.g. `status=Cancelled`; `all` clears it
    #[arg(short, long = "select", value_name = "FIELD=VALUE")]
    pub select: Vec<String>,
}

impl ListArgs {
    fn state<F>(&self) -> Result<FilterState<F>>
    where
        F: Copy + Ord + std::str::FromStr<Err = Error>,
    {
        Ok(FilterState {
            query: self.query.clone(),
            selectors: Selectors::parse(&self.select)?,
        })
    }
}

/// Pages of the console
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Product catalog with stock status
    Products(ListArgs),
    /// Orders with revenue figures
    Orders(ListArgs),
    /// Roles and user distribution
    Roles(ListArgs),
    /// Permissions grouped by module
    Permissions {
        /// Show which permissions this role holds
        #[arg(long)]
        role: Option<i64>,
    },
    /// Wall feed, pinned posts first
    Wall {
        #[command(flatten)]
        list: ListArgs,
        /// Only posts carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Dashboard analytics for a date range
    Analytics {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,
    },
    /// One delivery route plan
    RoutePlan {
        /// Route plan id
        id: i64,
    },
    /// Copy fixture products and orders into the local database
    Seed,
}

/// Shared state for one invocation.
#[derive(Debug)]
pub struct Console {
    config: AppConfig,
    formatter: Formatter,
    source: SourceKind,
}

impl Console {
    /// Builds the console from a loaded configuration.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when `[display]` is invalid.
    pub fn new(config: AppConfig, source: SourceKind) -> Result<Self> {
        let formatter = config.formatter()?;
        Ok(Self {
            config,
            formatter,
            source,
        })
    }

    /// Runs `command` and returns the text to print.
    ///
    /// # Errors
    /// Loading failures for listing pages (unreadable fixtures, unknown
    /// selector fields, backend errors). Network pages render their errors
    /// as panels instead.
    pub async fn run(&self, command: Command) -> Result<String> {
        debug!("Running {:?} against {:?}", command, self.source);
        match command {
            Command::Products(args) => {
                let products = self.products().await?.fetch_all().await?;
                self.page(&products, &args, |p| render::product_line(p, &self.formatter), || {
                    render::product_summary(&ProductSummary::from_products(&products), &self.formatter)
                })
            }
            Command::Orders(args) => {
                let orders = self.orders().await?.fetch_all().await?;
                self.page(&orders, &args, |o| render::order_line(o, &self.formatter), || {
                    render::order_summary(&OrderSummary::from_orders(&orders), &self.formatter)
                })
            }
            Command::Roles(args) => {
                let roles = self.collection(|f| f.roles)?.fetch_all().await?;
                self.page(&roles, &args, render::role_line, || {
                    render::role_summary(&RoleSummary::from_roles(&roles), &self.formatter)
                })
            }
            Command::Permissions { role } => self.permissions(role).await,
            Command::Wall { list, tag } => self.wall(&list, tag.as_deref()).await,
            Command::Analytics { start, end } => {
                let client = self.client()?;
                let view = remote::shared();
                remote::load(&view, client.dashboard_analytics(start, end)).await;
                let state = view.read().await;
                Ok(render::view(state.state(), render::analytics))
            }
            Command::RoutePlan { id } => {
                let client = self.client()?;
                let view = remote::shared();
                remote::load(&view, client.route_plan(id)).await;
                let state = view.read().await;
                Ok(render::view(state.state(), render::route_plan))
            }
            Command::Seed => self.seed().await,
        }
    }

    fn page<T: Filterable>(
        &self,
        records: &[T],
        args: &ListArgs,
        line: impl Fn(&T) -> String,
        summary: impl FnOnce() -> String,
    ) -> Result<String> {
        let state = args.state::<T::Field>()?;
        let visible = filter(records, &state);
        debug!(
            "{} of {} {} records pass the filter",
            visible.len(),
            records.len(),
            T::ENTITY
        );
        Ok(format!("{}\n\n{}", render::rows(&visible, line), summary()))
    }

    async fn permissions(&self, role_id: Option<i64>) -> Result<String> {
        let permissions: Vec<Permission> =
            self.collection(|f| f.permissions)?.fetch_all().await?;

        let Some(role_id) = role_id else {
            return Ok(render::permission_groups(&permissions, None, |_| false));
        };

        let roles: Vec<Role> = self.collection(|f| f.roles)?.fetch_all().await?;
        let role = roles
            .iter()
            .find(|r| r.id == role_id)
            .ok_or_else(|| Error::NotFound {
                resource: "role",
                id: role_id.to_string(),
            })?;
        let coverage = granted_by_module(role, &permissions);

        Ok(format!(
            "{}\n{}",
            render::role_line(role),
            render::permission_groups(&permissions, Some(&coverage), |p| role.has_permission(p.id))
        ))
    }

    async fn wall(&self, args: &ListArgs, tag: Option<&str>) -> Result<String> {
        let posts: Vec<WallPost> = self.collection(|f| f.wall_posts)?.fetch_all().await?;
        let state = args.state()?;

        let visible = match tag {
            Some(tag) => with_tag(&posts, tag)
                .into_iter()
                .filter(|post| matches(*post, &state))
                .collect(),
            None => filter(&posts, &state),
        };

        let now = Utc::now();
        let rows = render::rows(&feed(visible), |p| render::wall_line(p, &self.formatter, now));
        let summary = render::wall_summary(&WallSummary::from_posts(&posts), &self.formatter);
        Ok(format!("{rows}\n\n{summary}"))
    }

    async fn seed(&self) -> Result<String> {
        let fixtures = load_fixtures(&self.config.storage.fixtures)?;
        let db = open_database().await?;
        let products = db.seed_products(&fixtures.products).await?;
        let orders = db.seed_orders(&fixtures.orders).await?;
        info!("Seeded {} products and {} orders", products, orders);
        Ok(format!("Seeded {products} product(s) and {orders} order(s)."))
    }

    fn client(&self) -> Result<ApiClient> {
        ApiClient::new(self.config.api.base_url.clone(), api_token()?)
    }

    /// Source for record types the database does not hold.
    fn collection<T>(&self, pick: fn(Fixtures) -> Vec<T>) -> Result<Box<dyn RecordSource<T>>>
    where
        T: Resource + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        match self.source {
            SourceKind::Fixtures => {
                let fixtures = load_fixtures(&self.config.storage.fixtures)?;
                Ok(Box::new(StaticSource::new(pick(fixtures))))
            }
            SourceKind::Api => Ok(Box::new(HttpSource::new(self.client()?))),
            SourceKind::Db => Err(Error::Config {
                message: format!("The database source does not hold {}", T::PATH),
            }),
        }
    }

    async fn products(&self) -> Result<Box<dyn RecordSource<Product>>> {
        match self.source {
            SourceKind::Db => Ok(Box::new(open_database().await?)),
            _ => self.collection(|f| f.products),
        }
    }

    async fn orders(&self) -> Result<Box<dyn RecordSource<Order>>> {
        match self.source {
            SourceKind::Db => Ok(Box::new(open_database().await?)),
            _ => self.collection(|f| f.orders),
        }
    }
}

async fn open_database() -> Result<DbSource> {
    let db = database::create_connection().await?;
    database::create_tables(&db).await?;
    Ok(DbSource::new(db))
}
