//! `openbar` — the OpenBar CLI.
//!
//! Runs the whole bar from the terminal: recipe catalog, inventory,
//! sales, and the pro tools. All data lives in a local redb file.

mod commands;
mod config;

use clap::{Parser, Subcommand};

/// OpenBar CLI tool.
#[derive(Parser, Debug)]
#[command(name = "openbar", about = "OpenBar CLI")]
struct Cli {
    /// Path to client config file (default: ~/.openbar/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse and edit the recipe catalog.
    Recipe {
        #[command(subcommand)]
        action: RecipeAction,
    },

    /// Manage the bottle inventory.
    Ingredient {
        #[command(subcommand)]
        action: IngredientAction,
    },

    /// Arrange the speed rail.
    Rail {
        #[command(subcommand)]
        action: RailAction,
    },

    /// What needs buying.
    Shopping {
        /// Print the copyable order text instead of the table.
        #[arg(long)]
        order: bool,
    },

    /// Build a new drink on the bench.
    Compose {
        #[command(subcommand)]
        action: ComposeAction,
    },

    /// Log a drink as made.
    Make {
        /// Recipe name.
        name: String,
        /// How many to make.
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },

    /// The sales ledger.
    Sales {
        /// Show the recent-makes list instead.
        #[arg(long)]
        recent: bool,
        /// Filter by drink name.
        #[arg(long)]
        search: Option<String>,
        /// Limit results.
        #[arg(long)]
        limit: Option<usize>,
        /// Offset for pagination.
        #[arg(long)]
        offset: Option<usize>,
    },

    /// Sales analytics.
    Stats {
        /// Reporting window: day, week or month.
        #[arg(long, default_value = "week")]
        period: String,
    },

    /// Home-screen numbers.
    Dashboard,

    /// Quick-service view: today so far plus what can pour now.
    Shift,

    /// Run the party order queue.
    Party {
        #[command(subcommand)]
        action: PartyAction,
    },

    /// Prep countdown timers.
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },

    /// House-made syrups and juices.
    Prep {
        #[command(subcommand)]
        action: PrepAction,
    },

    /// Quiz and mixology practice.
    Training {
        #[command(subcommand)]
        action: TrainingAction,
    },

    /// Printable drinks menu.
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },

    /// Import a recipe spreadsheet (CSV). Replaces the whole catalog.
    Import {
        /// CSV file with a header row.
        file: String,
    },

    /// Premium entitlement.
    Premium {
        #[command(subcommand)]
        action: PremiumAction,
    },

    /// The tools surface, free and locked.
    Tools,

    /// Client configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum RecipeAction {
    /// List recipes.
    List {
        /// Search in names and ingredients.
        #[arg(long)]
        search: Option<String>,
        /// Filter by recipe type (e.g. Classic, Tiki).
        #[arg(long = "type")]
        recipe_type: Option<String>,
        /// Filter by flavor tag (e.g. sour, boozy).
        #[arg(long)]
        flavor: Option<String>,
        /// Only drinks the bar can make right now.
        #[arg(long)]
        available: bool,
        /// Only creations saved from the composer.
        #[arg(long)]
        custom: bool,
        /// Sort by: name, abv or price.
        #[arg(long)]
        sort: Option<String>,
        /// Limit results.
        #[arg(long)]
        limit: Option<usize>,
        /// Offset for pagination.
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Show one recipe in full.
    Show { name: String },
    /// Create a recipe from JSON.
    Create {
        /// JSON body.
        #[arg(long = "json")]
        json_body: Option<String>,
        /// Read JSON from file.
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },
    /// Update a recipe (JSON merge patch).
    Update {
        name: String,
        /// JSON body.
        #[arg(long = "json")]
        json_body: String,
    },
    /// Delete a recipe.
    Delete {
        name: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Mark a recipe as a favorite.
    Favorite { name: String },
    /// Drop a recipe from the favorites.
    Unfavorite { name: String },
    /// Attach a dated note.
    Note { name: String, text: String },
    /// Spin the random picker.
    Random,
    /// List the catalog's recipe types.
    Types,
    /// Set or clear a recipe's image URL.
    Image {
        name: String,
        /// Image URL.
        url: Option<String>,
        /// Clear the image instead.
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand, Debug)]
enum IngredientAction {
    /// List the inventory.
    List {
        /// Filter by shelf category.
        #[arg(long)]
        category: Option<String>,
        /// Only bottles in stock.
        #[arg(long = "in")]
        in_stock: bool,
        /// Only bottles out of stock.
        #[arg(long = "out")]
        out_of_stock: bool,
        /// Search by name.
        #[arg(long)]
        search: Option<String>,
        /// Limit results.
        #[arg(long)]
        limit: Option<usize>,
        /// Offset for pagination.
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Add a bottle to the inventory.
    Add {
        name: String,
        /// Shelf category, e.g. "Base Spirits".
        #[arg(long)]
        category: String,
        /// Cost per bottle.
        #[arg(long, default_value_t = 0.0)]
        cost: f64,
    },
    /// Remove a bottle.
    Remove {
        name: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Flip or set a bottle's stock state.
    Stock {
        name: String,
        /// Mark in stock.
        #[arg(long = "in")]
        set_in: bool,
        /// Mark out of stock.
        #[arg(long = "out")]
        set_out: bool,
        /// Set the counted stock level.
        #[arg(long)]
        count: Option<f64>,
    },
    /// Set the cost per bottle.
    Cost { name: String, cost: f64 },
    /// Set the par level (0 clears it).
    Par { name: String, par: f64 },
    /// List the shelf categories.
    Categories,
}

#[derive(Subcommand, Debug)]
enum RailAction {
    /// Show the rail in well order.
    Show,
    /// In-stock spirits that could go on the rail.
    Candidates,
    /// Put a bottle on the rail.
    Add { name: String },
    /// Take a bottle off the rail.
    Remove { name: String },
    /// Slide a bottle along the rail.
    Move {
        name: String,
        /// "left" or "right".
        direction: String,
    },
}

#[derive(Subcommand, Debug)]
enum ComposeAction {
    /// Metrics, flavor profile and name ideas for a draft.
    Preview {
        #[command(flatten)]
        args: commands::compose::ComposeArgs,
    },
    /// Save the draft to the catalog.
    Save {
        /// Recipe name. Omitted: one of the generated names is used.
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        args: commands::compose::ComposeArgs,
    },
}

#[derive(Subcommand, Debug)]
enum PartyAction {
    /// Go live.
    Start {
        /// Session name, e.g. "Saturday Night".
        name: Option<String>,
    },
    /// End the session. Drops unserved orders.
    Stop,
    /// Take a guest order.
    Order {
        /// Recipe name.
        cocktail: String,
        /// Guest name or seat.
        #[arg(long)]
        guest: Option<String>,
        /// Order notes.
        #[arg(long)]
        notes: Option<String>,
    },
    /// Queue a simulated order.
    Simulate,
    /// Move an order to its next status.
    Advance {
        /// Order ID (a unique prefix is enough). Omitted: the oldest order.
        id: Option<String>,
    },
    /// Session, queue and per-status counts.
    Status,
}

#[derive(Subcommand, Debug)]
enum TimerAction {
    /// Add a timer and start it.
    Add { name: String, minutes: u64 },
    /// List timers.
    List,
    /// Pause or resume a timer.
    Toggle {
        /// Timer ID (a unique prefix is enough).
        id: String,
    },
    /// Reset a timer to its full time, stopped.
    Reset {
        /// Timer ID (a unique prefix is enough).
        id: String,
    },
    /// Delete a timer.
    Delete {
        /// Timer ID (a unique prefix is enough).
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Tick running timers once a second until none are left.
    Watch,
}

#[derive(Subcommand, Debug)]
enum PrepAction {
    /// List batches, newest first.
    List,
    /// Start a batch from a template or from scratch.
    Add {
        /// Batch name. Template names fill in the rest.
        name: String,
        /// "syrup" or "juice".
        #[arg(long)]
        kind: Option<String>,
        /// Batch size in ml.
        #[arg(long)]
        size: Option<f64>,
        /// Shelf life in days.
        #[arg(long = "shelf-life")]
        shelf_life: Option<i64>,
        /// Batch notes.
        #[arg(long)]
        notes: Option<String>,
    },
    /// Pour from a batch (ml).
    Use {
        /// Batch ID (a unique prefix is enough).
        id: String,
        amount: f64,
    },
    /// Dump a batch.
    Delete {
        /// Batch ID (a unique prefix is enough).
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// The built-in prep templates.
    Templates,
    /// Batches expired or about to.
    Alerts,
}

#[derive(Subcommand, Debug)]
enum TrainingAction {
    /// Name-that-cocktail quiz.
    Quiz {
        /// Number of questions.
        #[arg(long)]
        questions: Option<usize>,
    },
    /// Multi-round mixology challenge.
    Challenge {
        /// Number of rounds.
        #[arg(long)]
        rounds: Option<u32>,
    },
    /// One round against the clock.
    Speed,
    /// Grade a single build without the prompts.
    Grade {
        /// Target recipe.
        #[arg(long)]
        recipe: String,
        /// Ingredient picked (repeatable).
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        /// Glass picked.
        #[arg(long)]
        glass: Option<String>,
        /// Technique picked.
        #[arg(long)]
        technique: Option<String>,
        /// Seconds left on the clock (speed rounds).
        #[arg(long = "time-left")]
        time_left: Option<u32>,
    },
    /// Study sheet: ingredient shelves and glassware.
    Learn,
}

#[derive(Subcommand, Debug)]
enum MenuAction {
    /// Render the HTML menu document.
    Export {
        /// Recipes to put on the menu. Omitted: everything available.
        names: Vec<String>,
        /// Menu title.
        #[arg(long)]
        title: Option<String>,
        /// Output file, or "-" for stdout.
        #[arg(long, default_value = "menu.html")]
        out: String,
    },
    /// Recipes eligible for the menu.
    Candidates,
}

#[derive(Subcommand, Debug)]
enum PremiumAction {
    /// Current entitlement.
    Status,
    /// Simulated purchase: unlock everything.
    Unlock,
    /// Restore a previous purchase.
    Restore,
    /// Back to the free tier.
    Reset,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show the resolved paths.
    Show,
    /// Point the bar at another data directory.
    SetDataDir { dir: String },
}

/// Interactive yes/no gate in front of the destructive commands.
fn confirm() -> bool {
    eprint!("Are you sure? [y/N]: ");
    let mut s = String::new();
    if std::io::stdin().read_line(&mut s).is_err() {
        return false;
    }
    s.trim().eq_ignore_ascii_case("y")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.output == "json";

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);

    match cli.command {
        Commands::Recipe { action } => match action {
            RecipeAction::List {
                search,
                recipe_type,
                flavor,
                available,
                custom,
                sort,
                limit,
                offset,
            } => {
                commands::recipe::list(
                    search.as_deref(),
                    recipe_type.as_deref(),
                    flavor.as_deref(),
                    available,
                    custom,
                    sort.as_deref(),
                    limit,
                    offset,
                    json,
                    &config_path,
                )?;
            }
            RecipeAction::Show { name } => {
                commands::recipe::show(&name, json, &config_path)?;
            }
            RecipeAction::Create { json_body, file } => {
                let body = if let Some(path) = file {
                    std::fs::read_to_string(&path)?
                } else if let Some(json) = json_body {
                    json
                } else {
                    anyhow::bail!("Provide --json or -f <file>.");
                };
                commands::recipe::create(&body, &config_path)?;
            }
            RecipeAction::Update { name, json_body } => {
                commands::recipe::update(&name, &json_body, &config_path)?;
            }
            RecipeAction::Delete { name, yes } => {
                if !yes && !confirm() {
                    println!("Cancelled.");
                    return Ok(());
                }
                commands::recipe::delete(&name, &config_path)?;
            }
            RecipeAction::Favorite { name } => {
                commands::recipe::favorite(&name, true, &config_path)?;
            }
            RecipeAction::Unfavorite { name } => {
                commands::recipe::favorite(&name, false, &config_path)?;
            }
            RecipeAction::Note { name, text } => {
                commands::recipe::note(&name, &text, &config_path)?;
            }
            RecipeAction::Random => {
                commands::recipe::random(json, &config_path)?;
            }
            RecipeAction::Types => {
                commands::recipe::types(json, &config_path)?;
            }
            RecipeAction::Image { name, url, clear } => {
                if clear {
                    commands::recipe::image(&name, None, &config_path)?;
                } else if let Some(url) = url {
                    commands::recipe::image(&name, Some(&url), &config_path)?;
                } else {
                    anyhow::bail!("Provide a URL or --clear.");
                }
            }
        },

        Commands::Ingredient { action } => match action {
            IngredientAction::List {
                category,
                in_stock,
                out_of_stock,
                search,
                limit,
                offset,
            } => {
                if in_stock && out_of_stock {
                    anyhow::bail!("Pick one of --in or --out.");
                }
                let stock_filter = if in_stock {
                    Some(true)
                } else if out_of_stock {
                    Some(false)
                } else {
                    None
                };
                commands::ingredient::list(
                    category.as_deref(),
                    stock_filter,
                    search.as_deref(),
                    limit,
                    offset,
                    json,
                    &config_path,
                )?;
            }
            IngredientAction::Add {
                name,
                category,
                cost,
            } => {
                commands::ingredient::add(&name, &category, cost, &config_path)?;
            }
            IngredientAction::Remove { name, yes } => {
                if !yes && !confirm() {
                    println!("Cancelled.");
                    return Ok(());
                }
                commands::ingredient::remove(&name, &config_path)?;
            }
            IngredientAction::Stock {
                name,
                set_in,
                set_out,
                count,
            } => {
                if set_in && set_out {
                    anyhow::bail!("Pick one of --in or --out.");
                }
                let target = if set_in {
                    Some(true)
                } else if set_out {
                    Some(false)
                } else {
                    None
                };
                commands::ingredient::stock(&name, target, count, &config_path)?;
            }
            IngredientAction::Cost { name, cost } => {
                commands::ingredient::cost(&name, cost, &config_path)?;
            }
            IngredientAction::Par { name, par } => {
                commands::ingredient::par(&name, par, &config_path)?;
            }
            IngredientAction::Categories => {
                commands::ingredient::categories(json, &config_path)?;
            }
        },

        Commands::Rail { action } => match action {
            RailAction::Show => {
                commands::rail::show(json, &config_path)?;
            }
            RailAction::Candidates => {
                commands::rail::candidates(json, &config_path)?;
            }
            RailAction::Add { name } => {
                commands::rail::add(&name, &config_path)?;
            }
            RailAction::Remove { name } => {
                commands::rail::remove(&name, &config_path)?;
            }
            RailAction::Move { name, direction } => {
                commands::rail::shift(&name, &direction, &config_path)?;
            }
        },

        Commands::Shopping { order } => {
            commands::shopping::list(order, json, &config_path)?;
        }

        Commands::Compose { action } => match action {
            ComposeAction::Preview { args } => {
                commands::compose::preview(&args, json, &config_path)?;
            }
            ComposeAction::Save { name, args } => {
                commands::compose::save(&args, name.as_deref(), &config_path)?;
            }
        },

        Commands::Make { name, qty } => {
            commands::sales::make(&name, qty, &config_path)?;
        }

        Commands::Sales {
            recent,
            search,
            limit,
            offset,
        } => {
            commands::sales::list(recent, search.as_deref(), limit, offset, json, &config_path)?;
        }

        Commands::Stats { period } => {
            commands::dashboard::stats(&period, json, &config_path)?;
        }

        Commands::Dashboard => {
            commands::dashboard::show(json, &config_path)?;
        }

        Commands::Shift => {
            commands::dashboard::shift(json, &config_path)?;
        }

        Commands::Party { action } => match action {
            PartyAction::Start { name } => {
                commands::party::start(name.as_deref(), &config_path)?;
            }
            PartyAction::Stop => {
                commands::party::stop(&config_path)?;
            }
            PartyAction::Order {
                cocktail,
                guest,
                notes,
            } => {
                commands::party::order(
                    &cocktail,
                    guest.as_deref(),
                    notes.as_deref(),
                    &config_path,
                )?;
            }
            PartyAction::Simulate => {
                commands::party::simulate(&config_path)?;
            }
            PartyAction::Advance { id } => {
                commands::party::advance(id.as_deref(), &config_path)?;
            }
            PartyAction::Status => {
                commands::party::status(json, &config_path)?;
            }
        },

        Commands::Timer { action } => match action {
            TimerAction::Add { name, minutes } => {
                commands::timer::add(&name, minutes, &config_path)?;
            }
            TimerAction::List => {
                commands::timer::list(json, &config_path)?;
            }
            TimerAction::Toggle { id } => {
                commands::timer::toggle(&id, &config_path)?;
            }
            TimerAction::Reset { id } => {
                commands::timer::reset(&id, &config_path)?;
            }
            TimerAction::Delete { id, yes } => {
                if !yes && !confirm() {
                    println!("Cancelled.");
                    return Ok(());
                }
                commands::timer::delete(&id, &config_path)?;
            }
            TimerAction::Watch => {
                commands::timer::watch(&config_path)?;
            }
        },

        Commands::Prep { action } => match action {
            PrepAction::List => {
                commands::prep::list(json, &config_path)?;
            }
            PrepAction::Add {
                name,
                kind,
                size,
                shelf_life,
                notes,
            } => {
                commands::prep::add(
                    &name,
                    kind.as_deref(),
                    size,
                    shelf_life,
                    notes.as_deref(),
                    &config_path,
                )?;
            }
            PrepAction::Use { id, amount } => {
                commands::prep::use_batch(&id, amount, &config_path)?;
            }
            PrepAction::Delete { id, yes } => {
                if !yes && !confirm() {
                    println!("Cancelled.");
                    return Ok(());
                }
                commands::prep::delete(&id, &config_path)?;
            }
            PrepAction::Templates => {
                commands::prep::templates(json, &config_path)?;
            }
            PrepAction::Alerts => {
                commands::prep::alerts(json, &config_path)?;
            }
        },

        Commands::Training { action } => match action {
            TrainingAction::Quiz { questions } => {
                commands::training::quiz(questions, &config_path)?;
            }
            TrainingAction::Challenge { rounds } => {
                commands::training::challenge(rounds, &config_path)?;
            }
            TrainingAction::Speed => {
                commands::training::speed(&config_path)?;
            }
            TrainingAction::Grade {
                recipe,
                ingredients,
                glass,
                technique,
                time_left,
            } => {
                commands::training::grade(
                    &recipe,
                    &ingredients,
                    glass.as_deref(),
                    technique.as_deref(),
                    time_left,
                    json,
                    &config_path,
                )?;
            }
            TrainingAction::Learn => {
                commands::training::learn(json, &config_path)?;
            }
        },

        Commands::Menu { action } => match action {
            MenuAction::Export { names, title, out } => {
                commands::menu::export(title.as_deref(), &names, &out, &config_path)?;
            }
            MenuAction::Candidates => {
                commands::menu::candidates(json, &config_path)?;
            }
        },

        Commands::Import { file } => {
            commands::import::run(&file, &config_path)?;
        }

        Commands::Premium { action } => match action {
            PremiumAction::Status => {
                commands::premium::status(json, &config_path)?;
            }
            PremiumAction::Unlock => {
                commands::premium::unlock(&config_path)?;
            }
            PremiumAction::Restore => {
                commands::premium::restore(&config_path)?;
            }
            PremiumAction::Reset => {
                commands::premium::reset(&config_path)?;
            }
        },

        Commands::Tools => {
            commands::premium::tools(json, &config_path)?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::show(json, &config_path)?;
            }
            ConfigAction::SetDataDir { dir } => {
                commands::config::set_data_dir(&dir, &config_path)?;
            }
        },

        Commands::Version => {
            println!("openbar cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
