//! pet-adopt: browse adoptable pets, request adoptions and review them

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pet_adopt::adopt::accounts::ProfileUpdate;
use pet_adopt::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "pet-adopt")]
#[command(about = "Pet adoption catalog and request tracker", long_about = None)]
#[command(version)]
struct Cli {
    /// Storage database (defaults to $PET_ADOPT_DB, then the platform data dir)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Pet fields shared by `pets add` and `pets edit`
#[derive(clap::Args)]
struct PetArgs {
    #[arg(long)]
    name: Option<String>,

    /// Species, e.g. Dog or Cat
    #[arg(long = "type")]
    kind: Option<String>,

    #[arg(long)]
    breed: Option<String>,

    /// Free text, e.g. "2 years" or "4 months"
    #[arg(long)]
    age: Option<String>,

    /// small, medium or large
    #[arg(long)]
    size: Option<String>,

    /// male or female
    #[arg(long)]
    gender: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Image URL
    #[arg(long)]
    image: Option<String>,
}

impl From<PetArgs> for commands::pets::PetFields {
    fn from(args: PetArgs) -> Self {
        Self {
            name: args.name,
            kind: args.kind,
            breed: args.breed,
            age: args.age,
            size: args.size,
            gender: args.gender,
            description: args.description,
            image: args.image,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage the pet catalog
    Pets {
        #[command(subcommand)]
        command: PetsCommand,
    },

    /// Request to adopt a pet
    Adopt {
        /// Pet id
        pet_id: u64,

        /// Your name (defaults to the signed-in user)
        #[arg(long)]
        name: Option<String>,

        /// Your email (defaults to the signed-in user)
        #[arg(long)]
        email: Option<String>,
    },

    /// View and review adoption requests
    Requests {
        #[command(subcommand)]
        command: RequestsCommand,
    },

    /// Create an account and sign in
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign in
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show or update your profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        /// Avatar image URL
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Starred pets
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },

    /// Adoption notifications
    Notifications {
        #[command(subcommand)]
        command: NotificationsCommand,
    },

    /// Show or change the color theme
    Theme {
        /// light, dark or toggle (shows the current theme if omitted)
        value: Option<String>,
    },

    /// Adoption overview (admin statistics for the admin)
    Dashboard,
}

#[derive(Subcommand)]
enum PetsCommand {
    /// List pets, filtered and paginated
    List {
        /// Match name, type or breed (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,

        /// Species, e.g. Dog
        #[arg(long = "type", short = 't')]
        kind: Option<String>,

        /// Breed (repeatable)
        #[arg(long = "breed", short)]
        breeds: Vec<String>,

        /// small, medium or large (repeatable)
        #[arg(long = "size")]
        sizes: Vec<String>,

        /// puppy, young-adult, adult or senior
        #[arg(long, short)]
        age: Option<String>,

        /// male or female
        #[arg(long, short)]
        gender: Option<String>,

        /// available or adopted
        #[arg(long)]
        status: Option<String>,

        #[arg(long, short, default_value_t = 1)]
        page: usize,

        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Show one pet
    Show { id: u64 },

    /// List the values each filter accepts
    Options,

    /// Add a pet (admin)
    Add {
        #[command(flatten)]
        fields: PetArgs,
    },

    /// Edit a pet (admin)
    Edit {
        id: u64,

        #[command(flatten)]
        fields: PetArgs,
    },

    /// Delete a pet (admin)
    Delete { id: u64 },

    /// Restore the default catalog (admin)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RequestsCommand {
    /// Your own requests
    Mine,

    /// All requests (admin)
    List {
        /// pending, approved or rejected
        #[arg(long)]
        status: Option<String>,
    },

    /// Approve a pending request (admin)
    Approve { id: String },

    /// Reject a pending request (admin)
    Reject { id: String },

    /// Delete a request (admin)
    Remove { id: String },
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List starred pets
    List,

    /// Star or unstar a pet
    Toggle { pet_id: u64 },
}

#[derive(Subcommand)]
enum NotificationsCommand {
    /// Show notifications
    List,

    /// Remove all notifications
    Clear,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.db)?;
    let store = commands::utils::open_store(&config)?;

    let output = match cli.command {
        Commands::Pets { command } => match command {
            PetsCommand::List {
                search,
                kind,
                breeds,
                sizes,
                age,
                gender,
                status,
                page,
                per_page,
            } => {
                let options = commands::pets::ListOptions {
                    search,
                    kind,
                    breeds,
                    sizes,
                    age,
                    gender,
                    status,
                    page,
                    per_page,
                };
                commands::pets::list(&store, &config, options)?
            }
            PetsCommand::Show { id } => commands::pets::show(&store, id)?,
            PetsCommand::Options => commands::pets::options(&store)?,
            PetsCommand::Add { fields } => commands::pets::add(&store, &config, fields.into())?,
            PetsCommand::Edit { id, fields } => {
                commands::pets::edit(&store, &config, id, fields.into())?
            }
            PetsCommand::Delete { id } => commands::pets::delete(&store, &config, id)?,
            PetsCommand::Reset { yes } => commands::pets::reset(&store, &config, yes)?,
        },

        Commands::Adopt {
            pet_id,
            name,
            email,
        } => commands::requests::submit(&store, pet_id, name, email)?,

        Commands::Requests { command } => match command {
            RequestsCommand::Mine => commands::requests::mine(&store)?,
            RequestsCommand::List { status } => {
                commands::requests::list(&store, &config, status.as_deref())?
            }
            RequestsCommand::Approve { id } => commands::requests::approve(&store, &config, &id)?,
            RequestsCommand::Reject { id } => commands::requests::reject(&store, &config, &id)?,
            RequestsCommand::Remove { id } => commands::requests::remove(&store, &config, &id)?,
        },

        Commands::Signup {
            name,
            email,
            password,
        } => commands::auth::signup(&store, &name, &email, &password)?,
        Commands::Login { email, password } => commands::auth::login(&store, &email, &password)?,
        Commands::Logout => commands::auth::logout(&store)?,
        Commands::Whoami => commands::auth::whoami(&store, &config)?,
        Commands::Profile {
            name,
            email,
            password,
            avatar,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                password,
                avatar,
            };
            commands::auth::profile(&store, update)?
        }

        Commands::Favorites { command } => match command {
            FavoritesCommand::List => commands::favorites::list(&store)?,
            FavoritesCommand::Toggle { pet_id } => commands::favorites::toggle(&store, pet_id)?,
        },

        Commands::Notifications { command } => match command {
            NotificationsCommand::List => commands::notifications::list(&store)?,
            NotificationsCommand::Clear => commands::notifications::clear(&store)?,
        },

        Commands::Theme { value } => commands::theme::execute(&store, value.as_deref())?,

        Commands::Dashboard => commands::dashboard::execute(&store, &config)?,
    };

    println!("{}", output);
    Ok(())
}
