//! User Client - command line client for the user service.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::GrpcClientConfig;
use domain::{User, UserFields};
use user_client_lib::{parse_state, state_name, UserClient};

#[derive(Parser)]
#[command(name = "user-client")]
#[command(about = "Command line client for the user gRPC service")]
struct Cli {
    /// Service endpoint (overrides USER_SERVICE_URL)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all users
    List,
    /// Show one user
    Get { id: String },
    /// Create a user with the given id
    Create(UserArgs),
    /// Replace an existing user's fields
    Update(UserArgs),
    /// Delete a user
    Delete { id: String },
}

#[derive(Args)]
struct UserArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    /// State name (active, inactive, blocked) or number
    #[arg(long, default_value = "active", value_parser = parse_state)]
    state: i32,
}

impl From<UserArgs> for UserFields {
    fn from(args: UserArgs) -> Self {
        UserFields {
            id: args.id,
            username: args.username,
            email: args.email,
            state: args.state,
        }
    }
}

fn print_user(user: &User) {
    println!(
        "ID: {} \t| username: {}  \t| email: {} \t| state: {} \t| created: {} \t| updated: {}",
        user.id,
        user.username,
        user.email,
        state_name(user.state),
        user.created_at.to_rfc3339(),
        user.updated_at.to_rfc3339(),
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = GrpcClientConfig::from_env();
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let client = UserClient::connect(&config).await?;

    match cli.command {
        Commands::List => {
            let users = client.list_users().await?;
            if users.is_empty() {
                println!("No users");
            }
            for user in &users {
                print_user(user);
            }
        }
        Commands::Get { id } => {
            print_user(&client.get_user(&id).await?);
        }
        Commands::Create(args) => {
            println!("{}", client.create_user(args.into()).await?);
        }
        Commands::Update(args) => {
            println!("{}", client.update_user(args.into()).await?);
        }
        Commands::Delete { id } => {
            println!("{}", client.delete_user(&id).await?);
        }
    }

    Ok(())
}
