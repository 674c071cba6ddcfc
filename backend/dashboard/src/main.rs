use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use dashboard::{Dashboard, DashboardError, config::Config};
use plates::{Plate, PlateDraft, RemoteRepository};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage the plates on the restaurant menu")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every plate
    List,

    /// Put a new plate on the menu
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        image: String,

        #[arg(long)]
        price: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Change an existing plate, unset fields keep their value
    Edit {
        id: u64,

        #[command(flatten)]
        changes: Changes,
    },

    /// Take a plate off the menu
    Delete { id: u64 },
}

#[derive(Args, Debug)]
struct Changes {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    image: Option<String>,

    #[arg(long)]
    price: Option<String>,

    #[arg(long)]
    description: Option<String>,
}

impl Changes {
    /// Draft pre-filled from `plate`, with every set field overriding it.
    fn applied_to(self, plate: &Plate) -> PlateDraft {
        let mut draft = PlateDraft::from(plate);

        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(image) = self.image {
            draft.image = image;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }

        draft
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let remote = RemoteRepository::new(&config.api_url, config.request_timeout)?;
    let mut dashboard = Dashboard::new(remote);

    dashboard.load().await?;

    match cli.command {
        Command::List => {}
        Command::Add {
            name,
            image,
            price,
            description,
        } => {
            dashboard.toggle_add_modal();
            let plate = dashboard
                .add_plate(PlateDraft {
                    name,
                    image,
                    price,
                    description,
                })
                .await?;
            dashboard.toggle_add_modal();

            println!("Added plate {}\n", plate.id);
        }
        Command::Edit { id, changes } => {
            let Some(plate) = dashboard.plate(id).cloned() else {
                bail!("No plate with id {id}");
            };

            let draft = changes.applied_to(&plate);

            dashboard.select_for_edit(plate);
            dashboard.update_plate(draft).await?;
            dashboard.toggle_edit_modal();

            println!("Updated plate {id}\n");
        }
        Command::Delete { id } => {
            let removed = match dashboard.delete_plate(id).await {
                Ok(removed) => removed,
                Err(DashboardError::Repository(e)) if e.is_not_found() => {
                    bail!("No plate with id {id}");
                }
                Err(e) => return Err(e.into()),
            };

            if !removed {
                println!("Plate {id} was not in the list, nothing changed locally");
            }

            println!("Deleted plate {id}\n");
        }
    }

    print!("{}", dashboard.view());

    Ok(())
}
