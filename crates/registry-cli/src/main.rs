mod prompt;
mod render;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use prompt::{AssumeYes, StdinGate};
use registry_client::{AdminConsole, FileTokenStorage, ResourceController};
use registry_core::{ConfirmGate, FormValues, ModalKind, RegisterProfile, Resource};
use registry_shared::telemetry::{init_telemetry, LogFormat};
use registry_shared::ClientConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Parser)]
#[command(name = "registry")]
#[command(about = "Command-line client for the resident registry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Server base URL, overrides configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Where the session token is kept, overrides configuration
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogStyle::Compact)]
    log_format: LogStyle,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogStyle {
    Json,
    Compact,
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceArg {
    Households,
    Persons,
    Absences,
    Residences,
    Feedbacks,
}

impl ResourceArg {
    fn kind(self) -> ModalKind {
        match self {
            ResourceArg::Households => ModalKind::Household,
            ResourceArg::Persons => ModalKind::Person,
            ResourceArg::Absences => ModalKind::Absence,
            ResourceArg::Residences => ModalKind::Residence,
            ResourceArg::Feedbacks => ModalKind::Feedback,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MineArg {
    Household,
    Person,
    Feedbacks,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange credentials for a session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "REGISTRY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who the stored session belongs to
    Whoami,
    /// Create an account (does not log in)
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "REGISTRY_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Print a resource table
    List {
        #[arg(value_enum)]
        resource: ResourceArg,
        /// Only rows containing this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the form fields of one record
    Show {
        #[arg(value_enum)]
        resource: ResourceArg,
        id: String,
    },
    /// Create a record from key=value pairs
    Create {
        #[arg(value_enum)]
        resource: ResourceArg,
        #[arg(value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Update a record from key=value pairs
    Update {
        #[arg(value_enum)]
        resource: ResourceArg,
        id: String,
        #[arg(value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Delete a record after confirmation
    Delete {
        #[arg(value_enum)]
        resource: ResourceArg,
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Mark a feedback as being processed
    Accept { id: String },
    /// Reject a feedback
    Reject { id: String },
    /// Answer a feedback
    Reply { id: String, message: String },
    /// Print the statistics panels
    Stats,
    /// Records linked to the signed-in resident
    Mine {
        #[arg(value_enum)]
        what: MineArg,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_telemetry(match cli.log_format {
        LogStyle::Json => LogFormat::Json,
        LogStyle::Compact => LogFormat::Compact,
    });

    let mut config = ClientConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(token_file) = cli.token_file {
        config.storage.token_path = token_file;
    }

    debug!(
        base_url = %config.api.base_url,
        token_path = %config.storage.token_path.display(),
        "Configuration loaded"
    );

    let storage = Arc::new(FileTokenStorage::new(&config.storage.token_path));
    let console = AdminConsole::from_config(&config, storage)?;

    let result = run(&console, cli.command).await;
    render::notices(&console.client().notices().take_all());
    result
}

async fn run(console: &AdminConsole, command: Commands) -> anyhow::Result<()> {
    // every command except the auth exchanges works on the stored session
    if !matches!(command, Commands::Login { .. } | Commands::Logout | Commands::Register { .. }) {
        console.auth().restore().await;
    }

    match command {
        Commands::Login { username, password } => {
            console.auth().login(&username, &password).await?;
            render::auth(&console.auth_view());
        }
        Commands::Logout => console.logout(),
        Commands::Whoami => render::auth(&console.auth_view()),
        Commands::Register { username, password, full_name } => {
            let profile = RegisterProfile::new(&username, &password, full_name.as_deref());
            console.register(&profile).await?;
        }
        Commands::List { resource, search } => {
            let search = search.as_deref();
            match resource {
                ResourceArg::Households => list(console.households(), search).await?,
                ResourceArg::Persons => list(console.persons(), search).await?,
                ResourceArg::Absences => list(console.absences(), search).await?,
                ResourceArg::Residences => list(console.residences(), search).await?,
                ResourceArg::Feedbacks => list(console.feedbacks(), search).await?,
            }
        }
        Commands::Show { resource, id } => {
            let kind = resource.kind();
            console.open_edit(kind, &id).await?;
            render::form(kind.fields(), &console.form());
            console.close_modal();
        }
        Commands::Create { resource, fields } => {
            let kind = resource.kind();
            let form = to_form(kind, &fields)?;
            console.open_create(kind).await;
            fill_and_submit(console, &form).await?;
        }
        Commands::Update { resource, id, fields } => {
            let kind = resource.kind();
            let form = to_form(kind, &fields)?;
            console.open_edit(kind, &id).await?;
            fill_and_submit(console, &form).await?;
        }
        Commands::Delete { resource, id, yes } => {
            let gate: &dyn ConfirmGate = if yes { &AssumeYes } else { &StdinGate };
            if !console.delete(resource.kind(), &id, gate).await? {
                println!("Đã hủy");
            }
        }
        Commands::Accept { id } => {
            console.feedbacks().accept(&id).await?;
        }
        Commands::Reject { id } => {
            console.feedbacks().reject(&id).await?;
        }
        Commands::Reply { id, message } => {
            console.feedbacks().reply(&id, &message).await?;
        }
        Commands::Stats => {
            let view = console.statistics().load().await?;
            render::statistics(&view);
        }
        Commands::Mine { what } => {
            let service = console.self_service();
            let value = match what {
                MineArg::Household => serde_json::to_value(service.my_household().await?)?,
                MineArg::Person => serde_json::to_value(service.my_person().await?)?,
                MineArg::Feedbacks => serde_json::to_value(service.my_feedbacks().await?)?,
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

async fn list<R: Resource>(
    controller: &ResourceController<R>,
    search: Option<&str>,
) -> anyhow::Result<()> {
    controller.list().await?;
    if let Some(view) = controller.view() {
        render::list::<R>(&view, search);
    }
    Ok(())
}

fn to_form(kind: ModalKind, fields: &[(String, String)]) -> anyhow::Result<FormValues> {
    let pairs = fields.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let (form, unknown) = FormValues::from_pairs(kind.fields(), pairs);
    if !unknown.is_empty() {
        let known: Vec<&str> = kind.fields().iter().map(|spec| spec.key).collect();
        bail!("unknown field(s) {}; expected one of {}", unknown.join(", "), known.join(", "));
    }
    Ok(form)
}

async fn fill_and_submit(console: &AdminConsole, form: &FormValues) -> anyhow::Result<()> {
    for (field, value) in form.iter() {
        console.set_field(field, value)?;
    }
    console.submit().await?;
    Ok(())
}
