use clap::Parser;
use directories::ProjectDirs;
use plantpal::api::{ConfigAction, PlantApi, SortKey};
use plantpal::error::{PlantError, Result};
use plantpal::ingest::ImageSource;
use plantpal::model::{NewPlant, PlantPatch};
use plantpal::store::fs_backend::FsBackend;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands, PhotoCommands, PlantFields};
use print::{print_messages, print_plant_detail, print_plants};

const HOME_ENV: &str = "PLANTPAL_HOME";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: PlantApi<FsBackend>,
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::List { search, sort }) => handle_list(&ctx, search, sort),
        Some(Commands::View { id }) => handle_view(&ctx, id),
        Some(Commands::Add {
            name,
            fields,
            photos,
        }) => handle_add(&mut ctx, name, fields, photos).await,
        Some(Commands::Edit { id, name, fields }) => handle_edit(&mut ctx, id, name, fields),
        Some(Commands::Photo(cmd)) => match cmd {
            PhotoCommands::Add { id, paths } => handle_photo_add(&mut ctx, id, paths).await,
            PhotoCommands::Rm { id, photo } => {
                let result = ctx.api.remove_photo(id, photo)?;
                print_messages(&result.messages);
                Ok(())
            }
            PhotoCommands::Thumb { id, photo } => {
                let result = ctx.api.set_thumbnail(id, photo)?;
                print_messages(&result.messages);
                Ok(())
            }
            PhotoCommands::Save { id, photo, dest } => {
                let result = ctx.api.save_photo(id, photo, &dest)?;
                print_messages(&result.messages);
                Ok(())
            }
        },
        Some(Commands::Reset { yes }) => handle_reset(&mut ctx, yes),
        Some(Commands::Export) => handle_export(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Path) => {
            println!("{}", ctx.api.snapshot_path().display());
            Ok(())
        }
        None => handle_list(&ctx, None, None),
    }
}

/// Logs go to stderr so they never mix with `export` output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "plantpal", "plantpal")
        .ok_or_else(|| PlantError::Api("Could not determine data directory".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context() -> Result<AppContext> {
    let dir = data_dir()?;
    let api = PlantApi::open(FsBackend::new(dir.clone()), dir);
    Ok(AppContext { api })
}

fn handle_list(ctx: &AppContext, search: Option<String>, sort: Option<String>) -> Result<()> {
    let sort = sort.map(|s| s.parse::<SortKey>()).transpose()?;
    let result = ctx.api.list_plants(search.as_deref(), sort)?;
    print_plants(&result.listed_plants);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: u32) -> Result<()> {
    let result = ctx.api.view_plant(id)?;
    for plant in &result.listed_plants {
        print_plant_detail(plant);
    }
    print_messages(&result.messages);
    Ok(())
}

async fn handle_add(
    ctx: &mut AppContext,
    name: String,
    fields: PlantFields,
    photos: Vec<PathBuf>,
) -> Result<()> {
    let new = NewPlant {
        name,
        scientific_name: fields.scientific_name.unwrap_or_default(),
        price: fields.price.unwrap_or_default(),
        where_bought: fields.where_bought.unwrap_or_default(),
        date_acquired: fields.date_acquired.unwrap_or_default(),
        notes: fields.notes.unwrap_or_default(),
    };
    let sources = photos.into_iter().map(ImageSource::from).collect();
    let result = ctx.api.create_plant(new, sources).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: u32,
    name: Option<String>,
    fields: PlantFields,
) -> Result<()> {
    let patch = PlantPatch {
        name,
        scientific_name: fields.scientific_name,
        price: fields.price,
        where_bought: fields.where_bought,
        date_acquired: fields.date_acquired,
        notes: fields.notes,
        ..PlantPatch::default()
    };
    let result = ctx.api.edit_plant(id, patch)?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_photo_add(ctx: &mut AppContext, id: u32, paths: Vec<PathBuf>) -> Result<()> {
    let sources = paths.into_iter().map(ImageSource::from).collect();
    let result = ctx.api.add_photos(id, sources).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes && !confirm("Discard your collection and restore the starter plants? [y/N] ")? {
        println!("Reset cancelled.");
        return Ok(());
    }
    let result = ctx.api.reset()?;
    print_messages(&result.messages);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn handle_export(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.export()?;
    if let Some(json) = &result.snapshot {
        println!("{}", json);
    }
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.config(action)?;
    print_messages(&result.messages);
    Ok(())
}
