use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plantpal", version)]
#[command(about = "Keep track of your houseplants and their photos", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Record fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct PlantFields {
    /// Botanical name
    #[arg(long)]
    pub scientific_name: Option<String>,

    /// Price paid, free text (e.g. "$45.00")
    #[arg(long)]
    pub price: Option<String>,

    /// Shop or person the plant came from
    #[arg(long)]
    pub where_bought: Option<String>,

    /// Date acquired (YYYY-MM-DD)
    #[arg(long)]
    pub date_acquired: Option<String>,

    /// Care notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List plants
    #[command(alias = "ls")]
    List {
        /// Search common and scientific names
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order: name, acquired, added, price
        #[arg(long)]
        sort: Option<String>,
    },

    /// Show one plant in full
    #[command(alias = "v")]
    View { id: u32 },

    /// Add a plant to the collection
    #[command(alias = "n")]
    Add {
        /// Common name of the plant
        name: String,

        #[command(flatten)]
        fields: PlantFields,

        /// Photo files to attach
        #[arg(long = "photo", num_args = 1..)]
        photos: Vec<PathBuf>,
    },

    /// Change fields of a plant
    #[command(alias = "e")]
    Edit {
        id: u32,

        /// New common name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: PlantFields,
    },

    /// Manage a plant's photos
    #[command(subcommand)]
    Photo(PhotoCommands),

    /// Discard all changes and restore the starter collection
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the collection as JSON
    Export,

    /// Get or set configuration
    Config {
        /// Configuration key (max-size-kb, max-dimension, quality, default-sort)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print the path of the saved collection
    Path,
}

#[derive(Subcommand, Debug)]
pub enum PhotoCommands {
    /// Attach photo files to a plant
    Add {
        id: u32,

        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Remove a photo (numbered from 1)
    #[command(alias = "remove")]
    Rm { id: u32, photo: usize },

    /// Use a photo as the plant's cover (numbered from 1)
    #[command(alias = "thumbnail")]
    Thumb { id: u32, photo: usize },

    /// Write an uploaded photo to a file
    Save {
        id: u32,
        photo: usize,
        dest: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_photos() {
        let cli = Cli::try_parse_from([
            "plantpal",
            "n",
            "Calathea",
            "--price",
            "$12",
            "--photo",
            "a.jpg",
            "b.png",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add {
                name,
                fields,
                photos,
            }) => {
                assert_eq!(name, "Calathea");
                assert_eq!(fields.price.as_deref(), Some("$12"));
                assert_eq!(photos.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_photo_thumb_alias() {
        let cli = Cli::try_parse_from(["plantpal", "photo", "thumbnail", "3", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Photo(PhotoCommands::Thumb { id: 3, photo: 2 }))
        ));
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = Cli::try_parse_from(["plantpal", "-v"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }
}
