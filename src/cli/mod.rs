use crate::error::Result;
use crate::torrent::load_torrent_file;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "magnetize")]
#[command(about = "Inspect .torrent files and derive magnet links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a torrent file
    Info {
        /// Path to the .torrent file
        torrent: PathBuf,
    },

    /// Print the magnet link for a torrent file
    Magnet {
        /// Path to the .torrent file
        torrent: PathBuf,

        /// Append tracker parameters to the link
        #[arg(short, long)]
        trackers: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Info { torrent } => {
                self.show_torrent_info(torrent).await?;
            }

            Commands::Magnet { torrent, trackers } => {
                let descriptor = load_torrent_file(torrent).await?;
                if *trackers {
                    println!("{}", descriptor.magnet_link_with_trackers());
                } else {
                    println!("{}", descriptor.magnet_link());
                }
            }
        }

        Ok(())
    }

    async fn show_torrent_info(&self, torrent_path: &PathBuf) -> Result<()> {
        let descriptor = load_torrent_file(torrent_path).await?;

        println!("Torrent Information");
        println!("==================");
        println!("Name: {}", descriptor.name());
        println!("Info Hash: {}", descriptor.identifier());
        println!("Total Size: {}", descriptor.size());
        println!("Pieces: {}", descriptor.piece_summary());

        if let Some(date) = descriptor.creation_date() {
            println!("Created: {} (unix seconds)", date);
        }
        if let Some(comment) = descriptor.comment() {
            println!("Comment: {}", comment);
        }
        if let Some(created_by) = descriptor.created_by() {
            println!("Created By: {}", created_by);
        }

        println!(
            "\nFiles ({}{}):",
            descriptor.file_count(),
            if descriptor.is_multi_file() { ", multi-file" } else { "" }
        );
        for (i, label) in descriptor.file_labels().iter().enumerate() {
            println!("  {}: {}", i + 1, label);
        }

        let trackers = descriptor.trackers();
        if !trackers.is_empty() {
            println!("\nTrackers:");
            for tracker in trackers {
                println!("  - {}", tracker);
            }
        }

        println!("\nMagnet: {}", descriptor.magnet_link());

        Ok(())
    }
}
