use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use photo_studio_core::{catalog, files, init, Config, PhotoStudio};
use std::path::PathBuf;
use std::time::Duration;
use termimad::crossterm::style::Color;
use termimad::MadSkin;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Photo to load into the studio (or to edit with --edit)
    image: Option<PathBuf>,

    /// Edit the photo headlessly with this instruction instead of opening the UI
    #[arg(short, long)]
    edit: Option<String>,

    /// Where to save the headless edit result (defaults to the pictures folder)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Ask the studio assistant a question and print the reply
    #[arg(long)]
    chat: Option<String>,

    /// List the wardrobe catalog and exit
    #[arg(long)]
    wardrobe: bool,

    /// Override the image model defined in .env
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup
    init();
    let args = Args::parse();

    // Handle --wardrobe before touching configuration
    if args.wardrobe {
        println!("Wardrobe catalog:");
        for option in catalog::CLOTHING_OPTIONS {
            println!("  {:<20} {}", option.id, option.prompt);
        }
        return Ok(());
    }

    // Load config and override model if specified via CLI
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(m) = args.model {
        config.image_model = m;
    }
    let studio = PhotoStudio::with_config(config);

    // One-shot chat mode
    if let Some(message) = args.chat {
        let spinner = make_spinner(format!(
            "Asking {}...",
            studio.config().chat_model
        ))?;
        let reply = studio.chat(&message).await;
        spinner.finish_and_clear();

        match reply {
            Ok(text) => print_markdown(&text),
            Err(e) => eprintln!("Gemini API Error: {}", e),
        }
        return Ok(());
    }

    // Headless edit mode
    if let Some(instruction) = args.edit {
        let image = args
            .image
            .context("--edit requires an image path argument")?;

        let spinner = make_spinner(format!(
            "Editing with {}...",
            studio.config().image_model
        ))?;
        let result = studio.edit_file(&image, &instruction).await;
        spinner.finish_and_clear();

        let data_url = result.context("Edit request failed")?;

        let output_dir = args
            .output
            .unwrap_or_else(files::default_output_dir);
        let path = files::save_edited(&data_url, &output_dir)
            .context("Failed to save edited photo")?;
        println!("Saved: {}", path.display());
        return Ok(());
    }

    // Interactive studio
    let initial = match args.image {
        Some(path) => Some(
            files::load_image(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
        ),
        None => None,
    };
    studio.run_studio(initial)?;

    Ok(())
}

fn make_spinner(message: String) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.green} {msg}")?,
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// Helper to print markdown
fn print_markdown(text: &str) {
    let mut skin = MadSkin::default();
    skin.bold.set_fg(Color::Yellow);
    skin.italic.set_fg(Color::Magenta);
    skin.code_block.set_bg(Color::Rgb { r: 40, g: 40, b: 40 });

    skin.print_text(text);
}
