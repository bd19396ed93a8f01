//! pageflow CLI - paginate structured documents into fixed-size pages

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pageflow::{
    convert, ConvertOptions, DocumentInput, JsonFormat, LayoutOptions, PageGeometry,
};

#[derive(Parser)]
#[command(name = "pageflow")]
#[command(version)]
#[command(about = "Paginate structured documents into fixed-size pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paginate a document input JSON into a paged document JSON
    Paginate {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Prepend a title heading from the document title
        #[arg(long)]
        title: bool,

        /// Print layout statistics to stderr
        #[arg(long)]
        stats: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Paginate multiple documents; failures do not stop the batch
    Batch {
        /// Input document JSON files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Prepend title headings
        #[arg(long)]
        title: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show pagination info for a document without writing output
    Info {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Characters assumed to fit on one line
    #[arg(long, value_name = "N")]
    chars_per_line: Option<usize>,

    /// Automatic-break threshold fraction (0..=1)
    #[arg(long, value_name = "F")]
    threshold: Option<f32>,

    /// Interleave an image after every Nth non-empty paragraph
    #[arg(long, value_name = "N")]
    image_cadence: Option<usize>,

    /// Use Letter page geometry instead of A4
    #[arg(long)]
    letter: bool,
}

impl LayoutArgs {
    fn to_options(&self) -> LayoutOptions {
        let mut options = LayoutOptions::default();
        if self.letter {
            options = options.with_geometry(PageGeometry::letter());
        }
        if let Some(chars) = self.chars_per_line {
            options = options.with_chars_per_line(chars);
        }
        if let Some(threshold) = self.threshold {
            options = options.with_fill_threshold(threshold);
        }
        if let Some(cadence) = self.image_cadence {
            options = options.with_image_cadence(cadence);
        }
        options
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Paginate {
            input,
            output,
            compact,
            title,
            stats,
            layout,
        } => run_paginate(&input, output.as_deref(), compact, title, stats, &layout),
        Commands::Batch {
            inputs,
            output,
            title,
            layout,
        } => run_batch(&inputs, &output, title, &layout),
        Commands::Info { input, layout } => run_info(&input, &layout),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn convert_options(layout: &LayoutArgs, title: bool, stats: bool) -> ConvertOptions {
    ConvertOptions::new()
        .with_layout(layout.to_options())
        .with_title(title)
        .with_stats(stats)
}

fn run_paginate(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    title: bool,
    stats: bool,
    layout: &LayoutArgs,
) -> pageflow::Result<ExitCode> {
    let document = DocumentInput::from_json_file(input)?;
    let result = convert(&document, &convert_options(layout, title, stats))?;

    if let Some(layout_stats) = &result.stats {
        eprintln!(
            "{} {} blocks, {} paragraphs, {} tables, {} images, {} pages",
            "stats:".cyan().bold(),
            layout_stats.blocks,
            layout_stats.paragraphs,
            layout_stats.tables,
            layout_stats.images_placed,
            layout_stats.pages
        );
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = pageflow::to_json(&result.document, format)?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!(
                "{} {} ({} pages)",
                "wrote".green().bold(),
                path.display(),
                result.page_count()
            );
        }
        None => println!("{json}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn run_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    title: bool,
    layout: &LayoutArgs,
) -> pageflow::Result<ExitCode> {
    fs::create_dir_all(output_dir)?;
    let options = convert_options(layout, title, false);

    let bar = ProgressBar::new(inputs.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );

    let mut failures = 0usize;
    for input in inputs {
        bar.set_message(input.display().to_string());
        // Each document converts independently; one failure must not
        // prevent the rest of the batch from completing.
        match paginate_one(input, output_dir, &options) {
            Ok(pages) => {
                bar.println(format!(
                    "{} {} ({pages} pages)",
                    "ok".green().bold(),
                    input.display()
                ));
            }
            Err(e) => {
                failures += 1;
                bar.println(format!(
                    "{} {}: {e}",
                    "failed".red().bold(),
                    input.display()
                ));
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    let converted = inputs.len() - failures;
    println!(
        "{} {converted} converted, {failures} failed",
        "done:".bold()
    );
    Ok(if failures == inputs.len() && !inputs.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn paginate_one(
    input: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
) -> pageflow::Result<u32> {
    let document = DocumentInput::from_json_file(input)?;
    let result = convert(&document, options)?;
    let json = pageflow::to_json(&result.document, JsonFormat::Pretty)?;

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    fs::write(output_dir.join(format!("{stem}.pages.json")), json)?;
    Ok(result.page_count())
}

fn run_info(input: &Path, layout: &LayoutArgs) -> pageflow::Result<ExitCode> {
    let document = DocumentInput::from_json_file(input)?;
    let options = convert_options(layout, false, true);
    let result = convert(&document, &options)?;
    let stats = result.stats.expect("stats requested");

    println!("{}", "Document".bold());
    if let Some(title) = &document.title {
        println!("  title:      {title}");
    }
    println!("  blocks:     {}", stats.blocks);
    println!("  paragraphs: {}", stats.paragraphs);
    println!("  tables:     {}", stats.tables);
    println!("  images:     {}", document.images.len());
    println!();
    println!("{}", "Pagination".bold());
    println!("  forced breaks: {}", stats.forced_breaks);
    println!("  images placed: {}", stats.images_placed);
    println!("  pages:         {}", stats.pages.to_string().green().bold());
    Ok(ExitCode::SUCCESS)
}
