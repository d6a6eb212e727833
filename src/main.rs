use clap::{Parser, Subcommand};
use homepage_setup::catalog::Catalog;
use homepage_setup::setup::{self, OutputMode, SetupRequest};
use homepage_setup::{check, config, merge, output, paths};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "homepage-setup")]
#[command(about = "Specialize the storefront template to a single homepage")]
#[command(long_about = "\
Specialize the storefront template to a single homepage

The template ships every homepage variant side by side. `setup` keeps the one
you pick, deletes the others, and makes the chosen page the root route.

Template structure:

  src/
  ├── pages-sections/
  │   ├── fashion-1/              # Sections of each homepage
  │   ├── furniture-3/
  │   └── landing/
  └── app/
      ├── page.tsx                # Default root page (removed)
      ├── (layout-1)/             # Shared layout group
      │   ├── fashion-1/page.tsx  #   → (layout-1)/page.tsx when selected
      │   └── market-1/page.tsx
      └── furniture-3/            # Single-homepage layout
          └── page.tsx            #   → (furniture-3)/page.tsx when selected

By default the result is written to ./bazaar-starter and the template is left
untouched. Run 'homepage-setup gen-config' for a documented setup.toml.")]
#[command(version)]
struct Cli {
    /// Template directory
    #[arg(long, default_value = ".", global = true)]
    template: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Keep one homepage and make it the root route
    Setup {
        /// Homepage id, or `landing`; prompts when omitted
        homepage: Option<String>,
        /// Keep pages-sections of the other homepages
        #[arg(long)]
        keep_sections: bool,
        /// Customize the template directory itself instead of a copy
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
        /// Output directory (default from setup.toml, else ./bazaar-starter)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Merge one directory into another, overwriting files, then delete the source
    Merge {
        source: PathBuf,
        destination: PathBuf,
    },
    /// List the homepages in the catalog
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare the template against the catalog without changing anything
    Check,
    /// Print a stock setup.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let catalog = Catalog::builtin();

    match cli.command {
        Command::Setup {
            homepage,
            keep_sections,
            in_place,
            output: output_dir,
        } => {
            let setup_config = config::load_config(&cli.template)?;
            let homepage = match homepage {
                Some(h) => h,
                None => prompt_homepage(&catalog)?,
            };

            let mut request = SetupRequest::from_config(homepage, &setup_config, &cli.template);
            request.keep_sections |= keep_sections;
            if in_place {
                request.mode = OutputMode::InPlace;
            } else if let Some(dir) = output_dir {
                request.mode = OutputMode::Copy { destination: dir };
            }

            println!("==> Customizing {}", cli.template.display());
            let report = setup::run_setup(&cli.template, &catalog, &request)?;
            output::print_setup_output(&report);
            println!("==> Setup complete: {}", report.destination.display());
        }
        Command::Merge {
            source,
            destination,
        } => {
            println!(
                "==> Merging {} \u{2192} {}",
                source.display(),
                destination.display()
            );
            let report = merge::merge_directories(&source, &destination)?;
            println!("{}", output::format_merge_summary(&report));
        }
        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                output::print_catalog(&catalog);
            }
        }
        Command::Check => {
            let ext = paths::FileExtension::detect(&cli.template);
            println!("==> Checking {} ({})", cli.template.display(), ext);
            let findings = check::check_template(&cli.template, &catalog, ext);
            output::print_check_output(&findings, &cli.template);
            if !findings.is_empty() {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Ask for a homepage on stdin: a number from the list or an id.
fn prompt_homepage(catalog: &Catalog) -> io::Result<String> {
    let choices: Vec<&str> = catalog.section_ids().collect();

    println!("Set root page:");
    for line in output::format_choices(catalog) {
        println!("{}", line);
    }

    let stdin = io::stdin();
    loop {
        print!("Homepage [1-{}]: ", choices.len());
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no homepage selected",
            ));
        }
        let input = input.trim();

        let by_number = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| choices.get(i));
        if let Some(id) = by_number {
            return Ok(id.to_string());
        }
        if choices.contains(&input) {
            return Ok(input.to_string());
        }
        println!("'{}' is not in the list.", input);
    }
}
