use lecture_tui::app::RunOptions;

enum Flow {
    Run(RunOptions),
    Exit,
}

fn main() {
    match handle_cli_flags() {
        Ok(Flow::Exit) => {}
        Ok(Flow::Run(options)) => {
            if let Err(err) = lecture_tui::run(options) {
                eprintln!("error: {err:?}");
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}

fn handle_cli_flags() -> anyhow::Result<Flow> {
    let mut options = RunOptions::default();
    let mut list = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("Lecture-TUI {}", lecture_tui::VERSION);
                return Ok(Flow::Exit);
            }
            "--help" | "-h" => {
                println!(
                    "Lecture-TUI — Browse semester lectures from the terminal.\n\n  --version, -V              Show version and exit\n  --help,    -h              Show this help message\n  --catalog <url|path>       Read the catalog from this location\n  --list                     Print the catalog tree and exit\n  --download-link <url>      Print the direct download link for a sharing URL"
                );
                return Ok(Flow::Exit);
            }
            "--download-link" => {
                let url = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--download-link needs a URL"))?;
                println!("{}", lecture_tui::to_download_link(&url));
                return Ok(Flow::Exit);
            }
            "--catalog" => {
                let location = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--catalog needs a URL or path"))?;
                options.catalog = Some(location);
            }
            "--list" => list = true,
            other => {
                if let Some(location) = other.strip_prefix("--catalog=") {
                    options.catalog = Some(location.to_string());
                } else {
                    anyhow::bail!("unknown argument {other:?}; see --help");
                }
            }
        }
    }

    if list {
        print_catalog(&options)?;
        return Ok(Flow::Exit);
    }
    Ok(Flow::Run(options))
}

fn print_catalog(options: &RunOptions) -> anyhow::Result<()> {
    let _ = lecture_tui::logging::init_stderr();
    let cfg = lecture_tui::config::load(lecture_tui::config::LoadOptions::default())?;
    let location = options
        .catalog
        .clone()
        .unwrap_or_else(|| cfg.catalog.location());
    print!("{}", lecture_tui::app::catalog_outline(&location, &cfg)?);
    Ok(())
}
