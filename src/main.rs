/// Terminal preview of the folio page logic for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    let args = native::Args::parse();
    match native::run(args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("folio-preview: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::io::{BufRead, Write};
    use std::path::{Path, PathBuf};
    use std::sync::mpsc::{Receiver, RecvTimeoutError};
    use std::time::Duration;

    use clap::Parser;
    use folio::config::{AppConfig, LogLevel};
    use folio::gallery::LoadCompletion;
    use folio::message::{GalleryMessage, Message};
    use folio::model::{ProjectCatalog, load_newsletter_dir};
    use folio::platform::{NativeDecoderThread, UreqSubscriptionClient};
    use folio::preview::{self, Command, TerminalHost};
    use folio::ui::Language;
    use folio::{PageData, PortfolioApp, Services};
    use folio_ui::{Runtime, Settings};
    use web_time::Instant;

    /// Subscription requests give up after this long.
    const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
    /// Poll step while waiting for an image load.
    const POLL_INTERVAL: Duration = Duration::from_millis(50);

    #[derive(Parser, Debug)]
    #[command(name = "folio-preview", version, about = "Preview the portfolio page logic in a terminal")]
    pub struct Args {
        /// Site data file (projects.json); image paths resolve relative to it
        pub projects: PathBuf,

        /// Page language (en, tr, ar)
        #[arg(long, default_value = "en")]
        pub lang: String,

        /// Configuration file; defaults to the user config directory
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Directory of plain-text newsletters
        #[arg(long)]
        pub newsletters: Option<PathBuf>,

        /// Override the configured log level
        #[arg(long)]
        pub log_level: Option<String>,
    }

    fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn Error>> {
        Ok(match path {
            Some(path) => AppConfig::load_from_path(path)?,
            None => AppConfig::load_from_default_path().unwrap_or_default(),
        })
    }

    pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
        let config = load_config(args.config.as_deref())?;
        let log_level = match args.log_level.as_deref() {
            Some(name) => {
                LogLevel::from_name(name).ok_or_else(|| format!("unknown log level '{}'", name))?
            }
            None => config.preferences.log_level,
        };
        let settings = Settings {
            title: Some(format!("{} preview", config.app_name)),
            log_level: log_level.to_level_filter(),
        };
        folio_ui::init_logging(settings.log_level);

        let language =
            Language::from_code(&args.lang).ok_or_else(|| format!("unknown language '{}'", args.lang))?;
        let json = std::fs::read_to_string(&args.projects)?;
        let catalog = ProjectCatalog::from_site_json(&json, language.code())?;
        let newsletters = match &args.newsletters {
            Some(dir) => load_newsletter_dir(dir)?,
            None => Vec::new(),
        };

        let base_dir = args
            .projects
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let (loader, completions) = NativeDecoderThread::spawn(base_dir)?;
        let host = TerminalHost::new();
        let load_wait = config
            .gallery_options()
            .load_timeout
            .unwrap_or(Duration::from_secs(60));

        let page = PageData {
            catalog,
            newsletters,
            language,
            hidden: None,
        };
        let app_host = host.clone();
        let runtime = Runtime::new(move |sender| {
            PortfolioApp::new(
                &config,
                page,
                Services {
                    loader: Box::new(loader),
                    subscriber: Box::new(UreqSubscriptionClient::new(HTTP_TIMEOUT)),
                    host: Box::new(app_host),
                },
                sender,
            )
        });

        if let Some(title) = &settings.title {
            println!("{}", title);
        }
        println!("{}", preview::HELP);

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        for line in stdin.lock().lines() {
            let line = line?;
            let command = match preview::parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Help => println!("{}", preview::HELP),
                Command::Status => {}
                Command::List => {
                    let _ = runtime.with_app(|app| {
                        for (i, project) in app.catalog().iter().enumerate() {
                            let hidden = if app.grid().is_visible(i) { "" } else { " (hidden)" };
                            println!(
                                "  [{}] {} - {} images{}",
                                i,
                                project.name,
                                project.images.len(),
                                hidden
                            );
                        }
                    });
                    continue;
                }
                Command::Open(name) => {
                    match runtime.with_app(|app| preview::open_project(app, &name)).flatten() {
                        Some(message) => runtime.dispatch(message),
                        None => {
                            println!("no project named '{}'", name);
                            continue;
                        }
                    }
                }
                Command::Send(messages) => {
                    for message in messages {
                        runtime.dispatch(message);
                    }
                }
            }

            for frame in host.take_frames() {
                runtime.dispatch(frame);
            }
            settle_loads(&runtime, &completions, load_wait);

            if let Some(status) = runtime.with_app(preview::status_line) {
                println!("{}", status);
            }
            stdout.flush()?;
        }

        log::info!("Preview finished");
        Ok(())
    }

    /// Feed load completions to the app until nothing is loading, expiring
    /// loads that take longer than `wait`.
    fn settle_loads(
        runtime: &Runtime<PortfolioApp>,
        completions: &Receiver<LoadCompletion>,
        wait: Duration,
    ) {
        let deadline = Instant::now() + wait + POLL_INTERVAL;
        loop {
            // Drain everything already finished, including stale results
            while let Ok(completion) = completions.try_recv() {
                runtime.dispatch(Message::Gallery(GalleryMessage::ImageLoaded(completion)));
            }
            runtime.dispatch(Message::Gallery(GalleryMessage::Tick(Instant::now())));

            let loading = runtime
                .with_app(|app| app.gallery().session().is_loading())
                .unwrap_or(false);
            if !loading || Instant::now() >= deadline {
                return;
            }

            match completions.recv_timeout(POLL_INTERVAL) {
                Ok(completion) => {
                    runtime.dispatch(Message::Gallery(GalleryMessage::ImageLoaded(completion)))
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    log::error!("Image decoder stopped");
                    return;
                }
            }
        }
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
