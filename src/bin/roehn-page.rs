use anyhow::{Context as _, Result};
use clap::Parser;
use roehn_config::AppConfig as _;
use roehn_page::{AlertContent, Config, Page, Severity};
use std::{
    fs,
    io::{self, Read as _, Write as _},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tracing::warn;
use url::Url;

fn main() {
    let guard = roehn_logging::Config::load()
        .and_then(roehn_logging::init)
        .expect("error initializing logging");

    if let Err(err) = CommandLine::parse().handle_args() {
        eprintln!("error running roehn-page: {:?}", err);
        drop(guard);
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version,
    rename_all = "kebab-case",
)]
enum CommandLine {
    /// Renders a page the way a browser shows it after loading: the current
    /// navigation link marked active, and the given alerts on top of the
    /// content container.
    Render {
        /// HTML file to read, `-` for stdin
        #[arg(default_value = "-")]
        file: PathBuf,

        /// URL the page is served from
        #[arg(long)]
        url: Url,

        /// Alert message to show, can be repeated
        #[arg(long = "alert")]
        alerts: Vec<String>,

        /// Alert style: success, danger, warning, info or any other suffix
        #[arg(long, default_value = "success")]
        severity: Severity,

        /// Treat alert messages as HTML instead of plain text
        #[arg(long)]
        markup: bool,

        /// Milliseconds to let pass after the alerts are shown
        #[arg(long, default_value_t = 0)]
        elapsed_ms: u64,
    },
}

impl CommandLine {
    fn handle_args(self) -> Result<()> {
        let config = Arc::new(Config::load()?);

        match self {
            Self::Render {
                file,
                url,
                alerts,
                severity,
                markup,
                elapsed_ms,
            } => {
                let html = read_input(&file)?;
                let mut page = Page::parse(&html, url, config);
                page.content_loaded()?;

                for message in alerts {
                    let content = if markup {
                        AlertContent::Markup(message)
                    } else {
                        AlertContent::Text(message)
                    };
                    if let Err(err) = page.show_alert(content, severity.clone()) {
                        warn!(?err, "could not show alert");
                        return Err(err.into());
                    }
                }

                page.advance(Duration::from_millis(elapsed_ms));
                io::stdout()
                    .write_all(page.to_html().as_bytes())
                    .context("could not write page to stdout")?;
            }
        }

        Ok(())
    }
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut html = String::new();
        io::stdin()
            .read_to_string(&mut html)
            .context("could not read page from stdin")?;
        Ok(html)
    } else {
        fs::read_to_string(file).with_context(|| format!("could not read {}", file.display()))
    }
}
