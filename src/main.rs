use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tinyblog::config::{self, Overrides, SiteConfig};
use tinyblog::generate::{ChromeAssets, DEFAULT_THEME_CSS};
use tinyblog::render::RendererKind;
use tinyblog::site::{self, SitePaths};
use tinyblog::{output, serve};

#[derive(Parser)]
#[command(name = "tinyblog")]
#[command(about = "Static blog generator: markdown posts and pages to compact HTML")]
#[command(long_about = "\
Static blog generator: markdown posts and pages to compact HTML

Every top-level .md file of the content directory is a post or a page.
An optional header between two '---' lines sets its metadata.

Content structure:

  content/
  ├── hello-world.md      # Post
  ├── about.md            # Page (reserved name)
  ├── contact.md          # Page ('page: true' in the header)
  └── example.md          # Template, never built
  public/                 # Static files → out/assets/ (CSS minified)
  site.toml               # Site config (optional; site.json also accepted)

Header keys:

  title, subtitle, date, categories (comma-separated), page, author,
  min_read, thumbnail, thumbnail_on_article

Run 'tinyblog gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    content: PathBuf,

    /// Static files mirrored under /assets/
    #[arg(long, default_value = "public", global = true)]
    public: PathBuf,

    /// Output directory
    #[arg(long, default_value = "build", global = true)]
    out: PathBuf,

    /// Site configuration file (.toml or .json)
    #[arg(long, default_value = "site.toml", global = true)]
    site: PathBuf,

    /// URL prefix of every generated link (must end with '/')
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Byte budget for pages other than the index and articles
    #[arg(long, global = true)]
    max_bytes: Option<u64>,

    /// Theme stylesheet used when the site config names none
    #[arg(long, default_value = DEFAULT_THEME_CSS, global = true)]
    theme_css: String,

    /// Body renderer
    #[arg(long, value_enum, global = true)]
    renderer: Option<RendererKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site and write it to the output directory
    Build {
        /// Fail before writing if any page is over its size budget
        #[arg(long)]
        strict_budget: bool,
    },
    /// Render the site in memory and serve it over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Collect and index content without rendering
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

impl Cli {
    fn paths(&self) -> SitePaths {
        SitePaths {
            content: self.content.clone(),
            public: self.public.clone(),
            out: self.out.clone(),
            theme_css: self.theme_css.clone(),
        }
    }

    fn load_config(&self, strict_budget: bool) -> Result<SiteConfig, config::ConfigError> {
        let mut config = config::load_config(&self.site)?;
        config.apply(&Overrides {
            base_url: self.base_url.clone(),
            max_bytes: self.max_bytes,
            renderer: self.renderer,
            strict_budget,
        })?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let paths = cli.paths();

    match &cli.command {
        Command::Build { strict_budget } => {
            let config = cli.load_config(*strict_budget)?;
            let site = site::render_site(config, &paths, ChromeAssets::default())?;
            output::print_skipped(&site.content);
            let report = site::write_site(&site, &paths)?;
            let finished_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            output::print_build_output(&site, &report, &finished_at);
        }
        Command::Serve { host, port } => {
            let config = cli.load_config(false)?;
            let site = site::render_site(config, &paths, ChromeAssets::default())?;
            output::print_skipped(&site.content);
            output::print_serve_banner(host, *port, &paths.public);
            serve::serve(&site, &paths.public, host, *port, |method, url, status| {
                println!("{}", output::format_request(method, url, status));
            })?;
        }
        Command::Check => {
            println!("==> Checking {}", paths.content.display());
            cli.load_config(false)?;
            let content = site::load_content(&paths.content)?;
            output::print_check_output(&content);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
