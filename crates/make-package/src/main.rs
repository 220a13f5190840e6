//! make-package - scaffold a new Laravel package

use anyhow::Result;
use clap::Parser;
use package_maker_core::config::CONFIG_FILE;
use package_maker_core::fs::LocalFs;
use package_maker_core::prompt::AcceptDefaults;
use package_maker_core::runtime::TokioProcessRunner;
use package_maker_core::{MakeError, MakerConfig, Session, SessionArgs, TemplateStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "PACKAGE_MAKER_LOG";

#[derive(Parser, Debug)]
#[command(name = "make-package")]
#[command(about = "Create a new Laravel package")]
#[command(version)]
pub struct Args {
    /// Package name in `group/package` form, e.g. ambersive/demo
    #[arg(required_unless_present = "publish_config")]
    pub name: Option<String>,

    /// Register the package in the host project's composer.json and run composer
    #[arg(long, visible_alias = "composer")]
    pub register: bool,

    /// Overwrite an existing package (or config file with --publish-config)
    #[arg(short, long)]
    pub force: bool,

    /// Package description
    #[arg(long)]
    pub description: Option<String>,

    /// Creator name
    #[arg(long = "author-name")]
    pub author_name: Option<String>,

    /// Creator e-mail address
    #[arg(long = "author-email")]
    pub author_email: Option<String>,

    /// Laravel version constraints (comma-separated: 7.*,dev-master)
    #[arg(long, value_delimiter = ',')]
    pub versions: Option<Vec<String>>,

    /// Package license
    #[arg(long)]
    pub license: Option<String>,

    /// Accept the default answer for every prompt (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Config file to use instead of ./package-maker.yaml
    #[arg(long, env = "PACKAGE_MAKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Local directory to load stubs from instead of the built-in ones
    #[arg(long = "stub-dir")]
    pub stub_dir: Option<PathBuf>,

    /// Write the effective configuration to ./package-maker.yaml and exit
    #[arg(long = "publish-config", conflicts_with = "name")]
    pub publish_config: bool,
}

impl Args {
    fn session_args(&self, name: String) -> SessionArgs {
        SessionArgs {
            name,
            force: self.force,
            register: self.register,
            description: self.description.clone(),
            creator_name: self.author_name.clone(),
            creator_email: self.author_email.clone(),
            versions: self.versions.clone(),
            license: self.license.clone(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> Result<MakerConfig, MakeError> {
    let mut config = MakerConfig::load(&LocalFs, args.config.as_deref(), |key| {
        std::env::var(key).ok()
    })?;

    if let Some(dir) = &args.stub_dir {
        config.stub_dir = Some(dir.clone());
    }

    Ok(config)
}

fn publish_config(config: MakerConfig, path: &Path, force: bool) -> Result<()> {
    let store = match &config.stub_dir {
        Some(dir) => TemplateStore::local(dir.clone()),
        None => TemplateStore::embedded(),
    };
    let config = config.with_stub_defaults(&store.manifest(&LocalFs)?);

    config.publish(&LocalFs, path, force)?;
    println!("Config written to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_tracing();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    tracing::debug!(?config, "configuration resolved");

    if args.publish_config {
        return publish_config(config, Path::new(CONFIG_FILE), args.force);
    }

    let Some(name) = args.name.clone() else {
        anyhow::bail!("A package name is required");
    };
    let session_args = args.session_args(name);

    let result = if args.yes {
        let mut prompter = AcceptDefaults;
        Session::new(&config, &mut prompter, &LocalFs, &TokioProcessRunner)
            .run(&session_args)
            .await
    } else {
        package_maker_core::run(&config, session_args).await
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(_) => Ok(()),
        Err(e) => match e.downcast_ref::<MakeError>() {
            // Already shown to the user by the session
            Some(make_error) => std::process::exit(make_error.exit_code()),
            None => Err(e),
        },
    }
}
