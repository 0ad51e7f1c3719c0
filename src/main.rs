mod cli;

use dccfs::config;
use dccfs_common::PathType;
use dccfs_files::{
    Compilable, Content, ContentFilter, CopyOptions, Directory, EntityFactory, FileFilter,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "dccfs=debug,dccfs_files=debug,dccfs_common=debug".to_string()
        } else {
            "dccfs=info,dccfs_files=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Validate {
        config: config_path,
    } = cli.command
    {
        let path = config_path.or(cli.config);
        return validate_config(path.as_deref());
    }

    let config = config::load_config_or_default(cli.config.as_deref())?;
    let factory = config.build_factory()?;

    match cli.command {
        Commands::Info { path } => info(&factory, &path),
        Commands::Ls {
            dir,
            filter,
            ext,
            exclude,
        } => list(&factory, &dir, filter, ext, exclude),
        Commands::Cat { path } => cat(&factory, &path),
        Commands::Create {
            path,
            content,
            json,
        } => create(&factory, &path, content, json),
        Commands::Mkdir { path } => {
            let directory = factory.create_directory(&path)?;
            println!("{}", directory.path());
            Ok(())
        }
        Commands::Cp {
            source,
            to,
            name,
            preserve,
        } => copy(&factory, &source, to, name, preserve),
        Commands::Rename { path, new_name } => {
            let mut entity = factory.resolve(&path)?;
            entity.set_base_name(&new_name)?;
            println!("{}", entity.path());
            Ok(())
        }
        Commands::Open { path } => {
            let entity = factory.resolve(&path)?;
            let Some(file) = entity.as_file() else {
                anyhow::bail!("Not a file: {:?}", path);
            };
            file.open(&config.editor()?)?;
            Ok(())
        }
        Commands::Compile { path, to } => compile(&factory, &config, &path, to),
        Commands::Kinds => {
            for (key, kind) in factory.registry().entries() {
                println!("{:<12} {:<10} {}", key, kind, kind.type_name());
            }
            Ok(())
        }
        Commands::Validate { .. } => Ok(()),
    }
}

fn info(factory: &EntityFactory, path: &Path) -> Result<()> {
    let entity = factory.resolve_or_path(path)?;

    println!("Input: {} path", PathType::of(path));
    println!("Path: {}", entity.path());
    println!("Kind: {} ({})", entity.kind(), entity.kind().type_name());
    println!(
        "Extension: {}",
        entity.extension().as_deref().unwrap_or("-")
    );
    println!("Base name: {}", entity.base_name(true));
    println!("Stem: {}", entity.base_name(false));
    println!("Exists: {}", entity.path().exists());

    Ok(())
}

fn list(
    factory: &EntityFactory,
    dir: &Path,
    filters: Vec<FileFilter>,
    extensions: Vec<String>,
    exclude: bool,
) -> Result<()> {
    let filter = ContentFilter {
        filters,
        extensions,
        extensions_included: !exclude,
    };

    let directory = Directory::new(dir)?;
    for entity in directory.content(factory, &filter)? {
        let suffix = if entity.is_directory() { "/" } else { "" };
        println!("{:<10} {}{}", entity.kind(), entity.base_name(true), suffix);
    }

    Ok(())
}

fn cat(factory: &EntityFactory, path: &Path) -> Result<()> {
    match factory.resolve(path)?.read()? {
        Content::Text(text) => print!("{}", text),
        Content::Value(value) => println!("{}", serde_json::to_string_pretty(&value)?),
    }
    Ok(())
}

fn create(
    factory: &EntityFactory,
    path: &Path,
    content: Option<String>,
    json: bool,
) -> Result<()> {
    let content = match content {
        Some(text) if json => Some(Content::Value(
            serde_json::from_str(&text).context("--content is not valid JSON")?,
        )),
        Some(text) => Some(Content::Text(text)),
        None => None,
    };

    let entity = factory.create(path, content)?;
    tracing::info!("Created {} {}", entity.kind(), entity.path());
    println!("{}", entity.path());
    Ok(())
}

fn copy(
    factory: &EntityFactory,
    source: &Path,
    to: Option<PathBuf>,
    name: Option<String>,
    preserve: bool,
) -> Result<()> {
    let entity = factory.resolve(source)?;
    let Some(file) = entity.as_file() else {
        anyhow::bail!("Only files can be copied: {:?}", source);
    };

    let mut options = CopyOptions::new().preserve_metadata(preserve);
    if let Some(to) = to {
        options = options.to_directory(to);
    }
    if let Some(name) = name {
        options = options.named(name);
    }

    let copied = file.copy(factory, &options)?;
    println!("{}", copied.path());
    Ok(())
}

fn compile(
    factory: &EntityFactory,
    config: &config::Config,
    path: &Path,
    to: Option<PathBuf>,
) -> Result<()> {
    let entity = factory.resolve(path)?;
    let Some(ui) = entity.as_ui() else {
        anyhow::bail!("Not a .ui file: {:?}", path);
    };

    let target = to.map(Directory::new).transpose()?;
    let compiler = config.ui_compiler()?;
    let module = ui.compile(target.as_ref(), &compiler)?;

    println!("{}", module.path());
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Registrations: {}", config.registry.len());
    for (key, kind) in &config.registry {
        println!("    .{} -> {}", key, kind);
    }
    println!("  Editor: {} {}", config.editor.command, config.editor.args.join(" "));
    match config.tools.uic_path {
        Some(ref uic) => println!("  UI compiler: {}", uic.display()),
        None => println!("  UI compiler: {} (PATH)", dccfs_files::CommandCompiler::DEFAULT_PROGRAM),
    }

    Ok(())
}
