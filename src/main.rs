mod cli;

use imagestore::config::{self, Config};
use imagestore::images::{ImageFileService, UploadedFile};
use imagestore_common::paths::is_image_file;
use imagestore_common::{Error, ImageFileId};
use imagestore_db::models::ImageFileSummary;
use imagestore_db::pool::init_pool_with_size;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "imagestore=trace,imagestore_db=debug,imagestore_common=debug".to_string()
        } else {
            "imagestore=info,imagestore_db=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Upload {
            file,
            thumbnail,
            no_thumbnail,
            size,
            content_type,
            name,
            json,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let create_thumbnail = if thumbnail {
                true
            } else if no_thumbnail {
                false
            } else {
                config.thumbnails.create_by_default
            };
            let dimension = size.unwrap_or(config.thumbnails.dimension);
            let service = open_service(&config, cli.database.as_deref())?;
            upload_file(
                &service,
                &file,
                content_type.as_deref(),
                name,
                create_thumbnail,
                dimension,
                json,
            )
        }
        Commands::Show { id, json } => {
            let service = open_service_from(cli.config.as_deref(), cli.database.as_deref())?;
            show_image(&service, &id, json)
        }
        Commands::List { name, json } => {
            let service = open_service_from(cli.config.as_deref(), cli.database.as_deref())?;
            list_images(&service, name.as_deref(), json)
        }
        Commands::Export {
            id,
            output,
            thumbnail,
        } => {
            let service = open_service_from(cli.config.as_deref(), cli.database.as_deref())?;
            export_image(&service, &id, &output, thumbnail)
        }
        Commands::Delete { id } => {
            let service = open_service_from(cli.config.as_deref(), cli.database.as_deref())?;
            delete_image(&service, &id)
        }
        Commands::InitConfig { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from("imagestore.toml"));
            config::persist::write_default_config(&path)?;
            println!("Wrote default configuration to {}", path.display());
            Ok(())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("imagestore {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn open_service_from(config_path: Option<&Path>, database: Option<&Path>) -> Result<ImageFileService> {
    let config = config::load_config_or_default(config_path)?;
    open_service(&config, database)
}

fn open_service(config: &Config, database: Option<&Path>) -> Result<ImageFileService> {
    let db_path = database.unwrap_or(config.database.path.as_path());
    let db_path_str = db_path.to_string_lossy();
    tracing::debug!("Opening database at {}", db_path_str);

    let pool = init_pool_with_size(&db_path_str, config.database.pool_size)
        .with_context(|| format!("Failed to open database {}", db_path_str))?;

    Ok(ImageFileService::new(pool).with_filter(config.thumbnails.filter.into()))
}

fn parse_id(id: &str) -> Result<ImageFileId> {
    Ok(id.parse::<ImageFileId>()?)
}

fn upload_file(
    service: &ImageFileService,
    file: &Path,
    content_type: Option<&str>,
    name: Option<String>,
    create_thumbnail: bool,
    dimension: u32,
    json: bool,
) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }
    if !is_image_file(file) {
        tracing::warn!("{:?} does not have an image file extension", file);
    }

    let mut upload = UploadedFile::from_path(file, content_type)
        .with_context(|| format!("Failed to read {:?}", file))?;
    if let Some(name) = name {
        upload.file_name = name;
    }

    let stored = service.upload_image(&upload, create_thumbnail, dimension)?;
    let summary = ImageFileSummary::from(&stored);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.id);
    }

    Ok(())
}

fn show_image(service: &ImageFileService, id: &str, json: bool) -> Result<()> {
    let id = parse_id(id)?;
    let summary = service
        .get_summary(id)?
        .ok_or_else(|| Error::not_found(format!("image {}", id)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("ID:        {}", summary.id);
        println!("File name: {}", summary.file_name);
        println!("Type:      {}", summary.file_type);
        println!("Size:      {}x{}", summary.width, summary.height);
        println!("Bytes:     {}", summary.file_size);
        match summary.thumbnail_size {
            Some(bytes) => println!("Thumbnail: {} bytes", bytes),
            None => println!("Thumbnail: none"),
        }
        println!("Created:   {}", summary.created_at.to_rfc3339());
        println!("Modified:  {}", summary.modified_at.to_rfc3339());
    }

    Ok(())
}

fn list_images(service: &ImageFileService, name: Option<&str>, json: bool) -> Result<()> {
    let images = match name {
        Some(name) => service.find_by_file_name(name)?,
        None => service.list_images()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }

    if images.is_empty() {
        println!("No images stored.");
        return Ok(());
    }

    for image in &images {
        println!(
            "{}  {:>5}x{:<5}  {:>10}  {}{}",
            image.id,
            image.width,
            image.height,
            image.file_size,
            image.file_name,
            if image.thumbnail_size.is_some() {
                " [thumb]"
            } else {
                ""
            }
        );
    }

    Ok(())
}

fn export_image(service: &ImageFileService, id: &str, output: &Path, thumbnail: bool) -> Result<()> {
    let id = parse_id(id)?;
    let image = service
        .get_image(id)?
        .ok_or_else(|| Error::not_found(format!("image {}", id)))?;

    let data = if thumbnail {
        image
            .thumbnail
            .ok_or_else(|| anyhow::anyhow!("Image {} has no thumbnail", id))?
    } else {
        image.file
    };

    std::fs::write(output, &data)
        .with_context(|| format!("Failed to write {:?}", output))?;

    tracing::info!("Exported {} bytes to {:?}", data.len(), output);
    Ok(())
}

fn delete_image(service: &ImageFileService, id: &str) -> Result<()> {
    let id = parse_id(id)?;
    if !service.delete_image(id)? {
        return Err(Error::not_found(format!("image {}", id)).into());
    }
    println!("Deleted {}", id);
    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Configuration is valid.");
    println!("  Database: {}", config.database.path.display());
    println!("  Pool size: {}", config.database.pool_size);
    println!(
        "  Thumbnails: {} ({}px, {:?})",
        if config.thumbnails.create_by_default {
            "on by default"
        } else {
            "off by default"
        },
        config.thumbnails.dimension,
        config.thumbnails.filter
    );

    Ok(())
}
