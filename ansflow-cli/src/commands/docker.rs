//! Docker command handlers

use ansflow_client::{AnsflowClient, ResourceTable};
use ansflow_core::domain::docker::{
    DockerCompose, DockerContainer, DockerImage, DockerRegistry, RegistryType,
};
use ansflow_core::dto::docker::{
    CreateCompose, CreateContainer, CreateImage, CreateRegistry, UpdateCompose, UpdateContainer,
    UpdateImage, UpdateRegistry,
};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde_json::Value as JsonValue;

use super::{delete_resource, print_rows};
use crate::id_resolver::resolve_id;
use crate::output::{
    colorize_status, fmt_opt_time, fmt_time, parse_json, print_action, print_empty,
    print_success, read_text_arg,
};

/// Docker subcommands
#[derive(Subcommand)]
pub enum DockerCommands {
    /// Registry management
    Registry {
        #[command(subcommand)]
        command: RegistryCommands,
    },
    /// Image management
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// Container management
    Container {
        #[command(subcommand)]
        command: ContainerCommands,
    },
    /// Compose project management
    Compose {
        #[command(subcommand)]
        command: ComposeCommands,
    },
    /// Show Docker system statistics
    Stats,
}

#[derive(Subcommand)]
pub enum RegistryCommands {
    /// List registries
    List,
    /// Add a registry
    Create {
        #[arg(short, long)]
        name: String,

        /// Registry URL (http or https)
        #[arg(short, long)]
        url: String,

        /// dockerhub, private, harbor, ecr, gcr or acr
        #[arg(short = 't', long, default_value = "private")]
        registry_type: RegistryType,

        #[arg(long)]
        username: Option<String>,

        #[arg(long, env = "ANSFLOW_REGISTRY_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Make this the default registry
        #[arg(long)]
        default: bool,
    },
    /// Update a registry
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        url: Option<String>,

        #[arg(short = 't', long)]
        registry_type: Option<RegistryType>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Remove a registry
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Test the connection to a registry
    Test { id: String },
    /// Make a registry the default
    SetDefault { id: String },
}

#[derive(Subcommand)]
pub enum ImageCommands {
    /// List images
    List,
    /// Show image details
    Get { id: String },
    /// Define an image
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "latest")]
        tag: String,

        /// Registry ID or name
        #[arg(short, long)]
        registry: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Dockerfile content, or @file
        #[arg(short = 'f', long)]
        dockerfile: Option<String>,

        #[arg(long)]
        build_context: Option<String>,

        /// Build arguments as a JSON object
        #[arg(long, value_parser = parse_json)]
        build_args: Option<JsonValue>,
    },
    /// Update an image
    Update {
        id: String,

        #[arg(short, long)]
        tag: Option<String>,

        #[arg(short, long)]
        registry: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Dockerfile content, or @file
        #[arg(short = 'f', long)]
        dockerfile: Option<String>,

        #[arg(long)]
        build_context: Option<String>,

        #[arg(long, value_parser = parse_json)]
        build_args: Option<JsonValue>,
    },
    /// Delete an image
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Build an image
    Build { id: String },
    /// Push an image
    Push {
        id: String,

        /// Target registry ID or name, the image's own registry when omitted
        #[arg(short, long)]
        registry: Option<String>,
    },
    /// Pull an image
    Pull { id: String },
    /// List recorded versions of an image
    Versions { id: String },
}

#[derive(Subcommand)]
pub enum ContainerCommands {
    /// List containers
    List,
    /// Show container details
    Get { id: String },
    /// Create a container from an image
    Create {
        #[arg(short, long)]
        name: String,

        /// Image ID or name
        #[arg(short, long)]
        image: String,

        #[arg(short, long)]
        command: Option<String>,

        /// Port mappings as JSON
        #[arg(long, value_parser = parse_json)]
        ports: Option<JsonValue>,

        /// Environment variables as a JSON object
        #[arg(long, value_parser = parse_json)]
        env: Option<JsonValue>,

        /// Volumes as JSON
        #[arg(long, value_parser = parse_json)]
        volumes: Option<JsonValue>,

        #[arg(long)]
        restart_policy: Option<String>,

        #[arg(long)]
        memory_limit: Option<String>,

        #[arg(long)]
        cpu_limit: Option<String>,
    },
    /// Update a container
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        command: Option<String>,

        #[arg(long, value_parser = parse_json)]
        ports: Option<JsonValue>,

        #[arg(long, value_parser = parse_json)]
        env: Option<JsonValue>,

        #[arg(long, value_parser = parse_json)]
        volumes: Option<JsonValue>,

        #[arg(long)]
        restart_policy: Option<String>,

        #[arg(long)]
        memory_limit: Option<String>,

        #[arg(long)]
        cpu_limit: Option<String>,
    },
    /// Delete a container
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Start a container
    Start { id: String },
    /// Stop a container
    Stop { id: String },
    /// Restart a container
    Restart { id: String },
    /// Show container logs
    Logs {
        id: String,

        /// Number of lines from the end
        #[arg(short, long, default_value = "100")]
        tail: u32,
    },
    /// Show container resource usage
    Stats { id: String },
}

#[derive(Subcommand)]
pub enum ComposeCommands {
    /// List compose projects
    List,
    /// Show a compose project and its file
    Get { id: String },
    /// Create a compose project
    Create {
        #[arg(short, long)]
        name: String,

        /// Compose file content, or @file
        #[arg(short, long)]
        file: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        env_file: Option<String>,

        #[arg(short, long)]
        workdir: Option<String>,
    },
    /// Update a compose project
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        /// Compose file content, or @file
        #[arg(short, long)]
        file: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        env_file: Option<String>,

        #[arg(short, long)]
        workdir: Option<String>,
    },
    /// Delete a compose project
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Deploy a compose project
    Deploy { id: String },
    /// Stop a compose project
    Stop { id: String },
    /// Validate a compose file without saving it
    Validate {
        /// Compose file content, or @file
        file: String,
    },
}

/// Handle docker commands
pub async fn handle_docker_command(command: DockerCommands, client: &AnsflowClient) -> Result<()> {
    match command {
        DockerCommands::Registry { command } => handle_registry(command, client).await,
        DockerCommands::Image { command } => handle_image(command, client).await,
        DockerCommands::Container { command } => handle_container(command, client).await,
        DockerCommands::Compose { command } => handle_compose(command, client).await,
        DockerCommands::Stats => {
            let stats = client
                .get_docker_system_stats()
                .await
                .context("Failed to fetch Docker statistics")?;

            println!("{}", "Docker Overview:".bold());
            println!("  Registries:       {}", stats.total_registries);
            println!("  Images:           {}", stats.total_images);
            println!(
                "  Containers:       {} ({} running)",
                stats.total_containers,
                stats.running_containers.to_string().green()
            );
            println!("  Compose projects: {}", stats.total_compose_projects);
            if let Some(disk) = stats.disk_usage {
                println!("  Disk usage:       {}", fmt_bytes(disk));
            }
            Ok(())
        }
    }
}

async fn handle_registry(command: RegistryCommands, client: &AnsflowClient) -> Result<()> {
    let mut registries: ResourceTable<DockerRegistry> = ResourceTable::new(client.clone());

    match command {
        RegistryCommands::List => {
            registries
                .load()
                .await
                .context("Failed to fetch registries")?;
            print_registries(registries.rows());
        }
        RegistryCommands::Create {
            name,
            url,
            registry_type,
            username,
            password,
            description,
            default,
        } => {
            let req = CreateRegistry {
                username,
                password,
                description,
                is_default: default,
                ..CreateRegistry::new(name, url, registry_type)
            };
            let registry = registries
                .create(&req)
                .await
                .context("Failed to create registry")?;
            print_success(&format!("Registry {} created (id {})", registry.name, registry.id));
            println!();
            print_registries(registries.rows());
        }
        RegistryCommands::Update {
            id,
            name,
            url,
            registry_type,
            username,
            password,
            description,
        } => {
            let id = resolve_id::<DockerRegistry>(client, &id).await?;
            let req = UpdateRegistry {
                name,
                url,
                registry_type,
                username,
                password,
                description,
                is_default: None,
            };
            registries
                .update(id, &req)
                .await
                .context("Failed to update registry")?;
            print_success(&format!("Registry {} updated", id));
            println!();
            print_registries(registries.rows());
        }
        RegistryCommands::Delete { id, yes } => {
            delete_resource::<DockerRegistry>(client, &id, yes).await?;
        }
        RegistryCommands::Test { id } => {
            let id = resolve_id::<DockerRegistry>(client, &id).await?;
            let result = client
                .test_docker_registry(id)
                .await
                .context("Failed to test registry")?;
            if result.success {
                print_success("Registry reachable");
            } else {
                println!("{}", "✗ Registry unreachable".red().bold());
            }
            println!("  Status: {}", colorize_status(result.status.as_str()));
            if let Some(message) = &result.message {
                println!("  {}", message.dimmed());
            }
        }
        RegistryCommands::SetDefault { id } => {
            let id = resolve_id::<DockerRegistry>(client, &id).await?;
            let result = client
                .set_default_docker_registry(id)
                .await
                .context("Failed to set default registry")?;
            print_action("Default registry change", &result);
            registries
                .load()
                .await
                .context("Failed to fetch registries")?;
            println!();
            print_registries(registries.rows());
        }
    }

    Ok(())
}

async fn handle_image(command: ImageCommands, client: &AnsflowClient) -> Result<()> {
    let mut images: ResourceTable<DockerImage> = ResourceTable::new(client.clone());

    match command {
        ImageCommands::List => {
            images.load().await.context("Failed to fetch images")?;
            print_images(images.rows());
        }
        ImageCommands::Get { id } => {
            let id = resolve_id::<DockerImage>(client, &id).await?;
            let image = client
                .get_docker_image(id)
                .await
                .context("Failed to fetch image")?;

            println!("{}", "Image Details:".bold());
            println!("  ID:      {}", image.id.to_string().cyan());
            println!("  Image:   {}", image.reference().bold());
            println!("  Build:   {}", colorize_status(image.build_status.as_str()));
            if let Some(registry) = image.registry {
                println!("  Registry: {}", registry);
            }
            if let Some(size) = image.image_size {
                println!("  Size:    {}", fmt_bytes(size));
            }
            println!(
                "  Pushed:  {}",
                if image.is_pushed {
                    fmt_opt_time(image.pushed_at.as_ref())
                } else {
                    "no".to_string()
                }
            );
            println!("  Created: {}", fmt_time(&image.created_at));
            if let Some(dockerfile) = &image.dockerfile_content {
                println!("\n{}", "Dockerfile:".bold());
                println!("{}", dockerfile);
            }
        }
        ImageCommands::Create {
            name,
            tag,
            registry,
            description,
            dockerfile,
            build_context,
            build_args,
        } => {
            let registry = match registry {
                Some(r) => Some(resolve_id::<DockerRegistry>(client, &r).await?),
                None => None,
            };
            let req = CreateImage {
                name,
                tag,
                registry,
                description,
                dockerfile_content: dockerfile.as_deref().map(read_text_arg).transpose()?,
                build_context,
                build_args,
            };
            let image = images
                .create(&req)
                .await
                .context("Failed to create image")?;
            print_success(&format!("Image {} created (id {})", image.reference(), image.id));
            println!();
            print_images(images.rows());
        }
        ImageCommands::Update {
            id,
            tag,
            registry,
            description,
            dockerfile,
            build_context,
            build_args,
        } => {
            let id = resolve_id::<DockerImage>(client, &id).await?;
            let registry = match registry {
                Some(r) => Some(resolve_id::<DockerRegistry>(client, &r).await?),
                None => None,
            };
            let req = UpdateImage {
                tag,
                registry,
                description,
                dockerfile_content: dockerfile.as_deref().map(read_text_arg).transpose()?,
                build_context,
                build_args,
            };
            images
                .update(id, &req)
                .await
                .context("Failed to update image")?;
            print_success(&format!("Image {} updated", id));
            println!();
            print_images(images.rows());
        }
        ImageCommands::Delete { id, yes } => {
            delete_resource::<DockerImage>(client, &id, yes).await?;
        }
        ImageCommands::Build { id } => {
            let id = resolve_id::<DockerImage>(client, &id).await?;
            let result = client
                .build_docker_image(id)
                .await
                .context("Failed to build image")?;
            print_action("Build", &result);
        }
        ImageCommands::Push { id, registry } => {
            let id = resolve_id::<DockerImage>(client, &id).await?;
            let registry = match registry {
                Some(r) => Some(resolve_id::<DockerRegistry>(client, &r).await?),
                None => None,
            };
            let result = client
                .push_docker_image(id, registry)
                .await
                .context("Failed to push image")?;
            print_action("Push", &result);
        }
        ImageCommands::Pull { id } => {
            let id = resolve_id::<DockerImage>(client, &id).await?;
            let result = client
                .pull_docker_image(id)
                .await
                .context("Failed to pull image")?;
            print_action("Pull", &result);
        }
        ImageCommands::Versions { id } => {
            let id = resolve_id::<DockerImage>(client, &id).await?;
            let versions = client
                .get_docker_image_versions(id)
                .await
                .context("Failed to fetch image versions")?;
            if versions.is_empty() {
                print_empty("image version");
            }
            for version in &versions {
                let release = if version.is_release { " release".green() } else { "".normal() };
                println!(
                    "  {} {}{} {}",
                    "▸".cyan(),
                    version.version.bold(),
                    release,
                    fmt_time(&version.created_at).dimmed()
                );
                if let Some(changelog) = &version.changelog {
                    println!("    {}", changelog);
                }
            }
        }
    }

    Ok(())
}

async fn handle_container(command: ContainerCommands, client: &AnsflowClient) -> Result<()> {
    let mut containers: ResourceTable<DockerContainer> = ResourceTable::new(client.clone());

    match command {
        ContainerCommands::List => {
            containers
                .load()
                .await
                .context("Failed to fetch containers")?;
            print_containers(containers.rows());
        }
        ContainerCommands::Get { id } => {
            let id = resolve_id::<DockerContainer>(client, &id).await?;
            let container = client
                .get_docker_container(id)
                .await
                .context("Failed to fetch container")?;

            println!("{}", "Container Details:".bold());
            println!("  ID:      {}", container.id.to_string().cyan());
            println!("  Name:    {}", container.name.bold());
            println!(
                "  Image:   {}",
                container
                    .image_name
                    .clone()
                    .unwrap_or_else(|| container.image.to_string())
            );
            println!("  Status:  {}", colorize_status(container.status.as_str()));
            if let Some(cid) = &container.container_id {
                println!("  Docker:  {}", cid.dimmed());
            }
            if let Some(command) = &container.command {
                println!("  Command: {}", command);
            }
            if let Some(policy) = &container.restart_policy {
                println!("  Restart: {}", policy);
            }
            if !container.port_mappings.is_null() {
                println!("  Ports:   {}", container.port_mappings);
            }
            println!("  Started: {}", fmt_opt_time(container.started_at.as_ref()));
        }
        ContainerCommands::Create {
            name,
            image,
            command,
            ports,
            env,
            volumes,
            restart_policy,
            memory_limit,
            cpu_limit,
        } => {
            let image = resolve_id::<DockerImage>(client, &image).await?;
            let req = CreateContainer {
                name,
                image,
                command,
                port_mappings: ports,
                environment_vars: env,
                volumes,
                restart_policy,
                memory_limit,
                cpu_limit,
            };
            let container = containers
                .create(&req)
                .await
                .context("Failed to create container")?;
            print_success(&format!(
                "Container {} created (id {})",
                container.name, container.id
            ));
            println!();
            print_containers(containers.rows());
        }
        ContainerCommands::Update {
            id,
            name,
            command,
            ports,
            env,
            volumes,
            restart_policy,
            memory_limit,
            cpu_limit,
        } => {
            let id = resolve_id::<DockerContainer>(client, &id).await?;
            let req = UpdateContainer {
                name,
                command,
                port_mappings: ports,
                environment_vars: env,
                volumes,
                restart_policy,
                memory_limit,
                cpu_limit,
            };
            containers
                .update(id, &req)
                .await
                .context("Failed to update container")?;
            print_success(&format!("Container {} updated", id));
            println!();
            print_containers(containers.rows());
        }
        ContainerCommands::Delete { id, yes } => {
            delete_resource::<DockerContainer>(client, &id, yes).await?;
        }
        ContainerCommands::Start { id } => {
            let id = resolve_id::<DockerContainer>(client, &id).await?;
            let result = client
                .start_docker_container(id)
                .await
                .context("Failed to start container")?;
            print_action("Start", &result);
        }
        ContainerCommands::Stop { id } => {
            let id = resolve_id::<DockerContainer>(client, &id).await?;
            let result = client
                .stop_docker_container(id)
                .await
                .context("Failed to stop container")?;
            print_action("Stop", &result);
        }
        ContainerCommands::Restart { id } => {
            let id = resolve_id::<DockerContainer>(client, &id).await?;
            let result = client
                .restart_docker_container(id)
                .await
                .context("Failed to restart container")?;
            print_action("Restart", &result);
        }
        ContainerCommands::Logs { id, tail } => {
            let id = resolve_id::<DockerContainer>(client, &id).await?;
            let logs = client
                .get_docker_container_logs(id, tail)
                .await
                .context("Failed to fetch container logs")?;
            if logs.logs.is_empty() {
                println!("{}", "No logs available.".yellow());
            } else {
                println!("{}", logs.logs);
            }
        }
        ContainerCommands::Stats { id } => {
            let id = resolve_id::<DockerContainer>(client, &id).await?;
            let stats = client
                .get_docker_container_stats(id)
                .await
                .context("Failed to fetch container stats")?;

            println!("{}", "Container Stats:".bold());
            println!("  CPU:     {:.1}%", stats.cpu_percent);
            println!(
                "  Memory:  {} / {} ({:.1}%)",
                fmt_bytes(stats.memory_usage),
                fmt_bytes(stats.memory_limit),
                stats.memory_percent
            );
            println!(
                "  Network: rx {}  tx {}",
                fmt_bytes(stats.network_rx),
                fmt_bytes(stats.network_tx)
            );
            println!(
                "  Block:   read {}  write {}",
                fmt_bytes(stats.block_read),
                fmt_bytes(stats.block_write)
            );
        }
    }

    Ok(())
}

async fn handle_compose(command: ComposeCommands, client: &AnsflowClient) -> Result<()> {
    let mut projects: ResourceTable<DockerCompose> = ResourceTable::new(client.clone());

    match command {
        ComposeCommands::List => {
            projects
                .load()
                .await
                .context("Failed to fetch compose projects")?;
            print_compose_projects(projects.rows());
        }
        ComposeCommands::Get { id } => {
            let id = resolve_id::<DockerCompose>(client, &id).await?;
            let compose = client
                .get_docker_compose(id)
                .await
                .context("Failed to fetch compose project")?;

            println!("{}", "Compose Project:".bold());
            println!("  ID:      {}", compose.id.to_string().cyan());
            println!("  Name:    {}", compose.name.bold());
            println!("  Status:  {}", colorize_status(compose.status.as_str()));
            if let Some(dir) = &compose.working_directory {
                println!("  Workdir: {}", dir);
            }
            println!("  Created: {}", fmt_time(&compose.created_at));
            println!("\n{}", "docker-compose.yml:".bold());
            println!("{}", compose.compose_content);
        }
        ComposeCommands::Create {
            name,
            file,
            description,
            env_file,
            workdir,
        } => {
            let req = CreateCompose {
                name,
                description,
                compose_content: read_text_arg(&file)?,
                environment_file: env_file,
                working_directory: workdir,
            };
            let compose = projects
                .create(&req)
                .await
                .context("Failed to create compose project")?;
            print_success(&format!(
                "Compose project {} created (id {})",
                compose.name, compose.id
            ));
            println!();
            print_compose_projects(projects.rows());
        }
        ComposeCommands::Update {
            id,
            name,
            file,
            description,
            env_file,
            workdir,
        } => {
            let id = resolve_id::<DockerCompose>(client, &id).await?;
            let req = UpdateCompose {
                name,
                description,
                compose_content: file.as_deref().map(read_text_arg).transpose()?,
                environment_file: env_file,
                working_directory: workdir,
            };
            projects
                .update(id, &req)
                .await
                .context("Failed to update compose project")?;
            print_success(&format!("Compose project {} updated", id));
            println!();
            print_compose_projects(projects.rows());
        }
        ComposeCommands::Delete { id, yes } => {
            delete_resource::<DockerCompose>(client, &id, yes).await?;
        }
        ComposeCommands::Deploy { id } => {
            let id = resolve_id::<DockerCompose>(client, &id).await?;
            let result = client
                .deploy_docker_compose(id)
                .await
                .context("Failed to deploy compose project")?;
            print_action("Deployment", &result);
        }
        ComposeCommands::Stop { id } => {
            let id = resolve_id::<DockerCompose>(client, &id).await?;
            let result = client
                .stop_docker_compose(id)
                .await
                .context("Failed to stop compose project")?;
            print_action("Stop", &result);
        }
        ComposeCommands::Validate { file } => {
            let content = read_text_arg(&file)?;
            let report = client
                .validate_docker_compose(&content)
                .await
                .context("Failed to validate compose file")?;
            if report.valid {
                print_success(&format!("Valid, {} service(s)", report.services.len()));
                for service in &report.services {
                    println!("  {} {}", "▸".cyan(), service);
                }
            } else {
                println!("{}", "✗ Invalid compose file".red().bold());
            }
            for error in &report.errors {
                println!("  {} {}", "error:".red(), error);
            }
        }
    }

    Ok(())
}

fn print_registries(registries: &[DockerRegistry]) {
    print_rows(registries, |r| {
        let default = if r.is_default { " (default)".green() } else { "".normal() };
        format!(
            "{} [{}] {}{}",
            r.url.dimmed(),
            r.registry_type,
            colorize_status(r.status.as_str()),
            default
        )
    });
}

fn print_images(images: &[DockerImage]) {
    print_rows(images, |i| {
        format!(
            "{} {}",
            format!(":{}", i.tag).dimmed(),
            colorize_status(i.build_status.as_str())
        )
    });
}

fn print_containers(containers: &[DockerContainer]) {
    print_rows(containers, |c| {
        let image = c.image_name.clone().unwrap_or_else(|| format!("image {}", c.image));
        format!("{} {}", image.dimmed(), colorize_status(c.status.as_str()))
    });
}

fn print_compose_projects(projects: &[DockerCompose]) {
    print_rows(projects, |p| colorize_status(p.status.as_str()).to_string());
}

fn fmt_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_bytes() {
        assert_eq!(fmt_bytes(512), "512 B");
        assert_eq!(fmt_bytes(1536), "1.5 KiB");
        assert_eq!(fmt_bytes(3 * 1024 * 1024 * 1024), "3.0 GiB");
    }
}
