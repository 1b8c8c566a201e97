//! Project command handlers

use ansflow_client::{AnsflowClient, ResourceTable};
use ansflow_core::domain::project::{MemberRole, Project, Visibility};
use ansflow_core::dto::project::{AddMember, CreateProject, UpdateProject};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use super::{delete_resource, print_rows};
use crate::id_resolver::resolve_id;
use crate::output::{
    confirm, fmt_opt_time, fmt_time, print_action, print_empty, print_header, print_success,
};

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects
    List,
    /// Show project details
    Get {
        /// Project ID or name
        id: String,
    },
    /// Create a project
    Create {
        /// Letters, digits, `-`, `_` and `.` only
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// private, internal or public
        #[arg(short, long, default_value = "private")]
        visibility: Visibility,

        #[arg(short, long)]
        repository: Option<String>,

        #[arg(short, long)]
        branch: Option<String>,
    },
    /// Update a project
    Update {
        /// Project ID or name
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        visibility: Option<Visibility>,

        #[arg(short, long)]
        repository: Option<String>,

        #[arg(short, long)]
        branch: Option<String>,

        /// Archive the project
        #[arg(long, conflicts_with = "activate")]
        archive: bool,

        /// Reactivate an archived project
        #[arg(long)]
        activate: bool,
    },
    /// Delete a project
    Delete {
        /// Project ID or name
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// List project members
    Members { id: String },
    /// Add a member to a project
    AddMember {
        /// Project ID or name
        id: String,

        /// User ID
        #[arg(short, long)]
        user: i64,

        /// maintainer, developer, reporter or guest
        #[arg(short, long, default_value = "developer")]
        role: MemberRole,
    },
    /// Remove a member from a project
    RemoveMember {
        /// Project ID or name
        id: String,

        /// User ID
        #[arg(short, long)]
        user: i64,

        #[arg(short, long)]
        yes: bool,
    },
    /// List deployment environments of a project
    Environments { id: String },
}

/// Handle project commands
pub async fn handle_project_command(
    command: ProjectCommands,
    client: &AnsflowClient,
) -> Result<()> {
    let mut projects: ResourceTable<Project> = ResourceTable::new(client.clone());

    match command {
        ProjectCommands::List => {
            projects.load().await.context("Failed to fetch projects")?;
            print_projects(projects.rows());
        }
        ProjectCommands::Get { id } => {
            let id = resolve_id::<Project>(client, &id).await?;
            let project = client
                .get_project(id)
                .await
                .context("Failed to fetch project")?;

            println!("{}", "Project Details:".bold());
            println!("  ID:         {}", project.id.to_string().cyan());
            println!("  Name:       {}", project.name.bold());
            if let Some(desc) = &project.description {
                println!("  Description: {}", desc);
            }
            println!("  Visibility: {}", project.visibility);
            println!(
                "  Active:     {}",
                if project.is_active { "yes".green() } else { "archived".yellow() }
            );
            if let Some(owner) = &project.owner_name {
                println!("  Owner:      {}", owner);
            }
            if let Some(repo) = &project.repository_url {
                println!("  Repository: {}", repo);
            }
            if let Some(branch) = &project.default_branch {
                println!("  Branch:     {}", branch);
            }
            if let Some(count) = project.members_count {
                println!("  Members:    {}", count);
            }
            if let Some(count) = project.pipelines_count {
                println!("  Pipelines:  {}", count);
            }
            println!("  Created:    {}", fmt_time(&project.created_at));
            println!("  Updated:    {}", fmt_opt_time(project.updated_at.as_ref()));
        }
        ProjectCommands::Create {
            name,
            description,
            visibility,
            repository,
            branch,
        } => {
            let req = CreateProject {
                description,
                visibility,
                repository_url: repository,
                default_branch: branch,
                ..CreateProject::new(name)
            };
            let project = projects
                .create(&req)
                .await
                .context("Failed to create project")?;
            print_success(&format!("Project {} created (id {})", project.name, project.id));
            println!();
            print_projects(projects.rows());
        }
        ProjectCommands::Update {
            id,
            name,
            description,
            visibility,
            repository,
            branch,
            archive,
            activate,
        } => {
            let id = resolve_id::<Project>(client, &id).await?;
            let is_active = match (archive, activate) {
                (true, _) => Some(false),
                (_, true) => Some(true),
                _ => None,
            };
            let req = UpdateProject {
                name,
                description,
                visibility,
                is_active,
                repository_url: repository,
                default_branch: branch,
            };
            projects
                .update(id, &req)
                .await
                .context("Failed to update project")?;
            print_success(&format!("Project {} updated", id));
            println!();
            print_projects(projects.rows());
        }
        ProjectCommands::Delete { id, yes } => {
            delete_resource::<Project>(client, &id, yes).await?;
        }
        ProjectCommands::Members { id } => {
            let id = resolve_id::<Project>(client, &id).await?;
            let members = client
                .get_project_members(id)
                .await
                .context("Failed to fetch project members")?;

            if members.is_empty() {
                print_empty("member");
                return Ok(());
            }
            print_header("member", members.len());
            for member in &members {
                let name = member
                    .username
                    .clone()
                    .unwrap_or_else(|| format!("user {}", member.user));
                println!(
                    "  {} {} {} [{}] joined {}",
                    "▸".cyan(),
                    name.bold(),
                    format!("#{}", member.user).dimmed(),
                    member.role,
                    fmt_opt_time(member.joined_at.as_ref()).dimmed()
                );
            }
        }
        ProjectCommands::AddMember { id, user, role } => {
            let id = resolve_id::<Project>(client, &id).await?;
            let result = client
                .add_project_member(id, &AddMember { user_id: user, role })
                .await
                .context("Failed to add project member")?;
            print_action("Adding member", &result);
        }
        ProjectCommands::RemoveMember { id, user, yes } => {
            let id = resolve_id::<Project>(client, &id).await?;
            if !confirm(&format!("Remove user {} from project {}?", user, id), yes)? {
                return Ok(());
            }
            let result = client
                .remove_project_member(id, user)
                .await
                .context("Failed to remove project member")?;
            print_action("Removing member", &result);
        }
        ProjectCommands::Environments { id } => {
            let id = resolve_id::<Project>(client, &id).await?;
            let environments = client
                .get_project_environments(id)
                .await
                .context("Failed to fetch project environments")?;

            if environments.is_empty() {
                print_empty("environment");
                return Ok(());
            }
            print_header("environment", environments.len());
            for env in &environments {
                println!(
                    "  {} {} [{}] {}",
                    "▸".cyan(),
                    env.name.bold(),
                    env.environment_type,
                    env.url.as_deref().unwrap_or("").dimmed()
                );
            }
        }
    }

    Ok(())
}

fn print_projects(projects: &[Project]) {
    print_rows(projects, |p| {
        let state = if p.is_active { "".normal() } else { " archived".yellow() };
        format!("[{}]{}", p.visibility, state)
    });
}
