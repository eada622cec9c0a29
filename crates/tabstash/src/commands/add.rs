//! Add command - file a new task whose notes carry tab URLs.

use anyhow::{Result, bail};
use clap::Args;

use tabstash_types::{TabRef, Task, next_day_at_midnight};

use super::Context;

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task title
    pub title: String,

    /// Tab URL to include in the notes (repeatable)
    #[arg(long = "url")]
    pub urls: Vec<String>,

    /// Free-form note placed above the URLs
    #[arg(long)]
    pub note: Option<String>,

    /// Set the due date to tomorrow at midnight
    #[arg(long)]
    pub due_tomorrow: bool,
}

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let tabs: Vec<TabRef> = args
        .urls
        .iter()
        .map(|url| TabRef::new(url.clone(), url.clone()))
        .collect();
    let due = args.due_tomorrow.then(next_day_at_midnight);

    let mut task = Task::from_tabs(args.title.as_str(), &tabs, due);
    if let Some(note) = args.note {
        task.notes = Some(match task.notes.take() {
            Some(urls) => format!("{}\n{}", note, urls),
            None => note,
        });
    }

    let client = ctx.tasks_client()?;
    let Some(created) = client.insert_task(&task).await else {
        bail!("Task creation failed (see logs for details)");
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else if created.is_created() {
        println!(
            "Created task {} ({})",
            created.title,
            created.id.as_deref().unwrap_or_default()
        );
    } else {
        println!("Created task {} (server returned no id)", created.title);
    }

    Ok(())
}
