//! List command - print the tasks in the configured list.

use anyhow::Result;

use super::Context;

/// Run the list command.
pub async fn run(ctx: &Context) -> Result<()> {
    let client = ctx.tasks_client()?;
    let tasks = client.list_tasks().await;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks (or the fetch failed; run with --verbose for details)");
        return Ok(());
    }

    for task in &tasks {
        let id = task.id.as_deref().unwrap_or("-");
        match task.due.as_deref() {
            Some(due) => println!("{}  {}  (due {})", id, task.title, due),
            None => println!("{}  {}", id, task.title),
        }
        if ctx.verbose
            && let Some(notes) = task.notes.as_deref()
        {
            for line in notes.lines() {
                println!("    {}", line);
            }
        }
    }

    Ok(())
}
