use std::io::{self, BufRead, Write};

use anyhow::Result;
use taskpad_core::store::{StoreError, TaskStore};
use taskpad_core::task::render_task_line;

pub fn run(store: &mut TaskStore) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();
    run_loop(store, &mut input, &mut output)
}

/// One menu iteration per line of input. End of input behaves like the exit
/// option so a piped session terminates cleanly.
fn run_loop(store: &mut TaskStore, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    loop {
        print_menu(output)?;
        let Some(choice) = prompt(input, output, "Choose an option: ")? else {
            break;
        };
        match choice.trim() {
            "1" => {
                let Some(description) = prompt(input, output, "Enter task description: ")? else {
                    break;
                };
                match store.add(&description) {
                    Ok(_) => writeln!(output, "Task added successfully!")?,
                    Err(err) => writeln!(output, "Warning: failed to save tasks: {}", err)?,
                }
            }
            "2" => {
                if store.is_empty() {
                    writeln!(output, "No tasks available.")?;
                } else {
                    for task in store.tasks() {
                        writeln!(output, "{}", render_task_line(task))?;
                    }
                }
            }
            "3" => {
                let Some(raw) = prompt(input, output, "Enter task ID to toggle completion: ")?
                else {
                    break;
                };
                match parse_id(&raw) {
                    Some(id) => match store.toggle(id) {
                        Ok(task) => writeln!(
                            output,
                            "Task {} status updated to: {}",
                            task.id,
                            task.status_label()
                        )?,
                        Err(err) => report(output, err)?,
                    },
                    None => writeln!(output, "Task with ID {} not found.", raw.trim())?,
                }
            }
            "4" => {
                let Some(raw) = prompt(input, output, "Enter task ID to remove: ")? else {
                    break;
                };
                match parse_id(&raw) {
                    Some(id) => match store.remove(id) {
                        Ok(task) => writeln!(output, "Task {} removed.", task.id)?,
                        Err(err) => report(output, err)?,
                    },
                    None => writeln!(output, "Task with ID {} not found.", raw.trim())?,
                }
            }
            "5" => {
                let Some(raw) = prompt(input, output, "Enter task ID to update: ")? else {
                    break;
                };
                let Some(description) = prompt(input, output, "Enter new task description: ")?
                else {
                    break;
                };
                match parse_id(&raw) {
                    Some(id) => match store.update(id, &description) {
                        Ok(task) => writeln!(output, "Task {} description updated.", task.id)?,
                        Err(err) => report(output, err)?,
                    },
                    None => writeln!(output, "Task with ID {} not found.", raw.trim())?,
                }
            }
            "6" => {
                let Some(keyword) = prompt(input, output, "Enter search keyword: ")? else {
                    break;
                };
                let hits = store.search(&keyword);
                if hits.is_empty() {
                    writeln!(output, "No tasks found with keyword: {}", keyword)?;
                } else {
                    for task in hits {
                        writeln!(output, "{}", render_task_line(task))?;
                    }
                }
            }
            "7" => {
                writeln!(output, "Exiting...")?;
                break;
            }
            _ => writeln!(output, "Invalid option, please try again.")?,
        }
    }
    Ok(())
}

fn print_menu(output: &mut impl Write) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "Task Manager - Command-line Based")?;
    writeln!(output)?;
    writeln!(output, "1. Add a task")?;
    writeln!(output, "2. View all tasks")?;
    writeln!(output, "3. Toggle task completion")?;
    writeln!(output, "4. Remove a task")?;
    writeln!(output, "5. Update a task")?;
    writeln!(output, "6. Search tasks")?;
    writeln!(output, "7. Exit")?;
    writeln!(output)?;
    Ok(())
}

/// Returns None at end of input. The returned line keeps interior and edge
/// whitespace; only the line ending is stripped, so descriptions pass
/// through as typed.
fn prompt(input: &mut impl BufRead, output: &mut impl Write, text: &str) -> Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Non-numeric input reads as an id that matches nothing.
fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// In the menu loop a failed write is a warning: the in-memory mutation
/// already happened and the next mutation retries the write.
fn report(output: &mut impl Write, err: StoreError) -> Result<()> {
    match err {
        StoreError::NotFound(id) => writeln!(output, "Task with ID {} not found.", id)?,
        StoreError::Persist(err) => writeln!(output, "Warning: failed to save tasks: {}", err)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_session(store: &mut TaskStore, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes());
        let mut output = Vec::new();
        run_loop(store, &mut input, &mut output).expect("run loop");
        String::from_utf8(output).expect("utf8 output")
    }

    fn open_store(temp: &TempDir) -> TaskStore {
        TaskStore::open(&temp.path().join("tasks.json")).expect("open")
    }

    #[test]
    fn add_then_view_then_exit() {
        let temp = TempDir::new().expect("tempdir");
        let mut store = open_store(&temp);

        let out = run_session(&mut store, "1\nbuy milk\n2\n7\n");
        assert!(out.contains("Task added successfully!"));
        assert!(out.contains("1. buy milk [Pending]"));
        assert!(out.contains("Exiting..."));
    }

    #[test]
    fn view_on_empty_store_reports_no_tasks() {
        let temp = TempDir::new().expect("tempdir");
        let mut store = open_store(&temp);

        let out = run_session(&mut store, "2\n7\n");
        assert!(out.contains("No tasks available."));
    }

    #[test]
    fn toggle_reports_new_status() {
        let temp = TempDir::new().expect("tempdir");
        let mut store = open_store(&temp);
        store.add("walk dog").expect("add");

        let out = run_session(&mut store, "3\n1\n7\n");
        assert!(out.contains("Task 1 status updated to: Completed"));
    }

    #[test]
    fn non_numeric_id_reads_as_not_found() {
        let temp = TempDir::new().expect("tempdir");
        let mut store = open_store(&temp);
        store.add("walk dog").expect("add");

        let out = run_session(&mut store, "3\nabc\n7\n");
        assert!(out.contains("Task with ID abc not found."));
        assert!(!store.tasks()[0].completed);
    }

    #[test]
    fn remove_missing_id_reports_not_found() {
        let temp = TempDir::new().expect("tempdir");
        let mut store = open_store(&temp);
        store.add("only task").expect("add");

        let out = run_session(&mut store, "4\n9\n7\n");
        assert!(out.contains("Task with ID 9 not found."));
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn update_prompts_for_id_then_description() {
        let temp = TempDir::new().expect("tempdir");
        let mut store = open_store(&temp);
        store.add("draft email").expect("add");

        let out = run_session(&mut store, "5\n1\nsend email\n7\n");
        assert!(out.contains("Task 1 description updated."));
        assert_eq!(store.tasks()[0].description, "send email");
    }

    #[test]
    fn search_prints_matches_or_a_miss_message() {
        let temp = TempDir::new().expect("tempdir");
        let mut store = open_store(&temp);
        store.add("Buy Milk").expect("add");

        let out = run_session(&mut store, "6\nmilk\n6\ngarden\n7\n");
        assert!(out.contains("1. Buy Milk [Pending]"));
        assert!(out.contains("No tasks found with keyword: garden"));
    }

    #[test]
    fn invalid_option_reprompts() {
        let temp = TempDir::new().expect("tempdir");
        let mut store = open_store(&temp);

        let out = run_session(&mut store, "9\n7\n");
        assert!(out.contains("Invalid option, please try again."));
        assert!(out.contains("Exiting..."));
    }

    #[test]
    fn end_of_input_ends_the_loop() {
        let temp = TempDir::new().expect("tempdir");
        let mut store = open_store(&temp);

        let out = run_session(&mut store, "");
        assert!(out.contains("Choose an option: "));
    }
}
