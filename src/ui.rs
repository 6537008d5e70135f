// UI layer: the interactive menu, built with `dialoguer`. One handler per
// action; each runs its short chain of reads, prompts for the remaining
// inputs, issues one write and falls back to the menu.

use crate::db::{Choice, Store};
use crate::table;
use anyhow::Result;
use console::style;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

const ACTIONS: [&str; 8] = [
    "View All Departments",
    "View All Roles",
    "View All Employees",
    "Add a Department",
    "Add a Role",
    "Add an Employee",
    "Update an Employee Role",
    "Exit",
];

/// Main interactive menu. Receives the store and runs a select loop until
/// the user chooses "Exit".
///
/// Error policy: a database failure inside a handler is reported as one
/// line and control comes straight back to this menu; only prompt I/O
/// errors (lost terminal, EOF) escape the loop through `?`.
pub async fn main_menu(store: &Store) -> Result<()> {
    loop {
        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&ACTIONS)
            .default(0)
            .interact()?;
        match selection {
            0 => view_departments(store).await?,
            1 => view_roles(store).await?,
            2 => view_employees(store).await?,
            3 => add_department(store).await?,
            4 => add_role(store).await?,
            5 => add_employee(store).await?,
            6 => update_employee_role(store).await?,
            _ => break,
        }
    }
    Ok(())
}

async fn view_departments(store: &Store) -> Result<()> {
    match store.departments().await {
        Ok(rows) => {
            let body: Vec<Vec<String>> = rows
                .iter()
                .map(|d| vec![d.id.to_string(), d.name.clone()])
                .collect();
            print!("{}", table::render(&["id", "name"], &body));
        }
        Err(e) => report_error(&e),
    }
    Ok(())
}

async fn view_roles(store: &Store) -> Result<()> {
    match store.roles().await {
        Ok(rows) => {
            let body: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.title.clone(),
                        r.department.clone(),
                        r.salary.to_string(),
                    ]
                })
                .collect();
            print!(
                "{}",
                table::render(&["id", "title", "department", "salary"], &body)
            );
        }
        Err(e) => report_error(&e),
    }
    Ok(())
}

async fn view_employees(store: &Store) -> Result<()> {
    match store.employees().await {
        Ok(rows) => {
            let body: Vec<Vec<String>> = rows
                .iter()
                .map(|e| {
                    vec![
                        e.id.to_string(),
                        e.first_name.clone(),
                        e.last_name.clone(),
                        e.title.clone(),
                        e.department.clone(),
                        e.salary.to_string(),
                        e.manager.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            let headers = [
                "id",
                "first_name",
                "last_name",
                "title",
                "department",
                "salary",
                "manager",
            ];
            print!("{}", table::render(&headers, &body));
        }
        Err(e) => report_error(&e),
    }
    Ok(())
}

async fn add_department(store: &Store) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("Enter the name of the department")
        .validate_with(|input: &String| validate_non_empty(input))
        .interact_text()?;

    let spinner = saving_spinner("Adding department...");
    let outcome = store.add_department(&name).await;
    spinner.finish_and_clear();
    match outcome {
        Ok(_) => report_success("Department added successfully!"),
        Err(e) => report_error(&e),
    }
    Ok(())
}

async fn add_role(store: &Store) -> Result<()> {
    let departments = match store.departments().await {
        Ok(rows) => rows,
        Err(e) => {
            report_error(&e);
            return Ok(());
        }
    };
    if departments.is_empty() {
        println!("No departments yet. Add a department first.");
        return Ok(());
    }

    let title: String = Input::new()
        .with_prompt("Enter the title of the role")
        .validate_with(|input: &String| validate_non_empty(input))
        .interact_text()?;
    let salary: f64 = Input::new()
        .with_prompt("Enter the salary for the role")
        .validate_with(|value: &f64| validate_salary(value))
        .interact_text()?;
    let labels: Vec<&str> = departments.iter().map(|d| d.name.as_str()).collect();
    let picked = Select::new()
        .with_prompt("Select the department for the role")
        .items(&labels)
        .default(0)
        .interact()?;
    let department_id = departments[picked].id;

    let spinner = saving_spinner("Adding role...");
    let outcome = store.add_role(&title, salary, department_id).await;
    spinner.finish_and_clear();
    match outcome {
        Ok(_) => report_success("Role added successfully!"),
        Err(e) => report_error(&e),
    }
    Ok(())
}

async fn add_employee(store: &Store) -> Result<()> {
    // Two independent reads, one after the other: roles first, then the
    // manager candidates.
    let roles = match store.role_choices().await {
        Ok(rows) => rows,
        Err(e) => {
            report_error(&e);
            return Ok(());
        }
    };
    let managers = match store.employee_choices().await {
        Ok(rows) => rows,
        Err(e) => {
            report_error(&e);
            return Ok(());
        }
    };
    if roles.is_empty() {
        println!("No roles yet. Add a role first.");
        return Ok(());
    }

    let first_name: String = Input::new()
        .with_prompt("Enter the first name of the employee")
        .validate_with(|input: &String| validate_non_empty(input))
        .interact_text()?;
    let last_name: String = Input::new()
        .with_prompt("Enter the last name of the employee")
        .validate_with(|input: &String| validate_non_empty(input))
        .interact_text()?;
    let role_id = select_choice("Select the role for the employee", &roles)?;

    // The manager list carries a trailing "None" entry mapping to NULL.
    let mut manager_labels: Vec<&str> = managers.iter().map(|c| c.name.as_str()).collect();
    manager_labels.push("None");
    let picked = Select::new()
        .with_prompt("Select the manager for the employee")
        .items(&manager_labels)
        .default(0)
        .interact()?;
    let manager_id = managers.get(picked).map(|c| c.id);

    let spinner = saving_spinner("Adding employee...");
    let outcome = store
        .add_employee(&first_name, &last_name, role_id, manager_id)
        .await;
    spinner.finish_and_clear();
    match outcome {
        Ok(_) => report_success("Employee added successfully!"),
        Err(e) => report_error(&e),
    }
    Ok(())
}

async fn update_employee_role(store: &Store) -> Result<()> {
    let employees = match store.employee_choices().await {
        Ok(rows) => rows,
        Err(e) => {
            report_error(&e);
            return Ok(());
        }
    };
    let roles = match store.role_choices().await {
        Ok(rows) => rows,
        Err(e) => {
            report_error(&e);
            return Ok(());
        }
    };
    if employees.is_empty() {
        println!("No employees to update.");
        return Ok(());
    }
    if roles.is_empty() {
        println!("No roles yet. Add a role first.");
        return Ok(());
    }

    let employee_id =
        select_choice("Select the employee whose role you want to update", &employees)?;
    let role_id = select_choice("Select the new role for the employee", &roles)?;

    let spinner = saving_spinner("Updating employee role...");
    let outcome = store.update_employee_role(employee_id, role_id).await;
    spinner.finish_and_clear();
    match outcome {
        Ok(_) => report_success("Employee role updated successfully!"),
        Err(e) => report_error(&e),
    }
    Ok(())
}

/// Show a selection list built from query results and return the id behind
/// the chosen label.
fn select_choice(prompt: &str, choices: &[Choice]) -> Result<i64> {
    let labels: Vec<&str> = choices.iter().map(|c| c.name.as_str()).collect();
    let picked = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(choices[picked].id)
}

fn validate_non_empty(input: &str) -> Result<(), &'static str> {
    if input.trim().is_empty() {
        Err("This field cannot be empty")
    } else {
        Ok(())
    }
}

fn validate_salary(value: &f64) -> Result<(), &'static str> {
    if value.is_finite() && *value >= 0.0 {
        Ok(())
    } else {
        Err("Please enter a valid non-negative number")
    }
}

fn saving_spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(msg);
    spinner
}

fn report_success(msg: &str) {
    println!("{}", style(msg).green());
}

fn report_error(err: &anyhow::Error) {
    println!("{} {:#}", style("Error:").red().bold(), err);
}

#[cfg(test)]
mod tests {
    use super::{validate_non_empty, validate_salary};

    #[test]
    fn non_empty_rejects_blank_input() {
        assert!(validate_non_empty("").is_err());
        assert!(validate_non_empty("   ").is_err());
        assert!(validate_non_empty("Sales").is_ok());
    }

    #[test]
    fn salary_accepts_non_negative_numbers() {
        assert!(validate_salary(&0.0).is_ok());
        assert!(validate_salary(&60000.0).is_ok());
        assert!(validate_salary(&49999.5).is_ok());
    }

    #[test]
    fn salary_rejects_negative_and_non_finite() {
        assert!(validate_salary(&-1.0).is_err());
        assert!(validate_salary(&f64::NAN).is_err());
        assert!(validate_salary(&f64::INFINITY).is_err());
    }
}
