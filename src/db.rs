// Store module: contains the database boundary that the UI talks to. One
// method per SQL statement, all parameterized; the pool is the single
// shared connection resource, opened once and closed on exit.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use std::str::FromStr;

/// Handle to the record store. Owns the connection pool; cheap to clone,
/// but the process keeps a single instance and closes it exactly once.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

/// A department row as listed by the view query.
#[derive(Debug, sqlx::FromRow)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
}

/// A role row joined to its department name.
#[derive(Debug, sqlx::FromRow)]
pub struct RoleRow {
    pub id: i64,
    pub title: String,
    pub department: String,
    pub salary: f64,
}

/// An employee row joined to role, department and (optionally) manager.
/// `manager` is NULL when the employee has none, so the column stays
/// `Option` all the way to rendering.
#[derive(Debug, sqlx::FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub department: String,
    pub salary: f64,
    pub manager: Option<String>,
}

/// Label/id pair backing a selection-list prompt.
#[derive(Debug, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub name: String,
}

impl Store {
    /// Open the store configured from the environment variable
    /// `DATABASE_URL`, or fall back to a SQLite file in the per-user data
    /// directory (created on demand).
    pub async fn from_env() -> Result<Self> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let dir = dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("staffdesk");
                std::fs::create_dir_all(&dir).context("Failed to create data directory")?;
                format!("sqlite://{}", dir.join("staffdesk.db").display())
            }
        };
        Self::connect(&url).await
    }

    /// Connect to `url`, apply the embedded schema migrations and return a
    /// ready store. The pool is capped at one connection: every query in a
    /// session goes through the same shared handle.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {url}"))?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to open database")?;
        sqlx::migrate!()
            .run(&pool)
            .await
            .context("Failed to apply schema migrations")?;
        log::debug!("store ready at {url}");
        Ok(Store { pool })
    }

    /// Close the pool. Called once, on Exit.
    pub async fn close(self) {
        self.pool.close().await;
    }

    pub async fn departments(&self) -> Result<Vec<DepartmentRow>> {
        let rows = sqlx::query_as::<_, DepartmentRow>("SELECT id, name FROM department")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load departments")?;
        Ok(rows)
    }

    pub async fn roles(&self) -> Result<Vec<RoleRow>> {
        let sql = "\
            SELECT role.id, role.title, department.name AS department, role.salary \
            FROM role \
            JOIN department ON role.department_id = department.id";
        let rows = sqlx::query_as::<_, RoleRow>(sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load roles")?;
        Ok(rows)
    }

    pub async fn employees(&self) -> Result<Vec<EmployeeRow>> {
        let sql = "\
            SELECT employee.id, employee.first_name, employee.last_name, role.title, \
                   department.name AS department, role.salary, \
                   manager.first_name || ' ' || manager.last_name AS manager \
            FROM employee \
            JOIN role ON employee.role_id = role.id \
            JOIN department ON role.department_id = department.id \
            LEFT JOIN employee manager ON manager.id = employee.manager_id";
        let rows = sqlx::query_as::<_, EmployeeRow>(sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load employees")?;
        Ok(rows)
    }

    /// Roles as selection-list entries (label = title).
    pub async fn role_choices(&self) -> Result<Vec<Choice>> {
        let rows = sqlx::query_as::<_, Choice>("SELECT id, title AS name FROM role")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load roles")?;
        Ok(rows)
    }

    /// Employees as selection-list entries (label = full name).
    pub async fn employee_choices(&self) -> Result<Vec<Choice>> {
        let rows = sqlx::query_as::<_, Choice>(
            "SELECT id, first_name || ' ' || last_name AS name FROM employee",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load employees")?;
        Ok(rows)
    }

    /// Insert a department and return its new id.
    pub async fn add_department(&self, name: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO department (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .context("Failed to add department")?;
        let id = result.last_insert_rowid();
        log::debug!("inserted department {id}");
        Ok(id)
    }

    /// Insert a role and return its new id. The department must exist; the
    /// foreign key rejects the insert otherwise.
    pub async fn add_role(&self, title: &str, salary: f64, department_id: i64) -> Result<i64> {
        let result = sqlx::query("INSERT INTO role (title, salary, department_id) VALUES (?, ?, ?)")
            .bind(title)
            .bind(salary)
            .bind(department_id)
            .execute(&self.pool)
            .await
            .context("Failed to add role")?;
        let id = result.last_insert_rowid();
        log::debug!("inserted role {id}");
        Ok(id)
    }

    /// Insert an employee and return its new id. `manager_id` of `None`
    /// stores NULL ("no manager").
    pub async fn add_employee(
        &self,
        first_name: &str,
        last_name: &str,
        role_id: i64,
        manager_id: Option<i64>,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO employee (first_name, last_name, role_id, manager_id) VALUES (?, ?, ?, ?)",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(role_id)
        .bind(manager_id)
        .execute(&self.pool)
        .await
        .context("Failed to add employee")?;
        let id = result.last_insert_rowid();
        log::debug!("inserted employee {id}");
        Ok(id)
    }

    /// Point an employee at a new role. Returns the number of rows touched
    /// (0 when the employee id does not exist, 1 otherwise).
    pub async fn update_employee_role(&self, employee_id: i64, role_id: i64) -> Result<u64> {
        let result = sqlx::query("UPDATE employee SET role_id = ? WHERE id = ?")
            .bind(role_id)
            .bind(employee_id)
            .execute(&self.pool)
            .await
            .context("Failed to update employee role")?;
        Ok(result.rows_affected())
    }
}
