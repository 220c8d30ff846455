//! In-memory catalog: a context holds databases, databases hold tables,
//! tables hold columns and rows. Every collection has a fixed capacity
//! ceiling and all mutation is keyed by name.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ExecError;

pub const MAX_DATABASES: usize = 32;
pub const MAX_TABLES: usize = 64;
pub const MAX_COLUMNS: usize = 64;
pub const MAX_ROWS: usize = 2048;

pub const DEFAULT_DATABASE: &str = "main";

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Trees handed to the evaluator are not necessarily parser output, so
/// names are validated again at this boundary.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

fn check_name(name: &str) -> Result<(), ExecError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(ExecError::InvalidName(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub cells: Vec<String>,
}

#[derive(Debug)]
pub struct Table {
    pub name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    fn new(name: &str) -> Self {
        Table {
            name: name.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn add_column(&mut self, name: &str, type_name: Option<&str>) -> Result<(), ExecError> {
        check_name(name)?;
        if self.columns.len() >= MAX_COLUMNS {
            return Err(ExecError::CapacityExceeded("column"));
        }
        if self.columns.iter().any(|c| c.name == name) {
            return Err(ExecError::ColumnExists(name.to_string()));
        }
        self.columns.push(Column {
            name: name.to_string(),
            type_name: type_name.map(str::to_string),
        });
        Ok(())
    }

    pub fn drop_column(&mut self, name: &str) -> Result<(), ExecError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| ExecError::ColumnNotFound(name.to_string()))?;
        self.columns.remove(index);
        for row in &mut self.rows {
            if index < row.cells.len() {
                row.cells.remove(index);
            }
        }
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Cells must already be aligned with the schema, one per column.
    pub fn push_row(&mut self, cells: Vec<String>) -> Result<(), ExecError> {
        if cells.len() != self.columns.len() {
            return Err(ExecError::ColumnValueMismatch);
        }
        if self.rows.len() >= MAX_ROWS {
            return Err(ExecError::CapacityExceeded("row"));
        }
        self.rows.push(Row { cells });
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> Result<Row, ExecError> {
        if index >= self.rows.len() {
            return Err(ExecError::MalformedStatement(format!(
                "row index {} out of range",
                index
            )));
        }
        Ok(self.rows.remove(index))
    }
}

#[derive(Debug)]
pub struct Database {
    pub name: String,
    tables: HashMap<String, Table>,
}

impl Database {
    fn new(name: &str) -> Self {
        Database {
            name: name.to_string(),
            tables: HashMap::new(),
        }
    }

    pub fn create_table(&mut self, name: &str) -> Result<&mut Table, ExecError> {
        check_name(name)?;
        if self.tables.len() >= MAX_TABLES {
            return Err(ExecError::CapacityExceeded("table"));
        }
        if self.tables.contains_key(name) {
            return Err(ExecError::TableExists(name.to_string()));
        }
        Ok(self
            .tables
            .entry(name.to_string())
            .or_insert_with(|| Table::new(name)))
    }

    pub fn drop_table(&mut self, name: &str) -> Result<(), ExecError> {
        self.tables
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ExecError::TableNotFound(name.to_string()))
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

/// Explicit catalog value passed into every entry point; there is no
/// process-wide instance. A `main` database exists from construction and
/// receives table operations.
#[derive(Debug)]
pub struct Context {
    databases: HashMap<String, Database>,
    current: String,
}

impl Context {
    pub fn new() -> Self {
        let mut databases = HashMap::new();
        databases.insert(
            DEFAULT_DATABASE.to_string(),
            Database::new(DEFAULT_DATABASE),
        );
        Context {
            databases,
            current: DEFAULT_DATABASE.to_string(),
        }
    }

    pub fn create_database(&mut self, name: &str) -> Result<(), ExecError> {
        check_name(name)?;
        if self.databases.len() >= MAX_DATABASES {
            return Err(ExecError::CapacityExceeded("database"));
        }
        if self.databases.contains_key(name) {
            return Err(ExecError::DatabaseExists(name.to_string()));
        }
        self.databases.insert(name.to_string(), Database::new(name));
        Ok(())
    }

    /// The current database cannot be dropped; it anchors table operations.
    pub fn drop_database(&mut self, name: &str) -> Result<(), ExecError> {
        if name == self.current {
            return Err(ExecError::Unsupported(
                "dropping the current database".to_string(),
            ));
        }
        self.databases
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ExecError::DatabaseNotFound(name.to_string()))
    }

    pub fn database(&self, name: &str) -> Option<&Database> {
        self.databases.get(name)
    }

    pub fn database_count(&self) -> usize {
        self.databases.len()
    }

    pub fn current_db(&self) -> &Database {
        &self.databases[&self.current]
    }

    pub fn current_db_mut(&mut self) -> &mut Database {
        self.databases
            .get_mut(&self.current)
            .expect("current database always exists")
    }
}
