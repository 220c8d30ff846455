//! Walks a parsed statement tree and maps it onto catalog operations.

use std::cmp::Ordering;

use crate::ast::{Node, NodeKind};
use crate::error::ExecError;
use crate::storage::{Context, Table};

pub struct Evaluator<'a> {
    ctx: &'a mut Context,
}

impl<'a> Evaluator<'a> {
    pub fn new(ctx: &'a mut Context) -> Self {
        Evaluator { ctx }
    }

    /// Dispatch on the root node kind and return a printable status string.
    pub fn evaluate(&mut self, node: &Node) -> Result<String, ExecError> {
        match node.kind {
            NodeKind::CreateDatabase => self.eval_create_database(node),
            NodeKind::CreateTable => self.eval_create_table(node),
            NodeKind::DropTable => self.eval_drop_table(node),
            NodeKind::Insert => self.eval_insert(node),
            NodeKind::Select => self.eval_select(node),
            _ => Err(ExecError::MalformedStatement(format!(
                "{} is not a statement root",
                node.kind.name()
            ))),
        }
    }

    fn eval_create_database(&mut self, node: &Node) -> Result<String, ExecError> {
        if node.children.len() != 1 {
            return Err(ExecError::MalformedStatement(
                "CREATE DATABASE takes exactly one name".to_string(),
            ));
        }
        let name = identifier_text(child(node, 0)?)?;
        self.ctx.create_database(name)?;
        Ok(format!("✅ Database '{}' created", name))
    }

    fn eval_create_table(&mut self, node: &Node) -> Result<String, ExecError> {
        let name = identifier_text(child(node, 0)?)?.to_string();
        let list = child(node, 1)?;
        expect_kind(list, NodeKind::ColumnList)?;

        let mut defs: Vec<(String, Option<String>)> = Vec::new();
        for def in &list.children {
            expect_kind(def, NodeKind::ColumnDef)?;
            let column = identifier_text(child(def, 0)?)?.to_string();
            let type_name = match def.child(1) {
                Some(n) => Some(identifier_text(n)?.to_string()),
                None => None,
            };
            defs.push((column, type_name));
        }

        let db = self.ctx.current_db_mut();
        let mut failure = None;
        {
            let table = db.create_table(&name)?;
            for (column, type_name) in &defs {
                if let Err(err) = table.add_column(column, type_name.as_deref()) {
                    failure = Some(err);
                    break;
                }
            }
        }
        // A half-built table must not stay in the catalog.
        if let Some(err) = failure {
            db.drop_table(&name).ok();
            return Err(err);
        }
        Ok(format!(
            "✅ Table '{}' created with {} column(s)",
            name,
            defs.len()
        ))
    }

    fn eval_drop_table(&mut self, node: &Node) -> Result<String, ExecError> {
        let name = identifier_text(child(node, 0)?)?;
        self.ctx.current_db_mut().drop_table(name)?;
        Ok(format!("🗑️ Table '{}' dropped", name))
    }

    fn eval_insert(&mut self, node: &Node) -> Result<String, ExecError> {
        let table_name = identifier_text(child(node, 0)?)?.to_string();
        let list = child(node, 1)?;
        expect_kind(list, NodeKind::ColumnList)?;

        let mut columns = Vec::new();
        for def in &list.children {
            expect_kind(def, NodeKind::ColumnDef)?;
            columns.push(identifier_text(child(def, 0)?)?.to_string());
        }

        let table = self
            .ctx
            .current_db_mut()
            .table_mut(&table_name)
            .ok_or_else(|| ExecError::TableNotFound(table_name.clone()))?;

        let mut indices = Vec::new();
        for column in &columns {
            let index = table
                .column_index(column)
                .ok_or_else(|| ExecError::ColumnNotFound(column.clone()))?;
            indices.push(index);
        }

        let mut inserted = 0;
        for values in node.children.iter().skip(2) {
            expect_kind(values, NodeKind::ValueList)?;
            if values.children.len() != columns.len() {
                return Err(ExecError::ColumnValueMismatch);
            }
            let mut cells = vec![String::new(); table.columns().len()];
            for (value, &index) in values.children.iter().zip(&indices) {
                cells[index] = value_text(value)?.to_string();
            }
            table.push_row(cells)?;
            inserted += 1;
        }
        Ok(format!(
            "✅ Inserted {} row(s) into '{}'",
            inserted, table_name
        ))
    }

    fn eval_select(&mut self, node: &Node) -> Result<String, ExecError> {
        let spec = child(node, 0)?;
        let table_name = identifier_text(child(node, 1)?)?;
        let where_clause = node.child(2);

        let table = self
            .ctx
            .current_db()
            .table(table_name)
            .ok_or_else(|| ExecError::TableNotFound(table_name.to_string()))?;

        let (header, indices) = projection(table, spec)?;

        let mut result = String::new();
        let header_line = header.join(" | ");
        result.push_str(&header_line);
        result.push('\n');
        result.push_str(&"-".repeat(header_line.len()));
        result.push('\n');

        let mut matched = 0;
        for row in table.rows() {
            if let Some(clause) = where_clause {
                if !eval_where(table, &row.cells, clause)? {
                    continue;
                }
            }
            let cells: Vec<&str> = indices.iter().map(|&i| row.cells[i].as_str()).collect();
            result.push_str(&cells.join(" | "));
            result.push('\n');
            matched += 1;
        }

        if matched == 0 {
            return Err(ExecError::NoRows);
        }
        Ok(result)
    }
}

/// Resolve the select column spec (bare `*` literal or identifier list)
/// into header names and schema indices.
fn projection(table: &Table, spec: &Node) -> Result<(Vec<String>, Vec<usize>), ExecError> {
    match spec.kind {
        NodeKind::Literal if spec.text.as_deref() == Some("*") => {
            let header = table.columns().iter().map(|c| c.name.clone()).collect();
            let indices = (0..table.columns().len()).collect();
            Ok((header, indices))
        }
        NodeKind::ColumnList => {
            let mut header = Vec::new();
            let mut indices = Vec::new();
            for ident in &spec.children {
                let name = identifier_text(ident)?;
                let index = table
                    .column_index(name)
                    .ok_or_else(|| ExecError::ColumnNotFound(name.to_string()))?;
                header.push(name.to_string());
                indices.push(index);
            }
            Ok((header, indices))
        }
        _ => Err(ExecError::MalformedStatement(format!(
            "{} is not a column spec",
            spec.kind.name()
        ))),
    }
}

/// One `column <op> literal` comparison. The grammar allows right-nested
/// chains and bare operands; both are rejected here.
fn eval_where(table: &Table, cells: &[String], clause: &Node) -> Result<bool, ExecError> {
    expect_kind(clause, NodeKind::WhereClause)?;
    let expr = child(clause, 0)?;
    if expr.kind != NodeKind::Operator {
        return Err(ExecError::Unsupported(
            "WHERE clause without a comparison".to_string(),
        ));
    }

    let left = child(expr, 0)?;
    let right = child(expr, 1)?;
    if right.kind == NodeKind::Operator {
        return Err(ExecError::Unsupported("chained comparison".to_string()));
    }
    if right.kind != NodeKind::Literal {
        return Err(ExecError::Unsupported(
            "comparison against a non-literal".to_string(),
        ));
    }

    let column = identifier_text(left)?;
    let index = table
        .column_index(column)
        .ok_or_else(|| ExecError::ColumnNotFound(column.to_string()))?;
    let cell = cells.get(index).map(String::as_str).unwrap_or("");
    let target = right.text.as_deref().unwrap_or("");
    let op = expr.text.as_deref().unwrap_or("");
    compare(cell, target, op)
}

/// Numeric comparison when both sides parse as numbers, else string order.
fn compare(left: &str, right: &str, op: &str) -> Result<bool, ExecError> {
    let ordering = match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => left.cmp(right),
    };
    let result = match op {
        "=" => ordering == Ordering::Equal,
        "!=" => ordering != Ordering::Equal,
        "<" => ordering == Ordering::Less,
        ">" => ordering == Ordering::Greater,
        "<=" => ordering != Ordering::Greater,
        ">=" => ordering != Ordering::Less,
        _ => {
            return Err(ExecError::Unsupported(format!("operator '{}'", op)));
        }
    };
    Ok(result)
}

fn child<'n>(node: &'n Node, index: usize) -> Result<&'n Node, ExecError> {
    node.child(index).ok_or_else(|| {
        ExecError::MalformedStatement(format!(
            "{} node is missing child {}",
            node.kind.name(),
            index
        ))
    })
}

fn expect_kind(node: &Node, kind: NodeKind) -> Result<(), ExecError> {
    if node.kind == kind {
        Ok(())
    } else {
        Err(ExecError::MalformedStatement(format!(
            "expected {} node, got {}",
            kind.name(),
            node.kind.name()
        )))
    }
}

fn identifier_text(node: &Node) -> Result<&str, ExecError> {
    if node.kind != NodeKind::Identifier {
        return Err(ExecError::MalformedStatement(format!(
            "expected IDENTIFIER node, got {}",
            node.kind.name()
        )));
    }
    Ok(node.text.as_deref().unwrap_or(""))
}

/// A VALUES entry must be a plain literal or identifier.
fn value_text(node: &Node) -> Result<&str, ExecError> {
    match node.kind {
        NodeKind::Literal | NodeKind::Identifier => Ok(node.text.as_deref().unwrap_or("")),
        _ => Err(ExecError::Unsupported(
            "expression in VALUES list".to_string(),
        )),
    }
}
