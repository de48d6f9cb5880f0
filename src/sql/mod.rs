//! Command parser module
//!
//! Turns one `;`-terminated command line into a [`Statement`]. Commands are
//! whitespace-separated tokens; the first token selects the command.

use crate::error::{StoreError, StoreResult};
use crate::predicate::WhereClause;
use crate::types::{NO_PRIMARY_KEY, PRIMARY_KEY_PREFIX, STATEMENT_TERMINATOR};

/// Parsed commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    CreateTable(CreateTableStmt),
    DropTable(String),
    Insert(InsertStmt),
    Select(SelectStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
    Truncate(String),
    ShowTables,
    Describe(String),
    Save(String),
    Load(String),
    NewDatabase,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableStmt {
    pub table_name: String,
    pub columns: Vec<String>,
    pub primary_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStmt {
    pub table_name: String,
    pub rows: Vec<Vec<String>>,
}

/// Column selection of a `select`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    All,
    Columns(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStmt {
    pub table_name: String,
    pub projection: Projection,
    pub where_clause: Option<WhereClause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStmt {
    pub table_name: String,
    pub assignments: Vec<(String, String)>,
    pub where_clause: Option<WhereClause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteStmt {
    pub table_name: String,
    pub where_clause: Option<WhereClause>,
}

/// Split a command into tokens, dropping the trailing `;`
pub fn tokenize(sql: &str) -> Vec<String> {
    let sql = sql.trim();
    let sql = sql.strip_suffix(STATEMENT_TERMINATOR).unwrap_or(sql);
    sql.split_whitespace().map(str::to_string).collect()
}

/// Parse a command string into a statement
pub fn parse(sql: &str) -> StoreResult<Statement> {
    parse_tokens(&tokenize(sql))
}

/// Parse an already tokenized command
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> StoreResult<Statement> {
    let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
    let Some((keyword, args)) = tokens.split_first() else {
        return Err(StoreError::invalid("empty command"));
    };

    match keyword.to_ascii_lowercase().as_str() {
        "create" => parse_create_table(args),
        "drop" => single_name("drop", args).map(Statement::DropTable),
        "insert" => parse_insert(args),
        "select" => parse_select(args),
        "update" => parse_update(args),
        "delete" => parse_delete(args),
        "truncate" => single_name("truncate", args).map(Statement::Truncate),
        "show" => match args {
            [] => Ok(Statement::ShowTables),
            [t] if t.eq_ignore_ascii_case("tables") => Ok(Statement::ShowTables),
            _ => Err(StoreError::invalid("usage: show tables;")),
        },
        "see" => single_name("see", args).map(Statement::Describe),
        "save" => single_name("save", args).map(Statement::Save),
        "load" => single_name("load", args).map(Statement::Load),
        "new" => match args {
            [] => Ok(Statement::NewDatabase),
            [d] if d.eq_ignore_ascii_case("database") => Ok(Statement::NewDatabase),
            _ => Err(StoreError::invalid("usage: new database;")),
        },
        "exit" if args.is_empty() => Ok(Statement::Exit),
        other => Err(StoreError::invalid(format!("unknown command '{}'", other))),
    }
}

fn single_name(command: &str, args: &[&str]) -> StoreResult<String> {
    match args {
        [name] => Ok(name.to_string()),
        _ => Err(StoreError::invalid(format!("usage: {} <name>;", command))),
    }
}

/// Split `values` on commas, trimming every entry
fn split_list(values: &str) -> Vec<String> {
    values.split(',').map(|v| v.trim().to_string()).collect()
}

/// Split off an optional trailing `where` clause after `fixed` leading tokens
fn split_where<'a>(
    command: &str,
    args: &'a [&'a str],
    fixed: usize,
) -> StoreResult<(&'a [&'a str], Option<WhereClause>)> {
    if args.len() < fixed {
        return Err(StoreError::invalid(format!("{}: missing arguments", command)));
    }

    let (head, tail) = args.split_at(fixed);
    match tail.split_first() {
        None => Ok((head, None)),
        Some((kw, clause)) if kw.eq_ignore_ascii_case("where") => {
            Ok((head, Some(WhereClause::parse(clause)?)))
        }
        Some((unexpected, _)) => Err(StoreError::invalid(format!(
            "{}: expected 'where', found '{}'",
            command, unexpected
        ))),
    }
}

/// Split `<name> <list>... [where ...]`.
///
/// The list may be spread over several tokens (`id, name`); the tokens up
/// to `where` are returned unjoined, so spaces inside the list are dropped
/// once the caller concatenates them.
fn split_list_where<'a>(
    command: &str,
    args: &'a [&'a str],
) -> StoreResult<(String, Vec<&'a str>, Option<WhereClause>)> {
    let Some((table_name, rest)) = args.split_first() else {
        return Err(StoreError::invalid(format!("{}: missing arguments", command)));
    };

    let end = rest
        .iter()
        .position(|t| t.eq_ignore_ascii_case("where"))
        .unwrap_or(rest.len());
    let (list, tail) = rest.split_at(end);
    if list.is_empty() {
        return Err(StoreError::invalid(format!("{}: missing arguments", command)));
    }

    let where_clause = match tail.split_first() {
        Some((_, clause)) => Some(WhereClause::parse(clause)?),
        None => None,
    };

    Ok((table_name.to_string(), list.to_vec(), where_clause))
}

fn parse_create_table(args: &[&str]) -> StoreResult<Statement> {
    let usage = || StoreError::invalid("usage: create <name> (<col>,...) primarykey=<col>|none;");

    let [table_name, columns @ .., key] = args else {
        return Err(usage());
    };
    if columns.is_empty() {
        return Err(usage());
    }

    let primary_key = match key.strip_prefix(PRIMARY_KEY_PREFIX) {
        Some(NO_PRIMARY_KEY) => None,
        Some("") | None => return Err(usage()),
        Some(col) => Some(col.to_string()),
    };

    let columns = columns.concat();
    let inner = columns
        .strip_prefix('(')
        .and_then(|c| c.strip_suffix(')'))
        .ok_or_else(usage)?;

    Ok(Statement::CreateTable(CreateTableStmt {
        table_name: table_name.to_string(),
        columns: split_list(inner),
        primary_key,
    }))
}

fn parse_insert(args: &[&str]) -> StoreResult<Statement> {
    let Some((table_name, tuples)) = args.split_first() else {
        return Err(StoreError::invalid("usage: insert <name> (<v>,...) ...;"));
    };

    let text = tuples.join(" ");
    let mut rest = text.trim_start();
    let mut rows = Vec::new();
    while !rest.is_empty() {
        let body = rest
            .strip_prefix('(')
            .ok_or_else(|| StoreError::invalid(format!("insert: expected '(' at '{}'", rest)))?;
        let end = body
            .find(')')
            .ok_or_else(|| StoreError::invalid("insert: unclosed value tuple"))?;
        rows.push(split_list(&body[..end]));
        rest = body[end + 1..].trim_start();
    }

    if rows.is_empty() {
        return Err(StoreError::invalid("insert: no values given"));
    }

    Ok(Statement::Insert(InsertStmt {
        table_name: table_name.to_string(),
        rows,
    }))
}

fn parse_select(args: &[&str]) -> StoreResult<Statement> {
    let (table_name, list, where_clause) = split_list_where("select", args)?;

    let projection = match list.as_slice() {
        ["*"] => Projection::All,
        list if list.iter().any(|t| t.contains('*')) => {
            return Err(StoreError::invalid("select: '*' cannot be combined with columns"));
        }
        list => {
            let columns = split_list(&list.concat());
            if columns.iter().any(String::is_empty) {
                return Err(StoreError::invalid("select: empty column name"));
            }
            Projection::Columns(columns)
        }
    };

    Ok(Statement::Select(SelectStmt {
        table_name,
        projection,
        where_clause,
    }))
}

fn parse_update(args: &[&str]) -> StoreResult<Statement> {
    let (table_name, list, where_clause) = split_list_where("update", args)?;

    let assignments = list
        .concat()
        .split(',')
        .map(|pair| match pair.split_once('=') {
            Some((col, val)) if !col.is_empty() => Ok((col.to_string(), val.to_string())),
            _ => Err(StoreError::invalid(format!(
                "update: expected <column>=<value>, found '{}'",
                pair
            ))),
        })
        .collect::<StoreResult<Vec<_>>>()?;

    Ok(Statement::Update(UpdateStmt {
        table_name,
        assignments,
        where_clause,
    }))
}

fn parse_delete(args: &[&str]) -> StoreResult<Statement> {
    let (head, where_clause) = split_where("delete", args, 1)?;

    Ok(Statement::Delete(DeleteStmt {
        table_name: head[0].to_string(),
        where_clause,
    }))
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
