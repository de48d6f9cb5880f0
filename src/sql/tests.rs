use super::*;
use crate::predicate::{Combinator, Condition};

fn strings(vals: &[&str]) -> Vec<String> {
    vals.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_tokenize() {
    assert_eq!(
        tokenize("  select  t *   where id==1 ;"),
        strings(&["select", "t", "*", "where", "id==1"])
    );
    assert_eq!(tokenize("show;"), strings(&["show"]));
    assert!(tokenize(";").is_empty());
}

#[test]
fn test_parse_create_table() {
    let expected = Statement::CreateTable(CreateTableStmt {
        table_name: "users".to_string(),
        columns: strings(&["id", "name"]),
        primary_key: Some("id".to_string()),
    });
    assert_eq!(parse("create users (id,name) primarykey=id;").unwrap(), expected);
    assert_eq!(parse("create users (id, name) primarykey=id;").unwrap(), expected);
    assert_eq!(parse("CREATE users ( id , name ) primarykey=id").unwrap(), expected);
}

#[test]
fn test_parse_create_table_without_key() {
    let stmt = parse("create log (msg) primarykey=none;").unwrap();
    assert_eq!(
        stmt,
        Statement::CreateTable(CreateTableStmt {
            table_name: "log".to_string(),
            columns: strings(&["msg"]),
            primary_key: None,
        })
    );
}

#[test]
fn test_parse_create_table_errors() {
    for bad in [
        "create users (id,name);",
        "create users primarykey=id;",
        "create users id,name primarykey=id;",
        "create users (id) primarykey=;",
        "create;",
    ] {
        assert!(
            matches!(parse(bad), Err(StoreError::InvalidCommand(_))),
            "{} should be rejected",
            bad
        );
    }
}

#[test]
fn test_parse_insert_multiple_tuples() {
    let stmt = parse("insert users (1,alice) (2, bob) (3,carol smith);").unwrap();
    assert_eq!(
        stmt,
        Statement::Insert(InsertStmt {
            table_name: "users".to_string(),
            rows: vec![
                strings(&["1", "alice"]),
                strings(&["2", "bob"]),
                strings(&["3", "carol smith"]),
            ],
        })
    );
}

#[test]
fn test_parse_insert_errors() {
    assert!(matches!(parse("insert users;"), Err(StoreError::InvalidCommand(_))));
    assert!(matches!(parse("insert users 1,2;"), Err(StoreError::InvalidCommand(_))));
    assert!(matches!(parse("insert users (1,2;"), Err(StoreError::InvalidCommand(_))));
}

#[test]
fn test_parse_select() {
    let stmt = parse("select users * ;").unwrap();
    assert_eq!(
        stmt,
        Statement::Select(SelectStmt {
            table_name: "users".to_string(),
            projection: Projection::All,
            where_clause: None,
        })
    );

    let stmt = parse("select users name,id where id>1 or name_like_a;").unwrap();
    let clause = WhereClause::single(Condition::parse("id>1").unwrap())
        .then(Combinator::Or, Condition::parse("name_like_a").unwrap());
    assert_eq!(
        stmt,
        Statement::Select(SelectStmt {
            table_name: "users".to_string(),
            projection: Projection::Columns(strings(&["name", "id"])),
            where_clause: Some(clause),
        })
    );
}

#[test]
fn test_parse_select_errors() {
    assert!(matches!(parse("select users;"), Err(StoreError::InvalidCommand(_))));
    assert!(matches!(
        parse("select users * id==1;"),
        Err(StoreError::InvalidCommand(_))
    ));
    assert!(matches!(
        parse("select users * where;"),
        Err(StoreError::InvalidCommand(_))
    ));
    assert!(matches!(
        parse("select users * where id"),
        Err(StoreError::NoOperatorFound(_))
    ));
    assert!(matches!(parse("select users a,,b;"), Err(StoreError::InvalidCommand(_))));
}

#[test]
fn test_parse_select_column_list_with_spaces() {
    let stmt = parse("select users id, name where id==1;").unwrap();
    assert_eq!(
        stmt,
        Statement::Select(SelectStmt {
            table_name: "users".to_string(),
            projection: Projection::Columns(strings(&["id", "name"])),
            where_clause: Some(WhereClause::single(Condition::parse("id==1").unwrap())),
        })
    );

    assert!(matches!(parse("select users id ,name;").unwrap(), Statement::Select(_)));
    assert!(matches!(parse("select users * , id;"), Err(StoreError::InvalidCommand(_))));
    assert!(matches!(
        parse("select users where id==1;"),
        Err(StoreError::InvalidCommand(_))
    ));
}

#[test]
fn test_parse_update() {
    let stmt = parse("update users name=zed,age=4 where id==1;").unwrap();
    assert_eq!(
        stmt,
        Statement::Update(UpdateStmt {
            table_name: "users".to_string(),
            assignments: vec![
                ("name".to_string(), "zed".to_string()),
                ("age".to_string(), "4".to_string()),
            ],
            where_clause: Some(WhereClause::single(Condition::parse("id==1").unwrap())),
        })
    );

    assert!(matches!(parse("update users name;"), Err(StoreError::InvalidCommand(_))));
    assert!(matches!(parse("update users =x;"), Err(StoreError::InvalidCommand(_))));
}

#[test]
fn test_parse_update_assignments_with_spaces() {
    let stmt = parse("update users name=zed, age=4;").unwrap();
    assert_eq!(
        stmt,
        Statement::Update(UpdateStmt {
            table_name: "users".to_string(),
            assignments: vec![
                ("name".to_string(), "zed".to_string()),
                ("age".to_string(), "4".to_string()),
            ],
            where_clause: None,
        })
    );
}

#[test]
fn test_parse_delete() {
    assert_eq!(
        parse("delete users;").unwrap(),
        Statement::Delete(DeleteStmt {
            table_name: "users".to_string(),
            where_clause: None,
        })
    );
    assert!(matches!(
        parse("delete users WHERE id==1;").unwrap(),
        Statement::Delete(DeleteStmt {
            where_clause: Some(_),
            ..
        })
    ));
}

#[test]
fn test_parse_simple_commands() {
    assert_eq!(parse("drop users;").unwrap(), Statement::DropTable("users".to_string()));
    assert_eq!(parse("truncate users;").unwrap(), Statement::Truncate("users".to_string()));
    assert_eq!(parse("see users;").unwrap(), Statement::Describe("users".to_string()));
    assert_eq!(parse("show;").unwrap(), Statement::ShowTables);
    assert_eq!(parse("show tables;").unwrap(), Statement::ShowTables);
    assert_eq!(parse("save snap;").unwrap(), Statement::Save("snap".to_string()));
    assert_eq!(parse("load snap;").unwrap(), Statement::Load("snap".to_string()));
    assert_eq!(parse("new database;").unwrap(), Statement::NewDatabase);
    assert_eq!(parse("exit;").unwrap(), Statement::Exit);
}

#[test]
fn test_parse_invalid_commands() {
    for bad in ["", "frobnicate t;", "drop;", "drop a b;", "show me;", "exit now;"] {
        assert!(
            matches!(parse(bad), Err(StoreError::InvalidCommand(_))),
            "{:?} should be rejected",
            bad
        );
    }
}

#[test]
fn test_parse_tokens_directly() {
    let stmt = parse_tokens(&["delete", "t", "where", "a==1", "and", "b==2"]).unwrap();
    match stmt {
        Statement::Delete(DeleteStmt {
            table_name,
            where_clause: Some(clause),
        }) => {
            assert_eq!(table_name, "t");
            assert_eq!(clause.to_string(), "a==1 and b==2");
        }
        other => panic!("unexpected statement {:?}", other),
    }
}
