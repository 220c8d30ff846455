use std::io::{self, Write};

use minisql::integration::process_query;
use minisql::parser::parse_sql;
use minisql::storage::Context;

fn main() {
    let mut ctx = Context::new();

    loop {
        print!("sql> ");
        io::stdout().flush().unwrap();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).unwrap() == 0 {
            break;
        }
        let query = line.trim();

        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("exit") {
            println!("👋 Bye");
            break;
        }
        if let Some(rest) = query.strip_prefix(".ast ") {
            match parse_sql(rest) {
                Ok(tree) => print!("{}", tree.render()),
                Err(e) => eprintln!("{}", e),
            }
            continue;
        }
        if let Some(rest) = query.strip_prefix(".json ") {
            match parse_sql(rest) {
                Ok(tree) => match serde_json::to_string_pretty(&tree) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Serialization error: {}", e),
                },
                Err(e) => eprintln!("{}", e),
            }
            continue;
        }

        match process_query(&mut ctx, query) {
            Ok(result) => println!("{}", result),
            Err(e) => eprintln!("{}", e),
        }
    }
}
